// src/lib.rs
//! Diorama
//!
//! A small room-scene viewer built on wgpu and winit: a three-walled room
//! with a spinning cube on a pedestal and a hovering sphere, lit by a
//! shadow-casting sun and two accent lights, framed by a damped orbit
//! camera.

pub mod app;
pub mod gfx;
pub mod prelude;
pub mod room;
pub mod wgpu_utils;

// Re-export main types for convenience
pub use app::DioramaApp;

/// Creates a default application instance
pub fn default() -> DioramaApp {
    DioramaApp::new()
}
