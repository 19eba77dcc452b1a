//! # Graphics Module
//!
//! This module contains all graphics-related functionality for the room viewer,
//! including camera systems, rendering pipelines, scene management, and resource handling.
//!
//! ## Architecture Overview
//!
//! The graphics system is organized into several key components:
//!
//! - **Camera System** ([`camera`]) - Orbit camera with damped controls
//! - **Geometry** ([`geometry`]) - Procedural primitives (cube, sphere, plane, cylinder)
//! - **Rendering Pipeline** ([`rendering`]) - PBR rendering with shadow mapping
//! - **Scene Management** ([`scene`]) - Objects, transforms, and the light rig
//! - **Resource Management** ([`resources`]) - Materials, textures, and GPU resources
//!
//! ## Usage
//!
//! The graphics system is primarily used through the [`RenderEngine`] and [`Scene`] types:
//!
//! ```no_run
//! use diorama::gfx::{RenderEngine, scene::Scene};
//!
//! // The render engine is typically created automatically by DioramaApp
//! // let render_engine = RenderEngine::new(window, width, height).await;
//!
//! // Scene management is handled through the main app
//! // let mut scene = Scene::new(camera_manager);
//! ```
//!
//! [`Scene`]: scene::Scene

pub mod camera;
pub mod geometry;
pub mod rendering;
pub mod resources;
pub mod scene;

// Re-export commonly used types
pub use camera::orbit_camera::OrbitCamera;
pub use rendering::render_engine::RenderEngine;
