//! # Diorama Prelude
//!
//! This module provides a convenient way to import commonly used types from
//! the viewer. It's designed to reduce boilerplate imports in typical
//! applications.
//!
//! ## Usage
//!
//! ```rust
//! use diorama::prelude::*;
//! ```
//!
//! This brings all essential types into scope, allowing you to write:
//!
//! ```no_run
//! use diorama::prelude::*;
//!
//! fn main() -> anyhow::Result<()> {
//!     let mut app = diorama::default();
//!
//!     let handles = build_room(app.scene_mut());
//!     let mut animation = RoomAnimation::new(handles);
//!     app.set_update(move |scene| animation.advance(scene));
//!
//!     app.run()
//! }
//! ```

// Re-export core application types
pub use crate::app::DioramaApp;
pub use crate::default;

// Re-export graphics and scene types
pub use crate::gfx::camera::{CameraManager, OrbitCamera};
pub use crate::gfx::geometry::{
    generate_cube, generate_cylinder, generate_plane, generate_sphere, GeometryData,
};
pub use crate::gfx::scene::{Object, ObjectHandle, Scene};

// Re-export the room scene helpers
pub use crate::room::{build as build_room, RoomAnimation, RoomHandles};

// Re-export common external dependencies
pub use cgmath::{InnerSpace, Vector3, Zero};
