//! # Scene Management Module
//!
//! 3D scene management: the scene container, renderable objects, lights,
//! and vertex data structures.
//!
//! ## Key Components
//!
//! - [`Scene`] - The main scene container that manages objects, camera, materials, and lights
//! - [`Object`] - Individual 3D objects with meshes, materials, and transforms
//! - [`LightRig`] - Ambient, directional, and point lights for a scene
//! - [`Vertex3D`] - 3D vertex data structure with position and normal
//!
//! ## Usage
//!
//! The scene system is primarily used through the [`Scene`] struct:
//!
//! ```no_run
//! use diorama::gfx::scene::{Object, Scene};
//! use diorama::gfx::geometry::generate_cube;
//!
//! // Scene creation is typically handled by DioramaApp; objects are built
//! // from geometry and added for a handle:
//! // let handle = scene.add_object(
//! //     Object::new(generate_cube().to_mesh()).with_name("cube"),
//! // );
//! ```

pub mod lighting;
pub mod object;
pub mod scene;
pub mod vertex;

// Re-export main types
pub use lighting::{AmbientLight, DirectionalLight, LightRig, PointLight, MAX_POINT_LIGHTS};
pub use object::{DrawObject, Mesh, Object, Transform};
pub use scene::{ObjectHandle, Scene, SceneStatistics};
pub use vertex::Vertex3D;
