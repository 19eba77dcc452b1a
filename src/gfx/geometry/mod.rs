//! # Procedural Geometry Generation
//!
//! This module provides functions to generate common 3D primitive shapes procedurally,
//! eliminating the need for external model files for basic shapes.
//!
//! All shapes use a Y-up, right-handed coordinate system with counter-clockwise
//! front faces.
//!
//! ## Supported Primitives
//!
//! - **Cube**: Unit cube centered at the origin
//! - **Sphere**: Unit UV sphere with configurable resolution
//! - **Plane**: Flat XZ plane with configurable size and subdivisions
//! - **Cylinder**: Capped cylinder along the Y axis
//!
//! ## Usage
//!
//! ```rust
//! use diorama::gfx::geometry::{generate_cube, generate_plane, generate_sphere};
//!
//! // Generate a unit cube
//! let cube_data = generate_cube();
//!
//! // Generate a sphere with 32 longitude and 16 latitude segments
//! let sphere_data = generate_sphere(32, 16);
//!
//! // Generate a 6x6 floor plane
//! let floor_data = generate_plane(6.0, 6.0, 1, 1);
//! ```

pub mod primitives;

pub use primitives::*;

use crate::gfx::scene::object::Mesh;
use crate::gfx::scene::vertex::Vertex3D;

/// Represents generated geometry data ready for GPU upload
#[derive(Debug, Clone)]
pub struct GeometryData {
    /// Vertex positions (x, y, z)
    pub vertices: Vec<[f32; 3]>,
    /// Normal vectors (x, y, z)
    pub normals: Vec<[f32; 3]>,
    /// Triangle indices (counter-clockwise winding)
    pub indices: Vec<u32>,
}

impl GeometryData {
    /// Create a new empty geometry data structure
    pub fn new() -> Self {
        Self {
            vertices: Vec::new(),
            normals: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Get the number of vertices in this geometry
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of triangles in this geometry
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Interleaves positions and normals into the mesh format used by the renderer.
    pub fn to_mesh(&self) -> Mesh {
        let vertices: Vec<Vertex3D> = (0..self.vertices.len())
            .map(|i| Vertex3D {
                position: self.vertices[i],
                normal: self.normals.get(i).copied().unwrap_or([0.0, 1.0, 0.0]),
            })
            .collect();

        Mesh::new(vertices, self.indices.clone())
    }
}

impl Default for GeometryData {
    fn default() -> Self {
        Self::new()
    }
}
