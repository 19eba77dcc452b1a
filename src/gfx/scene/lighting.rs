//! # Scene Lighting
//!
//! CPU-side light descriptions for the room: one ambient term, one
//! shadow-casting directional light, and a small set of point lights.
//!
//! These types hold no GPU state. Packing into the global uniform buffer
//! happens in [`crate::gfx::resources::global_bindings`].

use cgmath::{InnerSpace, Vector3};

/// Maximum number of point lights the global uniform buffer can hold.
pub const MAX_POINT_LIGHTS: usize = 4;

/// Uniform fill light applied to every surface.
#[derive(Debug, Clone, Copy)]
pub struct AmbientLight {
    /// Linear RGB color
    pub color: [f32; 3],
    /// Brightness multiplier
    pub intensity: f32,
}

impl AmbientLight {
    pub fn new(color: [f32; 3], intensity: f32) -> Self {
        Self { color, intensity }
    }
}

/// Sun-style light defined by a position aimed at a target.
///
/// The position only anchors the shadow projection; shading uses the
/// normalized direction. This is the sole shadow caster in the scene.
#[derive(Debug, Clone, Copy)]
pub struct DirectionalLight {
    /// Shadow projection origin
    pub position: Vector3<f32>,
    /// Point the light looks at
    pub target: Vector3<f32>,
    /// Linear RGB color
    pub color: [f32; 3],
    /// Brightness multiplier
    pub intensity: f32,
    /// Whether the shadow pass renders for this light
    pub cast_shadows: bool,
}

impl DirectionalLight {
    pub fn new(position: Vector3<f32>, color: [f32; 3], intensity: f32) -> Self {
        Self {
            position,
            target: Vector3::new(0.0, 0.0, 0.0),
            color,
            intensity,
            cast_shadows: true,
        }
    }

    /// Normalized direction the light travels, from position toward target.
    pub fn direction(&self) -> Vector3<f32> {
        (self.target - self.position).normalize()
    }
}

/// Local light with distance falloff.
#[derive(Debug, Clone, Copy)]
pub struct PointLight {
    /// World-space position
    pub position: Vector3<f32>,
    /// Linear RGB color
    pub color: [f32; 3],
    /// Brightness multiplier
    pub intensity: f32,
    /// Distance at which the light's contribution reaches zero
    pub range: f32,
}

impl PointLight {
    pub fn new(position: Vector3<f32>, color: [f32; 3], intensity: f32, range: f32) -> Self {
        Self {
            position,
            color,
            intensity,
            range,
        }
    }
}

/// The full set of lights illuminating a scene.
#[derive(Debug, Clone)]
pub struct LightRig {
    pub ambient: AmbientLight,
    pub directional: DirectionalLight,
    pub points: Vec<PointLight>,
}

impl Default for LightRig {
    fn default() -> Self {
        Self {
            ambient: AmbientLight::new([1.0, 1.0, 1.0], 0.1),
            directional: DirectionalLight::new(Vector3::new(5.0, 10.0, 5.0), [1.0, 1.0, 1.0], 1.0),
            points: Vec::new(),
        }
    }
}

impl LightRig {
    /// Adds a point light, refusing once [`MAX_POINT_LIGHTS`] is reached.
    ///
    /// Returns `true` if the light was added.
    pub fn add_point(&mut self, light: PointLight) -> bool {
        if self.points.len() >= MAX_POINT_LIGHTS {
            log::warn!(
                "point light limit of {} reached, ignoring additional light",
                MAX_POINT_LIGHTS
            );
            return false;
        }
        self.points.push(light);
        true
    }

    /// Total number of light sources (ambient + directional + points).
    pub fn light_count(&self) -> usize {
        2 + self.points.len()
    }
}
