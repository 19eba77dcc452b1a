//! Global uniform bindings for camera and scene data
//!
//! Manages GPU uniform buffers and bind groups for global rendering state
//! shared across all objects in a scene: camera matrices, the light rig,
//! and the shadow projection for the directional light.

use bytemuck::Zeroable;

use crate::{
    gfx::camera::camera_utils::CameraUniform,
    gfx::camera::orbit_camera::OPENGL_TO_WGPU_MATRIX,
    gfx::scene::lighting::{LightRig, MAX_POINT_LIGHTS},
    wgpu_utils::{
        binding_builder::{BindGroupBuilder, BindGroupLayoutBuilder, BindGroupLayoutWithDesc},
        binding_types,
        uniform_buffer::UniformBuffer,
    },
};

/// Half-extent of the directional light's orthographic shadow volume.
///
/// Sized to enclose the whole room with margin from any light angle.
const SHADOW_ORTHO_EXTENT: f32 = 8.0;
const SHADOW_NEAR: f32 = 0.5;
const SHADOW_FAR: f32 = 20.0;

/// One point light as the shader sees it.
///
/// Position carries the range in `w`, color carries the intensity.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PointLightGpu {
    pub position: [f32; 4],
    pub color: [f32; 4],
}

/// Global uniform buffer content structure
///
/// Contains all per-frame global data that needs to be accessible
/// to shaders, including camera matrices and lighting information.
/// MUST match the Globals struct in the shaders exactly.
#[repr(C)]
#[derive(Copy, Clone, Debug)]
pub struct GlobalUBOContent {
    view_position: [f32; 4],  // Camera position (homogeneous coordinates)
    view_proj: [[f32; 4]; 4], // Camera view-projection matrix

    light_view_proj: [[f32; 4]; 4], // Directional light's view-projection for shadows
    ambient_color: [f32; 4],        // rgb + intensity
    sun_direction: [f32; 4],        // xyz + unused
    sun_color: [f32; 4],            // rgb + intensity
    point_lights: [PointLightGpu; MAX_POINT_LIGHTS],
    counts: [u32; 4], // active point light count in x
}

unsafe impl bytemuck::Pod for GlobalUBOContent {}
unsafe impl bytemuck::Zeroable for GlobalUBOContent {}

impl GlobalUBOContent {
    /// Packs the camera uniform and light rig into shader layout.
    pub fn compose(camera: CameraUniform, lights: &LightRig) -> Self {
        let light_view_proj = directional_light_view_proj(lights);

        let mut point_lights = [PointLightGpu::zeroed(); MAX_POINT_LIGHTS];
        let count = lights.points.len().min(MAX_POINT_LIGHTS);
        for (slot, light) in point_lights.iter_mut().zip(lights.points.iter()) {
            *slot = PointLightGpu {
                position: [
                    light.position.x,
                    light.position.y,
                    light.position.z,
                    light.range,
                ],
                color: [
                    light.color[0],
                    light.color[1],
                    light.color[2],
                    light.intensity,
                ],
            };
        }

        let sun_direction = lights.directional.direction();

        Self {
            view_position: camera.view_position,
            view_proj: camera.view_proj,
            light_view_proj: light_view_proj.into(),
            ambient_color: [
                lights.ambient.color[0],
                lights.ambient.color[1],
                lights.ambient.color[2],
                lights.ambient.intensity,
            ],
            sun_direction: [sun_direction.x, sun_direction.y, sun_direction.z, 0.0],
            sun_color: [
                lights.directional.color[0],
                lights.directional.color[1],
                lights.directional.color[2],
                lights.directional.intensity,
            ],
            point_lights,
            counts: [count as u32, 0, 0, 0],
        }
    }
}

/// View-projection matrix rendering the scene from the directional light.
///
/// Uses the same GL-to-wgpu depth remap as the camera so the shadow map
/// covers the full [0, 1] depth range.
fn directional_light_view_proj(lights: &LightRig) -> cgmath::Matrix4<f32> {
    let light = &lights.directional;
    let light_pos = cgmath::Point3::new(light.position.x, light.position.y, light.position.z);
    let light_target = cgmath::Point3::new(light.target.x, light.target.y, light.target.z);
    let light_view = cgmath::Matrix4::look_at_rh(light_pos, light_target, cgmath::Vector3::unit_y());

    let light_proj = cgmath::ortho(
        -SHADOW_ORTHO_EXTENT,
        SHADOW_ORTHO_EXTENT,
        -SHADOW_ORTHO_EXTENT,
        SHADOW_ORTHO_EXTENT,
        SHADOW_NEAR,
        SHADOW_FAR,
    );

    OPENGL_TO_WGPU_MATRIX * light_proj * light_view
}

/// Type alias for the global uniform buffer
pub type GlobalUBO = UniformBuffer<GlobalUBOContent>;

/// Updates the global uniform buffer with camera and light rig data
///
/// Should be called each frame so shaders see the current view matrices
/// and the shadow projection follows the directional light.
///
/// # Arguments
/// * `ubo` - The global uniform buffer to update
/// * `queue` - WGPU command queue for buffer updates
/// * `camera` - Updated camera uniform data
/// * `lights` - Light rig for the scene
pub fn update_global_ubo(
    ubo: &mut GlobalUBO,
    queue: &wgpu::Queue,
    camera: CameraUniform,
    lights: &LightRig,
) {
    ubo.update_content(queue, GlobalUBOContent::compose(camera, lights));
}

/// Manages bind group layouts and bind groups for global uniforms
///
/// Handles the creation and management of WGPU bind groups that contain
/// global scene data like camera matrices and lighting data. This is bound
/// to slot 0 in all render pipelines.
pub struct GlobalBindings {
    bind_group_layout: BindGroupLayoutWithDesc,
    bind_group: Option<wgpu::BindGroup>,
}

impl GlobalBindings {
    /// Creates a new global bindings manager
    ///
    /// Sets up the bind group layout for global uniforms but doesn't
    /// create the actual bind group until `create_bind_group()` is called.
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating resources
    pub fn new(device: &wgpu::Device) -> Self {
        let bind_group_layout = BindGroupLayoutBuilder::new()
            .next_binding_rendering(binding_types::uniform()) // Global uniforms (camera + lights)
            .create(device, "Globals Bind Group");

        GlobalBindings {
            bind_group_layout,
            bind_group: None,
        }
    }

    /// Creates the bind group with the provided uniform buffer
    ///
    /// Must be called after the uniform buffer is created and before
    /// any rendering operations that need global uniforms.
    ///
    /// # Arguments
    /// * `device` - WGPU device for creating the bind group
    /// * `ubo` - The global uniform buffer to bind
    pub fn create_bind_group(&mut self, device: &wgpu::Device, ubo: &GlobalUBO) {
        self.bind_group = Some(
            BindGroupBuilder::new(&self.bind_group_layout)
                .resource(ubo.binding_resource())
                .create(device, "Global Bind Group"),
        );
    }

    /// Returns the bind group layout
    ///
    /// Used when creating render pipelines that need access to global uniforms.
    pub fn bind_group_layouts(&self) -> &wgpu::BindGroupLayout {
        &self.bind_group_layout.layout
    }

    /// Returns the bind group for rendering
    ///
    /// # Panics
    /// Panics if `create_bind_group()` hasn't been called yet
    pub fn bind_groups(&self) -> &wgpu::BindGroup {
        self.bind_group
            .as_ref()
            .expect("Bind group has not been created yet!")
    }
}
