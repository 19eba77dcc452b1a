//! # Scene Objects
//!
//! Meshes, transforms, and the renderable objects that tie them together.
//!
//! An [`Object`] owns one or more [`Mesh`]es, a [`Transform`], an optional
//! material reference, and lazily created GPU resources (vertex/index buffers
//! plus a per-object transform uniform). CPU-side state can be built and
//! animated without a GPU; buffers appear only once `init_gpu_resources` runs.

use cgmath::{Matrix4, Rad, Vector3};
use wgpu::util::DeviceExt;

use super::vertex::Vertex3D;
use crate::gfx::resources::material::MaterialId;

/// Triangle mesh data with optional GPU buffers.
///
/// Vertex and index data always live on the CPU side; the wgpu buffers are
/// `None` until [`Mesh::init_gpu_resources`] uploads them.
#[derive(Debug)]
pub struct Mesh {
    /// Interleaved vertex data (position + normal)
    pub vertices: Vec<Vertex3D>,
    /// Triangle indices into `vertices`
    pub indices: Vec<u32>,
    /// GPU vertex buffer, created on demand
    pub vertex_buffer: Option<wgpu::Buffer>,
    /// GPU index buffer, created on demand
    pub index_buffer: Option<wgpu::Buffer>,
    /// Number of indices to draw
    pub index_count: u32,
    /// Number of vertices in the mesh
    pub vertex_count: u32,
}

impl Mesh {
    /// Creates a mesh from vertex and index data.
    pub fn new(vertices: Vec<Vertex3D>, indices: Vec<u32>) -> Self {
        let index_count = indices.len() as u32;
        let vertex_count = vertices.len() as u32;
        Self {
            vertices,
            indices,
            vertex_buffer: None,
            index_buffer: None,
            index_count,
            vertex_count,
        }
    }

    /// Number of triangles in the mesh.
    pub fn triangle_count(&self) -> u32 {
        self.index_count / 3
    }

    /// Uploads vertex and index data to the GPU.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, label: &str) {
        self.vertex_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Vertex Buffer", label)),
                contents: bytemuck::cast_slice(&self.vertices),
                usage: wgpu::BufferUsages::VERTEX,
            },
        ));
        self.index_buffer = Some(device.create_buffer_init(
            &wgpu::util::BufferInitDescriptor {
                label: Some(&format!("{} Index Buffer", label)),
                contents: bytemuck::cast_slice(&self.indices),
                usage: wgpu::BufferUsages::INDEX,
            },
        ));
    }
}

/// Position, rotation, and scale of an object in world space.
///
/// Rotation is stored as Euler angles in radians and applied in X, Y, Z
/// order. The world is Y-up.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    /// World-space position
    pub position: Vector3<f32>,
    /// Euler rotation in radians, applied in X, Y, Z order
    pub rotation: Vector3<f32>,
    /// Per-axis scale factors
    pub scale: Vector3<f32>,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vector3::new(0.0, 0.0, 0.0),
            rotation: Vector3::new(0.0, 0.0, 0.0),
            scale: Vector3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Composes the model matrix: translation * rotation (X, Y, Z) * scale.
    pub fn matrix(&self) -> Matrix4<f32> {
        Matrix4::from_translation(self.position)
            * Matrix4::from_angle_x(Rad(self.rotation.x))
            * Matrix4::from_angle_y(Rad(self.rotation.y))
            * Matrix4::from_angle_z(Rad(self.rotation.z))
            * Matrix4::from_nonuniform_scale(self.scale.x, self.scale.y, self.scale.z)
    }

    /// Model matrix as a column-major array, ready for a uniform buffer.
    pub fn to_uniform_data(&self) -> [[f32; 4]; 4] {
        self.matrix().into()
    }
}

/// GPU-side resources owned by a single object.
#[derive(Debug)]
pub struct ObjectGpuResources {
    /// Uniform buffer holding the model matrix
    pub transform_buffer: wgpu::Buffer,
    /// Bind group exposing the transform to shaders (group 1)
    pub transform_bind_group: wgpu::BindGroup,
}

/// A renderable object in the scene.
#[derive(Debug)]
pub struct Object {
    /// Display name, also used to look objects up in a scene
    pub name: String,
    /// Meshes drawn with this object's transform and material
    pub meshes: Vec<Mesh>,
    /// World-space placement
    pub transform: Transform,
    /// Material reference, resolved through the scene's material manager
    pub material_id: Option<MaterialId>,
    /// Skipped by all render passes when false
    pub visible: bool,
    /// Included in the shadow pass when true
    pub cast_shadows: bool,
    /// Per-object GPU state, `None` until initialized
    pub gpu_resources: Option<ObjectGpuResources>,
}

impl Object {
    /// Creates an object from a single mesh with a default transform.
    pub fn new(mesh: Mesh) -> Self {
        Self {
            name: String::new(),
            meshes: vec![mesh],
            transform: Transform::default(),
            material_id: None,
            visible: true,
            cast_shadows: true,
            gpu_resources: None,
        }
    }

    /// Sets the object name.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    /// Assigns a material by id.
    pub fn with_material(mut self, material_id: &str) -> Self {
        self.material_id = Some(material_id.to_string());
        self
    }

    /// Places the object in world space.
    pub fn with_position(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3::new(x, y, z);
        self
    }

    /// Sets the Euler rotation in radians.
    pub fn with_rotation(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.rotation = Vector3::new(x, y, z);
        self
    }

    /// Applies a uniform scale factor.
    pub fn with_scale(mut self, scale: f32) -> Self {
        self.transform.scale = Vector3::new(scale, scale, scale);
        self
    }

    /// Excludes the object from the shadow pass.
    pub fn without_shadow_casting(mut self) -> Self {
        self.cast_shadows = false;
        self
    }

    /// Returns the assigned material id, if any.
    pub fn get_material_id(&self) -> Option<&MaterialId> {
        self.material_id.as_ref()
    }

    /// Total triangles across all meshes.
    pub fn triangle_count(&self) -> u32 {
        self.meshes.iter().map(Mesh::triangle_count).sum()
    }

    /// Total vertices across all meshes.
    pub fn vertex_count(&self) -> u32 {
        self.meshes.iter().map(|m| m.vertex_count).sum()
    }

    /// Bind group for the object's transform uniform, once initialized.
    pub fn transform_bind_group(&self) -> Option<&wgpu::BindGroup> {
        self.gpu_resources.as_ref().map(|r| &r.transform_bind_group)
    }

    /// Creates mesh buffers and the transform uniform for this object.
    ///
    /// Safe to call more than once; later calls only refresh the uniform.
    pub fn init_gpu_resources(&mut self, device: &wgpu::Device, queue: &wgpu::Queue) {
        for mesh in &mut self.meshes {
            if mesh.vertex_buffer.is_none() {
                mesh.init_gpu_resources(device, &self.name);
            }
        }

        if self.gpu_resources.is_none() {
            let transform_data = self.transform.to_uniform_data();
            let transform_buffer =
                device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                    label: Some(&format!("{} Transform Buffer", self.name)),
                    contents: bytemuck::cast_slice(&transform_data),
                    usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
                });

            let transform_bind_group_layout =
                device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
                    label: Some("Transform Bind Group Layout"),
                    entries: &[wgpu::BindGroupLayoutEntry {
                        binding: 0,
                        visibility: wgpu::ShaderStages::VERTEX,
                        ty: wgpu::BindingType::Buffer {
                            ty: wgpu::BufferBindingType::Uniform,
                            has_dynamic_offset: false,
                            min_binding_size: None,
                        },
                        count: None,
                    }],
                });

            let transform_bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
                label: Some(&format!("{} Transform Bind Group", self.name)),
                layout: &transform_bind_group_layout,
                entries: &[wgpu::BindGroupEntry {
                    binding: 0,
                    resource: transform_buffer.as_entire_binding(),
                }],
            });

            self.gpu_resources = Some(ObjectGpuResources {
                transform_buffer,
                transform_bind_group,
            });
        }

        self.update_transform(queue);
    }

    /// Pushes the current transform matrix to the GPU.
    pub fn update_transform(&self, queue: &wgpu::Queue) {
        if let Some(resources) = &self.gpu_resources {
            let transform_data = self.transform.to_uniform_data();
            queue.write_buffer(
                &resources.transform_buffer,
                0,
                bytemuck::cast_slice(&transform_data),
            );
        }
    }
}

/// Draw helpers implemented on [`wgpu::RenderPass`].
///
/// Bind groups (globals, transform, material) must already be set by the
/// caller; these methods only bind geometry and issue the draw call.
pub trait DrawObject<'a> {
    fn draw_mesh(&mut self, mesh: &'a Mesh);
    fn draw_object(&mut self, object: &'a Object);
}

impl<'a, 'b> DrawObject<'b> for wgpu::RenderPass<'a>
where
    'b: 'a,
{
    fn draw_mesh(&mut self, mesh: &'b Mesh) {
        let (Some(vertex_buffer), Some(index_buffer)) =
            (&mesh.vertex_buffer, &mesh.index_buffer)
        else {
            return;
        };
        self.set_vertex_buffer(0, vertex_buffer.slice(..));
        self.set_index_buffer(index_buffer.slice(..), wgpu::IndexFormat::Uint32);
        self.draw_indexed(0..mesh.index_count, 0, 0..1);
    }

    fn draw_object(&mut self, object: &'b Object) {
        for mesh in &object.meshes {
            self.draw_mesh(mesh);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::{Point3, Transform as _};

    fn point(transform: &Transform, p: [f32; 3]) -> Point3<f32> {
        transform.matrix().transform_point(Point3::new(p[0], p[1], p[2]))
    }

    #[test]
    fn default_transform_is_identity() {
        let t = Transform::default();
        let p = point(&t, [1.0, 2.0, 3.0]);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, 3.0);
    }

    #[test]
    fn translation_moves_points() {
        let t = Transform {
            position: Vector3::new(1.0, 2.0, -3.0),
            ..Transform::default()
        };
        let p = point(&t, [0.0, 0.0, 0.0]);
        assert_relative_eq!(p.x, 1.0);
        assert_relative_eq!(p.y, 2.0);
        assert_relative_eq!(p.z, -3.0);
    }

    #[test]
    fn scale_applies_before_translation() {
        let t = Transform {
            position: Vector3::new(10.0, 0.0, 0.0),
            scale: Vector3::new(2.0, 2.0, 2.0),
            ..Transform::default()
        };
        let p = point(&t, [1.0, 0.0, 0.0]);
        assert_relative_eq!(p.x, 12.0);
    }

    #[test]
    fn yaw_quarter_turn_maps_x_to_negative_z() {
        let t = Transform {
            rotation: Vector3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0),
            ..Transform::default()
        };
        let p = point(&t, [1.0, 0.0, 0.0]);
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn mesh_counts_follow_data() {
        let vertices = vec![
            Vertex3D { position: [0.0, 0.0, 0.0], normal: [0.0, 1.0, 0.0] },
            Vertex3D { position: [1.0, 0.0, 0.0], normal: [0.0, 1.0, 0.0] },
            Vertex3D { position: [0.0, 0.0, 1.0], normal: [0.0, 1.0, 0.0] },
        ];
        let mesh = Mesh::new(vertices, vec![0, 1, 2]);
        assert_eq!(mesh.vertex_count, 3);
        assert_eq!(mesh.index_count, 3);
        assert_eq!(mesh.triangle_count(), 1);
        assert!(mesh.vertex_buffer.is_none());
    }

    #[test]
    fn object_builder_sets_fields() {
        let mesh = Mesh::new(Vec::new(), Vec::new());
        let object = Object::new(mesh)
            .with_name("pedestal")
            .with_material("stone")
            .with_position(0.0, 0.25, 0.0)
            .without_shadow_casting();
        assert_eq!(object.name, "pedestal");
        assert_eq!(object.get_material_id().map(String::as_str), Some("stone"));
        assert_relative_eq!(object.transform.position.y, 0.25);
        assert!(object.visible);
        assert!(!object.cast_shadows);
    }
}
