use wgpu::Device;

use crate::gfx::{
    camera::camera_utils::CameraManager,
    resources::material::{Material, MaterialManager},
};

use super::{lighting::LightRig, object::Object};

/// Stable reference to an object added to a [`Scene`].
///
/// Handles index into the scene's object list. Objects are never removed,
/// so a handle stays valid for the life of the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectHandle(pub usize);

/// Main scene containing objects, materials, lights, and camera
pub struct Scene {
    pub camera_manager: CameraManager,
    pub objects: Vec<Object>,
    pub material_manager: MaterialManager, // Centralized material storage
    pub lights: LightRig,
}

impl Scene {
    /// Creates a new scene with the given camera manager
    pub fn new(camera_manager: CameraManager) -> Self {
        Self {
            camera_manager,
            objects: Vec::new(),
            material_manager: MaterialManager::new(), // Initialize with default material
            lights: LightRig::default(),
        }
    }

    /// Advances per-frame scene state: camera momentum and view matrices.
    pub fn update(&mut self) {
        self.camera_manager.update();
    }

    /// Adds an object to the scene and returns a handle to it.
    pub fn add_object(&mut self, object: Object) -> ObjectHandle {
        let handle = ObjectHandle(self.objects.len());
        self.objects.push(object);
        handle
    }

    /// Adds a material to the scene's material manager.
    pub fn add_material(&mut self, material: Material) {
        self.material_manager.add_material(material);
    }

    /// Initializes GPU resources for all objects and materials
    ///
    /// Must be called after the GPU context is available and before rendering.
    pub fn init_gpu_resources(&mut self, device: &Device, queue: &wgpu::Queue) {
        for object in self.objects.iter_mut() {
            object.init_gpu_resources(device, queue);
        }

        self.material_manager.update_all_gpu_resources(device, queue);
    }

    /// Updates all object transforms and syncs to GPU
    pub fn update_all_transforms(&mut self, queue: &wgpu::Queue) {
        for object in &mut self.objects {
            if object.gpu_resources.is_some() {
                object.update_transform(queue);
            }
        }
    }

    /// Gets material for rendering an object
    ///
    /// Returns the material assigned to the object, or the default material
    /// if no material is assigned or the assigned material doesn't exist.
    pub fn get_material_for_object(&self, object: &Object) -> &Material {
        self.material_manager
            .get_material_for_object(object.get_material_id())
    }

    /// Gets mutable reference to an object by handle
    pub fn get_object_mut(&mut self, handle: ObjectHandle) -> Option<&mut Object> {
        self.objects.get_mut(handle.0)
    }

    /// Gets immutable reference to an object by handle
    pub fn get_object(&self, handle: ObjectHandle) -> Option<&Object> {
        self.objects.get(handle.0)
    }

    /// Finds an object by name.
    pub fn find_object(&self, name: &str) -> Option<&Object> {
        self.objects.iter().find(|obj| obj.name == name)
    }

    /// Gets statistics about the scene
    pub fn get_statistics(&self) -> SceneStatistics {
        let total_triangles: u32 = self.objects.iter().map(Object::triangle_count).sum();
        let total_vertices: u32 = self.objects.iter().map(Object::vertex_count).sum();

        SceneStatistics {
            object_count: self.objects.len(),
            material_count: self.material_manager.list_materials().len(),
            light_count: self.lights.light_count(),
            total_triangles,
            total_vertices,
        }
    }
}

/// Scene statistics for startup logging and debugging
#[derive(Debug)]
pub struct SceneStatistics {
    pub object_count: usize,
    pub material_count: usize,
    pub light_count: usize,
    pub total_triangles: u32,
    pub total_vertices: u32,
}
