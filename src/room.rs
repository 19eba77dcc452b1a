//! # Room Scene
//!
//! Builds the demo diorama: a small three-walled room with a spinning cube
//! on a pedestal and a softly glowing sphere hovering beside it. The room
//! is open toward the viewer so the orbit camera can look inside.
//!
//! [`build`] populates a [`Scene`] with the geometry, materials, and lights;
//! [`RoomAnimation`] advances the cube spin and sphere hover by a fixed step
//! each frame, so playback speed follows the display refresh rate rather
//! than wall-clock time.

use std::f32::consts::{FRAC_PI_2, PI};

use crate::gfx::geometry::primitives::{
    generate_cube, generate_cylinder, generate_plane, generate_sphere,
};
use crate::gfx::resources::material::Material;
use crate::gfx::scene::{
    AmbientLight, DirectionalLight, Object, ObjectHandle, PointLight, Scene,
};

/// Simulation time added per rendered frame.
pub const TIME_STEP: f32 = 0.005;

/// Cube yaw in radians per unit of simulation time.
pub const SPIN_RATE: f32 = 0.3;
/// Frequency of the cube's pitch wobble.
pub const TILT_RATE: f32 = 0.5;
/// Peak pitch of the cube wobble, in radians.
pub const TILT_AMPLITUDE: f32 = 0.05;

/// Resting height of the hovering sphere's center.
pub const HOVER_BASE: f32 = 0.4;
/// Frequency of the sphere's bob.
pub const HOVER_RATE: f32 = 2.0;
/// Peak vertical offset of the bob, so the sphere stays in
/// `[HOVER_BASE - HOVER_AMPLITUDE, HOVER_BASE + HOVER_AMPLITUDE]`.
pub const HOVER_AMPLITUDE: f32 = 0.1;

/// Side length of the square floor.
pub const FLOOR_SIZE: f32 = 6.0;
/// Height of the walls and the ceiling plane.
pub const WALL_HEIGHT: f32 = 2.4;

/// Edge length of the spinning cube.
pub const CUBE_SIZE: f32 = 0.7;
/// Height of the cube's center above the floor.
pub const CUBE_CENTER_HEIGHT: f32 = 0.9;

/// Radius of the pedestal cylinder under the cube.
pub const PEDESTAL_RADIUS: f32 = 0.35;
/// Height of the pedestal cylinder.
pub const PEDESTAL_HEIGHT: f32 = 0.5;

/// Radius of the hovering sphere.
pub const SPHERE_RADIUS: f32 = 0.15;
/// Horizontal position of the sphere.
pub const SPHERE_POSITION_X: f32 = 1.1;
pub const SPHERE_POSITION_Z: f32 = -0.8;

/// Handles to the two animated objects in the room.
#[derive(Debug, Clone, Copy)]
pub struct RoomHandles {
    pub cube: ObjectHandle,
    pub sphere: ObjectHandle,
}

/// Populates `scene` with the room geometry, materials, and lights.
///
/// Returns handles to the animated objects so a [`RoomAnimation`] can
/// drive them. Building is deterministic; calling this on two fresh
/// scenes produces identical content.
pub fn build(scene: &mut Scene) -> RoomHandles {
    scene.add_material(Material::new("floor", [0.45, 0.42, 0.38, 1.0], 0.0, 0.85));
    scene.add_material(Material::new("wall", [0.72, 0.70, 0.66, 1.0], 0.0, 0.9));
    scene.add_material(Material::new("pedestal", [0.62, 0.60, 0.58, 1.0], 0.0, 0.6));
    scene.add_material(Material::new("cube", [0.82, 0.18, 0.16, 1.0], 0.85, 0.35));
    scene.add_material(
        Material::new("sphere", [0.10, 0.70, 0.65, 1.0], 0.0, 0.3)
            .with_emission(0.05, 0.5, 0.45),
    );

    // Room shell. The planes are generated facing +Y and rotated so their
    // normals point into the room; the front stays open for the camera.
    // The shell only receives shadows, so it skips the shadow pass.
    scene.add_object(
        Object::new(generate_plane(FLOOR_SIZE, FLOOR_SIZE, 1, 1).to_mesh())
            .with_name("floor")
            .with_material("floor")
            .without_shadow_casting(),
    );
    scene.add_object(
        Object::new(generate_plane(FLOOR_SIZE, WALL_HEIGHT, 1, 1).to_mesh())
            .with_name("back_wall")
            .with_material("wall")
            .with_rotation(FRAC_PI_2, 0.0, 0.0)
            .with_position(0.0, WALL_HEIGHT / 2.0, -FLOOR_SIZE / 2.0)
            .without_shadow_casting(),
    );
    scene.add_object(
        Object::new(generate_plane(WALL_HEIGHT, FLOOR_SIZE, 1, 1).to_mesh())
            .with_name("left_wall")
            .with_material("wall")
            .with_rotation(0.0, 0.0, -FRAC_PI_2)
            .with_position(-FLOOR_SIZE / 2.0, WALL_HEIGHT / 2.0, 0.0)
            .without_shadow_casting(),
    );
    scene.add_object(
        Object::new(generate_plane(WALL_HEIGHT, FLOOR_SIZE, 1, 1).to_mesh())
            .with_name("right_wall")
            .with_material("wall")
            .with_rotation(0.0, 0.0, FRAC_PI_2)
            .with_position(FLOOR_SIZE / 2.0, WALL_HEIGHT / 2.0, 0.0)
            .without_shadow_casting(),
    );
    scene.add_object(
        Object::new(generate_plane(FLOOR_SIZE, FLOOR_SIZE, 1, 1).to_mesh())
            .with_name("ceiling")
            .with_material("wall")
            .with_rotation(PI, 0.0, 0.0)
            .with_position(0.0, WALL_HEIGHT, 0.0)
            .without_shadow_casting(),
    );

    // Props
    scene.add_object(
        Object::new(generate_cylinder(PEDESTAL_RADIUS, PEDESTAL_HEIGHT, 48).to_mesh())
            .with_name("pedestal")
            .with_material("pedestal")
            .with_position(0.0, PEDESTAL_HEIGHT / 2.0, 0.0),
    );
    let cube = scene.add_object(
        Object::new(generate_cube().to_mesh())
            .with_name("cube")
            .with_material("cube")
            .with_scale(CUBE_SIZE)
            .with_position(0.0, CUBE_CENTER_HEIGHT, 0.0),
    );
    let sphere = scene.add_object(
        Object::new(generate_sphere(32, 16).to_mesh())
            .with_name("sphere")
            .with_material("sphere")
            .with_scale(SPHERE_RADIUS)
            .with_position(SPHERE_POSITION_X, HOVER_BASE, SPHERE_POSITION_Z),
    );

    // Light rig: neutral ambient fill, a warm sun casting shadows, and two
    // accent points tinting the corners.
    scene.lights.ambient = AmbientLight::new([1.0, 1.0, 1.0], 0.25);
    scene.lights.directional =
        DirectionalLight::new(cgmath::Vector3::new(4.0, 6.0, 3.0), [1.0, 0.96, 0.9], 2.2);
    scene.lights.add_point(PointLight::new(
        cgmath::Vector3::new(-1.8, 1.9, 1.4),
        [1.0, 0.75, 0.5],
        3.0,
        6.0,
    ));
    scene.lights.add_point(PointLight::new(
        cgmath::Vector3::new(1.1, 1.2, -0.8),
        [0.4, 0.8, 1.0],
        2.0,
        4.0,
    ));

    RoomHandles { cube, sphere }
}

/// Fixed-step animation state for the room.
///
/// Each [`advance`](RoomAnimation::advance) call adds [`TIME_STEP`] to the
/// accumulated time and rewrites the cube rotation and sphere height from
/// it. Poses are pure functions of the accumulated time, so the animation
/// never drifts and replays identically.
pub struct RoomAnimation {
    time: f32,
    handles: RoomHandles,
}

impl RoomAnimation {
    pub fn new(handles: RoomHandles) -> Self {
        Self {
            time: 0.0,
            handles,
        }
    }

    /// Accumulated simulation time.
    pub fn time(&self) -> f32 {
        self.time
    }

    /// Advances the animation by one frame.
    pub fn advance(&mut self, scene: &mut Scene) {
        self.time += TIME_STEP;
        let time = self.time;

        if let Some(cube) = scene.get_object_mut(self.handles.cube) {
            cube.transform.rotation.y = time * SPIN_RATE;
            cube.transform.rotation.x = (time * TILT_RATE).sin() * TILT_AMPLITUDE;
        }
        if let Some(sphere) = scene.get_object_mut(self.handles.sphere) {
            sphere.transform.position.y = HOVER_BASE + (time * HOVER_RATE).sin() * HOVER_AMPLITUDE;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gfx::camera::camera_controller::CameraController;
    use crate::gfx::camera::camera_utils::CameraManager;
    use crate::gfx::camera::orbit_camera::OrbitCamera;
    use approx::assert_relative_eq;
    use cgmath::Vector3;

    fn room_scene() -> (Scene, RoomHandles) {
        let camera = OrbitCamera::new(4.6, 0.35, 0.6, Vector3::new(0.0, 0.8, 0.0), 4.0 / 3.0);
        let controller = CameraController::new(0.005, 0.1);
        let mut scene = Scene::new(CameraManager::new(camera, controller));
        let handles = build(&mut scene);
        (scene, handles)
    }

    #[test]
    fn build_populates_room_objects() {
        let (scene, _) = room_scene();
        for name in [
            "floor",
            "back_wall",
            "left_wall",
            "right_wall",
            "ceiling",
            "pedestal",
            "cube",
            "sphere",
        ] {
            assert!(scene.find_object(name).is_some(), "missing object {name}");
        }
        assert_eq!(scene.objects.len(), 8);
    }

    #[test]
    fn props_rest_at_expected_heights() {
        let (scene, handles) = room_scene();

        let pedestal = scene.find_object("pedestal").unwrap();
        assert_relative_eq!(pedestal.transform.position.y, PEDESTAL_HEIGHT / 2.0);

        let cube = scene.get_object(handles.cube).unwrap();
        assert_eq!(cube.transform.position, Vector3::new(0.0, CUBE_CENTER_HEIGHT, 0.0));
        assert_relative_eq!(cube.transform.scale.x, CUBE_SIZE);

        let sphere = scene.get_object(handles.sphere).unwrap();
        assert_eq!(
            sphere.transform.position,
            Vector3::new(SPHERE_POSITION_X, HOVER_BASE, SPHERE_POSITION_Z)
        );
    }

    #[test]
    fn shell_objects_do_not_cast_shadows() {
        let (scene, handles) = room_scene();
        for name in ["floor", "back_wall", "left_wall", "right_wall", "ceiling"] {
            assert!(!scene.find_object(name).unwrap().cast_shadows);
        }
        assert!(scene.get_object(handles.cube).unwrap().cast_shadows);
        assert!(scene.get_object(handles.sphere).unwrap().cast_shadows);
    }

    #[test]
    fn light_rig_matches_room_setup() {
        let (scene, _) = room_scene();
        assert_eq!(scene.lights.points.len(), 2);
        assert_relative_eq!(scene.lights.ambient.intensity, 0.25);
        assert!(scene.lights.directional.cast_shadows);
    }

    #[test]
    fn advance_accumulates_fixed_steps() {
        let (mut scene, handles) = room_scene();
        let mut animation = RoomAnimation::new(handles);

        let mut expected = 0.0f32;
        for _ in 0..250 {
            animation.advance(&mut scene);
            expected += TIME_STEP;
        }
        // Same fold, so the accumulator matches bit for bit.
        assert_eq!(animation.time(), expected);
    }

    #[test]
    fn cube_pose_follows_accumulated_time() {
        let (mut scene, handles) = room_scene();
        let mut animation = RoomAnimation::new(handles);
        for _ in 0..97 {
            animation.advance(&mut scene);
        }

        let time = animation.time();
        let cube = scene.get_object(handles.cube).unwrap();
        assert_relative_eq!(cube.transform.rotation.y, time * SPIN_RATE);
        assert_relative_eq!(cube.transform.rotation.x, (time * TILT_RATE).sin() * TILT_AMPLITUDE);
    }
}
