use cgmath::Vector3;
use diorama::gfx::camera::{CameraController, CameraManager, OrbitCamera};
use diorama::gfx::scene::Scene;
use diorama::room::{self, RoomAnimation, RoomHandles};

fn room_scene() -> (Scene, RoomHandles) {
    let camera = OrbitCamera::new(4.6, 0.35, 0.6, Vector3::new(0.0, 0.8, 0.0), 1024.0 / 768.0);
    let controller = CameraController::new(0.005, 0.1);
    let mut scene = Scene::new(CameraManager::new(camera, controller));
    let handles = room::build(&mut scene);
    (scene, handles)
}

#[cfg(test)]
mod scene_census_tests {
    use super::*;

    #[test]
    fn test_room_contains_every_named_object() {
        let (scene, _) = room_scene();

        let expected = [
            "floor",
            "back_wall",
            "left_wall",
            "right_wall",
            "ceiling",
            "pedestal",
            "cube",
            "sphere",
        ];
        for name in expected {
            assert!(
                scene.find_object(name).is_some(),
                "Room should contain an object named {name}"
            );
        }
        assert_eq!(
            scene.objects.len(),
            expected.len(),
            "Room should contain exactly the expected objects"
        );
    }

    #[test]
    fn test_statistics_reflect_room_contents() {
        let (scene, _) = room_scene();
        let stats = scene.get_statistics();

        assert_eq!(stats.object_count, 8);
        // Five room materials plus the manager's built-in default
        assert_eq!(stats.material_count, 6);
        // Ambient + directional + two accent points
        assert_eq!(stats.light_count, 4);
        assert!(stats.total_triangles > 0, "Meshes should carry triangles");
        assert!(stats.total_vertices > 0, "Meshes should carry vertices");
    }

    #[test]
    fn test_walls_enclose_three_sides_and_ceiling() {
        let (scene, _) = room_scene();
        let half = room::FLOOR_SIZE / 2.0;

        let back = scene.find_object("back_wall").unwrap();
        assert_eq!(back.transform.position.z, -half, "Back wall sits at -Z");

        let left = scene.find_object("left_wall").unwrap();
        assert_eq!(left.transform.position.x, -half, "Left wall sits at -X");

        let right = scene.find_object("right_wall").unwrap();
        assert_eq!(right.transform.position.x, half, "Right wall sits at +X");

        let ceiling = scene.find_object("ceiling").unwrap();
        assert_eq!(
            ceiling.transform.position.y,
            room::WALL_HEIGHT,
            "Ceiling sits at wall height"
        );
        // No front wall: the fourth side stays open for the camera
        assert!(scene.find_object("front_wall").is_none());
    }

    #[test]
    fn test_props_start_at_rest_positions() {
        let (scene, handles) = room_scene();

        let cube = scene.get_object(handles.cube).unwrap();
        assert_eq!(
            cube.transform.position,
            Vector3::new(0.0, room::CUBE_CENTER_HEIGHT, 0.0)
        );
        assert_eq!(cube.transform.rotation, Vector3::new(0.0, 0.0, 0.0));

        let sphere = scene.get_object(handles.sphere).unwrap();
        assert_eq!(
            sphere.transform.position,
            Vector3::new(
                room::SPHERE_POSITION_X,
                room::HOVER_BASE,
                room::SPHERE_POSITION_Z
            )
        );

        let pedestal = scene.find_object("pedestal").unwrap();
        assert_eq!(
            pedestal.transform.position,
            Vector3::new(0.0, room::PEDESTAL_HEIGHT / 2.0, 0.0),
            "Pedestal rests on the floor"
        );
    }

    #[test]
    fn test_build_is_deterministic() {
        let (scene_a, _) = room_scene();
        let (scene_b, _) = room_scene();

        assert_eq!(scene_a.objects.len(), scene_b.objects.len());
        for (a, b) in scene_a.objects.iter().zip(scene_b.objects.iter()) {
            assert_eq!(a.name, b.name);
            assert_eq!(a.transform.position, b.transform.position);
            assert_eq!(a.transform.rotation, b.transform.rotation);
            assert_eq!(a.triangle_count(), b.triangle_count());
        }
    }
}

#[cfg(test)]
mod animation_tests {
    use super::*;

    #[test]
    fn test_time_advances_in_exact_fixed_steps() {
        for frames in [1u32, 250, 1000] {
            let (mut scene, handles) = room_scene();
            let mut animation = RoomAnimation::new(handles);

            let mut expected = 0.0f32;
            for _ in 0..frames {
                animation.advance(&mut scene);
                expected += room::TIME_STEP;
            }
            // The accumulator folds the same additions in the same order,
            // so the comparison is exact.
            assert_eq!(
                animation.time(),
                expected,
                "After {frames} frames the accumulator should match the fold"
            );
        }
    }

    #[test]
    fn test_cube_yaw_tracks_spin_rate() {
        let (mut scene, handles) = room_scene();
        let mut animation = RoomAnimation::new(handles);

        for _ in 0..480 {
            animation.advance(&mut scene);
        }

        let time = animation.time();
        let cube = scene.get_object(handles.cube).unwrap();
        assert_eq!(cube.transform.rotation.y, time * room::SPIN_RATE);
    }

    #[test]
    fn test_cube_tilt_follows_slow_sine() {
        let (mut scene, handles) = room_scene();
        let mut animation = RoomAnimation::new(handles);

        for _ in 0..313 {
            animation.advance(&mut scene);
        }

        let time = animation.time();
        let cube = scene.get_object(handles.cube).unwrap();
        assert_eq!(
            cube.transform.rotation.x,
            (time * room::TILT_RATE).sin() * room::TILT_AMPLITUDE
        );
        assert!(
            cube.transform.rotation.x.abs() <= room::TILT_AMPLITUDE,
            "Tilt never exceeds its amplitude"
        );
    }

    #[test]
    fn test_sphere_height_follows_hover_sine() {
        let (mut scene, handles) = room_scene();
        let mut animation = RoomAnimation::new(handles);

        for _ in 0..77 {
            animation.advance(&mut scene);
        }

        let time = animation.time();
        let sphere = scene.get_object(handles.sphere).unwrap();
        assert_eq!(
            sphere.transform.position.y,
            room::HOVER_BASE + (time * room::HOVER_RATE).sin() * room::HOVER_AMPLITUDE
        );
    }

    #[test]
    fn test_sphere_stays_inside_hover_band() {
        let (mut scene, handles) = room_scene();
        let mut animation = RoomAnimation::new(handles);

        let low = room::HOVER_BASE - room::HOVER_AMPLITUDE;
        let high = room::HOVER_BASE + room::HOVER_AMPLITUDE;
        for frame in 0..5000 {
            animation.advance(&mut scene);
            let y = scene.get_object(handles.sphere).unwrap().transform.position.y;
            assert!(
                (low..=high).contains(&y),
                "Hover height {y} left the band [{low}, {high}] at frame {frame}"
            );
        }
    }

    #[test]
    fn test_animation_replays_identically() {
        let (mut scene_a, handles_a) = room_scene();
        let (mut scene_b, handles_b) = room_scene();
        let mut animation_a = RoomAnimation::new(handles_a);
        let mut animation_b = RoomAnimation::new(handles_b);

        for _ in 0..777 {
            animation_a.advance(&mut scene_a);
            animation_b.advance(&mut scene_b);
        }

        let cube_a = scene_a.get_object(handles_a.cube).unwrap();
        let cube_b = scene_b.get_object(handles_b.cube).unwrap();
        assert_eq!(cube_a.transform.rotation, cube_b.transform.rotation);

        let sphere_a = scene_a.get_object(handles_a.sphere).unwrap();
        let sphere_b = scene_b.get_object(handles_b.sphere).unwrap();
        assert_eq!(sphere_a.transform.position, sphere_b.transform.position);
    }

    #[test]
    fn test_static_objects_never_move() {
        let (mut scene, handles) = room_scene();
        let before: Vec<_> = ["floor", "back_wall", "left_wall", "right_wall", "ceiling", "pedestal"]
            .iter()
            .map(|name| {
                let object = scene.find_object(name).unwrap();
                (object.transform.position, object.transform.rotation)
            })
            .collect();

        let mut animation = RoomAnimation::new(handles);
        for _ in 0..300 {
            animation.advance(&mut scene);
        }

        for (name, (position, rotation)) in
            ["floor", "back_wall", "left_wall", "right_wall", "ceiling", "pedestal"]
                .iter()
                .zip(before)
        {
            let object = scene.find_object(name).unwrap();
            assert_eq!(object.transform.position, position, "{name} moved");
            assert_eq!(object.transform.rotation, rotation, "{name} rotated");
        }
    }

    #[test]
    fn test_sphere_horizontal_position_is_fixed() {
        let (mut scene, handles) = room_scene();
        let mut animation = RoomAnimation::new(handles);

        for _ in 0..1000 {
            animation.advance(&mut scene);
        }

        let sphere = scene.get_object(handles.sphere).unwrap();
        assert_eq!(sphere.transform.position.x, room::SPHERE_POSITION_X);
        assert_eq!(sphere.transform.position.z, room::SPHERE_POSITION_Z);
    }
}

#[cfg(test)]
mod camera_tests {
    use super::*;

    #[test]
    fn test_resize_updates_projection_aspect() {
        let (mut scene, _) = room_scene();

        scene.camera_manager.camera.resize_projection(1920, 1080);
        let aspect = scene.camera_manager.camera.aspect;
        assert!(
            (aspect - 1920.0 / 1080.0).abs() < 1e-6,
            "Aspect should follow the new surface size, got {aspect}"
        );
    }

    #[test]
    fn test_resize_is_idempotent() {
        let (mut scene, _) = room_scene();
        let camera = &mut scene.camera_manager.camera;

        camera.resize_projection(1024, 768);
        camera.update_view_proj();
        let first = camera.uniform.view_proj;

        camera.resize_projection(1024, 768);
        camera.update_view_proj();
        let second = camera.uniform.view_proj;

        assert_eq!(first, second, "Repeating a resize should change nothing");
    }

    #[test]
    fn test_resize_ignores_zero_dimensions() {
        let (mut scene, _) = room_scene();
        let camera = &mut scene.camera_manager.camera;
        let aspect_before = camera.aspect;

        camera.resize_projection(0, 768);
        camera.resize_projection(1024, 0);

        assert_eq!(
            camera.aspect, aspect_before,
            "Minimized-window sizes should leave the projection alone"
        );
    }

    #[test]
    fn test_orbit_momentum_decays_to_rest() {
        let (mut scene, _) = room_scene();

        scene.camera_manager.controller.rotate(12.0, 4.0);
        assert!(scene.camera_manager.controller.has_momentum());

        for _ in 0..300 {
            scene.camera_manager.update();
        }
        assert!(
            !scene.camera_manager.controller.has_momentum(),
            "Damping should bring the camera to rest"
        );

        let yaw_settled = scene.camera_manager.camera.yaw;
        scene.camera_manager.update();
        assert_eq!(
            scene.camera_manager.camera.yaw, yaw_settled,
            "A camera at rest should stay at rest"
        );
    }

    #[test]
    fn test_zoom_respects_distance_bounds() {
        let (mut scene, _) = room_scene();
        scene.camera_manager.camera.bounds.min_distance = Some(1.2);
        scene.camera_manager.camera.bounds.max_distance = Some(12.0);

        // Zoom hard in both directions; the clamp has to hold throughout.
        scene.camera_manager.controller.zoom(500.0);
        for _ in 0..400 {
            scene.camera_manager.update();
            let distance = scene.camera_manager.camera.distance;
            assert!(
                (1.2..=12.0).contains(&distance),
                "Distance {distance} escaped its bounds"
            );
        }

        scene.camera_manager.controller.zoom(-500.0);
        for _ in 0..400 {
            scene.camera_manager.update();
            let distance = scene.camera_manager.camera.distance;
            assert!(
                (1.2..=12.0).contains(&distance),
                "Distance {distance} escaped its bounds"
            );
        }
    }

    #[test]
    fn test_update_keeps_uniform_in_sync() {
        let (mut scene, _) = room_scene();

        scene.camera_manager.controller.rotate(5.0, 0.0);
        scene.camera_manager.update();

        let from_uniform = scene.camera_manager.camera.uniform.view_proj;
        let mut camera = scene.camera_manager.camera;
        camera.update_view_proj();
        assert_eq!(
            from_uniform, camera.uniform.view_proj,
            "Scene update should leave the uniform matching the camera pose"
        );
    }
}
