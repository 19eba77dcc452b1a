use super::camera_utils::{convert_matrix4_to_array, Camera, CameraUniform};
use cgmath::*;

#[rustfmt::skip]
pub const OPENGL_TO_WGPU_MATRIX: cgmath::Matrix4<f32> = cgmath::Matrix4::new(
    1.0, 0.0, 0.0, 0.0,
    0.0, 1.0, 0.0, 0.0,
    0.0, 0.0, 0.5, 0.5,
    0.0, 0.0, 0.0, 1.0,
);

/// Orbiting camera described by spherical coordinates around a target.
///
/// Pitch and yaw are in radians; pitch 0 looks along the horizon and
/// positive pitch moves above the target. The world is Y-up.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCamera {
    pub distance: f32,
    pub pitch: f32,
    pub yaw: f32,
    pub eye: Vector3<f32>,
    pub target: Vector3<f32>,
    pub up: Vector3<f32>,
    pub bounds: OrbitCameraBounds,
    pub aspect: f32,
    pub fovy: Rad<f32>,
    pub znear: f32,
    pub zfar: f32,
    pub uniform: CameraUniform,
    home: HomePose,
}

/// Pose captured at construction, restored by `reset_to_default`.
#[derive(Debug, Clone, Copy)]
struct HomePose {
    distance: f32,
    pitch: f32,
    yaw: f32,
    target: Vector3<f32>,
}

impl Camera for OrbitCamera {
    fn build_view_projection_matrix(&self) -> Matrix4<f32> {
        let eye = Point3::from_vec(self.eye);
        let target = Point3::from_vec(self.target);
        let view = Matrix4::look_at_rh(eye, target, self.up);
        let proj =
            OPENGL_TO_WGPU_MATRIX * perspective(self.fovy, self.aspect, self.znear, self.zfar);
        proj * view
    }
}

impl OrbitCamera {
    pub fn new(distance: f32, pitch: f32, yaw: f32, target: Vector3<f32>, aspect: f32) -> Self {
        let mut camera = Self {
            distance,
            pitch,
            yaw,
            eye: Vector3::zero(), // Recalculated in `update()` below.
            target,
            up: Vector3::unit_y(),
            bounds: OrbitCameraBounds::default(),
            aspect,
            fovy: cgmath::Rad(std::f32::consts::PI / 4.0),
            znear: 0.1,
            zfar: 100.0,
            uniform: CameraUniform::default(),
            home: HomePose {
                distance,
                pitch,
                yaw,
                target,
            },
        };
        camera.update();
        camera
    }

    /// Restores the pose the camera was constructed with.
    pub fn reset_to_default(&mut self) {
        self.distance = self.home.distance;
        self.pitch = self.home.pitch;
        self.yaw = self.home.yaw;
        self.target = self.home.target;

        self.update();
    }

    pub fn set_distance(&mut self, distance: f32) {
        self.distance = distance.clamp(
            self.bounds.min_distance.unwrap_or(f32::EPSILON),
            self.bounds.max_distance.unwrap_or(f32::MAX),
        );
        self.update();
    }

    /// Zooms by a wheel delta, scaled so steps feel even across distances.
    pub fn add_distance(&mut self, delta: f32) {
        let corrected_zoom = f32::log10(self.distance.max(1.1)) * delta;
        self.set_distance(self.distance + corrected_zoom);
    }

    pub fn set_pitch(&mut self, pitch: f32) {
        self.pitch = pitch.clamp(self.bounds.min_pitch, self.bounds.max_pitch);
        self.update();
    }

    pub fn add_pitch(&mut self, delta: f32) {
        self.set_pitch(self.pitch + delta);
    }

    pub fn set_yaw(&mut self, yaw: f32) {
        let mut bounded_yaw = yaw;
        if let Some(min_yaw) = self.bounds.min_yaw {
            bounded_yaw = bounded_yaw.max(min_yaw);
        }
        if let Some(max_yaw) = self.bounds.max_yaw {
            bounded_yaw = bounded_yaw.min(max_yaw);
        }
        self.yaw = bounded_yaw;
        self.update();
    }

    pub fn add_yaw(&mut self, delta: f32) {
        self.set_yaw(self.yaw + delta);
    }

    /// Pans the camera relative to the current view direction.
    ///
    /// `delta.0` is horizontal pan, `delta.1` vertical, both in view space.
    /// Eye and target move together so the view direction is preserved.
    pub fn pan(&mut self, delta: (f32, f32)) {
        let forward = (self.target - self.eye).normalize();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        // Scale by distance for a consistent feel at all zoom levels
        let pan_scale = self.distance * 0.1;

        let horizontal_movement = right * delta.0 * pan_scale;
        let vertical_movement = up * delta.1 * pan_scale;
        let total_movement = horizontal_movement + vertical_movement;

        self.eye += total_movement;
        self.target += total_movement;
    }

    /// Updates the camera after changing `distance`, `pitch` or `yaw`.
    fn update(&mut self) {
        self.eye =
            calculate_cartesian_eye_position(self.pitch, self.yaw, self.distance, self.target);
    }

    /// Tracks the output surface size. Zero dimensions are ignored, and
    /// repeated calls with the same size leave the projection unchanged.
    pub fn resize_projection(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.aspect = width as f32 / height as f32;
    }

    pub fn update_view_proj(&mut self) {
        self.uniform.view_position = [self.eye.x, self.eye.y, self.eye.z, 1.0];
        self.uniform.view_proj = convert_matrix4_to_array(self.build_view_projection_matrix());
    }
}

/// Limits on the orbit parameters. `None` means unbounded.
#[derive(Debug, Clone, Copy)]
pub struct OrbitCameraBounds {
    pub min_distance: Option<f32>,
    pub max_distance: Option<f32>,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub min_yaw: Option<f32>,
    pub max_yaw: Option<f32>,
}

impl Default for OrbitCameraBounds {
    fn default() -> Self {
        Self {
            min_distance: None,
            max_distance: Some(16.0),
            min_pitch: -std::f32::consts::PI / 2.0 + f32::EPSILON,
            max_pitch: std::f32::consts::PI / 2.0 - f32::EPSILON,
            min_yaw: None,
            max_yaw: None,
        }
    }
}

fn calculate_cartesian_eye_position(
    pitch: f32,
    yaw: f32,
    distance: f32,
    target: Vector3<f32>,
) -> Vector3<f32> {
    Vector3::new(
        distance * yaw.sin() * pitch.cos(),
        distance * pitch.sin(),
        distance * yaw.cos() * pitch.cos(),
    ) + target
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn test_camera() -> OrbitCamera {
        OrbitCamera::new(4.0, 0.0, 0.0, Vector3::new(0.0, 0.8, 0.0), 4.0 / 3.0)
    }

    #[test]
    fn eye_sits_behind_target_at_zero_angles() {
        let camera = test_camera();
        assert_relative_eq!(camera.eye.x, 0.0);
        assert_relative_eq!(camera.eye.y, 0.8);
        assert_relative_eq!(camera.eye.z, 4.0);
    }

    #[test]
    fn positive_pitch_raises_the_eye() {
        let mut camera = test_camera();
        camera.set_pitch(std::f32::consts::FRAC_PI_2 - 0.001);
        assert_relative_eq!(camera.eye.y, 0.8 + 4.0, epsilon = 1e-3);
    }

    #[test]
    fn pitch_clamps_to_bounds() {
        let mut camera = test_camera();
        camera.bounds.min_pitch = 0.05;
        camera.set_pitch(-2.0);
        assert_relative_eq!(camera.pitch, 0.05);
        camera.set_pitch(10.0);
        assert_relative_eq!(camera.pitch, camera.bounds.max_pitch);
    }

    #[test]
    fn distance_clamps_to_bounds() {
        let mut camera = test_camera();
        camera.bounds.min_distance = Some(1.2);
        camera.bounds.max_distance = Some(10.0);
        camera.set_distance(0.1);
        assert_relative_eq!(camera.distance, 1.2);
        camera.set_distance(50.0);
        assert_relative_eq!(camera.distance, 10.0);
    }

    #[test]
    fn resize_projection_sets_aspect_ratio() {
        let mut camera = test_camera();
        camera.resize_projection(1024, 768);
        assert_relative_eq!(camera.aspect, 1024.0 / 768.0);
        assert_relative_eq!(camera.aspect, 4.0 / 3.0, epsilon = 1e-6);
    }

    #[test]
    fn resize_projection_is_idempotent() {
        let mut camera = test_camera();
        camera.resize_projection(1920, 1080);
        let first = camera.aspect;
        camera.resize_projection(1920, 1080);
        assert_eq!(camera.aspect, first);
    }

    #[test]
    fn resize_projection_ignores_zero_dimensions() {
        let mut camera = test_camera();
        let before = camera.aspect;
        camera.resize_projection(0, 768);
        camera.resize_projection(1024, 0);
        assert_eq!(camera.aspect, before);
    }

    #[test]
    fn reset_restores_construction_pose() {
        let mut camera = test_camera();
        camera.add_yaw(1.0);
        camera.add_pitch(0.5);
        camera.set_distance(8.0);
        camera.pan((1.0, 1.0));
        camera.reset_to_default();
        assert_relative_eq!(camera.distance, 4.0);
        assert_relative_eq!(camera.pitch, 0.0);
        assert_relative_eq!(camera.yaw, 0.0);
        assert_relative_eq!(camera.target.y, 0.8);
    }

    #[test]
    fn view_proj_uniform_tracks_eye() {
        let mut camera = test_camera();
        camera.update_view_proj();
        assert_eq!(camera.uniform.view_position[2], camera.eye.z);
        let before = camera.uniform.view_proj;
        camera.add_yaw(0.3);
        camera.update_view_proj();
        assert_ne!(before, camera.uniform.view_proj);
    }
}
