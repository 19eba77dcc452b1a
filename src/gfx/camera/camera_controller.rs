use winit::{
    dpi::PhysicalPosition,
    event::{DeviceEvent, ElementState, KeyEvent, MouseScrollDelta},
    keyboard::{KeyCode, PhysicalKey},
    window::Window,
};

use super::orbit_camera::OrbitCamera;

/// Velocity decay applied once per frame.
pub const DAMPING: f32 = 0.85;

/// Velocities below this magnitude snap to zero so the camera settles.
const VELOCITY_EPSILON: f32 = 1e-4;

/// Translates input events into damped orbit camera motion.
///
/// Events do not move the camera directly. They add to per-axis velocities,
/// and [`CameraController::update_camera`] integrates those velocities each
/// frame before decaying them by [`DAMPING`]. Motion therefore eases out
/// over a few frames after the input stops.
pub struct CameraController {
    pub rotate_speed: f32,
    pub zoom_speed: f32,
    pub pan_speed: f32,
    is_shift_held: bool,
    is_mouse_pressed: bool,
    velocity_yaw: f32,
    velocity_pitch: f32,
    velocity_zoom: f32,
    velocity_pan: (f32, f32),
}

impl CameraController {
    pub fn new(rotate_speed: f32, zoom_speed: f32) -> Self {
        Self {
            rotate_speed,
            zoom_speed,
            pan_speed: 0.01,
            is_shift_held: false,
            is_mouse_pressed: false,
            velocity_yaw: 0.0,
            velocity_pitch: 0.0,
            velocity_zoom: 0.0,
            velocity_pan: (0.0, 0.0),
        }
    }

    /// Adds orbit velocity from a mouse drag delta.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.velocity_yaw += -dx * self.rotate_speed;
        self.velocity_pitch += dy * self.rotate_speed;
    }

    /// Adds zoom velocity from a scroll delta.
    pub fn zoom(&mut self, delta: f32) {
        self.velocity_zoom += delta * self.zoom_speed;
    }

    /// Adds pan velocity from a mouse drag delta.
    pub fn pan(&mut self, dx: f32, dy: f32) {
        self.velocity_pan.0 += -dx * self.pan_speed;
        self.velocity_pan.1 += dy * self.pan_speed;
    }

    pub fn process_events(&mut self, event: &DeviceEvent, window: &Window) {
        match event {
            DeviceEvent::Button {
                button: 0, // Left Mouse Button
                state,
            } => {
                self.is_mouse_pressed = *state == ElementState::Pressed;
            }
            DeviceEvent::MouseWheel { delta, .. } => {
                let scroll_amount = -match delta {
                    MouseScrollDelta::LineDelta(_, scroll) => *scroll,
                    MouseScrollDelta::PixelDelta(PhysicalPosition { y: scroll, .. }) => {
                        *scroll as f32
                    }
                };
                self.zoom(scroll_amount);
                window.request_redraw();
            }
            DeviceEvent::MouseMotion { delta } => {
                if self.is_mouse_pressed {
                    if self.is_shift_held {
                        // Shift + drag pans the focus point
                        self.pan(delta.0 as f32, delta.1 as f32);
                    } else {
                        // Plain drag orbits around the focus
                        self.rotate(delta.0 as f32, delta.1 as f32);
                    }
                    window.request_redraw();
                }
            }
            _ => (),
        }
    }

    pub fn process_keyed_events(&mut self, event: &KeyEvent, camera: &mut OrbitCamera) {
        match event {
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::ShiftLeft | KeyCode::ShiftRight),
                state,
                ..
            } => {
                self.is_shift_held = *state == ElementState::Pressed;
            }
            KeyEvent {
                physical_key: PhysicalKey::Code(KeyCode::KeyC),
                state: ElementState::Pressed,
                ..
            } => {
                // Shift + C returns the camera to its home pose
                if self.is_shift_held {
                    self.clear_momentum();
                    camera.reset_to_default();
                }
            }
            _ => (),
        }
    }

    /// Applies accumulated velocities to the camera, then decays them.
    ///
    /// Call once per frame. When all velocities have settled to zero the
    /// camera is left untouched.
    pub fn update_camera(&mut self, camera: &mut OrbitCamera) {
        if self.velocity_yaw != 0.0 {
            camera.add_yaw(self.velocity_yaw);
        }
        if self.velocity_pitch != 0.0 {
            camera.add_pitch(self.velocity_pitch);
        }
        if self.velocity_zoom != 0.0 {
            camera.add_distance(self.velocity_zoom);
        }
        if self.velocity_pan != (0.0, 0.0) {
            camera.pan(self.velocity_pan);
        }

        self.velocity_yaw = decay(self.velocity_yaw, DAMPING);
        self.velocity_pitch = decay(self.velocity_pitch, DAMPING);
        self.velocity_zoom = decay(self.velocity_zoom, DAMPING);
        self.velocity_pan.0 = decay(self.velocity_pan.0, DAMPING);
        self.velocity_pan.1 = decay(self.velocity_pan.1, DAMPING);
    }

    /// True while any velocity is still nonzero.
    pub fn has_momentum(&self) -> bool {
        self.velocity_yaw != 0.0
            || self.velocity_pitch != 0.0
            || self.velocity_zoom != 0.0
            || self.velocity_pan != (0.0, 0.0)
    }

    fn clear_momentum(&mut self) {
        self.velocity_yaw = 0.0;
        self.velocity_pitch = 0.0;
        self.velocity_zoom = 0.0;
        self.velocity_pan = (0.0, 0.0);
    }
}

fn decay(velocity: f32, damping: f32) -> f32 {
    let damped = velocity * damping;
    if damped.abs() < VELOCITY_EPSILON {
        0.0
    } else {
        damped
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use cgmath::Vector3;

    fn camera() -> OrbitCamera {
        OrbitCamera::new(4.0, 0.3, 0.5, Vector3::new(0.0, 0.8, 0.0), 4.0 / 3.0)
    }

    #[test]
    fn update_at_rest_leaves_camera_unchanged() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut cam = camera();
        let (yaw, pitch, distance) = (cam.yaw, cam.pitch, cam.distance);
        controller.update_camera(&mut cam);
        assert_eq!(cam.yaw, yaw);
        assert_eq!(cam.pitch, pitch);
        assert_eq!(cam.distance, distance);
        assert!(!controller.has_momentum());
    }

    #[test]
    fn drag_right_orbits_left() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut cam = camera();
        let yaw_before = cam.yaw;
        controller.rotate(10.0, 0.0);
        controller.update_camera(&mut cam);
        assert!(cam.yaw < yaw_before);
    }

    #[test]
    fn momentum_decays_by_damping_each_frame() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut cam = camera();
        controller.rotate(-20.0, 0.0);

        let y0 = cam.yaw;
        controller.update_camera(&mut cam);
        let y1 = cam.yaw;
        controller.update_camera(&mut cam);
        let y2 = cam.yaw;

        assert_relative_eq!((y2 - y1) / (y1 - y0), DAMPING, epsilon = 1e-5);
    }

    #[test]
    fn momentum_settles_to_rest() {
        let mut controller = CameraController::new(0.005, 0.1);
        let mut cam = camera();
        controller.rotate(50.0, 30.0);
        controller.zoom(2.0);
        controller.pan(5.0, 5.0);
        assert!(controller.has_momentum());

        for _ in 0..200 {
            controller.update_camera(&mut cam);
        }
        assert!(!controller.has_momentum());

        // A settled controller no longer moves the camera at all.
        let (yaw, pitch) = (cam.yaw, cam.pitch);
        controller.update_camera(&mut cam);
        assert_eq!(cam.yaw, yaw);
        assert_eq!(cam.pitch, pitch);
    }

    #[test]
    fn pitch_stays_clamped_under_momentum() {
        let mut controller = CameraController::new(0.05, 0.1);
        let mut cam = camera();
        controller.rotate(0.0, 500.0);
        for _ in 0..100 {
            controller.update_camera(&mut cam);
        }
        assert!(cam.pitch <= cam.bounds.max_pitch);
    }
}
