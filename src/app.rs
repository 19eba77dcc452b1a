use anyhow::Context;
use cgmath::Vector3;
use std::sync::Arc;
use winit::{
    application::ApplicationHandler,
    dpi::PhysicalSize,
    event::WindowEvent,
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    window::{Window, WindowAttributes},
};

use crate::gfx::{
    camera::{
        camera_controller::CameraController, camera_utils::CameraManager, orbit_camera::OrbitCamera,
    },
    rendering::render_engine::RenderEngine,
    scene::Scene,
};

/// Per-frame scene callback, runs before the camera and GPU updates
pub type UpdateCallback = Box<dyn FnMut(&mut Scene)>;

pub struct DioramaApp {
    event_loop: Option<EventLoop<()>>,
    app_state: AppState,
}

struct AppState {
    window: Option<Arc<Window>>,
    render_engine: Option<RenderEngine>,
    scene: Scene,
    update_callback: Option<UpdateCallback>,
    init_error: Option<anyhow::Error>,
}

impl DioramaApp {
    /// Create a new application with the default room camera
    pub fn new() -> Self {
        let event_loop = EventLoop::new().expect("Failed to create event loop");

        // Frame the open side of the room, orbiting the pedestal
        let mut camera = OrbitCamera::new(
            4.6,
            0.35,
            0.6,
            Vector3::new(0.0, 0.8, 0.0),
            1024.0 / 768.0,
        );
        camera.bounds.min_distance = Some(1.2);
        camera.bounds.max_distance = Some(12.0);
        camera.bounds.min_pitch = 0.02;
        let controller = CameraController::new(0.005, 0.1);

        let camera_manager = CameraManager::new(camera, controller);
        let scene = Scene::new(camera_manager);

        Self {
            event_loop: Some(event_loop),
            app_state: AppState {
                window: None,
                render_engine: None,
                scene,
                update_callback: None,
                init_error: None,
            },
        }
    }

    /// Set the per-frame update callback
    pub fn set_update<F>(&mut self, update_fn: F)
    where
        F: FnMut(&mut Scene) + 'static,
    {
        self.app_state.update_callback = Some(Box::new(update_fn));
    }

    /// Mutable access to the scene, for populating it before `run`
    pub fn scene_mut(&mut self) -> &mut Scene {
        &mut self.app_state.scene
    }

    /// Run the application (consumes self and starts the event loop)
    ///
    /// Returns an error if the GPU context could not be brought up or the
    /// event loop fails.
    pub fn run(mut self) -> anyhow::Result<()> {
        let event_loop = self
            .event_loop
            .take()
            .context("event loop already consumed")?;
        event_loop.set_control_flow(ControlFlow::Poll);

        event_loop.run_app(&mut self.app_state)?;

        if let Some(error) = self.app_state.init_error.take() {
            return Err(error);
        }
        Ok(())
    }
}

impl ApplicationHandler for AppState {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let window = match event_loop.create_window(
            WindowAttributes::default()
                .with_title("Diorama")
                .with_inner_size(winit::dpi::LogicalSize::new(1024, 768)),
        ) {
            Ok(window) => window,
            Err(error) => {
                self.init_error = Some(error.into());
                event_loop.exit();
                return;
            }
        };

        let window_handle = Arc::new(window);
        self.window = Some(window_handle.clone());

        let (width, height) = window_handle.inner_size().into();

        let window_clone = window_handle.clone();
        match pollster::block_on(RenderEngine::new(window_clone, width, height)) {
            Ok(renderer) => {
                self.scene
                    .init_gpu_resources(renderer.device(), renderer.queue());
                self.render_engine = Some(renderer);
            }
            Err(error) => {
                self.init_error = Some(error.into());
                event_loop.exit();
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &winit::event_loop::ActiveEventLoop,
        _window_id: winit::window::WindowId,
        event: winit::event::WindowEvent,
    ) {
        let Some(render_engine) = self.render_engine.as_mut() else {
            return;
        };

        match event {
            WindowEvent::KeyboardInput {
                event: key_event, ..
            } => {
                if matches!(
                    key_event.physical_key,
                    winit::keyboard::PhysicalKey::Code(winit::keyboard::KeyCode::Escape)
                ) {
                    event_loop.exit();
                    return;
                }
                self.scene.camera_manager.process_keyboard_event(&key_event);
            }
            WindowEvent::Resized(PhysicalSize { width, height }) => {
                self.scene
                    .camera_manager
                    .camera
                    .resize_projection(width, height);
                render_engine.resize(width, height);
            }
            WindowEvent::CloseRequested => {
                event_loop.exit();
            }
            WindowEvent::RedrawRequested => {
                if let Some(update) = self.update_callback.as_mut() {
                    update(&mut self.scene);
                }
                self.scene.update();
                render_engine.update(self.scene.camera_manager.camera.uniform, &self.scene.lights);
                self.scene.update_all_transforms(render_engine.queue());
                render_engine.render_frame(&self.scene);
            }
            _ => (),
        }
    }

    fn device_event(
        &mut self,
        _event_loop: &ActiveEventLoop,
        _device_id: winit::event::DeviceId,
        event: winit::event::DeviceEvent,
    ) {
        let Some(window) = self.window.as_ref() else {
            return;
        };

        self.scene.camera_manager.process_event(&event, window);
    }

    fn about_to_wait(&mut self, _event_loop: &ActiveEventLoop) {
        if let Some(ref window) = self.window {
            window.request_redraw();
        }
    }
}
