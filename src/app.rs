use winit::application::ApplicationHandler;
use winit::dpi::LogicalSize;
use winit::error::EventLoopError;
use winit::event::{ElementState, WindowEvent};
use winit::event_loop::{ActiveEventLoop, EventLoop, EventLoopProxy};
use winit::keyboard::{KeyCode, PhysicalKey};
use winit::window::{Window, WindowId};

use crate::view::ViewSystem;

const WINDOW_TITLE: &str = "LearnOpenGL";
const WINDOW_WIDTH: u32 = 800;
const WINDOW_HEIGHT: u32 = 600;

pub struct App {
    event_loop_proxy: EventLoopProxy<UserEvent>,
    view_system: Option<ViewSystem>,
}

impl App {
    pub fn new(event_loop: &EventLoop<UserEvent>) -> Self {
        App {
            event_loop_proxy: event_loop.create_proxy(),
            view_system: None,
        }
    }

    pub fn create_event_loop() -> Result<EventLoop<UserEvent>, EventLoopError> {
        EventLoop::<UserEvent>::with_user_event().build()
    }

    fn create_window(event_loop: &ActiveEventLoop) -> Window {
        let attributes = Window::default_attributes()
            .with_title(WINDOW_TITLE)
            .with_inner_size(LogicalSize::new(WINDOW_WIDTH, WINDOW_HEIGHT));

        #[cfg(target_arch = "wasm32")]
        let attributes = {
            use wasm_bindgen::JsCast;
            use winit::platform::web::WindowAttributesExtWebSys;

            let canvas = web_sys::window()
                .and_then(|window| window.document())
                .and_then(|document| document.get_element_by_id("triangle-canvas"))
                .and_then(|element| element.dyn_into::<web_sys::HtmlCanvasElement>().ok());

            attributes.with_canvas(canvas)
        };

        match event_loop.create_window(attributes) {
            Ok(window) => window,
            Err(error) => {
                log::error!("Failed to create window: {error}");
                std::process::exit(-1);
            }
        }
    }

    async fn initialize_view_system(event_loop_proxy: EventLoopProxy<UserEvent>, window: Window) {
        let view_system = match ViewSystem::from_window(window).await {
            Ok(view_system) => view_system,
            Err(error) => {
                log::error!("Failed to initialize the graphics device: {error}");
                std::process::exit(-1);
            }
        };

        assert!(event_loop_proxy
            .send_event(UserEvent::ViewSystemReady(view_system))
            .is_ok());
    }
}

impl ApplicationHandler<UserEvent> for App {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        log::info!("Application resumed");

        let window = App::create_window(event_loop);
        let event_loop_proxy = self.event_loop_proxy.clone();
        let future = async move {
            App::initialize_view_system(event_loop_proxy, window).await;
        };

        cfg_if::cfg_if! {
            if #[cfg(target_arch="wasm32")] {
                wasm_bindgen_futures::spawn_local(future);
            } else {
                pollster::block_on(future);
            }
        }
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        window_id: WindowId,
        event: WindowEvent,
    ) {
        let view_system = match &mut self.view_system {
            Some(view_system) => view_system,
            None => return,
        };

        if view_system.window.id() != window_id {
            return;
        }

        match event {
            WindowEvent::CloseRequested => event_loop.exit(),
            WindowEvent::KeyboardInput { event, .. }
                if is_escape_press(event.state, event.physical_key) =>
            {
                event_loop.exit()
            }
            WindowEvent::Resized(new_size) => {
                view_system.render_system.set_view_dimensions(new_size)
            }
            WindowEvent::RedrawRequested => {
                match view_system.update_view() {
                    Ok(_) => {}
                    Err(error) => {
                        if let Some(error) = error.downcast_ref::<wgpu::SurfaceError>() {
                            match error {
                                wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated => {
                                    view_system.render_system.sync_view_dimensions()
                                }
                                wgpu::SurfaceError::OutOfMemory => {
                                    log::error!("OutOfMemory");
                                    event_loop.exit();
                                }
                                wgpu::SurfaceError::Timeout => {
                                    log::warn!("Surface timeout");
                                }
                            }
                        }
                    }
                }

                view_system.window.request_redraw();
            }
            _ => {}
        }
    }

    fn user_event(&mut self, _event_loop: &ActiveEventLoop, event: UserEvent) {
        let UserEvent::ViewSystemReady(view_system) = event;

        log::info!("View system created");

        view_system.window.request_redraw();
        self.view_system = Some(view_system);
    }
}

pub enum UserEvent {
    ViewSystemReady(ViewSystem),
}

fn is_escape_press(state: ElementState, physical_key: PhysicalKey) -> bool {
    state == ElementState::Pressed && physical_key == PhysicalKey::Code(KeyCode::Escape)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_press_requests_close() {
        assert!(is_escape_press(
            ElementState::Pressed,
            PhysicalKey::Code(KeyCode::Escape)
        ));
    }

    #[test]
    fn test_escape_release_is_ignored() {
        assert!(!is_escape_press(
            ElementState::Released,
            PhysicalKey::Code(KeyCode::Escape)
        ));
    }

    #[test]
    fn test_other_keys_are_ignored() {
        assert!(!is_escape_press(
            ElementState::Pressed,
            PhysicalKey::Code(KeyCode::Space)
        ));
        assert!(!is_escape_press(
            ElementState::Released,
            PhysicalKey::Code(KeyCode::KeyQ)
        ));
    }
}
