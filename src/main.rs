use sphere_orbit_lib::{
    application::{AppState, Application, Layer, Screen},
    config::RenderConfig,
    display::WindowDisplay,
    error::Result,
    frame::{FrameDriver, FrameStatus},
};
use winit::{
    dpi::PhysicalSize,
    event::{ElementState, Event, KeyboardInput, VirtualKeyCode, WindowEvent},
};

struct RayTracingCPU {
    driver: FrameDriver,
    display: WindowDisplay,
}

impl Layer for RayTracingCPU {
    type LayerErr = ();

    fn start(screen: &mut Screen, _app: &AppState, config: &RenderConfig) -> Self {
        tracing::info!(
            width = config.width,
            height = config.height,
            compositing = ?config.compositing,
            "starting render loop"
        );
        Self {
            driver: FrameDriver::new(config),
            display: WindowDisplay::new(screen, config.width, config.height),
        }
    }

    fn resize(&mut self, new_size: PhysicalSize<u32>, _state: &AppState, _screen: &mut Screen) {
        tracing::debug!(
            width = new_size.width,
            height = new_size.height,
            "window resized; frame stays at {}x{}",
            self.display.frame().width(),
            self.display.frame().height()
        );
    }

    fn process_event(&mut self, event: &Event<()>, _screen: &mut Screen) {
        if let Event::WindowEvent {
            event:
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(VirtualKeyCode::Escape),
                            ..
                        },
                    ..
                },
            ..
        } = event
        {
            self.display.request_cancel();
        }
    }

    fn render(&mut self, _app: &AppState, screen: &mut Screen) -> Result<FrameStatus> {
        self.driver.run_frame(&mut self.display.target(screen))
    }

    fn shutdown(&mut self, _app: &AppState, _screen: &mut Screen) -> std::result::Result<(), Self::LayerErr> {
        tracing::info!(frames = self.driver.frames_rendered(), "exiting");
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt::init();
    tracing::info!("sphere_orbit started");
    pollster::block_on(Application::<RayTracingCPU>::init(RenderConfig::default()));
}
