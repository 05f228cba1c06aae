use std::{
    process::Termination,
    time::{Duration, Instant},
};

use wgpu::SurfaceError;
use winit::{
    dpi::PhysicalSize,
    event::*,
    event_loop::{ControlFlow, EventLoop, EventLoopWindowTarget},
    window::{Window, WindowBuilder},
};

use crate::config::RenderConfig;
use crate::error::{DisplayError, Result};
use crate::frame::FrameStatus;

#[derive(Debug)]
pub struct AppState {
    previous_time: Instant,
    elapsed_time: Duration,
    frame_count: u64,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            previous_time: Instant::now(),
            elapsed_time: Duration::ZERO,
            frame_count: 0,
        }
    }

    pub fn update(&mut self) {
        let current_time = Instant::now();
        self.elapsed_time = current_time.duration_since(self.previous_time);
        self.previous_time = current_time;
        self.frame_count += 1;
    }

    /// Time between the two most recent frames.
    pub fn elapsed_time(&self) -> Duration {
        self.elapsed_time
    }

    pub fn frame_count(&self) -> u64 {
        self.frame_count
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

pub struct Application<L: Layer + 'static> {
    layer: Option<L>,
    screen: Screen,
    state: AppState,
    config: RenderConfig,
    exiting: bool,
}

impl<L: Layer + 'static> Application<L> {
    pub fn new(screen: Screen, config: RenderConfig) -> Self {
        Self {
            screen,
            layer: None,
            state: AppState::new(),
            config,
            exiting: false,
        }
    }

    fn run(
        &mut self,
        event: Event<()>,
        _event_loop: &EventLoopWindowTarget<()>,
        control_flow: &mut ControlFlow,
    ) {
        control_flow.set_poll();

        if let Some(layer) = self.layer.as_mut() {
            layer.process_event(&event, &mut self.screen);
        }

        match event {
            Event::NewEvents(StartCause::Init) => {
                self.layer = Some(L::start(&mut self.screen, &self.state, &self.config));
            }
            Event::WindowEvent {
                window_id,
                ref event,
            } => match event {
                WindowEvent::CloseRequested if self.screen.window().id() == window_id => {
                    self.exit(control_flow);
                }
                WindowEvent::Resized(physical_size) => {
                    self.screen.resize(*physical_size);
                    if let Some(layer) = self.layer.as_mut() {
                        layer.resize(*physical_size, &self.state, &mut self.screen);
                    }
                }
                WindowEvent::ScaleFactorChanged { new_inner_size, .. } => {
                    self.screen.resize(**new_inner_size);
                    if let Some(layer) = self.layer.as_mut() {
                        layer.resize(**new_inner_size, &self.state, &mut self.screen);
                    }
                }
                _ => {}
            },
            Event::MainEventsCleared => {
                self.screen.window().request_redraw();
            }
            Event::RedrawRequested(window_id)
                if self.screen.window().id() == window_id && !self.exiting =>
            {
                let Some(layer) = self.layer.as_mut() else {
                    return;
                };

                match layer.render(&self.state, &mut self.screen) {
                    Ok(FrameStatus::Continue) => {}
                    Ok(FrameStatus::Cancelled) => self.exit(control_flow),
                    Err(DisplayError::Surface(SurfaceError::Lost)) => {
                        self.screen.resize_to_current()
                    }
                    Err(DisplayError::Surface(SurfaceError::OutOfMemory)) => {
                        tracing::error!("surface out of memory");
                        control_flow.set_exit_with_code(137);
                    }
                    Err(e) => tracing::error!("{:?}", e),
                }

                self.state.update();
                tracing::debug!(
                    frame = self.state.frame_count(),
                    frame_time_ms = self.state.elapsed_time().as_secs_f32() * 1000.0,
                    "frame time"
                );
            }
            _ => {}
        }
    }

    fn exit(&mut self, control_flow: &mut ControlFlow) {
        if self.exiting {
            return;
        }
        self.exiting = true;
        control_flow.set_exit_with_code(0);
        if let Some(layer) = self.layer.as_mut() {
            if layer.shutdown(&self.state, &mut self.screen).is_err() {
                control_flow.set_exit_with_code(1);
            }
        }
    }

    /// Opens the window and drives the layer until it exits.
    ///
    /// A window or graphics device that cannot be created is fatal.
    pub async fn init(config: RenderConfig) {
        let event_loop = EventLoop::new();
        let instance = wgpu::Instance::new(wgpu::InstanceDescriptor::default());
        let screen = match Screen::new(&event_loop, &instance, &config).await {
            Ok(screen) => screen,
            Err(e) => {
                tracing::error!("display initialization failed: {}", e);
                std::process::exit(1);
            }
        };
        tracing::info!(
            width = screen.config.width,
            height = screen.config.height,
            surface_format = ?screen.config.format,
            "display ready"
        );

        let mut application = Self::new(screen, config);
        event_loop.run(move |event, event_loop, control_flow| {
            application.run(event, event_loop, control_flow);
        });
    }
}

pub struct Screen {
    pub surface: wgpu::Surface,
    pub device: wgpu::Device,
    pub queue: wgpu::Queue,
    pub config: wgpu::SurfaceConfiguration,
    window: Window,
}

impl Screen {
    pub async fn new(
        event_loop: &EventLoopWindowTarget<()>,
        instance: &wgpu::Instance,
        render_config: &RenderConfig,
    ) -> Result<Self> {
        let window = WindowBuilder::new()
            .with_title(render_config.title.clone())
            .with_inner_size(PhysicalSize::new(render_config.width, render_config.height))
            .build(event_loop)?;

        // SAFETY:
        // The surface needs to live as long as the window that created it.
        // Screen owns the window so this should be safe.
        let surface = unsafe { instance.create_surface(&window) }?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::default(),
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .ok_or(DisplayError::NoAdapter)?;
        let (device, queue) = adapter
            .request_device(
                &wgpu::DeviceDescriptor {
                    features: adapter.features(),
                    limits: wgpu::Limits::default(),
                    label: None,
                },
                None,
            )
            .await?;
        let size = window.inner_size();
        let config = surface
            .get_default_config(&adapter, size.width, size.height)
            .ok_or(DisplayError::UnsupportedSurface)?;
        surface.configure(&device, &config);

        Ok(Self {
            window,
            surface,
            device,
            queue,
            config,
        })
    }

    pub fn window(&self) -> &Window {
        &self.window
    }

    /// Resize the screen to new window size.
    pub fn resize(&mut self, new_size: PhysicalSize<u32>) {
        if new_size.width > 0 && new_size.height > 0 {
            self.config.width = new_size.width;
            self.config.height = new_size.height;
            self.surface.configure(&self.device, &self.config);
        }
    }

    /// Resize the screen to current window inner size.
    pub fn resize_to_current(&mut self) {
        self.resize(self.window.inner_size());
    }
}

pub trait Layer: Sized {
    type LayerErr: Termination + 'static;

    fn start(screen: &mut Screen, app: &AppState, config: &RenderConfig) -> Self;
    fn process_event(&mut self, event: &Event<()>, screen: &mut Screen);
    fn resize(&mut self, new_size: PhysicalSize<u32>, app: &AppState, screen: &mut Screen);
    /// Renders and presents one frame.
    fn render(&mut self, app: &AppState, screen: &mut Screen) -> Result<FrameStatus>;
    fn shutdown(&mut self, app: &AppState, screen: &mut Screen) -> std::result::Result<(), Self::LayerErr>;
}
