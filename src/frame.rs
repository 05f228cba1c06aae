//! Per-frame animation and the pixel sweep.

use std::f32::consts::TAU;

use crate::camera::Camera;
use crate::config::RenderConfig;
use crate::error::Result;
use crate::scene::{self, Colour, Light, Object, Scene};
use crate::shading::Shader;
use crate::util::math::Vector3;

/// Where finished pixels go.
///
/// Creating the backend is its `init`; dropping it tears it down.
pub trait DisplayBackend {
    fn draw_pixel(&mut self, x: u32, y: u32, colour: Colour);
    /// Shows everything drawn since the previous call.
    fn present(&mut self) -> Result<()>;
    /// Non-blocking check for a quit request.
    fn poll_cancel(&mut self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    Continue,
    Cancelled,
}

/// Animation counters carried from one frame to the next.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SimulationState {
    /// Orbit angle in radians, kept in `[0, 2π)`.
    pub angle: f32,
    pub cycle_counter: u64,
}

/// Smoothly cycling light hue. Every channel stays within 0–255.
pub fn light_colour(cycle_counter: u64, cycle_speed: f32) -> Colour {
    let phase = cycle_counter as f32 * cycle_speed;
    Colour::rgb(
        127.5 + 127.5 * phase.cos(),
        127.5 + 127.5 * (phase + 2.0).cos(),
        127.5 + 127.5 * (phase + 4.0).sin(),
    )
}

/// Light orbit and colour cycle parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Animation {
    pub orbit_center: Vector3,
    pub orbit_radius: f32,
    pub orbit_speed: f32,
    pub cycle_speed: f32,
    pub brightness: f32,
}

impl Animation {
    pub fn from_config(config: &RenderConfig) -> Self {
        let main = scene::MAIN_SPHERE.center;
        Self {
            orbit_center: Vector3::new(main.x, main.y, config.orbit_height),
            orbit_radius: config.orbit_radius,
            orbit_speed: config.orbit_speed,
            cycle_speed: config.cycle_speed,
            brightness: config.light_brightness,
        }
    }

    pub fn light_position(&self, angle: f32) -> Vector3 {
        self.orbit_center + self.orbit_radius * Vector3::new(angle.cos(), angle.sin(), 0.0)
    }

    /// The animated light for the given state.
    pub fn light(&self, state: &SimulationState) -> Light {
        Light::new(
            self.light_position(state.angle),
            light_colour(state.cycle_counter, self.cycle_speed),
            self.brightness,
        )
    }

    pub fn advance(&self, state: &mut SimulationState) {
        state.angle = (state.angle + self.orbit_speed).rem_euclid(TAU);
        state.cycle_counter += 1;
    }
}

pub struct FrameDriver {
    animation: Animation,
    state: SimulationState,
    camera: Camera,
    shader: Shader,
    objects: Vec<Object>,
    scene: Scene,
    frame: u64,
}

impl FrameDriver {
    pub fn new(config: &RenderConfig) -> Self {
        Self::with_objects(config, scene::base_objects())
    }

    /// Driver animating a light over a custom set of objects.
    pub fn with_objects(config: &RenderConfig, objects: Vec<Object>) -> Self {
        Self {
            animation: Animation::from_config(config),
            state: SimulationState::default(),
            camera: Camera::new(config.eye, config.width, config.height),
            shader: Shader::new(config.compositing, config.shadow_bias),
            objects,
            scene: Scene::default(),
            frame: 0,
        }
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn animation(&self) -> &Animation {
        &self.animation
    }

    pub fn frames_rendered(&self) -> u64 {
        self.frame
    }

    /// Builds this frame's scene from the current state, then advances it.
    pub fn step(&mut self) {
        let light = self.animation.light(&self.state);
        self.animation.advance(&mut self.state);
        self.scene = Scene::new(self.objects.clone(), vec![light]);
    }

    /// Traces one primary ray per pixel of the current scene.
    pub fn render<D: DisplayBackend>(&self, backend: &mut D) {
        for row in 0..self.camera.height {
            for col in 0..self.camera.width {
                let ray = self.camera.primary_ray(row, col);
                let colour = self.shader.trace(&ray, &self.scene);
                backend.draw_pixel(col, row, colour);
            }
        }
    }

    /// Steps, renders and presents one frame, then checks for cancellation.
    pub fn run_frame<D: DisplayBackend>(&mut self, backend: &mut D) -> Result<FrameStatus> {
        self.step();
        self.render(backend);
        backend.present()?;
        self.frame += 1;

        if let Some(light) = self.scene.lights.first() {
            tracing::debug!(
                frame = self.frame,
                angle = self.state.angle,
                position = ?light.position,
                colour = ?light.colour,
                "frame presented"
            );
        }

        if backend.poll_cancel() {
            Ok(FrameStatus::Cancelled)
        } else {
            Ok(FrameStatus::Continue)
        }
    }
}
