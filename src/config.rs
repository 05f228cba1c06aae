//! Render and animation tunables.

use crate::shading::Compositing;
use crate::util::math::Vector3;

#[derive(Debug, Clone, PartialEq)]
pub struct RenderConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub eye: Vector3,
    /// Radius of the light's circular path around the main sphere.
    pub orbit_radius: f32,
    /// Radians added to the orbit angle every frame.
    pub orbit_speed: f32,
    /// Height (`z`) of the orbit plane.
    pub orbit_height: f32,
    /// Radians of hue phase advanced per frame.
    pub cycle_speed: f32,
    pub light_brightness: f32,
    pub shadow_bias: f32,
    pub compositing: Compositing,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "Ray Tracing".to_owned(),
            width: 400,
            height: 400,
            eye: Vector3::new(0.0, 0.0, 50.0),
            orbit_radius: 25.0,
            orbit_speed: 0.1,
            // blue sphere z (20) + 2.5 * main sphere radius (10)
            orbit_height: 45.0,
            cycle_speed: 0.05,
            light_brightness: 1.0,
            shadow_bias: 1e-3,
            compositing: Compositing::Additive,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn resolution(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn eye(mut self, eye: Vector3) -> Self {
        self.eye = eye;
        self
    }

    pub fn orbit(mut self, radius: f32, speed: f32, height: f32) -> Self {
        self.orbit_radius = radius;
        self.orbit_speed = speed;
        self.orbit_height = height;
        self
    }

    pub fn cycle_speed(mut self, speed: f32) -> Self {
        self.cycle_speed = speed;
        self
    }

    pub fn light_brightness(mut self, brightness: f32) -> Self {
        self.light_brightness = brightness;
        self
    }

    pub fn shadow_bias(mut self, bias: f32) -> Self {
        self.shadow_bias = bias;
        self
    }

    pub fn compositing(mut self, compositing: Compositing) -> Self {
        self.compositing = compositing;
        self
    }
}
