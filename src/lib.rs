//! CPU ray tracer for an animated scene of spheres lit by an orbiting point light.
//!
//! The tracing core (`util::math`, `ray`, `scene`, `intersect`, `shading`,
//! `camera`, `frame`) has no windowing dependencies; `application`,
//! `display`, `renderer` and `texture` present the frames in a window.

pub mod application;
pub mod camera;
pub mod config;
pub mod display;
pub mod error;
pub mod frame;
pub mod framebuffer;
pub mod intersect;
pub mod ray;
pub mod renderer;
pub mod scene;
pub mod shading;
pub mod texture;
pub mod util;
