//! Local lighting: shadow rays plus a Lambertian diffuse term.

use crate::intersect::Intersection;
use crate::ray::Ray;
use crate::scene::{Colour, Light, Object, Scene};
use crate::util::math::{Normalize, Vector3};

/// Background for rays that hit nothing.
pub const BACKGROUND: Colour = Colour::BLACK;

/// How surfaces hit by the same primary ray combine into a pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compositing {
    /// Sum the shaded colour of every object the ray passes through.
    #[default]
    Additive,
    /// Show only the closest surface in front of the ray.
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Shader {
    pub compositing: Compositing,
    /// Offset along the normal applied to shadow ray origins.
    pub shadow_bias: f32,
}

impl Default for Shader {
    fn default() -> Self {
        Self {
            compositing: Compositing::default(),
            shadow_bias: 1e-3,
        }
    }
}

/// Cosine between the surface normal and the direction to the light, or 0
/// when the light is level with or behind the surface.
pub fn diffuse_factor(normal: Vector3, to_light: Vector3) -> f32 {
    let factor = normal.dot(to_light);
    if factor > 0.0 {
        factor
    } else {
        0.0
    }
}

impl Shader {
    pub fn new(compositing: Compositing, shadow_bias: f32) -> Self {
        Self {
            compositing,
            shadow_bias,
        }
    }

    /// Colour seen along `ray`.
    pub fn trace(&self, ray: &Ray, scene: &Scene) -> Colour {
        let mut pixel = BACKGROUND;

        match self.compositing {
            Compositing::Additive => {
                for object in &scene.objects {
                    if let Some(hit) = object.shape.intersect(ray) {
                        pixel.accumulate(self.shade_hit(&hit, object.colour, scene));
                    }
                }
            }
            Compositing::Nearest => {
                if let Some((object, hit)) = nearest_hit(ray, &scene.objects) {
                    pixel.accumulate(self.shade_hit(&hit, object.colour, scene));
                }
            }
        }

        pixel
    }

    /// Sum of every light's diffuse contribution at a surface point.
    pub fn shade_hit(&self, hit: &Intersection, colour: Colour, scene: &Scene) -> Colour {
        let mut shaded = Colour::new(0.0, 0.0, 0.0, colour.a);
        for light in &scene.lights {
            shaded.accumulate(self.light_contribution(hit, colour, light, scene));
        }
        shaded
    }

    /// Contribution of a single light, zero when shadowed or facing away.
    pub fn light_contribution(
        &self,
        hit: &Intersection,
        colour: Colour,
        light: &Light,
        scene: &Scene,
    ) -> Colour {
        let unlit = Colour::new(0.0, 0.0, 0.0, colour.a);
        if self.in_shadow(hit.point, hit.normal, light, scene) {
            return unlit;
        }

        let to_light = (light.position - hit.point).normalized();
        let factor = diffuse_factor(hit.normal, to_light);
        if factor == 0.0 {
            return unlit;
        }

        colour
            .modulate(light.colour)
            .scale(factor * light.brightness)
    }

    /// True when any object lies on the ray from `point` toward the light.
    pub fn in_shadow(&self, point: Vector3, normal: Vector3, light: &Light, scene: &Scene) -> bool {
        let origin = point + normal * self.shadow_bias;
        let shadow_ray = Ray::new(origin, (light.position - origin).normalized());
        scene
            .objects
            .iter()
            .any(|object| object.shape.intersect(&shadow_ray).is_some())
    }
}

fn nearest_hit<'a>(ray: &Ray, objects: &'a [Object]) -> Option<(&'a Object, Intersection)> {
    objects
        .iter()
        .filter_map(|object| object.shape.intersect(ray).map(|hit| (object, hit)))
        .min_by(|(_, a), (_, b)| a.t.total_cmp(&b.t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::math::approx_eq;

    fn lit_scene() -> Scene {
        Scene::new(
            vec![Object::sphere(Vector3::ZERO, 10.0, Colour::WHITE)],
            vec![Light::new(Vector3::new(0.0, 0.0, 100.0), Colour::WHITE, 1.0)],
        )
    }

    fn front_hit() -> Intersection {
        Intersection {
            t: 40.0,
            point: Vector3::new(0.0, 0.0, 10.0),
            normal: Vector3::new(0.0, 0.0, 1.0),
        }
    }

    #[test]
    fn diffuse_factor_is_zero_when_perpendicular_or_behind() {
        let normal = Vector3::new(0.0, 1.0, 0.0);
        assert_eq!(diffuse_factor(normal, Vector3::new(1.0, 0.0, 0.0)), 0.0);
        assert_eq!(diffuse_factor(normal, Vector3::new(0.0, -1.0, 0.0)), 0.0);
        assert_eq!(diffuse_factor(normal, Vector3::new(0.6, -0.8, 0.0)), 0.0);
        assert!(approx_eq(diffuse_factor(normal, Vector3::new(0.6, 0.8, 0.0)), 0.8));
    }

    #[test]
    fn miss_returns_opaque_black() {
        let ray = Ray::new(Vector3::new(0.0, 0.0, 50.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(Shader::default().trace(&ray, &lit_scene()), BACKGROUND);
        assert_eq!(BACKGROUND.a, 255.0);
    }

    #[test]
    fn unshadowed_front_hit_is_fully_lit() {
        let scene = lit_scene();
        let colour = Shader::default().shade_hit(&front_hit(), Colour::WHITE, &scene);
        assert_eq!(colour, Colour::WHITE);
    }

    #[test]
    fn blocked_light_contributes_nothing() {
        let mut scene = lit_scene();
        scene
            .objects
            .push(Object::sphere(Vector3::new(0.0, 0.0, 30.0), 2.0, Colour::WHITE));

        let shader = Shader::default();
        let hit = front_hit();
        assert!(shader.in_shadow(hit.point, hit.normal, &scene.lights[0], &scene));
        let colour = shader.light_contribution(&hit, Colour::WHITE, &scene.lights[0], &scene);
        assert_eq!(colour.to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn surface_does_not_shadow_itself() {
        let scene = lit_scene();
        let shader = Shader::default();
        let hit = front_hit();
        assert!(!shader.in_shadow(hit.point, hit.normal, &scene.lights[0], &scene));
    }

    #[test]
    fn light_behind_surface_adds_nothing() {
        let scene = Scene::new(
            vec![Object::sphere(Vector3::ZERO, 10.0, Colour::WHITE)],
            vec![Light::new(Vector3::new(0.0, 0.0, -100.0), Colour::WHITE, 1.0)],
        );
        let colour = Shader::default().shade_hit(&front_hit(), Colour::WHITE, &scene);
        assert_eq!(colour.to_rgba8(), [0, 0, 0, 255]);
    }

    #[test]
    fn brightness_and_light_colour_scale_contribution() {
        let mut scene = lit_scene();
        scene.lights[0].colour = Colour::rgb(255.0, 0.0, 127.5);
        scene.lights[0].brightness = 0.5;

        let colour = Shader::default().shade_hit(&front_hit(), Colour::WHITE, &scene);
        assert!(approx_eq(colour.r, 127.5));
        assert!(approx_eq(colour.g, 0.0));
        assert!(approx_eq(colour.b, 63.75));
    }

    #[test]
    fn lights_accumulate_without_clamping() {
        let mut scene = lit_scene();
        scene.lights.push(scene.lights[0]);

        let colour = Shader::default().shade_hit(&front_hit(), Colour::WHITE, &scene);
        assert!(approx_eq(colour.r, 510.0));
        assert_eq!(colour.to_rgba8(), [255, 255, 255, 255]);
    }

    #[test]
    fn occluder_in_front_hides_main_sphere_from_light() {
        let scene = Scene::new(
            vec![
                Object::sphere(Vector3::ZERO, 10.0, Colour::RED),
                Object::sphere(Vector3::new(0.0, 0.0, 30.0), 2.0, Colour::GREEN),
            ],
            vec![Light::new(Vector3::new(0.0, 0.0, 100.0), Colour::WHITE, 1.0)],
        );
        let ray = Ray::new(Vector3::new(0.0, 0.0, 50.0), Vector3::new(0.0, 0.0, -1.0));

        let additive = Shader::new(Compositing::Additive, 1e-3).trace(&ray, &scene);
        // Main sphere is shadowed by the small one; only green is seen.
        assert_eq!(additive.to_rgba8(), [0, 255, 0, 255]);

        let nearest = Shader::new(Compositing::Nearest, 1e-3).trace(&ray, &scene);
        assert_eq!(nearest.to_rgba8(), [0, 255, 0, 255]);
    }

    #[test]
    fn additive_and_nearest_differ_for_stacked_lit_spheres() {
        let scene = Scene::new(
            vec![
                Object::sphere(Vector3::ZERO, 10.0, Colour::RED),
                Object::sphere(Vector3::new(0.0, 0.0, 30.0), 2.0, Colour::GREEN),
            ],
            vec![
                Light::new(Vector3::new(0.0, 0.0, 100.0), Colour::WHITE, 1.0),
                Light::new(Vector3::new(0.0, 40.0, 12.0), Colour::WHITE, 1.0),
            ],
        );
        let ray = Ray::new(Vector3::new(0.0, 0.0, 50.0), Vector3::new(0.0, 0.0, -1.0));

        let additive = Shader::new(Compositing::Additive, 1e-3).trace(&ray, &scene);
        let nearest = Shader::new(Compositing::Nearest, 1e-3).trace(&ray, &scene);
        assert!(additive.r > 0.0);
        assert_eq!(nearest.r, 0.0);
        assert!(nearest.g > 0.0);
    }
}
