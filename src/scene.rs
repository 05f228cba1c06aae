use crate::util::math::Vector3;

/// RGBA colour on a 0–255 scale per channel.
///
/// Channels are not range-checked. Accumulated values may leave 0–255 and are
/// only clamped by [`Colour::to_rgba8`] when handed to a display.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Colour {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Colour {
    pub const BLACK: Colour = Colour::rgb(0.0, 0.0, 0.0);
    pub const WHITE: Colour = Colour::rgb(255.0, 255.0, 255.0);
    pub const RED: Colour = Colour::rgb(255.0, 0.0, 0.0);
    pub const GREEN: Colour = Colour::rgb(0.0, 255.0, 0.0);
    pub const BLUE: Colour = Colour::rgb(0.0, 0.0, 255.0);
    pub const YELLOW: Colour = Colour::rgb(255.0, 255.0, 0.0);

    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Fully opaque colour.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self::new(r, g, b, 255.0)
    }

    /// Channel-wise product of two colours, renormalized to the 0–255 scale.
    /// Alpha is kept from `self`.
    pub fn modulate(self, other: Colour) -> Colour {
        Colour::new(
            self.r * other.r / 255.0,
            self.g * other.g / 255.0,
            self.b * other.b / 255.0,
            self.a,
        )
    }

    /// Scales the colour channels, leaving alpha untouched.
    pub fn scale(self, factor: f32) -> Colour {
        Colour::new(self.r * factor, self.g * factor, self.b * factor, self.a)
    }

    /// Adds the colour channels of `other`; alpha stays as is.
    pub fn accumulate(&mut self, other: Colour) {
        self.r += other.r;
        self.g += other.g;
        self.b += other.b;
    }

    /// Clamps every channel into 0..=255 for presentation.
    pub fn to_rgba8(self) -> [u8; 4] {
        let channel = |v: f32| v.clamp(0.0, 255.0) as u8;
        [channel(self.r), channel(self.g), channel(self.b), channel(self.a)]
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vector3,
    /// Expected to be positive. Not validated.
    pub radius: f32,
}

impl Sphere {
    pub fn new(center: Vector3, radius: f32) -> Self {
        Self { center, radius }
    }
}

impl Default for Sphere {
    fn default() -> Self {
        Self {
            center: Vector3::ZERO,
            radius: 0.5,
        }
    }
}

/// Geometry of an [`Object`], one variant per primitive kind.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    Sphere(Sphere),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Object {
    pub colour: Colour,
    pub shape: Shape,
}

impl Object {
    pub fn sphere(center: Vector3, radius: f32, colour: Colour) -> Self {
        Self {
            colour,
            shape: Shape::Sphere(Sphere::new(center, radius)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vector3,
    pub colour: Colour,
    pub brightness: f32,
}

impl Light {
    pub fn new(position: Vector3, colour: Colour, brightness: f32) -> Self {
        Self {
            position,
            colour,
            brightness,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct Scene {
    pub objects: Vec<Object>,
    pub lights: Vec<Light>,
}

impl Scene {
    pub fn new(objects: Vec<Object>, lights: Vec<Light>) -> Self {
        Self { objects, lights }
    }
}

/// The main sphere the light orbits around.
pub const MAIN_SPHERE: Sphere = Sphere {
    center: Vector3::ZERO,
    radius: 10.0,
};

/// Fixed spheres of the animated scene, main sphere first.
pub fn base_objects() -> Vec<Object> {
    vec![
        Object {
            colour: Colour::WHITE,
            shape: Shape::Sphere(MAIN_SPHERE),
        },
        Object::sphere(Vector3::new(0.0, 10.0, 30.0), 5.0, Colour::GREEN),
        Object::sphere(Vector3::new(-20.0, 20.0, 20.0), 7.0, Colour::BLUE),
        Object::sphere(Vector3::new(20.0, -20.0, 5.0), 8.0, Colour::RED),
        Object::sphere(Vector3::new(-20.0, -20.0, -5.0), 6.0, Colour::YELLOW),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn modulate_white_by_white_stays_white() {
        assert_eq!(Colour::WHITE.modulate(Colour::WHITE), Colour::WHITE);
        assert_eq!(Colour::RED.modulate(Colour::GREEN), Colour::BLACK);
    }

    #[test]
    fn accumulate_keeps_alpha() {
        let mut colour = Colour::BLACK;
        colour.accumulate(Colour::WHITE.scale(0.5));
        colour.accumulate(Colour::WHITE.scale(0.5));
        assert_eq!(colour, Colour::WHITE);
        assert_eq!(colour.a, 255.0);
    }

    #[test]
    fn to_rgba8_clamps_out_of_range_channels() {
        let colour = Colour::new(300.0, -20.0, 127.9, 255.0);
        assert_eq!(colour.to_rgba8(), [255, 0, 127, 255]);
    }

    #[test]
    fn base_scene_starts_with_main_sphere() {
        let objects = base_objects();
        assert_eq!(objects.len(), 5);
        assert_eq!(objects[0].shape, Shape::Sphere(MAIN_SPHERE));
        assert_eq!(objects[0].colour, Colour::WHITE);
    }
}
