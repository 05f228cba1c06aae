use crate::ray::Ray;
use crate::util::math::Vector3;

/// Pinhole camera looking down `-z` through a `[-1, 1]²` image plane.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub eye: Vector3,
    pub width: u32,
    pub height: u32,
}

impl Camera {
    pub fn new(eye: Vector3, width: u32, height: u32) -> Self {
        Self { eye, width, height }
    }

    /// Normalized device coordinates of the pixel at `(row, col)`.
    ///
    /// `x` grows to the right and `y` grows upward; the top-left pixel maps
    /// to `(-1, 1)`.
    pub fn ndc(&self, row: u32, col: u32) -> (f32, f32) {
        let x = (2.0 * col as f32 / self.width as f32) - 1.0;
        let y = 1.0 - (2.0 * row as f32 / self.height as f32);
        (x, y)
    }

    pub fn primary_ray(&self, row: u32, col: u32) -> Ray {
        let (x, y) = self.ndc(row, col);
        Ray::primary(self.eye, Vector3::new(x, y, -1.0))
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            eye: Vector3::new(0.0, 0.0, 50.0),
            width: 400,
            height: 400,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::math::approx_eq;

    #[test]
    fn corner_and_center_pixels_map_to_ndc() {
        let camera = Camera::default();
        assert_eq!(camera.ndc(0, 0), (-1.0, 1.0));
        assert_eq!(camera.ndc(200, 200), (0.0, 0.0));
        assert_eq!(camera.ndc(100, 300), (0.5, 0.5));
    }

    #[test]
    fn center_ray_looks_down_negative_z() {
        let camera = Camera::default();
        let ray = camera.primary_ray(200, 200);
        assert_eq!(ray.origin, Vector3::new(0.0, 0.0, 50.0));
        assert_eq!(ray.direction, Vector3::new(0.0, 0.0, -1.0));
    }

    #[test]
    fn primary_rays_are_unit_length() {
        let camera = Camera::new(Vector3::ZERO, 16, 9);
        for row in 0..camera.height {
            for col in 0..camera.width {
                assert!(approx_eq(camera.primary_ray(row, col).direction.length(), 1.0));
            }
        }
    }
}
