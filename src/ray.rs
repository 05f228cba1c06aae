//! Ray representation: `r(t) = origin + t * direction`.

use crate::util::math::{Normalize, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vector3,
    /// Not required to be unit length; the sphere solver accounts for it.
    pub direction: Vector3,
}

impl Ray {
    pub fn new(origin: Vector3, direction: Vector3) -> Self {
        Self { origin, direction }
    }

    /// Ray with its direction normalized, as cast from the camera.
    pub fn primary(origin: Vector3, direction: Vector3) -> Self {
        Self::new(origin, direction.normalized())
    }

    pub fn at(&self, t: f32) -> Vector3 {
        self.origin + t * self.direction
    }
}
