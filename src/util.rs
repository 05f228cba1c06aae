pub mod math {
    pub type Vector3 = glam::Vec3;

    /// Tolerance used when comparing floats produced by the tracer.
    pub const EPSILON: f32 = 1e-4;

    /// Normalization that never divides by zero.
    ///
    /// A zero-magnitude vector normalizes to the zero vector.
    pub trait Normalize {
        fn normalized(self) -> Self;
        fn normalize_in_place(&mut self);
    }

    impl Normalize for Vector3 {
        fn normalized(self) -> Self {
            let magnitude = self.length();
            if magnitude != 0.0 {
                self / magnitude
            } else {
                Vector3::ZERO
            }
        }

        fn normalize_in_place(&mut self) {
            *self = self.normalized();
        }
    }

    pub fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() <= EPSILON
    }

}
