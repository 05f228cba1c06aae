//! Ray–object intersection.
//!
//! The sphere test solves `a·t² + b·t + c = 0` for the ray parameter `t`:
//!
//! ```text
//! a = d·d
//! b = 2 (oc·d)      with oc = origin - center
//! c = oc·oc - r²
//! ```
//!
//! and keeps the smallest root that is not behind the ray origin.

use crate::ray::Ray;
use crate::scene::{Shape, Sphere};
use crate::util::math::{Normalize, Vector3};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Ray parameter of the hit, always `>= 0`.
    pub t: f32,
    pub point: Vector3,
    /// Outward unit normal at `point`.
    pub normal: Vector3,
}

pub fn intersect_sphere(ray: &Ray, sphere: &Sphere) -> Option<Intersection> {
    let oc = ray.origin - sphere.center;

    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    // NaN comes from a degenerate radius or direction.
    if discriminant < 0.0 || discriminant.is_nan() {
        return None;
    }

    let sqrt_discriminant = discriminant.sqrt();
    let near = (-b - sqrt_discriminant) / (2.0 * a);
    let far = (-b + sqrt_discriminant) / (2.0 * a);

    let (near, far) = if near <= far { (near, far) } else { (far, near) };
    let t = if near >= 0.0 {
        near
    } else if far >= 0.0 {
        far
    } else {
        return None;
    };

    let point = ray.at(t);
    Some(Intersection {
        t,
        point,
        normal: (point - sphere.center).normalized(),
    })
}

impl Shape {
    pub fn intersect(&self, ray: &Ray) -> Option<Intersection> {
        match self {
            Shape::Sphere(sphere) => intersect_sphere(ray, sphere),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::math::approx_eq;

    fn assert_vec_eq(a: Vector3, b: Vector3) {
        assert!((a - b).length() <= 1e-3, "{a:?} != {b:?}");
    }

    #[test]
    fn ray_toward_sphere_hits_front_face() {
        let sphere = Sphere::new(Vector3::ZERO, 4.0);
        let ray = Ray::new(Vector3::new(0.0, 0.0, 20.0), Vector3::new(0.0, 0.0, -1.0));

        let hit = intersect_sphere(&ray, &sphere).unwrap();
        assert_vec_eq(hit.point, Vector3::new(0.0, 0.0, 4.0));
        assert_vec_eq(hit.normal, Vector3::new(0.0, 0.0, 1.0));
        assert!(approx_eq(hit.t, 16.0));
    }

    #[test]
    fn sphere_behind_origin_is_missed() {
        let sphere = Sphere::new(Vector3::ZERO, 4.0);
        let ray = Ray::new(Vector3::new(0.0, 0.0, 20.0), Vector3::new(0.0, 0.0, 1.0));
        assert_eq!(intersect_sphere(&ray, &sphere), None);
    }

    #[test]
    fn origin_inside_sphere_uses_far_root() {
        let sphere = Sphere::new(Vector3::ZERO, 4.0);
        let ray = Ray::new(Vector3::ZERO, Vector3::new(1.0, 0.0, 0.0));

        let hit = intersect_sphere(&ray, &sphere).unwrap();
        assert!(hit.t >= 0.0);
        assert_vec_eq(hit.point, Vector3::new(4.0, 0.0, 0.0));
    }

    #[test]
    fn tangent_ray_yields_single_point() {
        let sphere = Sphere::new(Vector3::ZERO, 1.0);
        let ray = Ray::new(Vector3::new(1.0, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));

        let hit = intersect_sphere(&ray, &sphere).unwrap();
        assert_vec_eq(hit.point, Vector3::new(1.0, 0.0, 0.0));
        assert_vec_eq(hit.normal, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn ray_passing_beside_sphere_misses() {
        let sphere = Sphere::new(Vector3::ZERO, 1.0);
        let ray = Ray::new(Vector3::new(1.5, 0.0, 10.0), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(intersect_sphere(&ray, &sphere), None);
    }

    #[test]
    fn unnormalized_direction_hits_same_point() {
        let sphere = Sphere::new(Vector3::ZERO, 4.0);
        let ray = Ray::new(Vector3::new(0.0, 0.0, 20.0), Vector3::new(0.0, 0.0, -8.0));

        let hit = intersect_sphere(&ray, &sphere).unwrap();
        assert_vec_eq(hit.point, Vector3::new(0.0, 0.0, 4.0));
        assert!(approx_eq(hit.t, 2.0));
    }

    #[test]
    fn normals_are_unit_and_outward() {
        let sphere = Sphere::new(Vector3::new(1.0, -2.0, 3.0), 2.5);
        let origin = Vector3::new(0.0, 0.0, 30.0);
        for (x, y) in [(0.0, 0.0), (0.05, -0.05), (-0.06, 0.04), (0.08, 0.06)] {
            let target = sphere.center + Vector3::new(x, y, 0.0) * 20.0;
            let ray = Ray::primary(origin, target - origin);
            let hit = intersect_sphere(&ray, &sphere).unwrap();

            assert!(approx_eq(hit.normal.length(), 1.0));
            assert!(hit.normal.dot(hit.point - sphere.center) > 0.0);
        }
    }

    #[test]
    fn shape_dispatch_matches_sphere_test() {
        let sphere = Sphere::new(Vector3::ZERO, 2.0);
        let ray = Ray::new(Vector3::new(0.0, 0.0, 5.0), Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(
            Shape::Sphere(sphere).intersect(&ray),
            intersect_sphere(&ray, &sphere)
        );
    }
}
