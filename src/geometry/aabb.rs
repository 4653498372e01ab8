use crate::error::{QuadricError, Result};
use crate::math::{Point3, TOLERANCE};

use super::Ray;

/// An axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    min: Point3,
    max: Point3,
}

impl Aabb {
    /// Creates a box from its minimum and maximum corners.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidSurface`] if a corner is not finite or
    /// `min` exceeds `max` on any axis.
    pub fn new(min: Point3, max: Point3) -> Result<Self> {
        if !min.iter().chain(max.iter()).all(|c| c.is_finite()) {
            return Err(QuadricError::InvalidSurface(
                "bounding box corners must be finite".into(),
            ));
        }
        if (0..3).any(|i| min[i] > max[i]) {
            return Err(QuadricError::InvalidSurface(
                "bounding box minimum exceeds maximum".into(),
            ));
        }
        Ok(Self { min, max })
    }

    /// Creates a box from any two opposite corners.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidSurface`] if a corner is not finite.
    pub fn from_corners(a: Point3, b: Point3) -> Result<Self> {
        Self::new(a.inf(&b), a.sup(&b))
    }

    /// Minimum corner.
    #[must_use]
    pub fn min(&self) -> &Point3 {
        &self.min
    }

    /// Maximum corner.
    #[must_use]
    pub fn max(&self) -> &Point3 {
        &self.max
    }

    /// Whether `point` lies inside the box, boundary included.
    #[must_use]
    pub fn contains(&self, point: &Point3) -> bool {
        (0..3).all(|i| {
            point[i] >= self.min[i] - TOLERANCE && point[i] <= self.max[i] + TOLERANCE
        })
    }

    /// Parameter interval over which `ray` is inside the box, intersected
    /// with the ray's own interval (slab method).
    ///
    /// Returns `None` if the ray never enters the box within its interval.
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn ray_interval(&self, ray: &Ray) -> Option<(f64, f64)> {
        let origin = ray.origin();
        let dir = ray.direction();
        let mut t_min = ray.t_min();
        let mut t_max = ray.t_max();

        for i in 0..3 {
            let lo = self.min[i] - TOLERANCE;
            let hi = self.max[i] + TOLERANCE;
            if dir[i] == 0.0 {
                // Parallel to this slab: either always inside it or never.
                if origin[i] < lo || origin[i] > hi {
                    return None;
                }
                continue;
            }
            let inv = 1.0 / dir[i];
            let t0 = (lo - origin[i]) * inv;
            let t1 = (hi - origin[i]) * inv;
            t_min = t_min.max(t0.min(t1));
            t_max = t_max.min(t0.max(t1));
        }

        (t_min <= t_max).then_some((t_min, t_max))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::math::Vector3;
    use approx::assert_relative_eq;

    fn unit_box() -> Aabb {
        Aabb::new(Point3::new(-1.0, -1.0, -1.0), Point3::new(1.0, 1.0, 1.0)).unwrap()
    }

    #[test]
    fn contains_boundary() {
        let b = unit_box();
        assert!(b.contains(&Point3::new(1.0, 0.0, -1.0)));
        assert!(!b.contains(&Point3::new(1.1, 0.0, 0.0)));
    }

    #[test]
    fn inverted_box_is_rejected() {
        let r = Aabb::new(Point3::new(1.0, 0.0, 0.0), Point3::new(0.0, 1.0, 1.0));
        assert!(r.is_err());
    }

    #[test]
    fn from_corners_sorts() {
        let b = Aabb::from_corners(Point3::new(1.0, -2.0, 3.0), Point3::new(-1.0, 2.0, 0.0))
            .unwrap();
        assert_eq!(*b.min(), Point3::new(-1.0, -2.0, 0.0));
        assert_eq!(*b.max(), Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn ray_through_box() {
        let ray = Ray::new(Point3::new(-5.0, 0.0, 0.0), Vector3::x()).unwrap();
        let (t0, t1) = unit_box().ray_interval(&ray).unwrap();
        assert_relative_eq!(t0, 4.0, epsilon = 1e-9);
        assert_relative_eq!(t1, 6.0, epsilon = 1e-9);
    }

    #[test]
    fn axis_parallel_ray_outside_slab_misses() {
        let ray = Ray::new(Point3::new(-5.0, 2.0, 0.0), Vector3::x()).unwrap();
        assert!(unit_box().ray_interval(&ray).is_none());
    }

    #[test]
    fn ray_starting_inside_is_clamped_to_its_interval() {
        let ray = Ray::new(Point3::origin(), Vector3::new(0.0, 0.0, -1.0)).unwrap();
        let (t0, t1) = unit_box().ray_interval(&ray).unwrap();
        assert_relative_eq!(t0, 0.0);
        assert_relative_eq!(t1, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn box_behind_ray_misses() {
        let ray = Ray::new(Point3::new(5.0, 0.0, 0.0), Vector3::x()).unwrap();
        assert!(unit_box().ray_interval(&ray).is_none());
    }
}
