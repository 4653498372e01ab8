use crate::error::Result;
use crate::geometry::{Aabb, Ray};
use crate::math::{Point3, Vector3};
use crate::operations::query::{Intersection, NormalAtPoint, RayQuadricIntersect};

use super::{ImplicitSurface, Quadric};

/// A quadric clipped to an axis-aligned box.
///
/// Cylinders, cones, paraboloids and hyperboloids are unbounded; the box gives
/// them a finite extent. Only crossings whose point lies in the box count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundedQuadric {
    quadric: Quadric,
    bounds: Aabb,
}

impl BoundedQuadric {
    /// Creates a bounded quadric.
    #[must_use]
    pub fn new(quadric: Quadric, bounds: Aabb) -> Self {
        Self { quadric, bounds }
    }

    /// The underlying surface.
    #[must_use]
    pub fn quadric(&self) -> &Quadric {
        &self.quadric
    }

    /// The clipping box.
    #[must_use]
    pub fn bounds(&self) -> &Aabb {
        &self.bounds
    }

    /// Intersects `ray` with the part of the surface inside the box, using the
    /// default tolerance.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        RayQuadricIntersect::new(*ray).with_bounded_quadric(self)
    }

    /// Unit normal of the underlying quadric at `point`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::DegenerateNormal`](crate::QuadricError::DegenerateNormal)
    /// where the gradient vanishes.
    pub fn normal_at(&self, point: &Point3) -> Result<Vector3> {
        NormalAtPoint::new(*point).execute(self)
    }
}

impl ImplicitSurface for BoundedQuadric {
    fn evaluate(&self, point: &Point3) -> f64 {
        self.quadric.evaluate(point)
    }

    fn gradient(&self, point: &Point3) -> Vector3 {
        self.quadric.gradient(point)
    }

    fn gradient_scale(&self, point: &Point3) -> f64 {
        self.quadric.gradient_scale(point)
    }
}
