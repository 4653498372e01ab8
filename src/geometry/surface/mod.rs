mod bounded;
mod quadric;
mod shapes;

pub use bounded::BoundedQuadric;
pub use quadric::{Quadric, RayPolynomial};
pub use shapes::Axis;

use crate::math::{Point3, Vector3};

/// A surface given implicitly as the zero set of `F(x, y, z)`.
pub trait ImplicitSurface {
    /// Evaluates `F` at `point`. Zero on the surface; the sign tells the sides
    /// apart.
    fn evaluate(&self, point: &Point3) -> f64;

    /// Gradient of `F` at `point`, pointing towards increasing `F`.
    fn gradient(&self, point: &Point3) -> Vector3;

    /// Sum of the magnitudes of the terms added together to form the gradient
    /// at `point`.
    ///
    /// A gradient whose norm is tiny relative to this scale is dominated by
    /// cancellation and carries no usable direction.
    fn gradient_scale(&self, point: &Point3) -> f64;
}
