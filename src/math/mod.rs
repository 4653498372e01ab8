pub mod quadratic;
pub mod tolerance;

pub use quadratic::{Quadratic, QuadraticRoots};
pub use tolerance::Tolerance;

/// 3D point type.
pub type Point3 = nalgebra::Point3<f64>;

/// 3D vector type.
pub type Vector3 = nalgebra::Vector3<f64>;

/// 4x4 transformation matrix.
pub type Matrix4 = nalgebra::Matrix4<f64>;

/// Absolute slack on the faces of an [`Aabb`](crate::geometry::Aabb).
/// Numerical classification inside the intersection path uses the relative
/// epsilons of [`Tolerance`] instead.
pub const TOLERANCE: f64 = 1e-10;
