pub mod aabb;
pub mod ray;
pub mod surface;

pub use aabb::Aabb;
pub use ray::Ray;
pub use surface::{Axis, BoundedQuadric, ImplicitSurface, Quadric, RayPolynomial};
