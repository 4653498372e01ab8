//! Ray intersection and surface normals for general quadric surfaces.
//!
//! A [`Quadric`](geometry::Quadric) is the zero set of
//! `A x^2 + B y^2 + C z^2 + D xy + E xz + F yz + G x + H y + I z + J`.
//! Casting a [`Ray`](geometry::Ray) against it yields an
//! [`Intersection`](operations::query::Intersection); the surface normal at a
//! hit comes from the gradient of the polynomial.
//!
//! ```
//! use quadric::geometry::{Quadric, Ray};
//! use quadric::math::{Point3, Vector3};
//!
//! let sphere = Quadric::sphere(Point3::origin(), 1.0)?;
//! let ray = Ray::new(Point3::new(0.0, 0.0, -2.0), Vector3::z())?;
//! let hit = sphere.intersect(&ray);
//! let nearest = hit.nearest().map(|h| h.t);
//! assert_eq!(nearest, Some(1.0));
//! # Ok::<(), quadric::QuadricError>(())
//! ```

pub mod error;
pub mod geometry;
pub mod math;
pub mod operations;

pub use error::{QuadricError, Result};
