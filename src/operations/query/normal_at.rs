use crate::error::{QuadricError, Result};
use crate::geometry::ImplicitSurface;
use crate::math::{Point3, Tolerance, Vector3};

/// Computes the unit normal of an implicit surface at a point.
///
/// The normal is the normalized gradient and points towards increasing `F`.
/// It is not flipped to face any particular ray; see [`face_forward`].
#[derive(Debug, Clone, Copy)]
pub struct NormalAtPoint {
    point: Point3,
    tolerance: Tolerance,
}

impl NormalAtPoint {
    /// Creates a new normal query with the default tolerance.
    #[must_use]
    pub fn new(point: Point3) -> Self {
        Self {
            point,
            tolerance: Tolerance::default(),
        }
    }

    /// Replaces the epsilon policy.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Executes the query.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::DegenerateNormal`] if the largest gradient
    /// component is zero, or negligible against the magnitude of the terms
    /// the gradient is summed from.
    pub fn execute<S: ImplicitSurface + ?Sized>(&self, surface: &S) -> Result<Vector3> {
        let p = &self.point;
        let gradient = surface.gradient(p);
        let scale = surface.gradient_scale(p);

        // Largest component first so the norm cannot overflow.
        let largest = gradient.amax();
        if !largest.is_finite() || largest <= self.tolerance.gradient() * scale {
            tracing::trace!(x = p.x, y = p.y, z = p.z, largest, scale, "degenerate normal");
            return Err(QuadricError::DegenerateNormal {
                x: p.x,
                y: p.y,
                z: p.z,
            });
        }

        Ok((gradient / largest).normalize())
    }
}

/// Orients `normal` against an incoming `direction`.
///
/// Returns the normal flipped, if needed, so that it opposes `direction`,
/// together with `true` when the ray arrives on the side the original normal
/// points to (the front face).
#[must_use]
pub fn face_forward(normal: &Vector3, direction: &Vector3) -> (Vector3, bool) {
    let front_face = normal.dot(direction) < 0.0;
    if front_face {
        (*normal, true)
    } else {
        (-normal, false)
    }
}
