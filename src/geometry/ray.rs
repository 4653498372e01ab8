use crate::error::{QuadricError, Result};
use crate::math::{Point3, Vector3};

/// A ray `P(t) = origin + t * direction`, restricted to `t_min <= t <= t_max`.
///
/// The direction is kept as given (it is not normalized), so `t` is measured
/// in units of the direction's length. Either bound may be infinite.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    origin: Point3,
    direction: Vector3,
    t_min: f64,
    t_max: f64,
}

impl Ray {
    /// Creates a ray valid for `t` in `[0, +inf]`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidRay`] if the origin or direction is not
    /// finite, or the direction is zero.
    pub fn new(origin: Point3, direction: Vector3) -> Result<Self> {
        Self::with_interval(origin, direction, 0.0, f64::INFINITY)
    }

    /// Creates a ray valid for `t` in `[t_min, t_max]`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidRay`] if the origin or direction is not
    /// finite, the direction is zero, a bound is NaN, or `t_min > t_max`.
    pub fn with_interval(
        origin: Point3,
        direction: Vector3,
        t_min: f64,
        t_max: f64,
    ) -> Result<Self> {
        if !origin.iter().all(|c| c.is_finite()) {
            return Err(invalid("origin must be finite"));
        }
        if !direction.iter().all(|c| c.is_finite()) {
            return Err(invalid("direction must be finite"));
        }
        // amax, not the norm: tiny components would underflow when squared.
        if direction.amax() <= 0.0 {
            return Err(invalid("direction must be non-zero"));
        }
        if t_min.is_nan() || t_max.is_nan() {
            return Err(invalid("interval bounds must not be NaN"));
        }
        if t_min > t_max {
            return Err(invalid(&format!("t_min {t_min} exceeds t_max {t_max}")));
        }

        Ok(Self {
            origin,
            direction,
            t_min,
            t_max,
        })
    }

    /// Returns the origin.
    #[must_use]
    pub fn origin(&self) -> &Point3 {
        &self.origin
    }

    /// Returns the direction, as supplied at construction.
    #[must_use]
    pub fn direction(&self) -> &Vector3 {
        &self.direction
    }

    /// Lower bound of the valid parameter interval.
    #[must_use]
    pub fn t_min(&self) -> f64 {
        self.t_min
    }

    /// Upper bound of the valid parameter interval.
    #[must_use]
    pub fn t_max(&self) -> f64 {
        self.t_max
    }

    /// Whether `t` lies in `[t_min, t_max]`. NaN is never contained.
    #[inline]
    #[must_use]
    pub fn contains(&self, t: f64) -> bool {
        self.t_min <= t && t <= self.t_max
    }

    /// Evaluates the ray at parameter `t`.
    #[inline]
    #[must_use]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + self.direction * t
    }

    /// Returns the same line restricted to `[t_min, t_max]`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidRay`] if a bound is NaN or
    /// `t_min > t_max`.
    pub fn clipped(&self, t_min: f64, t_max: f64) -> Result<Self> {
        Self::with_interval(self.origin, self.direction, t_min, t_max)
    }
}

fn invalid(reason: &str) -> QuadricError {
    tracing::debug!(reason, "rejected ray");
    QuadricError::InvalidRay(reason.into())
}
