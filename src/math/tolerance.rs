use crate::error::{QuadricError, Result};

/// Relative epsilon policy for intersection and normal queries.
///
/// Every threshold is multiplied by the magnitude of the operands it guards,
/// so classification does not depend on the units a scene is modelled in.
///
/// - `leading`: the quadratic term `a` is treated as zero when
///   `|a| <= leading * scale(a)`, turning the equation linear.
/// - `discriminant`: `b^2 - 4ac` is treated as zero (tangent) when its
///   magnitude is below `discriminant * (b^2 + |4ac|)`.
/// - `on_surface`: the ray origin is taken to lie on the surface when
///   `|F(origin)|` is below `on_surface` times the sum of the magnitudes of
///   the terms of `F(origin)`. One root is then exactly `t = 0`.
/// - `gradient`: the surface gradient is treated as zero when its largest
///   component is below `gradient` times the sum of the magnitudes of the
///   terms forming the gradient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tolerance {
    leading: f64,
    discriminant: f64,
    on_surface: f64,
    gradient: f64,
}

impl Tolerance {
    /// Default relative epsilon for the leading coefficient and gradient.
    pub const DEFAULT_EPSILON: f64 = 1e-12;

    /// Default relative epsilon for the discriminant. `b^2 - 4ac` loses about
    /// two ulps of `b^2 + |4ac|` to rounding, so this sits a few dozen ulps out.
    pub const DEFAULT_DISCRIMINANT_EPSILON: f64 = 1e-14;

    /// Default relative epsilon for an origin on the surface. `F(origin)` of
    /// a point rounded onto the surface is off by a few ulps of its terms.
    pub const DEFAULT_ON_SURFACE_EPSILON: f64 = 1e-14;

    /// Creates a tolerance policy.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidTolerance`] if any value is negative or
    /// not finite.
    pub fn new(leading: f64, discriminant: f64, on_surface: f64, gradient: f64) -> Result<Self> {
        for (name, value) in [
            ("leading", leading),
            ("discriminant", discriminant),
            ("on_surface", on_surface),
            ("gradient", gradient),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(QuadricError::InvalidTolerance(format!(
                    "{name} epsilon must be finite and non-negative, got {value}"
                )));
            }
        }
        Ok(Self {
            leading,
            discriminant,
            on_surface,
            gradient,
        })
    }

    /// Uses the same relative epsilon for every threshold.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidTolerance`] if `epsilon` is negative or
    /// not finite.
    pub fn uniform(epsilon: f64) -> Result<Self> {
        Self::new(epsilon, epsilon, epsilon, epsilon)
    }

    /// Relative epsilon for the quadratic coefficient.
    #[must_use]
    pub fn leading(&self) -> f64 {
        self.leading
    }

    /// Relative epsilon for the discriminant.
    #[must_use]
    pub fn discriminant(&self) -> f64 {
        self.discriminant
    }

    /// Relative epsilon for `F(origin)`.
    #[must_use]
    pub fn on_surface(&self) -> f64 {
        self.on_surface
    }

    /// Relative epsilon for the largest gradient component.
    #[must_use]
    pub fn gradient(&self) -> f64 {
        self.gradient
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self {
            leading: Self::DEFAULT_EPSILON,
            discriminant: Self::DEFAULT_DISCRIMINANT_EPSILON,
            on_surface: Self::DEFAULT_ON_SURFACE_EPSILON,
            gradient: Self::DEFAULT_EPSILON,
        }
    }
}
