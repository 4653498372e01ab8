use crate::error::{QuadricError, Result};
use crate::math::{Point3, Vector3};

use super::Quadric;

/// Coordinate axis used to orient the axis-aligned named constructors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Index of the axis (`X = 0`, `Y = 1`, `Z = 2`).
    #[must_use]
    pub fn index(self) -> usize {
        match self {
            Axis::X => 0,
            Axis::Y => 1,
            Axis::Z => 2,
        }
    }
}

/// Builds a quadric from per-axis squared-term weights, per-axis linear
/// weights and a constant. Cross terms are zero.
fn diagonal(square: [f64; 3], linear: [f64; 3], constant: f64) -> Result<Quadric> {
    Quadric::from_coefficients([
        square[0], square[1], square[2], 0.0, 0.0, 0.0, linear[0], linear[1], linear[2],
        constant,
    ])
}

fn positive(name: &str, value: f64) -> Result<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(QuadricError::InvalidSurface(format!(
            "{name} must be positive, got {value}"
        )))
    }
}

/// `value^2` for a positive `value` whose square is still a positive finite
/// number.
fn squared(name: &str, value: f64) -> Result<f64> {
    let square = positive(name, value)? * value;
    if square.is_finite() && square > 0.0 {
        Ok(square)
    } else {
        Err(QuadricError::InvalidSurface(format!(
            "{name} {value} cannot be squared in f64"
        )))
    }
}

/// Weight `1` on the two axes other than `axis`, `along` on `axis`.
fn across(axis: Axis, along: f64) -> [f64; 3] {
    let mut w = [1.0; 3];
    w[axis.index()] = along;
    w
}

impl Quadric {
    /// Sphere `|p - center|^2 - r^2 = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidSurface`] if the radius is not positive.
    pub fn sphere(center: Point3, radius: f64) -> Result<Self> {
        let r = positive("sphere radius", radius)?;
        Self::ellipsoid(center, Vector3::new(r, r, r))
    }

    /// Axis-aligned ellipsoid `sum(((p - center) / radii)^2) - 1 = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidSurface`] if any semi-axis is not
    /// positive.
    pub fn ellipsoid(center: Point3, radii: Vector3) -> Result<Self> {
        let mut square = [0.0; 3];
        let mut linear = [0.0; 3];
        let mut constant = -1.0;
        for k in 0..3 {
            let w = 1.0 / squared("ellipsoid semi-axis", radii[k])?;
            square[k] = w;
            linear[k] = -2.0 * w * center[k];
            constant += w * center[k] * center[k];
        }
        diagonal(square, linear, constant)
    }

    /// Infinite circular cylinder of the given radius around `axis`, through
    /// the origin.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidSurface`] if the radius is not positive.
    pub fn cylinder(axis: Axis, radius: f64) -> Result<Self> {
        let r2 = squared("cylinder radius", radius)?;
        diagonal(across(axis, 0.0), [0.0; 3], -r2)
    }

    /// Double cone with its apex at the origin, opening along `axis`.
    ///
    /// `slope` is the radius gained per unit along the axis, i.e. the tangent
    /// of the half-angle.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidSurface`] if the slope is not positive.
    pub fn cone(axis: Axis, slope: f64) -> Result<Self> {
        let k2 = squared("cone slope", slope)?;
        diagonal(across(axis, -k2), [0.0; 3], 0.0)
    }

    /// Circular paraboloid with its vertex at the origin, opening towards
    /// positive `axis`: `u^2 + v^2 - curvature * w = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidSurface`] if the curvature is not
    /// positive.
    pub fn paraboloid(axis: Axis, curvature: f64) -> Result<Self> {
        let k = positive("paraboloid curvature", curvature)?;
        let mut linear = [0.0; 3];
        linear[axis.index()] = -k;
        diagonal(across(axis, 0.0), linear, 0.0)
    }

    /// Hyperboloid of one sheet around the z axis:
    /// `(x/rx)^2 + (y/ry)^2 - (z/rz)^2 - 1 = 0`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidSurface`] if any radius is not positive.
    pub fn hyperboloid_one_sheet(radii: Vector3) -> Result<Self> {
        let [wx, wy, wz] = inverse_squares(&radii)?;
        diagonal([wx, wy, -wz], [0.0; 3], -1.0)
    }

    /// Hyperboloid of two sheets along the z axis:
    /// `-(x/rx)^2 - (y/ry)^2 + (z/rz)^2 - 1 = 0`.
    ///
    /// The sheets are at `|z| >= rz`; `F` is negative between them.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidSurface`] if any radius is not positive.
    pub fn hyperboloid_two_sheets(radii: Vector3) -> Result<Self> {
        let [wx, wy, wz] = inverse_squares(&radii)?;
        diagonal([-wx, -wy, wz], [0.0; 3], -1.0)
    }
}

fn inverse_squares(radii: &Vector3) -> Result<[f64; 3]> {
    let mut w = [0.0; 3];
    for (k, slot) in w.iter_mut().enumerate() {
        *slot = 1.0 / squared("hyperboloid radius", radii[k])?;
    }
    Ok(w)
}
