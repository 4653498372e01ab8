use crate::error::{QuadricError, Result};
use crate::geometry::Ray;
use crate::math::{Matrix4, Point3, Quadratic, Vector3};
use crate::operations::query::{Intersection, NormalAtPoint, RayQuadricIntersect};

use super::ImplicitSurface;

/// A general second-degree surface
///
/// `F(x, y, z) = A x^2 + B y^2 + C z^2 + D xy + E xz + F yz + G x + H y + I z + J = 0`.
///
/// Coefficients are fixed at construction. At least one of the quadratic
/// coefficients `A..F` is non-zero; an all-zero quadratic part describes a
/// plane and is rejected.
///
/// Normals follow the gradient, i.e. they point towards increasing `F`. For
/// the shapes built by the named constructors `F` is negative inside, so the
/// normal points outward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadric {
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    e: f64,
    f: f64,
    g: f64,
    h: f64,
    i: f64,
    j: f64,
}

/// The quadratic in `t` obtained by substituting a ray into a quadric.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayPolynomial {
    /// Coefficient of `t^2`.
    pub a: f64,
    /// Coefficient of `t`.
    pub b: f64,
    /// Constant term, `F(origin)`.
    pub c: f64,
    /// Sum of the magnitudes of the terms forming `a`.
    pub a_scale: f64,
    /// Sum of the magnitudes of the terms forming `c`.
    pub c_scale: f64,
    /// Ray parameter per unit of the polynomial's variable: a root `s`
    /// corresponds to `t = s * t_scale`.
    pub t_scale: f64,
}

impl From<RayPolynomial> for Quadratic {
    fn from(p: RayPolynomial) -> Self {
        Quadratic::with_scales(p.a, p.b, p.c, p.a_scale, p.c_scale)
    }
}

/// Degree of the monomial each coefficient multiplies.
const DEGREES: [i32; 10] = [2, 2, 2, 2, 2, 2, 1, 1, 1, 0];

impl Quadric {
    /// Creates a quadric from its ten coefficients.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidSurface`] if any coefficient is NaN or
    /// infinite, or if `A = B = C = D = E = F = 0`.
    #[allow(clippy::too_many_arguments, clippy::many_single_char_names)]
    pub fn new(
        a: f64,
        b: f64,
        c: f64,
        d: f64,
        e: f64,
        f: f64,
        g: f64,
        h: f64,
        i: f64,
        j: f64,
    ) -> Result<Self> {
        Self::from_coefficients([a, b, c, d, e, f, g, h, i, j])
    }

    /// Creates a quadric from `[A, B, C, D, E, F, G, H, I, J]`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Quadric::new`].
    #[allow(clippy::float_cmp, clippy::many_single_char_names)]
    pub fn from_coefficients(coefficients: [f64; 10]) -> Result<Self> {
        if let Some(pos) = coefficients.iter().position(|v| !v.is_finite()) {
            tracing::debug!(?coefficients, "rejected quadric with non-finite coefficient");
            return Err(QuadricError::InvalidSurface(format!(
                "coefficient {} is {}",
                COEFFICIENT_NAMES[pos], coefficients[pos]
            )));
        }
        if coefficients[..6].iter().all(|v| *v == 0.0) {
            tracing::debug!(?coefficients, "rejected planar quadric");
            return Err(QuadricError::InvalidSurface(
                "quadratic coefficients A..F are all zero (the surface is a plane)".into(),
            ));
        }

        Ok(Self::from_array(coefficients))
    }

    #[allow(clippy::many_single_char_names)]
    fn from_array(coefficients: [f64; 10]) -> Self {
        let [a, b, c, d, e, f, g, h, i, j] = coefficients;
        Self {
            a,
            b,
            c,
            d,
            e,
            f,
            g,
            h,
            i,
            j,
        }
    }

    /// Creates a quadric from a 4x4 matrix `Q` with `F(p) = [p 1] Q [p 1]^T`.
    ///
    /// `Q` need not be symmetric; only `Q + Q^T` matters.
    ///
    /// # Errors
    ///
    /// Same conditions as [`Quadric::new`].
    pub fn from_matrix(q: &Matrix4) -> Result<Self> {
        Self::from_coefficients([
            q[(0, 0)],
            q[(1, 1)],
            q[(2, 2)],
            q[(0, 1)] + q[(1, 0)],
            q[(0, 2)] + q[(2, 0)],
            q[(1, 2)] + q[(2, 1)],
            q[(0, 3)] + q[(3, 0)],
            q[(1, 3)] + q[(3, 1)],
            q[(2, 3)] + q[(3, 2)],
            q[(3, 3)],
        ])
    }

    /// Returns `[A, B, C, D, E, F, G, H, I, J]`.
    #[must_use]
    pub fn coefficients(&self) -> [f64; 10] {
        [
            self.a, self.b, self.c, self.d, self.e, self.f, self.g, self.h, self.i, self.j,
        ]
    }

    /// Symmetric 4x4 matrix form of the quadric.
    #[must_use]
    pub fn matrix(&self) -> Matrix4 {
        Matrix4::new(
            self.a,
            0.5 * self.d,
            0.5 * self.e,
            0.5 * self.g,
            0.5 * self.d,
            self.b,
            0.5 * self.f,
            0.5 * self.h,
            0.5 * self.e,
            0.5 * self.f,
            self.c,
            0.5 * self.i,
            0.5 * self.g,
            0.5 * self.h,
            0.5 * self.i,
            self.j,
        )
    }

    /// Substitutes `origin + t * direction` into the quadric.
    ///
    /// The coefficients are formed directly in the ray's units, so they can
    /// overflow for far-away origins or large coefficients; intersection goes
    /// through [`Quadric::normalized_ray_polynomial`] instead.
    #[must_use]
    pub fn ray_polynomial(&self, ray: &Ray) -> RayPolynomial {
        self.polynomial_along(ray.origin(), ray.direction(), 1.0)
    }

    /// Substitutes the ray into the quadric after rescaling by powers of two.
    ///
    /// Space is measured in units of the origin's largest coordinate, the
    /// direction is scaled to a largest component near one, and the
    /// coefficients are divided by their largest scaled term. Every term of
    /// the result is then at most of order one and finite for any valid ray
    /// and surface. Power-of-two scaling is exact, so nothing is lost for
    /// rays that would not have overflowed.
    #[must_use]
    pub fn normalized_ray_polynomial(&self, ray: &Ray) -> RayPolynomial {
        let o = ray.origin();
        let d = ray.direction();
        let m = binary_exponent(o.coords.amax());
        let n = binary_exponent(d.amax());

        let coefficients = self.coefficients();
        let k = coefficients
            .iter()
            .zip(DEGREES)
            .filter(|(v, _)| v.abs() > 0.0)
            .map(|(v, degree)| binary_exponent(v.abs()) + degree * m)
            .max()
            .unwrap_or(0);
        let unit = Self::from_array(std::array::from_fn(|idx| {
            scale_by_power_of_two(coefficients[idx], DEGREES[idx] * m - k)
        }));

        let origin = o.map(|v| scale_by_power_of_two(v, -m));
        let direction = d.map(|v| scale_by_power_of_two(v, -n));
        unit.polynomial_along(&origin, &direction, scale_by_power_of_two(1.0, m - n))
    }

    fn polynomial_along(&self, o: &Point3, d: &Vector3, t_scale: f64) -> RayPolynomial {
        let (dxx, dyy, dzz) = (d.x * d.x, d.y * d.y, d.z * d.z);
        let (dxy, dxz, dyz) = (d.x * d.y, d.x * d.z, d.y * d.z);

        let a = self.a * dxx
            + self.b * dyy
            + self.c * dzz
            + self.d * dxy
            + self.e * dxz
            + self.f * dyz;

        let b = 2.0 * (self.a * d.x * o.x + self.b * d.y * o.y + self.c * d.z * o.z)
            + self.d * (d.x * o.y + d.y * o.x)
            + self.e * (d.x * o.z + d.z * o.x)
            + self.f * (d.y * o.z + d.z * o.y)
            + self.g * d.x
            + self.h * d.y
            + self.i * d.z;

        let c = self.evaluate(o);

        let a_scale = self.a.abs() * dxx
            + self.b.abs() * dyy
            + self.c.abs() * dzz
            + (self.d * dxy).abs()
            + (self.e * dxz).abs()
            + (self.f * dyz).abs();

        let c_scale = self.a.abs() * o.x * o.x
            + self.b.abs() * o.y * o.y
            + self.c.abs() * o.z * o.z
            + (self.d * o.x * o.y).abs()
            + (self.e * o.x * o.z).abs()
            + (self.f * o.y * o.z).abs()
            + (self.g * o.x).abs()
            + (self.h * o.y).abs()
            + (self.i * o.z).abs()
            + self.j.abs();

        RayPolynomial {
            a,
            b,
            c,
            a_scale,
            c_scale,
            t_scale,
        }
    }

    /// Intersects `ray` with the surface using the default tolerance.
    #[must_use]
    pub fn intersect(&self, ray: &Ray) -> Intersection {
        RayQuadricIntersect::new(*ray).with_quadric(self)
    }

    /// Unit normal at `point`, pointing towards increasing `F`.
    ///
    /// `point` need not lie exactly on the surface.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::DegenerateNormal`] at singular points such as
    /// the apex of a cone.
    pub fn normal_at(&self, point: &Point3) -> Result<Vector3> {
        NormalAtPoint::new(*point).execute(self)
    }

    /// Image of the surface under the invertible transform `m`.
    ///
    /// A point `p` lies on the result exactly when `m^-1 p` lies on `self`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::SingularTransform`] if `m` cannot be inverted,
    /// or [`QuadricError::InvalidSurface`] if the result overflows.
    pub fn transformed(&self, m: &Matrix4) -> Result<Self> {
        let inverse = m.try_inverse().ok_or(QuadricError::SingularTransform)?;
        self.transformed_by_inverse(&inverse)
    }

    /// The surface moved by `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`QuadricError::InvalidSurface`] if the result overflows.
    pub fn translated(&self, offset: &Vector3) -> Result<Self> {
        self.transformed_by_inverse(&Matrix4::new_translation(&-offset))
    }

    fn transformed_by_inverse(&self, inverse: &Matrix4) -> Result<Self> {
        let q = inverse.transpose() * self.matrix() * inverse;
        Self::from_matrix(&q)
    }
}

impl ImplicitSurface for Quadric {
    fn evaluate(&self, p: &Point3) -> f64 {
        self.a * p.x * p.x
            + self.b * p.y * p.y
            + self.c * p.z * p.z
            + self.d * p.x * p.y
            + self.e * p.x * p.z
            + self.f * p.y * p.z
            + self.g * p.x
            + self.h * p.y
            + self.i * p.z
            + self.j
    }

    fn gradient(&self, p: &Point3) -> Vector3 {
        Vector3::new(
            2.0 * self.a * p.x + self.d * p.y + self.e * p.z + self.g,
            2.0 * self.b * p.y + self.d * p.x + self.f * p.z + self.h,
            2.0 * self.c * p.z + self.e * p.x + self.f * p.y + self.i,
        )
    }

    #[allow(clippy::many_single_char_names)]
    fn gradient_scale(&self, p: &Point3) -> f64 {
        let (x, y, z) = (p.x.abs(), p.y.abs(), p.z.abs());
        let (a, b, c) = (self.a.abs(), self.b.abs(), self.c.abs());
        let (d, e, f) = (self.d.abs(), self.e.abs(), self.f.abs());
        2.0 * (a * x + b * y + c * z)
            + d * (x + y)
            + e * (x + z)
            + f * (y + z)
            + self.g.abs()
            + self.h.abs()
            + self.i.abs()
    }
}

const COEFFICIENT_NAMES: [&str; 10] = ["A", "B", "C", "D", "E", "F", "G", "H", "I", "J"];

/// `floor(log2(|x|))`, or `0` for zero.
#[allow(clippy::cast_possible_truncation)]
fn binary_exponent(x: f64) -> i32 {
    if x.abs() > 0.0 && x.is_finite() {
        x.abs().log2().floor() as i32
    } else {
        0
    }
}

/// `x * 2^exponent`, stepping so the factor itself never overflows.
fn scale_by_power_of_two(mut x: f64, mut exponent: i32) -> f64 {
    const STEP: i32 = 1000;
    while exponent > STEP {
        x *= 2f64.powi(STEP);
        exponent -= STEP;
    }
    while exponent < -STEP {
        x *= 2f64.powi(-STEP);
        exponent += STEP;
    }
    x * 2f64.powi(exponent)
}
