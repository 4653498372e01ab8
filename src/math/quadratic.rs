use super::Tolerance;

/// Real roots of `a*t^2 + b*t + c = 0`, before any interval clipping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum QuadraticRoots {
    /// No real root, or the equation is degenerate (`a = b = 0`).
    None,
    /// The quadratic term vanished; the single root of `b*t + c = 0`.
    Linear(f64),
    /// Discriminant within epsilon of zero; one double root.
    Double(f64),
    /// Two distinct roots in ascending order.
    Two(f64, f64),
}

impl QuadraticRoots {
    /// Multiplies every root by `factor`, which must be positive. A zero root
    /// stays zero even if `factor` is infinite.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        let scale = |t: f64| if t.abs() > 0.0 { t * factor } else { t };
        match self {
            QuadraticRoots::None => QuadraticRoots::None,
            QuadraticRoots::Linear(t) => QuadraticRoots::Linear(scale(t)),
            QuadraticRoots::Double(t) => QuadraticRoots::Double(scale(t)),
            QuadraticRoots::Two(t0, t1) => QuadraticRoots::Two(scale(t0), scale(t1)),
        }
    }
}

/// A quadratic polynomial `a*t^2 + b*t + c` together with the magnitudes
/// `a` and `c` are judged against when deciding whether they vanish.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quadratic {
    /// Coefficient of `t^2`.
    pub a: f64,
    /// Coefficient of `t`.
    pub b: f64,
    /// Constant term.
    pub c: f64,
    leading_scale: f64,
    constant_scale: f64,
}

impl Quadratic {
    /// Creates a quadratic whose leading coefficient is compared against
    /// `max(|a|, |b|, |c|)`. The constant term is taken at face value and
    /// only counts as zero when it is exactly zero.
    #[must_use]
    pub fn new(a: f64, b: f64, c: f64) -> Self {
        Self {
            a,
            b,
            c,
            leading_scale: a.abs().max(b.abs()).max(c.abs()),
            constant_scale: 0.0,
        }
    }

    /// Creates a quadratic with explicit magnitudes for `a` and `c`,
    /// typically the sums of the magnitudes of the terms that were added
    /// together to produce each of them.
    #[must_use]
    pub fn with_scales(a: f64, b: f64, c: f64, leading_scale: f64, constant_scale: f64) -> Self {
        Self {
            a,
            b,
            c,
            leading_scale: leading_scale.abs(),
            constant_scale: constant_scale.abs(),
        }
    }

    /// Magnitude the leading coefficient is compared against.
    #[must_use]
    pub fn leading_scale(&self) -> f64 {
        self.leading_scale
    }

    /// Magnitude the constant term is compared against.
    #[must_use]
    pub fn constant_scale(&self) -> f64 {
        self.constant_scale
    }

    /// Evaluates the polynomial at `t`.
    #[must_use]
    pub fn evaluate(&self, t: f64) -> f64 {
        (self.a * t + self.b) * t + self.c
    }

    /// Solves the equation.
    ///
    /// Two distinct roots are computed with `q = -(b + sign(b) * sqrt(disc)) / 2`,
    /// `t0 = q / a`, `t1 = c / q`, which never subtracts nearly equal numbers.
    /// A constant term lost in rounding against its scale is snapped to zero,
    /// making one root exactly `0`. Non-finite coefficients or roots yield
    /// [`QuadraticRoots::None`].
    #[must_use]
    #[allow(clippy::float_cmp)]
    pub fn roots(&self, tolerance: &Tolerance) -> QuadraticRoots {
        let Self { a, b, mut c, .. } = *self;
        if !(a.is_finite() && b.is_finite() && c.is_finite()) {
            tracing::trace!(a, b, c, "non-finite quadratic coefficients");
            return QuadraticRoots::None;
        }

        if c != 0.0 && c.abs() <= tolerance.on_surface() * self.constant_scale {
            tracing::trace!(c, scale = self.constant_scale, "constant term snapped to zero");
            c = 0.0;
        }

        if a.abs() <= tolerance.leading() * self.leading_scale {
            tracing::trace!(a, scale = self.leading_scale, "quadratic term vanished");
            return linear_root(b, c);
        }

        let four_ac = 4.0 * a * c;
        let disc = b * b - four_ac;
        let disc_eps = tolerance.discriminant() * (b * b + four_ac.abs());
        if !disc.is_finite() || disc < -disc_eps {
            return QuadraticRoots::None;
        }
        if disc <= disc_eps {
            let t = -b / (2.0 * a);
            return if t.is_finite() {
                QuadraticRoots::Double(t)
            } else {
                QuadraticRoots::None
            };
        }

        let sqrt_disc = disc.sqrt();
        let q = -0.5 * (b + sqrt_disc.copysign(b));
        let (t0, t1) = if q.abs() < f64::MIN_POSITIVE {
            naive_roots(a, b, sqrt_disc)
        } else {
            (q / a, c / q)
        };

        match (t0.is_finite(), t1.is_finite()) {
            (true, true) => QuadraticRoots::Two(t0.min(t1), t0.max(t1)),
            // One root overflowed: the other is the only usable crossing.
            (true, false) => QuadraticRoots::Linear(t0),
            (false, true) => QuadraticRoots::Linear(t1),
            (false, false) => QuadraticRoots::None,
        }
    }
}

fn linear_root(b: f64, c: f64) -> QuadraticRoots {
    if b.abs() < f64::MIN_POSITIVE {
        return QuadraticRoots::None;
    }
    let t = -c / b;
    if t.is_finite() {
        QuadraticRoots::Linear(t)
    } else {
        QuadraticRoots::None
    }
}

fn naive_roots(a: f64, b: f64, sqrt_disc: f64) -> (f64, f64) {
    let denom = 2.0 * a;
    ((-b - sqrt_disc) / denom, (-b + sqrt_disc) / denom)
}
