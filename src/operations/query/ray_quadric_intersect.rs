use crate::geometry::{BoundedQuadric, Quadric, Ray};
use crate::math::{Point3, Quadratic, QuadraticRoots, Tolerance};

/// A single accepted crossing of a ray with a surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    /// Ray parameter, inside the ray's `[t_min, t_max]`.
    pub t: f64,
    /// World-space point `origin + t * direction`.
    pub point: Point3,
}

/// Outcome of intersecting a ray with a quadric.
///
/// Every reported `t` is finite and lies within the ray's interval.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Intersection {
    /// No root in the ray's interval.
    Miss,
    /// The ray's line touches the surface at a single point.
    Tangent(Hit),
    /// One crossing: the line meets the surface only once (the quadratic
    /// term vanished), or one of two crossings fell outside the interval.
    Single(Hit),
    /// Two crossings, `hits[0].t <= hits[1].t`.
    TwoHits([Hit; 2]),
}

impl Intersection {
    /// All accepted hits in ascending `t`.
    #[must_use]
    pub fn hits(&self) -> &[Hit] {
        match self {
            Intersection::Miss => &[],
            Intersection::Tangent(hit) | Intersection::Single(hit) => std::slice::from_ref(hit),
            Intersection::TwoHits(hits) => hits,
        }
    }

    /// The hit closest to the start of the ray's interval.
    #[must_use]
    pub fn nearest(&self) -> Option<&Hit> {
        self.hits().first()
    }

    /// Whether nothing was hit.
    #[must_use]
    pub fn is_miss(&self) -> bool {
        matches!(self, Intersection::Miss)
    }

    /// Number of accepted hits.
    #[must_use]
    pub fn len(&self) -> usize {
        self.hits().len()
    }

    /// Same as [`Intersection::is_miss`].
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.is_miss()
    }

    fn from_roots(ray: &Ray, roots: QuadraticRoots) -> Self {
        let accept = |t: f64| (t.is_finite() && ray.contains(t)).then(|| hit_at(ray, t));
        match roots {
            QuadraticRoots::None => Intersection::Miss,
            QuadraticRoots::Linear(t) => accept(t).map_or(Intersection::Miss, Intersection::Single),
            QuadraticRoots::Double(t) => {
                accept(t).map_or(Intersection::Miss, Intersection::Tangent)
            }
            QuadraticRoots::Two(t0, t1) => match (accept(t0), accept(t1)) {
                (Some(near), Some(far)) => Intersection::TwoHits([near, far]),
                (Some(hit), None) | (None, Some(hit)) => Intersection::Single(hit),
                (None, None) => Intersection::Miss,
            },
        }
    }
}

#[allow(clippy::float_cmp)]
fn hit_at(ray: &Ray, t: f64) -> Hit {
    // -0.0 from c / q when the origin is on the surface
    let t = if t == 0.0 { 0.0 } else { t };
    Hit {
        t,
        point: ray.at(t),
    }
}

/// Computes the crossings of a ray with a quadric surface.
///
/// Substitutes the ray into the surface equation in power-of-two rescaled
/// units, solves the resulting quadratic with the cancellation-free formula
/// and keeps the roots inside the ray's interval. A root is reported only if
/// its `t` is a finite `f64`. Allocation-free; the query value can be reused for
/// any number of surfaces.
#[derive(Debug, Clone, Copy)]
pub struct RayQuadricIntersect {
    ray: Ray,
    tolerance: Tolerance,
}

impl RayQuadricIntersect {
    /// Creates a new intersection query with the default tolerance.
    #[must_use]
    pub fn new(ray: Ray) -> Self {
        Self {
            ray,
            tolerance: Tolerance::default(),
        }
    }

    /// Replaces the epsilon policy.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Tolerance) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The ray being cast.
    #[must_use]
    pub fn ray(&self) -> &Ray {
        &self.ray
    }

    /// Intersects the ray with an unbounded quadric.
    #[must_use]
    pub fn with_quadric(&self, quadric: &Quadric) -> Intersection {
        intersect_ray_quadric(&self.ray, quadric, &self.tolerance)
    }

    /// Intersects the ray with the part of a quadric inside its bounding box.
    ///
    /// The ray's interval is first narrowed to the stretch spent inside the
    /// box, so a crossing is reported exactly when its point is in the box.
    #[must_use]
    pub fn with_bounded_quadric(&self, bounded: &BoundedQuadric) -> Intersection {
        let Some((t_min, t_max)) = bounded.bounds().ray_interval(&self.ray) else {
            return Intersection::Miss;
        };
        match self.ray.clipped(t_min, t_max) {
            Ok(inside) => intersect_ray_quadric(&inside, bounded.quadric(), &self.tolerance),
            Err(_) => Intersection::Miss,
        }
    }
}

fn intersect_ray_quadric(ray: &Ray, quadric: &Quadric, tolerance: &Tolerance) -> Intersection {
    let polynomial = quadric.normalized_ray_polynomial(ray);
    let roots = Quadratic::from(polynomial)
        .roots(tolerance)
        .scaled(polynomial.t_scale);
    Intersection::from_roots(ray, roots)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::geometry::{Aabb, Axis, ImplicitSurface};
    use crate::math::Vector3;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn unit_sphere() -> Quadric {
        Quadric::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1.0).unwrap()
    }

    fn ray(origin: [f64; 3], direction: [f64; 3]) -> Ray {
        Ray::new(Point3::from(origin), Vector3::from(direction)).unwrap()
    }

    #[test]
    fn through_sphere_gives_two_hits() {
        let hits = unit_sphere().intersect(&ray([0.0, 0.0, -2.0], [0.0, 0.0, 1.0]));
        let Intersection::TwoHits([near, far]) = hits else {
            panic!("expected two hits, got {hits:?}");
        };
        assert_relative_eq!(near.t, 1.0);
        assert_relative_eq!(far.t, 3.0);
        assert_relative_eq!(near.point, Point3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(far.point, Point3::new(0.0, 0.0, 1.0));
    }

    #[test]
    fn passing_beside_sphere_misses() {
        let hits = unit_sphere().intersect(&ray([0.0, 0.0, -2.0], [1.0, 0.0, 0.0]));
        assert!(hits.is_miss());
        assert_eq!(hits.len(), 0);
        assert!(hits.nearest().is_none());
    }

    #[test]
    fn grazing_sphere_is_tangent() {
        let hits = unit_sphere().intersect(&ray([1.0, 0.0, -2.0], [0.0, 0.0, 1.0]));
        let Intersection::Tangent(hit) = hits else {
            panic!("expected tangent, got {hits:?}");
        };
        assert_relative_eq!(hit.t, 2.0);
        assert_relative_eq!(hit.point, Point3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn unnormalized_direction_scales_t() {
        let hits = unit_sphere().intersect(&ray([0.0, 0.0, -2.0], [0.0, 0.0, 4.0]));
        let ts: Vec<f64> = hits.hits().iter().map(|h| h.t).collect();
        assert_eq!(ts.len(), 2);
        assert_relative_eq!(ts[0], 0.25);
        assert_relative_eq!(ts[1], 0.75);
    }

    #[test]
    fn origin_inside_keeps_exit_only() {
        let hits = unit_sphere().intersect(&ray([0.0, 0.0, 0.0], [1.0, 0.0, 0.0]));
        let Intersection::Single(hit) = hits else {
            panic!("expected a single hit, got {hits:?}");
        };
        assert_relative_eq!(hit.t, 1.0);
    }

    #[test]
    fn origin_on_surface_pointing_out() {
        let hits = unit_sphere().intersect(&ray([0.0, 0.0, 1.0], [0.0, 0.0, 1.0]));
        let nearest = hits.nearest().unwrap();
        assert!(!nearest.t.is_nan());
        assert_abs_diff_eq!(nearest.t, 0.0);
        assert!(nearest.t.is_sign_positive());
    }

    #[test]
    fn origin_rounded_onto_surface_pointing_out() {
        // cos^2 + sin^2 rounds to 1 + 2^-52, so F(origin) is one ulp positive.
        let (sin, cos) = 0.08_f64.sin_cos();
        let p = [cos, sin, 0.0];
        let s = unit_sphere();
        assert!(s.evaluate(&Point3::from(p)) > 0.0);

        let hits = s.intersect(&ray(p, p));
        let Intersection::Single(hit) = hits else {
            panic!("expected the exit at the origin, got {hits:?}");
        };
        assert_abs_diff_eq!(hit.t, 0.0);
        assert!(hit.t.is_sign_positive());
    }

    #[test]
    fn origin_rounded_onto_surface_pointing_in() {
        let (sin, cos) = 0.08_f64.sin_cos();
        let hits = unit_sphere().intersect(&ray([cos, sin, 0.0], [-cos, -sin, 0.0]));
        let Intersection::TwoHits([near, far]) = hits else {
            panic!("expected entry at the origin and the far exit, got {hits:?}");
        };
        assert_abs_diff_eq!(near.t, 0.0);
        assert_relative_eq!(far.t, 2.0, max_relative = 1e-12);
    }

    #[test]
    fn far_origin_with_large_coefficients_still_hits() {
        // Sphere of radius 1e150; forming F(origin) directly overflows.
        let q = Quadric::new(1.0, 1.0, 1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, -1e300).unwrap();
        let hits = q.intersect(&ray([-1e155, 0.0, 0.0], [1.0, 0.0, 0.0]));
        let Intersection::TwoHits([near, far]) = hits else {
            panic!("expected two hits, got {hits:?}");
        };
        assert_relative_eq!(near.t, 1e155 - 1e150, max_relative = 1e-9);
        assert_relative_eq!(far.t, 1e155 + 1e150, max_relative = 1e-9);
        assert_relative_eq!(near.point.x, -1e150, max_relative = 1e-4);
    }

    #[test]
    fn tiny_direction_rescales_t() {
        let hits = unit_sphere().intersect(&ray([0.0, 0.0, -2.0], [0.0, 0.0, 1e-200]));
        let Intersection::TwoHits([near, far]) = hits else {
            panic!("expected two hits, got {hits:?}");
        };
        assert_relative_eq!(near.t, 1e200, max_relative = 1e-12);
        assert_relative_eq!(far.t, 3e200, max_relative = 1e-12);
    }

    #[test]
    fn micro_scale_sphere() {
        let r = 5e-11;
        let s = Quadric::sphere(Point3::origin(), r).unwrap();
        let hits = s.intersect(&ray([0.0, 0.0, -2.0 * r], [0.0, 0.0, 1.0]));
        let Intersection::TwoHits([near, far]) = hits else {
            panic!("expected two hits, got {hits:?}");
        };
        assert_relative_eq!(near.t, r, max_relative = 1e-12);
        assert_relative_eq!(far.t, 3.0 * r, max_relative = 1e-12);
    }

    #[test]
    fn interval_clips_roots() {
        let r = Ray::with_interval(Point3::new(0.0, 0.0, -2.0), Vector3::z(), 1.5, 2.5).unwrap();
        assert!(unit_sphere().intersect(&r).is_miss());

        let r = Ray::with_interval(Point3::new(0.0, 0.0, -2.0), Vector3::z(), 2.0, 10.0).unwrap();
        let Intersection::Single(hit) = unit_sphere().intersect(&r) else {
            panic!("expected the far hit only");
        };
        assert_relative_eq!(hit.t, 3.0);
    }

    #[test]
    fn ray_along_cylinder_axis_misses() {
        let cyl = Quadric::cylinder(Axis::Z, 1.0).unwrap();
        assert!(cyl.intersect(&ray([0.0, 0.0, -5.0], [0.0, 0.0, 1.0])).is_miss());
        // On the wall itself: a = b = 0 and c = 0, still a miss.
        assert!(cyl.intersect(&ray([1.0, 0.0, -5.0], [0.0, 0.0, 1.0])).is_miss());
    }

    #[test]
    fn ray_parallel_to_paraboloid_axis_hits_once() {
        let p = Quadric::paraboloid(Axis::Z, 1.0).unwrap();
        let hits = p.intersect(&ray([1.0, 0.0, -5.0], [0.0, 0.0, 1.0]));
        let Intersection::Single(hit) = hits else {
            panic!("expected a single hit, got {hits:?}");
        };
        assert_relative_eq!(hit.point, Point3::new(1.0, 0.0, 1.0), epsilon = 1e-12);
    }

    #[test]
    fn ray_parallel_to_cone_generator_hits_once() {
        let cone = Quadric::cone(Axis::Z, 1.0).unwrap();
        // Direction along a generator line, offset so the ray crosses the
        // other nappe exactly once.
        let hits = cone.intersect(&ray([-1.0, 0.0, 0.0], [1.0, 0.0, 1.0]));
        let Intersection::Single(hit) = hits else {
            panic!("expected a single hit, got {hits:?}");
        };
        assert_abs_diff_eq!(cone.evaluate(&hit.point), 0.0, epsilon = 1e-12);
    }

    #[test]
    fn through_cone_gives_two_hits() {
        let cone = Quadric::cone(Axis::Z, 1.0).unwrap();
        let hits = cone.intersect(&ray([-10.0, 0.0, 5.0], [1.0, 0.0, 0.0]));
        assert_eq!(hits.len(), 2);
        assert_relative_eq!(hits.hits()[0].point.x, -5.0, epsilon = 1e-12);
        assert_relative_eq!(hits.hits()[1].point.x, 5.0, epsilon = 1e-12);
    }

    #[test]
    fn hyperboloid_of_two_sheets_from_between() {
        let h = Quadric::hyperboloid_two_sheets(Vector3::new(1.0, 1.0, 1.0)).unwrap();
        let r = Ray::with_interval(
            Point3::origin(),
            Vector3::z(),
            f64::NEG_INFINITY,
            f64::INFINITY,
        )
        .unwrap();
        let Intersection::TwoHits([near, far]) = h.intersect(&r) else {
            panic!("expected both sheets");
        };
        assert_relative_eq!(near.t, -1.0);
        assert_relative_eq!(far.t, 1.0);
    }

    #[test]
    fn bounded_cylinder_drops_hits_outside_box() {
        let cyl = Quadric::cylinder(Axis::Y, 1.0).unwrap();
        let bounds =
            Aabb::new(Point3::new(-1.0, 0.0, -1.0), Point3::new(1.0, 2.0, 1.0)).unwrap();
        let bounded = BoundedQuadric::new(cyl, bounds);

        let hits = bounded.intersect(&ray([-5.0, 1.0, 0.0], [1.0, 0.0, 0.0]));
        assert_eq!(hits.len(), 2);

        let above = bounded.intersect(&ray([-5.0, 3.0, 0.0], [1.0, 0.0, 0.0]));
        assert!(above.is_miss());
        // The unbounded surface is still hit.
        assert_eq!(cyl.intersect(&ray([-5.0, 3.0, 0.0], [1.0, 0.0, 0.0])).len(), 2);
    }

    #[test]
    fn bounded_slanted_ray_keeps_only_the_inside_crossing() {
        let cyl = Quadric::cylinder(Axis::Y, 1.0).unwrap();
        let bounds =
            Aabb::new(Point3::new(-1.0, 0.0, -1.0), Point3::new(1.0, 2.0, 1.0)).unwrap();
        let bounded = BoundedQuadric::new(cyl, bounds);

        // Enters the wall at y = 1.5, would leave at y = 2.5 above the box.
        let hits = bounded.intersect(&ray([-2.0, 1.0, 0.0], [1.0, 0.5, 0.0]));
        let Intersection::Single(hit) = hits else {
            panic!("expected a single hit, got {hits:?}");
        };
        assert_relative_eq!(hit.point, Point3::new(-1.0, 1.5, 0.0), epsilon = 1e-9);
    }

    #[test]
    fn custom_tolerance_is_used() {
        // Discriminant of 4 against b^2 + |4ac| of about 8e12.
        let q = Quadric::sphere(Point3::origin(), 1.0).unwrap();
        let r = ray([-1e6, 0.0, 0.0], [1.0, 0.0, 0.0]);
        let query = RayQuadricIntersect::new(r);
        assert_eq!(query.with_quadric(&q).len(), 2);

        let coarse = query.with_tolerance(Tolerance::uniform(1e-6).unwrap());
        assert!(matches!(coarse.with_quadric(&q), Intersection::Tangent(_)));
    }
}
