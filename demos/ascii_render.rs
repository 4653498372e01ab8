//! Renders a handful of quadrics to the terminal as ASCII shading.
//!
//! Usage:
//! ```text
//! cargo run --example ascii_render
//! RUST_LOG=quadric=trace cargo run --example ascii_render
//! ```
//!
//! Rows are traced in parallel; each pixel casts one ray against every
//! surface and shades the nearest hit with a Lambert term.

use quadric::geometry::{Aabb, Axis, BoundedQuadric, Quadric, Ray};
use quadric::math::{Matrix4, Point3, Vector3};
use quadric::operations::query::{face_forward, Hit};
use quadric::Result;
use rayon::prelude::*;

const WIDTH: usize = 96;
const HEIGHT: usize = 40;
const RAMP: &[u8] = b" .:-=+*#%@";

enum Object {
    Unbounded(Quadric),
    Bounded(BoundedQuadric),
}

impl Object {
    fn nearest(&self, ray: &Ray) -> Option<(Hit, Result<Vector3>)> {
        match self {
            Object::Unbounded(q) => {
                let hit = *q.intersect(ray).nearest()?;
                Some((hit, q.normal_at(&hit.point)))
            }
            Object::Bounded(b) => {
                let hit = *b.intersect(ray).nearest()?;
                Some((hit, b.normal_at(&hit.point)))
            }
        }
    }
}

fn scene() -> Result<Vec<Object>> {
    let sphere = Quadric::sphere(Point3::new(-2.2, 0.0, 0.0), 1.0)?;
    let ellipsoid = Quadric::ellipsoid(Point3::new(0.0, 0.0, 0.0), Vector3::new(0.6, 1.2, 0.6))?;
    let tilted = Quadric::cylinder(Axis::Y, 0.5)?
        .transformed(&Matrix4::from_euler_angles(0.0, 0.0, 0.4))?
        .translated(&Vector3::new(2.2, 0.0, 0.0))?;
    let tilted_bounds = Aabb::new(Point3::new(1.2, -1.2, -1.0), Point3::new(3.2, 1.2, 1.0))?;
    let hyperboloid = Quadric::hyperboloid_one_sheet(Vector3::new(0.3, 0.3, 0.6))?
        .transformed(&Matrix4::from_euler_angles(-1.2, 0.0, 0.0))?
        .translated(&Vector3::new(0.0, -1.9, 0.5))?;
    let hyperboloid_bounds =
        Aabb::new(Point3::new(-1.0, -2.6, -0.5), Point3::new(1.0, -1.3, 1.5))?;

    Ok(vec![
        Object::Unbounded(sphere),
        Object::Unbounded(ellipsoid),
        Object::Bounded(BoundedQuadric::new(tilted, tilted_bounds)),
        Object::Bounded(BoundedQuadric::new(hyperboloid, hyperboloid_bounds)),
    ])
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn shade(objects: &[Object], light: &Vector3, px: usize, py: usize) -> Result<u8> {
    let u = (px as f64 + 0.5) / WIDTH as f64 * 2.0 - 1.0;
    let v = 1.0 - (py as f64 + 0.5) / HEIGHT as f64 * 2.0;
    // Terminal cells are about twice as tall as they are wide.
    let aspect = 2.0 * HEIGHT as f64 / WIDTH as f64;
    let target = Point3::new(u * 3.6, v * 3.6 * aspect, 0.0);
    let eye = Point3::new(0.0, 0.0, -8.0);
    let ray = Ray::new(eye, target - eye)?;

    let nearest = objects
        .iter()
        .filter_map(|o| o.nearest(&ray))
        .min_by(|a, b| a.0.t.total_cmp(&b.0.t));

    let Some((_, normal)) = nearest else {
        return Ok(RAMP[0]);
    };
    let Ok(normal) = normal else {
        // Singular point: shade it as fully lit.
        return Ok(RAMP[RAMP.len() - 1]);
    };
    let (normal, _) = face_forward(&normal, ray.direction());
    let lambert = normal.dot(light).max(0.0);
    let index = 1 + (lambert * (RAMP.len() - 2) as f64).round() as usize;
    Ok(RAMP[index.min(RAMP.len() - 1)])
}

fn main() -> Result<()> {
    // Default: WARN for everything, INFO for quadric.
    // Override with RUST_LOG env var (e.g. RUST_LOG=quadric=trace).
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing_subscriber::filter::LevelFilter::WARN.into())
        .add_directive("ascii_render=info".parse().unwrap_or_default())
        .add_directive("quadric=info".parse().unwrap_or_default());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let objects = scene()?;
    let light = Vector3::new(-0.5, 0.7, -0.6).normalize();

    let rows = (0..HEIGHT)
        .into_par_iter()
        .map(|py| {
            (0..WIDTH)
                .map(|px| shade(&objects, &light, px, py))
                .collect::<Result<Vec<u8>>>()
        })
        .collect::<Result<Vec<Vec<u8>>>>()?;

    let lit = rows.iter().flatten().filter(|&&c| c != RAMP[0]).count();
    tracing::info!(width = WIDTH, height = HEIGHT, lit, "rendered");

    for row in rows {
        println!("{}", String::from_utf8_lossy(&row));
    }
    Ok(())
}
