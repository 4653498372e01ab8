mod normal_at;
mod ray_quadric_intersect;

pub use normal_at::{face_forward, NormalAtPoint};
pub use ray_quadric_intersect::{Hit, Intersection, RayQuadricIntersect};
