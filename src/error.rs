use thiserror::Error;

/// Error type for quadric construction and evaluation.
///
/// A ray missing a surface is not an error: it is reported as
/// [`Intersection::Miss`](crate::operations::query::Intersection::Miss).
#[derive(Debug, Error)]
pub enum QuadricError {
    #[error("invalid surface: {0}")]
    InvalidSurface(String),

    #[error("degenerate normal: gradient vanishes at ({x}, {y}, {z})")]
    DegenerateNormal { x: f64, y: f64, z: f64 },

    #[error("invalid ray: {0}")]
    InvalidRay(String),

    #[error("transform matrix is not invertible")]
    SingularTransform,

    #[error("invalid tolerance: {0}")]
    InvalidTolerance(String),
}

/// Convenience type alias for results using [`QuadricError`].
pub type Result<T> = std::result::Result<T, QuadricError>;
