use thiserror::Error;

/// Top-level error type for the spline engine.
#[derive(Debug, Error)]
pub enum GeosplineError {
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    #[error(transparent)]
    ControlPoint(#[from] ControlPointError),

    #[error(transparent)]
    Tessellation(#[from] TessellationError),
}

/// Errors related to geometric computations.
#[derive(Debug, Error)]
pub enum GeometryError {
    #[error("parameter {parameter} = {value} is out of range [{min}, {max}]")]
    ParameterOutOfRange {
        parameter: &'static str,
        value: f64,
        min: f64,
        max: f64,
    },

    #[error("degenerate geometry: {0}")]
    Degenerate(String),
}

/// Errors raised by control-point mutators.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControlPointError {
    #[error("control point index {index} is out of range (spline has {len} control points)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Errors related to tessellation settings.
#[derive(Debug, Error)]
pub enum TessellationError {
    #[error("invalid tessellation parameters: {0}")]
    InvalidParameters(String),
}

/// Convenience type alias for results using [`GeosplineError`].
pub type Result<T> = std::result::Result<T, GeosplineError>;
