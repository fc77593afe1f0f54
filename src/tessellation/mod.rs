mod tessellate_spline;

pub use tessellate_spline::TessellateSpline;

use crate::error::{Result, TessellationError};
use crate::math::aabb::Aabb;
use crate::spline::SplineCurveSegment;

/// Parameters controlling tessellation quality.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TessellationParams {
    resolution: usize,
}

impl TessellationParams {
    /// Creates tessellation parameters.
    ///
    /// `resolution` is the number of line segments per curve segment.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidParameters` if `resolution` is zero.
    pub fn new(resolution: usize) -> Result<Self> {
        if resolution == 0 {
            return Err(TessellationError::InvalidParameters(
                "resolution must be at least 1".to_owned(),
            )
            .into());
        }
        Ok(Self { resolution })
    }

    /// Returns the number of line segments per curve segment.
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.resolution
    }
}

impl Default for TessellationParams {
    fn default() -> Self {
        Self { resolution: 20 }
    }
}

/// Flattened geometry of a whole spline.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Tessellation {
    /// The ordered curve segments.
    pub curve_segments: Vec<SplineCurveSegment>,
    /// Union of all curve segment boxes; `None` when there are no segments.
    pub aabb: Option<Aabb>,
    /// Sum of all curve segment lengths.
    pub length: f64,
}

impl Tessellation {
    /// Rolls up the box and length of a list of curve segments.
    #[must_use]
    pub fn from_segments(curve_segments: Vec<SplineCurveSegment>) -> Self {
        let aabb = curve_segments
            .iter()
            .map(|seg| seg.aabb)
            .reduce(|acc, b| acc.union(&b));
        let length = curve_segments.iter().map(|seg| seg.length).sum();
        Self {
            curve_segments,
            aabb,
            length,
        }
    }

    /// Total number of line segments over all curve segments.
    #[must_use]
    pub fn num_line_segments(&self) -> usize {
        self.curve_segments
            .iter()
            .map(|seg| seg.line_segments.len())
            .sum()
    }
}
