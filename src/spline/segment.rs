use crate::math::aabb::Aabb;
use crate::math::distance_2d::distance;
use crate::math::Point2;

/// One straight piece of a flattened curve segment.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineLineSegment {
    pub start: Point2,
    pub end: Point2,
    pub aabb: Aabb,
    pub length: f64,
    /// Arc length from the start of the owning curve segment to `start`.
    pub length_start: f64,
}

impl SplineLineSegment {
    /// Creates a line segment, deriving its box and length from the endpoints.
    #[must_use]
    pub fn new(start: Point2, end: Point2, length_start: f64) -> Self {
        Self {
            start,
            end,
            aabb: Aabb::from_segment(&start, &end),
            length: distance(&start, &end),
            length_start,
        }
    }

    /// Point at `fraction` of this segment's length, measured from `start`.
    #[must_use]
    pub fn point_at_fraction(&self, fraction: f64) -> Point2 {
        self.start + (self.end - self.start) * fraction
    }
}

/// One parametric piece of a spline between two spans of control points.
#[derive(Debug, Clone, PartialEq)]
pub struct SplineCurveSegment {
    /// The control/tangent points fed to the basis: four for cubic variants,
    /// three for the quadratic one.
    pub control_points: Vec<Point2>,
    pub aabb: Aabb,
    pub length: f64,
    /// Total length of all curve segments before this one.
    pub length_start: f64,
    pub line_segments: Vec<SplineLineSegment>,
}

impl SplineCurveSegment {
    /// Builds a curve segment from its evaluated sample points.
    ///
    /// `samples` holds `resolution + 1` points evenly spaced in the curve
    /// parameter; consecutive samples become line segments.
    #[must_use]
    pub fn from_samples(
        control_points: Vec<Point2>,
        samples: &[Point2],
        length_start: f64,
    ) -> Self {
        let mut line_segments = Vec::with_capacity(samples.len().saturating_sub(1));
        let mut length = 0.0;
        for pair in samples.windows(2) {
            let line = SplineLineSegment::new(pair[0], pair[1], length);
            length += line.length;
            line_segments.push(line);
        }

        let aabb = line_segments
            .iter()
            .map(|line| line.aabb)
            .reduce(|acc, b| acc.union(&b))
            .or_else(|| samples.first().map(Aabb::from_point))
            .unwrap_or_else(|| Aabb::new(0.0, 0.0, 0.0, 0.0));

        Self {
            control_points,
            aabb,
            length,
            length_start,
            line_segments,
        }
    }

    /// Start point of the flattened segment.
    #[must_use]
    pub fn start_point(&self) -> Option<Point2> {
        self.line_segments.first().map(|line| line.start)
    }

    /// End point of the flattened segment.
    #[must_use]
    pub fn end_point(&self) -> Option<Point2> {
        self.line_segments.last().map(|line| line.end)
    }

    /// Locates the line segment holding `fraction` of this segment's length.
    ///
    /// Returns the line segment index and the fraction within that line
    /// segment. Zero-length curve segments map onto their first line segment.
    #[must_use]
    pub fn locate_length_fraction(&self, fraction: f64) -> Option<(usize, f64)> {
        let last = self.line_segments.len().checked_sub(1)?;
        let fraction = fraction.clamp(0.0, 1.0);
        if self.length <= 0.0 {
            return Some((0, fraction));
        }
        let target = fraction * self.length;
        let index = self
            .line_segments
            .iter()
            .position(|line| target <= line.length_start + line.length)
            .unwrap_or(last);
        let line = &self.line_segments[index];
        let within = if line.length > 0.0 {
            ((target - line.length_start) / line.length).clamp(0.0, 1.0)
        } else {
            0.0
        };
        Some((index, within))
    }

    /// Curve parameter `t` in `[0, 1]` of the point at `fraction` of the length.
    ///
    /// Samples are evenly spaced in `t`, so the parameter is interpolated
    /// linearly inside the located line segment.
    #[must_use]
    pub fn parameter_at_length_fraction(&self, fraction: f64) -> Option<f64> {
        let (index, within) = self.locate_length_fraction(fraction)?;
        #[allow(clippy::cast_precision_loss)]
        let count = self.line_segments.len() as f64;
        #[allow(clippy::cast_precision_loss)]
        let t = (index as f64 + within) / count;
        Some(t)
    }

    /// Point on the flattened segment at `fraction` of its length.
    #[must_use]
    pub fn point_at_length_fraction(&self, fraction: f64) -> Option<Point2> {
        let (index, within) = self.locate_length_fraction(fraction)?;
        Some(self.line_segments[index].point_at_fraction(within))
    }
}
