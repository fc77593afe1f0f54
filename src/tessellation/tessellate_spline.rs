use crate::math::Point2;
use crate::spline::{SplineCurveSegment, SplineKind};

use super::{Tessellation, TessellationParams};

/// Flattens a spline's control points into curve segments.
///
/// Each curve segment is sampled at `resolution + 1` evenly spaced parameter
/// values, so it holds exactly `resolution` line segments.
#[derive(Debug)]
pub struct TessellateSpline<'a> {
    kind: SplineKind,
    points: &'a [Point2],
    closed: bool,
    params: TessellationParams,
}

impl<'a> TessellateSpline<'a> {
    /// Creates a new `TessellateSpline` operation.
    #[must_use]
    pub fn new(
        kind: SplineKind,
        points: &'a [Point2],
        closed: bool,
        params: TessellationParams,
    ) -> Self {
        Self {
            kind,
            points,
            closed,
            params,
        }
    }

    /// Executes the tessellation.
    ///
    /// Fewer than two control points yield an empty tessellation.
    #[must_use]
    pub fn execute(&self) -> Tessellation {
        let count = self
            .kind
            .num_curve_segments(self.points.len(), self.closed);

        let mut segments = Vec::with_capacity(count);
        let mut length_start = 0.0;
        for index in 0..count {
            let segment = self.curve_segment(index, length_start);
            length_start += segment.length;
            segments.push(segment);
        }

        Tessellation::from_segments(segments)
    }

    fn curve_segment(&self, index: usize, length_start: f64) -> SplineCurveSegment {
        let span = self.kind.span_points(self.points, index, self.closed);
        let resolution = self.params.resolution();

        #[allow(clippy::cast_precision_loss)]
        let samples: Vec<Point2> = (0..=resolution)
            .map(|j| self.kind.eval_span(&span, j as f64 / resolution as f64))
            .collect();

        SplineCurveSegment::from_samples(span, &samples, length_start)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn params(resolution: usize) -> TessellationParams {
        TessellationParams::new(resolution).unwrap()
    }

    #[test]
    fn fewer_than_two_points_is_empty() {
        let one = [Point2::new(1.0, 1.0)];
        let t = TessellateSpline::new(SplineKind::CatmullRom, &one, true, params(5)).execute();
        assert!(t.curve_segments.is_empty());
        assert!(t.aabb.is_none());
        let t = TessellateSpline::new(SplineKind::CatmullRom, &[], false, params(5)).execute();
        assert!(t.curve_segments.is_empty());
    }

    #[test]
    fn each_curve_segment_has_resolution_lines() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(1.0, 2.0),
            Point2::new(3.0, 1.0),
            Point2::new(4.0, 4.0),
        ];
        for resolution in [1, 3, 17] {
            let t = TessellateSpline::new(SplineKind::CatmullRom, &pts, false, params(resolution))
                .execute();
            assert_eq!(t.curve_segments.len(), 3);
            for seg in &t.curve_segments {
                assert_eq!(seg.line_segments.len(), resolution);
            }
            assert_eq!(t.num_line_segments(), 3 * resolution);
        }
    }

    #[test]
    fn segments_chain_end_to_start() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(2.0, 2.0),
            Point2::new(4.0, 0.0),
        ];
        let t = TessellateSpline::new(SplineKind::CatmullRom, &pts, true, params(8)).execute();
        assert_eq!(t.curve_segments.len(), 3);
        for pair in t.curve_segments.windows(2) {
            let end = pair[0].end_point().unwrap();
            let start = pair[1].start_point().unwrap();
            assert_relative_eq!(end.x, start.x, epsilon = 1e-12);
            assert_relative_eq!(end.y, start.y, epsilon = 1e-12);
        }
        let last = t.curve_segments[2].end_point().unwrap();
        assert_relative_eq!(last.x, 0.0, epsilon = 1e-12);
        assert_relative_eq!(last.y, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn length_and_box_roll_up() {
        let pts = [
            Point2::new(0.0, 0.0),
            Point2::new(3.0, 0.0),
            Point2::new(3.0, 4.0),
        ];
        let t = TessellateSpline::new(SplineKind::Linear, &pts, false, params(4)).execute();
        assert_relative_eq!(t.length, 7.0, epsilon = 1e-12);
        assert_relative_eq!(t.curve_segments[1].length_start, 3.0, epsilon = 1e-12);
        let aabb = t.aabb.unwrap();
        assert_relative_eq!(aabb.min_x, 0.0);
        assert_relative_eq!(aabb.max_x, 3.0);
        assert_relative_eq!(aabb.max_y, 4.0);
        for seg in &t.curve_segments {
            assert!(aabb.contains(&seg.aabb));
            for line in &seg.line_segments {
                assert!(seg.aabb.contains(&line.aabb));
            }
        }
    }

    #[test]
    fn two_point_bezier_is_straight() {
        let pts = [Point2::new(0.0, 0.0), Point2::new(2.0, 2.0)];
        let t = TessellateSpline::new(SplineKind::CubicBezier, &pts, false, params(6)).execute();
        assert_eq!(t.curve_segments.len(), 1);
        for line in &t.curve_segments[0].line_segments {
            assert_relative_eq!(line.end.x, line.end.y, epsilon = 1e-12);
        }
        assert_relative_eq!(t.length, 8.0_f64.sqrt(), epsilon = 1e-12);
    }
}
