use crate::math::distance_2d::{
    closest_point_on_segment, distance, distance_squared, point_to_segment_dist_squared,
};
use crate::math::polygon_2d::polygon_contains_point;
use crate::math::Point2;

use super::Spline;

/// Result of a closest control point query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestControlPoint {
    /// Index of the control point.
    pub index: usize,
    /// The control point itself.
    pub point: Point2,
    /// Distance from the query point to the control point.
    pub distance: f64,
}

/// Result of a closest point query against a polyline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestPoint {
    /// The closest point.
    pub point: Point2,
    /// Distance from the query point to [`ClosestPoint::point`].
    pub distance: f64,
}

/// Result of a closest point query against the curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClosestSplinePoint {
    /// The closest point on the flattened curve.
    pub point: Point2,
    /// Distance from the query point to [`ClosestSplinePoint::point`].
    pub distance: f64,
    /// Curve segment index plus the length fraction within that segment.
    pub u_value: f64,
}

impl Spline {
    /// Finds the control point nearest to `point`.
    ///
    /// Returns `None` when the spline has no control points. Ties go to the
    /// lowest index.
    #[must_use]
    pub fn closest_control_point(&self, point: &Point2) -> Option<ClosestControlPoint> {
        let (index, cp, dist_sq) = self
            .control_points
            .iter()
            .enumerate()
            .map(|(i, cp)| (i, *cp, distance_squared(point, cp)))
            .fold(None, |best: Option<(usize, Point2, f64)>, cand| match best {
                Some(b) if b.2 <= cand.2 => Some(b),
                _ => Some(cand),
            })?;
        Some(ClosestControlPoint {
            index,
            point: cp,
            distance: dist_sq.sqrt(),
        })
    }

    /// Like [`Spline::closest_control_point`], but `None` when the nearest
    /// control point is farther than `range`.
    #[must_use]
    pub fn closest_control_point_within_range(
        &self,
        point: &Point2,
        range: f64,
    ) -> Option<ClosestControlPoint> {
        self.closest_control_point(point)
            .filter(|closest| closest.distance <= range)
    }

    /// Finds the point on the flattened curve nearest to `point`.
    ///
    /// Returns `None` when there is no curve.
    #[must_use]
    pub fn closest_point(&self, point: &Point2) -> Option<ClosestSplinePoint> {
        let mut best: Option<(usize, usize, Point2, f64)> = None;
        for (i, segment) in self.curve_segments().iter().enumerate() {
            for (j, line) in segment.line_segments.iter().enumerate() {
                let proj = closest_point_on_segment(&line.start, &line.end, point);
                match best {
                    Some(b) if b.3 <= proj.distance_squared => {}
                    _ => best = Some((i, j, proj.point, proj.distance_squared)),
                }
            }
        }
        let (i, j, closest, dist_sq) = best?;

        let segment = &self.curve_segments()[i];
        let line = &segment.line_segments[j];
        let fraction = if segment.length > 0.0 {
            ((line.length_start + distance(&line.start, &closest)) / segment.length).min(1.0)
        } else {
            0.0
        };
        #[allow(clippy::cast_precision_loss)]
        let u_value = i as f64 + fraction;

        Some(ClosestSplinePoint {
            point: closest,
            distance: dist_sq.sqrt(),
            u_value,
        })
    }

    /// Finds the point on the control polygon nearest to `point`.
    ///
    /// The control polygon joins consecutive control points, plus the last to
    /// the first when closed. Returns `None` with fewer than two control points.
    #[must_use]
    pub fn closest_control_point_lines_point(&self, point: &Point2) -> Option<ClosestPoint> {
        let points = &self.control_points;
        if points.len() < 2 {
            return None;
        }
        let closing = self
            .closed
            .then(|| (points[points.len() - 1], points[0]));
        let best = points
            .windows(2)
            .map(|pair| (pair[0], pair[1]))
            .chain(closing)
            .map(|(a, b)| closest_point_on_segment(&a, &b, point))
            .fold(None, |best: Option<(Point2, f64)>, proj| match best {
                Some(b) if b.1 <= proj.distance_squared => Some(b),
                _ => Some((proj.point, proj.distance_squared)),
            })?;
        Some(ClosestPoint {
            point: best.0,
            distance: best.1.sqrt(),
        })
    }

    /// Whether `point` lies within `max_dist` of the flattened curve.
    ///
    /// Curve and line segments whose grown boxes miss the point are skipped
    /// before exact distances are computed.
    #[must_use]
    pub fn is_point_near_curve(&self, point: &Point2, max_dist: f64) -> bool {
        if max_dist.is_nan() || max_dist < 0.0 {
            return false;
        }
        let max_dist_sq = max_dist * max_dist;
        self.curve_segments()
            .iter()
            .filter(|segment| segment.aabb.grow(max_dist).contains_point(point))
            .flat_map(|segment| &segment.line_segments)
            .filter(|line| line.aabb.grow(max_dist).contains_point(point))
            .any(|line| point_to_segment_dist_squared(point, &line.start, &line.end) <= max_dist_sq)
    }

    /// Whether `point` lies inside the closed flattened curve.
    ///
    /// Open splines contain nothing and always return `false`.
    #[must_use]
    pub fn contains_point(&self, point: &Point2) -> bool {
        if !self.closed {
            return false;
        }
        match self.aabb() {
            Some(aabb) if aabb.contains_point(point) => {
                polygon_contains_point(&self.polyline_points(), point)
            }
            _ => false,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::spline::{SplineKind, SplineProps};
    use approx::assert_relative_eq;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point2> {
        coords.iter().map(|&(x, y)| Point2::new(x, y)).collect()
    }

    fn linear(coords: &[(f64, f64)], closed: bool) -> Spline {
        let mut spline = Spline::with_props(
            SplineKind::Linear,
            SplineProps {
                resolution: 4,
                closed,
            },
        )
        .unwrap();
        spline.add_control_points(&pts(coords));
        spline
    }

    // ── closest control point ──

    #[test]
    fn closest_control_point_picks_nearest() {
        let spline = linear(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], false);
        let closest = spline.closest_control_point(&Point2::new(9.0, 1.0)).unwrap();
        assert_eq!(closest.index, 1);
        assert_eq!(closest.point, Point2::new(10.0, 0.0));
        assert_relative_eq!(closest.distance, 2.0_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn closest_control_point_empty() {
        let spline = Spline::linear();
        assert!(spline.closest_control_point(&Point2::new(0.0, 0.0)).is_none());
        assert!(spline
            .closest_control_point_within_range(&Point2::new(0.0, 0.0), 100.0)
            .is_none());
    }

    #[test]
    fn closest_control_point_tie_prefers_first() {
        let spline = linear(&[(-1.0, 0.0), (1.0, 0.0)], false);
        let closest = spline.closest_control_point(&Point2::new(0.0, 0.0)).unwrap();
        assert_eq!(closest.index, 0);
    }

    #[test]
    fn closest_control_point_within_range() {
        let spline = linear(&[(0.0, 0.0), (10.0, 0.0), (10.0, 10.0)], false);
        let q = Point2::new(9.0, 1.0);
        assert!(spline.closest_control_point_within_range(&q, 1.0).is_none());
        let hit = spline.closest_control_point_within_range(&q, 1.5).unwrap();
        assert_eq!(hit.index, 1);
    }

    // ── closest point on curve ──

    #[test]
    fn closest_point_on_straight_curve() {
        let spline = linear(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)], false);
        let closest = spline.closest_point(&Point2::new(1.0, 2.0)).unwrap();
        assert_relative_eq!(closest.point.x, 1.0, epsilon = 1e-12);
        assert_relative_eq!(closest.point.y, 0.0, epsilon = 1e-12);
        assert_relative_eq!(closest.distance, 2.0, epsilon = 1e-12);
        assert_relative_eq!(closest.u_value, 0.25, epsilon = 1e-12);

        let closest = spline.closest_point(&Point2::new(6.0, 3.0)).unwrap();
        assert_relative_eq!(closest.point.x, 4.0, epsilon = 1e-12);
        assert_relative_eq!(closest.point.y, 3.0, epsilon = 1e-12);
        assert_relative_eq!(closest.u_value, 1.75, epsilon = 1e-12);
    }

    #[test]
    fn closest_point_u_value_drives_point_at() {
        let mut spline = Spline::catmull_rom();
        spline.add_control_points(&pts(&[(0.0, 0.0), (3.0, 2.0), (6.0, -1.0), (9.0, 1.0)]));
        let closest = spline.closest_point(&Point2::new(4.0, 3.0)).unwrap();
        let p = spline.point_at(closest.u_value).unwrap();
        assert_relative_eq!(p.x, closest.point.x, epsilon = 1e-9);
        assert_relative_eq!(p.y, closest.point.y, epsilon = 1e-9);
    }

    #[test]
    fn closest_point_without_curve() {
        let mut spline = Spline::catmull_rom();
        assert!(spline.closest_point(&Point2::new(0.0, 0.0)).is_none());
        spline.add_control_point(Point2::new(1.0, 1.0));
        assert!(spline.closest_point(&Point2::new(0.0, 0.0)).is_none());
    }

    #[test]
    fn closest_point_with_duplicate_control_points() {
        let spline = linear(&[(1.0, 1.0), (1.0, 1.0)], false);
        let closest = spline.closest_point(&Point2::new(4.0, 5.0)).unwrap();
        assert_eq!(closest.point, Point2::new(1.0, 1.0));
        assert_relative_eq!(closest.distance, 5.0, epsilon = 1e-12);
        assert!(!closest.u_value.is_nan());
    }

    // ── control polygon ──

    #[test]
    fn control_lines_point_open_and_closed() {
        let mut spline = linear(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0)], false);
        // Nearest to the missing closing edge (4,4)→(0,0) when open.
        let q = Point2::new(1.0, 2.0);
        let open = spline.closest_control_point_lines_point(&q).unwrap();
        assert_relative_eq!(open.distance, 2.0, epsilon = 1e-12);

        spline.set_closed(true);
        let closed = spline.closest_control_point_lines_point(&q).unwrap();
        assert_relative_eq!(closed.point.x, 1.5, epsilon = 1e-12);
        assert_relative_eq!(closed.point.y, 1.5, epsilon = 1e-12);
        assert_relative_eq!(closed.distance, 0.5_f64.sqrt(), epsilon = 1e-12);
    }

    #[test]
    fn control_lines_point_needs_two_points() {
        let spline = linear(&[(0.0, 0.0)], true);
        assert!(spline
            .closest_control_point_lines_point(&Point2::new(1.0, 1.0))
            .is_none());
    }

    // ── proximity ──

    #[test]
    fn point_near_curve() {
        let spline = linear(&[(0.0, 0.0), (10.0, 0.0)], false);
        assert!(spline.is_point_near_curve(&Point2::new(5.0, 2.0), 2.0));
        assert!(spline.is_point_near_curve(&Point2::new(5.0, 2.0), 6.0));
        assert!(!spline.is_point_near_curve(&Point2::new(5.0, 2.0), 1.9));
        assert!(!spline.is_point_near_curve(&Point2::new(50.0, 50.0), 6.0));
        assert!(!spline.is_point_near_curve(&Point2::new(5.0, 0.0), -1.0));
    }

    #[test]
    fn point_near_curve_matches_closest_point() {
        let mut spline = Spline::b_spline();
        spline.add_control_points(&pts(&[(0.0, 0.0), (5.0, 8.0), (10.0, -3.0), (15.0, 4.0)]));
        for q in pts(&[(3.0, 3.0), (7.0, 1.0), (12.0, 0.0), (20.0, 20.0)]) {
            let d = spline.closest_point(&q).unwrap().distance;
            assert!(spline.is_point_near_curve(&q, d + 1e-9));
            assert!(!spline.is_point_near_curve(&q, d - 1e-6) || d < 1e-6);
        }
    }

    #[test]
    fn point_near_empty_curve() {
        let spline = Spline::cubic_bezier();
        assert!(!spline.is_point_near_curve(&Point2::new(0.0, 0.0), 10.0));
    }

    // ── containment ──

    #[test]
    fn closed_triangle_contains_centroid() {
        let spline = linear(&[(0.0, 0.0), (6.0, 0.0), (3.0, 6.0)], true);
        assert!(spline.contains_point(&Point2::new(3.0, 2.0)));
        assert!(!spline.contains_point(&Point2::new(100.0, 100.0)));
        assert!(!spline.contains_point(&Point2::new(0.5, 5.0)));
    }

    #[test]
    fn smooth_closed_triangle_contains_centroid() {
        let mut spline = Spline::catmull_rom();
        spline.set_closed(true);
        spline.add_control_points(&pts(&[(0.0, 0.0), (6.0, 0.0), (3.0, 6.0)]));
        assert!(spline.contains_point(&Point2::new(3.0, 2.0)));
        assert!(!spline.contains_point(&Point2::new(-50.0, 3.0)));
    }

    #[test]
    fn open_spline_contains_nothing() {
        let spline = linear(&[(0.0, 0.0), (6.0, 0.0), (3.0, 6.0)], false);
        assert!(!spline.contains_point(&Point2::new(3.0, 2.0)));
    }
}
