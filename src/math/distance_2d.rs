use super::Point2;

/// Result of projecting a point onto a line segment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentProjection {
    /// The closest point on the segment.
    pub point: Point2,
    /// Squared distance from the query point to [`SegmentProjection::point`].
    pub distance_squared: f64,
    /// Clamped segment parameter in `[0, 1]` of the closest point.
    pub t: f64,
}

/// Returns the squared Euclidean distance between two points.
#[must_use]
pub fn distance_squared(p1: &Point2, p2: &Point2) -> f64 {
    let dx = p1.x - p2.x;
    let dy = p1.y - p2.y;
    dx * dx + dy * dy
}

/// Returns the Euclidean distance between two points.
#[must_use]
pub fn distance(p1: &Point2, p2: &Point2) -> f64 {
    distance_squared(p1, p2).sqrt()
}

/// Projects `point` onto the segment from `seg_start` to `seg_end`.
///
/// The projection parameter is clamped to `[0, 1]`. A zero-length segment
/// projects everything onto `seg_start`.
#[must_use]
pub fn closest_point_on_segment(
    seg_start: &Point2,
    seg_end: &Point2,
    point: &Point2,
) -> SegmentProjection {
    let dx = seg_end.x - seg_start.x;
    let dy = seg_end.y - seg_start.y;
    let len_sq = dx * dx + dy * dy;

    if len_sq < 1e-20 {
        // Degenerate segment (zero length).
        return SegmentProjection {
            point: *seg_start,
            distance_squared: distance_squared(point, seg_start),
            t: 0.0,
        };
    }

    let t = ((point.x - seg_start.x) * dx + (point.y - seg_start.y) * dy) / len_sq;
    let t = t.clamp(0.0, 1.0);
    let closest = Point2::new(seg_start.x + t * dx, seg_start.y + t * dy);

    SegmentProjection {
        point: closest,
        distance_squared: distance_squared(point, &closest),
        t,
    }
}

/// Returns the squared minimum distance from `point` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist_squared(point: &Point2, a: &Point2, b: &Point2) -> f64 {
    closest_point_on_segment(a, b, point).distance_squared
}

/// Returns the minimum distance from `point` to the segment `a`→`b`.
#[must_use]
pub fn point_to_segment_dist(point: &Point2, a: &Point2, b: &Point2) -> f64 {
    point_to_segment_dist_squared(point, a, b).sqrt()
}
