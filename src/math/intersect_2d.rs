use super::{Point2, TOLERANCE};

/// Intersection of the infinite lines through `p1`→`q1` and `p2`→`q2`.
///
/// Returns `None` when the lines are parallel or collinear. The result is not
/// limited to the segment bounds; use [`segment_segment_intersect_2d`] for that.
#[must_use]
pub fn line_line_intersect_2d(
    p1: &Point2,
    q1: &Point2,
    p2: &Point2,
    q2: &Point2,
) -> Option<Point2> {
    let d1 = q1 - p1;
    let d2 = q2 - p2;
    let cross = d1.x * d2.y - d1.y * d2.x;
    if cross.abs() < TOLERANCE {
        return None;
    }
    let dx = p2.x - p1.x;
    let dy = p2.y - p1.y;
    let t = (dx * d2.y - dy * d2.x) / cross;
    Some(p1 + d1 * t)
}

/// Bounded segment-segment intersection in 2D.
///
/// Returns `(intersection_point, t, u)` where `t` and `u` are the parameters
/// along each segment, both in `[0, 1]`.
#[must_use]
pub fn segment_segment_intersect_2d(
    a0: &Point2,
    a1: &Point2,
    b0: &Point2,
    b1: &Point2,
) -> Option<(Point2, f64, f64)> {
    let da = a1 - a0;
    let db = b1 - b0;

    let cross = da.x * db.y - da.y * db.x;
    if cross.abs() < TOLERANCE {
        return None;
    }

    let dx = b0.x - a0.x;
    let dy = b0.y - a0.y;
    let t = (dx * db.y - dy * db.x) / cross;
    let u = (dx * da.y - dy * da.x) / cross;

    // Use a small epsilon to include endpoints.
    let eps = TOLERANCE;
    if t >= -eps && t <= 1.0 + eps && u >= -eps && u <= 1.0 + eps {
        let t = t.clamp(0.0, 1.0);
        Some((a0 + da * t, t, u.clamp(0.0, 1.0)))
    } else {
        None
    }
}
