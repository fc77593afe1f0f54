use super::Point2;

/// Even-odd point-in-polygon test.
///
/// `points` is treated as a closed loop; repeating the first point at the
/// end is allowed but not required. Fewer than three points never contain
/// anything.
#[must_use]
pub fn polygon_contains_point(points: &[Point2], point: &Point2) -> bool {
    let n = points.len();
    if n < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let a = &points[i];
        let b = &points[j];
        // Half-open comparison so a vertex on the ray is counted once.
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = a.x + (point.y - a.y) * (b.x - a.x) / (b.y - a.y);
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}
