use super::Point2;

/// A 2D axis-aligned bounding box.
///
/// A box built from a single point has zero area but is still valid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb {
    /// Creates a box from explicit bounds.
    #[must_use]
    pub fn new(min_x: f64, min_y: f64, max_x: f64, max_y: f64) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Creates the zero-area box around a single point.
    #[must_use]
    pub fn from_point(point: &Point2) -> Self {
        Self::new(point.x, point.y, point.x, point.y)
    }

    /// Creates the box spanned by two points, in any order.
    #[must_use]
    pub fn from_segment(a: &Point2, b: &Point2) -> Self {
        Self::new(a.x.min(b.x), a.y.min(b.y), a.x.max(b.x), a.y.max(b.y))
    }

    /// Bounding box of a point set, or `None` for an empty set.
    #[must_use]
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a Point2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = Self::from_point(iter.next()?);
        Some(iter.fold(first, |acc, p| acc.union(&Self::from_point(p))))
    }

    /// Returns the smallest box containing both `self` and `other`.
    #[must_use]
    pub fn union(&self, other: &Self) -> Self {
        Self::new(
            self.min_x.min(other.min_x),
            self.min_y.min(other.min_y),
            self.max_x.max(other.max_x),
            self.max_y.max(other.max_y),
        )
    }

    /// Returns a copy pushed outwards by `amount` on all four sides.
    ///
    /// A negative `amount` shrinks the box; shrinking past zero width
    /// produces an inverted box.
    #[must_use]
    pub fn grow(&self, amount: f64) -> Self {
        Self::new(
            self.min_x - amount,
            self.min_y - amount,
            self.max_x + amount,
            self.max_y + amount,
        )
    }

    /// Returns whether `point` lies inside or on the border of the box.
    #[must_use]
    pub fn contains_point(&self, point: &Point2) -> bool {
        point.x >= self.min_x
            && point.x <= self.max_x
            && point.y >= self.min_y
            && point.y <= self.max_y
    }

    /// Returns whether `other` lies completely inside this box.
    #[must_use]
    pub fn contains(&self, other: &Self) -> bool {
        other.min_x >= self.min_x
            && other.max_x <= self.max_x
            && other.min_y >= self.min_y
            && other.max_y <= self.max_y
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Squared distance from `point` to the box, `0` when the point is inside.
    #[must_use]
    pub fn distance_squared_to_point(&self, point: &Point2) -> f64 {
        let dx = (self.min_x - point.x).max(0.0).max(point.x - self.max_x);
        let dy = (self.min_y - point.y).max(0.0).max(point.y - self.max_y);
        dx * dx + dy * dy
    }

    /// Distance from `point` to the box, `0` when the point is inside.
    #[must_use]
    pub fn distance_to_point(&self, point: &Point2) -> f64 {
        self.distance_squared_to_point(point).sqrt()
    }
}
