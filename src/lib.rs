pub mod error;
pub mod math;
pub mod spline;
pub mod tessellation;

pub use error::{GeosplineError, Result};
pub use math::aabb::Aabb;
pub use math::{Point2, Vector2};
pub use spline::{
    ClosestControlPoint, ClosestPoint, ClosestSplinePoint, Spline, SplineCurveSegment,
    SplineKind, SplineLineSegment, SplineProps,
};
