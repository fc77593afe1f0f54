use nalgebra::{RowVector3, RowVector4};

use crate::error::{GeometryError, Result, TessellationError};
use crate::math::{Matrix3, Matrix4, Point2, Vector2};

/// Scale of the cardinal spline that yields a Catmull-Rom curve.
pub const CATMULL_ROM_SCALE: f64 = 0.5;

/// Curve family of a spline.
///
/// Each family is a basis matrix plus a rule for picking the points of one
/// span out of the raw control points. Everything downstream of
/// [`SplineKind::span_points`] is shared.
///
/// | kind | span points | passes through control points |
/// |---|---|---|
/// | `CubicBezier` | `p[3i..=3i+3]` | anchors only |
/// | `Cardinal`, `CatmullRom`, `Linear` | `p[i-1..=i+2]` | yes |
/// | `BSpline` | `p[i-1..=i+2]` | no |
/// | `QuadraticBezier` | `p[2i..=2i+2]` | anchors only |
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SplineKind {
    /// Piecewise cubic Bézier: `anchor, handle, handle, anchor, …`.
    CubicBezier,
    /// Interpolating cardinal spline; `scale` controls tangent magnitude.
    Cardinal { scale: f64 },
    /// Cardinal spline with scale `0.5`.
    CatmullRom,
    /// Uniform cubic B-spline (approximating).
    BSpline,
    /// Straight lines between control points.
    Linear,
    /// Piecewise quadratic Bézier: `anchor, handle, anchor, …`.
    QuadraticBezier,
}

/// Basis matrix mapping span points to power-basis coefficients.
///
/// A point on the span is `[1 t t² t³] · M · [p0 p1 p2 p3]ᵀ` (cubic) or
/// `[1 t t²] · M · [p0 p1 p2]ᵀ` (quadratic).
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Basis {
    Cubic(Matrix4),
    Quadratic(Matrix3),
}

impl Basis {
    /// Blending weights of the span points at `t`.
    fn weights(&self, t: f64) -> Vec<f64> {
        match self {
            Self::Cubic(m) => (RowVector4::new(1.0, t, t * t, t * t * t) * m)
                .iter()
                .copied()
                .collect(),
            Self::Quadratic(m) => (RowVector3::new(1.0, t, t * t) * m).iter().copied().collect(),
        }
    }

    /// Weights of the first derivative with respect to `t`.
    fn derivative_weights(&self, t: f64) -> Vec<f64> {
        match self {
            Self::Cubic(m) => (RowVector4::new(0.0, 1.0, 2.0 * t, 3.0 * t * t) * m)
                .iter()
                .copied()
                .collect(),
            Self::Quadratic(m) => (RowVector3::new(0.0, 1.0, 2.0 * t) * m)
                .iter()
                .copied()
                .collect(),
        }
    }
}

fn blend(span: &[Point2], weights: &[f64]) -> Vector2 {
    span.iter()
        .zip(weights)
        .fold(Vector2::zeros(), |acc, (p, w)| acc + p.coords * *w)
}

impl SplineKind {
    /// Creates a cardinal spline kind.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidParameters` if `scale` is not finite.
    pub fn cardinal(scale: f64) -> Result<Self> {
        if !scale.is_finite() {
            return Err(TessellationError::InvalidParameters(format!(
                "cardinal scale must be finite, got {scale}"
            ))
            .into());
        }
        Ok(Self::Cardinal { scale })
    }

    /// Returns the basis matrix of this kind.
    #[must_use]
    #[rustfmt::skip]
    pub fn basis(&self) -> Basis {
        match *self {
            Self::CubicBezier => Basis::Cubic(Matrix4::new(
                 1.0,  0.0,  0.0, 0.0,
                -3.0,  3.0,  0.0, 0.0,
                 3.0, -6.0,  3.0, 0.0,
                -1.0,  3.0, -3.0, 1.0,
            )),
            Self::Cardinal { scale } => cardinal_basis(scale),
            Self::CatmullRom => cardinal_basis(CATMULL_ROM_SCALE),
            Self::BSpline => Basis::Cubic(Matrix4::new(
                 1.0,  4.0,  1.0, 0.0,
                -3.0,  0.0,  3.0, 0.0,
                 3.0, -6.0,  3.0, 0.0,
                -1.0,  3.0, -3.0, 1.0,
            ) / 6.0),
            Self::Linear => Basis::Cubic(Matrix4::new(
                0.0,  1.0, 0.0, 0.0,
                0.0, -1.0, 1.0, 0.0,
                0.0,  0.0, 0.0, 0.0,
                0.0,  0.0, 0.0, 0.0,
            )),
            Self::QuadraticBezier => Basis::Quadratic(Matrix3::new(
                 1.0,  0.0, 0.0,
                -2.0,  2.0, 0.0,
                 1.0, -2.0, 1.0,
            )),
        }
    }

    /// Number of points in one span.
    #[must_use]
    pub fn span_len(&self) -> usize {
        match self {
            Self::QuadraticBezier => 3,
            _ => 4,
        }
    }

    /// Whether some control points are handles the curve does not pass through.
    #[must_use]
    pub fn has_tangent_points(&self) -> bool {
        matches!(self, Self::CubicBezier | Self::QuadraticBezier)
    }

    /// Step between the first points of consecutive Bézier spans.
    fn bezier_stride(&self) -> Option<usize> {
        match self {
            Self::CubicBezier => Some(3),
            Self::QuadraticBezier => Some(2),
            _ => None,
        }
    }

    /// Number of curve segments for `num_points` control points.
    #[must_use]
    pub fn num_curve_segments(&self, num_points: usize, closed: bool) -> usize {
        if num_points < 2 {
            return 0;
        }
        match (self.bezier_stride(), closed) {
            (Some(stride), false) => (num_points - 1).div_ceil(stride),
            (Some(stride), true) => num_points.div_ceil(stride),
            (None, false) => num_points - 1,
            (None, true) => num_points,
        }
    }

    /// Picks the span points of curve segment `index`.
    ///
    /// Callers must pass `index < num_curve_segments(points.len(), closed)`.
    #[must_use]
    pub fn span_points(&self, points: &[Point2], index: usize, closed: bool) -> Vec<Point2> {
        match self.bezier_stride() {
            Some(stride) => bezier_span(points, index, closed, stride),
            None => windowed_span(points, index, closed),
        }
    }

    /// Evaluates one span at curve parameter `t`.
    ///
    /// # Errors
    ///
    /// Returns `GeometryError::ParameterOutOfRange` if `t` is outside `[0, 1]`,
    /// or `GeometryError::Degenerate` if `span` has the wrong number of points.
    pub fn evaluate(&self, span: &[Point2], t: f64) -> Result<Point2> {
        self.check_span(span, t)?;
        Ok(self.eval_span(span, t))
    }

    /// First derivative of one span at curve parameter `t`.
    ///
    /// # Errors
    ///
    /// Same conditions as [`SplineKind::evaluate`].
    pub fn derivative(&self, span: &[Point2], t: f64) -> Result<Vector2> {
        self.check_span(span, t)?;
        Ok(blend(span, &self.basis().derivative_weights(t)))
    }

    /// Unchecked evaluation used by the tessellator.
    pub(crate) fn eval_span(&self, span: &[Point2], t: f64) -> Point2 {
        Point2::from(blend(span, &self.basis().weights(t)))
    }

    fn check_span(&self, span: &[Point2], t: f64) -> Result<()> {
        if !(0.0..=1.0).contains(&t) {
            return Err(GeometryError::ParameterOutOfRange {
                parameter: "t",
                value: t,
                min: 0.0,
                max: 1.0,
            }
            .into());
        }
        if span.len() != self.span_len() {
            return Err(GeometryError::Degenerate(format!(
                "span needs {} points, got {}",
                self.span_len(),
                span.len()
            ))
            .into());
        }
        Ok(())
    }
}

#[rustfmt::skip]
fn cardinal_basis(s: f64) -> Basis {
    Basis::Cubic(Matrix4::new(
        0.0,     1.0,     0.0,           0.0,
        -s,      0.0,     s,             0.0,
        2.0 * s, s - 3.0, 3.0 - 2.0 * s, -s,
        -s,      2.0 - s, s - 2.0,       s,
    ))
}

/// `p[i-1], p[i], p[i+1], p[i+2]`, clamped at the ends when open, wrapped when closed.
fn windowed_span(points: &[Point2], index: usize, closed: bool) -> Vec<Point2> {
    let n = points.len();
    let last = n - 1;
    let (i0, i2, i3) = if closed {
        ((index + n - 1) % n, (index + 1) % n, (index + 2) % n)
    } else {
        (index.saturating_sub(1), (index + 1).min(last), (index + 2).min(last))
    };
    vec![points[i0], points[index], points[i2], points[i3]]
}

/// `stride + 1` consecutive points starting at `stride * index`.
///
/// A closed spline spans over the control points followed by the first one
/// again. A trailing partial span repeats its last available point.
fn bezier_span(points: &[Point2], index: usize, closed: bool, stride: usize) -> Vec<Point2> {
    let n = points.len();
    let last = if closed { n } else { n - 1 };
    (0..=stride)
        .map(|j| {
            let k = (stride * index + j).min(last);
            points[k % n]
        })
        .collect()
}
