//! Editable parametric splines.
//!
//! A [`Spline`] owns an ordered list of control points and lazily derives a
//! flattened representation from them. Every mutator drops the cached
//! geometry; the next geometric read rebuilds it once.
//!
//! Curve positions are addressed by a `u` value: the integer part selects a
//! curve segment and the fractional part is the fraction of that segment's
//! flattened length. [`Spline::closest_point`] returns such a value and
//! [`Spline::add_control_point_at`], [`Spline::point_at`] and
//! [`Spline::tangent_at`] accept one.
//!
//! A `Spline` is not `Sync`: the cache uses interior mutability and must be
//! confined to one thread or guarded externally.

mod basis;
mod query;
mod segment;

pub use basis::{Basis, SplineKind, CATMULL_ROM_SCALE};
pub use query::{ClosestControlPoint, ClosestPoint, ClosestSplinePoint};
pub use segment::{SplineCurveSegment, SplineLineSegment};

use std::cell::{Cell, OnceCell};

use tracing::{debug, trace};

use crate::error::{ControlPointError, Result};
use crate::math::aabb::Aabb;
use crate::math::{Point2, Vector2};
use crate::tessellation::{TessellateSpline, Tessellation, TessellationParams};

/// Construction-time settings of a spline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SplineProps {
    /// Line segments per curve segment. Must be at least 1.
    pub resolution: usize,
    /// Whether the last control point connects back to the first.
    pub closed: bool,
}

impl Default for SplineProps {
    fn default() -> Self {
        Self {
            resolution: TessellationParams::default().resolution(),
            closed: false,
        }
    }
}

/// An editable spline curve with cached tessellation.
#[derive(Debug, Clone)]
pub struct Spline {
    kind: SplineKind,
    control_points: Vec<Point2>,
    params: TessellationParams,
    closed: bool,
    cache: OnceCell<Tessellation>,
    rebuilds: Cell<u64>,
}

impl Spline {
    /// Creates an empty open spline with the default resolution.
    #[must_use]
    pub fn new(kind: SplineKind) -> Self {
        Self {
            kind,
            control_points: Vec::new(),
            params: TessellationParams::default(),
            closed: false,
            cache: OnceCell::new(),
            rebuilds: Cell::new(0),
        }
    }

    /// Creates an empty spline with the given settings.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidParameters` if `props.resolution` is zero.
    pub fn with_props(kind: SplineKind, props: SplineProps) -> Result<Self> {
        let mut spline = Self::new(kind);
        spline.params = TessellationParams::new(props.resolution)?;
        spline.closed = props.closed;
        Ok(spline)
    }

    #[must_use]
    pub fn cubic_bezier() -> Self {
        Self::new(SplineKind::CubicBezier)
    }

    #[must_use]
    pub fn catmull_rom() -> Self {
        Self::new(SplineKind::CatmullRom)
    }

    /// Creates a cardinal spline with the given tangent scale.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidParameters` if `scale` is not finite.
    pub fn cardinal(scale: f64) -> Result<Self> {
        Ok(Self::new(SplineKind::cardinal(scale)?))
    }

    #[must_use]
    pub fn b_spline() -> Self {
        Self::new(SplineKind::BSpline)
    }

    #[must_use]
    pub fn linear() -> Self {
        Self::new(SplineKind::Linear)
    }

    #[must_use]
    pub fn quadratic_bezier() -> Self {
        Self::new(SplineKind::QuadraticBezier)
    }

    // --- Settings ---

    /// Returns the curve family.
    #[must_use]
    pub fn kind(&self) -> SplineKind {
        self.kind
    }

    /// Whether some control points are Bézier handles rather than on-curve points.
    #[must_use]
    pub fn has_tangent_points(&self) -> bool {
        self.kind.has_tangent_points()
    }

    #[must_use]
    pub fn num_control_points(&self) -> usize {
        self.control_points.len()
    }

    /// Returns the number of line segments per curve segment.
    #[must_use]
    pub fn resolution(&self) -> usize {
        self.params.resolution()
    }

    /// Sets the number of line segments per curve segment.
    ///
    /// # Errors
    ///
    /// Returns `TessellationError::InvalidParameters` if `resolution` is zero;
    /// the spline is left unchanged.
    pub fn set_resolution(&mut self, resolution: usize) -> Result<()> {
        if resolution == self.params.resolution() {
            return Ok(());
        }
        self.params = TessellationParams::new(resolution).inspect_err(|err| {
            debug!(resolution, %err, "rejected spline resolution");
        })?;
        self.invalidate();
        Ok(())
    }

    #[must_use]
    pub fn closed(&self) -> bool {
        self.closed
    }

    pub fn set_closed(&mut self, closed: bool) {
        if self.closed == closed {
            return;
        }
        self.closed = closed;
        self.invalidate();
    }

    /// Whether the cached geometry is stale and will be rebuilt on the next read.
    #[must_use]
    pub fn is_invalidated(&self) -> bool {
        self.cache.get().is_none()
    }

    /// Number of times the cached geometry has been rebuilt.
    #[must_use]
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds.get()
    }

    // --- Control points ---

    /// Appends a control point.
    pub fn add_control_point(&mut self, point: Point2) {
        self.control_points.push(point);
        self.invalidate();
    }

    /// Appends control points in order.
    pub fn add_control_points(&mut self, points: &[Point2]) {
        for &point in points {
            self.add_control_point(point);
        }
    }

    /// Replaces the control point at `index`.
    ///
    /// # Errors
    ///
    /// Returns `ControlPointError::IndexOutOfRange` if `index` is not a valid
    /// control point index; the spline is left unchanged.
    pub fn update_control_point(&mut self, index: usize, point: Point2) -> Result<()> {
        let len = self.control_points.len();
        let Some(slot) = self.control_points.get_mut(index) else {
            debug!(index, len, "rejected control point update");
            return Err(ControlPointError::IndexOutOfRange { index, len }.into());
        };
        *slot = point;
        self.invalidate();
        Ok(())
    }

    /// Replaces all control points.
    pub fn set_control_points(&mut self, points: &[Point2]) {
        self.control_points.clear();
        self.control_points.extend_from_slice(points);
        self.invalidate();
    }

    /// Removes all control points.
    pub fn clear_control_points(&mut self) {
        self.control_points.clear();
        self.invalidate();
    }

    /// Removes the control point at `index`.
    ///
    /// Returns `false` and leaves the spline unchanged if `index` is out of range.
    pub fn delete_control_point_at(&mut self, index: usize) -> bool {
        if index >= self.control_points.len() {
            debug!(index, len = self.control_points.len(), "rejected control point removal");
            return false;
        }
        self.control_points.remove(index);
        self.invalidate();
        true
    }

    /// Inserts a control point on the curve at `u`.
    ///
    /// Interpolating and B-spline kinds insert the flattened curve point after
    /// the first control point of the addressed segment. Bézier kinds split
    /// the addressed span with de Casteljau subdivision, which keeps the curve
    /// shape and inserts three (cubic) or two (quadratic) points. Splitting a
    /// padded trailing span also stores its repeated end point explicitly.
    ///
    /// Returns the new on-curve point, or `None` when there is no curve yet.
    pub fn add_control_point_at(&mut self, u: f64) -> Option<Point2> {
        let (index, fraction) = self.locate(u)?;
        let segment = &self.geometry().curve_segments[index];

        let inserted = if self.kind.has_tangent_points() {
            let t = segment.parameter_at_length_fraction(fraction)?;
            let span = segment.control_points.clone();
            self.split_bezier_span(index, &span, t)
        } else {
            let point = segment.point_at_length_fraction(fraction)?;
            self.control_points.insert(index + 1, point);
            point
        };

        self.invalidate();
        Some(inserted)
    }

    /// Returns a copy of the control points.
    #[must_use]
    pub fn control_points(&self) -> Vec<Point2> {
        self.control_points.clone()
    }

    // --- Derived geometry ---

    /// Returns the flattened curve segments, rebuilding them if stale.
    #[must_use]
    pub fn curve_segments(&self) -> &[SplineCurveSegment] {
        &self.geometry().curve_segments
    }

    /// Bounding box of the flattened curve; `None` when there is no curve.
    #[must_use]
    pub fn aabb(&self) -> Option<Aabb> {
        self.geometry().aabb
    }

    /// Length of the flattened curve.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.geometry().length
    }

    /// Flattened curve as an ordered point chain.
    ///
    /// An open spline yields one point more than it has line segments. A
    /// closed spline does not repeat its first point at the end.
    #[must_use]
    pub fn polyline_points(&self) -> Vec<Point2> {
        let geometry = self.geometry();
        let mut points = Vec::with_capacity(geometry.num_line_segments() + 1);
        for line in geometry
            .curve_segments
            .iter()
            .flat_map(|seg| &seg.line_segments)
        {
            if points.is_empty() {
                points.push(line.start);
            }
            points.push(line.end);
        }
        if self.closed && !points.is_empty() {
            points.pop();
        }
        points
    }

    /// Point on the flattened curve at `u`; `None` when there is no curve.
    #[must_use]
    pub fn point_at(&self, u: f64) -> Option<Point2> {
        let (index, fraction) = self.locate(u)?;
        self.geometry().curve_segments[index].point_at_length_fraction(fraction)
    }

    /// Derivative of the curve at `u` with respect to the segment parameter.
    #[must_use]
    pub fn tangent_at(&self, u: f64) -> Option<Vector2> {
        let (index, fraction) = self.locate(u)?;
        let segment = &self.geometry().curve_segments[index];
        let t = segment.parameter_at_length_fraction(fraction)?;
        self.kind.derivative(&segment.control_points, t).ok()
    }

    /// Curve segments as they would be with `preview` appended.
    ///
    /// `close` selects whether the preview curve is closed. The cached
    /// geometry is neither read nor modified.
    #[must_use]
    pub fn preview_curve_segments(&self, preview: Point2, close: bool) -> Vec<SplineCurveSegment> {
        let mut points = Vec::with_capacity(self.control_points.len() + 1);
        points.extend_from_slice(&self.control_points);
        points.push(preview);
        TessellateSpline::new(self.kind, &points, close, self.params)
            .execute()
            .curve_segments
    }

    // --- Internals ---

    fn invalidate(&mut self) {
        self.cache.take();
    }

    /// Returns the cached geometry, rebuilding it first if stale.
    fn geometry(&self) -> &Tessellation {
        self.cache.get_or_init(|| {
            let tessellation =
                TessellateSpline::new(self.kind, &self.control_points, self.closed, self.params)
                    .execute();
            self.rebuilds.set(self.rebuilds.get() + 1);
            trace!(
                kind = ?self.kind,
                control_points = self.control_points.len(),
                curve_segments = tessellation.curve_segments.len(),
                length = tessellation.length,
                "rebuilt spline geometry"
            );
            tessellation
        })
    }

    /// Splits `u` into a curve segment index and a length fraction.
    fn locate(&self, u: f64) -> Option<(usize, f64)> {
        let count = self.geometry().curve_segments.len();
        if count == 0 || u.is_nan() {
            return None;
        }
        #[allow(clippy::cast_precision_loss)]
        let u = u.clamp(0.0, count as f64);
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = (u.floor() as usize).min(count - 1);
        #[allow(clippy::cast_precision_loss)]
        let fraction = u - index as f64;
        Some((index, fraction))
    }

    /// Replaces Bézier span `index` by its two halves split at `t`.
    ///
    /// Returns the new anchor, which lies exactly on the curve.
    fn split_bezier_span(&mut self, index: usize, span: &[Point2], t: f64) -> Point2 {
        let (left, right) = de_casteljau_split(span, t);
        let stride = span.len() - 1;
        let base = stride * index;

        // Work on the point list with the closing anchor appended, so the
        // last span of a closed spline splits like any other.
        let mut points = std::mem::take(&mut self.control_points);
        if self.closed {
            points.push(points[0]);
        }
        let last = points.len() - 1;
        let end = (base + stride).min(last);
        let replacement = left[1..].iter().chain(&right[1..]).copied();
        points.splice(base + 1..=end, replacement);
        if self.closed {
            points.pop();
        }
        self.control_points = points;

        right[0]
    }
}

/// Splits a Bézier span at `t` into left and right spans of the same degree.
fn de_casteljau_split(span: &[Point2], t: f64) -> (Vec<Point2>, Vec<Point2>) {
    let mut left = Vec::with_capacity(span.len());
    let mut right = Vec::with_capacity(span.len());
    let mut level = span.to_vec();
    while let (Some(&first), Some(&last)) = (level.first(), level.last()) {
        left.push(first);
        right.push(last);
        level = level
            .windows(2)
            .map(|pair| pair[0] + (pair[1] - pair[0]) * t)
            .collect();
    }
    right.reverse();
    (left, right)
}
