//! All the things you need to handle bezier curves

use crate::{
    ArrayIter, EPSILON, EPSILON_SQRT, FillRule, Point, Rect, Scalar, Transform,
    real_cubic_roots, real_quadratic_roots,
};
use std::fmt;

pub type CurveRoots = ArrayIter<[Option<Scalar>; 3]>;
pub type CurveExtremities = ArrayIter<[Option<Scalar>; 4]>;
pub type CurveIntersections = ArrayIter<[Option<(Point, Scalar)>; 3]>;
pub type CurvePieces<C> = ArrayIter<[Option<C>; 5]>;

/// Depth limit of the adaptive bisection used by flattening
pub const FLATTEN_MAX_DEPTH: usize = 16;

/// Coefficients smaller than this (relative to the largest one) are treated as zero
const POLYNOMIAL_EPSILON: Scalar = 1e-12;

/// Roots closer than this to `0` or `1` are not reported as extremities
const EXTREMITY_MARGIN: Scalar = EPSILON_SQRT;

/// Intersection parameters within this distance outside of `[0, 1]` are snapped
const UNIT_SNAP: Scalar = 1e-9;

/// Coordinate axis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    X,
    Y,
}

impl Axis {
    fn of(self, point: Point) -> Scalar {
        match self {
            Axis::X => point.x(),
            Axis::Y => point.y(),
        }
    }
}

/// Set of operations common to all bezier curves.
pub trait Curve: Sized + Copy + Into<Segment> {
    /// Point at which curve starts
    fn start(&self) -> Point;

    /// Point at which curve ends
    fn end(&self) -> Point;

    /// Apply affine transformation to the curve
    fn transform(&self, tr: Transform) -> Self;

    /// Position and derivative (non-normalized tangent) at parameter `t`
    /// evaluated with De Casteljau construction.
    fn at_with_deriv(&self, t: Scalar) -> (Point, Point);

    /// Evaluate curve at parameter value `t` in (0.0..=1.0)
    fn at(&self, t: Scalar) -> Point {
        self.at_with_deriv(t).0
    }

    /// Split the curve at parameter value `t`, both halves together reproduce
    /// the original curve.
    fn split_at(&self, t: Scalar) -> (Self, Self);

    fn split(&self) -> (Self, Self) {
        self.split_at(0.5)
    }

    /// Identical curve but directed from end to start, instead of start to end.
    fn reverse(&self) -> Self;

    /// Monomial coefficients `[a, b, c, d]` of `curve(t) = a t^3 + b t^2 + c t + d`
    fn coefficients(&self) -> [Point; 4];

    /// Bounding box of all control points, extends `init` if provided
    fn fast_bbox(&self, init: Option<Rect>) -> Rect;

    /// Tight bounding box of the curve, extends `init` if provided
    fn bbox(&self, init: Option<Rect>) -> Rect {
        let bbox = Rect::from_corners(self.start(), self.end()).union_opt(init);
        self.extremities()
            .fold(bbox, |bbox, t| bbox.union_point(self.at(t)))
    }

    /// Parameters in `(0, 1)` at which derivative along `axis` is zero, sorted
    fn axis_extremities(&self, axis: Axis) -> CurveRoots {
        let [a, b, c, _] = self.coefficients().map(|p| axis.of(p));
        polynomial_roots(0.0, 3.0 * a, 2.0 * b, c)
            .filter(|t| *t > EXTREMITY_MARGIN && *t < 1.0 - EXTREMITY_MARGIN)
            .collect::<CurveRoots>()
            .sort_by(Scalar::total_cmp)
    }

    /// All non-terminal extremities along both axes, sorted and deduplicated
    fn extremities(&self) -> CurveExtremities {
        let mut result = CurveExtremities::new();
        let sorted = self
            .axis_extremities(Axis::X)
            .chain(self.axis_extremities(Axis::Y))
            .collect::<CurveExtremities>()
            .sort_by(Scalar::total_cmp);
        let mut last: Option<Scalar> = None;
        for t in sorted {
            if last.is_some_and(|last| (t - last).abs() < EXTREMITY_MARGIN) {
                continue;
            }
            result.push(t);
            last = Some(t);
        }
        result
    }

    /// Split curve at all sorted parameter values
    fn split_at_all(&self, ts: impl IntoIterator<Item = Scalar>) -> CurvePieces<Self> {
        let mut pieces = CurvePieces::new();
        let mut rest = *self;
        let mut offset = 0.0;
        for t in ts {
            let local = (t - offset) / (1.0 - offset);
            if local <= 0.0 || local >= 1.0 {
                continue;
            }
            let (head, tail) = rest.split_at(local);
            pieces.push(head);
            rest = tail;
            offset = t;
        }
        pieces.push(rest);
        pieces
    }

    /// Split curve into pieces that have no internal extremities
    fn split_at_extremities(&self) -> CurvePieces<Self> {
        self.split_at_all(self.extremities())
    }

    /// Intersections of the curve with an infinite line passing through `line`
    ///
    /// Returns `(point, t)` pairs sorted by curve parameter `t`, near-duplicate
    /// roots are preserved.
    fn intersections(&self, line: Line) -> CurveIntersections {
        // implicit line equation `a * x + b * y + c = 0`
        let Line([Point([x0, y0]), Point([x1, y1])]) = line;
        let (a, b, c) = (y1 - y0, x0 - x1, x0 * (y0 - y1) + y0 * (x1 - x0));
        let [p3, p2, p1, p0] = self.coefficients().map(|p| a * p.x() + b * p.y());
        polynomial_roots(p3, p2, p1, p0 + c)
            .filter_map(snap_unit)
            .map(|t| (self.at(t), t))
            .collect::<CurveIntersections>()
            .sort_by(|(_, t0), (_, t1)| t0.total_cmp(t1))
    }

    /// Maximum deviation of the curve from its chord
    ///
    /// Returns `(perpendicular, longitudinal)` deviations. Curve is moved so its
    /// chord lies on the positive `x` axis, perpendicular deviation is the largest
    /// `|y|` at `y` extremities, longitudinal is how far `x` extremities go outside
    /// of `[0, chord_length]`.
    fn deviations_from_linearity(&self) -> (Scalar, Scalar) {
        let chord = Line::new(self.start(), self.end());
        let length = chord.length();
        if length < EPSILON_SQRT {
            let bbox = self.fast_bbox(None);
            let spread = bbox.width().max(bbox.height());
            return (spread, spread);
        }
        let curve = self.transform(Transform::make_horizontal(chord));
        let perpendicular = curve
            .axis_extremities(Axis::Y)
            .map(|t| curve.at(t).y().abs())
            .fold(0.0, Scalar::max);
        let longitudinal = curve
            .axis_extremities(Axis::X)
            .map(|t| {
                let x = curve.at(t).x();
                if x < 0.0 { -x } else { (x - length).max(0.0) }
            })
            .fold(0.0, Scalar::max);
        (perpendicular, longitudinal)
    }

    /// Convert curve to an iterator over lines, each line deviates from the
    /// curve by no more than `linearity`
    fn flatten(&self, linearity: Scalar) -> CurveFlattenIter {
        CurveFlattenIter::new(*self, linearity)
    }

    /// Number of crossings of the ray from `(-inf, point.y)` to `point`
    ///
    /// The ray starts strictly left of the bounding box. Curve is split into
    /// pieces monotonic in `y` and each piece counts if `min_y <= point.y < max_y`,
    /// so vertices shared by two segments are counted once. With
    /// [`FillRule::WindingNumber`] crossings are signed: `+1` when the piece goes
    /// towards larger `y`, `-1` otherwise.
    fn crossings(&self, point: Point, fill_rule: FillRule) -> i32 {
        let Point([x, y]) = point;
        let bbox = self.fast_bbox(None);
        if y < bbox.min_y() || y >= bbox.max_y() || x <= bbox.min_x() {
            return 0;
        }
        let ray = Line::new((bbox.min_x() - 1.0, y), point);
        let mut count = 0;
        for piece in self.split_at_all(self.axis_extremities(Axis::Y)) {
            let (start, end) = (piece.start(), piece.end());
            let (low, high) = if start.y() < end.y() {
                (start.y(), end.y())
            } else {
                (end.y(), start.y())
            };
            if low == high || y < low || y >= high {
                continue;
            }
            let cross_x = if y == start.y() {
                start.x()
            } else {
                match piece.intersections(ray).next() {
                    Some((cross, _)) => cross.x(),
                    None => start.x() + (y - start.y()) * (end.x() - start.x()) / (end.y() - start.y()),
                }
            };
            if cross_x < x {
                count += match fill_rule {
                    FillRule::WindingNumber if end.y() < start.y() => -1,
                    _ => 1,
                };
            }
        }
        count
    }

    /// Distance from the point to the closest point of the curve
    ///
    /// Curves without closed form solution are flattened with `tolerance`.
    fn distance_to(&self, point: Point, tolerance: Scalar) -> Scalar {
        self.flatten(tolerance)
            .map(|line| line.distance_to(point, tolerance))
            .fold(Scalar::INFINITY, Scalar::min)
    }
}

/// Roots of `a t^3 + b t^2 + c t + d = 0` falling back to lower degree when
/// leading coefficients vanish.
fn polynomial_roots(a: Scalar, b: Scalar, c: Scalar, d: Scalar) -> CurveRoots {
    let scale = a.abs().max(b.abs()).max(c.abs()).max(d.abs());
    let tolerance = scale * POLYNOMIAL_EPSILON;
    let mut roots = CurveRoots::new();
    if scale == 0.0 || !scale.is_finite() {
        return roots;
    }
    if a.abs() > tolerance {
        return real_cubic_roots(a, b, c, d);
    }
    if b.abs() > tolerance {
        roots.extend(real_quadratic_roots(b, c, d));
    } else if c.abs() > tolerance {
        roots.push(-d / c);
    }
    roots
}

/// Snap parameter to `[0, 1]` if it is close enough, drop it otherwise
fn snap_unit(t: Scalar) -> Option<Scalar> {
    if (0.0..=1.0).contains(&t) {
        Some(t)
    } else if (-UNIT_SNAP..0.0).contains(&t) {
        Some(0.0)
    } else if t > 1.0 && t <= 1.0 + UNIT_SNAP {
        Some(1.0)
    } else {
        None
    }
}

pub struct CurveFlattenIter {
    linearity: Scalar,
    stack: Vec<(Segment, usize)>,
}

impl CurveFlattenIter {
    pub fn new(segment: impl Into<Segment>, linearity: Scalar) -> Self {
        let segment = segment.into();
        let stack = segment
            .split_at_extremities()
            .rev()
            .map(|piece| (piece, 0))
            .collect();
        Self { linearity, stack }
    }
}

impl Iterator for CurveFlattenIter {
    type Item = Line;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (segment, depth) = self.stack.pop()?;
            if let Segment::Line(line) = segment {
                return Some(line);
            }
            let (perpendicular, longitudinal) = segment.deviations_from_linearity();
            let is_flat = perpendicular <= self.linearity && longitudinal <= self.linearity;
            if is_flat || depth >= FLATTEN_MAX_DEPTH {
                return Some(Line::new(segment.start(), segment.end()));
            }
            let (s0, s1) = segment.split();
            self.stack.push((s1, depth + 1));
            self.stack.push((s0, depth + 1));
        }
    }
}

// -----------------------------------------------------------------------------
// Line
// -----------------------------------------------------------------------------

/// Line segment curve
#[derive(Clone, Copy, PartialEq)]
pub struct Line(pub [Point; 2]);

impl fmt::Debug for Line {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Line([p0, p1]) = self;
        write!(f, "Line {:?} {:?}", p0, p1)
    }
}

impl Line {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into()])
    }

    /// Length of the line
    pub fn length(&self) -> Scalar {
        let Self([p0, p1]) = self;
        p0.dist(*p1)
    }

    /// Start and end points of the line
    pub fn points(&self) -> [Point; 2] {
        self.0
    }

    /// Direction vector associated with the line segment
    pub fn direction(&self) -> Point {
        self.end() - self.start()
    }

    /// Tangent lines at the start and at the end
    pub fn ends(&self) -> (Line, Line) {
        (*self, *self)
    }

    pub fn is_horizontal(&self) -> bool {
        self.start().y() == self.end().y()
    }

    /// Find intersection of two infinite lines
    ///
    /// Returns pair of `t` parameters for this line and the other line.
    /// Found by solving `self.at(t0) == other.at(t1)`. Actual intersection of
    /// line segments can be found by making sure that `0.0 <= t0 <= 1.0 && 0.0 <= t1 <= 1.0`
    pub fn intersect(&self, other: Line) -> Option<(Scalar, Scalar)> {
        let Line([Point([x1, y1]), Point([x2, y2])]) = *self;
        let Line([Point([x3, y3]), Point([x4, y4])]) = other;
        let det = (x4 - x3) * (y1 - y2) - (x1 - x2) * (y4 - y3);
        if det.abs() < EPSILON {
            return None;
        }
        let t0 = ((y3 - y4) * (x1 - x3) + (x4 - x3) * (y1 - y3)) / det;
        let t1 = ((y1 - y2) * (x1 - x3) + (x2 - x1) * (y1 - y3)) / det;
        if t0.is_finite() && t1.is_finite() {
            Some((t0, t1))
        } else {
            None
        }
    }

    /// Find intersection point between two line segments
    pub fn intersect_point(&self, other: Line) -> Option<Point> {
        let (t0, t1) = self.intersect(other)?;
        if (0.0..=1.0).contains(&t0) && (0.0..=1.0).contains(&t1) {
            Some(self.at(t0))
        } else {
            None
        }
    }

    /// Projection of the point on the infinite line and its parameter
    pub fn nearest_point(&self, point: Point) -> (Point, Scalar) {
        let direction = self.direction();
        let length_sq = direction.dot(direction);
        if length_sq < EPSILON {
            return (self.start(), 0.0);
        }
        let t = (point - self.start()).dot(direction) / length_sq;
        (self.at(t), t)
    }
}

impl Curve for Line {
    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[1]
    }

    fn transform(&self, tr: Transform) -> Self {
        let Line([p0, p1]) = self;
        Self([tr.apply(*p0), tr.apply(*p1)])
    }

    fn at_with_deriv(&self, t: Scalar) -> (Point, Point) {
        let Self([p0, p1]) = *self;
        (p0.lerp(p1, t), p1 - p0)
    }

    fn split_at(&self, t: Scalar) -> (Self, Self) {
        let Self([p0, p1]) = *self;
        let mid = self.at(t);
        (Self([p0, mid]), Self([mid, p1]))
    }

    fn reverse(&self) -> Self {
        let Self([p0, p1]) = *self;
        Self([p1, p0])
    }

    fn coefficients(&self) -> [Point; 4] {
        let Self([p0, p1]) = *self;
        [Point::default(), Point::default(), p1 - p0, p0]
    }

    fn fast_bbox(&self, init: Option<Rect>) -> Rect {
        let Self([p0, p1]) = *self;
        Rect::from_corners(p0, p1).union_opt(init)
    }

    fn bbox(&self, init: Option<Rect>) -> Rect {
        self.fast_bbox(init)
    }

    fn intersections(&self, line: Line) -> CurveIntersections {
        let mut result = CurveIntersections::new();
        if let Some(t) = self.intersect(line).and_then(|(t, _)| snap_unit(t)) {
            result.push((self.at(t), t));
        }
        result
    }

    fn deviations_from_linearity(&self) -> (Scalar, Scalar) {
        (0.0, 0.0)
    }

    /// Distance to the closest point of the segment (ends are round)
    fn distance_to(&self, point: Point, _tolerance: Scalar) -> Scalar {
        let (_, t) = self.nearest_point(point);
        self.at(t.clamp(0.0, 1.0)).dist(point)
    }
}

// -----------------------------------------------------------------------------
// Quadratic bezier curve
// -----------------------------------------------------------------------------

/// Quadratic bezier curve
///
/// Polynomial form:
/// `(1 - t) ^ 2 * p0 + 2 * (1 - t) * t * p1 + t ^ 2 * p2`
#[derive(Clone, Copy, PartialEq)]
pub struct Quad(pub [Point; 3]);

impl fmt::Debug for Quad {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Quad([p0, p1, p2]) = self;
        write!(f, "Quad {:?} {:?} {:?}", p0, p1, p2)
    }
}

impl Quad {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into(), p2.into()])
    }

    pub fn points(&self) -> [Point; 3] {
        self.0
    }

    /// Tangent lines at the start and at the end, skipping coincident control points
    pub fn ends(&self) -> (Line, Line) {
        let Self([p0, p1, p2]) = *self;
        let start = Line::new(p0, p1);
        let end = Line::new(p1, p2);
        if p0.is_close_to(p1) {
            (end, end)
        } else if p1.is_close_to(p2) {
            (start, start)
        } else {
            (start, end)
        }
    }
}

impl Curve for Quad {
    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[2]
    }

    fn transform(&self, tr: Transform) -> Self {
        let Quad([p0, p1, p2]) = self;
        Self([tr.apply(*p0), tr.apply(*p1), tr.apply(*p2)])
    }

    fn at_with_deriv(&self, t: Scalar) -> (Point, Point) {
        let Self([p0, p1, p2]) = *self;
        let half_start = p0.lerp(p1, t);
        let half_end = p1.lerp(p2, t);
        (half_start.lerp(half_end, t), 2.0 * (half_end - half_start))
    }

    fn split_at(&self, t: Scalar) -> (Self, Self) {
        let Self([p0, p1, p2]) = *self;
        let half_start = p0.lerp(p1, t);
        let half_end = p1.lerp(p2, t);
        let mid = half_start.lerp(half_end, t);
        (Self([p0, half_start, mid]), Self([mid, half_end, p2]))
    }

    fn reverse(&self) -> Self {
        let Self([p0, p1, p2]) = *self;
        Self([p2, p1, p0])
    }

    fn coefficients(&self) -> [Point; 4] {
        let Self([p0, p1, p2]) = *self;
        [
            Point::default(),
            p0 - 2.0 * p1 + p2,
            2.0 * (p1 - p0),
            p0,
        ]
    }

    fn fast_bbox(&self, init: Option<Rect>) -> Rect {
        let Self([p0, p1, p2]) = *self;
        Rect::from_corners(p0, p2).union_point(p1).union_opt(init)
    }

    /// Closest point is a root of `(curve(t) - point) . curve'(t) = 0`, a cubic
    fn distance_to(&self, point: Point, _tolerance: Scalar) -> Scalar {
        let [_, a, b, c] = self.coefficients();
        let c = c - point;
        let ends = self.start().dist(point).min(self.end().dist(point));
        polynomial_roots(
            2.0 * a.dot(a),
            3.0 * a.dot(b),
            b.dot(b) + 2.0 * a.dot(c),
            b.dot(c),
        )
        .filter(|t| (0.0..=1.0).contains(t))
        .map(|t| self.at(t).dist(point))
        .fold(ends, Scalar::min)
    }
}

// -----------------------------------------------------------------------------
// Cubic bezier curve
// -----------------------------------------------------------------------------

/// Cubic bezier curve
///
/// Polynomial form:
/// `(1 - t) ^ 3 * p0 + 3 * (1 - t) ^ 2 * t * p1 + 3 * (1 - t) * t ^ 2 * p2 + t ^ 3 * p3`
#[derive(Clone, Copy, PartialEq)]
pub struct Cubic(pub [Point; 4]);

impl fmt::Debug for Cubic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Cubic([p0, p1, p2, p3]) = self;
        write!(f, "Cubic {:?} {:?} {:?} {:?}", p0, p1, p2, p3)
    }
}

impl Cubic {
    pub fn new(
        p0: impl Into<Point>,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> Self {
        Self([p0.into(), p1.into(), p2.into(), p3.into()])
    }

    pub fn points(&self) -> [Point; 4] {
        self.0
    }

    /// Tangent lines at the start and at the end, skipping coincident control points
    pub fn ends(&self) -> (Line, Line) {
        let ps = self.points();
        let start = (0..3).find(|i| !ps[*i].is_close_to(ps[i + 1])).unwrap_or(0);
        let end = (1..4).rev().find(|i| !ps[*i].is_close_to(ps[i - 1])).unwrap_or(3);
        (
            Line::new(ps[start], ps[start + 1]),
            Line::new(ps[end - 1], ps[end]),
        )
    }
}

impl Curve for Cubic {
    fn start(&self) -> Point {
        self.0[0]
    }

    fn end(&self) -> Point {
        self.0[3]
    }

    fn transform(&self, tr: Transform) -> Self {
        let Cubic([p0, p1, p2, p3]) = self;
        Self([tr.apply(*p0), tr.apply(*p1), tr.apply(*p2), tr.apply(*p3)])
    }

    fn at_with_deriv(&self, t: Scalar) -> (Point, Point) {
        let Self([p0, p1, p2, p3]) = *self;
        let (a, b, c) = (p0.lerp(p1, t), p1.lerp(p2, t), p2.lerp(p3, t));
        let (d, e) = (a.lerp(b, t), b.lerp(c, t));
        (d.lerp(e, t), 3.0 * (e - d))
    }

    fn split_at(&self, t: Scalar) -> (Self, Self) {
        let Self([p0, p1, p2, p3]) = *self;
        let (a, b, c) = (p0.lerp(p1, t), p1.lerp(p2, t), p2.lerp(p3, t));
        let (d, e) = (a.lerp(b, t), b.lerp(c, t));
        let mid = d.lerp(e, t);
        (Self([p0, a, d, mid]), Self([mid, e, c, p3]))
    }

    fn reverse(&self) -> Self {
        let Self([p0, p1, p2, p3]) = *self;
        Self([p3, p2, p1, p0])
    }

    fn coefficients(&self) -> [Point; 4] {
        let Self([p0, p1, p2, p3]) = *self;
        [
            -1.0 * p0 + 3.0 * p1 - 3.0 * p2 + p3,
            3.0 * p0 - 6.0 * p1 + 3.0 * p2,
            -3.0 * p0 + 3.0 * p1,
            p0,
        ]
    }

    fn fast_bbox(&self, init: Option<Rect>) -> Rect {
        let Self([p0, p1, p2, p3]) = *self;
        Rect::from_corners(p0, p3)
            .union_point(p1)
            .union_point(p2)
            .union_opt(init)
    }
}

// -----------------------------------------------------------------------------
// Segment
// -----------------------------------------------------------------------------

/// `Segment` is an enum of either `Line`, `Quad` or `Cubic`
#[derive(Clone, Copy, PartialEq)]
pub enum Segment {
    Line(Line),
    Quad(Quad),
    Cubic(Cubic),
}

impl Segment {
    /// Tangent lines at the start and at the end
    pub fn ends(&self) -> (Line, Line) {
        match self {
            Segment::Line(line) => line.ends(),
            Segment::Quad(quad) => quad.ends(),
            Segment::Cubic(cubic) => cubic.ends(),
        }
    }

    /// All control points are within `EPSILON_SQRT` of each other
    pub fn is_degenerate(&self) -> bool {
        let bbox = self.fast_bbox(None);
        bbox.width() < EPSILON_SQRT && bbox.height() < EPSILON_SQRT
    }

    /// Convert to line if it is a line variant of the segment
    pub fn to_line(&self) -> Option<Line> {
        match self {
            Segment::Line(line) => Some(*line),
            _ => None,
        }
    }
}

impl fmt::Debug for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Line(line) => line.fmt(f),
            Segment::Quad(quad) => quad.fmt(f),
            Segment::Cubic(cubic) => cubic.fmt(f),
        }
    }
}

impl Curve for Segment {
    fn start(&self) -> Point {
        match self {
            Segment::Line(line) => line.start(),
            Segment::Quad(quad) => quad.start(),
            Segment::Cubic(cubic) => cubic.start(),
        }
    }

    fn end(&self) -> Point {
        match self {
            Segment::Line(line) => line.end(),
            Segment::Quad(quad) => quad.end(),
            Segment::Cubic(cubic) => cubic.end(),
        }
    }

    fn transform(&self, tr: Transform) -> Self {
        match self {
            Segment::Line(line) => line.transform(tr).into(),
            Segment::Quad(quad) => quad.transform(tr).into(),
            Segment::Cubic(cubic) => cubic.transform(tr).into(),
        }
    }

    fn at_with_deriv(&self, t: Scalar) -> (Point, Point) {
        match self {
            Segment::Line(line) => line.at_with_deriv(t),
            Segment::Quad(quad) => quad.at_with_deriv(t),
            Segment::Cubic(cubic) => cubic.at_with_deriv(t),
        }
    }

    fn split_at(&self, t: Scalar) -> (Self, Self) {
        match self {
            Segment::Line(line) => {
                let (l0, l1) = line.split_at(t);
                (l0.into(), l1.into())
            }
            Segment::Quad(quad) => {
                let (q0, q1) = quad.split_at(t);
                (q0.into(), q1.into())
            }
            Segment::Cubic(cubic) => {
                let (c0, c1) = cubic.split_at(t);
                (c0.into(), c1.into())
            }
        }
    }

    fn reverse(&self) -> Self {
        match self {
            Segment::Line(line) => line.reverse().into(),
            Segment::Quad(quad) => quad.reverse().into(),
            Segment::Cubic(cubic) => cubic.reverse().into(),
        }
    }

    fn coefficients(&self) -> [Point; 4] {
        match self {
            Segment::Line(line) => line.coefficients(),
            Segment::Quad(quad) => quad.coefficients(),
            Segment::Cubic(cubic) => cubic.coefficients(),
        }
    }

    fn fast_bbox(&self, init: Option<Rect>) -> Rect {
        match self {
            Segment::Line(line) => line.fast_bbox(init),
            Segment::Quad(quad) => quad.fast_bbox(init),
            Segment::Cubic(cubic) => cubic.fast_bbox(init),
        }
    }

    fn intersections(&self, line: Line) -> CurveIntersections {
        match self {
            Segment::Line(this) => this.intersections(line),
            Segment::Quad(quad) => quad.intersections(line),
            Segment::Cubic(cubic) => cubic.intersections(line),
        }
    }

    fn deviations_from_linearity(&self) -> (Scalar, Scalar) {
        match self {
            Segment::Line(line) => line.deviations_from_linearity(),
            Segment::Quad(quad) => quad.deviations_from_linearity(),
            Segment::Cubic(cubic) => cubic.deviations_from_linearity(),
        }
    }

    fn distance_to(&self, point: Point, tolerance: Scalar) -> Scalar {
        match self {
            Segment::Line(line) => line.distance_to(point, tolerance),
            Segment::Quad(quad) => quad.distance_to(point, tolerance),
            Segment::Cubic(cubic) => cubic.distance_to(point, tolerance),
        }
    }
}

impl From<Line> for Segment {
    fn from(line: Line) -> Self {
        Self::Line(line)
    }
}

impl From<Quad> for Segment {
    fn from(quad: Quad) -> Self {
        Self::Quad(quad)
    }
}

impl From<Cubic> for Segment {
    fn from(cubic: Cubic) -> Self {
        Self::Cubic(cubic)
    }
}
