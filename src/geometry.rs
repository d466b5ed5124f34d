use crate::{Line, clamp};
use std::{
    fmt,
    ops::{Add, Div, Mul, Neg, Sub},
};

pub type Scalar = f64;
pub const EPSILON: f64 = f64::EPSILON;
pub const EPSILON_SQRT: f64 = 1.490_116_119_384_765_6e-8;
pub const PI: f64 = std::f64::consts::PI;

/// Format floats in a compact way
pub fn scalar_fmt(f: &mut fmt::Formatter<'_>, value: Scalar) -> fmt::Result {
    let value_abs = value.abs();
    if value_abs.fract() < EPSILON {
        write!(f, "{}", value.trunc() as i64)
    } else if value_abs > 9999.0 || value_abs <= 0.0001 {
        write!(f, "{:.3e}", value)
    } else {
        let ten: Scalar = 10.0;
        let round = ten.powi(6 - (value_abs.trunc() + 1.0).log10().ceil() as i32);
        write!(f, "{}", (value * round).round() / round)
    }
}

/// Value representing a 2D point or vector.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Point(pub [Scalar; 2]);

impl fmt::Debug for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Point([x, y]) = self;
        scalar_fmt(f, *x)?;
        write!(f, ",")?;
        scalar_fmt(f, *y)
    }
}

impl Point {
    #[inline]
    pub const fn new(x: Scalar, y: Scalar) -> Self {
        Self([x, y])
    }

    /// Get `x` component of the point
    #[inline]
    pub fn x(self) -> Scalar {
        self.0[0]
    }

    /// Get `y` component of the point
    #[inline]
    pub fn y(self) -> Scalar {
        self.0[1]
    }

    /// Get length of the vector (distance from the origin)
    pub fn length(self) -> Scalar {
        let Self([x, y]) = self;
        x.hypot(y)
    }

    /// Distance between two points
    pub fn dist(self, other: Self) -> Scalar {
        (self - other).length()
    }

    /// Dot product between two vectors
    pub fn dot(self, other: Self) -> Scalar {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        x0 * x1 + y0 * y1
    }

    /// Cross product magnitude between two vectors
    pub fn cross(self, other: Self) -> Scalar {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        x0 * y1 - y0 * x1
    }

    /// Left hand side normal (not a unit sized), `y` axis points down
    pub fn normal(self) -> Point {
        let Self([x, y]) = self;
        Self([y, -x])
    }

    /// Convert vector to a unit size vector, if length is not zero
    pub fn normalize(self) -> Option<Point> {
        let Self([x, y]) = self;
        let length = self.length();
        if length < EPSILON || !length.is_finite() {
            None
        } else {
            Some(Self([x / length, y / length]))
        }
    }

    /// Linear interpolation between `self` at `t = 0` and `other` at `t = 1`
    pub fn lerp(self, other: Self, t: Scalar) -> Point {
        self + t * (other - self)
    }

    /// Cosine of the angle (from self to the other) between to vectors
    pub fn cos_between(self, other: Self) -> Option<Scalar> {
        let lengths = self.length() * other.length();
        if lengths < EPSILON {
            None
        } else {
            Some(clamp(self.dot(other) / lengths, -1.0, 1.0))
        }
    }

    /// Both components are finite numbers
    pub fn is_finite(self) -> bool {
        let Self([x, y]) = self;
        x.is_finite() && y.is_finite()
    }

    /// Determine if self is close to the other within the margin of error (EPSILON)
    pub fn is_close_to(self, other: Point) -> bool {
        let Self([x0, y0]) = self;
        let Self([x1, y1]) = other;
        (x0 - x1).abs() < EPSILON && (y0 - y1).abs() < EPSILON
    }
}

impl From<(Scalar, Scalar)> for Point {
    #[inline]
    fn from(xy: (Scalar, Scalar)) -> Self {
        Self([xy.0, xy.1])
    }
}

impl Mul<Point> for Scalar {
    type Output = Point;

    #[inline]
    fn mul(self, other: Point) -> Self::Output {
        let Point([x, y]) = other;
        Point([self * x, self * y])
    }
}

impl Mul<Scalar> for Point {
    type Output = Point;

    #[inline]
    fn mul(self, rhs: Scalar) -> Self::Output {
        rhs * self
    }
}

impl Div<Scalar> for Point {
    type Output = Point;

    #[inline]
    fn div(self, rhs: Scalar) -> Self::Output {
        let Point([x, y]) = self;
        Point([x / rhs, y / rhs])
    }
}

impl Add for Point {
    type Output = Point;

    #[inline]
    fn add(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 + x1, y0 + y1])
    }
}

impl Sub for Point {
    type Output = Point;

    #[inline]
    fn sub(self, other: Point) -> Self::Output {
        let Point([x0, y0]) = self;
        let Point([x1, y1]) = other;
        Point([x0 - x1, y0 - y1])
    }
}

impl Neg for Point {
    type Output = Point;

    #[inline]
    fn neg(self) -> Self::Output {
        let Point([x, y]) = self;
        Point([-x, -y])
    }
}

/// Width and height pair, not required to be positive
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: Scalar,
    pub height: Scalar,
}

impl Size {
    pub const fn new(width: Scalar, height: Scalar) -> Self {
        Self { width, height }
    }

    pub fn area(&self) -> Scalar {
        self.width * self.height
    }
}

impl fmt::Debug for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        scalar_fmt(f, self.width)?;
        write!(f, "x")?;
        scalar_fmt(f, self.height)
    }
}

/// Axis aligned rectangle
///
/// Size is not required to be positive, degenerate rectangles are valid values and
/// each operation handles them.
#[derive(Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub fn new(origin: impl Into<Point>, size: Size) -> Self {
        Self {
            origin: origin.into(),
            size,
        }
    }

    /// Rectangle spanned by two corners
    pub fn from_corners(p0: impl Into<Point>, p1: impl Into<Point>) -> Self {
        let Point([x0, y0]) = p0.into();
        let Point([x1, y1]) = p1.into();
        let (x0, x1) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
        let (y0, y1) = if y0 <= y1 { (y0, y1) } else { (y1, y0) };
        Self {
            origin: Point([x0, y0]),
            size: Size::new(x1 - x0, y1 - y0),
        }
    }

    /// Rectangle of the given size centered at the point
    pub fn from_center(center: Point, size: Size) -> Self {
        let Point([x, y]) = center;
        Self {
            origin: Point([x - size.width / 2.0, y - size.height / 2.0]),
            size,
        }
    }

    /// Smallest rectangle containing all points, `None` if there are no points
    pub fn from_points(points: impl IntoIterator<Item = Point>) -> Option<Self> {
        let mut points = points.into_iter();
        let first = points.next()?;
        Some(points.fold(Self::new(first, Size::default()), |rect, point| {
            rect.union_point(point)
        }))
    }

    #[inline]
    pub fn min_x(&self) -> Scalar {
        self.origin.x()
    }

    #[inline]
    pub fn min_y(&self) -> Scalar {
        self.origin.y()
    }

    #[inline]
    pub fn max_x(&self) -> Scalar {
        self.origin.x() + self.size.width
    }

    #[inline]
    pub fn max_y(&self) -> Scalar {
        self.origin.y() + self.size.height
    }

    #[inline]
    pub fn width(&self) -> Scalar {
        self.size.width
    }

    #[inline]
    pub fn height(&self) -> Scalar {
        self.size.height
    }

    pub fn center(&self) -> Point {
        self.origin + Point::new(self.size.width, self.size.height) / 2.0
    }

    /// Rectangle has zero or negative area
    pub fn is_empty(&self) -> bool {
        self.size.width <= 0.0 || self.size.height <= 0.0
    }

    /// Corners in the order: origin, top right, bottom right, bottom left
    pub fn corners(&self) -> [Point; 4] {
        [
            self.origin,
            Point::new(self.max_x(), self.min_y()),
            Point::new(self.max_x(), self.max_y()),
            Point::new(self.min_x(), self.max_y()),
        ]
    }

    /// Grow rectangle by `margin` in every direction
    pub fn outset(&self, margin: Scalar) -> Self {
        Self {
            origin: self.origin - Point::new(margin, margin),
            size: Size::new(
                self.size.width + 2.0 * margin,
                self.size.height + 2.0 * margin,
            ),
        }
    }

    /// Smallest rectangle with integer sides containing this one
    pub fn rounded_out(&self) -> Self {
        let x0 = self.min_x().min(self.max_x()).floor();
        let y0 = self.min_y().min(self.max_y()).floor();
        let x1 = self.min_x().max(self.max_x()).ceil();
        let y1 = self.min_y().max(self.max_y()).ceil();
        Self::from_corners((x0, y0), (x1, y1))
    }

    /// Point is strictly inside, points on the edge are outside
    pub fn contains(&self, point: Point) -> bool {
        let Point([x, y]) = point;
        self.min_x() < x && x < self.max_x() && self.min_y() < y && y < self.max_y()
    }

    /// Extend rectangle so it would contain the point
    pub fn union_point(&self, point: Point) -> Self {
        let Point([x, y]) = point;
        Self::from_corners(
            (self.min_x().min(x), self.min_y().min(y)),
            (self.max_x().max(x), self.max_y().max(y)),
        )
    }

    /// Rectangle spanning both rectangles
    pub fn union(&self, other: Rect) -> Self {
        self.union_point(other.origin)
            .union_point(Point::new(other.max_x(), other.max_y()))
    }

    /// Union with optional rectangle
    pub fn union_opt(&self, other: Option<Rect>) -> Self {
        match other {
            Some(other) => self.union(other),
            None => *self,
        }
    }

    /// Common part of two rectangles, touching rectangles produce zero sized one
    pub fn intersection(&self, other: Rect) -> Option<Rect> {
        let (x_min, x_max) =
            range_intersect(self.min_x(), self.max_x(), other.min_x(), other.max_x())?;
        let (y_min, y_max) =
            range_intersect(self.min_y(), self.max_y(), other.min_y(), other.max_y())?;
        Some(Rect::from_corners((x_min, y_min), (x_max, y_max)))
    }

    /// Bounding rectangle of the transformed corners
    pub fn transform(&self, tr: Transform) -> Rect {
        let [p0, p1, p2, p3] = self.corners();
        Rect::new(tr.apply(p0), Size::default())
            .union_point(tr.apply(p1))
            .union_point(tr.apply(p2))
            .union_point(tr.apply(p3))
    }
}

/// Find intersection of two ranges
fn range_intersect(
    r0_min: Scalar,
    r0_max: Scalar,
    r1_min: Scalar,
    r1_max: Scalar,
) -> Option<(Scalar, Scalar)> {
    if r0_min > r1_max || r1_min > r0_max {
        None
    } else {
        Some((r0_min.max(r1_min), r0_max.min(r1_max)))
    }
}

impl fmt::Debug for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rect x=")?;
        scalar_fmt(f, self.min_x())?;
        write!(f, ", y=")?;
        scalar_fmt(f, self.min_y())?;
        write!(f, ", w=")?;
        scalar_fmt(f, self.width())?;
        write!(f, ", h=")?;
        scalar_fmt(f, self.height())
    }
}

/// 2D affine transformation
///
/// Stored as `[a, b, dx, c, d, dy]` and applied to a point as
/// `(a * x + b * y + dx, c * x + d * y + dy)`, semantically a matrix:
/// ┌          ┐
/// │ a  b  dx │
/// │ c  d  dy │
/// │ 0  0   1 │
/// └          ┘
#[derive(Clone, Copy, PartialEq)]
pub struct Transform([Scalar; 6]);

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self([a, b, dx, c, d, dy]) = self;
        write!(f, "matrix(")?;
        for (index, value) in [a, c, b, d, dx, dy].into_iter().enumerate() {
            if index != 0 {
                write!(f, " ")?;
            }
            scalar_fmt(f, *value)?;
        }
        write!(f, ")")
    }
}

impl Transform {
    pub const fn new(a: Scalar, b: Scalar, c: Scalar, d: Scalar, dx: Scalar, dy: Scalar) -> Self {
        Self([a, b, dx, c, d, dy])
    }

    pub const fn identity() -> Self {
        Self([1.0, 0.0, 0.0, 0.0, 1.0, 0.0])
    }

    pub fn new_translate(tx: Scalar, ty: Scalar) -> Self {
        Self([1.0, 0.0, tx, 0.0, 1.0, ty])
    }

    pub fn new_scale(sx: Scalar, sy: Scalar) -> Self {
        Self([sx, 0.0, 0.0, 0.0, sy, 0.0])
    }

    /// Rotation around the origin, quarter turn maps `(1, 0)` to `(0, 1)`
    pub fn new_rotate(angle: Scalar) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self([cos, -sin, 0.0, sin, cos, 0.0])
    }

    /// Skew by angles `ax` along `x` and `ay` along `y`
    pub fn new_skew(ax: Scalar, ay: Scalar) -> Self {
        Self([1.0, ax.tan(), 0.0, ay.tan(), 1.0, 0.0])
    }

    /// Apply this transformation to a point
    pub fn apply(&self, point: Point) -> Point {
        let Self([a, b, dx, c, d, dy]) = self;
        let Point([x, y]) = point;
        Point([x * a + y * b + dx, x * c + y * d + dy])
    }

    pub fn determinant(&self) -> Scalar {
        let Self([a, b, _, c, d, _]) = self;
        a * d - b * c
    }

    /// Find the inverse transformation, `None` if determinant is zero
    pub fn invert(&self) -> Option<Self> {
        // inv([[M, v], [0, 1]]) = [[inv(M), - inv(M) * v], [0, 1]]
        let Self([a, b, dx, c, d, dy]) = self;
        let det = self.determinant();
        if det == 0.0 || !det.is_finite() {
            return None;
        }
        let o00 = d / det;
        let o01 = -b / det;
        let o10 = -c / det;
        let o11 = a / det;
        let o02 = -o00 * dx - o01 * dy;
        let o12 = -o10 * dx - o11 * dy;
        Some(Self([o00, o01, o02, o10, o11, o12]))
    }

    /// Apply translation by `[tx, ty]` before self
    pub fn translate(&self, tx: Scalar, ty: Scalar) -> Self {
        self.matmul(Self::new_translate(tx, ty))
    }

    /// Apply scale transformation by `[sx, sy]` before self
    pub fn scale(&self, sx: Scalar, sy: Scalar) -> Self {
        self.matmul(Self::new_scale(sx, sy))
    }

    /// Apply rotation by `angle` around the origin before self
    pub fn rotate(&self, angle: Scalar) -> Self {
        self.matmul(Self::new_rotate(angle))
    }

    /// Apply skew transformation by `[ax, ay]` before self
    pub fn skew(&self, ax: Scalar, ay: Scalar) -> Self {
        self.matmul(Self::new_skew(ax, ay))
    }

    /// Multiply transformations in matrix form
    pub fn matmul(&self, other: Transform) -> Self {
        let Self([s00, s01, s02, s10, s11, s12]) = self;
        let Self([o00, o01, o02, o10, o11, o12]) = other;
        Self([
            s00 * o00 + s01 * o10,
            s00 * o01 + s01 * o11,
            s00 * o02 + s01 * o12 + s02,
            s10 * o00 + s11 * o10,
            s10 * o01 + s11 * o11,
            s10 * o02 + s11 * o12 + s12,
        ])
    }

    /// Transformation that applies self first and then `other`
    ///
    /// `x.concatenate(y).apply(p) == y.apply(x.apply(p))`
    pub fn concatenate(&self, other: Transform) -> Self {
        other.matmul(*self)
    }

    /// Find transformation which makes line horizontal with origin at (0, 0).
    pub fn make_horizontal(line: Line) -> Transform {
        let [p0, p1] = line.points();
        let Some(cos_sin) = (p1 - p0).normalize() else {
            return Transform::new_translate(-p0.x(), -p0.y());
        };
        let Point([cos, sin]) = cos_sin;
        Self([cos, sin, 0.0, -sin, cos, 0.0]).translate(-p0.x(), -p0.y())
    }
}

impl Mul<Transform> for Transform {
    type Output = Transform;

    fn mul(self, other: Transform) -> Self::Output {
        self.matmul(other)
    }
}

/// Triangle defined by its three vertices
#[derive(Clone, Copy, PartialEq)]
pub struct Triangle(pub [Point; 3]);

impl fmt::Debug for Triangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Self([p0, p1, p2]) = self;
        write!(f, "Triangle {:?} {:?} {:?}", p0, p1, p2)
    }
}

impl Triangle {
    pub fn new(p0: impl Into<Point>, p1: impl Into<Point>, p2: impl Into<Point>) -> Self {
        Self([p0.into(), p1.into(), p2.into()])
    }

    /// Signed area, positive when vertices go clockwise on screen (`y` down)
    pub fn signed_area(&self) -> Scalar {
        let Self([p0, p1, p2]) = *self;
        (p1 - p0).cross(p2 - p0) / 2.0
    }

    pub fn area(&self) -> Scalar {
        self.signed_area().abs()
    }

    pub fn is_right_handed(&self) -> bool {
        self.signed_area() > 0.0
    }

    /// Sides as lines `p0 -> p1`, `p1 -> p2`, `p2 -> p0`
    pub fn sides(&self) -> [Line; 3] {
        let Self([p0, p1, p2]) = *self;
        [Line::new(p0, p1), Line::new(p1, p2), Line::new(p2, p0)]
    }

    /// Point is inside or on the boundary
    pub fn contains(&self, point: Point) -> bool {
        let [s0, s1, s2] = self.sides().map(|side| {
            let [p0, p1] = side.points();
            (p1 - p0).cross(point - p0)
        });
        let has_negative = s0 < 0.0 || s1 < 0.0 || s2 < 0.0;
        let has_positive = s0 > 0.0 || s1 > 0.0 || s2 > 0.0;
        !(has_negative && has_positive)
    }

    pub fn bbox(&self) -> Rect {
        let Self([p0, p1, p2]) = *self;
        Rect::from_corners(p0, p1).union_point(p2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Curve, assert_approx_eq};

    #[test]
    fn test_transform() {
        let tr = Transform::identity()
            .translate(1.0, 2.0)
            .rotate(PI / 3.0)
            .skew(2.0, 3.0)
            .scale(3.0, 2.0);
        let inv = tr.invert().unwrap();
        let p0 = Point::new(1.0, 1.0);

        let p1 = tr.apply(p0);
        assert_approx_eq!(p1.x(), -1.04674389, 1e-6);
        assert_approx_eq!(p1.y(), 1.59965634, 1e-6);

        let p2 = inv.apply(p1);
        assert_approx_eq!(p2.x(), 1.0, 1e-6);
        assert_approx_eq!(p2.y(), 1.0, 1e-6);

        let l0 = Line::new((1.0, 0.0), (-3.0, 3.0));
        let l1 = l0.transform(Transform::make_horizontal(l0));
        assert_eq!(l1.start(), Point::new(0.0, 0.0));
        assert_approx_eq!(l1.end().x(), 5.0);
        assert_approx_eq!(l1.end().y(), 0.0, 1e-6);
    }

    #[test]
    fn test_transform_round_trip() {
        let transforms = [
            Transform::new(2.0, 0.5, -1.0, 3.0, 10.0, -7.0),
            Transform::new_rotate(0.7).translate(3.0, -2.0),
            Transform::new_skew(0.3, -0.2).scale(0.01, 400.0),
            Transform::new_translate(-1e3, 1e3).rotate(2.5),
        ];
        let points = [(0.0, 0.0), (1.0, -1.0), (123.5, 7.25), (-1e3, 2e3)];
        for tr in transforms {
            let inv = tr.invert().unwrap();
            for point in points {
                let point = Point::from(point);
                let back = inv.apply(tr.apply(point));
                assert_approx_eq!(back.x(), point.x(), 1e-4);
                assert_approx_eq!(back.y(), point.y(), 1e-4);
            }
        }
        assert!(Transform::new_scale(0.0, 1.0).invert().is_none());
        assert!(Transform::new(1.0, 2.0, 2.0, 4.0, 0.0, 0.0).invert().is_none());
    }

    #[test]
    fn test_transform_concatenate() {
        let p = Point::new(1.0, 1.0);
        let tr = Transform::new_translate(7.0, 9.0).concatenate(Transform::new_scale(3.0, 4.0));
        assert!(tr.apply(p).is_close_to(Point::new(24.0, 40.0)));

        let tr = Transform::new_translate(3.0, 4.0).concatenate(Transform::new_rotate(PI / 2.0));
        let p1 = tr.apply(Point::new(0.0, 0.0));
        assert_approx_eq!(p1.x(), -4.0, 1e-9);
        assert_approx_eq!(p1.y(), 3.0, 1e-9);

        let tr = Transform::new_rotate(PI / 2.0).concatenate(Transform::new_translate(2.0, 7.0));
        let p2 = tr.apply(Point::new(3.0, 4.0));
        assert_approx_eq!(p2.x(), -2.0, 1e-9);
        assert_approx_eq!(p2.y(), 10.0, 1e-9);

        let p3 = Transform::new_rotate(PI / 2.0).apply(Point::new(1.0, 0.0));
        assert_approx_eq!(p3.x(), 0.0, 1e-9);
        assert_approx_eq!(p3.y(), 1.0, 1e-9);

        let t0 = Transform::new(1.5, -0.25, 0.5, 2.0, 3.0, -1.0);
        let t1 = Transform::new_rotate(1.1).scale(2.0, 0.5);
        for point in [(0.0, 0.0), (3.0, -4.0), (-10.5, 0.25)] {
            let point = Point::from(point);
            let p0 = t0.concatenate(t1).apply(point);
            let p1 = t1.apply(t0.apply(point));
            assert_approx_eq!(p0.x(), p1.x(), 1e-9);
            assert_approx_eq!(p0.y(), p1.y(), 1e-9);
        }
    }

    #[test]
    fn test_rect() {
        let rect = Rect::from_center(Point::new(5.0, 5.0), Size::new(4.0, 2.0));
        assert_eq!(rect.origin, Point::new(3.0, 4.0));
        assert_eq!(
            rect.corners(),
            [
                Point::new(3.0, 4.0),
                Point::new(7.0, 4.0),
                Point::new(7.0, 6.0),
                Point::new(3.0, 6.0),
            ]
        );
        assert!(rect.contains(Point::new(5.0, 5.0)));
        assert!(!rect.contains(Point::new(3.0, 5.0)));
        assert!(!rect.contains(Point::new(8.0, 5.0)));

        let outset = rect.outset(1.0);
        assert_eq!(outset, Rect::from_corners((2.0, 3.0), (8.0, 7.0)));

        let rounded = Rect::new((0.5, -1.2), Size::new(2.0, 1.0)).rounded_out();
        assert_eq!(rounded, Rect::from_corners((0.0, -2.0), (3.0, 0.0)));
        // degenerate rectangle with negative size
        let rounded = Rect::new((2.5, 2.5), Size::new(-1.0, 0.0)).rounded_out();
        assert_eq!(rounded, Rect::from_corners((1.0, 2.0), (3.0, 3.0)));

        let other = Rect::from_corners((6.0, 5.0), (10.0, 10.0));
        assert_eq!(
            rect.intersection(other),
            Some(Rect::from_corners((6.0, 5.0), (7.0, 6.0)))
        );
        assert_eq!(rect.union(other), Rect::from_corners((3.0, 4.0), (10.0, 10.0)));
        let touching = Rect::from_corners((7.0, 0.0), (9.0, 4.0));
        assert!(rect.intersection(touching).is_some_and(|r| r.is_empty()));
        assert_eq!(rect.intersection(Rect::from_corners((20.0, 0.0), (30.0, 1.0))), None);

        let bbox = Rect::from_points([(1.0, 5.0), (-1.0, 2.0), (3.0, 3.0)].map(Point::from));
        assert_eq!(bbox, Some(Rect::from_corners((-1.0, 2.0), (3.0, 5.0))));
        assert_eq!(Rect::from_points(Vec::new()), None);
        assert_approx_eq!(bbox.map_or(0.0, |b| b.size.area()), 12.0);
    }

    #[test]
    fn test_triangle() {
        let tri = Triangle::new((0.0, 0.0), (4.0, 0.0), (0.0, 3.0));
        assert_approx_eq!(tri.area(), 6.0);
        assert!(tri.is_right_handed());
        assert!(!Triangle::new((0.0, 0.0), (0.0, 3.0), (4.0, 0.0)).is_right_handed());
        assert!(tri.contains(Point::new(1.0, 1.0)));
        assert!(tri.contains(Point::new(2.0, 0.0)));
        assert!(!tri.contains(Point::new(3.0, 3.0)));
        assert_eq!(tri.bbox(), Rect::from_corners((0.0, 0.0), (4.0, 3.0)));
        let length: Scalar = tri.sides().iter().map(|side| side.length()).sum();
        assert_approx_eq!(length, 12.0);
    }
}
