use crate::{
    Cubic, Curve, Line, OffsetError, Point, Quad, Rect, Scalar, Segment, Size,
    StrokeStyle, Transform, stroke::stroke_subpath,
};
use std::fmt;

/// Control point offset of the cubic quarter-circle approximation, `(4/3)*tan(pi/8)`
pub const KAPPA: Scalar = 0.5522847498;

/// Policy mapping ray-crossing count at a point to inside/outside
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FillRule {
    /// Inside if number of crossings is odd
    #[default]
    EvenOdd,
    /// Inside if any subpath contains the point under even-odd rule
    NonZero,
    /// Inside if signed crossing count (by segment direction) is not zero
    WindingNumber,
}

impl FillRule {
    /// Resolve crossing count computed for this rule
    pub fn contains(self, count: i32) -> bool {
        match self {
            FillRule::EvenOdd => count % 2 != 0,
            FillRule::NonZero | FillRule::WindingNumber => count != 0,
        }
    }
}

/// Contiguous chain of segments sharing a single start point
///
/// Subpath without segments is a point-only subpath. If `closed` is set, an implicit
/// line from the end back to the start participates in fills and hit testing.
#[derive(Clone, PartialEq)]
pub struct SubPath {
    start: Point,
    segments: Vec<Segment>,
    closed: bool,
}

impl fmt::Debug for SubPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Move {:?}", self.start)?;
        for segment in self.segments.iter() {
            writeln!(f, "{:?}", segment)?;
        }
        if self.closed {
            writeln!(f, "Close")
        } else {
            writeln!(f, "End")
        }
    }
}

impl SubPath {
    /// Point-only subpath
    pub fn new(start: impl Into<Point>) -> Self {
        Self {
            start: start.into(),
            segments: Vec::new(),
            closed: false,
        }
    }

    /// Create subpath from segments, `None` if there are no segments or they
    /// are not connected
    pub fn from_segments(segments: Vec<Segment>, closed: bool) -> Option<Self> {
        let start = segments.first()?.start();
        let connected = segments
            .windows(2)
            .all(|pair| pair[0].end().is_close_to(pair[1].start()));
        if !connected {
            return None;
        }
        Some(Self {
            start,
            segments,
            closed,
        })
    }

    /// Closed rectangle, corners are visited in `Rect::corners` order
    pub fn rect(rect: Rect) -> Self {
        let [p0, p1, p2, p3] = rect.corners();
        let mut subpath = Self::new(p0);
        subpath.add_line(p1).add_line(p2).add_line(p3).close();
        subpath
    }

    /// Closed ellipse inscribed into the rectangle, made of four cubic curves
    pub fn ellipse(rect: Rect) -> Self {
        let center = rect.center();
        let rx = Point::new(rect.width() / 2.0, 0.0);
        let ry = Point::new(0.0, rect.height() / 2.0);
        let (kx, ky) = (KAPPA * rx, KAPPA * ry);
        let mut subpath = Self::new(center + rx);
        subpath
            .add_cubic(center + rx + ky, center + kx + ry, center + ry)
            .add_cubic(center - kx + ry, center - rx + ky, center - rx)
            .add_cubic(center - rx - ky, center - kx - ry, center - ry)
            .add_cubic(center + kx - ry, center + rx - ky, center + rx)
            .close();
        subpath
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.segments.last().map_or(self.start, |segment| segment.end())
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Subpath does not have any segments
    pub fn is_point(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn add_line(&mut self, p1: impl Into<Point>) -> &mut Self {
        let line = Line::new(self.end(), p1);
        self.segments.push(line.into());
        self
    }

    pub fn add_quad(&mut self, p1: impl Into<Point>, p2: impl Into<Point>) -> &mut Self {
        let quad = Quad::new(self.end(), p1, p2);
        self.segments.push(quad.into());
        self
    }

    pub fn add_cubic(
        &mut self,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> &mut Self {
        let cubic = Cubic::new(self.end(), p1, p2, p3);
        self.segments.push(cubic.into());
        self
    }

    /// Append segment, its start point is replaced by the current end
    pub fn add_segment(&mut self, segment: impl Into<Segment>) -> &mut Self {
        match segment.into() {
            Segment::Line(Line([_, p1])) => self.add_line(p1),
            Segment::Quad(Quad([_, p1, p2])) => self.add_quad(p1, p2),
            Segment::Cubic(Cubic([_, p1, p2, p3])) => self.add_cubic(p1, p2, p3),
        }
    }

    pub fn close(&mut self) -> &mut Self {
        self.closed = true;
        self
    }

    /// Implicit closing line, `None` if the end already coincides with the start
    fn closing_line(&self) -> Option<Line> {
        let (start, end) = (self.start, self.end());
        (!end.is_close_to(start)).then(|| Line::new(end, start))
    }

    /// Same subpath with the implicit closing line materialized as a segment
    pub fn by_explicitly_closing(&self) -> Self {
        let mut result = self.clone();
        if self.closed {
            result.segments.extend(self.closing_line().map(Segment::from));
        }
        result
    }

    /// Same subpath traversed from end to start
    pub fn reverse(&self) -> Self {
        Self {
            start: self.end(),
            segments: self.segments.iter().rev().map(Segment::reverse).collect(),
            closed: self.closed,
        }
    }

    /// Apply transformation to the subpath in place
    pub fn transform(&mut self, tr: Transform) {
        self.start = tr.apply(self.start);
        for segment in self.segments.iter_mut() {
            *segment = segment.transform(tr);
        }
    }

    /// Tight bounding box
    pub fn bbox(&self) -> Rect {
        let init = Rect::new(self.start, Size::default());
        self.segments
            .iter()
            .fold(init, |bbox, segment| segment.bbox(Some(bbox)))
    }

    /// Bounding box of all control points
    pub fn fast_bbox(&self) -> Rect {
        let init = Rect::new(self.start, Size::default());
        self.segments
            .iter()
            .fold(init, |bbox, segment| segment.fast_bbox(Some(bbox)))
    }

    /// Crossings of the ray ending at `point`, implicit closing edge is always
    /// included since fills always close subpaths.
    pub fn crossings(&self, point: Point, fill_rule: FillRule) -> i32 {
        let closing = Line::new(self.end(), self.start);
        self.segments
            .iter()
            .map(|segment| segment.crossings(point, fill_rule))
            .sum::<i32>()
            + closing.crossings(point, fill_rule)
    }

    /// Point containment with even-odd rule
    pub fn contains(&self, point: Point) -> bool {
        FillRule::EvenOdd.contains(self.crossings(point, FillRule::EvenOdd))
    }

    /// Whether point is within `distance` of any segment, closing edge is
    /// considered only for closed subpaths
    pub fn is_point_within(&self, point: Point, distance: Scalar) -> bool {
        let Point([x, y]) = point;
        let bbox = self.fast_bbox().outset(distance);
        if x < bbox.min_x() || x > bbox.max_x() || y < bbox.min_y() || y > bbox.max_y() {
            return false;
        }
        if self.is_point() {
            return self.start.dist(point) <= distance;
        }
        let tolerance = (distance * 0.01).max(1e-6);
        let closing = self.closing_line().filter(|_| self.closed);
        self.segments
            .iter()
            .copied()
            .chain(closing.map(Segment::from))
            .any(|segment| segment.distance_to(point, tolerance) <= distance)
    }

    /// Replace curves with chains of lines deviating no more than `linearity`
    pub fn flattened(&self, linearity: Scalar) -> Self {
        Self {
            start: self.start,
            segments: self
                .segments
                .iter()
                .flat_map(|segment| segment.flatten(linearity))
                .map(Segment::from)
                .collect(),
            closed: self.closed,
        }
    }

    /// Edges used by fills: segment chords and the implicit closing edge
    ///
    /// Exact for flattened subpaths.
    pub fn fill_lines(&self) -> impl Iterator<Item = Line> + '_ {
        self.segments
            .iter()
            .map(|segment| Line::new(segment.start(), segment.end()))
            .chain(self.closing_line())
    }
}

/// Ordered collection of subpaths treated as a single unit
#[derive(Clone, PartialEq, Default)]
pub struct Path {
    subpaths: Vec<SubPath>,
}

impl fmt::Debug for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.subpaths.is_empty() {
            write!(f, "Empty")?;
        } else {
            for subpath in self.subpaths.iter() {
                subpath.fmt(f)?
            }
        }
        Ok(())
    }
}

impl Path {
    /// Create path from the list of subpaths
    pub fn new(subpaths: Vec<SubPath>) -> Self {
        Self { subpaths }
    }

    pub fn empty() -> Self {
        Self {
            subpaths: Default::default(),
        }
    }

    /// Closed rectangle path
    pub fn rect(rect: Rect) -> Self {
        Self::new(vec![SubPath::rect(rect)])
    }

    /// Closed circle path
    pub fn circle(center: impl Into<Point>, radius: Scalar) -> Self {
        let rect = Rect::from_center(center.into(), Size::new(2.0 * radius, 2.0 * radius));
        Self::new(vec![SubPath::ellipse(rect)])
    }

    pub fn subpaths(&self) -> &[SubPath] {
        &self.subpaths
    }

    pub fn is_empty(&self) -> bool {
        self.subpaths.is_empty()
    }

    pub fn segments_count(&self) -> usize {
        self.subpaths
            .iter()
            .fold(0usize, |acc, subpath| acc + subpath.segments().len())
    }

    pub fn push_subpath(&mut self, subpath: SubPath) -> &mut Self {
        self.subpaths.push(subpath);
        self
    }

    /// Start new subpath at the point
    pub fn move_to(&mut self, p: impl Into<Point>) -> &mut Self {
        self.subpaths.push(SubPath::new(p));
        self
    }

    /// Add line to the last subpath
    pub fn add_line(&mut self, p1: impl Into<Point>) -> &mut Self {
        if let Some(subpath) = self.subpaths.last_mut() {
            subpath.add_line(p1);
        }
        self
    }

    /// Add quadratic bezier curve to the last subpath
    pub fn add_quad(&mut self, p1: impl Into<Point>, p2: impl Into<Point>) -> &mut Self {
        if let Some(subpath) = self.subpaths.last_mut() {
            subpath.add_quad(p1, p2);
        }
        self
    }

    /// Add cubic bezier curve to the last subpath
    pub fn add_cubic(
        &mut self,
        p1: impl Into<Point>,
        p2: impl Into<Point>,
        p3: impl Into<Point>,
    ) -> &mut Self {
        if let Some(subpath) = self.subpaths.last_mut() {
            subpath.add_cubic(p1, p2, p3);
        }
        self
    }

    /// Close the last subpath
    pub fn close(&mut self) -> &mut Self {
        if let Some(subpath) = self.subpaths.last_mut() {
            subpath.close();
        }
        self
    }

    /// Tight bounding box, `None` for an empty path
    pub fn bbox(&self) -> Option<Rect> {
        self.subpaths
            .iter()
            .fold(None, |bbox, subpath| Some(subpath.bbox().union_opt(bbox)))
    }

    /// Bounding box of all control points, `None` for an empty path
    pub fn fast_bbox(&self) -> Option<Rect> {
        self.subpaths
            .iter()
            .fold(None, |bbox, subpath| Some(subpath.fast_bbox().union_opt(bbox)))
    }

    /// Exact point containment test
    pub fn contains(&self, point: Point, fill_rule: FillRule) -> bool {
        let count = match fill_rule {
            FillRule::NonZero => self
                .subpaths
                .iter()
                .filter(|subpath| subpath.contains(point))
                .count() as i32,
            _ => self
                .subpaths
                .iter()
                .map(|subpath| subpath.crossings(point, fill_rule))
                .sum(),
        };
        fill_rule.contains(count)
    }

    /// Whether point is within `distance` of the path outline (round joins and caps)
    pub fn is_point_within(&self, point: Point, distance: Scalar) -> bool {
        self.subpaths
            .iter()
            .any(|subpath| subpath.is_point_within(point, distance))
    }

    /// Path with all curves replaced by lines
    pub fn flattened(&self, linearity: Scalar) -> Self {
        let path = Self::new(
            self.subpaths
                .iter()
                .map(|subpath| subpath.flattened(linearity))
                .collect(),
        );
        tracing::trace!(
            segments = self.segments_count(),
            lines = path.segments_count(),
            linearity,
            "flattened"
        );
        path
    }

    /// Path with implicit closing lines materialized
    pub fn by_explicitly_closing(&self) -> Self {
        Self::new(
            self.subpaths
                .iter()
                .map(SubPath::by_explicitly_closing)
                .collect(),
        )
    }

    /// Apply transformation to the path in place
    pub fn transform(&mut self, tr: Transform) {
        for subpath in self.subpaths.iter_mut() {
            subpath.transform(tr);
        }
    }

    /// Copy of the path with transformation applied
    pub fn transformed(&self, tr: Transform) -> Self {
        let mut path = self.clone();
        path.transform(tr);
        path
    }

    /// Outline of the stroke
    ///
    /// Resulting path covers stroked area when filled with [`FillRule::WindingNumber`].
    pub fn stroke(&self, style: StrokeStyle) -> Result<Path, OffsetError> {
        let mut subpaths = Vec::new();
        for subpath in self.subpaths.iter() {
            stroke_subpath(subpath, style, &mut subpaths)?;
        }
        Ok(Path::new(subpaths))
    }
}

impl IntoIterator for Path {
    type Item = SubPath;
    type IntoIter = <Vec<SubPath> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.subpaths.into_iter()
    }
}

impl<'a> IntoIterator for &'a Path {
    type Item = &'a SubPath;
    type IntoIter = <&'a Vec<SubPath> as IntoIterator>::IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        self.subpaths.iter()
    }
}

impl Extend<SubPath> for Path {
    fn extend<T: IntoIterator<Item = SubPath>>(&mut self, iter: T) {
        self.subpaths.extend(iter)
    }
}

impl FromIterator<SubPath> for Path {
    fn from_iter<T: IntoIterator<Item = SubPath>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
