//! Offset engine converting strokes into fill outlines
use crate::{Cubic, Curve, Line, Point, Quad, Rect, Scalar, Segment, Size, SubPath};

/// Offset pieces closer than this are considered connected
const JOIN_TOLERANCE: Scalar = 1e-9;

/// Sine of the angle below which two tangent legs are considered parallel
const PARALLEL_TOLERANCE: Scalar = 1e-9;

/// Shape of the open subpath ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LineCap {
    Butt,
    Square,
    #[default]
    Round,
}

/// Shape of the outer corner between two segments
///
/// `Round` is currently rendered as `Bevel`, `Miter` is not supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum LineJoin {
    Bevel,
    #[default]
    Round,
    Miter,
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct StrokeStyle {
    pub width: Scalar,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
        }
    }
}

impl StrokeStyle {
    pub fn new(width: Scalar) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn with_cap(self, line_cap: LineCap) -> Self {
        Self { line_cap, ..self }
    }

    pub fn with_join(self, line_join: LineJoin) -> Self {
        Self { line_join, ..self }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum OffsetError {
    #[error("offset tangent lines are parallel near {point:?}")]
    DegenerateTangent { point: Point },
    #[error("unsupported line join: {0:?}")]
    UnsupportedJoin(LineJoin),
}

/// Stroke outline of a single subpath, resulting subpaths are appended to `out`
///
/// Open subpaths produce one closed outline: left side offsets, end cap, right
/// side offsets, start cap. Closed subpaths produce two closed loops (left side
/// forward and right side backward) without caps.
pub(crate) fn stroke_subpath(
    subpath: &SubPath,
    style: StrokeStyle,
    out: &mut Vec<SubPath>,
) -> Result<(), OffsetError> {
    if style.line_join == LineJoin::Miter {
        return Err(OffsetError::UnsupportedJoin(style.line_join));
    }
    let distance = style.width / 2.0;
    let closed = subpath.by_explicitly_closing();
    let source = if subpath.is_closed() { &closed } else { subpath };
    let segments: Vec<Segment> = source
        .segments()
        .iter()
        .filter(|segment| !segment.is_degenerate())
        .copied()
        .collect();
    let (Some(first), Some(last)) = (segments.first(), segments.last()) else {
        out.extend(stroke_point(subpath.start(), style));
        return Ok(());
    };

    let left = offset_chain(segments.iter().copied(), distance)?;
    let right = offset_chain(segments.iter().rev().map(Segment::reverse), distance)?;
    let (Some(left_first), Some(right_first)) = (left.first(), right.first()) else {
        return Ok(());
    };

    if subpath.is_closed() {
        out.push(offset_loop(&left));
        out.push(offset_loop(&right));
    } else {
        let mut outline = SubPath::new(left_first.start());
        for piece in left.iter() {
            outline.add_segment(*piece);
        }
        let end_tangent = tangent(last.ends().1, last.end())?;
        stroke_cap(&mut outline, style, last.end(), end_tangent, right_first.start());
        for piece in right.iter() {
            outline.add_segment(*piece);
        }
        let start_tangent = tangent(first.ends().0, first.start())?;
        stroke_cap(
            &mut outline,
            style,
            first.start(),
            -start_tangent,
            left_first.start(),
        );
        outline.close();
        out.push(outline);
    }
    tracing::trace!(
        segments = segments.len(),
        left = left.len(),
        right = right.len(),
        closed = subpath.is_closed(),
        "stroked subpath"
    );
    Ok(())
}

/// Outline of a subpath without any non-degenerate segments
fn stroke_point(point: Point, style: StrokeStyle) -> Option<SubPath> {
    let rect = Rect::from_center(point, Size::new(style.width, style.width));
    match style.line_cap {
        LineCap::Butt => None,
        LineCap::Square => Some(SubPath::rect(rect)),
        LineCap::Round => Some(SubPath::ellipse(rect)),
    }
}

/// Left side offsets of connected segments with bevel joins between them
fn offset_chain(
    segments: impl Iterator<Item = Segment>,
    distance: Scalar,
) -> Result<Vec<Segment>, OffsetError> {
    let mut pieces = Vec::new();
    let mut offsets = Vec::new();
    for segment in segments {
        offsets.clear();
        segment.offset(distance, &mut offsets)?;
        for piece in offsets.iter() {
            bevel_join(&mut pieces, piece.start());
            pieces.push(*piece);
        }
    }
    Ok(pieces)
}

/// Connect the end of the chain to the point with a line, if they are apart
fn bevel_join(pieces: &mut Vec<Segment>, to: Point) {
    if let Some(last) = pieces.last() {
        let from = last.end();
        if from.dist(to) > JOIN_TOLERANCE {
            pieces.push(Line::new(from, to).into());
        }
    }
}

/// Closed loop of offset pieces including the wrap-around join
fn offset_loop(pieces: &[Segment]) -> SubPath {
    let start = pieces.first().map_or(Point::default(), |piece| piece.start());
    let mut result = SubPath::new(start);
    for piece in pieces {
        if result.end().dist(piece.start()) > JOIN_TOLERANCE {
            result.add_line(piece.start());
        }
        result.add_segment(*piece);
    }
    result.close();
    result
}

/// Append cap around `center` from the current end of the outline to `to`
///
/// `direction` is the unit tangent pointing away from the stroked subpath.
fn stroke_cap(outline: &mut SubPath, style: StrokeStyle, center: Point, direction: Point, to: Point) {
    let from = outline.end();
    let extent = (style.width / 2.0) * direction;
    match style.line_cap {
        LineCap::Butt => {
            outline.add_line(to);
        }
        LineCap::Square => {
            outline.add_line(from + extent).add_line(to + extent).add_line(to);
        }
        LineCap::Round => {
            // half circle approximated by two cubics through the tip
            let tip = center + extent;
            outline
                .add_cubic(from + extent / 2.0, tip + (from - center) / 2.0, tip)
                .add_cubic(tip + (to - center) / 2.0, to + extent / 2.0, to);
        }
    }
}

/// Unit direction of the tangent line
fn tangent(line: Line, point: Point) -> Result<Point, OffsetError> {
    line.direction()
        .normalize()
        .ok_or(OffsetError::DegenerateTangent { point })
}

/// Left side offset point (`y` axis points down)
fn offset_point(point: Point, tangent: Point, distance: Scalar) -> Point {
    point + distance * tangent.normal()
}

/// Intersection of two infinite lines used as offset control point legs
///
/// `fallback` is returned when either leg is degenerate or legs are collinear,
/// parallel legs that are apart cannot produce a control point.
fn leg_intersection(leg0: Line, leg1: Line, fallback: Point) -> Result<Point, OffsetError> {
    let (Some(u0), Some(u1)) = (leg0.direction().normalize(), leg1.direction().normalize())
    else {
        return Ok(fallback);
    };
    if u0.cross(u1).abs() < PARALLEL_TOLERANCE {
        let gap = u0.cross(leg1.start() - leg0.start()).abs();
        let scale = 1.0 + leg0.start().length().max(leg1.start().length());
        return if gap <= PARALLEL_TOLERANCE * scale {
            Ok(fallback)
        } else {
            Err(OffsetError::DegenerateTangent { point: fallback })
        };
    }
    match leg0.intersect(leg1) {
        Some((t, _)) => Ok(leg0.at(t)),
        None => Ok(fallback),
    }
}

impl Segment {
    /// Left side offset of the segment by `distance`
    ///
    /// Curves are split at extremities first, each piece without interior extremities
    /// is offset by moving its end points along normals and intersecting tangent legs.
    pub(crate) fn offset(&self, distance: Scalar, out: &mut Vec<Segment>) -> Result<(), OffsetError> {
        match self {
            Segment::Line(line) => {
                if let Some(direction) = line.direction().normalize() {
                    let shift = distance * direction.normal();
                    let Line([p0, p1]) = *line;
                    out.push(Line::new(p0 + shift, p1 + shift).into());
                }
            }
            Segment::Quad(quad) => {
                for piece in quad.split_at_extremities() {
                    if Segment::from(piece).is_degenerate() {
                        continue;
                    }
                    out.push(quad_offset(piece, distance)?.into());
                }
            }
            Segment::Cubic(cubic) => {
                for piece in cubic.split_at_extremities() {
                    if Segment::from(piece).is_degenerate() {
                        continue;
                    }
                    out.push(cubic_offset(piece, distance)?.into());
                }
            }
        }
        Ok(())
    }
}

/// Left side shift of a piece whose control points all lie on one line
///
/// Offset legs of such a piece can be antiparallel, so it is translated as a whole.
fn straight_shift(points: &[Point], distance: Scalar) -> Option<Point> {
    let (first, last) = (*points.first()?, *points.last()?);
    let direction = (last - first)
        .normalize()
        .or_else(|| points.iter().find_map(|point| (*point - first).normalize()))?;
    let scale = 1.0 + points.iter().fold(0.0, |acc: Scalar, point| acc.max(point.length()));
    points
        .iter()
        .all(|point| direction.cross(*point - first).abs() <= PARALLEL_TOLERANCE * scale)
        .then(|| distance * direction.normal())
}

fn quad_offset(quad: Quad, distance: Scalar) -> Result<Quad, OffsetError> {
    let Quad([p0, p1, p2]) = quad;
    if let Some(shift) = straight_shift(&quad.0, distance) {
        return Ok(Quad::new(p0 + shift, p1 + shift, p2 + shift));
    }
    let (start, end) = quad.ends();
    let n0 = distance * tangent(start, p0)?.normal();
    let n1 = distance * tangent(end, p2)?.normal();
    let leg0 = Line::new(p0 + n0, p1 + n0);
    let leg1 = Line::new(p2 + n1, p1 + n1);
    let control = leg_intersection(leg0, leg1, p1 + (n0 + n1) / 2.0)?;
    Ok(Quad::new(p0 + n0, control, p2 + n1))
}

fn cubic_offset(cubic: Cubic, distance: Scalar) -> Result<Cubic, OffsetError> {
    let Cubic([p0, p1, p2, p3]) = cubic;
    if let Some(shift) = straight_shift(&cubic.0, distance) {
        return Ok(Cubic::new(p0 + shift, p1 + shift, p2 + shift, p3 + shift));
    }
    let (start, end) = cubic.ends();
    let u0 = tangent(start, p0)?;
    let u1 = tangent(end, p3)?;
    let origin = offset_point(p0, u0, distance);
    let target = offset_point(p3, u1, distance);
    let c0_fallback = offset_point(p1, u0, distance);
    let c1_fallback = offset_point(p2, u1, distance);
    let Some(middle) = (p2 - p1).normalize() else {
        return Ok(Cubic::new(origin, c0_fallback, c1_fallback, target));
    };
    let middle = Line::new(
        offset_point(p1, middle, distance),
        offset_point(p2, middle, distance),
    );
    let c0 = leg_intersection(middle, Line::new(origin, c0_fallback), c0_fallback)?;
    let c1 = leg_intersection(middle, Line::new(c1_fallback, target), c1_fallback)?;
    Ok(Cubic::new(origin, c0, c1, target))
}
