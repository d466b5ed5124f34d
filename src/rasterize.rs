//! Accumulated-crossing scan conversion
//!
//! Every pixel of the affected region is divided into `N x N` sub-samples. Each line
//! of the flattened path adds its crossing direction to the first sample of every
//! sample row it crosses that lies to the right of the crossing, a prefix sum over
//! the row then gives crossing count of the ray from `-inf` to each sample center.
use crate::{
    Error, FillRule, Line, OffsetError, Path, Point, Rect, Scalar, Size, StrokeStyle, Transform,
};
use std::fmt;

/// Default flattening tolerance in device pixels
pub const DEFAULT_LINEARITY: Scalar = 0.05;

/// Number of sub-samples along each axis of a pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "usize", into = "usize"))]
pub enum SubSampleResolution {
    /// Single sample at the pixel center, no anti-aliasing
    #[default]
    One,
    Three,
    Five,
}

impl SubSampleResolution {
    pub fn samples(self) -> usize {
        match self {
            Self::One => 1,
            Self::Three => 3,
            Self::Five => 5,
        }
    }

    /// Offsets of sample centers inside a pixel along one axis
    pub fn offsets(self) -> impl Iterator<Item = Scalar> {
        let samples = self.samples();
        (0..samples).map(move |index| (index as Scalar + 0.5) / samples as Scalar)
    }
}

impl TryFrom<usize> for SubSampleResolution {
    type Error = Error;

    fn try_from(samples: usize) -> Result<Self, Self::Error> {
        match samples {
            1 => Ok(Self::One),
            3 => Ok(Self::Three),
            5 => Ok(Self::Five),
            _ => Err(Error::InvalidOptions(format!(
                "unsupported sub-sample resolution: {samples}"
            ))),
        }
    }
}

impl From<SubSampleResolution> for usize {
    fn from(resolution: SubSampleResolution) -> Self {
        resolution.samples()
    }
}

/// Iterator over sub-sample cells crossed by a line
///
/// Yields `(column, row, direction)` for every sample row whose center `y` lies in
/// `[min_y, max_y)` of the line. Column is the first sample with center strictly to
/// the right of the crossing, crossings left of the grid are moved to column zero and
/// crossings right of the grid are skipped. Horizontal lines yield nothing.
pub struct SubPixelCrossings {
    start: Point,
    dxdy: Scalar,
    direction: i32,
    origin: Point,
    scale: Scalar,
    columns: usize,
    row: usize,
    row_end: usize,
}

impl SubPixelCrossings {
    /// Crossings of the line with a grid of `columns x rows` samples
    ///
    /// `origin` is the device position of the grid top left corner, and `scale` is
    /// the number of samples per device pixel.
    pub fn new(
        line: Line,
        origin: Point,
        scale: usize,
        columns: usize,
        rows: usize,
        fill_rule: FillRule,
    ) -> Self {
        let Line([p0, p1]) = line;
        let scale = scale as Scalar;
        let (direction, start, end) = match fill_rule {
            FillRule::WindingNumber if p1.y() < p0.y() => (-1, p1, p0),
            _ if p1.y() < p0.y() => (1, p1, p0),
            _ => (1, p0, p1),
        };
        let mut crossings = Self {
            start,
            dxdy: 0.0,
            direction,
            origin,
            scale,
            columns,
            row: 0,
            row_end: 0,
        };
        if start.y() == end.y() || !start.is_finite() || !end.is_finite() {
            return crossings;
        }
        crossings.dxdy = (end.x() - start.x()) / (end.y() - start.y());
        // float to int casts saturate, negative values become zero
        let first = ((start.y() - origin.y()) * scale - 0.5).ceil().max(0.0);
        let last = ((end.y() - origin.y()) * scale - 0.5).ceil().max(0.0);
        crossings.row = first as usize;
        crossings.row_end = (last as usize).min(rows);
        crossings
    }
}

impl Iterator for SubPixelCrossings {
    type Item = (usize, usize, i32);

    fn next(&mut self) -> Option<Self::Item> {
        while self.row < self.row_end {
            let row = self.row;
            self.row += 1;
            let y = self.origin.y() + (row as Scalar + 0.5) / self.scale;
            let x = self.start.x() + (y - self.start.y()) * self.dxdy;
            let column = (((x - self.origin.x()) * self.scale - 0.5).floor() + 1.0).max(0.0);
            if column >= self.columns as Scalar {
                continue;
            }
            return Some((column as usize, row, self.direction));
        }
        None
    }
}

/// Per-sample crossing counters of a pixel region
#[derive(Clone, PartialEq)]
pub struct CrossingGrid {
    origin: Point,
    resolution: SubSampleResolution,
    columns: usize,
    rows: usize,
    cells: Vec<i32>,
}

impl fmt::Debug for CrossingGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns.max(1)) {
            for cell in row {
                write!(f, "{:>3}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl CrossingGrid {
    /// Grid covering integer pixel `region`
    pub fn new(region: Rect, resolution: SubSampleResolution) -> Self {
        let samples = resolution.samples();
        let columns = region.width().max(0.0) as usize * samples;
        let rows = region.height().max(0.0) as usize * samples;
        Self {
            origin: region.origin,
            resolution,
            columns,
            rows,
            cells: vec![0; columns * rows],
        }
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn get(&self, column: usize, row: usize) -> Option<i32> {
        if column >= self.columns {
            return None;
        }
        self.cells.get(row * self.columns + column).copied()
    }

    /// Record crossings of the line, direction of each crossing is defined by the rule
    pub fn accumulate(&mut self, line: Line, fill_rule: FillRule) {
        let crossings = SubPixelCrossings::new(
            line,
            self.origin,
            self.resolution.samples(),
            self.columns,
            self.rows,
            fill_rule,
        );
        for (column, row, direction) in crossings {
            self.cells[row * self.columns + column] += direction;
        }
    }

    /// Replace every cell with the sum of crossings to the left of its sample center
    pub fn integrate(&mut self) {
        if self.columns == 0 {
            return;
        }
        for row in self.cells.chunks_mut(self.columns) {
            let mut acc = 0;
            for cell in row.iter_mut() {
                acc += *cell;
                *cell = acc;
            }
        }
    }

    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|cell| *cell = 0);
    }
}

/// Sub-sample coverage of a pixel region
#[derive(Clone, PartialEq)]
pub struct Coverage {
    region: Rect,
    x: usize,
    y: usize,
    width: usize,
    height: usize,
    resolution: SubSampleResolution,
    inside: Vec<bool>,
}

impl fmt::Debug for Coverage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Coverage {:?} x{}", self.region, self.resolution.samples())?;
        for y in self.y..self.y + self.height {
            for x in self.x..self.x + self.width {
                write!(f, "{:>3}", self.inside_count(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl Coverage {
    fn new(region: Rect, resolution: SubSampleResolution, inside: Vec<bool>) -> Self {
        Self {
            region,
            x: region.min_x() as usize,
            y: region.min_y() as usize,
            width: region.width() as usize,
            height: region.height() as usize,
            resolution,
            inside,
        }
    }

    /// Affected pixel region in device coordinates
    pub fn region(&self) -> Rect {
        self.region
    }

    pub fn resolution(&self) -> SubSampleResolution {
        self.resolution
    }

    /// Number of inside sub-samples of the device pixel
    pub fn inside_count(&self, x: usize, y: usize) -> usize {
        self.sample_indices(x, y)
            .filter(|(index, _)| self.inside[*index])
            .count()
    }

    /// Fraction of inside sub-samples of the device pixel
    pub fn pixel_coverage(&self, x: usize, y: usize) -> Scalar {
        let samples = self.resolution.samples();
        self.inside_count(x, y) as Scalar / (samples * samples) as Scalar
    }

    /// Device positions of inside sub-sample centers of the pixel
    pub fn inside_samples(&self, x: usize, y: usize) -> impl Iterator<Item = Point> + '_ {
        self.sample_indices(x, y)
            .filter(|(index, _)| self.inside[*index])
            .map(|(_, point)| point)
    }

    /// Touched pixels as `(x, y, inside_count)`, rows go top to bottom
    pub fn pixels(&self) -> impl Iterator<Item = (usize, usize, usize)> + '_ {
        (self.y..self.y + self.height)
            .flat_map(move |y| (self.x..self.x + self.width).map(move |x| (x, y)))
            .filter_map(|(x, y)| {
                let count = self.inside_count(x, y);
                (count != 0).then_some((x, y, count))
            })
    }

    /// No sample is inside
    pub fn is_empty(&self) -> bool {
        !self.inside.iter().any(|inside| *inside)
    }

    /// Sample indices and device positions of the pixel, empty if outside of the region
    fn sample_indices(&self, x: usize, y: usize) -> impl Iterator<Item = (usize, Point)> + '_ {
        let samples = self.resolution.samples();
        let columns = self.width * samples;
        let in_region = (self.x..self.x + self.width).contains(&x)
            && (self.y..self.y + self.height).contains(&y);
        let (px, py) = if in_region {
            (x - self.x, y - self.y)
        } else {
            (0, 0)
        };
        let count = if in_region { samples } else { 0 };
        (0..count).flat_map(move |sy| {
            (0..count).map(move |sx| {
                let column = px * samples + sx;
                let row = py * samples + sy;
                let point = Point::new(
                    x as Scalar + (sx as Scalar + 0.5) / samples as Scalar,
                    y as Scalar + (sy as Scalar + 0.5) / samples as Scalar,
                );
                (row * columns + column, point)
            })
        })
    }
}

/// Integer pixel region affected by the bounding box, `None` if it is empty
///
/// Pixels are addressed with unsigned coordinates, the region never extends
/// into negative device coordinates.
fn affected_region(bbox: Rect, bounds: Rect) -> Option<Rect> {
    let bounds = bounds.rounded_out();
    let bounds = Rect::from_corners(
        (bounds.min_x().max(0.0), bounds.min_y().max(0.0)),
        (bounds.max_x().max(0.0), bounds.max_y().max(0.0)),
    );
    let region = bbox.rounded_out().intersection(bounds)?;
    (!region.is_empty()).then_some(region)
}

/// Scan converter producing sub-sample coverage of paths
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rasterizer {
    pub resolution: SubSampleResolution,
    /// Flattening tolerance in device pixels
    pub linearity: Scalar,
}

impl Default for Rasterizer {
    fn default() -> Self {
        Self {
            resolution: SubSampleResolution::default(),
            linearity: DEFAULT_LINEARITY,
        }
    }
}

impl Rasterizer {
    pub fn new(resolution: SubSampleResolution, linearity: Scalar) -> Self {
        Self {
            resolution,
            linearity,
        }
    }

    /// Coverage of the path filled with the rule
    ///
    /// Path is transformed into device space and flattened, region is the path
    /// bounding box rounded out to whole pixels and clipped by `bounds`. Returns
    /// `None` if the region is empty.
    pub fn fill(
        &self,
        path: &Path,
        tr: Transform,
        fill_rule: FillRule,
        bounds: Rect,
    ) -> Option<Coverage> {
        let path = path.transformed(tr).flattened(self.linearity);
        let region = affected_region(path.bbox()?, bounds)?;
        tracing::debug!(?region, ?fill_rule, samples = self.resolution.samples(), "fill region");

        let mut grid = CrossingGrid::new(region, self.resolution);
        let inside = match fill_rule {
            FillRule::NonZero => {
                // union of subpaths, each resolved with even-odd rule
                let mut counts = vec![0i32; grid.cells.len()];
                for subpath in path.subpaths() {
                    grid.clear();
                    for line in subpath.fill_lines() {
                        grid.accumulate(line, FillRule::EvenOdd);
                    }
                    grid.integrate();
                    for (count, cell) in counts.iter_mut().zip(grid.cells.iter()) {
                        *count += cell & 1;
                    }
                }
                counts.into_iter().map(|count| fill_rule.contains(count)).collect()
            }
            _ => {
                for line in path.subpaths().iter().flat_map(|subpath| subpath.fill_lines()) {
                    grid.accumulate(line, fill_rule);
                }
                grid.integrate();
                grid.cells.iter().map(|cell| fill_rule.contains(*cell)).collect()
            }
        };
        Some(Coverage::new(region, self.resolution, inside))
    }

    /// Coverage of the stroke, rasterized as the fill of its outline
    pub fn stroke(
        &self,
        path: &Path,
        tr: Transform,
        style: StrokeStyle,
        bounds: Rect,
    ) -> Result<Option<Coverage>, OffsetError> {
        let outline = path.stroke(style)?;
        Ok(self.fill(&outline, tr, FillRule::WindingNumber, bounds))
    }

    /// Coverage of the stroke computed by testing distance from each sub-sample
    /// (mapped back into path space) to the path
    ///
    /// Joins and caps are always round. Returns `None` if the transformation is not
    /// invertible or the region is empty.
    pub fn stroke_direct(
        &self,
        path: &Path,
        tr: Transform,
        width: Scalar,
        bounds: Rect,
    ) -> Option<Coverage> {
        let inverse = tr.invert()?;
        let distance = width / 2.0;
        let bbox = path.fast_bbox()?.outset(distance).transform(tr);
        let region = affected_region(bbox, bounds)?;
        tracing::debug!(?region, width, "direct stroke region");

        let samples = self.resolution.samples();
        let columns = region.width() as usize * samples;
        let rows = region.height() as usize * samples;
        let step = 1.0 / samples as Scalar;
        let mut inside = Vec::with_capacity(columns * rows);
        for row in 0..rows {
            for column in 0..columns {
                let sample = region.origin
                    + Point::new((column as Scalar + 0.5) * step, (row as Scalar + 0.5) * step);
                inside.push(path.is_point_within(inverse.apply(sample), distance));
            }
        }
        Some(Coverage::new(region, self.resolution, inside))
    }
}

/// Rectangle covering the whole image of the given size
pub fn image_bounds(width: usize, height: usize) -> Rect {
    Rect::new(Point::new(0.0, 0.0), Size::new(width as Scalar, height as Scalar))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Curve, LineCap, SubPath, assert_approx_eq, path::tests::quad_circle};

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn nested_squares(same_direction: bool) -> Path {
        let outer = SubPath::rect(Rect::new((1.0, 1.0), Size::new(8.0, 8.0)));
        let inner = SubPath::rect(Rect::new((3.0, 3.0), Size::new(4.0, 4.0)));
        let inner = if same_direction { inner } else { inner.reverse() };
        Path::new(vec![outer, inner])
    }

    #[test]
    fn test_resolution() {
        assert_eq!(SubSampleResolution::default(), SubSampleResolution::One);
        let offsets: Vec<_> = SubSampleResolution::Five.offsets().collect();
        assert_eq!(offsets.len(), 5);
        assert_approx_eq!(offsets[0], 0.1);
        assert_approx_eq!(offsets[4], 0.9);
        assert_eq!(SubSampleResolution::try_from(3).unwrap(), SubSampleResolution::Three);
        assert!(SubSampleResolution::try_from(4).is_err());
    }

    #[test]
    fn test_sub_pixel_crossings() {
        let origin = Point::new(0.0, 0.0);
        let vertical = Line::new((0.5, 0.0), (0.5, 2.0));
        let result: Vec<_> =
            SubPixelCrossings::new(vertical, origin, 1, 2, 2, FillRule::EvenOdd).collect();
        assert_eq!(result, vec![(1, 0, 1), (1, 1, 1)]);

        let result: Vec<_> =
            SubPixelCrossings::new(vertical.reverse(), origin, 1, 2, 2, FillRule::WindingNumber)
                .collect();
        assert_eq!(result, vec![(1, 0, -1), (1, 1, -1)]);

        // left of the grid, right of the grid, horizontal
        let left = Line::new((-5.0, 0.0), (-5.0, 1.0));
        let result: Vec<_> =
            SubPixelCrossings::new(left, origin, 1, 2, 2, FillRule::EvenOdd).collect();
        assert_eq!(result, vec![(0, 0, 1)]);
        let right = Line::new((3.0, 0.0), (3.0, 2.0));
        assert_eq!(SubPixelCrossings::new(right, origin, 1, 2, 2, FillRule::EvenOdd).count(), 0);
        let horizontal = Line::new((0.0, 0.5), (2.0, 0.5));
        assert_eq!(
            SubPixelCrossings::new(horizontal, origin, 1, 2, 2, FillRule::EvenOdd).count(),
            0
        );

        // vertex shared by two lines exactly at the sample row is counted once
        let l0 = Line::new((0.2, 0.0), (0.2, 0.5));
        let l1 = Line::new((0.2, 0.5), (0.2, 1.0));
        let count = SubPixelCrossings::new(l0, origin, 1, 1, 1, FillRule::EvenOdd).count()
            + SubPixelCrossings::new(l1, origin, 1, 1, 1, FillRule::EvenOdd).count();
        assert_eq!(count, 1);

        // sub-samples of a diagonal line
        let diagonal = Line::new((0.1, 0.0), (1.1, 1.0));
        let result: Vec<_> =
            SubPixelCrossings::new(diagonal, origin, 3, 3, 3, FillRule::EvenOdd).collect();
        assert_eq!(result, vec![(1, 0, 1), (2, 1, 1)]);
    }

    #[test]
    fn test_crossing_grid() {
        let region = Rect::new((0.0, 0.0), Size::new(4.0, 1.0));
        let mut grid = CrossingGrid::new(region, SubSampleResolution::One);
        grid.accumulate(Line::new((1.2, 0.0), (1.2, 1.0)), FillRule::WindingNumber);
        grid.accumulate(Line::new((2.7, 1.0), (2.7, 0.0)), FillRule::WindingNumber);
        assert_eq!(grid.get(1, 0), Some(1));
        assert_eq!(grid.get(3, 0), Some(-1));
        grid.integrate();
        let row: Vec<_> = (0..4).filter_map(|column| grid.get(column, 0)).collect();
        assert_eq!(row, vec![0, 1, 1, 0]);
        grid.clear();
        assert_eq!(grid.get(1, 0), Some(0));
        assert_eq!(grid.get(4, 0), None);
    }

    #[test]
    fn test_fill_matches_containment() {
        init_tracing();
        let path = quad_circle();
        let bounds = image_bounds(8, 8);
        let coverage = Rasterizer::default()
            .fill(&path, Transform::identity(), FillRule::EvenOdd, bounds)
            .unwrap();
        for y in 0..8 {
            for x in 0..8 {
                let center = Point::new(x as Scalar + 0.5, y as Scalar + 0.5);
                let expected = path.contains(center, FillRule::EvenOdd);
                assert_eq!(coverage.pixel_coverage(x, y) > 0.0, expected, "{x} {y}");
            }
        }
        assert_eq!(coverage.pixel_coverage(4, 4), 1.0);
        assert_eq!(coverage.pixel_coverage(0, 0), 0.0);
    }

    #[test]
    fn test_fill_rules() {
        let bounds = image_bounds(10, 10);
        let rasterizer = Rasterizer::default();
        for same_direction in [true, false] {
            let path = nested_squares(same_direction);
            for rule in [FillRule::EvenOdd, FillRule::NonZero, FillRule::WindingNumber] {
                let coverage = rasterizer
                    .fill(&path, Transform::identity(), rule, bounds)
                    .unwrap();
                for y in 0..10 {
                    for x in 0..10 {
                        let center = Point::new(x as Scalar + 0.5, y as Scalar + 0.5);
                        assert_eq!(
                            coverage.inside_count(x, y) == 1,
                            path.contains(center, rule),
                            "{x} {y} {rule:?}"
                        );
                    }
                }
            }
        }
        let coverage = rasterizer
            .fill(&nested_squares(false), Transform::identity(), FillRule::WindingNumber, bounds)
            .unwrap();
        assert_eq!(coverage.inside_count(5, 5), 0);
        assert_eq!(coverage.inside_count(2, 5), 1);
    }

    #[test]
    fn test_coverage_monotonicity() {
        let path = Path::rect(Rect::from_corners((1.25, 1.35), (5.65, 4.55)));
        let bounds = image_bounds(8, 8);
        let touched = |resolution| {
            let coverage = Rasterizer::new(resolution, DEFAULT_LINEARITY)
                .fill(&path, Transform::identity(), FillRule::EvenOdd, bounds)
                .unwrap();
            coverage
                .pixels()
                .map(|(x, y, _)| (x, y))
                .collect::<Vec<_>>()
        };
        let one = touched(SubSampleResolution::One);
        assert_eq!(one.len(), 5 * 4);
        assert_eq!(one, touched(SubSampleResolution::Three));
        assert_eq!(one, touched(SubSampleResolution::Five));
    }

    #[test]
    fn test_antialiasing() {
        let path = Path::rect(Rect::from_corners((0.0, 0.0), (2.4, 2.0)));
        let coverage = Rasterizer::new(SubSampleResolution::Five, DEFAULT_LINEARITY)
            .fill(&path, Transform::identity(), FillRule::EvenOdd, image_bounds(4, 4))
            .unwrap();
        assert_approx_eq!(coverage.pixel_coverage(0, 0), 1.0);
        assert_approx_eq!(coverage.pixel_coverage(2, 1), 0.4);
        assert_approx_eq!(coverage.pixel_coverage(3, 1), 0.0);
        let samples: Vec<_> = coverage.inside_samples(2, 0).collect();
        assert_eq!(samples.len(), 10);
        assert!(samples.iter().all(|sample| sample.x() < 2.4));
        assert_eq!(coverage.region(), Rect::from_corners((0.0, 0.0), (3.0, 2.0)));
    }

    #[test]
    fn test_determinism_and_clipping() {
        let path = Path::circle((5.0, 5.0), 4.0);
        let rasterizer = Rasterizer::new(SubSampleResolution::Three, DEFAULT_LINEARITY);
        let tr = Transform::new_rotate(0.3);
        let c0 = rasterizer.fill(&path, tr, FillRule::NonZero, image_bounds(10, 10));
        let c1 = rasterizer.fill(&path, tr, FillRule::NonZero, image_bounds(10, 10));
        assert!(c0.is_some());
        assert_eq!(c0, c1);

        // clipped by bounds
        let coverage = rasterizer
            .fill(&path, Transform::new_translate(-5.0, 0.0), FillRule::EvenOdd, image_bounds(10, 10))
            .unwrap();
        assert_approx_eq!(coverage.region().min_x(), 0.0);
        assert_approx_eq!(coverage.region().max_x(), 4.0);

        // completely outside
        let outside = rasterizer.fill(
            &path,
            Transform::new_translate(20.0, 0.0),
            FillRule::EvenOdd,
            image_bounds(10, 10),
        );
        assert!(outside.is_none());
        assert!(rasterizer
            .fill(&Path::empty(), tr, FillRule::EvenOdd, image_bounds(10, 10))
            .is_none());
    }

    #[test]
    fn test_negative_bounds() {
        let rasterizer = Rasterizer::new(SubSampleResolution::Three, DEFAULT_LINEARITY);
        let bounds = Rect::from_corners((-4.0, -4.0), (4.0, 4.0));
        let square = Path::rect(Rect::from_corners((-2.0, -2.0), (2.0, 2.0)));
        let coverage = rasterizer
            .fill(&square, Transform::identity(), FillRule::EvenOdd, bounds)
            .unwrap();
        assert_eq!(coverage.region(), Rect::from_corners((0.0, 0.0), (2.0, 2.0)));
        assert_eq!(coverage.pixels().count(), 4);
        for (x, y, count) in coverage.pixels() {
            assert_eq!(count, 9, "{x} {y}");
        }
        assert_approx_eq!(coverage.pixel_coverage(1, 1), 1.0);
        assert!(coverage
            .inside_samples(0, 0)
            .all(|sample| (0.0..1.0).contains(&sample.x()) && (0.0..1.0).contains(&sample.y())));

        // partially covered pixels keep their place
        let triangle = {
            let mut path = Path::empty();
            path.move_to((-2.0, -2.0)).add_line((4.0, -2.0)).add_line((-2.0, 4.0)).close();
            path
        };
        let coverage = rasterizer
            .fill(&triangle, Transform::identity(), FillRule::EvenOdd, bounds)
            .unwrap();
        assert_eq!(coverage.region(), Rect::from_corners((0.0, 0.0), (4.0, 4.0)));
        assert_eq!(coverage.inside_count(0, 0), 9);
        assert_eq!(coverage.inside_count(1, 1), 0);
        assert_eq!(coverage.inside_count(3, 3), 0);

        let direct = rasterizer
            .stroke_direct(&square, Transform::identity(), 2.0, bounds)
            .unwrap();
        assert_eq!(direct.region(), Rect::from_corners((0.0, 0.0), (3.0, 3.0)));
        assert_eq!(direct.inside_count(0, 0), 0);
        assert_eq!(direct.inside_count(2, 0), 9);

        // entirely in negative coordinates
        let outside = Path::rect(Rect::from_corners((-3.0, -3.0), (-1.0, -1.0)));
        assert!(rasterizer
            .fill(&outside, Transform::identity(), FillRule::EvenOdd, bounds)
            .is_none());
    }

    #[test]
    fn test_stroke() {
        let mut path = Path::empty();
        path.move_to((1.0, 4.0)).add_line((9.0, 4.0));
        let bounds = image_bounds(10, 10);
        let rasterizer = Rasterizer::default();
        let style = StrokeStyle::new(2.0).with_cap(LineCap::Butt);
        let coverage = rasterizer
            .stroke(&path, Transform::identity(), style, bounds)
            .unwrap()
            .unwrap();
        let direct = rasterizer
            .stroke_direct(&path, Transform::identity(), 2.0, bounds)
            .unwrap();
        for y in 0..10 {
            for x in 0..10 {
                let expected = (3..5).contains(&y) && (1..9).contains(&x);
                assert_eq!(coverage.inside_count(x, y) == 1, expected, "{x} {y}");
                if (1..9).contains(&x) {
                    assert_eq!(direct.inside_count(x, y) == 1, expected, "{x} {y}");
                }
            }
        }
        // direct strokes have round caps
        assert_eq!(direct.inside_count(0, 3), 1);
        assert_eq!(direct.inside_count(0, 2), 0);

        // scaled transform scales stroke width
        let coverage = rasterizer
            .stroke(&path, Transform::new_scale(1.0, 2.0), style, image_bounds(10, 12))
            .unwrap()
            .unwrap();
        assert_eq!(coverage.pixels().filter(|(x, _, _)| *x == 4).count(), 4);

        assert!(rasterizer
            .stroke_direct(&path, Transform::new_scale(0.0, 1.0), 2.0, bounds)
            .is_none());
    }
}
