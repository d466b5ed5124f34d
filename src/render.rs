//! Drawing surface combining a pixel buffer, a color space and a transform stack
use crate::{
    ColorSpace, Coverage, DEFAULT_LINEARITY, Error, FillRule, Image, ImageMut, Path, Point,
    Rasterizer, Scalar, StrokeStyle, SubSampleResolution, Transform, rasterize::image_bounds,
};

/// Source of colors for covered sub-samples
pub trait Shader<P> {
    /// Color at the point in path (pre-transform) coordinates
    fn color_at(&self, point: Point) -> P;
}

/// Shader producing the same color everywhere
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolidShader<P>(pub P);

impl<P: Copy> Shader<P> for SolidShader<P> {
    fn color_at(&self, _: Point) -> P {
        self.0
    }
}

impl<P, F> Shader<P> for F
where
    F: Fn(Point) -> P,
{
    fn color_at(&self, point: Point) -> P {
        self(point)
    }
}

/// How strokes are converted into coverage
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum StrokeMethod {
    /// Outline is built by the offset engine and filled
    #[default]
    Outline,
    /// Distance from every sub-sample to the path is tested, joins and caps are round
    Direct,
}

/// Canvas configuration
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct RenderOptions {
    /// Fill rule used when fill does not specify one
    pub fill_rule: FillRule,
    /// Stroke style used when stroke does not specify one
    pub stroke: StrokeStyle,
    pub antialiasing: SubSampleResolution,
    /// Flattening tolerance in device pixels
    pub linearity: Scalar,
    pub stroke_method: StrokeMethod,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fill_rule: FillRule::default(),
            stroke: StrokeStyle::default(),
            antialiasing: SubSampleResolution::default(),
            linearity: DEFAULT_LINEARITY,
            stroke_method: StrokeMethod::default(),
        }
    }
}

impl RenderOptions {
    /// Check numeric options
    pub fn validate(&self) -> Result<(), Error> {
        validate_linearity(self.linearity)?;
        validate_stroke(self.stroke)
    }

    /// Parse options from JSON, missing fields are filled from defaults
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

fn validate_linearity(linearity: Scalar) -> Result<(), Error> {
    if linearity.is_finite() && linearity > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidOptions(format!(
            "linearity must be positive: {}",
            linearity
        )))
    }
}

fn validate_stroke(style: StrokeStyle) -> Result<(), Error> {
    if style.width.is_finite() && style.width > 0.0 {
        Ok(())
    } else {
        Err(Error::InvalidOptions(format!(
            "stroke width must be positive: {}",
            style.width
        )))
    }
}

#[derive(Debug, Clone)]
pub struct FillOptions<S> {
    pub shader: S,
    /// Overrides [`RenderOptions::fill_rule`]
    pub fill_rule: Option<FillRule>,
}

impl<S> FillOptions<S> {
    pub fn new(shader: S) -> Self {
        Self {
            shader,
            fill_rule: None,
        }
    }

    pub fn with_fill_rule(self, fill_rule: FillRule) -> Self {
        Self {
            fill_rule: Some(fill_rule),
            ..self
        }
    }
}

#[derive(Debug, Clone)]
pub struct StrokeOptions<S> {
    pub shader: S,
    /// Overrides [`RenderOptions::stroke`]
    pub style: Option<StrokeStyle>,
}

impl<S> StrokeOptions<S> {
    pub fn new(shader: S) -> Self {
        Self {
            shader,
            style: None,
        }
    }

    pub fn with_style(self, style: StrokeStyle) -> Self {
        Self {
            style: Some(style),
            ..self
        }
    }
}

/// Drawing context over a mutable image
///
/// Keeps a stack of transformations, the top of the stack is the current
/// transformation from path (user) space to device (pixel) space.
pub struct Canvas<'a, I, C> {
    image: &'a mut I,
    color_space: C,
    transforms: Vec<Transform>,
    options: RenderOptions,
}

impl<'a, I, C> Canvas<'a, I, C>
where
    C: ColorSpace,
    I: ImageMut<Pixel = C::Sample>,
{
    pub fn new(image: &'a mut I, color_space: C) -> Self {
        Self {
            image,
            color_space,
            transforms: vec![Transform::identity()],
            options: RenderOptions::default(),
        }
    }

    /// Replace options, they are validated when drawing
    pub fn with_options(self, options: RenderOptions) -> Self {
        Self { options, ..self }
    }

    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: RenderOptions) {
        self.options = options;
    }

    pub fn image(&self) -> &I {
        &*self.image
    }

    pub fn color_space(&self) -> &C {
        &self.color_space
    }

    /// Current transformation
    pub fn transform(&self) -> Transform {
        self.transforms.last().copied().unwrap_or_default()
    }

    /// Replace current transformation
    pub fn set_transform(&mut self, tr: Transform) {
        if let Some(current) = self.transforms.last_mut() {
            *current = tr;
        }
    }

    /// Prepend transformation, it is applied in the current user space
    pub fn concat_transform(&mut self, tr: Transform) {
        if let Some(current) = self.transforms.last_mut() {
            *current = tr.concatenate(*current);
        }
    }

    /// Push copy of the current state
    pub fn save_state(&mut self) {
        let current = self.transform();
        self.transforms.push(current);
    }

    /// Pop state pushed by [`Canvas::save_state`], returns `false` for the base state
    pub fn restore_state(&mut self) -> bool {
        if self.transforms.len() > 1 {
            self.transforms.pop();
            true
        } else {
            false
        }
    }

    fn rasterizer(&self) -> Rasterizer {
        Rasterizer::new(self.options.antialiasing, self.options.linearity)
    }

    /// Current transformation with its inverse
    fn transform_pair(&self) -> Result<(Transform, Transform), Error> {
        let tr = self.transform();
        let inverse = tr.invert().ok_or(Error::NonInvertibleTransform {
            determinant: tr.determinant(),
        })?;
        Ok((tr, inverse))
    }

    pub fn fill_path<S>(&mut self, path: &Path, fill: &FillOptions<S>) -> Result<(), Error>
    where
        S: Shader<C::Sample>,
    {
        let span = tracing::debug_span!("[fill]");
        let _guard = span.enter();

        validate_linearity(self.options.linearity)?;
        let (tr, inverse) = self.transform_pair()?;
        let fill_rule = fill.fill_rule.unwrap_or(self.options.fill_rule);
        let bounds = image_bounds(self.image.width(), self.image.height());
        match self.rasterizer().fill(path, tr, fill_rule, bounds) {
            Some(coverage) => self.composite(&coverage, inverse, &fill.shader),
            None => tracing::debug!("nothing to fill"),
        }
        Ok(())
    }

    pub fn stroke_path<S>(&mut self, path: &Path, stroke: &StrokeOptions<S>) -> Result<(), Error>
    where
        S: Shader<C::Sample>,
    {
        let span = tracing::debug_span!("[stroke]");
        let _guard = span.enter();

        validate_linearity(self.options.linearity)?;
        let (tr, inverse) = self.transform_pair()?;
        let style = stroke.style.unwrap_or(self.options.stroke);
        validate_stroke(style)?;
        let bounds = image_bounds(self.image.width(), self.image.height());
        let rasterizer = self.rasterizer();
        let coverage = match self.options.stroke_method {
            StrokeMethod::Outline => rasterizer.stroke(path, tr, style, bounds)?,
            StrokeMethod::Direct => rasterizer.stroke_direct(path, tr, style.width, bounds),
        };
        match coverage {
            Some(coverage) => self.composite(&coverage, inverse, &stroke.shader),
            None => tracing::debug!("nothing to stroke"),
        }
        Ok(())
    }

    /// Fill and then stroke the path
    pub fn draw_path<F, S>(
        &mut self,
        path: &Path,
        fill: Option<&FillOptions<F>>,
        stroke: Option<&StrokeOptions<S>>,
    ) -> Result<(), Error>
    where
        F: Shader<C::Sample>,
        S: Shader<C::Sample>,
    {
        if let Some(fill) = fill {
            self.fill_path(path, fill)?;
        }
        if let Some(stroke) = stroke {
            self.stroke_path(path, stroke)?;
        }
        Ok(())
    }

    /// Blend shader colors of inside sub-samples over touched pixels
    fn composite<S>(&mut self, coverage: &Coverage, inverse: Transform, shader: &S)
    where
        S: Shader<C::Sample>,
    {
        let samples = coverage.resolution().samples();
        let weight = 1.0 / (samples * samples) as f32;
        let mut sources = Vec::with_capacity(samples * samples);
        for (x, y, _) in coverage.pixels() {
            sources.clear();
            sources.extend(
                coverage
                    .inside_samples(x, y)
                    .map(|sample| (shader.color_at(inverse.apply(sample)), weight)),
            );
            if let Some(pixel) = self.image.get_mut(x, y) {
                *pixel = self.color_space.composite(&sources, *pixel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ImageOwned, LineCap, LineJoin, OffsetError, RGBA, RGBAColorSpace, Rect,
        path::tests::quad_circle,
    };

    type Result<T> = std::result::Result<T, Error>;

    const BLACK: RGBA = RGBA::new(0, 0, 0, 255);
    const WHITE: RGBA = RGBA::new(255, 255, 255, 255);

    fn init_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }

    fn white_image(width: usize, height: usize) -> ImageOwned<RGBA> {
        ImageOwned::new_with(width, height, |_, _| WHITE)
    }

    #[test]
    fn test_fill_solid() -> Result<()> {
        init_tracing();
        let path = quad_circle();
        let mut image = white_image(8, 8);
        let mut canvas = Canvas::new(&mut image, RGBAColorSpace::new(false));
        let fill = FillOptions::new(SolidShader(BLACK)).with_fill_rule(FillRule::EvenOdd);
        canvas.fill_path(&path, &fill)?;
        for y in 0..8 {
            for x in 0..8 {
                let center = Point::new(x as Scalar + 0.5, y as Scalar + 0.5);
                let expected = if path.contains(center, FillRule::EvenOdd) {
                    BLACK
                } else {
                    WHITE
                };
                assert_eq!(image.get(x, y), Some(&expected), "{x} {y}");
            }
        }

        // same output on repeated render into a cleared image
        let mut other = white_image(8, 8);
        Canvas::new(&mut other, RGBAColorSpace::new(false)).fill_path(&path, &fill)?;
        assert_eq!(image, other);
        Ok(())
    }

    #[test]
    fn test_transform_stack() {
        let mut image = white_image(1, 1);
        let mut canvas = Canvas::new(&mut image, RGBAColorSpace::default());
        assert!(!canvas.restore_state());

        canvas.concat_transform(Transform::new_scale(2.0, 2.0));
        canvas.save_state();
        canvas.concat_transform(Transform::new_translate(1.0, 0.0));
        let p = canvas.transform().apply(Point::new(0.0, 0.0));
        assert!(p.is_close_to(Point::new(2.0, 0.0)));
        assert!(canvas.restore_state());
        let p = canvas.transform().apply(Point::new(1.0, 1.0));
        assert!(p.is_close_to(Point::new(2.0, 2.0)));
        assert!(!canvas.restore_state());

        canvas.set_transform(Transform::identity());
        assert_eq!(canvas.transform(), Transform::identity());
    }

    #[test]
    fn test_non_invertible() {
        let mut image = white_image(4, 4);
        let mut canvas = Canvas::new(&mut image, RGBAColorSpace::default());
        canvas.set_transform(Transform::new_scale(0.0, 1.0));
        let path = Path::rect(Rect::from_corners((0.0, 0.0), (2.0, 2.0)));
        let result = canvas.fill_path(&path, &FillOptions::new(SolidShader(BLACK)));
        assert!(matches!(
            result,
            Err(Error::NonInvertibleTransform { determinant }) if determinant == 0.0
        ));
        assert!(image.to_vec().iter().all(|pixel| *pixel == WHITE));
    }

    #[test]
    fn test_antialiased_fill() -> Result<()> {
        let options = RenderOptions {
            antialiasing: SubSampleResolution::Five,
            ..Default::default()
        };
        let mut image = white_image(4, 2);
        let mut canvas = Canvas::new(&mut image, RGBAColorSpace::new(false)).with_options(options);
        let path = Path::rect(Rect::from_corners((0.0, 0.0), (2.4, 2.0)));
        canvas.fill_path(&path, &FillOptions::new(SolidShader(BLACK)))?;
        assert_eq!(image.get(1, 1), Some(&BLACK));
        assert_eq!(image.get(2, 1), Some(&RGBA::new(153, 153, 153, 255)));
        assert_eq!(image.get(3, 1), Some(&WHITE));
        Ok(())
    }

    #[test]
    fn test_shader_path_space() -> Result<()> {
        let red = RGBA::new(255, 0, 0, 255);
        let blue = RGBA::new(0, 0, 255, 255);
        let mut image = white_image(8, 2);
        let mut canvas = Canvas::new(&mut image, RGBAColorSpace::default());
        canvas.concat_transform(Transform::new_scale(2.0, 2.0));
        let shader = |point: Point| if point.x() < 2.0 { red } else { blue };
        let path = Path::rect(Rect::from_corners((0.0, 0.0), (4.0, 1.0)));
        canvas.fill_path(&path, &FillOptions::new(shader))?;
        for x in 0..8 {
            let expected = if x < 4 { red } else { blue };
            assert_eq!(image.get(x, 0), Some(&expected));
            assert_eq!(image.get(x, 1), Some(&expected));
        }
        Ok(())
    }

    #[test]
    fn test_stroke_methods() -> Result<()> {
        init_tracing();
        let mut path = Path::empty();
        path.move_to((1.0, 4.0)).add_line((9.0, 4.0));
        let style = StrokeStyle::new(2.0).with_cap(LineCap::Butt);
        let stroke = StrokeOptions::new(SolidShader(BLACK)).with_style(style);

        let mut outline = white_image(10, 10);
        Canvas::new(&mut outline, RGBAColorSpace::new(false)).stroke_path(&path, &stroke)?;

        let options = RenderOptions {
            stroke_method: StrokeMethod::Direct,
            ..Default::default()
        };
        let mut direct = white_image(10, 10);
        Canvas::new(&mut direct, RGBAColorSpace::new(false))
            .with_options(options)
            .stroke_path(&path, &stroke)?;

        for y in 0..10 {
            for x in 1..9 {
                let expected = if (3..5).contains(&y) { BLACK } else { WHITE };
                assert_eq!(outline.get(x, y), Some(&expected), "{x} {y}");
                assert_eq!(direct.get(x, y), Some(&expected), "{x} {y}");
            }
        }
        assert_eq!(outline.get(0, 3), Some(&WHITE));
        assert_eq!(direct.get(0, 3), Some(&BLACK));
        Ok(())
    }

    #[test]
    fn test_stroke_errors() {
        let mut image = white_image(4, 4);
        let mut canvas = Canvas::new(&mut image, RGBAColorSpace::default());
        let path = Path::rect(Rect::from_corners((1.0, 1.0), (3.0, 3.0)));
        let miter = StrokeOptions::new(SolidShader(BLACK))
            .with_style(StrokeStyle::new(1.0).with_join(LineJoin::Miter));
        assert!(matches!(
            canvas.stroke_path(&path, &miter),
            Err(Error::Offset(OffsetError::UnsupportedJoin(LineJoin::Miter)))
        ));
        let zero = StrokeOptions::new(SolidShader(BLACK)).with_style(StrokeStyle::new(0.0));
        assert!(matches!(
            canvas.stroke_path(&path, &zero),
            Err(Error::InvalidOptions(_))
        ));
    }

    #[test]
    fn test_invalid_linearity() {
        let mut image = white_image(4, 4);
        let path = Path::rect(Rect::from_corners((0.0, 0.0), (4.0, 4.0)));
        for linearity in [0.0, -1.0, Scalar::NAN] {
            let options = RenderOptions {
                linearity,
                ..RenderOptions::default()
            };
            let mut canvas = Canvas::new(&mut image, RGBAColorSpace::default()).with_options(options);
            assert!(matches!(
                canvas.fill_path(&path, &FillOptions::new(SolidShader(BLACK))),
                Err(Error::InvalidOptions(_))
            ));
            assert!(matches!(
                canvas.stroke_path(&path, &StrokeOptions::new(SolidShader(BLACK))),
                Err(Error::InvalidOptions(_))
            ));
            canvas.set_options(RenderOptions {
                stroke_method: StrokeMethod::Direct,
                ..options
            });
            assert!(matches!(
                canvas.draw_path(
                    &path,
                    Some(&FillOptions::new(SolidShader(BLACK))),
                    Some(&StrokeOptions::new(SolidShader(BLACK))),
                ),
                Err(Error::InvalidOptions(_))
            ));
        }
        assert!(image.to_vec().into_iter().all(|pixel| pixel == WHITE));
    }

    #[test]
    fn test_draw_path() -> Result<()> {
        let gray = RGBA::new(128, 128, 128, 255);
        let mut image = white_image(10, 10);
        let mut canvas = Canvas::new(&mut image, RGBAColorSpace::new(false));
        let path = Path::rect(Rect::from_corners((2.0, 2.0), (8.0, 8.0)));
        let fill = FillOptions::new(SolidShader(gray));
        let stroke =
            StrokeOptions::new(SolidShader(BLACK)).with_style(StrokeStyle::new(2.0));
        canvas.draw_path(&path, Some(&fill), Some(&stroke))?;
        assert_eq!(image.get(5, 5), Some(&gray));
        assert_eq!(image.get(1, 5), Some(&BLACK));
        assert_eq!(image.get(2, 5), Some(&BLACK));
        assert_eq!(image.get(3, 5), Some(&gray));
        assert_eq!(image.get(0, 5), Some(&WHITE));
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_options_json() -> Result<()> {
        let options = RenderOptions::from_json(
            r#"{"antialiasing": 3, "fill_rule": "non-zero", "stroke": {"line_cap": "butt"}}"#,
        )?;
        assert_eq!(options.antialiasing, SubSampleResolution::Three);
        assert_eq!(options.fill_rule, FillRule::NonZero);
        assert_eq!(options.stroke.line_cap, LineCap::Butt);
        assert_eq!(options.stroke.width, 1.0);
        assert_eq!(options.linearity, DEFAULT_LINEARITY);
        assert_eq!(options.stroke_method, StrokeMethod::Outline);

        let json = options.to_json()?;
        assert_eq!(RenderOptions::from_json(&json)?, options);

        assert!(matches!(
            RenderOptions::from_json(r#"{"antialiasing": 4}"#),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            RenderOptions::from_json(r#"{"linearity": -1.0}"#),
            Err(Error::InvalidOptions(_))
        ));
        assert!(matches!(
            RenderOptions::from_json(r#"{"stroke": {"width": 0.0}}"#),
            Err(Error::InvalidOptions(_))
        ));
        Ok(())
    }
}
