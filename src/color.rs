use std::{fmt, str::FromStr};

/// Straight (not premultiplied) RGBA color with components in `[0, 1]`
///
/// Interchange format between color spaces, compositing math is done on it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Color {
    pub red: f32,
    pub green: f32,
    pub blue: f32,
    pub alpha: f32,
}

impl Color {
    pub const BLACK: Color = Color::new(0.0, 0.0, 0.0, 1.0);
    pub const WHITE: Color = Color::new(1.0, 1.0, 1.0, 1.0);
    pub const CLEAR: Color = Color::new(0.0, 0.0, 0.0, 0.0);

    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Override alpha component of the color
    pub fn with_alpha(self, alpha: f32) -> Self {
        Self { alpha, ..self }
    }

    /// Calculate LUMA of the color
    pub fn luma(self) -> f32 {
        0.2126 * self.red + 0.7152 * self.green + 0.0722 * self.blue
    }

    /// Blend other color on top of this color
    pub fn blend_over(self, other: Self) -> Self {
        let alpha = other.alpha + self.alpha * (1.0 - other.alpha);
        if alpha <= f32::EPSILON {
            return Self::CLEAR;
        }
        let blend = |dst: f32, src: f32| {
            (src * other.alpha + dst * self.alpha * (1.0 - other.alpha)) / alpha
        };
        Self::new(
            blend(self.red, other.red),
            blend(self.green, other.green),
            blend(self.blue, other.blue),
            alpha,
        )
    }
}

/// Color with 8-bit components
#[repr(transparent)]
#[derive(
    Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, bytemuck::Pod, bytemuck::Zeroable,
)]
pub struct RGBA(pub [u8; 4]);

impl RGBA {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self([r, g, b, a])
    }

    pub const fn red(self) -> u8 {
        self.0[0]
    }

    pub const fn green(self) -> u8 {
        self.0[1]
    }

    pub const fn blue(self) -> u8 {
        self.0[2]
    }

    pub const fn alpha(self) -> u8 {
        self.0[3]
    }

    pub const fn to_rgba(self) -> [u8; 4] {
        self.0
    }
}

impl fmt::Debug for RGBA {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [bg_r, bg_g, bg_b, _] = self.0;
        let luma = RGBAColorSpace::default().to_abstract_rgb(*self).luma();
        let fg = if luma > 0.5 { 0 } else { 255 };
        write!(
            fmt,
            "\x1b[38;2;{fg};{fg};{fg};48;2;{};{};{}m",
            bg_r, bg_g, bg_b
        )?;
        write!(fmt, "{}", self)?;
        write!(fmt, "\x1b[m")
    }
}

impl fmt::Display for RGBA {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [r, g, b, a] = self.0;
        write!(f, "#{:02x}{:02x}{:02x}", r, g, b)?;
        if a != 255 {
            write!(f, "{:02x}", a)?;
        }
        Ok(())
    }
}

impl FromStr for RGBA {
    type Err = ColorError;

    fn from_str(color: &str) -> Result<Self, Self::Err> {
        let invalid = || ColorError::InvalidHex(color.to_owned());
        let digits = match color.strip_prefix('#') {
            Some(digits) if digits.len() == 6 || digits.len() == 8 => digits.as_bytes(),
            _ => return Err(invalid()),
        };
        let digit = |byte: u8| match byte {
            b'A'..=b'F' => Ok(byte - b'A' + 10),
            b'a'..=b'f' => Ok(byte - b'a' + 10),
            b'0'..=b'9' => Ok(byte - b'0'),
            _ => Err(invalid()),
        };
        // #RRGGBB(AA)
        let mut rgba = [255u8; 4];
        for (slot, pair) in rgba.iter_mut().zip(digits.chunks(2)) {
            *slot = (digit(pair[0])? << 4) | digit(pair[1])?;
        }
        Ok(Self(rgba))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    #[error("color expected to be #RRGGBB(AA) in hexadecimal format: {0:?}")]
    InvalidHex(String),
}

/// Strategy converting samples of a pixel buffer and compositing them
pub trait ColorSpace {
    type Sample: Copy;

    /// Number of components in a sample
    fn component_count(&self) -> usize;

    fn has_alpha(&self) -> bool;

    fn to_abstract_rgb(&self, sample: Self::Sample) -> Color;

    fn from_abstract_rgb(&self, color: Color) -> Self::Sample;

    /// Blend weighted sources over the destination sample
    ///
    /// Sources are accumulated premultiplied by their alpha and weight, saturating
    /// at full opacity, and the accumulated color is composited with source-over.
    /// Without alpha the destination is opaque and so is the result.
    fn composite(&self, sources: &[(Self::Sample, f32)], over: Self::Sample) -> Self::Sample {
        let mut acc = [0.0f32; 4];
        for (sample, weight) in sources {
            let color = self.to_abstract_rgb(*sample);
            let alpha = if self.has_alpha() { color.alpha } else { 1.0 };
            let alpha = alpha * weight.clamp(0.0, 1.0);
            acc[0] += color.red * alpha;
            acc[1] += color.green * alpha;
            acc[2] += color.blue * alpha;
            acc[3] += alpha;
        }
        if acc[3] > 1.0 {
            let scale = acc[3].recip();
            acc.iter_mut().for_each(|c| *c *= scale);
        }
        let [red, green, blue, alpha] = acc;
        let src = if alpha > f32::EPSILON {
            Color::new(red / alpha, green / alpha, blue / alpha, alpha)
        } else {
            Color::CLEAR
        };

        let dst = self.to_abstract_rgb(over);
        let dst = if self.has_alpha() { dst } else { dst.with_alpha(1.0) };
        self.from_abstract_rgb(dst.blend_over(src))
    }
}

/// 8-bit RGB(A) color space, samples are [`RGBA`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RGBAColorSpace {
    pub has_alpha: bool,
}

impl Default for RGBAColorSpace {
    fn default() -> Self {
        Self { has_alpha: true }
    }
}

impl RGBAColorSpace {
    pub fn new(has_alpha: bool) -> Self {
        Self { has_alpha }
    }

    pub fn black(&self) -> RGBA {
        self.from_abstract_rgb(Color::BLACK)
    }

    pub fn white(&self) -> RGBA {
        self.from_abstract_rgb(Color::WHITE)
    }

    /// Transparent black, opaque black if color space has no alpha
    pub fn clear(&self) -> RGBA {
        self.from_abstract_rgb(Color::CLEAR)
    }
}

impl ColorSpace for RGBAColorSpace {
    type Sample = RGBA;

    fn component_count(&self) -> usize {
        if self.has_alpha { 4 } else { 3 }
    }

    fn has_alpha(&self) -> bool {
        self.has_alpha
    }

    fn to_abstract_rgb(&self, sample: RGBA) -> Color {
        let [r, g, b, a] = sample.0.map(|c| c as f32 / 255.0);
        Color::new(r, g, b, if self.has_alpha { a } else { 1.0 })
    }

    fn from_abstract_rgb(&self, color: Color) -> RGBA {
        let convert = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
        let alpha = if self.has_alpha {
            convert(color.alpha)
        } else {
            255
        };
        RGBA::new(
            convert(color.red),
            convert(color.green),
            convert(color.blue),
            alpha,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_rgba() {
        let c = RGBA::new(1, 2, 3, 4);
        assert_eq!([1, 2, 3, 4], c.to_rgba());
        assert_eq!(1, c.red());
        assert_eq!(2, c.green());
        assert_eq!(3, c.blue());
        assert_eq!(4, c.alpha());
        assert_eq!(bytemuck::cast_slice::<RGBA, u8>(&[c, c])[4..], [1, 2, 3, 4]);
    }

    #[test]
    fn test_display_parse() -> Result<(), ColorError> {
        let c: RGBA = "#01020304".parse()?;
        assert_eq!(c, RGBA::new(1, 2, 3, 4));
        assert_eq!(c.to_string(), "#01020304");

        let c: RGBA = "#AAbbcc".parse()?;
        assert_eq!(c, RGBA::new(170, 187, 204, 255));
        assert_eq!(c.to_string(), "#aabbcc");

        for invalid in ["aabbcc", "#abc", "#aabbccd", "#gg0000", "#ü0000"] {
            assert_eq!(
                invalid.parse::<RGBA>(),
                Err(ColorError::InvalidHex(invalid.to_owned()))
            );
        }
        Ok(())
    }

    #[test]
    fn test_color_space() {
        let rgba = RGBAColorSpace::new(true);
        let rgb = RGBAColorSpace::new(false);
        assert_eq!(rgba.component_count(), 4);
        assert_eq!(rgb.component_count(), 3);
        assert_eq!(rgba.clear(), RGBA::new(0, 0, 0, 0));
        assert_eq!(rgb.clear(), RGBA::new(0, 0, 0, 255));
        assert_eq!(rgba.white(), RGBA::new(255, 255, 255, 255));

        let color = rgba.to_abstract_rgb(RGBA::new(255, 0, 51, 102));
        assert_approx_eq!(color.blue, 0.2, 1e-6);
        assert_approx_eq!(color.alpha, 0.4, 1e-6);
        assert_approx_eq!(rgb.to_abstract_rgb(RGBA::new(0, 0, 0, 0)).alpha, 1.0, 1e-6);
        assert_eq!(
            rgba.from_abstract_rgb(Color::new(2.0, -1.0, 0.5, 1.0)),
            RGBA::new(255, 0, 128, 255)
        );
    }

    #[test]
    fn test_composite() {
        let space = RGBAColorSpace::new(false);
        let red = RGBA::new(255, 0, 0, 255);
        let white = space.white();
        assert_eq!(space.composite(&[(red, 1.0)], white), red);
        assert_eq!(space.composite(&[], white), white);
        assert_eq!(space.composite(&[(red, 0.4)], white), RGBA::new(255, 153, 153, 255));
        // saturates instead of overflowing
        let sources = vec![(red, 0.1); 30];
        assert_eq!(space.composite(&sources, white), red);

        let space = RGBAColorSpace::new(true);
        let half_red = RGBA::new(255, 0, 0, 128);
        let result = space.composite(&[(half_red, 1.0)], space.clear());
        assert_eq!(result, half_red);
        let result = space.composite(&[(half_red, 1.0)], space.white());
        assert_eq!(result, RGBA::new(255, 127, 127, 255));
        assert_eq!(space.composite(&[], space.clear()), space.clear());
    }

    #[test]
    fn test_blend_over() {
        let c = Color::WHITE.blend_over(Color::BLACK.with_alpha(0.5));
        assert_approx_eq!(c.red, 0.5, 1e-6);
        assert_approx_eq!(c.alpha, 1.0, 1e-6);
        assert_eq!(Color::CLEAR.blend_over(Color::CLEAR), Color::CLEAR);
    }
}
