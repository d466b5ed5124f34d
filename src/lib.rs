//! Software 2D vector rasterizer
//!
//! Main features:
//!  - Paths made of lines, quadratic and cubic Bezier curves with geometric queries
//!  - Stroke outlines built by offsetting curves
//!  - Anti-aliased scan conversion with even-odd, non-zero and winding number rules
//!  - Pluggable color spaces and shaders
mod color;
mod curve;
mod error;
mod geometry;
mod image;
mod path;
mod rasterize;
mod render;
mod stroke;
mod utils;

pub use crate::rasterize::{
    Coverage, CrossingGrid, DEFAULT_LINEARITY, Rasterizer, SubPixelCrossings,
    SubSampleResolution, image_bounds,
};
pub use color::{Color, ColorError, ColorSpace, RGBA, RGBAColorSpace};
pub use curve::{
    Axis, Cubic, Curve, CurveExtremities, CurveFlattenIter, CurveIntersections, CurvePieces,
    CurveRoots, FLATTEN_MAX_DEPTH, Line, Quad, Segment,
};
pub use error::Error;
pub use geometry::{
    EPSILON, EPSILON_SQRT, PI, Point, Rect, Scalar, Size, Transform, Triangle, scalar_fmt,
};
pub use image::{Image, ImageMut, ImageOwned, Shape};
pub use path::{FillRule, KAPPA, Path, SubPath};
pub use render::{
    Canvas, FillOptions, RenderOptions, Shader, SolidShader, StrokeMethod, StrokeOptions,
};
pub use stroke::{LineCap, LineJoin, OffsetError, StrokeStyle};
pub use utils::{
    Array, ArrayIter, CUBIC_DOUBLE_ROOT_TOLERANCE, CubicRoots, QuadraticRoots, clamp,
    real_cubic_roots, real_quadratic_roots,
};
