use crate::{ColorError, OffsetError, Scalar};

/// Errors reported by canvas operations and option parsing
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Current transformation collapses the plane, nothing can be drawn with it
    #[error("transformation is not invertible, determinant: {determinant}")]
    NonInvertibleTransform { determinant: Scalar },
    /// Stroke could not be converted into a fill outline
    #[error("failed to build stroke outline: {0}")]
    Offset(#[from] OffsetError),
    #[error(transparent)]
    Color(#[from] ColorError),
    /// Non-positive or non-finite linearity or stroke width
    #[error("invalid options: {0}")]
    InvalidOptions(String),
    #[cfg(feature = "serde")]
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}
