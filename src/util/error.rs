//! Error types for chromakey.

use thiserror::Error;

/// Result alias for chromakey operations.
pub type ChromaKeyResult<T> = std::result::Result<T, ChromaKeyError>;

/// Errors that can occur when building matrices, images or composites.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ChromaKeyError {
    /// Operands of a binary matrix or image operation have different shapes.
    ///
    /// Shapes are reported as `(rows, columns)`.
    #[error("shape mismatch in {op}: {left:?} vs {right:?}")]
    ShapeMismatch {
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    },
    /// A checked element access fell outside the matrix.
    #[error("index ({row}, {column}) out of bounds for {rows}x{columns} matrix")]
    IndexOutOfBounds {
        row: usize,
        column: usize,
        rows: usize,
        columns: usize,
    },
    /// A key color channel was outside `0..=255`.
    #[error("color channel {channel} must be in range 0 - 255, got {value}")]
    InvalidColorChannel { channel: &'static str, value: i64 },
    /// The keying threshold is not a usable number.
    #[error("invalid threshold: {value}")]
    InvalidThreshold { value: f64 },
    /// Image dimensions are zero or overflow.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// A raw buffer does not match the requested dimensions.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Image decoding, encoding or file access failed.
    #[error("image i/o failed for {path}: {reason}")]
    ImageIo { path: String, reason: String },
}

impl ChromaKeyError {
    pub(crate) fn shape_mismatch(
        op: &'static str,
        left: (usize, usize),
        right: (usize, usize),
    ) -> Self {
        Self::ShapeMismatch { op, left, right }
    }
}
