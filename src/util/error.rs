//! Error types for edgealign.

use thiserror::Error;

/// Result alias for edgealign operations.
pub type AlignResult<T> = std::result::Result<T, AlignError>;

/// Errors that can occur when building a matcher or scoring frames.
///
/// Everything except [`AlignError::ImageIo`] is raised either while the
/// [`Matcher`](crate::Matcher) is constructed or when a frame does not fit
/// the configured canvas. Neither case is recoverable per frame.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AlignError {
    /// A configuration value is outside its accepted range.
    #[error("invalid configuration: {reason}")]
    InvalidConfig { reason: &'static str },
    /// Image or canvas dimensions are zero or overflow.
    #[error("invalid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// The stride is smaller than the row width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// The backing buffer is too small for the requested layout.
    #[error("buffer too small: needed {needed}, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// An index is outside the valid range for a collection.
    #[error("{context} index {index} out of bounds (len {len})")]
    IndexOutOfBounds {
        index: usize,
        len: usize,
        context: &'static str,
    },
    /// The reference geometry contains no points at all.
    #[error("reference geometry is empty")]
    EmptyGeometry,
    /// The reference geometry bounding box has zero (or non-finite) extent.
    #[error("degenerate reference geometry: bounding box {width}x{height}")]
    DegenerateGeometry { width: f64, height: f64 },
    /// The offset neighborhood produced no transforms.
    #[error("transform grid is empty")]
    EmptyTransformGrid,
    /// Rotation grid parameters are invalid.
    #[error("invalid angle grid: {reason}")]
    InvalidAngleGrid { reason: &'static str },
    /// A rasterized mask is larger than the frame it is scored against.
    #[error(
        "mask {mask_width}x{mask_height} does not fit frame {frame_width}x{frame_height}"
    )]
    SizeMismatch {
        mask_width: usize,
        mask_height: usize,
        frame_width: usize,
        frame_height: usize,
    },
    /// Image decoding or encoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
