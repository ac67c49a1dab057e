//! Error types for faceboxes.

use thiserror::Error;

/// Result alias for faceboxes operations.
pub type FaceBoxesResult<T> = std::result::Result<T, FaceBoxesError>;

/// Errors that can occur when post-processing detector output.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum FaceBoxesError {
    /// Anchor, offset, and score buffers do not describe the same number of slots.
    #[error("length mismatch: {anchors} anchors, {offsets} offsets, {scores} scores")]
    LengthMismatch {
        anchors: usize,
        offsets: usize,
        scores: usize,
    },
    /// Two buffers that are paired by index have different lengths.
    #[error("length mismatch: {left_len} {left}, {right_len} {right}")]
    PairMismatch {
        left: &'static str,
        left_len: usize,
        right: &'static str,
        right_len: usize,
    },
    /// A flat buffer length is not a whole number of rows.
    #[error("{field} buffer length {len} is not a multiple of {stride}")]
    RaggedBuffer {
        field: &'static str,
        len: usize,
        stride: usize,
    },
    /// A NaN or infinite value was found in an input buffer.
    #[error("non-finite value in {field} at index {index}")]
    NonFiniteInput { field: &'static str, index: usize },
    /// The resized image size has a zero dimension.
    #[error("invalid image size {width}x{height}")]
    InvalidImageSize { width: usize, height: usize },
    /// The resize scale factor is not a positive finite number.
    #[error("invalid scale factor {scale}")]
    InvalidScale { scale: f64 },
    /// A pipeline or policy parameter is out of range.
    #[error("invalid config: {reason}")]
    InvalidConfig { reason: &'static str },
    /// Reading an image header failed.
    #[error("image io: {reason}")]
    ImageIo { reason: String },
}
