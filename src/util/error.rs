//! Error types for probekernel.

use thiserror::Error;

/// Result alias for probekernel operations.
pub type ProbeKernelResult<T> = std::result::Result<T, ProbeKernelError>;

/// Errors that can occur when building probe kernels.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ProbeKernelError {
    /// Image dimensions are zero or overflow the address space.
    #[error("invalid dimensions: {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },
    /// Row stride is smaller than the image width.
    #[error("invalid stride {stride} for width {width}")]
    InvalidStride { width: usize, stride: usize },
    /// Backing buffer cannot hold the requested image.
    #[error("buffer too small: needed {needed} elements, got {got}")]
    BufferTooSmall { needed: usize, got: usize },
    /// Owned buffer length does not match `width * height`.
    #[error("buffer length mismatch: expected {expected} elements, got {got}")]
    BufferLengthMismatch { expected: usize, got: usize },
    /// Requested region does not fit inside the image.
    #[error("roi {width}x{height} at ({x}, {y}) exceeds image {img_width}x{img_height}")]
    RoiOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        img_width: usize,
        img_height: usize,
    },
    /// Mode selector is not one of the supported kernel modes.
    #[error("unknown kernel mode '{mode}', expected one of flat, gaussian, sigmoid, sigmoid_log")]
    UnknownMode { mode: String },
    /// A parameter required by the selected mode was not supplied.
    #[error("mode '{mode}' requires parameter '{name}'")]
    MissingParameter { mode: &'static str, name: &'static str },
    /// A parameter was supplied that the selected mode does not accept.
    #[error("mode '{mode}' does not accept parameter '{name}'")]
    UnexpectedParameter { mode: &'static str, name: String },
    /// A parameter has the wrong type or an out-of-range value.
    #[error("invalid parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        reason: &'static str,
    },
    /// The probe cannot be normalized or centered.
    #[error("degenerate probe: {reason}")]
    DegenerateProbe { reason: &'static str },
    /// Image decoding or encoding failed.
    #[error("image io error: {reason}")]
    ImageIo { reason: String },
}
