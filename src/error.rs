//! Error types for the tracer.

use thiserror::Error;

/// Errors that can occur while building a scene or exporting a frame.
#[derive(Error, Debug)]
pub enum TraceError {
    /// A zero-length vector was normalized.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    /// Sphere radius must be positive and finite, reflectivity within [0, 1].
    #[error("invalid sphere: radius {radius}, reflectivity {reflectivity}")]
    InvalidSphere { radius: f32, reflectivity: f32 },

    /// Light intensity must be finite and non-negative.
    #[error("invalid light: intensity {intensity}")]
    InvalidLight { intensity: f32 },

    /// Pixel buffer length does not match `width * height * 4`.
    #[error("pixel buffer has {actual} floats, expected {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("image encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

/// Result type for tracer operations.
pub type Result<T> = std::result::Result<T, TraceError>;
