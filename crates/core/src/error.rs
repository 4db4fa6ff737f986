//! Error types for the flower simulation core.

use thiserror::Error;

/// Errors produced by simulation and snapshot operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Width or height was zero when creating a field or canvas, or the
    /// cell count overflowed `usize`.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A snapshot or export write failed.
    #[error("io error: {0}")]
    Io(String),
}
