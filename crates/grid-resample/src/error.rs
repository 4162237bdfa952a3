//! Error type for the grid-resample public API.

use std::fmt;

/// Errors produced while building sources, surfaces or resampled buffers.
///
/// # Example
///
/// ```
/// use grid_resample::{ResampleError, SourceImage};
///
/// let err = SourceImage::from_rgba(0, 4, Vec::new()).unwrap_err();
/// assert!(matches!(err, ResampleError::InvalidSource { .. }));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResampleError {
    /// Source dimensions are zero or the pixel buffer does not match them.
    InvalidSource {
        width: u32,
        height: u32,
        len: usize,
    },
    /// A drawing surface of the requested size cannot be allocated.
    Surface { width: u32, height: u32 },
}

impl fmt::Display for ResampleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResampleError::InvalidSource { width, height, len } => write!(
                f,
                "invalid source image: {}x{} with {} bytes of RGBA data",
                width, height, len
            ),
            ResampleError::Surface { width, height } => {
                write!(f, "cannot allocate {}x{} surface", width, height)
            }
        }
    }
}

impl std::error::Error for ResampleError {}
