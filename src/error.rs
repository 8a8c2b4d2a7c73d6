//! Error types for the solver boundary.

use thiserror::Error;

/// Errors reported when a segmentation run is set up.
///
/// The iteration itself never fails: numerical hazards inside a step are
/// handled by local guards.
#[derive(Debug, Error)]
pub enum Error {
    /// A solver parameter is outside its domain.
    #[error("invalid configuration: {parameter} = {value} ({reason})")]
    InvalidConfiguration {
        /// Name of the offending parameter.
        parameter: &'static str,
        /// The rejected value.
        value: f64,
        /// What the parameter must satisfy.
        reason: &'static str,
    },

    /// The sample grid has no pixels.
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid {
        /// Grid width.
        width: usize,
        /// Grid height.
        height: usize,
    },

    /// Two grids that must share dimensions do not.
    #[error("dimension mismatch: expected {expected:?}, got {actual:?}")]
    DimensionMismatch {
        /// `(width, height)` of the reference grid.
        expected: (usize, usize),
        /// `(width, height)` of the other grid.
        actual: (usize, usize),
    },

    /// A sample is NaN or infinite.
    #[error("non-finite sample at ({x}, {y})")]
    NonFiniteSample {
        /// Column of the sample.
        x: usize,
        /// Row of the sample.
        y: usize,
    },

    /// Reading or writing a file failed.
    #[cfg(feature = "image-utils")]
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding an image failed.
    #[cfg(feature = "image-utils")]
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
}

/// Result type for solver setup.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::InvalidConfiguration {
            parameter: "time_step",
            value: -0.5,
            reason: "must be > 0",
        };
        let msg = format!("{err}");
        assert!(msg.contains("time_step"));
        assert!(msg.contains("-0.5"));

        let err = Error::EmptyGrid {
            width: 0,
            height: 3,
        };
        assert_eq!(format!("{err}"), "grid must be at least 1x1, got 0x3");
    }
}
