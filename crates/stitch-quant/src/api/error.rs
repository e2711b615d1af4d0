//! Argument errors for the quantization pipeline.
//!
//! Every variant is raised before partitioning begins, so a failed call
//! never produces partial output.

use thiserror::Error;

use crate::color::Channel;

/// Rejected input to the quantization pipeline.
///
/// # Example
///
/// ```
/// use stitch_quant::{Quantizer, QuantizeError};
///
/// assert!(matches!(Quantizer::new(0), Err(QuantizeError::InvalidMaxColors)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QuantizeError {
    /// `max_colors` was zero
    #[error("max_colors must be at least 1")]
    InvalidMaxColors,

    /// Pixel count does not equal `rows * cols`
    #[error("pixel buffer has {len} pixels, expected {rows}x{cols}")]
    DimensionMismatch { rows: usize, cols: usize, len: usize },

    /// A channel value outside `0..=255`
    #[error("pixel {index} has {channel:?} channel {value} outside 0..=255")]
    ChannelOutOfRange {
        index: usize,
        channel: Channel,
        value: i64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        assert_eq!(
            QuantizeError::InvalidMaxColors.to_string(),
            "max_colors must be at least 1"
        );
        assert_eq!(
            QuantizeError::DimensionMismatch {
                rows: 2,
                cols: 3,
                len: 5
            }
            .to_string(),
            "pixel buffer has 5 pixels, expected 2x3"
        );
        assert_eq!(
            QuantizeError::ChannelOutOfRange {
                index: 7,
                channel: Channel::Blue,
                value: 256
            }
            .to_string(),
            "pixel 7 has Blue channel 256 outside 0..=255"
        );
    }
}
