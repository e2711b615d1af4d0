//! Validated row-major pixel grid.

use super::rgb::{Channel, Rgb};
use crate::api::QuantizeError;

/// A rectangular, row-major grid of pixels.
///
/// The pixel at row `r`, column `c` lives at index `r * cols + c`. The
/// length is always exactly `rows * cols`; constructors reject anything
/// else, so downstream stages never see a ragged buffer.
///
/// A buffer with zero rows or zero columns is valid and empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<Rgb>,
    rows: usize,
    cols: usize,
}

impl PixelBuffer {
    /// Wrap already-decoded pixels.
    ///
    /// # Errors
    ///
    /// [`QuantizeError::DimensionMismatch`] if `pixels.len() != rows * cols`.
    pub fn new(pixels: Vec<Rgb>, rows: usize, cols: usize) -> Result<Self, QuantizeError> {
        check_len(pixels.len(), rows, cols)?;
        Ok(Self { pixels, rows, cols })
    }

    /// Build a buffer from integer triples, validating each channel.
    ///
    /// This is the entry point for untrusted input (JSON requests), where
    /// channels arrive as arbitrary integers.
    ///
    /// # Errors
    ///
    /// - [`QuantizeError::DimensionMismatch`] if `triples.len() != rows * cols`
    /// - [`QuantizeError::ChannelOutOfRange`] for the first channel outside `0..=255`
    ///
    /// # Example
    ///
    /// ```
    /// use stitch_quant::{PixelBuffer, QuantizeError};
    ///
    /// let ok = PixelBuffer::from_channels(&[[0, 128, 255]], 1, 1);
    /// assert!(ok.is_ok());
    ///
    /// let bad = PixelBuffer::from_channels(&[[0, 256, 0]], 1, 1);
    /// assert!(matches!(bad, Err(QuantizeError::ChannelOutOfRange { index: 0, .. })));
    /// ```
    pub fn from_channels(triples: &[[i64; 3]], rows: usize, cols: usize) -> Result<Self, QuantizeError> {
        check_len(triples.len(), rows, cols)?;

        let channels = [Channel::Red, Channel::Green, Channel::Blue];
        let pixels = triples
            .iter()
            .enumerate()
            .map(|(index, triple)| {
                let mut bytes = [0u8; 3];
                for ((byte, &value), &channel) in bytes.iter_mut().zip(triple).zip(&channels) {
                    *byte = u8::try_from(value).map_err(|_| QuantizeError::ChannelOutOfRange {
                        index,
                        channel,
                        value,
                    })?;
                }
                Ok(Rgb::from_bytes(bytes))
            })
            .collect::<Result<Vec<_>, QuantizeError>>()?;

        Ok(Self { pixels, rows, cols })
    }

    /// Build a buffer from packed `[R, G, B, R, G, B, ...]` bytes.
    ///
    /// # Errors
    ///
    /// [`QuantizeError::DimensionMismatch`] if the byte count is not `rows * cols * 3`.
    pub fn from_rgb_bytes(bytes: &[u8], rows: usize, cols: usize) -> Result<Self, QuantizeError> {
        if bytes.len() % 3 != 0 {
            return Err(QuantizeError::DimensionMismatch {
                rows,
                cols,
                len: bytes.len() / 3,
            });
        }
        let pixels = bytes
            .chunks_exact(3)
            .map(|c| Rgb::new(c[0], c[1], c[2]))
            .collect();
        Self::new(pixels, rows, cols)
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    /// Pixel at (`row`, `col`), or `None` when out of bounds.
    pub fn get(&self, row: usize, col: usize) -> Option<Rgb> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.pixels.get(row * self.cols + col).copied()
    }

    pub fn into_pixels(self) -> Vec<Rgb> {
        self.pixels
    }
}

fn check_len(len: usize, rows: usize, cols: usize) -> Result<(), QuantizeError> {
    match rows.checked_mul(cols) {
        Some(expected) if expected == len => Ok(()),
        _ => Err(QuantizeError::DimensionMismatch { rows, cols, len }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_exact_length() {
        let buffer = PixelBuffer::new(vec![Rgb::default(); 6], 2, 3).unwrap();
        assert_eq!(buffer.rows(), 2);
        assert_eq!(buffer.cols(), 3);
        assert_eq!(buffer.len(), 6);
    }

    #[test]
    fn test_new_rejects_wrong_length() {
        let result = PixelBuffer::new(vec![Rgb::default(); 5], 2, 3);
        assert_eq!(
            result,
            Err(QuantizeError::DimensionMismatch {
                rows: 2,
                cols: 3,
                len: 5
            })
        );
    }

    #[test]
    fn test_new_rejects_overflowing_dimensions() {
        let result = PixelBuffer::new(Vec::new(), usize::MAX, 2);
        assert!(matches!(result, Err(QuantizeError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_empty_buffers_are_valid() {
        assert!(PixelBuffer::new(Vec::new(), 0, 0).unwrap().is_empty());
        assert!(PixelBuffer::new(Vec::new(), 4, 0).unwrap().is_empty());
        assert!(PixelBuffer::new(Vec::new(), 0, 4).unwrap().is_empty());
    }

    #[test]
    fn test_from_channels_reports_first_bad_channel() {
        let triples = [[0, 0, 0], [1, 2, 3], [4, -1, 300]];
        let result = PixelBuffer::from_channels(&triples, 1, 3);
        assert_eq!(
            result,
            Err(QuantizeError::ChannelOutOfRange {
                index: 2,
                channel: Channel::Green,
                value: -1
            })
        );
    }

    #[test]
    fn test_from_channels_checks_length_before_values() {
        let result = PixelBuffer::from_channels(&[[999, 0, 0]], 2, 2);
        assert!(matches!(result, Err(QuantizeError::DimensionMismatch { .. })));
    }

    #[test]
    fn test_from_rgb_bytes() {
        let buffer = PixelBuffer::from_rgb_bytes(&[1, 2, 3, 4, 5, 6], 1, 2).unwrap();
        assert_eq!(buffer.pixels(), &[Rgb::new(1, 2, 3), Rgb::new(4, 5, 6)]);

        assert!(PixelBuffer::from_rgb_bytes(&[1, 2, 3, 4], 1, 1).is_err());
        assert!(PixelBuffer::from_rgb_bytes(&[1, 2, 3], 1, 2).is_err());
    }

    #[test]
    fn test_get_is_row_major() {
        let pixels = (0..6u8).map(|i| Rgb::new(i, 0, 0)).collect();
        let buffer = PixelBuffer::new(pixels, 2, 3).unwrap();
        assert_eq!(buffer.get(0, 2), Some(Rgb::new(2, 0, 0)));
        assert_eq!(buffer.get(1, 0), Some(Rgb::new(3, 0, 0)));
        assert_eq!(buffer.get(2, 0), None);
        assert_eq!(buffer.get(0, 3), None);
    }
}
