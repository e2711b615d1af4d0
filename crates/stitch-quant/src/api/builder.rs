//! Quantizer builder -- the primary entry point for the crate.
//!
//! [`Quantizer`] runs the whole pipeline: median cut, classification and
//! grid assembly.

use crate::color::PixelBuffer;
use crate::pattern::{assemble, CodeFormat, Pattern};
use crate::quantize::{median_cut, Palette};

use super::error::QuantizeError;

/// Reduces a pixel buffer to at most `max_colors` codes.
///
/// # Design
///
/// - Constructor validates `max_colors` (no invalid states)
/// - Configuration methods consume and return `self`
/// - [`quantize()`](Self::quantize) takes `&self`; a quantizer holds no state
///   between calls and is reusable across images
///
/// # Example
///
/// ```
/// use stitch_quant::{PixelBuffer, Quantizer, Rgb};
///
/// let pixels = vec![
///     Rgb::new(0, 0, 0), Rgb::new(255, 255, 255),
///     Rgb::new(0, 0, 0), Rgb::new(255, 0, 0),
/// ];
/// let buffer = PixelBuffer::new(pixels, 2, 2).unwrap();
///
/// let pattern = Quantizer::new(2).unwrap().quantize(&buffer).unwrap();
/// assert_eq!(pattern.num_colors(), 2);
/// assert_eq!(pattern.grid(), vec![vec!["01", "02"], vec!["01", "02"]]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Quantizer {
    max_colors: usize,
    code_format: CodeFormat,
}

impl Quantizer {
    /// Create a quantizer producing at most `max_colors` colors.
    ///
    /// Codes default to [`CodeFormat::Padded`].
    ///
    /// # Errors
    ///
    /// [`QuantizeError::InvalidMaxColors`] if `max_colors` is zero.
    pub fn new(max_colors: usize) -> Result<Self, QuantizeError> {
        if max_colors < 1 {
            return Err(QuantizeError::InvalidMaxColors);
        }
        Ok(Self {
            max_colors,
            code_format: CodeFormat::default(),
        })
    }

    /// Set how codes are spelled.
    #[inline]
    pub fn code_format(mut self, format: CodeFormat) -> Self {
        self.code_format = format;
        self
    }

    #[inline]
    pub fn max_colors(&self) -> usize {
        self.max_colors
    }

    #[inline]
    pub fn format(&self) -> &CodeFormat {
        &self.code_format
    }

    /// Run median cut only and return the ordered palette.
    pub fn palette(&self, buffer: &PixelBuffer) -> Result<Palette, QuantizeError> {
        median_cut(buffer.pixels(), self.max_colors)
    }

    /// Run the full pipeline.
    ///
    /// 1. Median cut to a palette of at most `max_colors` entries
    /// 2. Map every pixel to its nearest palette entry
    /// 3. Assemble codes, color map, counts and grid
    ///
    /// An empty buffer yields an empty pattern with the buffer's shape.
    pub fn quantize(&self, buffer: &PixelBuffer) -> Result<Pattern, QuantizeError> {
        let palette = self.palette(buffer)?;
        let classified = palette.classify(buffer.pixels());
        let pattern = assemble(&classified, buffer.rows(), buffer.cols(), &self.code_format)?;

        tracing::debug!(
            rows = buffer.rows(),
            cols = buffer.cols(),
            max_colors = self.max_colors,
            palette = palette.len(),
            num_colors = pattern.num_colors(),
            "quantized pixel buffer"
        );

        Ok(pattern)
    }
}

/// Quantize with default code formatting.
///
/// Shorthand for `Quantizer::new(max_colors)?.quantize(buffer)`.
pub fn quantize(buffer: &PixelBuffer, max_colors: usize) -> Result<Pattern, QuantizeError> {
    Quantizer::new(max_colors)?.quantize(buffer)
}
