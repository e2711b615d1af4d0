//! Pixel types
//!
//! - [`Rgb`]: one 8-bit-per-channel pixel, also used for palette entries
//! - [`PixelBuffer`]: a validated `rows * cols` row-major pixel grid
//! - [`Channel`]: names one of the three RGB axes
//!
//! # Example
//!
//! ```
//! use stitch_quant::{PixelBuffer, Rgb};
//!
//! let pixels = vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)];
//! let buffer = PixelBuffer::new(pixels, 1, 2).unwrap();
//! assert_eq!(buffer.len(), 2);
//! ```

mod buffer;
mod error;
mod rgb;

pub use buffer::PixelBuffer;
pub use error::ParseColorError;
pub use rgb::{Channel, Rgb};
