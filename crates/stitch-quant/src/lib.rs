//! stitch-quant: median-cut color reduction for stitch patterns
//!
//! This library reduces a rectangular pixel buffer to a small palette and
//! produces a grid assigning one palette code to every cell.
//!
//! # Quick Start
//!
//! The [`Quantizer`] builder is the primary entry point:
//!
//! ```
//! use stitch_quant::{CodeFormat, PixelBuffer, Quantizer, Rgb};
//!
//! let pixels = vec![Rgb::new(250, 10, 10); 6];
//! let buffer = PixelBuffer::new(pixels, 2, 3).unwrap();
//!
//! let pattern = Quantizer::new(16)
//!     .unwrap()
//!     .code_format(CodeFormat::Numeric)
//!     .quantize(&buffer)
//!     .unwrap();
//!
//! assert_eq!(pattern.num_colors(), 1);
//! assert_eq!(pattern.code_at(1, 2), Some("1"));
//! ```
//!
//! # Pipeline
//!
//! ```text
//! PixelBuffer (rows x cols, row-major)
//!     |
//!     v
//! median_cut              split the widest box until max_colors boxes
//!     |                   or none is splittable; average each box
//!     v
//! Palette                 ordered, may contain repeated colors
//!     |
//!     v
//! Palette::classify       nearest entry by squared RGB distance,
//!     |                   first entry wins ties
//!     v
//! assemble                tally by color value, codes by descending
//!     |                   count (first-seen breaks ties)
//!     v
//! Pattern                 grid + colorMap + colorCounts + numColors
//! ```
//!
//! Every stage is deterministic. The same buffer and `max_colors` always give
//! a byte-identical serialized [`Pattern`].
//!
//! ## Box selection and splitting
//!
//! Each round picks the box with the strictly largest volume
//! (`rRange * gRange * bRange`) among boxes holding more than one pixel; the
//! earliest box wins ties. A box of identical pixels has volume zero but is
//! still split when nothing larger remains. Its children average to the same
//! color, and [`assemble`] folds them back into a single code, so the number
//! of codes can be lower than the palette size.
//!
//! The split axis is the channel with the widest range, ties going to red,
//! then green, then blue. Pixels are stably sorted on that axis and cut at
//! `len / 2`.
//!
//! ## Rounding
//!
//! Box averages round half up per channel: a mean of 127.5 becomes 128.
//!
//! # Features
//!
//! - `threads`: classify pixels on the rayon thread pool. Output is identical.

pub mod api;
pub mod color;
pub mod pattern;
pub mod quantize;


pub use api::{quantize, QuantizeError, Quantizer};
pub use color::{Channel, ParseColorError, PixelBuffer, Rgb};
pub use pattern::{assemble, CodeFormat, ParseCodeFormatError, Pattern, PatternColor, PatternError};
pub use quantize::{median_cut, partition, ColorBox, Palette};
