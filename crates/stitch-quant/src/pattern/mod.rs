//! Grid assembly and the pattern output type.
//!
//! [`assemble`] turns per-pixel classification results into a [`Pattern`]:
//! a grid of codes plus code→color and code→count maps. Codes are ordered
//! by descending pixel count, ties resolved by first appearance in the
//! row-major scan.

mod assemble;
mod code;
mod error;
mod pattern;

pub use assemble::assemble;
pub use code::{CodeFormat, ParseCodeFormatError};
pub use error::PatternError;
pub use pattern::{Pattern, PatternColor};
