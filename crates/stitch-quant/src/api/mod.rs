//! Public API for the stitch-quant crate.
//!
//! This module provides the high-level API: the [`Quantizer`] builder,
//! the [`quantize`] shorthand and the [`QuantizeError`] error type.

mod builder;
mod error;

pub use builder::{quantize, Quantizer};
pub use error::QuantizeError;
