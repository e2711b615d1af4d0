//! Median-cut partitioning and nearest-color classification.
//!
//! [`median_cut`] turns a pixel buffer into an ordered [`Palette`];
//! [`Palette::classify`] maps every pixel back onto that palette.

mod color_box;
mod median_cut;
mod palette;

pub use color_box::ColorBox;
pub use median_cut::{median_cut, partition};
pub use palette::Palette;
