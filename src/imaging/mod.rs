//! Source image ingest: PNG decoding and resampling onto the stitch grid.

mod decode;
mod resample;

pub use decode::{decode_png, pixel_at};
pub use resample::{resample, target_rows};
