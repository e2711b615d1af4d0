//! Stitchgrid
//!
//! Turns images into color-coded cross-stitch patterns over HTTP or from
//! the command line. The color reduction itself lives in the `stitch-quant`
//! crate; this library wires it to PNG ingest, exports, and the server,
//! and exposes the modules for integration testing.

pub mod api;
pub mod error;
pub mod imaging;
pub mod models;
pub mod rendering;
pub mod server;
pub mod services;
