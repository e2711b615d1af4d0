pub mod pattern_service;
pub mod pattern_store;

pub use pattern_service::{ImageRequest, PatternService, PixelRequest};
pub use pattern_store::{PatternStore, StoredPattern};
