pub mod config;

pub use config::{AppConfig, Limits, PatternDefaults, RenderConfig, StoreConfig};
