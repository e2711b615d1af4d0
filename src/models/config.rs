use serde::{Deserialize, Deserializer};
use std::path::Path;
use stitch_quant::CodeFormat;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone, Default, PartialEq)]
pub struct AppConfig {
    /// Values used when a request leaves a parameter out
    #[serde(default)]
    pub defaults: PatternDefaults,

    /// Hard bounds on request size
    #[serde(default)]
    pub limits: Limits,

    /// Preview rendering
    #[serde(default)]
    pub render: RenderConfig,

    /// Pattern store
    #[serde(default)]
    pub store: StoreConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct PatternDefaults {
    #[serde(default = "default_max_colors")]
    pub max_colors: usize,

    /// Grid width used when an image is uploaded without `cols`
    #[serde(default = "default_cols")]
    pub cols: usize,

    /// "padded", "numeric" or "prefix:<text>"
    #[serde(default, deserialize_with = "deserialize_code_format")]
    pub code_format: CodeFormat,
}

fn default_max_colors() -> usize {
    16
}

fn default_cols() -> usize {
    80
}

impl Default for PatternDefaults {
    fn default() -> Self {
        Self {
            max_colors: default_max_colors(),
            cols: default_cols(),
            code_format: CodeFormat::default(),
        }
    }
}

fn deserialize_code_format<'de, D>(deserializer: D) -> Result<CodeFormat, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    raw.parse().map_err(serde::de::Error::custom)
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Limits {
    pub max_cols: usize,
    pub max_rows: usize,
    pub max_colors: usize,
    /// Request body limit for uploads, in bytes
    pub max_upload_bytes: usize,
    /// Largest decoded source image, in pixels
    pub max_source_pixels: u64,
    /// Largest preview raster, in pixels
    pub max_render_pixels: u64,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            max_cols: 500,
            max_rows: 500,
            max_colors: 256,
            max_upload_bytes: 16 * 1024 * 1024,
            max_source_pixels: 40_000_000,
            max_render_pixels: 40_000_000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct RenderConfig {
    /// Edge length of one stitch cell in the preview, in pixels
    #[serde(default = "default_cell_size")]
    pub cell_size: u32,

    #[serde(default = "default_grid_lines")]
    pub grid_lines: bool,
}

fn default_cell_size() -> u32 {
    12
}

fn default_grid_lines() -> bool {
    true
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            cell_size: default_cell_size(),
            grid_lines: default_grid_lines(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct StoreConfig {
    /// Patterns kept in memory before the oldest is evicted
    #[serde(default = "default_capacity")]
    pub capacity: usize,
}

fn default_capacity() -> usize {
    64
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file, falling back to defaults when
    /// the path is absent, unreadable or invalid.
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            tracing::info!("No config file configured, using defaults");
            return Self::default();
        };

        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        max_colors = config.defaults.max_colors,
                        cols = config.defaults.cols,
                        store_capacity = config.store.capacity,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Load from the path named by `CONFIG_FILE`, if any.
    pub fn from_env() -> Self {
        let path = std::env::var("CONFIG_FILE").ok().map(std::path::PathBuf::from);
        Self::load(path.as_deref())
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document parses as unit, not as an empty mapping
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.defaults.max_colors, 16);
        assert_eq!(config.defaults.cols, 80);
        assert_eq!(config.defaults.code_format, CodeFormat::Padded);
        assert_eq!(config.limits.max_cols, 500);
        assert_eq!(config.limits.max_rows, 500);
        assert_eq!(config.limits.max_colors, 256);
        assert_eq!(config.limits.max_upload_bytes, 16 * 1024 * 1024);
        assert_eq!(config.render.cell_size, 12);
        assert!(config.render.grid_lines);
        assert_eq!(config.store.capacity, 64);
    }

    #[test]
    fn test_deserialize_partial_config() {
        let yaml = r#"
defaults:
  max_colors: 8
  code_format: "prefix:DMC-"
limits:
  max_cols: 120
store:
  capacity: 4
"#;
        let config = AppConfig::from_yaml(yaml).unwrap();

        assert_eq!(config.defaults.max_colors, 8);
        assert_eq!(config.defaults.cols, 80);
        assert_eq!(
            config.defaults.code_format,
            CodeFormat::Prefixed {
                prefix: "DMC-".into()
            }
        );
        assert_eq!(config.limits.max_cols, 120);
        assert_eq!(config.limits.max_rows, 500);
        assert_eq!(config.render, RenderConfig::default());
        assert_eq!(config.store.capacity, 4);
    }

    #[test]
    fn test_empty_yaml_is_default() {
        assert_eq!(AppConfig::from_yaml("").unwrap(), AppConfig::default());
        assert_eq!(AppConfig::from_yaml("  \n").unwrap(), AppConfig::default());
    }

    #[test]
    fn test_unknown_code_format_rejected() {
        let yaml = "defaults:\n  code_format: roman\n";
        assert!(AppConfig::from_yaml(yaml).is_err());
    }

    #[test]
    fn test_load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::load(Some(&dir.path().join("nope.yaml")));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_invalid_file_falls_back() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "defaults: [not, a, mapping]").unwrap();

        let config = AppConfig::load(Some(file.path()));
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "render:\n  cell_size: 20\n  grid_lines: false").unwrap();

        let config = AppConfig::load(Some(file.path()));
        assert_eq!(config.render.cell_size, 20);
        assert!(!config.render.grid_lines);
        assert_eq!(config.defaults, PatternDefaults::default());
    }

    #[test]
    fn test_load_none_is_default() {
        assert_eq!(AppConfig::load(None), AppConfig::default());
    }
}
