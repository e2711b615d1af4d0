use std::sync::Arc;
use std::time::Instant;

use stitch_quant::{CodeFormat, Pattern, PixelBuffer, Quantizer};

use crate::error::PipelineError;
use crate::imaging::{decode_png, resample, target_rows};
use crate::models::AppConfig;

/// Raw pixels supplied by the caller.
#[derive(Debug, Clone, Default)]
pub struct PixelRequest {
    pub rows: usize,
    pub cols: usize,
    pub pixels: Vec<[i64; 3]>,
    pub max_colors: Option<usize>,
    pub code_format: Option<CodeFormat>,
}

/// Grid parameters for an uploaded image. Unset fields come from the
/// configured defaults; `rows` follows the image's aspect ratio.
#[derive(Debug, Clone, Default)]
pub struct ImageRequest {
    pub cols: Option<usize>,
    pub rows: Option<usize>,
    pub max_colors: Option<usize>,
    pub code_format: Option<CodeFormat>,
}

/// Turns requests into patterns under the configured defaults and limits.
///
/// All work is synchronous and CPU-bound; async callers should run it on
/// the blocking pool.
pub struct PatternService {
    config: Arc<AppConfig>,
}

impl PatternService {
    pub fn new(config: Arc<AppConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    fn quantizer(
        &self,
        max_colors: Option<usize>,
        code_format: Option<&CodeFormat>,
    ) -> Result<Quantizer, PipelineError> {
        let max_colors = max_colors.unwrap_or(self.config.defaults.max_colors);
        check_max("max_colors", max_colors, self.config.limits.max_colors)?;

        let format = code_format
            .cloned()
            .unwrap_or_else(|| self.config.defaults.code_format.clone());
        Ok(Quantizer::new(max_colors)?.code_format(format))
    }

    /// Quantize caller-supplied pixels.
    pub fn from_pixels(&self, request: &PixelRequest) -> Result<Pattern, PipelineError> {
        let quantizer = self.quantizer(request.max_colors, request.code_format.as_ref())?;
        check_max("rows", request.rows, self.config.limits.max_rows)?;
        check_max("cols", request.cols, self.config.limits.max_cols)?;

        let buffer = PixelBuffer::from_channels(&request.pixels, request.rows, request.cols)?;

        let start = Instant::now();
        let pattern = quantizer.quantize(&buffer)?;
        tracing::info!(
            rows = pattern.rows(),
            cols = pattern.cols(),
            num_colors = pattern.num_colors(),
            quantize_ms = start.elapsed().as_millis() as u64,
            "Built pattern from pixels"
        );

        Ok(pattern)
    }

    /// Decode a PNG, resample it onto the grid and quantize.
    pub fn from_png(&self, bytes: &[u8], request: &ImageRequest) -> Result<Pattern, PipelineError> {
        let limits = &self.config.limits;
        let quantizer = self.quantizer(request.max_colors, request.code_format.as_ref())?;

        let cols = request.cols.unwrap_or(self.config.defaults.cols);
        check_grid("cols", cols, limits.max_cols)?;
        if let Some(rows) = request.rows {
            check_grid("rows", rows, limits.max_rows)?;
        }

        let start = Instant::now();
        let image = decode_png(bytes, limits.max_source_pixels)?;
        let decode_ms = start.elapsed().as_millis() as u64;

        let rows = match request.rows {
            Some(rows) => rows,
            None => {
                let rows = target_rows(image.width(), image.height(), cols);
                check_grid("rows", rows, limits.max_rows)?;
                rows
            }
        };

        let start = Instant::now();
        let pixels = resample(&image, cols, rows);
        let resample_ms = start.elapsed().as_millis() as u64;

        let buffer = PixelBuffer::new(pixels, rows, cols)?;
        let start = Instant::now();
        let pattern = quantizer.quantize(&buffer)?;
        let quantize_ms = start.elapsed().as_millis() as u64;

        tracing::info!(
            source_width = image.width(),
            source_height = image.height(),
            rows,
            cols,
            num_colors = pattern.num_colors(),
            decode_ms,
            resample_ms,
            quantize_ms,
            "Built pattern from image"
        );

        Ok(pattern)
    }
}

fn check_max(field: &'static str, value: usize, max: usize) -> Result<(), PipelineError> {
    if value > max {
        return Err(PipelineError::OutOfBounds { field, value, max });
    }
    Ok(())
}

fn check_grid(field: &'static str, value: usize, max: usize) -> Result<(), PipelineError> {
    if value == 0 {
        return Err(PipelineError::Zero { field });
    }
    check_max(field, value, max)
}
