//! Raster preview of a pattern.
//!
//! Each stitch becomes a `cell_size` square filled with its color. With grid
//! lines enabled, cells are separated by 1px light lines, and every tenth line
//! (counting the outer border) is drawn darker, the way printed charts mark
//! blocks of ten stitches.

use std::io::Cursor;

use stitch_quant::{Pattern, Rgb};

use crate::error::ImageError;

const MINOR_LINE: Rgb = Rgb::new(200, 200, 200);
const MAJOR_LINE: Rgb = Rgb::new(80, 80, 80);
const MAJOR_EVERY: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewOptions {
    pub cell_size: u32,
    pub grid_lines: bool,
}

/// What a pixel row or column falls on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Track {
    Cell(usize),
    Line { major: bool },
}

/// Map every pixel along one axis to the cell or line it belongs to.
fn tracks(cells: usize, cell_size: usize, grid_lines: bool) -> Vec<Track> {
    let mut out = Vec::new();
    for cell in 0..cells {
        if grid_lines {
            out.push(Track::Line {
                major: cell % MAJOR_EVERY == 0,
            });
        }
        out.extend(std::iter::repeat(Track::Cell(cell)).take(cell_size));
    }
    if grid_lines {
        out.push(Track::Line { major: true });
    }
    out
}

/// Render the pattern as an RGB8 PNG.
pub fn render_png(
    pattern: &Pattern,
    options: &PreviewOptions,
    max_pixels: u64,
) -> Result<Vec<u8>, ImageError> {
    let line = u64::from(options.grid_lines);
    let span = |cells: usize| cells as u64 * (options.cell_size as u64 + line) + line;
    let (width, height) = (span(pattern.cols()), span(pattern.rows()));

    if pattern.cols() == 0 || pattern.rows() == 0 || options.cell_size == 0 {
        return Err(ImageError::UnsupportedDimensions { width, height });
    }
    let too_large = |pixels| ImageError::TooLarge {
        pixels,
        max: max_pixels,
    };
    let pixels = width.checked_mul(height).ok_or_else(|| too_large(u64::MAX))?;
    if pixels > max_pixels || width > u32::MAX as u64 || height > u32::MAX as u64 {
        return Err(too_large(pixels));
    }

    let cell_size = options.cell_size as usize;
    let xs = tracks(pattern.cols(), cell_size, options.grid_lines);
    let ys = tracks(pattern.rows(), cell_size, options.grid_lines);

    let mut data = Vec::with_capacity(pixels as usize * 3);
    for y in &ys {
        for x in &xs {
            let color = match (*y, *x) {
                (Track::Cell(row), Track::Cell(col)) => {
                    pattern.color_at(row, col).unwrap_or(Rgb::new(255, 255, 255))
                }
                (Track::Line { major: true }, _) | (_, Track::Line { major: true }) => MAJOR_LINE,
                _ => MINOR_LINE,
            };
            data.extend_from_slice(&color.to_bytes());
        }
    }

    let bytes = encode_rgb(width as u32, height as u32, &data)?;
    tracing::debug!(
        width,
        height,
        cell_size = options.cell_size,
        grid_lines = options.grid_lines,
        bytes = bytes.len(),
        "Rendered preview"
    );
    Ok(bytes)
}

fn encode_rgb(width: u32, height: u32, data: &[u8]) -> Result<Vec<u8>, ImageError> {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Fast);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageError::Encode(e.to_string()))?;
        writer
            .write_image_data(data)
            .map_err(|e| ImageError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}
