use image::imageops::{self, FilterType};
use image::RgbImage;
use stitch_quant::Rgb;

/// Grid height that keeps the source aspect ratio for `cols` columns.
pub fn target_rows(width: u32, height: u32, cols: usize) -> usize {
    if width == 0 {
        return 1;
    }
    let w = width as u64;
    let scaled = (cols as u64 * height as u64 * 2 + w) / (2 * w);
    (scaled as usize).max(1)
}

/// Resample onto a `cols x rows` grid, returned row-major.
///
/// Shrinking averages the source block behind each cell
/// (`imageops::thumbnail`). Growing on either axis repeats source pixels
/// with nearest-neighbour sampling so flat colors stay flat.
pub fn resample(image: &RgbImage, cols: usize, rows: usize) -> Vec<Rgb> {
    if cols == 0 || rows == 0 {
        return Vec::new();
    }
    let (cols, rows) = (cols as u32, rows as u32);

    let scaled = if cols <= image.width() && rows <= image.height() {
        imageops::thumbnail(image, cols, rows)
    } else {
        imageops::resize(image, cols, rows, FilterType::Nearest)
    };

    scaled.pixels().map(|p| Rgb::from_bytes(p.0)).collect()
}
