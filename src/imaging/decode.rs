use std::io::Cursor;

use image::RgbImage;
use stitch_quant::Rgb;

use crate::error::ImageError;

/// Color of one pixel of a decoded image.
pub fn pixel_at(image: &RgbImage, x: u32, y: u32) -> Rgb {
    Rgb::from_bytes(image.get_pixel(x, y).0)
}

/// Decode a PNG into opaque RGB.
///
/// Palette and low-bit-depth images are expanded, 16-bit channels are
/// truncated to 8 bits, and transparent pixels are composited over white.
/// Images above `max_pixels` are rejected before the frame is allocated.
pub fn decode_png(bytes: &[u8], max_pixels: u64) -> Result<RgbImage, ImageError> {
    let mut decoder = png::Decoder::new(Cursor::new(bytes));
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);

    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageError::Decode(e.to_string()))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    if width == 0 || height == 0 {
        return Err(ImageError::UnsupportedDimensions {
            width: width as u64,
            height: height as u64,
        });
    }
    let pixels = width as u64 * height as u64;
    if pixels > max_pixels {
        return Err(ImageError::TooLarge {
            pixels,
            max: max_pixels,
        });
    }

    let mut buf = vec![0u8; reader.output_buffer_size()];
    let frame = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageError::Decode(e.to_string()))?;
    let data = &buf[..frame.buffer_size()];

    if frame.bit_depth != png::BitDepth::Eight {
        return Err(ImageError::Decode(format!(
            "unexpected output bit depth {:?}",
            frame.bit_depth
        )));
    }

    let rgb: Vec<u8> = match frame.color_type {
        png::ColorType::Grayscale => data.iter().flat_map(|&v| [v, v, v]).collect(),
        png::ColorType::GrayscaleAlpha => data
            .chunks_exact(2)
            .flat_map(|px| {
                let v = over_white(px[0], px[1]);
                [v, v, v]
            })
            .collect(),
        png::ColorType::Rgb => data.to_vec(),
        png::ColorType::Rgba => data
            .chunks_exact(4)
            .flat_map(|px| {
                [
                    over_white(px[0], px[3]),
                    over_white(px[1], px[3]),
                    over_white(px[2], px[3]),
                ]
            })
            .collect(),
        png::ColorType::Indexed => {
            return Err(ImageError::Decode(
                "indexed output after palette expansion".to_string(),
            ))
        }
    };

    let len = rgb.len();
    let image = RgbImage::from_raw(width, height, rgb).ok_or_else(|| {
        ImageError::Decode(format!(
            "frame holds {len} bytes, expected {width}x{height} RGB"
        ))
    })?;

    tracing::debug!(width, height, color_type = ?frame.color_type, "Decoded PNG");

    Ok(image)
}

/// Composite one channel over a white background, rounding half up.
fn over_white(value: u8, alpha: u8) -> u8 {
    let v = value as u32 * alpha as u32 + 255 * (255 - alpha as u32);
    ((v + 127) / 255) as u8
}
