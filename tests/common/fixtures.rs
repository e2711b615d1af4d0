//! Test fixtures and constants.

use serde_json::json;

/// The 2x2 example: two black pixels, one white, one red
pub fn two_by_two_request(max_colors: usize) -> serde_json::Value {
    json!({
        "rows": 2,
        "cols": 2,
        "pixels": [[0, 0, 0], [255, 255, 255], [0, 0, 0], [255, 0, 0]],
        "max_colors": max_colors,
    })
}

/// Encode RGB8 pixel data as a PNG
pub fn rgb_png(width: u32, height: u32, data: &[u8]) -> Vec<u8> {
    assert_eq!(data.len(), (width * height * 3) as usize);
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(data).unwrap();
    }
    out
}

/// A `width x height` image split into a black left half and a white right half
pub fn half_and_half_png(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..height {
        for x in 0..width {
            let v = if x < width / 2 { 0 } else { 255 };
            data.extend_from_slice(&[v, v, v]);
        }
    }
    rgb_png(width, height, &data)
}

/// Horizontal red-to-blue gradient
pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    let mut data = Vec::with_capacity((width * height * 3) as usize);
    for _ in 0..height {
        for x in 0..width {
            let t = (x * 255 / (width - 1).max(1)) as u8;
            data.extend_from_slice(&[255 - t, 0, t]);
        }
    }
    rgb_png(width, height, &data)
}
