//! Median-cut partitioning of a pixel buffer.

use super::color_box::ColorBox;
use super::palette::Palette;
use crate::api::QuantizeError;
use crate::color::Rgb;

/// Split `pixels` into at most `max_colors` boxes.
///
/// Starts from a single box holding every pixel in input order, then
/// repeatedly splits the splittable box with the greatest volume, replacing
/// it in place by its two halves. Stops when `max_colors` boxes exist or when
/// every box holds a single pixel.
///
/// Empty input yields no boxes.
///
/// # Errors
///
/// [`QuantizeError::InvalidMaxColors`] if `max_colors` is zero.
pub fn partition(pixels: Vec<Rgb>, max_colors: usize) -> Result<Vec<ColorBox>, QuantizeError> {
    if max_colors < 1 {
        return Err(QuantizeError::InvalidMaxColors);
    }

    let Some(root) = ColorBox::new(pixels) else {
        return Ok(Vec::new());
    };

    let mut boxes = Vec::with_capacity(max_colors.min(root.len()));
    boxes.push(root);

    while boxes.len() < max_colors {
        let Some(idx) = select_box(&boxes) else {
            tracing::trace!(boxes = boxes.len(), "no splittable box left");
            break;
        };

        let chosen = boxes.remove(idx);
        tracing::trace!(
            index = idx,
            pixels = chosen.len(),
            volume = chosen.volume(),
            axis = ?chosen.longest_axis(),
            "splitting box"
        );
        match chosen.split() {
            Ok((first, second)) => {
                boxes.splice(idx..idx, [first, second]);
            }
            Err(terminal) => {
                // select_box only returns splittable boxes
                boxes.insert(idx, terminal);
                break;
            }
        }
    }

    Ok(boxes)
}

/// Quantize `pixels` to an ordered palette of at most `max_colors` entries.
///
/// One entry per final box, in box order. Several boxes may average to the
/// same color, so entries are not necessarily distinct.
///
/// # Example
///
/// ```
/// use stitch_quant::{median_cut, Rgb};
///
/// let pixels = [Rgb::new(0, 0, 0), Rgb::new(0, 0, 0), Rgb::new(250, 250, 250)];
/// let palette = median_cut(&pixels, 2).unwrap();
/// assert_eq!(palette.colors(), &[Rgb::new(0, 0, 0), Rgb::new(125, 125, 125)]);
/// ```
pub fn median_cut(pixels: &[Rgb], max_colors: usize) -> Result<Palette, QuantizeError> {
    let boxes = partition(pixels.to_vec(), max_colors)?;
    let palette = Palette::new(boxes.iter().map(ColorBox::average).collect());

    tracing::debug!(
        pixels = pixels.len(),
        max_colors,
        palette = palette.len(),
        "median cut finished"
    );

    Ok(palette)
}

/// Index of the splittable box with strictly greatest volume; earliest wins ties.
fn select_box(boxes: &[ColorBox]) -> Option<usize> {
    let mut best: Option<(usize, u32)> = None;
    for (i, b) in boxes.iter().enumerate() {
        if !b.is_splittable() {
            continue;
        }
        match best {
            Some((_, volume)) if b.volume() <= volume => {}
            _ => best = Some((i, b.volume())),
        }
    }
    best.map(|(i, _)| i)
}
