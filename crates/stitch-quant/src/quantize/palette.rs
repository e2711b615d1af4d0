//! Ordered palette with nearest-color matching.

#[cfg(feature = "threads")]
use rayon::prelude::*;

use crate::color::Rgb;

/// An ordered list of representative colors.
///
/// Entries keep the order in which median cut produced them and may repeat:
/// two boxes can average to the same color. Matching always prefers the
/// earliest entry, so a repeated color never wins over its first occurrence.
///
/// # Example
///
/// ```
/// use stitch_quant::{Palette, Rgb};
///
/// let palette = Palette::new(vec![Rgb::new(0, 0, 0), Rgb::new(255, 255, 255)]);
/// assert_eq!(palette.nearest(Rgb::new(40, 40, 40)), Some(Rgb::new(0, 0, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    #[inline]
    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    #[inline]
    pub fn get(&self, idx: usize) -> Option<Rgb> {
        self.colors.get(idx).copied()
    }

    /// Find the palette entry closest to `pixel` by squared RGB distance.
    ///
    /// Returns `(index, distance)`. Only a strictly smaller distance replaces
    /// the current best, so the first of several equidistant entries wins.
    /// `None` for an empty palette.
    #[inline]
    pub fn find_nearest(&self, pixel: Rgb) -> Option<(usize, u32)> {
        // Linear scan; palettes are small
        let mut best: Option<(usize, u32)> = None;
        for (i, &color) in self.colors.iter().enumerate() {
            let dist = pixel.distance_squared(color);
            if best.map_or(true, |(_, best_dist)| dist < best_dist) {
                best = Some((i, dist));
                if dist == 0 {
                    break;
                }
            }
        }
        best
    }

    /// The closest palette color to `pixel`.
    #[inline]
    pub fn nearest(&self, pixel: Rgb) -> Option<Rgb> {
        self.find_nearest(pixel).map(|(idx, _)| self.colors[idx])
    }

    /// Map every pixel to its nearest palette color, preserving order.
    ///
    /// Each pixel is matched independently. With the `threads` feature the
    /// work is spread over the rayon pool; the result is identical.
    ///
    /// An empty palette matches nothing and yields an empty result.
    pub fn classify(&self, pixels: &[Rgb]) -> Vec<Rgb> {
        if self.colors.is_empty() {
            return Vec::new();
        }

        #[cfg(feature = "threads")]
        let classified: Vec<Rgb> = pixels
            .par_iter()
            .filter_map(|&p| self.nearest(p))
            .collect();

        #[cfg(not(feature = "threads"))]
        let classified: Vec<Rgb> = pixels.iter().filter_map(|&p| self.nearest(p)).collect();

        classified
    }
}

impl From<Vec<Rgb>> for Palette {
    fn from(colors: Vec<Rgb>) -> Self {
        Self::new(colors)
    }
}
