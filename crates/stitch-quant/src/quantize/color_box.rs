//! Axis-aligned region of RGB space used while partitioning.

use crate::color::{Channel, Rgb};

/// A non-empty, ordered subset of pixels and its per-channel bounds.
///
/// Pixel order is significant: [`split`](Self::split) uses a stable sort, so
/// pixels that tie on the split axis keep the order they had in this box.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorBox {
    pixels: Vec<Rgb>,
    min: Rgb,
    max: Rgb,
    volume: u32,
}

impl ColorBox {
    /// Create a box over `pixels`, or `None` if `pixels` is empty.
    pub fn new(pixels: Vec<Rgb>) -> Option<Self> {
        let first = *pixels.first()?;
        let (min, max) = pixels.iter().fold((first, first), |(lo, hi), p| {
            (
                Rgb::new(lo.r.min(p.r), lo.g.min(p.g), lo.b.min(p.b)),
                Rgb::new(hi.r.max(p.r), hi.g.max(p.g), hi.b.max(p.b)),
            )
        });
        let volume = [Channel::Red, Channel::Green, Channel::Blue]
            .iter()
            .map(|&c| (max.channel(c) - min.channel(c)) as u32)
            .product();

        Some(Self {
            pixels,
            min,
            max,
            volume,
        })
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pixels.len()
    }

    /// Always false; empty boxes cannot be constructed.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pixels.is_empty()
    }

    #[inline]
    pub fn min(&self) -> Rgb {
        self.min
    }

    #[inline]
    pub fn max(&self) -> Rgb {
        self.max
    }

    /// `max - min` on one channel.
    #[inline]
    pub fn range(&self, channel: Channel) -> u8 {
        self.max.channel(channel) - self.min.channel(channel)
    }

    /// Product of the three channel ranges.
    ///
    /// Zero whenever any channel is flat, including multi-pixel boxes whose
    /// pixels are all identical.
    #[inline]
    pub fn volume(&self) -> u32 {
        self.volume
    }

    /// A single-pixel box is terminal.
    #[inline]
    pub fn is_splittable(&self) -> bool {
        self.pixels.len() > 1
    }

    /// Channel with the widest range. Ties resolve to red, then green, then blue.
    pub fn longest_axis(&self) -> Channel {
        let r = self.range(Channel::Red);
        let g = self.range(Channel::Green);
        let b = self.range(Channel::Blue);

        if r >= g && r >= b {
            Channel::Red
        } else if g >= r && g >= b {
            Channel::Green
        } else {
            Channel::Blue
        }
    }

    /// Split at the median of the longest axis.
    ///
    /// Pixels are stably sorted on [`longest_axis`](Self::longest_axis) and cut
    /// at `len / 2`; the first half goes to the first box. A single-pixel box
    /// is handed back unchanged as `Err`.
    pub fn split(mut self) -> Result<(ColorBox, ColorBox), ColorBox> {
        if !self.is_splittable() {
            return Err(self);
        }

        let axis = self.longest_axis();
        // sort_by_key is stable
        self.pixels.sort_by_key(|p| p.channel(axis));

        let upper = self.pixels.split_off(self.pixels.len() / 2);
        match (ColorBox::new(self.pixels), ColorBox::new(upper)) {
            (Some(first), Some(second)) => Ok((first, second)),
            // len >= 2 puts at least one pixel on each side
            _ => unreachable!("median split produced an empty half"),
        }
    }

    /// Per-channel mean, each rounded half up.
    pub fn average(&self) -> Rgb {
        let n = self.pixels.len() as u64;
        let (r, g, b) = self.pixels.iter().fold((0u64, 0u64, 0u64), |(r, g, b), p| {
            (r + p.r as u64, g + p.g as u64, b + p.b as u64)
        });
        // floor((2 * sum + n) / (2 * n)) == floor(sum / n + 0.5)
        let mean = |sum: u64| ((2 * sum + n) / (2 * n)) as u8;
        Rgb::new(mean(r), mean(g), mean(b))
    }
}
