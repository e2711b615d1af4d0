//! Build a [`Pattern`] from per-pixel classification results.

use std::cmp::Reverse;
use std::collections::HashMap;

use super::code::CodeFormat;
use super::pattern::{Pattern, PatternColor};
use crate::api::QuantizeError;
use crate::color::Rgb;

/// Assemble classified pixels into a coded grid.
///
/// `classified` holds the palette color chosen for each pixel, row-major.
/// Colors are tallied by value, so distinct boxes that averaged to the same
/// color collapse into one code. Codes are assigned by descending count; a
/// tie goes to the color seen first in the row-major scan.
///
/// # Errors
///
/// [`QuantizeError::DimensionMismatch`] if `classified.len() != rows * cols`.
///
/// # Example
///
/// ```
/// use stitch_quant::{assemble, CodeFormat, Rgb};
///
/// let black = Rgb::new(0, 0, 0);
/// let white = Rgb::new(255, 255, 255);
/// let pattern = assemble(&[white, black, black, white], 2, 2, &CodeFormat::Padded).unwrap();
///
/// // Tied counts: white was seen first
/// assert_eq!(pattern.code_at(0, 0), Some("01"));
/// assert_eq!(pattern.color_for("02"), Some(black));
/// ```
pub fn assemble(
    classified: &[Rgb],
    rows: usize,
    cols: usize,
    format: &CodeFormat,
) -> Result<Pattern, QuantizeError> {
    if rows.checked_mul(cols) != Some(classified.len()) {
        return Err(QuantizeError::DimensionMismatch {
            rows,
            cols,
            len: classified.len(),
        });
    }

    // (color, count) in first-seen order
    let mut tallies: Vec<(Rgb, usize)> = Vec::new();
    let mut slot_of: HashMap<Rgb, usize> = HashMap::new();
    let mut slots = Vec::with_capacity(classified.len());

    for &color in classified {
        let slot = *slot_of.entry(color).or_insert_with(|| {
            tallies.push((color, 0));
            tallies.len() - 1
        });
        tallies[slot].1 += 1;
        slots.push(slot);
    }

    // Stable sort keeps first-seen order among equal counts
    let mut order: Vec<usize> = (0..tallies.len()).collect();
    order.sort_by_key(|&slot| Reverse(tallies[slot].1));

    let mut rank_of_slot = vec![0usize; tallies.len()];
    for (rank, &slot) in order.iter().enumerate() {
        rank_of_slot[slot] = rank;
    }

    let total = order.len();
    let colors: Vec<PatternColor> = order
        .iter()
        .enumerate()
        .map(|(rank, &slot)| PatternColor {
            code: format.code(rank, total),
            color: tallies[slot].0,
            count: tallies[slot].1,
        })
        .collect();

    let cells = slots.into_iter().map(|slot| rank_of_slot[slot]).collect();

    Ok(Pattern::from_parts(rows, cols, cells, colors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn rgb(r: u8, g: u8, b: u8) -> Rgb {
        Rgb::new(r, g, b)
    }

    #[test]
    fn test_codes_follow_descending_count() {
        let a = rgb(1, 1, 1);
        let b = rgb(2, 2, 2);
        let c = rgb(3, 3, 3);
        // a:1, b:3, c:2
        let pattern = assemble(&[a, b, c, b, c, b], 2, 3, &CodeFormat::Numeric).unwrap();

        let summary: Vec<(&str, Rgb, usize)> = pattern
            .colors()
            .iter()
            .map(|e| (e.code.as_str(), e.color, e.count))
            .collect();
        assert_eq!(summary, vec![("1", b, 3), ("2", c, 2), ("3", a, 1)]);
        assert_eq!(
            pattern.grid(),
            vec![vec!["3", "1", "2"], vec!["1", "2", "1"]]
        );
    }

    #[test]
    fn test_ties_keep_first_seen_order() {
        let a = rgb(10, 0, 0);
        let b = rgb(0, 10, 0);
        let c = rgb(0, 0, 10);
        let pattern = assemble(&[c, a, b, b, a, c], 1, 6, &CodeFormat::Padded).unwrap();
        let order: Vec<Rgb> = pattern.colors().iter().map(|e| e.color).collect();
        assert_eq!(order, vec![c, a, b]);
    }

    #[test]
    fn test_identical_colors_collapse() {
        let gray = rgb(42, 42, 42);
        let pattern = assemble(&[gray; 9], 3, 3, &CodeFormat::Padded).unwrap();
        assert_eq!(pattern.num_colors(), 1);
        assert_eq!(pattern.count_for("01"), Some(9));
    }

    #[test]
    fn test_dimension_mismatch() {
        let result = assemble(&[rgb(0, 0, 0); 3], 2, 2, &CodeFormat::Padded);
        assert_eq!(
            result,
            Err(QuantizeError::DimensionMismatch {
                rows: 2,
                cols: 2,
                len: 3
            })
        );
    }

    #[test]
    fn test_empty_grid_keeps_shape() {
        let pattern = assemble(&[], 3, 0, &CodeFormat::Padded).unwrap();
        assert_eq!(pattern.rows(), 3);
        assert_eq!(pattern.cols(), 0);
        assert_eq!(pattern.num_colors(), 0);
        assert_eq!(pattern.grid(), vec![Vec::<&str>::new(); 3]);
    }

    #[test]
    fn test_no_rows_means_no_cols() {
        let pattern = assemble(&[], 0, 4, &CodeFormat::Padded).unwrap();
        assert_eq!(pattern.rows(), 0);
        assert_eq!(pattern.cols(), 0);

        let json = serde_json::to_string(&pattern).unwrap();
        let reloaded: Pattern = serde_json::from_str(&json).unwrap();
        assert_eq!(reloaded, pattern);
    }

    #[test]
    fn test_prefixed_codes() {
        let format = CodeFormat::Prefixed { prefix: "S".into() };
        let pattern = assemble(&[rgb(0, 0, 0), rgb(9, 9, 9)], 1, 2, &format).unwrap();
        assert_eq!(pattern.grid(), vec![vec!["S1", "S2"]]);
    }
}
