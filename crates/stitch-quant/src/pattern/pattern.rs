//! The assembled pattern and its serialized form.

use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::{SerializeMap, SerializeStruct};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::PatternError;
use crate::color::Rgb;

/// One distinct output color.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PatternColor {
    pub code: String,
    pub color: Rgb,
    /// Number of grid cells using this color (always positive)
    pub count: usize,
}

/// A stitch grid: every cell holds the code of one pattern color.
///
/// Colors are stored in code-assignment order (descending count, ties by
/// first appearance). Cells are stored row-major as indices into that list.
///
/// Serializes to JSON as
///
/// ```json
/// {
///   "grid": [["01", "02"], ["01", "02"]],
///   "colorMap": {"01": "#000000", "02": "#FF8080"},
///   "colorCounts": {"01": 2, "02": 2},
///   "numColors": 2
/// }
/// ```
///
/// with map entries in code-assignment order, so identical patterns always
/// serialize to identical bytes. Deserializing validates that the parts
/// agree with each other.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "PatternWire")]
pub struct Pattern {
    rows: usize,
    cols: usize,
    cells: Vec<usize>,
    colors: Vec<PatternColor>,
}

impl Pattern {
    /// Callers guarantee `cells.len() == rows * cols` and every cell indexes `colors`.
    ///
    /// A grid without rows has no columns either, since `[]` serializes the
    /// same for any width.
    pub(crate) fn from_parts(
        rows: usize,
        cols: usize,
        cells: Vec<usize>,
        colors: Vec<PatternColor>,
    ) -> Self {
        debug_assert_eq!(cells.len(), rows * cols);
        debug_assert!(cells.iter().all(|&c| c < colors.len()));
        let cols = if rows == 0 { 0 } else { cols };
        Self {
            rows,
            cols,
            cells,
            colors,
        }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Number of distinct colors (size of the color map).
    #[inline]
    pub fn num_colors(&self) -> usize {
        self.colors.len()
    }

    /// Colors in code-assignment order.
    #[inline]
    pub fn colors(&self) -> &[PatternColor] {
        &self.colors
    }

    /// Row-major cell values as indices into [`colors`](Self::colors).
    #[inline]
    pub fn cells(&self) -> &[usize] {
        &self.cells
    }

    pub fn code_at(&self, row: usize, col: usize) -> Option<&str> {
        self.entry_at(row, col).map(|c| c.code.as_str())
    }

    pub fn color_at(&self, row: usize, col: usize) -> Option<Rgb> {
        self.entry_at(row, col).map(|c| c.color)
    }

    /// The grid as rows of codes.
    pub fn grid(&self) -> Vec<Vec<&str>> {
        if self.cols == 0 {
            return vec![Vec::new(); self.rows];
        }
        self.cells
            .chunks(self.cols)
            .map(|row| row.iter().map(|&i| self.colors[i].code.as_str()).collect())
            .collect()
    }

    pub fn color_for(&self, code: &str) -> Option<Rgb> {
        self.colors.iter().find(|c| c.code == code).map(|c| c.color)
    }

    pub fn count_for(&self, code: &str) -> Option<usize> {
        self.colors.iter().find(|c| c.code == code).map(|c| c.count)
    }

    fn entry_at(&self, row: usize, col: usize) -> Option<&PatternColor> {
        if row >= self.rows || col >= self.cols {
            return None;
        }
        self.cells
            .get(row * self.cols + col)
            .map(|&i| &self.colors[i])
    }
}

impl Serialize for Pattern {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Pattern", 4)?;
        state.serialize_field("grid", &self.grid())?;
        state.serialize_field("colorMap", &ColorMapView(&self.colors))?;
        state.serialize_field("colorCounts", &ColorCountsView(&self.colors))?;
        state.serialize_field("numColors", &self.colors.len())?;
        state.end()
    }
}

struct ColorMapView<'a>(&'a [PatternColor]);

impl Serialize for ColorMapView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.code, &entry.color)?;
        }
        map.end()
    }
}

struct ColorCountsView<'a>(&'a [PatternColor]);

impl Serialize for ColorCountsView<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for entry in self.0 {
            map.serialize_entry(&entry.code, &entry.count)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PatternWire {
    grid: Vec<Vec<String>>,
    color_map: OrderedEntries<Rgb>,
    color_counts: OrderedEntries<usize>,
    num_colors: usize,
}

/// JSON object read as a list of entries in document order.
struct OrderedEntries<V>(Vec<(String, V)>);

impl<'de, V: Deserialize<'de>> Deserialize<'de> for OrderedEntries<V> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct EntriesVisitor<V>(PhantomData<V>);

        impl<'de, V: Deserialize<'de>> Visitor<'de> for EntriesVisitor<V> {
            type Value = OrderedEntries<V>;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map keyed by code")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some(entry) = access.next_entry::<String, V>()? {
                    entries.push(entry);
                }
                Ok(OrderedEntries(entries))
            }
        }

        deserializer.deserialize_map(EntriesVisitor(PhantomData))
    }
}

impl TryFrom<PatternWire> for Pattern {
    type Error = PatternError;

    fn try_from(wire: PatternWire) -> Result<Self, Self::Error> {
        let rows = wire.grid.len();
        let cols = wire.grid.first().map_or(0, Vec::len);

        let mut index: HashMap<&str, usize> = HashMap::with_capacity(wire.color_map.0.len());
        for (i, (code, _)) in wire.color_map.0.iter().enumerate() {
            if index.insert(code.as_str(), i).is_some() {
                return Err(PatternError::DuplicateCode {
                    map: "colorMap",
                    code: code.clone(),
                });
            }
        }

        let mut code_of_color: HashMap<Rgb, &str> = HashMap::with_capacity(index.len());
        for (code, color) in &wire.color_map.0 {
            if let Some(first) = code_of_color.insert(*color, code.as_str()) {
                return Err(PatternError::DuplicateColor {
                    first: first.to_string(),
                    code: code.clone(),
                });
            }
        }

        let mut declared_counts = vec![None; wire.color_map.0.len()];
        for (code, count) in &wire.color_counts.0 {
            let &i = index
                .get(code.as_str())
                .ok_or_else(|| PatternError::UnexpectedCount(code.clone()))?;
            if declared_counts[i].replace(*count).is_some() {
                return Err(PatternError::DuplicateCode {
                    map: "colorCounts",
                    code: code.clone(),
                });
            }
        }

        let mut cells = Vec::with_capacity(rows * cols);
        let mut actual = vec![0usize; wire.color_map.0.len()];
        for (row, codes) in wire.grid.iter().enumerate() {
            if codes.len() != cols {
                return Err(PatternError::RaggedGrid {
                    row,
                    expected: cols,
                    found: codes.len(),
                });
            }
            for (col, code) in codes.iter().enumerate() {
                let &i = index
                    .get(code.as_str())
                    .ok_or_else(|| PatternError::UnknownCode {
                        row,
                        col,
                        code: code.clone(),
                    })?;
                actual[i] += 1;
                cells.push(i);
            }
        }

        let mut colors: Vec<PatternColor> = Vec::with_capacity(wire.color_map.0.len());
        for (i, (code, color)) in wire.color_map.0.iter().enumerate() {
            let declared = declared_counts[i].ok_or_else(|| PatternError::MissingCount(code.clone()))?;
            if declared != actual[i] || declared == 0 {
                return Err(PatternError::CountMismatch {
                    code: code.clone(),
                    declared,
                    actual: actual[i],
                });
            }
            if let Some(previous) = colors.last().filter(|p| p.count < declared) {
                return Err(PatternError::CountOrder {
                    previous: previous.code.clone(),
                    previous_count: previous.count,
                    code: code.clone(),
                    count: declared,
                });
            }
            colors.push(PatternColor {
                code: code.clone(),
                color: *color,
                count: declared,
            });
        }

        if wire.num_colors != colors.len() {
            return Err(PatternError::NumColorsMismatch {
                declared: wire.num_colors,
                actual: colors.len(),
            });
        }

        Ok(Pattern::from_parts(rows, cols, cells, colors))
    }
}
