use thiserror::Error;

/// A serialized pattern that does not describe a consistent grid.
///
/// Returned when reloading a persisted [`Pattern`](super::Pattern).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatternError {
    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedGrid {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("code '{code}' appears more than once in {map}")]
    DuplicateCode { map: &'static str, code: String },

    #[error("codes '{first}' and '{code}' map to the same color")]
    DuplicateColor { first: String, code: String },

    #[error("code '{code}' counts {count} cells after '{previous}' with {previous_count}; colorMap must be in descending count order")]
    CountOrder {
        previous: String,
        previous_count: usize,
        code: String,
        count: usize,
    },

    #[error("code '{0}' has no entry in colorCounts")]
    MissingCount(String),

    #[error("colorCounts has code '{0}' that is not in colorMap")]
    UnexpectedCount(String),

    #[error("grid cell ({row}, {col}) uses unknown code '{code}'")]
    UnknownCode { row: usize, col: usize, code: String },

    #[error("code '{code}' declares {declared} cells but the grid has {actual}")]
    CountMismatch {
        code: String,
        declared: usize,
        actual: usize,
    },

    #[error("numColors is {declared} but colorMap has {actual} entries")]
    NumColorsMismatch { declared: usize, actual: usize },
}
