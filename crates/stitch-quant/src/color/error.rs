use thiserror::Error;

/// Error type for parsing hex color strings.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseColorError {
    /// Hex string has invalid length (must be 3 or 6 digits after stripping '#')
    #[error("invalid hex color length (expected 3 or 6 digits)")]
    InvalidLength,
    /// A character that is not a hexadecimal digit
    #[error("invalid hex digit at position {position}")]
    InvalidDigit {
        /// Zero-based position within the digits (after '#')
        position: usize,
    },
}
