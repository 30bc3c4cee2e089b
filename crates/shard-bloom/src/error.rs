//! Error types for the sharded Bloom filter
//!
//! Two families:
//! - `FilterError`: range errors raised while sizing or constructing a filter
//! - `ParseError`: format, overflow and argument errors from the integer parser

use thiserror::Error;

use crate::domain::hex_span::IntWidth;

/// Errors that can occur while building or using a filter
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("Capacity out of range: {capacity} (must be at least 1)")]
    CapacityOutOfRange { capacity: i64 },

    #[error("Error rate out of range: {error_rate} (must be strictly between 0 and 1)")]
    ErrorRateOutOfRange { error_rate: f64 },

    #[error("Capacity too large: {capacity} items at error rate {error_rate} exceeds the addressable bit array")]
    CapacityTooLarge { capacity: i64, error_rate: f64 },

    #[error("Digest parse error: {0}")]
    Parse(#[from] ParseError),
}

impl FilterError {
    /// True for the construction-time range errors
    pub fn is_range(&self) -> bool {
        !matches!(self, FilterError::Parse(_))
    }
}

/// Errors from parsing an integer out of a character window
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty input")]
    Empty,

    #[error("No parsable digits at position {position}")]
    NoDigits { position: usize },

    #[error("Trailing characters at position {position}")]
    TrailingCharacters { position: usize },

    #[error("Negative sign is only allowed for base 10")]
    NegativeNonDecimal,

    #[error("Value does not fit in {width:?}")]
    Overflow { width: IntWidth },

    #[error("Unsupported radix: {0}")]
    UnsupportedRadix(u32),

    #[error("Window too short: need {needed} characters, got {got}")]
    WindowTooShort { needed: usize, got: usize },
}

impl ParseError {
    /// Malformed text: empty, missing digits, junk, misplaced sign or short window
    pub fn is_format(&self) -> bool {
        matches!(
            self,
            ParseError::Empty
                | ParseError::NoDigits { .. }
                | ParseError::TrailingCharacters { .. }
                | ParseError::NegativeNonDecimal
                | ParseError::WindowTooShort { .. }
        )
    }

    pub fn is_overflow(&self) -> bool {
        matches!(self, ParseError::Overflow { .. })
    }

    /// Bad caller-supplied argument (radix)
    pub fn is_argument(&self) -> bool {
        matches!(self, ParseError::UnsupportedRadix(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_taxonomy() {
        assert!(ParseError::Empty.is_format());
        assert!(ParseError::TrailingCharacters { position: 3 }.is_format());
        assert!(ParseError::Overflow { width: IntWidth::I32 }.is_overflow());
        assert!(ParseError::UnsupportedRadix(7).is_argument());
        assert!(!ParseError::UnsupportedRadix(7).is_format());
    }

    #[test]
    fn test_filter_error_range_family() {
        assert!(FilterError::CapacityOutOfRange { capacity: 0 }.is_range());
        assert!(FilterError::ErrorRateOutOfRange { error_rate: 10.0 }.is_range());
        assert!(!FilterError::from(ParseError::Empty).is_range());
    }

    #[test]
    fn test_error_messages_name_the_value() {
        let err = FilterError::CapacityOutOfRange { capacity: -5 };
        assert!(err.to_string().contains("-5"));
    }
}
