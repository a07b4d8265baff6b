//! Error types for sortfix-edit.
//!
//! Replacement sets reaching this crate were synthesized against the exact
//! source text in a dump; every variant here means the caller's span contract
//! was broken (stale plan, corrupted dump, or a buggy extractor), so apply
//! refuses to touch the text at all.

use sortfix_types::member::Span;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EditError {
    /// A replacement span reaches past the end of the source text.
    #[error("replacement span {start}..{end} is out of bounds for source of length {len}")]
    OutOfBounds { start: u64, end: u64, len: u64 },

    /// A replacement span starts or ends in the middle of a UTF-8 character.
    #[error("replacement span {start}..{end} does not fall on character boundaries")]
    NotCharBoundary { start: u64, end: u64 },

    /// Replacement spans are not sorted by start offset.
    #[error("replacement spans must be sorted by start offset")]
    Unordered,

    /// Two replacement spans share at least one byte.
    #[error("replacement spans {first:?} and {second:?} overlap")]
    Overlap { first: Span, second: Span },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_the_offending_span() {
        let err = EditError::OutOfBounds {
            start: 4,
            end: 9,
            len: 7,
        };
        assert_eq!(
            err.to_string(),
            "replacement span 4..9 is out of bounds for source of length 7"
        );

        let err = EditError::Overlap {
            first: Span::new(0, 5),
            second: Span::new(3, 8),
        };
        assert!(err.to_string().contains("overlap"));
    }
}
