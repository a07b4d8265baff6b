use serde::{Deserialize, Serialize};

/// Half-open byte range into a dump's source text.
///
/// Spans of distinct members in one declaration never overlap and appear in
/// strictly increasing order matching original textual order. A span is tight
/// around the member's own text; trailing separators and trivia fall outside.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct Span {
    pub start: u64,
    pub end: u64,
}

impl Span {
    pub fn new(start: u64, end: u64) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> u64 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.end <= self.start
    }

    /// True when `self` and `other` share at least one byte.
    pub fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A single declaration member as extracted by the host analyzer.
///
/// The engine treats members as opaque `(name, size, span)` triples; all
/// shape-specific logic (identifier vs. literal vs. computed key) stays in the
/// extractor that produced the dump.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    /// Comparison key: identifier text, literal value, or a raw source slice
    /// when no simple name exists.
    pub name: String,

    /// Textual length of the member's span. Only the line-length policy reads
    /// it.
    pub size: u64,

    pub span: Span,
}

impl Member {
    pub fn new(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            size: span.len(),
            span,
        }
    }
}
