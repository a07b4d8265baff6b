use sortfix_types::fix::TextReplacement;
use sortfix_types::member::{Member, Span};

/// Minimal replacement set that rewrites `source` so the members appear in
/// the ideal order.
///
/// For each index where the original and ideal sequences disagree (compared
/// by span, i.e. by original position), the original member's span is
/// replaced with the ideal member's source text. Indices that already agree
/// contribute nothing. Only member spans are touched; separators, whitespace
/// and comments between spans stay in place and keep separating whatever
/// members end up adjacent. Input spans are disjoint and ordered, so the
/// result is sorted by start offset and non-overlapping.
///
/// # Panics
///
/// Panics if a span falls outside `source` or off a character boundary; spans
/// are the extractor's contract and are validated again by `sortfix-edit`
/// before anything reaches a file.
pub fn build_replacements(
    original: &[Member],
    ideal: &[Member],
    source: &str,
) -> Vec<TextReplacement> {
    debug_assert_eq!(original.len(), ideal.len());

    original
        .iter()
        .zip(ideal)
        .filter(|(current, want)| current.span != want.span)
        .map(|(current, want)| TextReplacement {
            span: current.span,
            new_text: slice(source, want.span).to_string(),
        })
        .collect()
}

fn slice(source: &str, span: Span) -> &str {
    &source[span.start as usize..span.end as usize]
}
