use crate::compare::is_violation;
use sortfix_types::member::Member;
use sortfix_types::options::OrderOptions;

/// An adjacent pair found in the wrong order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adjacency<'a> {
    pub first: &'a Member,
    pub second: &'a Member,

    /// Index of `first` in the original sequence.
    pub index: usize,
}

/// Walk the original order once and lazily yield every consecutive pair that
/// is locally out of order.
///
/// One finding per offending adjacency; a member's distance from its globally
/// ideal slot is the fix synthesizer's concern, not the scanner's. Sequences
/// of length 0 or 1 yield nothing.
pub fn scan_violations<'a>(
    members: &'a [Member],
    opts: &OrderOptions,
) -> impl Iterator<Item = Adjacency<'a>> + 'a {
    let opts = *opts;
    members.windows(2).enumerate().filter_map(move |(i, pair)| {
        is_violation(&pair[0], &pair[1], &opts).then_some(Adjacency {
            first: &pair[0],
            second: &pair[1],
            index: i,
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use sortfix_types::member::Span;
    use sortfix_types::options::{SortDirection, SortPolicy};

    fn members(names: &[&str]) -> Vec<Member> {
        let mut start = 0;
        names
            .iter()
            .map(|name| {
                let span = Span::new(start, start + name.len() as u64);
                start = span.end + 2;
                Member::new(*name, span)
            })
            .collect()
    }

    #[test]
    fn yields_each_offending_adjacency() {
        let opts = OrderOptions::default();
        let input = members(&["b", "a", "d", "c"]);

        let found: Vec<(String, String)> = scan_violations(&input, &opts)
            .map(|adj| (adj.first.name.clone(), adj.second.name.clone()))
            .collect();

        assert_eq!(
            found,
            vec![
                ("b".to_string(), "a".to_string()),
                ("d".to_string(), "c".to_string()),
            ]
        );
    }

    #[test]
    fn local_adjacency_only_one_finding_for_a_displaced_member() {
        let opts = OrderOptions::default();
        // "d" belongs at the end; only the ("d","a") adjacency is reported.
        let input = members(&["d", "a", "b", "c"]);

        let found: Vec<usize> = scan_violations(&input, &opts).map(|adj| adj.index).collect();
        assert_eq!(found, vec![0]);
    }

    #[test]
    fn sorted_input_yields_nothing() {
        let opts = OrderOptions::default();
        let input = members(&["a", "b", "c"]);
        assert_eq!(scan_violations(&input, &opts).count(), 0);
    }

    #[test]
    fn ties_adjacent_to_sorted_pairs_yield_nothing() {
        let opts = OrderOptions {
            policy: SortPolicy::LineLength,
            order: SortDirection::Desc,
            ignore_case: false,
        };
        let input: Vec<Member> = [10u64, 5, 5, 3]
            .iter()
            .enumerate()
            .map(|(i, &size)| Member {
                name: format!("m{i}"),
                size,
                span: Span::new(i as u64 * 20, i as u64 * 20 + size),
            })
            .collect();

        assert_eq!(scan_violations(&input, &opts).count(), 0);
    }

    #[test]
    fn empty_and_single_yield_nothing() {
        let opts = OrderOptions::default();
        assert_eq!(scan_violations(&[], &opts).count(), 0);

        let one = members(&["only"]);
        assert_eq!(scan_violations(&one, &opts).count(), 0);
    }
}
