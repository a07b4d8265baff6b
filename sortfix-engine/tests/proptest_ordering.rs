//! Property-based tests for the ordering engine.
//!
//! These tests verify that:
//! - the comparator is antisymmetric (a pair is never a violation both ways)
//! - sorting is stable, idempotent, and free of adjacent violations
//! - descending order is the reverse of ascending when no ties exist
//! - synthesized fixes are minimal and idempotent end to end

use proptest::prelude::*;
use sortfix_engine::{
    build_replacements, is_violation, member_ordering, scan_violations, sort_members,
};
use sortfix_types::fix::TextReplacement;
use sortfix_types::member::{Member, Span};
use sortfix_types::options::{OrderOptions, SortDirection, SortPolicy};

fn arb_name() -> impl Strategy<Value = String> {
    prop::string::string_regex("[A-Za-z_][A-Za-z0-9_]{0,8}").expect("valid regex")
}

fn arb_names() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_name(), 0..8)
}

fn arb_policy() -> impl Strategy<Value = SortPolicy> {
    prop_oneof![
        Just(SortPolicy::Alphabetical),
        Just(SortPolicy::Natural),
        Just(SortPolicy::LineLength),
    ]
}

fn arb_options() -> impl Strategy<Value = OrderOptions> {
    (arb_policy(), any::<bool>(), any::<bool>()).prop_map(|(policy, desc, ignore_case)| {
        OrderOptions {
            policy,
            order: if desc {
                SortDirection::Desc
            } else {
                SortDirection::Asc
            },
            ignore_case,
        }
    })
}

/// Lay `names` out as `{ n1; n2; ... }` and extract one member per name.
fn declaration(names: &[String]) -> (String, Vec<Member>) {
    let mut source = String::from("{ ");
    let mut members = Vec::new();
    for (i, name) in names.iter().enumerate() {
        if i > 0 {
            source.push_str("; ");
        }
        let start = source.len() as u64;
        source.push_str(name);
        members.push(Member::new(name.clone(), Span::new(start, source.len() as u64)));
    }
    source.push_str(" }");
    (source, members)
}

fn apply(source: &str, replacements: &[TextReplacement]) -> String {
    let mut out = source.to_string();
    for rep in replacements.iter().rev() {
        out.replace_range(rep.span.start as usize..rep.span.end as usize, &rep.new_text);
    }
    out
}

/// Re-extract members after an apply: slot gaps are unchanged, contents come
/// from the ideal order.
fn reextract(original: &[Member], ideal: &[Member], fixed: &str) -> Vec<Member> {
    let mut members: Vec<Member> = Vec::new();
    let mut cursor = 0u64;
    for (i, (slot, want)) in original.iter().zip(ideal).enumerate() {
        let start = if i == 0 { slot.span.start } else { cursor };
        let end = start + want.span.len();
        let name = &fixed[start as usize..end as usize];
        members.push(Member::new(name, Span::new(start, end)));
        let gap = original
            .get(i + 1)
            .map(|next| next.span.start - slot.span.end)
            .unwrap_or(0);
        cursor = end + gap;
    }
    members
}

proptest! {
    /// A pair is a violation in at most one direction; when it is in
    /// neither, the two members rank equal.
    #[test]
    fn comparator_is_antisymmetric(a in arb_name(), b in arb_name(), opts in arb_options()) {
        let (_, members) = declaration(&[a, b]);
        let (first, second) = (&members[0], &members[1]);

        let forward = is_violation(first, second, &opts);
        let backward = is_violation(second, first, &opts);
        prop_assert!(!(forward && backward));

        if !forward && !backward {
            prop_assert_eq!(member_ordering(first, second, &opts), std::cmp::Ordering::Equal);
        }
    }

    /// Sorting yields a permutation with no adjacent violations, and sorting
    /// again changes nothing.
    #[test]
    fn sort_is_total_and_idempotent(names in arb_names(), opts in arb_options()) {
        let (_, members) = declaration(&names);
        let sorted = sort_members(&members, &opts);

        prop_assert_eq!(sorted.len(), members.len());
        let mut expected: Vec<&str> = members.iter().map(|m| m.name.as_str()).collect();
        let mut actual: Vec<&str> = sorted.iter().map(|m| m.name.as_str()).collect();
        expected.sort_unstable();
        actual.sort_unstable();
        prop_assert_eq!(expected, actual);

        for pair in sorted.windows(2) {
            prop_assert!(!is_violation(&pair[0], &pair[1], &opts));
        }

        prop_assert_eq!(sort_members(&sorted, &opts), sorted);
    }

    /// All-tie sequences keep their original order exactly.
    #[test]
    fn sort_is_stable_across_ties(names in arb_names(), desc in any::<bool>()) {
        let opts = OrderOptions {
            policy: SortPolicy::LineLength,
            order: if desc { SortDirection::Desc } else { SortDirection::Asc },
            ignore_case: false,
        };
        let (_, mut members) = declaration(&names);
        for member in &mut members {
            member.size = 11;
        }

        prop_assert_eq!(sort_members(&members, &opts), members.clone());
        prop_assert_eq!(scan_violations(&members, &opts).count(), 0);
    }

    /// Without ties, descending is exactly the reverse of ascending.
    #[test]
    fn desc_reverses_asc_when_ranks_are_distinct(names in arb_names(), policy in arb_policy()) {
        let mut unique = names;
        unique.sort_unstable();
        unique.dedup();
        // Distinct names of strictly increasing lengths (names cap at 9
        // chars, the pad grows by 10) so every policy is tie-free.
        let distinct: Vec<String> = unique
            .into_iter()
            .enumerate()
            .map(|(i, name)| format!("{}{}", "x".repeat(i * 10 + 1), name))
            .collect();

        let asc = OrderOptions { policy, order: SortDirection::Asc, ignore_case: false };
        let desc = OrderOptions { order: SortDirection::Desc, ..asc };

        let (_, members) = declaration(&distinct);
        let mut reversed = sort_members(&members, &asc);
        reversed.reverse();
        prop_assert_eq!(sort_members(&members, &desc), reversed);
    }

    /// The synthesizer touches exactly the indices that move.
    #[test]
    fn fixes_are_minimal(names in arb_names(), opts in arb_options()) {
        let (source, members) = declaration(&names);
        let ideal = sort_members(&members, &opts);
        let replacements = build_replacements(&members, &ideal, &source);

        let moved = members
            .iter()
            .zip(&ideal)
            .filter(|(current, want)| current.span != want.span)
            .count();
        prop_assert_eq!(replacements.len(), moved);

        for (current, want) in members.iter().zip(&ideal) {
            if current.span == want.span {
                prop_assert!(replacements.iter().all(|r| r.span != current.span));
            }
        }
    }

    /// Applying a synthesized fix leaves nothing for the scanner or the
    /// synthesizer to do.
    #[test]
    fn fix_then_rescan_is_empty(names in arb_names(), opts in arb_options()) {
        let (source, members) = declaration(&names);
        let ideal = sort_members(&members, &opts);
        let replacements = build_replacements(&members, &ideal, &source);
        let fixed = apply(&source, &replacements);

        let after = reextract(&members, &ideal, &fixed);
        prop_assert_eq!(scan_violations(&after, &opts).count(), 0);

        let ideal_after = sort_members(&after, &opts);
        prop_assert!(build_replacements(&after, &ideal_after, &fixed).is_empty());
    }
}
