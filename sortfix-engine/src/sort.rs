use crate::compare::member_ordering;
use sortfix_types::member::Member;
use sortfix_types::options::OrderOptions;

/// Stable sort into the ideal order.
///
/// Returns a permutation of `members`; ties keep their original relative
/// order, so sorting an already-sorted sequence (including one that is all
/// ties) is the identity. The comparison is total: any two members are
/// comparable under every policy.
pub fn sort_members(members: &[Member], opts: &OrderOptions) -> Vec<Member> {
    let mut sorted = members.to_vec();
    sorted.sort_by(|a, b| member_ordering(a, b, opts));
    sorted
}
