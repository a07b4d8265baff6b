//! Policy explanation module for the `sortfix explain` command.
//!
//! Provides a short description of each ordering policy, how ties behave,
//! and a worked example.

/// Information about one ordering policy.
#[derive(Debug, Clone)]
pub struct PolicyExplanation {
    /// Wire key for the policy (user-facing, e.g. "line-length").
    pub key: &'static str,
    /// Human-readable title.
    pub title: &'static str,
    /// What the policy compares.
    pub description: &'static str,
    /// A worked before/after example in ascending order.
    pub example: &'static str,
}

/// Registry of all ordering policies.
pub static POLICY_REGISTRY: &[PolicyExplanation] = &[
    PolicyExplanation {
        key: "alphabetical",
        title: "Alphabetical",
        description: "Compares member names lexicographically, byte by byte. With \
ignore-case enabled, names are lowercased first; otherwise capitals sort before \
lowercase. Equal names keep their original relative order.",
        example: "beta, alpha, Gamma  ->  Gamma, alpha, beta (case-sensitive)",
    },
    PolicyExplanation {
        key: "natural",
        title: "Natural",
        description: "Like alphabetical, but maximal runs of decimal digits compare \
as numbers, so item2 sorts before item10. Names equal up to leading zeros keep a \
deterministic order (fewer written digits first).",
        example: "item10, item2  ->  item2, item10",
    },
    PolicyExplanation {
        key: "line-length",
        title: "Line length",
        description: "Compares the textual length of each member's source span; the \
name is ignored. Members of equal length keep their original relative order.",
        example: "longMember: T, x: U  ->  x: U, longMember: T",
    },
];

/// Look a policy up by its wire key.
pub fn find(key: &str) -> Option<&'static PolicyExplanation> {
    POLICY_REGISTRY.iter().find(|p| p.key == key)
}

/// Render one explanation as terminal text.
pub fn render_text(policy: &PolicyExplanation) -> String {
    format!(
        "{} ({})\n\n{}\n\nExample (asc): {}\n",
        policy.title, policy.key, policy.description, policy.example
    )
}
