use serde::{Deserialize, Serialize};

/// Ordering policy for members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortPolicy {
    Alphabetical,
    Natural,
    LineLength,
}

impl SortPolicy {
    /// Wire name, as it appears in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            SortPolicy::Alphabetical => "alphabetical",
            SortPolicy::Natural => "natural",
            SortPolicy::LineLength => "line-length",
        }
    }
}

impl std::fmt::Display for SortPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

impl std::fmt::Display for SortDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordering options as found in configuration.
///
/// Exactly three keys are recognized (`type`, `order`, `ignore-case`);
/// anything else is rejected at parse time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PartialOrderOptions {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<SortPolicy>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<SortDirection>,

    #[serde(
        rename = "ignore-case",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub ignore_case: Option<bool>,
}

impl PartialOrderOptions {
    /// Fill unset fields with the rule defaults. Never fails.
    pub fn resolve(&self) -> OrderOptions {
        OrderOptions {
            policy: self.policy.unwrap_or(SortPolicy::Alphabetical),
            order: self.order.unwrap_or(SortDirection::Asc),
            ignore_case: self.ignore_case.unwrap_or(false),
        }
    }

    /// Overlay `other` on top of `self`; set fields in `other` win.
    pub fn overlaid_with(&self, other: &PartialOrderOptions) -> PartialOrderOptions {
        PartialOrderOptions {
            policy: other.policy.or(self.policy),
            order: other.order.or(self.order),
            ignore_case: other.ignore_case.or(self.ignore_case),
        }
    }
}

/// Fully resolved, immutable ordering options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderOptions {
    pub policy: SortPolicy,
    pub order: SortDirection,
    pub ignore_case: bool,
}

impl Default for OrderOptions {
    fn default() -> Self {
        PartialOrderOptions::default().resolve()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_fills_defaults() {
        let opts = PartialOrderOptions::default().resolve();
        assert_eq!(opts.policy, SortPolicy::Alphabetical);
        assert_eq!(opts.order, SortDirection::Asc);
        assert!(!opts.ignore_case);
    }

    #[test]
    fn resolve_keeps_set_fields() {
        let partial = PartialOrderOptions {
            policy: Some(SortPolicy::LineLength),
            order: Some(SortDirection::Desc),
            ignore_case: Some(true),
        };
        let opts = partial.resolve();
        assert_eq!(opts.policy, SortPolicy::LineLength);
        assert_eq!(opts.order, SortDirection::Desc);
        assert!(opts.ignore_case);
    }

    #[test]
    fn overlay_prefers_later_values() {
        let file = PartialOrderOptions {
            policy: Some(SortPolicy::Natural),
            order: Some(SortDirection::Desc),
            ignore_case: None,
        };
        let cli = PartialOrderOptions {
            policy: None,
            order: Some(SortDirection::Asc),
            ignore_case: Some(true),
        };
        let merged = file.overlaid_with(&cli);
        assert_eq!(merged.policy, Some(SortPolicy::Natural));
        assert_eq!(merged.order, Some(SortDirection::Asc));
        assert_eq!(merged.ignore_case, Some(true));
    }

    #[test]
    fn wire_keys_are_type_order_ignore_case() {
        let parsed: PartialOrderOptions =
            serde_json::from_str(r#"{"type":"line-length","order":"desc","ignore-case":true}"#)
                .expect("parse");
        assert_eq!(parsed.policy, Some(SortPolicy::LineLength));
        assert_eq!(parsed.order, Some(SortDirection::Desc));
        assert_eq!(parsed.ignore_case, Some(true));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = serde_json::from_str::<PartialOrderOptions>(r#"{"types":"natural"}"#);
        assert!(err.is_err());
    }

    #[test]
    fn unknown_policy_value_is_rejected() {
        let err = serde_json::from_str::<PartialOrderOptions>(r#"{"type":"random"}"#);
        assert!(err.is_err());
    }
}
