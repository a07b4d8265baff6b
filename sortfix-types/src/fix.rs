use crate::dump::ToolInfo;
use crate::member::Span;
use serde::{Deserialize, Serialize};

/// A single text replacement.
///
/// Replacement sets produced by the engine are sorted by `span.start` and
/// non-overlapping; everything between spans stays in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextReplacement {
    pub span: Span,
    pub new_text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixPlan {
    pub schema: String,
    pub tool: ToolInfo,
    pub source: PlanSource,

    #[serde(default)]
    pub entries: Vec<FixEntry>,

    pub summary: PlanSummary,
}

impl FixPlan {
    pub fn new(tool: ToolInfo, source: PlanSource) -> Self {
        Self {
            schema: crate::schema::SORTFIX_FIX_V1.to_string(),
            tool,
            source,
            entries: vec![],
            summary: PlanSummary::default(),
        }
    }
}

/// The file a plan rewrites, plus the precondition guarding it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanSource {
    pub path: String,

    /// Sha256 of the source text the plan was computed from. Attached by
    /// `sortfix-edit`; apply refuses on mismatch unless verification is
    /// disabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha256: Option<String>,
}

/// Replacements for one declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixEntry {
    /// Deterministic id (UUID v5 over path, declaration and replacement
    /// content).
    pub id: String,

    #[serde(default)]
    pub declaration: String,

    #[serde(default)]
    pub replacements: Vec<TextReplacement>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlanSummary {
    pub declarations_total: u64,
    pub declarations_fixed: u64,
    pub replacements_total: u64,
}
