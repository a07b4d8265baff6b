use crate::dump::ToolInfo;
use crate::member::Span;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderReport {
    pub schema: String,
    pub tool: ToolInfo,

    #[serde(default)]
    pub run: RunInfo,

    #[serde(default)]
    pub verdict: Verdict,

    #[serde(default)]
    pub findings: Vec<OrderFinding>,

    /// Dumps that could not be loaded or checked.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<String>,
}

impl OrderReport {
    pub fn new(tool: ToolInfo) -> Self {
        Self {
            schema: crate::schema::SORTFIX_REPORT_V1.to_string(),
            tool,
            run: RunInfo::default(),
            verdict: Verdict::default(),
            findings: vec![],
            errors: vec![],
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RunInfo {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ended_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Verdict {
    #[serde(default)]
    pub status: VerdictStatus,

    #[serde(default)]
    pub counts: Counts,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VerdictStatus {
    Pass,
    Fail,
    #[default]
    Unknown,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Counts {
    #[serde(default)]
    pub declarations: u64,

    #[serde(default)]
    pub declarations_flagged: u64,

    #[serde(default)]
    pub findings: u64,
}

/// One locally out-of-order adjacency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderFinding {
    /// Stable finding code, e.g. "unexpected_order".
    pub code: String,

    /// Human message, e.g. `Expected "a" to come before "b"`.
    pub message: String,

    pub path: String,

    #[serde(default)]
    pub declaration: String,

    /// Name of the member found first (collapsed to a single line).
    pub first: String,

    /// Name of the member that must come before it.
    pub second: String,

    /// Span of the second member; diagnostics anchor here.
    pub span: Span,
}
