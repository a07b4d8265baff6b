use crate::member::Member;
use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// A member dump produced by an extraction collaborator.
///
/// sortfix tries hard to be *tolerant* when reading dumps:
/// - Unknown fields are ignored.
/// - Optional fields may be absent.
///
/// The extractor enforces span invariants (ordered, non-overlapping, tight
/// around each member); sortfix's job is to be useful with dumps "as found".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MemberDump {
    /// Schema identifier, e.g. "sortfix.dump.v1".
    pub schema: String,

    pub tool: ToolInfo,

    pub source: SourceFile,

    #[serde(default)]
    pub declarations: Vec<Declaration>,

    /// Optional, extractor-specific payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl MemberDump {
    pub fn new(tool: ToolInfo, source: SourceFile) -> Self {
        Self {
            schema: crate::schema::SORTFIX_DUMP_V1.to_string(),
            tool,
            source,
            declarations: vec![],
            data: None,
        }
    }
}

/// Tool information shared by all sortfix envelopes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit: Option<String>,
}

/// The analyzed source file, carried verbatim so downstream stages never
/// re-read the file the extractor saw.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceFile {
    pub path: Utf8PathBuf,
    pub text: String,
}

/// One structural type declaration and its members, in original source order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Declaration {
    /// Extractor-assigned identifier, unique within the dump (best effort).
    #[serde(default)]
    pub id: String,

    /// Syntax kind as reported by the extractor, e.g. "object_type".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    #[serde(default)]
    pub members: Vec<Member>,
}
