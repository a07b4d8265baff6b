//! Shared DTOs (schemas-as-code) for the sortfix workspace.
//!
//! # Design constraints
//! - These types are intended to be serialized to disk.
//! - Be conservative with breaking changes.
//! - Prefer adding optional fields over changing semantics.

pub mod apply;
pub mod dump;
pub mod fix;
pub mod member;
pub mod options;
pub mod report;

/// Schema identifiers.
pub mod schema {
    pub const SORTFIX_DUMP_V1: &str = "sortfix.dump.v1";
    pub const SORTFIX_REPORT_V1: &str = "sortfix.report.v1";
    pub const SORTFIX_FIX_V1: &str = "sortfix.fix.v1";
    pub const SORTFIX_APPLY_V1: &str = "sortfix.apply.v1";
}
