//! Ordering engine: decide the canonical member order and the minimal edits
//! that achieve it.
//!
//! This crate owns *what* is out of order and *which* spans must change. It
//! does not own how edits reach files; that's the `sortfix-edit` crate. All
//! functions here are pure: members, options and source text in, findings and
//! replacements out. No I/O, no shared state, no clock.

mod compare;
mod fixes;
mod plan;
mod scan;
mod sort;

pub use compare::{is_violation, member_ordering, should_precede};
pub use fixes::build_replacements;
pub use plan::{UNEXPECTED_ORDER, build_fix_plan, build_report};
pub use scan::{Adjacency, scan_violations};
pub use sort::sort_members;
