//! Assemble engine output for a whole dump into report and plan artifacts.

use crate::fixes::build_replacements;
use crate::scan::scan_violations;
use crate::sort::sort_members;
use sortfix_types::dump::{MemberDump, ToolInfo};
use sortfix_types::fix::{FixEntry, FixPlan, PlanSource};
use sortfix_types::options::OrderOptions;
use sortfix_types::report::{OrderFinding, OrderReport, VerdictStatus};
use tracing::debug;
use uuid::Uuid;

/// Finding code for a locally out-of-order adjacency.
pub const UNEXPECTED_ORDER: &str = "unexpected_order";

/// Scan every declaration in the dump and report each offending adjacency.
///
/// Run timestamps are left unset; the caller owns the clock.
pub fn build_report(dump: &MemberDump, opts: &OrderOptions, tool: ToolInfo) -> OrderReport {
    let mut report = OrderReport::new(tool);
    let mut flagged = 0u64;

    for decl in &dump.declarations {
        let before = report.findings.len();
        for adj in scan_violations(&decl.members, opts) {
            let first = single_line(&adj.first.name);
            let second = single_line(&adj.second.name);
            report.findings.push(OrderFinding {
                code: UNEXPECTED_ORDER.to_string(),
                message: format!("Expected \"{second}\" to come before \"{first}\""),
                path: dump.source.path.to_string(),
                declaration: decl.id.clone(),
                first,
                second,
                span: adj.second.span,
            });
        }
        if report.findings.len() > before {
            flagged += 1;
        }
    }

    report.verdict.counts.declarations = dump.declarations.len() as u64;
    report.verdict.counts.declarations_flagged = flagged;
    report.verdict.counts.findings = report.findings.len() as u64;
    report.verdict.status = if report.findings.is_empty() {
        VerdictStatus::Pass
    } else {
        VerdictStatus::Fail
    };

    report
}

/// Build the deterministic fix plan for a dump.
///
/// Declarations already in order contribute no entry; a plan with zero
/// entries is the expected outcome for clean input, not an error. Entry ids
/// are stable across runs for identical input.
pub fn build_fix_plan(dump: &MemberDump, opts: &OrderOptions, tool: ToolInfo) -> FixPlan {
    let mut plan = FixPlan::new(
        tool,
        PlanSource {
            path: dump.source.path.to_string(),
            sha256: None,
        },
    );

    for decl in &dump.declarations {
        plan.summary.declarations_total += 1;

        let ideal = sort_members(&decl.members, opts);
        let replacements = build_replacements(&decl.members, &ideal, &dump.source.text);
        if replacements.is_empty() {
            continue;
        }

        debug!(
            declaration = %decl.id,
            replacements = replacements.len(),
            "declaration out of order"
        );

        let mut entry = FixEntry {
            id: String::new(),
            declaration: decl.id.clone(),
            replacements,
        };
        entry.id = deterministic_entry_id(dump.source.path.as_str(), &entry).to_string();

        plan.summary.declarations_fixed += 1;
        plan.summary.replacements_total += entry.replacements.len() as u64;
        plan.entries.push(entry);
    }

    plan
}

/// Collapse whitespace runs so multiline names render on one line.
fn single_line(name: &str) -> String {
    name.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn deterministic_entry_id(path: &str, entry: &FixEntry) -> Uuid {
    // Deterministic ID: v5(namespace, stable_key_bytes)
    const NAMESPACE: Uuid = Uuid::from_bytes([
        0x9f, 0x2c, 0x61, 0xe0, 0x7a, 0x13, 0x45, 0x9b, 0x8d, 0x04, 0x5e, 0xc7, 0x21, 0x88, 0x3a,
        0x46,
    ]);

    let mut stable_key = format!("{}|{}", path, entry.declaration);
    for rep in &entry.replacements {
        stable_key.push_str(&format!(
            "|{}..{}={}",
            rep.span.start, rep.span.end, rep.new_text
        ));
    }
    Uuid::new_v5(&NAMESPACE, stable_key.as_bytes())
}
