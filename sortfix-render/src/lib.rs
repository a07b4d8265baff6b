//! Rendering helpers (markdown) for human-readable artifacts.

use sortfix_types::apply::{ApplyStatus, FixApply};
use sortfix_types::fix::FixPlan;
use sortfix_types::report::{OrderReport, VerdictStatus};

pub fn render_report_md(report: &OrderReport) -> String {
    let mut out = String::new();
    out.push_str("# sortfix report\n\n");
    out.push_str(&format!(
        "- Verdict: `{}`\n",
        verdict_label(report.verdict.status)
    ));
    out.push_str(&format!(
        "- Declarations: {} (flagged {})\n",
        report.verdict.counts.declarations, report.verdict.counts.declarations_flagged
    ));
    out.push_str(&format!(
        "- Findings: {}\n\n",
        report.verdict.counts.findings
    ));

    if !report.errors.is_empty() {
        out.push_str("## Errors\n\n");
        for e in &report.errors {
            out.push_str(&format!("- {}\n", e));
        }
        out.push('\n');
    }

    out.push_str("## Findings\n\n");
    if report.findings.is_empty() {
        out.push_str("_No findings._\n");
        return out;
    }

    for (i, f) in report.findings.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", i + 1, f.message));
        out.push_str(&format!("- Code: `{}`\n", f.code));
        out.push_str(&format!(
            "- Location: `{}` bytes {}..{}\n",
            f.path, f.span.start, f.span.end
        ));
        if !f.declaration.is_empty() {
            out.push_str(&format!("- Declaration: `{}`\n", f.declaration));
        }
        out.push('\n');
    }

    out
}

pub fn render_plan_md(plan: &FixPlan) -> String {
    let mut out = String::new();
    out.push_str("# sortfix fix plan\n\n");
    out.push_str(&format!("- Source: `{}`\n", plan.source.path));
    if let Some(sha) = &plan.source.sha256 {
        out.push_str(&format!("- Source sha256: `{}`\n", sha));
    }
    out.push_str(&format!(
        "- Declarations: {} (to fix {})\n",
        plan.summary.declarations_total, plan.summary.declarations_fixed
    ));
    out.push_str(&format!(
        "- Replacements: {}\n\n",
        plan.summary.replacements_total
    ));

    out.push_str("## Entries\n\n");
    if plan.entries.is_empty() {
        out.push_str("_Nothing to fix._\n");
        return out;
    }

    for (i, entry) in plan.entries.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", i + 1, entry.id));
        if !entry.declaration.is_empty() {
            out.push_str(&format!("- Declaration: `{}`\n", entry.declaration));
        }
        out.push_str(&format!("- Replacements: {}\n", entry.replacements.len()));
        for rep in &entry.replacements {
            out.push_str(&format!(
                "  - bytes {}..{} become `{}`\n",
                rep.span.start,
                rep.span.end,
                single_line(&rep.new_text)
            ));
        }
        out.push('\n');
    }

    out
}

pub fn render_apply_md(apply: &FixApply) -> String {
    let mut out = String::new();
    out.push_str("# sortfix apply\n\n");
    out.push_str(&format!(
        "- Attempted: {}\n- Applied: {}\n- Skipped: {}\n- Failed: {}\n- Files modified: {}\n\n",
        apply.summary.attempted,
        apply.summary.applied,
        apply.summary.skipped,
        apply.summary.failed,
        apply.summary.files_modified
    ));

    if !apply.preconditions.mismatches.is_empty() {
        out.push_str("## Precondition mismatches\n\n");
        for m in &apply.preconditions.mismatches {
            out.push_str(&format!("- `{}` expected {} got {}\n", m.path, m.expected, m.actual));
        }
        out.push('\n');
    }

    out.push_str("## Results\n\n");
    if apply.results.is_empty() {
        out.push_str("_No results._\n");
        return out;
    }

    for (i, r) in apply.results.iter().enumerate() {
        out.push_str(&format!("### {}. {}\n\n", i + 1, r.entry_id));
        out.push_str(&format!("- Status: `{}`\n", status_label(r.status)));
        if let Some(msg) = &r.message {
            out.push_str(&format!("- Message: {}\n", msg));
        }
        out.push('\n');
    }

    if let Some(file) = &apply.file {
        out.push_str("**File changed**\n\n");
        let before = file.sha256_before.as_deref().unwrap_or("-");
        let after = file.sha256_after.as_deref().unwrap_or("-");
        out.push_str(&format!("- `{}` {} → {}\n", file.path, before, after));
        if let Some(backup) = &file.backup_path {
            out.push_str(&format!("- Backup: `{}`\n", backup));
        }
    }

    out
}

fn verdict_label(status: VerdictStatus) -> &'static str {
    match status {
        VerdictStatus::Pass => "pass",
        VerdictStatus::Fail => "fail",
        VerdictStatus::Unknown => "unknown",
    }
}

fn status_label(status: ApplyStatus) -> &'static str {
    match status {
        ApplyStatus::Applied => "applied",
        ApplyStatus::Skipped => "skipped",
        ApplyStatus::Failed => "failed",
    }
}

/// Collapse whitespace so replacement text renders inside one backtick pair.
fn single_line(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
