//! Edit engine for sortfix fix plans.
//!
//! Responsibilities:
//! - Validate and apply replacement sets to source text (all or nothing).
//! - Attach and verify source preconditions (sha256).
//! - Apply a plan to the file on disk, with a unified diff preview.

mod error;

pub use error::EditError;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use diffy::PatchFormatter;
use fs_err as fs;
use sha2::{Digest, Sha256};
use sortfix_types::apply::{
    ApplyPreconditions, ApplyResult, ApplyStatus, AppliedFile, FixApply, PlanRef,
    PreconditionMismatch,
};
use sortfix_types::dump::ToolInfo;
use sortfix_types::fix::{FixPlan, TextReplacement};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct ApplyOptions {
    pub dry_run: bool,

    /// Verify the plan's sha256 precondition against the current file.
    pub verify_preconditions: bool,

    /// Directory for pre-apply backups of rewritten files.
    pub backup_dir: Option<Utf8PathBuf>,
}

impl Default for ApplyOptions {
    fn default() -> Self {
        Self {
            dry_run: false,
            verify_preconditions: true,
            backup_dir: None,
        }
    }
}

/// Record the sha256 of the source text the plan was computed from.
pub fn attach_preconditions(plan: &mut FixPlan, source_text: &str) {
    plan.source.sha256 = Some(sha256_hex(source_text.as_bytes()));
}

/// Check the plan's precondition against the text about to be rewritten.
///
/// A plan without an attached sha256 has nothing to verify and passes
/// vacuously; `attach_preconditions` is the step that opts a plan in.
pub fn verify_preconditions(plan: &FixPlan, current_text: &str) -> ApplyPreconditions {
    let mut outcome = ApplyPreconditions {
        verified: true,
        mismatches: vec![],
    };

    if let Some(expected) = &plan.source.sha256 {
        let actual = sha256_hex(current_text.as_bytes());
        if &actual != expected {
            outcome.verified = false;
            outcome.mismatches.push(PreconditionMismatch {
                path: plan.source.path.clone(),
                expected: expected.clone(),
                actual,
            });
        }
    }

    outcome
}

/// Apply a replacement set to `source`, all or nothing.
///
/// The set must be sorted by start offset, non-overlapping, in bounds, and on
/// character boundaries; any violation returns an error without producing
/// text. Everything outside the spans is copied through untouched.
pub fn apply_replacements(
    source: &str,
    replacements: &[TextReplacement],
) -> Result<String, EditError> {
    validate(source, replacements)?;

    let mut out = String::with_capacity(source.len());
    let mut cursor = 0usize;
    for rep in replacements {
        out.push_str(&source[cursor..rep.span.start as usize]);
        out.push_str(&rep.new_text);
        cursor = rep.span.end as usize;
    }
    out.push_str(&source[cursor..]);
    Ok(out)
}

/// Apply every entry of a plan to `source` as one atomic edit.
///
/// Entries cover disjoint declarations, so their replacement sets merge into
/// one sorted, non-overlapping set.
pub fn apply_plan_to_text(plan: &FixPlan, source: &str) -> Result<String, EditError> {
    let mut replacements: Vec<TextReplacement> = plan
        .entries
        .iter()
        .flat_map(|entry| entry.replacements.iter().cloned())
        .collect();
    replacements.sort_by_key(|rep| rep.span.start);

    apply_replacements(source, &replacements)
}

/// Apply a plan to the file it targets.
///
/// When `opts.dry_run` is true, no files are written, but results and a patch
/// are still produced. A precondition mismatch fails every entry and writes
/// nothing; it is reported, not raised.
pub fn apply_plan(
    repo_root: &Utf8Path,
    plan: &FixPlan,
    tool: ToolInfo,
    opts: &ApplyOptions,
) -> anyhow::Result<(FixApply, String)> {
    let file_path = abs_path(repo_root, Utf8Path::new(&plan.source.path));
    let before =
        fs::read_to_string(&file_path).with_context(|| format!("read {}", file_path))?;

    let mut apply = FixApply::new(
        tool,
        PlanRef {
            path: plan.source.path.clone(),
            sha256: plan.source.sha256.clone(),
        },
    );

    apply.preconditions = verify_preconditions(plan, &before);
    if opts.verify_preconditions && !apply.preconditions.verified {
        debug!(path = %file_path, "precondition mismatch, refusing to apply");
        for entry in &plan.entries {
            apply.results.push(ApplyResult {
                entry_id: entry.id.clone(),
                status: ApplyStatus::Failed,
                message: Some("precondition failed: source changed since plan".to_string()),
            });
        }
        apply.summary.failed = plan.entries.len() as u64;
        return Ok((apply, String::new()));
    }

    let after = apply_plan_to_text(plan, &before).context("apply replacements")?;
    let patch = render_patch(&plan.source.path, &before, &after);
    let changed = before != after;

    apply.summary.attempted = plan.entries.len() as u64;

    if opts.dry_run {
        for entry in &plan.entries {
            apply.results.push(ApplyResult {
                entry_id: entry.id.clone(),
                status: ApplyStatus::Skipped,
                message: Some("dry-run: not written".to_string()),
            });
        }
        apply.summary.skipped = plan.entries.len() as u64;
        return Ok((apply, patch));
    }

    let backup_path = if changed {
        let backup = match &opts.backup_dir {
            Some(dir) => Some(write_backup(dir, &file_path, &before)?),
            None => None,
        };
        fs::write(&file_path, &after).with_context(|| format!("write {}", file_path))?;
        apply.summary.files_modified = 1;
        backup
    } else {
        None
    };

    for entry in &plan.entries {
        apply.results.push(ApplyResult {
            entry_id: entry.id.clone(),
            status: ApplyStatus::Applied,
            message: None,
        });
    }
    apply.summary.applied = plan.entries.len() as u64;
    apply.file = Some(AppliedFile {
        path: plan.source.path.clone(),
        sha256_before: Some(sha256_hex(before.as_bytes())),
        sha256_after: Some(sha256_hex(after.as_bytes())),
        backup_path: backup_path.map(|p| p.to_string()),
    });

    Ok((apply, patch))
}

/// Unified diff between two versions of one file; empty when identical.
pub fn render_patch(path: &str, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let mut out = String::new();
    let formatter = PatchFormatter::new();

    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let patch = diffy::create_patch(before, after);
    out.push_str(&format!("{}", formatter.fmt_patch(&patch)));
    if !out.ends_with('\n') {
        out.push('\n');
    }

    out
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

fn abs_path(repo_root: &Utf8Path, rel: &Utf8Path) -> Utf8PathBuf {
    if rel.is_absolute() {
        rel.to_path_buf()
    } else {
        repo_root.join(rel)
    }
}

fn write_backup(
    backup_dir: &Utf8Path,
    file_path: &Utf8Path,
    contents: &str,
) -> anyhow::Result<Utf8PathBuf> {
    fs::create_dir_all(backup_dir).with_context(|| format!("create {}", backup_dir))?;
    let name = file_path.file_name().unwrap_or("source");
    let backup_path = backup_dir.join(format!("{name}.bak"));
    fs::write(&backup_path, contents).with_context(|| format!("write {}", backup_path))?;
    Ok(backup_path)
}

fn validate(source: &str, replacements: &[TextReplacement]) -> Result<(), EditError> {
    let len = source.len() as u64;
    let mut previous: Option<&TextReplacement> = None;

    for rep in replacements {
        if rep.span.end < rep.span.start || rep.span.end > len {
            return Err(EditError::OutOfBounds {
                start: rep.span.start,
                end: rep.span.end,
                len,
            });
        }
        if !source.is_char_boundary(rep.span.start as usize)
            || !source.is_char_boundary(rep.span.end as usize)
        {
            return Err(EditError::NotCharBoundary {
                start: rep.span.start,
                end: rep.span.end,
            });
        }
        if let Some(prev) = previous {
            if rep.span.start < prev.span.start {
                return Err(EditError::Unordered);
            }
            if prev.span.overlaps(&rep.span) {
                return Err(EditError::Overlap {
                    first: prev.span,
                    second: rep.span,
                });
            }
        }
        previous = Some(rep);
    }

    Ok(())
}
