mod config;
mod explain;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Utc;
use clap::{Parser, Subcommand};
use config::ConfigMerger;
use fs_err as fs;
use sortfix_dumps::{LoadedDump, load_dump_file, load_dumps};
use sortfix_edit::{
    ApplyOptions, apply_plan, apply_plan_to_text, attach_preconditions, render_patch,
};
use sortfix_engine::{build_fix_plan, build_report};
use sortfix_render::{render_apply_md, render_plan_md, render_report_md};
use sortfix_types::dump::{MemberDump, ToolInfo};
use sortfix_types::options::{OrderOptions, SortDirection, SortPolicy};
use sortfix_types::report::{OrderReport, VerdictStatus};
use std::process::ExitCode;
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "sortfix",
    version,
    about = "Dump-driven checker and fixer for canonical member ordering."
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Check member ordering across dumps and write a report.
    Check(CheckArgs),
    /// Build deterministic fix plans; rewrite sources only with --apply.
    Fix(FixArgs),
    /// Explain an ordering policy with an example.
    Explain(ExplainArgs),
    /// List all ordering policies.
    ListPolicies(ListPoliciesArgs),
}

#[derive(Debug, Parser)]
struct CheckArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Artifacts directory containing member dumps (default: <repo_root>/artifacts).
    #[arg(long)]
    artifacts_dir: Option<Utf8PathBuf>,

    /// Check a single dump file instead of scanning the artifacts directory.
    #[arg(long)]
    dump: Option<Utf8PathBuf>,

    /// Output directory for sortfix artifacts (default: <artifacts_dir>/sortfix).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    #[command(flatten)]
    order: OrderArgs,
}

#[derive(Debug, Parser)]
struct FixArgs {
    /// Repository root (default: current directory).
    #[arg(long, default_value = ".")]
    repo_root: Utf8PathBuf,

    /// Artifacts directory containing member dumps (default: <repo_root>/artifacts).
    #[arg(long)]
    artifacts_dir: Option<Utf8PathBuf>,

    /// Fix a single dump file instead of scanning the artifacts directory.
    #[arg(long)]
    dump: Option<Utf8PathBuf>,

    /// Output directory for sortfix artifacts (default: <artifacts_dir>/sortfix).
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,

    #[command(flatten)]
    order: OrderArgs,

    /// Apply changes to disk. If omitted, runs a dry-run and only emits artifacts.
    #[arg(long, default_value_t = false)]
    apply: bool,

    /// Skip sha256 precondition verification (not recommended).
    #[arg(long, default_value_t = false)]
    no_verify: bool,

    /// Directory for pre-apply backups (default: <out_dir>/backups).
    #[arg(long)]
    backup_dir: Option<Utf8PathBuf>,
}

#[derive(Debug, Parser)]
struct OrderArgs {
    /// Ordering policy.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,

    /// Sort direction.
    #[arg(long, value_enum)]
    direction: Option<DirectionArg>,

    /// Compare names case-insensitively.
    #[arg(long, default_value_t = false)]
    ignore_case: bool,
}

#[derive(Debug, Parser)]
struct ExplainArgs {
    /// Policy key to explain (e.g. "natural", "line-length").
    policy: String,
}

#[derive(Debug, Parser)]
struct ListPoliciesArgs {
    /// Output format (text, json).
    #[arg(long, value_enum, default_value = "text")]
    format: OutputFormat,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum PolicyArg {
    Alphabetical,
    Natural,
    LineLength,
}

impl From<PolicyArg> for SortPolicy {
    fn from(arg: PolicyArg) -> Self {
        match arg {
            PolicyArg::Alphabetical => SortPolicy::Alphabetical,
            PolicyArg::Natural => SortPolicy::Natural,
            PolicyArg::LineLength => SortPolicy::LineLength,
        }
    }
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum DirectionArg {
    Asc,
    Desc,
}

impl From<DirectionArg> for SortDirection {
    fn from(arg: DirectionArg) -> Self {
        match arg {
            DirectionArg::Asc => SortDirection::Asc,
            DirectionArg::Desc => SortDirection::Desc,
        }
    }
}

fn main() -> ExitCode {
    match real_main() {
        Ok(code) => code,
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn real_main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Check(args) => cmd_check(args),
        Command::Fix(args) => cmd_fix(args),
        Command::Explain(args) => cmd_explain(args),
        Command::ListPolicies(args) => cmd_list_policies(args),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<ExitCode> {
    let repo_root = args.repo_root;
    let artifacts_dir = args
        .artifacts_dir
        .unwrap_or_else(|| repo_root.join("artifacts"));
    let out_dir = args.out_dir.unwrap_or_else(|| artifacts_dir.join("sortfix"));

    fs::create_dir_all(&out_dir).with_context(|| format!("create {}", out_dir))?;

    let opts = resolve_options(&repo_root, &args.order)?;
    let dumps = collect_dumps(&artifacts_dir, args.dump.as_deref())?;
    let tool = tool_info();

    let mut report = OrderReport::new(tool.clone());
    report.run.started_at = Some(Utc::now());

    for loaded in &dumps {
        match &loaded.dump {
            Ok(dump) => {
                let partial = build_report(dump, &opts, tool.clone());
                report.verdict.counts.declarations += partial.verdict.counts.declarations;
                report.verdict.counts.declarations_flagged +=
                    partial.verdict.counts.declarations_flagged;
                report.verdict.counts.findings += partial.verdict.counts.findings;
                report.findings.extend(partial.findings);
            }
            Err(e) => {
                warn!(path = %loaded.path, "skipping unreadable dump: {e}");
                report.errors.push(format!("{}: {}", loaded.path, e));
            }
        }
    }

    report.verdict.status = if report.findings.is_empty() {
        VerdictStatus::Pass
    } else {
        VerdictStatus::Fail
    };
    report.run.ended_at = Some(Utc::now());

    write_json(&out_dir.join("report.json"), &report)?;
    fs::write(out_dir.join("report.md"), render_report_md(&report))?;

    info!(
        findings = report.verdict.counts.findings,
        "wrote report to {}", out_dir
    );

    if report.findings.is_empty() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::from(1))
    }
}

fn cmd_fix(args: FixArgs) -> anyhow::Result<ExitCode> {
    let repo_root = args.repo_root;
    let artifacts_dir = args
        .artifacts_dir
        .unwrap_or_else(|| repo_root.join("artifacts"));
    let out_dir = args.out_dir.unwrap_or_else(|| artifacts_dir.join("sortfix"));

    fs::create_dir_all(&out_dir).with_context(|| format!("create {}", out_dir))?;

    let opts = resolve_options(&repo_root, &args.order)?;
    let dumps = collect_dumps(&artifacts_dir, args.dump.as_deref())?;
    let tool = tool_info();

    let mut plans_md = String::new();
    let mut applies_md = String::new();
    let mut patches = String::new();
    let mut had_failure = false;

    for (i, loaded) in dumps.iter().enumerate() {
        let dump = match &loaded.dump {
            Ok(dump) => dump,
            Err(e) => {
                warn!(path = %loaded.path, "skipping unreadable dump: {e}");
                continue;
            }
        };

        if !spans_fit_source(dump) {
            warn!(path = %loaded.path, "skipping dump with spans outside its source text");
            continue;
        }

        let mut plan = build_fix_plan(dump, &opts, tool.clone());
        attach_preconditions(&mut plan, &dump.source.text);

        write_json(&out_dir.join(format!("fix-{i:02}.json")), &plan)?;
        plans_md.push_str(&render_plan_md(&plan));
        plans_md.push('\n');

        if plan.entries.is_empty() {
            debug!(path = %plan.source.path, "already ordered");
            continue;
        }

        if args.apply {
            let apply_opts = ApplyOptions {
                dry_run: false,
                verify_preconditions: !args.no_verify,
                backup_dir: Some(
                    args.backup_dir
                        .clone()
                        .unwrap_or_else(|| out_dir.join("backups")),
                ),
            };
            let (apply, patch) = apply_plan(&repo_root, &plan, tool.clone(), &apply_opts)
                .with_context(|| format!("apply plan for {}", plan.source.path))?;

            if apply.summary.failed > 0 {
                had_failure = true;
            }
            patches.push_str(&patch);
            applies_md.push_str(&render_apply_md(&apply));
            applies_md.push('\n');
            write_json(&out_dir.join(format!("apply-{i:02}.json")), &apply)?;
        } else {
            // Dry-run previews against the dump's own text; disk is not read.
            let fixed = apply_plan_to_text(&plan, &dump.source.text)
                .with_context(|| format!("preview fix for {}", plan.source.path))?;
            patches.push_str(&render_patch(
                plan.source.path.as_str(),
                &dump.source.text,
                &fixed,
            ));
        }
    }

    fs::write(out_dir.join("fixes.md"), plans_md)?;
    fs::write(out_dir.join("patch.diff"), patches)?;
    if args.apply {
        fs::write(out_dir.join("apply.md"), applies_md)?;
    }

    info!("wrote fix artifacts to {}", out_dir);

    if had_failure {
        Ok(ExitCode::from(1))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn cmd_explain(args: ExplainArgs) -> anyhow::Result<ExitCode> {
    match explain::find(&args.policy) {
        Some(policy) => {
            println!("{}", explain::render_text(policy));
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let known: Vec<&str> = explain::POLICY_REGISTRY.iter().map(|p| p.key).collect();
            anyhow::bail!(
                "unknown policy '{}'; known policies: {}",
                args.policy,
                known.join(", ")
            );
        }
    }
}

fn cmd_list_policies(args: ListPoliciesArgs) -> anyhow::Result<ExitCode> {
    match args.format {
        OutputFormat::Text => {
            for policy in explain::POLICY_REGISTRY {
                println!("{:14} {}", policy.key, policy.title);
            }
        }
        OutputFormat::Json => {
            let entries: Vec<serde_json::Value> = explain::POLICY_REGISTRY
                .iter()
                .map(|p| {
                    serde_json::json!({
                        "key": p.key,
                        "title": p.title,
                        "description": p.description,
                    })
                })
                .collect();
            println!(
                "{}",
                serde_json::to_string_pretty(&serde_json::Value::Array(entries))
                    .context("serialize policies")?
            );
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn resolve_options(repo_root: &Utf8Path, args: &OrderArgs) -> anyhow::Result<OrderOptions> {
    let file_config = config::load_or_default(repo_root).context("load sortfix.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_order_args(
        args.policy.map(SortPolicy::from),
        args.direction.map(SortDirection::from),
        args.ignore_case,
    );

    let opts = merged.resolve();
    debug!(
        policy = %opts.policy,
        direction = %opts.order,
        ignore_case = opts.ignore_case,
        "resolved ordering options"
    );
    Ok(opts)
}

fn collect_dumps(
    artifacts_dir: &Utf8Path,
    dump: Option<&Utf8Path>,
) -> anyhow::Result<Vec<LoadedDump>> {
    match dump {
        Some(path) => Ok(vec![load_dump_file(path)]),
        None => load_dumps(artifacts_dir)
            .with_context(|| format!("load dumps from {}", artifacts_dir)),
    }
}

/// Dumps are tolerated, spans are not: a member span outside the dump's own
/// source text cannot be sliced for fix synthesis.
fn spans_fit_source(dump: &MemberDump) -> bool {
    let len = dump.source.text.len() as u64;
    dump.declarations
        .iter()
        .flat_map(|decl| decl.members.iter())
        .all(|member| {
            member.span.start <= member.span.end
                && member.span.end <= len
                && dump.source.text.is_char_boundary(member.span.start as usize)
                && dump.source.text.is_char_boundary(member.span.end as usize)
        })
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "sortfix".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        commit: None,
    }
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize json")?;
    fs::write(path, json + "\n").with_context(|| format!("write {}", path))?;
    Ok(())
}
