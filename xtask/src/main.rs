use anyhow::Context;
use clap::{Parser, Subcommand};
use fs_err as fs;

#[derive(Debug, Parser)]
#[command(name = "xtask", about = "Workspace helper tasks")]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print schema identifiers used by sortfix.
    PrintSchemas,
    /// Create an empty artifacts layout (artifacts/<extractor>/members.json placeholder).
    InitArtifacts {
        #[arg(long, default_value = "artifacts")]
        dir: String,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    match cli.cmd {
        Command::PrintSchemas => {
            println!("{}", sortfix_types::schema::SORTFIX_DUMP_V1);
            println!("{}", sortfix_types::schema::SORTFIX_REPORT_V1);
            println!("{}", sortfix_types::schema::SORTFIX_FIX_V1);
            println!("{}", sortfix_types::schema::SORTFIX_APPLY_V1);
            Ok(())
        }
        Command::InitArtifacts { dir } => init_artifacts(&dir),
    }
}

fn init_artifacts(dir: &str) -> anyhow::Result<()> {
    let extractor_dir = format!("{dir}/ts-extract");
    fs::create_dir_all(&extractor_dir).with_context(|| format!("create {extractor_dir}"))?;

    let placeholder = serde_json::json!({
        "schema": sortfix_types::schema::SORTFIX_DUMP_V1,
        "tool": { "name": "ts-extract" },
        "source": { "path": "replace-me.ts", "text": "" },
        "declarations": []
    });

    let path = format!("{extractor_dir}/members.json");
    let json = serde_json::to_string_pretty(&placeholder).context("serialize placeholder")?;
    fs::write(&path, json).with_context(|| format!("write {path}"))?;
    println!("initialized {path}");
    Ok(())
}
