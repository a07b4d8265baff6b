use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use glob::glob;
use sortfix_types::dump::MemberDump;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct LoadedDump {
    pub path: Utf8PathBuf,
    /// Directory name under artifacts/... (best effort).
    pub extractor_id: String,
    pub dump: Result<MemberDump, DumpLoadError>,
}

#[derive(Debug, Error, Clone)]
pub enum DumpLoadError {
    #[error("io error: {message}")]
    Io { message: String },

    #[error("json parse error: {message}")]
    Json { message: String },
}

/// Load every `<artifacts_dir>/*/members.json` dump, tolerantly.
///
/// A dump that fails to read or parse is carried as an `Err` entry instead of
/// failing the batch. Output order is deterministic (sorted by path).
pub fn load_dumps(artifacts_dir: &Utf8Path) -> anyhow::Result<Vec<LoadedDump>> {
    let pattern = artifacts_dir.join("*/members.json");
    let pattern_str = pattern.as_str();

    debug!(pattern = %pattern_str, "scanning artifacts for member dumps");

    let mut out = Vec::new();
    for entry in glob(pattern_str).context("glob artifacts/*/members.json")? {
        let path = entry
            .map_err(|e| anyhow::anyhow!("glob error: {e}"))?
            .to_string_lossy()
            .to_string();

        let utf8_path = Utf8PathBuf::from(path);
        let extractor_id = utf8_path
            .parent()
            .and_then(|p| p.file_name())
            .unwrap_or("unknown")
            .to_string();

        // Skip sortfix's own output directory - it's not an extractor dump.
        if extractor_id == "sortfix" {
            debug!(path = %utf8_path, "skipping sortfix's own artifacts");
            continue;
        }

        out.push(LoadedDump {
            dump: read_dump(&utf8_path),
            path: utf8_path,
            extractor_id,
        });
    }

    // Deterministic order matters.
    out.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(out)
}

/// Load a single dump file named explicitly by the caller.
pub fn load_dump_file(path: &Utf8Path) -> LoadedDump {
    let extractor_id = path
        .parent()
        .and_then(|p| p.file_name())
        .unwrap_or("unknown")
        .to_string();

    LoadedDump {
        dump: read_dump(path),
        path: path.to_path_buf(),
        extractor_id,
    }
}

fn read_dump(path: &Utf8Path) -> Result<MemberDump, DumpLoadError> {
    match fs::read_to_string(path) {
        Ok(s) => serde_json::from_str::<MemberDump>(&s).map_err(|e| DumpLoadError::Json {
            message: e.to_string(),
        }),
        Err(e) => Err(DumpLoadError::Io {
            message: e.to_string(),
        }),
    }
}
