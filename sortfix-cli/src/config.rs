//! Configuration file loading for sortfix.
//!
//! Discovers and loads `sortfix.toml` from the repository root.
//! Merges config file settings with CLI arguments (CLI takes precedence).

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use fs_err as fs;
use serde::Deserialize;
use sortfix_types::options::{PartialOrderOptions, SortDirection, SortPolicy};
use tracing::debug;

/// The config file name to search for.
pub const CONFIG_FILE_NAME: &str = "sortfix.toml";

/// Top-level configuration from sortfix.toml.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SortfixConfig {
    /// Ordering options applied to every checked declaration.
    pub order: PartialOrderOptions,
}

/// Discover the sortfix.toml config file.
///
/// Searches for `sortfix.toml` in the repository root directory.
/// Returns `None` if no config file is found.
pub fn discover_config(repo_root: &Utf8Path) -> Option<Utf8PathBuf> {
    let config_path = repo_root.join(CONFIG_FILE_NAME);
    if config_path.exists() {
        debug!("found config file at {}", config_path);
        Some(config_path)
    } else {
        debug!("no config file found at {}", config_path);
        None
    }
}

/// Load and parse a sortfix.toml config file.
///
/// Returns an error if the file cannot be read or parsed; an unknown key in
/// the `[order]` table is a parse error (exactly three keys are recognized).
pub fn load_config(path: &Utf8Path) -> anyhow::Result<SortfixConfig> {
    let contents =
        fs::read_to_string(path).with_context(|| format!("read config file {}", path))?;
    let config: SortfixConfig = toml::from_str(&contents).context("invalid TOML")?;
    Ok(config)
}

/// Load the config from the repository root, or fall back to defaults.
pub fn load_or_default(repo_root: &Utf8Path) -> anyhow::Result<SortfixConfig> {
    match discover_config(repo_root) {
        Some(path) => load_config(&path),
        None => Ok(SortfixConfig::default()),
    }
}

/// Merges file configuration with CLI arguments.
#[derive(Debug, Clone)]
pub struct ConfigMerger {
    config: SortfixConfig,
}

impl ConfigMerger {
    pub fn new(config: SortfixConfig) -> Self {
        Self { config }
    }

    /// Overlay CLI ordering flags on the config file values. Flags win; the
    /// `--ignore-case` switch can only turn folding on.
    pub fn merge_order_args(
        &self,
        policy: Option<SortPolicy>,
        order: Option<SortDirection>,
        ignore_case: bool,
    ) -> PartialOrderOptions {
        let cli = PartialOrderOptions {
            policy,
            order,
            ignore_case: ignore_case.then_some(true),
        };
        self.config.order.overlaid_with(&cli)
    }
}
