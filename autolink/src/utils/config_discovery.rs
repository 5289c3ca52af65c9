//! Locating and loading the autolink configuration.
//!
//! Lookup order: an explicit `--config` path (or `$AUTOLINK_CONFIG`, which
//! clap folds into the same flag), then `<config_dir>/autolink/config.yaml`,
//! then `./autolink.yaml`. With none of them present an empty configuration
//! is used, so the built-in rules are available but switched off.

use anyhow::Result;
use autolink_core::Config;
use log::info;
use std::path::{Path, PathBuf};

pub const APP_DIR_NAME: &str = "autolink";
pub const CONFIG_FILE_NAME: &str = "config.yaml";
pub const LOCAL_CONFIG_FILE: &str = "autolink.yaml";

/// Returns the configuration file to use, if any.
pub fn discover_config_path(explicit: Option<&Path>) -> Option<PathBuf> {
    discover_config_path_in(explicit, dirs::config_dir().as_deref(), Path::new("."))
}

fn discover_config_path_in(explicit: Option<&Path>, config_dir: Option<&Path>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }
    if let Some(dir) = config_dir {
        let candidate = dir.join(APP_DIR_NAME).join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
    }
    let local = cwd.join(LOCAL_CONFIG_FILE);
    local.is_file().then_some(local)
}

/// Loads the discovered configuration, or an empty one when nothing is found.
/// An explicit path that cannot be read is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    match discover_config_path(explicit) {
        Some(path) => Config::load_from_file(&path),
        None => {
            info!("No autolink configuration found; continuing with built-in rules only.");
            Ok(Config::default())
        }
    }
}
