//! Chart options resolution: explicit file, then the OS config directory,
//! then built-in defaults.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::{GanttError, Result};
use crate::model::ChartOptions;

const OPTIONS_FILE: &str = "options.json";

/// `<config dir>/rust-gantt-lanes/options.json`, if the platform has one.
pub fn default_options_path() -> Option<PathBuf> {
    ProjectDirs::from("", "", "rust-gantt-lanes").map(|dirs| dirs.config_dir().join(OPTIONS_FILE))
}

/// Read and validate an options file.
pub fn load_options(path: &Path) -> Result<ChartOptions> {
    let json = std::fs::read_to_string(path).map_err(|e| GanttError::io(path, e))?;
    let options: ChartOptions =
        serde_json::from_str(&json).map_err(|e| GanttError::json(path, e))?;
    options.validate()?;
    Ok(options)
}

/// Resolve the options for this run.
///
/// An explicit path must load. A broken file in the config directory only
/// logs a warning and falls back to the defaults.
pub fn resolve_options(explicit: Option<&Path>) -> Result<ChartOptions> {
    if let Some(path) = explicit {
        return load_options(path);
    }
    match default_options_path() {
        Some(path) if path.exists() => load_options(&path).or_else(|e| {
            tracing::warn!(path = %path.display(), error = %e, "falling back to default options");
            Ok(ChartOptions::default())
        }),
        _ => Ok(ChartOptions::default()),
    }
}
