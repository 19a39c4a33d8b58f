use std::path::Path;

use crate::error::{GanttError, Result};
use crate::model::Project;

/// Save a project to a JSON file.
pub fn save_project(project: &Project, path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(project).map_err(|e| GanttError::json(path, e))?;
    std::fs::write(path, json).map_err(|e| GanttError::io(path, e))
}

/// Load a project from a JSON file.
pub fn load_project(path: &Path) -> Result<Project> {
    let json = std::fs::read_to_string(path).map_err(|e| GanttError::io(path, e))?;
    let project: Project = serde_json::from_str(&json).map_err(|e| GanttError::json(path, e))?;
    tracing::info!(path = %path.display(), tasks = project.tasks.len(), "project loaded");
    Ok(project)
}
