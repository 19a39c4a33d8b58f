use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::task::Task;

/// A named, ordered set of tasks. Task order drives lane packing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub name: String,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

impl Default for Project {
    fn default() -> Self {
        Self {
            name: "Untitled Project".to_string(),
            tasks: Vec::new(),
        }
    }
}

impl Project {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn task(&self, id: uuid::Uuid) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn task_mut(&mut self, id: uuid::Uuid) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// A small demonstration schedule anchored at `origin`.
    pub fn sample(origin: NaiveDateTime) -> Self {
        let at = |days: i64, hours: i64| origin + Duration::days(days) + Duration::hours(hours);
        let mut project = Project::new("Sample Schedule");

        let load = Task::new("Load equipment", "logistics", at(0, 8), at(1, 16));
        let drive = Task::new("Drive to site", "logistics", at(2, 6), at(3, 12));
        let survey = Task::new("Site survey", "fieldwork", at(1, 0), at(4, 0))
            .with_marker(Some(at(0, 12)));
        let sampling = Task::new("Sampling", "fieldwork", at(3, 0), at(8, 0));
        let mut permit = Task::new("Permit check", "admin", at(0, 0), at(0, 12));
        permit.invalid = true;
        let briefing = Task::new_point("Briefing", "admin", at(2, 0));
        let report = Task::new("Write report with an unusually long title", "admin", at(5, 0), at(6, 0));
        let unload = Task::new("Unload", "logistics", at(9, 0), at(9, 18)).with_marker(None);

        project.tasks = vec![load, drive, survey, sampling, permit, briefing, report, unload];
        project
    }
}
