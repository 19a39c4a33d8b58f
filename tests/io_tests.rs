use std::path::PathBuf;

use chrono::{Duration, NaiveDate};
use gantt_lanes::io::{load_options, load_project, resolve_options, save_project};
use gantt_lanes::model::{Project, ViewMode};
use gantt_lanes::GanttError;

fn scratch_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("gantt-lanes-tests-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    dir.join(name)
}

#[test]
fn project_survives_a_save_and_load() {
    let origin = NaiveDate::from_ymd_opt(2024, 6, 3)
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .unwrap();
    let project = Project::sample(origin);
    let path = scratch_file("project.json");

    save_project(&project, &path).unwrap();
    let loaded = load_project(&path).unwrap();

    assert_eq!(loaded.name, project.name);
    assert_eq!(loaded.tasks.len(), project.tasks.len());
    for (a, b) in loaded.tasks.iter().zip(&project.tasks) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.start, b.start);
        assert_eq!(a.end, b.end);
        assert_eq!(a.category, b.category);
        assert_eq!(a.marker, b.marker);
        assert_eq!(a.invalid, b.invalid);
    }
    assert!(loaded.tasks.iter().any(|t| t.start == t.end));
    assert!(loaded.tasks.iter().any(|t| t.start + Duration::hours(12) == t.end));
}

#[test]
fn demo_project_loads() {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos/field_trip.json");
    let project = load_project(&path).unwrap();
    assert_eq!(project.name, "Field Trip");
    assert!(project.tasks.iter().any(|t| t.marker_date().is_some()));
    assert!(project.tasks.iter().any(|t| t.invalid));
}

#[test]
fn missing_project_is_an_io_error() {
    let err = load_project(&scratch_file("does-not-exist.json")).unwrap_err();
    assert!(matches!(err, GanttError::Io { .. }));
}

#[test]
fn malformed_project_is_a_json_error() {
    let path = scratch_file("broken.json");
    std::fs::write(&path, "{ \"name\": ").unwrap();
    let err = load_project(&path).unwrap_err();
    assert!(matches!(err, GanttError::Json { .. }));
}

#[test]
fn options_file_is_validated() {
    let path = scratch_file("bad-options.json");
    std::fs::write(&path, r#"{ "step": 0 }"#).unwrap();
    let err = load_options(&path).unwrap_err();
    assert!(matches!(err, GanttError::InvalidOptions { .. }));
}

#[test]
fn explicit_options_path_is_used() {
    let path = scratch_file("options.json");
    std::fs::write(&path, r#"{ "view_mode": "Week", "padding": 10 }"#).unwrap();
    let options = resolve_options(Some(&path)).unwrap();
    assert_eq!(options.view_mode, ViewMode::Week);
    assert_eq!(options.padding, 10.0);
    assert_eq!(options.bar_height, 20.0);
}

#[test]
fn explicit_options_path_must_exist() {
    assert!(resolve_options(Some(&scratch_file("missing-options.json"))).is_err());
}
