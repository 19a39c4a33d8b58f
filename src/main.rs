#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use std::path::PathBuf;

use clap::Parser;
use gantt_lanes::app::GanttApp;
use gantt_lanes::model::ViewMode;
use tracing_subscriber::EnvFilter;

/// Gantt chart with category lanes.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Project JSON file with the tasks to chart. A sample is shown otherwise.
    #[arg(long)]
    tasks: Option<PathBuf>,

    /// Chart options JSON file (defaults to the OS config directory).
    #[arg(long)]
    options: Option<PathBuf>,

    /// Initial view mode: quarter-day, half-day, day, week or month.
    #[arg(long)]
    view_mode: Option<ViewMode>,
}

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let app = match build_app(&cli) {
        Ok(app) => app,
        Err(e) => {
            tracing::error!(error = %e, "startup failed");
            std::process::exit(1);
        }
    };

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 720.0])
            .with_min_inner_size([800.0, 400.0])
            .with_title("Rust Gantt Lanes"),
        ..Default::default()
    };

    eframe::run_native(
        "Rust Gantt Lanes",
        options,
        Box::new(move |cc| {
            app.install_fonts(cc);
            Ok(Box::new(app))
        }),
    )
}

fn build_app(cli: &Cli) -> gantt_lanes::Result<GanttApp> {
    let mut options = gantt_lanes::io::resolve_options(cli.options.as_deref())?;
    if let Some(mode) = cli.view_mode {
        options.view_mode = mode;
    }
    let project = match &cli.tasks {
        Some(path) => gantt_lanes::io::load_project(path)?,
        None => GanttApp::sample_project(),
    };
    Ok(GanttApp::new(project, cli.tasks.clone(), options))
}
