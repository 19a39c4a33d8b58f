use std::path::PathBuf;

use chrono::NaiveDateTime;

use crate::layout::ChartEvent;
use crate::model::{ChartContext, ChartOptions, Project, ViewMode};
use crate::ui;
use crate::ui::gantt_chart::ChartSession;

/// Main application state.
pub struct GanttApp {
    pub project: Project,
    pub session: ChartSession,
    pub file_path: Option<PathBuf>,
    pub show_about: bool,
    pub status_message: String,
}

impl GanttApp {
    /// Build the app around `project`. The chart origin is fitted to the
    /// tasks for the configured view mode.
    pub fn new(project: Project, file_path: Option<PathBuf>, options: ChartOptions) -> Self {
        let now = chrono::Local::now().naive_local();
        let view_mode = options.view_mode;
        let mut context = ChartContext::new(now, now, options);
        context.set_view_mode(view_mode);
        context.fit_to_tasks(&project.tasks);

        Self {
            project,
            session: ChartSession::new(context),
            file_path,
            show_about: false,
            status_message: "Ready".to_string(),
        }
    }

    /// Register the Phosphor icon font so the marker glyph renders.
    pub fn install_fonts(&self, cc: &eframe::CreationContext<'_>) {
        let mut fonts = egui::FontDefinitions::default();
        egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
        cc.egui_ctx.set_fonts(fonts);
        ui::theme::apply_theme(&cc.egui_ctx);
    }

    /// A demonstration schedule starting at the beginning of this week.
    pub fn sample_project() -> Project {
        let today = chrono::Local::now().date_naive();
        let monday = today - chrono::Duration::days(
            i64::from(chrono::Datelike::weekday(&today).num_days_from_monday()),
        );
        Project::sample(monday.and_time(chrono::NaiveTime::MIN))
    }

    // --- File operations ---

    pub fn reload_project(&mut self) {
        let Some(path) = self.file_path.clone() else {
            return;
        };
        match crate::io::load_project(&path) {
            Ok(project) => {
                self.project = project;
                self.session.context.fit_to_tasks(&self.project.tasks);
                self.session.selected = None;
                self.session.popup = None;
                self.session.invalidate();
                self.status_message = "Project reloaded".to_string();
            }
            Err(e) => {
                tracing::error!(error = %e, "reload failed");
                self.status_message = format!("Error loading: {}", e);
            }
        }
    }

    pub fn save_project(&mut self) {
        let Some(path) = self.file_path.clone() else {
            return;
        };
        match crate::io::save_project(&self.project, &path) {
            Ok(()) => self.status_message = "Project saved".to_string(),
            Err(e) => {
                tracing::error!(error = %e, "save failed");
                self.status_message = format!("Error saving: {}", e);
            }
        }
    }

    // --- Chart operations ---

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.session.context.set_view_mode(mode);
        self.session.context.fit_to_tasks(&self.project.tasks);
        self.session.invalidate();
        self.status_message = format!("{} view", mode.label());
    }

    /// Drain chart events into the log and the status bar.
    fn handle_events(&mut self) {
        for event in std::mem::take(&mut self.session.events) {
            self.status_message = self.describe_event(&event);
            tracing::info!(event = event.name(), "{}", self.status_message);
        }
    }

    fn describe_event(&self, event: &ChartEvent) -> String {
        let name_of = |id| {
            self.project
                .task(id)
                .map(|t| t.name.clone())
                .unwrap_or_else(|| id.to_string())
        };
        let fmt = |d: &NaiveDateTime| d.format("%Y-%m-%d %H:%M").to_string();
        match event {
            ChartEvent::DateChange {
                task_id,
                start,
                end,
            } => format!("'{}' moved to {} → {}", name_of(*task_id), fmt(start), fmt(end)),
            ChartEvent::Click { task_id } => format!("Opened '{}'", name_of(*task_id)),
        }
    }
}

impl eframe::App for GanttApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let should_save = ctx.input(|i| i.modifiers.ctrl && i.key_pressed(egui::Key::S));
        if should_save {
            self.save_project();
        }

        // Top panel: toolbar
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui::toolbar::show_toolbar(self, ui);
        });

        // Bottom panel: status bar
        egui::TopBottomPanel::bottom("status_bar")
            .exact_height(ui::theme::STATUS_BAR_HEIGHT)
            .frame(
                egui::Frame::default()
                    .fill(ui::theme::BG_STATUS)
                    .inner_margin(egui::Margin::symmetric(10.0, 0.0)),
            )
            .show(ctx, |ui| {
                ui.horizontal_centered(|ui| {
                    ui.label(
                        egui::RichText::new(&self.status_message)
                            .size(11.0)
                            .color(ui::theme::TEXT_SECONDARY),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(
                            egui::RichText::new(format!(
                                "Tasks: {}  ·  Lanes: {}",
                                self.project.tasks.len(),
                                self.session.layout.state().lane_count()
                            ))
                            .size(10.5)
                            .color(ui::theme::TEXT_DIM),
                        );
                    });
                });
            });

        egui::CentralPanel::default()
            .frame(egui::Frame::none().fill(ui::theme::BG_DARK))
            .show(ctx, |ui| {
                ui::gantt_chart::show_gantt_chart(&mut self.project.tasks, &mut self.session, ui);
            });

        self.handle_events();

        ui::dialogs::show_bar_popup(self, ctx);
        if self.show_about {
            ui::dialogs::show_about_dialog(self, ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_app_adopts_view_mode_from_options() {
        let options = ChartOptions {
            view_mode: ViewMode::Week,
            ..Default::default()
        };
        let app = GanttApp::new(GanttApp::sample_project(), None, options);
        assert_eq!(app.session.context.options.step, 168.0);
        assert!(app.session.needs_layout());
    }

    #[test]
    fn date_change_events_reach_the_status_bar() {
        let mut app = GanttApp::new(GanttApp::sample_project(), None, ChartOptions::default());
        let task = app.project.tasks[0].clone();
        app.session.events.push(ChartEvent::DateChange {
            task_id: task.id,
            start: task.start,
            end: task.end,
        });
        app.handle_events();
        assert!(app.session.events.is_empty());
        assert!(app.status_message.contains(&task.name));
    }
}
