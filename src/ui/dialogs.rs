use crate::app::GanttApp;
use crate::ui::theme;
use egui::{Context, RichText, Window};

/// Render the popup opened by clicking a bar.
pub fn show_bar_popup(app: &mut GanttApp, ctx: &Context) {
    // Hidden while a bar is being dragged.
    if app.session.is_dragging() {
        return;
    }
    let Some(open) = app.session.popup.as_ref() else {
        return;
    };

    let mut should_close = false;
    let invalid = app
        .project
        .task(open.request.task_id)
        .is_some_and(|t| t.invalid);

    Window::new(RichText::new(&open.request.title).strong().size(13.0))
        .id(egui::Id::new(("bar-popup", open.request.task_id)))
        .resizable(false)
        .collapsible(false)
        .title_bar(true)
        .fixed_pos(open.anchor)
        .show(ctx, |ui| {
            ui.label(RichText::new(&open.request.subtitle).color(theme::TEXT_SECONDARY));
            if invalid {
                ui.label(RichText::new("Marked invalid").color(theme::BAR_INVALID_STROKE).small());
            }
            ui.add_space(4.0);
            if ui.small_button("Close").clicked() {
                should_close = true;
            }
        });

    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.session.popup = None;
    }
}

/// Render the "About" dialog.
pub fn show_about_dialog(app: &mut GanttApp, ctx: &Context) {
    let mut should_close = false;
    Window::new("About")
        .resizable(false)
        .collapsible(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .fixed_size([320.0, 190.0])
        .show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.add_space(12.0);
                ui.heading(RichText::new("Rust Gantt Lanes").strong());
                ui.add_space(2.0);
                ui.label(
                    RichText::new(format!("Version {}", env!("CARGO_PKG_VERSION")))
                        .color(theme::TEXT_SECONDARY),
                );
                ui.add_space(10.0);
                ui.label("Drag bars to move · Drag the right edge to resize");
                ui.label("Ctrl+Scroll to zoom · Double-click to open a task");
                ui.add_space(14.0);
                if ui.add_sized([100.0, 28.0], egui::Button::new("Close")).clicked() {
                    should_close = true;
                }
            });
        });
    if should_close || ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
        app.show_about = false;
    }
}
