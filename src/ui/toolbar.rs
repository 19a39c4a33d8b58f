use crate::app::GanttApp;
use crate::model::ViewMode;
use egui::{menu, RichText, Ui};

/// Render the top toolbar / menu bar.
pub fn show_toolbar(app: &mut GanttApp, ui: &mut Ui) {
    menu::bar(ui, |ui| {
        ui.menu_button(RichText::new("  File  "), |ui| {
            let has_file = app.file_path.is_some();
            if ui
                .add_enabled(has_file, egui::Button::new("  Reload"))
                .clicked()
            {
                app.reload_project();
                ui.close_menu();
            }
            if ui
                .add_enabled(has_file, egui::Button::new("  Save          Ctrl+S"))
                .clicked()
            {
                app.save_project();
                ui.close_menu();
            }
            ui.separator();
            if ui.button("  Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
                ui.close_menu();
            }
        });

        ui.menu_button(RichText::new("  View  "), |ui| {
            if ui.button("  Zoom In        Ctrl+Scroll ↑").clicked() {
                app.session.context.zoom_in();
                app.session.invalidate();
                ui.close_menu();
            }
            if ui.button("  Zoom Out      Ctrl+Scroll ↓").clicked() {
                app.session.context.zoom_out();
                app.session.invalidate();
                ui.close_menu();
            }
            if ui.button("  Re-layout").clicked() {
                app.session.invalidate();
                ui.close_menu();
            }
            ui.separator();
            ui.label(RichText::new("View Mode").small().weak());
            let current = app.session.context.view_mode();
            for mode in ViewMode::ALL {
                if ui.radio(current == mode, mode.label()).clicked() {
                    app.set_view_mode(mode);
                    ui.close_menu();
                }
            }
        });

        ui.menu_button(RichText::new("  Help  "), |ui| {
            if ui.button("About").clicked() {
                app.show_about = true;
                ui.close_menu();
            }
        });

        // Right-aligned project name
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let source = if app.file_path.is_some() { "" } else { " (sample)" };
            ui.label(
                RichText::new(format!("{}{}", app.project.name, source))
                    .size(11.0)
                    .weak(),
            );
        });
    });
}
