use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::data::model::Observable;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series toggles and data table
// ---------------------------------------------------------------------------

/// Render the left panel.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Series");
    ui.separator();

    for i in 0..state.styles.len() {
        let style = state.styles[i];
        let text = RichText::new(style.observable.label()).color(Color32::from(style.color));
        ui.checkbox(&mut state.visible[i], text);
    }

    ui.add_space(8.0);
    ui.heading("Reference (L = ∞)");
    ui.separator();

    let reference = state.dataset.reference;
    egui::Grid::new("reference_grid")
        .num_columns(2)
        .show(ui, |ui: &mut Ui| {
            for observable in Observable::ALL {
                ui.label(observable.short_name());
                ui.monospace(format!("{:.12e}", reference.value(observable)));
                ui.end_row();
            }
        });

    ui.add_space(8.0);
    ui.heading("Finite-size errors");
    ui.separator();

    let errors = &state.errors;
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            egui::Grid::new("error_table")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui: &mut Ui| {
                    ui.strong("L");
                    ui.strong("Δ free energy");
                    ui.strong("Δ energy");
                    ui.end_row();

                    for i in 0..errors.len() {
                        ui.monospace(errors.sizes[i].to_string());
                        ui.monospace(format!("{:.6e}", errors.free_energy[i]));
                        ui.monospace(format!("{:.6e}", errors.energy[i]));
                        ui.end_row();
                    }
                });
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Reload").clicked() {
                state.reload();
                ui.close_menu();
            }
            if ui.button("Export PDF").clicked() {
                state.export();
                ui.close_menu();
            }
        });

        ui.separator();

        ui.label(format!(
            "{}: {} finite-size rows",
            state.input.display(),
            state.errors.len()
        ));

        if let Some(msg) = &state.status_message {
            ui.separator();
            let color = if msg.starts_with("Error") {
                Color32::RED
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(msg).color(color));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Open simulation results")
        .add_filter("Results", &["dat", "txt"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.load(&path);
    }
}
