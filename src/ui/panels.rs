use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};
use egui_extras::{Column, TableBuilder};
use sir_viewer::{ModelColumn, Stokes};

use crate::state::AppState;

// ---------------------------------------------------------------------------
// Left side panel – series toggles
// ---------------------------------------------------------------------------

/// Render the left panel: checkboxes, plot controls and the entity table.
pub fn side_panel(ui: &mut Ui, state: &mut AppState) {
    ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui: &mut Ui| {
            if ui.button("Select files…").clicked() {
                open_file_dialog(state);
            }
            ui.separator();

            ui.strong("Stokes profiles");
            for s in Stokes::ALL {
                ui.checkbox(state.toggles.stokes_mut(s), s.title());
            }
            ui.separator();

            ui.strong("Model variables");
            for c in ModelColumn::PLOTTABLE {
                if let Some(flag) = state.toggles.model_mut(c) {
                    ui.checkbox(flag, c.title());
                }
            }
            ui.separator();

            let mut errors = state.toggles.errors;
            if ui.checkbox(&mut errors, "Plot errors").changed() {
                state.set_errors(errors);
            }

            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Plot").clicked() {
                    state.plot();
                }
                // The button names the scale it switches to.
                let label = if state.toggles.height_scale {
                    "τ scale"
                } else {
                    "z scale"
                };
                if ui.button(label).clicked() {
                    state.toggle_height_scale();
                }
            });
            ui.separator();

            entity_table(ui, state);
        });
}

/// Which files each entity has: selected, and whether they loaded.
fn entity_table(ui: &mut Ui, state: &AppState) {
    let Some(session) = &state.session else {
        ui.label("No files selected.");
        return;
    };
    let selection = session.selection();
    let loaded = state.snapshot.as_ref().map(|s| {
        (
            s.dataset.per_mask(),
            s.dataset.mod_mask(),
            s.dataset.err_mask(),
        )
    });

    let cell = |ui: &mut Ui, selected: bool, ok: Option<bool>| {
        let text = match (selected, ok) {
            (false, _) => RichText::new("–"),
            (true, Some(false)) => RichText::new("✘").color(Color32::RED),
            (true, _) => RichText::new("✔"),
        };
        ui.label(text);
    };

    TableBuilder::new(ui)
        .striped(true)
        .vscroll(false)
        .column(Column::remainder())
        .columns(Column::auto(), 3)
        .header(18.0, |mut header| {
            for title in ["Name", ".per", ".mod", ".err"] {
                header.col(|ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|mut body| {
            for (i, name) in selection.names.iter().enumerate() {
                body.row(18.0, |mut row| {
                    row.col(|ui| {
                        let color = state
                            .color_map
                            .as_ref()
                            .map(|cm| cm.color_for(name))
                            .unwrap_or(Color32::LIGHT_BLUE);
                        ui.label(RichText::new(name).color(color));
                    });
                    row.col(|ui| cell(ui, selection.per_mask[i], loaded.as_ref().map(|l| l.0[i])));
                    row.col(|ui| cell(ui, selection.mod_mask[i], loaded.as_ref().map(|l| l.1[i])));
                    row.col(|ui| {
                        let tried = state.toggles.errors && loaded.as_ref().is_some_and(|l| l.1[i]);
                        cell(ui, tried, loaded.as_ref().map(|l| l.2[i]));
                    });
                });
            }
        });
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the top menu / toolbar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Select files…").clicked() {
                open_file_dialog(state);
                ui.close_menu();
            }
            if ui.button("Quit").clicked() {
                ui.ctx().send_viewport_cmd(egui::ViewportCommand::Close);
            }
        });

        ui.separator();

        if let Some(snap) = &state.snapshot {
            ui.label(format!(
                "{} entities: {} profiles, {} models loaded",
                snap.dataset.len(),
                snap.dataset.profiles().count(),
                snap.dataset.models().count()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let mut dialog = rfd::FileDialog::new()
        .set_title("Select a file:")
        .add_filter("SIR files", &["per", "mod"]);
    if let Some(dir) = &state.initial_dir {
        dialog = dialog.set_directory(dir);
    }

    match dialog.pick_files() {
        Some(paths) => {
            log::info!("selected {} file(s)", paths.len());
            state.set_selection(&paths);
        }
        None => {
            state.status_message = Some("No file selected: please load a file".to_string());
        }
    }
}
