use std::path::Path;

use anyhow::{Context, Result};
use eframe::egui::{self, Color32, RichText, Ui};

use crate::data::loader;
use crate::data::model::{NumericColumn, VehicleDataset};
use crate::state::AppState;

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
        });

        ui.separator();

        if let Some(ds) = &state.dataset {
            let name = state.source_name.as_deref().unwrap_or("dataset");
            ui.label(format!(
                "{name}: {} rows × {} columns",
                ds.n_rows(),
                ds.n_cols()
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
    let file = rfd::FileDialog::new()
        .set_title("Open EV dataset")
        .add_filter("Spreadsheets", &["xlsx", "xlsm", "xls", "csv"])
        .add_filter("Excel", &["xlsx", "xlsm", "xls"])
        .add_filter("CSV", &["csv"])
        .pick_file();

    if let Some(path) = file {
        state.loading = true;
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("dataset")
            .to_string();

        match load_for_session(&path) {
            Ok(dataset) => {
                log::info!(
                    "Loaded {} rows × {} columns from {}",
                    dataset.n_rows(),
                    dataset.n_cols(),
                    path.display()
                );
                state.set_dataset(name, dataset);
            }
            Err(e) => {
                log::error!("Failed to load file: {e:#}");
                state.status_message = Some(format!("Error: {e:#}"));
                state.loading = false;
            }
        }
    }
}

fn load_for_session(path: &Path) -> Result<VehicleDataset> {
    let dataset =
        loader::load_file(path).with_context(|| format!("loading {}", path.display()))?;

    for col in NumericColumn::ALL {
        let gaps = dataset.missing_count(col);
        if gaps > 0 {
            log::info!(
                "{}: {gaps} cells could not be read as numbers, treated as missing",
                col.name()
            );
        }
    }

    Ok(dataset)
}
