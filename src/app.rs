use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, views};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct EvLensApp {
    pub state: AppState,
}

impl Default for EvLensApp {
    fn default() -> Self {
        Self {
            state: AppState::default(),
        }
    }
}

impl eframe::App for EvLensApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Central panel: the fixed analysis sequence ----
        egui::CentralPanel::default().show(ctx, |ui| {
            views::analysis_column(ui, &self.state);
        });
    }
}
