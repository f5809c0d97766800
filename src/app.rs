use eframe::egui;

use crate::state::AppState;
use crate::ui::{panels, plot, table};

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct BiosensingApp {
    pub state: AppState,
}

impl BiosensingApp {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }
}

impl eframe::App for BiosensingApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ---- Top panel: buttons ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state);
        });

        // ---- Right side panel: window table ----
        egui::SidePanel::right("table_panel")
            .default_width(420.0)
            .resizable(true)
            .show(ctx, |ui| {
                table::window_table(ui, &mut self.state);
            });

        // ---- Central panel: transcript above plot ----
        egui::CentralPanel::default().show(ctx, |ui| {
            let half = ui.available_height() * 0.5;
            ui.allocate_ui(egui::vec2(ui.available_width(), half), |ui| {
                panels::transcript(ui, &self.state);
            });
            ui.separator();
            plot::analysis_plot(ui, &self.state);
        });

        // ---- Parameter form ----
        panels::parameter_window(ctx, &mut self.state);
    }
}
