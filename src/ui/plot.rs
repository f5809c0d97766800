use eframe::egui::{Color32, Ui};
use egui_plot::{Line, Plot, PlotPoints, VLine};

use crate::color::series_color;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Baseline-corrected signal plot (central panel)
// ---------------------------------------------------------------------------

/// Plot the baseline-subtracted signal of each variant run for the current
/// event, against source row number.
pub fn analysis_plot(ui: &mut Ui, state: &AppState) {
    if state.reports.is_empty() {
        ui.centered_and_justified(|ui: &mut Ui| {
            ui.label("Confirm an event to plot its analysis");
        });
        return;
    }

    let count = state.reports.len();
    Plot::new("analysis_plot")
        .legend(egui_plot::Legend::default())
        .x_axis_label("Row (s from start)")
        .y_axis_label("Baseline-subtracted signal")
        .allow_boxed_zoom(true)
        .allow_drag(true)
        .allow_scroll(true)
        .allow_zoom(true)
        .show(ui, |plot_ui| {
            for (i, report) in state.reports.iter().enumerate() {
                let points: PlotPoints = report
                    .window
                    .rows
                    .iter()
                    .map(|r| [r.index as f64, r.baseline_subtracted])
                    .collect();

                let line = Line::new(points)
                    .name(format!("{} analysis", report.variant.label()))
                    .color(series_color(i, count))
                    .width(1.5);
                plot_ui.line(line);
            }

            let anchor = state.reports[0].window.anchor as f64;
            plot_ui.vline(VLine::new(anchor).name("event").color(Color32::GRAY));
        });
}
