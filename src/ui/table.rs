use eframe::egui::{self, Ui};
use egui_extras::{Column, TableBuilder};

use crate::analysis::export::format_value;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Window table (side panel)
// ---------------------------------------------------------------------------

/// Row-by-row view of one variant's analysis window.
pub fn window_table(ui: &mut Ui, state: &mut AppState) {
    ui.heading("Window");
    ui.separator();

    if state.reports.is_empty() {
        ui.label("No analysis yet.");
        return;
    }
    if state.selected_report >= state.reports.len() {
        state.selected_report = 0;
    }

    let current = state.reports[state.selected_report].variant.label();
    egui::ComboBox::from_id_salt("variant")
        .selected_text(current)
        .show_ui(ui, |ui: &mut Ui| {
            for (i, report) in state.reports.iter().enumerate() {
                ui.selectable_value(&mut state.selected_report, i, report.variant.label());
            }
        });

    let report = &state.reports[state.selected_report];
    let baseline = &report.window.baseline_rows;
    ui.label(format!(
        "{} s after row {}, baseline rows {}..{}",
        report.post_seconds, report.window.anchor, baseline.start, baseline.end
    ));
    ui.label(format!(
        "Baseline average = {}",
        format_value(report.baseline_average)
    ));
    ui.label(format!(
        "Q1 {}  Q3 {}  ×{}  ({} outliers)",
        format_value(report.window.fences.q1),
        format_value(report.window.fences.q3),
        report.iqr_multiplier,
        report.window.suppressed_count()
    ));
    ui.separator();

    let show = |v: f64| if v.is_nan() { "–".to_string() } else { format!("{v:.4}") };
    let rows = &report.window.rows;

    TableBuilder::new(ui)
        .striped(true)
        .cell_layout(egui::Layout::right_to_left(egui::Align::Center))
        .columns(Column::auto(), 2)
        .columns(Column::auto().at_least(70.0), 4)
        .header(20.0, |mut header| {
            for title in ["Row", "Time", "Signal", "Cleaned", "Filled", "Corrected"] {
                header.col(|ui: &mut Ui| {
                    ui.strong(title);
                });
            }
        })
        .body(|body| {
            body.rows(18.0, rows.len(), |mut row| {
                let r = &rows[row.index()];
                row.col(|ui: &mut Ui| {
                    ui.label(r.index.to_string());
                });
                row.col(|ui: &mut Ui| {
                    ui.label(format_value(r.elapsed));
                });
                for value in [r.signal, r.outliers_removed, r.interpolated, r.baseline_subtracted] {
                    row.col(|ui: &mut Ui| {
                        ui.label(show(value));
                    });
                }
            });
        });
}
