use eframe::egui::{self, Color32, RichText, ScrollArea, Ui};

use crate::params::{ParameterRequest, MULTIPLIER_RANGE};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the button row: Select File, Get Event and the loaded file name.
pub fn top_bar(ui: &mut Ui, state: &mut AppState) {
    ui.horizontal(|ui: &mut Ui| {
        if ui
            .add_enabled(state.can_load(), egui::Button::new("Select File"))
            .clicked()
        {
            open_file_dialog(state);
        }

        if ui
            .add_enabled(state.can_get_event(), egui::Button::new("Get Event"))
            .clicked()
        {
            get_event(state);
        }

        if let Some(label) = &state.file_label {
            ui.label(label);
            ui.separator();
            ui.label(format!(
                "{} events remaining",
                state.session.remaining_events()
            ));
        }

        if let Some(msg) = &state.status_message {
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Transcript
// ---------------------------------------------------------------------------

/// Read-only text display of the current event and its analyses.
pub fn transcript(ui: &mut Ui, state: &AppState) {
    ScrollArea::vertical()
        .id_salt("transcript")
        .auto_shrink([false, false])
        .stick_to_bottom(true)
        .show(ui, |ui: &mut Ui| {
            ui.add(
                egui::TextEdit::multiline(&mut state.transcript.as_str())
                    .font(egui::TextStyle::Monospace)
                    .desired_width(f32::INFINITY),
            );
        });
}

// ---------------------------------------------------------------------------
// Parameter form
// ---------------------------------------------------------------------------

/// Modal-style window asking for each variant's post-event seconds and IQR
/// multiplier. Rejected answers raise a warning and keep the window open.
pub fn parameter_window(ctx: &egui::Context, state: &mut AppState) {
    let Some(pending) = state.pending.as_mut() else {
        return;
    };

    let mut submit = false;
    let mut cancel = false;

    egui::Window::new("User Input Required")
        .collapsible(false)
        .resizable(false)
        .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
        .show(ctx, |ui: &mut Ui| {
            ui.label(format!("Event at row {}", pending.anchor));
            ui.separator();

            for form in &mut pending.forms {
                let post = ParameterRequest::post_seconds(form.variant);
                let mult = ParameterRequest::iqr_multiplier(form.variant);

                ui.strong(format!("{} analysis", form.variant.label()));
                if form.done {
                    ui.label("done");
                    ui.separator();
                    continue;
                }
                egui::Grid::new(("params", form.variant.tag()))
                    .num_columns(2)
                    .show(ui, |ui: &mut Ui| {
                        ui.label(post.prompt);
                        ui.text_edit_singleline(&mut form.post_seconds);
                        ui.end_row();
                        ui.label(mult.prompt);
                        ui.text_edit_singleline(&mut form.iqr_multiplier);
                        ui.end_row();
                    });
                ui.separator();
            }

            ui.horizontal(|ui: &mut Ui| {
                submit = ui.button("Run analysis").clicked();
                cancel = ui.button("Skip").clicked();
            });
            ui.small(format!(
                "IQR multiplier between {} and {}",
                MULTIPLIER_RANGE.start(),
                MULTIPLIER_RANGE.end()
            ));
        });

    if submit {
        let warnings = state.submit_pending();
        if !warnings.is_empty() {
            show_warning(&warnings.join("\n"));
        }
    } else if cancel {
        state.cancel_pending();
    }
}

// ---------------------------------------------------------------------------
// Dialogs
// ---------------------------------------------------------------------------

pub fn open_file_dialog(state: &mut AppState) {
    let file = rfd::FileDialog::new()
        .set_title("Select a File")
        .set_directory(".")
        .add_filter("Text files", &["txt"])
        .add_filter("All files", &["*"])
        .pick_file();

    if let Some(path) = file {
        state.load_file(&path);
    }
}

/// Show the next candidate and ask whether it is a real experimental event.
pub fn get_event(state: &mut AppState) {
    let Some(event) = state.next_event() else {
        return;
    };

    let answer = rfd::MessageDialog::new()
        .set_title("User Input Required")
        .set_description("Does this comment represent an experimental event?")
        .set_level(rfd::MessageLevel::Info)
        .set_buttons(rfd::MessageButtons::YesNo)
        .show();

    if matches!(answer, rfd::MessageDialogResult::Yes) {
        state.begin_analysis(event.index);
    } else {
        log::debug!("Row {} not treated as an event", event.index);
    }
}

fn show_warning(message: &str) {
    rfd::MessageDialog::new()
        .set_title("Error")
        .set_description(message)
        .set_level(rfd::MessageLevel::Warning)
        .set_buttons(rfd::MessageButtons::Ok)
        .show();
}
