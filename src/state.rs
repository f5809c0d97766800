use std::path::Path;

use crate::analysis::variant::Variant;
use crate::config::Config;
use crate::data::model::EventSummary;
use crate::error::{ParameterError, SessionError};
use crate::params::{FormSource, ParameterKind};
use crate::session::{Session, VariantReport};

// ---------------------------------------------------------------------------
// Parameter form
// ---------------------------------------------------------------------------

/// Text fields for one variant, as typed by the user.
#[derive(Debug, Clone)]
pub struct VariantForm {
    pub variant: Variant,
    pub post_seconds: String,
    pub iqr_multiplier: String,
    /// Analysed (or failed for reasons the user cannot fix).
    pub done: bool,
}

/// A confirmed event waiting for its analysis parameters.
#[derive(Debug, Clone)]
pub struct PendingAnalysis {
    pub anchor: usize,
    pub forms: Vec<VariantForm>,
}

impl PendingAnalysis {
    fn new(anchor: usize) -> Self {
        Self {
            anchor,
            forms: Variant::ALL
                .iter()
                .map(|&variant| VariantForm {
                    variant,
                    post_seconds: String::new(),
                    iqr_multiplier: String::new(),
                    done: false,
                })
                .collect(),
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub session: Session,

    /// Path of the loaded recording, shown next to the buttons.
    pub file_label: Option<String>,

    /// Read-only text shown in the main panel.
    pub transcript: String,

    /// Confirmed event whose parameters are being entered.
    pub pending: Option<PendingAnalysis>,

    /// Results for the most recent event, replaced on the next one.
    pub reports: Vec<VariantReport>,

    /// Index into `reports` shown in the table panel.
    pub selected_report: usize,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl AppState {
    pub fn new(config: Config) -> Self {
        Self {
            session: Session::new(config),
            file_label: None,
            transcript: String::new(),
            pending: None,
            reports: Vec::new(),
            selected_report: 0,
            status_message: None,
        }
    }

    /// Select File is offered until a recording has loaded.
    pub fn can_load(&self) -> bool {
        self.session.recording().is_none()
    }

    /// Get Event is offered while candidates remain and no form is open.
    pub fn can_get_event(&self) -> bool {
        self.pending.is_none() && self.session.remaining_events() > 0
    }

    /// Load a recording; on failure the previous state is kept.
    pub fn load_file(&mut self, path: &Path) {
        match self.session.load(path) {
            Ok(count) => {
                self.file_label = self
                    .session
                    .recording()
                    .and_then(|r| r.source.as_deref())
                    .map(|p| p.display().to_string());
                self.transcript = format!("{count} candidate events found.\n");
                self.status_message = None;
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                self.status_message = Some(format!("Error: {e}"));
            }
        }
    }

    /// Pop the next candidate and show it.
    pub fn next_event(&mut self) -> Option<EventSummary> {
        let event = self.session.next_event()?;
        self.transcript = format!("{}\n", event.describe());
        Some(event)
    }

    /// Open the parameter form for a confirmed event.
    pub fn begin_analysis(&mut self, anchor: usize) {
        self.reports.clear();
        self.selected_report = 0;
        self.pending = Some(PendingAnalysis::new(anchor));
    }

    /// Run every variant that has not completed, in order. Stops at the
    /// first rejected field and returns the warnings to show; the form stays
    /// open for correction.
    pub fn submit_pending(&mut self) -> Vec<String> {
        let Some(mut pending) = self.pending.take() else {
            return Vec::new();
        };
        let signal_label = self.session.config.signal_label.clone();

        for i in 0..pending.forms.len() {
            let form = &pending.forms[i];
            if form.done {
                continue;
            }
            let variant = form.variant;
            let mut source = FormSource::default()
                .with_answer(
                    ParameterKind::PostEventSeconds(variant),
                    form.post_seconds.clone(),
                )
                .with_answer(
                    ParameterKind::IqrMultiplier(variant),
                    form.iqr_multiplier.clone(),
                );

            match self.session.run_variant(pending.anchor, variant, &mut source) {
                Ok(report) => {
                    self.transcript.push_str(&format!(
                        "\n{} analysis::\n{}",
                        variant.label(),
                        report.describe(&signal_label)
                    ));
                    self.reports.push(report);
                    pending.forms[i].done = true;
                }
                Err(SessionError::Parameter(ParameterError::Cancelled)) => {
                    self.pending = Some(pending);
                    return source.warnings;
                }
                Err(e) => {
                    log::error!(
                        "{} analysis at row {} failed: {e}",
                        variant.label(),
                        pending.anchor
                    );
                    self.transcript.push_str(&format!(
                        "\n{} analysis::\nAnalysis failed: {e}\n",
                        variant.label()
                    ));
                    pending.forms[i].done = true;
                }
            }
        }
        Vec::new()
    }

    /// Abandon the remaining variants of the current event.
    pub fn cancel_pending(&mut self) {
        if let Some(pending) = self.pending.take() {
            log::info!("Skipped remaining analysis for row {}", pending.anchor);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::recording;

    fn state_in(dir: &Path) -> AppState {
        let mut state = AppState::new(Config {
            output_dir: dir.to_path_buf(),
            ..Config::default()
        });
        let mut rec = recording(&[4.0; 700]);
        rec.samples[320].comment = Some("start".into());
        state.session.set_recording(rec);
        state
    }

    fn fill(state: &mut AppState, values: [&str; 4]) {
        let pending = state.pending.as_mut().unwrap();
        pending.forms[0].post_seconds = values[0].into();
        pending.forms[0].iqr_multiplier = values[1].into();
        pending.forms[1].post_seconds = values[2].into();
        pending.forms[1].iqr_multiplier = values[3].into();
    }

    #[test]
    fn event_flow_runs_both_variants() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        assert!(state.can_get_event());

        let event = state.next_event().unwrap();
        assert!(state.transcript.contains("Comment\t\t\tstart"));
        state.begin_analysis(event.index);
        assert!(!state.can_get_event());

        fill(&mut state, ["200", "1.5", "300", "3"]);
        assert!(state.submit_pending().is_empty());
        assert!(state.pending.is_none());
        assert_eq!(state.reports.len(), 2);
        assert!(state.transcript.contains("2-second analysis::"));
        assert!(state.transcript.contains("30-second analysis::"));
        assert!(dir.path().join("timestamp_320_30s.csv").exists());
        assert!(!state.can_get_event());
    }

    #[test]
    fn invalid_field_keeps_form_open_without_rerunning_done_variants() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        let event = state.next_event().unwrap();
        state.begin_analysis(event.index);

        fill(&mut state, ["200", "1.5", "5000", "2"]);
        let warnings = state.submit_pending();
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].starts_with("Number is outside the valid range"));
        let pending = state.pending.as_ref().unwrap();
        assert!(pending.forms[0].done);
        assert!(!pending.forms[1].done);
        assert_eq!(state.reports.len(), 1);

        state.pending.as_mut().unwrap().forms[1].post_seconds = "10".into();
        assert!(state.submit_pending().is_empty());
        assert_eq!(state.reports.len(), 2);
        assert_eq!(state.reports[1].variant, Variant::Long);
    }

    #[test]
    fn failed_load_reports_and_allows_retry() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = AppState::new(Config::default());
        state.load_file(&dir.path().join("absent.txt"));
        assert!(state.status_message.as_deref().unwrap().starts_with("Error: cannot read"));
        assert!(state.can_load());
        assert!(!state.can_get_event());
    }

    #[test]
    fn cancel_closes_the_form() {
        let dir = tempfile::tempdir().unwrap();
        let mut state = state_in(dir.path());
        state.begin_analysis(320);
        state.cancel_pending();
        assert!(state.pending.is_none());
        assert!(state.submit_pending().is_empty());
    }
}
