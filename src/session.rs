use std::path::{Path, PathBuf};

use crate::analysis::export::{export, format_value, preview_table};
use crate::analysis::variant::Variant;
use crate::analysis::window::{analyze, AnalysisWindow, WindowSpec};
use crate::config::Config;
use crate::data::loader::load_file;
use crate::data::model::{EventQueue, EventSummary, Recording};
use crate::error::{RecordingLoadError, SessionError};
use crate::params::{acquire, parse_multiplier, parse_post_seconds, ParameterRequest, ParameterSource};

/// Rows shown in the on-screen preview of a window.
const PREVIEW_ROWS: usize = 10;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// The loaded recording and its unreviewed events, owned by whichever front
/// end drives the review.
#[derive(Debug, Default)]
pub struct Session {
    pub config: Config,
    recording: Option<Recording>,
    events: EventQueue,
}

/// Outcome of one analysis variant.
#[derive(Debug, Clone)]
pub struct VariantReport {
    pub variant: Variant,
    pub post_seconds: usize,
    pub iqr_multiplier: f64,
    pub window: AnalysisWindow,
    pub baseline_average: f64,
    pub path: PathBuf,
}

impl VariantReport {
    /// Transcript text for this variant.
    pub fn describe(&self, signal_label: &str) -> String {
        format!(
            "Baseline average = {}\n\n{}\n\nWrote {}\n",
            format_value(self.baseline_average),
            preview_table(&self.window, signal_label, PREVIEW_ROWS),
            self.path.display()
        )
    }
}

impl Session {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            recording: None,
            events: EventQueue::default(),
        }
    }

    /// Replace the current recording. On error nothing changes.
    pub fn load(&mut self, path: &Path) -> Result<usize, RecordingLoadError> {
        let (recording, candidates) = load_file(path, self.config.header_lines)?;
        let count = candidates.len();
        self.recording = Some(recording);
        self.events = EventQueue::new(candidates);
        Ok(count)
    }

    /// Use an in-memory recording.
    #[cfg(test)]
    pub fn set_recording(&mut self, recording: Recording) {
        self.events = EventQueue::new(crate::data::model::find_event_candidates(&recording));
        self.recording = Some(recording);
    }

    pub fn recording(&self) -> Option<&Recording> {
        self.recording.as_ref()
    }

    pub fn remaining_events(&self) -> usize {
        self.events.remaining()
    }

    /// Take the next candidate off the queue.
    pub fn next_event(&mut self) -> Option<EventSummary> {
        let recording = self.recording.as_ref()?;
        let index = self.events.pop_next()?;
        let sample = &recording.samples[index];
        log::info!(
            "Event candidate at row {index} ({} {}, timestamp {})",
            sample.date,
            sample.time,
            sample.timestamp
        );
        Some(EventSummary::from_sample(index, sample))
    }

    /// Ask for the variant's parameters, analyse the window around `anchor`
    /// and export it.
    pub fn run_variant(
        &self,
        anchor: usize,
        variant: Variant,
        source: &mut dyn ParameterSource,
    ) -> Result<VariantReport, SessionError> {
        let recording = self.recording.as_ref().ok_or(SessionError::NoRecording)?;

        let post_seconds = acquire(source, &ParameterRequest::post_seconds(variant), |t| {
            parse_post_seconds(t, variant.post_range())
        })?;
        let iqr_multiplier = acquire(
            source,
            &ParameterRequest::iqr_multiplier(variant),
            parse_multiplier,
        )?;

        let spec = WindowSpec::for_variant(variant, anchor, post_seconds, iqr_multiplier);
        let (window, baseline_average) =
            analyze(recording, &spec, &self.config.analysis_options())?;

        let path = self.config.output_dir.join(variant.file_name(anchor));
        export(&window, baseline_average, &self.config.signal_label, &path)?;

        Ok(VariantReport {
            variant,
            post_seconds,
            iqr_multiplier,
            window,
            baseline_average,
            path,
        })
    }
}
