use std::ops::Range;

use serde::{Deserialize, Serialize};

use crate::data::model::Recording;
use crate::error::{AnalysisError, DataQualityError};

use super::interpolate::interpolate_linear;
use super::outliers::{suppress_outliers, Fences};
use super::stats::mean;
use super::variant::Variant;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// How window lengths given in seconds are mapped onto rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeAxis {
    /// One row per second; row numbers are the time axis.
    #[default]
    RowIndex,
    /// Use the elapsed-seconds column, for irregularly sampled recordings.
    Elapsed,
}

/// What to do when a window reaches past either end of the recording.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EdgePolicy {
    /// Keep the rows that exist and warn.
    #[default]
    Clip,
    /// Reject the window.
    Fail,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AnalysisOptions {
    pub time_axis: TimeAxis,
    pub edge_policy: EdgePolicy,
}

/// Where and how to cut the window around an event.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowSpec {
    pub anchor: usize,
    pub pre_seconds: usize,
    pub post_seconds: usize,
    pub baseline_seconds: usize,
    pub iqr_multiplier: f64,
}

impl WindowSpec {
    pub fn for_variant(
        variant: Variant,
        anchor: usize,
        post_seconds: usize,
        iqr_multiplier: f64,
    ) -> Self {
        Self {
            anchor,
            pre_seconds: variant.pre_seconds(),
            post_seconds,
            baseline_seconds: variant.baseline_seconds(),
            iqr_multiplier,
        }
    }
}

// ---------------------------------------------------------------------------
// Result
// ---------------------------------------------------------------------------

/// One row of an analysis window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowRow {
    /// Row number in the source recording.
    pub index: usize,
    pub elapsed: f64,
    pub signal: f64,
    /// `NaN` where the signal was rejected as an outlier.
    pub outliers_removed: f64,
    pub interpolated: f64,
    pub baseline_subtracted: f64,
}

/// Cleaned, baseline-corrected copy of the rows around an event.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisWindow {
    pub anchor: usize,
    pub fences: Fences,
    /// Source rows averaged into the baseline.
    pub baseline_rows: Range<usize>,
    pub rows: Vec<WindowRow>,
}

impl AnalysisWindow {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Source rows covered by the window.
    pub fn row_range(&self) -> Range<usize> {
        match (self.rows.first(), self.rows.last()) {
            (Some(first), Some(last)) => first.index..last.index + 1,
            _ => self.anchor..self.anchor,
        }
    }

    /// Rows whose signal was rejected as an outlier.
    pub fn suppressed_count(&self) -> usize {
        self.rows
            .iter()
            .filter(|r| r.outliers_removed.is_nan() && !r.signal.is_nan())
            .count()
    }
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

/// Cut the window described by `spec` out of `recording`, reject outliers,
/// fill the gaps and subtract the pre-event baseline.
///
/// Returns the window together with the baseline average. The recording is
/// only read.
pub fn analyze(
    recording: &Recording,
    spec: &WindowSpec,
    options: &AnalysisOptions,
) -> Result<(AnalysisWindow, f64), AnalysisError> {
    let n = recording.len();
    if spec.anchor >= n {
        return Err(AnalysisError::AnchorOutOfRange {
            anchor: spec.anchor,
            rows: n,
        });
    }

    let positions = axis_positions(recording, options.time_axis)?;
    let t0 = positions[spec.anchor];

    // -- window bounds --
    let lo = t0 - spec.pre_seconds as f64;
    let hi = t0 + spec.post_seconds as f64;
    let (first_t, last_t) = (positions[0], positions[n - 1]);
    if lo < first_t || hi > last_t {
        match options.edge_policy {
            EdgePolicy::Fail => {
                return Err(AnalysisError::WindowOutOfRange {
                    anchor: spec.anchor,
                    first: lo,
                    last: hi,
                    rows: n,
                })
            }
            EdgePolicy::Clip => log::warn!(
                "Window {lo}..={hi} around row {} clipped to the recording ({first_t}..={last_t})",
                spec.anchor
            ),
        }
    }
    let start = positions.partition_point(|&p| p < lo);
    let end = positions.partition_point(|&p| p <= hi);

    // -- baseline bounds --
    let baseline_lo = t0 - spec.baseline_seconds as f64;
    if baseline_lo < lo.max(first_t) {
        return Err(AnalysisError::BaselineOutOfRange {
            anchor: spec.anchor,
            baseline_seconds: spec.baseline_seconds,
        });
    }
    let baseline_rows =
        positions.partition_point(|&p| p < baseline_lo)..positions.partition_point(|&p| p < t0);

    // -- outliers --
    let samples = &recording.samples[start..end];
    let signal: Vec<f64> = samples.iter().map(|s| s.signal).collect();
    let fences = Fences::from_values(&signal, spec.iqr_multiplier).ok_or(
        DataQualityError::NoSignal {
            first: start,
            last: end - 1,
        },
    )?;
    let outliers_removed = suppress_outliers(&signal, &fences);

    // -- gap filling --
    let interpolated = interpolate_linear(&positions[start..end], &outliers_removed);

    // -- baseline --
    let baseline_slice = &interpolated[baseline_rows.start - start..baseline_rows.end - start];
    let baseline_average = mean(baseline_slice).ok_or(DataQualityError::EmptyBaseline {
        first: baseline_rows.start,
        last: baseline_rows.end.saturating_sub(1),
    })?;

    let rows: Vec<WindowRow> = samples
        .iter()
        .enumerate()
        .map(|(k, s)| WindowRow {
            index: start + k,
            elapsed: s.elapsed,
            signal: s.signal,
            outliers_removed: outliers_removed[k],
            interpolated: interpolated[k],
            baseline_subtracted: interpolated[k] - baseline_average,
        })
        .collect();

    let window = AnalysisWindow {
        anchor: spec.anchor,
        fences,
        baseline_rows,
        rows,
    };
    log::debug!(
        "Row {}: rows {:?}, Q1={} Q3={} IQR={}, {} outliers, baseline {}",
        spec.anchor,
        window.row_range(),
        fences.q1,
        fences.q3,
        fences.iqr,
        window.suppressed_count(),
        baseline_average
    );
    Ok((window, baseline_average))
}

fn axis_positions(recording: &Recording, axis: TimeAxis) -> Result<Vec<f64>, DataQualityError> {
    match axis {
        TimeAxis::RowIndex => Ok((0..recording.len()).map(|i| i as f64).collect()),
        TimeAxis::Elapsed => {
            if let Some(row) = recording.first_time_regression() {
                return Err(DataQualityError::NonMonotonicTime { row });
            }
            if let Some(row) = recording.samples.iter().position(|s| !s.elapsed.is_finite()) {
                return Err(DataQualityError::NonMonotonicTime { row });
            }
            Ok(recording.samples.iter().map(|s| s.elapsed).collect())
        }
    }
}
