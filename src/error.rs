//! Error types for loading, parameter acquisition, analysis and export.

use std::path::PathBuf;

use thiserror::Error;

// ---------------------------------------------------------------------------
// Loading
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum RecordingLoadError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("expected {expected} header lines, file has only {found} lines")]
    MissingHeader { expected: usize, found: usize },

    #[error("line {line}: {source}")]
    Csv {
        line: u64,
        #[source]
        source: csv::Error,
    },

    #[error("line {line}: expected 5 or 6 fields, found {found}")]
    FieldCount { line: u64, found: usize },

    #[error("line {line}: {field} value '{value}' is not a number")]
    InvalidNumber {
        line: u64,
        field: &'static str,
        value: String,
    },
}

// ---------------------------------------------------------------------------
// Interactive parameters
// ---------------------------------------------------------------------------

/// A numeric answer that parsed but fell outside its inclusive bounds.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("Number is outside the valid range ({min}-{max}): {value}")]
pub struct RangeError {
    pub value: f64,
    pub min: f64,
    pub max: f64,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Not a number: '{0}'")]
    NotANumber(String),

    #[error(transparent)]
    Range(#[from] RangeError),

    #[error("input cancelled")]
    Cancelled,
}

// ---------------------------------------------------------------------------
// Analysis
// ---------------------------------------------------------------------------

#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataQualityError {
    #[error("rows {first}..={last} contain no numeric signal values")]
    NoSignal { first: usize, last: usize },

    #[error("baseline rows {first}..={last} contain no usable values")]
    EmptyBaseline { first: usize, last: usize },

    #[error("elapsed time decreases at row {row}")]
    NonMonotonicTime { row: usize },
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("anchor row {anchor} is outside a recording of {rows} rows")]
    AnchorOutOfRange { anchor: usize, rows: usize },

    #[error(
        "window {first}..={last} around row {anchor} exceeds the recording (rows 0..{rows})"
    )]
    WindowOutOfRange {
        anchor: usize,
        first: f64,
        last: f64,
        rows: usize,
    },

    #[error("baseline of {baseline_seconds}s before row {anchor} is not inside the window")]
    BaselineOutOfRange {
        anchor: usize,
        baseline_seconds: usize,
    },

    #[error(transparent)]
    DataQuality(#[from] DataQualityError),
}

// ---------------------------------------------------------------------------
// Export
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("writing {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("encoding CSV: {0}")]
    Csv(#[from] csv::Error),
}

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("no recording loaded")]
    NoRecording,

    #[error(transparent)]
    Parameter(#[from] ParameterError),

    #[error(transparent)]
    Analysis(#[from] AnalysisError),

    #[error(transparent)]
    Export(#[from] ExportError),
}
