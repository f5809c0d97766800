use std::path::Path;

use crate::error::RecordingLoadError;

use super::model::{find_event_candidates, Recording, Sample};

/// Metadata lines the instrument writes before the first data row.
pub const DEFAULT_HEADER_LINES: usize = 7;

// ---------------------------------------------------------------------------
// Public entry-point
// ---------------------------------------------------------------------------

/// Load a recording and the row indices of its event candidates.
///
/// Expected layout: `header_lines` lines of free-form metadata, then one
/// tab-separated row per sample:
///
/// ```text
/// date <TAB> time <TAB> timestamp <TAB> elapsed <TAB> signal [<TAB> comment]
/// ```
pub fn load_file(
    path: &Path,
    header_lines: usize,
) -> Result<(Recording, Vec<usize>), RecordingLoadError> {
    let text = std::fs::read_to_string(path).map_err(|source| RecordingLoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut recording = parse_recording(&text, header_lines)?;
    recording.source = Some(path.to_path_buf());
    let events = find_event_candidates(&recording);
    if recording.is_empty() {
        log::warn!("{} contains no data rows", path.display());
    }

    log::info!(
        "Loaded {} rows from {} ({} event candidates)",
        recording.len(),
        path.display(),
        events.len()
    );
    Ok((recording, events))
}

/// Parse recording text that is already in memory.
pub fn parse_recording(text: &str, header_lines: usize) -> Result<Recording, RecordingLoadError> {
    let body = skip_lines(text, header_lines)?;

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .has_headers(false)
        .flexible(true)
        .from_reader(body.as_bytes());

    let mut samples = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|source| RecordingLoadError::Csv {
            line: source
                .position()
                .map(|p| p.line() + header_lines as u64)
                .unwrap_or(0),
            source,
        })?;
        let line = record
            .position()
            .map(|p| p.line() + header_lines as u64)
            .unwrap_or(0);

        if record.iter().all(|field| field.trim().is_empty()) {
            continue;
        }
        if !(5..=6).contains(&record.len()) {
            return Err(RecordingLoadError::FieldCount {
                line,
                found: record.len(),
            });
        }

        let field = |i: usize| record.get(i).unwrap_or("");
        samples.push(Sample {
            date: field(0).trim().to_string(),
            time: field(1).trim().to_string(),
            timestamp: field(2).to_string(),
            elapsed: parse_number(field(3), line, "elapsed time", false)?,
            signal: parse_number(field(4), line, "signal", true)?,
            comment: record.get(5).map(|c| c.trim().to_string()),
        });
    }

    Ok(Recording::new(samples))
}

fn skip_lines(text: &str, count: usize) -> Result<&str, RecordingLoadError> {
    let mut offset = 0;
    for found in 0..count {
        match text[offset..].find('\n') {
            Some(pos) => offset += pos + 1,
            None => {
                return Err(RecordingLoadError::MissingHeader {
                    expected: count,
                    found: found + usize::from(offset < text.len()),
                })
            }
        }
    }
    Ok(&text[offset..])
}

fn parse_number(
    raw: &str,
    line: u64,
    field: &'static str,
    allow_missing: bool,
) -> Result<f64, RecordingLoadError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() && allow_missing {
        return Ok(f64::NAN);
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| RecordingLoadError::InvalidNumber {
            line,
            field,
            value: raw.to_string(),
        })
}
