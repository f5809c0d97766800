use std::path::Path;

use crate::error::ExportError;

use super::window::AnalysisWindow;

// ---------------------------------------------------------------------------
// Number formatting
// ---------------------------------------------------------------------------

/// Shortest round-trip decimal, always with a fractional part or exponent
/// (`10.0`, `0.25`, `1e-05`, `1.5e+16`). Missing values become empty.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return String::new();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf".into() } else { "-inf".into() };
    }
    // Debug already switches to exponent form outside [1e-4, 1e16).
    let text = format!("{value:?}");
    match text.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(d) => ('-', d),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

fn column_names(signal_label: &str) -> [String; 4] {
    [
        signal_label.to_string(),
        format!("{signal_label} Outliers Removed"),
        format!("{signal_label} Forecast Linear"),
        format!("{signal_label} Baseline Avg Subtracted"),
    ]
}

/// The exported bytes: an indexed CSV table followed by a
/// `Baseline average = <value>` line without a terminating newline.
pub fn render_csv(
    window: &AnalysisWindow,
    baseline_average: f64,
    signal_label: &str,
) -> Result<Vec<u8>, ExportError> {
    let mut writer = csv::WriterBuilder::new().from_writer(Vec::new());

    let mut header = vec![String::new()];
    header.extend(column_names(signal_label));
    writer.write_record(&header)?;

    for row in &window.rows {
        writer.write_record([
            row.index.to_string(),
            format_value(row.signal),
            format_value(row.outliers_removed),
            format_value(row.interpolated),
            format_value(row.baseline_subtracted),
        ])?;
    }

    let mut bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    bytes.extend_from_slice(format!("Baseline average = {}", format_value(baseline_average)).as_bytes());
    Ok(bytes)
}

/// Write the window to `path`, replacing any existing file.
pub fn export(
    window: &AnalysisWindow,
    baseline_average: f64,
    signal_label: &str,
    path: &Path,
) -> Result<(), ExportError> {
    let bytes = render_csv(window, baseline_average, signal_label)?;
    std::fs::write(path, bytes).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    log::info!(
        "Exported {} rows around row {} to {}",
        window.len(),
        window.anchor,
        path.display()
    );
    Ok(())
}

// ---------------------------------------------------------------------------
// Text preview
// ---------------------------------------------------------------------------

/// Fixed-width table of the window for on-screen display. Windows longer
/// than `max_rows` show their first and last `max_rows / 2` rows.
pub fn preview_table(window: &AnalysisWindow, signal_label: &str, max_rows: usize) -> String {
    let show = |v: f64| if v.is_nan() { "NaN".to_string() } else { format_value(v) };

    let mut cells: Vec<[String; 5]> = Vec::new();
    let names = column_names(signal_label);
    cells.push([
        String::new(),
        names[0].clone(),
        names[1].clone(),
        names[2].clone(),
        names[3].clone(),
    ]);

    let truncated = window.len() > max_rows;
    let head = if truncated { max_rows / 2 } else { window.len() };
    let tail = if truncated { max_rows / 2 } else { 0 };

    let to_cells = |r: &super::window::WindowRow| {
        [
            r.index.to_string(),
            show(r.signal),
            show(r.outliers_removed),
            show(r.interpolated),
            show(r.baseline_subtracted),
        ]
    };
    cells.extend(window.rows[..head].iter().map(to_cells));
    if truncated {
        cells.push(std::array::from_fn(|_| "...".to_string()));
        cells.extend(window.rows[window.len() - tail..].iter().map(to_cells));
    }

    let widths: [usize; 5] =
        std::array::from_fn(|c| cells.iter().map(|row| row[c].len()).max().unwrap_or(0));

    let mut out = cells
        .iter()
        .map(|row| {
            row.iter()
                .zip(widths)
                .enumerate()
                .map(|(c, (cell, w))| {
                    if c == 0 {
                        format!("{cell:<w$}")
                    } else {
                        format!("{cell:>w$}")
                    }
                })
                .collect::<Vec<_>>()
                .join("  ")
                .trim_end()
                .to_string()
        })
        .collect::<Vec<_>>()
        .join("\n");

    if truncated {
        out.push_str(&format!("\n\n[{} rows x 4 columns]", window.len()));
    }
    out
}
