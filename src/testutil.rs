//! Synthetic recordings shared by the unit tests.

use crate::data::model::{Recording, Sample};

/// Seven metadata lines, as written by the instrument.
pub const HEADER: &str = "Biosensor Export\n\
Instrument:\tBIO-1000\n\
Operator:\ttest\n\
Start:\t10/18/2026 09:00:00\n\
Channels:\t1\n\
Rate:\t1 Hz\n\
Date\tTime\tTime Stamp\tTime from Start\tBIO 1\tComment\n";

/// A sample at `elapsed` seconds with no comment.
pub fn sample(elapsed: f64, signal: f64) -> Sample {
    Sample {
        date: "10/18/2026".into(),
        time: clock(elapsed),
        timestamp: format!("{:.3}", 3_812_345_678.0 + elapsed),
        elapsed,
        signal,
        comment: None,
    }
}

/// One row per signal value, sampled at 1 Hz.
pub fn recording(signals: &[f64]) -> Recording {
    Recording::new(
        signals
            .iter()
            .enumerate()
            .map(|(i, &v)| sample(i as f64, v))
            .collect(),
    )
}

/// Recording text with the standard header. `comments` may be shorter than
/// `signals`; missing entries are written as empty comments.
pub fn recording_text(signals: &[f64], comments: &[&str]) -> String {
    let mut text = String::from(HEADER);
    for (i, v) in signals.iter().enumerate() {
        let comment = comments.get(i).copied().unwrap_or("");
        let signal = if v.is_nan() { String::new() } else { v.to_string() };
        text.push_str(&format!(
            "10/18/2026 \t{} \t{:.3}\t{i}\t{signal}\t{comment}\n",
            clock(i as f64),
            3_812_345_678.0 + i as f64,
        ));
    }
    text
}

fn clock(elapsed: f64) -> String {
    let secs = 9 * 3600 + elapsed as u64;
    format!("{:02}:{:02}:{:02}", secs / 3600, secs / 60 % 60, secs % 60)
}
