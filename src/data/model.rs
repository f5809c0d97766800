use std::collections::VecDeque;
use std::path::PathBuf;

use crate::analysis::export::format_value;

// ---------------------------------------------------------------------------
// Sample – one row of a recording
// ---------------------------------------------------------------------------

/// A single sampled row of a biosensor recording.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Calendar date as written by the instrument (trimmed).
    pub date: String,
    /// Time of day (trimmed).
    pub time: String,
    /// Instrument timestamp, kept verbatim.
    pub timestamp: String,
    /// Seconds since the start of the recording.
    pub elapsed: f64,
    /// Sensor reading; `NaN` when the instrument left the cell empty.
    pub signal: f64,
    /// Operator comment (trimmed). `None` when the column was absent.
    pub comment: Option<String>,
}

impl Sample {
    /// Whether this row carries a comment and so may mark an experimental event.
    pub fn is_event_candidate(&self) -> bool {
        self.comment.as_deref().is_some_and(|c| !c.trim().is_empty())
    }
}

// ---------------------------------------------------------------------------
// Recording – the complete loaded table
// ---------------------------------------------------------------------------

/// A fully buffered recording in chronological row order.
#[derive(Debug, Clone, Default)]
pub struct Recording {
    /// File the recording was read from, if any.
    pub source: Option<PathBuf>,
    pub samples: Vec<Sample>,
}

impl Recording {
    pub fn new(samples: Vec<Sample>) -> Self {
        Self {
            source: None,
            samples,
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the recording has no rows.
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// First row whose elapsed time is lower than its predecessor's, if any.
    pub fn first_time_regression(&self) -> Option<usize> {
        self.samples
            .windows(2)
            .position(|w| !(w[1].elapsed >= w[0].elapsed))
            .map(|i| i + 1)
    }
}

/// Row indices of all event candidates, ascending.
pub fn find_event_candidates(recording: &Recording) -> Vec<usize> {
    recording
        .samples
        .iter()
        .enumerate()
        .filter(|(_, s)| s.is_event_candidate())
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// Event queue
// ---------------------------------------------------------------------------

/// Candidate rows waiting for review. Each is handed out exactly once.
#[derive(Debug, Clone, Default)]
pub struct EventQueue {
    pending: VecDeque<usize>,
}

impl EventQueue {
    pub fn new(candidates: Vec<usize>) -> Self {
        Self {
            pending: candidates.into(),
        }
    }

    pub fn pop_next(&mut self) -> Option<usize> {
        self.pending.pop_front()
    }

    pub fn remaining(&self) -> usize {
        self.pending.len()
    }
}

/// What the user sees when deciding whether a candidate is a real event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventSummary {
    pub index: usize,
    pub elapsed: f64,
    pub comment: String,
}

impl EventSummary {
    pub fn from_sample(index: usize, sample: &Sample) -> Self {
        Self {
            index,
            elapsed: sample.elapsed,
            comment: sample.comment.clone().unwrap_or_default(),
        }
    }

    pub fn describe(&self) -> String {
        format!(
            "Time from Start\t\t\t{}\nComment\t\t\t{}",
            format_value(self.elapsed),
            self.comment
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::sample;

    #[test]
    fn blank_and_missing_comments_are_not_candidates() {
        let comments = [Some(""), Some("  "), Some("jump"), None, Some("x")];
        let samples = comments
            .iter()
            .enumerate()
            .map(|(i, c)| {
                let mut s = sample(i as f64, 1.0);
                s.comment = c.map(str::to_string);
                s
            })
            .collect();
        let recording = Recording::new(samples);

        assert_eq!(find_event_candidates(&recording), vec![2, 4]);
    }

    #[test]
    fn queue_hands_out_each_candidate_once_in_order() {
        let mut queue = EventQueue::new(vec![3, 9, 12]);
        assert_eq!(queue.remaining(), 3);
        assert_eq!(queue.pop_next(), Some(3));
        assert_eq!(queue.pop_next(), Some(9));
        assert_eq!(queue.pop_next(), Some(12));
        assert_eq!(queue.pop_next(), None);
        assert_eq!(queue.remaining(), 0);
    }

    #[test]
    fn time_regression_is_reported_at_the_later_row() {
        let mut recording = Recording::new((0..5).map(|i| sample(i as f64, 0.0)).collect());
        assert_eq!(recording.first_time_regression(), None);
        recording.samples[3].elapsed = 1.5;
        assert_eq!(recording.first_time_regression(), Some(3));
    }

    #[test]
    fn describe_matches_display_layout() {
        let mut s = sample(42.0, 1.0);
        s.comment = Some("injection".into());
        let summary = EventSummary::from_sample(42, &s);
        assert_eq!(
            summary.describe(),
            "Time from Start\t\t\t42.0\nComment\t\t\tinjection"
        );
    }
}
