use std::ops::RangeInclusive;

/// The two analysis presets run for every confirmed event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// 30 s before the event, baseline over the last 5 s.
    Short,
    /// 300 s before the event, baseline over the last 15 s.
    Long,
}

impl Variant {
    /// Run order for a confirmed event.
    pub const ALL: [Variant; 2] = [Variant::Short, Variant::Long];

    pub fn pre_seconds(self) -> usize {
        match self {
            Variant::Short => 30,
            Variant::Long => 300,
        }
    }

    pub fn baseline_seconds(self) -> usize {
        match self {
            Variant::Short => 5,
            Variant::Long => 15,
        }
    }

    /// Accepted post-event durations, in seconds.
    pub fn post_range(self) -> RangeInclusive<i64> {
        match self {
            Variant::Short => 180..=300,
            Variant::Long => 0..=3000,
        }
    }

    /// Human-readable name used in prompts and the transcript.
    pub fn label(self) -> &'static str {
        match self {
            Variant::Short => "2-second",
            Variant::Long => "30-second",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Variant::Short => "2s",
            Variant::Long => "30s",
        }
    }

    /// Export file name for an event at `anchor`.
    pub fn file_name(self, anchor: usize) -> String {
        format!("timestamp_{anchor}_{}.csv", self.tag())
    }

    pub fn post_prompt(self) -> &'static str {
        match self {
            Variant::Short => "How many seconds of post-event data (180-300)?",
            Variant::Long => "How many seconds of post-event data (up to 3000)?",
        }
    }
}

impl std::fmt::Display for Variant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_match_window_sizes() {
        assert_eq!(Variant::Short.pre_seconds(), 30);
        assert_eq!(Variant::Short.baseline_seconds(), 5);
        assert_eq!(Variant::Long.pre_seconds(), 300);
        assert_eq!(Variant::Long.baseline_seconds(), 15);
    }

    #[test]
    fn short_post_range_starts_at_180() {
        assert!(!Variant::Short.post_range().contains(&179));
        assert!(Variant::Short.post_range().contains(&180));
        assert!(Variant::Short.post_range().contains(&300));
        assert!(!Variant::Short.post_range().contains(&301));
        assert!(Variant::Long.post_range().contains(&0));
        assert!(!Variant::Long.post_range().contains(&3001));
    }

    #[test]
    fn file_names_carry_anchor_and_tag() {
        assert_eq!(Variant::Short.file_name(200), "timestamp_200_2s.csv");
        assert_eq!(Variant::Long.file_name(7), "timestamp_7_30s.csv");
    }
}
