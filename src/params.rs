use std::collections::HashMap;
#[cfg(test)]
use std::collections::VecDeque;
use std::ops::RangeInclusive;

use crate::analysis::variant::Variant;
use crate::error::{ParameterError, RangeError};

/// Accepted IQR multipliers.
pub const MULTIPLIER_RANGE: RangeInclusive<f64> = 1.5..=3.0;

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParameterKind {
    PostEventSeconds(Variant),
    IqrMultiplier(Variant),
}

/// A question put to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterRequest {
    pub kind: ParameterKind,
    pub title: String,
    pub prompt: &'static str,
}

impl ParameterRequest {
    pub fn post_seconds(variant: Variant) -> Self {
        Self {
            kind: ParameterKind::PostEventSeconds(variant),
            title: format!("User Input Required: {} analysis", variant.label()),
            prompt: variant.post_prompt(),
        }
    }

    pub fn iqr_multiplier(variant: Variant) -> Self {
        Self {
            kind: ParameterKind::IqrMultiplier(variant),
            title: "User Input Required: IQR multiplier".to_string(),
            prompt: "What will the IQR multiplier be (1.5-3.0)?",
        }
    }
}

// ---------------------------------------------------------------------------
// Sources
// ---------------------------------------------------------------------------

/// Where interactive parameters come from.
pub trait ParameterSource {
    /// Raw answer text, or `None` when the user gives up.
    fn ask(&mut self, request: &ParameterRequest) -> Option<String>;

    /// Tell the user why the previous answer was rejected.
    fn warn(&mut self, message: &str);
}

/// Ask until `parse` accepts the answer. Rejected answers are reported
/// through [`ParameterSource::warn`] and asked again.
pub fn acquire<T>(
    source: &mut dyn ParameterSource,
    request: &ParameterRequest,
    parse: impl Fn(&str) -> Result<T, ParameterError>,
) -> Result<T, ParameterError> {
    loop {
        let Some(answer) = source.ask(request) else {
            return Err(ParameterError::Cancelled);
        };
        match parse(&answer) {
            Ok(value) => return Ok(value),
            Err(e) => {
                log::warn!("Rejected answer to '{}': {e}", request.prompt);
                source.warn(&e.to_string());
            }
        }
    }
}

/// Whole seconds within `range`.
pub fn parse_post_seconds(text: &str, range: RangeInclusive<i64>) -> Result<usize, ParameterError> {
    let trimmed = text.trim();
    let value: i64 = trimmed
        .parse()
        .map_err(|_| ParameterError::NotANumber(trimmed.to_string()))?;
    if !range.contains(&value) {
        return Err(RangeError {
            value: value as f64,
            min: *range.start() as f64,
            max: *range.end() as f64,
        }
        .into());
    }
    // range is non-negative for every variant
    usize::try_from(value).map_err(|_| ParameterError::NotANumber(trimmed.to_string()))
}

/// An IQR multiplier within [`MULTIPLIER_RANGE`].
pub fn parse_multiplier(text: &str) -> Result<f64, ParameterError> {
    let trimmed = text.trim();
    let value: f64 = trimmed
        .parse()
        .map_err(|_| ParameterError::NotANumber(trimmed.to_string()))?;
    if !MULTIPLIER_RANGE.contains(&value) {
        return Err(RangeError {
            value,
            min: *MULTIPLIER_RANGE.start(),
            max: *MULTIPLIER_RANGE.end(),
        }
        .into());
    }
    Ok(value)
}

/// Answers given up front, consumed in order regardless of the question.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct ScriptedSource {
    answers: VecDeque<String>,
    pub warnings: Vec<String>,
}

#[cfg(test)]
impl ScriptedSource {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            warnings: Vec::new(),
        }
    }
}

#[cfg(test)]
impl ParameterSource for ScriptedSource {
    fn ask(&mut self, _request: &ParameterRequest) -> Option<String> {
        self.answers.pop_front()
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

/// One answer per field of a form. Each field can be read once; asking again
/// after a rejection yields `None` so the form can be corrected and resubmitted.
#[derive(Debug, Default)]
pub struct FormSource {
    answers: HashMap<ParameterKind, String>,
    pub warnings: Vec<String>,
}

impl FormSource {
    pub fn with_answer(mut self, kind: ParameterKind, text: impl Into<String>) -> Self {
        self.answers.insert(kind, text.into());
        self
    }
}

impl ParameterSource for FormSource {
    fn ask(&mut self, request: &ParameterRequest) -> Option<String> {
        self.answers.remove(&request.kind)
    }

    fn warn(&mut self, message: &str) {
        self.warnings.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_variant_rejects_179_and_accepts_180() {
        let range = Variant::Short.post_range();
        assert!(matches!(
            parse_post_seconds("179", range.clone()),
            Err(ParameterError::Range(_))
        ));
        assert_eq!(parse_post_seconds("180", range), Ok(180));
    }

    #[test]
    fn post_seconds_must_be_whole_numbers() {
        let range = Variant::Long.post_range();
        assert_eq!(parse_post_seconds(" 25 ", range.clone()), Ok(25));
        assert_eq!(
            parse_post_seconds("2.5", range.clone()),
            Err(ParameterError::NotANumber("2.5".into()))
        );
        assert!(matches!(
            parse_post_seconds("-1", range),
            Err(ParameterError::Range(RangeError { value, .. })) if value == -1.0
        ));
    }

    #[test]
    fn multiplier_bounds_are_inclusive() {
        assert_eq!(parse_multiplier("1.5"), Ok(1.5));
        assert_eq!(parse_multiplier("3"), Ok(3.0));
        assert!(matches!(parse_multiplier("3.01"), Err(ParameterError::Range(_))));
        assert!(matches!(parse_multiplier("NaN"), Err(ParameterError::Range(_))));
        assert!(matches!(parse_multiplier("abc"), Err(ParameterError::NotANumber(_))));
    }

    #[test]
    fn acquire_reasks_until_valid() {
        let mut source = ScriptedSource::new(["abc", "179", "200"]);
        let request = ParameterRequest::post_seconds(Variant::Short);
        let value = acquire(&mut source, &request, |t| {
            parse_post_seconds(t, Variant::Short.post_range())
        });

        assert_eq!(value, Ok(200));
        assert_eq!(source.warnings.len(), 2);
        assert!(source.warnings[0].starts_with("Not a number"));
        assert!(source.warnings[1].starts_with("Number is outside the valid range"));
    }

    #[test]
    fn acquire_stops_when_source_runs_dry() {
        let mut source = ScriptedSource::new(["9"]);
        let request = ParameterRequest::iqr_multiplier(Variant::Long);
        assert_eq!(
            acquire(&mut source, &request, parse_multiplier),
            Err(ParameterError::Cancelled)
        );
        assert_eq!(source.warnings.len(), 1);
    }

    #[test]
    fn form_source_answers_by_field() {
        let mut source = FormSource::default()
            .with_answer(ParameterKind::IqrMultiplier(Variant::Short), "2.0")
            .with_answer(ParameterKind::PostEventSeconds(Variant::Short), "240");

        let post = ParameterRequest::post_seconds(Variant::Short);
        let mult = ParameterRequest::iqr_multiplier(Variant::Short);
        assert_eq!(source.ask(&post).as_deref(), Some("240"));
        assert_eq!(source.ask(&mult).as_deref(), Some("2.0"));
        assert_eq!(source.ask(&post), None);
    }

    #[test]
    fn prompts_name_the_variant() {
        let request = ParameterRequest::post_seconds(Variant::Long);
        assert_eq!(request.title, "User Input Required: 30-second analysis");
        assert_eq!(request.prompt, "How many seconds of post-event data (up to 3000)?");
    }
}
