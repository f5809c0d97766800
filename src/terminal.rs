use std::io::{BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};

use crate::analysis::variant::Variant;
use crate::error::{ParameterError, SessionError};
use crate::params::{ParameterRequest, ParameterSource};
use crate::session::Session;

// ---------------------------------------------------------------------------
// Line-oriented prompt
// ---------------------------------------------------------------------------

/// Prompts on a text stream. A blank answer skips the current question; end
/// of input (or a write failure) also ends the session.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
    ended: bool,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            input,
            output,
            ended: false,
        }
    }

    fn read_line(&mut self) -> Option<String> {
        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) | Err(_) => {
                self.ended = true;
                None
            }
            Ok(_) => Some(line.trim().to_string()),
        }
    }

    fn question(&mut self, text: &str) -> Option<String> {
        write!(self.output, "{text} ").ok()?;
        self.output.flush().ok()?;
        self.read_line()
    }

    /// Yes/no question; re-asked until answered.
    pub fn confirm(&mut self, question: &str) -> Option<bool> {
        loop {
            match self.question(&format!("{question} [y/n]"))?.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Some(true),
                "n" | "no" => return Some(false),
                _ => self.warn("Please answer yes or no"),
            }
        }
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{text}").context("writing to terminal")
    }
}

impl<R: BufRead, W: Write> ParameterSource for TerminalPrompt<R, W> {
    fn ask(&mut self, request: &ParameterRequest) -> Option<String> {
        writeln!(self.output, "{}", request.title).ok()?;
        let answer = self.question(request.prompt)?;
        (!answer.is_empty()).then_some(answer)
    }

    fn warn(&mut self, message: &str) {
        let _ = writeln!(self.output, "Error: {message}");
    }
}

// ---------------------------------------------------------------------------
// Review loop
// ---------------------------------------------------------------------------

#[derive(Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub reviewed: usize,
    pub exported: Vec<PathBuf>,
}

/// Load a recording (asking for a path if none is given) and walk the user
/// through every event candidate.
pub fn run<R: BufRead, W: Write>(
    session: &mut Session,
    file: Option<PathBuf>,
    prompt: &mut TerminalPrompt<R, W>,
) -> Result<RunSummary> {
    let mut summary = RunSummary::default();
    let mut next_path = file;

    // -- load, retrying on failure --
    loop {
        let path = match next_path.take() {
            Some(p) => p,
            None => match prompt.question("Select a File:") {
                Some(p) if !p.is_empty() => PathBuf::from(p),
                _ => return Ok(summary),
            },
        };
        match session.load(&path) {
            Ok(count) => {
                prompt.say(&format!("{} ({count} events)", path.display()))?;
                break;
            }
            Err(e) => {
                log::error!("Failed to load file: {e}");
                prompt.say(&format!("Error: {e}"))?;
            }
        }
    }

    // -- review --
    let signal_label = session.config.signal_label.clone();
    while let Some(event) = session.next_event() {
        summary.reviewed += 1;
        prompt.say(&format!("\n{}\n", event.describe()))?;

        let Some(confirmed) = prompt.confirm("Does this comment represent an experimental event?")
        else {
            break;
        };
        if !confirmed {
            continue;
        }

        for variant in Variant::ALL {
            prompt.say(&format!("\n{} analysis::", variant.label()))?;
            match session.run_variant(event.index, variant, &mut *prompt) {
                Ok(report) => {
                    prompt.say(&report.describe(&signal_label))?;
                    summary.exported.push(report.path);
                }
                Err(SessionError::Parameter(ParameterError::Cancelled)) if prompt.ended => {
                    prompt.say("Input ended.")?;
                    return Ok(summary);
                }
                Err(SessionError::Parameter(ParameterError::Cancelled)) => {
                    prompt.say(&format!("Skipped {} analysis.", variant.label()))?;
                }
                Err(e) => {
                    log::error!("{} analysis at row {} failed: {e}", variant.label(), event.index);
                    prompt.say(&format!("Analysis failed: {e}"))?;
                }
            }
        }
    }

    prompt.say("No events remaining.")?;
    Ok(summary)
}
