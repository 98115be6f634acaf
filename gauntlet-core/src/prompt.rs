//! Interactive input.
//!
//! The harness never reads standard input directly. Values it cannot obtain
//! from the caller are requested through a [`Prompter`], which the CLI backs
//! with the terminal and tests back with a script.

use std::{collections::VecDeque, io, ops::RangeInclusive};

use tracing::warn;

use crate::error::{HarnessError, Result};

/// Source of answers to interactive questions.
pub trait Prompter {
    /// Shows `message` and returns the next answer, without its line ending.
    ///
    /// # Errors
    /// Returns an [`io::Error`] when no answer can be read.
    fn prompt(&mut self, message: &str) -> io::Result<String>;
}

/// Prompter for non-interactive runs; every question fails.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoPrompter;

impl Prompter for NoPrompter {
    fn prompt(&mut self, message: &str) -> io::Result<String> {
        Err(io::Error::new(
            io::ErrorKind::Unsupported,
            format!("interactive input is disabled (asked: {message})"),
        ))
    }
}

/// Prompter that replays a fixed list of answers.
///
/// # Examples
/// ```
/// use gauntlet_core::{Prompter, ScriptedPrompter};
///
/// let mut prompter = ScriptedPrompter::new(["graph.txt"]);
/// assert_eq!(prompter.prompt("name?")?, "graph.txt");
/// assert!(prompter.prompt("again?").is_err());
/// assert_eq!(prompter.asked(), ["name?", "again?"]);
/// # Ok::<(), std::io::Error>(())
/// ```
#[derive(Clone, Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<String>,
    asked: Vec<String>,
}

impl ScriptedPrompter {
    /// Creates a prompter answering with `answers` in order.
    #[must_use]
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
            asked: Vec::new(),
        }
    }

    /// Prompts shown so far, in order.
    #[must_use]
    pub fn asked(&self) -> &[String] {
        &self.asked
    }
}

impl Prompter for ScriptedPrompter {
    fn prompt(&mut self, message: &str) -> io::Result<String> {
        self.asked.push(message.to_owned());
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script exhausted"))
    }
}

pub(crate) fn ask(prompter: &mut dyn Prompter, message: &str) -> Result<String> {
    prompter
        .prompt(message)
        .map_err(|source| HarnessError::Prompt {
            prompt: message.to_owned(),
            source,
        })
}

/// Asks a yes/no question; anything starting with `y` counts as yes.
pub(crate) fn ask_yes_no(prompter: &mut dyn Prompter, message: &str) -> Result<bool> {
    let answer = ask(prompter, message)?;
    Ok(answer
        .trim_start()
        .chars()
        .next()
        .is_some_and(|first| first.eq_ignore_ascii_case(&'y')))
}

/// Resolves a count that may still need to be asked for.
///
/// A zero `value` is replaced by the prompter's answer (unparseable answers
/// count as zero). The result is clamped into `range`: out-of-range values
/// become the range midpoint and a warning is logged.
///
/// # Errors
/// Returns [`HarnessError::Prompt`] when the prompter cannot answer.
///
/// # Examples
/// ```
/// use gauntlet_core::{NoPrompter, ScriptedPrompter, resolve_count};
///
/// assert_eq!(resolve_count(7, "size?", 1..=10, &mut NoPrompter)?, 7);
/// assert_eq!(resolve_count(50, "size?", 1..=10, &mut NoPrompter)?, 5);
///
/// let mut prompter = ScriptedPrompter::new(["3"]);
/// assert_eq!(resolve_count(0, "size?", 1..=10, &mut prompter)?, 3);
/// # Ok::<(), gauntlet_core::HarnessError>(())
/// ```
pub fn resolve_count(
    value: u64,
    message: &str,
    range: RangeInclusive<u64>,
    prompter: &mut dyn Prompter,
) -> Result<u64> {
    let candidate = if value == 0 {
        ask(prompter, message)?.trim().parse::<u64>().unwrap_or(0)
    } else {
        value
    };

    let min = (*range.start()).max(1);
    let max = (*range.end()).max(min);
    if (min..=max).contains(&candidate) {
        return Ok(candidate);
    }

    let midpoint = min + (max - min) / 2;
    warn!(
        value = candidate,
        min,
        max,
        replacement = midpoint,
        "number out of range; using midpoint"
    );
    Ok(midpoint)
}
