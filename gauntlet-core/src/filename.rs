//! Input and output filename construction.
//!
//! Every constructor returns an owned `String`; derived output names copy the
//! input name before extending it.

use std::io;

use tracing::warn;

use crate::{
    command::Command,
    error::{HarnessError, Result},
    prompt::{Prompter, ask},
};

/// Longest accepted input or explicit output filename, in characters.
pub const FILENAME_MAX_LEN: usize = 128;

/// Longest algorithm name embedded in a derived output filename.
pub const ALGORITHM_NAME_MAX_LEN: usize = 32;

const INPUT_PROMPT: &str = "Enter graph file name: ";
const DEFAULT_INPUT_EXTENSION: &str = ".txt";
const OUTPUT_SUFFIX: &str = ".out.txt";
const RENDER_SUFFIX: &str = ".render.txt";

/// Returns the name of the graph file to process.
///
/// Without an explicit name the prompter is asked for one, and `.txt` is
/// appended when the answer has no extension.
///
/// # Errors
/// Returns [`HarnessError::NameTooLong`] when the name exceeds
/// [`FILENAME_MAX_LEN`], or [`HarnessError::Prompt`] when no name can be read
/// or the answer is blank.
///
/// # Examples
/// ```
/// use gauntlet_core::{NoPrompter, ScriptedPrompter, construct_input};
///
/// assert_eq!(construct_input(Some("k5.txt"), &mut NoPrompter)?, "k5.txt");
///
/// let mut prompter = ScriptedPrompter::new(["petersen"]);
/// assert_eq!(construct_input(None, &mut prompter)?, "petersen.txt");
/// # Ok::<(), gauntlet_core::HarnessError>(())
/// ```
pub fn construct_input(explicit: Option<&str>, prompter: &mut dyn Prompter) -> Result<String> {
    let name = match explicit {
        Some(name) => name.to_owned(),
        None => {
            let answer = ask(prompter, INPUT_PROMPT)?;
            let Some(token) = answer.split_whitespace().next() else {
                return Err(HarnessError::Prompt {
                    prompt: INPUT_PROMPT.to_owned(),
                    source: io::Error::new(io::ErrorKind::InvalidInput, "no file name given"),
                });
            };
            let mut name = token.to_owned();
            if !name.contains('.') {
                name.push_str(DEFAULT_INPUT_EXTENSION);
            }
            name
        }
    };

    let length = name.chars().count();
    if length > FILENAME_MAX_LEN {
        return Err(HarnessError::NameTooLong {
            length,
            max: FILENAME_MAX_LEN,
        });
    }
    Ok(name)
}

/// Returns the name of the primary output file.
///
/// An explicit name is used verbatim unless it exceeds [`FILENAME_MAX_LEN`],
/// in which case the derived name is used and a warning is logged. The
/// derived name is `<input>.<algorithm>.out.txt`.
///
/// # Examples
/// ```
/// use gauntlet_core::{Command, construct_primary_output};
///
/// let derived = construct_primary_output("graph1.txt", None, Command::PlanarEmbed);
/// assert_eq!(derived, "graph1.txt.PlanarEmbed.out.txt");
///
/// let explicit = construct_primary_output("graph1.txt", Some("mine.txt"), Command::PlanarEmbed);
/// assert_eq!(explicit, "mine.txt");
/// ```
#[must_use]
pub fn construct_primary_output(input: &str, explicit: Option<&str>, command: Command) -> String {
    let algorithm = command.algorithm().name();
    match explicit {
        None => derive_output_name(input, algorithm),
        Some(name) if name.chars().count() > FILENAME_MAX_LEN => {
            let derived = derive_output_name(input, algorithm);
            warn!(
                requested_length = name.chars().count(),
                max = FILENAME_MAX_LEN,
                output = %derived,
                "output filename is too long; using derived name"
            );
            derived
        }
        Some(name) => name.to_owned(),
    }
}

fn derive_output_name(input: &str, algorithm: &str) -> String {
    let mut name = String::with_capacity(input.len() + algorithm.len() + OUTPUT_SUFFIX.len() + 1);
    name.push_str(input);
    if algorithm.chars().count() <= ALGORITHM_NAME_MAX_LEN {
        name.push('.');
        name.push_str(algorithm);
    } else {
        warn!(
            algorithm,
            max = ALGORITHM_NAME_MAX_LEN,
            "algorithm name is too long; omitting it from the output filename"
        );
    }
    name.push_str(OUTPUT_SUFFIX);
    name
}

/// Where the secondary output of a single-graph run goes.
///
/// The secondary output is the isolated obstruction for planar and
/// outerplanar runs that find one, and the rendered drawing for successful
/// draw-planar runs.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub enum SecondaryOutput {
    /// Do not write a secondary output.
    #[default]
    Skip,
    /// Derive the name from the primary output name.
    Default,
    /// Use the given name.
    Named(String),
}

impl SecondaryOutput {
    /// Name for an obstruction file; defaults to the primary output name.
    #[must_use]
    pub fn obstruction_name(&self, primary: &str) -> Option<String> {
        match self {
            Self::Skip => None,
            Self::Default => Some(primary.to_owned()),
            Self::Named(name) => Some(name.clone()),
        }
    }

    /// Name for a rendered drawing; defaults to `<primary>.render.txt`.
    #[must_use]
    pub fn drawing_name(&self, primary: &str) -> Option<String> {
        match self {
            Self::Skip => None,
            Self::Default => Some(format!("{primary}{RENDER_SUFFIX}")),
            Self::Named(name) => Some(name.clone()),
        }
    }
}
