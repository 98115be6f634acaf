//! The run context shared by every harness operation.
//!
//! [`Harness`] owns the graph library, the validated configuration, the
//! console and the prompter for one run. The batch loop, the single-graph
//! pipeline and the maximal-planar driver are implemented on it in their own
//! modules; this module holds the process-and-verify step they share, the
//! verdict lines, and sample-file handling.

use std::{
    io::Write,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use tracing::{debug, warn};

use crate::{
    builder::{HarnessConfig, SampleKind},
    command::Command,
    console::Console,
    library::{EmbedResult, GraphFormat, GraphHandle, GraphLibrary},
    outcome::{FatalReason, TrialOutcome},
    prompt::Prompter,
};

/// Number of sample slots kept per sample directory.
pub const SAMPLE_MODULUS: u64 = 10;

/// Slot a trial's sample files are written to.
///
/// # Examples
/// ```
/// use gauntlet_core::sample_slot;
///
/// assert_eq!(sample_slot(23), sample_slot(13));
/// assert_eq!(sample_slot(23), 3);
/// ```
#[must_use]
pub const fn sample_slot(trial: u64) -> u64 {
    trial % SAMPLE_MODULUS
}

/// Path of the sample of `kind` for `trial` under `root`.
#[must_use]
pub fn sample_path(root: &Path, kind: SampleKind, trial: u64) -> PathBuf {
    root.join(kind.directory())
        .join(format!("{}.txt", sample_slot(trial)))
}

/// Runs harness operations against one graph library.
///
/// Built by [`crate::HarnessBuilder`].
pub struct Harness<L, W> {
    pub(crate) library: L,
    pub(crate) config: HarnessConfig,
    pub(crate) console: Console<W>,
    pub(crate) prompter: Box<dyn Prompter>,
}

/// Result of the process and verify steps for one graph.
#[derive(Clone, Debug)]
pub(crate) struct Processed {
    pub(crate) outcome: TrialOutcome,
    pub(crate) elapsed: Duration,
    pub(crate) colors: Option<usize>,
}

impl<L, W> Harness<L, W>
where
    L: GraphLibrary,
    W: Write,
{
    pub(crate) fn new(
        library: L,
        config: HarnessConfig,
        console: W,
        prompter: Box<dyn Prompter>,
    ) -> Self {
        let quiet = config.quiet();
        Self {
            library,
            config,
            console: Console::new(console, quiet),
            prompter,
        }
    }

    /// Configuration this harness was built with.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Consumes the harness, returning the library and the console writer.
    pub fn into_parts(self) -> (L, W) {
        (self.library, self.console.into_inner())
    }

    /// Runs the algorithm selected by `command` on `graph` and lets the
    /// library's integrity check confirm or overturn the claimed result.
    ///
    /// Only the algorithm call is timed.
    pub(crate) fn process(
        &mut self,
        graph: &mut L::Graph,
        original: &L::Graph,
        command: Command,
    ) -> Processed {
        let algorithm = command.algorithm();
        let start = Instant::now();

        if !command.is_embedding() {
            let colored = self.library.color_vertices(graph);
            let elapsed = start.elapsed();
            let outcome = match colored {
                Err(source) => TrialOutcome::Fatal(FatalReason::Library {
                    operation: "color_vertices",
                    source,
                }),
                Ok(()) => match self.library.verify_coloring(graph, original) {
                    Ok(()) => TrialOutcome::Success,
                    Err(error) => {
                        debug!(%error, "coloring integrity check failed");
                        TrialOutcome::Fatal(FatalReason::IntegrityMismatch {
                            algorithm: algorithm.name(),
                            claimed: None,
                            confirmed: None,
                        })
                    }
                },
            };
            let colors = outcome
                .is_expected()
                .then(|| self.library.colors_used(graph));
            return Processed {
                outcome,
                elapsed,
                colors,
            };
        }

        let claimed = self.library.embed(graph, algorithm.flags());
        let elapsed = start.elapsed();
        let outcome = match claimed {
            Err(source) => TrialOutcome::Fatal(FatalReason::Library {
                operation: "embed",
                source,
            }),
            Ok(claimed) => match self.library.verify_embedding(graph, original, claimed) {
                Ok(confirmed) if confirmed == claimed => match claimed {
                    EmbedResult::Embeddable => TrialOutcome::Success,
                    EmbedResult::NonEmbeddable => TrialOutcome::NonEmbeddable(graph.minor_type()),
                },
                Ok(confirmed) => TrialOutcome::Fatal(FatalReason::IntegrityMismatch {
                    algorithm: algorithm.name(),
                    claimed: Some(claimed),
                    confirmed: Some(confirmed),
                }),
                Err(error) => {
                    debug!(%error, "embedding integrity check failed");
                    TrialOutcome::Fatal(FatalReason::IntegrityMismatch {
                        algorithm: algorithm.name(),
                        claimed: Some(claimed),
                        confirmed: None,
                    })
                }
            },
        };
        Processed {
            outcome,
            elapsed,
            colors: None,
        }
    }

    /// Writes the verdict line and the timing line for a processed graph.
    pub(crate) fn report_result(
        &mut self,
        command: Command,
        processed: &Processed,
        input: Option<&str>,
    ) -> crate::Result<()> {
        let subject = input.map_or_else(
            || "The graph ".to_owned(),
            |name| format!("The graph '{name}' "),
        );
        let verdict = verdict(command, &processed.outcome, processed.colors);
        self.console.line(&format!("{subject}{verdict}"))?;
        self.console.line(&format!(
            "Algorithm '{}' executed in {:.3} seconds.",
            command.algorithm().name(),
            processed.elapsed.as_secs_f64()
        ))
    }

    /// Writes a sample file, logging rather than failing when it cannot be
    /// written.
    pub(crate) fn write_sample(
        &self,
        kind: SampleKind,
        trial: u64,
        graph: &L::Graph,
        format: GraphFormat,
    ) {
        let path = sample_path(self.config.output_root(), kind, trial);
        if let Err(error) = self.library.write_graph(graph, &path, format) {
            warn!(
                path = %path.display(),
                %error,
                "failed to write sample file"
            );
        }
    }
}

/// Completes the sentence `The graph ...` for an outcome.
pub(crate) fn verdict(command: Command, outcome: &TrialOutcome, colors: Option<usize>) -> String {
    let found = match outcome {
        TrialOutcome::Success => false,
        TrialOutcome::NonEmbeddable(_) => true,
        TrialOutcome::Fatal(reason) => {
            return format!("could not be processed: {reason}.");
        }
    };
    let negation = if found { " not" } else { "" };
    let article = if found { "a" } else { "no" };
    match command {
        Command::PlanarEmbed | Command::DrawPlanar => format!("is{negation} planar."),
        Command::Outerplanar => format!("is{negation} outerplanar."),
        Command::SearchK23 => format!("has {article} subgraph homeomorphic to K_{{2,3}}."),
        Command::SearchK33 => format!("has {article} subgraph homeomorphic to K_{{3,3}}."),
        Command::SearchK4 => format!("has {article} subgraph homeomorphic to K_4."),
        Command::ColorVertices => format!("has been {}-colored.", colors.unwrap_or(0)),
    }
}
