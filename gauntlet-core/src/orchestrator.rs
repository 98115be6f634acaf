//! Batch runs over randomly generated graphs.

use std::{
    io::Write,
    time::{Duration, Instant},
};

use tracing::{Span, error, field, info, instrument, warn};

use crate::{
    builder::{GraphStrategy, SampleKind},
    classify::classify,
    command::Command,
    error::{HarnessError, Result},
    harness::{Harness, sample_path},
    library::{GraphFormat, GraphLibrary},
    outcome::{FatalReason, TrialOutcome},
    prompt::resolve_count,
    statistics::Statistics,
};

/// Accepted number of trials per batch.
pub const TRIAL_COUNT_RANGE: std::ops::RangeInclusive<u64> = 1..=1_000_000_000;

/// Accepted number of vertices per generated graph.
pub const GRAPH_SIZE_RANGE: std::ops::RangeInclusive<u64> = 1..=10_000;

/// Largest number of colours a colouring may use and still count as
/// processed.
pub const COLOR_THRESHOLD: usize = 5;

const PROGRESS_SCALE: u64 = 3579;

/// Number of trials between progress counter updates for graphs of `size`
/// vertices.
///
/// The interval shrinks as graphs grow. It is always odd and never a multiple
/// of five so the counter's last digit keeps changing.
///
/// # Examples
/// ```
/// use gauntlet_core::progress_interval;
///
/// assert_eq!(progress_interval(1), 3579);
/// assert_eq!(progress_interval(10), 357);
/// assert_eq!(progress_interval(716), 7);
/// assert_eq!(progress_interval(5), 717);
/// ```
#[must_use]
pub const fn progress_interval(size: u64) -> u64 {
    let mut interval = if size == 0 { PROGRESS_SCALE } else { PROGRESS_SCALE / size };
    if interval == 0 {
        interval = 1;
    }
    if interval % 2 == 0 {
        interval += 1;
    }
    if interval % 5 == 0 {
        interval += 2;
    }
    interval
}

/// How a batch ended.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum BatchStatus {
    /// Every requested trial completed.
    Completed,
    /// A trial ended fatally and the batch stopped there.
    Aborted {
        /// Zero-based index of the failing trial.
        trial: u64,
        /// Why the trial failed.
        reason: FatalReason,
    },
}

/// Summary of one batch run.
#[derive(Clone, Debug)]
pub struct BatchReport {
    /// Command every trial ran.
    pub command: Command,
    /// Trial count after prompting and clamping.
    pub requested: u64,
    /// Graph size after prompting and clamping.
    pub size: u64,
    /// Counters over the trials that completed.
    pub statistics: Statistics,
    /// Whether the batch ran to the end.
    pub status: BatchStatus,
    /// Wall-clock time spent in the trial loop.
    pub elapsed: Duration,
}

impl BatchReport {
    /// Returns `true` when no trial ended fatally.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self.status, BatchStatus::Completed)
    }
}

impl<L, W> Harness<L, W>
where
    L: GraphLibrary,
    W: Write,
{
    /// Runs `command` against `count` random graphs of `size` vertices.
    ///
    /// Zero for either value asks the prompter. Values outside
    /// [`TRIAL_COUNT_RANGE`] and [`GRAPH_SIZE_RANGE`] are replaced by the
    /// range midpoint. The first fatal trial stops the batch; the returned
    /// statistics cover only the trials that completed.
    ///
    /// # Errors
    /// Returns [`HarnessError`] when a value cannot be prompted for, the
    /// console cannot be written, or the library cannot allocate or reset the
    /// working graph.
    #[instrument(
        name = "core.random_graphs",
        skip(self),
        err,
        fields(count = field::Empty, size = field::Empty, strategy = ?self.config.strategy())
    )]
    pub fn run_random_graphs(
        &mut self,
        command: Command,
        count: u64,
        size: u64,
    ) -> Result<BatchReport> {
        let count = resolve_count(
            count,
            "Enter number of graphs to generate:",
            TRIAL_COUNT_RANGE,
            self.prompter.as_mut(),
        )?;
        let size = resolve_count(
            size,
            "Enter size of graphs:",
            GRAPH_SIZE_RANGE,
            self.prompter.as_mut(),
        )?;
        let span = Span::current();
        span.record("count", count);
        span.record("size", size);

        let order = usize::try_from(size).unwrap_or(usize::MAX);
        let mut graph = self.fresh_graph(order, command)?;
        let interval = progress_interval(size);
        let mut statistics = Statistics::default();
        let mut status = BatchStatus::Completed;

        self.console.message("0\r")?;
        let start = Instant::now();
        for trial in 0..count {
            let outcome = self.run_trial(trial, command, &mut graph, &mut statistics);

            match self.config.strategy() {
                GraphStrategy::Reuse => self
                    .library
                    .reinitialize_graph(&mut graph)
                    .map_err(|source| HarnessError::Library {
                        operation: "reinitialize_graph",
                        source,
                    })?,
                GraphStrategy::Rebuild => graph = self.fresh_graph(order, command)?,
            }

            if (trial + 1) % interval == 0 {
                self.console.message(&format!("{}\r", trial + 1))?;
            }

            if let TrialOutcome::Fatal(reason) = outcome {
                error!(trial, %reason, "trial failed; aborting batch");
                status = BatchStatus::Aborted { trial, reason };
                break;
            }
        }
        let elapsed = start.elapsed();

        let attempted = match &status {
            BatchStatus::Completed => count,
            BatchStatus::Aborted { trial, .. } => trial + 1,
        };
        self.console.always(&format!("{attempted}\n"))?;
        if matches!(status, BatchStatus::Completed) {
            self.console.line("\nNo Errors Found.")?;
        }
        self.console
            .line(&format!("\nDone ({:.3} seconds).\n", elapsed.as_secs_f64()))?;
        for line in statistics.summary_lines(command) {
            self.console.line(&line)?;
        }

        info!(
            trials = statistics.trials(),
            processed = statistics.processed(),
            aborted = !matches!(status, BatchStatus::Completed),
            "batch finished"
        );
        Ok(BatchReport {
            command,
            requested: count,
            size,
            statistics,
            status,
            elapsed,
        })
    }

    pub(crate) fn fresh_graph(&mut self, order: usize, command: Command) -> Result<L::Graph> {
        self.library
            .make_graph(order, command)
            .map_err(|source| HarnessError::Library {
                operation: "make_graph",
                source,
            })
    }

    fn run_trial(
        &mut self,
        trial: u64,
        command: Command,
        graph: &mut L::Graph,
        statistics: &mut Statistics,
    ) -> TrialOutcome {
        if let Err(source) = self.library.create_random_graph(graph) {
            return TrialOutcome::Fatal(FatalReason::Library {
                operation: "create_random_graph",
                source,
            });
        }

        let samples = self.config.samples();
        if samples.original {
            self.write_sample(SampleKind::Original, trial, graph, GraphFormat::AdjacencyList);
        }

        let original = match self.library.duplicate_graph(graph) {
            Ok(original) => original,
            Err(source) => {
                return TrialOutcome::Fatal(FatalReason::Library {
                    operation: "duplicate_graph",
                    source,
                });
            }
        };

        let processed = self.process(graph, &original, command);
        match &processed.outcome {
            TrialOutcome::Success if command.is_embedding() => {
                statistics.record_processed();
                if samples.embedded {
                    self.write_sample(SampleKind::Embedded, trial, graph, GraphFormat::AdjacencyMatrix);
                }
                if samples.adjacency_lists {
                    self.write_sample(
                        SampleKind::AdjacencyList,
                        trial,
                        graph,
                        GraphFormat::AdjacencyList,
                    );
                }
            }
            TrialOutcome::Success => {
                if processed.colors.is_some_and(|colors| colors <= COLOR_THRESHOLD) {
                    statistics.record_processed();
                } else {
                    statistics.record_unprocessed();
                }
            }
            TrialOutcome::NonEmbeddable(mask) => {
                if command.algorithm().flags().classifies_minors() {
                    statistics.record_obstruction(classify(*mask));
                    if samples.obstructed {
                        self.write_sample(
                            SampleKind::Obstructed,
                            trial,
                            graph,
                            GraphFormat::AdjacencyMatrix,
                        );
                    }
                } else {
                    statistics.record_unprocessed();
                }
            }
            TrialOutcome::Fatal(_) => self.dump_failure(trial, &original),
        }
        processed.outcome
    }

    /// Saves the pre-algorithm copy of a failed trial under `error/`.
    fn dump_failure(&self, trial: u64, original: &L::Graph) {
        let directory = self.config.output_root().join(SampleKind::Error.directory());
        if !directory.is_dir() {
            warn!(
                path = %directory.display(),
                "error directory missing; failed graph not saved"
            );
            return;
        }
        let path = sample_path(self.config.output_root(), SampleKind::Error, trial);
        match self
            .library
            .write_graph(original, &path, GraphFormat::AdjacencyList)
        {
            Ok(()) => info!(path = %path.display(), "failed graph saved"),
            Err(error) => warn!(path = %path.display(), %error, "failed to save failed graph"),
        }
    }
}
