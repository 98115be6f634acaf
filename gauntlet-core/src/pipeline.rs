//! One algorithm against one graph file.

use std::{
    io::Write,
    path::{Path, PathBuf},
    time::Duration,
};

use tracing::{Span, debug, error, field, instrument, warn};

use crate::{
    command::Command,
    error::{LibraryError, Result},
    filename::{SecondaryOutput, construct_input, construct_primary_output},
    harness::Harness,
    library::{GraphFormat, GraphLibrary, ReadOutcome},
    outcome::{FatalReason, TrialOutcome},
};

/// Last stage a single-graph run reached.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum PipelineStage {
    /// The graph was read.
    Loaded,
    /// The integrity copy was taken.
    Duplicated,
    /// The algorithm ran.
    Processed,
    /// The integrity check confirmed the result.
    Verified,
    /// Outputs were written.
    Written,
    /// The run ended fatally.
    Failed,
}

/// Inputs to [`Harness::run_specific_graph`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct GraphRequest {
    /// Input file; asked for when absent.
    pub input: Option<String>,
    /// Primary output file; derived from the input when absent.
    pub output: Option<String>,
    /// Obstruction or drawing output.
    pub secondary: SecondaryOutput,
}

/// What a single-graph run did.
#[derive(Clone, Debug)]
pub struct GraphReport {
    /// Input file the graph was read from.
    pub input: String,
    /// Verified outcome.
    pub outcome: TrialOutcome,
    /// Last stage reached.
    pub stage: PipelineStage,
    /// Primary output written, if any.
    pub primary_output: Option<PathBuf>,
    /// Secondary output written, if any.
    pub secondary_output: Option<PathBuf>,
    /// Time spent in the algorithm, when it ran.
    pub elapsed: Option<Duration>,
    /// Colours used, for colouring runs that succeeded.
    pub colors_used: Option<usize>,
}

impl GraphReport {
    fn failed(input: String, reason: FatalReason) -> Self {
        Self {
            input,
            outcome: TrialOutcome::Fatal(reason),
            stage: PipelineStage::Failed,
            primary_output: None,
            secondary_output: None,
            elapsed: None,
            colors_used: None,
        }
    }

    /// Returns `true` unless the run ended fatally.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        self.outcome.is_expected()
    }
}

impl<L, W> Harness<L, W>
where
    L: GraphLibrary,
    W: Write,
{
    /// Loads a graph, runs `command` on it, checks the result and writes the
    /// outputs.
    ///
    /// Fatal outcomes are reported in the returned [`GraphReport`] with stage
    /// [`PipelineStage::Failed`].
    ///
    /// # Errors
    /// Returns [`crate::HarnessError`] when the input name cannot be obtained
    /// or is too long, or when the console cannot be written.
    #[instrument(
        name = "core.specific_graph",
        skip(self, request),
        err,
        fields(input = field::Empty, stage = field::Empty)
    )]
    pub fn run_specific_graph(
        &mut self,
        command: Command,
        request: GraphRequest,
    ) -> Result<GraphReport> {
        let input = construct_input(request.input.as_deref(), self.prompter.as_mut())?;
        let span = Span::current();
        span.record("input", field::display(&input));

        let mut graph = match self.library.read_graph(Path::new(&input), command) {
            Ok(ReadOutcome::Complete(graph)) => graph,
            Ok(ReadOutcome::TooManyEdges(graph)) => {
                self.console.line("The graph contains too many edges.")?;
                if !command.is_embedding() {
                    return Ok(fail(input, FatalReason::TooManyEdges { command }));
                }
                warn!(%command, "graph truncated to the edge capacity");
                self.console
                    .line("Some edges were removed, but the algorithm will still run correctly.")?;
                graph
            }
            Err(source) => {
                self.console.line(&format!("Failed to read graph '{input}'."))?;
                return Ok(fail(input, FatalReason::ReadFailed { source }));
            }
        };
        record_stage(PipelineStage::Loaded);

        let original = match self.library.duplicate_graph(&graph) {
            Ok(original) => original,
            Err(source) => {
                return Ok(fail(input, library_failure("duplicate_graph")(source)));
            }
        };
        record_stage(PipelineStage::Duplicated);

        let processed = self.process(&mut graph, &original, command);
        drop(original);
        record_stage(PipelineStage::Processed);
        self.report_result(command, &processed, Some(&input))?;

        let mut report = GraphReport {
            input,
            outcome: processed.outcome,
            stage: PipelineStage::Verified,
            primary_output: None,
            secondary_output: None,
            elapsed: Some(processed.elapsed),
            colors_used: processed.colors,
        };
        if let TrialOutcome::Fatal(reason) = &report.outcome {
            error!(%reason, "graph processing failed");
            report.stage = PipelineStage::Failed;
            record_stage(PipelineStage::Failed);
            return Ok(report);
        }
        record_stage(PipelineStage::Verified);

        if let Err(reason) = self.write_outputs(command, &mut graph, &request, &mut report) {
            error!(%reason, "failed to write outputs");
            report.outcome = TrialOutcome::Fatal(reason);
            report.stage = PipelineStage::Failed;
            record_stage(PipelineStage::Failed);
            return Ok(report);
        }
        report.stage = PipelineStage::Written;
        record_stage(PipelineStage::Written);
        Ok(report)
    }

    fn write_outputs(
        &mut self,
        command: Command,
        graph: &mut L::Graph,
        request: &GraphRequest,
        report: &mut GraphReport,
    ) -> core::result::Result<(), FatalReason> {
        if command.is_embedding() {
            self.library
                .sort_vertices(graph)
                .map_err(library_failure("sort_vertices"))?;
        }

        let found = matches!(report.outcome, TrialOutcome::NonEmbeddable(_));
        let primary = construct_primary_output(&report.input, request.output.as_deref(), command);
        let skip_primary = if command.is_search() {
            !found
        } else {
            command.is_embedding() && found
        };
        if skip_primary {
            debug!(output = %primary, "primary output not written for this outcome");
        } else {
            let path = PathBuf::from(&primary);
            self.library
                .write_graph(graph, &path, GraphFormat::AdjacencyList)
                .map_err(library_failure("write_graph"))?;
            report.primary_output = Some(path);
        }

        let secondary = match command {
            Command::PlanarEmbed | Command::Outerplanar if found => {
                request.secondary.obstruction_name(&primary)
            }
            Command::DrawPlanar if !found => request.secondary.drawing_name(&primary),
            _ => None,
        };
        if let Some(name) = secondary {
            let path = PathBuf::from(name);
            if command == Command::DrawPlanar {
                self.library
                    .render_drawing(graph, &path)
                    .map_err(library_failure("render_drawing"))?;
            } else {
                self.library
                    .write_graph(graph, &path, GraphFormat::AdjacencyList)
                    .map_err(library_failure("write_graph"))?;
            }
            report.secondary_output = Some(path);
        }
        Ok(())
    }
}

fn fail(input: String, reason: FatalReason) -> GraphReport {
    error!(%reason, "graph processing failed");
    record_stage(PipelineStage::Failed);
    GraphReport::failed(input, reason)
}

fn library_failure(operation: &'static str) -> impl FnOnce(LibraryError) -> FatalReason {
    move |source| FatalReason::Library { operation, source }
}

fn record_stage(stage: PipelineStage) {
    Span::current().record("stage", field::debug(stage));
}
