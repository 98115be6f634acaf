//! One random maximal planar graph with extra edges.

use std::{
    io::Write,
    ops::RangeInclusive,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use tracing::{Span, error, field, info, instrument};

use crate::{
    command::Command,
    edge_list::write_edge_list,
    error::{HarnessError, Result},
    harness::Harness,
    library::{GraphFormat, GraphHandle, GraphLibrary},
    outcome::TrialOutcome,
    prompt::{ask_yes_no, resolve_count},
};

/// Accepted number of vertices for the maximal planar driver.
pub const MAXIMAL_VERTEX_RANGE: RangeInclusive<u64> = 1..=1_000_000;

/// Edge-list file written when no extra edges were requested.
pub const MAX_PLANAR_EDGE_LIST: &str = "maxPlanarEdgeList.txt";

/// Edge-list file written when extra edges were requested.
pub const NON_PLANAR_EDGE_LIST: &str = "nonPlanarEdgeList.txt";

/// Number of edges to generate: a maximal planar graph on `vertices`
/// vertices has `3N - 6` edges, plus `extra`.
///
/// # Examples
/// ```
/// use gauntlet_core::target_edge_count;
///
/// assert_eq!(target_edge_count(10, 0), 24);
/// assert_eq!(target_edge_count(10, 3), 27);
/// assert_eq!(target_edge_count(1, 0), 0);
/// ```
#[must_use]
pub const fn target_edge_count(vertices: usize, extra: usize) -> usize {
    vertices
        .saturating_mul(3)
        .saturating_sub(6)
        .saturating_add(extra)
}

/// Whether to save the generated graph as an edge list.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum EdgeListChoice {
    /// Ask the prompter.
    #[default]
    Ask,
    /// Save without asking.
    Save,
    /// Do not save.
    Skip,
}

/// Inputs to [`Harness::run_maximal_planar`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MaximalRequest {
    /// Vertex count; zero asks the prompter.
    pub vertices: u64,
    /// Edges to add beyond the maximal planar graph.
    pub extra_edges: usize,
    /// Where to write the processed graph.
    pub output: Option<PathBuf>,
    /// Where to write the generated graph before processing.
    pub generated_output: Option<PathBuf>,
    /// Whether to save the edge list.
    pub edge_list: EdgeListChoice,
}

/// What a maximal planar run did.
#[derive(Clone, Debug)]
pub struct MaximalReport {
    /// Vertex count after prompting and clamping.
    pub vertices: usize,
    /// Edges in the generated graph.
    pub edges: usize,
    /// Verified outcome.
    pub outcome: TrialOutcome,
    /// Time spent generating the graph.
    pub generation_elapsed: Duration,
    /// Time spent in the algorithm.
    pub elapsed: Duration,
    /// Processed graph written, if any.
    pub output: Option<PathBuf>,
    /// Edge-list file written, if any.
    pub edge_list: Option<PathBuf>,
}

impl<L, W> Harness<L, W>
where
    L: GraphLibrary,
    W: Write,
{
    /// Generates a random maximal planar graph, adds `extra_edges` random
    /// edges, and runs `command` on the result.
    ///
    /// On an expected outcome the processed graph is written to the requested
    /// output and the generated graph may be saved as an edge list under the
    /// output root.
    ///
    /// # Errors
    /// Returns [`HarnessError`] when the vertex count or edge-list answer
    /// cannot be obtained, when the graph cannot be generated, copied or
    /// written, or when the console cannot be written.
    #[instrument(
        name = "core.maximal_planar",
        skip(self, request),
        err,
        fields(vertices = field::Empty, extra_edges = request.extra_edges)
    )]
    pub fn run_maximal_planar(
        &mut self,
        command: Command,
        request: MaximalRequest,
    ) -> Result<MaximalReport> {
        let vertices = resolve_count(
            request.vertices,
            "Enter number of vertices:",
            MAXIMAL_VERTEX_RANGE,
            self.prompter.as_mut(),
        )?;
        Span::current().record("vertices", vertices);
        let order = usize::try_from(vertices).unwrap_or(usize::MAX);

        let mut graph = self.fresh_graph(order, command)?;
        self.console.line("Creating the random graph...")?;
        let start = Instant::now();
        self.library
            .create_random_graph_with_edges(&mut graph, target_edge_count(order, request.extra_edges))
            .map_err(|source| HarnessError::Library {
                operation: "create_random_graph_with_edges",
                source,
            })?;
        let generation_elapsed = start.elapsed();
        let edges = graph.edge_count();
        self.console.line(&format!(
            "Created random graph with {edges} edges in {:.3} seconds. ",
            generation_elapsed.as_secs_f64()
        ))?;

        if let Some(path) = &request.generated_output {
            self.write_graph_file(&graph, path)?;
        }

        let original = self
            .library
            .duplicate_graph(&graph)
            .map_err(|source| HarnessError::Library {
                operation: "duplicate_graph",
                source,
            })?;

        self.console.line("Now processing")?;
        let processed = self.process(&mut graph, &original, command);
        if command.is_embedding() && processed.outcome.is_expected() {
            self.library
                .sort_vertices(&mut graph)
                .map_err(|source| HarnessError::Library {
                    operation: "sort_vertices",
                    source,
                })?;
        }
        self.report_result(command, &processed, None)?;

        let mut report = MaximalReport {
            vertices: order,
            edges,
            outcome: processed.outcome,
            generation_elapsed,
            elapsed: processed.elapsed,
            output: None,
            edge_list: None,
        };
        if let TrialOutcome::Fatal(reason) = &report.outcome {
            error!(%reason, "maximal planar run failed");
            self.console.line("Failure occurred")?;
            return Ok(report);
        }

        if let Some(path) = request.output {
            self.write_graph_file(&graph, &path)?;
            report.output = Some(path);
        }

        let save = match request.edge_list {
            EdgeListChoice::Save => true,
            EdgeListChoice::Skip => false,
            EdgeListChoice::Ask => ask_yes_no(
                self.prompter.as_mut(),
                "Do you want to save the generated graph in edge list format (y/n)? ",
            )?,
        };
        if save {
            let name = if request.extra_edges > 0 {
                NON_PLANAR_EDGE_LIST
            } else {
                MAX_PLANAR_EDGE_LIST
            };
            let path = self.config.output_root().join(name);
            write_edge_list(&path, &original.edges())?;
            info!(path = %path.display(), "edge list saved");
            self.console
                .line(&format!("Edge list format saved to '{}'", path.display()))?;
            report.edge_list = Some(path);
        }
        Ok(report)
    }

    fn write_graph_file(&self, graph: &L::Graph, path: &Path) -> Result<()> {
        self.library
            .write_graph(graph, path, GraphFormat::AdjacencyList)
            .map_err(|source| HarnessError::Library {
                operation: "write_graph",
                source,
            })
    }
}
