//! Command implementations and argument parsing for the gauntlet CLI.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use gauntlet_core::{
    BatchReport, Command, EdgeListChoice, GraphReport, GraphRequest, GraphStrategy, HarnessBuilder,
    HarnessError, MaximalReport, MaximalRequest, Prompter, SampleOutputs, SecondaryOutput,
};
use gauntlet_providers_adjacency::AdjacencyLibrary;
use thiserror::Error;
use tracing::{Span, field, info, instrument};

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "gauntlet",
    about = "Exercise a graph algorithms library and verify every result."
)]
pub struct Cli {
    /// Suppress per-graph console output.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Seed for the random graph generator (defaults to system entropy).
    #[arg(long, global = true)]
    pub seed: Option<u64>,

    /// Directory holding sample directories and edge-list files.
    #[arg(long = "output-root", global = true, default_value = ".")]
    pub output_root: PathBuf,

    /// Mode to run.
    #[command(subcommand)]
    pub mode: Mode,
}

/// Supported run modes.
#[derive(Debug, Subcommand, Clone)]
pub enum Mode {
    /// Run an algorithm against a batch of random graphs.
    Random(RandomArgs),
    /// Run an algorithm against one graph file.
    Specific(SpecificArgs),
    /// Run an algorithm against a random maximal planar graph with extra edges.
    Maximal(MaximalArgs),
}

/// Options accepted by the `random` mode.
#[derive(Debug, Args, Clone)]
pub struct RandomArgs {
    /// Algorithm key: p, d, o, 2, 3, 4 or c.
    #[arg(long, value_parser = parse_command)]
    pub command: Command,

    /// Number of graphs to generate; prompted for when omitted.
    #[arg(long, default_value_t = 0)]
    pub count: u64,

    /// Vertices per graph; prompted for when omitted.
    #[arg(long, default_value_t = 0)]
    pub size: u64,

    /// Keep generated graphs in `random/`.
    #[arg(long)]
    pub sample_original: bool,

    /// Keep embedded graphs in `embedded/`.
    #[arg(long)]
    pub sample_embedded: bool,

    /// Keep obstructed graphs in `obstructed/`.
    #[arg(long)]
    pub sample_obstructed: bool,

    /// Keep embeddings as adjacency lists in `adjlist/`.
    #[arg(long)]
    pub sample_adjlist: bool,

    /// Build fresh graphs for every trial instead of reinitializing them.
    #[arg(long)]
    pub rebuild_graphs: bool,
}

/// Options accepted by the `specific` mode.
#[derive(Debug, Args, Clone)]
pub struct SpecificArgs {
    /// Algorithm key: p, d, o, 2, 3, 4 or c.
    #[arg(long, value_parser = parse_command)]
    pub command: Command,

    /// Graph file to process; prompted for when omitted.
    pub input: Option<String>,

    /// Primary output file (defaults to `<input>.<algorithm>.out.txt`).
    #[arg(long)]
    pub output: Option<String>,

    /// Write the obstruction or drawing, optionally to the given file.
    #[arg(long, num_args = 0..=1)]
    pub secondary: Option<Option<String>>,
}

/// Options accepted by the `maximal` mode.
#[derive(Debug, Args, Clone)]
pub struct MaximalArgs {
    /// Algorithm key: p, d, o, 2, 3, 4 or c.
    #[arg(long, value_parser = parse_command)]
    pub command: Command,

    /// Number of vertices; prompted for when omitted.
    #[arg(long, default_value_t = 0)]
    pub vertices: u64,

    /// Random edges to add beyond the maximal planar graph.
    #[arg(long = "extra-edges", default_value_t = 0)]
    pub extra_edges: usize,

    /// Where to write the processed graph.
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Where to write the generated graph before processing.
    #[arg(long = "generated-output")]
    pub generated_output: Option<PathBuf>,

    /// Whether to save the generated graph as an edge list.
    #[arg(long = "edge-list", value_enum, default_value_t = EdgeListArg::Ask)]
    pub edge_list: EdgeListArg,
}

/// Values accepted by `--edge-list`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, ValueEnum)]
pub enum EdgeListArg {
    /// Ask on the terminal.
    Ask,
    /// Save without asking.
    Save,
    /// Do not save.
    Skip,
}

impl From<EdgeListArg> for EdgeListChoice {
    fn from(arg: EdgeListArg) -> Self {
        match arg {
            EdgeListArg::Ask => Self::Ask,
            EdgeListArg::Save => Self::Save,
            EdgeListArg::Skip => Self::Skip,
        }
    }
}

pub(super) fn parse_command(raw: &str) -> Result<Command, String> {
    let mut chars = raw.trim().chars();
    match (chars.next(), chars.next()) {
        (Some(key), None) => {
            Command::from_key(key).ok_or_else(|| format!("unknown algorithm key `{key}`"))
        }
        _ => Err(format!("expected a single algorithm key, got `{raw}`")),
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// The harness could not run.
    #[error(transparent)]
    Harness(#[from] HarnessError),
    /// Flushing the console failed.
    #[error("failed to flush console output: {source}")]
    Flush {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

/// Report produced by whichever mode ran.
#[derive(Debug, Clone)]
pub enum ExecutionSummary {
    /// A random-graph batch.
    Batch(BatchReport),
    /// A single graph file.
    Graph(GraphReport),
    /// A maximal planar graph.
    Maximal(MaximalReport),
}

impl ExecutionSummary {
    /// Returns `true` unless the run ended with a fatal outcome.
    #[must_use]
    pub fn is_success(&self) -> bool {
        match self {
            Self::Batch(report) => report.is_success(),
            Self::Graph(report) => report.is_success(),
            Self::Maximal(report) => report.outcome.fatal_reason().is_none(),
        }
    }
}

/// Prompter reading answers line by line from `input` after writing each
/// question to `output`.
#[derive(Debug)]
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    /// Creates a prompter over the given streams.
    #[must_use]
    pub const fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl LinePrompter<io::StdinLock<'static>, io::Stdout> {
    /// Creates a prompter over the process terminal.
    #[must_use]
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn prompt(&mut self, message: &str) -> io::Result<String> {
        write!(self.output, "{message}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "input closed before an answer was given",
            ));
        }
        Ok(line.trim_end_matches(['\r', '\n']).to_owned())
    }
}

/// Executes the CLI command represented by `cli`, writing run output to
/// `console` and asking `prompter` for anything the arguments left out.
///
/// # Errors
/// Returns [`CliError`] when the harness cannot be configured or run. Fatal
/// trial outcomes are not errors; inspect [`ExecutionSummary::is_success`].
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use gauntlet_cli::cli::{Cli, Mode, RandomArgs, run_cli};
/// # use gauntlet_core::{Command, NoPrompter};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let cli = Cli {
///     quiet: true,
///     seed: Some(1),
///     output_root: ".".into(),
///     mode: Mode::Random(RandomArgs {
///         command: Command::ColorVertices,
///         count: 3,
///         size: 8,
///         sample_original: false,
///         sample_embedded: false,
///         sample_obstructed: false,
///         sample_adjlist: false,
///         rebuild_graphs: false,
///     }),
/// };
/// let mut console = Vec::new();
/// let summary = run_cli(cli, &mut console, NoPrompter)?;
/// assert!(summary.is_success());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli, console, prompter),
    fields(mode = field::Empty, seed = field::Empty),
)]
pub fn run_cli<W: Write>(
    cli: Cli,
    mut console: W,
    prompter: impl Prompter + 'static,
) -> Result<ExecutionSummary, CliError> {
    let span = Span::current();
    let library = match cli.seed {
        Some(seed) => {
            span.record("seed", seed);
            AdjacencyLibrary::seeded(seed)
        }
        None => AdjacencyLibrary::new(),
    };
    let builder = HarnessBuilder::new()
        .with_quiet(cli.quiet)
        .with_output_root(cli.output_root)
        .with_prompter(prompter);

    let summary = match cli.mode {
        Mode::Random(args) => {
            span.record("mode", field::display("random"));
            run_random(builder, library, &mut console, args)?
        }
        Mode::Specific(args) => {
            span.record("mode", field::display("specific"));
            run_specific(builder, library, &mut console, args)?
        }
        Mode::Maximal(args) => {
            span.record("mode", field::display("maximal"));
            run_maximal(builder, library, &mut console, args)?
        }
    };
    console.flush().map_err(|source| CliError::Flush { source })?;

    info!(success = summary.is_success(), "command completed");
    Ok(summary)
}

pub(super) fn run_random<W: Write>(
    builder: HarnessBuilder,
    library: AdjacencyLibrary,
    console: W,
    args: RandomArgs,
) -> Result<ExecutionSummary, CliError> {
    let strategy = if args.rebuild_graphs {
        GraphStrategy::Rebuild
    } else {
        GraphStrategy::Reuse
    };
    let samples = SampleOutputs {
        original: args.sample_original,
        embedded: args.sample_embedded,
        obstructed: args.sample_obstructed,
        adjacency_lists: args.sample_adjlist,
    };
    let mut harness = builder
        .with_graph_strategy(strategy)
        .with_samples(samples)
        .build(library, console)?;
    let report = harness.run_random_graphs(args.command, args.count, args.size)?;
    Ok(ExecutionSummary::Batch(report))
}

pub(super) fn run_specific<W: Write>(
    builder: HarnessBuilder,
    library: AdjacencyLibrary,
    console: W,
    args: SpecificArgs,
) -> Result<ExecutionSummary, CliError> {
    let mut harness = builder.build(library, console)?;
    let request = GraphRequest {
        input: args.input,
        output: args.output,
        secondary: secondary_output(args.secondary),
    };
    let report = harness.run_specific_graph(args.command, request)?;
    Ok(ExecutionSummary::Graph(report))
}

pub(super) fn run_maximal<W: Write>(
    builder: HarnessBuilder,
    library: AdjacencyLibrary,
    console: W,
    args: MaximalArgs,
) -> Result<ExecutionSummary, CliError> {
    let mut harness = builder.build(library, console)?;
    let request = MaximalRequest {
        vertices: args.vertices,
        extra_edges: args.extra_edges,
        output: args.output,
        generated_output: args.generated_output,
        edge_list: args.edge_list.into(),
    };
    let report = harness.run_maximal_planar(args.command, request)?;
    Ok(ExecutionSummary::Maximal(report))
}

pub(super) fn secondary_output(flag: Option<Option<String>>) -> SecondaryOutput {
    match flag {
        None => SecondaryOutput::Skip,
        Some(None) => SecondaryOutput::Default,
        Some(Some(name)) => SecondaryOutput::Named(name),
    }
}
