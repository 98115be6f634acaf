//! Run configuration and the [`Harness`] builder.
//!
//! Configuration is assembled once per run, validated, and then owned by the
//! [`Harness`]; nothing is read from process-wide state.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use crate::{
    error::{HarnessError, Result},
    harness::Harness,
    library::GraphLibrary,
    prompt::{NoPrompter, Prompter},
};

/// How a batch prepares its graphs between trials.
///
/// Both strategies produce identical statistics for the same sequence of
/// generated graphs.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum GraphStrategy {
    /// Reinitialize the same graphs in place.
    #[default]
    Reuse,
    /// Drop the graphs and build fresh ones.
    Rebuild,
}

/// Which sample directories a batch populates.
///
/// Each directory keeps the ten most recent samples, named `0.txt` to
/// `9.txt` by trial index.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct SampleOutputs {
    /// Generated graphs, as adjacency lists, in `random/`.
    pub original: bool,
    /// Embedded graphs, as adjacency matrices, in `embedded/`.
    pub embedded: bool,
    /// Obstructed graphs, as adjacency matrices, in `obstructed/`.
    pub obstructed: bool,
    /// Embeddings, as adjacency lists, in `adjlist/`.
    pub adjacency_lists: bool,
}

impl SampleOutputs {
    /// Directories these samples are written to, relative to the output root.
    pub(crate) fn directories(self) -> impl Iterator<Item = &'static str> {
        [
            (self.original, SampleKind::Original),
            (self.embedded, SampleKind::Embedded),
            (self.obstructed, SampleKind::Obstructed),
            (self.adjacency_lists, SampleKind::AdjacencyList),
        ]
        .into_iter()
        .filter_map(|(enabled, kind)| enabled.then_some(kind.directory()))
    }
}

/// Kinds of per-trial sample files.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SampleKind {
    /// The generated graph before processing.
    Original,
    /// An embedded graph.
    Embedded,
    /// A graph with an isolated obstruction.
    Obstructed,
    /// The adjacency lists of an embedding.
    AdjacencyList,
    /// The pre-algorithm copy of a graph whose trial failed.
    Error,
}

impl SampleKind {
    /// Directory name for this kind of sample.
    #[must_use]
    pub const fn directory(self) -> &'static str {
        match self {
            Self::Original => "random",
            Self::Embedded => "embedded",
            Self::Obstructed => "obstructed",
            Self::AdjacencyList => "adjlist",
            Self::Error => "error",
        }
    }
}

/// Settings shared by every operation of a [`Harness`].
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct HarnessConfig {
    quiet: bool,
    samples: SampleOutputs,
    strategy: GraphStrategy,
    output_root: PathBuf,
}

impl HarnessConfig {
    /// Whether console output is suppressed.
    #[must_use]
    pub const fn quiet(&self) -> bool {
        self.quiet
    }

    /// Sample directories populated by batch runs.
    #[must_use]
    pub const fn samples(&self) -> SampleOutputs {
        self.samples
    }

    /// How graphs are prepared between trials.
    #[must_use]
    pub const fn strategy(&self) -> GraphStrategy {
        self.strategy
    }

    /// Directory holding sample directories and edge-list files.
    #[must_use]
    pub fn output_root(&self) -> &Path {
        &self.output_root
    }
}

/// Configures and constructs [`Harness`] instances.
///
/// # Examples
/// ```
/// use gauntlet_core::{GraphStrategy, HarnessBuilder};
///
/// let builder = HarnessBuilder::new()
///     .with_quiet(true)
///     .with_graph_strategy(GraphStrategy::Rebuild);
/// assert!(builder.config().quiet());
/// assert_eq!(builder.config().strategy(), GraphStrategy::Rebuild);
/// ```
pub struct HarnessBuilder {
    config: HarnessConfig,
    prompter: Box<dyn Prompter>,
}

impl Default for HarnessBuilder {
    fn default() -> Self {
        Self {
            config: HarnessConfig {
                output_root: PathBuf::from("."),
                ..HarnessConfig::default()
            },
            prompter: Box::new(NoPrompter),
        }
    }
}

impl HarnessBuilder {
    /// Creates a builder with console output on, no samples, graph reuse,
    /// the current directory as output root, and prompting disabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Suppresses console output.
    #[must_use]
    pub fn with_quiet(mut self, quiet: bool) -> Self {
        self.config.quiet = quiet;
        self
    }

    /// Selects the sample directories to populate.
    #[must_use]
    pub fn with_samples(mut self, samples: SampleOutputs) -> Self {
        self.config.samples = samples;
        self
    }

    /// Selects how graphs are prepared between trials.
    #[must_use]
    pub fn with_graph_strategy(mut self, strategy: GraphStrategy) -> Self {
        self.config.strategy = strategy;
        self
    }

    /// Sets the directory holding sample directories and edge-list files.
    #[must_use]
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.config.output_root = root.into();
        self
    }

    /// Supplies answers for values the caller left unset.
    #[must_use]
    pub fn with_prompter(mut self, prompter: impl Prompter + 'static) -> Self {
        self.prompter = Box::new(prompter);
        self
    }

    /// Returns the configuration assembled so far.
    #[must_use]
    pub const fn config(&self) -> &HarnessConfig {
        &self.config
    }

    /// Validates the configuration and constructs a [`Harness`].
    ///
    /// Sample directories are not created; every requested one must already
    /// exist under the output root. The `error/` directory is optional and
    /// failure dumps are skipped when it is missing.
    ///
    /// # Errors
    /// Returns [`HarnessError::MissingSampleDirectory`] for the first
    /// requested sample directory that does not exist.
    pub fn build<L, W>(self, library: L, console: W) -> Result<Harness<L, W>>
    where
        L: GraphLibrary,
        W: Write,
    {
        for directory in self.config.samples.directories() {
            let path = self.config.output_root.join(directory);
            if !path.is_dir() {
                return Err(HarnessError::MissingSampleDirectory { path });
            }
        }
        Ok(Harness::new(library, self.config, console, self.prompter))
    }
}
