#![allow(dead_code)]

use std::{
    collections::VecDeque,
    fmt::Write as _,
    fs,
    path::{Path, PathBuf},
};

use gauntlet_core::{
    Command, EmbedFlags, EmbedResult, GraphFormat, GraphHandle, GraphLibrary, LibraryError,
    MinorType, ReadOutcome,
};
use rand::{Rng, SeedableRng, rngs::SmallRng};

/// What the next algorithm call claims.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Verdict {
    /// A genuine embedding.
    Embeddable,
    /// A genuine obstruction with the given minors.
    NonEmbeddable(MinorType),
    /// Claims an embedding that the integrity check rejects.
    Fabricated,
    /// The algorithm itself fails.
    Broken,
    /// A proper colouring with the given number of colours.
    Colored(usize),
    /// A colouring the integrity check rejects.
    Miscolored,
}

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct StubGraph {
    order: usize,
    edges: Vec<(usize, usize)>,
    minor: MinorType,
    truth: Option<EmbedResult>,
    colors: usize,
    proper: bool,
    pub sorted: bool,
}

impl StubGraph {
    fn clear(&mut self) {
        *self = Self {
            order: self.order,
            ..Self::default()
        };
    }
}

impl GraphHandle for StubGraph {
    fn vertex_count(&self) -> usize {
        self.order
    }

    fn edge_count(&self) -> usize {
        self.edges.len()
    }

    fn minor_type(&self) -> MinorType {
        self.minor
    }

    fn edges(&self) -> Vec<(usize, usize)> {
        self.edges.clone()
    }
}

/// Graph library whose algorithm verdicts come from a script, or are derived
/// from the generated graph once the script runs out.
#[derive(Debug)]
pub struct ScriptedLibrary {
    rng: SmallRng,
    verdicts: VecDeque<Verdict>,
    pub made: usize,
    pub reinitialized: usize,
    pub sorted: usize,
}

impl ScriptedLibrary {
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
            verdicts: VecDeque::new(),
            made: 0,
            reinitialized: 0,
            sorted: 0,
        }
    }

    #[must_use]
    pub fn with_verdicts(verdicts: impl IntoIterator<Item = Verdict>) -> Self {
        let mut library = Self::seeded(7);
        library.verdicts = verdicts.into_iter().collect();
        library
    }

    fn next_verdict(&mut self, graph: &StubGraph, coloring: bool) -> Verdict {
        if let Some(verdict) = self.verdicts.pop_front() {
            return verdict;
        }
        let m = graph.edges.len();
        if coloring {
            Verdict::Colored(1 + m % 7)
        } else if m <= (3 * graph.order).saturating_sub(6).max(graph.order.saturating_sub(1)) / 2 {
            Verdict::Embeddable
        } else {
            Verdict::NonEmbeddable(MinorType::from_bits(1 << (m % 9)))
        }
    }

    fn random_edges(&mut self, order: usize, count: usize) -> Vec<(usize, usize)> {
        if order < 2 {
            return Vec::new();
        }
        (0..count)
            .map(|_| {
                let u = self.rng.gen_range(0..order);
                let v = (u + self.rng.gen_range(1..order)) % order;
                (u, v)
            })
            .collect()
    }
}

/// Writes a graph file in the stub's `N=<order>` plus `u v` lines format.
pub fn write_stub_file(path: &Path, order: usize, edges: &[(usize, usize)]) {
    let mut text = format!("N={order}\n");
    for (u, v) in edges {
        let _ = writeln!(text, "{u} {v}");
    }
    fs::write(path, text).expect("stub graph file must be written");
}

fn io_error(path: &Path, error: &std::io::Error) -> LibraryError {
    LibraryError::Io {
        path: path.to_path_buf(),
        message: error.to_string(),
    }
}

fn malformed(path: &Path, line: usize) -> LibraryError {
    LibraryError::Malformed {
        path: path.to_path_buf(),
        line,
        reason: "bad stub line".to_owned(),
    }
}

impl GraphLibrary for ScriptedLibrary {
    type Graph = StubGraph;

    fn make_graph(&mut self, order: usize, _command: Command) -> Result<StubGraph, LibraryError> {
        self.made += 1;
        Ok(StubGraph {
            order,
            ..StubGraph::default()
        })
    }

    fn reinitialize_graph(&mut self, graph: &mut StubGraph) -> Result<(), LibraryError> {
        self.reinitialized += 1;
        graph.clear();
        Ok(())
    }

    fn read_graph(
        &mut self,
        path: &Path,
        _command: Command,
    ) -> Result<ReadOutcome<StubGraph>, LibraryError> {
        let text = fs::read_to_string(path).map_err(|error| io_error(path, &error))?;
        let mut lines = text.lines();
        let order = lines
            .next()
            .and_then(|header| header.strip_prefix("N="))
            .and_then(|n| n.trim().parse().ok())
            .ok_or_else(|| malformed(path, 1))?;
        let mut edges = Vec::new();
        for (index, line) in lines.enumerate() {
            let mut parts = line.split_whitespace().map(str::parse::<usize>);
            match (parts.next(), parts.next()) {
                (Some(Ok(u)), Some(Ok(v))) => edges.push((u, v)),
                _ => return Err(malformed(path, index + 2)),
            }
        }
        let capacity = 3 * order;
        let overflow = edges.len() > capacity;
        edges.truncate(capacity);
        let graph = StubGraph {
            order,
            edges,
            ..StubGraph::default()
        };
        Ok(if overflow {
            ReadOutcome::TooManyEdges(graph)
        } else {
            ReadOutcome::Complete(graph)
        })
    }

    fn write_graph(
        &self,
        graph: &StubGraph,
        path: &Path,
        _format: GraphFormat,
    ) -> Result<(), LibraryError> {
        let mut text = format!("N={}\n", graph.order);
        for (u, v) in &graph.edges {
            let _ = writeln!(text, "{u} {v}");
        }
        fs::write(path, text).map_err(|error| io_error(path, &error))
    }

    fn duplicate_graph(&self, graph: &StubGraph) -> Result<StubGraph, LibraryError> {
        Ok(graph.clone())
    }

    fn create_random_graph(&mut self, graph: &mut StubGraph) -> Result<(), LibraryError> {
        let order = graph.order;
        let low = order.saturating_sub(1);
        let high = (3 * order).saturating_sub(6).max(low);
        let count = self.rng.gen_range(low..=high);
        graph.edges = self.random_edges(order, count);
        Ok(())
    }

    fn create_random_graph_with_edges(
        &mut self,
        graph: &mut StubGraph,
        target_edges: usize,
    ) -> Result<(), LibraryError> {
        let order = graph.order;
        graph.edges = self.random_edges(order, target_edges);
        Ok(())
    }

    fn embed(
        &mut self,
        graph: &mut StubGraph,
        _flags: EmbedFlags,
    ) -> Result<EmbedResult, LibraryError> {
        match self.next_verdict(graph, false) {
            Verdict::NonEmbeddable(minor) => {
                graph.minor = minor;
                graph.truth = Some(EmbedResult::NonEmbeddable);
                Ok(EmbedResult::NonEmbeddable)
            }
            Verdict::Fabricated => {
                graph.truth = Some(EmbedResult::NonEmbeddable);
                Ok(EmbedResult::Embeddable)
            }
            Verdict::Broken => Err(LibraryError::InvalidGraph {
                reason: "scripted failure".to_owned(),
            }),
            _ => {
                graph.truth = Some(EmbedResult::Embeddable);
                Ok(EmbedResult::Embeddable)
            }
        }
    }

    fn verify_embedding(
        &self,
        graph: &StubGraph,
        original: &StubGraph,
        claimed: EmbedResult,
    ) -> Result<EmbedResult, LibraryError> {
        if graph.order != original.order {
            return Err(LibraryError::InvalidGraph {
                reason: "order changed".to_owned(),
            });
        }
        Ok(graph.truth.unwrap_or(claimed))
    }

    fn color_vertices(&mut self, graph: &mut StubGraph) -> Result<(), LibraryError> {
        match self.next_verdict(graph, true) {
            Verdict::Miscolored => {
                graph.colors = 2;
                graph.proper = false;
            }
            Verdict::Broken => {
                return Err(LibraryError::InvalidGraph {
                    reason: "scripted failure".to_owned(),
                });
            }
            Verdict::Colored(colors) => {
                graph.colors = colors;
                graph.proper = true;
            }
            _ => {
                graph.colors = 1;
                graph.proper = true;
            }
        }
        Ok(())
    }

    fn verify_coloring(&self, graph: &StubGraph, _original: &StubGraph) -> Result<(), LibraryError> {
        if graph.proper {
            Ok(())
        } else {
            Err(LibraryError::InvalidGraph {
                reason: "adjacent vertices share a colour".to_owned(),
            })
        }
    }

    fn colors_used(&self, graph: &StubGraph) -> usize {
        graph.colors
    }

    fn sort_vertices(&mut self, graph: &mut StubGraph) -> Result<(), LibraryError> {
        self.sorted += 1;
        graph.sorted = true;
        Ok(())
    }

    fn render_drawing(&self, _graph: &StubGraph, path: &Path) -> Result<(), LibraryError> {
        fs::write(path, "drawing\n").map_err(|error| io_error(path, &error))
    }
}

/// Path under `dir` as an owned string, for APIs that take file names.
#[must_use]
pub fn name_in(dir: &Path, file: &str) -> String {
    dir.join(file).to_string_lossy().into_owned()
}

/// Creates the named sample directories under `root`.
pub fn sample_dirs(root: &Path, names: &[&str]) -> PathBuf {
    for name in names {
        fs::create_dir_all(root.join(name)).expect("sample directory must be created");
    }
    root.to_path_buf()
}
