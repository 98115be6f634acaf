//! [`GraphLibrary`] implementation over [`AdjacencyGraph`].

use std::path::Path;

use gauntlet_core::{
    Command, EmbedFlags, EmbedResult, GraphFormat, GraphLibrary, LibraryError, ReadOutcome,
};
use rand::{SeedableRng, rngs::SmallRng};
use tracing::{debug, instrument};

use crate::{color, generate, graph::AdjacencyGraph, io};

/// In-memory graph library with seedable random generation.
///
/// Storage, file formats, random generation and vertex colouring are
/// provided here. Planar embedding, its drawing extension and the
/// homeomorph searches belong to an external algorithms library, so those
/// operations report [`LibraryError::Unsupported`].
///
/// # Examples
/// ```
/// use gauntlet_core::{Command, GraphHandle, GraphLibrary};
/// use gauntlet_providers_adjacency::AdjacencyLibrary;
///
/// let mut library = AdjacencyLibrary::seeded(7);
/// let mut graph = library.make_graph(10, Command::ColorVertices)?;
/// library.create_random_graph(&mut graph)?;
/// assert!(graph.edge_count() >= 9);
///
/// let original = library.duplicate_graph(&graph)?;
/// library.color_vertices(&mut graph)?;
/// library.verify_coloring(&graph, &original)?;
/// assert!(library.colors_used(&graph) <= 6);
/// # Ok::<(), gauntlet_core::LibraryError>(())
/// ```
#[derive(Debug)]
pub struct AdjacencyLibrary {
    rng: SmallRng,
}

impl AdjacencyLibrary {
    /// Creates a library seeded from the operating system.
    #[must_use]
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_entropy(),
        }
    }

    /// Creates a library whose random graphs are reproducible from `seed`.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }
}

impl Default for AdjacencyLibrary {
    fn default() -> Self {
        Self::new()
    }
}

impl GraphLibrary for AdjacencyLibrary {
    type Graph = AdjacencyGraph;

    fn make_graph(&mut self, order: usize, _command: Command) -> Result<AdjacencyGraph, LibraryError> {
        Ok(AdjacencyGraph::new(order))
    }

    fn reinitialize_graph(&mut self, graph: &mut AdjacencyGraph) -> Result<(), LibraryError> {
        graph.clear();
        Ok(())
    }

    #[instrument(name = "adjacency.read_graph", skip(self), err)]
    fn read_graph(
        &mut self,
        path: &Path,
        command: Command,
    ) -> Result<ReadOutcome<AdjacencyGraph>, LibraryError> {
        let loaded = io::read_graph_file(path)?;
        if loaded.dropped == 0 {
            return Ok(ReadOutcome::Complete(loaded.graph));
        }
        debug!(dropped = loaded.dropped, "edges beyond capacity dropped");
        Ok(ReadOutcome::TooManyEdges(loaded.graph))
    }

    fn write_graph(
        &self,
        graph: &AdjacencyGraph,
        path: &Path,
        format: GraphFormat,
    ) -> Result<(), LibraryError> {
        io::write_graph_file(graph, path, format).map_err(LibraryError::from)
    }

    fn duplicate_graph(&self, graph: &AdjacencyGraph) -> Result<AdjacencyGraph, LibraryError> {
        Ok(graph.clone())
    }

    fn create_random_graph(&mut self, graph: &mut AdjacencyGraph) -> Result<(), LibraryError> {
        generate::random_graph(graph, &mut self.rng).map_err(LibraryError::from)
    }

    fn create_random_graph_with_edges(
        &mut self,
        graph: &mut AdjacencyGraph,
        target_edges: usize,
    ) -> Result<(), LibraryError> {
        generate::random_maximal_planar(graph, target_edges, &mut self.rng)
            .map_err(LibraryError::from)
    }

    fn embed(
        &mut self,
        _graph: &mut AdjacencyGraph,
        _flags: EmbedFlags,
    ) -> Result<EmbedResult, LibraryError> {
        Err(LibraryError::Unsupported { operation: "embed" })
    }

    fn verify_embedding(
        &self,
        _graph: &AdjacencyGraph,
        _original: &AdjacencyGraph,
        _claimed: EmbedResult,
    ) -> Result<EmbedResult, LibraryError> {
        Err(LibraryError::Unsupported {
            operation: "verify_embedding",
        })
    }

    fn color_vertices(&mut self, graph: &mut AdjacencyGraph) -> Result<(), LibraryError> {
        color::color_smallest_last(graph);
        Ok(())
    }

    fn verify_coloring(
        &self,
        graph: &AdjacencyGraph,
        original: &AdjacencyGraph,
    ) -> Result<(), LibraryError> {
        color::verify_coloring(graph, original).map_err(LibraryError::from)
    }

    fn colors_used(&self, graph: &AdjacencyGraph) -> usize {
        color::colors_used(graph)
    }

    fn sort_vertices(&mut self, _graph: &mut AdjacencyGraph) -> Result<(), LibraryError> {
        // Vertices are never renumbered here.
        Ok(())
    }

    fn render_drawing(&self, _graph: &AdjacencyGraph, _path: &Path) -> Result<(), LibraryError> {
        Err(LibraryError::Unsupported {
            operation: "render_drawing",
        })
    }
}
