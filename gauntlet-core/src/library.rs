//! Contract for the external graph algorithms library.
//!
//! The harness never looks inside a graph. It creates, copies, reads and
//! writes graphs and runs algorithms on them exclusively through
//! [`GraphLibrary`], and reads back only the counts and the minor type
//! exposed by [`GraphHandle`].

use std::path::Path;

use crate::{
    classify::MinorType,
    command::{Command, EmbedFlags},
    error::LibraryError,
};

/// Read-only view of a graph owned by the caller.
pub trait GraphHandle {
    /// Number of vertices, N.
    fn vertex_count(&self) -> usize;

    /// Number of edges in use, M.
    fn edge_count(&self) -> usize;

    /// Minor patterns recorded by the last non-embeddable result.
    fn minor_type(&self) -> MinorType;

    /// Endpoints of every edge in use, zero-based, in storage order.
    fn edges(&self) -> Vec<(usize, usize)>;
}

/// Serialisation formats understood by [`GraphLibrary::write_graph`].
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum GraphFormat {
    /// Plain-text adjacency lists.
    AdjacencyList,
    /// Upper-triangular adjacency matrix.
    AdjacencyMatrix,
    /// Adjacency lists annotated with internal state.
    DebugInfo,
}

/// Result of [`GraphLibrary::read_graph`].
#[derive(Debug)]
pub enum ReadOutcome<G> {
    /// The whole file was loaded.
    Complete(G),
    /// The file held more edges than the graph can store; the surplus was
    /// dropped.
    TooManyEdges(G),
}

/// Verdict of an embedding-family algorithm.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum EmbedResult {
    /// The graph was embedded, or no searched-for homeomorph exists.
    Embeddable,
    /// An obstruction or the searched-for homeomorph was isolated.
    NonEmbeddable,
}

/// Operations the harness consumes from a graph algorithms library.
///
/// Implementations own any randomness they use, so a seeded library yields
/// a reproducible sequence of generated graphs.
pub trait GraphLibrary {
    /// Graph handle type produced by this library.
    type Graph: GraphHandle;

    /// Creates an empty graph with `order` vertices and attaches the
    /// extension needed by `command`.
    ///
    /// # Errors
    /// Returns [`LibraryError`] when the graph cannot be allocated.
    fn make_graph(&mut self, order: usize, command: Command) -> Result<Self::Graph, LibraryError>;

    /// Clears all edges and algorithm state, keeping the order and extension.
    ///
    /// # Errors
    /// Returns [`LibraryError`] when the graph cannot be reset.
    fn reinitialize_graph(&mut self, graph: &mut Self::Graph) -> Result<(), LibraryError>;

    /// Reads a graph from `path` with the extension for `command` attached.
    ///
    /// # Errors
    /// Returns [`LibraryError`] when the file cannot be read or parsed.
    fn read_graph(
        &mut self,
        path: &Path,
        command: Command,
    ) -> Result<ReadOutcome<Self::Graph>, LibraryError>;

    /// Writes `graph` to `path` in `format`.
    ///
    /// # Errors
    /// Returns [`LibraryError`] when the file cannot be written.
    fn write_graph(
        &self,
        graph: &Self::Graph,
        path: &Path,
        format: GraphFormat,
    ) -> Result<(), LibraryError>;

    /// Returns an independent copy of `graph`.
    ///
    /// # Errors
    /// Returns [`LibraryError`] when the copy cannot be allocated.
    fn duplicate_graph(&self, graph: &Self::Graph) -> Result<Self::Graph, LibraryError>;

    /// Fills `graph` with a random graph on its vertices.
    ///
    /// # Errors
    /// Returns [`LibraryError`] when generation fails.
    fn create_random_graph(&mut self, graph: &mut Self::Graph) -> Result<(), LibraryError>;

    /// Fills `graph` with a random maximal planar graph and then adds random
    /// edges until `target_edges` edges exist.
    ///
    /// # Errors
    /// Returns [`LibraryError`] when generation fails.
    fn create_random_graph_with_edges(
        &mut self,
        graph: &mut Self::Graph,
        target_edges: usize,
    ) -> Result<(), LibraryError>;

    /// Runs the embedding-family algorithm selected by `flags`.
    ///
    /// # Errors
    /// Returns [`LibraryError`] on an internal algorithm failure.
    fn embed(
        &mut self,
        graph: &mut Self::Graph,
        flags: EmbedFlags,
    ) -> Result<EmbedResult, LibraryError>;

    /// Independently re-checks an embedding result against the original
    /// graph and returns the verdict the check supports.
    ///
    /// # Errors
    /// Returns [`LibraryError`] when the result is inconsistent with the
    /// original graph.
    fn verify_embedding(
        &self,
        graph: &Self::Graph,
        original: &Self::Graph,
        claimed: EmbedResult,
    ) -> Result<EmbedResult, LibraryError>;

    /// Colours the vertices of `graph`.
    ///
    /// # Errors
    /// Returns [`LibraryError`] on an internal algorithm failure.
    fn color_vertices(&mut self, graph: &mut Self::Graph) -> Result<(), LibraryError>;

    /// Checks that `graph` is a proper colouring of `original`.
    ///
    /// # Errors
    /// Returns [`LibraryError`] when the colouring is not proper or the graph
    /// no longer matches the original.
    fn verify_coloring(
        &self,
        graph: &Self::Graph,
        original: &Self::Graph,
    ) -> Result<(), LibraryError>;

    /// Number of distinct colours assigned by the last colouring.
    fn colors_used(&self, graph: &Self::Graph) -> usize;

    /// Restores the original vertex numbering after an embedding.
    ///
    /// # Errors
    /// Returns [`LibraryError`] when the numbering cannot be restored.
    fn sort_vertices(&mut self, graph: &mut Self::Graph) -> Result<(), LibraryError>;

    /// Renders the drawing computed by the draw-planar extension to `path`.
    ///
    /// # Errors
    /// Returns [`LibraryError`] when no drawing exists or the file cannot be
    /// written.
    fn render_drawing(&self, graph: &Self::Graph, path: &Path) -> Result<(), LibraryError>;
}
