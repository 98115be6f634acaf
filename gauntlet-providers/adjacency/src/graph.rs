//! Adjacency-list graph storage.

use gauntlet_core::{GraphHandle, MinorType};

use crate::errors::AdjacencyLibraryError;

/// Edges a graph may hold per vertex.
pub const EDGE_CAPACITY_FACTOR: usize = 3;

/// Simple undirected graph stored as adjacency lists.
///
/// Edges are kept in insertion order, and each vertex lists its neighbours
/// in the order the edges were added.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct AdjacencyGraph {
    order: usize,
    capacity: usize,
    edges: Vec<(usize, usize)>,
    adjacency: Vec<Vec<usize>>,
    pub(crate) colors: Vec<Option<usize>>,
    pub(crate) minor: MinorType,
}

impl AdjacencyGraph {
    /// Creates an edgeless graph on `order` vertices with the default edge
    /// capacity.
    ///
    /// # Examples
    /// ```
    /// use gauntlet_core::GraphHandle;
    /// use gauntlet_providers_adjacency::AdjacencyGraph;
    ///
    /// let graph = AdjacencyGraph::new(4);
    /// assert_eq!(graph.vertex_count(), 4);
    /// assert_eq!(graph.capacity(), 12);
    /// ```
    #[must_use]
    pub fn new(order: usize) -> Self {
        Self::with_capacity(order, order.saturating_mul(EDGE_CAPACITY_FACTOR))
    }

    /// Creates an edgeless graph on `order` vertices holding at most
    /// `capacity` edges.
    #[must_use]
    pub fn with_capacity(order: usize, capacity: usize) -> Self {
        Self {
            order,
            capacity,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); order],
            colors: vec![None; order],
            minor: MinorType::EMPTY,
        }
    }

    /// Largest number of edges the graph can hold.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Raises the edge capacity to at least `capacity`.
    pub fn reserve_edges(&mut self, capacity: usize) {
        self.capacity = self.capacity.max(capacity);
    }

    /// Adds the edge `{u, v}`.
    ///
    /// Returns `false` without changing the graph when the edge already
    /// exists.
    ///
    /// # Errors
    /// Rejects out-of-range vertices, self-loops, and edges beyond the
    /// capacity.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<bool, AdjacencyLibraryError> {
        for vertex in [u, v] {
            if vertex >= self.order {
                return Err(AdjacencyLibraryError::VertexOutOfRange {
                    vertex,
                    order: self.order,
                });
            }
        }
        if u == v {
            return Err(AdjacencyLibraryError::SelfLoop { vertex: u });
        }
        if self.has_edge(u, v) {
            return Ok(false);
        }
        if self.edges.len() >= self.capacity {
            return Err(AdjacencyLibraryError::EdgeCapacity {
                order: self.order,
                requested: self.edges.len() + 1,
                capacity: self.capacity,
            });
        }
        self.edges.push((u, v));
        if let Some(list) = self.adjacency.get_mut(u) {
            list.push(v);
        }
        if let Some(list) = self.adjacency.get_mut(v) {
            list.push(u);
        }
        Ok(true)
    }

    /// Returns `true` when `{u, v}` is an edge.
    #[must_use]
    pub fn has_edge(&self, u: usize, v: usize) -> bool {
        self.adjacency
            .get(u)
            .is_some_and(|neighbours| neighbours.contains(&v))
    }

    /// Neighbours of `vertex` in insertion order.
    #[must_use]
    pub fn neighbours(&self, vertex: usize) -> &[usize] {
        self.adjacency.get(vertex).map(Vec::as_slice).unwrap_or_default()
    }

    /// Number of neighbours of `vertex`.
    #[must_use]
    pub fn degree(&self, vertex: usize) -> usize {
        self.neighbours(vertex).len()
    }

    /// Colour assigned to `vertex` by the last colouring.
    #[must_use]
    pub fn color(&self, vertex: usize) -> Option<usize> {
        self.colors.get(vertex).copied().flatten()
    }

    /// Removes every edge and all algorithm state.
    pub fn clear(&mut self) {
        self.edges.clear();
        self.adjacency.iter_mut().for_each(Vec::clear);
        self.colors.iter_mut().for_each(|color| *color = None);
        self.minor = MinorType::EMPTY;
    }

    pub(crate) fn edge_list(&self) -> &[(usize, usize)] {
        &self.edges
    }
}

impl GraphHandle for AdjacencyGraph {
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
