//! Vertex colouring and its independent check.

use std::{cmp::Reverse, collections::BinaryHeap};

use gauntlet_core::GraphHandle;

use crate::{errors::AdjacencyLibraryError, graph::AdjacencyGraph};

/// Greedy colouring in smallest-last order.
///
/// Vertices are peeled off by minimum remaining degree and coloured in the
/// reverse of that order, each with the lowest colour its coloured
/// neighbours leave free. Planar graphs never need more than six colours
/// this way.
pub(crate) fn color_smallest_last(graph: &mut AdjacencyGraph) {
    let order = graph.vertex_count();
    let mut degree: Vec<usize> = (0..order).map(|vertex| graph.degree(vertex)).collect();
    let mut removed = vec![false; order];
    let mut heap: BinaryHeap<_> = degree
        .iter()
        .enumerate()
        .map(|(vertex, &d)| Reverse((d, vertex)))
        .collect();
    let mut peeled = Vec::with_capacity(order);

    while let Some(Reverse((d, vertex))) = heap.pop() {
        let stale = removed.get(vertex).copied().unwrap_or(true)
            || degree.get(vertex).is_some_and(|&current| current != d);
        if stale {
            continue;
        }
        if let Some(flag) = removed.get_mut(vertex) {
            *flag = true;
        }
        peeled.push(vertex);
        for &neighbour in graph.neighbours(vertex) {
            if removed.get(neighbour).copied().unwrap_or(true) {
                continue;
            }
            if let Some(current) = degree.get_mut(neighbour) {
                *current = current.saturating_sub(1);
                heap.push(Reverse((*current, neighbour)));
            }
        }
    }

    let mut colors = vec![None; order];
    for &vertex in peeled.iter().rev() {
        let taken: Vec<usize> = graph
            .neighbours(vertex)
            .iter()
            .filter_map(|&neighbour| colors.get(neighbour).copied().flatten())
            .collect();
        let color = (0..).find(|candidate| !taken.contains(candidate)).unwrap_or(0);
        if let Some(slot) = colors.get_mut(vertex) {
            *slot = Some(color);
        }
    }
    graph.colors = colors;
}

/// Checks that `graph` is a proper colouring of `original`.
pub(crate) fn verify_coloring(
    graph: &AdjacencyGraph,
    original: &AdjacencyGraph,
) -> Result<(), AdjacencyLibraryError> {
    if graph.vertex_count() != original.vertex_count() {
        return Err(AdjacencyLibraryError::Diverged {
            reason: "vertex count changed",
        });
    }
    if graph.edge_count() != original.edge_count()
        || original
            .edge_list()
            .iter()
            .any(|&(u, v)| !graph.has_edge(u, v))
    {
        return Err(AdjacencyLibraryError::Diverged {
            reason: "edge set changed",
        });
    }
    for vertex in 0..graph.vertex_count() {
        if graph.color(vertex).is_none() {
            return Err(AdjacencyLibraryError::Uncolored { vertex });
        }
    }
    for &(u, v) in graph.edge_list() {
        if let (Some(a), Some(b)) = (graph.color(u), graph.color(v))
            && a == b
        {
            return Err(AdjacencyLibraryError::ColorConflict { u, v, color: a });
        }
    }
    Ok(())
}

/// Number of distinct colours in use.
pub(crate) fn colors_used(graph: &AdjacencyGraph) -> usize {
    let mut seen: Vec<usize> = (0..graph.vertex_count())
        .filter_map(|vertex| graph.color(vertex))
        .collect();
    seen.sort_unstable();
    seen.dedup();
    seen.len()
}
