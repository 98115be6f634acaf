//! Random graph generation.

use gauntlet_core::GraphHandle;
use rand::{Rng, seq::SliceRandom};

use crate::{errors::AdjacencyLibraryError, graph::AdjacencyGraph};

/// Most edges a simple graph on `order` vertices can have.
const fn complete_edges(order: usize) -> usize {
    order.saturating_mul(order.saturating_sub(1)) / 2
}

/// Fills `graph` with a random connected graph.
///
/// A random spanning tree comes first; random extra edges are then added
/// until the graph has a random edge count between `N - 1` and `3N - 6`.
pub(crate) fn random_graph<R: Rng>(
    graph: &mut AdjacencyGraph,
    rng: &mut R,
) -> Result<(), AdjacencyLibraryError> {
    graph.clear();
    let order = graph.vertex_count();
    if order < 2 {
        return Ok(());
    }

    let mut labels: Vec<usize> = (0..order).collect();
    labels.shuffle(rng);
    for (index, &vertex) in labels.iter().enumerate().skip(1) {
        let parent = labels.get(rng.gen_range(0..index)).copied().unwrap_or(vertex);
        graph.add_edge(parent, vertex)?;
    }

    let tree = order - 1;
    let ceiling = order
        .saturating_mul(3)
        .saturating_sub(6)
        .max(tree)
        .min(complete_edges(order))
        .min(graph.capacity());
    let target = rng.gen_range(tree..=ceiling);
    add_random_edges(graph, target, rng)
}

/// Fills `graph` with a random maximal planar graph and then adds random
/// edges until `target_edges` edges exist or the graph is complete.
///
/// The planar part grows from a triangle by placing each further vertex in a
/// random face and joining it to the face's three corners.
pub(crate) fn random_maximal_planar<R: Rng>(
    graph: &mut AdjacencyGraph,
    target_edges: usize,
    rng: &mut R,
) -> Result<(), AdjacencyLibraryError> {
    graph.clear();
    let order = graph.vertex_count();
    let target = target_edges.min(complete_edges(order));
    graph.reserve_edges(target.max(order.saturating_mul(3)));

    let mut labels: Vec<usize> = (0..order).collect();
    labels.shuffle(rng);
    let label = |index: usize| labels.get(index).copied().unwrap_or(index);

    match order {
        0 | 1 => {}
        2 => {
            graph.add_edge(label(0), label(1))?;
        }
        _ => {
            let (a, b, c) = (label(0), label(1), label(2));
            graph.add_edge(a, b)?;
            graph.add_edge(b, c)?;
            graph.add_edge(c, a)?;
            // Both sides of the first triangle are faces.
            let mut faces = vec![[a, b, c], [a, c, b]];
            for index in 3..order {
                let vertex = label(index);
                let chosen = rng.gen_range(0..faces.len());
                let [x, y, z] = faces.swap_remove(chosen);
                for corner in [x, y, z] {
                    graph.add_edge(vertex, corner)?;
                }
                faces.extend([[x, y, vertex], [y, z, vertex], [z, x, vertex]]);
            }
        }
    }

    add_random_edges(graph, target, rng)
}

fn add_random_edges<R: Rng>(
    graph: &mut AdjacencyGraph,
    target: usize,
    rng: &mut R,
) -> Result<(), AdjacencyLibraryError> {
    let order = graph.vertex_count();
    let target = target.min(complete_edges(order));
    while graph.edge_count() < target {
        let u = rng.gen_range(0..order);
        let v = rng.gen_range(0..order);
        if u != v {
            graph.add_edge(u, v)?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::collections::VecDeque;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    fn connected(graph: &AdjacencyGraph) -> bool {
        let order = graph.vertex_count();
        let mut seen = vec![false; order];
        let mut queue = VecDeque::from([0]);
        if let Some(first) = seen.first_mut() {
            *first = true;
        }
        while let Some(vertex) = queue.pop_front() {
            for &next in graph.neighbours(vertex) {
                if let Some(flag) = seen.get_mut(next) {
                    if !*flag {
                        *flag = true;
                        queue.push_back(next);
                    }
                }
            }
        }
        seen.into_iter().all(|flag| flag)
    }

    #[rstest]
    #[case(2)]
    #[case(7)]
    #[case(40)]
    fn random_graphs_are_connected_and_sparse(#[case] order: usize) {
        let mut rng = SmallRng::seed_from_u64(17);
        for _ in 0..20 {
            let mut graph = AdjacencyGraph::new(order);
            random_graph(&mut graph, &mut rng).expect("generation succeeds");
            assert!(connected(&graph));
            assert!(graph.edge_count() >= order - 1);
            assert!(graph.edge_count() <= (3 * order).saturating_sub(6).max(order - 1));
        }
    }

    #[rstest]
    #[case(3, 3)]
    #[case(4, 6)]
    #[case(25, 69)]
    fn maximal_planar_graphs_have_3n_minus_6_edges(#[case] order: usize, #[case] edges: usize) {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut graph = AdjacencyGraph::new(order);
        random_maximal_planar(&mut graph, edges, &mut rng).expect("generation succeeds");
        assert_eq!(graph.edge_count(), edges);
        assert!(connected(&graph));
        assert!((0..order).all(|vertex| graph.degree(vertex) >= 3.min(order - 1)));
    }

    #[rstest]
    fn extra_edges_exceed_the_default_capacity() {
        let mut rng = SmallRng::seed_from_u64(5);
        let mut graph = AdjacencyGraph::new(10);
        random_maximal_planar(&mut graph, 40, &mut rng).expect("generation succeeds");
        assert_eq!(graph.edge_count(), 40);
    }

    #[rstest]
    fn targets_beyond_the_complete_graph_stop_at_it() {
        let mut rng = SmallRng::seed_from_u64(9);
        let mut graph = AdjacencyGraph::new(5);
        random_maximal_planar(&mut graph, 100, &mut rng).expect("generation succeeds");
        assert_eq!(graph.edge_count(), 10);
    }

    #[rstest]
    fn same_seed_same_graph() {
        let generate = || {
            let mut rng = SmallRng::seed_from_u64(42);
            let mut graph = AdjacencyGraph::new(30);
            random_graph(&mut graph, &mut rng).expect("generation succeeds");
            graph.edges()
        };
        assert_eq!(generate(), generate());
    }
}
