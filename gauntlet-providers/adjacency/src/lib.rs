//! Adjacency-list graph library for the gauntlet harness.

mod color;
mod errors;
mod generate;
mod graph;
mod io;
mod library;

pub use errors::AdjacencyLibraryError;
pub use graph::{AdjacencyGraph, EDGE_CAPACITY_FACTOR};
pub use library::AdjacencyLibrary;
