use std::{io, path::PathBuf};

use gauntlet_core::LibraryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AdjacencyLibraryError {
    #[error("i/o error on `{path}`: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("`{path}` line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },
    #[error("vertex {vertex} is out of range for a graph of order {order}")]
    VertexOutOfRange { vertex: usize, order: usize },
    #[error("self-loop on vertex {vertex}")]
    SelfLoop { vertex: usize },
    #[error("graph of order {order} cannot hold {requested} edges (capacity {capacity})")]
    EdgeCapacity {
        order: usize,
        requested: usize,
        capacity: usize,
    },
    #[error("vertex {vertex} is uncoloured")]
    Uncolored { vertex: usize },
    #[error("edge ({u}, {v}) joins two vertices of colour {color}")]
    ColorConflict { u: usize, v: usize, color: usize },
    #[error("coloured graph differs from the original: {reason}")]
    Diverged { reason: &'static str },
}

impl From<AdjacencyLibraryError> for LibraryError {
    fn from(error: AdjacencyLibraryError) -> Self {
        match error {
            AdjacencyLibraryError::Io { path, source } => Self::Io {
                path,
                message: source.to_string(),
            },
            AdjacencyLibraryError::Parse { path, line, reason } => {
                Self::Malformed { path, line, reason }
            }
            AdjacencyLibraryError::EdgeCapacity {
                requested,
                capacity,
                ..
            } => Self::CapacityExceeded {
                requested,
                capacity,
            },
            other => Self::InvalidGraph {
                reason: other.to_string(),
            },
        }
    }
}
