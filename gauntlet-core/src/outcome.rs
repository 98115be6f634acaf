//! Trial outcomes.

use thiserror::Error;

use crate::{
    classify::MinorType,
    command::Command,
    error::LibraryError,
    library::EmbedResult,
};

/// Why a trial could not produce a trustworthy result.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum FatalReason {
    /// The input graph could not be read.
    #[error("failed to read graph: {source}")]
    ReadFailed {
        /// Error reported by the library.
        #[source]
        source: LibraryError,
    },
    /// The input graph has more edges than the command can tolerate.
    #[error("the graph contains too many edges for {command}")]
    TooManyEdges {
        /// Command that cannot run on a truncated graph.
        command: Command,
    },
    /// The independent integrity check disagreed with the algorithm.
    #[error("integrity check for {algorithm} disagreed with the claimed result")]
    IntegrityMismatch {
        /// Display name of the algorithm whose claim was rejected.
        algorithm: &'static str,
        /// Verdict the algorithm claimed, for embedding-family commands.
        claimed: Option<EmbedResult>,
        /// Verdict the checker supported, when it produced one.
        confirmed: Option<EmbedResult>,
    },
    /// The library failed while running a trial step.
    #[error("graph library failed during `{operation}`: {source}")]
    Library {
        /// Trial step that invoked the library.
        operation: &'static str,
        /// Error reported by the library.
        #[source]
        source: LibraryError,
    },
}

/// Outcome of processing one graph.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TrialOutcome {
    /// The graph was embedded, colored, or is free of the searched-for
    /// homeomorph, and the result was independently confirmed.
    Success,
    /// The graph is not embeddable (or contains the searched-for homeomorph),
    /// with the minor patterns the library recorded.
    NonEmbeddable(MinorType),
    /// The trial failed and the batch must stop.
    Fatal(FatalReason),
}

impl TrialOutcome {
    /// Returns `true` for the two expected outcomes.
    #[must_use]
    pub const fn is_expected(&self) -> bool {
        !matches!(self, Self::Fatal(_))
    }

    /// Returns the fatal reason, if any.
    #[must_use]
    pub const fn fatal_reason(&self) -> Option<&FatalReason> {
        match self {
            Self::Fatal(reason) => Some(reason),
            _ => None,
        }
    }
}
