//! Error types for the gauntlet core library.
//!
//! Defines the errors raised by the harness itself, the errors a
//! [`crate::GraphLibrary`] reports back, and a convenient result alias.

use std::{fmt, io, path::PathBuf};

use thiserror::Error;

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error reported by a [`crate::GraphLibrary`] implementation.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum LibraryError {
    /// The library does not implement the requested operation.
    #[error("operation `{operation}` is not supported by this graph library")]
    Unsupported {
        /// Name of the operation that was requested.
        operation: &'static str,
    },
    /// Reading or writing a graph file failed.
    #[error("i/o failure on `{path}`: {message}")]
    Io {
        /// File that triggered the failure.
        path: PathBuf,
        /// Rendered operating system error.
        message: String,
    },
    /// A graph file could not be parsed.
    #[error("`{path}` is malformed at line {line}: {reason}")]
    Malformed {
        /// File being parsed.
        path: PathBuf,
        /// One-based line number of the offending content.
        line: usize,
        /// Description of the parse failure.
        reason: String,
    },
    /// The graph violates a structural precondition of the operation.
    #[error("invalid graph: {reason}")]
    InvalidGraph {
        /// Description of the violated precondition.
        reason: String,
    },
    /// The graph could not hold the requested number of vertices or edges.
    #[error("requested {requested} but capacity is {capacity}")]
    CapacityExceeded {
        /// Amount that was requested.
        requested: usize,
        /// Amount the graph can hold.
        capacity: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`LibraryError`] variants.
    enum LibraryErrorCode for LibraryError {
        /// The library does not implement the requested operation.
        Unsupported => Unsupported { .. } => "LIBRARY_UNSUPPORTED",
        /// Reading or writing a graph file failed.
        Io => Io { .. } => "LIBRARY_IO",
        /// A graph file could not be parsed.
        Malformed => Malformed { .. } => "LIBRARY_MALFORMED",
        /// The graph violates a structural precondition of the operation.
        InvalidGraph => InvalidGraph { .. } => "LIBRARY_INVALID_GRAPH",
        /// The graph could not hold the requested number of vertices or edges.
        CapacityExceeded => CapacityExceeded { .. } => "LIBRARY_CAPACITY_EXCEEDED",
    }
}

/// Error type produced when configuring or running a [`crate::Harness`].
///
/// Trial failures are not errors: they surface as
/// [`crate::TrialOutcome::Fatal`] inside the returned reports. These variants
/// cover the cases where the harness cannot run at all.
#[non_exhaustive]
#[derive(Debug, Error)]
pub enum HarnessError {
    /// An input filename exceeded the supported length.
    #[error("filename is too long ({length} characters, maximum {max})")]
    NameTooLong {
        /// Length of the rejected name in characters.
        length: usize,
        /// Maximum supported length.
        max: usize,
    },
    /// A sample directory requested by the configuration does not exist.
    #[error("sample directory `{path}` does not exist")]
    MissingSampleDirectory {
        /// Directory that must be created before the run.
        path: PathBuf,
    },
    /// Reading an answer from the prompter failed.
    #[error("failed to read answer to `{prompt}`: {source}")]
    Prompt {
        /// Prompt that was being answered.
        prompt: String,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// Writing to the console failed.
    #[error("failed to write console output: {source}")]
    Console {
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The graph library failed outside of a trial.
    #[error("graph library failed during `{operation}`: {source}")]
    Library {
        /// Harness step that invoked the library.
        operation: &'static str,
        /// Error reported by the library.
        #[source]
        source: LibraryError,
    },
    /// Reading or writing an edge-list file failed.
    #[error("edge list `{path}` could not be accessed: {source}")]
    EdgeListIo {
        /// Edge-list file.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// An edge-list file did not follow the `u v` pair format.
    #[error("edge list `{path}` is malformed at line {line}: {reason}")]
    EdgeListFormat {
        /// Edge-list file.
        path: PathBuf,
        /// One-based line number of the offending content.
        line: usize,
        /// Description of the parse failure.
        reason: String,
    },
}

define_error_codes! {
    /// Stable codes describing [`HarnessError`] variants.
    enum HarnessErrorCode for HarnessError {
        /// An input filename exceeded the supported length.
        NameTooLong => NameTooLong { .. } => "HARNESS_NAME_TOO_LONG",
        /// A sample directory requested by the configuration does not exist.
        MissingSampleDirectory => MissingSampleDirectory { .. } => "HARNESS_MISSING_SAMPLE_DIRECTORY",
        /// Reading an answer from the prompter failed.
        Prompt => Prompt { .. } => "HARNESS_PROMPT",
        /// Writing to the console failed.
        Console => Console { .. } => "HARNESS_CONSOLE",
        /// The graph library failed outside of a trial.
        Library => Library { .. } => "HARNESS_LIBRARY",
        /// Reading or writing an edge-list file failed.
        EdgeListIo => EdgeListIo { .. } => "HARNESS_EDGE_LIST_IO",
        /// An edge-list file did not follow the `u v` pair format.
        EdgeListFormat => EdgeListFormat { .. } => "HARNESS_EDGE_LIST_FORMAT",
    }
}

impl HarnessError {
    /// Retrieve the inner [`LibraryErrorCode`] when the error originated in a
    /// [`crate::GraphLibrary`].
    pub const fn library_code(&self) -> Option<LibraryErrorCode> {
        match self {
            Self::Library { source, .. } => Some(source.code()),
            _ => None,
        }
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, HarnessError>;
