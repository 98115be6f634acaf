//! Tests for stable error codes.

use std::{io, path::PathBuf};

use gauntlet_core::{HarnessError, HarnessErrorCode, LibraryError, LibraryErrorCode};
use rstest::rstest;

#[rstest]
#[case(HarnessError::NameTooLong { length: 200, max: 128 }, "HARNESS_NAME_TOO_LONG")]
#[case(
    HarnessError::MissingSampleDirectory { path: PathBuf::from("random") },
    "HARNESS_MISSING_SAMPLE_DIRECTORY"
)]
#[case(
    HarnessError::Prompt {
        prompt: "Enter size of graphs:".to_owned(),
        source: io::Error::from(io::ErrorKind::UnexpectedEof),
    },
    "HARNESS_PROMPT"
)]
#[case(
    HarnessError::EdgeListFormat { path: PathBuf::from("e.txt"), line: 2, reason: "bad".to_owned() },
    "HARNESS_EDGE_LIST_FORMAT"
)]
fn harness_errors_expose_stable_codes(#[case] error: HarnessError, #[case] code: &str) {
    assert_eq!(error.code().as_str(), code);
    assert_eq!(error.library_code(), None);
}

#[rstest]
fn library_failures_expose_the_inner_code() {
    let error = HarnessError::Library {
        operation: "make_graph",
        source: LibraryError::CapacityExceeded {
            requested: 40,
            capacity: 30,
        },
    };
    assert_eq!(error.code(), HarnessErrorCode::Library);
    assert_eq!(error.library_code(), Some(LibraryErrorCode::CapacityExceeded));
    assert_eq!(
        error.to_string(),
        "graph library failed during `make_graph`: requested 40 but capacity is 30"
    );
}

#[rstest]
#[case(LibraryError::Unsupported { operation: "embed" }, "LIBRARY_UNSUPPORTED")]
#[case(
    LibraryError::Malformed { path: PathBuf::from("g.txt"), line: 3, reason: "x".to_owned() },
    "LIBRARY_MALFORMED"
)]
#[case(LibraryError::InvalidGraph { reason: "loop".to_owned() }, "LIBRARY_INVALID_GRAPH")]
fn library_errors_expose_stable_codes(#[case] error: LibraryError, #[case] code: &str) {
    assert_eq!(error.code().to_string(), code);
}
