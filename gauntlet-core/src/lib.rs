//! Gauntlet core library.
//!
//! Drives an external graph algorithms library through batches of random
//! graphs, single graph files and random maximal planar graphs, checks every
//! result with the library's own integrity checker, and classifies the
//! obstructions it reports.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod classify;
mod command;
mod console;
mod edge_list;
mod error;
mod filename;
mod harness;
mod library;
mod maximal;
mod orchestrator;
mod outcome;
mod pipeline;
mod prompt;
mod statistics;

pub use crate::{
    builder::{GraphStrategy, HarnessBuilder, HarnessConfig, SampleKind, SampleOutputs},
    classify::{Classification, MinorType, ObstructionCategory, classify},
    command::{Algorithm, Command, EmbedFlags},
    console::Console,
    edge_list::{read_edge_list, write_edge_list},
    error::{HarnessError, HarnessErrorCode, LibraryError, LibraryErrorCode, Result},
    filename::{
        ALGORITHM_NAME_MAX_LEN, FILENAME_MAX_LEN, SecondaryOutput, construct_input,
        construct_primary_output,
    },
    harness::{Harness, SAMPLE_MODULUS, sample_path, sample_slot},
    library::{EmbedResult, GraphFormat, GraphHandle, GraphLibrary, ReadOutcome},
    maximal::{
        EdgeListChoice, MAX_PLANAR_EDGE_LIST, MAXIMAL_VERTEX_RANGE, MaximalReport, MaximalRequest,
        NON_PLANAR_EDGE_LIST, target_edge_count,
    },
    orchestrator::{
        BatchReport, BatchStatus, COLOR_THRESHOLD, GRAPH_SIZE_RANGE, TRIAL_COUNT_RANGE,
        progress_interval,
    },
    outcome::{FatalReason, TrialOutcome},
    pipeline::{GraphReport, GraphRequest, PipelineStage},
    prompt::{NoPrompter, Prompter, ScriptedPrompter, resolve_count},
    statistics::Statistics,
};
