//! Command-line interface for the gauntlet harness.
//!
//! Three modes are offered: `random` runs an algorithm over a batch of random
//! graphs, `specific` runs it over one graph file, and `maximal` runs it over
//! a random maximal planar graph with optional extra edges.

mod commands;

pub use commands::{
    Cli, CliError, EdgeListArg, ExecutionSummary, LinePrompter, MaximalArgs, Mode, RandomArgs,
    SpecificArgs, run_cli,
};
