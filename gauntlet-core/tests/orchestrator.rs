//! Tests for batch runs over random graphs.

mod common;

use std::fs;

use common::{ScriptedLibrary, Verdict, sample_dirs};
use gauntlet_core::{
    BatchStatus, Command, FatalReason, GraphStrategy, HarnessBuilder, HarnessError, MinorType,
    ObstructionCategory, SampleOutputs, ScriptedPrompter, Statistics,
};
use gauntlet_test_support::{
    ci::property_test_profile::ProptestRunProfile, tracing::RecordingLayer,
};
use proptest::prelude::*;
use rstest::rstest;
use tempfile::TempDir;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;

fn temp_dir() -> TempDir {
    TempDir::new().expect("temp dir must be created")
}

fn console_text(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

#[rstest]
fn first_fatal_trial_aborts_the_batch() {
    let library = ScriptedLibrary::with_verdicts([
        Verdict::Embeddable,
        Verdict::NonEmbeddable(MinorType::A),
        Verdict::Fabricated,
        Verdict::Embeddable,
    ]);
    let mut harness = HarnessBuilder::new()
        .with_quiet(true)
        .build(library, Vec::new())
        .expect("default configuration is valid");

    let report = harness
        .run_random_graphs(Command::PlanarEmbed, 4, 10)
        .expect("batch runs");

    assert!(!report.is_success());
    assert!(matches!(
        report.status,
        BatchStatus::Aborted {
            trial: 2,
            reason: FatalReason::IntegrityMismatch { .. }
        }
    ));
    assert_eq!(report.statistics.trials(), 2);
    assert_eq!(report.statistics.processed(), 1);
    assert_eq!(report.statistics.minor_count(ObstructionCategory::A), 1);

    let (_, console) = harness.into_parts();
    assert_eq!(console_text(&console), "3\n");
}

#[rstest]
fn non_embeddable_trials_do_not_abort() {
    let library = ScriptedLibrary::with_verdicts([
        Verdict::NonEmbeddable(MinorType::A | MinorType::B),
        Verdict::NonEmbeddable(MinorType::E | MinorType::E3),
        Verdict::Embeddable,
    ]);
    let mut harness = HarnessBuilder::new()
        .build(library, Vec::new())
        .expect("default configuration is valid");

    let report = harness
        .run_random_graphs(Command::PlanarEmbed, 3, 10)
        .expect("batch runs");

    assert!(report.is_success());
    let stats = &report.statistics;
    assert_eq!(stats.trials(), 3);
    assert_eq!(stats.processed(), 1);
    assert_eq!(stats.minor_count(ObstructionCategory::A), 1);
    assert_eq!(stats.minor_count(ObstructionCategory::B), 0);
    assert_eq!(stats.minor_count(ObstructionCategory::E), 1);
    assert_eq!(stats.minor_count(ObstructionCategory::E3), 1);

    let (_, console) = harness.into_parts();
    let text = console_text(&console);
    assert!(text.starts_with("0\r"));
    assert!(text.contains("No Errors Found."));
    assert!(text.contains("Num Embedded=1."));
    assert!(text.contains("Minor A = 1"));
    assert!(text.contains("Minor E3 = 1"));
}

#[rstest]
fn outerplanar_summary_omits_c_and_d() {
    let library = ScriptedLibrary::with_verdicts([Verdict::NonEmbeddable(MinorType::C)]);
    let mut harness = HarnessBuilder::new()
        .build(library, Vec::new())
        .expect("default configuration is valid");

    harness
        .run_random_graphs(Command::Outerplanar, 1, 6)
        .expect("batch runs");

    let (_, console) = harness.into_parts();
    let text = console_text(&console);
    assert!(text.contains("Minor A = 0"));
    assert!(text.contains("Minor E = 0"));
    assert!(!text.contains("Minor C"));
    assert!(!text.contains("Minor D"));
    assert!(!text.contains("Note:"));
}

#[rstest]
#[case::within_threshold(Verdict::Colored(5), 1)]
#[case::above_threshold(Verdict::Colored(6), 0)]
fn coloring_counts_only_five_or_fewer_colors(#[case] verdict: Verdict, #[case] processed: u64) {
    let library = ScriptedLibrary::with_verdicts([verdict]);
    let mut harness = HarnessBuilder::new()
        .with_quiet(true)
        .build(library, Vec::new())
        .expect("default configuration is valid");

    let report = harness
        .run_random_graphs(Command::ColorVertices, 1, 12)
        .expect("batch runs");

    assert!(report.is_success());
    assert_eq!(report.statistics.trials(), 1);
    assert_eq!(report.statistics.processed(), processed);
}

#[rstest]
fn rejected_coloring_is_fatal() {
    let library = ScriptedLibrary::with_verdicts([Verdict::Colored(3), Verdict::Miscolored]);
    let mut harness = HarnessBuilder::new()
        .with_quiet(true)
        .build(library, Vec::new())
        .expect("default configuration is valid");

    let report = harness
        .run_random_graphs(Command::ColorVertices, 5, 12)
        .expect("batch runs");

    assert!(matches!(report.status, BatchStatus::Aborted { trial: 1, .. }));
    assert_eq!(report.statistics.trials(), 1);
}

#[rstest]
fn homeomorph_search_counts_clean_graphs() {
    let library = ScriptedLibrary::with_verdicts([
        Verdict::Embeddable,
        Verdict::NonEmbeddable(MinorType::EMPTY),
        Verdict::Embeddable,
    ]);
    let mut harness = HarnessBuilder::new()
        .build(library, Vec::new())
        .expect("default configuration is valid");

    let report = harness
        .run_random_graphs(Command::SearchK33, 3, 8)
        .expect("batch runs");

    assert_eq!(report.statistics.processed(), 2);
    assert_eq!(report.statistics.trials(), 3);
    assert!(
        ObstructionCategory::ALL
            .iter()
            .all(|category| report.statistics.minor_count(*category) == 0)
    );
    let (_, console) = harness.into_parts();
    assert!(console_text(&console).contains(
        "Of the generated graphs, 2 did not contain a K_{3,3} homeomorph as a subgraph."
    ));
}

#[rstest]
fn samples_rotate_through_ten_slots() {
    let dir = temp_dir();
    let root = sample_dirs(dir.path(), &["random", "obstructed", "embedded"]);
    let library = ScriptedLibrary::with_verdicts(
        std::iter::repeat_n(Verdict::NonEmbeddable(MinorType::B), 13),
    );
    let mut harness = HarnessBuilder::new()
        .with_quiet(true)
        .with_output_root(&root)
        .with_samples(SampleOutputs {
            original: true,
            embedded: true,
            obstructed: true,
            adjacency_lists: false,
        })
        .build(library, Vec::new())
        .expect("sample directories exist");

    harness
        .run_random_graphs(Command::PlanarEmbed, 13, 9)
        .expect("batch runs");

    let count = |name: &str| {
        fs::read_dir(root.join(name))
            .expect("directory exists")
            .count()
    };
    assert_eq!(count("random"), 10);
    assert_eq!(count("obstructed"), 10);
    assert_eq!(count("embedded"), 0);
    assert!(root.join("random").join("3.txt").is_file());
}

#[rstest]
#[case::k23(Command::SearchK23)]
#[case::k33(Command::SearchK33)]
#[case::k4(Command::SearchK4)]
fn homeomorph_searches_leave_obstructed_samples_empty(#[case] command: Command) {
    let dir = temp_dir();
    let root = sample_dirs(dir.path(), &["obstructed"]);
    let library = ScriptedLibrary::with_verdicts([
        Verdict::NonEmbeddable(MinorType::EMPTY),
        Verdict::NonEmbeddable(MinorType::EMPTY),
    ]);
    let mut harness = HarnessBuilder::new()
        .with_quiet(true)
        .with_output_root(&root)
        .with_samples(SampleOutputs {
            obstructed: true,
            ..SampleOutputs::default()
        })
        .build(library, Vec::new())
        .expect("sample directory exists");

    let report = harness
        .run_random_graphs(command, 2, 6)
        .expect("batch runs");

    assert!(report.is_success());
    let written = fs::read_dir(root.join("obstructed"))
        .expect("directory exists")
        .count();
    assert_eq!(written, 0);
}

#[rstest]
fn fatal_trial_dumps_the_original_graph() {
    let dir = temp_dir();
    let root = sample_dirs(dir.path(), &["error"]);
    let library = ScriptedLibrary::with_verdicts([
        Verdict::Embeddable,
        Verdict::Embeddable,
        Verdict::Fabricated,
    ]);
    let mut harness = HarnessBuilder::new()
        .with_quiet(true)
        .with_output_root(&root)
        .build(library, Vec::new())
        .expect("default configuration is valid");

    let report = harness
        .run_random_graphs(Command::PlanarEmbed, 10, 7)
        .expect("batch runs");

    assert!(matches!(report.status, BatchStatus::Aborted { trial: 2, .. }));
    let dumped = fs::read_to_string(root.join("error").join("2.txt")).expect("dump exists");
    assert!(dumped.starts_with("N=7"));
}

#[rstest]
fn missing_error_directory_only_warns() {
    let dir = temp_dir();
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let report = tracing::subscriber::with_default(subscriber, || {
        let library = ScriptedLibrary::with_verdicts([Verdict::Broken]);
        let mut harness = HarnessBuilder::new()
            .with_quiet(true)
            .with_output_root(dir.path())
            .build(library, Vec::new())
            .expect("default configuration is valid");
        harness
            .run_random_graphs(Command::PlanarEmbed, 3, 7)
            .expect("batch runs")
    });

    assert!(matches!(
        report.status,
        BatchStatus::Aborted {
            trial: 0,
            reason: FatalReason::Library {
                operation: "embed",
                ..
            }
        }
    ));
    assert_eq!(layer.count_events(Level::WARN), 1);
    assert_eq!(layer.count_events(Level::ERROR), 1);
    assert!(!dir.path().join("error").exists());
}

#[rstest]
fn requested_sample_directories_must_exist() {
    let dir = temp_dir();
    let Err(err) = HarnessBuilder::new()
        .with_output_root(dir.path())
        .with_samples(SampleOutputs {
            adjacency_lists: true,
            ..SampleOutputs::default()
        })
        .build(ScriptedLibrary::seeded(1), Vec::new())
    else {
        panic!("missing adjlist directory must be rejected");
    };
    assert!(matches!(
        err,
        HarnessError::MissingSampleDirectory { ref path } if path.ends_with("adjlist")
    ));
}

#[rstest]
fn zero_count_and_size_are_prompted() {
    let library = ScriptedLibrary::seeded(3);
    let mut harness = HarnessBuilder::new()
        .with_quiet(true)
        .with_prompter(ScriptedPrompter::new(["4", "6"]))
        .build(library, Vec::new())
        .expect("default configuration is valid");

    let report = harness
        .run_random_graphs(Command::PlanarEmbed, 0, 0)
        .expect("prompted values are valid");

    assert_eq!(report.requested, 4);
    assert_eq!(report.size, 6);
    assert_eq!(report.statistics.trials(), 4);
}

#[rstest]
fn oversized_graphs_fall_back_to_the_midpoint() {
    let layer = RecordingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    let report = tracing::subscriber::with_default(subscriber, || {
        let mut harness = HarnessBuilder::new()
            .with_quiet(true)
            .build(ScriptedLibrary::seeded(5), Vec::new())
            .expect("default configuration is valid");
        harness
            .run_random_graphs(Command::SearchK4, 1, 20_000)
            .expect("batch runs")
    });

    assert_eq!(report.size, 5_000);
    assert_eq!(layer.count_events(Level::WARN), 1);
}

#[rstest]
#[case::reuse(GraphStrategy::Reuse, 1, 3)]
#[case::rebuild(GraphStrategy::Rebuild, 4, 0)]
fn strategy_controls_graph_preparation(
    #[case] strategy: GraphStrategy,
    #[case] made: usize,
    #[case] reinitialized: usize,
) {
    let mut harness = HarnessBuilder::new()
        .with_quiet(true)
        .with_graph_strategy(strategy)
        .build(ScriptedLibrary::seeded(11), Vec::new())
        .expect("default configuration is valid");

    harness
        .run_random_graphs(Command::PlanarEmbed, 3, 10)
        .expect("batch runs");

    let (library, _) = harness.into_parts();
    assert_eq!(library.made, made);
    assert_eq!(library.reinitialized, reinitialized);
}

fn batch_statistics(strategy: GraphStrategy, command: Command, seed: u64, size: u64) -> Statistics {
    let mut harness = HarnessBuilder::new()
        .with_quiet(true)
        .with_graph_strategy(strategy)
        .build(ScriptedLibrary::seeded(seed), Vec::new())
        .expect("default configuration is valid");
    harness
        .run_random_graphs(command, 25, size)
        .expect("batch runs")
        .statistics
}

fn reuse_profile() -> ProptestConfig {
    let profile = ProptestRunProfile::load(32, false);
    ProptestConfig {
        cases: profile.cases(),
        fork: profile.fork(),
        ..ProptestConfig::default()
    }
}

proptest! {
    #![proptest_config(reuse_profile())]

    #[test]
    fn reuse_and_rebuild_agree(
        seed in any::<u64>(),
        size in 1_u64..40,
        command in prop::sample::select(Command::ALL.to_vec()),
    ) {
        let reused = batch_statistics(GraphStrategy::Reuse, command, seed, size);
        let rebuilt = batch_statistics(GraphStrategy::Rebuild, command, seed, size);
        prop_assert_eq!(reused, rebuilt);
    }
}
