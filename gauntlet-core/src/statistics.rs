//! Batch statistics and the end-of-run summary.

use crate::{
    classify::{Classification, ObstructionCategory},
    command::{Command, EmbedFlags},
};

/// Counters accumulated by one batch run.
///
/// # Examples
/// ```
/// use gauntlet_core::{Command, MinorType, ObstructionCategory, Statistics, classify};
///
/// let mut stats = Statistics::default();
/// stats.record_processed();
/// stats.record_obstruction(classify(MinorType::C | MinorType::E1));
/// assert_eq!(stats.trials(), 2);
/// assert_eq!(stats.processed(), 1);
/// assert_eq!(stats.minor_count(ObstructionCategory::C), 1);
///
/// let outerplanar = stats.histogram(Command::Outerplanar);
/// assert!(outerplanar.iter().all(|(category, _)| *category != ObstructionCategory::C));
/// ```
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Statistics {
    trials: u64,
    processed: u64,
    minors: [u64; ObstructionCategory::COUNT],
}

impl Statistics {
    /// Records a completed trial whose result counts towards the mode's main
    /// statistic.
    pub fn record_processed(&mut self) {
        self.trials += 1;
        self.processed += 1;
    }

    /// Records a completed trial that does not count towards the main
    /// statistic and produced no classification.
    pub fn record_unprocessed(&mut self) {
        self.trials += 1;
    }

    /// Records a completed non-embeddable trial and its classification.
    pub fn record_obstruction(&mut self, classification: Classification) {
        self.trials += 1;
        for category in [classification.primary, classification.refined]
            .into_iter()
            .flatten()
        {
            if let Some(counter) = self.minors.get_mut(category.index()) {
                *counter += 1;
            }
        }
    }

    /// Number of trials that completed without a fatal outcome.
    #[must_use]
    pub const fn trials(&self) -> u64 {
        self.trials
    }

    /// Number of trials counted by the mode's main statistic: embedded
    /// graphs, graphs free of the searched-for homeomorph, or graphs colored
    /// with at most five colors.
    #[must_use]
    pub const fn processed(&self) -> u64 {
        self.processed
    }

    /// Count recorded for one obstruction bucket.
    #[must_use]
    pub fn minor_count(&self, category: ObstructionCategory) -> u64 {
        self.minors.get(category.index()).copied().unwrap_or(0)
    }

    /// Histogram rows reported for `command`.
    ///
    /// Planar runs report A..E and the E1..E4 refinements; outerplanar runs
    /// report A, B and E only, because C and D cannot occur there. Other
    /// commands do not classify obstructions and report nothing.
    #[must_use]
    pub fn histogram(&self, command: Command) -> Vec<(ObstructionCategory, u64)> {
        let flags = command.algorithm().flags();
        if !flags.classifies_minors() {
            return Vec::new();
        }

        let primary = ObstructionCategory::PRIMARY
            .into_iter()
            .filter(|category| {
                flags != EmbedFlags::OUTERPLANAR
                    || !matches!(category, ObstructionCategory::C | ObstructionCategory::D)
            });
        let refined = ObstructionCategory::REFINED
            .into_iter()
            .filter(|_| flags == EmbedFlags::PLANAR);

        primary
            .chain(refined)
            .map(|category| (category, self.minor_count(category)))
            .collect()
    }

    /// Mode-specific summary lines printed at the end of a batch.
    #[must_use]
    pub fn summary_lines(&self, command: Command) -> Vec<String> {
        let processed = self.processed;
        match command {
            Command::PlanarEmbed | Command::Outerplanar => {
                let mut lines = vec![format!("Num Embedded={processed}.")];
                let histogram = self.histogram(command);
                let (primary, refined): (Vec<_>, Vec<_>) = histogram
                    .into_iter()
                    .partition(|(category, _)| ObstructionCategory::PRIMARY.contains(category));
                lines.extend(
                    primary
                        .into_iter()
                        .map(|(category, count)| format!("Minor {category} = {count}")),
                );
                if !refined.is_empty() {
                    lines.push(String::new());
                    lines.push(
                        "Note: E1 are added to C, E2 are added to A, and E=E3+E4+K5 homeomorphs."
                            .to_owned(),
                    );
                    lines.extend(
                        refined
                            .into_iter()
                            .map(|(category, count)| format!("Minor {category} = {count}")),
                    );
                }
                lines
            }
            Command::DrawPlanar => vec![format!("Num Graphs Embedded and Drawn={processed}.")],
            Command::SearchK23 => vec![homeomorph_line(processed, "K_{2,3}")],
            Command::SearchK33 => vec![homeomorph_line(processed, "K_{3,3}")],
            Command::SearchK4 => vec![homeomorph_line(processed, "K_4")],
            Command::ColorVertices => {
                vec![format!("Num Graphs colored with 5 or fewer colors={processed}.")]
            }
        }
    }
}

fn homeomorph_line(count: u64, target: &str) -> String {
    format!("Of the generated graphs, {count} did not contain a {target} homeomorph as a subgraph.")
}
