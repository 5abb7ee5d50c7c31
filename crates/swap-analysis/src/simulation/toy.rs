//! A toy survey: a population of labelers with hidden confusion matrices
//! classifying a mix of sims, duds and test subjects.

use chrono::{DateTime, Duration, Utc};
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use swap_core::types::collections::FxHashSet;
use swap_core::types::timestamp::the_beginning;
use swap_core::{ClassificationRecord, SubjectKind, Verdict};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ToyConfig {
    pub population: usize,
    /// Mean number of classifications per labeler.
    pub enthusiasm: usize,
    pub sims: usize,
    pub duds: usize,
    pub tests: usize,
    /// Fraction of test subjects that truly contain a lens.
    pub lens_fraction: f64,
    /// Hidden PL and PD are drawn uniformly from `mean ± spread`.
    pub mean_reliability: f64,
    pub reliability_spread: f64,
    pub stage: String,
    pub start: DateTime<Utc>,
    pub seed: u64,
}

impl Default for ToyConfig {
    fn default() -> Self {
        Self {
            population: 50,
            enthusiasm: 40,
            sims: 40,
            duds: 40,
            tests: 200,
            lens_fraction: 0.05,
            mean_reliability: 0.8,
            reliability_spread: 0.15,
            stage: "1".to_string(),
            start: the_beginning(),
            seed: 42,
        }
    }
}

/// A labeler's hidden confusion matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToyLabeler {
    pub name: String,
    pub pl: f64,
    pub pd: f64,
}

#[derive(Debug, Clone)]
struct ToySubject {
    id: String,
    kind: SubjectKind,
    is_lens: bool,
}

/// A generated stream together with the ground truth behind it.
#[derive(Debug, Clone)]
pub struct ToyStream {
    /// In non-decreasing timestamp order.
    pub records: Vec<ClassificationRecord>,
    pub labelers: Vec<ToyLabeler>,
    /// Test subjects that truly contain a lens.
    pub lenses: FxHashSet<String>,
}

impl ToyStream {
    pub fn generate(config: &ToyConfig) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(config.seed);

        let lo = (config.mean_reliability - config.reliability_spread).clamp(0.01, 0.99);
        let hi = (config.mean_reliability + config.reliability_spread).clamp(lo, 0.99);
        let labelers: Vec<ToyLabeler> = (0..config.population)
            .map(|i| ToyLabeler {
                name: format!("toy-labeler-{i:04}"),
                pl: rng.gen_range(lo..=hi),
                pd: rng.gen_range(lo..=hi),
            })
            .collect();

        let mut subjects = Vec::with_capacity(config.sims + config.duds + config.tests);
        for i in 0..config.sims {
            subjects.push(ToySubject {
                id: format!("TOYS{i:06}"),
                kind: SubjectKind::Sim,
                is_lens: true,
            });
        }
        for i in 0..config.duds {
            subjects.push(ToySubject {
                id: format!("TOYD{i:06}"),
                kind: SubjectKind::Dud,
                is_lens: false,
            });
        }
        let lens_fraction = config.lens_fraction.clamp(0.0, 1.0);
        for i in 0..config.tests {
            subjects.push(ToySubject {
                id: format!("TOYT{i:06}"),
                kind: SubjectKind::Test,
                is_lens: rng.gen_bool(lens_fraction),
            });
        }
        let lenses = subjects
            .iter()
            .filter(|s| s.kind == SubjectKind::Test && s.is_lens)
            .map(|s| s.id.clone())
            .collect();

        let mut draws: Vec<(usize, usize)> = Vec::new();
        if !subjects.is_empty() {
            for (l, _) in labelers.iter().enumerate() {
                let count = rng.gen_range(1..=(2 * config.enthusiasm).max(1));
                for _ in 0..count {
                    draws.push((l, rng.gen_range(0..subjects.len())));
                }
            }
        }
        draws.shuffle(&mut rng);

        let records = draws
            .into_iter()
            .enumerate()
            .map(|(i, (l, s))| {
                let labeler = &labelers[l];
                let subject = &subjects[s];
                let said_lens = if subject.is_lens {
                    rng.gen_bool(labeler.pl)
                } else {
                    !rng.gen_bool(labeler.pd)
                };
                let said = if said_lens { Verdict::Lens } else { Verdict::Not };
                toy_record(config, labeler, subject, said, i)
            })
            .collect();

        Self {
            records,
            labelers,
            lenses,
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

fn toy_record(
    config: &ToyConfig,
    labeler: &ToyLabeler,
    subject: &ToySubject,
    said: Verdict,
    index: usize,
) -> ClassificationRecord {
    ClassificationRecord {
        timestamp: config.start + Duration::seconds(index as i64),
        labeler: labeler.name.clone(),
        subject_id: Some(subject.id.clone()),
        zoo_id: Some(format!("{}-zoo", subject.id)),
        category: subject.kind.category().to_string(),
        kind: subject.kind.to_string(),
        flavor: String::new(),
        result: said.to_string(),
        truth: subject.kind.truth().to_string(),
        location: None,
        stage: config.stage.clone(),
        at_x: Vec::new(),
        at_y: Vec::new(),
    }
}
