//! The online update engine.
//!
//! For every record: resolve the agent and subject, register the sighting,
//! let the subject incorporate the verdict, then let the agent learn from
//! the subject's updated mean probability.

use chrono::{DateTime, Utc};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use swap_core::config::BatchConfig;
use swap_core::errors::{RecordError, RefinerError};
use swap_core::types::timestamp::{parse_lower_bound, parse_upper_bound};
use swap_core::{Classification, ClassificationRecord, SwapConfig, SwapResult};

use super::policy::LearningPolicy;
use super::report::BatchReport;
use crate::agent::Observation;
use crate::offline::{apply_refinement, EmRefiner, OfflineLedger, OfflineSummary};
use crate::registry::{Bureau, Collection};
use crate::subject::{Description, Incorporation};

/// Which part of the stream one batch consumes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchWindow {
    pub stage: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub max_per_batch: u64,
}

impl BatchWindow {
    pub fn from_config(config: &BatchConfig) -> Result<Self, RecordError> {
        Ok(Self {
            stage: config.stage.clone(),
            start: parse_lower_bound(&config.start)?,
            end: parse_upper_bound(&config.end)?,
            max_per_batch: config.max_per_batch,
        })
    }
}

/// Sequential online estimator over the agent and subject registries.
pub struct OnlineEngine {
    config: SwapConfig,
    policy: LearningPolicy,
    rng: ChaCha8Rng,
    bureau: Bureau,
    collection: Collection,
    ledger: Option<OfflineLedger>,
}

impl OnlineEngine {
    /// Empty registries, random source seeded from the config.
    pub fn new(config: SwapConfig) -> SwapResult<Self> {
        let rng = ChaCha8Rng::seed_from_u64(config.random.seed);
        Self::with_state(config, Bureau::new(), Collection::new(), rng)
    }

    /// Resume from persisted registries and random source.
    pub fn with_state(
        config: SwapConfig,
        bureau: Bureau,
        collection: Collection,
        rng: ChaCha8Rng,
    ) -> SwapResult<Self> {
        SwapConfig::validate(&config)?;
        let policy = LearningPolicy::from_config(&config.learning);
        Ok(Self {
            config,
            policy,
            rng,
            bureau,
            collection,
            ledger: None,
        })
    }

    /// Apply one classification.
    pub fn apply(&mut self, c: &Classification) -> Incorporation {
        let _span = swap_core::update_span!(c.labeler, c.subject_id).entered();

        let agent = self.bureau.get_or_create(&c.labeler, &self.config.agent);
        agent.register_sighting();

        let subject = self.collection.get_or_create(c, &self.config);
        let description = Description {
            said: c.said,
            at: c.timestamp,
            ignore_window: self.policy.ignore_window,
            hasty: self.policy.hasty,
            at_x: c.at_x.clone(),
            at_y: c.at_y.clone(),
        };
        let outcome = subject.incorporate(agent, &description, &mut self.rng);

        let observation = Observation {
            subject_id: &c.subject_id,
            said: c.said,
            truth: c.truth,
            posterior: subject.mean_probability,
            at: c.timestamp,
        };
        agent.record_outcome(&observation, !self.policy.may_learn(c.category));

        if let Some(ledger) = self.ledger.as_mut() {
            ledger.record(c, self.policy.mode);
        }

        tracing::debug!(
            said = %c.said,
            probability = subject.mean_probability,
            pl = agent.pl,
            pd = agent.pd,
            ?outcome,
            "classification applied"
        );
        outcome
    }

    /// Consume records until the stream ends, a record lies past the window
    /// end, or `max_per_batch` records have been processed.
    ///
    /// Records from another stage, before the window start, or without a
    /// subject are skipped and counted. Records that fail to normalize are
    /// skipped and kept in the report.
    pub fn run_batch<I>(&mut self, records: I, window: &BatchWindow) -> BatchReport
    where
        I: IntoIterator<Item = ClassificationRecord>,
    {
        let _span = swap_core::online_batch_span!(window.stage, window.max_per_batch).entered();
        let mut report = BatchReport::new(window.start);

        if self.config.offline.enabled {
            self.ledger = Some(OfflineLedger::new(&self.config.offline));
        }

        for record in records {
            if record.stage != window.stage {
                report.skipped_stage += 1;
                continue;
            }
            if record.timestamp < window.start {
                report.skipped_before_start += 1;
                continue;
            }
            if record.timestamp > window.end {
                tracing::debug!(at = %record.timestamp, "reached end of batch window");
                break;
            }

            let classification = match record.normalize() {
                Ok(Some(c)) => c,
                Ok(None) => {
                    report.skipped_missing_subject += 1;
                    continue;
                }
                Err(e) => {
                    tracing::warn!(labeler = %record.labeler, error = %e, "skipping invalid record");
                    report.add_error(e);
                    continue;
                }
            };

            match self.apply(&classification) {
                Incorporation::Dropped => report.dropped += 1,
                Incorporation::BurnIn => report.burn_in += 1,
                Incorporation::Updated { retired } => {
                    report.updated += 1;
                    if retired {
                        report.retired += 1;
                    }
                }
            }
            report.mark_processed(classification.timestamp);

            if report.processed >= window.max_per_batch {
                report.more_to_do = true;
                break;
            }
        }

        if report.processed == 0 {
            tracing::warn!("no classifications processed in this batch");
        }
        tracing::info!(
            processed = report.processed,
            updated = report.updated,
            retired = report.retired,
            errors = report.error_count(),
            more_to_do = report.more_to_do,
            "online batch complete"
        );
        report
    }

    /// Run the online batch described by the config, then the offline pass
    /// if it is enabled.
    pub fn run<I>(&mut self, records: I) -> SwapResult<BatchReport>
    where
        I: IntoIterator<Item = ClassificationRecord>,
    {
        let window = BatchWindow::from_config(&self.config.batch)?;
        let mut report = self.run_batch(records, &window);
        if self.config.offline.enabled && report.processed > 0 {
            report.offline = self.refine_offline(report.next_start())?;
        }
        Ok(report)
    }

    /// Run EM over the ledger collected by the last batch and write the
    /// result back into the registries. `None` when no ledger was kept.
    pub fn refine_offline(
        &mut self,
        at: DateTime<Utc>,
    ) -> Result<Option<OfflineSummary>, RefinerError> {
        let Some(ledger) = self.ledger.take() else {
            return Ok(None);
        };
        let _span =
            swap_core::offline_span!(ledger.agent_count(), ledger.subject_count()).entered();

        let refiner = EmRefiner::from_config(&self.config);
        let outcome = refiner.refine(&ledger)?;
        let summary = apply_refinement(&outcome, &mut self.bureau, &mut self.collection, at);
        tracing::info!(
            iterations = summary.iterations.len(),
            converged = summary.converged,
            prior = summary.prior,
            "offline refinement complete"
        );
        Ok(Some(summary))
    }

    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    pub fn policy(&self) -> &LearningPolicy {
        &self.policy
    }

    pub fn bureau(&self) -> &Bureau {
        &self.bureau
    }

    pub fn collection(&self) -> &Collection {
        &self.collection
    }

    pub fn ledger(&self) -> Option<&OfflineLedger> {
        self.ledger.as_ref()
    }

    pub fn rng_mut(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Hand the registries and random source back for persistence.
    pub fn into_parts(self) -> (Bureau, Collection, ChaCha8Rng) {
        (self.bureau, self.collection, self.rng)
    }
}
