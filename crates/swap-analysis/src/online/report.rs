use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use swap_core::errors::RecordError;
use swap_core::types::timestamp::format_timestamp;

use crate::offline::OfflineSummary;

/// Outcome of one batch, including the non-fatal errors met along the way.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Lower time bound the batch was run with.
    pub window_start: DateTime<Utc>,
    /// Classifications handed to the engine.
    pub processed: u64,
    pub first_timestamp: Option<DateTime<Utc>>,
    pub last_timestamp: Option<DateTime<Utc>>,

    pub updated: u64,
    pub burn_in: u64,
    pub dropped: u64,
    pub retired: u64,

    pub skipped_stage: u64,
    pub skipped_missing_subject: u64,
    pub skipped_before_start: u64,
    pub skipped_invalid: u64,

    /// Records that failed to normalize.
    #[serde(skip)]
    pub errors: Vec<RecordError>,
    /// The batch stopped at its record limit, so the stream may hold more.
    pub more_to_do: bool,
    pub offline: Option<OfflineSummary>,
}

impl BatchReport {
    pub fn new(window_start: DateTime<Utc>) -> Self {
        Self {
            window_start,
            processed: 0,
            first_timestamp: None,
            last_timestamp: None,
            updated: 0,
            burn_in: 0,
            dropped: 0,
            retired: 0,
            skipped_stage: 0,
            skipped_missing_subject: 0,
            skipped_before_start: 0,
            skipped_invalid: 0,
            errors: Vec::new(),
            more_to_do: false,
            offline: None,
        }
    }

    pub fn add_error(&mut self, error: RecordError) {
        self.skipped_invalid += 1;
        self.errors.push(error);
    }

    pub(crate) fn mark_processed(&mut self, at: DateTime<Utc>) {
        self.processed += 1;
        if self.first_timestamp.is_none() {
            self.first_timestamp = Some(at);
        }
        self.last_timestamp = Some(at);
    }

    /// Returns true if no record failed to normalize.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }

    /// Lower bound for the next batch: the last timestamp reached, or this
    /// batch's own start if nothing was processed.
    pub fn next_start(&self) -> DateTime<Utc> {
        self.last_timestamp.unwrap_or(self.window_start)
    }

    /// [`Self::next_start`] in the run config's timestamp format.
    pub fn next_start_string(&self) -> String {
        format_timestamp(&self.next_start())
    }
}
