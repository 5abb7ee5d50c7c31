//! Decision policy.
//!
//! Status follows the mean probability every time it is evaluated and is
//! not sticky. State is: only test subjects retire, only on rejection, and
//! a retired subject never comes back.

use chrono::{DateTime, Utc};

use swap_core::{SubjectState, SubjectStatus};

use super::Subject;

impl Subject {
    /// Re-evaluate status against the thresholds, retiring the subject if
    /// this is its first rejection. Returns true when the subject retired
    /// on this call.
    pub fn reevaluate(&mut self, at: DateTime<Utc>) -> bool {
        self.status = SubjectStatus::from_probability(
            self.mean_probability,
            self.rejection_threshold,
            self.detection_threshold,
        );

        if self.status == SubjectStatus::Rejected
            && !self.is_anchor()
            && self.state == SubjectState::Active
        {
            self.state = SubjectState::Inactive;
            self.retirement_time = Some(at);
            self.retirement_age = Some(self.exposure);
            return true;
        }
        false
    }
}
