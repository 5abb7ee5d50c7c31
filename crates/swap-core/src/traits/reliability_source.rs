use rand::Rng;

use crate::types::HistoryEntry;

/// Everything a subject needs from a labeler's reliability model to apply
/// one verdict.
pub trait ReliabilitySource {
    /// Labeler identity.
    fn name(&self) -> &str;

    /// Current point estimate of P("LENS" | LENS).
    fn sensitivity(&self) -> f64;

    /// Current point estimate of P("NOT" | NOT).
    fn specificity(&self) -> f64;

    /// Number of classifications made while trained (`NT`).
    fn training_count(&self) -> u64;

    /// `count` plausible draws of PL. `count == 0` yields the point estimate
    /// as a single value.
    fn sample_sensitivity<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f64>;

    /// `count` plausible draws of PD. `count == 0` yields the point estimate
    /// as a single value.
    fn sample_specificity<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f64>;

    /// Current skill (bits).
    fn skill(&self) -> f64;

    /// Append a verdict on an unknown-truth subject to the labeler's audit log.
    fn record_test_observation(&mut self, entry: HistoryEntry);

    /// Credit the labeler with `bits` of information towards its
    /// cumulative contribution.
    fn add_contribution(&mut self, bits: f64);
}
