//! Online Bayesian update of one subject by one verdict.

use chrono::{DateTime, Utc};
use rand::Rng;

use swap_core::{Annotation, HistoryEntry, ReliabilitySource, SubjectKind, Verdict};

use super::Subject;
use crate::information::{information_gain, posterior};

/// One verdict, as the subject receives it.
#[derive(Debug, Clone)]
pub struct Description {
    pub said: Verdict,
    pub at: DateTime<Utc>,
    /// Verdicts from labelers with `NT <= ignore_window` only add exposure.
    pub ignore_window: u64,
    /// Drop verdicts on subjects that are decided or retired.
    pub hasty: bool,
    pub at_x: Vec<f64>,
    pub at_y: Vec<f64>,
}

/// What happened to a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Incorporation {
    /// Hasty mode dropped it. Nothing changed.
    Dropped,
    /// The labeler is still in burn-in. Only exposure changed.
    BurnIn,
    /// The probability vector moved. `retired` is set when this verdict
    /// sent the subject inactive.
    Updated { retired: bool },
}

impl Subject {
    /// Apply one verdict from `agent`.
    pub fn incorporate<A, R>(
        &mut self,
        agent: &mut A,
        description: &Description,
        rng: &mut R,
    ) -> Incorporation
    where
        A: ReliabilitySource,
        R: Rng + ?Sized,
    {
        if description.hasty && (!self.is_active() || self.status.is_decided()) {
            return Incorporation::Dropped;
        }

        if agent.training_count() <= description.ignore_window {
            self.exposure += 1;
            return Incorporation::BurnIn;
        }

        let pls = agent.sample_sensitivity(self.realizations, rng);
        let pds = agent.sample_specificity(self.realizations, rng);

        for (k, p) in self.probability.iter_mut().enumerate() {
            let pl = pls[k % pls.len()];
            let pd = pds[k % pds.len()];
            *p = posterior(*p, pl, pd, description.said).clamp(self.pmin, 1.0 - self.pmin);
        }

        self.trajectory.push(self.probability.clone());
        self.refresh_summary();
        self.exposure += 1;

        let retired = self.reevaluate(description.at);

        let (pl, pd) = (agent.sensitivity(), agent.specificity());
        if self.kind == SubjectKind::Test {
            agent.record_test_observation(HistoryEntry {
                subject_id: self.id.clone(),
                said: description.said,
                information: information_gain(self.mean_probability, pl, pd, description.said),
                skill: agent.skill(),
                at: Some(description.at),
            });
            let skill = agent.skill();
            agent.add_contribution(skill);
        }

        self.annotations.push(Annotation {
            agent: agent.name().to_string(),
            said: description.said,
            pl,
            pd,
            at_x: description.at_x.clone(),
            at_y: description.at_y.clone(),
        });

        Incorporation::Updated { retired }
    }

    /// Recompute the geometric mean and median of the realization vector.
    pub(crate) fn refresh_summary(&mut self) {
        self.mean_probability = geometric_mean(&self.probability);
        self.median_probability = median(&self.probability);
    }
}

fn geometric_mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let log_sum: f64 = values.iter().map(|v| v.ln()).sum();
    (log_sum / values.len() as f64).exp()
}

/// Upper-middle order statistic for even lengths.
fn median(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);
    sorted[sorted.len() / 2]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;
    use swap_core::config::{AgentConfig, DecisionConfig, SubjectConfig};
    use swap_core::{SubjectState, SubjectStatus};

    use crate::agent::Agent;

    fn agent(pl: f64, pd: f64, nt: u64) -> Agent {
        let mut a = Agent::new("alice", &AgentConfig::default());
        a.pl = pl;
        a.pd = pd;
        a.nt = nt;
        a
    }

    fn describe(said: Verdict) -> Description {
        Description {
            said,
            at: Utc::now(),
            ignore_window: 0,
            hasty: false,
            at_x: vec![],
            at_y: vec![],
        }
    }

    fn test_subject(prior: f64, decision: &DecisionConfig) -> Subject {
        let config = SubjectConfig {
            prior,
            ..Default::default()
        };
        Subject::new("ASW0000xyz", SubjectKind::Test, &config, decision)
    }

    #[test]
    fn test_single_lens_verdict_worked_example() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut a = agent(0.9, 0.9, 1);
        let mut s = test_subject(2e-4, &DecisionConfig::default());

        let outcome = s.incorporate(&mut a, &describe(Verdict::Lens), &mut rng);
        assert_eq!(outcome, Incorporation::Updated { retired: false });
        assert_eq!(s.probability.len(), 1);
        assert!((s.mean_probability - 0.0018).abs() < 1e-4);
        assert_eq!(s.mean_probability, s.median_probability);
        assert_eq!(s.exposure, 1);
        assert_eq!(s.trajectory_len(), 2);

        let first = s.mean_probability;
        s.incorporate(&mut a, &describe(Verdict::Lens), &mut rng);
        let expected = posterior(first, 0.9, 0.9, Verdict::Lens);
        assert!((s.mean_probability - expected).abs() < 1e-15);
        assert!(s.mean_probability > first);
        assert_eq!(a.test_history.len(), 2);
        assert_eq!(s.annotations.len(), 2);
    }

    #[test]
    fn test_each_test_verdict_adds_skill_to_contribution() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut a = agent(0.9, 0.9, 1);
        a.update_skill();
        let mut s = test_subject(2e-4, &DecisionConfig::default());

        s.incorporate(&mut a, &describe(Verdict::Lens), &mut rng);
        assert!((a.contribution - a.skill).abs() < 1e-15);
        s.incorporate(&mut a, &describe(Verdict::Not), &mut rng);
        assert!((a.contribution - 2.0 * a.skill).abs() < 1e-15);

        let mut d = describe(Verdict::Lens);
        d.ignore_window = 5;
        assert_eq!(s.incorporate(&mut a, &d, &mut rng), Incorporation::BurnIn);
        assert!((a.contribution - 2.0 * a.skill).abs() < 1e-15);
    }

    #[test]
    fn test_rejection_retires_with_age_equal_to_exposure() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let decision = DecisionConfig {
            detection_threshold: 0.99,
            rejection_threshold: 0.1,
        };
        let mut a = agent(0.9, 0.9, 1);
        let mut s = test_subject(0.3, &decision);

        let outcome = s.incorporate(&mut a, &describe(Verdict::Not), &mut rng);
        assert_eq!(outcome, Incorporation::Updated { retired: true });
        assert!(s.mean_probability < 0.1);
        assert_eq!(s.status, SubjectStatus::Rejected);
        assert_eq!(s.state, SubjectState::Inactive);
        assert_eq!(s.retirement_age, Some(s.exposure));
    }

    #[test]
    fn test_hasty_drops_verdicts_on_retired_subject() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let decision = DecisionConfig {
            detection_threshold: 0.99,
            rejection_threshold: 0.1,
        };
        let mut a = agent(0.9, 0.9, 1);
        let mut s = test_subject(0.3, &decision);
        s.incorporate(&mut a, &describe(Verdict::Not), &mut rng);

        let mut d = describe(Verdict::Lens);
        d.hasty = true;
        let before = s.clone();
        assert_eq!(s.incorporate(&mut a, &d, &mut rng), Incorporation::Dropped);
        assert_eq!(s.exposure, before.exposure);
        assert_eq!(s.probability, before.probability);
        assert_eq!(s.trajectory_len(), before.trajectory_len());
    }

    #[test]
    fn test_burn_in_adds_exposure_only() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut a = agent(0.9, 0.9, 3);
        let mut s = test_subject(2e-4, &DecisionConfig::default());
        let mut d = describe(Verdict::Lens);
        d.ignore_window = 3;

        assert_eq!(s.incorporate(&mut a, &d, &mut rng), Incorporation::BurnIn);
        assert_eq!(s.exposure, 1);
        assert_eq!(s.mean_probability, 2e-4);
        assert_eq!(s.trajectory_len(), 1);
        assert!(s.annotations.is_empty());
        assert!(a.test_history.is_empty());
    }

    #[test]
    fn test_anchor_updates_skip_test_history() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut a = agent(0.9, 0.9, 1);
        let config = SubjectConfig::default();
        let mut s = Subject::new(
            "ASW0000sim",
            SubjectKind::Sim,
            &config,
            &DecisionConfig::default(),
        );
        for _ in 0..5 {
            s.incorporate(&mut a, &describe(Verdict::Not), &mut rng);
        }
        assert_eq!(s.status, SubjectStatus::Rejected);
        assert_eq!(s.state, SubjectState::Active);
        assert!(a.test_history.is_empty());
        assert_eq!(a.contribution, 0.0);
        assert_eq!(s.annotations.len(), 5);
    }

    #[test]
    fn test_realizations_spread_and_stay_bounded() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let mut a = agent(0.8, 0.8, 10);
        a.nl = 20.0;
        a.nd = 20.0;
        let config = SubjectConfig {
            prior: 0.5,
            realizations: 50,
            ..Default::default()
        };
        let mut s = Subject::new("ASW0000r", SubjectKind::Test, &config, &DecisionConfig::default());
        for _ in 0..3 {
            s.incorporate(&mut a, &describe(Verdict::Lens), &mut rng);
        }
        assert_eq!(s.probability.len(), 50);
        assert!(s
            .probability
            .iter()
            .all(|p| *p >= s.pmin && *p <= 1.0 - s.pmin));
        let min = s.probability.iter().cloned().fold(f64::INFINITY, f64::min);
        let max = s.probability.iter().cloned().fold(0.0, f64::max);
        assert!(max > min);
    }

    #[test]
    fn test_median_takes_upper_middle() {
        assert_eq!(median(&[0.4, 0.1, 0.3, 0.2]), 0.3);
        assert_eq!(median(&[0.2]), 0.2);
        assert!((geometric_mean(&[0.1, 0.4]) - 0.2).abs() < 1e-12);
    }
}
