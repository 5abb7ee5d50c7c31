//! Expectation-Maximization over the offline ledger.
//!
//! E-step: every subject's posterior from all verdicts on it, treating each
//! labeler as an independent imperfect binary sensor, summed in log-odds.
//! M-step: each labeler's PL and PD as posterior-weighted fractions of
//! correct verdicts, and the prior as the mean posterior of estimated
//! subjects.

use serde::{Deserialize, Serialize};

use swap_core::errors::RefinerError;
use swap_core::types::collections::FxHashMap;
use swap_core::{SwapConfig, Verdict};

use super::ledger::{AnchorRole, OfflineLedger};
use crate::information::likelihoods;

/// Refined confusion matrix for one labeler.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AgentEstimate {
    pub pl: f64,
    pub pd: f64,
}

/// Diagnostics for one EM iteration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationRecord {
    pub iteration: usize,
    /// Mean absolute change of subject posteriors in this iteration.
    pub mean_change: f64,
    pub prior: f64,
    /// Log-likelihood of all non-excluded verdicts under the parameters
    /// the E-step used.
    pub log_likelihood: f64,
}

/// Result of an EM pass.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmOutcome {
    pub prior: f64,
    pub probabilities: FxHashMap<String, f64>,
    pub agents: FxHashMap<String, AgentEstimate>,
    pub iterations: Vec<IterationRecord>,
    pub converged: bool,
}

/// Iteration bounds and numeric limits.
#[derive(Debug, Clone, Copy)]
pub struct EmRefiner {
    pub n_min: usize,
    pub n_max: usize,
    pub epsilon_min: f64,
    /// Refined PL and PD stay in [floor, 1 - floor].
    pub reliability_floor: f64,
    /// Refined probabilities stay in [pmin, 1 - pmin].
    pub pmin: f64,
}

/// Working state of one EM pass, indexed by position for speed.
#[derive(Debug, Clone)]
pub struct EmState {
    subjects: Vec<String>,
    roles: Vec<AnchorRole>,
    agents: Vec<String>,
    by_subject: Vec<Vec<(usize, Verdict)>>,
    by_agent: Vec<Vec<(usize, Verdict)>>,
    pub prior: f64,
    pub probabilities: Vec<f64>,
    pub pl: Vec<f64>,
    pub pd: Vec<f64>,
}

impl EmRefiner {
    pub fn from_config(config: &SwapConfig) -> Self {
        Self {
            n_min: config.offline.n_min,
            n_max: config.offline.n_max,
            epsilon_min: config.offline.epsilon_min,
            reliability_floor: config.agent.reliability_floor,
            pmin: config.subject.pmin,
        }
    }

    /// Run EM from the ledger's initial values.
    pub fn refine(&self, ledger: &OfflineLedger) -> Result<EmOutcome, RefinerError> {
        self.check(ledger)?;
        let state = EmState::from_ledger(ledger, self.pmin);
        Ok(self.iterate(state))
    }

    /// Run EM starting from an earlier outcome on the same ledger.
    pub fn resume(
        &self,
        ledger: &OfflineLedger,
        previous: &EmOutcome,
    ) -> Result<EmOutcome, RefinerError> {
        self.check(ledger)?;
        let mut state = EmState::from_ledger(ledger, self.pmin);
        state.seed_from(previous);
        Ok(self.iterate(state))
    }

    fn check(&self, ledger: &OfflineLedger) -> Result<(), RefinerError> {
        if self.n_min > self.n_max || self.n_max == 0 {
            return Err(RefinerError::InvalidBounds {
                n_min: self.n_min,
                n_max: self.n_max,
            });
        }
        if ledger.is_empty() {
            return Err(RefinerError::EmptyLedger);
        }
        Ok(())
    }

    fn iterate(&self, mut state: EmState) -> EmOutcome {
        let mut iterations = Vec::new();
        let mut converged = false;

        for iteration in 1..=self.n_max {
            let log_likelihood = state.log_likelihood();
            let mean_change = state.e_step(self.pmin);
            state.m_step(self.reliability_floor, self.pmin);

            tracing::trace!(iteration, mean_change, prior = state.prior, "em iteration");
            iterations.push(IterationRecord {
                iteration,
                mean_change,
                prior: state.prior,
                log_likelihood,
            });

            if iteration >= self.n_min && mean_change < self.epsilon_min {
                converged = true;
                break;
            }
        }

        if !converged {
            tracing::warn!(n_max = self.n_max, "offline refinement did not converge");
        }
        state.into_outcome(iterations, converged)
    }
}

impl EmState {
    /// Index the ledger. Known anchors start at their truth, every other
    /// subject at the initial prior.
    pub fn from_ledger(ledger: &OfflineLedger, pmin: f64) -> Self {
        let mut subjects: Vec<String> = ledger.roles.keys().cloned().collect();
        subjects.sort();
        let mut agents: Vec<String> = ledger.verdicts.keys().cloned().collect();
        agents.sort();

        let subject_index: FxHashMap<&str, usize> = subjects
            .iter()
            .enumerate()
            .map(|(i, id)| (id.as_str(), i))
            .collect();

        let mut by_subject = vec![Vec::new(); subjects.len()];
        let mut by_agent = vec![Vec::new(); agents.len()];
        for (a, name) in agents.iter().enumerate() {
            let Some(verdicts) = ledger.verdicts.get(name) else {
                continue;
            };
            let mut seen: Vec<(&String, &Verdict)> = verdicts.iter().collect();
            seen.sort_by(|x, y| x.0.cmp(y.0));
            for (subject_id, verdict) in seen {
                if let Some(&s) = subject_index.get(subject_id.as_str()) {
                    by_subject[s].push((a, *verdict));
                    by_agent[a].push((s, *verdict));
                }
            }
        }

        let roles: Vec<AnchorRole> = subjects
            .iter()
            .map(|id| ledger.roles.get(id).copied().unwrap_or(AnchorRole::Excluded))
            .collect();
        let prior = ledger.initial_prior.clamp(pmin, 1.0 - pmin);
        let probabilities = roles
            .iter()
            .map(|role| match role {
                AnchorRole::Known(truth) => truth_weight(*truth),
                _ => prior,
            })
            .collect();

        Self {
            pl: vec![ledger.initial_pl; agents.len()],
            pd: vec![ledger.initial_pd; agents.len()],
            subjects,
            roles,
            agents,
            by_subject,
            by_agent,
            prior,
            probabilities,
        }
    }

    fn seed_from(&mut self, previous: &EmOutcome) {
        self.prior = previous.prior;
        for (i, id) in self.subjects.iter().enumerate() {
            if let Some(p) = previous.probabilities.get(id) {
                self.probabilities[i] = *p;
            }
        }
        for (a, name) in self.agents.iter().enumerate() {
            if let Some(estimate) = previous.agents.get(name) {
                self.pl[a] = estimate.pl;
                self.pd[a] = estimate.pd;
            }
        }
    }

    /// Recompute every non-anchor posterior. Returns the mean absolute
    /// change over all subjects.
    pub fn e_step(&mut self, pmin: f64) -> f64 {
        let prior_logit = logit(self.prior);
        let mut total_change = 0.0;

        for s in 0..self.subjects.len() {
            if let AnchorRole::Known(_) = self.roles[s] {
                continue;
            }
            let mut log_odds = prior_logit;
            for &(a, said) in &self.by_subject[s] {
                let (like_lens, like_not) = likelihoods(self.pl[a], self.pd[a], said);
                log_odds += like_lens.ln() - like_not.ln();
            }
            let p = sigmoid(log_odds).clamp(pmin, 1.0 - pmin);
            total_change += (p - self.probabilities[s]).abs();
            self.probabilities[s] = p;
        }

        if self.subjects.is_empty() {
            0.0
        } else {
            total_change / self.subjects.len() as f64
        }
    }

    /// Re-estimate every labeler's PL and PD and the prior from the
    /// current posteriors.
    pub fn m_step(&mut self, floor: f64, pmin: f64) {
        for a in 0..self.agents.len() {
            let mut lens_hits = 0.0;
            let mut lens_weight = 0.0;
            let mut not_hits = 0.0;
            let mut not_weight = 0.0;

            for &(s, said) in &self.by_agent[a] {
                if self.roles[s] == AnchorRole::Excluded {
                    continue;
                }
                let w = self.probabilities[s];
                lens_weight += w;
                not_weight += 1.0 - w;
                match said {
                    Verdict::Lens => lens_hits += w,
                    Verdict::Not => not_hits += 1.0 - w,
                }
            }

            if lens_weight > 0.0 {
                self.pl[a] = (lens_hits / lens_weight).clamp(floor, 1.0 - floor);
            }
            if not_weight > 0.0 {
                self.pd[a] = (not_hits / not_weight).clamp(floor, 1.0 - floor);
            }
        }

        let estimated: Vec<f64> = self
            .roles
            .iter()
            .zip(&self.probabilities)
            .filter(|(role, _)| **role == AnchorRole::Estimated)
            .map(|(_, p)| *p)
            .collect();
        if !estimated.is_empty() {
            let mean = estimated.iter().sum::<f64>() / estimated.len() as f64;
            self.prior = mean.clamp(pmin, 1.0 - pmin);
        }
    }

    /// Log-likelihood of all verdicts on non-excluded subjects. Estimated
    /// subjects marginalize over the truth with the current prior.
    pub fn log_likelihood(&self) -> f64 {
        let mut total = 0.0;
        for s in 0..self.subjects.len() {
            let (mut log_lens, mut log_not) = (0.0, 0.0);
            for &(a, said) in &self.by_subject[s] {
                let (like_lens, like_not) = likelihoods(self.pl[a], self.pd[a], said);
                log_lens += like_lens.ln();
                log_not += like_not.ln();
            }
            total += match self.roles[s] {
                AnchorRole::Known(Verdict::Lens) => log_lens,
                AnchorRole::Known(Verdict::Not) => log_not,
                AnchorRole::Estimated => log_sum_exp(
                    self.prior.ln() + log_lens,
                    (1.0 - self.prior).ln() + log_not,
                ),
                AnchorRole::Excluded => 0.0,
            };
        }
        total
    }

    fn into_outcome(self, iterations: Vec<IterationRecord>, converged: bool) -> EmOutcome {
        let probabilities = self
            .subjects
            .into_iter()
            .zip(self.probabilities)
            .collect();
        let agents = self
            .agents
            .into_iter()
            .zip(self.pl.into_iter().zip(self.pd))
            .map(|(name, (pl, pd))| (name, AgentEstimate { pl, pd }))
            .collect();
        EmOutcome {
            prior: self.prior,
            probabilities,
            agents,
            iterations,
            converged,
        }
    }
}

fn truth_weight(truth: Verdict) -> f64 {
    match truth {
        Verdict::Lens => 1.0,
        Verdict::Not => 0.0,
    }
}

fn logit(p: f64) -> f64 {
    (p / (1.0 - p)).ln()
}

fn sigmoid(x: f64) -> f64 {
    if x >= 0.0 {
        1.0 / (1.0 + (-x).exp())
    } else {
        let e = x.exp();
        e / (1.0 + e)
    }
}

fn log_sum_exp(a: f64, b: f64) -> f64 {
    let m = a.max(b);
    if m == f64::NEG_INFINITY {
        return m;
    }
    m + ((a - m).exp() + (b - m).exp()).ln()
}
