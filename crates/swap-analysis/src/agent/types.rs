use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use swap_core::config::AgentConfig;
use swap_core::{HistoryEntry, ReliabilitySource, Truth, Verdict};

use super::sampling::draw_reliability;
use crate::information::{expected_information_gain, information_gain};

/// Reliability model for one labeler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Agent {
    pub name: String,
    /// P("LENS" | LENS).
    pub pl: f64,
    /// P("NOT" | NOT).
    pub pd: f64,
    /// Effective evidence behind `pl`.
    pub nl: f64,
    /// Effective evidence behind `pd`.
    pub nd: f64,
    /// Every classification sent to this agent.
    pub n: u64,
    /// Classifications made while trained.
    pub nt: u64,
    /// Expected information (bits) per verdict on a 50/50 subject.
    pub skill: f64,
    /// Cumulative skill (bits) credited for incorporated verdicts on test
    /// subjects.
    pub contribution: f64,
    pub reliability_floor: f64,
    pub training_history: Vec<HistoryEntry>,
    pub test_history: Vec<HistoryEntry>,
    /// PL before the offline stage overwrote it.
    #[serde(default)]
    pub online_pl: Option<f64>,
    /// PD before the offline stage overwrote it.
    #[serde(default)]
    pub online_pd: Option<f64>,
}

/// What the agent hears back after its verdict has been applied.
#[derive(Debug, Clone, Copy)]
pub struct Observation<'a> {
    pub subject_id: &'a str,
    pub said: Verdict,
    pub truth: Truth,
    /// The subject's mean probability after this verdict was incorporated.
    pub posterior: f64,
    pub at: DateTime<Utc>,
}

impl Agent {
    pub fn new(name: impl Into<String>, config: &AgentConfig) -> Self {
        let floor = config.reliability_floor;
        let pl = config.initial_pl.clamp(floor, 1.0 - floor);
        let pd = config.initial_pd.clamp(floor, 1.0 - floor);
        Self {
            name: name.into(),
            pl,
            pd,
            nl: config.initial_effective_count,
            nd: config.initial_effective_count,
            n: 0,
            nt: 0,
            skill: expected_information_gain(0.5, pl, pd),
            contribution: 0.0,
            reliability_floor: floor,
            training_history: Vec::new(),
            test_history: Vec::new(),
            online_pl: None,
            online_pd: None,
        }
    }

    /// Count one classification, whatever happens to it next.
    pub fn register_sighting(&mut self) {
        self.n += 1;
    }

    /// Learn from one verdict.
    ///
    /// Known truth: PL or PD is updated as a running fraction of correct
    /// verdicts. Unknown truth: both are updated softly, weighting by the
    /// subject's posterior. With `ignore` set only bookkeeping happens;
    /// verdicts on anchors still count towards `nt`.
    pub fn record_outcome(&mut self, obs: &Observation<'_>, ignore: bool) {
        if !ignore {
            self.learn(obs.said, obs.truth, obs.posterior);
            self.nt += 1;
        } else if obs.truth.is_known() {
            self.nt += 1;
        }

        self.update_skill();
        if obs.truth.is_known() {
            self.training_history.push(HistoryEntry {
                subject_id: obs.subject_id.to_string(),
                said: obs.said,
                information: information_gain(obs.posterior, self.pl, self.pd, obs.said),
                skill: self.skill,
                at: Some(obs.at),
            });
        }
    }

    /// Recompute skill from the current confusion matrix.
    pub fn update_skill(&mut self) {
        self.skill = expected_information_gain(0.5, self.pl, self.pd);
    }

    /// Overwrite the confusion matrix, keeping the online values aside.
    pub fn replace_reliability(&mut self, pl: f64, pd: f64) {
        self.online_pl = Some(self.pl);
        self.online_pd = Some(self.pd);
        self.pl = self.clamp(pl);
        self.pd = self.clamp(pd);
        self.update_skill();
    }

    fn learn(&mut self, said: Verdict, truth: Truth, posterior: f64) {
        match truth {
            Truth::Lens => {
                let hit = if said.is_lens() { 1.0 } else { 0.0 };
                self.pl = (self.pl * self.nl + hit) / (self.nl + 1.0);
                self.nl += 1.0;
            }
            Truth::Not => {
                let hit = if said.is_lens() { 0.0 } else { 1.0 };
                self.pd = (self.pd * self.nd + hit) / (self.nd + 1.0);
                self.nd += 1.0;
            }
            Truth::Unknown => {
                let w_lens = posterior.clamp(0.0, 1.0);
                let w_not = 1.0 - w_lens;
                let (hit_lens, hit_not) = match said {
                    Verdict::Lens => (w_lens, 0.0),
                    Verdict::Not => (0.0, w_not),
                };
                if self.nl + w_lens > 0.0 {
                    self.pl = (self.pl * self.nl + hit_lens) / (self.nl + w_lens);
                }
                if self.nd + w_not > 0.0 {
                    self.pd = (self.pd * self.nd + hit_not) / (self.nd + w_not);
                }
                self.nl += w_lens;
                self.nd += w_not;
            }
        }
        self.pl = self.clamp(self.pl);
        self.pd = self.clamp(self.pd);
    }

    fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.reliability_floor, 1.0 - self.reliability_floor)
    }
}

impl ReliabilitySource for Agent {
    fn name(&self) -> &str {
        &self.name
    }

    fn sensitivity(&self) -> f64 {
        self.pl
    }

    fn specificity(&self) -> f64 {
        self.pd
    }

    fn training_count(&self) -> u64 {
        self.nt
    }

    fn sample_sensitivity<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f64> {
        draw_reliability(self.pl, self.nl, count, self.reliability_floor, rng)
    }

    fn sample_specificity<R: Rng + ?Sized>(&self, count: usize, rng: &mut R) -> Vec<f64> {
        draw_reliability(self.pd, self.nd, count, self.reliability_floor, rng)
    }

    fn skill(&self) -> f64 {
        self.skill
    }

    fn record_test_observation(&mut self, entry: HistoryEntry) {
        self.test_history.push(entry);
    }

    fn add_contribution(&mut self, bits: f64) {
        self.contribution += bits;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn observation(said: Verdict, truth: Truth, posterior: f64) -> Observation<'static> {
        Observation {
            subject_id: "ASW0000001",
            said,
            truth,
            posterior,
            at: Utc::now(),
        }
    }

    #[test]
    fn test_new_agent_is_uninformative() {
        let agent = Agent::new("alice", &AgentConfig::default());
        assert_eq!(agent.pl, 0.5);
        assert_eq!(agent.pd, 0.5);
        assert!(agent.skill.abs() < 1e-12);
        assert_eq!((agent.n, agent.nt), (0, 0));
    }

    #[test]
    fn test_correct_sim_verdict_raises_pl_only() {
        let mut agent = Agent::new("alice", &AgentConfig::default());
        agent.register_sighting();
        agent.record_outcome(&observation(Verdict::Lens, Truth::Lens, 0.3), false);
        assert!((agent.pl - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(agent.pd, 0.5);
        assert_eq!(agent.nt, 1);
        assert!(agent.skill > 0.0);
        assert_eq!(agent.training_history.len(), 1);
    }

    #[test]
    fn test_missed_dud_lowers_pd() {
        let mut agent = Agent::new("bob", &AgentConfig::default());
        agent.record_outcome(&observation(Verdict::Lens, Truth::Not, 0.1), false);
        assert!(agent.pd < 0.5);
        assert_eq!(agent.pl, 0.5);
    }

    #[test]
    fn test_ignore_keeps_confusion_matrix() {
        let mut agent = Agent::new("carol", &AgentConfig::default());
        agent.register_sighting();
        agent.record_outcome(&observation(Verdict::Lens, Truth::Lens, 0.5), true);
        assert_eq!(agent.pl, 0.5);
        assert_eq!(agent.nt, 1, "anchor sightings count as training");

        agent.register_sighting();
        agent.record_outcome(&observation(Verdict::Lens, Truth::Unknown, 0.5), true);
        assert_eq!(agent.nt, 1);
        assert!(agent.n >= agent.nt);
    }

    #[test]
    fn test_soft_update_on_unknown_truth() {
        let mut agent = Agent::new("dave", &AgentConfig::default());
        agent.record_outcome(&observation(Verdict::Lens, Truth::Unknown, 0.9), false);
        assert!(agent.pl > 0.5);
        assert!(agent.pd < 0.5);
        assert!((agent.nl - 2.9).abs() < 1e-12);
        assert!((agent.nd - 2.1).abs() < 1e-12);
        assert!(agent.training_history.is_empty());
    }

    #[test]
    fn test_reliability_never_reaches_bounds() {
        let mut agent = Agent::new("erin", &AgentConfig::default());
        for _ in 0..10_000 {
            agent.register_sighting();
            agent.record_outcome(&observation(Verdict::Lens, Truth::Lens, 0.5), false);
            agent.record_outcome(&observation(Verdict::Lens, Truth::Not, 0.5), false);
        }
        assert!(agent.pl > 0.0 && agent.pl < 1.0);
        assert!(agent.pd > 0.0 && agent.pd < 1.0);
        assert!((agent.pl - 0.99).abs() < 1e-12);
        assert!((agent.pd - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_replace_reliability_keeps_online_values() {
        let mut agent = Agent::new("frank", &AgentConfig::default());
        agent.replace_reliability(0.8, 0.95);
        assert_eq!(agent.online_pl, Some(0.5));
        assert_eq!(agent.online_pd, Some(0.5));
        assert_eq!(agent.pl, 0.8);
        assert!(agent.skill > 0.0);
    }
}
