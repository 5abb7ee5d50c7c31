use serde::{Deserialize, Serialize};

use swap_core::config::AgentConfig;
use swap_core::types::collections::FxHashMap;

use crate::agent::Agent;

/// All agents, keyed by labeler id.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Bureau {
    members: FxHashMap<String, Agent>,
}

impl Bureau {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the agent for `name`, creating it with the configured initial
    /// reliability if this is its first classification.
    pub fn get_or_create(&mut self, name: &str, config: &AgentConfig) -> &mut Agent {
        if !self.members.contains_key(name) {
            tracing::debug!(agent = name, "new agent");
        }
        self.members
            .entry(name.to_string())
            .or_insert_with(|| Agent::new(name, config))
    }

    pub fn get(&self, name: &str) -> Option<&Agent> {
        self.members.get(name)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut Agent> {
        self.members.get_mut(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.members.contains_key(name)
    }

    /// Agent ids, sorted.
    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.members.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn remove(&mut self, name: &str) -> Option<Agent> {
        self.members.remove(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Agent)> {
        self.members.iter()
    }

    /// Current (PL, PD) of every agent, sorted by agent id.
    pub fn reliabilities(&self) -> Vec<(String, f64, f64)> {
        let mut out: Vec<(String, f64, f64)> = self
            .members
            .iter()
            .map(|(name, a)| (name.clone(), a.pl, a.pd))
            .collect();
        out.sort_by(|a, b| a.0.cmp(&b.0));
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_or_create_is_lazy_and_stable() {
        let mut bureau = Bureau::new();
        let config = AgentConfig::default();
        bureau.get_or_create("alice", &config).register_sighting();
        bureau.get_or_create("alice", &config).register_sighting();
        bureau.get_or_create("bob", &config);

        assert_eq!(bureau.len(), 2);
        assert_eq!(bureau.get("alice").map(|a| a.n), Some(2));
        assert_eq!(bureau.list(), vec!["alice".to_string(), "bob".to_string()]);
    }

    #[test]
    fn test_reliabilities_sorted_by_name() {
        let mut bureau = Bureau::new();
        let config = AgentConfig::default();
        bureau.get_or_create("zed", &config).pl = 0.7;
        bureau.get_or_create("amy", &config);
        let r = bureau.reliabilities();
        assert_eq!(r[0].0, "amy");
        assert_eq!(r[1], ("zed".to_string(), 0.7, 0.5));
    }
}
