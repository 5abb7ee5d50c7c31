//! Write an EM outcome back into the registries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::em::{EmOutcome, IterationRecord};
use crate::registry::{Bureau, Collection};

/// What applying a refinement changed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OfflineSummary {
    pub prior: f64,
    pub converged: bool,
    pub iterations: Vec<IterationRecord>,
    pub updated_subjects: usize,
    pub updated_agents: usize,
    /// Subjects dropped because the pass produced no estimate for them.
    pub pruned_subjects: Vec<String>,
    /// Agents dropped because they made no verdict in the pass.
    pub pruned_agents: Vec<String>,
    /// Test subjects retired by the refined probabilities.
    pub retired: Vec<String>,
}

/// Overwrite subject probabilities and agent reliabilities with the refined
/// values, keeping the online values in the `online_*` fields, and re-run
/// the decision policy. Refined probabilities are clamped to the subject's
/// `[pmin, 1 - pmin]` band, so pinned anchors never reach 0 or 1. Members the pass knows nothing about are pruned.
pub fn apply_refinement(
    outcome: &EmOutcome,
    bureau: &mut Bureau,
    collection: &mut Collection,
    at: DateTime<Utc>,
) -> OfflineSummary {
    let mut summary = OfflineSummary {
        prior: outcome.prior,
        converged: outcome.converged,
        iterations: outcome.iterations.clone(),
        ..Default::default()
    };

    for id in collection.list() {
        let Some(&p) = outcome.probabilities.get(&id) else {
            tracing::debug!(subject = %id, "pruning subject with no offline estimate");
            collection.remove(&id);
            summary.pruned_subjects.push(id);
            continue;
        };
        let Some(subject) = collection.get_mut(&id) else {
            continue;
        };
        subject.online_mean_probability = Some(subject.mean_probability);
        subject.online_median_probability = Some(subject.median_probability);
        let p = p.clamp(subject.pmin, 1.0 - subject.pmin);
        subject.mean_probability = p;
        subject.median_probability = p;
        if subject.reevaluate(at) {
            summary.retired.push(id);
        }
        summary.updated_subjects += 1;
    }

    for name in bureau.list() {
        let Some(estimate) = outcome.agents.get(&name) else {
            tracing::debug!(agent = %name, "pruning agent absent from offline pass");
            bureau.remove(&name);
            summary.pruned_agents.push(name);
            continue;
        };
        if let Some(agent) = bureau.get_mut(&name) {
            agent.replace_reliability(estimate.pl, estimate.pd);
            summary.updated_agents += 1;
        }
    }

    if !summary.pruned_subjects.is_empty() || !summary.pruned_agents.is_empty() {
        tracing::warn!(
            subjects = summary.pruned_subjects.len(),
            agents = summary.pruned_agents.len(),
            "offline refinement pruned registry members"
        );
    }

    summary
}
