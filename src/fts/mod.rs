//! Factored transition system input model.
//!
//! A task is described declaratively as a [`TaskSpec`] (labels with costs,
//! per-factor states/goals/transitions), validated into an immutable
//! [`FtsTask`] that the fixpoint computation shares via `Arc`.

mod lts;
mod state_mapping;
mod task_spec;

#[cfg(test)]
mod tests;

pub use lts::{LabelGroup, LabelledTransitionSystem, Transition};
pub use state_mapping::{ExplicitState, FactoredStateMapping, IdentityStateMapping};
pub use task_spec::{FactorSpec, TaskSpec, TransitionSpec};

use crate::error::DominanceError;

/// A factored task: labels with costs, shared by one labelled transition
/// system per factor.
pub struct FtsTask {
    label_costs: Vec<u32>,
    factors: Vec<LabelledTransitionSystem>,
}

impl FtsTask {
    pub fn num_labels(&self) -> usize {
        self.label_costs.len()
    }

    pub fn label_cost(&self, label: usize) -> u32 {
        self.label_costs[label]
    }

    pub fn num_factors(&self) -> usize {
        self.factors.len()
    }

    pub fn factor(&self, factor: usize) -> &LabelledTransitionSystem {
        &self.factors[factor]
    }

    pub fn factors(&self) -> &[LabelledTransitionSystem] {
        &self.factors
    }
}

impl TryFrom<TaskSpec> for FtsTask {
    type Error = DominanceError;

    fn try_from(spec: TaskSpec) -> Result<FtsTask, DominanceError> {
        spec.validate()?;
        let num_labels = spec.label_costs.len();
        let factors = spec
            .factors
            .into_iter()
            .map(|factor| {
                let mut goal_states = vec![false; factor.num_states];
                for goal in factor.goal_states {
                    goal_states[goal] = true;
                }
                let mut label_transitions = vec![Vec::new(); num_labels];
                for transition in factor.transitions {
                    label_transitions[transition.label].push((transition.src, transition.target));
                }
                LabelledTransitionSystem::new(
                    factor.num_states,
                    factor.init_state,
                    goal_states,
                    label_transitions,
                )
            })
            .collect();
        Ok(FtsTask {
            label_costs: spec.label_costs,
            factors,
        })
    }
}
