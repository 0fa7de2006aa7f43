use crate::error::DominanceError;

/// Declarative description of a factored task, convertible into
/// [`FtsTask`](crate::fts::FtsTask) via `TryFrom`.
///
/// Labels are shared by all factors; `label_costs.len()` determines the number
/// of labels. A label without transitions in some factor is treated as a noop
/// there (it loops in every state of that factor).
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TaskSpec {
    /// Cost of every label.
    pub label_costs: Vec<u32>,
    pub factors: Vec<FactorSpec>,
}

/// One factor of a [`TaskSpec`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FactorSpec {
    pub num_states: usize,
    pub init_state: usize,
    /// Indices of goal states.
    pub goal_states: Vec<usize>,
    pub transitions: Vec<TransitionSpec>,
}

/// One labelled transition of a [`FactorSpec`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TransitionSpec {
    pub label: usize,
    pub src: usize,
    pub target: usize,
}

impl TaskSpec {
    pub(crate) fn validate(&self) -> Result<(), DominanceError> {
        if self.factors.is_empty() {
            return Err(DominanceError::UnsupportedTask {
                reason: "task has no factors".to_string(),
            });
        }
        for (i, factor) in self.factors.iter().enumerate() {
            if factor.num_states == 0 {
                return Err(DominanceError::InvalidTask {
                    reason: format!("factor {i} has no states"),
                });
            }
            if factor.init_state >= factor.num_states {
                return Err(DominanceError::InvalidTask {
                    reason: format!(
                        "factor {i}: initial state {} out of range (have {} states)",
                        factor.init_state, factor.num_states
                    ),
                });
            }
            for &goal in &factor.goal_states {
                if goal >= factor.num_states {
                    return Err(DominanceError::InvalidTask {
                        reason: format!("factor {i}: goal state {goal} out of range"),
                    });
                }
            }
            for transition in &factor.transitions {
                if transition.label >= self.label_costs.len() {
                    return Err(DominanceError::InvalidTask {
                        reason: format!(
                            "factor {i}: transition uses label {} but only {} labels are declared",
                            transition.label,
                            self.label_costs.len()
                        ),
                    });
                }
                if transition.src >= factor.num_states || transition.target >= factor.num_states {
                    return Err(DominanceError::InvalidTask {
                        reason: format!(
                            "factor {i}: transition ({} -> {}) out of range",
                            transition.src, transition.target
                        ),
                    });
                }
            }
        }
        Ok(())
    }
}
