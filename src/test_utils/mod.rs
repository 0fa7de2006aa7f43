//! Shared helpers for unit tests.

use crate::fts::{FactorSpec, FtsTask, TaskSpec, TransitionSpec};
use std::sync::Arc;

/// Initialize env_logger for tests. Safe to call multiple times.
pub fn init_logger() {
    let _ = env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Trace)
        .is_test(true)
        .try_init();
}

/// Build a factor description from `(label, src, target)` triples.
pub fn factor(
    num_states: usize,
    init_state: usize,
    goal_states: &[usize],
    transitions: &[(usize, usize, usize)],
) -> FactorSpec {
    FactorSpec {
        num_states,
        init_state,
        goal_states: goal_states.to_vec(),
        transitions: transitions
            .iter()
            .map(|&(label, src, target)| TransitionSpec { label, src, target })
            .collect(),
    }
}

/// Build a validated task; panics on an invalid description.
pub fn task(label_costs: &[u32], factors: Vec<FactorSpec>) -> Arc<FtsTask> {
    let spec = TaskSpec {
        label_costs: label_costs.to_vec(),
        factors,
    };
    Arc::new(FtsTask::try_from(spec).unwrap())
}

/// The single-factor chain `0 -> 1 -> 2` with goal state 2. Converges to the
/// strict total order `2 > 1 > 0`.
pub fn chain_task() -> Arc<FtsTask> {
    task(&[1], vec![factor(3, 0, &[2], &[(0, 0, 1), (0, 1, 2)])])
}
