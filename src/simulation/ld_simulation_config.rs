use crate::fts::FtsTask;
use crate::label_relation::LabelRelationBackend;
use crate::relation::FactorRelationBackend;
use std::sync::Arc;

/// Configuration of the label-dominance simulation fixpoint.
#[derive(Clone)]
pub struct LdSimulationConfig {
    /// The task the relations are computed for.
    pub task: Arc<FtsTask>,
    /// Storage backend of the per-factor state relations.
    pub factor_backend: FactorRelationBackend,
    /// Backend of the label relation.
    pub label_backend: LabelRelationBackend,
    /// Maximum number of outer fixpoint rounds before the computation is
    /// cancelled. Convergence is guaranteed, so this is purely a budget.
    pub max_iterations: usize,
}

impl LdSimulationConfig {
    pub fn new(task: Arc<FtsTask>) -> Self {
        Self::from(task)
    }
}

impl From<Arc<FtsTask>> for LdSimulationConfig {
    fn from(task: Arc<FtsTask>) -> Self {
        LdSimulationConfig {
            task,
            factor_backend: FactorRelationBackend::Dense,
            label_backend: LabelRelationBackend::Grouped,
            max_iterations: usize::MAX,
        }
    }
}

impl From<&Arc<FtsTask>> for LdSimulationConfig {
    fn from(task: &Arc<FtsTask>) -> Self {
        LdSimulationConfig::from(task.clone())
    }
}
