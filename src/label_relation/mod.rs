//! Dominance between labels, aggregated over factors.
//!
//! Label `l1` dominates `l2` when, in every factor, any transition of `l2` is
//! matched by an `l1`-transition from the same source into a dominating
//! target, and `l1` is not costlier. While factor `i` is being refined, the
//! relevant question is domination in all factors *except* `i`, so both query
//! operations take that carve-out as an argument.

mod dense;
mod factor_set;
mod grouped;


pub use dense::DenseLabelRelation;
pub use factor_set::FactorSet;
pub use grouped::{LabelGroupSimulationRelation, LabelGroupedLabelRelation};

use crate::fts::FtsTask;
use crate::relation::FactorDominanceRelation;

/// The label side of the mutual fixpoint.
///
/// The task is passed to every call; the relation stores no back-reference so
/// that it can live inside the converged
/// [`StateDominanceRelation`](crate::dominance::StateDominanceRelation)
/// independently of how the task is shared.
pub trait LabelRelation {
    /// `l1` dominates `l2` in every factor except `factor`, and is not
    /// costlier.
    fn label_dominates_label_in_all_other(
        &self,
        task: &FtsTask,
        factor: usize,
        l1: usize,
        l2: usize,
    ) -> bool;

    /// Staying put dominates `label` in every factor except `factor`.
    fn noop_simulates_label_in_all_other(&self, task: &FtsTask, factor: usize, label: usize)
    -> bool;

    /// Re-verify everything this relation claims about `factor` against the
    /// factor's current state relation. Returns whether anything was removed.
    fn update_factor(
        &mut self,
        task: &FtsTask,
        factor: usize,
        relation: &dyn FactorDominanceRelation,
    ) -> bool;
}

/// Storage backend for the label relation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelRelationBackend {
    /// Label × label matrix of factor sets.
    Dense,
    /// Per-factor relation over label groups (the canonical backend).
    Grouped,
}

impl LabelRelationBackend {
    /// Create the optimistically seeded relation for a task.
    pub fn build_relation(&self, task: &FtsTask) -> Box<dyn LabelRelation> {
        match self {
            LabelRelationBackend::Dense => Box::new(DenseLabelRelation::new(task)),
            LabelRelationBackend::Grouped => Box::new(LabelGroupedLabelRelation::new(task)),
        }
    }
}
