use crate::dominance::StateDominanceRelation;
use crate::fts::ExplicitState;
use crate::pruning::DominanceDatabase;
use std::sync::Arc;

/// Compares only against the most recently inserted state.
///
/// The cheapest policy: a search inserts each expanded state before
/// generating its successors, so `check` asks whether the parent already
/// dominates the successor.
pub struct ParentDatabase {
    relation: Arc<StateDominanceRelation>,
    parent: Option<ExplicitState>,
}

impl ParentDatabase {
    pub fn new(relation: Arc<StateDominanceRelation>) -> ParentDatabase {
        ParentDatabase {
            relation,
            parent: None,
        }
    }
}

impl DominanceDatabase for ParentDatabase {
    fn check(&self, state: &[usize], _g: u32) -> bool {
        self.parent
            .as_ref()
            .is_some_and(|parent| self.relation.dominates(parent, state))
    }

    fn insert(&mut self, state: ExplicitState, _g: u32) {
        self.parent = Some(state);
    }
}
