use crate::dominance::StateDominanceRelation;
use crate::fts::ExplicitState;
use crate::pruning::DominanceDatabase;
use std::sync::Arc;

/// Linear scan over every previously inserted state.
pub struct AllPreviousDatabase {
    relation: Arc<StateDominanceRelation>,
    previous: Vec<ExplicitState>,
}

impl AllPreviousDatabase {
    pub fn new(relation: Arc<StateDominanceRelation>) -> AllPreviousDatabase {
        AllPreviousDatabase {
            relation,
            previous: Vec::new(),
        }
    }
}

impl DominanceDatabase for AllPreviousDatabase {
    fn check(&self, state: &[usize], _g: u32) -> bool {
        self.previous
            .iter()
            .any(|stored| self.relation.dominates(stored, state))
    }

    fn insert(&mut self, state: ExplicitState, _g: u32) {
        self.previous.push(state);
    }
}
