use crate::dominance::StateDominanceRelation;
use crate::fts::ExplicitState;
use crate::pruning::DominanceDatabase;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Compares only against states reached at least as cheaply.
///
/// A dominating state reached with a higher `g` does not prove the new state
/// redundant, so stored states are bucketed by `g` and only buckets with
/// `g' <= g` are consulted.
pub struct PreviousLowerGDatabase {
    relation: Arc<StateDominanceRelation>,
    previous: BTreeMap<u32, Vec<ExplicitState>>,
}

impl PreviousLowerGDatabase {
    pub fn new(relation: Arc<StateDominanceRelation>) -> PreviousLowerGDatabase {
        PreviousLowerGDatabase {
            relation,
            previous: BTreeMap::new(),
        }
    }
}

impl DominanceDatabase for PreviousLowerGDatabase {
    fn check(&self, state: &[usize], g: u32) -> bool {
        self.previous.range(..=g).any(|(_, states)| {
            states
                .iter()
                .any(|stored| self.relation.dominates(stored, state))
        })
    }

    fn insert(&mut self, state: ExplicitState, g: u32) {
        self.previous.entry(g).or_default().push(state);
    }
}
