use crate::dominance::StateDominanceRelation;
use crate::error::DominanceError;
use crate::fts::ExplicitState;
use crate::pruning::DominanceDatabase;
use crate::symbolic::{BddDirection, DominanceRelationBdd, FactoredSymbolicMapping};
use biodivine_lib_bdd::Bdd;
use log::warn;
use std::sync::Arc;

/// Symbolic database accumulating the *dominated* region.
///
/// `insert` adds every state the inserted state dominates to the closed set;
/// `check` is then a membership test of the queried state.
pub struct BddDominatedDatabase {
    mapping: Arc<FactoredSymbolicMapping>,
    relation_bdd: DominanceRelationBdd,
    closed: Bdd,
}

impl BddDominatedDatabase {
    pub fn new(
        mapping: Arc<FactoredSymbolicMapping>,
        relation: &StateDominanceRelation,
        node_limit: usize,
    ) -> Result<BddDominatedDatabase, DominanceError> {
        let relation_bdd =
            DominanceRelationBdd::new(relation, &mapping, BddDirection::Dominated, node_limit)?;
        let closed = mapping.variables().mk_false();
        Ok(BddDominatedDatabase {
            mapping,
            relation_bdd,
            closed,
        })
    }
}

impl DominanceDatabase for BddDominatedDatabase {
    fn check(&self, state: &[usize], _g: u32) -> bool {
        !self.closed.and(&self.mapping.state_bdd(state)).is_false()
    }

    fn insert(&mut self, state: ExplicitState, _g: u32) {
        match self.relation_bdd.related_states(&state) {
            Ok(dominated) => self.closed = self.closed.or(&dominated),
            Err(e) => {
                // Sound degradation: a skipped insert only loses pruning power.
                warn!("Skipping symbolic insert of {:?}: {}.", state, e);
            }
        }
    }
}

/// Symbolic database storing raw state encodings.
///
/// `insert` adds the encoding of the inserted state; `check` intersects the
/// closed set with the region *dominating* the queried state.
pub struct BddDominatingDatabase {
    mapping: Arc<FactoredSymbolicMapping>,
    relation_bdd: DominanceRelationBdd,
    closed: Bdd,
}

impl BddDominatingDatabase {
    pub fn new(
        mapping: Arc<FactoredSymbolicMapping>,
        relation: &StateDominanceRelation,
        node_limit: usize,
    ) -> Result<BddDominatingDatabase, DominanceError> {
        let relation_bdd =
            DominanceRelationBdd::new(relation, &mapping, BddDirection::Dominating, node_limit)?;
        let closed = mapping.variables().mk_false();
        Ok(BddDominatingDatabase {
            mapping,
            relation_bdd,
            closed,
        })
    }
}

impl DominanceDatabase for BddDominatingDatabase {
    fn check(&self, state: &[usize], _g: u32) -> bool {
        match self.relation_bdd.related_states(state) {
            Ok(dominating) => !self.closed.and(&dominating).is_false(),
            Err(e) => {
                // Sound degradation: an unanswerable query just never prunes.
                warn!("Symbolic dominance query for {:?} failed: {}.", state, e);
                false
            }
        }
    }

    fn insert(&mut self, state: ExplicitState, _g: u32) {
        self.closed = self.closed.or(&self.mapping.state_bdd(&state));
    }
}
