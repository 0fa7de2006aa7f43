use crate::dominance::StateDominanceRelation;
use crate::error::DominanceError;
use crate::fts::ExplicitState;
use crate::pruning::DominanceDatabase;
use crate::symbolic::{BddDirection, DominanceRelationBdd, FactoredSymbolicMapping};
use biodivine_lib_bdd::Bdd;
use log::warn;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Symbolic counterpart of
/// [`PreviousLowerGDatabase`](crate::pruning::PreviousLowerGDatabase): the
/// dominated region is accumulated per cost bucket and `check` only consults
/// buckets with `g' <= g`.
pub struct BddMapDominatedDatabase {
    mapping: Arc<FactoredSymbolicMapping>,
    relation_bdd: DominanceRelationBdd,
    closed: BTreeMap<u32, Bdd>,
}

impl BddMapDominatedDatabase {
    pub fn new(
        mapping: Arc<FactoredSymbolicMapping>,
        relation: &StateDominanceRelation,
        node_limit: usize,
    ) -> Result<BddMapDominatedDatabase, DominanceError> {
        let relation_bdd =
            DominanceRelationBdd::new(relation, &mapping, BddDirection::Dominated, node_limit)?;
        Ok(BddMapDominatedDatabase {
            mapping,
            relation_bdd,
            closed: BTreeMap::new(),
        })
    }
}

impl DominanceDatabase for BddMapDominatedDatabase {
    fn check(&self, state: &[usize], g: u32) -> bool {
        let encoded = self.mapping.state_bdd(state);
        self.closed
            .range(..=g)
            .any(|(_, bucket)| !bucket.and(&encoded).is_false())
    }

    fn insert(&mut self, state: ExplicitState, g: u32) {
        match self.relation_bdd.related_states(&state) {
            Ok(dominated) => {
                let bucket = self
                    .closed
                    .entry(g)
                    .or_insert_with(|| self.mapping.variables().mk_false());
                *bucket = bucket.or(&dominated);
            }
            Err(e) => {
                // Sound degradation: a skipped insert only loses pruning power.
                warn!("Skipping symbolic insert of {:?}: {}.", state, e);
            }
        }
    }
}

/// Like [`BddMapDominatedDatabase`], but the buckets store raw state
/// encodings and `check` intersects them with the region dominating the
/// queried state.
pub struct BddMapDominatingDatabase {
    mapping: Arc<FactoredSymbolicMapping>,
    relation_bdd: DominanceRelationBdd,
    closed: BTreeMap<u32, Bdd>,
}

impl BddMapDominatingDatabase {
    pub fn new(
        mapping: Arc<FactoredSymbolicMapping>,
        relation: &StateDominanceRelation,
        node_limit: usize,
    ) -> Result<BddMapDominatingDatabase, DominanceError> {
        let relation_bdd =
            DominanceRelationBdd::new(relation, &mapping, BddDirection::Dominating, node_limit)?;
        Ok(BddMapDominatingDatabase {
            mapping,
            relation_bdd,
            closed: BTreeMap::new(),
        })
    }
}

impl DominanceDatabase for BddMapDominatingDatabase {
    fn check(&self, state: &[usize], g: u32) -> bool {
        match self.relation_bdd.related_states(state) {
            Ok(dominating) => self
                .closed
                .range(..=g)
                .any(|(_, bucket)| !bucket.and(&dominating).is_false()),
            Err(e) => {
                // Sound degradation: an unanswerable query just never prunes.
                warn!("Symbolic dominance query for {:?} failed: {}.", state, e);
                false
            }
        }
    }

    fn insert(&mut self, state: ExplicitState, g: u32) {
        let encoded = self.mapping.state_bdd(&state);
        let bucket = self
            .closed
            .entry(g)
            .or_insert_with(|| self.mapping.variables().mk_false());
        *bucket = bucket.or(&encoded);
    }
}
