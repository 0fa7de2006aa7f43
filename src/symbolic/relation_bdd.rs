use crate::dominance::StateDominanceRelation;
use crate::error::DominanceError;
use crate::relation::FactorDominanceRelation;
use crate::symbolic::{FactoredSymbolicMapping, SymbolicMapping};
use biodivine_lib_bdd::{Bdd, op_function};
use log::debug;

/// Which side of the dominance relation a BDD collects.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BddDirection {
    /// `dominance_bdd(v)` holds the values dominating `v`.
    Dominating,
    /// `dominance_bdd(v)` holds the values dominated by `v`.
    Dominated,
}

/// One factor's dominance relation as a BDD per value. Every value is related
/// to itself, so its own encoding is always included.
pub struct BddFactorDominanceRelation {
    dominance_bdds: Vec<Bdd>,
}

impl BddFactorDominanceRelation {
    pub fn new(
        mapping: &SymbolicMapping,
        relation: &dyn FactorDominanceRelation,
        direction: BddDirection,
        node_limit: usize,
    ) -> Result<BddFactorDominanceRelation, DominanceError> {
        let n = relation.num_states();
        debug_assert_eq!(n, mapping.num_values());

        let mut dominance_bdds = Vec::with_capacity(n);
        for value in 0..n {
            let mut bdd = mapping.state_bdd(value).clone();
            for other in 0..n {
                if other == value {
                    continue;
                }
                let related = match direction {
                    BddDirection::Dominating => relation.simulates(other, value),
                    BddDirection::Dominated => relation.simulates(value, other),
                };
                if related {
                    bdd = Bdd::binary_op_with_limit(
                        node_limit,
                        &bdd,
                        mapping.state_bdd(other),
                        op_function::or,
                    )
                    .ok_or(DominanceError::SymbolicSizeExceeded { limit: node_limit })?;
                }
            }
            dominance_bdds.push(bdd);
        }
        Ok(BddFactorDominanceRelation { dominance_bdds })
    }

    /// Precompute, per value, the union of all values dominating it.
    pub fn precompute_dominating_bdds(
        mapping: &SymbolicMapping,
        relation: &dyn FactorDominanceRelation,
        node_limit: usize,
    ) -> Result<BddFactorDominanceRelation, DominanceError> {
        Self::new(mapping, relation, BddDirection::Dominating, node_limit)
    }

    /// Precompute, per value, the union of all values it dominates.
    pub fn precompute_dominated_bdds(
        mapping: &SymbolicMapping,
        relation: &dyn FactorDominanceRelation,
        node_limit: usize,
    ) -> Result<BddFactorDominanceRelation, DominanceError> {
        Self::new(mapping, relation, BddDirection::Dominated, node_limit)
    }

    pub fn dominance_bdd(&self, value: usize) -> &Bdd {
        &self.dominance_bdds[value]
    }
}

/// The full dominance relation as per-factor BDDs in one fixed direction.
pub struct DominanceRelationBdd {
    factors: Vec<BddFactorDominanceRelation>,
    direction: BddDirection,
    node_limit: usize,
}

impl DominanceRelationBdd {
    pub fn new(
        relation: &StateDominanceRelation,
        mapping: &FactoredSymbolicMapping,
        direction: BddDirection,
        node_limit: usize,
    ) -> Result<DominanceRelationBdd, DominanceError> {
        debug_assert_eq!(relation.len(), mapping.num_factors());
        let factors = relation
            .local_relations()
            .iter()
            .enumerate()
            .map(|(i, factor_relation)| {
                BddFactorDominanceRelation::new(
                    mapping.factor(i),
                    factor_relation.as_ref(),
                    direction,
                    node_limit,
                )
            })
            .collect::<Result<Vec<_>, _>>()?;
        debug!(
            "Dominance relation BDDs ({:?}) built for {} factors.",
            direction,
            factors.len()
        );
        Ok(DominanceRelationBdd {
            factors,
            direction,
            node_limit,
        })
    }

    pub fn direction(&self) -> BddDirection {
        self.direction
    }

    /// States related to `state` in this relation's direction: the conjunction
    /// of the per-factor dominance BDDs.
    pub fn related_states(&self, state: &[usize]) -> Result<Bdd, DominanceError> {
        debug_assert_eq!(state.len(), self.factors.len());
        let mut result = self.factors[0].dominance_bdd(state[0]).clone();
        for (factor, &value) in state.iter().enumerate().skip(1) {
            result = Bdd::binary_op_with_limit(
                self.node_limit,
                &result,
                self.factors[factor].dominance_bdd(value),
                op_function::and,
            )
            .ok_or(DominanceError::SymbolicSizeExceeded {
                limit: self.node_limit,
            })?;
        }
        Ok(result)
    }
}
