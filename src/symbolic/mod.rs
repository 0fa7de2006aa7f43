//! Symbolic (BDD) representation of states and dominance relations.
//!
//! Factor values are log-encoded into a shared [`BddVariableSet`]; the
//! dominance relation of each factor becomes one BDD per value, unioning the
//! encodings of all related values. Every union runs under a node budget so
//! that an exploding representation surfaces as a recoverable
//! [`DominanceError::SymbolicSizeExceeded`] instead of exhausting memory.

mod relation_bdd;


pub use relation_bdd::{BddDirection, BddFactorDominanceRelation, DominanceRelationBdd};

use crate::error::DominanceError;
use crate::fts::FtsTask;
use biodivine_lib_bdd::{Bdd, BddVariableSet};
use log::debug;

/// Number of satisfying assignments of a BDD over its full variable set.
pub fn satisfying_states(bdd: &Bdd) -> f64 {
    bdd.cardinality()
}

/// Log-encoding of one factor's values into a slice of BDD variables.
pub struct SymbolicMapping {
    state_bdds: Vec<Bdd>,
}

impl SymbolicMapping {
    /// The BDD fixing this factor's variables to the encoding of `value`.
    pub fn state_bdd(&self, value: usize) -> &Bdd {
        &self.state_bdds[value]
    }

    pub fn num_values(&self) -> usize {
        self.state_bdds.len()
    }
}

/// Symbolic encoding of the full factored state space: ⌈log₂ N⌉ variables per
/// factor inside one shared variable set.
pub struct FactoredSymbolicMapping {
    variables: BddVariableSet,
    factors: Vec<SymbolicMapping>,
}

fn bits_for(num_states: usize) -> usize {
    debug_assert!(num_states > 0);
    ((usize::BITS - (num_states - 1).leading_zeros()) as usize).max(1)
}

impl FactoredSymbolicMapping {
    pub fn new(task: &FtsTask) -> Result<FactoredSymbolicMapping, DominanceError> {
        let bits: Vec<usize> = task
            .factors()
            .iter()
            .map(|lts| bits_for(lts.num_states()))
            .collect();
        let total: usize = bits.iter().sum();
        let total = u16::try_from(total).map_err(|_| DominanceError::UnsupportedTask {
            reason: format!("task requires {total} BDD variables"),
        })?;

        let variables = BddVariableSet::new_anonymous(total);
        let all_variables = variables.variables();

        let mut factors = Vec::with_capacity(task.num_factors());
        let mut offset = 0;
        for (lts, &factor_bits) in task.factors().iter().zip(&bits) {
            let factor_variables = &all_variables[offset..offset + factor_bits];
            offset += factor_bits;

            let state_bdds = (0..lts.num_states())
                .map(|value| {
                    let mut bdd = variables.mk_true();
                    for (bit, &variable) in factor_variables.iter().enumerate() {
                        let literal = variables.mk_literal(variable, (value >> bit) & 1 == 1);
                        bdd = bdd.and(&literal);
                    }
                    bdd
                })
                .collect();
            factors.push(SymbolicMapping { state_bdds });
        }

        debug!(
            "Symbolic mapping with {} variables for {} factors.",
            total,
            factors.len()
        );
        Ok(FactoredSymbolicMapping { variables, factors })
    }

    pub fn variables(&self) -> &BddVariableSet {
        &self.variables
    }

    pub fn num_factors(&self) -> usize {
        self.factors.len()
    }

    pub fn factor(&self, factor: usize) -> &SymbolicMapping {
        &self.factors[factor]
    }

    /// The BDD encoding one full state (conjunction over all factors).
    pub fn state_bdd(&self, state: &[usize]) -> Bdd {
        debug_assert_eq!(state.len(), self.factors.len());
        let mut bdd = self.variables.mk_true();
        for (factor, &value) in state.iter().enumerate() {
            bdd = bdd.and(self.factors[factor].state_bdd(value));
        }
        bdd
    }
}
