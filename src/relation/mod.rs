//! Per-factor state dominance relations.
//!
//! A relation starts from the goal-implication seed (`t` dominates `s` unless
//! `s` satisfies the goal and `t` does not) and only ever shrinks while the
//! fixpoint re-verifies its pairs. Reflexive pairs are never removed.

mod dense;
mod sparse;


pub use dense::DenseFactorRelation;
pub use sparse::SparseFactorRelation;

use crate::fts::LabelledTransitionSystem;
use log::debug;

/// A reflexive dominance preorder over the states of one factor.
///
/// `simulates(t, s)` reads "`t` dominates `s`": everything `s` can contribute
/// towards the goal, `t` can as well.
pub trait FactorDominanceRelation {
    fn num_states(&self) -> usize;

    /// True when `t` dominates `s`.
    fn simulates(&self, t: usize, s: usize) -> bool;

    /// True when the two states dominate each other.
    fn similar(&self, a: usize, b: usize) -> bool {
        self.simulates(a, b) && self.simulates(b, a)
    }

    /// Remove a single non-reflexive pair.
    fn remove(&mut self, t: usize, s: usize);

    /// Visit the non-reflexive dominance pairs until `f` answers true.
    /// Returns whether the visit was interrupted.
    fn apply_to_simulations_until(&self, f: &mut dyn FnMut(usize, usize) -> bool) -> bool;

    /// Remove every non-reflexive pair for which `f` answers true. The
    /// predicate queries the relation as it was when the call started.
    /// Returns whether anything was removed.
    fn remove_simulations_if(
        &mut self,
        f: &mut dyn FnMut(&dyn FactorDominanceRelation, usize, usize) -> bool,
    ) -> bool;

    /// True when no state dominates a different state.
    fn is_identity(&self) -> bool {
        !self.apply_to_simulations_until(&mut |_, _| true)
    }

    /// Number of non-reflexive dominance pairs.
    fn num_simulations(&self) -> usize {
        let mut count = 0;
        self.apply_to_simulations_until(&mut |_, _| {
            count += 1;
            false
        });
        count
    }

    /// Number of unordered pairs of mutually dominating states.
    fn num_equivalences(&self) -> usize {
        let mut count = 0;
        for a in 0..self.num_states() {
            for b in (a + 1)..self.num_states() {
                if self.similar(a, b) {
                    count += 1;
                }
            }
        }
        count
    }

    /// Number of equivalence classes w.r.t. mutual dominance.
    fn num_different_states(&self) -> usize {
        let mut count = 0;
        for s in 0..self.num_states() {
            if !(0..s).any(|t| self.similar(s, t)) {
                count += 1;
            }
        }
        count
    }

    /// Log the relation, one line per dominated state.
    fn dump(&self) {
        for s in 0..self.num_states() {
            let dominating: Vec<usize> = (0..self.num_states())
                .filter(|&t| t != s && self.simulates(t, s))
                .collect();
            if !dominating.is_empty() {
                debug!("State {} is dominated by {:?}.", s, dominating);
            }
        }
    }
}

/// Storage backend for factor dominance relations.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FactorRelationBackend {
    /// N×N boolean matrix; constant-time queries.
    Dense,
    /// Hash set of non-reflexive pairs; compact for near-identity relations.
    Sparse,
}

impl FactorRelationBackend {
    /// Create the goal-implication seeded relation for one factor.
    pub fn build_relation(
        &self,
        lts: &LabelledTransitionSystem,
    ) -> Box<dyn FactorDominanceRelation> {
        match self {
            FactorRelationBackend::Dense => Box::new(DenseFactorRelation::new(lts)),
            FactorRelationBackend::Sparse => Box::new(SparseFactorRelation::new(lts)),
        }
    }
}
