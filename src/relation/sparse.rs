use crate::fts::LabelledTransitionSystem;
use crate::relation::FactorDominanceRelation;
use std::collections::HashSet;

/// Pair-set dominance relation storing only non-reflexive pairs.
pub struct SparseFactorRelation {
    num_states: usize,
    simulations: HashSet<(usize, usize)>,
}

impl SparseFactorRelation {
    /// Goal-implication seed, same as the dense backend.
    pub fn new(lts: &LabelledTransitionSystem) -> SparseFactorRelation {
        let n = lts.num_states();
        let mut simulations = HashSet::new();
        for t in 0..n {
            for s in 0..n {
                if t != s && (lts.is_goal(t) || !lts.is_goal(s)) {
                    simulations.insert((t, s));
                }
            }
        }
        SparseFactorRelation {
            num_states: n,
            simulations,
        }
    }

    /// The identity relation. Used to release the storage of a factor whose
    /// relation a consumer replaced by a derived representation.
    pub fn identity(num_states: usize) -> SparseFactorRelation {
        SparseFactorRelation {
            num_states,
            simulations: HashSet::new(),
        }
    }
}

impl FactorDominanceRelation for SparseFactorRelation {
    fn num_states(&self) -> usize {
        self.num_states
    }

    fn simulates(&self, t: usize, s: usize) -> bool {
        t == s || self.simulations.contains(&(t, s))
    }

    fn remove(&mut self, t: usize, s: usize) {
        debug_assert_ne!(t, s);
        self.simulations.remove(&(t, s));
    }

    fn apply_to_simulations_until(&self, f: &mut dyn FnMut(usize, usize) -> bool) -> bool {
        for &(t, s) in &self.simulations {
            if f(t, s) {
                return true;
            }
        }
        false
    }

    fn remove_simulations_if(
        &mut self,
        f: &mut dyn FnMut(&dyn FactorDominanceRelation, usize, usize) -> bool,
    ) -> bool {
        let mut removed = Vec::new();
        for &(t, s) in &self.simulations {
            if f(&*self, t, s) {
                removed.push((t, s));
            }
        }
        for pair in &removed {
            self.simulations.remove(pair);
        }
        !removed.is_empty()
    }

    fn num_simulations(&self) -> usize {
        self.simulations.len()
    }
}
