use crate::fts::LabelledTransitionSystem;
use crate::relation::FactorDominanceRelation;

/// Matrix-backed dominance relation; `matrix[t][s]` is true when `t`
/// dominates `s`.
pub struct DenseFactorRelation {
    matrix: Vec<Vec<bool>>,
}

impl DenseFactorRelation {
    /// Goal-implication seed: `t` dominates `s` unless `s` satisfies the goal
    /// and `t` does not.
    pub fn new(lts: &LabelledTransitionSystem) -> DenseFactorRelation {
        let n = lts.num_states();
        let matrix = (0..n)
            .map(|t| (0..n).map(|s| lts.is_goal(t) || !lts.is_goal(s)).collect())
            .collect();
        DenseFactorRelation { matrix }
    }
}

impl FactorDominanceRelation for DenseFactorRelation {
    fn num_states(&self) -> usize {
        self.matrix.len()
    }

    fn simulates(&self, t: usize, s: usize) -> bool {
        self.matrix[t][s]
    }

    fn remove(&mut self, t: usize, s: usize) {
        debug_assert_ne!(t, s);
        self.matrix[t][s] = false;
    }

    fn apply_to_simulations_until(&self, f: &mut dyn FnMut(usize, usize) -> bool) -> bool {
        let n = self.matrix.len();
        for t in 0..n {
            for s in 0..n {
                if t != s && self.matrix[t][s] && f(t, s) {
                    return true;
                }
            }
        }
        false
    }

    fn remove_simulations_if(
        &mut self,
        f: &mut dyn FnMut(&dyn FactorDominanceRelation, usize, usize) -> bool,
    ) -> bool {
        let n = self.matrix.len();
        let mut removed = Vec::new();
        for t in 0..n {
            for s in 0..n {
                if t != s && self.matrix[t][s] && f(&*self, t, s) {
                    removed.push((t, s));
                }
            }
        }
        for &(t, s) in &removed {
            self.matrix[t][s] = false;
        }
        !removed.is_empty()
    }
}
