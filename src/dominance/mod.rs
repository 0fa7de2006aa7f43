//! The aggregated state dominance relation of a task.

#[cfg(test)]
mod tests;

use crate::label_relation::LabelRelation;
use crate::relation::{FactorDominanceRelation, SparseFactorRelation};
use log::info;
use std::ops::Index;

/// The converged dominance relation: one preorder per factor plus the label
/// relation they were computed against.
///
/// A full state dominates another when it does in every factor. The relation
/// is immutable after construction and typically shared behind an `Arc`;
/// [`StateDominanceRelation::release_factor_storage`] is the one exception,
/// meant to run before sharing.
pub struct StateDominanceRelation {
    local_relations: Vec<Box<dyn FactorDominanceRelation>>,
    label_relation: Box<dyn LabelRelation>,
}

impl StateDominanceRelation {
    pub fn new(
        local_relations: Vec<Box<dyn FactorDominanceRelation>>,
        label_relation: Box<dyn LabelRelation>,
    ) -> StateDominanceRelation {
        StateDominanceRelation {
            local_relations,
            label_relation,
        }
    }

    /// Number of factors.
    pub fn len(&self) -> usize {
        self.local_relations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.local_relations.is_empty()
    }

    pub fn local_relations(&self) -> &[Box<dyn FactorDominanceRelation>] {
        &self.local_relations
    }

    pub fn label_relation(&self) -> &dyn LabelRelation {
        self.label_relation.as_ref()
    }

    /// `t` dominates `s` when it does in every factor.
    pub fn dominates(&self, t: &[usize], s: &[usize]) -> bool {
        debug_assert_eq!(t.len(), self.local_relations.len());
        debug_assert_eq!(s.len(), self.local_relations.len());
        self.local_relations
            .iter()
            .enumerate()
            .all(|(i, relation)| relation.simulates(t[i], s[i]))
    }

    /// Sum of non-reflexive dominance pairs over all factors.
    pub fn num_simulations(&self) -> usize {
        self.local_relations
            .iter()
            .map(|r| r.num_simulations())
            .sum()
    }

    /// Sum of unordered mutual-dominance pairs over all factors.
    pub fn num_equivalences(&self) -> usize {
        self.local_relations
            .iter()
            .map(|r| r.num_equivalences())
            .sum()
    }

    /// Number of states of the full (product) task.
    pub fn num_states_problem(&self) -> f64 {
        self.local_relations
            .iter()
            .map(|r| r.num_states() as f64)
            .product()
    }

    /// Number of dominance pairs `(t, s)` of the product relation with
    /// `t != s`.
    pub fn num_st_pairs(&self) -> f64 {
        let related: f64 = self
            .local_relations
            .iter()
            .map(|r| (r.num_simulations() + r.num_states()) as f64)
            .product();
        related - self.num_states_problem()
    }

    /// Fraction of product state pairs related by dominance. With
    /// `ignore_equivalences`, mutually dominating pairs are subtracted;
    /// otherwise only the identical pairs are.
    pub fn percentage_simulations(&self, ignore_equivalences: bool) -> f64 {
        let related: f64 = self
            .local_relations
            .iter()
            .map(|r| {
                let n = r.num_states() as f64;
                (r.num_simulations() as f64 + n) / (n * n)
            })
            .product();
        if ignore_equivalences {
            related - self.percentage_equivalences()
        } else {
            related - self.percentage_equal()
        }
    }

    /// Fraction of product state pairs that are mutually dominating.
    pub fn percentage_equivalences(&self) -> f64 {
        self.local_relations
            .iter()
            .map(|r| {
                let n = r.num_states() as f64;
                (2.0 * r.num_equivalences() as f64 + n) / (n * n)
            })
            .product()
    }

    /// Fraction of product state pairs that are identical.
    pub fn percentage_equal(&self) -> f64 {
        self.local_relations
            .iter()
            .map(|r| 1.0 / r.num_states() as f64)
            .product()
    }

    /// Log a statistics summary of the converged relation.
    pub fn dump_statistics(&self) {
        let useful = self
            .local_relations
            .iter()
            .filter(|r| !r.is_identity())
            .count();
        info!(
            "Dominance relation with {} factors ({} non-identity).",
            self.len(),
            useful
        );
        info!(
            "Per-factor totals: {} simulations, {} equivalences.",
            self.num_simulations(),
            self.num_equivalences()
        );
        info!(
            "Problem has {:.0} states and {:.0} dominance pairs ({:.4}% of all pairs, {:.4}% equivalences, {:.4}% equal).",
            self.num_states_problem(),
            self.num_st_pairs(),
            100.0 * self.percentage_simulations(false),
            100.0 * self.percentage_equivalences(),
            100.0 * self.percentage_equal(),
        );
    }

    /// Replace one factor's relation with the identity, releasing its storage.
    /// Meant for consumers that switched to a derived (symbolic)
    /// representation of that factor.
    pub fn release_factor_storage(&mut self, factor: usize) {
        let num_states = self.local_relations[factor].num_states();
        self.local_relations[factor] = Box::new(SparseFactorRelation::identity(num_states));
    }
}

impl Index<usize> for StateDominanceRelation {
    type Output = dyn FactorDominanceRelation;

    fn index(&self, factor: usize) -> &Self::Output {
        self.local_relations[factor].as_ref()
    }
}
