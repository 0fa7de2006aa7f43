use crate::fts::FtsTask;
use crate::label_relation::{FactorSet, LabelRelation};
use crate::relation::FactorDominanceRelation;

/// Label × label dominance matrix with one [`FactorSet`] per pair.
///
/// `dominates_in[l1][l2]` is the set of factors where `l1` dominates `l2`;
/// `dominated_by_noop_in[l]` the set of factors where staying put dominates
/// `l`. Cost is folded into the seed: a costlier label never dominates. The
/// irrelevant-label flags cache, per factor, whether a label still dominates
/// (or is dominated by) the labels that behave as noops there.
pub struct DenseLabelRelation {
    dominates_in: Vec<Vec<FactorSet>>,
    dominated_by_noop_in: Vec<FactorSet>,
    simulates_irrelevant: Vec<Vec<bool>>,
    simulated_by_irrelevant: Vec<Vec<bool>>,
}

impl DenseLabelRelation {
    pub fn new(task: &FtsTask) -> DenseLabelRelation {
        let num_labels = task.num_labels();
        let num_factors = task.num_factors();
        let dominates_in = (0..num_labels)
            .map(|l1| {
                (0..num_labels)
                    .map(|l2| {
                        if task.label_cost(l1) <= task.label_cost(l2) {
                            FactorSet::All
                        } else {
                            FactorSet::None
                        }
                    })
                    .collect()
            })
            .collect();
        DenseLabelRelation {
            dominates_in,
            dominated_by_noop_in: vec![FactorSet::All; num_labels],
            simulates_irrelevant: vec![vec![true; num_factors]; num_labels],
            simulated_by_irrelevant: vec![vec![true; num_factors]; num_labels],
        }
    }

    fn simulates_in(&self, l1: usize, l2: usize, factor: usize) -> bool {
        self.dominates_in[l1][l2].contains(factor)
    }

    fn set_not_simulates(&mut self, l1: usize, l2: usize, factor: usize) -> bool {
        self.dominates_in[l1][l2].remove(factor)
    }

    fn set_not_simulated_by_noop(&mut self, label: usize, factor: usize) -> bool {
        self.dominated_by_noop_in[label].remove(factor)
    }
}

impl LabelRelation for DenseLabelRelation {
    fn label_dominates_label_in_all_other(
        &self,
        _task: &FtsTask,
        factor: usize,
        l1: usize,
        l2: usize,
    ) -> bool {
        self.dominates_in[l1][l2].contains_all_except(factor)
    }

    fn noop_simulates_label_in_all_other(
        &self,
        _task: &FtsTask,
        factor: usize,
        label: usize,
    ) -> bool {
        self.dominated_by_noop_in[label].contains_all_except(factor)
    }

    fn update_factor(
        &mut self,
        task: &FtsTask,
        factor: usize,
        relation: &dyn FactorDominanceRelation,
    ) -> bool {
        let lts = task.factor(factor);
        let mut changed = false;

        for &group2 in lts.relevant_label_groups() {
            for &l2 in lts.labels_of_group(group2) {
                // Re-verify pairs of relevant labels against the current state
                // relation, with early exit on the first refuting transition.
                for &group1 in lts.relevant_label_groups() {
                    for &l1 in lts.labels_of_group(group1) {
                        if l1 == l2 || !self.simulates_in(l1, l2, factor) {
                            continue;
                        }
                        for &(src, target) in lts.transitions_of_group(group2) {
                            let responds = lts
                                .transitions_of_group(group1)
                                .iter()
                                .any(|&(src1, target1)| {
                                    src1 == src && relation.simulates(target1, target)
                                });
                            if !responds {
                                changed |= self.set_not_simulates(l1, l2, factor);
                                break;
                            }
                        }
                    }
                }

                // Does staying put still dominate l2 in this factor?
                if self.simulated_by_irrelevant[l2][factor] {
                    for &(src, target) in lts.transitions_of_group(group2) {
                        if !relation.simulates(src, target) {
                            self.simulated_by_irrelevant[l2][factor] = false;
                            changed |= self.set_not_simulated_by_noop(l2, factor);
                            for label in lts.irrelevant_labels() {
                                changed |= self.set_not_simulates(label, l2, factor);
                            }
                            break;
                        }
                    }
                }

                // Does l2 still dominate staying put (a dominating response
                // from every state)?
                if self.simulates_irrelevant[l2][factor] {
                    for s in 0..lts.num_states() {
                        let responds = lts
                            .transitions_of_group(group2)
                            .iter()
                            .any(|&(src, target)| src == s && relation.simulates(target, s));
                        if !responds {
                            self.simulates_irrelevant[l2][factor] = false;
                            for label in lts.irrelevant_labels() {
                                changed |= self.set_not_simulates(l2, label, factor);
                            }
                            break;
                        }
                    }
                }
            }
        }
        changed
    }
}
