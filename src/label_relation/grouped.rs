use crate::fts::{FtsTask, LabelGroup, LabelledTransitionSystem};
use crate::label_relation::LabelRelation;
use crate::relation::FactorDominanceRelation;
use log::debug;
use std::collections::HashSet;

/// Dominance between the label groups of a single factor.
///
/// Labels of one group have identical transitions in the factor, so the
/// relation is kept per group instead of per label. Irrelevant groups behave
/// as noops and are represented implicitly: the stored sets only ever hold
/// relevant groups.
pub struct LabelGroupSimulationRelation {
    factor: usize,
    /// `(g1, g2)`: `g1` dominates `g2` in this factor.
    simulations: HashSet<(LabelGroup, LabelGroup)>,
    /// Groups dominated by staying put.
    noop_simulations: HashSet<LabelGroup>,
    /// Groups dominating staying put (a dominating transition from every state).
    simulations_noop: HashSet<LabelGroup>,
    /// `group × src -> targets` index over the factor's transitions.
    targets: Vec<Vec<Vec<usize>>>,
}

fn is_superset(sup: &[usize], sub: &[usize]) -> bool {
    sub.iter().all(|x| sup.binary_search(x).is_ok())
}

impl LabelGroupSimulationRelation {
    /// Optimistic seed: `g1` may dominate `g2` only if it is applicable
    /// wherever `g2` is; the fixpoint updates remove refuted members.
    pub fn new(lts: &LabelledTransitionSystem, factor: usize) -> LabelGroupSimulationRelation {
        let num_groups = lts.num_label_groups();
        let mut targets = vec![vec![Vec::new(); lts.num_states()]; num_groups];
        let mut sources: Vec<Vec<usize>> = vec![Vec::new(); num_groups];
        for &group in lts.relevant_label_groups() {
            for &(src, target) in lts.transitions_of_group(group) {
                targets[group.index()][src].push(target);
                sources[group.index()].push(src);
            }
            // Transitions are sorted by source, so a plain dedup suffices.
            sources[group.index()].dedup();
        }

        let mut simulations = HashSet::new();
        for &g1 in lts.relevant_label_groups() {
            for &g2 in lts.relevant_label_groups() {
                if is_superset(&sources[g1.index()], &sources[g2.index()]) {
                    simulations.insert((g1, g2));
                }
            }
        }
        let noop_simulations: HashSet<LabelGroup> =
            lts.relevant_label_groups().iter().copied().collect();
        let simulations_noop: HashSet<LabelGroup> = lts
            .relevant_label_groups()
            .iter()
            .copied()
            .filter(|group| sources[group.index()].len() == lts.num_states())
            .collect();

        LabelGroupSimulationRelation {
            factor,
            simulations,
            noop_simulations,
            simulations_noop,
            targets,
        }
    }

    /// `g1` dominates `g2` in this factor; irrelevant groups act as noops.
    pub fn simulates(
        &self,
        lts: &LabelledTransitionSystem,
        g1: LabelGroup,
        g2: LabelGroup,
    ) -> bool {
        match (lts.is_relevant_group(g1), lts.is_relevant_group(g2)) {
            (true, true) => self.simulations.contains(&(g1, g2)),
            (true, false) => self.simulations_noop.contains(&g1),
            (false, true) => self.noop_simulations.contains(&g2),
            (false, false) => true,
        }
    }

    /// Staying put dominates `group` in this factor.
    pub fn noop_simulates(&self, lts: &LabelledTransitionSystem, group: LabelGroup) -> bool {
        !lts.is_relevant_group(group) || self.noop_simulations.contains(&group)
    }

    /// Re-verify every set member against the factor's current state relation.
    pub fn update(
        &mut self,
        lts: &LabelledTransitionSystem,
        relation: &dyn FactorDominanceRelation,
    ) -> bool {
        let mut changed = false;
        let targets = &self.targets;

        let before = self.simulations.len();
        self.simulations.retain(|&(g1, g2)| {
            lts.transitions_of_group(g2).iter().all(|&(src, target)| {
                targets[g1.index()][src]
                    .iter()
                    .any(|&response| relation.simulates(response, target))
            })
        });
        changed |= self.simulations.len() != before;

        let before = self.noop_simulations.len();
        self.noop_simulations.retain(|&group| {
            lts.transitions_of_group(group)
                .iter()
                .all(|&(src, target)| relation.simulates(src, target))
        });
        changed |= self.noop_simulations.len() != before;

        let before = self.simulations_noop.len();
        self.simulations_noop.retain(|&group| {
            (0..lts.num_states()).all(|s| {
                targets[group.index()][s]
                    .iter()
                    .any(|&response| relation.simulates(response, s))
            })
        });
        changed |= self.simulations_noop.len() != before;

        if changed {
            debug!(
                "Factor {}: group relation now {} simulations, {} noop-dominated, {} noop-dominating.",
                self.factor,
                self.simulations.len(),
                self.noop_simulations.len(),
                self.simulations_noop.len()
            );
        }
        changed
    }
}

/// The canonical label relation: one group relation per factor, cost checked
/// at query time.
pub struct LabelGroupedLabelRelation {
    factors: Vec<LabelGroupSimulationRelation>,
}

impl LabelGroupedLabelRelation {
    pub fn new(task: &FtsTask) -> LabelGroupedLabelRelation {
        let factors = task
            .factors()
            .iter()
            .enumerate()
            .map(|(i, lts)| LabelGroupSimulationRelation::new(lts, i))
            .collect();
        LabelGroupedLabelRelation { factors }
    }

    /// The per-factor group relation.
    pub fn factor(&self, factor: usize) -> &LabelGroupSimulationRelation {
        &self.factors[factor]
    }
}

impl LabelRelation for LabelGroupedLabelRelation {
    fn label_dominates_label_in_all_other(
        &self,
        task: &FtsTask,
        factor: usize,
        l1: usize,
        l2: usize,
    ) -> bool {
        if task.label_cost(l1) > task.label_cost(l2) {
            return false;
        }
        (0..task.num_factors()).all(|j| {
            if j == factor {
                return true;
            }
            let lts = task.factor(j);
            self.factors[j].simulates(lts, lts.group_of_label(l1), lts.group_of_label(l2))
        })
    }

    fn noop_simulates_label_in_all_other(
        &self,
        task: &FtsTask,
        factor: usize,
        label: usize,
    ) -> bool {
        (0..task.num_factors()).all(|j| {
            if j == factor {
                return true;
            }
            let lts = task.factor(j);
            self.factors[j].noop_simulates(lts, lts.group_of_label(label))
        })
    }

    fn update_factor(
        &mut self,
        task: &FtsTask,
        factor: usize,
        relation: &dyn FactorDominanceRelation,
    ) -> bool {
        self.factors[factor].update(task.factor(factor), relation)
    }
}
