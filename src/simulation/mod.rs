//! The label-dominance simulation fixpoint.
//!
//! The computation alternates between two monotone shrinking passes: each
//! factor's state relation is re-verified against the current label relation
//! ([`update_local_relation`]), and the label relation is re-verified against
//! the new state relations. When a label pass removes nothing, the pair of
//! relations is the greatest mutual fixpoint and a
//! [`StateDominanceRelation`] is emitted.
//!
//! The driver is a [`computation_process::Computation`]: every step performs
//! one outer round and suspends, so callers can interleave or cancel the
//! work. [`compute_ld_simulation`] runs it to completion.

mod ld_simulation_config;

#[cfg(test)]
mod tests;

pub use ld_simulation_config::LdSimulationConfig;

use crate::dominance::StateDominanceRelation;
use crate::fts::FtsTask;
use crate::label_relation::LabelRelation;
use crate::relation::FactorDominanceRelation;
use cancel_this::{Cancellable, Cancelled};
use computation_process::Incomplete::Suspended;
use computation_process::{Algorithm, Completable, Computation, ComputationStep};
use log::{debug, info, trace};
use std::sync::Arc;

/// Internal state of the fixpoint computation.
pub struct LdSimulationState {
    iteration: usize,
    computing: Option<ComputingState>,
    result: Option<Arc<StateDominanceRelation>>,
}

struct ComputingState {
    local_relations: Vec<Box<dyn FactorDominanceRelation>>,
    label_relation: Box<dyn LabelRelation>,
    /// Factors whose state relation changed since their last label pass.
    changed_factors: Vec<bool>,
    /// False until the label relation was verified against every factor once.
    label_pass_done: bool,
}

/// Step performing one full outer round: refine every factor's state
/// relation, then re-verify the label relation for every factor.
pub struct FullRescanStep;

/// Like [`FullRescanStep`], but the label pass only re-examines factors whose
/// state relation changed since their previous label pass. The converged
/// result is identical.
pub struct IncrementalStep;

/// The label-dominance simulation fixpoint as a suspendable computation.
pub type LdSimulation = Computation<
    LdSimulationConfig,
    LdSimulationState,
    Arc<StateDominanceRelation>,
    FullRescanStep,
>;

/// The incremental variant of [`LdSimulation`].
pub type IncrementalLdSimulation = Computation<
    LdSimulationConfig,
    LdSimulationState,
    Arc<StateDominanceRelation>,
    IncrementalStep,
>;

impl From<&LdSimulationConfig> for LdSimulationState {
    fn from(config: &LdSimulationConfig) -> Self {
        let task = config.task.as_ref();
        let local_relations = task
            .factors()
            .iter()
            .map(|lts| config.factor_backend.build_relation(lts))
            .collect();
        let label_relation = config.label_backend.build_relation(task);

        let total_states: usize = task.factors().iter().map(|lts| lts.num_states()).sum();
        let total_transitions: usize = task.factors().iter().map(|lts| lts.num_transitions()).sum();
        info!(
            "Computing label-dominance simulation for {} factors ({} states, {} transitions, {} labels).",
            task.num_factors(),
            total_states,
            total_transitions,
            task.num_labels()
        );

        LdSimulationState {
            iteration: 0,
            computing: Some(ComputingState {
                local_relations,
                label_relation,
                changed_factors: vec![false; task.num_factors()],
                label_pass_done: false,
            }),
            result: None,
        }
    }
}

impl LdSimulationState {
    /// Number of completed outer rounds.
    pub fn iteration(&self) -> usize {
        self.iteration
    }

    fn advance(
        &mut self,
        context: &LdSimulationConfig,
        incremental: bool,
    ) -> Completable<Arc<StateDominanceRelation>> {
        if let Some(result) = &self.result {
            return Ok(result.clone());
        }
        if self.iteration >= context.max_iterations {
            return Err(Cancelled::new("LdSimulationConfig::max_iterations").into());
        }
        self.iteration += 1;

        let task = context.task.as_ref();
        let converged = {
            let Some(computing) = self.computing.as_mut() else {
                // `result` is always set before `computing` is released.
                unreachable!("simulation stepped without internal state");
            };

            let mut local_changed = false;
            for factor in 0..task.num_factors() {
                let changed = update_local_relation(
                    task,
                    computing.label_relation.as_ref(),
                    factor,
                    computing.local_relations[factor].as_mut(),
                );
                computing.changed_factors[factor] = computing.changed_factors[factor] || changed;
                local_changed |= changed;
            }

            let mut label_changed = false;
            for factor in 0..task.num_factors() {
                if incremental && computing.label_pass_done && !computing.changed_factors[factor] {
                    continue;
                }
                label_changed |= computing.label_relation.update_factor(
                    task,
                    factor,
                    computing.local_relations[factor].as_ref(),
                );
                computing.changed_factors[factor] = false;
            }
            computing.label_pass_done = true;

            debug!(
                "Round {}: state relations changed: {}, label relation changed: {}.",
                self.iteration, local_changed, label_changed
            );
            !label_changed
        };

        if !converged {
            return Err(Suspended);
        }

        let Some(computing) = self.computing.take() else {
            unreachable!("simulation stepped without internal state");
        };
        let relation = Arc::new(StateDominanceRelation::new(
            computing.local_relations,
            computing.label_relation,
        ));
        info!(
            "Label-dominance simulation converged after {} rounds.",
            self.iteration
        );
        relation.dump_statistics();
        self.result = Some(relation.clone());
        Ok(relation)
    }
}

impl ComputationStep<LdSimulationConfig, LdSimulationState, Arc<StateDominanceRelation>>
    for FullRescanStep
{
    fn step(
        context: &LdSimulationConfig,
        state: &mut LdSimulationState,
    ) -> Completable<Arc<StateDominanceRelation>> {
        trace!(
            "{}: round {}.",
            crate::simple_type_name::<Self>(),
            state.iteration + 1
        );
        state.advance(context, false)
    }
}

impl ComputationStep<LdSimulationConfig, LdSimulationState, Arc<StateDominanceRelation>>
    for IncrementalStep
{
    fn step(
        context: &LdSimulationConfig,
        state: &mut LdSimulationState,
    ) -> Completable<Arc<StateDominanceRelation>> {
        trace!(
            "{}: round {}.",
            crate::simple_type_name::<Self>(),
            state.iteration + 1
        );
        state.advance(context, true)
    }
}

/// Refine one factor's state relation against the current label relation
/// until it is locally stable. Returns whether anything was removed.
///
/// A pair `t ⪰ s` survives when every transition `s -l-> s'` has a response:
/// either staying put covers it (`t ⪰ s'` and the noop dominates `l` in all
/// other factors), or some transition `t -l'-> t'` has `t' ⪰ s'` with `l'`
/// dominating `l` in all other factors.
pub fn update_local_relation(
    task: &FtsTask,
    label_relation: &dyn LabelRelation,
    factor: usize,
    relation: &mut dyn FactorDominanceRelation,
) -> bool {
    let lts = task.factor(factor);
    let mut changed_any = false;
    loop {
        let removed = relation.remove_simulations_if(&mut |view, t, s| {
            lts.transitions_from(s).iter().any(|tr| {
                lts.labels_of_group(tr.group).iter().any(|&label| {
                    let noop_response = view.simulates(t, tr.target)
                        && label_relation.noop_simulates_label_in_all_other(task, factor, label);
                    if noop_response {
                        return false;
                    }
                    !lts.transitions_from(t).iter().any(|response| {
                        view.simulates(response.target, tr.target)
                            && lts.labels_of_group(response.group).iter().any(
                                |&response_label| {
                                    label_relation.label_dominates_label_in_all_other(
                                        task,
                                        factor,
                                        response_label,
                                        label,
                                    )
                                },
                            )
                    })
                })
            })
        });
        if removed {
            changed_any = true;
        } else {
            break;
        }
    }
    changed_any
}

/// Run the fixpoint to completion with [`FullRescanStep`].
pub fn compute_ld_simulation(
    config: impl Into<LdSimulationConfig>,
) -> Cancellable<Arc<StateDominanceRelation>> {
    let config = config.into();
    let state = LdSimulationState::from(&config);
    LdSimulation::run(config, state)
}

/// Run the fixpoint to completion with [`IncrementalStep`].
pub fn compute_incremental_ld_simulation(
    config: impl Into<LdSimulationConfig>,
) -> Cancellable<Arc<StateDominanceRelation>> {
    let config = config.into();
    let state = LdSimulationState::from(&config);
    IncrementalLdSimulation::run(config, state)
}
