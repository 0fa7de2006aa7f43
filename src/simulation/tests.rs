use crate::dominance::StateDominanceRelation;
use crate::fts::FtsTask;
use crate::label_relation::{LabelRelation, LabelRelationBackend};
use crate::relation::{FactorDominanceRelation, FactorRelationBackend};
use crate::simulation::{
    LdSimulation, LdSimulationConfig, LdSimulationState, compute_incremental_ld_simulation,
    compute_ld_simulation, update_local_relation,
};
use crate::test_utils::{chain_task, factor, init_logger, task};
use cancel_this::Cancellable;
use computation_process::Incomplete::Suspended;
use computation_process::{Computable, Stateful};
use std::sync::Arc;

#[test]
fn two_state_goal_factor() -> Cancellable<()> {
    init_logger();
    let task = task(&[1], vec![factor(2, 0, &[1], &[(0, 0, 1)])]);
    let relation = compute_ld_simulation(&task)?;

    assert!(relation.dominates(&[1], &[0]));
    assert!(!relation.dominates(&[0], &[1]));
    assert!(relation.dominates(&[0], &[0]));
    assert!(relation.dominates(&[1], &[1]));
    Ok(())
}

#[test]
fn three_state_chain_is_totally_ordered() -> Cancellable<()> {
    init_logger();
    let relation = compute_ld_simulation(&chain_task())?;

    assert!(relation.dominates(&[1], &[0]));
    assert!(relation.dominates(&[2], &[0]));
    assert!(relation.dominates(&[2], &[1]));
    assert!(!relation.dominates(&[0], &[1]));
    assert!(!relation.dominates(&[0], &[2]));
    assert!(!relation.dominates(&[1], &[2]));
    assert_eq!(relation.num_simulations(), 3);
    assert_eq!(relation.num_equivalences(), 0);
    Ok(())
}

#[test]
fn equal_cost_identical_labels_dominate_mutually() -> Cancellable<()> {
    init_logger();
    // Labels 0 and 1 behave identically in both factors and cost the same.
    let task = task(
        &[1, 1],
        vec![
            factor(2, 0, &[1], &[(0, 0, 1), (1, 0, 1)]),
            factor(2, 0, &[1], &[(0, 0, 1), (1, 0, 1)]),
        ],
    );
    let relation = compute_ld_simulation(&task)?;

    for f in 0..2 {
        assert!(
            relation
                .label_relation()
                .label_dominates_label_in_all_other(&task, f, 0, 1)
        );
        assert!(
            relation
                .label_relation()
                .label_dominates_label_in_all_other(&task, f, 1, 0)
        );
    }
    Ok(())
}

#[test]
fn costlier_label_dominance_is_asymmetric() -> Cancellable<()> {
    init_logger();
    // Same structure, but label 1 costs more: it is dominated by label 0 and
    // never dominates it.
    let task = task(
        &[1, 2],
        vec![
            factor(2, 0, &[1], &[(0, 0, 1), (1, 0, 1)]),
            factor(2, 0, &[1], &[(0, 0, 1), (1, 0, 1)]),
        ],
    );
    let relation = compute_ld_simulation(&task)?;

    for f in 0..2 {
        assert!(
            relation
                .label_relation()
                .label_dominates_label_in_all_other(&task, f, 0, 1)
        );
        assert!(
            !relation
                .label_relation()
                .label_dominates_label_in_all_other(&task, f, 1, 0)
        );
    }
    Ok(())
}

/// A two-factor task exercising irrelevant labels and asymmetric structure.
fn mixed_task() -> Arc<FtsTask> {
    task(
        &[1, 1],
        vec![
            factor(3, 0, &[2], &[(0, 0, 1), (0, 1, 2), (1, 0, 1)]),
            factor(2, 0, &[1], &[(1, 0, 1)]),
        ],
    )
}

fn all_states() -> Vec<Vec<usize>> {
    (0..3)
        .flat_map(|a| (0..2).map(move |b| vec![a, b]))
        .collect()
}

#[test]
fn every_backend_combination_converges_to_the_same_relation() -> Cancellable<()> {
    init_logger();
    let task = mixed_task();

    let mut results: Vec<Arc<StateDominanceRelation>> = Vec::new();
    for factor_backend in [FactorRelationBackend::Dense, FactorRelationBackend::Sparse] {
        for label_backend in [LabelRelationBackend::Dense, LabelRelationBackend::Grouped] {
            let mut config = LdSimulationConfig::new(task.clone());
            config.factor_backend = factor_backend;
            config.label_backend = label_backend;
            results.push(compute_ld_simulation(config)?);
        }
    }

    let reference = &results[0];
    for other in &results[1..] {
        for t in all_states() {
            for s in all_states() {
                assert_eq!(
                    reference.dominates(&t, &s),
                    other.dominates(&t, &s),
                    "backends disagree on {:?} vs {:?}",
                    t,
                    s
                );
            }
        }
        for f in 0..2 {
            for l1 in 0..2 {
                for l2 in 0..2 {
                    assert_eq!(
                        reference
                            .label_relation()
                            .label_dominates_label_in_all_other(&task, f, l1, l2),
                        other
                            .label_relation()
                            .label_dominates_label_in_all_other(&task, f, l1, l2),
                        "label backends disagree on ({l1}, {l2}) w.r.t. factor {f}"
                    );
                }
                assert_eq!(
                    reference
                        .label_relation()
                        .noop_simulates_label_in_all_other(&task, f, l1),
                    other
                        .label_relation()
                        .noop_simulates_label_in_all_other(&task, f, l1),
                );
            }
        }
    }
    Ok(())
}

#[test]
fn incremental_driver_agrees_with_full_rescan() -> Cancellable<()> {
    init_logger();
    let task = mixed_task();
    let full = compute_ld_simulation(&task)?;
    let incremental = compute_incremental_ld_simulation(&task)?;

    for t in all_states() {
        for s in all_states() {
            assert_eq!(full.dominates(&t, &s), incremental.dominates(&t, &s));
        }
    }
    Ok(())
}

/// The converged relation is a subset of the goal-implication seed: dominance
/// pairs never relate a goal state below a non-goal state.
#[test]
fn goal_implication_holds_after_convergence() -> Cancellable<()> {
    init_logger();
    let task = mixed_task();
    let relation = compute_ld_simulation(&task)?;

    for (i, lts) in task.factors().iter().enumerate() {
        for t in 0..lts.num_states() {
            for s in 0..lts.num_states() {
                if relation[i].simulates(t, s) {
                    assert!(
                        !lts.is_goal(s) || lts.is_goal(t),
                        "factor {i}: {t} dominates goal state {s} without being a goal"
                    );
                }
            }
            assert!(relation[i].simulates(t, t), "factor {i}: lost reflexivity");
        }
    }
    Ok(())
}

/// Transitivity of the converged preorder (removal soundness sanity).
#[test]
fn converged_relation_is_transitive() -> Cancellable<()> {
    init_logger();
    let task = mixed_task();
    let relation = compute_ld_simulation(&task)?;

    for (i, lts) in task.factors().iter().enumerate() {
        let n = lts.num_states();
        for a in 0..n {
            for b in 0..n {
                for c in 0..n {
                    if relation[i].simulates(a, b) && relation[i].simulates(b, c) {
                        assert!(
                            relation[i].simulates(a, c),
                            "factor {i}: transitivity violated on ({a}, {b}, {c})"
                        );
                    }
                }
            }
        }
    }
    Ok(())
}

/// Re-running the update passes on a converged pair of relations removes
/// nothing.
#[test]
fn fixpoint_is_idempotent() {
    init_logger();
    let task = mixed_task();

    let mut locals: Vec<Box<dyn FactorDominanceRelation>> = task
        .factors()
        .iter()
        .map(|lts| FactorRelationBackend::Dense.build_relation(lts))
        .collect();
    let mut labels: Box<dyn LabelRelation> =
        LabelRelationBackend::Grouped.build_relation(&task);

    loop {
        for i in 0..task.num_factors() {
            update_local_relation(&task, labels.as_ref(), i, locals[i].as_mut());
        }
        let mut changed = false;
        for i in 0..task.num_factors() {
            changed |= labels.update_factor(&task, i, locals[i].as_ref());
        }
        if !changed {
            break;
        }
    }

    // One confirming round changes nothing on either side.
    for i in 0..task.num_factors() {
        assert!(!update_local_relation(
            &task,
            labels.as_ref(),
            i,
            locals[i].as_mut()
        ));
        assert!(!labels.update_factor(&task, i, locals[i].as_ref()));
    }

    // And the manual driver agrees with the packaged one.
    let reference = compute_ld_simulation(&task).unwrap();
    for t in all_states() {
        for s in all_states() {
            let manual = (0..task.num_factors()).all(|i| locals[i].simulates(t[i], s[i]));
            assert_eq!(manual, reference.dominates(&t, &s));
        }
    }
}

#[test]
fn iteration_budget_cancels_gracefully() {
    init_logger();
    let mut config = LdSimulationConfig::new(chain_task());
    config.max_iterations = 1;
    assert!(compute_ld_simulation(config).is_err());

    // The chain converges in two rounds.
    let mut config = LdSimulationConfig::new(chain_task());
    config.max_iterations = 2;
    assert!(compute_ld_simulation(config).is_ok());
}

/// The step interface suspends between rounds and caches the final result.
#[test]
fn stepwise_computation_suspends_and_completes() {
    init_logger();
    let config = LdSimulationConfig::new(mixed_task());
    let state = LdSimulationState::from(&config);
    let mut computation = LdSimulation::configure(config, state);

    let mut safety = 0;
    let relation = loop {
        match computation.try_compute() {
            Ok(relation) => break relation,
            Err(Suspended) => {
                safety += 1;
                assert!(safety < 100, "fixpoint failed to converge");
            }
            Err(incomplete) => panic!("unexpected interruption: {}", incomplete),
        }
    };
    assert!(relation.dominates(&[2, 0], &[1, 0]));
    assert!(!relation.dominates(&[2, 1], &[0, 0]));

    // Asking again returns the cached result.
    let again = computation.try_compute().unwrap();
    assert!(Arc::ptr_eq(&relation, &again));
}
