use crate::simulation::compute_ld_simulation;
use crate::test_utils::{chain_task, factor, init_logger, task};

#[test]
fn dominance_is_a_conjunction_over_factors() {
    init_logger();
    // Two independent copies of the 2-state goal factor.
    let task = task(
        &[1, 2],
        vec![
            factor(2, 0, &[1], &[(0, 0, 1)]),
            factor(2, 0, &[1], &[(1, 0, 1)]),
        ],
    );
    let relation = compute_ld_simulation(&task).unwrap();

    assert!(relation.dominates(&[1, 1], &[0, 0]));
    assert!(relation.dominates(&[1, 0], &[0, 0]));
    assert!(relation.dominates(&[0, 1], &[0, 0]));
    // One factor worse, one better: incomparable.
    assert!(!relation.dominates(&[1, 0], &[0, 1]));
    assert!(!relation.dominates(&[0, 0], &[1, 1]));
    // Reflexivity of the product relation.
    for a in 0..2 {
        for b in 0..2 {
            assert!(relation.dominates(&[a, b], &[a, b]));
        }
    }
}

#[test]
fn factor_access_via_index() {
    init_logger();
    let relation = compute_ld_simulation(&chain_task()).unwrap();
    assert_eq!(relation.len(), 1);
    assert!(!relation.is_empty());
    assert!(relation[0].simulates(2, 0));
    assert!(!relation[0].simulates(0, 2));
}

#[test]
fn statistics_of_the_converged_chain() {
    init_logger();
    // Chain 0 -> 1 -> 2 with goal 2 converges to the strict total order
    // 2 > 1 > 0: three simulations, no equivalences.
    let relation = compute_ld_simulation(&chain_task()).unwrap();

    assert_eq!(relation.num_simulations(), 3);
    assert_eq!(relation.num_equivalences(), 0);
    assert_eq!(relation.num_states_problem(), 3.0);
    assert_eq!(relation.num_st_pairs(), 3.0);
    // (3 + 3) / 9 minus the 3/9 identical pairs.
    let expected = 6.0 / 9.0 - 3.0 / 9.0;
    assert!((relation.percentage_simulations(false) - expected).abs() < 1e-9);
    assert!((relation.percentage_equivalences() - 1.0 / 3.0).abs() < 1e-9);
    assert!((relation.percentage_equal() - 1.0 / 3.0).abs() < 1e-9);
}

#[test]
fn release_factor_storage_degrades_to_identity() {
    init_logger();
    let relation = compute_ld_simulation(&chain_task()).unwrap();
    let mut relation =
        std::sync::Arc::try_unwrap(relation).unwrap_or_else(|_| panic!("relation still shared"));

    assert!(!relation[0].is_identity());
    relation.release_factor_storage(0);
    assert!(relation[0].is_identity());
    assert_eq!(relation[0].num_states(), 3);
    // Only the reflexive product pairs remain.
    assert!(relation.dominates(&[1], &[1]));
    assert!(!relation.dominates(&[2], &[0]));
}
