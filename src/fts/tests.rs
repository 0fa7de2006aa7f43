use crate::error::DominanceError;
use crate::fts::{FactoredStateMapping, FtsTask, IdentityStateMapping, TaskSpec};
use crate::test_utils::{factor, init_logger, task};

#[test]
fn labels_with_identical_transitions_share_a_group() {
    init_logger();
    // Labels 0 and 1 behave identically, label 2 differs.
    let task = task(
        &[1, 1, 1],
        vec![factor(
            3,
            0,
            &[2],
            &[(0, 0, 1), (0, 1, 2), (1, 1, 2), (1, 0, 1), (2, 0, 2)],
        )],
    );
    let lts = task.factor(0);

    assert_eq!(lts.group_of_label(0), lts.group_of_label(1));
    assert_ne!(lts.group_of_label(0), lts.group_of_label(2));
    assert_eq!(lts.labels_of_group(lts.group_of_label(0)), &[0, 1]);
    assert_eq!(
        lts.transitions_of_group(lts.group_of_label(0)),
        &[(0, 1), (1, 2)]
    );
}

#[test]
fn noop_labels_are_irrelevant() {
    init_logger();
    // Label 0 loops in every state, label 1 has no transitions at all,
    // label 2 loops only in state 0 (applicable nowhere else), label 3 moves.
    let task = task(
        &[1, 1, 1, 1],
        vec![factor(
            2,
            0,
            &[1],
            &[(0, 0, 0), (0, 1, 1), (2, 0, 0), (3, 0, 1)],
        )],
    );
    let lts = task.factor(0);

    assert!(!lts.is_relevant_label(0));
    assert!(!lts.is_relevant_label(1));
    assert!(lts.is_relevant_label(2));
    assert!(lts.is_relevant_label(3));
    assert_eq!(lts.irrelevant_labels().collect::<Vec<_>>(), vec![0, 1]);
    // Both noop labels share the transition-less group.
    assert_eq!(lts.group_of_label(0), lts.group_of_label(1));
    assert_eq!(lts.relevant_label_groups().len(), 2);
    assert_eq!(lts.num_transitions(), 2);
}

#[test]
fn transitions_are_indexed_by_source() {
    init_logger();
    let task = task(
        &[1, 2],
        vec![factor(3, 0, &[2], &[(0, 0, 1), (0, 1, 2), (1, 1, 0)])],
    );
    let lts = task.factor(0);

    assert_eq!(lts.transitions_from(0).len(), 1);
    assert_eq!(lts.transitions_from(1).len(), 2);
    assert_eq!(lts.transitions_from(2).len(), 0);
    let from_one: Vec<(usize, usize)> = lts
        .transitions_from(1)
        .iter()
        .map(|t| (t.src, t.target))
        .collect();
    assert!(from_one.contains(&(1, 2)));
    assert!(from_one.contains(&(1, 0)));
}

#[test]
fn goal_and_initial_state_flags() {
    init_logger();
    let task = task(&[1], vec![factor(3, 1, &[0, 2], &[(0, 1, 2)])]);
    let lts = task.factor(0);

    assert_eq!(lts.initial_state(), 1);
    assert!(lts.is_goal(0));
    assert!(!lts.is_goal(1));
    assert!(lts.is_goal(2));
}

#[test]
fn task_without_factors_is_unsupported() {
    init_logger();
    let spec = TaskSpec {
        label_costs: vec![1],
        factors: vec![],
    };
    let result = FtsTask::try_from(spec);
    assert!(matches!(
        result,
        Err(DominanceError::UnsupportedTask { .. })
    ));
}

#[test]
fn out_of_range_indices_are_rejected() {
    init_logger();
    let bad_init = TaskSpec {
        label_costs: vec![1],
        factors: vec![factor(2, 2, &[1], &[])],
    };
    assert!(matches!(
        FtsTask::try_from(bad_init),
        Err(DominanceError::InvalidTask { .. })
    ));

    let bad_goal = TaskSpec {
        label_costs: vec![1],
        factors: vec![factor(2, 0, &[5], &[])],
    };
    assert!(matches!(
        FtsTask::try_from(bad_goal),
        Err(DominanceError::InvalidTask { .. })
    ));

    let bad_label = TaskSpec {
        label_costs: vec![1],
        factors: vec![factor(2, 0, &[1], &[(3, 0, 1)])],
    };
    assert!(matches!(
        FtsTask::try_from(bad_label),
        Err(DominanceError::InvalidTask { .. })
    ));

    let bad_target = TaskSpec {
        label_costs: vec![1],
        factors: vec![factor(2, 0, &[1], &[(0, 0, 7)])],
    };
    assert!(matches!(
        FtsTask::try_from(bad_target),
        Err(DominanceError::InvalidTask { .. })
    ));
}

#[test]
fn identity_mapping_is_a_projection() {
    let mapping = IdentityStateMapping;
    let state = vec![3, 1, 4];
    assert_eq!(mapping.value(&state, 0), 3);
    assert_eq!(mapping.value(&state, 2), 4);
    assert_eq!(mapping.transform(&state), state);
}

#[cfg(feature = "serde")]
mod serde_tests {
    use crate::fts::TaskSpec;
    use crate::test_utils::factor;

    #[test]
    fn task_spec_json_round_trip() {
        let spec = TaskSpec {
            label_costs: vec![1, 2],
            factors: vec![factor(2, 0, &[1], &[(0, 0, 1), (1, 1, 0)])],
        };
        let json = serde_json::to_string(&spec).unwrap();
        let parsed: TaskSpec = serde_json::from_str(&json).unwrap();
        assert_eq!(spec, parsed);
    }
}
