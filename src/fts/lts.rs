use log::debug;
use std::collections::HashMap;

/// Index of a group of labels with identical transitions in one factor.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LabelGroup(pub usize);

impl LabelGroup {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One transition of a labelled transition system. The label group stands for
/// every label with this exact transition behaviour in the factor.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub src: usize,
    pub target: usize,
    pub group: LabelGroup,
}

/// One factor of a task: an explicit transition system whose transitions are
/// annotated with label groups.
///
/// Labels with identical (sorted, deduplicated) transition lists share a label
/// group. A label that loops in every state, or has no transitions declared at
/// all, is *irrelevant* here: it behaves as a noop and its group stores no
/// transitions. Every label belongs to exactly one group.
pub struct LabelledTransitionSystem {
    num_states: usize,
    init_state: usize,
    goal_states: Vec<bool>,
    group_of_label: Vec<LabelGroup>,
    label_groups: Vec<Vec<usize>>,
    group_transitions: Vec<Vec<(usize, usize)>>,
    relevant_groups: Vec<LabelGroup>,
    transitions: Vec<Transition>,
    transitions_by_src: Vec<Vec<Transition>>,
}

impl LabelledTransitionSystem {
    /// Build a factor from per-label transition lists (`label_transitions[l]`
    /// holds the `(src, target)` pairs of label `l`).
    pub fn new(
        num_states: usize,
        init_state: usize,
        goal_states: Vec<bool>,
        label_transitions: Vec<Vec<(usize, usize)>>,
    ) -> LabelledTransitionSystem {
        debug_assert!(num_states > 0);
        debug_assert!(init_state < num_states);
        debug_assert_eq!(goal_states.len(), num_states);

        let all_self_loops: Vec<(usize, usize)> = (0..num_states).map(|s| (s, s)).collect();

        let num_labels = label_transitions.len();
        let mut group_of_label = Vec::with_capacity(num_labels);
        let mut label_groups: Vec<Vec<usize>> = Vec::new();
        let mut group_transitions: Vec<Vec<(usize, usize)>> = Vec::new();
        let mut group_index: HashMap<Vec<(usize, usize)>, LabelGroup> = HashMap::new();

        for (label, mut transitions) in label_transitions.into_iter().enumerate() {
            transitions.sort_unstable();
            transitions.dedup();
            if transitions.is_empty() || transitions == all_self_loops {
                // The label behaves as a noop in this factor.
                transitions = Vec::new();
            }
            let group = *group_index.entry(transitions.clone()).or_insert_with(|| {
                let group = LabelGroup(label_groups.len());
                label_groups.push(Vec::new());
                group_transitions.push(transitions);
                group
            });
            label_groups[group.index()].push(label);
            group_of_label.push(group);
        }

        let relevant_groups: Vec<LabelGroup> = (0..label_groups.len())
            .map(LabelGroup)
            .filter(|group| !group_transitions[group.index()].is_empty())
            .collect();

        let mut transitions = Vec::new();
        let mut transitions_by_src = vec![Vec::new(); num_states];
        for &group in &relevant_groups {
            for &(src, target) in &group_transitions[group.index()] {
                let transition = Transition { src, target, group };
                transitions.push(transition);
                transitions_by_src[src].push(transition);
            }
        }

        debug!(
            "LTS with {} states and {} labels in {} groups ({} relevant, {} transitions).",
            num_states,
            num_labels,
            label_groups.len(),
            relevant_groups.len(),
            transitions.len()
        );

        LabelledTransitionSystem {
            num_states,
            init_state,
            goal_states,
            group_of_label,
            label_groups,
            group_transitions,
            relevant_groups,
            transitions,
            transitions_by_src,
        }
    }

    pub fn num_states(&self) -> usize {
        self.num_states
    }

    pub fn initial_state(&self) -> usize {
        self.init_state
    }

    pub fn is_goal(&self, state: usize) -> bool {
        self.goal_states[state]
    }

    pub fn num_labels(&self) -> usize {
        self.group_of_label.len()
    }

    pub fn num_label_groups(&self) -> usize {
        self.label_groups.len()
    }

    /// Number of transitions of relevant label groups (noop self-loops of
    /// irrelevant labels are not stored).
    pub fn num_transitions(&self) -> usize {
        self.transitions.len()
    }

    /// All transitions of relevant label groups.
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// All transitions of relevant label groups leaving `src`.
    pub fn transitions_from(&self, src: usize) -> &[Transition] {
        &self.transitions_by_src[src]
    }

    /// The `(src, target)` pairs of a label group, sorted by source. Empty for
    /// irrelevant groups.
    pub fn transitions_of_group(&self, group: LabelGroup) -> &[(usize, usize)] {
        &self.group_transitions[group.index()]
    }

    pub fn labels_of_group(&self, group: LabelGroup) -> &[usize] {
        &self.label_groups[group.index()]
    }

    pub fn group_of_label(&self, label: usize) -> LabelGroup {
        self.group_of_label[label]
    }

    pub fn relevant_label_groups(&self) -> &[LabelGroup] {
        &self.relevant_groups
    }

    pub fn is_relevant_group(&self, group: LabelGroup) -> bool {
        !self.group_transitions[group.index()].is_empty()
    }

    pub fn is_relevant_label(&self, label: usize) -> bool {
        self.is_relevant_group(self.group_of_label[label])
    }

    /// Labels that behave as noops in this factor.
    pub fn irrelevant_labels(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.num_labels()).filter(|&label| !self.is_relevant_label(label))
    }
}
