//! Label-dominance simulation for factored transition systems.
//!
//! A planning task is given as a set of factors (labelled transition systems
//! synchronised on shared labels) plus a cost for every label. This crate
//! computes, per factor, a *dominance preorder* on states, together with a
//! *label relation* describing which labels can stand in for which others in
//! the remaining factors. The two relations are refined against each other
//! until they form the greatest mutual fixpoint.
//!
//! The aggregated [`dominance::StateDominanceRelation`] answers whether one
//! explicit state dominates another, and the [`pruning`] module packages it
//! into databases that an outside search can use to discard dominated states.
//!
//! ```rust
//! use ld_simulation::fts::{FactorSpec, FtsTask, TaskSpec, TransitionSpec};
//! use ld_simulation::simulation::compute_ld_simulation;
//! use std::sync::Arc;
//!
//! // One factor with two states; label 0 moves from 0 to the goal state 1.
//! let spec = TaskSpec {
//!     label_costs: vec![1],
//!     factors: vec![FactorSpec {
//!         num_states: 2,
//!         init_state: 0,
//!         goal_states: vec![1],
//!         transitions: vec![TransitionSpec { label: 0, src: 0, target: 1 }],
//!     }],
//! };
//!
//! let task = Arc::new(FtsTask::try_from(spec).unwrap());
//! let relation = compute_ld_simulation(&task).unwrap();
//! assert!(relation.dominates(&[1], &[0]));
//! ```

#[cfg(test)]
mod test_utils;

pub mod dominance;
pub mod error;
pub mod fts;
pub mod label_relation;
pub mod pruning;
pub mod relation;
pub mod simulation;
pub mod symbolic;

/// Extract the "simple name" of a type argument at compile time.
///
/// In the future, this should be a `const fn`, but `type_name` and `unwrap_or` are not
/// yet stabilized as `const` functions (even thought they probably are).
fn simple_type_name<T>() -> &'static str {
    std::any::type_name::<T>().split("::").last().unwrap_or("?")
}
