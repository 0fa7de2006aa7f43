//! Dominance-based pruning databases.
//!
//! A search algorithm inserts the states it expands and asks, before
//! expanding a new state, whether a previously seen state already dominates
//! it. The policies differ in which previous states they compare against and
//! in whether the comparison is explicit or symbolic.

mod all_previous;
mod bdd;
mod bdd_map;
mod cross_check;
mod parent;
mod previous_lower_g;


pub use all_previous::AllPreviousDatabase;
pub use bdd::{BddDominatedDatabase, BddDominatingDatabase};
pub use bdd_map::{BddMapDominatedDatabase, BddMapDominatingDatabase};
pub use cross_check::CrossCheckDatabase;
pub use parent::ParentDatabase;
pub use previous_lower_g::PreviousLowerGDatabase;

use crate::dominance::StateDominanceRelation;
use crate::fts::ExplicitState;
use std::sync::Arc;

/// A store of previously seen states, queried for dominance.
///
/// `g` is the cost at which a state was reached; policies may use it to
/// restrict which stored states are admissible for comparison.
pub trait DominanceDatabase {
    /// Is `state`, reached with cost `g`, dominated by a stored state?
    fn check(&self, state: &[usize], g: u32) -> bool;

    /// Record `state` as seen with cost `g`.
    fn insert(&mut self, state: ExplicitState, g: u32);
}

/// Explicit database policies; the symbolic ones are built directly from
/// their constructors since they need a symbolic mapping and a node budget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DatabaseSetting {
    /// Compare against every previously inserted state.
    AllPrevious,
    /// Compare only against states reached with `g' <= g`.
    PreviousLowerG,
    /// Compare only against the most recently inserted state.
    Parent,
}

impl DatabaseSetting {
    pub fn build_database(&self, relation: Arc<StateDominanceRelation>) -> Box<dyn DominanceDatabase> {
        match self {
            DatabaseSetting::AllPrevious => Box::new(AllPreviousDatabase::new(relation)),
            DatabaseSetting::PreviousLowerG => Box::new(PreviousLowerGDatabase::new(relation)),
            DatabaseSetting::Parent => Box::new(ParentDatabase::new(relation)),
        }
    }
}
