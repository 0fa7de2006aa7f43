use crate::fts::ExplicitState;
use crate::pruning::DominanceDatabase;

/// Validation harness running several databases in lockstep.
///
/// Inserts are forwarded to every wrapped database; `check` asks all of them
/// and panics if any two disagree. Intended for testing new policies against
/// a trusted reference, not for production searches.
pub struct CrossCheckDatabase {
    databases: Vec<Box<dyn DominanceDatabase>>,
}

impl CrossCheckDatabase {
    pub fn new(databases: Vec<Box<dyn DominanceDatabase>>) -> CrossCheckDatabase {
        assert!(!databases.is_empty());
        CrossCheckDatabase { databases }
    }
}

impl DominanceDatabase for CrossCheckDatabase {
    fn check(&self, state: &[usize], g: u32) -> bool {
        let answers: Vec<bool> = self
            .databases
            .iter()
            .map(|db| db.check(state, g))
            .collect();
        if answers.windows(2).any(|pair| pair[0] != pair[1]) {
            panic!(
                "dominance databases disagree on {:?} (g = {}): {:?}",
                state, g, answers
            );
        }
        answers[0]
    }

    fn insert(&mut self, state: ExplicitState, g: u32) {
        for database in &mut self.databases {
            database.insert(state.clone(), g);
        }
    }
}
