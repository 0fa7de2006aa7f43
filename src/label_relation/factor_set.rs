/// Set of factor indices, restricted to the shapes the label relation needs:
/// all factors, no factors, or all but one.
///
/// The label relation only ever asks "does this hold in every factor other
/// than the one being refined?", so a set that shrank below "all but one"
/// collapses to [`FactorSet::None`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FactorSet {
    All,
    None,
    AllExcept(usize),
}

impl FactorSet {
    pub fn contains(&self, factor: usize) -> bool {
        match self {
            FactorSet::All => true,
            FactorSet::None => false,
            FactorSet::AllExcept(excluded) => *excluded != factor,
        }
    }

    /// True when the set contains every factor other than `factor` (whether it
    /// contains `factor` itself does not matter).
    pub fn contains_all_except(&self, factor: usize) -> bool {
        match self {
            FactorSet::All => true,
            FactorSet::None => false,
            FactorSet::AllExcept(excluded) => *excluded == factor,
        }
    }

    /// Remove `factor`; returns whether the set changed.
    pub fn remove(&mut self, factor: usize) -> bool {
        match *self {
            FactorSet::All => {
                *self = FactorSet::AllExcept(factor);
                true
            }
            FactorSet::None => false,
            FactorSet::AllExcept(excluded) if excluded == factor => false,
            FactorSet::AllExcept(_) => {
                *self = FactorSet::None;
                true
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::FactorSet;

    #[test]
    fn contains_and_removal() {
        let mut set = FactorSet::All;
        assert!(set.contains(3));
        assert!(set.contains_all_except(3));

        assert!(set.remove(3));
        assert_eq!(set, FactorSet::AllExcept(3));
        assert!(!set.contains(3));
        assert!(set.contains(0));
        assert!(set.contains_all_except(3));
        assert!(!set.contains_all_except(0));

        // Removing the same factor again changes nothing.
        assert!(!set.remove(3));
        assert_eq!(set, FactorSet::AllExcept(3));

        // Removing a second factor collapses the set.
        assert!(set.remove(1));
        assert_eq!(set, FactorSet::None);
        assert!(!set.contains(0));
        assert!(!set.contains_all_except(2));
        assert!(!set.remove(0));
    }
}
