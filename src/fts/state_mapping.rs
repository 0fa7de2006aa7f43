/// A full state of a factored task, one value per factor.
pub type ExplicitState = Vec<usize>;

/// Maps search-space states to the factored representation.
///
/// The dominance relation is defined over factor values; a search algorithm
/// that uses a different state encoding provides a mapping into it.
pub trait FactoredStateMapping {
    /// The value of `factor` in `state`.
    fn value(&self, state: &[usize], factor: usize) -> usize;

    /// Transform a search-space state into the factored representation.
    fn transform(&self, state: &[usize]) -> ExplicitState;
}

/// The trivial mapping for search states that are already factored.
pub struct IdentityStateMapping;

impl FactoredStateMapping for IdentityStateMapping {
    fn value(&self, state: &[usize], factor: usize) -> usize {
        state[factor]
    }

    fn transform(&self, state: &[usize]) -> ExplicitState {
        state.to_vec()
    }
}
