use gridsearch_core::Grid;

use crate::context::SearchContext;
use crate::outcome::{SearchError, SearchOutcome};

/// A grid search algorithm: one open-set discipline and neighbor-acceptance
/// policy.
///
/// `search` resets the grid's transient cell state, runs the traversal from
/// the grid's start cell and reports how it ended. Implementations honour
/// the context's cancellation token between open-set entries and describe
/// progress through its observer. Heuristic knowledge, where needed, is an
/// injected [`Heuristic`](crate::Heuristic) value rather than a subclass.
pub trait SearchAlgorithm {
    /// Human-readable algorithm name, for logs and UIs.
    fn name(&self) -> &'static str;

    /// Run the traversal. Fails fast with
    /// [`SearchError::MissingEndpoint`] when the grid lacks a start or goal.
    fn search(
        &mut self,
        grid: &mut Grid,
        cx: &mut SearchContext,
    ) -> Result<SearchOutcome, SearchError>;
}
