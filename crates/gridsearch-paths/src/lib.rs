//! **gridsearch-paths** — Search algorithms for the grid pathfinding
//! demonstrator.
//!
//! Each searcher is one open-set discipline over the shared
//! [`Grid`](gridsearch_core::Grid)/[`Cell`](gridsearch_core::Cell) model:
//!
//! | Searcher | Frontier | Shortest path? |
//! |---|---|---|
//! | [`BreadthFirstSearcher`] | FIFO queue | yes (unit edges) |
//! | [`DepthFirstSearcher`] | stack | no |
//! | [`HeuristicDepthFirstSearcher`] | stack, h-ordered pushes | no |
//! | [`GreedyBestFirstSearcher`] | linear min-f scan, f = h | no |
//! | [`AStarSearcher`] | binary heap, f = g + h | yes (admissible h) |
//!
//! Algorithms implement [`SearchAlgorithm`] and take their heuristic, where
//! one is needed, as an injected [`Heuristic`] value. A run reports a
//! [`SearchOutcome`]; [`path`] backtracks the parent chain of a found goal
//! into a start-to-goal [`Path`]. [`SearchSession`] runs a searcher on a
//! worker thread behind a polled done flag, a progress-event channel and a
//! [`CancelToken`].

mod astar;
mod bfs;
mod context;
mod dfs;
mod greedy;
mod heuristic;
pub mod marker;
mod outcome;
mod session;
mod traits;

pub use astar::AStarSearcher;
pub use bfs::BreadthFirstSearcher;
pub use context::{CancelToken, SearchContext, SearchEvent};
pub use dfs::{DepthFirstSearcher, HeuristicDepthFirstSearcher};
pub use greedy::GreedyBestFirstSearcher;
pub use heuristic::Heuristic;
pub use outcome::{Endpoint, Path, SearchError, SearchOutcome, path, path_traced};
pub use session::{DEFAULT_STEP_DELAY, SearchReport, SearchSession, SessionConfig};
pub use traits::SearchAlgorithm;
