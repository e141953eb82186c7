//! Search results: [`SearchOutcome`], [`SearchError`], [`Path`] and parent
//! backtracking.

use std::error::Error;
use std::fmt;

use gridsearch_core::{CellId, Grid, Point};

use crate::context::SearchContext;

// ---------------------------------------------------------------------------
// SearchOutcome / SearchError
// ---------------------------------------------------------------------------

/// How a search run ended.
///
/// An exhausted open set is a normal result, not an error: the grid simply
/// has no route from start to goal.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SearchOutcome {
    /// The goal cell was taken off the open set.
    Found(CellId),
    /// The open set emptied without reaching the goal.
    Exhausted,
    /// The cancellation token fired between iterations.
    Cancelled,
}

impl SearchOutcome {
    /// The terminal goal cell, if the search reached one.
    #[inline]
    pub fn terminal(&self) -> Option<CellId> {
        match self {
            SearchOutcome::Found(id) => Some(*id),
            _ => None,
        }
    }

    #[inline]
    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found(_))
    }
}

/// Which endpoint a search is missing.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    Goal,
}

/// Errors a search run or path reconstruction can raise.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// The grid has no start or no goal cell; searches fail fast before the
    /// loop rather than traversing from nothing.
    MissingEndpoint(Endpoint),
    /// An operation was invoked in a state it does not support, e.g.
    /// reconstructing a path from a non-`Found` outcome.
    InvalidState(&'static str),
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SearchError::MissingEndpoint(Endpoint::Start) => {
                write!(f, "grid has no start cell")
            }
            SearchError::MissingEndpoint(Endpoint::Goal) => {
                write!(f, "grid has no goal cell")
            }
            SearchError::InvalidState(what) => write!(f, "invalid state: {what}"),
        }
    }
}

impl Error for SearchError {}

/// Resolve the start and goal handles, failing fast when either is missing.
pub(crate) fn require_endpoints(grid: &Grid) -> Result<(CellId, CellId), SearchError> {
    let start = grid
        .start()
        .ok_or(SearchError::MissingEndpoint(Endpoint::Start))?;
    let goal = grid
        .goal()
        .ok_or(SearchError::MissingEndpoint(Endpoint::Goal))?;
    Ok((start, goal))
}

// ---------------------------------------------------------------------------
// Path
// ---------------------------------------------------------------------------

/// A reconstructed route in start → goal order, with its hop count.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Path {
    /// Cells along the route, start first.
    pub route: Vec<CellId>,
    /// Number of hops; every hop costs exactly 1.
    pub cost: usize,
}

impl Path {
    /// Positions along the route, start first.
    pub fn positions(&self, grid: &Grid) -> Vec<Point> {
        self.route.iter().map(|&id| grid.cell(id).pos()).collect()
    }

    /// Cell names along the route (a cell's name is its flat index).
    pub fn names(&self) -> Vec<String> {
        self.route.iter().map(|id| id.to_string()).collect()
    }
}

/// Backtrack parent links from a search outcome's terminal cell.
///
/// The parent chain must terminate at the start; parents always point at
/// already-expanded cells, so a cycle here would be a searcher bug. A step
/// budget of `grid.len()` guards against that and reports it as
/// [`SearchError::InvalidState`], as is calling this on a non-`Found`
/// outcome.
pub fn path(grid: &Grid, outcome: &SearchOutcome) -> Result<Path, SearchError> {
    let Some(terminal) = outcome.terminal() else {
        return Err(SearchError::InvalidState(
            "path reconstruction requires a found goal cell",
        ));
    };

    let mut route = Vec::new();
    let mut current = Some(terminal);
    while let Some(id) = current {
        route.push(id);
        if route.len() > grid.len() {
            return Err(SearchError::InvalidState("parent chain contains a cycle"));
        }
        current = grid.cell(id).parent();
    }
    route.reverse();

    let cost = route.len() - 1;
    Ok(Path { route, cost })
}

/// [`path`], additionally announcing each route cell to the context's
/// observer in backtrack (goal → start) order, the way the legacy tracer
/// painted it.
pub fn path_traced(
    grid: &Grid,
    outcome: &SearchOutcome,
    cx: &mut SearchContext,
) -> Result<Path, SearchError> {
    let found = path(grid, outcome)?;
    for &id in found.route.iter().rev() {
        cx.emit(crate::context::SearchEvent::PathTraced {
            pos: grid.cell(id).pos(),
        });
    }
    Ok(found)
}
