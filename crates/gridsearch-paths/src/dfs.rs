//! Depth-first search, plain and heuristic-ordered.
//!
//! Neither variant guarantees a shortest path; both guarantee eventual
//! discovery of some path when one exists, since the grid is finite and the
//! closed set prevents infinite revisits.

use gridsearch_core::{CellId, Grid};

use crate::context::{SearchContext, SearchEvent};
use crate::heuristic::Heuristic;
use crate::outcome::{SearchError, SearchOutcome, require_endpoints};
use crate::traits::SearchAlgorithm;

/// Stack-frontier searcher (LIFO counterpart of breadth-first).
#[derive(Default)]
pub struct DepthFirstSearcher {
    open: Vec<CellId>,
    closed: Vec<bool>,
}

impl DepthFirstSearcher {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SearchAlgorithm for DepthFirstSearcher {
    fn name(&self) -> &'static str {
        "depth-first"
    }

    fn search(
        &mut self,
        grid: &mut Grid,
        cx: &mut SearchContext,
    ) -> Result<SearchOutcome, SearchError> {
        depth_first(grid, cx, &mut self.open, &mut self.closed, None)
    }
}

/// Depth-first traversal whose expansions push the lowest-h neighbor last,
/// so the stack pops the most promising cell first. A traversal-order
/// heuristic only, not an optimality guarantee.
///
/// The legacy demonstrator sorted its pushes the other way around and so
/// descended into the *highest*-h neighbor first; this implementation keeps
/// the intended best-first descent, so traversal order differs from the
/// legacy animation on the same map.
pub struct HeuristicDepthFirstSearcher {
    heuristic: Heuristic,
    open: Vec<CellId>,
    closed: Vec<bool>,
}

impl Default for HeuristicDepthFirstSearcher {
    fn default() -> Self {
        Self::new(Heuristic::default())
    }
}

impl HeuristicDepthFirstSearcher {
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            open: Vec::new(),
            closed: Vec::new(),
        }
    }
}

impl SearchAlgorithm for HeuristicDepthFirstSearcher {
    fn name(&self) -> &'static str {
        "heuristic depth-first"
    }

    fn search(
        &mut self,
        grid: &mut Grid,
        cx: &mut SearchContext,
    ) -> Result<SearchOutcome, SearchError> {
        depth_first(
            grid,
            cx,
            &mut self.open,
            &mut self.closed,
            Some(self.heuristic),
        )
    }
}

/// The shared stack loop. With a heuristic, h-costs are precomputed against
/// the goal and each expansion's pushes are ordered by them.
fn depth_first(
    grid: &mut Grid,
    cx: &mut SearchContext,
    open: &mut Vec<CellId>,
    closed: &mut Vec<bool>,
    heuristic: Option<Heuristic>,
) -> Result<SearchOutcome, SearchError> {
    let (start, goal) = require_endpoints(grid)?;
    grid.reset_search_state();

    if let Some(h) = heuristic {
        let goal_pos = grid.cell(goal).pos();
        h.assign_costs(grid, goal_pos);
    }

    open.clear();
    closed.clear();
    closed.resize(grid.len(), false);

    open.push(start);
    grid.cell_mut(start).set_discovered(true);

    while let Some(id) = open.pop() {
        if cx.pace() {
            return Ok(SearchOutcome::Cancelled);
        }

        if id == goal {
            return Ok(SearchOutcome::Found(id));
        }

        if closed[id.0] {
            cx.note_revisit(grid.cell_mut(id));
            continue;
        }
        closed[id.0] = true;
        cx.emit(SearchEvent::Expanded {
            pos: grid.cell(id).pos(),
        });

        let mut neighbors = grid.cell(id).neighbors().to_vec();
        if heuristic.is_some() {
            // Descending h, so the most promising neighbor lands on top of
            // the stack.
            neighbors.sort_by(|&a, &b| grid.cell(b).h_cost().total_cmp(&grid.cell(a).h_cost()));
        }

        for n in neighbors {
            if closed[n.0] {
                continue;
            }
            let cell = grid.cell_mut(n);
            let pos = cell.pos();
            cell.set_parent(Some(id));
            if !cell.is_discovered() {
                cell.set_discovered(true);
                cx.emit(SearchEvent::Discovered { pos });
            }
            open.push(n);
        }
    }

    Ok(SearchOutcome::Exhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::path;
    use crate::testgrid::{grid_with, walled_off};

    #[test]
    fn plain_dfs_finds_some_path() {
        let mut grid = grid_with(6, (0, 0), (5, 5), &[(2, 2), (3, 2), (2, 3)]);
        let outcome = DepthFirstSearcher::new()
            .search(&mut grid, &mut SearchContext::headless())
            .unwrap();
        assert!(outcome.is_found());
        let found = path(&grid, &outcome).unwrap();
        assert!(found.cost >= 10); // Manhattan lower bound
        assert_eq!(found.route.last().copied(), grid.goal());
    }

    #[test]
    fn heuristic_dfs_finds_a_path_on_an_empty_grid() {
        let mut grid = grid_with(8, (0, 0), (7, 7), &[]);
        let outcome = HeuristicDepthFirstSearcher::default()
            .search(&mut grid, &mut SearchContext::headless())
            .unwrap();
        assert!(outcome.is_found());
        let found = path(&grid, &outcome).unwrap();
        assert!(found.cost >= 14);
    }

    #[test]
    fn heuristic_ordering_heads_straight_for_the_goal_when_unobstructed() {
        // With diagonal distance and no obstacles the top of the stack is
        // always a step toward the goal, so the path is optimal here (though
        // not in general).
        let mut grid = grid_with(6, (0, 0), (5, 5), &[]);
        let outcome = HeuristicDepthFirstSearcher::new(Heuristic::Diagonal)
            .search(&mut grid, &mut SearchContext::headless())
            .unwrap();
        let found = path(&grid, &outcome).unwrap();
        assert_eq!(found.cost, 10);
    }

    #[test]
    fn both_variants_exhaust_on_a_walled_off_goal() {
        for mut searcher in [
            Box::new(DepthFirstSearcher::new()) as Box<dyn SearchAlgorithm>,
            Box::new(HeuristicDepthFirstSearcher::default()),
        ] {
            let mut grid = walled_off(7);
            let outcome = searcher
                .search(&mut grid, &mut SearchContext::headless())
                .unwrap();
            assert_eq!(outcome, SearchOutcome::Exhausted, "{}", searcher.name());
        }
    }

    #[test]
    fn revisit_markers_stay_within_the_palette() {
        let mut grid = grid_with(7, (0, 0), (6, 6), &[]);
        let mut cx = SearchContext::headless().with_reuse_markers(true);
        DepthFirstSearcher::new().search(&mut grid, &mut cx).unwrap();
        for (_, cell) in grid.iter() {
            assert!(cell.reached_count() <= gridsearch_core::MAX_REACHED_COUNT);
        }
    }
}
