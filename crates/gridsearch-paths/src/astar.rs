//! A* search: the greedy pattern completed with an accumulated path cost.

use std::collections::BinaryHeap;

use gridsearch_core::{CellId, Grid};

use crate::context::{SearchContext, SearchEvent};
use crate::heuristic::Heuristic;
use crate::outcome::{SearchError, SearchOutcome, require_endpoints};
use crate::traits::SearchAlgorithm;

/// Heap entry ordered by `f`, reversed so the max-heap pops the smallest.
#[derive(Copy, Clone, PartialEq)]
struct OpenEntry {
    id: CellId,
    f: f64,
}

impl Eq for OpenEntry {}

impl Ord for OpenEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        other.f.total_cmp(&self.f)
    }
}

impl PartialOrd for OpenEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// Best-first searcher ranking the frontier by f = g + h, with g the hop
/// count from the start. Optimal whenever the injected heuristic is
/// admissible (all three stock heuristics are, for 4-connected movement).
pub struct AStarSearcher {
    heuristic: Heuristic,
    open: BinaryHeap<OpenEntry>,
    closed: Vec<bool>,
}

impl Default for AStarSearcher {
    fn default() -> Self {
        Self::new(Heuristic::default())
    }
}

impl AStarSearcher {
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            open: BinaryHeap::new(),
            closed: Vec::new(),
        }
    }
}

impl SearchAlgorithm for AStarSearcher {
    fn name(&self) -> &'static str {
        "a-star"
    }

    fn search(
        &mut self,
        grid: &mut Grid,
        cx: &mut SearchContext,
    ) -> Result<SearchOutcome, SearchError> {
        let (start, goal) = require_endpoints(grid)?;
        grid.reset_search_state();

        let goal_pos = grid.cell(goal).pos();
        self.heuristic.assign_costs(grid, goal_pos);

        self.open.clear();
        self.closed.clear();
        self.closed.resize(grid.len(), false);

        {
            let cell = grid.cell_mut(start);
            let f = cell.h_cost();
            cell.set_g_cost(0.0);
            cell.set_f_cost(f);
            cell.set_discovered(true);
            self.open.push(OpenEntry { id: start, f });
        }

        while let Some(entry) = self.open.pop() {
            if cx.pace() {
                return Ok(SearchOutcome::Cancelled);
            }

            let id = entry.id;
            // Stale entry: a better route closed this cell already.
            if self.closed[id.0] {
                continue;
            }

            if id == goal {
                return Ok(SearchOutcome::Found(id));
            }

            self.closed[id.0] = true;
            cx.emit(SearchEvent::Expanded {
                pos: grid.cell(id).pos(),
            });

            let g = grid.cell(id).g_cost();
            let neighbors = grid.cell(id).neighbors().to_vec();
            for n in neighbors {
                let tentative = g + 1.0;
                if grid.cell(n).is_discovered() && tentative >= grid.cell(n).g_cost() {
                    continue;
                }

                let cell = grid.cell_mut(n);
                let pos = cell.pos();
                let f = tentative + cell.h_cost();
                cell.set_g_cost(tentative);
                cell.set_f_cost(f);
                cell.set_parent(Some(id));
                if !cell.is_discovered() {
                    cell.set_discovered(true);
                    cx.emit(SearchEvent::Discovered { pos });
                }
                // A strictly better route re-opens the cell.
                self.closed[n.0] = false;
                self.open.push(OpenEntry { id: n, f });
            }
        }

        Ok(SearchOutcome::Exhausted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bfs::BreadthFirstSearcher;
    use crate::outcome::path;
    use crate::testgrid::{grid_with, walled_off};

    fn optimal_cost(size: i32, start: (i32, i32), goal: (i32, i32), obstacles: &[(i32, i32)]) -> usize {
        let mut grid = grid_with(size, start, goal, obstacles);
        let outcome = BreadthFirstSearcher::new()
            .search(&mut grid, &mut SearchContext::headless())
            .unwrap();
        path(&grid, &outcome).unwrap().cost
    }

    #[test]
    fn matches_bfs_cost_on_obstacle_maps() {
        let cases: &[(i32, (i32, i32), (i32, i32), &[(i32, i32)])] = &[
            (5, (0, 0), (4, 4), &[]),
            (7, (0, 3), (6, 3), &[(3, 1), (3, 2), (3, 3), (3, 4)]),
            (8, (1, 1), (6, 6), &[(4, 0), (4, 1), (4, 2), (4, 3), (4, 4), (2, 6), (3, 6)]),
        ];
        for &(size, start, goal, obstacles) in cases {
            let mut grid = grid_with(size, start, goal, obstacles);
            let outcome = AStarSearcher::default()
                .search(&mut grid, &mut SearchContext::headless())
                .unwrap();
            let found = path(&grid, &outcome).unwrap();
            assert_eq!(
                found.cost,
                optimal_cost(size, start, goal, obstacles),
                "suboptimal on {size}x{size} {start:?} -> {goal:?}"
            );
        }
    }

    #[test]
    fn all_heuristics_stay_optimal() {
        for h in [Heuristic::Manhattan, Heuristic::Euclidean, Heuristic::Diagonal] {
            let mut grid = grid_with(6, (0, 0), (5, 5), &[(2, 2), (3, 3)]);
            let outcome = AStarSearcher::new(h)
                .search(&mut grid, &mut SearchContext::headless())
                .unwrap();
            let found = path(&grid, &outcome).unwrap();
            assert_eq!(found.cost, 10, "{h:?}");
        }
    }

    #[test]
    fn exhausts_when_goal_is_walled_off() {
        let mut grid = walled_off(7);
        let outcome = AStarSearcher::default()
            .search(&mut grid, &mut SearchContext::headless())
            .unwrap();
        assert_eq!(outcome, SearchOutcome::Exhausted);
    }

    #[test]
    fn g_costs_along_the_route_count_hops() {
        let mut grid = grid_with(5, (0, 0), (4, 4), &[]);
        let outcome = AStarSearcher::default()
            .search(&mut grid, &mut SearchContext::headless())
            .unwrap();
        let found = path(&grid, &outcome).unwrap();
        for (hops, &id) in found.route.iter().enumerate() {
            assert_eq!(grid.cell(id).g_cost(), hops as f64);
        }
    }
}
