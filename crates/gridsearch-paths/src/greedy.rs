//! Greedy best-first search.
//!
//! The frontier is an unordered list scanned linearly for the minimum
//! f-cost, and f is set equal to h — no accumulated path cost enters the
//! ranking, which is what makes this greedy rather than optimal. It is
//! guaranteed to terminate on a finite grid.

use gridsearch_core::{CellId, Grid};

use crate::context::{SearchContext, SearchEvent};
use crate::heuristic::Heuristic;
use crate::outcome::{SearchError, SearchOutcome, require_endpoints};
use crate::traits::SearchAlgorithm;

pub struct GreedyBestFirstSearcher {
    heuristic: Heuristic,
    open: Vec<CellId>,
    closed: Vec<CellId>,
}

impl Default for GreedyBestFirstSearcher {
    fn default() -> Self {
        Self::new(Heuristic::default())
    }
}

impl GreedyBestFirstSearcher {
    pub fn new(heuristic: Heuristic) -> Self {
        Self {
            heuristic,
            open: Vec::new(),
            closed: Vec::new(),
        }
    }

    /// Index of the minimum-f entry in the open list. Earliest entry wins
    /// ties, matching the linear scan this searcher is defined by.
    fn lowest_f_cost(&self, grid: &Grid) -> usize {
        let mut min_idx = 0;
        let mut min_f = f64::INFINITY;
        for (i, &id) in self.open.iter().enumerate() {
            let f = grid.cell(id).f_cost();
            if i == 0 || f < min_f {
                min_f = f;
                min_idx = i;
            }
        }
        min_idx
    }
}

impl SearchAlgorithm for GreedyBestFirstSearcher {
    fn name(&self) -> &'static str {
        "greedy best-first"
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
        self.open.push(start);
        grid.cell_mut(start).set_discovered(true);

        while !self.open.is_empty() {
            if cx.pace() {
                return Ok(SearchOutcome::Cancelled);
            }

            let min = self.open.remove(self.lowest_f_cost(grid));
            if min == goal {
                return Ok(SearchOutcome::Found(min));
            }

            self.closed.push(min);
            cx.emit(SearchEvent::Expanded {
                pos: grid.cell(min).pos(),
            });

            let min_parent = grid.cell(min).parent();
            let neighbors = grid.cell(min).neighbors().to_vec();
            for n in neighbors {
                if self.closed.contains(&n) {
                    cx.note_revisit(grid.cell_mut(n));
                    continue;
                }

                // Backtrack suppression: never step straight back onto the
                // cell we just came from.
                if Some(n) == min_parent {
                    continue;
                }

                // Skip when the frontier already records a better-or-equal
                // f for this cell; otherwise drop the stale entry and
                // re-insert with the new parent.
                let candidate_f = grid.cell(n).h_cost();
                if let Some(stale) = self.open.iter().position(|&o| o == n) {
                    if grid.cell(n).f_cost() <= candidate_f {
                        continue;
                    }
                    self.open.remove(stale);
                }

                let cell = grid.cell_mut(n);
                let pos = cell.pos();
                cell.set_parent(Some(min));
                cell.set_f_cost(candidate_f);
                if !cell.is_discovered() {
                    cell.set_discovered(true);
                    cx.emit(SearchEvent::Discovered { pos });
                }
                self.open.push(n);
            }
        }

        Ok(SearchOutcome::Exhausted)
    }
}
