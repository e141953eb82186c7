//! Heuristic distance estimates shared by the cost-informed searchers.
//!
//! All three functions are computed from `|Δx|` and `|Δy|` with unit step
//! cost. Diagonal distance is the default: it is admissible for 4-connected
//! movement.

use gridsearch_core::{Grid, Point};

/// A pluggable heuristic function, injected into the searchers that need one.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Heuristic {
    /// L1 distance: `dx + dy`.
    Manhattan,
    /// L2 distance: `sqrt(dx² + dy²)`.
    Euclidean,
    /// Octile distance: `(dx + dy) + (√2 − 2)·min(dx, dy)`.
    #[default]
    Diagonal,
}

impl Heuristic {
    /// Estimated cost of moving from `from` to `to`.
    pub fn estimate(self, from: Point, to: Point) -> f64 {
        let dx = (to.x - from.x).abs() as f64;
        let dy = (to.y - from.y).abs() as f64;
        match self {
            Heuristic::Manhattan => dx + dy,
            Heuristic::Euclidean => (dx * dx + dy * dy).sqrt(),
            Heuristic::Diagonal => (dx + dy) + (std::f64::consts::SQRT_2 - 2.0) * dx.min(dy),
        }
    }

    /// Precompute the h-cost of every cell against a fixed goal position.
    ///
    /// The heuristic searchers call this once before their loop starts.
    pub fn assign_costs(self, grid: &mut Grid, goal: Point) {
        for idx in 0..grid.len() {
            let id = gridsearch_core::CellId(idx);
            let pos = grid.cell(id).pos();
            let h = self.estimate(pos, goal);
            grid.cell_mut(id).set_h_cost(h);
        }
    }
}
