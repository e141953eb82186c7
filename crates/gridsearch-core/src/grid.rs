//! The [`Grid`] type — an NxN arena of [`Cell`]s with derived adjacency.
//!
//! The grid owns every cell by value; cells refer to each other only through
//! [`CellId`] handles, so parent chains and neighbor lists never create
//! ownership cycles.

use std::error::Error;
use std::fmt;

use crate::cell::{Cell, CellId, CellKind, Classification};
use crate::geom::Point;

/// Smallest allowed number of rows/columns.
pub const MIN_GRID_SIZE: i32 = 5;
/// Largest allowed number of rows/columns.
pub const MAX_GRID_SIZE: i32 = 100;

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors raised at grid-construction time. No partial grid is ever returned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// Rows and columns differ, or are outside the configured bounds.
    InvalidDimensions { rows: i32, cols: i32 },
    /// The supplied color-code matrix does not match the grid dimensions.
    MatrixShape { expected: i32, rows: usize },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GridError::InvalidDimensions { rows, cols } => write!(
                f,
                "invalid grid dimensions {rows}x{cols}: rows and cols must be equal and within [{MIN_GRID_SIZE}, {MAX_GRID_SIZE}]",
            ),
            GridError::MatrixShape { expected, rows } => write!(
                f,
                "color matrix shape mismatch: expected {expected}x{expected}, got {rows} rows",
            ),
        }
    }
}

impl Error for GridError {}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// An NxN matrix of [`Cell`]s (rows == cols, enforced).
///
/// Adjacency is derived once, at construction, and only when requested: the
/// map-authoring mode skips it since painting does not need topology. Edits
/// made after derivation invalidate the topology for search purposes —
/// rebuild the grid before re-searching.
#[derive(Clone, Debug)]
pub struct Grid {
    size: i32,
    cells: Vec<Cell>,
    start: Option<CellId>,
    goal: Option<CellId>,
    start_exists: bool,
    goal_exists: bool,
}

impl Grid {
    /// Build a grid from dimensions and an optional per-cell color-code
    /// matrix (absence means "all clear").
    ///
    /// Classification is computed for every position before any neighbor
    /// lookup; adjacency is then derived when `derive_adjacency` is set.
    pub fn build(
        rows: i32,
        cols: i32,
        codes: Option<&[Vec<u32>]>,
        derive_adjacency: bool,
    ) -> Result<Grid, GridError> {
        if rows != cols || !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&rows) {
            return Err(GridError::InvalidDimensions { rows, cols });
        }
        if let Some(m) = codes {
            if m.len() != rows as usize || m.iter().any(|r| r.len() != cols as usize) {
                return Err(GridError::MatrixShape {
                    expected: rows,
                    rows: m.len(),
                });
            }
        }

        let size = rows;
        let mut cells = Vec::with_capacity((size * size) as usize);
        let mut start = None;
        let mut goal = None;

        for y in 0..size {
            for x in 0..size {
                let kind = match codes {
                    Some(m) => CellKind::from_color_code(m[y as usize][x as usize]),
                    None => CellKind::Clear,
                };
                let pos = Point::new(x, y);
                let id = CellId((y * size + x) as usize);

                // Record the first start/goal found, as the editor does.
                if kind == CellKind::Start && start.is_none() {
                    start = Some(id);
                } else if kind == CellKind::Goal && goal.is_none() {
                    goal = Some(id);
                }

                cells.push(Cell::new(pos, kind, Classification::of(pos, size)));
            }
        }

        let mut grid = Grid {
            size,
            cells,
            start,
            goal,
            start_exists: start.is_some(),
            goal_exists: goal.is_some(),
        };

        if derive_adjacency {
            grid.derive_adjacency();
        }

        Ok(grid)
    }

    /// Link every searchable cell to its searchable orthogonal neighbors.
    ///
    /// Only the directions valid for the cell's classification are candidates
    /// (corner 2, wall 3, inner 4). Unsearchable cells keep an empty list.
    fn derive_adjacency(&mut self) {
        let mut linked = 0usize;
        for idx in 0..self.cells.len() {
            if !self.cells[idx].is_searchable() {
                continue;
            }
            let pos = self.cells[idx].pos();
            let dirs = self.cells[idx].class().candidate_dirs();

            let mut neighbors = Vec::with_capacity(dirs.len());
            for &dir in dirs {
                let np = pos.step(dir);
                if let Some(nid) = self.id_at(np.x, np.y) {
                    if self.cells[nid.0].is_searchable() {
                        neighbors.push(nid);
                    }
                }
            }
            linked += neighbors.len();
            self.cells[idx].neighbors = neighbors;
        }
        log::debug!(
            "derived adjacency: {}x{} grid, {} directed links",
            self.size,
            self.size,
            linked
        );
    }

    /// Number of rows (== number of columns).
    #[inline]
    pub fn size(&self) -> i32 {
        self.size
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Handle for the cell at `(x, y)`, or `None` if out of bounds.
    #[inline]
    pub fn id_at(&self, x: i32, y: i32) -> Option<CellId> {
        if x >= 0 && y >= 0 && x < self.size && y < self.size {
            Some(CellId((y * self.size + x) as usize))
        } else {
            None
        }
    }

    /// The cell behind a handle.
    #[inline]
    pub fn cell(&self, id: CellId) -> &Cell {
        &self.cells[id.0]
    }

    #[inline]
    pub fn cell_mut(&mut self, id: CellId) -> &mut Cell {
        &mut self.cells[id.0]
    }

    /// The cell at `(x, y)`, or `None` if out of bounds.
    pub fn at(&self, x: i32, y: i32) -> Option<&Cell> {
        self.id_at(x, y).map(|id| &self.cells[id.0])
    }

    /// Cached handle of the start cell found during construction.
    #[inline]
    pub fn start(&self) -> Option<CellId> {
        self.start
    }

    /// Cached handle of the goal cell found during construction.
    #[inline]
    pub fn goal(&self) -> Option<CellId> {
        self.goal
    }

    #[inline]
    pub fn start_exists(&self) -> bool {
        self.start_exists
    }

    #[inline]
    pub fn goal_exists(&self) -> bool {
        self.goal_exists
    }

    /// Editor hook: track whether a start cell is currently painted.
    #[inline]
    pub fn set_start_exists(&mut self, exists: bool) {
        self.start_exists = exists;
    }

    /// Editor hook: track whether a goal cell is currently painted.
    #[inline]
    pub fn set_goal_exists(&mut self, exists: bool) {
        self.goal_exists = exists;
    }

    /// Reset every cell to the default passable state and drop the exists
    /// flags. Dimensions are untouched and adjacency is not recomputed.
    pub fn clear(&mut self) {
        for cell in &mut self.cells {
            cell.kind = CellKind::Clear;
        }
        self.start = None;
        self.goal = None;
        self.start_exists = false;
        self.goal_exists = false;
    }

    /// Zero all transient search state before a new run.
    pub fn reset_search_state(&mut self) {
        for cell in &mut self.cells {
            cell.reset_search_state();
        }
    }

    /// Row-major iterator over `(CellId, &Cell)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (CellId, &Cell)> {
        self.cells.iter().enumerate().map(|(i, c)| (CellId(i), c))
    }
}
