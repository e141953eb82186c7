//! The [`Cell`] type and its classification within a grid.

use std::fmt;

use crate::geom::{Dir, Point};

// ---------------------------------------------------------------------------
// CellKind
// ---------------------------------------------------------------------------

/// Packed ARGB code the legacy map format uses for a start cell (opaque blue).
pub const START_CELL_CODE: u32 = 0xFF00_00FF;
/// Packed ARGB code for a goal cell (opaque red).
pub const GOAL_CELL_CODE: u32 = 0xFFFF_0000;
/// Packed ARGB code for a clear/searchable cell (opaque white).
pub const CLEAR_CELL_CODE: u32 = 0xFFFF_FFFF;
/// Packed ARGB code written for an obstacle cell (opaque black).
pub const OBSTACLE_CELL_CODE: u32 = 0xFF00_0000;

/// What role a cell plays on the grid.
///
/// This replaces the packed color constants of the legacy map format with a
/// closed enumeration; [`color_code`](CellKind::color_code) and
/// [`from_color_code`](CellKind::from_color_code) convert at the
/// serialization boundary.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellKind {
    #[default]
    Clear,
    Start,
    Goal,
    Obstacle,
}

impl CellKind {
    /// Decode a packed ARGB code. Any code that is not one of the three role
    /// constants denotes an obstacle.
    #[inline]
    pub const fn from_color_code(code: u32) -> Self {
        match code {
            START_CELL_CODE => CellKind::Start,
            GOAL_CELL_CODE => CellKind::Goal,
            CLEAR_CELL_CODE => CellKind::Clear,
            _ => CellKind::Obstacle,
        }
    }

    /// The packed ARGB code this kind serializes as.
    #[inline]
    pub const fn color_code(self) -> u32 {
        match self {
            CellKind::Start => START_CELL_CODE,
            CellKind::Goal => GOAL_CELL_CODE,
            CellKind::Clear => CLEAR_CELL_CODE,
            CellKind::Obstacle => OBSTACLE_CELL_CODE,
        }
    }

    /// Whether a cell of this kind may be traversed and linked as a neighbor.
    #[inline]
    pub const fn searchable(self) -> bool {
        matches!(self, CellKind::Clear | CellKind::Start | CellKind::Goal)
    }
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Which corner of the grid a cell occupies.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

/// Which boundary wall of the grid a cell lies on.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Wall {
    Top,
    Bottom,
    Left,
    Right,
}

/// Position class of a cell, derived solely from its coordinates and the
/// grid extent. Corners admit at most 2 neighbors, walls 3, inner cells 4.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Classification {
    Corner(Corner),
    Wall(Wall),
    Inner,
}

impl Classification {
    /// Classify the position `p` on a `size` x `size` grid.
    pub fn of(p: Point, size: i32) -> Self {
        let last = size - 1;
        match (p.x, p.y) {
            (0, 0) => Classification::Corner(Corner::TopLeft),
            (x, 0) if x == last => Classification::Corner(Corner::TopRight),
            (0, y) if y == last => Classification::Corner(Corner::BottomLeft),
            (x, y) if x == last && y == last => Classification::Corner(Corner::BottomRight),
            (_, 0) => Classification::Wall(Wall::Top),
            (_, y) if y == last => Classification::Wall(Wall::Bottom),
            (0, _) => Classification::Wall(Wall::Left),
            (x, _) if x == last => Classification::Wall(Wall::Right),
            _ => Classification::Inner,
        }
    }

    /// The directions in which this class of cell can have a neighbor at all.
    ///
    /// The order is fixed: it determines the push order of the stack-based
    /// searchers and therefore which of several equal-length paths they find.
    pub const fn candidate_dirs(self) -> &'static [Dir] {
        use Dir::*;
        match self {
            Classification::Corner(Corner::TopLeft) => &[Down, Right],
            Classification::Corner(Corner::TopRight) => &[Down, Left],
            Classification::Corner(Corner::BottomLeft) => &[Up, Right],
            Classification::Corner(Corner::BottomRight) => &[Up, Left],
            Classification::Wall(Wall::Top) => &[Down, Left, Right],
            Classification::Wall(Wall::Bottom) => &[Up, Left, Right],
            Classification::Wall(Wall::Right) => &[Up, Down, Left],
            Classification::Wall(Wall::Left) => &[Up, Down, Right],
            Classification::Inner => &[Up, Down, Right, Left],
        }
    }

    /// Upper bound on the number of neighbors a cell of this class can have.
    #[inline]
    pub const fn max_neighbors(self) -> usize {
        self.candidate_dirs().len()
    }
}

// ---------------------------------------------------------------------------
// CellId / Cell
// ---------------------------------------------------------------------------

/// Stable handle to a cell in a grid's storage (row-major flat index).
///
/// Parent back-references on the search path are held as `CellId`s, never as
/// owning references, so the parent chain cannot form an ownership cycle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellId(pub usize);

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Largest value the revisit marker index can take (five-entry palette).
pub const MAX_REACHED_COUNT: u8 = 4;

/// A single grid unit.
///
/// Identity is purely positional; `kind` and `class` are fixed at grid
/// construction, `neighbors` is a frozen snapshot from adjacency derivation,
/// and the remaining fields are transient per-search state owned by the
/// active searcher while a run is in progress.
#[derive(Clone, Debug)]
pub struct Cell {
    pub(crate) pos: Point,
    pub(crate) kind: CellKind,
    pub(crate) class: Classification,
    pub(crate) neighbors: Vec<CellId>,

    // --- transient search state, reset per run ---
    pub(crate) g: f64,
    pub(crate) h: f64,
    pub(crate) f: f64,
    pub(crate) parent: Option<CellId>,
    pub(crate) discovered: bool,
    pub(crate) reached_count: u8,
    pub(crate) marker: Option<u8>,
}

impl Cell {
    pub(crate) fn new(pos: Point, kind: CellKind, class: Classification) -> Self {
        Self {
            pos,
            kind,
            class,
            neighbors: Vec::new(),
            g: 0.0,
            h: 0.0,
            f: 0.0,
            parent: None,
            discovered: false,
            reached_count: 0,
            marker: None,
        }
    }

    /// Position of this cell.
    #[inline]
    pub fn pos(&self) -> Point {
        self.pos
    }

    /// Role of this cell.
    #[inline]
    pub fn kind(&self) -> CellKind {
        self.kind
    }

    /// Position class of this cell.
    #[inline]
    pub fn class(&self) -> Classification {
        self.class
    }

    /// Frozen adjacency snapshot (searchable orthogonal neighbors).
    #[inline]
    pub fn neighbors(&self) -> &[CellId] {
        &self.neighbors
    }

    #[inline]
    pub fn is_start(&self) -> bool {
        self.kind == CellKind::Start
    }

    #[inline]
    pub fn is_goal(&self) -> bool {
        self.kind == CellKind::Goal
    }

    /// Clear, start and goal cells are eligible for traversal.
    #[inline]
    pub fn is_searchable(&self) -> bool {
        self.kind.searchable()
    }

    /// Accumulated path cost from the start (unused by the greedy searcher).
    #[inline]
    pub fn g_cost(&self) -> f64 {
        self.g
    }

    /// Heuristic estimate of the remaining cost to the goal.
    #[inline]
    pub fn h_cost(&self) -> f64 {
        self.h
    }

    /// Combined cost used to rank the frontier (g + h, or just h for greedy).
    #[inline]
    pub fn f_cost(&self) -> f64 {
        self.f
    }

    #[inline]
    pub fn set_h_cost(&mut self, h: f64) {
        self.h = h;
    }

    #[inline]
    pub fn set_f_cost(&mut self, f: f64) {
        self.f = f;
    }

    #[inline]
    pub fn set_g_cost(&mut self, g: f64) {
        self.g = g;
    }

    /// Back-reference to the parent cell on the current best-known path.
    #[inline]
    pub fn parent(&self) -> Option<CellId> {
        self.parent
    }

    #[inline]
    pub fn set_parent(&mut self, parent: Option<CellId>) {
        self.parent = parent;
    }

    /// Whether the cell is on the current frontier or has been expanded.
    #[inline]
    pub fn is_discovered(&self) -> bool {
        self.discovered
    }

    #[inline]
    pub fn set_discovered(&mut self, discovered: bool) {
        self.discovered = discovered;
    }

    /// How many times a searcher has come back to this cell.
    #[inline]
    pub fn reached_count(&self) -> u8 {
        self.reached_count
    }

    /// Advance the revisit marker and return the palette index to show.
    ///
    /// The first revisit shows entry 0; each further revisit advances the
    /// index until it saturates at [`MAX_REACHED_COUNT`]. Cosmetic only.
    pub fn bump_reached(&mut self) -> u8 {
        if self.marker == Some(self.reached_count) && self.reached_count < MAX_REACHED_COUNT {
            self.reached_count += 1;
        }
        self.marker = Some(self.reached_count);
        self.reached_count
    }

    /// Reset all transient search state to its pre-run values.
    pub(crate) fn reset_search_state(&mut self) {
        self.g = 0.0;
        self.h = 0.0;
        self.f = 0.0;
        self.parent = None;
        self.discovered = false;
        self.reached_count = 0;
        self.marker = None;
    }
}

// Cells at the same coordinates are interchangeable regardless of transient
// state.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Cell {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_through_color_codes() {
        for kind in [
            CellKind::Clear,
            CellKind::Start,
            CellKind::Goal,
            CellKind::Obstacle,
        ] {
            assert_eq!(CellKind::from_color_code(kind.color_code()), kind);
        }
        // Any unknown code decodes as an obstacle.
        assert_eq!(CellKind::from_color_code(0xFF12_3456), CellKind::Obstacle);
    }

    #[test]
    fn classification_is_idempotent() {
        let size = 7;
        for y in 0..size {
            for x in 0..size {
                let p = Point::new(x, y);
                let a = Classification::of(p, size);
                let b = Classification::of(p, size);
                assert_eq!(a, b);
                match a {
                    Classification::Corner(_) => assert_eq!(a.max_neighbors(), 2),
                    Classification::Wall(_) => assert_eq!(a.max_neighbors(), 3),
                    Classification::Inner => assert_eq!(a.max_neighbors(), 4),
                }
            }
        }
    }

    #[test]
    fn classification_corners_and_walls() {
        let size = 5;
        assert_eq!(
            Classification::of(Point::ZERO, size),
            Classification::Corner(Corner::TopLeft)
        );
        assert_eq!(
            Classification::of(Point::new(4, 0), size),
            Classification::Corner(Corner::TopRight)
        );
        assert_eq!(
            Classification::of(Point::new(0, 4), size),
            Classification::Corner(Corner::BottomLeft)
        );
        assert_eq!(
            Classification::of(Point::new(4, 4), size),
            Classification::Corner(Corner::BottomRight)
        );
        assert_eq!(
            Classification::of(Point::new(2, 0), size),
            Classification::Wall(Wall::Top)
        );
        assert_eq!(
            Classification::of(Point::new(2, 4), size),
            Classification::Wall(Wall::Bottom)
        );
        assert_eq!(
            Classification::of(Point::new(0, 2), size),
            Classification::Wall(Wall::Left)
        );
        assert_eq!(
            Classification::of(Point::new(4, 2), size),
            Classification::Wall(Wall::Right)
        );
        assert_eq!(
            Classification::of(Point::new(2, 2), size),
            Classification::Inner
        );
    }

    #[test]
    fn reached_count_saturates_at_palette_end() {
        let mut cell = Cell::new(Point::ZERO, CellKind::Clear, Classification::Inner);
        let mut last = 0;
        for _ in 0..20 {
            last = cell.bump_reached();
        }
        assert_eq!(last, MAX_REACHED_COUNT);
        assert_eq!(cell.reached_count(), MAX_REACHED_COUNT);
    }

    #[test]
    fn equality_is_positional() {
        let mut a = Cell::new(Point::new(1, 2), CellKind::Clear, Classification::Inner);
        let b = Cell::new(Point::new(1, 2), CellKind::Obstacle, Classification::Inner);
        a.set_parent(Some(CellId(7)));
        assert_eq!(a, b);
    }
}
