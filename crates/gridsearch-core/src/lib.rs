//! **gridsearch-core** — Grid graph model for the pathfinding demonstrator.
//!
//! This crate provides the data layer the search engine operates on: geometry
//! primitives, the cell model with its corner/wall/inner classification, the
//! NxN grid arena with derived adjacency, and the legacy text map format.

pub mod cell;
pub mod geom;
pub mod grid;
pub mod mapfile;

pub use cell::{Cell, CellId, CellKind, Classification, Corner, Wall, MAX_REACHED_COUNT};
pub use geom::{Dir, Point};
pub use grid::{Grid, GridError, MAX_GRID_SIZE, MIN_GRID_SIZE};
pub use mapfile::{MapError, MapFile};
