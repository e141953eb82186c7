//! The legacy text map format: [`MapFile`].
//!
//! A map is a whitespace-separated stream of `rows cols` (which must be
//! equal and within the grid size bounds), then `start_exists goal_exists`
//! as `true`/`false`, then
//! `rows * cols` packed-ARGB integers in row-major order. The legacy
//! producer writes the codes as signed 32-bit values, so both signs are
//! accepted on input and the signed form is written on output.

use std::error::Error;
use std::fmt;
use std::io;

use crate::grid::{Grid, GridError, MAX_GRID_SIZE, MIN_GRID_SIZE};

// ---------------------------------------------------------------------------
// MapError
// ---------------------------------------------------------------------------

/// Errors raised while reading or writing a map stream.
#[derive(Debug)]
pub enum MapError {
    Io(io::Error),
    /// A token was missing or not of the expected type.
    Parse(String),
    /// The size header is not a square within the allowed grid bounds.
    Dimensions { rows: i32, cols: i32 },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Io(e) => write!(f, "map i/o error: {e}"),
            MapError::Parse(what) => write!(f, "malformed map stream: {what}"),
            MapError::Dimensions { rows, cols } => write!(
                f,
                "map dimensions {rows}x{cols} must be square and within [{MIN_GRID_SIZE}, {MAX_GRID_SIZE}]",
            ),
        }
    }
}

impl Error for MapError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            MapError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for MapError {
    fn from(e: io::Error) -> Self {
        MapError::Io(e)
    }
}

// ---------------------------------------------------------------------------
// MapFile
// ---------------------------------------------------------------------------

/// Parsed contents of a map stream.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MapFile {
    pub rows: i32,
    pub cols: i32,
    pub start_exists: bool,
    pub goal_exists: bool,
    /// Packed ARGB code per cell, row-major.
    pub codes: Vec<Vec<u32>>,
}

impl MapFile {
    /// Parse a map from its text form.
    pub fn parse(input: &str) -> Result<MapFile, MapError> {
        let mut tokens = input.split_whitespace();

        let rows = next_i32(&mut tokens, "rows")?;
        let cols = next_i32(&mut tokens, "cols")?;
        // The header bounds every allocation below, so it is validated
        // before any capacity is reserved.
        if rows != cols || !(MIN_GRID_SIZE..=MAX_GRID_SIZE).contains(&rows) {
            return Err(MapError::Dimensions { rows, cols });
        }

        let start_exists = next_bool(&mut tokens, "start flag")?;
        let goal_exists = next_bool(&mut tokens, "goal flag")?;

        let mut codes = Vec::with_capacity(rows as usize);
        for y in 0..rows {
            let mut row = Vec::with_capacity(cols as usize);
            for x in 0..cols {
                let tok = tokens
                    .next()
                    .ok_or_else(|| MapError::Parse(format!("missing code at ({x}, {y})")))?;
                // Accept the legacy signed form as well as plain unsigned.
                let code = tok
                    .parse::<i64>()
                    .map_err(|_| MapError::Parse(format!("bad color code {tok:?} at ({x}, {y})")))?;
                row.push(code as u32);
            }
            codes.push(row);
        }

        Ok(MapFile {
            rows,
            cols,
            start_exists,
            goal_exists,
            codes,
        })
    }

    /// Read and parse a map from a reader.
    pub fn from_reader<R: io::Read>(mut reader: R) -> Result<MapFile, MapError> {
        let mut buf = String::new();
        reader.read_to_string(&mut buf)?;
        MapFile::parse(&buf)
    }

    /// Snapshot a grid's dimensions, flags and per-cell codes.
    pub fn from_grid(grid: &Grid) -> MapFile {
        let size = grid.size();
        let mut codes = Vec::with_capacity(size as usize);
        for y in 0..size {
            let mut row = Vec::with_capacity(size as usize);
            for x in 0..size {
                // In-bounds by construction.
                if let Some(cell) = grid.at(x, y) {
                    row.push(cell.kind().color_code());
                }
            }
            codes.push(row);
        }
        MapFile {
            rows: size,
            cols: size,
            start_exists: grid.start_exists(),
            goal_exists: grid.goal_exists(),
            codes,
        }
    }

    /// Render the map in its text form.
    pub fn to_text(&self) -> String {
        use fmt::Write;

        let mut out = String::new();
        let _ = writeln!(out, "{} {}", self.rows, self.cols);
        let _ = writeln!(out, "{} {}", self.start_exists, self.goal_exists);
        for row in &self.codes {
            let mut first = true;
            for &code in row {
                if !first {
                    out.push(' ');
                }
                first = false;
                // Signed form, matching the legacy producer.
                let _ = write!(out, "{}", code as i32);
            }
            out.push('\n');
        }
        out
    }

    /// Write the map in its text form.
    pub fn to_writer<W: io::Write>(&self, mut writer: W) -> Result<(), MapError> {
        writer.write_all(self.to_text().as_bytes())?;
        Ok(())
    }

    /// Build a searchable grid from this map.
    pub fn to_grid(&self, derive_adjacency: bool) -> Result<Grid, GridError> {
        Grid::build(self.rows, self.cols, Some(&self.codes), derive_adjacency)
    }
}

fn next_i32<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<i32, MapError> {
    let tok = tokens
        .next()
        .ok_or_else(|| MapError::Parse(format!("missing {what}")))?;
    tok.parse::<i32>()
        .map_err(|_| MapError::Parse(format!("bad {what}: {tok:?}")))
}

fn next_bool<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    what: &str,
) -> Result<bool, MapError> {
    let tok = tokens
        .next()
        .ok_or_else(|| MapError::Parse(format!("missing {what}")))?;
    tok.parse::<bool>()
        .map_err(|_| MapError::Parse(format!("bad {what}: {tok:?}")))
}
