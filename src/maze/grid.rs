//! Maze grid: storage, bounds-checked access, parsing, rendering.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    maze::cell::CellCode,
    types::Coordinate,
};

/// An immutable rectangular grid of cell codes.
///
/// Constructed once (from text or a cell vector) and only read afterwards;
/// the learning core never mutates it, so a single maze can back any number
/// of agents by shared reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Maze {
    rows: usize,
    cols: usize,
    cells: Vec<CellCode>,
    start_marker: Option<Coordinate>,
}

impl Maze {
    /// Build a maze from a row-major cell vector.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyMaze`] for zero dimensions and
    /// [`Error::RaggedRow`] if the vector length does not match
    /// `rows * cols`.
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<CellCode>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::EmptyMaze);
        }
        if cells.len() != rows * cols {
            return Err(Error::RaggedRow {
                row: cells.len() / cols,
                expected: rows * cols,
                got: cells.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            cells,
            start_marker: None,
        })
    }

    /// Grid dimensions as (rows, cols).
    pub fn size(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        coord.row < self.rows && coord.col < self.cols
    }

    /// Bounds-checked cell access, the contract form.
    ///
    /// # Errors
    ///
    /// Returns [`Error::OutOfRange`] for off-grid coordinates.
    pub fn cell_at(&self, coord: Coordinate) -> Result<CellCode> {
        self.cell(coord).ok_or(Error::OutOfRange {
            row: coord.row,
            col: coord.col,
            rows: self.rows,
            cols: self.cols,
        })
    }

    /// Cell access as an `Option`. The `None` case *is* the bounds check, so
    /// callers that branch on it can never trigger an out-of-range query.
    pub fn cell(&self, coord: Coordinate) -> Option<CellCode> {
        if self.in_bounds(coord) {
            Some(self.cells[coord.row * self.cols + coord.col])
        } else {
            None
        }
    }

    /// First coordinate holding `code`, scanning rows top to bottom and
    /// columns left to right. Pure function of the grid contents.
    pub fn find_cell(&self, code: CellCode) -> Option<Coordinate> {
        self.cells
            .iter()
            .position(|&cell| cell == code)
            .map(|idx| Coordinate::new(idx / self.cols, idx % self.cols))
    }

    /// Coordinate of the `@` marker in the parsed text, if there was one.
    pub fn start_marker(&self) -> Option<Coordinate> {
        self.start_marker
    }

    /// Render the grid in its text form.
    pub fn render(&self) -> String {
        self.render_with_path(&[])
    }

    /// Render the grid with the given coordinates overlaid as `*`
    /// (goal and wall cells keep their own glyphs).
    pub fn render_with_path(&self, path: &[Coordinate]) -> String {
        let mut out = String::with_capacity((self.cols + 1) * self.rows);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let coord = Coordinate::new(row, col);
                let cell = self.cells[row * self.cols + col];
                if cell == CellCode::Empty && path.contains(&coord) {
                    out.push('*');
                } else {
                    out.push(cell.to_char());
                }
            }
            out.push('\n');
        }
        out
    }
}

impl FromStr for Maze {
    type Err = Error;

    /// Parse a maze from its text form: one row per line, one character per
    /// cell. Blank lines at either end are ignored. At most one `@` start
    /// marker is allowed; it parses as [`CellCode::Empty`] and its
    /// coordinate is reported by [`Maze::start_marker`].
    fn from_str(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .skip_while(|line| line.is_empty())
            .collect();
        let lines: &[&str] = match lines.iter().rposition(|line| !line.is_empty()) {
            Some(last) => &lines[..=last],
            None => return Err(Error::EmptyMaze),
        };

        let cols = lines[0].chars().count();
        if cols == 0 {
            return Err(Error::EmptyMaze);
        }

        let mut cells = Vec::with_capacity(lines.len() * cols);
        let mut start_marker = None;
        for (row, line) in lines.iter().enumerate() {
            let got = line.chars().count();
            if got != cols {
                return Err(Error::RaggedRow {
                    row,
                    expected: cols,
                    got,
                });
            }
            for (col, c) in line.chars().enumerate() {
                if c == '@' {
                    if start_marker.is_some() {
                        return Err(Error::DuplicateStartMarker { row, col });
                    }
                    start_marker = Some(Coordinate::new(row, col));
                    cells.push(CellCode::Empty);
                } else {
                    cells.push(CellCode::from_char(c).ok_or(Error::InvalidCellCharacter {
                        character: c,
                        row,
                        col,
                    })?);
                }
            }
        }

        let mut maze = Maze::from_cells(lines.len(), cols, cells)?;
        maze.start_marker = start_marker;
        Ok(maze)
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render())
    }
}
