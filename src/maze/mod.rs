pub mod canvas;
pub mod cell;
pub mod grid;
pub mod marks;

use std::{fmt, str::FromStr};

pub use canvas::{Canvas, CanvasEvent, CellKey};
pub use cell::{Cell, Paint};
pub use grid::Grid;
pub use marks::VisitMarks;

use crate::error::MazeError;

/// A grid coordinate as `(row, col)`.
pub type Coord = (u16, u16);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Unit step as `(d_row, d_col)`.
    pub fn delta(self) -> (i16, i16) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

/// Order in which traversals look at the neighbors of a cell.
pub const NEIGHBOR_ORDER: [Direction; 4] = [
    Direction::Right,
    Direction::Left,
    Direction::Up,
    Direction::Down,
];

pub struct Maze {
    cells: Grid<Cell>,
    terminal: Coord,
}

impl Maze {
    /// Where generation starts and every traversal begins.
    pub const ENTRY: Coord = (1, 1);

    /// Creates a fully blocked maze. The entry cell must fit, so both dimensions must be at least 2.
    pub fn new(rows: u16, cols: u16) -> Result<Self, MazeError> {
        if rows < 2 || cols < 2 {
            return Err(MazeError::TooSmall { rows, cols });
        }
        Ok(Maze {
            cells: Grid::new(rows, cols, Cell::Blocked),
            terminal: Maze::ENTRY,
        })
    }

    pub fn rows(&self) -> u16 {
        self.cells.rows()
    }

    pub fn cols(&self) -> u16 {
        self.cells.cols()
    }

    pub fn entry(&self) -> Coord {
        Maze::ENTRY
    }

    /// The traversal target chosen during generation.
    pub fn terminal(&self) -> Coord {
        self.terminal
    }

    pub fn is_in_bounds(&self, coord: Coord) -> bool {
        self.cells.is_in_bounds(coord)
    }

    pub fn is_open(&self, coord: Coord) -> bool {
        self.cells.get(coord).is_some_and(|cell| cell.is_open())
    }

    /// A coordinate the walk may not enter: missing (stepped off the grid), out of bounds, or
    /// already open.
    pub fn is_invalid(&self, coord: Option<Coord>) -> bool {
        match coord {
            Some(coord) => !self.is_in_bounds(coord) || self.is_open(coord),
            None => true,
        }
    }

    /// Moves `times` cells from `coord` in `direction`.
    /// Returns `None` if the result falls outside the grid.
    pub fn step(&self, coord: Coord, direction: Direction, times: u16) -> Option<Coord> {
        let (d_row, d_col) = direction.delta();
        let times = i16::try_from(times).ok()?;
        let row = coord.0.checked_add_signed(d_row.checked_mul(times)?)?;
        let col = coord.1.checked_add_signed(d_col.checked_mul(times)?)?;
        self.is_in_bounds((row, col)).then_some((row, col))
    }

    /// Marks a cell open and advances the terminal cell when the new cell is at or past it on
    /// both axes. The comparison follows opening order, so the terminal is not a true maximum.
    pub fn open(&mut self, coord: Coord) {
        if !self.is_in_bounds(coord) {
            return;
        }
        self.cells[coord] = Cell::Open;
        if coord.0 >= self.terminal.0 && coord.1 >= self.terminal.1 {
            self.terminal = coord;
        }
    }

    /// Blocks every cell and resets the terminal to the entry.
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Blocked);
        self.terminal = Maze::ENTRY;
    }

    /// Open neighbors of a cell, in [`NEIGHBOR_ORDER`].
    pub fn open_neighbors(&self, coord: Coord) -> impl Iterator<Item = Coord> + '_ {
        NEIGHBOR_ORDER
            .into_iter()
            .filter_map(move |direction| self.step(coord, direction, 1))
            .filter(move |&next| self.is_open(next))
    }

    /// Every open cell in row-major order.
    pub fn open_cells(&self) -> impl Iterator<Item = Coord> + '_ {
        self.cells.coords().filter(move |&coord| self.is_open(coord))
    }

    /// Static colouring of a cell: entry and terminal markers over open and blocked cells.
    pub fn paint_of(&self, coord: Coord) -> Paint {
        if coord == self.entry() {
            Paint::Entry
        } else if coord == self.terminal {
            Paint::Terminal
        } else if self.is_open(coord) {
            Paint::Open
        } else {
            Paint::Blocked
        }
    }
}

impl std::ops::Index<Coord> for Maze {
    type Output = Cell;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.cells[index]
    }
}

impl fmt::Display for Maze {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.rows() {
            for col in 0..self.cols() {
                let symbol = if self.is_open((row, col)) { '.' } else { '#' };
                write!(f, "{}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Parses the `#`/`.` picture produced by `Display`.
/// Cells are opened in row-major order, which decides the terminal cell.
impl FromStr for Maze {
    type Err = MazeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect::<Vec<_>>();
        let expected = lines.first().map_or(0, |line| line.chars().count());
        let rows = u16::try_from(lines.len()).map_err(|_| MazeError::TooLarge)?;
        let cols = u16::try_from(expected).map_err(|_| MazeError::TooLarge)?;
        let mut maze = Maze::new(rows, cols)?;

        for (row, line) in lines.iter().enumerate() {
            let found = line.chars().count();
            if found != expected {
                return Err(MazeError::Ragged {
                    row,
                    found,
                    expected,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                match ch {
                    '.' => maze.open((row as u16, col as u16)),
                    '#' => {}
                    _ => return Err(MazeError::Parse { row, col, ch }),
                }
            }
        }
        Ok(maze)
    }
}
