mod bfs;
mod dfs;

pub use bfs::solve_bfs;
pub use dfs::solve_dfs;

use crate::{
    error::SolveError,
    maze::{Coord, Maze, VisitMarks},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Solver {
    Dfs,
    Bfs,
}

impl std::fmt::Display for Solver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Solver::Dfs => write!(f, "Depth-First Search (DFS)"),
            Solver::Bfs => write!(f, "Breadth-First Search (BFS)"),
        }
    }
}

/// A path found by a traversal, listed from the target back towards the start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Path {
    cells: Vec<Coord>,
    /// Number of moves between start and target
    hops: usize,
}

impl Path {
    pub fn cells(&self) -> &[Coord] {
        &self.cells
    }

    pub fn hops(&self) -> usize {
        self.hops
    }

    pub fn contains(&self, coord: Coord) -> bool {
        self.cells.contains(&coord)
    }
}

/// Runs `solver` from the maze entry to its terminal cell, recording visits in `marks`.
/// Marks from an earlier run are discarded.
pub fn solve_maze(maze: &Maze, solver: Solver, marks: &mut VisitMarks) -> Result<Path, SolveError> {
    let (start, target) = (maze.entry(), maze.terminal());
    let result = match solver {
        Solver::Dfs => solve_dfs(maze, start, target, marks),
        Solver::Bfs => solve_bfs(maze, start, target, marks),
    };
    match &result {
        Ok(path) => tracing::info!(
            %solver,
            hops = path.hops(),
            visited = marks.count(),
            "path found"
        ),
        Err(e) => tracing::warn!(%solver, visited = marks.count(), "{}", e),
    }
    result
}
