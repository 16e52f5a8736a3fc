use std::collections::VecDeque;

use super::Path;
use crate::{
    error::SolveError,
    maze::{Coord, Grid, Maze, NEIGHBOR_ORDER, VisitMarks},
};

/// Breadth-first search from `start` to `target`.
///
/// `marks` is cleared first. Cells are marked and given their predecessor when they are enqueued, and the search stops
/// as soon as the target is dequeued. The path is rebuilt by following predecessors from the
/// target; the start has no predecessor, so it is not part of the path.
pub fn solve_bfs(
    maze: &Maze,
    start: Coord,
    target: Coord,
    marks: &mut VisitMarks,
) -> Result<Path, SolveError> {
    if !maze.is_open(start) {
        return Err(SolveError::StartBlocked(start));
    }

    let mut predecessors: Grid<Option<Coord>> = Grid::new(maze.rows(), maze.cols(), None);
    let mut queue = VecDeque::from([start]);
    marks.clear();
    marks.mark(start);

    let mut reached = false;
    while let Some(current) = queue.pop_front() {
        if current == target {
            reached = true;
            break;
        }
        for direction in NEIGHBOR_ORDER {
            let next = match maze.step(current, direction, 1) {
                Some(next) if maze.is_open(next) => next,
                _ => continue,
            };
            if !marks.mark(next) {
                continue;
            }
            predecessors[next] = Some(current);
            queue.push_back(next);
        }
    }

    if !reached {
        return Err(SolveError::Unreachable { start, target });
    }

    let mut cells = Vec::new();
    let mut current = target;
    while let Some(previous) = predecessors[current] {
        cells.push(current);
        current = previous;
    }
    let hops = cells.len();
    Ok(Path { cells, hops })
}
