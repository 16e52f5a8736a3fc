use super::Path;
use crate::{
    error::SolveError,
    maze::{Coord, Maze, NEIGHBOR_ORDER, VisitMarks},
};

/// Depth-first search from `start` to `target`.
///
/// `marks` is cleared first. Cells are marked as they are entered and never unmarked, so each
/// cell is tried at most once.
/// The stack keeps, for each cell on the current branch, the index of the next neighbor
/// direction to try, which reproduces the visit order of the recursive formulation.
/// The returned path runs from `target` back to `start`, both included.
pub fn solve_dfs(
    maze: &Maze,
    start: Coord,
    target: Coord,
    marks: &mut VisitMarks,
) -> Result<Path, SolveError> {
    if !maze.is_open(start) {
        return Err(SolveError::StartBlocked(start));
    }
    marks.clear();
    marks.mark(start);
    if start == target {
        return Ok(Path {
            cells: vec![start],
            hops: 0,
        });
    }

    let mut stack: Vec<(Coord, usize)> = vec![(start, 0)];
    while let Some((coord, next_direction)) = stack.last_mut() {
        let Some(&direction) = NEIGHBOR_ORDER.get(*next_direction) else {
            stack.pop();
            continue;
        };
        *next_direction += 1;

        let next = match maze.step(*coord, direction, 1) {
            Some(next) if maze.is_open(next) => next,
            _ => continue,
        };
        if !marks.mark(next) {
            continue;
        }

        if next == target {
            let cells = std::iter::once(target)
                .chain(stack.iter().rev().map(|&(coord, _)| coord))
                .collect::<Vec<_>>();
            let hops = cells.len() - 1;
            return Ok(Path { cells, hops });
        }
        stack.push((next, 0));
    }

    Err(SolveError::Unreachable { start, target })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{WalkConfig, generate_maze, get_rng};

    /// Depth-first search written as plain recursion; pushes the path from the target back.
    fn recursive_dfs(
        maze: &Maze,
        at: Coord,
        target: Coord,
        marks: &mut VisitMarks,
        path: &mut Vec<Coord>,
    ) -> bool {
        if !marks.mark(at) {
            return false;
        }
        if at == target {
            path.push(at);
            return true;
        }
        for direction in NEIGHBOR_ORDER {
            if let Some(next) = maze.step(at, direction, 1)
                && maze.is_open(next)
                && recursive_dfs(maze, next, target, marks, path)
            {
                path.push(at);
                return true;
            }
        }
        false
    }

    #[test]
    fn test_dfs_matches_the_recursive_search() {
        for config in [
            WalkConfig::default(),
            WalkConfig::new(3, 100).unwrap(),
            WalkConfig::new(20, 900).unwrap(),
        ] {
            for seed in 0..40 {
                let mut maze = Maze::new(18, 30).unwrap();
                generate_maze(&mut maze, &config, &mut get_rng(Some(seed)));
                let (start, target) = (maze.entry(), maze.terminal());

                let mut marks = VisitMarks::new(maze.rows(), maze.cols());
                let path = solve_dfs(&maze, start, target, &mut marks).unwrap();

                let mut expected_marks = VisitMarks::new(maze.rows(), maze.cols());
                let mut expected_path = Vec::new();
                assert!(recursive_dfs(
                    &maze,
                    start,
                    target,
                    &mut expected_marks,
                    &mut expected_path
                ));

                assert_eq!(path.cells(), expected_path.as_slice(), "seed {}", seed);
                assert_eq!(marks.order(), expected_marks.order(), "seed {}", seed);
            }
        }
    }

    #[test]
    fn test_dfs_straight_corridor() {
        let maze: Maze = "
            #######
            #.....#
            #######
        "
        .parse()
        .unwrap();
        let mut marks = VisitMarks::new(maze.rows(), maze.cols());
        let path = solve_dfs(&maze, (1, 1), (1, 5), &mut marks).unwrap();
        assert_eq!(path.cells(), &[(1, 5), (1, 4), (1, 3), (1, 2), (1, 1)]);
        assert_eq!(path.hops(), 4);
    }

    #[test]
    fn test_dfs_prefers_right_then_left_then_up_then_down() {
        // Two routes to the target; the right-hand one is tried first even though it is longer
        let maze: Maze = "
            #######
            #.....#
            #.###.#
            #.....#
            #######
        "
        .parse()
        .unwrap();
        let mut marks = VisitMarks::new(maze.rows(), maze.cols());
        let path = solve_dfs(&maze, (1, 1), (3, 1), &mut marks).unwrap();
        assert_eq!(path.hops(), 10);
        assert_eq!(path.cells().first(), Some(&(3, 1)));
        assert_eq!(path.cells().last(), Some(&(1, 1)));
        assert!(path.contains((1, 5)));
        // Visits begin by heading right
        assert_eq!(&marks.order()[..3], &[(1, 1), (1, 2), (1, 3)]);
    }

    #[test]
    fn test_dfs_unreachable() {
        let maze: Maze = "
            #####
            #.#.#
            #####
        "
        .parse()
        .unwrap();
        let mut marks = VisitMarks::new(maze.rows(), maze.cols());
        assert_eq!(
            solve_dfs(&maze, (1, 1), (1, 3), &mut marks),
            Err(SolveError::Unreachable {
                start: (1, 1),
                target: (1, 3)
            })
        );
        assert_eq!(
            solve_dfs(&maze, (0, 0), (1, 3), &mut VisitMarks::new(3, 5)),
            Err(SolveError::StartBlocked((0, 0)))
        );
    }

    #[test]
    fn test_dfs_start_is_target() {
        let maze: Maze = "###\n#.#\n###".parse().unwrap();
        let mut marks = VisitMarks::new(3, 3);
        let path = solve_dfs(&maze, (1, 1), (1, 1), &mut marks).unwrap();
        assert_eq!(path.cells(), &[(1, 1)]);
        assert_eq!(path.hops(), 0);
    }
}
