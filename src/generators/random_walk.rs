use rand::Rng;

use super::WalkConfig;
use crate::maze::{Coord, Direction, Maze};

/// A candidate move when the walk turns: jump `times` cells towards `direction`.
#[derive(Debug, Clone, Copy)]
struct Transition {
    direction: Direction,
    times: u16,
}

const fn jump(direction: Direction, times: u16) -> Transition {
    Transition { direction, times }
}

/// Candidates considered when turning while heading in `direction`, in the order they are tried.
/// Perpendicular turns jump two cells so the new corridor does not touch the old one;
/// the straight continuation moves a single cell.
fn transitions(direction: Direction) -> [Transition; 3] {
    use Direction::*;
    match direction {
        Down => [jump(Right, 2), jump(Left, 2), jump(Down, 1)],
        Up => [jump(Right, 2), jump(Left, 2), jump(Up, 1)],
        Left => [jump(Up, 2), jump(Down, 2), jump(Left, 1)],
        Right => [jump(Up, 2), jump(Down, 2), jump(Right, 1)],
    }
}

/// Checks whether a cell reached while heading in `direction` has an open (or off-grid)
/// neighbor on either side, perpendicular to the travel direction.
pub fn has_adjacent_corridor(maze: &Maze, coord: Coord, direction: Direction) -> bool {
    let sides = if direction.is_horizontal() {
        [Direction::Up, Direction::Down]
    } else {
        [Direction::Left, Direction::Right]
    };
    sides
        .into_iter()
        .any(|side| maze.is_invalid(maze.step(coord, side, 1)))
}

/// A cell where the walk decided to turn, with the index of the next candidate to try.
struct TurnFrame {
    at: Coord,
    direction: Direction,
    next_candidate: usize,
}

/// Walks straight from `at` for as long as the walk keeps going straight.
/// Pushes a turn frame where it decides to turn, or stops silently on an invalid move.
fn walk_straight<R: Rng>(
    maze: &mut Maze,
    mut at: Coord,
    direction: Direction,
    mut moves_before_turning: u32,
    config: &WalkConfig,
    rng: &mut R,
    turns: &mut Vec<TurnFrame>,
) {
    loop {
        if maze.is_invalid(Some(at)) {
            return;
        }
        maze.open(at);

        if !config.keeps_straight(moves_before_turning, rng) {
            turns.push(TurnFrame {
                at,
                direction,
                next_candidate: 0,
            });
            return;
        }

        match maze.step(at, direction, 1) {
            Some(next)
                if !maze.is_invalid(Some(next))
                    && !has_adjacent_corridor(maze, next, direction) =>
            {
                at = next;
                moves_before_turning = config.next_countdown(moves_before_turning, rng);
            }
            _ => return,
        }
    }
}

/// Carves corridors with a biased random walk starting at `start` heading in `direction`.
///
/// At each cell the walk either continues straight or evaluates a turn. A turn tries every
/// candidate of the transition table in order, and every candidate that lands on a valid cell
/// without a parallel corridor next to it spawns its own branch, so one turn can fan out into
/// several corridors. Branches are explored depth first, one candidate at a time, and the
/// random draws happen in the same order as a recursive walk would make them.
pub fn carve<R: Rng>(
    maze: &mut Maze,
    start: Coord,
    direction: Direction,
    config: &WalkConfig,
    rng: &mut R,
) {
    let mut turns = Vec::new();
    walk_straight(maze, start, direction, 0, config, rng, &mut turns);

    while let Some(frame) = turns.last_mut() {
        let candidates = transitions(frame.direction);
        let Some(&transition) = candidates.get(frame.next_candidate) else {
            turns.pop();
            continue;
        };
        frame.next_candidate += 1;
        let at = frame.at;

        let target = match maze.step(at, transition.direction, transition.times) {
            Some(target) if !maze.is_invalid(Some(target)) => target,
            _ => continue,
        };
        if has_adjacent_corridor(maze, target, transition.direction) {
            continue;
        }

        // Connector between the turning cell and the jump target
        if let Some(connector) = maze.step(at, transition.direction, 1) {
            maze.open(connector);
        }
        tracing::trace!(?at, ?target, direction = ?transition.direction, "turn");

        let countdown = config.next_countdown(0, rng);
        walk_straight(
            maze,
            target,
            transition.direction,
            countdown,
            config,
            rng,
            &mut turns,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generators::{generate_maze, get_rng};

    /// Never turns on its own, every countdown is 0.
    fn straight_only() -> WalkConfig {
        WalkConfig::new(1, 1000).unwrap()
    }

    /// Turns at every cell, every countdown is 0.
    fn always_turn() -> WalkConfig {
        WalkConfig::new(1, 0).unwrap()
    }

    fn countdown<R: Rng>(config: &WalkConfig, moves: u32, rng: &mut R) -> u32 {
        match (moves, config.turn_frequency()) {
            (0, 0) => 0,
            (0, frequency) => rng.random_range(0..frequency),
            (n, _) => n - 1,
        }
    }

    /// The walk written as plain recursion, drawing from `rng` directly.
    fn recursive_walk<R: Rng>(
        maze: &mut Maze,
        at: Coord,
        direction: Direction,
        moves: u32,
        config: &WalkConfig,
        rng: &mut R,
    ) {
        if maze.is_invalid(Some(at)) {
            return;
        }
        maze.open(at);

        let roll = rng.random_range(0..1000);
        if roll < config.turn_probability() || moves > 0 {
            if let Some(next) = maze.step(at, direction, 1)
                && !maze.is_invalid(Some(next))
                && !has_adjacent_corridor(maze, next, direction)
            {
                let moves = countdown(config, moves, rng);
                recursive_walk(maze, next, direction, moves, config, rng);
            }
            return;
        }

        for Transition { direction, times } in transitions(direction) {
            let Some(target) = maze.step(at, direction, times) else {
                continue;
            };
            if maze.is_invalid(Some(target)) || has_adjacent_corridor(maze, target, direction) {
                continue;
            }
            if let Some(connector) = maze.step(at, direction, 1) {
                maze.open(connector);
            }
            let moves = countdown(config, moves, rng);
            recursive_walk(maze, target, direction, moves, config, rng);
        }
    }

    #[test]
    fn test_straight_walk_stops_at_the_border() {
        let mut maze = Maze::new(4, 4).unwrap();
        let terminal = generate_maze(&mut maze, &straight_only(), &mut get_rng(Some(3)));
        assert_eq!(maze.to_string(), "####\n#.##\n#.##\n#.##\n");
        assert_eq!(terminal, (3, 1));
    }

    #[test]
    fn test_turning_walk_fixture() {
        let mut maze = Maze::new(4, 4).unwrap();
        let terminal = generate_maze(&mut maze, &always_turn(), &mut get_rng(Some(3)));
        // Right jump to (1,3) through the connector (1,2); the straight candidate only opens (2,1)
        assert_eq!(maze.to_string(), "####\n#...\n#.##\n####\n");
        assert_eq!(terminal, (1, 3));
    }

    #[test]
    fn test_turn_fans_out_into_every_valid_candidate() {
        let mut maze = Maze::new(5, 7).unwrap();
        carve(
            &mut maze,
            (1, 3),
            Direction::Down,
            &always_turn(),
            &mut get_rng(Some(3)),
        );
        let expected = "\
#######
.......
###.#.#
##....#
#####.#
";
        assert_eq!(maze.to_string(), expected);
        assert_eq!(maze.terminal(), (4, 5));
    }

    #[test]
    fn test_walk_refuses_to_run_beside_a_corridor() {
        let mut maze: Maze = "
            ######
            ######
            ##.###
            ##.###
            ##.###
            ######
        "
        .parse()
        .unwrap();
        carve(
            &mut maze,
            (1, 3),
            Direction::Down,
            &straight_only(),
            &mut get_rng(Some(3)),
        );
        // The step to (2,3) would run alongside the corridor in column 2
        assert!(maze.is_open((1, 3)));
        assert!(!maze.is_open((2, 3)));
    }

    #[test]
    fn test_adjacent_corridor_counts_the_border() {
        let maze = Maze::new(4, 4).unwrap();
        assert!(has_adjacent_corridor(&maze, (2, 3), Direction::Down));
        assert!(!has_adjacent_corridor(&maze, (2, 2), Direction::Down));
        assert!(has_adjacent_corridor(&maze, (0, 2), Direction::Right));
        assert!(!has_adjacent_corridor(&maze, (1, 2), Direction::Right));
    }

    #[test]
    fn test_carve_from_open_cell_is_a_no_op() {
        let mut maze: Maze = "###\n#.#\n###".parse().unwrap();
        carve(
            &mut maze,
            (1, 1),
            Direction::Down,
            &straight_only(),
            &mut get_rng(Some(3)),
        );
        assert_eq!(maze.open_cells().count(), 1);
    }

    #[test]
    fn test_carve_matches_the_recursive_walk() {
        let configs = [
            WalkConfig::default(),
            WalkConfig::new(1, 0).unwrap(),
            WalkConfig::new(3, 100).unwrap(),
            WalkConfig::new(20, 900).unwrap(),
            WalkConfig::new(0, 300).unwrap(),
        ];
        for (rows, cols) in [(4, 4), (9, 13), (20, 20), (15, 40)] {
            for config in &configs {
                for seed in 0..50 {
                    let mut carved = Maze::new(rows, cols).unwrap();
                    let mut rng = get_rng(Some(seed));
                    carve(&mut carved, Maze::ENTRY, Direction::Down, config, &mut rng);

                    let mut expected = Maze::new(rows, cols).unwrap();
                    let mut expected_rng = get_rng(Some(seed));
                    recursive_walk(
                        &mut expected,
                        Maze::ENTRY,
                        Direction::Down,
                        0,
                        config,
                        &mut expected_rng,
                    );

                    assert_eq!(carved.to_string(), expected.to_string(), "seed {}", seed);
                    assert_eq!(carved.terminal(), expected.terminal());
                    // Same number of draws
                    assert_eq!(rng.random::<u64>(), expected_rng.random::<u64>());
                }
            }
        }
    }
}
