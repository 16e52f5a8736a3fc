use rand::{Rng, SeedableRng, rngs::StdRng};

mod random_walk;

pub use random_walk::{carve, has_adjacent_corridor};

use crate::{
    error::ConfigError,
    maze::{Coord, Direction, Maze},
};

/// Get a random number generator, optionally seeded for reproducibility.
pub fn get_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Tuning knobs controlling how straight and how dense the corridors are.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WalkConfig {
    /// Upper bound (exclusive) of the forced straight moves drawn after each step.
    turn_frequency: u32,
    /// Chance out of 1000 of going straight instead of evaluating a turn.
    turn_probability: u32,
}

impl Default for WalkConfig {
    fn default() -> Self {
        Self {
            turn_frequency: 10,
            turn_probability: 300,
        }
    }
}

impl WalkConfig {
    /// Largest meaningful turn probability, meaning "always go straight".
    pub const MAX_TURN_PROBABILITY: u32 = 1000;

    pub fn new(turn_frequency: u32, turn_probability: u32) -> Result<Self, ConfigError> {
        Self::default()
            .with_turn_frequency(turn_frequency)
            .with_turn_probability(turn_probability)
    }

    pub fn turn_frequency(&self) -> u32 {
        self.turn_frequency
    }

    pub fn turn_probability(&self) -> u32 {
        self.turn_probability
    }

    /// A turn frequency of 0 is accepted and means no forced straight moves at all.
    pub fn with_turn_frequency(self, turn_frequency: u32) -> Self {
        Self {
            turn_frequency,
            ..self
        }
    }

    pub fn with_turn_probability(self, turn_probability: u32) -> Result<Self, ConfigError> {
        if turn_probability > Self::MAX_TURN_PROBABILITY {
            return Err(ConfigError::TurnProbabilityOutOfRange(turn_probability));
        }
        Ok(Self {
            turn_probability,
            ..self
        })
    }

    /// Draws a fresh straight-move countdown in `[0, turn_frequency)`.
    fn roll_countdown<R: Rng>(&self, rng: &mut R) -> u32 {
        match self.turn_frequency {
            0 => 0,
            n => rng.random_range(0..n),
        }
    }

    /// Counts down a positive countdown, otherwise draws a new one.
    fn next_countdown<R: Rng>(&self, moves_before_turning: u32, rng: &mut R) -> u32 {
        match moves_before_turning {
            0 => self.roll_countdown(rng),
            n => n - 1,
        }
    }

    /// Whether the walk keeps going straight this step.
    fn keeps_straight<R: Rng>(&self, moves_before_turning: u32, rng: &mut R) -> bool {
        // Always draw so the random sequence does not depend on the countdown
        let roll = rng.random_range(0..Self::MAX_TURN_PROBABILITY);
        roll < self.turn_probability || moves_before_turning > 0
    }
}

/// Clears the maze and carves a fresh corridor pattern from the entry cell heading down.
/// Returns the terminal cell.
pub fn generate_maze<R: Rng>(maze: &mut Maze, config: &WalkConfig, rng: &mut R) -> Coord {
    maze.clear();
    let entry = maze.entry();
    carve(maze, entry, Direction::Down, config, rng);
    let terminal = maze.terminal();
    tracing::info!(
        rows = maze.rows(),
        cols = maze.cols(),
        open = maze.open_cells().count(),
        ?terminal,
        turn_frequency = config.turn_frequency,
        turn_probability = config.turn_probability,
        "generated maze"
    );
    terminal
}
