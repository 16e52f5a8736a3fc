use std::sync::mpsc::SyncSender;

use rand::{Rng, rngs::StdRng};

use crate::{
    error::{ConfigError, MazeError, SolveError},
    generators::{WalkConfig, generate_maze, get_rng},
    maze::{Canvas, CanvasEvent, Coord, Maze, Paint, VisitMarks},
    solvers::{Path, Solver, solve_maze},
};

/// Owns one maze together with everything that acts on it: the walk configuration, the random
/// source, the traversal marks and the canvas mirroring it all.
pub struct Session {
    maze: Maze,
    config: WalkConfig,
    rng: StdRng,
    marks: VisitMarks,
    canvas: Canvas,
}

impl Session {
    /// Upper bound (exclusive) of the turn probability drawn by [`Session::refresh`].
    pub const REFRESH_TURN_PROBABILITY_BOUND: u32 = 300;

    /// Creates a session, generates the first maze and paints it.
    pub fn new(
        rows: u16,
        cols: u16,
        config: WalkConfig,
        seed: Option<u64>,
        events: Option<SyncSender<CanvasEvent>>,
    ) -> Result<Self, MazeError> {
        let maze = Maze::new(rows, cols)?;
        let mut session = Session {
            maze,
            config,
            rng: get_rng(seed),
            marks: VisitMarks::new(rows, cols),
            canvas: Canvas::new(rows, cols, events),
        };
        session.regenerate();
        Ok(session)
    }

    pub fn maze(&self) -> &Maze {
        &self.maze
    }

    pub fn config(&self) -> &WalkConfig {
        &self.config
    }

    pub fn marks(&self) -> &VisitMarks {
        &self.marks
    }

    pub fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Throws the current maze away and generates a new one with the current configuration.
    pub fn regenerate(&mut self) -> Coord {
        let terminal = generate_maze(&mut self.maze, &self.config, &mut self.rng);
        self.reset();
        self.canvas.caption(format!(
            "New maze: turn frequency {}, turn probability {}/1000",
            self.config.turn_frequency(),
            self.config.turn_probability()
        ));
        terminal
    }

    /// Re-rolls the turn probability below [`Session::REFRESH_TURN_PROBABILITY_BOUND`]
    /// and regenerates.
    pub fn refresh(&mut self) -> Result<Coord, ConfigError> {
        let turn_probability = self
            .rng
            .random_range(0..Self::REFRESH_TURN_PROBABILITY_BOUND);
        self.set_turn_probability(turn_probability)
    }

    /// Applies a new turn frequency and regenerates.
    pub fn set_turn_frequency(&mut self, turn_frequency: u32) -> Coord {
        self.config = self.config.with_turn_frequency(turn_frequency);
        self.regenerate()
    }

    /// Applies a new turn probability and regenerates.
    pub fn set_turn_probability(&mut self, turn_probability: u32) -> Result<Coord, ConfigError> {
        self.config = self.config.with_turn_probability(turn_probability)?;
        Ok(self.regenerate())
    }

    /// Shows a line of text below the maze.
    pub fn caption(&mut self, text: impl Into<String>) {
        self.canvas.caption(text);
    }

    /// Clears the traversal marks and restores the static colouring without regenerating.
    pub fn reset(&mut self) {
        self.marks.clear();
        self.repaint();
    }

    fn repaint(&mut self) {
        let maze = &self.maze;
        self.canvas.draw(|coord| maze.paint_of(coord));
    }

    /// Resets, runs `solver` from the entry to the terminal cell and paints the outcome:
    /// first every visited cell in visit order, then the static colouring with the path on top.
    pub fn run(&mut self, solver: Solver) -> Result<Path, SolveError> {
        self.reset();
        let result = solve_maze(&self.maze, solver, &mut self.marks);

        for &coord in self.marks.order() {
            if self.maze.paint_of(coord) == Paint::Open {
                self.canvas.paint(coord, Paint::Visited);
            }
        }
        self.repaint();

        match &result {
            Ok(path) => {
                for &coord in path.cells() {
                    if self.maze.paint_of(coord) == Paint::Open {
                        self.canvas.paint(coord, Paint::Route);
                    }
                }
                self.canvas.caption(format!(
                    "{}: path of {} moves, {} cells visited",
                    solver,
                    path.hops(),
                    self.marks.count()
                ));
            }
            Err(e) => {
                self.canvas.caption(format!("{}: {}", solver, e));
            }
        }
        result
    }
}
