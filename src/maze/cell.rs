use crossterm::style::{Color, Stylize};

use std::fmt;

/// Structural state of a maze cell.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    /// A wall. Every cell starts out blocked.
    #[default]
    Blocked,
    /// A walkable cell carved by the generator.
    Open,
}

impl Cell {
    pub fn is_open(self) -> bool {
        self == Cell::Open
    }
}

/// Presentation of a cell on the canvas. Never read by the algorithms.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    #[default]
    Blocked,
    Open,
    /// The entry cell, where every traversal starts.
    Entry,
    /// The terminal cell, the traversal target.
    Terminal,
    /// A cell visited by a traversal.
    Visited,
    /// A cell on the path found by a traversal.
    Route,
}

impl Paint {
    /// The width of each cell when rendered, in character widths.
    pub const CELL_WIDTH: u16 = 2;
}

impl fmt::Display for Paint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let styled_symbol = match self {
            Paint::Blocked => "⬜".with(Color::White),
            Paint::Open => "  ".with(Color::Reset),
            Paint::Entry => "🟩".with(Color::Green),
            Paint::Terminal => "🟥".with(Color::Red),
            Paint::Visited => "* ".with(Color::Blue),
            Paint::Route => "🟨".with(Color::Yellow),
        };

        #[cfg(debug_assertions)]
        {
            use unicode_width::UnicodeWidthStr;
            assert_eq!(
                styled_symbol.content().width(),
                Paint::CELL_WIDTH as usize,
                "Each cell must occupy exactly two character widths."
            );
        }

        write!(f, "{}", styled_symbol)
    }
}
