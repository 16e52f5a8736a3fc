mod explore;
mod histogram;

use std::io::{Stdout, Write};

use crossterm::{
    ExecutableCommand, QueueableCommand, cursor,
    event::{self, KeyCode},
    queue,
    style::{self, Attribute, Color, StyledContent, Stylize},
    terminal::{self, ClearType},
};

use crate::maze::Paint;

/// What the user can do from the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Explore,
    Histogram,
    Quit,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Explore => write!(f, "Explore a corridor maze (DFS / BFS)"),
            Mode::Histogram => write!(f, "Character histogram"),
            Mode::Quit => write!(f, "Quit"),
        }
    }
}

const MODES: [Mode; 3] = [Mode::Explore, Mode::Histogram, Mode::Quit];

/// Rows kept free below the maze for the caption line.
pub(crate) const NUM_LOG_ROWS: u16 = 2;

/// Set a panic hook to restore terminal state on panic
/// This ensures that the terminal is not left in raw mode or alternate screen on panic
/// even if the panic occurs in a different thread
fn set_panic_hook() {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |panic_info| {
        let _ = restore_terminal(&mut std::io::stdout()); // ignore any errors as we are already failing
        hook(panic_info);
    }));
}

/// Setup terminal in raw mode and enter alternate screen
/// Also sets a panic hook to restore terminal on panic
pub fn setup_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    terminal::enable_raw_mode()?;
    set_panic_hook();
    queue!(
        stdout,
        terminal::EnterAlternateScreen,
        terminal::Clear(ClearType::All),
        cursor::Hide,
        cursor::MoveTo(0, 0)
    )?;
    stdout.flush()?;
    Ok(())
}

/// Restore terminal to original state
/// Leave alternate screen and disable raw mode
pub fn restore_terminal(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(stdout, terminal::LeaveAlternateScreen, cursor::Show)?;
    stdout.flush()?;
    terminal::disable_raw_mode()?;
    Ok(())
}

/// Entry point of the app: show the main menu until the user quits
pub fn run(stdout: &mut Stdout) -> std::io::Result<()> {
    loop {
        queue!(
            stdout,
            terminal::Clear(ClearType::All),
            cursor::MoveTo(0, 0)
        )?;
        stdout.flush()?;

        let mode = select_from_menu(
            stdout,
            "Select a mode (use arrow keys and Enter, or Esc to exit):",
            &MODES,
        )?;
        tracing::info!("[app] selected mode: {:?}", mode);
        match mode {
            Some(Mode::Explore) => explore::run(stdout)?,
            Some(Mode::Histogram) => histogram::run(stdout)?,
            Some(Mode::Quit) | None => return Ok(()),
        }
    }
}

/// Print a message on the line below a grid of `grid_rows` rows, clearing the line first.
/// `None` only clears the line.
pub(crate) fn log_terminal<W: Write, D: std::fmt::Display>(
    stdout: &mut W,
    grid_rows: u16,
    msg: Option<StyledContent<D>>,
) -> std::io::Result<()> {
    queue!(
        stdout,
        cursor::MoveTo(0, grid_rows + 1),
        terminal::Clear(ClearType::CurrentLine)
    )?;
    if let Some(msg) = msg {
        stdout.queue(style::PrintStyledContent(msg))?;
    }
    stdout.flush()
}

/// Block until a key is pressed and return its code. Releases and repeats are skipped.
fn read_key_press() -> std::io::Result<KeyCode> {
    loop {
        if let event::Event::Key(key_event) = event::read()?
            && key_event.kind == event::KeyEventKind::Press
        {
            return Ok(key_event.code);
        }
    }
}

/// Wait for the user to press the Esc key
pub(crate) fn wait_for_esc() -> std::io::Result<()> {
    while read_key_press()? != KeyCode::Esc {}
    Ok(())
}

/// Go back to the saved cursor position and wipe everything below it
fn rewind_prompt<W: Write>(out: &mut W) -> std::io::Result<()> {
    queue!(
        out,
        cursor::RestorePosition,
        terminal::Clear(ClearType::FromCursorDown)
    )
}

/// Get user input with real-time validation and feedback
/// Only characters accepted by `accept_char` are added to the input.
/// Returns None if user cancels input with Esc
/// Returns Some(T) if user inputs a valid input and presses Enter, where T is the validated type
pub(crate) fn prompt_with_validation<F, T>(
    stdout: &mut Stdout,
    prompt: &str,
    accept_char: fn(char) -> bool,
    validate: F,
) -> std::io::Result<Option<T>>
where
    F: Fn(&str) -> Result<T, String>,
{
    queue!(stdout, cursor::Hide, cursor::SavePosition)?;
    let mut input = String::new();

    let value = loop {
        rewind_prompt(stdout)?;
        // Input is green while valid, red otherwise, with the reason underneath
        let verdict = validate(input.trim());
        let input_color = if verdict.is_ok() { Color::Green } else { Color::Red };
        queue!(
            stdout,
            style::PrintStyledContent(prompt.with(Color::Cyan).attribute(Attribute::Bold)),
            style::PrintStyledContent(input.as_str().with(input_color)),
            style::Print(" \r\n")
        )?;
        if let Err(reason) = verdict {
            stdout.queue(style::PrintStyledContent(
                reason.with(Color::DarkGrey).attribute(Attribute::Dim),
            ))?;
        }
        stdout.flush()?;

        match read_key_press()? {
            KeyCode::Enter => {
                if let Ok(value) = validate(input.trim()) {
                    break Some(value);
                }
            }
            KeyCode::Char(c) if accept_char(c) && !c.is_control() => input.push(c),
            KeyCode::Backspace => {
                input.pop();
            }
            KeyCode::Esc => break None,
            _ => {}
        }
    };
    rewind_prompt(stdout)?;
    queue!(stdout, cursor::Show)?;
    stdout.flush()?;

    Ok(value)
}

/// Calculate max maze size along one axis based on terminal size and cell size.
/// The entry cell sits at (1, 1), so the result is at least 2.
fn get_max_maze_size(term_size: u16, cell_size: u16) -> u16 {
    (term_size / cell_size).max(2)
}

/// Ask user for maze dimensions (rows and columns, at least 2 each)
/// Returns None if user cancels input with Esc
/// Returns Some((rows, cols)) if user inputs valid dimensions
pub(crate) fn ask_maze_dimensions(stdout: &mut Stdout) -> std::io::Result<Option<(u16, u16)>> {
    stdout.execute(style::PrintStyledContent(
        "Enter maze dimensions (at least 2 rows and 2 columns), or press Esc to exit. \
Press Enter on an empty line to fill the terminal.\r\n"
            .with(Color::Blue),
    ))?;

    // Validation closure based on the current terminal size
    let validate = |s: &str, is_cols: bool| {
        let max_size = match terminal::size() {
            Ok((term_cols, term_rows)) => {
                if is_cols {
                    get_max_maze_size(term_cols, Paint::CELL_WIDTH)
                } else {
                    // Reserve rows for the caption
                    get_max_maze_size(term_rows.saturating_sub(NUM_LOG_ROWS), 1)
                }
            }
            // Fallback to max size if terminal size cannot be determined
            Err(_) => u16::MAX,
        };

        if s.is_empty() {
            return Ok(max_size);
        }

        let error_msg = format!("Please enter a valid number between 2 and {}.", max_size);
        s.parse::<u16>()
            .map_err(|_| error_msg.clone())
            .and_then(|n| match n {
                2.. if n <= max_size => Ok(n),
                _ => Err(error_msg),
            })
    };

    let is_digit = |c: char| c.is_ascii_digit();

    let rows = match prompt_with_validation(stdout, "Rows: ", is_digit, |s| validate(s, false))? {
        Some(rows) => rows,
        None => return Ok(None),
    };
    stdout.execute(style::PrintStyledContent(
        format!("Rows set to {}\r\n", rows)
            .with(Color::Green)
            .attribute(Attribute::Bold),
    ))?;

    let cols = match prompt_with_validation(stdout, "Columns: ", is_digit, |s| validate(s, true))?
    {
        Some(cols) => cols,
        None => return Ok(None),
    };
    stdout.execute(style::PrintStyledContent(
        format!("Columns set to {}\r\n", cols)
            .with(Color::Green)
            .attribute(Attribute::Bold),
    ))?;

    Ok(Some((rows, cols)))
}

/// Present a menu of options to the user and let them select one using arrow keys
/// Returns None if user cancels input with Esc
/// Returns Some(T) if user selects an option and presses Enter, where T is the option type
pub(crate) fn select_from_menu<T: std::fmt::Display + Copy>(
    stdout: &mut Stdout,
    prompt: &str,
    options: &[T],
) -> std::io::Result<Option<T>> {
    if options.is_empty() {
        return Ok(None);
    }
    queue!(stdout, cursor::Hide, cursor::SavePosition)?;
    let mut selected = 0;

    let choice = loop {
        rewind_prompt(stdout)?;
        stdout.queue(style::PrintStyledContent(prompt.with(Color::Yellow)))?;
        for (i, option) in options.iter().enumerate() {
            let line = format!("\r\n{}", option);
            if i == selected {
                stdout.queue(style::PrintStyledContent(line.as_str().reverse()))?;
            } else {
                stdout.queue(style::Print(line))?;
            }
        }
        stdout.queue(style::Print("\r\n"))?;
        stdout.flush()?;

        // Arrows wrap around at both ends
        match read_key_press()? {
            KeyCode::Up => selected = (selected + options.len() - 1) % options.len(),
            KeyCode::Down => selected = (selected + 1) % options.len(),
            KeyCode::Enter => break Some(options[selected]),
            KeyCode::Esc => break None,
            _ => {}
        }
    };
    rewind_prompt(stdout)?;
    queue!(stdout, cursor::Show)?;
    stdout.flush()?;

    Ok(choice)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_maze_size() {
        assert_eq!(get_max_maze_size(80, Paint::CELL_WIDTH), 40);
        assert_eq!(get_max_maze_size(3, Paint::CELL_WIDTH), 2);
        assert_eq!(get_max_maze_size(0, 1), 2);
    }

    #[test]
    fn test_rewind_prompt_restores_and_clears() {
        let mut out = Vec::new();
        rewind_prompt(&mut out).unwrap();
        let mut expected = Vec::new();
        queue!(
            expected,
            cursor::RestorePosition,
            terminal::Clear(ClearType::FromCursorDown)
        )
        .unwrap();
        assert_eq!(out, expected);
    }

    #[test]
    fn test_log_terminal_clears_the_line() {
        let mut out = Vec::new();
        log_terminal(&mut out, 3, Some("hello".with(Color::Green))).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("hello"));
    }
}
