use std::io::{Stdout, Write};

use crossterm::{
    ExecutableCommand, cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};

use crate::{
    app,
    histogram::{self, Viewport},
};

/// Rough pixel size of one terminal cell, used when the terminal does not report pixels
const FALLBACK_CELL_PIXELS: (u32, u32) = (8, 16);

/// Pixel size of the terminal window, estimated from its cell size if unknown
fn viewport() -> Viewport {
    match terminal::window_size() {
        Ok(size) if size.width > 0 && size.height > 0 => Viewport {
            width: u32::from(size.width),
            height: u32::from(size.height),
        },
        Ok(size) => Viewport {
            width: u32::from(size.columns) * FALLBACK_CELL_PIXELS.0,
            height: u32::from(size.rows) * FALLBACK_CELL_PIXELS.1,
        },
        Err(_) => {
            let (cols, rows) = terminal::size().unwrap_or((80, 24));
            Viewport {
                width: u32::from(cols) * FALLBACK_CELL_PIXELS.0,
                height: u32::from(rows) * FALLBACK_CELL_PIXELS.1,
            }
        }
    }
}

/// Entry point of the histogram mode
pub fn run(stdout: &mut Stdout) -> std::io::Result<()> {
    queue!(
        stdout,
        style::SetAttribute(Attribute::Reverse),
        style::PrintStyledContent("Histogram Mode\r\n".with(Color::Yellow)),
        style::SetAttribute(Attribute::NoReverse),
    )?;
    stdout.flush()?;

    let content = match app::prompt_with_validation(
        stdout,
        "Text: ",
        |_| true,
        |s: &str| {
            if s.is_empty() {
                Err("Please enter some text.".to_string())
            } else {
                Ok(s.to_string())
            }
        },
    )? {
        Some(content) => content,
        None => return Ok(()),
    };

    let viewport = viewport();
    // One column per bar, and never more bars than the terminal is wide
    let term_cols = terminal::size().map_or(80, |(cols, _)| u32::from(cols));
    let container_width = viewport.width.min(term_cols * 3);
    let heights = histogram::bar_heights(&content, container_width, viewport);
    tracing::info!(
        chars = content.chars().count(),
        bars = heights.len(),
        scale = histogram::scale_for(viewport),
        "drawing histogram"
    );

    queue!(
        stdout,
        terminal::Clear(ClearType::All),
        cursor::MoveTo(0, 0),
        style::PrintStyledContent(content.as_str().with(Color::Cyan).attribute(Attribute::Bold)),
        style::Print("\r\n"),
    )?;
    histogram::render(stdout, &heights)?;
    stdout.execute(style::PrintStyledContent(
        "\r\nPress Esc to return to the menu...\r\n"
            .with(Color::Blue)
            .attribute(Attribute::Bold),
    ))?;
    app::wait_for_esc()
}
