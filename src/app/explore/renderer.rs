use std::{
    io::Write,
    sync::{
        atomic::{AtomicBool, Ordering},
        mpsc::{Receiver, RecvTimeoutError},
    },
    time::Duration,
};

use crossterm::{
    cursor, queue,
    style::{self, Attribute, Color, Stylize},
    terminal::{self, ClearType},
};
use unicode_truncate::UnicodeTruncateStr;

use crate::{
    app::{self, NUM_LOG_ROWS},
    maze::{CanvasEvent, Paint},
};

pub struct Renderer<W: Write> {
    /// Where the canvas is drawn, normally stdout
    out: W,
    /// Current grid dimensions (rows, cols)
    grid_dims: Option<(u16, u16)>,
    /// Whether the terminal was too small for the grid at the last size check
    too_small: bool,
    /// Time to wait after each animated cell so traversals can be followed
    animation_step: Duration,
    /// How often to check the stop flag while waiting for events
    recv_timeout: Duration,
}

impl<W: Write> Renderer<W> {
    pub fn new(out: W, animation_step: Duration, recv_timeout: Duration) -> Self {
        Self {
            out,
            grid_dims: None,
            too_small: false,
            animation_step,
            recv_timeout,
        }
    }

    /// Check if the terminal is large enough for the given grid dimensions
    /// If not, display a message and return Ok(false)
    fn check_size(&mut self, rows: u16, cols: u16) -> std::io::Result<bool> {
        let (term_cols, term_rows) = match terminal::size() {
            Ok(size) => size,
            // Not a terminal, e.g. when rendering into a buffer
            Err(_) => return Ok(true),
        };
        let needed_cols = cols.saturating_mul(Paint::CELL_WIDTH);
        let needed_rows = rows.saturating_add(NUM_LOG_ROWS);
        if term_cols < needed_cols || term_rows < needed_rows {
            let msg = format!(
                "Terminal size ({}x{}) is too small for the maze ({}x{} cells). Please resize the terminal.\r\n",
                term_cols, term_rows, rows, cols
            );
            queue!(
                self.out,
                terminal::Clear(ClearType::All),
                cursor::MoveTo(0, 0),
                style::PrintStyledContent(msg.with(Color::Yellow).attribute(Attribute::Bold)),
            )?;
            self.out.flush()?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Render a single canvas event
    fn render_canvas_event(&mut self, event: &CanvasEvent) -> std::io::Result<()> {
        match event {
            CanvasEvent::Initial { rows, cols, paint } => {
                self.grid_dims = Some((*rows, *cols));
                self.too_small = !self.check_size(*rows, *cols)?;
                if self.too_small {
                    return Ok(());
                }

                queue!(
                    self.out,
                    terminal::Clear(ClearType::All),
                    cursor::MoveTo(0, 0)
                )?;
                for _row in 0..*rows {
                    for _col in 0..*cols {
                        queue!(self.out, style::Print(paint))?;
                    }
                    queue!(self.out, style::Print("\r\n"))?;
                }
                self.out.flush()?;
            }
            CanvasEvent::Update { coord, new, .. } => {
                let Some((rows, cols)) = self.grid_dims else {
                    // Grid dimensions not yet received, cannot render
                    return Ok(());
                };
                if self.too_small || coord.0 >= rows || coord.1 >= cols {
                    return Ok(());
                }
                // Move the cursor to the cell and print the new paint
                queue!(
                    self.out,
                    cursor::MoveTo(coord.1 * Paint::CELL_WIDTH, coord.0),
                    style::Print(new)
                )?;
                self.out.flush()?;
                if matches!(new, Paint::Visited | Paint::Route) {
                    std::thread::sleep(self.animation_step);
                }
            }
            CanvasEvent::Caption(text) => {
                let Some((rows, _)) = self.grid_dims else {
                    return Ok(());
                };
                if self.too_small {
                    return Ok(());
                }
                let width = terminal::size().map_or(usize::MAX, |(cols, _)| cols as usize);
                let (text, _) = text.unicode_truncate(width);
                app::log_terminal(&mut self.out, rows, Some(text.with(Color::Cyan)))?;
            }
        }
        Ok(())
    }

    /// Render loop that processes canvas events until every sender is dropped or `should_stop`
    /// is set.
    pub fn render(
        &mut self,
        canvas_event_rx: Receiver<CanvasEvent>,
        should_stop: &AtomicBool,
    ) -> std::io::Result<()> {
        loop {
            if should_stop.load(Ordering::Acquire) {
                tracing::debug!("[render] should_stop flag set, exiting render thread");
                break;
            }
            match canvas_event_rx.recv_timeout(self.recv_timeout) {
                Ok(event) => self.render_canvas_event(&event)?,
                Err(RecvTimeoutError::Timeout) => continue,
                Err(RecvTimeoutError::Disconnected) => {
                    tracing::debug!("[render] canvas event channel closed, exiting render thread");
                    break;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_until_disconnected() {
        let (tx, rx) = std::sync::mpsc::sync_channel(8);
        tx.send(CanvasEvent::Initial {
            rows: 2,
            cols: 2,
            paint: Paint::Blocked,
        })
        .unwrap();
        tx.send(CanvasEvent::Update {
            coord: (1, 1),
            old: Paint::Blocked,
            new: Paint::Entry,
        })
        .unwrap();
        drop(tx);

        let mut out = Vec::new();
        let mut renderer = Renderer::new(&mut out, Duration::ZERO, Duration::from_millis(10));
        renderer.render(rx, &AtomicBool::new(false)).unwrap();
        drop(renderer);
        // Either the grid or the too-small warning was drawn, depending on the test terminal
        assert!(!out.is_empty());
    }

    #[test]
    fn test_stop_flag_ends_rendering() {
        let (_tx, rx) = std::sync::mpsc::sync_channel::<CanvasEvent>(1);
        let mut renderer = Renderer::new(Vec::new(), Duration::ZERO, Duration::from_millis(1));
        renderer.render(rx, &AtomicBool::new(true)).unwrap();
        assert!(renderer.out.is_empty());
    }
}
