use std::{fmt, sync::mpsc::SyncSender};

use super::{Coord, cell::Paint, grid::Grid};

/// Events describing changes to the canvas, consumed by a renderer.
#[derive(Debug, Clone, PartialEq)]
pub enum CanvasEvent {
    /// A fresh canvas of the given size, every cell painted with `paint`.
    Initial { rows: u16, cols: u16, paint: Paint },
    /// A single cell changed from `old` to `new`.
    Update { coord: Coord, old: Paint, new: Paint },
    /// A line of text shown below the grid.
    Caption(String),
}

/// Address of a rendered cell, formatted as `"{row},{col}"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellKey(pub Coord);

impl fmt::Display for CellKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.0.0, self.0.1)
    }
}

/// One painted cell per grid coordinate.
/// Every change is forwarded to the optional sender so a render thread can mirror it.
pub struct Canvas {
    paints: Grid<Paint>,
    caption: Option<String>,
    sender: Option<SyncSender<CanvasEvent>>,
}

impl Canvas {
    pub fn new(rows: u16, cols: u16, sender: Option<SyncSender<CanvasEvent>>) -> Self {
        let paint = Paint::default();
        let canvas = Canvas {
            paints: Grid::new(rows, cols, paint),
            caption: None,
            sender,
        };
        canvas.send(CanvasEvent::Initial { rows, cols, paint });
        canvas
    }

    pub fn rows(&self) -> u16 {
        self.paints.rows()
    }

    pub fn cols(&self) -> u16 {
        self.paints.cols()
    }

    fn send(&self, event: CanvasEvent) {
        if let Some(sender) = &self.sender {
            // The renderer may have exited already, nothing to do then
            let _ = sender.send(event);
        }
    }

    /// Paints a single cell. Out-of-bounds coordinates are ignored.
    pub fn paint(&mut self, coord: Coord, paint: Paint) {
        let Some(&old) = self.paints.get(coord) else {
            return;
        };
        if old != paint {
            self.paints[coord] = paint;
            tracing::trace!(cell = %CellKey(coord), ?old, new = ?paint, "paint");
            self.send(CanvasEvent::Update {
                coord,
                old,
                new: paint,
            });
        }
    }

    /// Repaints every cell with the colour chosen by `color`.
    pub fn draw(&mut self, color: impl Fn(Coord) -> Paint) {
        for coord in self.paints.coords() {
            self.paint(coord, color(coord));
        }
    }

    /// Posts a caption line below the grid.
    pub fn caption(&mut self, text: impl Into<String>) {
        let text = text.into();
        self.send(CanvasEvent::Caption(text.clone()));
        self.caption = Some(text);
    }

    pub fn current_caption(&self) -> Option<&str> {
        self.caption.as_deref()
    }

    /// Sends the whole canvas again, e.g. after the renderer lost its picture on resize.
    pub fn replay(&self) {
        let paint = Paint::default();
        self.send(CanvasEvent::Initial {
            rows: self.rows(),
            cols: self.cols(),
            paint,
        });
        for coord in self.paints.coords() {
            let new = self.paints[coord];
            if new != paint {
                self.send(CanvasEvent::Update {
                    coord,
                    old: paint,
                    new,
                });
            }
        }
        if let Some(caption) = &self.caption {
            self.send(CanvasEvent::Caption(caption.clone()));
        }
    }

    /// Looks up a cell by its `"{row},{col}"` key.
    pub fn by_key(&self, key: &str) -> Option<Paint> {
        let (row, col) = key.split_once(',')?;
        let coord = (row.trim().parse().ok()?, col.trim().parse().ok()?);
        self.paints.get(coord).copied()
    }
}

impl std::ops::Index<Coord> for Canvas {
    type Output = Paint;

    fn index(&self, index: Coord) -> &Self::Output {
        &self.paints[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_changes_are_sent() {
        let (tx, rx) = std::sync::mpsc::sync_channel(16);
        let mut canvas = Canvas::new(2, 2, Some(tx));
        canvas.paint((0, 1), Paint::Open);
        canvas.paint((0, 1), Paint::Open);
        canvas.paint((5, 5), Paint::Open);
        drop(canvas);

        let events = rx.iter().collect::<Vec<_>>();
        assert_eq!(
            events,
            vec![
                CanvasEvent::Initial {
                    rows: 2,
                    cols: 2,
                    paint: Paint::Blocked
                },
                CanvasEvent::Update {
                    coord: (0, 1),
                    old: Paint::Blocked,
                    new: Paint::Open
                },
            ]
        );
    }

    #[test]
    fn test_replay_resends_the_picture() {
        let (tx, rx) = std::sync::mpsc::sync_channel(16);
        let mut canvas = Canvas::new(2, 2, Some(tx));
        canvas.paint((1, 1), Paint::Entry);
        canvas.caption("ready");
        let _ = rx.try_iter().count();

        canvas.replay();
        drop(canvas);
        let events = rx.iter().collect::<Vec<_>>();
        assert_eq!(events.len(), 3);
        assert_eq!(
            events[1],
            CanvasEvent::Update {
                coord: (1, 1),
                old: Paint::Blocked,
                new: Paint::Entry
            }
        );
        assert_eq!(events[2], CanvasEvent::Caption("ready".to_string()));
    }

    #[test]
    fn test_cells_are_addressable_by_key() {
        let mut canvas = Canvas::new(3, 3, None);
        canvas.draw(|(row, col)| if row == col { Paint::Open } else { Paint::Blocked });
        assert_eq!(CellKey((2, 1)).to_string(), "2,1");
        assert_eq!(canvas.by_key("2,2"), Some(Paint::Open));
        assert_eq!(canvas.by_key("2,1"), Some(Paint::Blocked));
        assert_eq!(canvas.by_key("3,1"), None);
        assert_eq!(canvas.by_key("nope"), None);
    }
}
