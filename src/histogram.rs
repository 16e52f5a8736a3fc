//! Character-code histogram: one bar per character, as tall as its (clamped) code.

use std::io::Write;

use crossterm::{
    queue,
    style::{self, Color, Stylize},
};

/// Codes above this are drawn as if they were this.
pub const CHAR_CODE_CAP: u32 = 128;
/// Viewport dimension below which the small scale is used.
pub const SMALL_VIEWPORT: u32 = 500;
pub const SMALL_SCALE: u32 = 5;
pub const LARGE_SCALE: u32 = 9;

/// Size of the area the histogram is shown in, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

/// Tallest bar for a viewport: small screens in either dimension get the small scale.
pub fn scale_for(viewport: Viewport) -> u32 {
    if viewport.width < SMALL_VIEWPORT || viewport.height < SMALL_VIEWPORT {
        SMALL_SCALE
    } else {
        LARGE_SCALE
    }
}

/// Number of bars that fit a container: one for every index below a third of its width.
pub fn bar_cap(container_width: u32) -> usize {
    container_width.div_ceil(3) as usize
}

/// Height of the bar for a single UTF-16 code unit.
pub fn bar_height(code: u16, scale: u32) -> u32 {
    u32::from(code).min(CHAR_CODE_CAP) * scale / CHAR_CODE_CAP
}

/// Bar heights for `content`, one per UTF-16 code unit, capped by the container width.
pub fn bar_heights(content: &str, container_width: u32, viewport: Viewport) -> Vec<u32> {
    let scale = scale_for(viewport);
    content
        .encode_utf16()
        .take(bar_cap(container_width))
        .map(|code| bar_height(code, scale))
        .collect()
}

/// Draws the bars hanging down from the current line, one column per bar.
pub fn render<W: Write>(out: &mut W, heights: &[u32]) -> std::io::Result<()> {
    let tallest = heights.iter().copied().max().unwrap_or(0);
    for level in 0..tallest {
        for &height in heights {
            if level < height {
                queue!(out, style::PrintStyledContent("█".with(Color::White)))?;
            } else {
                queue!(out, style::Print(" "))?;
            }
        }
        queue!(out, style::Print("\r\n"))?;
    }
    out.flush()
}
