//! Plain-text rendering of grids.
//!
//! One line per row, one glyph per cell. Every glyph is a single character
//! followed by a space.

use std::io::{self, Write};

use crate::compute::Grid;

/// Stable 1:1 mapping from cell value to glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    glyphs: &'static [&'static str],
}

impl Palette {
    /// Dead/live cells.
    pub const BINARY: Palette = Palette {
        glyphs: &["- ", "+ "],
    };

    /// Empty/tree/burning cells.
    pub const FOREST: Palette = Palette {
        glyphs: &["= ", "+ ", "! "],
    };

    /// Glyph for a cell value. Values outside the palette render as `? `.
    #[inline]
    pub fn glyph(&self, value: u8) -> &'static str {
        self.glyphs.get(value as usize).copied().unwrap_or("? ")
    }
}

/// Write a single row followed by a newline.
pub fn write_row(out: &mut dyn Write, row: &[u8], palette: Palette) -> io::Result<()> {
    for &cell in row {
        out.write_all(palette.glyph(cell).as_bytes())?;
    }
    writeln!(out)
}

/// Write every row of `grid`, then a blank separator line.
pub fn write_frame(out: &mut dyn Write, grid: &Grid, palette: Palette) -> io::Result<()> {
    for row in grid.iter_rows() {
        write_row(out, row, palette)?;
    }
    writeln!(out)
}
