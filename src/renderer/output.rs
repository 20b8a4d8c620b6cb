//! Output batching and stateful cell writing.
//!
//! - Everything for a frame accumulates in one [`OutputBuffer`] and goes out
//!   in a single write.
//! - [`CellWriter`] remembers the cursor position and colors it last emitted
//!   and skips escape codes that would not change anything.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{Color, Print, SetBackgroundColor, SetForegroundColor};

use crate::types::{channels, Pixel};

use super::halfblock::Cell;

const UPPER_HALF_BLOCK: char = '\u{2580}';

// =============================================================================
// OutputBuffer
// =============================================================================

/// Bytes waiting to be written to the terminal.
#[derive(Debug, Default)]
pub struct OutputBuffer {
    data: Vec<u8>,
}

impl OutputBuffer {
    /// Empty buffer sized for a typical full-screen frame.
    pub fn new() -> Self {
        Self::with_capacity(64 * 1024)
    }

    /// Empty buffer with room for `capacity` bytes.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            data: Vec::with_capacity(capacity),
        }
    }

    /// Bytes buffered.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True when nothing is buffered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Clear without deallocating.
    #[inline]
    pub fn clear(&mut self) {
        self.data.clear();
    }

    /// Buffered bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Lossy string view, for tests and logs.
    pub fn as_str(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.data)
    }

    /// Write everything to `writer` and empty the buffer.
    pub fn flush_to<W: Write>(&mut self, writer: &mut W) -> io::Result<()> {
        if self.data.is_empty() {
            return Ok(());
        }
        writer.write_all(&self.data)?;
        writer.flush()?;
        self.data.clear();
        Ok(())
    }
}

impl Write for OutputBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.data.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        // Buffering only; the real flush is flush_to.
        Ok(())
    }
}

// =============================================================================
// CellWriter
// =============================================================================

/// Writes half-block cells, emitting only the state that changed.
#[derive(Debug)]
pub struct CellWriter {
    last_x: i32,
    last_y: i32,
    last_fg: Option<Pixel>,
    last_bg: Option<Pixel>,
}

impl CellWriter {
    /// Writer with no tracked state.
    pub fn new() -> Self {
        Self {
            last_x: -1,
            last_y: -1,
            last_fg: None,
            last_bg: None,
        }
    }

    /// Forget tracked state; call at the start of each frame.
    pub fn reset(&mut self) {
        self.last_x = -1;
        self.last_y = -1;
        self.last_fg = None;
        self.last_bg = None;
    }

    /// Write one cell at `(x, y)`.
    pub fn write_cell(&mut self, out: &mut OutputBuffer, x: u16, y: u16, cell: Cell) -> io::Result<()> {
        if y as i32 != self.last_y || x as i32 != self.last_x + 1 {
            queue!(out, MoveTo(x, y))?;
        }
        if self.last_fg != Some(cell.upper) {
            queue!(out, SetForegroundColor(to_color(cell.upper)))?;
            self.last_fg = Some(cell.upper);
        }
        if self.last_bg != Some(cell.lower) {
            queue!(out, SetBackgroundColor(to_color(cell.lower)))?;
            self.last_bg = Some(cell.lower);
        }
        queue!(out, Print(UPPER_HALF_BLOCK))?;
        self.last_x = x as i32;
        self.last_y = y as i32;
        Ok(())
    }
}

impl Default for CellWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Truecolor for a pixel; alpha is ignored (surfaces are opaque).
fn to_color(p: Pixel) -> Color {
    let (r, g, b, _) = channels(p);
    Color::Rgb { r, g, b }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_buffer_flush_to() {
        let mut buf = OutputBuffer::new();
        buf.write_all(b"hello").unwrap();
        assert_eq!(buf.len(), 5);
        let mut sink = Vec::new();
        buf.flush_to(&mut sink).unwrap();
        assert_eq!(sink, b"hello");
        assert!(buf.is_empty());
    }

    #[test]
    fn test_writer_skips_sequential_moves() {
        let mut w = CellWriter::new();
        let mut out = OutputBuffer::new();
        let cell = Cell { upper: 0xFF10_2030, lower: 0xFF40_5060 };

        w.write_cell(&mut out, 0, 0, cell).unwrap();
        let first = out.len();
        out.clear();
        w.write_cell(&mut out, 1, 0, cell).unwrap();
        let second = out.len();

        assert!(second < first);
        assert_eq!(out.as_str(), UPPER_HALF_BLOCK.to_string());
    }

    #[test]
    fn test_writer_emits_truecolor() {
        let mut w = CellWriter::new();
        let mut out = OutputBuffer::new();
        w.write_cell(&mut out, 3, 4, Cell { upper: 0xFF01_0203, lower: 0xFF04_0506 }).unwrap();
        let s = out.as_str();
        assert!(s.contains("38;2;1;2;3"), "{s:?}");
        assert!(s.contains("48;2;4;5;6"), "{s:?}");
    }

    #[test]
    fn test_writer_reset_forces_colors() {
        let mut w = CellWriter::new();
        let mut out = OutputBuffer::new();
        let cell = Cell { upper: 1, lower: 2 };
        w.write_cell(&mut out, 0, 0, cell).unwrap();
        w.reset();
        out.clear();
        w.write_cell(&mut out, 1, 0, cell).unwrap();
        assert!(out.as_str().contains("38;2;"));
    }
}
