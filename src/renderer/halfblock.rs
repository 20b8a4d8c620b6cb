//! Half-block rendering of a surface into terminal cells.
//!
//! Each cell shows two vertically stacked pixels: the foreground of `▀` is
//! the upper pixel and the background is the lower one. The surface is
//! scaled down uniformly (nearest pixel) to fit the terminal.

use std::io::{self, Write};

use crossterm::queue;
use crossterm::style::ResetColor;
use crossterm::terminal::{BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate};

use crate::surface::Surface;
use crate::types::Pixel;

use super::output::{CellWriter, OutputBuffer};

/// Two stacked pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cell {
    pub upper: Pixel,
    pub lower: Pixel,
}

// =============================================================================
// Viewport
// =============================================================================

/// Mapping between a surface and the cell grid that shows it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub cols: u16,
    pub rows: u16,
    pub src_width: u32,
    pub src_height: u32,
}

impl Viewport {
    /// Largest grid within `term_cols` x `term_rows` that keeps the surface's
    /// aspect ratio (cells are two pixels tall) and never upscales.
    pub fn fit(src_width: u32, src_height: u32, term_cols: u16, term_rows: u16) -> Self {
        let avail_w = term_cols as u64;
        let avail_h = term_rows as u64 * 2;
        let (sw, sh) = (src_width.max(1) as u64, src_height.max(1) as u64);

        // scale = min(avail_w / sw, avail_h / sh, 1), kept as a fraction.
        let (num, den) = if avail_w * sh <= avail_h * sw { (avail_w, sw) } else { (avail_h, sh) };
        let (num, den) = if num >= den { (1, 1) } else { (num, den) };

        let cols = (sw * num / den).max(1).min(avail_w.max(1));
        let pixel_rows = (sh * num / den).max(1);
        let rows = pixel_rows.div_ceil(2).min((term_rows as u64).max(1));

        Self {
            cols: cols as u16,
            rows: rows as u16,
            src_width,
            src_height,
        }
    }

    /// Surface pixel sampled for cell column `col`, pixel row `py` of the
    /// grid (`py` counts half-cells).
    #[inline]
    fn sample(&self, col: u16, py: u32) -> (u32, u32) {
        let x = col as u64 * self.src_width as u64 / self.cols.max(1) as u64;
        let y = py as u64 * self.src_height as u64 / (self.rows.max(1) as u64 * 2);
        (x as u32, y as u32)
    }

    /// Surface pixel under a terminal cell, or None outside the grid.
    pub fn cell_to_pixel(&self, col: u16, row: u16) -> Option<(u32, u32)> {
        if col >= self.cols || row >= self.rows {
            return None;
        }
        Some(self.sample(col, row as u32 * 2))
    }

    /// Sample the surface's front buffer into cells, row-major.
    pub fn cells(&self, surface: &Surface) -> Vec<Cell> {
        let mut cells = Vec::with_capacity(self.cols as usize * self.rows as usize);
        for row in 0..self.rows {
            for col in 0..self.cols {
                let (ux, uy) = self.sample(col, row as u32 * 2);
                let (lx, ly) = self.sample(col, row as u32 * 2 + 1);
                cells.push(Cell {
                    upper: surface.front_pixel(ux, uy).unwrap_or(0),
                    lower: surface.front_pixel(lx, ly).unwrap_or(0),
                });
            }
        }
        cells
    }
}

// =============================================================================
// HalfBlockRenderer
// =============================================================================

/// Differential renderer: only cells that changed since the last frame are
/// written.
pub struct HalfBlockRenderer {
    output: OutputBuffer,
    writer: CellWriter,
    previous: Option<(Viewport, Vec<Cell>)>,
}

impl HalfBlockRenderer {
    /// Renderer with no previous frame; the first render redraws everything.
    pub fn new() -> Self {
        Self {
            output: OutputBuffer::new(),
            writer: CellWriter::new(),
            previous: None,
        }
    }

    /// Forget the previous frame so the next render redraws everything.
    pub fn invalidate(&mut self) {
        self.previous = None;
    }

    /// Render the surface through `viewport` into `sink`.
    ///
    /// Returns true if any cell was written.
    pub fn render<W: Write>(&mut self, surface: &Surface, viewport: Viewport, sink: &mut W) -> io::Result<bool> {
        let cells = viewport.cells(surface);
        let previous = match &self.previous {
            Some((vp, prev)) if *vp == viewport => Some(prev.as_slice()),
            _ => None,
        };

        queue!(self.output, BeginSynchronizedUpdate)?;
        if previous.is_none() {
            queue!(self.output, ResetColor, Clear(ClearType::All))?;
        }
        self.writer.reset();

        let mut changed = false;
        for (i, &cell) in cells.iter().enumerate() {
            if previous.is_some_and(|prev| prev[i] == cell) {
                continue;
            }
            let x = (i % viewport.cols as usize) as u16;
            let y = (i / viewport.cols as usize) as u16;
            self.writer.write_cell(&mut self.output, x, y, cell)?;
            changed = true;
        }

        queue!(self.output, ResetColor, EndSynchronizedUpdate)?;
        self.output.flush_to(sink)?;
        self.previous = Some((viewport, cells));
        Ok(changed)
    }
}

impl Default for HalfBlockRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(w: u32, h: u32, p: Pixel) -> Surface {
        let mut s = Surface::new(w, h);
        s.clear(p);
        s.flip();
        s
    }

    #[test]
    fn test_fit_never_upscales() {
        let vp = Viewport::fit(10, 8, 200, 100);
        assert_eq!((vp.cols, vp.rows), (10, 4));
    }

    #[test]
    fn test_fit_limited_by_width() {
        let vp = Viewport::fit(648, 428, 162, 100);
        assert_eq!(vp.cols, 162);
        assert_eq!(vp.rows, 54);
    }

    #[test]
    fn test_fit_limited_by_height() {
        let vp = Viewport::fit(648, 428, 400, 50);
        assert_eq!(vp.rows, 50);
        assert!(vp.cols <= 400);
        assert_eq!(vp.cols, 151);
    }

    #[test]
    fn test_cell_to_pixel() {
        let vp = Viewport::fit(100, 100, 50, 25);
        assert_eq!((vp.cols, vp.rows), (50, 25));
        assert_eq!(vp.cell_to_pixel(0, 0), Some((0, 0)));
        assert_eq!(vp.cell_to_pixel(10, 5), Some((20, 20)));
        assert_eq!(vp.cell_to_pixel(50, 0), None);
        assert_eq!(vp.cell_to_pixel(0, 25), None);
    }

    #[test]
    fn test_cells_sample_upper_and_lower() {
        let mut s = Surface::new(2, 2);
        s.put(0, 0, 1);
        s.put(0, 1, 2);
        s.flip();
        let vp = Viewport::fit(2, 2, 10, 10);
        let cells = vp.cells(&s);
        assert_eq!(cells.len(), 2);
        assert_eq!(cells[0], Cell { upper: 1, lower: 2 });
        assert_eq!(cells[1], Cell { upper: 0, lower: 0 });
    }

    #[test]
    fn test_render_diffs_frames() {
        let mut r = HalfBlockRenderer::new();
        let s = solid(4, 4, 0xFF00_00FF);
        let vp = Viewport::fit(4, 4, 80, 24);
        let mut sink = Vec::new();
        assert!(r.render(&s, vp, &mut sink).unwrap());
        assert!(!sink.is_empty());

        let mut sink = Vec::new();
        assert!(!r.render(&s, vp, &mut sink).unwrap());

        r.invalidate();
        let mut sink = Vec::new();
        assert!(r.render(&s, vp, &mut sink).unwrap());
    }
}
