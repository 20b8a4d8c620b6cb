//! Double-buffered window drawable.
//!
//! The presenter and the decoration renderer draw into the back buffer;
//! [`Surface::flip`] publishes it to the front buffer, which is what the
//! compositor reads when the window is flipped.
//!
//! # Design Decisions
//!
//! - **Flat storage**: `Vec<Pixel>` with row-major indexing, like the engine's
//!   own framebuffer.
//! - **Unclipped puts**: [`Surface::put`] indexes directly. Callers that may
//!   stray outside the window use the clipped [`Surface::fill_rect`].

use crate::types::Pixel;

/// A window-sized pair of pixel buffers.
#[derive(Debug, Clone, PartialEq)]
pub struct Surface {
    width: u32,
    height: u32,
    back: Vec<Pixel>,
    front: Vec<Pixel>,
}

impl Surface {
    /// Create a zero-filled surface.
    pub fn new(width: u32, height: u32) -> Self {
        let size = width as usize * height as usize;
        Self {
            width,
            height,
            back: vec![0; size],
            front: vec![0; size],
        }
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Is `(x, y)` inside the surface?
    #[inline]
    pub fn in_bounds(&self, x: u32, y: u32) -> bool {
        x < self.width && y < self.height
    }

    /// Read a back-buffer pixel (None if out of bounds).
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> Option<Pixel> {
        if self.in_bounds(x, y) {
            Some(self.back[self.index(x, y)])
        } else {
            None
        }
    }

    /// Write a back-buffer pixel.
    ///
    /// Panics if `(x, y)` lies outside the surface.
    #[inline]
    pub fn put(&mut self, x: u32, y: u32, pixel: Pixel) {
        debug_assert!(self.in_bounds(x, y), "put({x}, {y}) outside {}x{}", self.width, self.height);
        let idx = self.index(x, y);
        self.back[idx] = pixel;
    }

    /// Mutable view of one back-buffer row starting at column `x`.
    #[inline]
    pub fn row_mut(&mut self, y: u32, x: u32) -> &mut [Pixel] {
        let start = self.index(x, y);
        let end = self.index(0, y) + self.width as usize;
        &mut self.back[start..end]
    }

    /// Fill a rectangle of the back buffer, clipped to the surface.
    pub fn fill_rect(&mut self, x: u32, y: u32, width: u32, height: u32, pixel: Pixel) {
        let x2 = x.saturating_add(width).min(self.width);
        let y2 = y.saturating_add(height).min(self.height);
        if x2 <= x || y2 <= y {
            return;
        }
        for row in y..y2 {
            let start = self.index(x, row);
            let end = self.index(x2, row);
            self.back[start..end].fill(pixel);
        }
    }

    /// Fill the whole back buffer.
    pub fn clear(&mut self, pixel: Pixel) {
        self.back.fill(pixel);
    }

    /// Back buffer, row-major.
    #[inline]
    pub fn back(&self) -> &[Pixel] {
        &self.back
    }

    /// Pixels as of the last flip.
    #[inline]
    pub fn front(&self) -> &[Pixel] {
        &self.front
    }

    /// Read a front-buffer pixel (None if out of bounds).
    #[inline]
    pub fn front_pixel(&self, x: u32, y: u32) -> Option<Pixel> {
        if self.in_bounds(x, y) {
            Some(self.front[self.index(x, y)])
        } else {
            None
        }
    }

    /// Publish the back buffer.
    pub fn flip(&mut self) {
        self.front.copy_from_slice(&self.back);
    }
}
