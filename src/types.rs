//! Core types shared by the presenter, the event pump and the toolkits.
//!
//! Pixels are packed `0xAARRGGBB` words, the layout the engine writes into
//! its logical framebuffer and the layout the compositor expects in a
//! window surface.

// =============================================================================
// Pixels
// =============================================================================

/// A packed `0xAARRGGBB` pixel.
pub type Pixel = u32;

/// Alpha channel at full opacity, ready to be OR-ed into a pixel.
pub const ALPHA_OPAQUE: Pixel = 0xFF00_0000;

/// Pack four channels into a pixel.
#[inline]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Pixel {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/// Pack an opaque color.
#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Pixel {
    rgba(r, g, b, 255)
}

/// Split a pixel into `(r, g, b, a)`.
#[inline]
pub const fn channels(p: Pixel) -> (u8, u8, u8, u8) {
    ((p >> 16) as u8, (p >> 8) as u8, p as u8, (p >> 24) as u8)
}

// =============================================================================
// Geometry
// =============================================================================

/// Fixed logical resolution of the engine framebuffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

impl Resolution {
    /// doomgeneric's default `DOOMGENERIC_RESX` x `DOOMGENERIC_RESY`.
    pub const DOOMGENERIC: Self = Self::new(640, 400);

    /// Logical size in pixels.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Number of pixels in a framebuffer of this resolution.
    #[inline]
    pub const fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for Resolution {
    fn default() -> Self {
        Self::DOOMGENERIC
    }
}

/// Decoration insets: the chrome around the drawable area of a window.
///
/// `width` and `height` are the totals (`left + right`, `top + bottom`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DecorBounds {
    pub top_height: u32,
    pub bottom_height: u32,
    pub left_width: u32,
    pub right_width: u32,
    pub width: u32,
    pub height: u32,
}

impl DecorBounds {
    /// No decorations at all.
    pub const NONE: Self = Self::new(0, 0, 0, 0);

    /// Insets from the four edges; totals are computed.
    pub const fn new(top: u32, bottom: u32, left: u32, right: u32) -> Self {
        Self {
            top_height: top,
            bottom_height: bottom,
            left_width: left,
            right_width: right,
            width: left + right,
            height: top + bottom,
        }
    }
}

// =============================================================================
// Windows
// =============================================================================

/// Compositor-assigned window identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WindowId(pub u32);

/// Client-side view of a compositor window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowHandle {
    pub wid: WindowId,
    /// Screen position of the window's top-left corner.
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Updated by the event pump on focus-change messages.
    pub focused: bool,
}

impl WindowHandle {
    /// An unfocused window at the screen origin.
    pub fn new(wid: WindowId, width: u32, height: u32) -> Self {
        Self {
            wid,
            x: 0,
            y: 0,
            width,
            height,
            focused: false,
        }
    }

    /// Does a message addressed to `wid` belong to this window?
    #[inline]
    pub fn owns(&self, wid: WindowId) -> bool {
        self.wid == wid
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgba_packing() {
        assert_eq!(rgba(0x11, 0x22, 0x33, 0x44), 0x4411_2233);
        assert_eq!(rgb(1, 2, 3) & ALPHA_OPAQUE, ALPHA_OPAQUE);
        assert_eq!(channels(0x4411_2233), (0x11, 0x22, 0x33, 0x44));
    }

    #[test]
    fn test_decor_bounds_totals() {
        let b = DecorBounds::new(24, 4, 3, 5);
        assert_eq!(b.width, 8);
        assert_eq!(b.height, 28);
        assert_eq!(DecorBounds::NONE, DecorBounds::default());
    }

    #[test]
    fn test_resolution_pixel_count() {
        assert_eq!(Resolution::DOOMGENERIC.pixel_count(), 640 * 400);
    }

    #[test]
    fn test_window_owns() {
        let w = WindowHandle::new(WindowId(7), 10, 10);
        assert!(w.owns(WindowId(7)));
        assert!(!w.owns(WindowId(8)));
    }
}
