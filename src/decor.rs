//! Default window decorations: insets, chrome drawing and hit-testing.
//!
//! ```text
//! ┌──────────────────────────────────────────┐ ─┐
//! │ ▮▮▮▮ ▮▮▮▮                           [x] │  │ top_height (title bar)
//! ├──────────────────────────────────────────┤ ─┘
//! │ │                                      │ │
//! │ │        drawable area                 │ │
//! │ │                                      │ │
//! └──────────────────────────────────────────┘ ── bottom_height
//!  └ left_width                   right_width ┘
//! ```
//!
//! There is no font here: the title is drawn as one block per character,
//! which is enough to tell titles apart on a test surface.

use crate::surface::Surface;
use crate::toolkit::{DecorHit, MouseButtons, MouseCommand, MouseEvent};
use crate::types::{rgb, DecorBounds, Pixel, WindowHandle};

const CLOSE_SIZE: u32 = 12;
const CLOSE_MARGIN: u32 = 6;
const GLYPH_WIDTH: u32 = 6;
const GLYPH_HEIGHT: u32 = 8;
const GLYPH_ADVANCE: u32 = 8;
const TITLE_PAD: u32 = 8;

/// Colors used by the chrome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecorTheme {
    pub title_focused: Pixel,
    pub title_unfocused: Pixel,
    pub border: Pixel,
    pub close_button: Pixel,
    pub text_focused: Pixel,
    pub text_unfocused: Pixel,
}

impl Default for DecorTheme {
    fn default() -> Self {
        Self {
            title_focused: rgb(0x3a, 0x3a, 0x3a),
            title_unfocused: rgb(0x5e, 0x5e, 0x5e),
            border: rgb(0x2a, 0x2a, 0x2a),
            close_button: rgb(0xcc, 0x3b, 0x3b),
            text_focused: rgb(0xff, 0xff, 0xff),
            text_unfocused: rgb(0xaa, 0xaa, 0xaa),
        }
    }
}

/// A decoration theme plus its insets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decorations {
    bounds: DecorBounds,
    theme: DecorTheme,
}

impl Decorations {
    /// Decorations with the given insets and colors.
    pub fn new(bounds: DecorBounds, theme: DecorTheme) -> Self {
        Self { bounds, theme }
    }

    /// Title bar with thin borders.
    pub fn fancy() -> Self {
        Self::new(DecorBounds::new(24, 4, 4, 4), DecorTheme::default())
    }

    /// No chrome at all.
    pub fn none() -> Self {
        Self::new(DecorBounds::NONE, DecorTheme::default())
    }

    /// Colors used when drawing.
    pub fn theme(&self) -> &DecorTheme {
        &self.theme
    }

    /// Insets around the drawable area.
    pub fn bounds(&self) -> DecorBounds {
        self.bounds
    }

    /// Close button square as `(x, y, size)` in window coordinates, if the
    /// title bar is tall enough to hold one.
    pub fn close_button(&self, window: &WindowHandle) -> Option<(u32, u32, u32)> {
        let b = self.bounds;
        if b.top_height < CLOSE_SIZE || window.width < b.right_width + CLOSE_MARGIN + CLOSE_SIZE {
            return None;
        }
        let x = window.width - b.right_width - CLOSE_MARGIN - CLOSE_SIZE;
        let y = (b.top_height - CLOSE_SIZE) / 2;
        Some((x, y, CLOSE_SIZE))
    }

    /// Draw the chrome onto the back buffer. The drawable area is untouched.
    pub fn render(&self, window: &WindowHandle, surface: &mut Surface, title: &str) {
        let b = self.bounds;
        let (w, h) = (surface.width(), surface.height());
        let body_h = h.saturating_sub(b.top_height);

        let (bar, text) = if window.focused {
            (self.theme.title_focused, self.theme.text_focused)
        } else {
            (self.theme.title_unfocused, self.theme.text_unfocused)
        };

        surface.fill_rect(0, 0, w, b.top_height, bar);
        surface.fill_rect(0, b.top_height, b.left_width, body_h, self.theme.border);
        surface.fill_rect(w.saturating_sub(b.right_width), b.top_height, b.right_width, body_h, self.theme.border);
        surface.fill_rect(0, h.saturating_sub(b.bottom_height), w, b.bottom_height, self.theme.border);

        let close = self.close_button(window);
        if let Some((cx, cy, size)) = close {
            surface.fill_rect(cx, cy, size, size, self.theme.close_button);
        }

        if b.top_height < GLYPH_HEIGHT {
            return;
        }
        let limit = close.map(|(cx, _, _)| cx).unwrap_or(w.saturating_sub(b.right_width));
        let gy = (b.top_height - GLYPH_HEIGHT) / 2;
        let mut gx = b.left_width + TITLE_PAD;
        for ch in title.chars() {
            if gx + GLYPH_WIDTH > limit {
                break;
            }
            if !ch.is_whitespace() {
                surface.fill_rect(gx, gy, GLYPH_WIDTH, GLYPH_HEIGHT, text);
            }
            gx += GLYPH_ADVANCE;
        }
    }

    /// Classify a mouse message against the chrome.
    pub fn hit_test(&self, window: &WindowHandle, event: &MouseEvent) -> DecorHit {
        let b = self.bounds;
        let (x, y) = (event.new_x, event.new_y);
        if x < 0 || y < 0 || x as u32 >= window.width || y as u32 >= b.top_height {
            return DecorHit::None;
        }
        let (x, y) = (x as u32, y as u32);
        let on_close = self
            .close_button(window)
            .is_some_and(|(cx, cy, size)| x >= cx && x < cx + size && y >= cy && y < cy + size);

        match event.command {
            MouseCommand::Click if on_close && event.buttons.contains(MouseButtons::LEFT) => DecorHit::Close,
            MouseCommand::Down if event.buttons.contains(MouseButtons::RIGHT) => DecorHit::Right,
            MouseCommand::Down if event.buttons.contains(MouseButtons::LEFT) && !on_close => DecorHit::Move,
            _ => DecorHit::None,
        }
    }
}

impl Default for Decorations {
    fn default() -> Self {
        Self::fancy()
    }
}
