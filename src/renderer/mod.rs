//! Terminal output for the terminal compositor.
//!
//! The renderer knows only about pixels and cells. It does not know about
//! windows, decorations or input: it takes a flipped surface and writes
//! the terminal escape sequences that show it.
//!
//! ```text
//! Surface front buffer (pixels)
//!          │  Viewport::fit  (scale to terminal, keep aspect)
//!          ▼
//!   HalfBlockRenderer  (2 pixels per cell: ▀ fg = upper, bg = lower)
//!          │  diff against previous frame
//!          ▼
//!     OutputBuffer  ──→  one write per frame
//! ```

pub mod halfblock;
pub mod output;

pub use halfblock::{Cell, HalfBlockRenderer, Viewport};
pub use output::{CellWriter, OutputBuffer};
