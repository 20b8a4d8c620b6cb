//! The compositor contract the adapter consumes.
//!
//! A [`Toolkit`] is one connected compositor session. The adapter drives it
//! from the engine thread only: window setup once at init, then per frame a
//! flip and a non-blocking drain of [`Message`]s.
//!
//! Two implementations ship with the crate:
//!
//! - [`headless::HeadlessToolkit`]: in-memory compositor with scripted input,
//!   used by tests and the smoke binary.
//! - [`terminal::TerminalToolkit`]: shows the window in a terminal and turns
//!   terminal input into compositor messages.

pub mod headless;
pub mod terminal;

use bitflags::bitflags;

use crate::decor::Decorations;
use crate::error::Result;
use crate::surface::Surface;
use crate::types::{DecorBounds, WindowHandle, WindowId};

pub use headless::HeadlessToolkit;
pub use terminal::TerminalToolkit;

// =============================================================================
// Messages
// =============================================================================

/// Key transition direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Down,
    Up,
}

bitflags! {
    /// Mouse button state carried by a mouse message.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MouseButtons: u8 {
        const LEFT = 0x01;
        const RIGHT = 0x02;
        const MIDDLE = 0x04;
        const SCROLL_UP = 0x10;
        const SCROLL_DOWN = 0x20;
    }
}

/// What the pointer did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseCommand {
    /// Button released; `buttons` names the one that was let go.
    Click,
    Drag,
    Down,
    Move,
}

/// Pointer message in window-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MouseEvent {
    pub wid: WindowId,
    pub new_x: i32,
    pub new_y: i32,
    pub old_x: i32,
    pub old_y: i32,
    pub buttons: MouseButtons,
    pub command: MouseCommand,
}

impl MouseEvent {
    /// Event at `(x, y)` with no previous position.
    pub fn new(wid: WindowId, x: i32, y: i32, buttons: MouseButtons, command: MouseCommand) -> Self {
        Self {
            wid,
            new_x: x,
            new_y: y,
            old_x: x,
            old_y: y,
            buttons,
            command,
        }
    }
}

/// One compositor message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Key {
        wid: WindowId,
        action: KeyAction,
        /// Native (compositor) key code.
        keycode: u32,
    },
    FocusChange {
        wid: WindowId,
        focused: bool,
    },
    WindowClose {
        wid: WindowId,
    },
    SessionEnd,
    Mouse(MouseEvent),
    /// Any message type the adapter does not handle.
    Other(u32),
}

impl Message {
    /// Key press for `wid`.
    pub fn key_down(wid: WindowId, keycode: u32) -> Self {
        Self::Key { wid, action: KeyAction::Down, keycode }
    }

    /// Key release for `wid`.
    pub fn key_up(wid: WindowId, keycode: u32) -> Self {
        Self::Key { wid, action: KeyAction::Up, keycode }
    }
}

/// Result of offering a mouse message to the decorations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecorHit {
    /// Not on the chrome, or nothing to do.
    None,
    /// Close button clicked.
    Close,
    /// Secondary click on the chrome: wants a context menu.
    Right,
    /// Title bar grabbed with the primary button.
    Move,
}

// =============================================================================
// Toolkit
// =============================================================================

/// A connected compositor session.
///
/// Per-frame calls are infallible: failures inside the toolkit are the
/// toolkit's own business.
pub trait Toolkit {
    /// Create a window with the given outer size (decorations included).
    fn create_window(&mut self, width: u32, height: u32) -> Result<WindowHandle>;

    /// Move a window to screen coordinates.
    fn move_window(&mut self, window: &mut WindowHandle, x: i32, y: i32);

    /// Publish the window's title and icon name to panels and switchers.
    fn advertise_icon(&mut self, window: &WindowHandle, title: &str, icon: &str);

    /// The decoration theme in use.
    fn decorations(&self) -> &Decorations;

    /// Decoration insets around every window of this session.
    fn decor_bounds(&self) -> DecorBounds {
        self.decorations().bounds()
    }

    /// Draw window chrome onto the surface's back buffer.
    fn render_decorations(&mut self, window: &WindowHandle, surface: &mut Surface, title: &str) {
        self.decorations().render(window, surface, title);
    }

    /// Hit-test a mouse message against the chrome.
    fn decor_handle_event(&mut self, window: &WindowHandle, event: &MouseEvent) -> DecorHit {
        self.decorations().hit_test(window, event)
    }

    /// Tell the compositor the surface's front buffer holds a new frame.
    fn flip_window(&mut self, window: &WindowHandle, surface: &Surface);

    /// Next pending message, never waiting.
    fn poll_async(&mut self) -> Option<Message>;

    /// Menu subsystem hook; sees every message before dispatch.
    fn process_menu_event(&mut self, _message: &Message) {}

    /// Pop up the window's default context menu at screen coordinates.
    fn show_default_menu(&mut self, window: &WindowHandle, x: i32, y: i32);
}
