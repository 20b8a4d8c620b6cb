//! Terminal compositor.
//!
//! Presents the single window full-screen in the terminal (alternate
//! screen, raw mode) and translates terminal input into compositor
//! messages in the native key-code space, so the adapter cannot tell it
//! apart from a windowed session.
//!
//! - Key releases are only reported by terminals that speak the kitty
//!   keyboard protocol. Elsewhere every press is followed by a synthetic
//!   release so keys never stick.
//! - Ctrl+Q closes the window; Ctrl+C ends the session.
//! - The terminal has no context menu: right-click requests are logged.

use std::collections::VecDeque;
use std::io::{self, Write};
use std::time::Duration;

use crossterm::cursor::{Hide, Show};
use crossterm::event::{
    self, DisableFocusChange, DisableMouseCapture, EnableFocusChange, EnableMouseCapture, Event,
    KeyCode, KeyEvent as CrosstermKeyEvent, KeyEventKind, KeyModifiers, KeyboardEnhancementFlags,
    ModifierKeyCode, MouseButton, MouseEvent as CrosstermMouseEvent, MouseEventKind,
    PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::{execute, queue};
use crossterm::terminal::{self, EnterAlternateScreen, LeaveAlternateScreen, SetTitle};
use tracing::{debug, info, warn};

use super::{KeyAction, Message, MouseButtons, MouseCommand, MouseEvent, Toolkit};
use crate::decor::Decorations;
use crate::error::{AdapterError, Result};
use crate::input::keys::native;
use crate::renderer::{HalfBlockRenderer, Viewport};
use crate::surface::Surface;
use crate::types::{WindowHandle, WindowId};

const WINDOW_ID: WindowId = WindowId(1);

// =============================================================================
// Terminal modes
// =============================================================================

/// Terminal modes switched on so far. Dropping it switches them off again,
/// so a setup step that fails halfway still hands the terminal back.
#[derive(Debug, Default)]
struct TerminalModes {
    raw: bool,
    screen: bool,
    keyboard_flags: bool,
}

impl TerminalModes {
    fn enable_raw(&mut self) -> io::Result<()> {
        terminal::enable_raw_mode()?;
        self.raw = true;
        Ok(())
    }

    /// Alternate screen, hidden cursor, mouse and focus reporting.
    fn enter_screen<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        // Marked first: a write that fails midway may still have switched
        // some of these on.
        self.screen = true;
        execute!(out, EnterAlternateScreen, Hide, EnableMouseCapture, EnableFocusChange)
    }

    /// Ask for release events via the kitty keyboard protocol.
    fn push_keyboard_flags<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        self.keyboard_flags = true;
        execute!(
            out,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
                    | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
            )
        )
    }

    /// Undo every mode still on, in reverse order. Raw mode is left even if
    /// writing the escape sequences fails; the first error is returned.
    fn restore<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        let written = self.write_restore(out);
        let raw = if std::mem::take(&mut self.raw) {
            terminal::disable_raw_mode()
        } else {
            Ok(())
        };
        written.and(raw)
    }

    fn write_restore<W: Write>(&mut self, out: &mut W) -> io::Result<()> {
        if std::mem::take(&mut self.keyboard_flags) {
            queue!(out, PopKeyboardEnhancementFlags)?;
        }
        if std::mem::take(&mut self.screen) {
            queue!(out, DisableFocusChange, DisableMouseCapture, Show, LeaveAlternateScreen)?;
        }
        out.flush()
    }
}

impl Drop for TerminalModes {
    fn drop(&mut self) {
        let _ = self.restore(&mut io::stdout());
    }
}

// =============================================================================
// TerminalToolkit
// =============================================================================

/// Compositor session backed by the controlling terminal.
pub struct TerminalToolkit {
    decorations: Decorations,
    renderer: HalfBlockRenderer,
    pending: VecDeque<Message>,
    term_size: (u16, u16),
    viewport: Option<Viewport>,
    window_created: bool,
    release_events: bool,
    modes: TerminalModes,
}

impl TerminalToolkit {
    /// Take over the terminal.
    ///
    /// Fails if stdin/stdout are not a terminal or raw mode cannot be set.
    /// Whatever was switched on before a failure is switched off again.
    pub fn connect() -> Result<Self> {
        if !is_tty() {
            return Err(AdapterError::connect("stdin/stdout is not a terminal"));
        }

        let mut modes = TerminalModes::default();
        modes.enable_raw()?;
        let mut stdout = io::stdout();
        modes.enter_screen(&mut stdout)?;

        let release_events = matches!(terminal::supports_keyboard_enhancement(), Ok(true));
        if release_events {
            modes.push_keyboard_flags(&mut stdout)?;
        }

        let term_size = terminal::size()?;
        info!(cols = term_size.0, rows = term_size.1, release_events, "connected to terminal");

        Ok(Self {
            decorations: Decorations::fancy(),
            renderer: HalfBlockRenderer::new(),
            pending: VecDeque::new(),
            term_size,
            viewport: None,
            window_created: false,
            release_events,
            modes,
        })
    }

    /// Give the terminal back. Also runs on drop.
    pub fn disconnect(&mut self) -> io::Result<()> {
        self.modes.restore(&mut io::stdout())
    }

    /// Pull every event the terminal has ready into `pending`.
    fn pump_terminal(&mut self) {
        loop {
            match event::poll(Duration::ZERO) {
                Ok(true) => {}
                Ok(false) => break,
                Err(e) => {
                    warn!(error = %e, "terminal poll failed");
                    break;
                }
            }
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(e) => {
                    warn!(error = %e, "terminal read failed");
                    break;
                }
            };
            if let Event::Resize(cols, rows) = ev {
                self.term_size = (cols, rows);
                self.renderer.invalidate();
                continue;
            }
            let messages = convert_event(ev, WINDOW_ID, self.viewport.as_ref(), self.release_events);
            self.pending.extend(messages);
        }
    }
}

impl Toolkit for TerminalToolkit {
    fn create_window(&mut self, width: u32, height: u32) -> Result<WindowHandle> {
        if self.window_created {
            return Err(AdapterError::window_create("terminal holds a single window"));
        }
        self.window_created = true;
        let mut window = WindowHandle::new(WINDOW_ID, width, height);
        window.focused = true;
        Ok(window)
    }

    fn move_window(&mut self, window: &mut WindowHandle, x: i32, y: i32) {
        // The terminal is the screen; keep the position for menu placement.
        window.x = x;
        window.y = y;
    }

    fn advertise_icon(&mut self, _window: &WindowHandle, title: &str, _icon: &str) {
        if let Err(e) = execute!(io::stdout(), SetTitle(title)) {
            warn!(error = %e, "failed to set terminal title");
        }
    }

    fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    fn flip_window(&mut self, _window: &WindowHandle, surface: &Surface) {
        let (cols, rows) = self.term_size;
        let viewport = Viewport::fit(surface.width(), surface.height(), cols, rows);
        self.viewport = Some(viewport);
        let mut stdout = io::stdout().lock();
        if let Err(e) = self.renderer.render(surface, viewport, &mut stdout).and_then(|_| stdout.flush()) {
            warn!(error = %e, "frame write failed");
        }
    }

    fn poll_async(&mut self) -> Option<Message> {
        if self.pending.is_empty() {
            self.pump_terminal();
        }
        self.pending.pop_front()
    }

    fn show_default_menu(&mut self, _window: &WindowHandle, x: i32, y: i32) {
        debug!(x, y, "context menu requested; terminal has none");
    }
}

#[cfg(unix)]
fn is_tty() -> bool {
    // SAFETY: isatty only inspects the descriptor.
    unsafe { libc::isatty(libc::STDIN_FILENO) != 0 && libc::isatty(libc::STDOUT_FILENO) != 0 }
}

#[cfg(not(unix))]
fn is_tty() -> bool {
    true
}

// =============================================================================
// Event conversion
// =============================================================================

/// Turn one terminal event into compositor messages.
pub fn convert_event(ev: Event, wid: WindowId, viewport: Option<&Viewport>, release_events: bool) -> Vec<Message> {
    match ev {
        Event::Key(key) => convert_key(key, wid, release_events),
        Event::FocusGained => vec![Message::FocusChange { wid, focused: true }],
        Event::FocusLost => vec![Message::FocusChange { wid, focused: false }],
        Event::Mouse(mouse) => viewport
            .and_then(|vp| convert_mouse(mouse, wid, vp))
            .map(Message::Mouse)
            .into_iter()
            .collect(),
        _ => Vec::new(),
    }
}

fn convert_key(key: CrosstermKeyEvent, wid: WindowId, release_events: bool) -> Vec<Message> {
    if key.kind != KeyEventKind::Release && key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('q') => return vec![Message::WindowClose { wid }],
            KeyCode::Char('c') => return vec![Message::SessionEnd],
            _ => {}
        }
    }

    let Some(keycode) = native_key_code(key.code) else {
        return Vec::new();
    };
    match key.kind {
        KeyEventKind::Press if !release_events => vec![
            Message::Key { wid, action: KeyAction::Down, keycode },
            Message::Key { wid, action: KeyAction::Up, keycode },
        ],
        KeyEventKind::Press | KeyEventKind::Repeat => vec![Message::Key { wid, action: KeyAction::Down, keycode }],
        KeyEventKind::Release => vec![Message::Key { wid, action: KeyAction::Up, keycode }],
    }
}

/// Native compositor key code for a terminal key.
pub fn native_key_code(code: KeyCode) -> Option<u32> {
    match code {
        KeyCode::Esc => Some(native::ESCAPE),
        KeyCode::Enter => Some(native::ENTER),
        KeyCode::Up => Some(native::ARROW_UP),
        KeyCode::Down => Some(native::ARROW_DOWN),
        KeyCode::Right => Some(native::ARROW_RIGHT),
        KeyCode::Left => Some(native::ARROW_LEFT),
        KeyCode::Tab => Some(b'\t' as u32),
        KeyCode::Backspace => Some(8),
        KeyCode::Char(c) if c.is_ascii() => Some(c as u32),
        KeyCode::Modifier(m) => match m {
            ModifierKeyCode::LeftControl => Some(native::LEFT_CTRL),
            ModifierKeyCode::RightControl => Some(native::RIGHT_CTRL),
            ModifierKeyCode::LeftShift => Some(native::LEFT_SHIFT),
            ModifierKeyCode::LeftAlt => Some(native::LEFT_ALT),
            _ => None,
        },
        _ => None,
    }
}

/// Terminal mouse event → window-local pixel coordinates.
fn convert_mouse(mouse: CrosstermMouseEvent, wid: WindowId, viewport: &Viewport) -> Option<MouseEvent> {
    let (x, y) = viewport.cell_to_pixel(mouse.column, mouse.row)?;
    let (buttons, command) = match mouse.kind {
        MouseEventKind::Down(b) => (button_flags(b), MouseCommand::Down),
        MouseEventKind::Up(b) => (button_flags(b), MouseCommand::Click),
        MouseEventKind::Drag(b) => (button_flags(b), MouseCommand::Drag),
        MouseEventKind::Moved => (MouseButtons::empty(), MouseCommand::Move),
        MouseEventKind::ScrollUp => (MouseButtons::SCROLL_UP, MouseCommand::Move),
        MouseEventKind::ScrollDown => (MouseButtons::SCROLL_DOWN, MouseCommand::Move),
        MouseEventKind::ScrollLeft | MouseEventKind::ScrollRight => return None,
    };
    Some(MouseEvent::new(wid, x as i32, y as i32, buttons, command))
}

fn button_flags(b: MouseButton) -> MouseButtons {
    match b {
        MouseButton::Left => MouseButtons::LEFT,
        MouseButton::Right => MouseButtons::RIGHT,
        MouseButton::Middle => MouseButtons::MIDDLE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::toolkit::DecorHit;
    use crossterm::event::KeyEventState;

    fn key(code: KeyCode, kind: KeyEventKind, modifiers: KeyModifiers) -> Event {
        Event::Key(CrosstermKeyEvent { code, modifiers, kind, state: KeyEventState::NONE })
    }

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> Event {
        Event::Mouse(CrosstermMouseEvent { kind, column, row, modifiers: KeyModifiers::NONE })
    }

    #[test]
    fn test_press_without_release_support_synthesizes_release() {
        let msgs = convert_event(key(KeyCode::Esc, KeyEventKind::Press, KeyModifiers::NONE), WINDOW_ID, None, false);
        assert_eq!(msgs, vec![Message::key_down(WINDOW_ID, 27), Message::key_up(WINDOW_ID, 27)]);
    }

    #[test]
    fn test_press_and_release_with_support() {
        let down = convert_event(key(KeyCode::Up, KeyEventKind::Press, KeyModifiers::NONE), WINDOW_ID, None, true);
        assert_eq!(down, vec![Message::key_down(WINDOW_ID, native::ARROW_UP)]);
        let up = convert_event(key(KeyCode::Up, KeyEventKind::Release, KeyModifiers::NONE), WINDOW_ID, None, true);
        assert_eq!(up, vec![Message::key_up(WINDOW_ID, native::ARROW_UP)]);
    }

    #[test]
    fn test_control_shortcuts() {
        let q = convert_event(key(KeyCode::Char('q'), KeyEventKind::Press, KeyModifiers::CONTROL), WINDOW_ID, None, true);
        assert_eq!(q, vec![Message::WindowClose { wid: WINDOW_ID }]);
        let c = convert_event(key(KeyCode::Char('c'), KeyEventKind::Press, KeyModifiers::CONTROL), WINDOW_ID, None, true);
        assert_eq!(c, vec![Message::SessionEnd]);
    }

    #[test]
    fn test_modifier_keys_map_to_native_codes() {
        assert_eq!(native_key_code(KeyCode::Modifier(ModifierKeyCode::LeftControl)), Some(native::LEFT_CTRL));
        assert_eq!(native_key_code(KeyCode::Modifier(ModifierKeyCode::RightControl)), Some(native::RIGHT_CTRL));
        assert_eq!(native_key_code(KeyCode::Modifier(ModifierKeyCode::LeftShift)), Some(native::LEFT_SHIFT));
        assert_eq!(native_key_code(KeyCode::Modifier(ModifierKeyCode::RightSuper)), None);
    }

    #[test]
    fn test_unmapped_keys_are_dropped() {
        assert!(convert_event(key(KeyCode::F(1), KeyEventKind::Press, KeyModifiers::NONE), WINDOW_ID, None, true).is_empty());
        assert!(convert_event(key(KeyCode::Char('é'), KeyEventKind::Press, KeyModifiers::NONE), WINDOW_ID, None, true).is_empty());
    }

    #[test]
    fn test_focus_events() {
        assert_eq!(
            convert_event(Event::FocusLost, WINDOW_ID, None, true),
            vec![Message::FocusChange { wid: WINDOW_ID, focused: false }]
        );
    }

    #[test]
    fn test_mouse_maps_through_viewport() {
        let vp = Viewport::fit(100, 100, 50, 25);
        let msgs = convert_event(mouse(MouseEventKind::Down(MouseButton::Right), 10, 5), WINDOW_ID, Some(&vp), true);
        assert_eq!(
            msgs,
            vec![Message::Mouse(MouseEvent::new(WINDOW_ID, 20, 20, MouseButtons::RIGHT, MouseCommand::Down))]
        );
    }

    #[test]
    fn test_mouse_release_is_click_with_released_button() {
        let vp = Viewport::fit(100, 100, 50, 25);
        let msgs = convert_event(mouse(MouseEventKind::Up(MouseButton::Left), 1, 1), WINDOW_ID, Some(&vp), true);
        match &msgs[..] {
            [Message::Mouse(ev)] => {
                assert_eq!(ev.command, MouseCommand::Click);
                assert_eq!(ev.buttons, MouseButtons::LEFT);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_right_release_on_close_button_does_not_close() {
        let decorations = Decorations::fancy();
        let window = WindowHandle::new(WINDOW_ID, 100, 100);
        let (cx, cy, _) = decorations.close_button(&window).unwrap();
        // One cell per pixel column, two pixel rows per cell.
        let vp = Viewport::fit(100, 100, 100, 50);
        let (col, row) = (cx as u16 + 1, (cy as u16 + 2) / 2);

        for (button, expected) in [
            (MouseButton::Right, DecorHit::None),
            (MouseButton::Middle, DecorHit::None),
            (MouseButton::Left, DecorHit::Close),
        ] {
            let msgs = convert_event(mouse(MouseEventKind::Up(button), col, row), WINDOW_ID, Some(&vp), true);
            let [Message::Mouse(ev)] = &msgs[..] else {
                panic!("unexpected {msgs:?}");
            };
            assert_eq!(decorations.hit_test(&window, ev), expected, "{button:?}");
        }
    }

    /// Accepts `limit` bytes, then fails like a closing pty.
    struct FailingWriter {
        written: Vec<u8>,
        limit: usize,
    }

    impl Write for FailingWriter {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            if self.written.len() + buf.len() > self.limit {
                return Err(io::Error::other("pty closed"));
            }
            self.written.extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_failed_screen_setup_is_still_restored() {
        let mut modes = TerminalModes::default();
        let mut broken = FailingWriter { written: Vec::new(), limit: 0 };
        assert!(modes.enter_screen(&mut broken).is_err());
        assert!(modes.screen);

        let mut out = Vec::new();
        modes.restore(&mut out).unwrap();
        let s = String::from_utf8_lossy(&out);
        assert!(s.contains("\x1b[?1049l"), "{s:?}");
        assert!(s.contains("\x1b[?25h"), "{s:?}");
        assert!(!modes.screen);
    }

    #[test]
    fn test_failed_keyboard_flags_are_popped() {
        let mut modes = TerminalModes::default();
        let mut broken = FailingWriter { written: Vec::new(), limit: 0 };
        assert!(modes.push_keyboard_flags(&mut broken).is_err());

        let mut out = Vec::new();
        modes.restore(&mut out).unwrap();
        assert!(String::from_utf8_lossy(&out).contains("\x1b[<1u"));
    }

    #[test]
    fn test_restore_is_idempotent() {
        let mut modes = TerminalModes::default();
        modes.enter_screen(&mut Vec::new()).unwrap();

        let mut first = Vec::new();
        modes.restore(&mut first).unwrap();
        assert!(!first.is_empty());

        let mut second = Vec::new();
        modes.restore(&mut second).unwrap();
        assert!(second.is_empty());
    }

    #[test]
    fn test_mouse_without_viewport_or_outside_is_dropped() {
        let ev = mouse(MouseEventKind::Down(MouseButton::Left), 1, 1);
        assert!(convert_event(ev.clone(), WINDOW_ID, None, true).is_empty());
        let vp = Viewport::fit(10, 10, 80, 24);
        let outside = mouse(MouseEventKind::Down(MouseButton::Left), 70, 1);
        assert!(convert_event(outside, WINDOW_ID, Some(&vp), true).is_empty());
    }
}
