//! Event pump: drains compositor messages and routes each one.
//!
//! ```text
//! poll_async ──→ menu hook ──→ classify
//!                                 │
//!     Key (ours)        ──→ KeyQueue::push
//!     FocusChange (ours)──→ window.focused
//!     WindowClose       ──→ Terminate(WindowClosed)
//!     SessionEnd        ──→ Terminate(SessionEnded)
//!     Mouse (ours)      ──→ decorations: Close → Terminate(CloseButton)
//!                                        Right → context menu
//!     anything else     ──→ dropped
//! ```
//!
//! Termination is returned, never performed here: whoever owns the process
//! decides what "terminate" means.

use tracing::{debug, trace};

use crate::input::KeyQueue;
use crate::toolkit::{DecorHit, KeyAction, Message, Toolkit};
use crate::types::WindowHandle;

/// Why the compositor asked us to go away.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminateReason {
    /// Window close request.
    WindowClosed,
    /// The whole desktop session is ending.
    SessionEnded,
    /// The decoration close button was clicked.
    CloseButton,
}

/// Outcome of dispatching one message (or a whole drain).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dispatch {
    Continue,
    Terminate(TerminateReason),
}

impl Dispatch {
    /// True for [`Dispatch::Terminate`].
    pub fn is_terminate(&self) -> bool {
        matches!(self, Self::Terminate(_))
    }
}

/// Route a single message.
pub fn dispatch<T, const N: usize>(
    toolkit: &mut T,
    window: &mut WindowHandle,
    queue: &mut KeyQueue<N>,
    message: &Message,
) -> Dispatch
where
    T: Toolkit + ?Sized,
{
    toolkit.process_menu_event(message);

    match message {
        Message::Key { wid, action, keycode } if window.owns(*wid) => {
            let pressed = *action == KeyAction::Down;
            trace!(keycode, pressed, "key queued");
            queue.push(pressed, *keycode);
            Dispatch::Continue
        }
        Message::FocusChange { wid, focused } if window.owns(*wid) => {
            debug!(focused, "focus changed");
            window.focused = *focused;
            Dispatch::Continue
        }
        Message::WindowClose { wid } => {
            debug!(wid = wid.0, "window close requested");
            Dispatch::Terminate(TerminateReason::WindowClosed)
        }
        Message::SessionEnd => {
            debug!("session ending");
            Dispatch::Terminate(TerminateReason::SessionEnded)
        }
        Message::Mouse(event) if window.owns(event.wid) => {
            match toolkit.decor_handle_event(window, event) {
                DecorHit::Close => {
                    debug!("close button clicked");
                    Dispatch::Terminate(TerminateReason::CloseButton)
                }
                DecorHit::Right => {
                    let (x, y) = (window.x + event.new_x, window.y + event.new_y);
                    debug!(x, y, "context menu");
                    toolkit.show_default_menu(window, x, y);
                    Dispatch::Continue
                }
                DecorHit::Move | DecorHit::None => Dispatch::Continue,
            }
        }
        _ => Dispatch::Continue,
    }
}

/// Dispatch messages until none are pending or one asks to terminate.
///
/// Messages behind a terminate request are left unread.
pub fn drain<T, const N: usize>(toolkit: &mut T, window: &mut WindowHandle, queue: &mut KeyQueue<N>) -> Dispatch
where
    T: Toolkit + ?Sized,
{
    while let Some(message) = toolkit.poll_async() {
        let outcome = dispatch(toolkit, window, queue, &message);
        if outcome.is_terminate() {
            return outcome;
        }
    }
    Dispatch::Continue
}
