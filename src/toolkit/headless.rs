//! In-memory compositor.
//!
//! Messages are injected by the caller and handed out by `poll_async` in
//! FIFO order. Everything the adapter asks of the compositor is recorded so
//! tests can assert on it.

use std::collections::VecDeque;

use tracing::debug;

use super::{DecorHit, Message, MouseEvent, Toolkit};
use crate::decor::Decorations;
use crate::error::{AdapterError, Result};
use crate::surface::Surface;
use crate::types::{Pixel, WindowHandle, WindowId};

/// Scriptable compositor with no display.
#[derive(Debug)]
pub struct HeadlessToolkit {
    decorations: Decorations,
    pending: VecDeque<Message>,
    next_wid: u32,
    max_window_size: Option<(u32, u32)>,
    /// Every `(title, icon)` advertisement, oldest first.
    pub advertised: Vec<(String, String)>,
    /// Context menus requested, as screen coordinates.
    pub menus_shown: Vec<(i32, i32)>,
    /// Messages the menu subsystem was offered.
    pub menu_events: usize,
    /// Decoration hits reported back to the adapter.
    pub decor_hits: Vec<DecorHit>,
    /// Window flips so far.
    pub flips: usize,
    /// Front buffer as of the last window flip.
    pub last_frame: Vec<Pixel>,
}

impl HeadlessToolkit {
    /// A session with the default decorations.
    pub fn connect() -> Result<Self> {
        Ok(Self::with_decorations(Decorations::default()))
    }

    /// A session that draws `decorations` around its windows.
    pub fn with_decorations(decorations: Decorations) -> Self {
        Self {
            decorations,
            pending: VecDeque::new(),
            next_wid: 1,
            max_window_size: None,
            advertised: Vec::new(),
            menus_shown: Vec::new(),
            menu_events: 0,
            decor_hits: Vec::new(),
            flips: 0,
            last_frame: Vec::new(),
        }
    }

    /// Refuse windows larger than `width` x `height`.
    pub fn with_max_window_size(mut self, width: u32, height: u32) -> Self {
        self.max_window_size = Some((width, height));
        self
    }

    /// Queue a message for the next poll.
    pub fn inject(&mut self, message: Message) {
        self.pending.push_back(message);
    }

    /// Queue several messages in order.
    pub fn inject_all(&mut self, messages: impl IntoIterator<Item = Message>) {
        self.pending.extend(messages);
    }

    /// Messages not yet polled.
    pub fn pending(&self) -> usize {
        self.pending.len()
    }

    /// The id the next created window will get.
    pub fn next_window_id(&self) -> WindowId {
        WindowId(self.next_wid)
    }
}

impl Toolkit for HeadlessToolkit {
    fn create_window(&mut self, width: u32, height: u32) -> Result<WindowHandle> {
        if let Some((max_w, max_h)) = self.max_window_size {
            if width > max_w || height > max_h {
                return Err(AdapterError::window_create(format!(
                    "{width}x{height} exceeds {max_w}x{max_h}"
                )));
            }
        }
        let wid = WindowId(self.next_wid);
        self.next_wid += 1;
        debug!(wid = wid.0, width, height, "headless window created");
        Ok(WindowHandle::new(wid, width, height))
    }

    fn move_window(&mut self, window: &mut WindowHandle, x: i32, y: i32) {
        window.x = x;
        window.y = y;
    }

    fn advertise_icon(&mut self, _window: &WindowHandle, title: &str, icon: &str) {
        self.advertised.push((title.to_string(), icon.to_string()));
    }

    fn decorations(&self) -> &Decorations {
        &self.decorations
    }

    fn decor_handle_event(&mut self, window: &WindowHandle, event: &MouseEvent) -> DecorHit {
        let hit = self.decorations.hit_test(window, event);
        self.decor_hits.push(hit);
        hit
    }

    fn flip_window(&mut self, _window: &WindowHandle, surface: &Surface) {
        self.flips += 1;
        self.last_frame.clear();
        self.last_frame.extend_from_slice(surface.front());
    }

    fn poll_async(&mut self) -> Option<Message> {
        self.pending.pop_front()
    }

    fn process_menu_event(&mut self, _message: &Message) {
        self.menu_events += 1;
    }

    fn show_default_menu(&mut self, _window: &WindowHandle, x: i32, y: i32) {
        self.menus_shown.push((x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_is_fifo() {
        let mut tk = HeadlessToolkit::connect().unwrap();
        tk.inject(Message::SessionEnd);
        tk.inject(Message::Other(9));
        assert_eq!(tk.pending(), 2);
        assert_eq!(tk.poll_async(), Some(Message::SessionEnd));
        assert_eq!(tk.poll_async(), Some(Message::Other(9)));
        assert_eq!(tk.poll_async(), None);
    }

    #[test]
    fn test_window_ids_increase() {
        let mut tk = HeadlessToolkit::connect().unwrap();
        assert_eq!(tk.next_window_id(), WindowId(1));
        let a = tk.create_window(10, 10).unwrap();
        let b = tk.create_window(10, 10).unwrap();
        assert_eq!(a.wid, WindowId(1));
        assert_eq!(b.wid, WindowId(2));
    }

    #[test]
    fn test_window_size_limit() {
        let mut tk = HeadlessToolkit::connect().unwrap().with_max_window_size(100, 100);
        assert!(tk.create_window(100, 100).is_ok());
        let err = tk.create_window(101, 50).unwrap_err();
        assert!(matches!(err, AdapterError::WindowCreate(_)));
    }

    #[test]
    fn test_flip_records_front_buffer() {
        let mut tk = HeadlessToolkit::connect().unwrap();
        let w = tk.create_window(2, 1).unwrap();
        let mut s = Surface::new(2, 1);
        s.put(1, 0, 42);
        tk.flip_window(&w, &s);
        assert_eq!(tk.last_frame, vec![0, 0]);
        s.flip();
        tk.flip_window(&w, &s);
        assert_eq!(tk.last_frame, vec![0, 42]);
        assert_eq!(tk.flips, 2);
    }
}
