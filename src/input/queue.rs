//! Bounded key event ring buffer.
//!
//! Written by the event pump, read by the engine's poll call. Both run on
//! the engine's single thread, so there is no locking.
//!
//! Cursors are free-running counters and the slot index is `cursor % N`.
//! That keeps "empty iff read == write" true while still using all N
//! slots. On overflow the oldest unread event is overwritten and the read
//! cursor skips past it: the queue is lossy by design and never reports an
//! error.

use super::event::KeyEvent;
use super::keys;

/// Default queue capacity.
pub const KEY_QUEUE_SIZE: usize = 512;

/// Fixed-capacity, drop-oldest queue of packed key events.
#[derive(Debug, Clone)]
pub struct KeyQueue<const N: usize = KEY_QUEUE_SIZE> {
    slots: [u16; N],
    write: usize,
    read: usize,
}

impl<const N: usize> KeyQueue<N> {
    const NONZERO: () = assert!(N > 0, "KeyQueue capacity must be non-zero");

    /// An empty queue with all slots zeroed.
    pub fn new() -> Self {
        let () = Self::NONZERO;
        Self {
            slots: [0; N],
            write: 0,
            read: 0,
        }
    }

    /// Translate a native key code and enqueue it.
    pub fn push(&mut self, pressed: bool, native_code: u32) {
        self.push_event(KeyEvent::new(pressed, keys::translate(native_code)));
    }

    /// Enqueue an already-translated event.
    pub fn push_event(&mut self, event: KeyEvent) {
        self.slots[self.write % N] = event.pack();
        self.write = self.write.wrapping_add(1);
        if self.write.wrapping_sub(self.read) > N {
            // Lapped: the slot we just wrote held the oldest unread event.
            self.read = self.write.wrapping_sub(N);
        }
    }

    /// Dequeue the oldest pending event.
    pub fn pop(&mut self) -> Option<KeyEvent> {
        if self.read == self.write {
            return None;
        }
        let word = self.slots[self.read % N];
        self.read = self.read.wrapping_add(1);
        Some(KeyEvent::unpack(word))
    }

    /// Number of pending events (at most `N`).
    #[inline]
    pub fn len(&self) -> usize {
        self.write.wrapping_sub(self.read)
    }

    /// True when nothing is waiting to be popped.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.read == self.write
    }

    /// Slots in the ring; pending events never exceed this.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Discard everything pending.
    pub fn clear(&mut self) {
        self.read = self.write;
    }

    /// Pop until empty.
    pub fn drain(&mut self) -> impl Iterator<Item = KeyEvent> + '_ {
        std::iter::from_fn(move || self.pop())
    }
}

impl<const N: usize> Default for KeyQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}
