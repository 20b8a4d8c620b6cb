//! Input path: compositor key messages → engine key events.
//!
//! ```text
//! Message::Key (native code, down/up)
//!        │
//!        ▼
//!   keys::translate ──→ event::KeyEvent (packed u16)
//!                              │
//!                              ▼
//!                     queue::KeyQueue (ring, drop-oldest)
//!                              │
//!                              ▼
//!                     Adapter::poll_key (engine)
//! ```

pub mod event;
pub mod keys;
pub mod queue;

pub use event::KeyEvent;
pub use keys::translate;
pub use queue::{KeyQueue, KEY_QUEUE_SIZE};
