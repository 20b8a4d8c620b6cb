//! # doomgeneric-yutani
//!
//! Platform adapter that binds doomgeneric's engine-agnostic platform calls
//! to a Yutani-style compositor session.
//!
//! ## Architecture
//!
//! ```text
//!  engine core                         adapter                         compositor
//!  ───────────                         ───────                         ──────────
//!  framebuffer ──present_frame──→  presenter: blit → chrome → flip ──→  window
//!                                        │
//!                                        ▼
//!                                  pump: drain messages  ←──────────── poll_async
//!                                        │ key / focus / mouse / close
//!                                        ▼
//!  poll_key  ←─────────────────────  KeyQueue (512, drop-oldest)
//! ```
//!
//! Everything runs on the engine's thread. A close request is handed back
//! to the caller as [`FrameOutcome::Terminate`]; the C entry points in
//! `ffi` (feature `engine`) turn it into process exit.
//!
//! ## Modules
//!
//! - [`input`] - key translation, packed key events, the key queue
//! - [`presenter`] - framebuffer blit and per-frame sequence
//! - [`pump`] - message classification and dispatch
//! - [`adapter`] - the context object the engine calls into
//! - [`toolkit`] - compositor contract plus headless and terminal sessions
//! - [`decor`] - window chrome: insets, drawing, hit-testing
//! - [`renderer`] - half-block terminal output

pub mod adapter;
pub mod config;
pub mod decor;
pub mod error;
pub mod input;
pub mod logging;
pub mod presenter;
pub mod pump;
pub mod renderer;
pub mod surface;
pub mod toolkit;
pub mod types;

#[cfg(feature = "engine")]
pub mod ffi;

pub use adapter::Adapter;
pub use config::AdapterConfig;
pub use decor::Decorations;
pub use error::{AdapterError, Result};
pub use input::{translate, KeyEvent, KeyQueue, KEY_QUEUE_SIZE};
pub use presenter::FrameOutcome;
pub use pump::{Dispatch, TerminateReason};
pub use surface::Surface;
pub use toolkit::{HeadlessToolkit, Message, TerminalToolkit, Toolkit};
pub use types::{DecorBounds, Pixel, Resolution, WindowHandle, WindowId};
