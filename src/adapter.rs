//! The adapter context: everything the engine's platform calls operate on.
//!
//! One [`Adapter`] owns the compositor session, the window, its surface, the
//! key queue and the current title. Nothing here is process-global, so tests
//! can run as many adapters side by side as they like.
//!
//! # Engine contract
//!
//! | Engine call        | Adapter method                      |
//! |--------------------|-------------------------------------|
//! | init               | [`Adapter::init`]                   |
//! | draw frame         | [`Adapter::present_frame`]          |
//! | sleep              | [`Adapter::sleep_ms`]               |
//! | ticks              | [`Adapter::ticks_ms`]               |
//! | get key            | [`Adapter::poll_key`]               |
//! | set window title   | [`Adapter::set_window_title`]       |

use std::thread;
use std::time::{Duration, Instant};

use tracing::info;

use crate::config::AdapterConfig;
use crate::error::Result;
use crate::input::{KeyEvent, KeyQueue};
use crate::presenter::{self, FrameOutcome};
use crate::surface::Surface;
use crate::toolkit::Toolkit;
use crate::types::{Pixel, WindowHandle};

/// Platform adapter bound to one compositor session.
pub struct Adapter<T: Toolkit> {
    toolkit: T,
    window: WindowHandle,
    surface: Surface,
    queue: KeyQueue,
    title: Option<String>,
    config: AdapterConfig,
    started: Instant,
}

impl<T: Toolkit> Adapter<T> {
    /// Create the window and get ready for the first frame.
    ///
    /// The window is sized to the logical resolution plus the default
    /// decoration insets, moved to the configured position and advertised
    /// with the default title.
    pub fn init(mut toolkit: T, config: AdapterConfig) -> Result<Self> {
        let bounds = toolkit.decor_bounds();
        let res = config.resolution;
        let mut window = toolkit.create_window(res.width + bounds.width, res.height + bounds.height)?;

        let (x, y) = config.window_position;
        toolkit.move_window(&mut window, x, y);
        let surface = Surface::new(window.width, window.height);
        toolkit.advertise_icon(&window, &config.default_title, &config.icon_name);

        info!(
            wid = window.wid.0,
            width = window.width,
            height = window.height,
            x,
            y,
            "window created"
        );

        Ok(Self {
            toolkit,
            window,
            surface,
            queue: KeyQueue::new(),
            title: None,
            config,
            started: Instant::now(),
        })
    }

    /// Show a frame of the engine's framebuffer and handle pending input.
    ///
    /// The framebuffer must hold at least `resolution.width *
    /// resolution.height` pixels.
    pub fn present_frame(&mut self, framebuffer: &[Pixel]) -> FrameOutcome {
        let title = self.title.as_deref().unwrap_or(&self.config.default_title);
        presenter::present_frame(
            &mut self.toolkit,
            &mut self.window,
            &mut self.surface,
            &mut self.queue,
            framebuffer,
            self.config.resolution,
            title,
        )
    }

    /// Block the calling thread.
    pub fn sleep_ms(&self, ms: u32) {
        thread::sleep(Duration::from_millis(ms.into()));
    }

    /// Milliseconds since init on a monotonic clock, wrapping at `u32::MAX`.
    pub fn ticks_ms(&self) -> u32 {
        self.started.elapsed().as_millis() as u32
    }

    /// Next buffered key event, if any.
    pub fn poll_key(&mut self) -> Option<KeyEvent> {
        self.queue.pop()
    }

    /// Replace the window title and re-advertise it.
    pub fn set_window_title(&mut self, title: impl Into<String>) {
        let title = self.title.insert(title.into());
        info!(title = %title, "window title changed");
        self.toolkit.advertise_icon(&self.window, title, &self.config.icon_name);
    }

    /// Title set by the engine, if any.
    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    /// The window as last seen by the event pump.
    pub fn window(&self) -> &WindowHandle {
        &self.window
    }

    /// The window surface; the front buffer holds the last presented frame.
    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    /// Configuration the adapter was created with.
    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    /// The compositor session.
    pub fn toolkit(&self) -> &T {
        &self.toolkit
    }

    /// Mutable access to the compositor session.
    pub fn toolkit_mut(&mut self) -> &mut T {
        &mut self.toolkit
    }

    /// Key events waiting for the engine.
    pub fn queue_len(&self) -> usize {
        self.queue.len()
    }
}
