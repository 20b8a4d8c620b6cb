//! Frame presenter: logical framebuffer → window surface → compositor.
//!
//! One call does, in order:
//!
//! 1. blit the framebuffer into the surface, offset by the decoration inset,
//!    alpha forced opaque
//! 2. draw the chrome with the current title
//! 3. flip the surface, then flip the window
//! 4. drain every pending compositor message
//!
//! There is no partial-failure path. The blit is unclipped: the window was
//! created at exactly logical size plus insets.

use crate::input::KeyQueue;
use crate::pump::{self, Dispatch, TerminateReason};
use crate::surface::Surface;
use crate::toolkit::Toolkit;
use crate::types::{DecorBounds, Pixel, Resolution, WindowHandle, ALPHA_OPAQUE};

/// What happened during a frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameOutcome {
    /// Frame shown, all messages handled.
    Presented,
    /// Frame shown, then the compositor asked the program to end.
    Terminate(TerminateReason),
}

/// Copy the logical framebuffer into the surface's back buffer.
///
/// Pixel `(x, y)` lands at `(x + left_width, y + top_height)` with alpha set
/// to 255. Panics if the framebuffer holds fewer than `width * height`
/// pixels or the surface cannot hold the inset frame.
pub fn blit(framebuffer: &[Pixel], resolution: Resolution, surface: &mut Surface, bounds: DecorBounds) {
    let width = resolution.width as usize;
    if resolution.pixel_count() == 0 {
        return;
    }
    assert!(
        framebuffer.len() >= resolution.pixel_count(),
        "framebuffer has {} pixels, {}x{} needs {}",
        framebuffer.len(),
        resolution.width,
        resolution.height,
        resolution.pixel_count()
    );

    let rows = framebuffer.chunks_exact(width).take(resolution.height as usize);
    for (y, src) in rows.enumerate() {
        let dst = surface.row_mut(y as u32 + bounds.top_height, bounds.left_width);
        for (d, &s) in dst[..width].iter_mut().zip(src) {
            *d = s | ALPHA_OPAQUE;
        }
    }
}

/// Present one frame and drain the compositor.
pub fn present_frame<T, const N: usize>(
    toolkit: &mut T,
    window: &mut WindowHandle,
    surface: &mut Surface,
    queue: &mut KeyQueue<N>,
    framebuffer: &[Pixel],
    resolution: Resolution,
    title: &str,
) -> FrameOutcome
where
    T: Toolkit + ?Sized,
{
    let bounds = toolkit.decor_bounds();
    blit(framebuffer, resolution, surface, bounds);

    toolkit.render_decorations(window, surface, title);
    surface.flip();
    toolkit.flip_window(window, surface);

    match pump::drain(toolkit, window, queue) {
        Dispatch::Continue => FrameOutcome::Presented,
        Dispatch::Terminate(reason) => FrameOutcome::Terminate(reason),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decor::Decorations;
    use crate::toolkit::{HeadlessToolkit, Message};
    use crate::types::rgba;

    #[test]
    fn test_blit_offsets_and_forces_alpha() {
        let res = Resolution::new(3, 2);
        let fb = [1, 2, 3, 4, 5, rgba(1, 2, 3, 0)];
        let bounds = DecorBounds::new(2, 1, 1, 1);
        let mut s = Surface::new(5, 5);
        s.clear(0xDEAD_BEEF);
        blit(&fb, res, &mut s, bounds);

        assert_eq!(s.get(1, 2), Some(ALPHA_OPAQUE | 1));
        assert_eq!(s.get(3, 2), Some(ALPHA_OPAQUE | 3));
        assert_eq!(s.get(1, 3), Some(ALPHA_OPAQUE | 4));
        assert_eq!(s.get(3, 3), Some(rgba(1, 2, 3, 255)));
        assert_eq!(s.get(0, 2), Some(0xDEAD_BEEF));
        assert_eq!(s.get(4, 2), Some(0xDEAD_BEEF));
        assert_eq!(s.get(1, 1), Some(0xDEAD_BEEF));
        assert_eq!(s.get(1, 4), Some(0xDEAD_BEEF));
    }

    #[test]
    fn test_blit_ignores_extra_pixels() {
        let res = Resolution::new(2, 1);
        let mut s = Surface::new(2, 2);
        blit(&[7, 8, 9, 10], res, &mut s, DecorBounds::NONE);
        assert_eq!(s.get(1, 0), Some(ALPHA_OPAQUE | 8));
        assert_eq!(s.get(0, 1), Some(0));
    }

    #[test]
    #[should_panic(expected = "framebuffer has 3 pixels")]
    fn test_blit_short_framebuffer_panics() {
        let mut s = Surface::new(4, 4);
        blit(&[1, 2, 3], Resolution::new(2, 2), &mut s, DecorBounds::NONE);
    }

    #[test]
    fn test_present_flips_and_drains() {
        let res = Resolution::new(4, 2);
        let mut tk = HeadlessToolkit::with_decorations(Decorations::none());
        let mut w = tk.create_window(4, 2).unwrap();
        let mut s = Surface::new(4, 2);
        let mut q: KeyQueue = KeyQueue::new();
        tk.inject(Message::key_down(w.wid, 27));

        let out = present_frame(&mut tk, &mut w, &mut s, &mut q, &[0x0012_3456; 8], res, "Doom");
        assert_eq!(out, FrameOutcome::Presented);
        assert_eq!(tk.flips, 1);
        assert!(tk.last_frame.iter().all(|&p| p == 0xFF12_3456));
        assert_eq!(tk.pending(), 0);
        assert_eq!(q.len(), 1);
    }

    #[test]
    fn test_present_reports_terminate() {
        let res = Resolution::new(1, 1);
        let mut tk = HeadlessToolkit::with_decorations(Decorations::none());
        let mut w = tk.create_window(1, 1).unwrap();
        let mut s = Surface::new(1, 1);
        let mut q: KeyQueue = KeyQueue::new();
        tk.inject(Message::WindowClose { wid: w.wid });

        let out = present_frame(&mut tk, &mut w, &mut s, &mut q, &[0], res, "Doom");
        assert_eq!(out, FrameOutcome::Terminate(TerminateReason::WindowClosed));
        assert_eq!(tk.flips, 1);
    }
}
