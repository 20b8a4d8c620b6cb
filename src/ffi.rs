//! C entry points called by the doomgeneric engine core.
//!
//! Built with the `engine` feature and linked (as a static library) into the
//! engine executable, which supplies `DG_ScreenBuffer`.
//!
//! ```c
//! void DG_Init(void);
//! void DG_DrawFrame(void);
//! void DG_SleepMs(uint32_t ms);
//! uint32_t DG_GetTicksMs(void);
//! int DG_GetKey(int *pressed, unsigned char *key);
//! void DG_SetWindowTitle(const char *title);
//! ```
//!
//! The engine calls all of these from its main thread, so the adapter lives
//! in a thread-local. This is the only place that turns a terminate request
//! into process exit.

#![allow(non_snake_case, non_upper_case_globals)]

use std::cell::RefCell;
use std::ffi::{c_char, c_int, c_uchar, CStr};
use std::process;
use std::thread;
use std::time::Duration;

use tracing::info;

use crate::adapter::Adapter;
use crate::config::AdapterConfig;
use crate::logging::init_logging;
use crate::presenter::FrameOutcome;
use crate::toolkit::TerminalToolkit;

unsafe extern "C" {
    /// Engine-owned `DOOMGENERIC_RESX * DOOMGENERIC_RESY` pixel buffer.
    static mut DG_ScreenBuffer: *mut u32;
}

thread_local! {
    static ADAPTER: RefCell<Option<Adapter<TerminalToolkit>>> = const { RefCell::new(None) };
}

fn with_adapter<R>(f: impl FnOnce(&mut Adapter<TerminalToolkit>) -> R) -> Option<R> {
    ADAPTER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Connect to the compositor and create the window. Exits with status 1 on
/// failure.
#[unsafe(no_mangle)]
pub extern "C" fn DG_Init() {
    init_logging();

    let adapter = TerminalToolkit::connect().and_then(|tk| Adapter::init(tk, AdapterConfig::default()));
    match adapter {
        Ok(adapter) => ADAPTER.with(|cell| *cell.borrow_mut() = Some(adapter)),
        Err(e) => {
            eprintln!("doomgeneric: {e}");
            process::exit(1);
        }
    }
}

/// Present `DG_ScreenBuffer` and handle input. Exits with status 0 when the
/// window is closed or the session ends.
#[unsafe(no_mangle)]
pub extern "C" fn DG_DrawFrame() {
    // SAFETY: the engine owns the pointer and only changes it during its own
    // init, never while a frame is being drawn.
    let ptr = unsafe { DG_ScreenBuffer };
    if ptr.is_null() {
        return;
    }

    let outcome = with_adapter(|adapter| {
        let len = adapter.config().resolution.pixel_count();
        // SAFETY: the engine allocates exactly resolution-sized storage.
        let framebuffer = unsafe { std::slice::from_raw_parts(ptr, len) };
        adapter.present_frame(framebuffer)
    });

    if let Some(FrameOutcome::Terminate(reason)) = outcome {
        info!(?reason, "terminating");
        // Dropping the adapter hands the terminal back before exit.
        drop(ADAPTER.with(|cell| cell.borrow_mut().take()));
        process::exit(0);
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn DG_SleepMs(ms: u32) {
    if with_adapter(|adapter| adapter.sleep_ms(ms)).is_none() {
        thread::sleep(Duration::from_millis(ms.into()));
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn DG_GetTicksMs() -> u32 {
    with_adapter(|adapter| adapter.ticks_ms()).unwrap_or(0)
}

/// Pop one key event. Returns 1 and fills the out-params, or 0 if none.
#[unsafe(no_mangle)]
pub extern "C" fn DG_GetKey(pressed: *mut c_int, key: *mut c_uchar) -> c_int {
    if pressed.is_null() || key.is_null() {
        return 0;
    }
    match with_adapter(|adapter| adapter.poll_key()).flatten() {
        Some(event) => {
            // SAFETY: both pointers were checked non-null; the engine passes
            // addresses of locals.
            unsafe {
                *pressed = event.pressed as c_int;
                *key = event.key;
            }
            1
        }
        None => 0,
    }
}

#[unsafe(no_mangle)]
pub extern "C" fn DG_SetWindowTitle(title: *const c_char) {
    if title.is_null() {
        return;
    }
    // SAFETY: the engine passes a NUL-terminated string that outlives the call.
    let title = unsafe { CStr::from_ptr(title) }.to_string_lossy().into_owned();
    with_adapter(|adapter| adapter.set_window_title(title));
}
