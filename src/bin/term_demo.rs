//! Interactive check of the terminal compositor without an engine.
//!
//! Arrow keys or WASD move the square, Escape recenters it, Ctrl+Q quits.
//! Run with `RUST_LOG=debug` and stderr redirected to see dispatch logs.

use std::process;

use doomgeneric_yutani::input::keys::doom;
use doomgeneric_yutani::logging::init_logging;
use doomgeneric_yutani::types::rgb;
use doomgeneric_yutani::{Adapter, AdapterConfig, FrameOutcome, Pixel, TerminalToolkit};

const TICRATE_MS: u32 = 1000 / 35;
const SQUARE: i32 = 24;
const STEP: i32 = 8;

fn main() {
    init_logging();

    let adapter = TerminalToolkit::connect().and_then(|tk| Adapter::init(tk, AdapterConfig::default()));
    let mut adapter = match adapter {
        Ok(adapter) => adapter,
        Err(e) => {
            eprintln!("doom-term-demo: {e}");
            process::exit(1);
        }
    };

    let res = adapter.config().resolution;
    let (w, h) = (res.width as i32, res.height as i32);
    let mut pos = (w / 2, h / 2);
    let mut fb: Vec<Pixel> = vec![0; res.pixel_count()];
    let mut tic = 0u32;

    loop {
        while let Some(event) = adapter.poll_key() {
            if !event.pressed {
                continue;
            }
            match event.key {
                doom::UPARROW => pos.1 -= STEP,
                doom::DOWNARROW => pos.1 += STEP,
                doom::LEFTARROW | doom::STRAFE_L => pos.0 -= STEP,
                doom::RIGHTARROW | doom::STRAFE_R => pos.0 += STEP,
                doom::ESCAPE => pos = (w / 2, h / 2),
                _ => {}
            }
            pos = (pos.0.clamp(0, w - SQUARE), pos.1.clamp(0, h - SQUARE));
            adapter.set_window_title(format!("Doom demo - key {:#04x}", event.key));
        }

        draw(&mut fb, w, h, pos, tic);
        if let FrameOutcome::Terminate(_) = adapter.present_frame(&fb) {
            break;
        }
        adapter.sleep_ms(TICRATE_MS);
        tic = tic.wrapping_add(1);
    }
}

fn draw(fb: &mut [Pixel], w: i32, h: i32, pos: (i32, i32), tic: u32) {
    for y in 0..h {
        for x in 0..w {
            let inside = x >= pos.0 && x < pos.0 + SQUARE && y >= pos.1 && y < pos.1 + SQUARE;
            fb[(y * w + x) as usize] = if inside {
                rgb(0xff, 0xd0, 0x20)
            } else {
                rgb(((x as u32 + tic) / 4) as u8, (y / 2) as u8, 0x40)
            };
        }
    }
}
