//! Drive the adapter over the headless compositor with a canned scenario.
//!
//! ```text
//! yutani-headless escape        key down/up for Escape, print polled keys
//! yutani-headless close         window close; process exits 0
//! yutani-headless session-end   session end; process exits 0
//! yutani-headless close-button  click the decoration close button; exits 0
//! yutani-headless frames <n>    present n frames, print a summary
//! ```

use std::process;

use doomgeneric_yutani::logging::init_logging;
use doomgeneric_yutani::toolkit::{MouseButtons, MouseCommand, MouseEvent};
use doomgeneric_yutani::types::rgb;
use doomgeneric_yutani::{Adapter, AdapterConfig, FrameOutcome, HeadlessToolkit, Message, Pixel, Result, Toolkit};

fn main() -> Result<()> {
    init_logging();

    let mut args = std::env::args().skip(1);
    let scenario = args.next().unwrap_or_else(|| "escape".to_string());

    let config = AdapterConfig::default();
    let mut adapter = Adapter::init(HeadlessToolkit::connect()?, config)?;
    let wid = adapter.window().wid;
    let framebuffer = test_pattern(adapter.config().resolution.width, adapter.config().resolution.height, 0);

    match scenario.as_str() {
        "escape" => {
            adapter.toolkit_mut().inject_all([Message::key_down(wid, 27), Message::key_up(wid, 27)]);
        }
        "close" => adapter.toolkit_mut().inject(Message::WindowClose { wid }),
        "session-end" => adapter.toolkit_mut().inject(Message::SessionEnd),
        "close-button" => {
            let window = adapter.window().clone();
            if let Some((x, y, _)) = adapter.toolkit().decorations().close_button(&window) {
                let click = MouseEvent::new(wid, x as i32, y as i32, MouseButtons::LEFT, MouseCommand::Click);
                adapter.toolkit_mut().inject(Message::Mouse(click));
            }
        }
        "frames" => {
            let n: u32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(1);
            for i in 0..n {
                let fb = test_pattern(adapter.config().resolution.width, adapter.config().resolution.height, i);
                run_frame(&mut adapter, &fb);
            }
            println!("presented {} frames, {} flips", n, adapter.toolkit().flips);
            return Ok(());
        }
        other => {
            eprintln!("unknown scenario: {other}");
            process::exit(2);
        }
    }

    run_frame(&mut adapter, &framebuffer);
    println!("frame presented");
    while let Some(event) = adapter.poll_key() {
        println!("key pressed={} key={}", event.pressed as u8, event.key);
    }
    println!("none");
    Ok(())
}

/// Present one frame; a terminate request ends the process here.
fn run_frame(adapter: &mut Adapter<HeadlessToolkit>, framebuffer: &[Pixel]) {
    if let FrameOutcome::Terminate(reason) = adapter.present_frame(framebuffer) {
        eprintln!("terminating: {reason:?}");
        process::exit(0);
    }
}

fn test_pattern(width: u32, height: u32, frame: u32) -> Vec<Pixel> {
    let mut fb = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            fb.push(rgb((x + frame) as u8, y as u8, ((x ^ y) + frame) as u8) & 0x00FF_FFFF);
        }
    }
    fb
}
