//! Process-level behavior: close requests end the program.
//!
//! Spawns the `yutani-headless` binary and observes how it exits.

use std::process::Command;

fn run(scenario: &str) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_yutani-headless"))
        .arg(scenario)
        .output()
        .expect("failed to spawn yutani-headless")
}

#[test]
fn escape_scenario_returns_normally() {
    let out = run("escape");
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("frame presented"), "{stdout}");
    assert!(stdout.contains("key pressed=1 key=27"), "{stdout}");
    assert!(stdout.contains("key pressed=0 key=27"), "{stdout}");
    assert!(stdout.trim_end().ends_with("none"), "{stdout}");
}

#[test]
fn window_close_exits_process() {
    let out = run("close");
    assert_eq!(out.status.code(), Some(0));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(!stdout.contains("frame presented"), "{stdout}");
    assert!(String::from_utf8_lossy(&out.stderr).contains("WindowClosed"));
}

#[test]
fn session_end_exits_process() {
    let out = run("session-end");
    assert_eq!(out.status.code(), Some(0));
    assert!(!String::from_utf8_lossy(&out.stdout).contains("frame presented"));
}

#[test]
fn close_button_exits_process() {
    let out = run("close-button");
    assert_eq!(out.status.code(), Some(0));
    assert!(String::from_utf8_lossy(&out.stderr).contains("CloseButton"));
}

#[test]
fn frames_scenario_counts_flips() {
    let out = run("frames");
    assert!(out.status.success());
    assert!(String::from_utf8_lossy(&out.stdout).contains("presented 1 frames, 1 flips"));
}

#[test]
fn unknown_scenario_fails() {
    let out = run("bogus");
    assert_eq!(out.status.code(), Some(2));
}
