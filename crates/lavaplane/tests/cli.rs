use std::process::Command;

fn lavaplane() -> Command {
    Command::new(env!("CARGO_BIN_EXE_lavaplane"))
}

#[test]
fn help_prints_usage() {
    let output = lavaplane().arg("--help").output().expect("spawn lavaplane");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("--size"));
    assert!(stdout.contains("--speed"));
}

// Size validation runs before any window or GPU is touched, so these
// stay reliable on headless CI machines.

#[test]
fn malformed_size_fails() {
    let output = lavaplane()
        .args(["--size", "bogus"])
        .output()
        .expect("spawn lavaplane");
    assert!(!output.status.success());
}

#[test]
fn zero_size_fails() {
    let output = lavaplane()
        .args(["--size", "1280x0"])
        .output()
        .expect("spawn lavaplane");
    assert!(!output.status.success());
}
