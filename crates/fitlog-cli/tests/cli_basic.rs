use std::process::Command;

fn fitlog() -> Command {
    Command::new(env!("CARGO_BIN_EXE_fitlog"))
}

#[test]
fn help_lists_top_level_commands() {
    let output = fitlog().arg("--help").output().expect("failed to run binary");
    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    for cmd in ["workout", "log", "goal", "reminder", "stats", "clock", "config"] {
        assert!(stdout.contains(cmd), "missing subcommand: {cmd}");
    }
}

#[test]
fn version_prints() {
    let output = fitlog().arg("--version").output().expect("failed to run binary");
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("fitlog"));
}

#[test]
fn unknown_subcommand_fails() {
    let output = fitlog().arg("frobnicate").output().expect("failed to run binary");
    assert!(!output.status.success());
}
