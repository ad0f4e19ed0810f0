use assert_cmd::Command;
use predicates::str::contains;

const BINARY_NAME: &str = "wdogd";

#[test]
fn help_lists_every_option() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(contains("--foreground"))
        .stdout(contains("--logfile"))
        .stdout(contains("--timeout"))
        .stdout(contains("--interval"))
        .stdout(contains("--safe-exit"))
        .stdout(contains("--verbose"));
}

#[test]
fn version_prints_the_crate_version() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn unknown_options_are_rejected() {
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.arg("--bogus").assert().failure();
}

#[test]
fn a_zero_hardware_timeout_is_rejected() {
    // The policy can halve the hardware timeout, so zero is refused at the
    // CLI boundary before the device is ever touched.
    let mut cmd = Command::cargo_bin(BINARY_NAME).unwrap();
    cmd.args(["--timeout", "0"]).assert().failure();
}
