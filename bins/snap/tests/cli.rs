//! CLI tests for the socktab command.
//!
//! Runs the binary against a synthetic proc root, so no kernel access or
//! privileges are required.

use std::fs;
use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;

fn socktab_cmd() -> Command {
    Command::new(env!("CARGO_BIN_EXE_socktab"))
}

fn write_table(root: &Path, name: &str, contents: &str) {
    let net = root.join("net");
    fs::create_dir_all(&net).unwrap();
    fs::write(net.join(name), contents).unwrap();
}

fn build_proc_root(root: &Path) {
    let header = "  sl  local_address rem_address   st\n";
    write_table(root, "dev", "Inter-|\n face |\n    lo: 1 2\n");
    write_table(
        root,
        "tcp",
        &format!("{header}   0: 0100007F:1F90 00000000:0000 0A\n"),
    );
    for name in ["tcp6", "udp", "udp6", "icmp", "icmp6", "raw", "raw6"] {
        write_table(root, name, header);
    }
}

#[test]
fn test_help() {
    socktab_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Socket table snapshot utility"));
}

#[test]
fn test_version() {
    socktab_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("socktab"));
}

#[test]
fn test_capture_from_fixture() {
    let dir = tempfile::tempdir().unwrap();
    build_proc_root(dir.path());

    socktab_cmd()
        .args(["--proc-root", dir.path().to_str().unwrap()])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"tcpipv4\""))
        .stdout(predicate::str::contains("127.0.0.1:8080"))
        .stdout(predicate::str::contains("0A(LISTEN)"));
}

#[test]
fn test_missing_table_fails() {
    let dir = tempfile::tempdir().unwrap();
    build_proc_root(dir.path());
    fs::remove_file(dir.path().join("net/raw6")).unwrap();

    socktab_cmd()
        .args(["--proc-root", dir.path().to_str().unwrap()])
        .assert()
        .failure()
        .stderr(predicate::str::contains("raw6"));
}

#[test]
fn test_skip_missing_succeeds() {
    let dir = tempfile::tempdir().unwrap();
    build_proc_root(dir.path());
    fs::remove_file(dir.path().join("net/raw6")).unwrap();

    socktab_cmd()
        .args(["--proc-root", dir.path().to_str().unwrap(), "--skip-missing"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"rawipv6\"").not());
}

#[test]
fn test_pretty_output() {
    let dir = tempfile::tempdir().unwrap();
    build_proc_root(dir.path());

    socktab_cmd()
        .args(["--proc-root", dir.path().to_str().unwrap(), "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"dev\": ["));
}
