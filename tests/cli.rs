//! Integration tests for the `rusty-emcal` binary.

use std::io::Write;

use assert_cmd::Command;
use predicates::prelude::*;

/// Four slots: accepted central track, empty slot, soft track below the pt
/// cut, and a track at eta -0.5.
const PARTICLES: &str = r#"[
    { "pt": 2.0, "eta": 0.1, "phi": 1.0, "charge": 1 },
    null,
    { "pt": 0.05, "eta": 0.0, "phi": 2.0, "charge": -1 },
    { "pt": 3.5, "eta": -0.5, "phi": 3.0, "charge": 0, "mc_label": 4 }
]"#;

const CENTRAL: &str = "pt=2.000 eta=+0.100 phi=1.000 q=+1 label=0";
const SOFT: &str = "pt=0.050 eta=+0.000 phi=2.000 q=-1 label=0";
const WIDE: &str = "pt=3.500 eta=-0.500 phi=3.000 q=+0 label=4";

fn rusty_emcal() -> Command {
    Command::new(env!("CARGO_BIN_EXE_rusty-emcal"))
}

fn particle_file() -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new()
        .suffix(".json")
        .tempfile()
        .unwrap();
    file.write_all(PARTICLES.as_bytes()).unwrap();
    file
}

fn line(logical: usize, physical: usize, entry: &str) -> String {
    format!("{logical:>6} {physical:>6}  {entry}\n")
}

fn run(args: &[&str]) -> String {
    let file = particle_file();
    let output = rusty_emcal()
        .args(args)
        .arg(file.path())
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8(output).unwrap()
}

#[test]
fn list_all_slots_in_order() {
    let expected = [
        line(0, 0, CENTRAL),
        line(1, 1, "<null>"),
        line(2, 2, SOFT),
        line(3, 3, WIDE),
    ]
    .concat();
    assert_eq!(run(&["list"]), expected);
}

#[test]
fn list_accepted_in_reverse() {
    let expected = [line(1, 3, WIDE), line(0, 0, CENTRAL)].concat();
    assert_eq!(run(&["list", "--accepted", "--reverse"]), expected);
}

#[test]
fn max_eta_override_rejects_wide_track() {
    let expected = line(0, 0, CENTRAL);
    assert_eq!(run(&["list", "--accepted", "--max-eta", "0.4"]), expected);
}

#[test]
fn summary_counts_rejections() {
    let expected = [
        "container: particles\n".to_string(),
        "entries:   4\n".to_string(),
        "accepted:  2\n".to_string(),
        format!("  {:<16} {}\n", "null object", 1),
        format!("  {:<16} {}\n", "pt cut", 1),
    ]
    .concat();
    assert_eq!(run(&["summary"]), expected);
}

#[test]
fn summary_with_max_eta_reports_acceptance_cut() {
    let stdout = run(&["summary", "--max-eta", "0.4"]);
    assert!(stdout.contains("accepted:  1\n"));
    assert!(stdout.contains(&format!("  {:<16} {}\n", "acceptance cut", 1)));
}

#[test]
fn nan_cut_is_refused() {
    let file = particle_file();
    rusty_emcal()
        .args(["list", "--min-pt", "NaN"])
        .arg(file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("pt range has a NaN bound"));
}

#[test]
fn unsupported_file_fails() {
    rusty_emcal()
        .args(["list", "particles.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unsupported file extension"));
}
