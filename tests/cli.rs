//! End-to-end check of the binary's bit-exact stdout contract, spawning
//! the built `mmu` executable against a tiny two-instruction trace.

use std::io::Write;

use assert_cmd::Command;
use tempfile::NamedTempFile;

#[test]
fn full_run_with_every_output_flag_matches_expected_stdout_exactly() {
    let mut trace = NamedTempFile::new().unwrap();
    writeln!(
        trace,
        "1\n1\n0 1 0 0\n#### instruction simulation ######\nc 0\nr 0\nr 1\ne 0\n"
    )
    .unwrap();

    let mut random = NamedTempFile::new().unwrap();
    writeln!(random, "1\n5\n").unwrap();

    let mut cmd = Command::cargo_bin("mmu").unwrap();
    let output = cmd
        .args(["-f", "2", "-a", "f", "-o", "OPFS"])
        .arg(trace.path())
        .arg(random.path())
        .output()
        .unwrap();

    assert!(output.status.success());

    let stars = vec!["*"; 64].join(" ");
    let expected = format!(
        "0: ==> c 0\n\
         1: ==> r 0\n\
         \x20ZERO\n\
         \x20MAP 0\n\
         2: ==> r 1\n\
         \x20ZERO\n\
         \x20MAP 1\n\
         3: ==> e 0\n\
         EXIT current process 0\n\
         \x20UNMAP 0:0\n\
         \x20UNMAP 0:1\n\
         PT[0]: {stars}\n\
         FT: * *\n\
         PROC[0]: U=2 M=2 I=0 O=0 FI=0 FO=0 Z=2 SV=0 SP=0\n\
         TOTALCOST 4 1 1 3182 4\n"
    );

    let actual = String::from_utf8(output.stdout).unwrap();
    pretty_assertions::assert_eq!(actual, expected);
}

#[test]
fn an_unknown_algorithm_flag_fails_with_a_nonzero_exit_and_a_message_on_stderr() {
    let mut trace = NamedTempFile::new().unwrap();
    writeln!(trace, "0\n#### instruction simulation ######\n").unwrap();
    let mut random = NamedTempFile::new().unwrap();
    writeln!(random, "1\n1\n").unwrap();

    let mut cmd = Command::cargo_bin("mmu").unwrap();
    let output = cmd
        .args(["-f", "4", "-a", "z"])
        .arg(trace.path())
        .arg(random.path())
        .output()
        .unwrap();

    assert!(!output.status.success());
    let stderr = String::from_utf8(output.stderr).unwrap();
    assert!(stderr.contains("unknown algorithm"), "stderr was: {stderr}");
}
