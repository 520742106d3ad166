// Verifies that --debug writes a step-by-step table to stderr while the
// program's own output still goes to stdout.
use predicates::prelude::*;

#[test]
fn debug_flag_prints_table() {
    let mut cmd = assert_cmd::Command::cargo_bin("bf")
        .expect("failed to locate bf binary");

    cmd.args(["--debug", "-e", ">+."])
        .assert()
        .success()
        .stdout(vec![1u8])
        .stderr(predicates::str::contains("STEP | IP")
            .and(predicates::str::contains("Moved pointer head to index 1"))
            .and(predicates::str::contains("Increment cell[1] from 0 to 1"))
        );
}
