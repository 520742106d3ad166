use assert_cmd::Command;
use predicates::prelude::*;

fn cargo_bin() -> Command {
    let mut cmd = Command::cargo_bin("bf").unwrap();
    // Keep a developer's own bf.toml out of the picture.
    let config_home = std::env::temp_dir().join("bf-engine-tests-empty-config");
    cmd.env("XDG_CONFIG_HOME", config_home).env_remove("BF_MEMORY_SIZE");
    cmd
}

// Write 7 into cell 0, walk right `n` cells and print. Lands back on cell 0
// only when `n` is a multiple of the tape length.
fn wrap_probe(n: usize) -> String {
    format!("+++++++{}.", ">".repeat(n))
}

#[test]
fn flag_sets_tape_length() {
    cargo_bin()
        .args(["-m", "3", "-e", &wrap_probe(3)])
        .assert()
        .success()
        .stdout(vec![7u8]);
}

#[test]
fn env_sets_tape_length() {
    cargo_bin()
        .env("BF_MEMORY_SIZE", "5")
        .args(["-e", &wrap_probe(5)])
        .assert()
        .success()
        .stdout(vec![7u8]);
}

#[test]
fn flag_overrides_env() {
    cargo_bin()
        .env("BF_MEMORY_SIZE", "5")
        .args(["--memory-size", "2", "-e", &wrap_probe(2)])
        .assert()
        .success()
        .stdout(vec![7u8]);
}

#[test]
fn default_tape_is_4096_cells() {
    cargo_bin()
        .args(["-e", &wrap_probe(4096)])
        .assert()
        .success()
        .stdout(vec![7u8]);

    // Half way round reads an untouched cell.
    cargo_bin()
        .args(["-e", &wrap_probe(2048)])
        .assert()
        .success()
        .stdout(vec![0u8]);
}

#[test]
fn zero_cells_is_a_usage_error() {
    cargo_bin()
        .args(["-m", "0", "-e", "+"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("memory size must be at least 1 cell"));
}

#[test]
fn unallocatable_tape_is_a_usage_error() {
    cargo_bin()
        .args(["-m", &usize::MAX.to_string(), "-e", "+"])
        .assert()
        .code(2)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("too large to allocate"));
}
