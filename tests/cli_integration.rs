//! Integration tests for the `clk` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn clk() -> Command {
    Command::cargo_bin("clk").unwrap()
}

#[test]
fn help_lists_commands() {
    clk()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("recover"))
        .stdout(predicate::str::contains("anchors"))
        .stdout(predicate::str::contains("batch"));
}

#[test]
fn curves_lists_allow_list() {
    clk()
        .arg("curves")
        .assert()
        .success()
        .stdout(predicate::str::contains("secp256k1"))
        .stdout(predicate::str::contains("prime256v1 (aliases: secp256r1"));
}

#[test]
fn anchors_json_reports_geometry() {
    clk()
        .args(["anchors", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"shared_vertices\": 140"))
        .stdout(predicate::str::contains("\"attractors\": 186"));
}

#[test]
fn recover_generator_as_json() {
    clk()
        .args(["recover", "--curve", "secp256k1", "--k", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"verified\": true"))
        .stdout(predicate::str::contains("\"confidence\": 1.0"));
}

#[test]
fn recover_human_output() {
    clk()
        .args(["recover", "--curve", "p-256", "--k", "0x2a", "--train", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("verified=true"))
        .stdout(predicate::str::contains("curve:          prime256v1"));
}

#[test]
fn recover_rejects_unknown_curve() {
    clk()
        .args(["recover", "--curve", "curve25519", "--k", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown curve 'curve25519'"));
}

#[test]
fn recover_rejects_bad_point_hex() {
    clk()
        .args(["recover", "--curve", "secp256k1", "--point", "04zz"])
        .assert()
        .failure();
}

#[test]
fn batch_prints_summary() {
    clk()
        .args(["batch", "--curve", "secp256k1", "--k", "1", "2", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("requests=3 verified=3"));
}

#[test]
fn quiet_batch_prints_only_summary() {
    clk()
        .args(["-q", "batch", "--curve", "secp256k1", "--k", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("k_hat=").not())
        .stdout(predicate::str::starts_with("requests=1"));
}

#[test]
fn config_init_then_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clk.toml");

    clk()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .success();
    assert!(path.exists());

    clk()
        .arg("--config")
        .arg(&path)
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("[anchors]"))
        .stdout(predicate::str::contains("tolerance_tau = 5.0"))
        .stdout(predicate::str::contains("[search]"));

    clk()
        .args(["config", "init"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("--force"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("clk.toml");
    std::fs::write(&path, "[anchors]\ntolerance_tau = -1.0\n").unwrap();

    clk()
        .arg("--config")
        .arg(&path)
        .arg("anchors")
        .assert()
        .failure()
        .stderr(predicate::str::contains("tolerance_tau"));
}
