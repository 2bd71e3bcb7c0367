use assert_cmd::cargo_bin_cmd;
use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

const PASSPHRASE_VAR: &str = "ENVSEAL_PASSPHRASE";

/// Helper to create an `envseal` command with an isolated config directory
/// and a passphrase available through `--passphrase-env ENVSEAL_PASSPHRASE`.
fn envseal_cmd(work_dir: &TempDir) -> Command {
    let mut cmd = cargo_bin_cmd!("envseal");
    cmd.current_dir(work_dir.path());
    cmd.env("HOME", work_dir.path());
    cmd.env("ENVSEAL_CONFIG_DIR", work_dir.path().join("config"));
    cmd.env(PASSPHRASE_VAR, "hunter2");
    cmd.env_remove("RUST_LOG");
    cmd
}

fn seal_text(tmp: &TempDir, plaintext: &str) -> String {
    let output = envseal_cmd(tmp)
        .args(["encrypt", "--passphrase-env", PASSPHRASE_VAR])
        .write_stdin(plaintext)
        .output()
        .unwrap();
    assert!(output.status.success());
    String::from_utf8(output.stdout).unwrap()
}

// ============================================================================
// Happy path tests
// ============================================================================

#[test]
fn version_flag() {
    cargo_bin_cmd!("envseal")
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("envseal"));
}

#[test]
fn help_flag() {
    cargo_bin_cmd!("envseal")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("Passphrase-based authenticated encryption"))
        .stdout(predicate::str::contains("encrypt"))
        .stdout(predicate::str::contains("decrypt"))
        .stdout(predicate::str::contains("inspect"));
}

#[test]
fn keygen_prints_hex_key() {
    let tmp = TempDir::new().unwrap();
    envseal_cmd(&tmp)
        .arg("keygen")
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^[0-9a-f]{64}\n$").unwrap());
}

#[test]
fn text_round_trip_through_stdin() {
    let tmp = TempDir::new().unwrap();
    let envelope = seal_text(&tmp, "hello");

    assert!(envelope.ends_with('\n'));
    assert_eq!(envelope.trim_end().len(), 176);
    assert!(!envelope.contains('+') && !envelope.contains('/'));

    envseal_cmd(&tmp)
        .args(["decrypt", "--passphrase-env", PASSPHRASE_VAR])
        .write_stdin(envelope)
        .assert()
        .success()
        .stdout("hello");
}

#[test]
fn binary_round_trip_through_files() {
    let tmp = TempDir::new().unwrap();
    let payload: Vec<u8> = (0..=255u8).collect();
    std::fs::write(tmp.path().join("data.bin"), &payload).unwrap();

    envseal_cmd(&tmp)
        .args([
            "encrypt",
            "data.bin",
            "-o",
            "data.seal",
            "--binary",
            "--iterations",
            "64",
            "--passphrase-env",
            PASSPHRASE_VAR,
        ])
        .assert()
        .success()
        .stdout("");

    // 256 bytes pad to 272, plus the 116-byte header
    let sealed = std::fs::read(tmp.path().join("data.seal")).unwrap();
    assert_eq!(sealed.len(), 388);
    assert_eq!(&sealed[112..116], &64u32.to_be_bytes());

    envseal_cmd(&tmp)
        .args([
            "decrypt",
            "data.seal",
            "-o",
            "data.out",
            "--binary",
            "--passphrase-env",
            PASSPHRASE_VAR,
        ])
        .assert()
        .success();

    assert_eq!(std::fs::read(tmp.path().join("data.out")).unwrap(), payload);
}

#[test]
fn inspect_shows_header_without_passphrase() {
    let tmp = TempDir::new().unwrap();
    let envelope = seal_text(&tmp, "hello");

    envseal_cmd(&tmp)
        .env_remove(PASSPHRASE_VAR)
        .arg("inspect")
        .write_stdin(envelope)
        .assert()
        .success()
        .stdout(predicate::str::contains("\"iterations\": 50"))
        .stdout(predicate::str::contains("\"envelope_len\": 132"));
}

#[test]
fn config_shows_paths() {
    let tmp = TempDir::new().unwrap();
    envseal_cmd(&tmp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("config.json"))
        .stdout(predicate::str::contains("audit.log"))
        .stdout(predicate::str::contains("Iterations:      50"));
}

#[test]
fn config_init_then_recent_activity() {
    let tmp = TempDir::new().unwrap();
    envseal_cmd(&tmp)
        .args(["config", "--init"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote"));
    assert!(tmp.path().join("config").join("config.json").exists());

    seal_text(&tmp, "hello");

    envseal_cmd(&tmp)
        .arg("config")
        .assert()
        .success()
        .stdout(predicate::str::contains("Wrote").not())
        .stdout(predicate::str::contains("Recent activity:"))
        .stdout(predicate::str::contains("ENCRYPT - -> - (5 -> 177 bytes)"));
}

#[test]
fn settings_file_selects_binary_format() {
    let tmp = TempDir::new().unwrap();
    let config_dir = tmp.path().join("config");
    std::fs::create_dir_all(&config_dir).unwrap();
    std::fs::write(
        config_dir.join("config.json"),
        r#"{"envelope_format": "binary", "iterations": 80}"#,
    )
    .unwrap();

    let output = envseal_cmd(&tmp)
        .args(["encrypt", "--passphrase-env", PASSPHRASE_VAR])
        .write_stdin("abc")
        .output()
        .unwrap();
    assert!(output.status.success());
    assert_eq!(output.stdout.len(), 132);
    assert_eq!(&output.stdout[112..116], &80u32.to_be_bytes());

    envseal_cmd(&tmp)
        .args(["decrypt", "--passphrase-env", PASSPHRASE_VAR])
        .write_stdin(output.stdout)
        .assert()
        .success()
        .stdout("abc");
}

#[test]
fn audit_log_records_runs() {
    let tmp = TempDir::new().unwrap();
    let envelope = seal_text(&tmp, "hello");
    envseal_cmd(&tmp)
        .args(["decrypt", "--passphrase-env", PASSPHRASE_VAR])
        .write_stdin(envelope)
        .assert()
        .success();

    let log = std::fs::read_to_string(tmp.path().join("config").join("audit.log")).unwrap();
    let lines: Vec<&str> = log.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("\"operation\":\"encrypt\""));
    assert!(lines[1].contains("\"operation\":\"decrypt\""));
    assert!(!log.contains("hunter2"));
    assert!(!log.contains("hello"));
}

// ============================================================================
// Error tests
// ============================================================================

#[test]
fn wrong_passphrase_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let envelope = seal_text(&tmp, "hello");

    envseal_cmd(&tmp)
        .env(PASSPHRASE_VAR, "hunter3")
        .args(["decrypt", "--passphrase-env", PASSPHRASE_VAR])
        .write_stdin(envelope)
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Message tampered"));
}

#[test]
fn missing_passphrase_variable_errors() {
    let tmp = TempDir::new().unwrap();
    envseal_cmd(&tmp)
        .args(["encrypt", "--passphrase-env", "ENVSEAL_NOT_SET"])
        .write_stdin("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("ENVSEAL_NOT_SET is not set"));
}

#[test]
fn iterations_below_minimum_errors() {
    let tmp = TempDir::new().unwrap();
    envseal_cmd(&tmp)
        .args(["encrypt", "--iterations", "49", "--passphrase-env", PASSPHRASE_VAR])
        .write_stdin("hello")
        .assert()
        .failure()
        .stderr(predicate::str::contains("Iterations out of range: 49"));
}

#[test]
fn truncated_envelope_is_invalid() {
    let tmp = TempDir::new().unwrap();
    let envelope = seal_text(&tmp, "hello");

    envseal_cmd(&tmp)
        .args(["decrypt", "--passphrase-env", PASSPHRASE_VAR])
        .write_stdin(&envelope.trim_end()[..100])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid envelope"));
}

#[test]
fn missing_input_file_errors() {
    let tmp = TempDir::new().unwrap();
    envseal_cmd(&tmp)
        .args(["encrypt", "nope.txt", "--passphrase-env", PASSPHRASE_VAR])
        .assert()
        .failure()
        .stderr(predicate::str::contains("nope.txt"));
}
