//! Concurrency tests for liftcast.
//!
//! Forecasts hold no state, so parallel invocations over the same data must
//! agree with each other and with a sequential run.

use assert_cmd::Command;
use std::fs;
use std::thread;
use tempfile::TempDir;

/// The binary, isolated from the real user's config file
fn cli() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("liftcast"));
    cmd.env("XDG_CONFIG_HOME", env!("CARGO_TARGET_TMPDIR"))
        .env("HOME", env!("CARGO_TARGET_TMPDIR"));
    cmd
}

fn setup_test_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

fn predict_stdout(data_dir: &std::path::Path) -> String {
    let output = cli()
        .arg("predict")
        .arg("--data-dir")
        .arg(data_dir)
        .arg("--target")
        .arg("240")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();
    String::from_utf8_lossy(&output).into_owned()
}

#[test]
fn test_concurrent_predictions_agree() {
    let temp_dir = setup_test_dir();
    let data_dir = temp_dir.path().to_path_buf();

    let sets = [
        ("a0", 150.0, 7),
        ("a0", 135.0, 5),
        ("a1", 142.5, 10),
        ("a1", 135.0, 5),
        ("a2", 150.0, 9),
        ("a3", 160.0, 8),
    ];
    let lines: Vec<String> = sets
        .iter()
        .enumerate()
        .map(|(i, (week, weight, reps))| {
            format!(
                r#"{{"id":"s{}","weekId":"{}","date":"2024-01-01","dayId":"push","exerciseId":"bench_press","reps":{},"weight":{}}}"#,
                i, week, reps, weight
            )
        })
        .collect();
    fs::write(data_dir.join("sets.jsonl"), lines.join("\n")).unwrap();

    let expected = predict_stdout(&data_dir);
    assert!(expected.contains("Estimated time"));

    let handles: Vec<_> = (0..5)
        .map(|_| {
            let dir = data_dir.clone();
            thread::spawn(move || predict_stdout(&dir))
        })
        .collect();

    for handle in handles {
        let stdout = handle.join().expect("thread panicked");
        assert_eq!(stdout, expected);
    }
}
