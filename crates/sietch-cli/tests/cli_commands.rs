//! Integration tests for the sietch CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;
use tempfile::TempDir;

fn sietch() -> Command {
    let mut cmd = Command::cargo_bin("sietch").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("SIETCH_LOG");
    cmd
}

/// Run a command that must succeed and parse its stdout as JSON.
fn json_output(args: &[&str]) -> Value {
    let output = sietch().args(args).arg("--json").assert().success();
    serde_json::from_slice(&output.get_output().stdout).unwrap()
}

/// Write a TOML config into a fresh temp directory.
fn config_file(contents: &str) -> (TempDir, String) {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("sietch.toml");
    fs::write(&path, contents).unwrap();
    let path = path.to_str().unwrap().to_string();
    (dir, path)
}

// ---------------------------------------------------------------------------
// roll
// ---------------------------------------------------------------------------

#[test]
fn roll_standard_prints_total() {
    sietch()
        .args(["roll", "3d6+2", "--seed", "7"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Rolling 3d6+2")
                .and(predicate::str::contains("(standard)"))
                .and(predicate::str::contains("+ 2 =")),
        );
}

#[test]
fn roll_json_is_within_bounds() {
    let value = json_output(&["roll", "4d6-1", "--seed", "3"]);
    let rolls = value["rolls"].as_array().unwrap();
    assert_eq!(rolls.len(), 4);
    let sum: i64 = rolls.iter().map(|v| v.as_i64().unwrap()).sum();
    assert!(rolls.iter().all(|v| (1..=6).contains(&v.as_i64().unwrap())));
    assert_eq!(value["total"].as_i64().unwrap(), sum - 1);
    assert_eq!(value["system"], "standard");
    assert_eq!(value["details"]["kind"], "standard");
    assert_eq!(value["details"]["modifier"], -1);
}

#[test]
fn roll_same_seed_same_result() {
    let first = json_output(&["roll", "10d20", "--seed", "42"]);
    let second = json_output(&["roll", "10d20", "--seed", "42"]);
    assert_eq!(first, second);
}

#[test]
fn roll_exploding_keeps_one_entry_per_die() {
    let value = json_output(&["roll", "5d4", "--system", "exploding", "--seed", "11"]);
    assert_eq!(value["rolls"].as_array().unwrap().len(), 5);
    assert_eq!(value["system"], "exploding");
    for exploded in value["exploded_dice"].as_array().unwrap() {
        assert_eq!(exploded.as_i64().unwrap(), 4);
    }
}

#[test]
fn roll_wod_difficulty_one_always_succeeds() {
    let value = json_output(&[
        "roll",
        "5d10",
        "--system",
        "wod",
        "--difficulty",
        "1",
        "--seed",
        "9",
    ]);
    assert_eq!(value["successes"], 5);
    assert_eq!(value["botch"], false);
    assert_eq!(value["details"]["difficulty"], 1);
}

#[test]
fn roll_wod_text_shows_successes() {
    sietch()
        .args(["roll", "3d10", "-s", "wod", "-d", "1", "--seed", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("3 successes")
                .and(predicate::str::contains("difficulty 1")),
        );
}

#[test]
fn roll_rejects_bad_notation() {
    sietch()
        .args(["roll", "3x6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("error: missing die separator"));
}

#[test]
fn roll_rejects_ambiguous_modifier() {
    sietch()
        .args(["roll", "2d6+1-1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("either '+' or '-'"));
}

#[test]
fn roll_rejects_too_many_dice() {
    sietch()
        .args(["roll", "101d6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "dice count must be between 1 and 100",
        ));
}

#[test]
fn roll_rejects_one_sided_dice() {
    sietch()
        .args(["roll", "3d1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "dice sides must be between 2 and 1000",
        ));
}

#[test]
fn roll_difficulty_needs_wod() {
    sietch()
        .args(["roll", "3d6", "--difficulty", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("only apply to wod rolls"));
}

#[test]
fn roll_dune_has_no_notation() {
    sietch()
        .args(["roll", "2d20", "--system", "dune"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot be written in dice notation"));
}

#[test]
fn roll_unknown_system() {
    sietch()
        .args(["roll", "2d6", "--system", "fate"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown dice system"));
}

#[test]
fn roll_wod_notes_ignored_sides_and_modifier() {
    sietch()
        .args(["roll", "3d6+2", "-s", "wod", "--seed", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("always roll d10")
                .and(predicate::str::contains("sides and modifier in 3d6+2 are ignored")),
        );
}

#[test]
fn roll_wod_plain_d10_has_no_note() {
    sietch()
        .args(["roll", "3d10", "-s", "wod", "--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("are ignored").not());
}

#[test]
fn roll_wod_json_has_no_note() {
    let value = json_output(&["roll", "2d6+1", "-s", "wod", "-d", "1", "--seed", "2"]);
    assert_eq!(value["successes"], 2);
}

// ---------------------------------------------------------------------------
// dune
// ---------------------------------------------------------------------------

#[test]
fn dune_target_twenty_always_two_successes() {
    let value = json_output(&["dune", "20", "--seed", "5"]);
    assert_eq!(value["rolls"].as_array().unwrap().len(), 2);
    assert_eq!(value["successes"], 2);
    assert_eq!(value["system"], "dune-2d20");
}

#[test]
fn dune_bonus_dice_pick_main_pair() {
    let value = json_output(&["dune", "10", "--bonus", "2", "--seed", "8"]);
    let rolls: Vec<i64> = value["rolls"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_i64().unwrap())
        .collect();
    assert_eq!(rolls.len(), 4);

    let mut sorted = rolls.clone();
    sorted.sort_unstable();
    let main = &value["details"]["main"]["rolls"];
    assert_eq!(main[0].as_i64().unwrap(), sorted[0]);
    assert_eq!(main[1].as_i64().unwrap(), sorted[1]);
}

#[test]
fn dune_text_output() {
    sietch()
        .args(["dune", "12", "-b", "1", "--seed", "2"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Rolling 2d20 +1 bonus against target 12")
                .and(predicate::str::contains("Main dice")),
        );
}

#[test]
fn dune_rejects_bad_target() {
    sietch()
        .args(["dune", "21"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("target must be between 1 and 20"));
}

#[test]
fn dune_rejects_too_many_bonus_dice() {
    sietch()
        .args(["dune", "10", "--bonus", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("bonus dice must be between 0 and 5"));
}

// ---------------------------------------------------------------------------
// test
// ---------------------------------------------------------------------------

#[test]
fn test_difficulty_zero_always_passes() {
    let value = json_output(&["test", "20", "--difficulty", "0", "--seed", "4"]);
    assert!(value["outcome"]["Success"].is_object());
    assert_eq!(value["momentum"], value["successes"]);
}

#[test]
fn test_text_shows_pool() {
    sietch()
        .args(["test", "15", "--seed", "6"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Test target 15, difficulty 1")
                .and(predicate::str::contains("Rolls:"))
                .and(predicate::str::contains("Momentum:"))
                .and(predicate::str::contains("Threat:")),
        );
}

#[test]
fn test_complication_range_one_marks_every_die() {
    let value = json_output(&[
        "test",
        "10",
        "--bonus",
        "1",
        "--complication-range",
        "1",
        "--seed",
        "12",
    ]);
    assert_eq!(value["complications"], 3);
    assert_eq!(value["threat"], 3);
}

#[test]
fn test_rejects_bad_difficulty() {
    sietch()
        .args(["test", "10", "--difficulty", "6"])
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "test difficulty must be between 0 and 5",
        ));
}

// ---------------------------------------------------------------------------
// extended
// ---------------------------------------------------------------------------

#[test]
fn extended_easy_target_completes() {
    let value = json_output(&["extended", "20", "--successes", "4", "--seed", "10"]);
    assert_eq!(value["progress"]["complete"], true);
    assert!(value["progress"]["total_successes"].as_u64().unwrap() >= 4);
    // At least two successes per test at target 20.
    assert!(value["tests"].as_array().unwrap().len() <= 2);
}

#[test]
fn extended_respects_time_limit() {
    let value = json_output(&[
        "extended",
        "1",
        "--successes",
        "100",
        "--time-limit",
        "3",
        "--seed",
        "10",
    ]);
    assert_eq!(value["progress"]["complete"], false);
    assert_eq!(value["progress"]["time_remaining"], 0);
    assert_eq!(value["tests"].as_array().unwrap().len(), 3);
}

#[test]
fn extended_text_output() {
    sietch()
        .args(["extended", "20", "-s", "2", "--seed", "1"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("/2 (100%)")
                .and(predicate::str::contains("Complete")),
        );
}

// ---------------------------------------------------------------------------
// config
// ---------------------------------------------------------------------------

#[test]
fn config_limits_apply() {
    let (_dir, path) = config_file("[limits]\nmax_count = 5\n");
    sietch()
        .args(["roll", "6d6", "--config", &path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dice count must be between 1 and 5"));
}

#[test]
fn config_default_difficulty_used_for_wod() {
    let (_dir, path) = config_file("default_difficulty = 1\n");
    let value = json_output(&["roll", "4d10", "-s", "wod", "-c", &path, "--seed", "3"]);
    assert_eq!(value["successes"], 4);
}

#[test]
fn config_sides_limit_spares_wod_pools() {
    let (_dir, path) = config_file("[limits]\nmax_sides = 8\n");
    let value = json_output(&["roll", "3d10", "-s", "wod", "-d", "1", "-c", &path, "--seed", "4"]);
    assert_eq!(value["successes"], 3);
    sietch()
        .args(["roll", "3d10", "--config", &path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("dice sides must be between 2 and 8"));
}

#[test]
fn config_explosion_cap() {
    let (_dir, path) = config_file("max_explosion_chain = 0\n");
    let value = json_output(&["roll", "20d2", "-s", "exploding", "-c", &path, "--seed", "3"]);
    assert!(value["exploded_dice"].as_array().unwrap().is_empty());
    assert!(
        value["rolls"]
            .as_array()
            .unwrap()
            .iter()
            .all(|v| v.as_u64().unwrap() <= 2)
    );
}

#[test]
fn config_invalid_toml() {
    let (_dir, path) = config_file("limits = [not toml");
    sietch()
        .args(["roll", "1d6", "--config", &path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid config"));
}

#[test]
fn config_missing_file() {
    sietch()
        .args(["roll", "1d6", "--config", "/nonexistent/sietch.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read config"));
}

#[test]
fn config_unusable_bounds() {
    let (_dir, path) = config_file("[limits]\nmin_sides = 1\n");
    sietch()
        .args(["roll", "1d6", "--config", &path])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid dice config"));
}

// ---------------------------------------------------------------------------
// logging
// ---------------------------------------------------------------------------

#[test]
fn verbose_logs_to_stderr_only() {
    let output = sietch()
        .args(["roll", "2d6", "--json", "-v", "--seed", "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("standard roll"));
    let value: Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(value["rolls"].as_array().unwrap().len(), 2);
}
