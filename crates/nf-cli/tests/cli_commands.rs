//! Integration tests for the `nf` CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::PathBuf;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn nf() -> Command {
    Command::cargo_bin("nf").unwrap()
}

/// Write `json` to a file inside `dir` and return its path.
fn write_json(dir: &TempDir, name: &str, json: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, json).unwrap();
    path
}

const SWORD_ATTACK: &str = r#"{
    "kind": "attack",
    "skill_name": "Blades",
    "skill_level": 3,
    "damage_type": "slash",
    "weapon": { "name": "Sword", "damage": { "slash": 4 } }
}"#;

// -- roll --

#[test]
fn roll_with_seed_prints_total() {
    nf().args(["roll", "--seed", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total"))
        .stdout(predicate::str::contains("Faces"));
}

#[test]
fn roll_is_reproducible_with_seed() {
    let first = nf().args(["roll", "--seed", "7"]).output().unwrap();
    let second = nf().args(["roll", "--seed", "7"]).output().unwrap();
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

#[test]
fn roll_with_hero_point() {
    nf().args(["roll", "--hero", "--seed", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Total"));
}

#[test]
fn roll_rejects_bad_rules() {
    let dir = TempDir::new().unwrap();
    let rules = write_json(&dir, "rules.json", r#"{ "max_faces": 0 }"#);

    nf().args(["roll", "--rules"])
        .arg(&rules)
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid rules config"));
}

// -- check --

#[test]
fn check_attack_as_json() {
    let dir = TempDir::new().unwrap();
    let request = write_json(&dir, "attack.json", SWORD_ATTACK);

    nf().arg("check")
        .arg(&request)
        .args(["--seed", "1", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"weapon_damage\": 4"))
        .stdout(predicate::str::contains("\"skill_name\": \"Blades\""));
}

#[test]
fn check_attack_as_table() {
    let dir = TempDir::new().unwrap();
    let request = write_json(&dir, "attack.json", SWORD_ATTACK);

    nf().arg("check")
        .arg(&request)
        .args(["--seed", "1"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Attack"))
        .stdout(predicate::str::contains("Lethality"));
}

#[test]
fn check_save_reports_outcome() {
    let dir = TempDir::new().unwrap();
    let request = write_json(
        &dir,
        "save.json",
        r#"{ "kind": "save", "trait_name": "Body", "trait_level": 1, "lethality": 8 }"#,
    );

    nf().arg("check")
        .arg(&request)
        .args(["--seed", "5", "--json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"outcome\""))
        .stdout(predicate::str::contains("\"mitigated_lethality\": 8"));
}

#[test]
fn check_without_kind_fails() {
    let dir = TempDir::new().unwrap();
    let request = write_json(&dir, "empty.json", r#"{ "skill_level": 2 }"#);

    nf().arg("check")
        .arg(&request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("check kind is not set"));
}

#[test]
fn check_ranged_weapon_without_ammo_fails() {
    let dir = TempDir::new().unwrap();
    let request = write_json(
        &dir,
        "bow.json",
        r#"{
            "kind": "attack",
            "damage_type": "pierce",
            "weapon": { "name": "Bow", "ranged": true }
        }"#,
    );

    nf().arg("check")
        .arg(&request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("no ammunition"));
}

#[test]
fn check_rejects_extreme_levels() {
    let dir = TempDir::new().unwrap();
    let request = write_json(
        &dir,
        "huge.json",
        r#"{ "kind": "simple", "skill_level": 2147483647, "trait_level": 1 }"#,
    );

    nf().arg("check")
        .arg(&request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("skill level"));
}

#[test]
fn check_malformed_json_fails() {
    let dir = TempDir::new().unwrap();
    let request = write_json(&dir, "broken.json", "{ kind: ");

    nf().arg("check")
        .arg(&request)
        .assert()
        .failure()
        .stderr(predicate::str::contains("malformed request"));
}

#[test]
fn check_missing_file_fails() {
    nf().args(["check", "/nonexistent/request.json"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read"));
}

// -- save-table --

#[test]
fn save_table_lists_every_tier() {
    nf().args(["save-table", "--lethality", "12"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Fumble"))
        .stdout(predicate::str::contains("Failure"))
        .stdout(predicate::str::contains("Status Quo"))
        .stdout(predicate::str::contains("Success"))
        .stdout(predicate::str::contains("Perfection"));
}

#[test]
fn save_table_rejects_extreme_lethality() {
    nf().args(["save-table", "--lethality", "2147483647"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside"));
}

#[test]
fn save_table_accepts_negative_trait() {
    nf().args(["save-table", "--lethality", "5", "--trait", "-2"])
        .assert()
        .success()
        .stdout(predicate::str::contains("trait -2"));
}
