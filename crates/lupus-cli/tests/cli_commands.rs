//! Integration tests for the lupus CLI commands.
#![allow(deprecated)] // Command::cargo_bin – macro replacement not yet stable

use std::fs;
use std::path::{Path, PathBuf};

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn lupus(game: &Path) -> Command {
    let mut cmd = Command::cargo_bin("lupus").unwrap();
    cmd.env("NO_COLOR", "1")
        .env_remove("RUST_LOG")
        .arg("--game")
        .arg(game);
    cmd
}

/// A four-seat game dealt in order: Anna the seer, Bruno the wolf, Carla the
/// villager, Dario the lone wolf.
fn seeded_game(dir: &TempDir) -> PathBuf {
    let game = dir.path().join("game.json");
    lupus(&game)
        .args([
            "new",
            "--players",
            "Anna,Bruno,Carla,Dario",
            "--roles",
            "veggente,lupo,villico,lupo_solitario",
            "--no-shuffle",
        ])
        .assert()
        .success();
    game
}

// ---------------------------------------------------------------------------
// roles
// ---------------------------------------------------------------------------

#[test]
fn roles_lists_the_roster() {
    let dir = TempDir::new().unwrap();
    lupus(&dir.path().join("unused.json"))
        .arg("roles")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("lupo_solitario")
                .and(predicate::str::contains("mutaforma"))
                .and(predicate::str::contains("24 roles")),
        );
}

// ---------------------------------------------------------------------------
// new
// ---------------------------------------------------------------------------

#[test]
fn new_writes_game_file() {
    let dir = TempDir::new().unwrap();
    let game = dir.path().join("game.json");
    lupus(&game)
        .args([
            "new",
            "-p",
            "Anna,Bruno,Carla",
            "-r",
            "veggente,lupo,villico",
            "--no-shuffle",
        ])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Created")
                .and(predicate::str::contains("Anna"))
                .and(predicate::str::contains("veggente")),
        );

    let json = fs::read_to_string(&game).unwrap();
    assert!(json.contains("\"phase\""));
    assert!(json.contains("Bruno"));
}

#[test]
fn new_refuses_to_overwrite() {
    let dir = TempDir::new().unwrap();
    let game = seeded_game(&dir);
    lupus(&game)
        .args(["new", "-p", "A,B,C", "-r", "veggente,lupo,villico"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("already exists"));

    lupus(&game)
        .args(["new", "-p", "A,B,C", "-r", "veggente,lupo,villico", "--force"])
        .assert()
        .success();
}

#[test]
fn new_rejects_invalid_setup() {
    let dir = TempDir::new().unwrap();
    let game = dir.path().join("game.json");
    lupus(&game)
        .args(["new", "-p", "A,B,C", "-r", "veggente,lupo,drago"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown role"));
    assert!(!game.exists());

    lupus(&game)
        .args(["new", "-p", "A,B", "-r", "veggente,lupo,villico"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("2 players but 3 roles"));
}

// ---------------------------------------------------------------------------
// night / act / dawn
// ---------------------------------------------------------------------------

#[test]
fn night_lists_pending_roles() {
    let dir = TempDir::new().unwrap();
    let game = seeded_game(&dir);
    lupus(&game)
        .arg("night")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Night 1")
                .and(predicate::str::contains("lupo"))
                .and(predicate::str::contains("veggente"))
                .and(predicate::str::contains("Bruno")),
        );

    lupus(&game)
        .arg("night")
        .assert()
        .failure()
        .stderr(predicate::str::contains("still in progress"));
}

#[test]
fn full_night_ends_the_game() {
    let dir = TempDir::new().unwrap();
    let game = seeded_game(&dir);
    lupus(&game).arg("night").assert().success();

    lupus(&game)
        .args(["act", "lupo", "--player", "Bruno", "--target", "Carla"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kill"));
    lupus(&game)
        .args(["act", "veggente", "-p", "1", "-t", "4"])
        .assert()
        .success()
        .stdout(predicate::str::contains("discoveredFaction").and(predicate::str::contains("lupi")));

    lupus(&game)
        .arg("dawn")
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Carla")
                .and(predicate::str::contains("Dario"))
                .and(predicate::str::contains("Game over"))
                .and(predicate::str::contains("lupi")),
        );

    lupus(&game)
        .arg("night")
        .assert()
        .failure()
        .stderr(predicate::str::contains("the game is over"));
}

#[test]
fn act_rejects_player_without_the_role() {
    let dir = TempDir::new().unwrap();
    let game = seeded_game(&dir);
    lupus(&game).arg("night").assert().success();
    lupus(&game)
        .args(["act", "lupo", "-p", "Anna", "-t", "Carla"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot act as lupo"));
}

#[test]
fn act_rejects_unknown_player() {
    let dir = TempDir::new().unwrap();
    let game = seeded_game(&dir);
    lupus(&game).arg("night").assert().success();
    lupus(&game)
        .args(["act", "lupo", "-p", "Bruno", "-t", "Zeno"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no player named 'Zeno'"));
}

#[test]
fn dawn_without_night_fails() {
    let dir = TempDir::new().unwrap();
    let game = seeded_game(&dir);
    lupus(&game)
        .arg("dawn")
        .assert()
        .failure()
        .stderr(predicate::str::contains("no night in progress"));
}

// ---------------------------------------------------------------------------
// vote / status
// ---------------------------------------------------------------------------

#[test]
fn vote_eliminates_during_the_day() {
    let dir = TempDir::new().unwrap();
    let game = dir.path().join("game.json");
    lupus(&game)
        .args([
            "new",
            "-p",
            "Anna,Bruno,Carla,Dario,Elsa",
            "-r",
            "veggente,lupo,villico,villico,villico",
            "--no-shuffle",
        ])
        .assert()
        .success();
    lupus(&game).arg("night").assert().success();
    lupus(&game)
        .args(["vote", "Carla"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("still in progress"));
    lupus(&game).arg("dawn").assert().success();

    lupus(&game)
        .args(["vote", "Bruno"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("Eliminated")
                .and(predicate::str::contains("Bruno"))
                .and(predicate::str::contains("villaggio")),
        );
    lupus(&game)
        .args(["vote", "Bruno"])
        .assert()
        .failure();
}

#[test]
fn status_shows_players_and_history() {
    let dir = TempDir::new().unwrap();
    let game = seeded_game(&dir);
    lupus(&game).arg("night").assert().success();
    lupus(&game)
        .args(["act", "lupo", "-p", "Bruno", "-t", "Carla"])
        .assert()
        .success();

    lupus(&game)
        .args(["status", "--history"])
        .assert()
        .success()
        .stdout(
            predicate::str::contains("night 1")
                .and(predicate::str::contains("Dario"))
                .and(predicate::str::contains("4 alive of 4"))
                .and(predicate::str::contains("kill")),
        );
}

#[test]
fn missing_game_file_is_reported() {
    let dir = TempDir::new().unwrap();
    lupus(&dir.path().join("nope.json"))
        .arg("status")
        .assert()
        .failure()
        .stderr(predicate::str::contains("cannot read game file"));
}
