//! Integration tests for the rochess engine binary.
//!
//! Tests full protocol sessions by spawning the engine process, sending
//! commands via stdin, and verifying stdout responses.

use std::io::{BufRead, Write};
use std::process::{Command, Stdio};

use rochess::resolve::TurnReport;

/// Sends a sequence of commands to the engine and collects stdout lines.
fn run_engine(commands: &[&str]) -> Vec<String> {
    let exe = env!("CARGO_BIN_EXE_rochess");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("failed to start rochess");

    let mut stdin = child.stdin.take().unwrap();
    let stdout = child.stdout.take().unwrap();
    let reader = std::io::BufReader::new(stdout);

    for cmd in commands {
        writeln!(stdin, "{}", cmd).unwrap();
    }
    stdin.flush().unwrap();
    drop(stdin);

    let lines: Vec<String> = reader.lines().map(|l| l.unwrap()).collect();
    let status = child.wait().expect("failed to wait on child");
    assert!(status.success());
    lines
}

fn parse_report(line: &str) -> TurnReport {
    let json = line.strip_prefix("report ").expect("not a report line");
    serde_json::from_str(json).expect("report is valid JSON")
}

/// A knight two rows from bob's scoring row; bob has exactly one hit left.
const KNIGHT_RUN: &str = r#"position {"width":3,"height":8,"players":[{"name":"alice","hp":20,"side":"top"},{"name":"bob","hp":3,"side":"bottom"}],"units":[{"name":"k","kind":"knight","owner":"alice","at":{"x":0,"y":5},"hp":10,"initiative":3,"attack":{"fixed":2}}]}"#;

/// Two units facing each other with fixed attacks.
const DUEL: &str = r#"position {"width":3,"height":8,"players":[{"name":"alice","hp":20,"side":"top"},{"name":"bob","hp":20,"side":"bottom"}],"units":[{"name":"a","kind":"footman","owner":"alice","at":{"x":1,"y":3},"hp":10,"initiative":5,"attack":{"fixed":4}},{"name":"b","kind":"footman","owner":"bob","at":{"x":1,"y":4},"hp":8,"initiative":2,"attack":{"fixed":3}}]}"#;

#[test]
fn isready_response() {
    let lines = run_engine(&["isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn unknown_commands_are_ignored() {
    let lines = run_engine(&["frobnicate", "", "isready", "quit"]);
    assert_eq!(lines, vec!["readyok"]);
}

#[test]
fn turn_without_position_is_an_error() {
    let lines = run_engine(&["turn", "quit"]);
    assert_eq!(lines, vec!["error no position set"]);
}

#[test]
fn malformed_position_reports_error() {
    let lines = run_engine(&["position {not json", "isready", "quit"]);
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("error failed to parse board"));
    assert_eq!(lines[1], "readyok");
}

#[test]
fn knight_walks_in_and_eliminates_bob() {
    let lines = run_engine(&[KNIGHT_RUN, "turn count 10", "quit"]);

    assert_eq!(lines.len(), 4);
    let moved = parse_report(&lines[0]);
    assert_eq!(moved.updated_units.len(), 1);
    assert_eq!(moved.updated_units[0].coords.y, 6);

    let scored = parse_report(&lines[2]);
    assert_eq!(scored.loser.as_deref(), Some("bob"));
    assert_eq!(scored.updated_players[0].name, "bob");
    assert_eq!(scored.updated_players[0].hp, 0);
    assert_eq!(lines[3], "loser bob");
}

#[test]
fn finished_match_refuses_more_turns() {
    let lines = run_engine(&[KNIGHT_RUN, "turn count 3", "turn", "quit"]);
    assert_eq!(lines.last().map(String::as_str), Some("error match is over"));
}

#[test]
fn duel_log_matches_fixed_attacks() {
    let lines = run_engine(&[DUEL, "turn", "quit"]);
    assert_eq!(lines.len(), 1);

    let report = parse_report(&lines[0]);
    let values: Vec<i32> = report.combat_log.iter().map(|e| e.value).collect();
    assert_eq!(values, vec![-4, -3, -4]);
    assert_eq!(report.updated_units.len(), 2);
    assert!(!report.updated_units[0].alive);
}

#[test]
fn config_changes_scoring_damage() {
    let lines = run_engine(&[
        r#"config {"score_damage": 5}"#,
        KNIGHT_RUN,
        "turn count 3",
        "quit",
    ]);
    let scored = parse_report(&lines[2]);
    assert_eq!(scored.updated_players[0].hp, -2);
}

#[test]
fn setoption_changes_scoring_damage() {
    let lines = run_engine(&[
        "setoption name ScoreDamage value 1",
        KNIGHT_RUN,
        "turn count 3",
        "quit",
    ]);
    // One point is not enough to eliminate bob.
    assert_eq!(lines.len(), 3);
    let scored = parse_report(&lines[2]);
    assert_eq!(scored.loser, None);
    assert_eq!(scored.updated_players[0].hp, 2);
}

#[test]
fn show_prints_grid() {
    let lines = run_engine(&[KNIGHT_RUN, "show", "turn", "show", "quit"]);

    assert_eq!(lines.len(), 17);
    assert_eq!(lines[5], "K..");
    assert!(lines[8].starts_with("report "));
    assert_eq!(lines[15], "K..");
}

#[test]
fn newgame_clears_position() {
    let lines = run_engine(&[KNIGHT_RUN, "newgame", "turn", "quit"]);
    assert_eq!(lines, vec!["error no position set"]);
}
