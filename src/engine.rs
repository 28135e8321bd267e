//! Engine state management.
//!
//! Holds the current board, the turn configuration, and the resolver for the
//! match in progress, and answers protocol commands against them.

use std::io::{self, Write};

use crate::board::{Board, BoardSetup};
use crate::config::TurnConfig;
use crate::observe::{NoSkills, TracingObserver};
use crate::render::render_board;
use crate::resolve::TurnResolver;

/// Holds the mutable state of the engine between commands.
pub struct Engine {
    pub board: Option<Board>,
    pub config: TurnConfig,
    resolver: Option<TurnResolver>,
    render_on_move: bool,
    finished: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Creates an engine with no board and default configuration.
    pub fn new() -> Self {
        Engine {
            board: None,
            config: TurnConfig::default(),
            resolver: None,
            render_on_move: false,
            finished: false,
        }
    }

    /// Drops the board and resolver for a new match. Configuration is kept.
    pub fn new_game(&mut self) {
        self.board = None;
        self.resolver = None;
        self.finished = false;
    }

    /// Loads a board from its JSON description and starts a fresh match.
    /// Returns an error message on failure.
    pub fn set_position(&mut self, json: &str) -> Result<(), String> {
        let setup: BoardSetup =
            serde_json::from_str(json).map_err(|e| format!("failed to parse board: {}", e))?;
        let board = Board::from_setup(&setup).map_err(|e| format!("invalid board: {}", e))?;
        self.board = Some(board);
        self.resolver = None;
        self.finished = false;
        Ok(())
    }

    /// Replaces the configuration from JSON. Takes effect on the next match.
    pub fn set_config(&mut self, json: &str) -> Result<(), String> {
        self.config = TurnConfig::from_json(json).map_err(|e| e.to_string())?;
        self.resolver = None;
        Ok(())
    }

    /// Sets a single option. `RenderOnMove` is handled here; everything else
    /// goes to the turn configuration.
    pub fn set_option(&mut self, name: &str, value: Option<&str>) -> Result<(), String> {
        if name == "RenderOnMove" {
            self.render_on_move = match value {
                None | Some("true") => true,
                Some("false") => false,
                Some(other) => return Err(format!("invalid value '{}' for option '{}'", other, name)),
            };
        } else {
            self.config.set_option(name, value).map_err(|e| e.to_string())?;
        }
        self.resolver = None;
        Ok(())
    }

    /// Handles the `isready` command.
    pub fn handle_isready<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "readyok")?;
        out.flush()
    }

    /// Handles the `show` command.
    pub fn handle_show<W: Write>(&self, out: &mut W) -> io::Result<()> {
        match &self.board {
            Some(board) => write!(out, "{}", render_board(board))?,
            None => writeln!(out, "error no position set")?,
        }
        out.flush()
    }

    /// Handles the `turn` command: resolves up to `count` turns, writing one
    /// `report <json>` line per turn and a `loser <name>` line if the match
    /// ends. A failed turn writes `error <message>` and discards the board.
    pub fn handle_turn<W: Write>(&mut self, count: u32, out: &mut W) -> io::Result<()> {
        let Some(board) = self.board.as_mut() else {
            writeln!(out, "error no position set")?;
            return out.flush();
        };
        if self.finished {
            writeln!(out, "error match is over")?;
            return out.flush();
        }

        let config = &self.config;
        let render_on_move = self.render_on_move;
        let resolver = self.resolver.get_or_insert_with(|| {
            TurnResolver::with_parts(
                config.clone(),
                NoSkills,
                TracingObserver { render_on_move },
            )
        });

        for _ in 0..count {
            match resolver.resolve(board) {
                Ok(report) => {
                    let json = serde_json::to_string(&report).map_err(io::Error::other)?;
                    writeln!(out, "report {}", json)?;
                    if let Some(loser) = report.loser {
                        writeln!(out, "loser {}", loser)?;
                        self.finished = true;
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!(error = %e, "turn resolution failed");
                    writeln!(out, "error {}", e)?;
                    self.board = None;
                    self.resolver = None;
                    break;
                }
            }
        }
        out.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BOARD_JSON: &str = r#"{"width":3,"height":8,"players":[{"name":"alice","hp":20,"side":"top"},{"name":"bob","hp":3,"side":"bottom"}],"units":[{"name":"k","kind":"knight","owner":"alice","at":{"x":0,"y":5},"hp":10,"initiative":3,"attack":{"fixed":2}}]}"#;

    fn run_turns(engine: &mut Engine, count: u32) -> Vec<String> {
        let mut output = Vec::new();
        engine.handle_turn(count, &mut output).unwrap();
        String::from_utf8(output)
            .unwrap()
            .lines()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn new_engine_has_no_board() {
        let engine = Engine::new();
        assert!(engine.board.is_none());
        assert_eq!(engine.config, TurnConfig::default());
    }

    #[test]
    fn set_position_valid_json() {
        let mut engine = Engine::new();
        engine.set_position(BOARD_JSON).unwrap();
        let board = engine.board.as_ref().unwrap();
        assert_eq!(board.units().len(), 1);
        assert_eq!(board.players().len(), 2);
    }

    #[test]
    fn set_position_invalid_json() {
        let mut engine = Engine::new();
        assert!(engine.set_position("garbage").is_err());
        assert!(engine.set_position(r#"{"width":0,"height":3,"players":[]}"#).is_err());
        assert!(engine.board.is_none());
    }

    #[test]
    fn set_position_rejects_oversized_grid() {
        let mut engine = Engine::new();
        let json = format!(
            r#"{{"width":{},"height":4,"players":[{{"name":"alice","hp":20,"side":"top"}},{{"name":"bob","hp":20,"side":"bottom"}}]}}"#,
            usize::MAX / 2
        );
        let err = engine.set_position(&json).unwrap_err();
        assert!(err.starts_with("invalid board"));
        assert!(engine.board.is_none());
    }

    #[test]
    fn extreme_attack_on_wounded_unit_is_rejected_not_fatal() {
        let mut engine = Engine::new();
        let json = r#"{"width":3,"height":8,"players":[{"name":"alice","hp":20,"side":"top"},{"name":"bob","hp":20,"side":"bottom"}],"units":[{"name":"a","kind":"knight","owner":"alice","at":{"x":1,"y":3},"hp":10,"initiative":5,"attack":{"fixed":2147483647}},{"name":"d","kind":"footman","owner":"bob","at":{"x":1,"y":4},"hp":-5,"initiative":1}]}"#;
        assert!(engine.set_position(json).is_err());

        // The same attack against a healthy defender resolves normally.
        let healthy = json.replace(r#""hp":-5"#, r#""hp":5"#);
        engine.set_position(&healthy).unwrap();
        let lines = run_turns(&mut engine, 1);
        assert_eq!(lines.len(), 1);
        let report: crate::resolve::TurnReport =
            serde_json::from_str(lines[0].strip_prefix("report ").unwrap()).unwrap();
        assert_eq!(report.combat_log[0].value, -i32::MAX);
        assert_eq!(report.updated_units[0].hp, 5 - i32::MAX);
    }

    #[test]
    fn new_game_resets_board_but_keeps_config() {
        let mut engine = Engine::new();
        engine.set_option("ScoreDamage", Some("9")).unwrap();
        engine.set_position(BOARD_JSON).unwrap();
        engine.new_game();
        assert!(engine.board.is_none());
        assert_eq!(engine.config.score_damage, 9);
    }

    #[test]
    fn set_option_errors_are_reported() {
        let mut engine = Engine::new();
        assert!(engine.set_option("Nope", Some("1")).is_err());
        assert!(engine.set_option("RenderOnMove", Some("maybe")).is_err());
        engine.set_option("RenderOnMove", None).unwrap();
    }

    #[test]
    fn turn_without_position_reports_error() {
        let mut engine = Engine::new();
        assert_eq!(run_turns(&mut engine, 1), vec!["error no position set"]);
    }

    #[test]
    fn turns_run_until_loser() {
        let mut engine = Engine::new();
        engine.set_position(BOARD_JSON).unwrap();

        // y=5 -> 6 -> 7 (score row), scored on the third turn.
        let lines = run_turns(&mut engine, 10);
        assert_eq!(lines.len(), 4);
        assert!(lines[..3].iter().all(|l| l.starts_with("report ")));
        assert_eq!(lines[3], "loser bob");

        let last: crate::resolve::TurnReport =
            serde_json::from_str(lines[2].strip_prefix("report ").unwrap()).unwrap();
        assert_eq!(last.loser.as_deref(), Some("bob"));
        assert_eq!(last.updated_players[0].hp, 0);

        assert_eq!(run_turns(&mut engine, 1), vec!["error match is over"]);
    }

    #[test]
    fn failed_turn_discards_board() {
        let mut engine = Engine::new();
        engine.set_config(r#"{"score_row_bottom": 99}"#).unwrap();
        engine.set_position(BOARD_JSON).unwrap();

        // Without a scoring row at y=7 the knight walks off the edge.
        let lines = run_turns(&mut engine, 5);
        assert_eq!(lines.len(), 3);
        assert!(lines[2].starts_with("error invalid board state"));
        assert!(engine.board.is_none());
    }

    #[test]
    fn show_renders_board() {
        let mut engine = Engine::new();
        engine.set_position(BOARD_JSON).unwrap();
        let mut output = Vec::new();
        engine.handle_show(&mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert_eq!(text.lines().count(), 8);
        assert_eq!(text.lines().nth(5), Some("K.."));
    }

    #[test]
    fn handle_isready_outputs_readyok() {
        let engine = Engine::new();
        let mut output = Vec::new();
        engine.handle_isready(&mut output).unwrap();
        assert_eq!(String::from_utf8(output).unwrap().trim(), "readyok");
    }
}
