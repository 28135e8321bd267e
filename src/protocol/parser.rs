//! Command parser.
//!
//! Parses incoming protocol lines from raw text into structured `Command`
//! variants that the engine main loop can dispatch on.

/// Parameters passed with the `turn` command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnParams {
    /// How many turns to resolve. Resolution stops early once a player is
    /// eliminated.
    pub count: u32,
}

impl Default for TurnParams {
    fn default() -> Self {
        Self { count: 1 }
    }
}

/// A parsed client-to-engine command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Synchronization ping; engine must reply `readyok`.
    IsReady,

    /// Set an engine option: `setoption name <id> [value <x>]`.
    SetOption { name: String, value: Option<String> },

    /// Replace the whole turn configuration: `config <json>`.
    Config { json: String },

    /// Reset engine state for a new match.
    NewGame,

    /// Set the board from a JSON board description: `position <json>`.
    Position { json: String },

    /// Resolve one or more turns: `turn [count <n>]`.
    Turn(TurnParams),

    /// Print the board as text.
    Show,

    /// Terminate the engine process.
    Quit,
}

/// Parses a single line of input into a `Command`.
///
/// Returns `None` for empty lines or unrecognized commands. Malformed
/// arguments for known commands also return `None` after logging a warning.
pub fn parse_command(line: &str) -> Option<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return None;
    }

    let tokens: Vec<&str> = trimmed.split_whitespace().collect();
    if tokens.is_empty() {
        return None;
    }

    match tokens[0] {
        "isready" => Some(Command::IsReady),
        "quit" => Some(Command::Quit),
        "newgame" => Some(Command::NewGame),
        "show" => Some(Command::Show),

        "setoption" => parse_setoption(&tokens),
        "config" => rest_of_line(&tokens, trimmed, "config").map(|json| Command::Config { json }),
        "position" => {
            rest_of_line(&tokens, trimmed, "position").map(|json| Command::Position { json })
        }
        "turn" => parse_turn(&tokens),

        other => {
            tracing::warn!(command = other, "unknown command");
            None
        }
    }
}

/// Parses `setoption name <id> [value <x>]`.
fn parse_setoption(tokens: &[&str]) -> Option<Command> {
    if tokens.len() < 3 || tokens[1] != "name" {
        tracing::warn!("malformed setoption: expected 'setoption name <id> [value <x>]'");
        return None;
    }

    let value_idx = tokens.iter().position(|&t| t == "value");

    let (name, value) = match value_idx {
        Some(vi) => {
            let name_parts = &tokens[2..vi];
            let value_parts = &tokens[vi + 1..];
            if name_parts.is_empty() {
                tracing::warn!("malformed setoption: empty name");
                return None;
            }
            let name = name_parts.join(" ");
            let value = if value_parts.is_empty() {
                None
            } else {
                Some(value_parts.join(" "))
            };
            (name, value)
        }
        None => {
            let name = tokens[2..].join(" ");
            (name, None)
        }
    };

    Some(Command::SetOption { name, value })
}

/// Parses `turn [count <n>]`.
fn parse_turn(tokens: &[&str]) -> Option<Command> {
    let mut params = TurnParams::default();
    let mut i = 1;

    while i < tokens.len() {
        match tokens[i] {
            "count" => {
                i += 1;
                if i < tokens.len() {
                    match tokens[i].parse::<u32>() {
                        Ok(v) if v > 0 => params.count = v,
                        _ => {
                            tracing::warn!(value = tokens[i], "invalid turn count");
                        }
                    }
                }
            }
            other => {
                tracing::warn!(param = other, "unknown turn parameter");
            }
        }
        i += 1;
    }

    Some(Command::Turn(params))
}

/// Captures everything after the keyword, which may contain spaces.
fn rest_of_line(tokens: &[&str], full_line: &str, keyword: &str) -> Option<String> {
    if tokens.len() < 2 {
        tracing::warn!("malformed {}: expected '{} <json>'", keyword, keyword);
        return None;
    }
    let rest = full_line
        .strip_prefix(keyword)
        .unwrap_or("")
        .trim()
        .to_string();
    Some(rest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_simple_commands() {
        assert_eq!(parse_command("isready"), Some(Command::IsReady));
        assert_eq!(parse_command("quit"), Some(Command::Quit));
        assert_eq!(parse_command("newgame"), Some(Command::NewGame));
        assert_eq!(parse_command("show"), Some(Command::Show));
    }

    #[test]
    fn parse_empty_line_returns_none() {
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
        assert_eq!(parse_command("\t"), None);
    }

    #[test]
    fn parse_unknown_command_returns_none() {
        assert_eq!(parse_command("foobar"), None);
    }

    #[test]
    fn parse_setoption_with_value() {
        let cmd = parse_command("setoption name ScoreDamage value 5").unwrap();
        assert_eq!(
            cmd,
            Command::SetOption {
                name: "ScoreDamage".to_string(),
                value: Some("5".to_string()),
            }
        );
    }

    #[test]
    fn parse_setoption_no_value() {
        let cmd = parse_command("setoption name Seed").unwrap();
        assert_eq!(
            cmd,
            Command::SetOption {
                name: "Seed".to_string(),
                value: None,
            }
        );
    }

    #[test]
    fn parse_setoption_malformed_returns_none() {
        assert_eq!(parse_command("setoption"), None);
        assert_eq!(parse_command("setoption foo"), None);
        assert_eq!(parse_command("setoption name value 3"), None);
    }

    #[test]
    fn parse_position_keeps_spaces_in_json() {
        let json = r#"{"width": 3, "height": 4, "players": []}"#;
        let cmd = parse_command(&format!("position {}", json)).unwrap();
        assert_eq!(
            cmd,
            Command::Position {
                json: json.to_string(),
            }
        );
    }

    #[test]
    fn parse_position_malformed_returns_none() {
        assert_eq!(parse_command("position"), None);
        assert_eq!(parse_command("config"), None);
    }

    #[test]
    fn parse_config_json() {
        let cmd = parse_command(r#"config {"score_damage": 4}"#).unwrap();
        assert_eq!(
            cmd,
            Command::Config {
                json: r#"{"score_damage": 4}"#.to_string(),
            }
        );
    }

    #[test]
    fn parse_turn_default_and_count() {
        assert_eq!(parse_command("turn"), Some(Command::Turn(TurnParams { count: 1 })));
        assert_eq!(
            parse_command("turn count 5"),
            Some(Command::Turn(TurnParams { count: 5 }))
        );
    }

    #[test]
    fn parse_turn_bad_count_keeps_default() {
        assert_eq!(
            parse_command("turn count zero"),
            Some(Command::Turn(TurnParams::default()))
        );
        assert_eq!(
            parse_command("turn count 0"),
            Some(Command::Turn(TurnParams::default()))
        );
    }

    #[test]
    fn parse_with_leading_trailing_whitespace() {
        assert_eq!(parse_command("  isready  "), Some(Command::IsReady));
        assert_eq!(
            parse_command("  turn count 2 "),
            Some(Command::Turn(TurnParams { count: 2 }))
        );
    }
}
