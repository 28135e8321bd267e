//! rochess -- a turn-resolution engine driven over stdin/stdout.
//!
//! Reads one command per line from stdin and writes responses to stdout.
//! Diagnostics go to stderr through `tracing`; set `RUST_LOG` to adjust.

use std::io::{self, BufRead, Write};

use rochess::engine::Engine;
use rochess::protocol::parser::{parse_command, Command};

/// Runs the main protocol loop, reading commands from stdin and writing
/// responses to stdout.
fn main() -> io::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(io::stderr)
        .init();

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());
    let mut engine = Engine::new();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        let cmd = match parse_command(&line) {
            Some(c) => c,
            None => continue,
        };

        match cmd {
            Command::IsReady => engine.handle_isready(&mut out)?,
            Command::SetOption { name, value } => {
                if let Err(e) = engine.set_option(&name, value.as_deref()) {
                    tracing::warn!("{}", e);
                }
            }
            Command::Config { json } => {
                if let Err(e) = engine.set_config(&json) {
                    tracing::warn!("{}", e);
                }
            }
            Command::NewGame => engine.new_game(),
            Command::Position { json } => {
                if let Err(e) = engine.set_position(&json) {
                    tracing::warn!("{}", e);
                    writeln!(out, "error {}", e)?;
                    out.flush()?;
                }
            }
            Command::Turn(params) => engine.handle_turn(params.count, &mut out)?,
            Command::Show => engine.handle_show(&mut out)?,
            Command::Quit => break,
        }
    }
    out.flush()
}
