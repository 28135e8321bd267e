//! Line protocol handling.
//!
//! Clients drive the engine with one command per line: load a board as JSON,
//! tweak configuration, resolve turns, and read back JSON turn reports.

pub mod parser;

pub use parser::{parse_command, Command, TurnParams};
