//! ro-chess turn engine library.
//!
//! Exposes the board model, turn resolution, collaborator seams, and the
//! line protocol used by the binary entry point.

pub mod board;
pub mod config;
pub mod engine;
pub mod observe;
pub mod protocol;
pub mod render;
pub mod resolve;
pub mod selfplay;
