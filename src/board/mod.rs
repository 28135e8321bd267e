//! Board representation and match-state types.
//!
//! Contains the grid, units, players, and the board that owns them for a
//! single match.

pub mod grid;
pub mod player;
pub mod state;
pub mod unit;

pub use grid::{Coord, Grid};
pub use player::{Player, PlayerSnapshot, Side};
pub use state::{Board, BoardError, BoardSetup, PlayerSetup, UnitSetup};
pub use unit::{AttackRoll, Skill, SkillSet, Unit, UnitId, UnitKind};
