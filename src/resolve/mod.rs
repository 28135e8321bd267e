//! Turn resolution.
//!
//! Applies one turn to a board: scoring, skills, melee, then movement, all
//! in initiative order. The orchestrator lives in [`turn`]; each phase has
//! its own module.

pub mod attack;
pub mod initiative;
pub mod movement;
pub mod phase;
pub mod prune;
pub mod report;
pub mod scoring;
pub mod skill;
pub mod turn;

pub use initiative::sort_by_initiative;
pub use phase::TurnPhase;
pub use prune::remove_dead;
pub use report::{CombatEvent, EventKind, TurnReport};
pub use turn::{match_resolvers, resolve_matches, TurnResolver};
