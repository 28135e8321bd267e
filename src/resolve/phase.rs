//! Phase sequencing.
//!
//! A turn runs four phases in a fixed order. Scoring may end the match, in
//! which case the remaining phases never run.

use std::fmt;

/// A phase within a turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TurnPhase {
    Scoring,
    Skill,
    Attack,
    Move,
}

impl TurnPhase {
    /// All phases in execution order.
    pub const SEQUENCE: [TurnPhase; 4] = [
        TurnPhase::Scoring,
        TurnPhase::Skill,
        TurnPhase::Attack,
        TurnPhase::Move,
    ];

    /// Returns the phase that follows this one, or `None` after movement.
    pub const fn next(self) -> Option<TurnPhase> {
        match self {
            TurnPhase::Scoring => Some(TurnPhase::Skill),
            TurnPhase::Skill => Some(TurnPhase::Attack),
            TurnPhase::Attack => Some(TurnPhase::Move),
            TurnPhase::Move => None,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            TurnPhase::Scoring => "scoring",
            TurnPhase::Skill => "skill",
            TurnPhase::Attack => "attack",
            TurnPhase::Move => "move",
        }
    }
}

impl fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
