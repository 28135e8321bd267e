//! Players and board sides.

use serde::{Deserialize, Serialize};

/// Which edge of the board a player starts from.
///
/// `Top` units advance toward increasing row index, `Bottom` units toward
/// decreasing row index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Top,
    Bottom,
}

impl Side {
    /// Row delta of one forward step.
    pub const fn forward(self) -> i32 {
        match self {
            Side::Top => 1,
            Side::Bottom => -1,
        }
    }

    pub const fn opposite(self) -> Side {
        match self {
            Side::Top => Side::Bottom,
            Side::Bottom => Side::Top,
        }
    }

    /// Parses a side from its lowercase name.
    pub fn from_name(s: &str) -> Option<Side> {
        match s.to_lowercase().as_str() {
            "top" => Some(Side::Top),
            "bottom" => Some(Side::Bottom),
            _ => None,
        }
    }
}

/// A participant in the match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub name: String,
    pub hp: i32,
    /// Skill resource pool. Not touched by turn resolution.
    pub mp: i32,
    pub side: Side,
    /// Name of the opposing player.
    pub opponent: String,
}

impl Player {
    /// Captures the fields broadcast in a turn diff.
    pub fn snapshot(&self) -> PlayerSnapshot {
        PlayerSnapshot {
            name: self.name.clone(),
            hp: self.hp,
            mp: self.mp,
        }
    }

    pub fn is_eliminated(&self) -> bool {
        self.hp <= 0
    }
}

/// The per-player record included in a turn report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub name: String,
    pub hp: i32,
    pub mp: i32,
}
