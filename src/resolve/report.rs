//! Turn output: the diff broadcast to clients after a turn.

use serde::{Deserialize, Serialize};

use crate::board::{Coord, PlayerSnapshot, Unit};

/// What a combat event represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    /// A strike that dealt damage.
    Hit,
    /// A strike that rolled zero.
    Miss,
    /// Healing applied by a skill.
    Heal,
}

/// One recorded damage or effect application, used for client animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatEvent {
    pub x: i32,
    pub y: i32,
    /// Negative for damage, positive for healing.
    pub value: i32,
    pub kind: EventKind,
}

impl CombatEvent {
    /// A melee strike of `damage` landing on `at`.
    pub fn strike(at: Coord, damage: i32) -> Self {
        CombatEvent {
            x: at.x,
            y: at.y,
            value: -damage,
            kind: if damage > 0 { EventKind::Hit } else { EventKind::Miss },
        }
    }

    /// Healing of `amount` applied to `at`.
    pub fn heal(at: Coord, amount: i32) -> Self {
        CombatEvent {
            x: at.x,
            y: at.y,
            value: amount,
            kind: EventKind::Heal,
        }
    }

    pub fn at(&self) -> Coord {
        Coord::new(self.x, self.y)
    }
}

/// Everything a turn changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnReport {
    /// Snapshots of units that died or moved, in the order it happened.
    pub updated_units: Vec<Unit>,
    /// Snapshots of players whose HP changed.
    pub updated_players: Vec<PlayerSnapshot>,
    pub combat_log: Vec<CombatEvent>,
    /// Set when a player was eliminated; the match is over.
    pub loser: Option<String>,
}

impl TurnReport {
    pub fn is_terminal(&self) -> bool {
        self.loser.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strike_is_negative_damage() {
        let ev = CombatEvent::strike(Coord::new(2, 3), 4);
        assert_eq!(ev.value, -4);
        assert_eq!(ev.kind, EventKind::Hit);
        assert_eq!(ev.at(), Coord::new(2, 3));
    }

    #[test]
    fn zero_strike_is_a_miss() {
        let ev = CombatEvent::strike(Coord::new(0, 0), 0);
        assert_eq!(ev.value, 0);
        assert_eq!(ev.kind, EventKind::Miss);
    }

    #[test]
    fn heal_is_positive() {
        let ev = CombatEvent::heal(Coord::new(1, 1), 3);
        assert_eq!(ev.value, 3);
        assert_eq!(ev.kind, EventKind::Heal);
    }

    #[test]
    fn report_serializes_loser() {
        let report = TurnReport {
            loser: Some("bob".to_string()),
            ..TurnReport::default()
        };
        assert!(report.is_terminal());
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"loser\":\"bob\""));
    }
}
