//! Unit ("figure") types.
//!
//! A unit is a player-owned combatant occupying one grid cell. Unit variants
//! share a single struct; behavioral differences live in [`UnitKind`] and
//! the unit's [`AttackRoll`].

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};

use super::grid::Coord;

/// Arena identifier for a unit. Grid cells hold these instead of references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct UnitId(pub u32);

impl fmt::Display for UnitId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The closed set of unit variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitKind {
    Footman,
    Archer,
    Knight,
}

impl UnitKind {
    /// Returns the single-character symbol used by the board renderer.
    pub const fn symbol(self) -> char {
        match self {
            UnitKind::Footman => 'f',
            UnitKind::Archer => 'a',
            UnitKind::Knight => 'k',
        }
    }

    /// Parses a unit kind from its renderer symbol.
    pub fn from_symbol(c: char) -> Option<UnitKind> {
        match c {
            'f' => Some(UnitKind::Footman),
            'a' => Some(UnitKind::Archer),
            'k' => Some(UnitKind::Knight),
            _ => None,
        }
    }

    /// Attack profile used when a unit does not override it.
    pub const fn default_attack(self) -> AttackRoll {
        match self {
            UnitKind::Footman => AttackRoll::Range { min: 2, max: 4 },
            UnitKind::Archer => AttackRoll::Range { min: 1, max: 5 },
            UnitKind::Knight => AttackRoll::Range { min: 3, max: 6 },
        }
    }
}

/// How much damage a unit deals per swing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttackRoll {
    Fixed(i32),
    Range { min: i32, max: i32 },
}

impl AttackRoll {
    /// Rolls one swing. Never negative.
    pub fn roll<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        match *self {
            AttackRoll::Fixed(dmg) => dmg.max(0),
            AttackRoll::Range { min, max } => {
                let lo = min.max(0);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }

    /// Largest value `roll` can return.
    pub fn max_damage(&self) -> i32 {
        match *self {
            AttackRoll::Fixed(dmg) => dmg.max(0),
            AttackRoll::Range { min, max } => max.max(min).max(0),
        }
    }
}

/// A single queued skill activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub target: Option<Coord>,
}

/// The skills a unit will cast this turn.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet(pub Vec<Skill>);

impl SkillSet {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Skill> {
        self.0.iter()
    }
}

/// A combatant on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    pub id: UnitId,
    pub name: String,
    pub kind: UnitKind,
    /// Name of the owning player.
    pub owner: String,
    pub coords: Coord,
    /// Coordinates before this turn's move, for trail animation.
    pub prev_coords: Coord,
    pub hp: i32,
    pub initiative: i32,
    pub alive: bool,
    pub active: bool,
    pub attack: AttackRoll,
    pub skills: Option<SkillSet>,
}

impl Unit {
    /// Rolls this unit's attack.
    pub fn perform_attack<R: Rng + ?Sized>(&self, rng: &mut R) -> i32 {
        self.attack.roll(rng)
    }

    /// Returns true when the unit has at least one queued skill.
    pub fn has_skills(&self) -> bool {
        self.skills.as_ref().is_some_and(|s| !s.is_empty())
    }

    /// Subtracts damage and reports whether the unit is now at or below zero.
    pub fn take_damage(&mut self, dmg: i32) -> bool {
        self.hp = self.hp.saturating_sub(dmg);
        self.hp <= 0
    }

    pub fn set_coords(&mut self, coords: Coord) {
        self.coords = coords;
    }

    pub fn set_prev_coords(&mut self, coords: Coord) {
        self.prev_coords = coords;
    }
}
