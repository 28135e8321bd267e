//! Board state for one match.
//!
//! The board owns the grid, the unit arena, and the player list. Units are
//! stored once in `units`; grid cells refer to them by [`UnitId`]. Every
//! mutation that changes where a unit stands goes through a method here so
//! the grid and the arena stay in step.

use serde::{Deserialize, Serialize};

use super::grid::{Coord, Grid};
use super::player::{Player, Side};
use super::unit::{AttackRoll, SkillSet, Unit, UnitId, UnitKind};

/// Errors raised when the board is malformed or an operation would break it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error("invalid board state: {0}")]
    InvalidBoardState(String),

    #[error("coordinate {at} is outside the {width}x{height} grid")]
    OutOfBounds {
        at: Coord,
        width: usize,
        height: usize,
    },

    #[error("cell {at} is already occupied by unit {occupant}")]
    CellOccupied { at: Coord, occupant: UnitId },

    #[error("unknown player '{0}'")]
    UnknownPlayer(String),

    #[error("unknown unit {0}")]
    UnknownUnit(UnitId),

    #[error("cell {at} references unit {id} which is not on the board")]
    DanglingCell { at: Coord, id: UnitId },

    #[error("unit '{0}' cannot deal damage")]
    ZeroDamageUnit(String),

    #[error("duel between {attacker} and {defender} did not finish within {rounds} rounds")]
    DuelDidNotTerminate {
        attacker: UnitId,
        defender: UnitId,
        rounds: u32,
    },
}

/// Largest grid `from_setup` accepts. Keeps every coordinate within `i32`.
pub const MAX_GRID_CELLS: usize = 1 << 20;

fn default_true() -> bool {
    true
}

/// Description of a unit to place on the board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSetup {
    pub name: String,
    pub kind: UnitKind,
    pub owner: String,
    pub at: Coord,
    pub hp: i32,
    pub initiative: i32,
    #[serde(default = "default_true")]
    pub active: bool,
    /// Overrides the kind's default attack profile.
    #[serde(default)]
    pub attack: Option<AttackRoll>,
    #[serde(default)]
    pub skills: Option<SkillSet>,
}

impl UnitSetup {
    pub fn new(
        name: &str,
        kind: UnitKind,
        owner: &str,
        at: Coord,
        hp: i32,
        initiative: i32,
    ) -> Self {
        UnitSetup {
            name: name.to_string(),
            kind,
            owner: owner.to_string(),
            at,
            hp,
            initiative,
            active: true,
            attack: None,
            skills: None,
        }
    }

    pub fn with_attack(mut self, attack: AttackRoll) -> Self {
        self.attack = Some(attack);
        self
    }

    pub fn with_skills(mut self, skills: SkillSet) -> Self {
        self.skills = Some(skills);
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

/// Description of a player. The opponent is inferred when the board is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSetup {
    pub name: String,
    pub hp: i32,
    #[serde(default)]
    pub mp: i32,
    pub side: Side,
}

/// Serializable description of a whole board, as sent over the protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSetup {
    pub width: usize,
    pub height: usize,
    pub players: Vec<PlayerSetup>,
    #[serde(default)]
    pub units: Vec<UnitSetup>,
}

/// Complete mutable state of one match.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) grid: Grid,
    /// Unit arena. Order is the acting order once a turn has sorted it.
    pub(crate) units: Vec<Unit>,
    /// Players in a fixed order; elimination checks walk this order.
    pub(crate) players: Vec<Player>,
    next_id: u32,
}

impl Board {
    /// Creates an empty board with no players or units.
    pub fn new(width: usize, height: usize) -> Self {
        Board {
            grid: Grid::new(width, height),
            units: Vec::new(),
            players: Vec::new(),
            next_id: 0,
        }
    }

    /// Builds a two-player board from a setup description.
    ///
    /// The two players must sit on opposite sides; each becomes the other's
    /// opponent. Units are placed in listing order, which fixes their ids.
    pub fn from_setup(setup: &BoardSetup) -> Result<Board, BoardError> {
        if setup.width == 0 || setup.height == 0 {
            return Err(BoardError::InvalidBoardState(format!(
                "grid must be non-empty, got {}x{}",
                setup.width, setup.height
            )));
        }
        let cells = setup.width.checked_mul(setup.height);
        if !cells.is_some_and(|n| n <= MAX_GRID_CELLS) {
            return Err(BoardError::InvalidBoardState(format!(
                "grid {}x{} exceeds the {} cell limit",
                setup.width, setup.height, MAX_GRID_CELLS
            )));
        }
        let [a, b] = setup.players.as_slice() else {
            return Err(BoardError::InvalidBoardState(format!(
                "expected 2 players, got {}",
                setup.players.len()
            )));
        };
        if a.side == b.side {
            return Err(BoardError::InvalidBoardState(format!(
                "players '{}' and '{}' share a side",
                a.name, b.name
            )));
        }

        let mut board = Board::new(setup.width, setup.height);
        for (p, opp) in [(a, b), (b, a)] {
            board.add_player(Player {
                name: p.name.clone(),
                hp: p.hp,
                mp: p.mp,
                side: p.side,
                opponent: opp.name.clone(),
            })?;
        }
        for unit in &setup.units {
            board.place_unit(unit.clone())?;
        }
        Ok(board)
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn players(&self) -> &[Player] {
        &self.players
    }

    /// Adds a player. Names must be unique.
    pub fn add_player(&mut self, player: Player) -> Result<(), BoardError> {
        if self.player(&player.name).is_some() {
            return Err(BoardError::InvalidBoardState(format!(
                "duplicate player '{}'",
                player.name
            )));
        }
        self.players.push(player);
        Ok(())
    }

    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    pub fn player_mut(&mut self, name: &str) -> Option<&mut Player> {
        self.players.iter_mut().find(|p| p.name == name)
    }

    /// Places a new unit and returns its id.
    pub fn place_unit(&mut self, setup: UnitSetup) -> Result<UnitId, BoardError> {
        if !self.grid.contains(setup.at) {
            return Err(self.out_of_bounds(setup.at));
        }
        if let Some(occupant) = self.grid.get(setup.at) {
            return Err(BoardError::CellOccupied {
                at: setup.at,
                occupant,
            });
        }
        if self.player(&setup.owner).is_none() {
            return Err(BoardError::UnknownPlayer(setup.owner));
        }
        if setup.hp <= 0 {
            return Err(BoardError::InvalidBoardState(format!(
                "unit '{}' starts with {} hp",
                setup.name, setup.hp
            )));
        }
        let attack = setup.attack.unwrap_or_else(|| setup.kind.default_attack());
        if attack.max_damage() < 1 {
            return Err(BoardError::ZeroDamageUnit(setup.name));
        }

        let id = UnitId(self.next_id);
        self.next_id += 1;
        self.grid.set(setup.at, Some(id));
        self.units.push(Unit {
            id,
            name: setup.name,
            kind: setup.kind,
            owner: setup.owner,
            coords: setup.at,
            prev_coords: setup.at,
            hp: setup.hp,
            initiative: setup.initiative,
            alive: true,
            active: setup.active,
            attack,
            skills: setup.skills,
        });
        Ok(id)
    }

    /// Returns the position of a unit in the arena.
    pub fn unit_index(&self, id: UnitId) -> Result<usize, BoardError> {
        self.units
            .iter()
            .position(|u| u.id == id)
            .ok_or(BoardError::UnknownUnit(id))
    }

    pub fn unit(&self, id: UnitId) -> Option<&Unit> {
        self.units.iter().find(|u| u.id == id)
    }

    pub fn unit_mut(&mut self, id: UnitId) -> Option<&mut Unit> {
        self.units.iter_mut().find(|u| u.id == id)
    }

    /// Returns the unit standing on a cell.
    ///
    /// A cell naming a unit that is missing from the arena is an invariant
    /// violation and is reported as [`BoardError::DanglingCell`].
    pub fn unit_at(&self, at: Coord) -> Result<Option<&Unit>, BoardError> {
        match self.grid.get(at) {
            None => Ok(None),
            Some(id) => self
                .unit(id)
                .map(Some)
                .ok_or(BoardError::DanglingCell { at, id }),
        }
    }

    /// Ids of all units in current arena order.
    pub fn unit_ids(&self) -> Vec<UnitId> {
        self.units.iter().map(|u| u.id).collect()
    }

    /// Returns the side of the player owning a unit.
    pub fn side_of(&self, unit: &Unit) -> Result<Side, BoardError> {
        self.player(&unit.owner)
            .map(|p| p.side)
            .ok_or_else(|| {
                BoardError::InvalidBoardState(format!(
                    "unit {} ('{}') is owned by unknown player '{}'",
                    unit.id, unit.name, unit.owner
                ))
            })
    }

    /// Returns the cell one row ahead of a unit, toward the opponent.
    ///
    /// Fails with [`BoardError::InvalidBoardState`] when the owner is unknown
    /// or the cell lies off the grid.
    pub fn forward_cell(&self, id: UnitId) -> Result<Coord, BoardError> {
        let unit = self.unit(id).ok_or(BoardError::UnknownUnit(id))?;
        let side = self.side_of(unit)?;
        let ahead = unit.coords.step_rows(side.forward());
        if !self.grid.contains(ahead) {
            return Err(BoardError::InvalidBoardState(format!(
                "unit {} ('{}') at {} has no cell ahead on a {}x{} grid",
                unit.id,
                unit.name,
                unit.coords,
                self.grid.width(),
                self.grid.height()
            )));
        }
        Ok(ahead)
    }

    /// Marks a unit dead and clears its cell. The unit stays in the arena
    /// until the end-of-phase prune.
    pub fn kill_unit(&mut self, id: UnitId) -> Result<(), BoardError> {
        let unit = self.unit_mut(id).ok_or(BoardError::UnknownUnit(id))?;
        unit.alive = false;
        let at = unit.coords;
        if self.grid.get(at) == Some(id) {
            self.grid.clear(at);
        }
        Ok(())
    }

    /// Moves a live unit to an empty cell, recording its previous position.
    pub fn move_unit(&mut self, id: UnitId, to: Coord) -> Result<(), BoardError> {
        if !self.grid.contains(to) {
            return Err(self.out_of_bounds(to));
        }
        if let Some(occupant) = self.grid.get(to) {
            return Err(BoardError::CellOccupied { at: to, occupant });
        }
        let unit = self.unit_mut(id).ok_or(BoardError::UnknownUnit(id))?;
        let from = unit.coords;
        unit.set_prev_coords(from);
        unit.set_coords(to);
        self.grid.clear(from);
        self.grid.set(to, Some(id));
        Ok(())
    }

    /// Verifies that the grid and the unit arena agree.
    ///
    /// Every occupied cell must name a live unit standing on that cell, and
    /// every live unit must occupy its own cell.
    pub fn check_consistency(&self) -> Result<(), BoardError> {
        for (at, id) in self.grid.occupied() {
            let unit = self.unit(id).ok_or(BoardError::DanglingCell { at, id })?;
            if !unit.alive || unit.coords != at {
                return Err(BoardError::InvalidBoardState(format!(
                    "cell {} names unit {} which is {} at {}",
                    at,
                    id,
                    if unit.alive { "alive" } else { "dead" },
                    unit.coords
                )));
            }
        }
        for unit in self.units.iter().filter(|u| u.alive) {
            if self.grid.get(unit.coords) != Some(unit.id) {
                return Err(BoardError::InvalidBoardState(format!(
                    "unit {} ('{}') is not on its cell {}",
                    unit.id, unit.name, unit.coords
                )));
            }
        }
        Ok(())
    }

    fn out_of_bounds(&self, at: Coord) -> BoardError {
        BoardError::OutOfBounds {
            at,
            width: self.grid.width(),
            height: self.grid.height(),
        }
    }
}
