//! Collaborator seams for turn resolution.
//!
//! Skill effects, board refresh, and diagnostics live outside the core. The
//! resolver talks to them through the two traits here.

use crate::board::{Board, BoardError, Coord, UnitId};
use crate::render::render_board;
use crate::resolve::{TurnPhase, TurnReport};

/// Applies a unit's queued skills.
///
/// Called once per unit with a non-empty skill set, in acting order. The
/// engine may mutate the board and append to the report; units it kills
/// should go through [`Board::kill_unit`] so their cell is cleared.
pub trait SkillEngine {
    fn apply_skills(
        &mut self,
        caster: UnitId,
        board: &mut Board,
        report: &mut TurnReport,
    ) -> Result<(), BoardError>;
}

/// A skill engine that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoSkills;

impl SkillEngine for NoSkills {
    fn apply_skills(
        &mut self,
        _caster: UnitId,
        _board: &mut Board,
        _report: &mut TurnReport,
    ) -> Result<(), BoardError> {
        Ok(())
    }
}

/// Receives phase boundaries, terminal events, and board refreshes.
///
/// All methods default to no-ops.
pub trait TurnObserver {
    fn phase_started(&mut self, _phase: TurnPhase) {}

    fn phase_finished(&mut self, _phase: TurnPhase, _report: &TurnReport) {}

    fn player_eliminated(&mut self, _name: &str) {}

    /// A unit could not advance because its destination was taken.
    fn move_blocked(&mut self, _unit: UnitId, _from: Coord, _to: Coord, _occupant: UnitId) {}

    /// The board changed shape; called once per successful move.
    fn board_changed(&mut self, _board: &Board) {}
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl TurnObserver for NullObserver {}

/// Observer that forwards to `tracing`.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingObserver {
    /// Emit the rendered board at trace level after every move.
    pub render_on_move: bool,
}

impl TurnObserver for TracingObserver {
    fn phase_started(&mut self, phase: TurnPhase) {
        tracing::debug!(%phase, "phase started");
    }

    fn phase_finished(&mut self, phase: TurnPhase, report: &TurnReport) {
        tracing::debug!(
            %phase,
            updated_units = report.updated_units.len(),
            updated_players = report.updated_players.len(),
            events = report.combat_log.len(),
            "phase finished"
        );
    }

    fn player_eliminated(&mut self, name: &str) {
        tracing::info!(player = name, "player eliminated");
    }

    fn move_blocked(&mut self, unit: UnitId, from: Coord, to: Coord, occupant: UnitId) {
        tracing::warn!(%unit, %from, %to, %occupant, "destination occupied, unit holds");
    }

    fn board_changed(&mut self, board: &Board) {
        if self.render_on_move {
            tracing::trace!("\n{}", render_board(board));
        }
    }
}
