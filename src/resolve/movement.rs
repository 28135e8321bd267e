//! Move phase.
//!
//! Every active, living unit steps one row toward the opponent. A unit whose
//! destination is occupied holds its position.

use crate::board::{Board, BoardError};
use crate::observe::TurnObserver;

use super::report::TurnReport;

pub fn run<O: TurnObserver + ?Sized>(
    board: &mut Board,
    observer: &mut O,
    report: &mut TurnReport,
) -> Result<(), BoardError> {
    for id in board.unit_ids() {
        let unit = board.unit(id).ok_or(BoardError::UnknownUnit(id))?;
        if !unit.active || !unit.alive {
            continue;
        }
        let from = unit.coords;
        let to = board.forward_cell(id)?;

        if let Some(occupant) = board.grid.get(to) {
            if let Some(unit) = board.unit_mut(id) {
                unit.set_prev_coords(from);
            }
            observer.move_blocked(id, from, to, occupant);
            continue;
        }

        board.move_unit(id, to)?;
        let moved = board.unit(id).ok_or(BoardError::UnknownUnit(id))?;
        report.updated_units.push(moved.clone());
        observer.board_changed(board);
    }
    Ok(())
}
