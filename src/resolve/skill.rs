//! Skill phase.
//!
//! Hands every unit with queued skills to the skill engine, in acting order.
//! Liveness is not checked: a unit killed earlier in this phase still casts.

use crate::board::{Board, BoardError};
use crate::observe::SkillEngine;

use super::report::TurnReport;

pub fn run<S: SkillEngine + ?Sized>(
    board: &mut Board,
    skills: &mut S,
    report: &mut TurnReport,
) -> Result<(), BoardError> {
    for id in board.unit_ids() {
        let unit = board.unit(id).ok_or(BoardError::UnknownUnit(id))?;
        if unit.has_skills() {
            skills.apply_skills(id, board, report)?;
        }
    }
    Ok(())
}
