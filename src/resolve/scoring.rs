//! Scoring phase.
//!
//! A unit standing on either scoring row is removed and its owner's opponent
//! loses a fixed amount of HP. Afterwards every player is checked, in board
//! order, for elimination.

use crate::board::{Board, BoardError};
use crate::config::TurnConfig;

use super::prune::remove_dead;
use super::report::TurnReport;

/// Runs the scoring phase. Returns the name of the first eliminated player
/// in board order, if any.
pub fn run(
    board: &mut Board,
    config: &TurnConfig,
    report: &mut TurnReport,
) -> Result<Option<String>, BoardError> {
    for id in board.unit_ids() {
        let unit = board.unit(id).ok_or(BoardError::UnknownUnit(id))?;
        if !unit.alive || !config.is_score_row(unit.coords.y) {
            continue;
        }

        let opponent_name = board
            .player(&unit.owner)
            .map(|p| p.opponent.clone())
            .ok_or_else(|| {
                BoardError::InvalidBoardState(format!(
                    "scoring unit {} is owned by unknown player '{}'",
                    unit.id, unit.owner
                ))
            })?;

        board.kill_unit(id)?;
        let opponent = board.player_mut(&opponent_name).ok_or_else(|| {
            BoardError::InvalidBoardState(format!("opponent '{}' is not on the board", opponent_name))
        })?;
        // Negative damage would heal.
        opponent.hp = opponent.hp.saturating_sub(config.score_damage.max(0));
        report.updated_players.push(opponent.snapshot());

        let scored = board.unit(id).ok_or(BoardError::UnknownUnit(id))?;
        report.updated_units.push(scored.clone());
    }

    board.units = remove_dead(std::mem::take(&mut board.units));

    Ok(board
        .players
        .iter()
        .find(|p| p.is_eliminated())
        .map(|p| p.name.clone()))
}
