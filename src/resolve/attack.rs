//! Attack phase.
//!
//! Each unit, in acting order, looks at the cell directly ahead of it. An
//! enemy there is fought in a duel: attacker strikes, defender strikes back,
//! and so on until one of them dies.

use rand::Rng;

use crate::board::{Board, BoardError};
use crate::config::TurnConfig;

use super::prune::remove_dead;
use super::report::{CombatEvent, TurnReport};

/// Runs the attack phase and prunes the dead.
///
/// With `halt_attack_on_dead_unit` set, the first dead unit met in acting
/// order ends the scan; later units do not attack this turn.
pub fn run<R: Rng + ?Sized>(
    board: &mut Board,
    config: &TurnConfig,
    rng: &mut R,
    report: &mut TurnReport,
) -> Result<(), BoardError> {
    for id in board.unit_ids() {
        let attacker = board.unit_index(id)?;
        if !board.units[attacker].alive {
            if config.halt_attack_on_dead_unit {
                break;
            }
            continue;
        }

        let ahead = board.forward_cell(id)?;
        let Some(defender_id) = board.grid.get(ahead) else {
            continue;
        };
        let defender = board
            .unit_index(defender_id)
            .map_err(|_| BoardError::DanglingCell {
                at: ahead,
                id: defender_id,
            })?;
        if !board.units[defender].alive || board.units[defender].owner == board.units[attacker].owner {
            continue;
        }

        duel(board, attacker, defender, config.max_duel_rounds, rng, report)?;
    }

    board.units = remove_dead(std::mem::take(&mut board.units));
    Ok(())
}

/// Alternates strikes until one side dies.
fn duel<R: Rng + ?Sized>(
    board: &mut Board,
    attacker: usize,
    defender: usize,
    max_rounds: u32,
    rng: &mut R,
    report: &mut TurnReport,
) -> Result<(), BoardError> {
    for _ in 0..max_rounds {
        if strike(board, attacker, defender, rng, report) {
            return Ok(());
        }
        if strike(board, defender, attacker, rng, report) {
            return Ok(());
        }
    }
    Err(BoardError::DuelDidNotTerminate {
        attacker: board.units[attacker].id,
        defender: board.units[defender].id,
        rounds: max_rounds,
    })
}

/// One swing from `from` at `to`. Returns true if the victim died.
fn strike<R: Rng + ?Sized>(
    board: &mut Board,
    from: usize,
    to: usize,
    rng: &mut R,
    report: &mut TurnReport,
) -> bool {
    let damage = board.units[from].perform_attack(rng);
    let victim = &mut board.units[to];
    let dead = victim.take_damage(damage);
    report.combat_log.push(CombatEvent::strike(victim.coords, damage));
    if !dead {
        return false;
    }

    victim.alive = false;
    let at = victim.coords;
    report.updated_units.push(victim.clone());
    board.grid.clear(at);
    true
}
