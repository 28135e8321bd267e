//! Dead-unit removal.

use crate::board::Unit;

/// Returns the living units, in their original relative order.
pub fn remove_dead(units: Vec<Unit>) -> Vec<Unit> {
    units.into_iter().filter(|u| u.alive).collect()
}
