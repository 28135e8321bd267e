//! Acting order.

use crate::board::Unit;

/// Sorts units into acting order: highest initiative first, equal initiative
/// broken by ascending id (placement order).
///
/// The result does not depend on the incoming order.
pub fn sort_by_initiative(units: &mut [Unit]) {
    units.sort_by(|a, b| b.initiative.cmp(&a.initiative).then(a.id.cmp(&b.id)));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{AttackRoll, Coord, Unit, UnitId, UnitKind};

    fn unit(id: u32, initiative: i32) -> Unit {
        Unit {
            id: UnitId(id),
            name: format!("u{}", id),
            kind: UnitKind::Footman,
            owner: "alice".to_string(),
            coords: Coord::new(id as i32, 0),
            prev_coords: Coord::new(id as i32, 0),
            hp: 5,
            initiative,
            alive: true,
            active: true,
            attack: AttackRoll::Fixed(1),
            skills: None,
        }
    }

    fn ids(units: &[Unit]) -> Vec<u32> {
        units.iter().map(|u| u.id.0).collect()
    }

    #[test]
    fn higher_initiative_first() {
        let mut units = vec![unit(0, 1), unit(1, 9), unit(2, 5)];
        sort_by_initiative(&mut units);
        assert_eq!(ids(&units), vec![1, 2, 0]);
    }

    #[test]
    fn ties_break_by_id_regardless_of_input_order() {
        let mut a = vec![unit(3, 4), unit(1, 4), unit(2, 7), unit(0, 4)];
        let mut b = vec![unit(0, 4), unit(2, 7), unit(3, 4), unit(1, 4)];
        sort_by_initiative(&mut a);
        sort_by_initiative(&mut b);
        assert_eq!(ids(&a), vec![2, 0, 1, 3]);
        assert_eq!(ids(&a), ids(&b));
    }
}
