//! Plain-text board rendering.
//!
//! One line per row, one character per cell. Empty cells are `.`; units show
//! their kind symbol, uppercase for the top player and lowercase for the
//! bottom player.

use crate::board::{Board, Coord, Side};

/// Renders the board as text, top row first.
pub fn render_board(board: &Board) -> String {
    let grid = board.grid();
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            out.push(cell_char(board, Coord::new(x, y)));
        }
        out.push('\n');
    }
    out
}

fn cell_char(board: &Board, at: Coord) -> char {
    match board.unit_at(at) {
        Ok(Some(unit)) => {
            let c = unit.kind.symbol();
            match board.side_of(unit) {
                Ok(Side::Top) => c.to_ascii_uppercase(),
                Ok(Side::Bottom) => c,
                Err(_) => '?',
            }
        }
        Ok(None) => '.',
        Err(_) => '!',
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{BoardSetup, PlayerSetup, UnitKind, UnitSetup};

    #[test]
    fn renders_units_by_side() {
        let setup = BoardSetup {
            width: 3,
            height: 3,
            players: vec![
                PlayerSetup {
                    name: "alice".to_string(),
                    hp: 10,
                    mp: 0,
                    side: Side::Top,
                },
                PlayerSetup {
                    name: "bob".to_string(),
                    hp: 10,
                    mp: 0,
                    side: Side::Bottom,
                },
            ],
            units: vec![
                UnitSetup::new("k", UnitKind::Knight, "alice", Coord::new(0, 0), 5, 1),
                UnitSetup::new("a", UnitKind::Archer, "bob", Coord::new(2, 2), 5, 1),
            ],
        };
        let board = Board::from_setup(&setup).unwrap();
        assert_eq!(render_board(&board), "K..\n...\n..a\n");
    }

    #[test]
    fn empty_board_is_dots() {
        let board = Board::new(2, 1);
        assert_eq!(render_board(&board), "..\n");
    }
}
