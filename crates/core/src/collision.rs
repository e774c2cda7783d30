//! Collision and lock predicates
//!
//! Both predicates are pure functions over a field and a piece. Positions outside
//! the field (any side) count as obstructed: a shape cell there collides, and an
//! exposed bottom cell above such a position rests on it.

use crate::field::Field;
use crate::game_state::Piece;
use crate::types::EMPTY;

/// True if any occupied cell of `piece` lies outside `field` or on a non-EMPTY cell
pub fn is_collision(field: &Field, piece: &Piece) -> bool {
    piece
        .cells()
        .any(|(x, y, _)| field.get(x, y) != Some(EMPTY))
}

/// True if the piece rests on something and cannot fall further.
///
/// Only exposed bottom cells are checked: a shape cell whose neighbour below
/// (inside the shape) is occupied is supported by its own piece. The piece is
/// locked as soon as one exposed bottom cell sits on the floor or on a non-EMPTY
/// field cell.
pub fn is_locked(field: &Field, piece: &Piece) -> bool {
    let shape = &piece.shape;
    shape.occupied().any(|(row, col, _)| {
        if shape.is_occupied(row + 1, col) {
            return false;
        }
        let x = piece.x + col as i32;
        let below = piece.y + row as i32 + 1;
        field.get(x, below) != Some(EMPTY)
    })
}
