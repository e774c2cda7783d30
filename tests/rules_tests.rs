//! Rules tests: field operations, collision/lock predicates and the reducer

use blockfall::core::{catalog, is_collision, is_locked, Field, FieldConfig, GameState, Piece, Shape};
use blockfall::types::{Action, EMPTY};

fn t_shape() -> Shape {
    Shape::from_rows(&[&[0, 3, 0], &[3, 3, 3], &[0, 0, 0]]).unwrap()
}

#[test]
fn test_collision_iff_out_of_range_or_occupied() {
    let field = Field::new(10, 20);
    let shape = t_shape();

    assert!(!is_collision(&field, &Piece::new(0, 0, shape)));
    // Column 10 is past the right edge.
    assert!(is_collision(&field, &Piece::new(8, 0, shape)));
    assert!(is_collision(&field, &Piece::new(-1, 0, shape)));
    // Row 20 is below the floor.
    assert!(is_collision(&field, &Piece::new(0, 19, shape)));

    let mut blocked = field.clone();
    blocked.set(0, 5, 6);
    assert!(is_collision(&blocked, &Piece::new(0, 4, shape)));
    // Only the empty corner of the matrix covers the occupied cell.
    assert!(!is_collision(&blocked, &Piece::new(0, 5, shape)));
}

#[test]
fn test_lock_on_floor_and_stack() {
    let field = Field::new(10, 20);
    let shape = t_shape();

    assert!(is_locked(&field, &Piece::new(3, 18, shape)));
    assert!(!is_locked(&field, &Piece::new(3, 17, shape)));

    let mut stack = field.clone();
    stack.set(3, 10, 1);
    assert!(is_locked(&stack, &Piece::new(3, 8, shape)));
    assert!(!is_locked(&stack, &Piece::new(3, 7, shape)));
}

#[test]
fn test_fresh_spawns_are_free() {
    let config = FieldConfig::default();
    let field = Field::new(config.width, config.height);
    for &shape in catalog() {
        let piece = Piece::new(config.spawn_x, config.spawn_y, shape);
        assert!(!is_collision(&field, &piece), "{shape:?}");
        assert!(!is_locked(&field, &piece), "{shape:?}");
    }
    for seed in 0..50 {
        let state = GameState::new(config, seed);
        assert!(!state.is_collision());
        assert!(!state.is_locked());
    }
}

#[test]
fn test_rejected_rotation_is_noop() {
    let mut field = Field::new(10, 20);
    // The rotated T needs (1, 12); the unrotated one does not.
    field.set(1, 12, 2);
    let state = GameState::new(FieldConfig::default(), 3)
        .with_field(field)
        .with_piece(Piece::new(0, 10, t_shape()))
        .reduce(&Action::Start);

    assert_eq!(state.reduce(&Action::Rotate), state);

    let free = state.clone().with_field(Field::new(10, 20));
    let rotated = free.reduce(&Action::Rotate);
    assert_eq!(rotated.piece().shape, t_shape().rotated());
}

#[test]
fn test_second_rotation_rejected_after_first_accepted() {
    let i = Shape::from_rows(&[&[0, 0, 0, 0], &[1, 1, 1, 1], &[0, 0, 0, 0], &[0, 0, 0, 0]])
        .unwrap();
    let once = i.rotated();
    let twice = once.rotated();
    // Vertical in column 2, then horizontal in row 2.
    assert!((0..4).all(|r| once.is_occupied(r, 2)));
    assert!((0..4).all(|c| twice.is_occupied(2, c)));

    // (0, 7) is only covered by the half-turn orientation.
    let mut field = Field::new(10, 20);
    field.set(0, 7, 6);
    let state = GameState::new(FieldConfig::default(), 3)
        .with_field(field)
        .with_piece(Piece::new(0, 5, i))
        .reduce(&Action::Start);

    let first = state.reduce(&Action::Rotate);
    assert_eq!(first.piece().shape, once);

    let second = first.reduce(&Action::Rotate);
    assert_eq!(second, first);
    assert_eq!(second.piece().shape, once);
}

#[test]
fn test_remove_row_shifts_rows_above() {
    let mut rows = vec![vec![EMPTY; 3]; 4];
    rows[0][0] = 1;
    rows[1][1] = 2;
    rows[2] = vec![3, 3, 3];
    rows[3][2] = 4;
    let mut field = Field::from_rows(rows).unwrap();

    field.remove_rows(&[2]);

    assert_eq!(field.height(), 4);
    assert_eq!(field.row(0).unwrap(), &[EMPTY, EMPTY, EMPTY]);
    assert_eq!(field.row(1).unwrap(), &[1, EMPTY, EMPTY]);
    assert_eq!(field.row(2).unwrap(), &[EMPTY, 2, EMPTY]);
    assert_eq!(field.row(3).unwrap(), &[EMPTY, EMPTY, 4]);
}

#[test]
fn test_remove_two_adjacent_rows() {
    let mut field = Field::new(4, 5);
    for x in 0..4 {
        field.set(x, 3, 1);
        field.set(x, 4, 1);
    }
    field.set(0, 2, 7);

    let rows = field.removable_rows();
    assert_eq!(rows, vec![3, 4]);
    field.remove_rows(&rows);

    assert_eq!(field.get(0, 4), Some(7));
    assert_eq!(field.cells().iter().filter(|&&c| c != EMPTY).count(), 1);
}

#[test]
fn test_next_merges_then_spawns_at_offset() {
    let config = FieldConfig::default();
    let state = GameState::new(config, 99)
        .with_piece(Piece::new(0, 18, t_shape()))
        .reduce(&Action::Start);

    let next = state.reduce(&Action::Next);
    assert_eq!(next.field().get(1, 18), Some(3));
    assert_eq!(next.field().get(0, 19), Some(3));
    assert_eq!((next.piece().x, next.piece().y), (config.spawn_x, config.spawn_y));
    assert!(!next.is_collision());
    assert!(!next.is_paused());
}

#[test]
fn test_game_over_restarts_paused() {
    let state = GameState::new(FieldConfig::default(), 5)
        .with_piece(Piece::new(0, 18, t_shape()))
        .reduce(&Action::Start)
        .reduce(&Action::Next);
    assert!(!state.field().is_clear());

    let reset = state.reduce(&Action::GameOver);
    assert!(reset.is_paused());
    assert!(reset.field().is_clear());
    assert_eq!(reset.piece().y, 0);
}
