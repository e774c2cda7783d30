//! Game state module - the single unit of truth and its reducer
//!
//! [`GameState::reduce`] is a pure fold step: it borrows the previous state and
//! returns a brand new one, so every snapshot handed out stays valid for replay,
//! diffing and tests. The RNG state travels inside the game state, which makes
//! spawns part of that pure transition as well.

use crate::collision::{is_collision, is_locked};
use crate::field::Field;
use crate::rng::SimpleRng;
use crate::shapes::{catalog, random_shape, Shape};
use crate::types::{Action, FIELD_HEIGHT, FIELD_WIDTH};

/// Active falling piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    /// Column of the shape's top-left corner
    pub x: i32,
    /// Row of the shape's top-left corner
    pub y: i32,
    pub shape: Shape,
}

impl Piece {
    pub fn new(x: i32, y: i32, shape: Shape) -> Self {
        Self { x, y, shape }
    }

    /// Absolute `(x, y, colour)` of every occupied cell
    pub fn cells(&self) -> impl Iterator<Item = (i32, i32, u8)> + '_ {
        self.shape
            .occupied()
            .map(move |(row, col, cell)| (self.x + col as i32, self.y + row as i32, cell))
    }

    /// Same piece moved by (dx, dy)
    pub fn shifted(&self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            shape: self.shape,
        }
    }

    /// Same offset, rotated shape
    pub fn rotated(&self) -> Self {
        Self {
            shape: self.shape.rotated(),
            ..*self
        }
    }
}

/// Field geometry and spawn offset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FieldConfig {
    pub width: usize,
    pub height: usize,
    pub spawn_x: i32,
    pub spawn_y: i32,
}

impl FieldConfig {
    /// Geometry with the spawn column centred by convention (`width / 2`)
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            spawn_x: (width / 2) as i32,
            spawn_y: 0,
        }
    }

    /// True if every catalog shape can spawn on an empty field without colliding
    pub fn catalog_fits(&self) -> bool {
        let field = Field::new(self.width, self.height);
        catalog()
            .iter()
            .all(|&shape| !is_collision(&field, &Piece::new(self.spawn_x, self.spawn_y, shape)))
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT)
    }
}

/// Complete game state
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameState {
    field: Field,
    piece: Piece,
    is_paused: bool,
    rng: SimpleRng,
    config: FieldConfig,
}

impl GameState {
    /// Initial state: empty field, random spawn, paused
    pub fn new(config: FieldConfig, seed: u32) -> Self {
        Self::initial(config, SimpleRng::new(seed))
    }

    fn initial(config: FieldConfig, mut rng: SimpleRng) -> Self {
        let piece = spawn_piece(&config, &mut rng);
        Self {
            field: Field::new(config.width, config.height),
            piece,
            is_paused: true,
            rng,
            config,
        }
    }

    /// Replace the field (fixtures and tests). The field must match the configured size.
    pub fn with_field(mut self, field: Field) -> Self {
        debug_assert_eq!(field.width(), self.config.width);
        debug_assert_eq!(field.height(), self.config.height);
        self.field = field;
        self
    }

    /// Replace the active piece (fixtures and tests)
    pub fn with_piece(mut self, piece: Piece) -> Self {
        self.piece = piece;
        self
    }

    pub fn with_paused(mut self, is_paused: bool) -> Self {
        self.is_paused = is_paused;
        self
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn piece(&self) -> &Piece {
        &self.piece
    }

    pub fn is_paused(&self) -> bool {
        self.is_paused
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn rng(&self) -> SimpleRng {
        self.rng
    }

    /// Whether the active piece overlaps the field or leaves it
    pub fn is_collision(&self) -> bool {
        is_collision(&self.field, &self.piece)
    }

    /// Whether the active piece rests on the floor or the stack
    pub fn is_locked(&self) -> bool {
        is_locked(&self.field, &self.piece)
    }

    /// Whether translating by `dx` columns stays collision free
    pub fn can_move_x(&self, dx: i32) -> bool {
        !is_collision(&self.field, &self.piece.shifted(dx, 0))
    }

    /// True while the piece sits at the spawn row and is already obstructed
    pub fn is_topped_out(&self) -> bool {
        self.piece.y == self.config.spawn_y && (self.is_collision() || self.is_locked())
    }

    /// Apply one action, returning the next state.
    pub fn reduce(&self, action: &Action) -> GameState {
        match action {
            Action::Start => Self {
                is_paused: false,
                ..self.clone()
            },
            Action::Down => {
                if self.is_paused || self.is_locked() {
                    return self.clone();
                }
                self.with_moved_piece(self.piece.shifted(0, 1))
            }
            Action::Left => self.try_shift(-1),
            Action::Right => self.try_shift(1),
            Action::Rotate => {
                let rotated = self.piece.rotated();
                if is_collision(&self.field, &rotated) {
                    return self.clone();
                }
                self.with_moved_piece(rotated)
            }
            Action::Next => {
                let mut rng = self.rng;
                let piece = spawn_piece(&self.config, &mut rng);
                Self {
                    field: self.field.merged(&self.piece),
                    piece,
                    is_paused: self.is_paused,
                    rng,
                    config: self.config,
                }
            }
            Action::Remove(rows) => {
                let mut field = self.field.clone();
                field.remove_rows(rows);
                Self {
                    field,
                    ..self.clone()
                }
            }
            Action::GameOver => Self::initial(self.config, self.rng),
        }
    }

    fn try_shift(&self, dx: i32) -> GameState {
        if !self.can_move_x(dx) {
            return self.clone();
        }
        self.with_moved_piece(self.piece.shifted(dx, 0))
    }

    fn with_moved_piece(&self, piece: Piece) -> GameState {
        Self {
            piece,
            ..self.clone()
        }
    }
}

/// Pure reducer entry point: `reduce(state, action) -> state`
pub fn reduce(state: &GameState, action: &Action) -> GameState {
    state.reduce(action)
}

fn spawn_piece(config: &FieldConfig, rng: &mut SimpleRng) -> Piece {
    Piece::new(config.spawn_x, config.spawn_y, random_shape(rng))
}

impl Default for GameState {
    fn default() -> Self {
        Self::new(FieldConfig::default(), 1)
    }
}
