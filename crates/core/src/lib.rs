//! Core game logic module - pure, deterministic, and testable
//!
//! This module contains the rules of the falling-block game: the piece catalog,
//! the field, the collision and lock predicates, and the reducer that turns one
//! [`Action`](types::Action) into the next [`GameState`].
//! It has **zero dependencies** on timing, UI, or I/O, making it:
//!
//! - **Deterministic**: the RNG lives in the state, so the same state and action
//!   always give the same next state
//! - **Pure**: [`GameState::reduce`] never mutates the previous snapshot
//! - **Portable**: can run in any environment (terminal, headless, tests)
//!
//! # Module Structure
//!
//! - [`shapes`]: square shape matrices, the seven-piece catalog and rotation
//! - [`field`]: the fixed-size grid with merge and row removal
//! - [`collision`]: collision and lock predicates
//! - [`game_state`]: `Piece`, `FieldConfig`, `GameState` and the reducer
//! - [`rng`]: seeded LCG used for spawns
//! - [`snapshot`]: the render projection
//!
//! # Rules
//!
//! - A piece spawns at the configured offset with a uniformly random shape
//! - `Down` moves the piece unless it is paused or locked; it never collision-checks
//! - `Left`, `Right` and `Rotate` are applied only when the result is collision free
//! - There are no wall kicks, no hold, no preview and no scoring
//!
//! # Example
//!
//! ```
//! use blockfall_core::{FieldConfig, GameState};
//! use blockfall_types::Action;
//!
//! let state = GameState::new(FieldConfig::default(), 12345);
//! assert!(state.is_paused());
//!
//! let state = state.reduce(&Action::Start);
//! let moved = state.reduce(&Action::Down);
//! assert_eq!(moved.piece().y, state.piece().y + 1);
//! ```

pub mod collision;
pub mod field;
pub mod game_state;
pub mod rng;
pub mod shapes;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use collision::{is_collision, is_locked};
pub use field::Field;
pub use game_state::{reduce, FieldConfig, GameState, Piece};
pub use rng::SimpleRng;
pub use shapes::{catalog, random_shape, Shape, COLOR_COUNT, MAX_SHAPE_SIZE};
pub use snapshot::RenderFrame;
