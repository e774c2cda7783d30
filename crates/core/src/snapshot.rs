use crate::field::Field;
use crate::game_state::GameState;

/// Projection handed to the render sink after every processed action.
///
/// `field` already has the active piece merged in, so a renderer can redraw from
/// this value alone.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RenderFrame {
    pub is_paused: bool,
    pub field: Field,
}

impl RenderFrame {
    pub fn playable(&self) -> bool {
        !self.is_paused
    }
}

impl GameState {
    /// Render projection of this state
    pub fn frame(&self) -> RenderFrame {
        RenderFrame {
            is_paused: self.is_paused(),
            field: self.field().merged(self.piece()),
        }
    }
}

impl From<&GameState> for RenderFrame {
    fn from(value: &GameState) -> Self {
        value.frame()
    }
}
