//! Paddle steering from directional key events

use serde::{Deserialize, Serialize};

use super::state::GameState;

/// One discrete directional input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Steer {
    Left,
    Right,
}

impl Steer {
    /// Map a DOM `KeyboardEvent.key` value
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" => Some(Steer::Left),
            "ArrowRight" => Some(Steer::Right),
            _ => None,
        }
    }

    fn sign(self) -> f32 {
        match self {
            Steer::Left => -1.0,
            Steer::Right => 1.0,
        }
    }
}

/// Move the paddle one step; ignored unless the session is active.
/// Returns true if the paddle position changed.
pub fn steer(state: &mut GameState, dir: Steer, area_width: f32) -> bool {
    if !state.session.is_active() {
        return false;
    }
    let paddle = &mut state.world.paddle;
    let before = paddle.x;
    let step = dir.sign() * paddle.speed;
    paddle.shift(step, area_width);
    paddle.x != before
}
