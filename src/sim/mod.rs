//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay pure:
//! - One fixed-order pass per tick (spawn, motion, collision)
//! - Seeded RNG only
//! - No rendering or platform dependencies

pub mod collision;
pub mod geometry;
pub mod input;
pub mod motion;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{Resolution, resolve};
pub use geometry::{Rect, rects_overlap};
pub use input::{Steer, steer};
pub use motion::{MotionOutcome, advance};
pub use spawn::{Spawner, should_spawn};
pub use state::{
    Drop, DropColor, DropId, Field, GameEvent, GameSession, GameState, Paddle, Phase, World,
};
pub use tick::tick;
