//! Color Catch - A falling-color catching arcade game
//!
//! Core modules:
//! - `sim`: Simulation (spawning, motion, collisions, session bookkeeping)
//! - `game`: Idle/Active state machine driving the tick loop
//! - `renderer`: Presentation surface contract (DOM on web, headless natively)
//! - `platform`: Timer scheduling abstraction
//! - `tuning`: Data-driven game balance

pub mod game;
pub mod platform;
pub mod renderer;
pub mod sim;
pub mod tuning;

pub use game::{Game, GameSummary};
pub use tuning::{Tuning, TuningError};

/// Game configuration constants (defaults for [`Tuning`])
pub mod consts {
    /// Fixed tick period in milliseconds (~60 Hz)
    pub const TICK_INTERVAL_MS: u32 = 16;
    /// Delay between ending and starting again on restart
    pub const RESTART_DELAY_MS: u32 = 100;

    /// Paddle defaults
    pub const PADDLE_WIDTH: f32 = 120.0;
    pub const PADDLE_SPEED: f32 = 10.0;
    /// Paddle top edge, measured up from the bottom of the play area
    pub const PADDLE_TOP_OFFSET: f32 = 45.0;
    /// Paddle bottom edge, measured up from the bottom of the play area
    pub const PADDLE_BOTTOM_OFFSET: f32 = 20.0;

    /// Drops are squares of this size
    pub const DROP_SIZE: f32 = 45.0;
    /// Spawn height (above the visible area)
    pub const DROP_SPAWN_Y: f32 = -50.0;
    pub const SPAWN_CHANCE_BASE: f32 = 0.03;
    pub const SPAWN_CHANCE_PER_LEVEL: f32 = 0.005;
    pub const FALL_SPEED_BASE: f32 = 2.0;
    pub const FALL_SPEED_PER_LEVEL: f32 = 0.7;

    /// Danger line as a fraction of play-area height
    pub const DANGER_LINE_RATIO: f32 = 0.75;
    /// Overshoot past the danger line before a miss costs a life
    pub const MISS_BUFFER: f32 = 50.0;
    /// Only drops this close to the bottom are tested against the paddle
    pub const CATCH_ZONE: f32 = 100.0;

    pub const POINTS_PER_CATCH: u32 = 10;
    pub const POINTS_PER_LEVEL: u32 = 100;
    pub const STARTING_LIVES: u32 = 3;
}
