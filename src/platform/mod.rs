//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Timers (repeating tick loop, one-shot delays)
//! - Boot-time DOM lookups (web only)

pub mod manual;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use manual::ManualScheduler;
#[cfg(target_arch = "wasm32")]
pub use web::BrowserScheduler;

use std::time::Duration;

/// Handle for one scheduled timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(pub u64);

/// What a fired timer means to the game
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Timer {
    /// One period of the game loop
    Tick,
    /// Delayed start after a restart
    Restart,
}

/// Timer scheduling provided by the host
///
/// Implementations never call back into the game themselves; the host hands
/// fired timers to [`crate::Game::fire`].
pub trait Scheduler {
    /// Fire `timer` every `period` until cancelled
    fn every(&mut self, period: Duration, timer: Timer) -> TaskId;
    /// Fire `timer` once after `delay`
    fn after(&mut self, delay: Duration, timer: Timer) -> TaskId;
    /// Stop a task; unknown or finished tasks are ignored
    fn cancel(&mut self, task: TaskId);
}

/// Platform-level failures (boot and DOM wiring)
#[derive(thiserror::Error, Debug)]
pub enum PlatformError {
    #[error("No global window")]
    NoWindow,

    #[error("No document on window")]
    NoDocument,

    #[error("Missing DOM element: #{0}")]
    MissingElement(String),

    #[error("JS error: {0}")]
    Js(String),
}
