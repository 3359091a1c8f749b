//! Game state machine
//!
//! `Idle` -> `Active` on start, back to `Idle` on game over. The machine owns
//! the tick loop registration; leaving `Active` cancels it, and a tick whose
//! task id no longer matches is dropped even if the host already queued it.

use serde::{Deserialize, Serialize};

use crate::platform::{Scheduler, TaskId, Timer};
use crate::renderer::{PaddleFlash, Surface};
use crate::sim::{self, Field, GameEvent, GameState, Phase, Steer};
use crate::tuning::Tuning;

/// Final result of a run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSummary {
    pub score: u32,
    pub level: u32,
}

/// A game instance: simulation plus its surface and scheduler
pub struct Game<S: Surface, C: Scheduler> {
    state: GameState,
    tuning: Tuning,
    surface: S,
    scheduler: C,
    /// Registration of the running tick loop (only while `Active`)
    loop_task: Option<TaskId>,
}

impl<S: Surface, C: Scheduler> Game<S, C> {
    pub fn new(seed: u64, tuning: Tuning, surface: S, scheduler: C) -> Self {
        let mut game = Self {
            state: GameState::new(seed, &tuning),
            tuning,
            surface,
            scheduler,
            loop_task: None,
        };
        game.reset_world();
        game.show_stats();
        game.surface.set_controls(Phase::Idle);
        game
    }

    pub fn phase(&self) -> Phase {
        self.state.session.phase
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    pub fn scheduler(&self) -> &C {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut C {
        &mut self.scheduler
    }

    /// Begin a fresh run. Returns false (and does nothing) if already active.
    pub fn start(&mut self) -> bool {
        if self.state.session.is_active() {
            log::debug!("Start ignored: game already running");
            return false;
        }

        self.state.session.reset(&self.tuning);
        self.state.session.phase = Phase::Active;
        self.reset_world();
        self.show_stats();
        self.surface.set_controls(Phase::Active);

        let task = self
            .scheduler
            .every(self.tuning.tick_interval(), Timer::Tick);
        self.loop_task = Some(task);

        log::info!("Game started (tick every {} ms)", self.tuning.tick_interval_ms);
        true
    }

    /// Stop the run and report the summary. `None` if no run was active.
    pub fn end(&mut self) -> Option<GameSummary> {
        if !self.state.session.is_active() {
            return None;
        }

        if let Some(task) = self.loop_task.take() {
            self.scheduler.cancel(task);
        }
        self.state.session.phase = Phase::Idle;
        for id in self.state.world.clear() {
            self.surface.remove_drop(id);
        }
        self.surface.set_controls(Phase::Idle);

        let summary = GameSummary {
            score: self.state.session.score,
            level: self.state.session.level,
        };
        log::info!(
            "Game over: score {}, level {}",
            summary.score,
            summary.level
        );
        self.surface.show_game_over(&summary);
        Some(summary)
    }

    /// End the current run and start a new one after the restart delay
    pub fn restart(&mut self) -> bool {
        if self.end().is_none() {
            log::debug!("Restart ignored: no game running");
            return false;
        }
        self.scheduler
            .after(self.tuning.restart_delay(), Timer::Restart);
        true
    }

    /// Apply one directional input. Returns true if the paddle moved.
    pub fn steer(&mut self, dir: Steer) -> bool {
        let width = self.surface.area_size().x;
        let moved = sim::steer(&mut self.state, dir, width);
        if moved {
            self.surface.move_paddle(self.state.world.paddle.x);
        }
        moved
    }

    /// Handle a fired timer
    pub fn fire(&mut self, task: TaskId, timer: Timer) {
        match timer {
            Timer::Tick => {
                if self.loop_task != Some(task) {
                    log::trace!("Dropping stale tick from {:?}", task);
                    return;
                }
                self.step();
            }
            Timer::Restart => {
                self.start();
            }
        }
    }

    /// Run one tick and mirror its events onto the surface
    fn step(&mut self) {
        let field = Field {
            size: self.surface.area_size(),
        };
        let events = sim::tick(&mut self.state, field, &self.tuning);

        let mut stats_dirty = false;
        let mut out_of_lives = false;
        for event in events {
            match event {
                GameEvent::DropSpawned { id, pos, color } => {
                    self.surface.create_drop(id, pos, color)
                }
                GameEvent::DropLate { id } => self.surface.mark_drop_late(id),
                GameEvent::DropExpired { id, .. } => self.surface.remove_drop(id),
                GameEvent::DropCaught { id } => self.surface.catch_drop(id),
                GameEvent::ScoreChanged { .. } => stats_dirty = true,
                GameEvent::LevelUp { .. } => {
                    self.surface.flash_paddle(PaddleFlash::LevelUp);
                    stats_dirty = true;
                }
                GameEvent::LifeLost { .. } => {
                    self.surface.flash_paddle(PaddleFlash::Hit);
                    stats_dirty = true;
                }
                GameEvent::OutOfLives => out_of_lives = true,
            }
        }

        for drop in self.state.world.iter() {
            self.surface.move_drop(drop.id, drop.pos);
        }
        if stats_dirty {
            self.show_stats();
        }
        if out_of_lives {
            self.end();
        }
    }

    /// Drop every drop and re-center the paddle
    fn reset_world(&mut self) {
        for id in self.state.world.clear() {
            self.surface.remove_drop(id);
        }
        let width = self.surface.area_size().x;
        self.state.world.paddle.center(width);
        self.surface.move_paddle(self.state.world.paddle.x);
    }

    fn show_stats(&mut self) {
        let session = &self.state.session;
        self.surface
            .show_stats(session.score, session.lives, session.level);
    }
}

impl<S: Surface> Game<S, crate::platform::ManualScheduler> {
    /// Advance virtual time by `duration`, firing every timer that comes due
    /// (including ones scheduled along the way)
    pub fn run_for(&mut self, duration: std::time::Duration) {
        let until = self.scheduler.now() + duration;
        while let Some((task, timer)) = self.scheduler.pop_due(until) {
            self.fire(task, timer);
        }
        self.scheduler.set_now(until);
    }
}
