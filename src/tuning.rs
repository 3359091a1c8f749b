//! Game balance tuning
//!
//! Every gameplay constant lives here so a page can override balance with a
//! JSON blob. Missing fields fall back to the defaults in [`crate::consts`].

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::consts::*;

/// Errors raised while loading tuning data
#[derive(thiserror::Error, Debug)]
pub enum TuningError {
    #[error("Tuning parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid tuning value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: &'static str },
}

/// Gameplay balance values
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Timing ===
    /// Tick period in milliseconds
    pub tick_interval_ms: u32,
    /// Pause between end and start on restart
    pub restart_delay_ms: u32,

    // === Paddle ===
    pub paddle_width: f32,
    /// Distance moved per key event
    pub paddle_speed: f32,
    pub paddle_top_offset: f32,
    pub paddle_bottom_offset: f32,

    // === Drops ===
    pub drop_size: f32,
    pub drop_spawn_y: f32,
    pub spawn_chance_base: f32,
    pub spawn_chance_per_level: f32,
    pub fall_speed_base: f32,
    pub fall_speed_per_level: f32,

    // === Field ===
    pub danger_line_ratio: f32,
    pub miss_buffer: f32,
    pub catch_zone: f32,

    // === Scoring ===
    pub points_per_catch: u32,
    pub points_per_level: u32,
    pub starting_lives: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            tick_interval_ms: TICK_INTERVAL_MS,
            restart_delay_ms: RESTART_DELAY_MS,

            paddle_width: PADDLE_WIDTH,
            paddle_speed: PADDLE_SPEED,
            paddle_top_offset: PADDLE_TOP_OFFSET,
            paddle_bottom_offset: PADDLE_BOTTOM_OFFSET,

            drop_size: DROP_SIZE,
            drop_spawn_y: DROP_SPAWN_Y,
            spawn_chance_base: SPAWN_CHANCE_BASE,
            spawn_chance_per_level: SPAWN_CHANCE_PER_LEVEL,
            fall_speed_base: FALL_SPEED_BASE,
            fall_speed_per_level: FALL_SPEED_PER_LEVEL,

            danger_line_ratio: DANGER_LINE_RATIO,
            miss_buffer: MISS_BUFFER,
            catch_zone: CATCH_ZONE,

            points_per_catch: POINTS_PER_CATCH,
            points_per_level: POINTS_PER_LEVEL,
            starting_lives: STARTING_LIVES,
        }
    }
}

impl Tuning {
    /// Parse and validate tuning from JSON
    pub fn from_json(json: &str) -> Result<Self, TuningError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values that would break the simulation's invariants
    pub fn validate(&self) -> Result<(), TuningError> {
        fn invalid(field: &'static str, reason: &'static str) -> Result<(), TuningError> {
            Err(TuningError::Invalid { field, reason })
        }

        if self.tick_interval_ms == 0 {
            return invalid("tick_interval_ms", "must be positive");
        }
        if !(self.paddle_width > 0.0) {
            return invalid("paddle_width", "must be positive");
        }
        if !(self.paddle_speed > 0.0) {
            return invalid("paddle_speed", "must be positive");
        }
        if !(self.paddle_top_offset > self.paddle_bottom_offset) {
            return invalid("paddle_top_offset", "must be above paddle_bottom_offset");
        }
        if !(self.drop_size > 0.0) {
            return invalid("drop_size", "must be positive");
        }
        if !(self.spawn_chance_base >= 0.0) || !(self.spawn_chance_per_level >= 0.0) {
            return invalid("spawn_chance_base", "spawn chances cannot be negative");
        }
        if !(self.fall_speed_base >= 0.0) || !(self.fall_speed_per_level >= 0.0) {
            // Negative speeds would make drops rise
            return invalid("fall_speed_base", "fall speeds cannot be negative");
        }
        if !(self.danger_line_ratio > 0.0 && self.danger_line_ratio <= 1.0) {
            return invalid("danger_line_ratio", "must be in (0, 1]");
        }
        if !(self.miss_buffer >= 0.0) {
            return invalid("miss_buffer", "cannot be negative");
        }
        if self.points_per_level == 0 {
            return invalid("points_per_level", "must be positive");
        }
        if self.starting_lives == 0 {
            return invalid("starting_lives", "must be positive");
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms as u64)
    }

    pub fn restart_delay(&self) -> Duration {
        Duration::from_millis(self.restart_delay_ms as u64)
    }

    /// Chance that a drop spawns on a tick at `level` (uncapped, may exceed 1)
    pub fn spawn_chance(&self, level: u32) -> f32 {
        self.spawn_chance_base + level as f32 * self.spawn_chance_per_level
    }

    /// Fall speed for drops spawned at `level`
    pub fn fall_speed(&self, level: u32) -> f32 {
        self.fall_speed_base + level as f32 * self.fall_speed_per_level
    }

    /// Level reached at `score`
    pub fn level_for_score(&self, score: u32) -> u32 {
        score / self.points_per_level + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_level_curve() {
        let t = Tuning::default();
        assert_eq!(t.level_for_score(0), 1);
        assert_eq!(t.level_for_score(90), 1);
        assert_eq!(t.level_for_score(100), 2);
        assert_eq!(t.level_for_score(250), 3);
        assert!((t.spawn_chance(1) - 0.035).abs() < 1e-6);
        assert!((t.fall_speed(1) - 2.7).abs() < 1e-6);
        assert!((t.fall_speed(3) - 4.1).abs() < 1e-5);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let t = Tuning::from_json(r#"{ "paddle_width": 80.0, "starting_lives": 5 }"#).unwrap();
        assert_eq!(t.paddle_width, 80.0);
        assert_eq!(t.starting_lives, 5);
        assert_eq!(t.drop_size, DROP_SIZE);
        assert_eq!(t.tick_interval_ms, TICK_INTERVAL_MS);
    }

    #[test]
    fn test_rejects_bad_json() {
        assert!(matches!(Tuning::from_json("{ nope"), Err(TuningError::Parse(_))));
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = Tuning::from_json(r#"{ "points_per_level": 0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "points_per_level", .. }));

        let err = Tuning::from_json(r#"{ "danger_line_ratio": 1.5 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "danger_line_ratio", .. }));

        let err = Tuning::from_json(r#"{ "fall_speed_base": -1.0 }"#).unwrap_err();
        assert!(matches!(err, TuningError::Invalid { field: "fall_speed_base", .. }));
    }
}
