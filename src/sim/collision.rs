//! Paddle/drop collision resolution
//!
//! Only drops inside the catch zone near the bottom are tested. Every catch
//! scores on its own and re-evaluates the level against the running score.

use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::state::{DropId, World};
use crate::tuning::Tuning;

/// Result of one collision pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub score_delta: u32,
    /// Level after all catches were scored
    pub level: u32,
    pub leveled_up: bool,
    pub caught: Vec<DropId>,
}

/// Catch every eligible drop overlapping `paddle_rect`
///
/// Caught drops are removed from `world` immediately, so no drop can score
/// twice. `score` and `level` are the session values before this pass.
pub fn resolve(
    paddle_rect: &Rect,
    world: &mut World,
    area_height: f32,
    score: u32,
    level: u32,
    tuning: &Tuning,
) -> Resolution {
    let catch_line = area_height - tuning.catch_zone;
    let mut running_score = score;
    let mut resolution = Resolution {
        score_delta: 0,
        level,
        leveled_up: false,
        caught: Vec::new(),
    };

    world.sweep(|drop| {
        if drop.pos.y <= catch_line {
            return true;
        }
        if !drop.rect(tuning.drop_size).overlaps(paddle_rect) {
            return true;
        }

        running_score += tuning.points_per_catch;
        resolution.score_delta += tuning.points_per_catch;
        resolution.caught.push(drop.id);

        let new_level = tuning.level_for_score(running_score);
        if new_level > resolution.level {
            resolution.level = new_level;
            resolution.leveled_up = true;
        }
        false
    });

    resolution
}
