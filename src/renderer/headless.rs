//! Recording surface for native runs and tests

use std::collections::HashMap;

use glam::Vec2;

use super::{PaddleFlash, Surface};
use crate::game::GameSummary;
use crate::sim::{DropColor, DropId, Phase};

/// Visual state of one drop as the surface last saw it
#[derive(Debug, Clone, PartialEq)]
pub struct DropSprite {
    pub pos: Vec2,
    pub color: DropColor,
    pub late: bool,
}

/// Surface that keeps everything in memory
#[derive(Debug, Clone)]
pub struct HeadlessSurface {
    pub size: Vec2,
    pub drops: HashMap<DropId, DropSprite>,
    pub paddle_x: f32,
    pub flashes: Vec<PaddleFlash>,
    /// Last (score, lives, level) shown
    pub stats: (u32, u32, u32),
    /// Phase the buttons currently reflect
    pub controls: Phase,
    pub caught: Vec<DropId>,
    pub summaries: Vec<GameSummary>,
}

impl HeadlessSurface {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
            drops: HashMap::new(),
            paddle_x: 0.0,
            flashes: Vec::new(),
            stats: (0, 0, 0),
            controls: Phase::Idle,
            caught: Vec::new(),
            summaries: Vec::new(),
        }
    }

    pub fn start_enabled(&self) -> bool {
        self.controls == Phase::Idle
    }

    pub fn restart_enabled(&self) -> bool {
        self.controls == Phase::Active
    }

    pub fn level_ups(&self) -> usize {
        self.flashes
            .iter()
            .filter(|f| **f == PaddleFlash::LevelUp)
            .count()
    }
}

impl Surface for HeadlessSurface {
    fn area_size(&self) -> Vec2 {
        self.size
    }

    fn create_drop(&mut self, id: DropId, pos: Vec2, color: DropColor) {
        self.drops.insert(
            id,
            DropSprite {
                pos,
                color,
                late: false,
            },
        );
    }

    fn move_drop(&mut self, id: DropId, pos: Vec2) {
        if let Some(sprite) = self.drops.get_mut(&id) {
            sprite.pos = pos;
        }
    }

    fn mark_drop_late(&mut self, id: DropId) {
        if let Some(sprite) = self.drops.get_mut(&id) {
            sprite.late = true;
        }
    }

    fn remove_drop(&mut self, id: DropId) {
        self.drops.remove(&id);
    }

    fn catch_drop(&mut self, id: DropId) {
        if self.drops.remove(&id).is_some() {
            self.caught.push(id);
        }
    }

    fn move_paddle(&mut self, x: f32) {
        self.paddle_x = x;
    }

    fn flash_paddle(&mut self, flash: PaddleFlash) {
        self.flashes.push(flash);
    }

    fn show_stats(&mut self, score: u32, lives: u32, level: u32) {
        self.stats = (score, lives, level);
    }

    fn set_controls(&mut self, phase: Phase) {
        self.controls = phase;
    }

    fn show_game_over(&mut self, summary: &GameSummary) {
        self.summaries.push(summary.clone());
    }
}
