//! Game state and core simulation types
//!
//! Simulation entities carry no presentation handles; the renderer keeps its
//! own side table keyed by [`DropId`].

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use super::spawn::Spawner;
use crate::tuning::Tuning;

/// Session phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Phase {
    /// Waiting for start (initial, and after game over)
    #[default]
    Idle,
    /// Tick loop running
    Active,
}

/// Opaque drop identity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DropId(pub u32);

/// Drop palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DropColor {
    Red,
    Teal,
    Yellow,
    Green,
    Blue,
    Pink,
    Purple,
}

impl DropColor {
    pub const ALL: [DropColor; 7] = [
        DropColor::Red,
        DropColor::Teal,
        DropColor::Yellow,
        DropColor::Green,
        DropColor::Blue,
        DropColor::Pink,
        DropColor::Purple,
    ];

    /// CSS color
    pub fn hex(&self) -> &'static str {
        match self {
            DropColor::Red => "#ff6b6b",
            DropColor::Teal => "#4ecdc4",
            DropColor::Yellow => "#ffd166",
            DropColor::Green => "#06d6a0",
            DropColor::Blue => "#118ab2",
            DropColor::Pink => "#ef476f",
            DropColor::Purple => "#9d4edd",
        }
    }
}

/// A falling colored square
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Drop {
    pub id: DropId,
    /// Top-left corner; x is fixed at spawn
    pub pos: Vec2,
    pub color: DropColor,
    /// Units per tick, fixed at spawn
    pub speed: f32,
    /// Past the danger line (never cleared once set)
    pub late: bool,
}

impl Drop {
    pub fn new(id: DropId, pos: Vec2, color: DropColor, speed: f32) -> Self {
        Self {
            id,
            pos,
            color,
            speed,
            late: false,
        }
    }

    pub fn rect(&self, size: f32) -> Rect {
        Rect::from_origin_size(self.pos, Vec2::splat(size))
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    /// Left edge
    pub x: f32,
    pub width: f32,
    /// Distance moved per input event
    pub speed: f32,
}

impl Paddle {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            x: 0.0,
            width: tuning.paddle_width,
            speed: tuning.paddle_speed,
        }
    }

    /// Rightmost legal x for an area of `area_width`
    pub fn max_x(&self, area_width: f32) -> f32 {
        (area_width - self.width).max(0.0)
    }

    pub fn center(&mut self, area_width: f32) {
        self.x = self.max_x(area_width) / 2.0;
    }

    /// Move by `delta`, clamped to the play area
    pub fn shift(&mut self, delta: f32, area_width: f32) {
        self.x = (self.x + delta).clamp(0.0, self.max_x(area_width));
    }

    /// Collision box; the paddle sits a fixed distance above the bottom edge
    pub fn rect(&self, field: &Field, tuning: &Tuning) -> Rect {
        Rect::new(
            self.x,
            self.x + self.width,
            field.height() - tuning.paddle_top_offset,
            field.height() - tuning.paddle_bottom_offset,
        )
    }
}

/// Play-area dimensions as reported by the surface for one tick
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Field {
    pub size: Vec2,
}

impl Field {
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            size: Vec2::new(width, height),
        }
    }

    pub fn width(&self) -> f32 {
        self.size.x
    }

    pub fn height(&self) -> f32 {
        self.size.y
    }

    pub fn danger_line(&self, tuning: &Tuning) -> f32 {
        self.height() * tuning.danger_line_ratio
    }
}

/// Paddle plus the set of live drops
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct World {
    pub paddle: Paddle,
    /// Unordered; removal uses `swap_remove`
    drops: Vec<Drop>,
}

impl World {
    pub fn new(paddle: Paddle) -> Self {
        Self {
            paddle,
            drops: Vec::new(),
        }
    }

    pub fn add(&mut self, drop: Drop) {
        self.drops.push(drop);
    }

    pub fn remove(&mut self, id: DropId) -> Option<Drop> {
        let index = self.drops.iter().position(|d| d.id == id)?;
        Some(self.drops.swap_remove(index))
    }

    pub fn get(&self, id: DropId) -> Option<&Drop> {
        self.drops.iter().find(|d| d.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Drop> {
        self.drops.iter()
    }

    pub fn len(&self) -> usize {
        self.drops.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drops.is_empty()
    }

    /// Release every drop, returning their ids
    pub fn clear(&mut self) -> Vec<DropId> {
        self.drops.drain(..).map(|d| d.id).collect()
    }

    /// Visit every drop once, newest first; drops for which `visit` returns
    /// `false` are removed in place.
    pub fn sweep(&mut self, mut visit: impl FnMut(&mut Drop) -> bool) {
        // Reverse order keeps swap_remove from moving an unvisited drop
        for i in (0..self.drops.len()).rev() {
            if !visit(&mut self.drops[i]) {
                self.drops.swap_remove(i);
            }
        }
    }
}

/// Score, lives and level for one run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameSession {
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub phase: Phase,
}

impl GameSession {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            score: 0,
            lives: tuning.starting_lives,
            level: 1,
            phase: Phase::Idle,
        }
    }

    /// Reset counters for a fresh run (phase is left to the caller)
    pub fn reset(&mut self, tuning: &Tuning) {
        self.score = 0;
        self.lives = tuning.starting_lives;
        self.level = 1;
    }

    pub fn is_active(&self) -> bool {
        self.phase == Phase::Active
    }

    /// Take one life; returns the lives left
    pub fn lose_life(&mut self) -> u32 {
        self.lives = self.lives.saturating_sub(1);
        self.lives
    }

    pub fn is_out_of_lives(&self) -> bool {
        self.lives == 0
    }
}

/// Events produced by a tick, consumed by the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    DropSpawned { id: DropId, pos: Vec2, color: DropColor },
    DropLate { id: DropId },
    DropExpired { id: DropId, life_lost: bool },
    DropCaught { id: DropId },
    ScoreChanged { score: u32 },
    LevelUp { level: u32 },
    LifeLost { lives: u32 },
    OutOfLives,
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub session: GameSession,
    pub world: World,
    pub spawner: Spawner,
}

impl GameState {
    /// Create a new idle game state with the given seed
    pub fn new(seed: u64, tuning: &Tuning) -> Self {
        Self {
            session: GameSession::new(tuning),
            world: World::new(Paddle::new(tuning)),
            spawner: Spawner::new(seed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drop_at(id: u32, y: f32) -> Drop {
        Drop::new(DropId(id), Vec2::new(0.0, y), DropColor::Red, 2.0)
    }

    #[test]
    fn test_paddle_center_and_clamp() {
        let mut paddle = Paddle::new(&Tuning::default());
        paddle.center(800.0);
        assert_eq!(paddle.x, 340.0);

        paddle.shift(-1000.0, 800.0);
        assert_eq!(paddle.x, 0.0);
        paddle.shift(1000.0, 800.0);
        assert_eq!(paddle.x, 680.0);

        // Narrower than the paddle pins it to the left edge
        paddle.center(100.0);
        assert_eq!(paddle.x, 0.0);
        paddle.shift(10.0, 100.0);
        assert_eq!(paddle.x, 0.0);
    }

    #[test]
    fn test_paddle_rect() {
        let tuning = Tuning::default();
        let mut paddle = Paddle::new(&tuning);
        paddle.x = 100.0;
        let rect = paddle.rect(&Field::new(800.0, 600.0), &tuning);
        assert_eq!(rect, Rect::new(100.0, 220.0, 555.0, 580.0));
    }

    #[test]
    fn test_world_add_remove_clear() {
        let mut world = World::new(Paddle::new(&Tuning::default()));
        world.add(drop_at(1, 0.0));
        world.add(drop_at(2, 10.0));
        world.add(drop_at(3, 20.0));
        assert_eq!(world.len(), 3);

        let removed = world.remove(DropId(1)).unwrap();
        assert_eq!(removed.id, DropId(1));
        assert!(world.remove(DropId(1)).is_none());
        assert!(world.get(DropId(3)).is_some());

        let mut released = world.clear();
        released.sort();
        assert_eq!(released, vec![DropId(2), DropId(3)]);
        assert!(world.is_empty());
    }

    #[test]
    fn test_sweep_visits_each_drop_once() {
        let mut world = World::new(Paddle::new(&Tuning::default()));
        for id in 1..=6 {
            world.add(drop_at(id, id as f32));
        }

        let mut visited = Vec::new();
        world.sweep(|d| {
            visited.push(d.id.0);
            d.id.0 % 2 == 0
        });

        visited.sort();
        assert_eq!(visited, vec![1, 2, 3, 4, 5, 6]);
        let mut left: Vec<u32> = world.iter().map(|d| d.id.0).collect();
        left.sort();
        assert_eq!(left, vec![2, 4, 6]);
    }

    #[test]
    fn test_lives_saturate() {
        let mut session = GameSession::new(&Tuning::default());
        assert_eq!(session.lose_life(), 2);
        assert_eq!(session.lose_life(), 1);
        assert_eq!(session.lose_life(), 0);
        assert_eq!(session.lose_life(), 0);
        assert!(session.is_out_of_lives());
    }
}
