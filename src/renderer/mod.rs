//! Presentation surface
//!
//! The game drives a [`Surface`]; it never touches DOM nodes directly. The
//! surface owns whatever visual handles it needs, keyed by [`DropId`].

pub mod headless;
#[cfg(target_arch = "wasm32")]
pub mod dom;

#[cfg(target_arch = "wasm32")]
pub use dom::DomSurface;
pub use headless::HeadlessSurface;

use glam::Vec2;

use crate::game::GameSummary;
use crate::sim::{DropColor, DropId, Phase};

/// Transient paddle highlight
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaddleFlash {
    /// A life was lost
    Hit,
    /// A new level was reached
    LevelUp,
}

/// Everything the game needs from its presentation layer
///
/// Calls naming an unknown drop id must be no-ops.
pub trait Surface {
    /// Current play-area size (width, height)
    fn area_size(&self) -> Vec2;

    fn create_drop(&mut self, id: DropId, pos: Vec2, color: DropColor);
    fn move_drop(&mut self, id: DropId, pos: Vec2);
    /// Highlight a drop that crossed the danger line
    fn mark_drop_late(&mut self, id: DropId);
    /// Remove a drop's visual immediately
    fn remove_drop(&mut self, id: DropId);
    /// Play the catch effect, then remove the visual
    fn catch_drop(&mut self, id: DropId);

    fn move_paddle(&mut self, x: f32);
    fn flash_paddle(&mut self, flash: PaddleFlash);

    fn show_stats(&mut self, score: u32, lives: u32, level: u32);
    /// Start is enabled only in `Idle`, restart only in `Active`
    fn set_controls(&mut self, phase: Phase);
    fn show_game_over(&mut self, summary: &GameSummary);
}
