//! DOM-backed surface
//!
//! Drops are absolutely positioned `div.color-drop` elements inside the game
//! area. The simulation only knows drop ids; the element for each id lives in
//! `drops`.

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlButtonElement, HtmlElement};

use super::{PaddleFlash, Surface};
use crate::game::GameSummary;
use crate::platform::PlatformError;
use crate::platform::web::{defer, element_by_id};
use crate::sim::{DropColor, DropId, Phase};

const PADDLE_GLOW: &str = "0 0 20px rgba(76, 201, 240, 0.8)";
const PADDLE_LEVEL_UP_GLOW: &str = "0 0 30px gold";
const PADDLE_GRADIENT: &str = "linear-gradient(to right, #4cc9f0, #4361ee)";
const PADDLE_HIT_GRADIENT: &str = "linear-gradient(to right, #ff6b6b, #ef476f)";

/// Cosmetic delays (ms)
const CATCH_FADE_MS: i32 = 200;
const HIT_FLASH_MS: i32 = 300;
const LEVEL_UP_GLOW_MS: i32 = 500;
const GAME_OVER_NOTICE_MS: i32 = 500;

const INTRO_ID: &str = "startMessage";

fn px(value: f32) -> String {
    format!("{}px", value)
}

fn set_style(el: &HtmlElement, property: &str, value: &str) {
    let _ = el.style().set_property(property, value);
}

pub struct DomSurface {
    document: Document,
    area: HtmlElement,
    paddle: HtmlElement,
    score: Element,
    lives: Element,
    level: Element,
    start_btn: HtmlButtonElement,
    restart_btn: HtmlButtonElement,
    drops: HashMap<DropId, HtmlElement>,
    drop_size: f32,
}

impl DomSurface {
    /// Bind to the page's game elements
    pub fn new(document: &Document, drop_size: f32) -> Result<Self, PlatformError> {
        Ok(Self {
            document: document.clone(),
            area: element_by_id(document, "gameArea")?,
            paddle: element_by_id(document, "player")?,
            score: element_by_id(document, "score")?,
            lives: element_by_id(document, "lives")?,
            level: element_by_id(document, "level")?,
            start_btn: element_by_id(document, "startBtn")?,
            restart_btn: element_by_id(document, "restartBtn")?,
            drops: HashMap::new(),
            drop_size,
        })
    }

    /// Centered "press start" overlay, removed when a run begins
    pub fn show_intro(&self) -> Result<(), PlatformError> {
        let msg: HtmlElement = self
            .document
            .create_element("div")
            .map_err(|e| PlatformError::Js(format!("{:?}", e)))?
            .unchecked_into();
        msg.set_id(INTRO_ID);
        for (property, value) in [
            ("position", "absolute"),
            ("top", "50%"),
            ("left", "50%"),
            ("transform", "translate(-50%, -50%)"),
            ("color", "#4cc9f0"),
            ("font-size", "20px"),
            ("text-align", "center"),
            ("background-color", "rgba(0, 0, 0, 0.7)"),
            ("padding", "20px"),
            ("border-radius", "10px"),
        ] {
            set_style(&msg, property, value);
        }
        msg.set_inner_html("Click START GAME to begin!<br>Use \u{2190} \u{2192} keys to move");
        self.area
            .append_child(&msg)
            .map_err(|e| PlatformError::Js(format!("{:?}", e)))?;
        Ok(())
    }

    fn hide_intro(&self) {
        if let Some(msg) = self.document.get_element_by_id(INTRO_ID) {
            msg.remove();
        }
    }
}

impl Surface for DomSurface {
    fn area_size(&self) -> Vec2 {
        Vec2::new(
            self.area.offset_width() as f32,
            self.area.offset_height() as f32,
        )
    }

    fn create_drop(&mut self, id: DropId, pos: Vec2, color: DropColor) {
        let el: HtmlElement = match self.document.create_element("div") {
            Ok(el) => el.unchecked_into(),
            Err(e) => {
                log::warn!("Failed to create drop element: {:?}", e);
                return;
            }
        };
        el.set_class_name("color-drop");
        set_style(&el, "background-color", color.hex());
        set_style(&el, "width", &px(self.drop_size));
        set_style(&el, "height", &px(self.drop_size));
        set_style(&el, "left", &px(pos.x));
        set_style(&el, "top", &px(pos.y));

        if let Err(e) = self.area.append_child(&el) {
            log::warn!("Failed to attach drop element: {:?}", e);
            return;
        }
        self.drops.insert(id, el);
    }

    fn move_drop(&mut self, id: DropId, pos: Vec2) {
        if let Some(el) = self.drops.get(&id) {
            set_style(el, "top", &px(pos.y));
        }
    }

    fn mark_drop_late(&mut self, id: DropId) {
        if let Some(el) = self.drops.get(&id) {
            set_style(el, "opacity", "0.5");
            set_style(el, "box-shadow", "0 0 5px red");
        }
    }

    fn remove_drop(&mut self, id: DropId) {
        if let Some(el) = self.drops.remove(&id) {
            el.remove();
        }
    }

    fn catch_drop(&mut self, id: DropId) {
        if let Some(el) = self.drops.remove(&id) {
            set_style(&el, "transform", "scale(1.3)");
            set_style(&el, "opacity", "0");
            defer(CATCH_FADE_MS, move || el.remove());
        }
    }

    fn move_paddle(&mut self, x: f32) {
        set_style(&self.paddle, "left", &px(x));
    }

    fn flash_paddle(&mut self, flash: PaddleFlash) {
        let paddle = self.paddle.clone();
        match flash {
            PaddleFlash::Hit => {
                set_style(&self.paddle, "background", PADDLE_HIT_GRADIENT);
                defer(HIT_FLASH_MS, move || {
                    set_style(&paddle, "background", PADDLE_GRADIENT)
                });
            }
            PaddleFlash::LevelUp => {
                set_style(&self.paddle, "box-shadow", PADDLE_LEVEL_UP_GLOW);
                defer(LEVEL_UP_GLOW_MS, move || {
                    set_style(&paddle, "box-shadow", PADDLE_GLOW)
                });
            }
        }
    }

    fn show_stats(&mut self, score: u32, lives: u32, level: u32) {
        self.score.set_text_content(Some(&score.to_string()));
        self.lives.set_text_content(Some(&lives.to_string()));
        self.level.set_text_content(Some(&level.to_string()));
    }

    fn set_controls(&mut self, phase: Phase) {
        match phase {
            Phase::Idle => {
                self.start_btn.set_disabled(false);
                self.restart_btn.set_disabled(true);
                self.start_btn.set_text_content(Some("START GAME"));
            }
            Phase::Active => {
                self.hide_intro();
                self.start_btn.set_disabled(true);
                self.restart_btn.set_disabled(false);
                self.start_btn.set_text_content(Some("GAME RUNNING"));
            }
        }
    }

    fn show_game_over(&mut self, summary: &GameSummary) {
        let message = format!(
            "\u{1f3ae} GAME OVER!\n\nFinal Score: {}\nLevel Reached: {}\n\nClick START to play again!",
            summary.score, summary.level
        );
        defer(GAME_OVER_NOTICE_MS, move || {
            if let Some(window) = web_sys::window() {
                let _ = window.alert_with_message(&message);
            }
        });
    }
}
