//! Color Catch entry point
//!
//! Handles platform-specific initialization and wires the game to its host.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::{Rc, Weak};
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlElement, KeyboardEvent, MouseEvent, Window};

    use color_catch::platform::PlatformError;
    use color_catch::platform::web::{BrowserScheduler, element_by_id, window_and_document};
    use color_catch::renderer::DomSurface;
    use color_catch::sim::Steer;
    use color_catch::{Game, Tuning};

    type WebGame = Game<DomSurface, BrowserScheduler>;

    /// Run `f` against the game unless it is gone or already borrowed
    fn with_game(game: &Weak<RefCell<WebGame>>, f: impl FnOnce(&mut WebGame)) {
        let Some(game) = game.upgrade() else {
            return;
        };
        match game.try_borrow_mut() {
            Ok(mut g) => f(&mut g),
            Err(_) => log::warn!("Game busy, dropping event"),
        }
    }

    /// Optional `<script id="tuning" type="application/json">` overrides
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };

        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning overrides");
                tuning
            }
            Err(e) => {
                log::warn!("{}; using default tuning", e);
                Tuning::default()
            }
        }
    }

    pub fn run() -> Result<(), PlatformError> {
        console_error_panic_hook::set_once();

        log::info!("Color Catch starting...");

        let (window, document) = window_and_document()?;
        let tuning = load_tuning(&document);

        let surface = DomSurface::new(&document, tuning.drop_size)?;
        surface.show_intro()?;
        let scheduler = BrowserScheduler::new(window.clone());
        let dispatcher = scheduler.dispatcher();

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed, tuning, surface, scheduler)));
        log::info!("Game initialized with seed: {}", seed);

        // Timers reach the game through a weak handle so the scheduler it
        // owns doesn't keep it alive
        {
            let weak = Rc::downgrade(&game);
            dispatcher.install(move |task, timer| with_game(&weak, |g| g.fire(task, timer)));
        }

        setup_buttons(&document, &game)?;
        setup_keyboard(&window, &game)?;

        log::info!("Color Catch ready!");
        Ok(())
    }

    fn setup_buttons(document: &Document, game: &Rc<RefCell<WebGame>>) -> Result<(), PlatformError> {
        let start_btn: HtmlElement = element_by_id(document, "startBtn")?;
        {
            let weak = Rc::downgrade(game);
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                with_game(&weak, |g| {
                    g.start();
                });
            });
            start_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .map_err(|e| PlatformError::Js(format!("{:?}", e)))?;
            closure.forget();
        }

        let restart_btn: HtmlElement = element_by_id(document, "restartBtn")?;
        {
            let weak = Rc::downgrade(game);
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                with_game(&weak, |g| {
                    if g.restart() {
                        log::info!("Game restarting");
                    }
                });
            });
            restart_btn
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())
                .map_err(|e| PlatformError::Js(format!("{:?}", e)))?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_keyboard(window: &Window, game: &Rc<RefCell<WebGame>>) -> Result<(), PlatformError> {
        let weak = Rc::downgrade(game);
        let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
            if let Some(dir) = Steer::from_key(&event.key()) {
                with_game(&weak, |g| {
                    g.steer(dir);
                });
            }
        });
        window
            .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())
            .map_err(|e| PlatformError::Js(format!("{:?}", e)))?;
        closure.forget();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    let _ = console_log::init_with_level(log::Level::Info);
    if let Err(e) = wasm_game::run() {
        log::error!("Color Catch failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> anyhow::Result<()> {
    use anyhow::Context;
    use color_catch::Tuning;

    env_logger::init();
    log::info!("Color Catch (native) starting...");
    log::info!("Native mode runs a headless autoplay session - use `trunk serve` for the web version");

    let tuning = match std::env::args().nth(1) {
        Some(path) => {
            let json = std::fs::read_to_string(&path)
                .with_context(|| format!("reading tuning file {}", path))?;
            Tuning::from_json(&json).with_context(|| format!("loading tuning file {}", path))?
        }
        None => Tuning::default(),
    };

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let summary = autoplay::run(seed, tuning, autoplay::MAX_TICKS);
    match summary {
        Some(summary) => println!(
            "Game over after autoplay: score {}, level {}",
            summary.score, summary.level
        ),
        None => println!("Autoplay survived {} ticks", autoplay::MAX_TICKS),
    }
    Ok(())
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use color_catch::platform::ManualScheduler;
    use color_catch::renderer::HeadlessSurface;
    use color_catch::sim::{Phase, Steer};
    use color_catch::{Game, GameSummary, Tuning};

    /// Five minutes at 60 Hz
    pub const MAX_TICKS: u32 = 5 * 60 * 60;

    const AREA_WIDTH: f32 = 800.0;
    const AREA_HEIGHT: f32 = 600.0;

    /// Play one headless run, chasing the lowest drop each tick
    pub fn run(seed: u64, tuning: Tuning, max_ticks: u32) -> Option<GameSummary> {
        let interval = tuning.tick_interval();
        let mut game = Game::new(
            seed,
            tuning,
            HeadlessSurface::new(AREA_WIDTH, AREA_HEIGHT),
            ManualScheduler::new(),
        );
        game.start();

        for _ in 0..max_ticks {
            if let Some(dir) = pick_direction(&game) {
                game.steer(dir);
            }
            game.run_for(interval);
            if game.phase() == Phase::Idle {
                return game.surface().summaries.last().cloned();
            }
        }
        game.end();
        None
    }

    fn pick_direction(game: &Game<HeadlessSurface, ManualScheduler>) -> Option<Steer> {
        let state = game.state();
        let half_drop = game.tuning().drop_size / 2.0;
        let target = state
            .world
            .iter()
            .filter(|d| d.pos.y < AREA_HEIGHT)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y))?;

        let paddle = &state.world.paddle;
        let offset = (target.pos.x + half_drop) - (paddle.x + paddle.width / 2.0);
        if offset.abs() < paddle.speed {
            None
        } else if offset < 0.0 {
            Some(Steer::Left)
        } else {
            Some(Steer::Right)
        }
    }

}
