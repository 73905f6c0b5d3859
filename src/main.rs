//! Dino Dash entry point
//!
//! On wasm32 this boots the browser game; natively it plays a headless run
//! with a simple autopilot and prints the final HUD values.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent,
        MouseEvent, TouchEvent, Window,
    };

    use dino_dash::assets::Sprites;
    use dino_dash::audio::AudioManager;
    use dino_dash::consts::*;
    use dino_dash::input::{key_intent, touch_intent};
    use dino_dash::renderer::{CanvasRenderer, Viewport, build_scene};
    use dino_dash::sim::{Economy, GameState, RunState, SkillId, TickInput, UpgradeKind, tick};
    use dino_dash::timestep::FixedStep;
    use dino_dash::{HudSnapshot, Tuning};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        document: Document,
        renderer: CanvasRenderer,
        sprites: Sprites,
        audio: AudioManager,
        step: FixedStep,
        last_time: f64,
        input: TickInput,
        // Overlays only change on transitions
        last_run_state: RunState,
    }

    impl Game {
        fn new(seed: u64, tuning: Tuning, document: Document, renderer: CanvasRenderer) -> Self {
            Self {
                state: GameState::with_tuning(seed, tuning),
                document,
                renderer,
                sprites: Sprites::load(),
                audio: AudioManager::new(),
                step: FixedStep::new(),
                last_time: 0.0,
                input: TickInput::default(),
                last_run_state: RunState::Running,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32) {
            for _ in 0..self.step.advance(dt) {
                // Every intent is one-shot
                let input = std::mem::take(&mut self.input);
                tick(&mut self.state, &input, SIM_DT);
            }

            let events = self.state.drain_events();
            for event in &events {
                log::debug!("{:?}", event);
            }
            self.audio.play_events(&events);
        }

        /// Render the current frame
        fn render(&self) {
            let scene = build_scene(&self.state);
            self.renderer.render(&scene, &self.sprites);
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let hud = HudSnapshot::from_state(&self.state);
            let document = &self.document;

            set_text(document, "scoreDisplay", &hud.score.to_string());
            set_text(document, "moneyDisplay", &hud.currency.to_string());
            set_text(document, "timeDisplay", &hud.rest_countdown.to_string());
            set_width_pct(document, "staminaBar", hud.stamina_pct);

            for gauge in &hud.skills {
                let id = cooldown_element(gauge.id);
                set_width_pct(document, id, gauge.cooldown_pct);
                if let Some(el) = document.get_element_by_id(id) {
                    let _ = el.class_list().toggle_with_force("active", gauge.active);
                }
            }

            if self.state.run_state == RunState::Shop {
                self.refresh_shop();
            }

            if hud.run_state != self.last_run_state {
                set_hidden(document, "shopScreen", hud.run_state != RunState::Shop);
                set_hidden(document, "gameOverScreen", hud.run_state != RunState::GameOver);
                if hud.run_state == RunState::GameOver {
                    set_text(document, "finalScore", &hud.score.to_string());
                }
                self.last_run_state = hud.run_state;
            }
        }

        /// Balance, prices and levels on the shop overlay
        fn refresh_shop(&self) {
            let document = &self.document;
            let economy = &self.state.economy;
            set_text(document, "shopMoney", &format!("${}", economy.currency));

            for kind in UpgradeKind::ALL {
                let key = kind.key();
                let maxed = Economy::cap(kind, &self.state.tuning)
                    .is_some_and(|cap| economy.level(kind) >= cap);
                let cost = if maxed {
                    "MAX".to_string()
                } else {
                    format!("${}", economy.price(kind))
                };
                set_text(document, &format!("cost-{key}"), &cost);
                set_text(document, &format!("level-{key}"), &format!("Lv {}", economy.level(kind)));
            }
        }

        /// Start a fresh run with the same tuning
        fn restart(&mut self, seed: u64) {
            let tuning = self.state.tuning.clone();
            self.state = GameState::with_tuning(seed, tuning);
            self.step.reset();
            self.input = TickInput::default();
            log::info!("New run with seed: {}", seed);
        }
    }

    fn cooldown_element(id: SkillId) -> &'static str {
        match id {
            SkillId::TimeSlow => "cd-time",
            SkillId::Invincible => "cd-invincible",
            SkillId::ClearAhead => "cd-clear",
        }
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_width_pct(document: &Document, id: &str, pct: f32) {
        if let Some(el) = document
            .get_element_by_id(id)
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let _ = el.style().set_property("width", &format!("{pct:.1}%"));
        }
    }

    fn set_hidden(document: &Document, id: &str, hidden: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.class_list().toggle_with_force("hidden", hidden);
        }
    }

    /// Balance overrides from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            return Tuning::default();
        };

        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Using custom tuning");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning block: {}", e);
                Tuning::default()
            }
        }
    }

    /// Scale and center the game container in the window
    fn fit_container(window: &Window, document: &Document) {
        let w = window.inner_width().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let h = window.inner_height().ok().and_then(|v| v.as_f64()).unwrap_or(0.0);
        let viewport = Viewport::fit(w as f32, h as f32);

        if let Some(container) = document
            .get_element_by_id("game-container")
            .and_then(|el| el.dyn_into::<HtmlElement>().ok())
        {
            let style = container.style();
            let _ = style.set_property("transform-origin", "0 0");
            let _ = style.set_property("transform", &format!("scale({})", viewport.scale));
            let _ = style.set_property("left", &format!("{}px", viewport.left));
            let _ = style.set_property("top", &format!("{}px", viewport.top));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Dino Dash starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .ok_or("no canvas")?
            .dyn_into()
            .map_err(|_| "gameCanvas is not a canvas")?;
        canvas.set_width(CANVAS_WIDTH as u32);
        canvas.set_height(CANVAS_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()
            .map_err(|_| "unexpected context type")?;

        let tuning = load_tuning(&document);
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(
            seed,
            tuning,
            document.clone(),
            CanvasRenderer::new(ctx),
        )));

        log::info!("Game initialized with seed: {}", seed);

        fit_container(&window, &document);
        setup_resize(&window, &document);
        setup_input_handlers(&window, &canvas, game.clone());
        setup_shop_buttons(&document, game.clone());
        setup_restart_button(&document, game.clone());

        set_hidden(&document, "shopScreen", true);
        set_hidden(&document, "gameOverScreen", true);

        request_animation_frame(game);

        log::info!("Dino Dash running!");
        Ok(())
    }

    fn setup_resize(window: &Window, document: &Document) {
        let window_clone = window.clone();
        let document = document.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            fit_container(&window_clone, &document);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(window: &Window, canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let mut g = game.borrow_mut();
                g.audio.resume();

                if code == "KeyM" {
                    let muted = !g.audio.is_muted();
                    g.audio.set_muted(muted);
                    log::info!("Muted: {}", muted);
                    return;
                }

                if g.state.run_state == RunState::GameOver {
                    if code == "Enter" {
                        g.restart(js_sys::Date::now() as u64);
                    }
                    return;
                }

                if let Some(intent) = key_intent(&code) {
                    // Keep Space/ArrowUp from scrolling the page
                    event.prevent_default();
                    intent.apply_to(&mut g.input);
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start
        {
            let canvas_clone = canvas.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let Some(touch) = event.changed_touches().get(0) else {
                    return;
                };
                let rect = canvas_clone.get_bounding_client_rect();
                let x = (touch.client_x() as f64 - rect.left()) as f32;
                let y = (touch.client_y() as f64 - rect.top()) as f32;

                let mut g = game.borrow_mut();
                g.audio.resume();
                let (w, h) = (rect.width() as f32, rect.height() as f32);
                if let Some(intent) = touch_intent(x, y, w, h) {
                    intent.apply_to(&mut g.input);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_shop_buttons(document: &Document, game: Rc<RefCell<Game>>) {
        for kind in UpgradeKind::ALL {
            let Some(btn) = document.get_element_by_id(&format!("buy-{}", kind.key())) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                let outcome = game.borrow_mut().state.purchase(kind);
                log::debug!("{} -> {:?}", kind.key(), outcome);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("closeShopButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().state.close_shop();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        if let Some(btn) = document.get_element_by_id("restartButton") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().restart(js_sys::Date::now() as u64);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use dino_dash::consts::SIM_DT;
    use dino_dash::sim::{
        Economy, GameState, ObstacleKind, RunState, SkillId, TickInput, UpgradeKind, tick,
    };

    /// Play up to `seconds` of simulated time
    pub fn run(seed: u64, seconds: f32) -> GameState {
        let mut state = GameState::new(seed);
        let mut input = TickInput::default();
        let frames = (seconds / SIM_DT).max(0.0) as u64;

        for _ in 0..frames {
            match state.run_state {
                RunState::GameOver => break,
                RunState::Shop => {
                    go_shopping(&mut state);
                    continue;
                }
                RunState::Running => {}
            }

            input.clear();
            plan(&state, &mut input);
            tick(&mut state, &input, SIM_DT);

            for event in state.drain_events() {
                log::trace!("frame {}: {:?}", state.frame, event);
            }
        }
        state
    }

    /// Jump over the next cactus; fall back on skills when a jump is not possible
    fn plan(state: &GameState, input: &mut TickInput) {
        let player = state.player.rect();
        let lookahead = state.effective_speed() * 8.0;
        let threat = state.obstacles.iter().any(|o| {
            o.kind == ObstacleKind::Ground
                && o.rect.right() > player.left()
                && o.rect.left() < player.right() + lookahead
        });
        if !threat {
            return;
        }

        let can_jump = state.player.is_grounded()
            && state.player.stamina >= state.tuning.jump_stamina_cost;
        if can_jump {
            input.jump = true;
        } else if state.player.is_grounded() {
            for id in [SkillId::ClearAhead, SkillId::Invincible] {
                if state.skills.get(id).is_ready() {
                    input.skills.push(id);
                    break;
                }
            }
        }
    }

    /// Buy the cheapest upgrade until nothing is affordable, then leave
    fn go_shopping(state: &mut GameState) {
        loop {
            let cheapest = UpgradeKind::ALL
                .into_iter()
                .filter(|k| {
                    Economy::cap(*k, &state.tuning).is_none_or(|cap| state.economy.level(*k) < cap)
                })
                .min_by_key(|k| state.economy.price(*k));
            let Some(kind) = cheapest else { break };
            if !state.purchase(kind).is_bought() {
                break;
            }
        }
        state.close_shop();
        state.drain_events();
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|s| s.parse().ok()).unwrap_or(42);
    let seconds: f32 = args.next().and_then(|s| s.parse().ok()).unwrap_or(600.0);

    log::info!("Dino Dash (native) headless run: seed {}, {}s", seed, seconds);
    log::info!("Browser build: run with `trunk serve`");

    let state = headless::run(seed, seconds);
    let hud = dino_dash::HudSnapshot::from_state(&state);
    match serde_json::to_string_pretty(&hud) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Failed to serialize summary: {}", e),
    }
    log::info!(
        "Finished after {:.1}s in state {:?}: distance {:.0}, score {}",
        state.clock,
        state.run_state,
        state.economy.distance,
        hud.score
    );
}
