//! Snake Dodge entry point
//!
//! On the web this wires the canvas, input and score endpoints to a session.
//! Natively it plays a few headless games against an in-memory score store.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, KeyboardEvent, PointerEvent, TouchEvent};

    use snake_dodge::input::InputEvent;
    use snake_dodge::renderer::{RenderState, frame};
    use snake_dodge::scores::client::FetchReporter;
    use snake_dodge::sim::GamePhase;
    use snake_dodge::{FrameRate, GameConfig, Session, Settings};

    /// Game instance holding all state
    struct Game {
        session: Session,
        settings: Settings,
        render_state: Option<RenderState>,
        last_time: f64,
        frame_rate: FrameRate,
    }

    impl Game {
        fn render(&mut self) {
            let Some(render_state) = self.render_state.as_mut() else {
                return;
            };
            let commands = frame(self.session.state(), self.settings.high_contrast);
            match render_state.render(&commands) {
                Ok(_) => {}
                Err(wgpu::SurfaceError::Lost) => {
                    render_state.resize(render_state.size.0, render_state.size.1);
                }
                Err(wgpu::SurfaceError::OutOfMemory) => {
                    log::error!("Out of memory!");
                }
                Err(e) => log::warn!("Render error: {:?}", e),
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };
            let state = self.session.state();

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&state.score.to_string()));
            }
            if let Some(el) = document.get_element_by_id("hud-best") {
                let best = self
                    .session
                    .high_score()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "-".to_string());
                el.set_text_content(Some(&best));
            }
            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&format!("{} fps", self.frame_rate.fps())));
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
            if let Some(el) = document.get_element_by_id("game-over") {
                let class = if state.phase == GamePhase::Over {
                    if self.session.is_new_high_score() {
                        "new-best"
                    } else {
                        ""
                    }
                } else {
                    "hidden"
                };
                let _ = el.set_attribute("class", class);
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Snake Dodge starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;
        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;

        let config = GameConfig::default();
        canvas.set_width(config.field_width as u32);
        canvas.set_height(config.field_height as u32);

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(
            config,
            settings.level,
            seed,
            Box::new(FetchReporter::new("")),
        );
        log::info!("Session initialized with seed: {}", seed);

        let game = Rc::new(RefCell::new(Game {
            session,
            settings,
            render_state: None,
            last_time: 0.0,
            frame_rate: FrameRate::default(),
        }));

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });
        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&e.to_string()))?;
        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(
            surface,
            &adapter,
            canvas.width(),
            canvas.height(),
            (config.field_width, config.field_height),
        )
        .await
        .map_err(|e| JsValue::from_str(&e.to_string()))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(&canvas, game.clone())?;
        request_animation_frame(game);

        log::info!("Snake Dodge running!");
        Ok(())
    }

    fn setup_input_handlers(
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let game = game.clone();
            let window = web_sys::window().ok_or("no window")?;
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                let command = g.session.handle_input(&InputEvent::KeyDown(event.key()));
                if command.is_some() {
                    event.prevent_default();
                }
                if let Some(snake_dodge::input::Command::SelectLevel(level)) = command {
                    g.settings.level = level;
                    g.settings.save();
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse / pen
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                let mut g = game.borrow_mut();
                if g.session.phase() == GamePhase::Running {
                    g.session.handle_input(&InputEvent::PointerDown);
                } else {
                    g.session.start();
                }
            });
            canvas
                .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().session.handle_input(&InputEvent::TouchStart);
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
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
                snake_dodge::consts::TICK_DT
            };
            g.last_time = time;
            g.frame_rate.record(time);

            g.session.advance(dt);
            g.render();
            g.update_hud();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run().await
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use std::sync::Arc;

    use snake_dodge::consts::TICK_DT;
    use snake_dodge::scores::api::{self, ApiRequest};
    use snake_dodge::scores::{Identity, LocalReporter, MemoryStore, ScoreService};
    use snake_dodge::sim::GamePhase;
    use snake_dodge::{GameConfig, Level, Session};

    env_logger::init();
    log::info!("Snake Dodge (native) starting...");
    log::info!("Native mode runs headless demo games - build for wasm32 to play");

    let config = GameConfig::default();
    let store = Arc::new(MemoryStore::new());
    let reporter = LocalReporter::new(
        ScoreService::new(store.clone()),
        Some(Identity::new("t2_demo", "autopilot")),
    );
    let mut session = Session::new(config, Level::Easy, 0x5eed, Box::new(reporter));

    // Autopilot gives up after one minute of game time and lets the player drop
    let autopilot_ticks = 60 * 60;
    for level in Level::ALL {
        session.select_level(level);
        session.start();

        let mut ticks = 0u32;
        while session.phase() == GamePhase::Running {
            if ticks < autopilot_ticks && session.state().player.pos.y > config.field_height * 0.6 {
                session.jump();
            }
            ticks += session.advance(TICK_DT);
        }

        let state = session.state();
        log::info!(
            "{}: score {} after {} ticks",
            level.as_str(),
            state.score,
            ticks
        );
        println!(
            "{:<6} score {:>4}  best {:?}",
            level.as_str(),
            state.score,
            session.high_score()
        );
    }

    let service = ScoreService::new(store);
    let response = api::handle(&service, None, ApiRequest::GetLeaderboard, 0);
    println!("{}", response.body);
}
