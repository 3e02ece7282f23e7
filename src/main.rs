//! Neon Invaders entry point
//!
//! The browser build wires the page (canvas, HUD, buttons, images) to the
//! frame loop. The native build plays a seeded headless run with a simple
//! autopilot and prints the final state as JSON.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::closure::WasmClosure;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, EventTarget, HtmlCanvasElement, HtmlElement, HtmlImageElement, KeyboardEvent,
        PointerEvent, TouchEvent,
    };

    use neon_invaders::assets::{AssetTracker, ImageId};
    use neon_invaders::hud::DomHud;
    use neon_invaders::input::{Command, Direction};
    use neon_invaders::layout::{Chrome, Viewport, fit_viewport};
    use neon_invaders::platform::{self, PlatformError};
    use neon_invaders::renderer::CanvasSurface;
    use neon_invaders::{Game, Settings, Tuning};

    const CANVAS_ID: &str = "game";

    /// Everything the page callbacks share
    struct App {
        game: Game,
        surface: CanvasSurface,
        hud: DomHud,
        canvas: HtmlCanvasElement,
        assets: AssetTracker,
        settings: Settings,
    }

    impl App {
        /// Size the canvas to the window and hand the new viewport to the game
        fn fit_canvas(&mut self) {
            match measure_viewport() {
                Ok(viewport) => {
                    apply_canvas_size(&self.canvas, viewport);
                    self.game.resize(viewport);
                }
                Err(e) => log::warn!("Resize skipped: {}", e),
            }
        }

        fn cycle_quality(&mut self) {
            self.settings.quality = self.settings.quality.next();
            self.settings.save();
            self.game.apply_settings(&self.settings);
        }
    }

    type Shared = Rc<RefCell<App>>;

    fn measure_viewport() -> Result<Viewport, PlatformError> {
        let window = platform::window()?;
        let document = platform::document()?;
        let (width, height) = platform::window_size(&window);
        let chrome = Chrome {
            hud_height: platform::offset_height(&document, ".hud"),
            footer_height: platform::offset_height(&document, ".footer"),
        };
        Ok(fit_viewport(width, height, chrome))
    }

    fn apply_canvas_size(canvas: &HtmlCanvasElement, viewport: Viewport) {
        canvas.set_width(viewport.width as u32);
        canvas.set_height(viewport.height as u32);
        let style = canvas.style();
        let _ = style.set_property("width", &format!("{}px", viewport.width));
        let _ = style.set_property("height", &format!("{}px", viewport.height));
    }

    /// Attach a listener for the lifetime of the page
    fn listen<T: ?Sized + WasmClosure>(
        target: &EventTarget,
        event: &str,
        closure: Closure<T>,
    ) -> Result<(), PlatformError> {
        target.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    pub fn run() -> Result<(), PlatformError> {
        let document = platform::document()?;
        let canvas = platform::canvas(&document, CANVAS_ID)?;
        let ctx = platform::context_2d(&canvas)?;

        let settings = Settings::load();
        let viewport = measure_viewport()?;
        apply_canvas_size(&canvas, viewport);

        let seed = js_sys::Date::now() as u64;
        let app = Rc::new(RefCell::new(App {
            game: Game::new(seed, Tuning::default(), viewport, &settings),
            surface: CanvasSurface::new(ctx),
            hud: DomHud::new(&document),
            canvas: canvas.clone(),
            assets: AssetTracker::new(),
            settings,
        }));

        setup_keyboard(&app)?;
        setup_touch(&canvas, &app)?;
        setup_touch_buttons(&document, &app)?;
        setup_buttons(&document, &app)?;
        setup_resize(&app)?;
        setup_auto_pause(&document, &app)?;
        load_images(&app)?;

        log::info!("Waiting for images (seed {})", seed);
        Ok(())
    }

    fn setup_keyboard(app: &Shared) -> Result<(), PlatformError> {
        let window = platform::window()?;

        let game = app.clone();
        listen(
            &window,
            "keydown",
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let key = event.key();
                let mut a = game.borrow_mut();
                if key.eq_ignore_ascii_case("q") {
                    a.cycle_quality();
                } else {
                    a.game.input.key_down(&key);
                }
            }),
        )?;

        let game = app.clone();
        listen(
            &window,
            "keyup",
            Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().game.input.key_up(&event.key());
            }),
        )
    }

    /// Horizontal touch position relative to the canvas, plus its width
    fn touch_x(canvas: &HtmlCanvasElement, event: &TouchEvent) -> Option<(f32, f32)> {
        let touch = event.touches().get(0)?;
        let rect = canvas.get_bounding_client_rect();
        Some((
            touch.client_x() as f32 - rect.left() as f32,
            rect.width() as f32,
        ))
    }

    fn setup_touch(canvas: &HtmlCanvasElement, app: &Shared) -> Result<(), PlatformError> {
        {
            let game = app.clone();
            let canvas_clone = canvas.clone();
            listen(
                canvas,
                "touchstart",
                Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    if let Some((x, width)) = touch_x(&canvas_clone, &event) {
                        game.borrow_mut().game.input.touch_start(x, width);
                    }
                }),
            )?;
        }
        {
            let game = app.clone();
            let canvas_clone = canvas.clone();
            listen(
                canvas,
                "touchmove",
                Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                    event.prevent_default();
                    if let Some((x, width)) = touch_x(&canvas_clone, &event) {
                        game.borrow_mut().game.input.touch_move(x, width);
                    }
                }),
            )?;
        }
        for name in ["touchend", "touchcancel"] {
            let game = app.clone();
            listen(
                canvas,
                name,
                Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
                    game.borrow_mut().game.input.touch_end();
                }),
            )?;
        }
        Ok(())
    }

    /// On-screen arrows: `.touch-btn` elements carrying `data-dir`
    fn setup_touch_buttons(document: &Document, app: &Shared) -> Result<(), PlatformError> {
        let buttons = document.query_selector_all(".touch-btn")?;
        for i in 0..buttons.length() {
            let Some(button) = buttons
                .item(i)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let Some(direction) = button.dataset().get("dir").and_then(|d| Direction::parse(&d))
            else {
                log::warn!("Touch button without a valid data-dir");
                continue;
            };

            let game = app.clone();
            listen(
                &button,
                "pointerdown",
                Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                    event.prevent_default();
                    game.borrow_mut().game.input.pointer_down(direction);
                }),
            )?;
            for name in ["pointerup", "pointercancel", "pointerleave"] {
                let game = app.clone();
                listen(
                    &button,
                    name,
                    Closure::<dyn FnMut(_)>::new(move |_event: PointerEvent| {
                        game.borrow_mut().game.input.pointer_up(direction);
                    }),
                )?;
            }
        }
        Ok(())
    }

    fn setup_buttons(document: &Document, app: &Shared) -> Result<(), PlatformError> {
        for (id, command) in [
            ("start", Command::Start),
            ("pause", Command::TogglePause),
            ("reset", Command::Reset),
        ] {
            let Some(button) = document.get_element_by_id(id) else {
                log::warn!("Button #{} not found", id);
                continue;
            };
            let game = app.clone();
            listen(
                &button,
                "click",
                Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    game.borrow_mut().game.input.push(command);
                }),
            )?;
        }
        Ok(())
    }

    fn setup_resize(app: &Shared) -> Result<(), PlatformError> {
        let window = platform::window()?;
        let game = app.clone();
        listen(
            &window,
            "resize",
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().fit_canvas();
            }),
        )
    }

    fn setup_auto_pause(document: &Document, app: &Shared) -> Result<(), PlatformError> {
        let window = platform::window()?;

        // Visibility change (tab switch, minimize)
        {
            let game = app.clone();
            let document_clone = document.clone();
            listen(
                document,
                "visibilitychange",
                Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                    if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                        let mut a = game.borrow_mut();
                        a.game.input.release_all();
                        a.game.input.push(Command::Pause);
                        log::info!("Auto-paused (tab hidden)");
                    }
                }),
            )?;
        }

        // Window blur (click outside)
        let game = app.clone();
        listen(
            &window,
            "blur",
            Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                let mut a = game.borrow_mut();
                a.game.input.release_all();
                if a.game.state.is_running() {
                    a.game.input.push(Command::Pause);
                    log::info!("Auto-paused (window blur)");
                }
            }),
        )
    }

    /// Load both avatars; the loop starts once each has loaded or failed
    fn load_images(app: &Shared) -> Result<(), PlatformError> {
        for id in ImageId::ALL {
            let image = HtmlImageElement::new()?;

            let game = app.clone();
            let image_clone = image.clone();
            let onload = Closure::<dyn FnMut()>::new(move || {
                let ready = {
                    let mut a = game.borrow_mut();
                    a.surface.set_image(id, image_clone.clone());
                    a.assets.mark_loaded(id)
                };
                if ready {
                    start_loop(game.clone());
                }
            });
            image.set_onload(Some(onload.as_ref().unchecked_ref()));
            onload.forget();

            let game = app.clone();
            let onerror = Closure::<dyn FnMut()>::new(move || {
                let ready = game.borrow_mut().assets.mark_failed(id);
                if ready {
                    start_loop(game.clone());
                }
            });
            image.set_onerror(Some(onerror.as_ref().unchecked_ref()));
            onerror.forget();

            image.set_src(id.path());
        }
        Ok(())
    }

    fn start_loop(app: Shared) {
        app.borrow_mut().fit_canvas();
        log::info!("Neon Invaders running!");
        request_animation_frame(app);
    }

    fn request_animation_frame(app: Shared) {
        let Some(window) = web_sys::window() else {
            log::error!("Window gone; stopping loop");
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        if let Err(e) = window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            log::error!("requestAnimationFrame failed: {:?}", e);
        }
        closure.forget();
    }

    fn game_loop(app: Shared, time: f64) {
        {
            let mut a = app.borrow_mut();
            let App {
                game, surface, hud, ..
            } = &mut *a;
            game.frame(time, surface, hud);
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }

    log::info!("Neon Invaders starting...");
    if let Err(e) = wasm_game::run() {
        log::error!("Startup failed: {}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::path::Path;

    use neon_invaders::hud::NullHud;
    use neon_invaders::input::Command;
    use neon_invaders::layout::Viewport;
    use neon_invaders::renderer::DrawList;
    use neon_invaders::{Game, Settings, Tuning};

    /// Two minutes at 60 fps
    const FRAMES: u32 = 60 * 120;
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const DEFAULT_SEED: u64 = 0x5eed;
    /// Horizontal slack before the autopilot steers
    const DEAD_ZONE: f32 = 4.0;

    /// Tuning from a JSON file, or defaults if it cannot be used
    pub fn load_tuning(path: &Path) -> Tuning {
        let loaded = std::fs::read_to_string(path)
            .map_err(|e| e.to_string())
            .and_then(|json| Tuning::from_json(&json).map_err(|e| e.to_string()));
        match loaded {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path.display());
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning {}: {}", path.display(), e);
                Tuning::default()
            }
        }
    }

    /// Steer under the nearest live enemy
    fn autopilot(game: &mut Game) {
        let player_x = game.state.player.pos.x;
        let target = game
            .state
            .alive_enemies()
            .min_by(|a, b| {
                (a.pos.x - player_x)
                    .abs()
                    .total_cmp(&(b.pos.x - player_x).abs())
            })
            .map(|enemy| enemy.pos.x);

        let input = &mut game.input;
        input.release_all();
        match target {
            Some(x) if x < player_x - DEAD_ZONE => input.left = true,
            Some(x) if x > player_x + DEAD_ZONE => input.right = true,
            _ => {}
        }
    }

    pub fn run(tuning: Tuning, seed: u64) {
        let mut game = Game::new(seed, tuning, Viewport::reference(), &Settings::load());
        let mut surface = DrawList::new();
        let mut hud = NullHud;

        game.input.push(Command::Start);
        for frame in 0..FRAMES {
            autopilot(&mut game);
            surface.clear_commands();
            let outcome = game.frame(frame as f64 * FRAME_MS, &mut surface, &mut hud);
            if outcome.wave_advanced {
                log::info!(
                    "Frame {}: wave {} (score {}, lives {})",
                    frame,
                    game.state.wave,
                    game.state.score,
                    game.state.lives
                );
            }
            if !game.state.is_running() {
                log::info!("Run ended at frame {}", frame);
                break;
            }
        }

        log::info!(
            "Final: score {} wave {} lives {} ({} draw calls last frame)",
            game.state.score,
            game.state.wave,
            game.state.lives,
            surface.len()
        );
        match serde_json::to_string_pretty(&game.state) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to serialize state: {}", e),
        }
    }

    pub fn seed_from_env() -> u64 {
        std::env::var("NEON_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(DEFAULT_SEED)
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Neon Invaders (native, headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => headless::load_tuning(std::path::Path::new(&path)),
        None => neon_invaders::Tuning::default(),
    };
    let seed = headless::seed_from_env();
    log::info!("Seed {}", seed);
    headless::run(tuning, seed);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}
