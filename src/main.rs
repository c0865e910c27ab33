//! Shoot The Obstacle entry point
//!
//! The browser build drives the game from `requestAnimationFrame` on a 2D
//! canvas. The native build runs a headless round played by the autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, TouchEvent, Window};

    use shoot_the_obstacle::persistence::{KeyValueStore, LocalStore, MemoryStore};
    use shoot_the_obstacle::platform::{InputState, is_mobile};
    use shoot_the_obstacle::renderer::Canvas2d;
    use shoot_the_obstacle::settings::parse_query;
    use shoot_the_obstacle::sim::{GameEvent, GameState, tick};
    use shoot_the_obstacle::ui::{self, GameOverReport};
    use shoot_the_obstacle::{HighScore, Settings, Tuning, Viewport};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        canvas: Canvas2d,
        input: InputState,
        rng: Pcg32,
        store: Box<dyn KeyValueStore>,
        high_score: HighScore,
        mobile: bool,
        /// Whether a frame is scheduled
        running: bool,
    }

    impl Game {
        /// Simulate and draw one frame. Returns false once the round is over.
        fn frame(&mut self) -> bool {
            let now = js_sys::Date::now();
            let input = self.input.take_tick_input(now);
            let events = tick(&mut self.state, &input, &mut self.rng, &mut self.canvas);

            for event in events {
                if let GameEvent::GameOver { score, .. } = event {
                    self.finish(score);
                }
            }
            self.running = !self.state.is_over();
            self.running
        }

        fn finish(&mut self, score: u64) {
            let improved = self.high_score.record_and_save(score, self.store.as_mut());
            let report = GameOverReport::new(score, improved, &mut self.rng, self.mobile);
            show_scoreboard(&report);
        }

        /// Start a new round. Returns true if the frame loop must be resumed.
        fn restart(&mut self) -> bool {
            let stopped = !self.running;
            self.running = true;
            self.input.clear();
            self.state.reset(js_sys::Date::now());
            log::info!("Game restarted");
            stopped
        }
    }

    fn window_size(window: &Window) -> (f32, f32) {
        let dim = |v: Result<JsValue, JsValue>| {
            v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as f32
        };
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(id: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            el.set_text_content(Some(text));
        }
    }

    fn show_scoreboard(report: &GameOverReport) {
        set_text("score", &report.score.to_string());
        set_text("tip", report.tip);
        if let Some(board) = document().and_then(|d| d.query_selector(".scoreboard").ok().flatten())
        {
            let _ = board.class_list().add_1("shown");
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Shoot The Obstacle starting...");

        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };
        let Some(element) = document.query_selector("canvas").ok().flatten() else {
            log::error!("No canvas element");
            return;
        };
        let Ok(element) = element.dyn_into::<HtmlCanvasElement>() else {
            log::error!("Element is not a canvas");
            return;
        };
        let Some(canvas) = Canvas2d::new(element) else {
            log::error!("2D context unavailable");
            return;
        };

        let (width, height) = window_size(&window);
        canvas.resize(width as u32, height as u32);

        let mut store: Box<dyn KeyValueStore> = match LocalStore::open() {
            Ok(store) => Box::new(store),
            Err(e) => {
                log::warn!("{}; scores will not be kept", e);
                Box::new(MemoryStore::new())
            }
        };
        let high_score = HighScore::load(store.as_mut());
        let mut settings = Settings::load(store.as_ref());
        // e.g. `?quality=low&sparks=off`
        if let Ok(query) = window.location().search() {
            settings.apply_and_save(parse_query(&query), store.as_mut());
        }

        let mobile = window
            .navigator()
            .user_agent()
            .map(|ua| is_mobile(&ua))
            .unwrap_or(false);
        set_text("tip", ui::initial_tip(mobile));

        let now = js_sys::Date::now();
        let mut state = GameState::new(
            Viewport::new(width, height),
            Tuning::default(),
            high_score.value,
            now,
        );
        state.effects = settings.effects();

        let game = Rc::new(RefCell::new(Game {
            state,
            canvas,
            input: InputState::new(),
            rng: Pcg32::seed_from_u64(now as u64),
            store,
            high_score,
            mobile,
            running: false,
        }));

        setup_resize_handler(&window, game.clone());
        setup_input_handlers(&window, game.clone());
        setup_restart_button(&document, game);

        // The first round starts from the panel's button
        log::info!("Shoot The Obstacle ready");
    }

    fn setup_resize_handler(window: &Window, game: Rc<RefCell<Game>>) {
        let win = window.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let (width, height) = window_size(&win);
            let mut g = game.borrow_mut();
            g.canvas.resize(width as u32, height as u32);
            g.state.resize(Viewport::new(width, height));
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_input_handlers(window: &Window, game: Rc<RefCell<Game>>) {
        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_down(&event.code());
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                game.borrow_mut().input.key_up(&event.code());
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch drag steers and fires
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                if let Some(touch) = event.touches().get(0) {
                    game.borrow_mut().input.touch_move(touch.client_x() as f32);
                }
            });
            let _ = window
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_restart_button(document: &Document, game: Rc<RefCell<Game>>) {
        let Some(button) = document
            .query_selector("button")
            .ok()
            .flatten()
            .and_then(|b| b.dyn_into::<HtmlElement>().ok())
        else {
            log::warn!("No restart button");
            return;
        };

        let btn = button.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let resume = game.borrow_mut().restart();
            let _ = btn.blur();

            if let Some(doc) = document() {
                if let Some(board) = doc.query_selector(".scoreboard").ok().flatten() {
                    let _ = board.class_list().remove_1("shown");
                }
                if let Some(p) = doc.query_selector("p").ok().flatten() {
                    p.set_text_content(Some(ui::RESTART_MESSAGE));
                }
            }

            if resume {
                request_animation_frame(game.clone());
            }
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let running = game.borrow_mut().frame();
        if running {
            request_animation_frame(game);
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    use shoot_the_obstacle::consts::*;
    use shoot_the_obstacle::persistence::{FileStore, KeyValueStore, MemoryStore};
    use shoot_the_obstacle::renderer::DrawList;
    use shoot_the_obstacle::sim::{GameState, autopilot_input, tick};
    use shoot_the_obstacle::ui::GameOverReport;
    use shoot_the_obstacle::{HighScore, Settings, Tuning, Viewport};

    env_logger::init();
    log::info!("Shoot The Obstacle (native) starting...");
    log::info!("Native mode plays a headless round - run with `trunk serve` for the web version");

    // Usage: shoot-the-obstacle [TUNING_JSON] [quality=low|medium|high] [sparks=on|off] [text=on|off]
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (options, paths): (Vec<&str>, Vec<&str>) =
        args.iter().map(String::as_str).partition(|a| a.contains('='));

    let tuning = match paths.first() {
        Some(path) => match Tuning::load(path) {
            Ok(tuning) => {
                log::info!("Loaded tuning from {}", path);
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let data_dir = std::env::temp_dir().join("shoot-the-obstacle");
    let mut store: Box<dyn KeyValueStore> = match FileStore::open(&data_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            log::warn!("{}; scores will not be kept", e);
            Box::new(MemoryStore::new())
        }
    };
    let mut high_score = HighScore::load(store.as_mut());
    let mut settings = Settings::load(store.as_ref());
    settings.apply_and_save(
        options.iter().filter_map(|o| o.split_once('=')),
        store.as_mut(),
    );

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);
    log::info!("Seed: {}", seed);
    let mut rng = Pcg32::seed_from_u64(seed);

    let (width, height) = HEADLESS_VIEWPORT;
    let mut state = GameState::new(Viewport::new(width, height), tuning, high_score.value, 0.0);
    state.effects = settings.effects();

    let mut canvas = DrawList::new();
    let mut report = None;
    for frame in 1..=HEADLESS_MAX_FRAMES {
        let now = frame as f64 * HEADLESS_FRAME_MS;
        let input = autopilot_input(&state, now);
        canvas.clear();
        tick(&mut state, &input, &mut rng, &mut canvas);
        if state.is_over() {
            let improved = high_score.record_and_save(state.score, store.as_mut());
            report = Some(GameOverReport::new(state.score, improved, &mut rng, false));
            break;
        }
    }

    println!(
        "\nFrames: {}  Level: {}  Score: {}  High score: {}  Life: {}",
        state.frame, state.level, state.score, high_score.value, state.player.life
    );
    println!("Last frame: {} draw calls", canvas.len());
    match report {
        Some(report) => {
            if report.new_high_score {
                println!("New high score!");
            }
            println!("Tip: {}", report.tip);
        }
        None => println!("Autopilot survived the whole run"),
    }
}
