//! Guess Game entry point
//!
//! Wires the page's DOM events to the session reducer and runs the effects it
//! returns.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        Document, Element, HtmlButtonElement, HtmlInputElement, HtmlSelectElement, KeyboardEvent,
    };

    use guess_game::session::{Action, Effect, GameSession, View};
    use guess_game::storage::{KeyValueStore, LocalStorage, MemoryStorage};
    use guess_game::{ScoreStore, ScoreTable};
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    /// Falls back to memory when LocalStorage is unavailable (private mode, etc.)
    enum Backend {
        Local(LocalStorage),
        Memory(MemoryStorage),
    }

    impl KeyValueStore for Backend {
        fn get_item(&self, key: &str) -> guess_game::Result<Option<String>> {
            match self {
                Backend::Local(s) => s.get_item(key),
                Backend::Memory(s) => s.get_item(key),
            }
        }

        fn set_item(&mut self, key: &str, value: &str) -> guess_game::Result<()> {
            match self {
                Backend::Local(s) => s.set_item(key, value),
                Backend::Memory(s) => s.set_item(key, value),
            }
        }
    }

    /// Page elements the game reads from or writes to
    struct Elements {
        player_name: HtmlInputElement,
        difficulty: HtmlSelectElement,
        hints: HtmlInputElement,
        range_text: Element,
        attempts_text: Element,
        guess_input: HtmlInputElement,
        guess_btn: HtmlButtonElement,
        feedback: Element,
        history_list: Element,
        new_round_btn: HtmlButtonElement,
        score_player: Element,
        score_difficulty: Element,
        score_best: Element,
    }

    fn element(document: &Document, id: &str) -> Element {
        document
            .get_element_by_id(id)
            .unwrap_or_else(|| panic!("missing #{}", id))
    }

    fn input(document: &Document, id: &str) -> HtmlInputElement {
        element(document, id).unchecked_into()
    }

    impl Elements {
        fn lookup(document: &Document) -> Self {
            Self {
                player_name: input(document, "playerName"),
                difficulty: element(document, "difficulty").unchecked_into(),
                hints: input(document, "hints"),
                range_text: element(document, "rangeText"),
                attempts_text: element(document, "attemptsText"),
                guess_input: input(document, "guessInput"),
                guess_btn: element(document, "guessBtn").unchecked_into(),
                feedback: element(document, "feedback"),
                history_list: element(document, "historyList"),
                new_round_btn: element(document, "newRoundBtn").unchecked_into(),
                score_player: element(document, "scorePlayer"),
                score_difficulty: element(document, "scoreDifficulty"),
                score_best: element(document, "scoreBest"),
            }
        }
    }

    /// App instance holding all state
    struct App {
        session: Option<GameSession>,
        rng: Pcg32,
        store: ScoreStore<Backend>,
        els: Elements,
        document: Document,
    }

    impl App {
        fn new(document: Document) -> Self {
            let backend = match LocalStorage::open() {
                Some(local) => Backend::Local(local),
                None => {
                    log::warn!("LocalStorage unavailable, high scores will not persist");
                    Backend::Memory(MemoryStorage::new())
                }
            };
            let store = ScoreStore::new(backend);
            let scores: ScoreTable = store.load();

            let seed = js_sys::Date::now() as u64;
            let mut rng = Pcg32::seed_from_u64(seed);
            log::info!("Session initialized with seed: {}", seed);

            Self {
                session: Some(GameSession::new(scores, &mut rng)),
                rng,
                store,
                els: Elements::lookup(&document),
                document,
            }
        }

        /// Run one action through the reducer and execute its effects
        fn dispatch(&mut self, action: Action) {
            let Some(session) = self.session.take() else {
                return;
            };
            let (session, effects) = session.handle_action(action, &mut self.rng);
            let view = session.view();
            self.session = Some(session);

            // Focus last: the input may only become enabled on render
            let mut focus = false;
            for effect in effects {
                match effect {
                    Effect::ClearInput => self.els.guess_input.set_value(""),
                    Effect::FocusInput => focus = true,
                    Effect::ClearHistory => self.els.history_list.set_inner_html(""),
                    Effect::SaveScores(table) => {
                        if let Err(e) = self.store.save(&table) {
                            log::warn!("High scores not saved: {}", e);
                        }
                    }
                    Effect::Render => self.render(&view),
                }
            }
            if focus {
                let _ = self.els.guess_input.focus();
            }
        }

        fn render(&self, view: &View) {
            let els = &self.els;
            els.range_text.set_text_content(Some(&view.range_text()));
            els.attempts_text
                .set_text_content(Some(&view.attempts_text()));

            match &view.feedback {
                Some(feedback) => {
                    els.feedback.set_class_name(feedback.kind.css_class());
                    els.feedback.set_text_content(Some(&feedback.text));
                }
                None => {
                    els.feedback.set_class_name("feedback");
                    els.feedback.set_text_content(None);
                }
            }

            els.guess_input.set_disabled(!view.can_guess);
            els.guess_btn.set_disabled(!view.can_guess);
            els.new_round_btn.set_disabled(!view.can_start_new_round);

            // Rebuild history from the log so it always matches the round
            els.history_list.set_inner_html("");
            for guess in &view.guess_log {
                if let Ok(li) = self.document.create_element("li") {
                    li.set_text_content(Some(&guess.to_string()));
                    let _ = els.history_list.append_child(&li);
                }
            }

            els.score_player
                .set_text_content(Some(&view.high_score.player));
            els.score_difficulty
                .set_text_content(Some(&view.high_score.difficulty));
            els.score_best.set_text_content(Some(&view.high_score.best));
        }

        fn guess_action(&self) -> Action {
            Action::Guess {
                raw: self.els.guess_input.value(),
                hints: self.els.hints.checked(),
                player_name: self.els.player_name.value(),
            }
        }
    }

    fn on_click(app: &Rc<RefCell<App>>, id: &str, make_action: fn(&App) -> Action) {
        let document = app.borrow().document.clone();
        if let Some(btn) = document.get_element_by_id(id) {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut a = app.borrow_mut();
                let action = make_action(&a);
                a.dispatch(action);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_input_handlers(app: &Rc<RefCell<App>>) {
        on_click(app, "startBtn", |a| Action::Start {
            difficulty: a.els.difficulty.value(),
            player_name: a.els.player_name.value(),
        });
        on_click(app, "guessBtn", App::guess_action);
        on_click(app, "newRoundBtn", |_| Action::NewRound);
        on_click(app, "resetBtn", |a| Action::Reset {
            difficulty: a.els.difficulty.value(),
        });

        // Enter submits a guess
        {
            let target = app.borrow().els.guess_input.clone();
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.key() == "Enter" {
                    let mut a = app.borrow_mut();
                    let action = a.guess_action();
                    a.dispatch(action);
                }
            });
            let _ = target
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Difficulty select
        {
            let target = app.borrow().els.difficulty.clone();
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                let action = Action::SelectDifficulty {
                    difficulty: a.els.difficulty.value(),
                };
                a.dispatch(action);
            });
            let _ = target
                .add_event_listener_with_callback("change", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Guess Game starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let app = Rc::new(RefCell::new(App::new(document)));

        // Initial render: show the selected difficulty's range and score
        {
            let mut a = app.borrow_mut();
            let action = Action::SelectDifficulty {
                difficulty: a.els.difficulty.value(),
            };
            a.dispatch(action);
        }

        setup_input_handlers(&app);
        log::info!("Guess Game running!");
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Guess Game (native) starting...");
    log::info!("The game runs in the browser - run with `trunk serve` for the web version");
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
