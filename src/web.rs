//! Browser host: wires a [`Game`] to a 2d canvas, the page's score elements,
//! `localStorage`, keyboard/mouse input and `requestAnimationFrame`.
//!
//! The game lives in an `Rc<RefCell<_>>` shared by the frame callback, the
//! input listeners and the [`GameHandle`] returned to JS.

use std::cell::RefCell;
use std::rc::Rc;

use log::warn;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    CanvasRenderingContext2d, Document, HtmlCanvasElement, HtmlElement, KeyboardEvent, MouseEvent, Storage,
    Window, window,
};

use crate::error::HostError;
use crate::game::{BestScoreStore, Game, GameConfig, GameState, LoopControl, Rect, ScoreSink};
use crate::render::RenderSurface;

const CANVAS_ID: &str = "gameCanvas";
const SCORE_ID: &str = "score";
const BEST_ID: &str = "best";
const GAME_OVER_ID: &str = "gameOver";
const RESTART_ID: &str = "restart";
const BEST_SCORE_KEY: &str = "fez-runner.best";

// --- Render surface -----------------------------------------------------------

pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
}

impl RenderSurface for CanvasSurface {
    fn clear(&mut self, width: f64, height: f64) {
        self.ctx.clear_rect(0.0, 0.0, width, height);
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.fill_rect(rect.x, rect.y, rect.w, rect.h);
    }

    fn fill_arc(&mut self, cx: f64, cy: f64, radius: f64, color: &str) {
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.begin_path();
        self.ctx.arc(cx, cy, radius, 0.0, std::f64::consts::TAU).ok();
        self.ctx.fill();
    }

    fn fill_path(&mut self, points: &[(f64, f64)], color: &str) {
        let Some((&(x0, y0), rest)) = points.split_first() else {
            return;
        };
        self.ctx.set_fill_style(&JsValue::from_str(color));
        self.ctx.begin_path();
        self.ctx.move_to(x0, y0);
        for &(x, y) in rest {
            self.ctx.line_to(x, y);
        }
        self.ctx.close_path();
        self.ctx.fill();
    }
}

// --- Score / UI sink ----------------------------------------------------------

/// Writes score text and toggles the game-over panel. Missing elements are
/// skipped; the page owns the layout.
pub struct DomScoreSink {
    doc: Document,
}

impl DomScoreSink {
    pub fn new(doc: Document) -> Self {
        Self { doc }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.doc.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(&self, id: &str, visible: bool) {
        let Some(el) = self.doc.get_element_by_id(id) else {
            return;
        };
        if let Some(html) = el.dyn_ref::<HtmlElement>() {
            html.style().set_property("display", if visible { "block" } else { "none" }).ok();
        }
    }
}

impl ScoreSink for DomScoreSink {
    fn on_score_changed(&mut self, score: u32) {
        self.set_text(SCORE_ID, &score.to_string());
    }

    fn on_game_over(&mut self, _final_score: u32) {
        self.set_visible(GAME_OVER_ID, true);
        self.set_visible(RESTART_ID, true);
    }

    fn on_state_changed(&mut self, state: GameState) {
        if state != GameState::GameOver {
            self.set_visible(GAME_OVER_ID, false);
            self.set_visible(RESTART_ID, false);
        }
    }

    fn on_best_score(&mut self, best: u32) {
        self.set_text(BEST_ID, &best.to_string());
    }
}

// --- Persistence --------------------------------------------------------------

/// Best score in `localStorage`. Storage may be unavailable (private mode,
/// sandboxed iframes); reads then yield 0 and writes are dropped.
pub struct LocalStorageBestScore {
    storage: Option<Storage>,
}

impl LocalStorageBestScore {
    pub fn new(win: &Window) -> Self {
        let storage = match win.local_storage() {
            Ok(storage) => storage,
            Err(err) => {
                warn!("localStorage unavailable: {err:?}");
                None
            }
        };
        Self { storage }
    }
}

impl BestScoreStore for LocalStorageBestScore {
    fn best_score(&self) -> u32 {
        let Some(storage) = &self.storage else {
            return 0;
        };
        match storage.get_item(BEST_SCORE_KEY) {
            Ok(Some(raw)) => raw.parse().unwrap_or_else(|_| {
                warn!("ignoring malformed best score {raw:?}");
                0
            }),
            Ok(None) => 0,
            Err(err) => {
                warn!("could not read best score: {err:?}");
                0
            }
        }
    }

    fn set_best_score(&mut self, score: u32) {
        if let Some(storage) = &self.storage {
            if let Err(err) = storage.set_item(BEST_SCORE_KEY, &score.to_string()) {
                warn!("could not store best score: {err:?}");
            }
        }
    }
}

// --- Entry --------------------------------------------------------------------

/// JS-side handle to a running game.
#[wasm_bindgen]
pub struct GameHandle {
    game: Rc<RefCell<Game>>,
}

#[wasm_bindgen]
impl GameHandle {
    pub fn start(&self) {
        self.game.borrow_mut().start();
    }

    pub fn restart(&self) {
        self.game.borrow_mut().restart();
    }

    /// Stops the frame loop permanently.
    pub fn stop(&self) {
        self.game.borrow_mut().stop();
    }

    pub fn score(&self) -> u32 {
        self.game.borrow().session().score()
    }

    pub fn best_score(&self) -> u32 {
        self.game.borrow().session().best_score()
    }

    pub fn is_playing(&self) -> bool {
        self.game.borrow().session().is_playing()
    }
}

/// Finds or creates the canvas, builds the game and starts the frame loop.
pub fn launch(config: GameConfig) -> Result<GameHandle, HostError> {
    let config = config.validated()?;
    let win = window().ok_or(HostError::NoWindow)?;
    let doc = win.document().ok_or(HostError::NoDocument)?;

    let canvas: HtmlCanvasElement = match doc.get_element_by_id(CANVAS_ID) {
        Some(el) => el.dyn_into().map_err(|_| HostError::Js(format!("#{CANVAS_ID} is not a canvas")))?,
        None => {
            let c: HtmlCanvasElement = doc
                .create_element("canvas")?
                .dyn_into()
                .map_err(|_| HostError::Js("created element is not a canvas".into()))?;
            c.set_id(CANVAS_ID);
            doc.body().ok_or(HostError::NoBody)?.append_child(&c)?;
            c
        }
    };
    canvas.set_width(config.world.width as u32);
    canvas.set_height(config.world.height as u32);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(HostError::NoContext)?
        .dyn_into()
        .map_err(|_| HostError::NoContext)?;

    let game = Game::new(
        config,
        Box::new(DomScoreSink::new(doc.clone())),
        Box::new(LocalStorageBestScore::new(&win)),
    );
    let game = Rc::new(RefCell::new(game));

    install_input(&win, &doc, &canvas, &game)?;
    start_loop(Rc::clone(&game), CanvasSurface { ctx });
    Ok(GameHandle { game })
}

fn install_input(
    win: &Window,
    doc: &Document,
    canvas: &HtmlCanvasElement,
    game: &Rc<RefCell<Game>>,
) -> Result<(), HostError> {
    // Space / ArrowUp jump (or start), ArrowDown ducks while held.
    {
        let game = Rc::clone(game);
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| match evt.code().as_str() {
            "Space" | "ArrowUp" => {
                evt.prevent_default();
                if !evt.repeat() {
                    game.borrow_mut().jump();
                }
            }
            "ArrowDown" => {
                evt.prevent_default();
                if !evt.repeat() {
                    game.borrow_mut().set_ducking(true);
                }
            }
            _ => {}
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let game = Rc::clone(game);
        let closure = Closure::wrap(Box::new(move |evt: KeyboardEvent| {
            if evt.code() == "ArrowDown" {
                game.borrow_mut().set_ducking(false);
            }
        }) as Box<dyn FnMut(_)>);
        win.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    {
        let game = Rc::clone(game);
        let closure = Closure::wrap(Box::new(move |evt: MouseEvent| {
            if evt.button() == 0 {
                game.borrow_mut().jump();
            }
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    if let Some(button) = doc.get_element_by_id(RESTART_ID) {
        let game = Rc::clone(game);
        let closure = Closure::wrap(Box::new(move |_evt: MouseEvent| {
            game.borrow_mut().restart();
        }) as Box<dyn FnMut(_)>);
        button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }
    Ok(())
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_loop(game: Rc<RefCell<Game>>, mut surface: CanvasSurface) {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = Rc::clone(&f);
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        if game.borrow_mut().frame(ts, &mut surface) == LoopControl::Stop {
            // Dropping the closure breaks the Rc cycle; nothing is rescheduled.
            let _ = f.borrow_mut().take();
            return;
        }
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(f: &FrameCallback) {
    let Some(w) = window() else {
        return;
    };
    if let Some(cb) = f.borrow().as_ref() {
        if let Err(err) = w.request_animation_frame(cb.as_ref().unchecked_ref()) {
            warn!("requestAnimationFrame failed: {err:?}");
        }
    }
}
