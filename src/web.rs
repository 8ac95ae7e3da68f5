//! Browser front-end: a 2D canvas presenter, DOM overlays for the HUD and
//! prompts, the click listener and the `requestAnimationFrame` loop.
//!
//! The game itself lives in a thread-local and is only ever touched from
//! browser callbacks, which never preempt each other.

use std::cell::RefCell;
use std::rc::Rc;

use glam::Vec3;
use log::info;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Document, Element, HtmlCanvasElement, window};

use crate::config::GameConfig;
use crate::error::GameError;
use crate::game::Game;
use crate::mole::MoleId;
use crate::presenter::Presenter;
use crate::rng::SeededRandom;

const CANVAS_ID: &str = "sam-canvas";
const HUD_ID: &str = "sam-hud";
const PROMPT_ID: &str = "sam-prompt";
const CANVAS_W: u32 = 800;
const CANVAS_H: u32 = 420;
/// Mole head radius in world units.
const HEAD_RADIUS: f32 = 0.8;
const SPARKLE_MS: f64 = 450.0;

// --- Presenter ---------------------------------------------------------------

/// Expanding ring drawn where a correct hit landed.
struct Sparkle {
    at: Vec3,
    start_ms: f64,
}

pub struct CanvasPresenter {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    hud: Element,
    prompt: Element,
    positions: Vec<Vec3>,
    words: Vec<String>,
    slots: Vec<Vec3>,
    lowered_offset: f32,
    px_per_unit: f64,
    sparkles: Vec<Sparkle>,
}

impl CanvasPresenter {
    fn new(
        canvas: HtmlCanvasElement,
        ctx: CanvasRenderingContext2d,
        hud: Element,
        prompt: Element,
        config: &GameConfig,
    ) -> Self {
        let n = config.mole_count;
        let span = (n as f64 + 0.5) * config.slot_spacing as f64;
        let px_per_unit = canvas.width() as f64 / span;
        Self {
            canvas,
            ctx,
            hud,
            prompt,
            positions: vec![Vec3::ZERO; n],
            words: vec![String::new(); n],
            slots: vec![Vec3::ZERO; n],
            lowered_offset: config.lowered_offset,
            px_per_unit,
            sparkles: Vec::new(),
        }
    }

    /// Canvas y of the hole rims; anything below is hidden underground.
    fn ground_y(&self) -> f64 {
        self.canvas.height() as f64 * 0.7
    }

    fn to_screen(&self, p: Vec3) -> (f64, f64) {
        let x = self.canvas.width() as f64 / 2.0 + p.x as f64 * self.px_per_unit;
        let y = self.ground_y() - p.y as f64 * self.px_per_unit;
        (x, y)
    }

    fn head_radius_px(&self) -> f64 {
        HEAD_RADIUS as f64 * self.px_per_unit
    }

    fn draw(&mut self, now: f64) {
        let ctx = &self.ctx;
        let w = self.canvas.width() as f64;
        let h = self.canvas.height() as f64;
        let ground = self.ground_y();
        let r = self.head_radius_px();

        ctx.set_fill_style_str("#9fd8f5");
        ctx.fill_rect(0.0, 0.0, w, ground);
        ctx.set_fill_style_str("#5fa34a");
        ctx.fill_rect(0.0, ground, w, h - ground);

        for (idx, pos) in self.positions.iter().enumerate() {
            let (hx, hy) = self.to_screen(self.slots[idx]);
            ctx.set_fill_style_str("#3b2a1a");
            ctx.begin_path();
            ctx.ellipse(hx, hy, r * 1.3, r * 0.45, 0.0, 0.0, std::f64::consts::TAU).ok();
            ctx.fill();

            // Clip to above the rim so a lowered mole disappears into its hole.
            ctx.save();
            ctx.begin_path();
            ctx.rect(hx - r * 1.5, 0.0, r * 3.0, hy);
            ctx.clip();
            let (mx, my) = self.to_screen(*pos);
            ctx.set_fill_style_str("#8b5a2b");
            ctx.begin_path();
            ctx.arc(mx, my, r, 0.0, std::f64::consts::TAU).ok();
            ctx.fill();
            let word = &self.words[idx];
            if !word.is_empty() {
                ctx.set_font("bold 26px 'Fira Sans', sans-serif");
                ctx.set_text_align("center");
                ctx.set_fill_style_str("#fff");
                ctx.set_stroke_style_str("#000");
                ctx.set_line_width(4.0);
                ctx.stroke_text(word, mx, my + 9.0).ok();
                ctx.fill_text(word, mx, my + 9.0).ok();
            }
            ctx.restore();
        }

        self.sparkles.retain(|s| now - s.start_ms < SPARKLE_MS);
        for s in &self.sparkles {
            let frac = ((now - s.start_ms) / SPARKLE_MS).clamp(0.0, 1.0);
            let (sx, sy) = self.to_screen(s.at);
            ctx.set_stroke_style_str(&format!("rgba(255,230,80,{:.2})", 1.0 - frac));
            ctx.set_line_width(5.0);
            ctx.begin_path();
            ctx.arc(sx, sy, r * (1.0 + frac * 1.2), 0.0, std::f64::consts::TAU).ok();
            ctx.stroke();
        }
    }

    fn set_prompt(&self, text: Option<&str>) {
        match text {
            Some(t) => {
                self.prompt.set_text_content(Some(t));
                self.prompt.set_attribute("style", PROMPT_STYLE_SHOWN).ok();
            }
            None => {
                self.prompt.set_attribute("style", PROMPT_STYLE_HIDDEN).ok();
            }
        }
    }
}

impl Presenter for CanvasPresenter {
    fn hit_test(&self, x: f64, y: f64) -> Option<MoleId> {
        let r = self.head_radius_px();
        self.positions.iter().enumerate().find_map(|(idx, pos)| {
            if pos.y - self.slots[idx].y <= self.lowered_offset + 0.05 {
                return None;
            }
            let (_, rim) = self.to_screen(self.slots[idx]);
            let (mx, my) = self.to_screen(*pos);
            let inside = (x - mx).powi(2) + (y - my).powi(2) <= r * r;
            (inside && y <= rim).then_some(MoleId(idx))
        })
    }

    fn render_mole_word(&mut self, mole: MoleId, word: &str) {
        if let Some(slot) = self.words.get_mut(mole.0) {
            slot.clear();
            slot.push_str(word);
        }
    }

    fn show_success_effect(&mut self, at: Vec3) {
        self.sparkles.push(Sparkle { at, start_ms: performance_now() });
    }

    fn refresh_score_display(&mut self, score: u32, time_remaining: u32) {
        self.hud.set_text_content(Some(&format!("Score: {score}   Time: {time_remaining}s")));
        self.set_prompt(None);
    }

    fn show_start_prompt(&mut self) {
        self.set_prompt(Some("Click to start! Whack the moles whose word has a short \"a\", like cat."));
    }

    fn show_game_over_prompt(&mut self, final_score: u32) {
        self.set_prompt(Some(&format!("Time's up! Final score: {final_score}. Click to play again.")));
    }

    fn place_mole(&mut self, mole: MoleId, position: Vec3) {
        if let Some(p) = self.positions.get_mut(mole.0) {
            *p = position;
        }
        // Slot is the position with the vertical offset removed.
        if let Some(s) = self.slots.get_mut(mole.0) {
            *s = Vec3::new(position.x, 0.0, position.z);
        }
    }
}

const PROMPT_STYLE_SHOWN: &str = "position:fixed; left:50%; top:12%; transform:translateX(-50%); font-family:'Fira Sans', sans-serif; font-size:20px; color:#fff; padding:10px 18px; background:rgba(0,0,0,0.6); border-radius:8px; z-index:45; pointer-events:none;";
const PROMPT_STYLE_HIDDEN: &str = "display:none;";

// --- WASM Entry --------------------------------------------------------------

thread_local! {
    static GAME: RefCell<Option<Game<CanvasPresenter>>> = const { RefCell::new(None) };
}

pub fn start_web_game(config: GameConfig) -> Result<(), GameError> {
    let win = window().ok_or(GameError::NoWindow)?;
    let doc = win.document().ok_or(GameError::NoDocument)?;

    let canvas: HtmlCanvasElement = match doc.get_element_by_id(CANVAS_ID) {
        Some(el) => el.dyn_into::<HtmlCanvasElement>().map_err(|_| GameError::Dom(format!("#{CANVAS_ID} is not a canvas")))?,
        None => {
            let c: HtmlCanvasElement = doc
                .create_element("canvas")?
                .dyn_into::<HtmlCanvasElement>()
                .map_err(|_| GameError::Dom("created element is not a canvas".into()))?;
            c.set_id(CANVAS_ID);
            c.set_width(CANVAS_W);
            c.set_height(CANVAS_H);
            c.set_attribute("style", "position:fixed; left:50%; top:50%; transform:translate(-50%,-50%); border-radius:18px; border:2px solid #222; box-shadow:0 0 32px 0 rgba(0,0,0,0.18); z-index:20;").ok();
            doc.body().ok_or(GameError::NoBody)?.append_child(&c)?;
            c
        }
    };
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or(GameError::NoCanvasContext)?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| GameError::NoCanvasContext)?;

    let hud = ensure_overlay(&doc, HUD_ID, "position:fixed; top:10px; left:10px; font-family:'Fira Code', monospace; font-size:16px; color:#fff; padding:4px 8px; background:rgba(0,0,0,0.42); border:1px solid #333; border-radius:6px; z-index:44;")?;
    let prompt = ensure_overlay(&doc, PROMPT_ID, PROMPT_STYLE_HIDDEN)?;

    let presenter = CanvasPresenter::new(canvas.clone(), ctx, hud, prompt, &config);
    let game = Game::new(config, presenter, SeededRandom::from_entropy())?;

    let already_running = GAME.with(|cell| cell.replace(Some(game)).is_some());
    if already_running {
        info!("game restarted with a fresh configuration");
        return Ok(());
    }

    {
        let closure = Closure::wrap(Box::new(move |evt: web_sys::MouseEvent| {
            let (x, y) = (evt.offset_x() as f64, evt.offset_y() as f64);
            let now = performance_now();
            GAME.with(|cell| {
                if let Some(game) = cell.borrow_mut().as_mut() {
                    game.click(x, y, now);
                }
            });
        }) as Box<dyn FnMut(_)>);
        canvas.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
        closure.forget();
    }

    start_frame_loop();
    info!("short-a moles ready");
    Ok(())
}

fn ensure_overlay(doc: &Document, id: &str, style: &str) -> Result<Element, GameError> {
    if let Some(el) = doc.get_element_by_id(id) {
        return Ok(el);
    }
    let div = doc.create_element("div")?;
    div.set_id(id);
    div.set_attribute("style", style)?;
    doc.body().ok_or(GameError::NoBody)?.append_child(&div)?;
    Ok(div)
}

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

fn start_frame_loop() {
    let f: FrameCallback = Rc::new(RefCell::new(None));
    let g = f.clone();
    *g.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
        GAME.with(|cell| {
            if let Some(game) = cell.borrow_mut().as_mut() {
                game.advance(ts);
                game.presenter_mut().draw(ts);
            }
        });
        request_frame(&f);
    }) as Box<dyn FnMut(f64)>));
    request_frame(&g);
}

fn request_frame(cb: &FrameCallback) {
    if let (Some(w), Some(closure)) = (window(), cb.borrow().as_ref()) {
        let _ = w.request_animation_frame(closure.as_ref().unchecked_ref());
    }
}

fn performance_now() -> f64 {
    window().and_then(|w| w.performance()).map(|p| p.now()).unwrap_or(0.0)
}
