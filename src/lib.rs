//! Short-A Moles core crate.
//!
//! Moles carrying printed words pop out of holes; the player whacks the ones
//! whose word has the short "a" sound before the 30 second round runs out.
//! Game logic (`game` and the modules it drives) is plain Rust and runs
//! natively under `cargo test`; `web` binds it to a canvas in the browser.

use wasm_bindgen::prelude::*;

pub mod animation;
pub mod config;
pub mod error;
pub mod game;
pub mod judge;
pub mod logger;
pub mod mole;
pub mod presenter;
pub mod rng;
pub mod session;
pub mod spawn;
pub mod timers;
mod web;
pub mod words;

pub use config::GameConfig;
pub use error::GameError;
pub use game::{ClickOutcome, Game};
pub use presenter::{HeadlessPresenter, Presenter};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    logger::init(log::LevelFilter::Info);
}

// -----------------------------------------------------------------------------
// Word datasets
// Target words carry the short "a" vowel (as in "cat"); the other list has
// no "a" at all so a glance never gives the answer away by spelling alone.
// -----------------------------------------------------------------------------

pub const SHORT_A_WORDS: &[&str] = &[
    "cat", "hat", "map", "bag", "fan", "jam", "man", "pan", "rat", "sad", "van", "cap",
    "bat", "ham", "lap", "nap", "tap", "dad", "mad", "pad", "can", "ran", "tan", "wag",
    "lamp", "hand", "flag", "crab", "clap", "snack", "black", "glad", "plan", "trap",
];

pub const OTHER_WORDS: &[&str] = &[
    "hot", "dog", "sun", "pig", "cup", "bed", "red", "fox", "top", "pen", "big", "run",
    "lip", "mud", "bus", "hen", "sit", "log", "nut", "web", "kid", "pot", "fish", "duck",
    "bell", "frog", "milk", "sock", "tent", "drum",
];

// -----------------------------------------------------------------------------
// Unified entrypoint
// -----------------------------------------------------------------------------

#[wasm_bindgen]
pub fn start_game() -> Result<(), JsValue> {
    web::start_web_game(GameConfig::default()).map_err(Into::into)
}

/// Start with a partial JSON config, e.g. `{"round_seconds": 60}`.
#[cfg(feature = "serde_json")]
#[wasm_bindgen]
pub fn start_game_with_config(json: &str) -> Result<(), JsValue> {
    let config = GameConfig::from_json(json)?;
    web::start_web_game(config).map_err(Into::into)
}
