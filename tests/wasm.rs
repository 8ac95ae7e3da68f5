// Browser smoke test: `wasm-pack test --headless --firefox`.
#![cfg(target_arch = "wasm32")]

use short_a_moles::game::ClickOutcome;
use short_a_moles::rng::SeededRandom;
use short_a_moles::{Game, GameConfig, HeadlessPresenter};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn entropy_seeded_round_runs_in_browser() {
    let mut game =
        Game::new(GameConfig::default(), HeadlessPresenter::new(), SeededRandom::from_entropy()).unwrap();
    assert_eq!(game.click(0.0, 0.0, 0.0), ClickOutcome::Started);
    game.advance(30_000.0);
    assert_eq!(game.time_remaining(), 0);
}

#[wasm_bindgen_test]
fn start_game_mounts_canvas() {
    short_a_moles::start_game().unwrap();
    let doc = web_sys::window().unwrap().document().unwrap();
    assert!(doc.get_element_by_id("sam-canvas").is_some());
    assert!(doc.get_element_by_id("sam-hud").is_some());
}
