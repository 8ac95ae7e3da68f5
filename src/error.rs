use thiserror::Error;
use wasm_bindgen::JsValue;

/// Failures at the edges of the game: browser setup and configuration.
/// Game logic itself never errors; invalid actions are silent no-ops.
#[derive(Error, Debug)]
pub enum GameError {
    #[error("no global window")]
    NoWindow,
    #[error("window has no document")]
    NoDocument,
    #[error("document has no body")]
    NoBody,
    #[error("canvas has no 2d context")]
    NoCanvasContext,
    #[error("DOM operation failed: {0}")]
    Dom(String),
    #[error("invalid game config: {0}")]
    InvalidConfig(String),
    #[cfg(feature = "serde_json")]
    #[error("could not parse game config")]
    ConfigParse(#[from] serde_json::Error),
}

impl From<JsValue> for GameError {
    fn from(value: JsValue) -> Self {
        GameError::Dom(value.as_string().unwrap_or_else(|| format!("{value:?}")))
    }
}

impl From<GameError> for JsValue {
    fn from(err: GameError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}
