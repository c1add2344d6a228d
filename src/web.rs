//! Browser bridge
//!
//! A `DashCat` handle for the page script. The script forwards keyboard and
//! focus events, calls `step()` once per animation frame and draws the JSON it
//! gets back. Rendering, audio playback and asset loading stay in JS.

use wasm_bindgen::prelude::*;

use crate::highscore::HighScore;
use crate::session::Session;
use crate::settings::Settings;
use crate::tuning::Tuning;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialised".into());
    }
    log::info!("Dash Cat starting...");
}

#[wasm_bindgen]
pub struct DashCat {
    session: Session,
}

#[wasm_bindgen]
impl DashCat {
    /// Create a game; `tuning_json` overrides balance values
    #[wasm_bindgen(constructor)]
    pub fn new(tuning_json: Option<String>) -> DashCat {
        let tuning = match tuning_json {
            Some(json) => Tuning::from_json_or_default(&json),
            None => Tuning::default(),
        };
        let seed = js_sys::Date::now() as u64;
        let session = Session::new(seed, tuning, Settings::load(), HighScore::load());
        DashCat { session }
    }

    /// `KeyboardEvent.code` of a pressed key
    pub fn key_down(&mut self, code: &str) {
        self.session.key_down(code);
    }

    /// `KeyboardEvent.code` of a released key
    pub fn key_up(&mut self, code: &str) {
        self.session.key_up(code);
    }

    pub fn set_focus(&mut self, has_focus: bool) {
        self.session.set_focus(has_focus);
    }

    /// Advance one frame; returns the frame view and audio commands as JSON
    pub fn step(&mut self) -> String {
        let output = self.session.step();
        match serde_json::to_string(&output) {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Failed to serialize frame: {}", e);
                String::from("{}")
            }
        }
    }

    pub fn high_score(&self) -> f64 {
        self.session.high_score.best as f64
    }
}
