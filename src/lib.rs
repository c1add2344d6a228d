//! Dash Cat - a side-scrolling cat runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player, spawning, collisions, round flow)
//! - `input`: Keyboard mapping into per-tick input
//! - `session`: Host-facing loop glue (input, audio gate, persistence)
//! - `audio`: Audio cue naming and mute/focus gating
//! - `view`: Serializable frame snapshot for an external renderer
//! - `highscore`: Persisted best score
//! - `settings`: Player preferences
//! - `tuning`: Data-driven game balance

pub mod audio;
pub mod highscore;
pub mod input;
pub mod session;
pub mod settings;
pub mod sim;
pub mod tuning;
pub mod view;

#[cfg(target_arch = "wasm32")]
pub mod web;

pub use highscore::HighScore;
pub use settings::Settings;
pub use tuning::Tuning;

/// Game configuration constants
pub mod consts {
    use glam::Vec2;

    /// Fixed simulation rate of the frame driver
    pub const FPS: u32 = 60;

    /// Playfield dimensions
    pub const WIDTH: f32 = 600.0;
    pub const HEIGHT: f32 = 400.0;

    /// Ground line, measured up from the bottom edge
    pub const GROUND_OFFSET: f32 = 96.0;
    /// Ground line while riding in a box (28 units higher)
    pub const BOX_GROUND_OFFSET: f32 = 124.0;

    /// Player column
    pub const PLAYER_X: f32 = WIDTH / 6.0;
    /// Plain cat hitbox (one sheet frame)
    pub const CAT_SIZE: Vec2 = Vec2::new(75.0, 52.0);
    /// Boxed cat hitbox
    pub const BOXED_SIZE: Vec2 = Vec2::new(100.0, 78.0);
    /// Nose-up tilt while jumping (-15 degrees)
    pub const JUMP_TILT: f32 = -15.0 * std::f32::consts::PI / 180.0;

    /// Rescue widget
    pub const WIDGET_SIZE: Vec2 = Vec2::new(33.0, 30.0);
    pub const WIDGET_START: Vec2 = Vec2::new(WIDTH - 30.0, HEIGHT - 150.0);
    pub const WIDGET_MAX_X: f32 = WIDTH - 33.0;
    pub const WIDGET_TILT: f32 = 5.0 * std::f32::consts::PI / 180.0;

    /// Parallax layers
    pub const BACKGROUND_SIZE: Vec2 = Vec2::new(600.0, 148.0);
    pub const BACKGROUND_Y: f32 = HEIGHT - 148.0;
    pub const BACKGROUND_DX: f32 = -0.25;
    pub const GROUND_SIZE: Vec2 = Vec2::new(1200.0, 53.0);
    pub const GROUND_Y: f32 = HEIGHT - 93.0;

    /// Highest level with its own art and music
    pub const MAX_LEVEL: u8 = 4;
}
