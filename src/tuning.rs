//! Data-driven game balance
//!
//! Every number the round controller escalates or counts down lives here so a
//! balance pass never touches simulation code. Missing JSON fields fall back to
//! the shipped defaults.

use serde::{Deserialize, Serialize};

/// Gameplay balance knobs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Scrolling ===
    /// Scroll speed at round start (units/tick)
    pub speed: f32,
    /// Scroll speed ceiling
    pub speed_max: f32,
    /// Scroll speed gained every running tick
    pub speed_step: f32,

    // === Spawning ===
    /// Ticks between obstacle spawns at round start
    pub spawn_interval: u32,
    /// Floor for the obstacle spawn interval
    pub spawn_interval_min: u32,
    /// Starting difficulty tier
    pub difficulty: u32,
    /// Score needed per difficulty tier before escalating
    pub difficulty_score_step: u64,

    // === Lives ===
    pub lives: u8,
    pub max_lives: u8,

    // === Jumping ===
    /// Upward displacement per held tick
    pub jump_power: f32,
    /// Fall rate per tick (doubled while fast-falling)
    pub gravity: f32,
    /// Held ticks before a jump stops rising
    pub jump_max_ticks: u32,

    // === Rescue widget ===
    /// Baseline horizontal drift
    pub widget_speed: f32,
    /// Sink per tick during the first drift phase
    pub widget_drag: f32,
    /// Rise per tick during the second drift phase
    pub widget_lift: f32,
    /// Drift retreat while the cat is wet, at round start
    pub thrust: f32,
    /// Thrust after the first escalation; later tiers add `thrust_step`
    pub thrust_floor: f32,
    pub thrust_step: f32,

    // === Status effects ===
    pub zoomie_ticks: u32,

    // === Scoring ===
    /// Ticks between passive score awards
    pub score_interval: u64,
    pub victory_bonus: u64,
    pub victory_bonus_per_life: u64,

    // === Timers (frames) ===
    pub crash_delay: u64,
    pub over_delay: u64,
    pub message_ticks: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            speed: 6.0,
            speed_max: 12.0,
            speed_step: 0.00075,

            spawn_interval: 300,
            spawn_interval_min: 90,
            difficulty: 1,
            difficulty_score_step: 10,

            lives: 3,
            max_lives: 9,

            jump_power: 12.0,
            gravity: 4.0,
            jump_max_ticks: 24,

            widget_speed: -0.075,
            widget_drag: 0.4,
            widget_lift: 0.2,
            thrust: 1.0,
            thrust_floor: 6.0,
            thrust_step: 0.15,

            zoomie_ticks: 300,

            score_interval: 60,
            victory_bonus: 1000,
            victory_bonus_per_life: 100,

            // 1.5s and 12s at 60 Hz
            crash_delay: 90,
            over_delay: 720,
            message_ticks: 360,
        }
    }
}

impl Tuning {
    /// Parse a tuning override; absent fields keep their defaults
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Parse a tuning override, logging and falling back to defaults on error
    pub fn from_json_or_default(json: &str) -> Self {
        match Self::from_json(json) {
            Ok(tuning) => tuning,
            Err(e) => {
                log::warn!("Ignoring invalid tuning override: {}", e);
                Self::default()
            }
        }
    }
}
