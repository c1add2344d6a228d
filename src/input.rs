//! Keyboard input
//!
//! The host forwards DOM `KeyboardEvent.code` strings. Held keys drive the
//! continuous controls (jump, fast fall); one-shot actions fire on key release
//! and are consumed by the next tick.

use std::collections::HashSet;

use crate::sim::{DebugSpawn, TickInput};

/// One-shot actions bound to key releases
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    /// Start, pause or resume
    Confirm,
    ToggleMusic,
    Spawn(DebugSpawn),
}

impl KeyAction {
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "Enter" | "Escape" | "NumpadEnter" => Some(KeyAction::Confirm),
            "KeyM" => Some(KeyAction::ToggleMusic),
            "KeyB" => Some(KeyAction::Spawn(DebugSpawn::Box)),
            "KeyC" => Some(KeyAction::Spawn(DebugSpawn::Catnip)),
            "KeyL" => Some(KeyAction::Spawn(DebugSpawn::Large)),
            "KeyS" => Some(KeyAction::Spawn(DebugSpawn::Small)),
            "KeyT" => Some(KeyAction::Spawn(DebugSpawn::Tuna)),
            "KeyW" => Some(KeyAction::Spawn(DebugSpawn::Water)),
            _ => None,
        }
    }
}

const JUMP_KEYS: [&str; 2] = ["ArrowUp", "Space"];
const FAST_FALL_KEY: &str = "ArrowDown";

/// Keys held right now plus actions waiting for the next tick
#[derive(Debug, Clone, Default)]
pub struct InputState {
    held: HashSet<String>,
    confirm: bool,
    toggle_music: bool,
    spawn: Option<DebugSpawn>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn key_down(&mut self, code: &str) {
        self.held.insert(code.to_string());
    }

    pub fn key_up(&mut self, code: &str) {
        self.held.remove(code);
        match KeyAction::from_code(code) {
            Some(KeyAction::Confirm) => self.confirm = true,
            Some(KeyAction::ToggleMusic) => self.toggle_music = true,
            Some(KeyAction::Spawn(spawn)) => self.spawn = Some(spawn),
            None => {}
        }
    }

    pub fn jump_held(&self) -> bool {
        JUMP_KEYS.iter().any(|key| self.held.contains(*key))
    }

    pub fn fast_fall_held(&self) -> bool {
        self.held.contains(FAST_FALL_KEY)
    }

    /// Build this tick's input, consuming pending one-shot actions
    pub fn take_tick_input(&mut self, debug_keys: bool) -> TickInput {
        let spawn = self.spawn.take();
        TickInput {
            jump: self.jump_held(),
            fast_fall: self.fast_fall_held(),
            confirm: std::mem::take(&mut self.confirm),
            debug_spawn: if debug_keys { spawn } else { None },
        }
    }

    pub fn take_music_toggle(&mut self) -> bool {
        std::mem::take(&mut self.toggle_music)
    }

    /// Forget held keys (focus lost; key-up events will never arrive)
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}
