//! Player preferences
//!
//! Persisted separately from the high score in LocalStorage.

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Audio ===
    /// Round and title music off (effects still play)
    pub music_muted: bool,
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Music volume (0.0 - 1.0)
    pub music_volume: f32,
    /// Pause music and loops when the window loses focus
    pub mute_on_blur: bool,

    // === Debug ===
    /// Honour the debug spawn keys (B, C, L, S, T, W)
    pub debug_keys: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            music_muted: false,
            master_volume: 0.8,
            sfx_volume: 1.0,
            music_volume: 0.7,
            mute_on_blur: true,
            debug_keys: true,
        }
    }
}

impl Settings {
    /// Effective playback volume for a cue
    pub fn volume_for(&self, cue: crate::audio::Cue) -> f32 {
        let channel = if cue.is_music() {
            self.music_volume
        } else {
            self.sfx_volume
        };
        (self.master_volume * channel).clamp(0.0, 1.0)
    }

    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dash-cat-settings";

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match serde_json::from_str(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Discarding unreadable settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }

    /// Save settings to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(json) = serde_json::to_string(self) {
                if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                    log::warn!("Failed to save settings");
                    return;
                }
                log::info!("Settings saved");
            }
        }
    }

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio::Cue;

    #[test]
    fn test_volume_channels() {
        let settings = Settings::default();
        assert!((settings.volume_for(Cue::Level(1)) - 0.56).abs() < 1e-6);
        assert!((settings.volume_for(Cue::Jump) - 0.8).abs() < 1e-6);
    }

    #[test]
    fn test_old_saves_fill_new_fields() {
        let settings: Settings = serde_json::from_str(r#"{ "music_muted": true }"#).unwrap();
        assert!(settings.music_muted);
        assert!(settings.mute_on_blur);
        assert_eq!(settings.sfx_volume, 1.0);
    }
}
