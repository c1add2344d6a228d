//! Audio cues and playback policy
//!
//! The simulation never touches audio hardware. It emits fire-and-forget
//! `AudioCommand`s over named cues. `AudioGate` applies the player's mute
//! setting and window focus before the commands reach the host's audio player.

use serde::{Deserialize, Serialize};

use crate::settings::Settings;

/// Named audio clips
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    /// Title screen music
    Attract,
    /// Round music for a level
    Level(u8),
    Jump,
    /// Box or catnip pickup
    Bonus,
    /// Looped while zoomies last
    Catnip,
    /// Tuna pickup
    Meow,
    Crash,
    /// Hitting a small obstacle
    Small(u8),
    /// Landing in a puddle
    Splash(u8),
    Death,
    Victory,
}

impl Cue {
    /// Logical asset name for the asset store
    pub fn asset_name(self) -> String {
        match self {
            Cue::Attract => "attract".to_string(),
            Cue::Level(level) => format!("level-{}", level),
            Cue::Jump => "jump".to_string(),
            Cue::Bonus => "bonuses".to_string(),
            Cue::Catnip => "catnip".to_string(),
            Cue::Meow => "meow".to_string(),
            Cue::Crash => "crash".to_string(),
            Cue::Small(level) => format!("small-{}", level),
            Cue::Splash(level) => format!("slow-{}", level),
            Cue::Death => "death".to_string(),
            Cue::Victory => "victory".to_string(),
        }
    }

    /// Music tracks are governed by the mute toggle
    pub fn is_music(self) -> bool {
        matches!(self, Cue::Attract | Cue::Level(_))
    }
}

/// Fire-and-forget command for the host's audio player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", content = "cue")]
pub enum AudioCommand {
    /// Play once from the current position
    Play(Cue),
    /// Play repeatedly
    Loop(Cue),
    Pause(Cue),
    /// Seek back to the start
    Rewind(Cue),
}

impl AudioCommand {
    pub fn cue(&self) -> Cue {
        match *self {
            AudioCommand::Play(cue)
            | AudioCommand::Loop(cue)
            | AudioCommand::Pause(cue)
            | AudioCommand::Rewind(cue) => cue,
        }
    }
}

/// Mute and focus policy between the simulation and the audio player
#[derive(Debug, Clone)]
pub struct AudioGate {
    music_muted: bool,
    has_focus: bool,
    mute_on_blur: bool,
    /// Track the simulation last asked to play, and whether it still wants it
    current_music: Option<Cue>,
    music_wanted: bool,
    catnip_wanted: bool,
}

impl AudioGate {
    pub fn new(settings: &Settings) -> Self {
        Self {
            music_muted: settings.music_muted,
            has_focus: true,
            mute_on_blur: settings.mute_on_blur,
            current_music: None,
            music_wanted: false,
            catnip_wanted: false,
        }
    }

    pub fn music_muted(&self) -> bool {
        self.music_muted
    }

    fn silenced(&self) -> bool {
        self.mute_on_blur && !self.has_focus
    }

    /// Filter one command from the simulation
    pub fn filter(&mut self, command: AudioCommand) -> Option<AudioCommand> {
        let cue = command.cue();
        match command {
            AudioCommand::Play(_) | AudioCommand::Loop(_) if cue.is_music() => {
                self.current_music = Some(cue);
                self.music_wanted = true;
                if self.music_muted || self.silenced() {
                    return None;
                }
            }
            AudioCommand::Pause(_) if cue.is_music() => {
                if self.current_music == Some(cue) {
                    self.music_wanted = false;
                }
            }
            AudioCommand::Loop(Cue::Catnip) => {
                self.catnip_wanted = true;
                if self.silenced() {
                    return None;
                }
            }
            AudioCommand::Pause(Cue::Catnip) => self.catnip_wanted = false,
            _ => {}
        }
        Some(command)
    }

    /// Window focus changed; returns commands to pause or resume playback
    pub fn set_focus(&mut self, has_focus: bool) -> Vec<AudioCommand> {
        if self.has_focus == has_focus {
            return Vec::new();
        }
        self.has_focus = has_focus;
        if !self.mute_on_blur {
            return Vec::new();
        }

        let mut out = Vec::new();
        if has_focus {
            if let Some(track) = self.current_music {
                if self.music_wanted && !self.music_muted {
                    out.push(AudioCommand::Loop(track));
                }
            }
            if self.catnip_wanted {
                out.push(AudioCommand::Loop(Cue::Catnip));
            }
        } else {
            if let Some(track) = self.current_music {
                out.push(AudioCommand::Pause(track));
            }
            out.push(AudioCommand::Pause(Cue::Catnip));
        }
        out
    }

    /// Flip the music mute; returns commands to apply it immediately
    pub fn toggle_music(&mut self) -> Vec<AudioCommand> {
        self.music_muted = !self.music_muted;
        log::info!("Music {}", if self.music_muted { "muted" } else { "unmuted" });

        let Some(track) = self.current_music else {
            return Vec::new();
        };
        if self.music_muted {
            vec![AudioCommand::Pause(track)]
        } else if self.music_wanted && !self.silenced() {
            vec![AudioCommand::Loop(track)]
        } else {
            Vec::new()
        }
    }
}
