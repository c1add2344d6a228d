//! Host-facing game session
//!
//! Owns the simulation plus everything around it: keyboard state, the audio
//! gate and the persisted settings and high score. One `step()` per display
//! frame yields the frame view and the audio commands to play.

use crate::audio::{AudioCommand, AudioGate, Cue};
use crate::highscore::HighScore;
use crate::input::InputState;
use crate::settings::Settings;
use crate::sim::{GameEvent, GameState, TickInput, tick};
use crate::tuning::Tuning;
use crate::view::{AudioOut, FrameView, StepOutput};

pub struct Session {
    pub state: GameState,
    pub input: InputState,
    pub settings: Settings,
    pub high_score: HighScore,
    gate: AudioGate,
    /// Commands produced between steps (focus changes)
    pending_audio: Vec<AudioCommand>,
}

impl Session {
    pub fn new(seed: u64, tuning: Tuning, settings: Settings, high_score: HighScore) -> Self {
        log::info!("Starting session with seed {} (best {})", seed, high_score.best);
        let state = GameState::new(seed, tuning, high_score.best);
        let mut gate = AudioGate::new(&settings);
        let pending_audio = [
            AudioCommand::Rewind(Cue::Attract),
            AudioCommand::Loop(Cue::Attract),
        ]
        .into_iter()
        .filter_map(|cmd| gate.filter(cmd))
        .collect();
        Self {
            state,
            input: InputState::new(),
            settings,
            high_score,
            gate,
            pending_audio,
        }
    }

    pub fn key_down(&mut self, code: &str) {
        self.input.key_down(code);
    }

    pub fn key_up(&mut self, code: &str) {
        self.input.key_up(code);
    }

    /// Window focus changed
    pub fn set_focus(&mut self, has_focus: bool) {
        if !has_focus {
            self.input.release_all();
        }
        let commands = self.gate.set_focus(has_focus);
        self.pending_audio.extend(commands);
    }

    /// Advance one frame from the keyboard state
    pub fn step(&mut self) -> StepOutput {
        let input = self.input.take_tick_input(self.settings.debug_keys);
        self.step_with(&input)
    }

    /// Advance one frame with explicit input
    pub fn step_with(&mut self, input: &TickInput) -> StepOutput {
        if self.input.take_music_toggle() {
            let commands = self.gate.toggle_music();
            self.pending_audio.extend(commands);
            self.settings.music_muted = self.gate.music_muted();
            self.settings.save();
        }

        tick(&mut self.state, input);

        let mut commands = std::mem::take(&mut self.pending_audio);
        for event in self.state.drain_events() {
            match event {
                GameEvent::Audio(command) => {
                    if let Some(command) = self.gate.filter(command) {
                        commands.push(command);
                    }
                }
                GameEvent::NewHighScore(score) => {
                    if self.high_score.record(score) {
                        self.high_score.save();
                    }
                }
            }
        }

        let audio = commands
            .into_iter()
            .map(|command| {
                let cue = command.cue();
                AudioOut {
                    command,
                    asset: cue.asset_name(),
                    volume: self.settings.volume_for(cue),
                }
            })
            .collect();

        StepOutput {
            view: FrameView::capture(&self.state),
            audio,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Outcome, Phase};

    fn session() -> Session {
        Session::new(21, Tuning::default(), Settings::default(), HighScore::new(0))
    }

    fn press(session: &mut Session, code: &str) -> StepOutput {
        session.key_down(code);
        session.key_up(code);
        session.step()
    }

    #[test]
    fn test_first_step_starts_attract_music() {
        let mut session = session();
        let out = session.step();
        assert_eq!(out.view.phase, Phase::Attract);
        assert!(out.audio.iter().any(|a| a.command == AudioCommand::Loop(Cue::Attract)));
        assert!(session.step().audio.is_empty());
    }

    #[test]
    fn test_enter_starts_round() {
        let mut session = session();
        let out = press(&mut session, "Enter");
        assert_eq!(out.view.phase, Phase::Running);
        let level = out
            .audio
            .iter()
            .find(|a| a.command == AudioCommand::Loop(Cue::Level(1)))
            .unwrap();
        assert_eq!(level.asset, "level-1");
        assert!((level.volume - 0.56).abs() < 1e-6);
    }

    #[test]
    fn test_muted_music_is_filtered() {
        let mut session = session();
        session.key_up("KeyM");
        session.step();
        assert!(session.settings.music_muted);

        let out = press(&mut session, "Enter");
        assert_eq!(out.view.phase, Phase::Running);
        let playing_music = out.audio.iter().any(|a| {
            matches!(a.command, AudioCommand::Loop(cue) | AudioCommand::Play(cue) if cue.is_music())
        });
        assert!(!playing_music);
    }

    #[test]
    fn test_new_high_score_recorded() {
        let mut session = session();
        press(&mut session, "Enter");
        session.state.round.score = 120;
        session.state.round.lives = 1;
        crate::sim::collision::finish_round(&mut session.state, Outcome::Defeat);
        session.step();
        assert_eq!(session.high_score.best, 120);
    }

    #[test]
    fn test_blur_releases_keys() {
        let mut session = session();
        press(&mut session, "Enter");
        session.key_down("Space");
        session.set_focus(false);
        let out = session.step();
        assert!(out.audio.iter().any(|a| a.command == AudioCommand::Pause(Cue::Level(1))));
        assert!(!session.input.jump_held());
    }
}
