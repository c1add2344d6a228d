//! Serializable frame snapshot
//!
//! Everything an external renderer needs to draw one frame: HUD values and a
//! back-to-front sprite list. Rendering itself happens on the host.

use serde::{Deserialize, Serialize};

use crate::audio::AudioCommand;
use crate::sim::state::{CAPTIONS, CREDITS};
use crate::sim::{Entity, GameState, Phase, Visual};

/// One sprite to draw
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpriteView {
    /// Logical asset name (image or sprite sheet)
    pub asset: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    /// Radians
    pub rotation: f32,
    /// Frame on the sheet; `None` for plain images
    pub frame: Option<u16>,
}

impl SpriteView {
    pub fn from_entity(entity: &Entity, level: u8) -> Self {
        let (asset, frame) = match entity.visual {
            Visual::Picture(picture) => (picture.asset_name(level), None),
            Visual::Anim(anim) => (
                anim.clip.def().sheet.asset_name(level),
                Some(anim.sheet_frame()),
            ),
        };
        Self {
            asset,
            x: entity.pos.x,
            y: entity.pos.y,
            width: entity.size.x,
            height: entity.size.y,
            rotation: entity.rotation,
            frame,
        }
    }
}

/// A text label to draw over the sprites
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionView {
    pub text: String,
    pub x: f32,
    pub y: f32,
    /// `x` is the center of the text rather than its left edge
    pub centered: bool,
}

/// HUD values and sprites for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrameView {
    pub phase: Phase,
    pub score: u64,
    pub high_score: u64,
    pub lives: u8,
    pub level: u8,
    pub zoomies: bool,
    pub box_hits: u8,
    pub message: Option<String>,
    pub credits: Option<String>,
    /// Back to front
    pub sprites: Vec<SpriteView>,
    /// Title screen labels, empty outside Attract
    pub captions: Vec<CaptionView>,
}

impl FrameView {
    pub fn capture(state: &GameState) -> Self {
        let level = state.round.level;
        let scenery = state.backgrounds.iter().chain(state.grounds.iter());
        let sprites: Vec<SpriteView> = if state.phase == Phase::Attract {
            scenery
                .chain(state.showcase.iter())
                .map(|e| SpriteView::from_entity(e, level))
                .collect()
        } else {
            scenery
                .chain(std::iter::once(&state.player.body))
                .chain(std::iter::once(&state.widget.body))
                .chain(state.bonuses.iter())
                .chain(state.obstacles.iter())
                .map(|e| SpriteView::from_entity(e, level))
                .collect()
        };
        let captions = if state.phase == Phase::Attract {
            CAPTIONS
                .iter()
                .map(|c| CaptionView {
                    text: c.text.to_string(),
                    x: c.x,
                    y: c.y,
                    centered: c.centered,
                })
                .collect()
        } else {
            Vec::new()
        };

        Self {
            phase: state.phase,
            score: state.round.score,
            high_score: state.round.displayed_high_score(),
            lives: state.round.lives,
            level,
            zoomies: state.player.status.zoomies(),
            box_hits: state.player.status.has_box,
            message: state.hud.message.map(|m| m.text().to_string()),
            credits: state
                .hud
                .credits
                .then(|| CREDITS.to_string()),
            sprites,
            captions,
        }
    }
}

/// An audio command resolved for the host's player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AudioOut {
    pub command: AudioCommand,
    pub asset: String,
    pub volume: f32,
}

/// Everything the host consumes after one step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepOutput {
    pub view: FrameView,
    pub audio: Vec<AudioOut>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{TickInput, tick};
    use crate::tuning::Tuning;

    #[test]
    fn test_attract_shows_showcase() {
        let state = GameState::new(1, Tuning::default(), 77);
        let view = FrameView::capture(&state);
        assert_eq!(view.phase, Phase::Attract);
        assert_eq!(view.high_score, 77);
        assert_eq!(view.sprites.len(), 4 + state.showcase.len());
        assert!(view.sprites.iter().any(|s| s.asset == "title"));
        assert!(view.sprites.iter().any(|s| s.asset == "start"));
        assert!(view.sprites.iter().any(|s| s.asset == "controls"));
        assert!(view.message.is_none());

        let texts: Vec<&str> = view.captions.iter().map(|c| c.text.as_str()).collect();
        assert_eq!(texts, ["Collect these", "Avoid these", "Jump", "Fall faster"]);
        assert!(view.captions[2].centered);
        assert_eq!(view.captions[3].x, 300.0);
    }

    #[test]
    fn test_running_draw_order() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        tick(
            &mut state,
            &TickInput {
                confirm: true,
                ..Default::default()
            },
        );
        let view = FrameView::capture(&state);
        assert_eq!(view.sprites.len(), 6);
        assert_eq!(view.sprites[0].asset, "background-1");
        assert_eq!(view.sprites[2].asset, "ground-1");
        assert_eq!(view.sprites[4].asset, "cat");
        assert_eq!(view.sprites[5].asset, "widget");
        assert_eq!(view.sprites[5].frame, None);
        assert!(view.sprites[4].frame.is_some());
        assert!(view.captions.is_empty());
    }

    #[test]
    fn test_credits_after_round_ends() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        assert!(FrameView::capture(&state).credits.is_none());
        state.hud.credits = true;
        let credits = FrameView::capture(&state).credits;
        assert_eq!(
            credits.as_deref(),
            Some("Art by Shaye Wong • Sound by Nate Reinauer • Programming by Randall Spence")
        );
    }

    #[test]
    fn test_high_score_follows_running_score() {
        let mut state = GameState::new(1, Tuning::default(), 10);
        state.round.score = 25;
        assert_eq!(FrameView::capture(&state).high_score, 25);
    }

    #[test]
    fn test_serializes_to_json() {
        let state = GameState::new(1, Tuning::default(), 0);
        let json = serde_json::to_string(&FrameView::capture(&state)).unwrap();
        assert!(json.contains("\"phase\":\"Attract\""));
    }
}
