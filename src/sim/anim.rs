//! Sprite-sheet animation clips
//!
//! Clips are a closed set resolved through lookup tables. The player's clip is
//! picked from (pose, silhouette, zoomies) instead of being assembled by name.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::FPS;

/// Sprite sheets the clips are cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sheet {
    Cat,
    Box,
    Bonuses,
    Small,
    Tentacle,
    Title,
}

impl Sheet {
    /// Logical asset name for the asset store (some sheets vary per level)
    pub fn asset_name(self, level: u8) -> String {
        match self {
            Sheet::Cat => "cat".to_string(),
            Sheet::Box => "box".to_string(),
            Sheet::Bonuses => "bonuses".to_string(),
            Sheet::Small => format!("small-{}", level),
            Sheet::Tentacle => "tentacle".to_string(),
            Sheet::Title => "title".to_string(),
        }
    }

    /// Size of one frame on the sheet
    pub fn frame_size(self) -> Vec2 {
        match self {
            Sheet::Cat => Vec2::new(75.0, 52.0),
            Sheet::Box => Vec2::new(100.0, 78.0),
            Sheet::Bonuses => Vec2::new(42.0, 36.0),
            Sheet::Small => Vec2::new(40.0, 45.0),
            Sheet::Tentacle => Vec2::new(47.0, 104.0),
            Sheet::Title => Vec2::new(377.0, 97.0),
        }
    }
}

/// Every animation clip in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Clip {
    CatIdle,
    CatDead,
    CatJump,
    CatFall,
    CatRun,
    CatWet,
    CatZoomieJump,
    CatZoomieFall,
    CatZoomieRun,
    CatZoomieWet,

    BoxIdle,
    BoxJump1,
    BoxJump2,
    BoxFall1,
    BoxFall2,
    BoxRun1,
    BoxRun2,
    BoxWet1,
    BoxWet2,
    BoxZoomieJump1,
    BoxZoomieJump2,
    BoxZoomieFall1,
    BoxZoomieFall2,
    BoxZoomieRun1,
    BoxZoomieRun2,
    BoxZoomieWet1,
    BoxZoomieWet2,

    BonusTuna,
    BonusCatnip,
    BonusBox,
    BonusIdle,

    SmallIdle,
    SmallActive,

    TentacleActive,
    TentacleAttract,
    TentacleIdle,

    TitleActive,
}

/// Frames and playback rate of a clip
#[derive(Debug, Clone, Copy)]
pub struct ClipDef {
    pub sheet: Sheet,
    pub frames: &'static [u16],
    /// Frames per second; 0 holds the first frame
    pub frame_rate: u32,
}

const fn def(sheet: Sheet, frames: &'static [u16], frame_rate: u32) -> ClipDef {
    ClipDef {
        sheet,
        frames,
        frame_rate,
    }
}

impl Clip {
    pub const fn def(self) -> ClipDef {
        use Sheet::*;
        match self {
            Clip::CatIdle => def(Cat, &[0, 1], 5),
            Clip::CatDead => def(Cat, &[20], 0),
            Clip::CatJump => def(Cat, &[18], 0),
            Clip::CatFall => def(Cat, &[6, 7], 10),
            Clip::CatRun => def(Cat, &[2, 3, 4, 5], 10),
            Clip::CatWet => def(Cat, &[8, 9], 10),
            Clip::CatZoomieJump => def(Cat, &[19], 0),
            Clip::CatZoomieFall => def(Cat, &[14, 15], 30),
            Clip::CatZoomieRun => def(Cat, &[10, 11, 12, 13], 30),
            Clip::CatZoomieWet => def(Cat, &[16, 17], 30),

            Clip::BoxIdle => def(Box, &[0, 1, 2], 5),
            Clip::BoxJump1 => def(Box, &[14, 15], 10),
            Clip::BoxJump2 => def(Box, &[11], 0),
            Clip::BoxFall1 => def(Box, &[16, 17, 18, 19], 10),
            Clip::BoxFall2 => def(Box, &[12, 13], 10),
            Clip::BoxRun1 | Clip::BoxWet1 => def(Box, &[7, 8, 9, 10], 10),
            Clip::BoxRun2 | Clip::BoxWet2 => def(Box, &[3, 4, 5, 6], 10),
            Clip::BoxZoomieJump1 => def(Box, &[14, 15], 20),
            Clip::BoxZoomieJump2 => def(Box, &[11], 0),
            Clip::BoxZoomieFall1 => def(Box, &[16, 17, 18, 19], 20),
            Clip::BoxZoomieFall2 => def(Box, &[12, 13], 20),
            Clip::BoxZoomieRun1 | Clip::BoxZoomieWet1 => def(Box, &[7, 8, 9, 10], 20),
            Clip::BoxZoomieRun2 | Clip::BoxZoomieWet2 => def(Box, &[3, 4, 5, 6], 20),

            Clip::BonusTuna => def(Bonuses, &[0, 1], 10),
            Clip::BonusCatnip => def(Bonuses, &[2, 3], 10),
            Clip::BonusBox => def(Bonuses, &[4, 5], 10),
            Clip::BonusIdle => def(Bonuses, &[6], 0),

            Clip::SmallIdle => def(Small, &[0], 0),
            Clip::SmallActive => def(Small, &[1, 2], 5),

            Clip::TentacleActive => def(Tentacle, &[0, 1], 5),
            Clip::TentacleAttract => def(Tentacle, &[1, 0], 5),
            Clip::TentacleIdle => def(Tentacle, &[0], 0),

            Clip::TitleActive => def(Title, &[0, 1], 5),
        }
    }
}

/// What the player's body is doing this tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pose {
    Jump,
    Fall,
    Run,
    Wet,
}

/// Player outline; the box variants are indexed by hits remaining
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Silhouette {
    Cat,
    BoxWorn,
    BoxFresh,
}

impl Silhouette {
    pub fn from_box_hits(hits: u8) -> Self {
        match hits {
            0 => Silhouette::Cat,
            1 => Silhouette::BoxWorn,
            _ => Silhouette::BoxFresh,
        }
    }

    pub fn is_boxed(self) -> bool {
        self != Silhouette::Cat
    }
}

// [silhouette][pose][zoomies]
const PLAYER_CLIPS: [[[Clip; 2]; 4]; 3] = [
    [
        [Clip::CatJump, Clip::CatZoomieJump],
        [Clip::CatFall, Clip::CatZoomieFall],
        [Clip::CatRun, Clip::CatZoomieRun],
        [Clip::CatWet, Clip::CatZoomieWet],
    ],
    [
        [Clip::BoxJump1, Clip::BoxZoomieJump1],
        [Clip::BoxFall1, Clip::BoxZoomieFall1],
        [Clip::BoxRun1, Clip::BoxZoomieRun1],
        [Clip::BoxWet1, Clip::BoxZoomieWet1],
    ],
    [
        [Clip::BoxJump2, Clip::BoxZoomieJump2],
        [Clip::BoxFall2, Clip::BoxZoomieFall2],
        [Clip::BoxRun2, Clip::BoxZoomieRun2],
        [Clip::BoxWet2, Clip::BoxZoomieWet2],
    ],
];

/// Resolve the player clip for a pose
pub fn player_clip(pose: Pose, silhouette: Silhouette, zoomies: bool) -> Clip {
    PLAYER_CLIPS[silhouette as usize][pose as usize][zoomies as usize]
}

/// Animation cursor over a clip
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Animation {
    pub clip: Clip,
    /// Index into the clip's frame list
    pub frame: usize,
    /// Ticks spent on the current frame
    pub ticks: u32,
}

impl Animation {
    pub fn new(clip: Clip) -> Self {
        Self {
            clip,
            frame: 0,
            ticks: 0,
        }
    }

    /// Switch clips; replaying the current clip keeps its cursor
    pub fn play(&mut self, clip: Clip) {
        if self.clip != clip {
            *self = Self::new(clip);
        }
    }

    /// Advance one tick
    pub fn advance(&mut self) {
        let def = self.clip.def();
        if def.frame_rate == 0 || def.frames.len() < 2 {
            return;
        }
        let ticks_per_frame = (FPS / def.frame_rate).max(1);
        self.ticks += 1;
        if self.ticks >= ticks_per_frame {
            self.ticks = 0;
            self.frame = (self.frame + 1) % def.frames.len();
        }
    }

    /// Frame index on the sheet
    pub fn sheet_frame(&self) -> u16 {
        let frames = self.clip.def().frames;
        frames[self.frame % frames.len()]
    }
}
