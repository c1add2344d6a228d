//! Positioned, animated rectangles
//!
//! Every moving thing on the playfield is an `Entity`: parallax layers, the
//! player, obstacles, bonuses and the rescue widget.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::{Animation, Clip};

/// Entity variant tag
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityKind {
    Background,
    Ground,
    /// Water; slows the world instead of costing a life
    Puddle,
    Small,
    Large,
    /// Lower half of a large obstacle, scenery only
    LargeTail,
    Tuna,
    Catnip,
    Box,
    /// Perch that carries a tuna or catnip bonus, scenery only
    Tentacle,
    Player,
    Widget,
    /// Title screen logo
    Title,
    /// Title screen instruction image
    Legend,
}

impl EntityKind {
    /// Whether touching this entity has any gameplay effect
    pub fn can_collide(self) -> bool {
        !matches!(
            self,
            EntityKind::Background
                | EntityKind::Ground
                | EntityKind::LargeTail
                | EntityKind::Tentacle
                | EntityKind::Title
                | EntityKind::Legend
        )
    }

    /// Score for letting an obstacle of this kind scroll past
    pub fn clear_score(self) -> u64 {
        match self {
            EntityKind::Puddle => 1,
            EntityKind::Small => 3,
            EntityKind::Large => 5,
            _ => 0,
        }
    }
}

/// Static images for entities without a sheet animation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Picture {
    Background,
    Ground,
    Puddle1,
    Puddle2,
    LargeHead,
    LargeTail,
    Widget,
    /// "Press Enter" prompt on the title screen
    Start,
    /// Arrow key diagram on the title screen
    Controls,
}

impl Picture {
    /// Logical asset name for the asset store (scenery varies per level)
    pub fn asset_name(self, level: u8) -> String {
        match self {
            Picture::Background => format!("background-{}", level),
            Picture::Ground => format!("ground-{}", level),
            Picture::Puddle1 => "slow-1".to_string(),
            Picture::Puddle2 => "slow-2".to_string(),
            Picture::LargeHead => format!("large-1-{}", level),
            Picture::LargeTail => format!("large-2-{}", level),
            Picture::Widget => "widget".to_string(),
            Picture::Start => "start".to_string(),
            Picture::Controls => "controls".to_string(),
        }
    }

    pub fn size(self) -> Vec2 {
        match self {
            Picture::Background => crate::consts::BACKGROUND_SIZE,
            Picture::Ground => crate::consts::GROUND_SIZE,
            Picture::Puddle1 => Vec2::new(72.0, 20.0),
            Picture::Puddle2 => Vec2::new(110.0, 20.0),
            Picture::LargeHead => Vec2::new(48.0, 108.0),
            Picture::LargeTail => Vec2::new(64.0, 76.0),
            Picture::Widget => crate::consts::WIDGET_SIZE,
            Picture::Start => Vec2::new(192.0, 32.0),
            Picture::Controls => Vec2::new(120.0, 80.0),
        }
    }
}

/// How an entity is drawn
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Visual {
    Picture(Picture),
    Anim(Animation),
}

/// A positioned rectangle with velocity and an animation cursor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: u32,
    pub kind: EntityKind,
    /// Top-left corner
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    /// Radians
    pub rotation: f32,
    pub visual: Visual,
    /// Sibling that must be removed together with this entity
    pub pair: Option<u32>,
}

impl Entity {
    pub fn with_picture(id: u32, kind: EntityKind, pos: Vec2, picture: Picture) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            size: picture.size(),
            rotation: 0.0,
            visual: Visual::Picture(picture),
            pair: None,
        }
    }

    pub fn with_clip(id: u32, kind: EntityKind, pos: Vec2, clip: Clip) -> Self {
        Self {
            id,
            kind,
            pos,
            vel: Vec2::ZERO,
            size: clip.def().sheet.frame_size(),
            rotation: 0.0,
            visual: Visual::Anim(Animation::new(clip)),
            pair: None,
        }
    }

    /// Apply velocity and step the animation by one tick
    pub fn advance(&mut self) {
        self.pos += self.vel;
        if let Visual::Anim(anim) = &mut self.visual {
            anim.advance();
        }
    }

    /// Switch to a clip (no-op if already playing it)
    pub fn play(&mut self, clip: Clip) {
        match &mut self.visual {
            Visual::Anim(anim) => anim.play(clip),
            Visual::Picture(_) => self.visual = Visual::Anim(Animation::new(clip)),
        }
    }

    pub fn clip(&self) -> Option<Clip> {
        match self.visual {
            Visual::Anim(anim) => Some(anim.clip),
            Visual::Picture(_) => None,
        }
    }

    /// Half-open rectangle overlap: [x, x+w) x [y, y+h)
    pub fn bounds_intersect(&self, other: &Entity) -> bool {
        self.pos.x < other.pos.x + other.size.x
            && other.pos.x < self.pos.x + self.size.x
            && self.pos.y < other.pos.y + other.size.y
            && other.pos.y < self.pos.y + self.size.y
    }

    /// Fully scrolled past the left edge
    pub fn is_off_screen(&self) -> bool {
        self.pos.x + self.size.x < 0.0
    }
}
