//! Obstacle and bonus spawning
//!
//! A roll in `0..=5` (or a forced roll for debug keys) picks a variant. Each
//! variant maps to fixed art, spawn offset and height. Some variants bring a
//! companion entity: the large obstacle its lower half, bonuses the tentacle
//! that carries them.

use glam::Vec2;

use super::anim::Clip;
use super::entity::{Entity, EntityKind, Picture};
use super::state::GameState;
use crate::consts::*;

/// Highest random roll
pub const MAX_ROLL: u8 = 5;

/// Obstacle variants by roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObstacleVariant {
    Puddle1,
    Puddle2,
    SmallIdle,
    SmallActive,
    Large,
}

impl ObstacleVariant {
    pub fn from_roll(roll: u8) -> Option<Self> {
        match roll {
            0 => Some(ObstacleVariant::Puddle1),
            1 => Some(ObstacleVariant::SmallIdle),
            2 => Some(ObstacleVariant::Puddle2),
            3 | 5 => Some(ObstacleVariant::Large),
            4 => Some(ObstacleVariant::SmallActive),
            _ => None,
        }
    }
}

/// Bonus variants by roll
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BonusVariant {
    Tuna,
    Box,
    Catnip,
}

impl BonusVariant {
    pub fn from_roll(roll: u8) -> Option<Self> {
        match roll {
            1 => Some(BonusVariant::Tuna),
            3 => Some(BonusVariant::Box),
            0 | 2 | 4 => Some(BonusVariant::Catnip),
            _ => None,
        }
    }
}

/// Rolls the debug keys force
pub mod forced {
    pub const PUDDLE: u8 = 2;
    pub const SMALL: u8 = 1;
    pub const LARGE: u8 = 3;
    pub const TUNA: u8 = 1;
    pub const BOX: u8 = 3;
    pub const CATNIP: u8 = 2;
}

/// A freshly built entity and anything that travels with it
#[derive(Debug, Clone)]
pub struct Spawn {
    pub lead: Entity,
    pub companion: Option<Entity>,
}

/// How a variant looks
enum Look {
    Picture(Picture),
    Clip(Clip),
}

/// Build an entity just past the right edge: `spawn_x` further right, `offset`
/// down from the ground line
fn place(state: &mut GameState, kind: EntityKind, look: Look, spawn_x: f32, offset: f32) -> Entity {
    let id = state.next_entity_id();
    let pos = Vec2::new(WIDTH + spawn_x, HEIGHT - GROUND_OFFSET + offset);
    let mut entity = match look {
        Look::Picture(picture) => Entity::with_picture(id, kind, pos, picture),
        Look::Clip(clip) => Entity::with_clip(id, kind, pos, clip),
    };
    entity.vel.x = state.scroll_dx();
    entity
}

/// Build the next obstacle; `roll` forces the variant
pub fn spawn_obstacle(state: &mut GameState, roll: Option<u8>) -> Option<Spawn> {
    let roll = match roll {
        Some(roll) => roll,
        None => state.roll(MAX_ROLL),
    };
    let variant = ObstacleVariant::from_roll(roll)?;

    let spawn = match variant {
        ObstacleVariant::Puddle1 => Spawn {
            lead: place(state, EntityKind::Puddle, Look::Picture(Picture::Puddle1), 148.0, 48.0),
            companion: None,
        },
        ObstacleVariant::Puddle2 => Spawn {
            lead: place(state, EntityKind::Puddle, Look::Picture(Picture::Puddle2), 221.0, 48.0),
            companion: None,
        },
        ObstacleVariant::SmallIdle => Spawn {
            lead: place(state, EntityKind::Small, Look::Clip(Clip::SmallIdle), 40.0, 3.0),
            companion: None,
        },
        ObstacleVariant::SmallActive => Spawn {
            lead: place(state, EntityKind::Small, Look::Clip(Clip::SmallActive), 40.0, 3.0),
            companion: None,
        },
        ObstacleVariant::Large => {
            let mut head = place(state, EntityKind::Large, Look::Picture(Picture::LargeHead), 36.0, -60.0);
            let mut tail = place(state, EntityKind::LargeTail, Look::Picture(Picture::LargeTail), 72.0, -28.0);
            head.pair = Some(tail.id);
            tail.pair = Some(head.id);
            Spawn {
                lead: head,
                companion: Some(tail),
            }
        }
    };
    Some(spawn)
}

/// Build the next bonus; `None` when the roll is blank or suppressed
pub fn spawn_bonus(state: &mut GameState, roll: Option<u8>) -> Option<Spawn> {
    let roll = match roll {
        Some(roll) => roll,
        None => state.roll(MAX_ROLL),
    };
    let variant = BonusVariant::from_roll(roll)?;

    let spawn = match variant {
        BonusVariant::Tuna => {
            if state.round.lives >= state.tuning.max_lives {
                return None;
            }
            Spawn {
                lead: place(state, EntityKind::Tuna, Look::Clip(Clip::BonusTuna), 48.0, -100.0),
                companion: Some(tentacle(state)),
            }
        }
        BonusVariant::Box => {
            if state.player.status.has_box > 0 {
                return None;
            }
            Spawn {
                lead: place(state, EntityKind::Box, Look::Clip(Clip::BoxIdle), 100.0, -6.0),
                companion: None,
            }
        }
        BonusVariant::Catnip => Spawn {
            lead: place(state, EntityKind::Catnip, Look::Clip(Clip::BonusCatnip), 48.0, -100.0),
            companion: Some(tentacle(state)),
        },
    };
    Some(spawn)
}

fn tentacle(state: &mut GameState) -> Entity {
    place(state, EntityKind::Tentacle, Look::Clip(Clip::TentacleActive), 47.0, -56.0)
}

/// Append a spawn to the obstacle collection
pub fn enqueue_obstacle(state: &mut GameState, spawn: Spawn) {
    log::debug!("Spawned {:?} at tick {}", spawn.lead.kind, state.round.elapsed_ticks);
    state.obstacles.push(spawn.lead);
    state.obstacles.extend(spawn.companion);
}

/// Append a spawn to the bonus collection
pub fn enqueue_bonus(state: &mut GameState, spawn: Spawn) {
    log::debug!("Spawned {:?} at tick {}", spawn.lead.kind, state.round.elapsed_ticks);
    state.bonuses.push(spawn.lead);
    state.bonuses.extend(spawn.companion);
}
