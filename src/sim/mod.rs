//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering, audio or platform dependencies

pub mod anim;
pub mod autopilot;
pub mod collision;
pub mod entity;
pub mod player;
pub mod schedule;
pub mod spawn;
pub mod state;
pub mod tick;
pub mod widget;

pub use anim::{Animation, Clip, Sheet};
pub use autopilot::autopilot;
pub use entity::{Entity, EntityKind, Picture, Visual};
pub use player::{Player, PlayerState, PlayerStatus};
pub use schedule::{Deferred, Schedule};
pub use state::{GameEvent, GameState, Hud, Message, Outcome, Phase, RoundState};
pub use tick::{DebugSpawn, TickInput, tick};
pub use widget::Widget;
