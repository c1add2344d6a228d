//! Rescue widget
//!
//! Bobs on a fixed sink/rise cycle while drifting toward the player. Catching
//! it wins the round.

use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityKind, Picture};
use crate::consts::*;
use crate::tuning::Tuning;

/// Ticks spent sinking before the widget starts to rise
const SINK_TICKS: u32 = 100;
/// Length of a full bob cycle
const CYCLE_TICKS: u32 = 300;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Widget {
    pub body: Entity,
    /// Position within the bob cycle
    pub drift_ticks: u32,
}

impl Widget {
    pub fn new(id: u32, tuning: &Tuning) -> Self {
        let mut body = Entity::with_picture(id, EntityKind::Widget, WIDGET_START, Picture::Widget);
        body.vel.x = tuning.widget_speed;
        Self {
            body,
            drift_ticks: 0,
        }
    }

    /// Back to the start position, keeping the current drift
    pub fn reset_position(&mut self) {
        self.body.pos = WIDGET_START;
    }

    /// Full reset for a new round
    pub fn reset(&mut self, tuning: &Tuning) {
        self.reset_position();
        self.body.vel.x = tuning.widget_speed;
        self.body.rotation = 0.0;
        self.drift_ticks = 0;
    }

    pub fn set_drift(&mut self, dx: f32) {
        self.body.vel.x = dx;
    }

    pub fn drift(&self) -> f32 {
        self.body.vel.x
    }

    pub fn update(&mut self, tuning: &Tuning) {
        self.drift_ticks += 1;
        if self.drift_ticks <= SINK_TICKS {
            self.body.rotation = WIDGET_TILT;
            self.body.pos.y += tuning.widget_drag;
        } else if self.drift_ticks <= CYCLE_TICKS {
            self.body.rotation = -WIDGET_TILT;
            self.body.pos.y -= tuning.widget_lift;
        } else {
            self.drift_ticks = 0;
        }
        if self.body.pos.x > WIDGET_MAX_X {
            self.body.pos.x = WIDGET_MAX_X;
        }
        self.body.advance();
    }
}
