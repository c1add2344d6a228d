//! The cat
//!
//! Jump, fall and run each tick, plus the boxed, wet and zoomies status
//! effects. Ground line and hitbox are derived from the box state so they can
//! never drift apart.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::anim::{Clip, Pose, Silhouette, player_clip};
use super::entity::{Entity, EntityKind};
use crate::consts::*;
use crate::tuning::Tuning;

/// Status effects carried by the player
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStatus {
    /// Box hits remaining (0 = no box)
    pub has_box: u8,
    /// Speed-boost countdown
    pub zoomie_ticks: u32,
    /// Splashed; drags the world scroll until the next obstacle clears
    pub is_wet: bool,
    pub is_jumping: bool,
    /// Ticks the jump input has been held this jump
    pub jump_ticks: u32,
    /// Lost the last life
    pub is_dead: bool,
}

impl PlayerStatus {
    pub fn silhouette(&self) -> Silhouette {
        Silhouette::from_box_hits(self.has_box)
    }

    pub fn zoomies(&self) -> bool {
        self.zoomie_ticks > 0
    }

    /// Resting Y for the current silhouette
    pub fn ground_y(&self) -> f32 {
        if self.silhouette().is_boxed() {
            HEIGHT - BOX_GROUND_OFFSET
        } else {
            HEIGHT - GROUND_OFFSET
        }
    }

    /// Hitbox for the current silhouette
    pub fn hitbox(&self) -> Vec2 {
        if self.silhouette().is_boxed() {
            BOXED_SIZE
        } else {
            CAT_SIZE
        }
    }
}

/// Coarse player state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerState {
    Running,
    Jumping,
    Falling,
    Dead,
}

/// Side effects of a player update for the round controller to apply
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerUpdate {
    /// Took off this tick
    pub jumped: bool,
    /// Zoomies ran out this tick
    pub zoomies_ended: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub body: Entity,
    pub status: PlayerStatus,
}

impl Player {
    pub fn new(id: u32) -> Self {
        let status = PlayerStatus::default();
        let pos = Vec2::new(PLAYER_X, status.ground_y());
        let mut body = Entity::with_clip(id, EntityKind::Player, pos, Clip::CatFall);
        body.size = status.hitbox();
        Self { body, status }
    }

    pub fn ground_y(&self) -> f32 {
        self.status.ground_y()
    }

    pub fn on_ground(&self) -> bool {
        self.body.pos.y >= self.ground_y()
    }

    pub fn state(&self) -> PlayerState {
        if self.status.is_dead {
            PlayerState::Dead
        } else if self.on_ground() {
            PlayerState::Running
        } else if self.status.is_jumping && self.body.rotation != 0.0 {
            PlayerState::Jumping
        } else {
            PlayerState::Falling
        }
    }

    /// Advance one tick of jump/fall/run
    pub fn update(&mut self, jump_held: bool, fast_fall: bool, tuning: &Tuning) -> PlayerUpdate {
        let mut out = PlayerUpdate::default();
        let silhouette = self.status.silhouette();

        let mut zoomies = false;
        if self.status.zoomie_ticks > 0 {
            self.status.zoomie_ticks -= 1;
            if self.status.zoomie_ticks == 0 {
                out.zoomies_ended = true;
            } else {
                zoomies = true;
            }
        }

        let jump_max = tuning.jump_max_ticks;
        if jump_held {
            self.status.jump_ticks = (self.status.jump_ticks + 1).min(jump_max);
            if self.status.jump_ticks < jump_max {
                self.body.play(player_clip(Pose::Jump, silhouette, zoomies));
                self.body.rotation = JUMP_TILT;
                self.body.pos.y -= tuning.jump_power;
            }
            if !self.status.is_jumping {
                self.status.is_jumping = true;
                out.jumped = true;
            }
        } else {
            // Releasing never leaves residual lift
            self.body.play(player_clip(Pose::Fall, silhouette, zoomies));
            self.body.rotation = 0.0;
            self.status.jump_ticks = jump_max;
        }

        let ground = self.ground_y();
        if self.body.pos.y < ground {
            let rate = if fast_fall {
                tuning.gravity * 2.0
            } else {
                tuning.gravity
            };
            self.body.pos.y += rate.min(ground - self.body.pos.y);
        } else {
            self.body.pos.y = ground;
            self.status.is_jumping = false;
            self.status.jump_ticks = 0;
            let pose = if self.status.is_wet { Pose::Wet } else { Pose::Run };
            self.body.play(player_clip(pose, silhouette, zoomies));
        }

        self.body.advance();
        out
    }

    /// Climb into a fresh box
    pub fn pick_up_box(&mut self) {
        self.status.has_box = 2;
        self.apply_silhouette();
    }

    /// Spend one box hit; returns hits remaining
    pub fn absorb_hit(&mut self) -> u8 {
        self.status.has_box = self.status.has_box.saturating_sub(1);
        if self.status.has_box == 0 {
            self.apply_silhouette();
        }
        self.status.has_box
    }

    /// Lose a life: zoomies end and the death pose shows while frozen
    pub fn knock_out(&mut self, fatal: bool) {
        self.status.zoomie_ticks = 0;
        self.status.is_dead = fatal;
        self.body.play(Clip::CatDead);
    }

    /// Snap hitbox, resting line and sheet to the current silhouette
    fn apply_silhouette(&mut self) {
        self.body.size = self.status.hitbox();
        self.body.pos.y = self.ground_y();
        let pose = if self.status.is_wet { Pose::Wet } else { Pose::Run };
        self.body.play(player_clip(pose, self.status.silhouette(), self.status.zoomies()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(player: &mut Player, ticks: u32, jump: bool, fast_fall: bool) {
        let tuning = Tuning::default();
        for _ in 0..ticks {
            player.update(jump, fast_fall, &tuning);
        }
    }

    #[test]
    fn test_starts_on_ground() {
        let player = Player::new(1);
        assert_eq!(player.body.pos.y, HEIGHT - GROUND_OFFSET);
        assert_eq!(player.state(), PlayerState::Running);
    }

    #[test]
    fn test_jump_rises_then_lands() {
        let tuning = Tuning::default();
        let mut player = Player::new(1);
        let ground = player.ground_y();

        let first = player.update(true, false, &tuning);
        assert!(first.jumped);
        // 12 up, 4 down
        assert_eq!(player.body.pos.y, ground - 8.0);
        assert_eq!(player.body.rotation, JUMP_TILT);
        assert_eq!(player.state(), PlayerState::Jumping);
        assert!(!player.update(true, false, &tuning).jumped);

        // Let go: gravity brings us back without residual lift
        player.update(false, false, &tuning);
        assert_eq!(player.body.rotation, 0.0);
        assert_eq!(player.status.jump_ticks, tuning.jump_max_ticks);
        assert_eq!(player.state(), PlayerState::Falling);

        run(&mut player, 20, false, false);
        assert_eq!(player.body.pos.y, ground);
        // Landing is observed on the following tick
        player.update(false, false, &tuning);
        assert!(!player.status.is_jumping);
        assert_eq!(player.status.jump_ticks, 0);
        assert_eq!(player.body.clip(), Some(Clip::CatRun));
    }

    #[test]
    fn test_jump_height_is_capped() {
        let mut player = Player::new(1);
        let ground = player.ground_y();
        run(&mut player, 200, true, false);
        // Held forever: rise stops, gravity wins, cat hops again from the ground
        assert!(player.body.pos.y <= ground);
        let mut lowest = ground;
        let tuning = Tuning::default();
        for _ in 0..200 {
            player.update(true, false, &tuning);
            lowest = lowest.min(player.body.pos.y);
        }
        // 23 rising ticks at a net 8 units each
        assert!(lowest >= ground - 23.0 * 8.0);
    }

    #[test]
    fn test_fast_fall_doubles_gravity() {
        let tuning = Tuning::default();
        let mut player = Player::new(1);
        run(&mut player, 10, true, false);
        let y = player.body.pos.y;
        player.update(false, true, &tuning);
        assert_eq!(player.body.pos.y, y + 8.0);
    }

    #[test]
    fn test_never_falls_below_ground() {
        let tuning = Tuning::default();
        let mut player = Player::new(1);
        player.body.pos.y = player.ground_y() - 3.0;
        player.update(false, true, &tuning);
        assert_eq!(player.body.pos.y, player.ground_y());
    }

    #[test]
    fn test_box_changes_ground_and_hitbox() {
        let mut player = Player::new(1);
        let cat_ground = player.ground_y();

        player.pick_up_box();
        assert_eq!(player.status.has_box, 2);
        assert_eq!(cat_ground - player.ground_y(), 28.0);
        assert_eq!(player.body.size, BOXED_SIZE);
        assert_eq!(player.body.pos.y, player.ground_y());

        assert_eq!(player.absorb_hit(), 1);
        assert_eq!(player.body.size, BOXED_SIZE);
        assert_eq!(player.ground_y(), HEIGHT - BOX_GROUND_OFFSET);

        assert_eq!(player.absorb_hit(), 0);
        assert_eq!(player.body.size, CAT_SIZE);
        assert_eq!(player.ground_y(), cat_ground);
        assert_eq!(player.body.pos.y, cat_ground);
    }

    #[test]
    fn test_boxed_clips_follow_hits() {
        let tuning = Tuning::default();
        let mut player = Player::new(1);
        player.pick_up_box();
        player.update(false, false, &tuning);
        assert_eq!(player.body.clip(), Some(Clip::BoxRun2));
        player.absorb_hit();
        player.update(false, false, &tuning);
        assert_eq!(player.body.clip(), Some(Clip::BoxRun1));
    }

    #[test]
    fn test_wet_and_zoomie_run_clips() {
        let tuning = Tuning::default();
        let mut player = Player::new(1);
        player.status.is_wet = true;
        player.update(false, false, &tuning);
        assert_eq!(player.body.clip(), Some(Clip::CatWet));

        player.status.zoomie_ticks = 10;
        player.update(false, false, &tuning);
        assert_eq!(player.body.clip(), Some(Clip::CatZoomieWet));
    }

    #[test]
    fn test_zoomies_count_down() {
        let tuning = Tuning::default();
        let mut player = Player::new(1);
        player.status.zoomie_ticks = 2;
        assert!(!player.update(false, false, &tuning).zoomies_ended);
        assert!(player.update(false, false, &tuning).zoomies_ended);
        assert!(!player.status.zoomies());
        // Last tick already shows the plain clip
        assert_eq!(player.body.clip(), Some(Clip::CatRun));
        assert!(!player.update(false, false, &tuning).zoomies_ended);
    }

    #[test]
    fn test_knock_out() {
        let mut player = Player::new(1);
        player.status.zoomie_ticks = 50;
        player.knock_out(false);
        assert_eq!(player.status.zoomie_ticks, 0);
        assert_eq!(player.body.clip(), Some(Clip::CatDead));
        assert_ne!(player.state(), PlayerState::Dead);

        player.knock_out(true);
        assert_eq!(player.state(), PlayerState::Dead);
    }
}
