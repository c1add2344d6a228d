//! Game state and core simulation types
//!
//! One `GameState` owns everything a round touches: timers, the player, the
//! rescue widget and every entity collection. Nothing is global.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::anim::Clip;
use super::entity::{Entity, EntityKind, Picture};
use super::player::Player;
use super::schedule::{Deferred, Schedule};
use super::widget::Widget;
use crate::audio::{AudioCommand, Cue};
use crate::consts::*;
use crate::tuning::Tuning;

/// Round controller phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    /// Title screen demo loop
    Attract,
    /// Active gameplay
    Running,
    /// Frozen by the player
    Paused,
    /// Frozen after a non-fatal hit, waiting to resume
    Crashed,
    /// Round finished (see `GameState::outcome`)
    Over,
}

/// How a finished round ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Defeat,
    Victory,
}

/// HUD banner messages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Message {
    KittenMe,
    MeOuch,
    GameOver,
    Victory,
    Zoomies,
    Tuna,
    Box,
    Paused,
}

impl Message {
    pub fn text(self) -> &'static str {
        match self {
            Message::KittenMe => "You've CAT to be KITTEN me!",
            Message::MeOuch => "ME-ouch!",
            Message::GameOver => "That was a total CAT-astrophe!\nGame over!",
            Message::Victory => "Nothing's im-PAW-sible for this cat!",
            Message::Zoomies => "PURR-fect! It's the catnip zoomies!",
            Message::Tuna => "MEOW you're talking! Tuna is life!",
            Message::Box => "A-MEW-zon Prime delivery: Invincibility!",
            Message::Paused => "Pawsed",
        }
    }
}

/// Non-fatal hit messages, picked at random
pub const HIT_MESSAGES: [Message; 2] = [Message::KittenMe, Message::MeOuch];

/// Line shown under a finished round
pub const CREDITS: &str =
    "Art by Shaye Wong • Sound by Nate Reinauer • Programming by Randall Spence";

/// Title screen text label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Caption {
    pub text: &'static str,
    pub x: f32,
    pub y: f32,
    /// Anchored on its center instead of its left edge
    pub centered: bool,
}

/// Labels drawn next to the title screen showcase
pub const CAPTIONS: [Caption; 4] = [
    Caption { text: "Collect these", x: 25.0, y: 180.0, centered: false },
    Caption { text: "Avoid these", x: WIDTH - 165.0, y: 180.0, centered: false },
    Caption { text: "Jump", x: WIDTH / 2.0, y: 106.0, centered: true },
    Caption { text: "Fall faster", x: WIDTH / 2.0, y: 212.0, centered: true },
];

/// Banner message with an optional countdown
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Hud {
    pub message: Option<Message>,
    /// Ticks until the message clears; 0 keeps it up
    pub message_ticks: u32,
    pub credits: bool,
}

impl Hud {
    /// Show a message for a number of ticks
    pub fn flash(&mut self, message: Message, ticks: u32) {
        self.message = Some(message);
        self.message_ticks = ticks;
    }

    /// Show a message until cleared
    pub fn pin(&mut self, message: Message) {
        self.message = Some(message);
        self.message_ticks = 0;
    }

    pub fn clear(&mut self) {
        self.message = None;
        self.message_ticks = 0;
    }

    pub fn tick(&mut self) {
        if self.message_ticks > 0 {
            self.message_ticks -= 1;
            if self.message_ticks == 0 {
                self.message = None;
            }
        }
    }
}

/// Side effects for the host, drained after each tick
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Audio(AudioCommand),
    /// A finished round beat the stored best
    NewHighScore(u64),
}

/// Per-round counters and difficulty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    pub lives: u8,
    pub score: u64,
    /// Best score known at round start, updated when the round ends
    pub high_score: u64,
    /// 1..=MAX_LEVEL
    pub level: u8,
    /// World scroll speed (units/tick)
    pub speed: f32,
    /// Ticks between obstacle spawns
    pub spawn_interval: u32,
    pub difficulty: u32,
    /// An obstacle cleared this tick; re-evaluate difficulty
    pub difficulty_check: bool,
    pub elapsed_ticks: u64,
    /// Per-round random factor in [π, 2π)
    pub entropy: f32,
    /// Widget retreat while the player is wet
    pub thrust: f32,
}

impl RoundState {
    pub fn new(tuning: &Tuning, level: u8, high_score: u64, entropy: f32) -> Self {
        Self {
            lives: tuning.lives,
            score: 0,
            high_score,
            level: level.clamp(1, MAX_LEVEL),
            speed: tuning.speed,
            spawn_interval: tuning.spawn_interval,
            difficulty: tuning.difficulty,
            difficulty_check: false,
            elapsed_ticks: 0,
            entropy,
            thrust: tuning.thrust,
        }
    }

    /// Horizontal velocity shared by the ground and everything on it
    pub fn scroll_dx(&self, wet: bool) -> f32 {
        let drag = if wet { self.thrust / self.entropy } else { 0.0 };
        -self.speed + drag
    }

    /// Best score to display: the running score once it passes the record
    pub fn displayed_high_score(&self) -> u64 {
        self.score.max(self.high_score)
    }
}

/// Roll a round's entropy factor
fn roll_entropy(rng: &mut Pcg32) -> f32 {
    (rng.random::<f32>() + 1.0) * std::f32::consts::PI
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    rng: Pcg32,
    pub tuning: Tuning,
    pub phase: Phase,
    /// Set when the last round finished
    pub outcome: Option<Outcome>,
    /// Driver frames since start; keeps counting while frozen
    pub frame: u64,
    /// Bumped on every full reset
    pub generation: u32,
    pub round: RoundState,
    pub player: Player,
    pub widget: Widget,
    /// Parallax layers
    pub backgrounds: Vec<Entity>,
    pub grounds: Vec<Entity>,
    pub obstacles: Vec<Entity>,
    pub bonuses: Vec<Entity>,
    /// Title screen display pieces
    pub showcase: Vec<Entity>,
    pub hud: Hud,
    pub schedule: Schedule,
    /// Pause asked for while frozen after a crash
    pub pause_requested: bool,
    events: Vec<GameEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a game in attract mode
    pub fn new(seed: u64, tuning: Tuning, high_score: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let entropy = roll_entropy(&mut rng);
        let round = RoundState::new(&tuning, 1, high_score, entropy);
        let player = Player::new(1);
        let widget = Widget::new(2, &tuning);

        let mut state = Self {
            seed,
            rng,
            tuning,
            phase: Phase::Attract,
            outcome: None,
            frame: 0,
            generation: 0,
            round,
            player,
            widget,
            backgrounds: Vec::new(),
            grounds: Vec::new(),
            obstacles: Vec::new(),
            bonuses: Vec::new(),
            showcase: Vec::new(),
            hud: Hud::default(),
            schedule: Schedule::default(),
            pause_requested: false,
            events: Vec::new(),
            next_id: 3,
        };
        state.build_scenery();
        state.build_showcase();
        state
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Uniform roll in `0..=max`
    pub fn roll(&mut self, max: u8) -> u8 {
        self.rng.random_range(0..=max)
    }

    pub fn is_over(&self) -> bool {
        self.phase == Phase::Over
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn is_paused(&self) -> bool {
        self.phase == Phase::Paused
    }

    /// Current scroll velocity for ground, obstacles and bonuses
    pub fn scroll_dx(&self) -> f32 {
        self.round.scroll_dx(self.player.status.is_wet)
    }

    pub fn level_music(&self) -> Cue {
        Cue::Level(self.round.level)
    }

    pub fn emit(&mut self, command: AudioCommand) {
        self.events.push(GameEvent::Audio(command));
    }

    pub fn push_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Take the side effects produced since the last drain
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn set_phase(&mut self, phase: Phase) {
        if self.phase != phase {
            log::info!("Phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    /// Queue a deferred event `delay` frames from now
    pub fn schedule(&mut self, delay: u64, action: Deferred) {
        let due = self.frame + delay;
        self.schedule.push(due, self.generation, action);
    }

    /// Full reset to round defaults. Level is kept unless `level_up`.
    pub fn reset(&mut self, level_up: bool) {
        self.generation += 1;
        let level = if level_up {
            (self.round.level + 1).clamp(1, MAX_LEVEL)
        } else {
            self.round.level
        };
        let entropy = roll_entropy(&mut self.rng);
        self.round = RoundState::new(&self.tuning, level, self.round.high_score, entropy);

        self.player = Player::new(self.player.body.id);
        self.widget.reset(&self.tuning);
        self.obstacles.clear();
        self.bonuses.clear();
        self.build_scenery();
        self.hud = Hud::default();
        self.outcome = None;
        self.pause_requested = false;

        log::info!(
            "Round reset (level {}, entropy {:.3}, generation {})",
            level,
            entropy,
            self.generation
        );
    }

    /// Lay out both parallax strips side by side
    fn build_scenery(&mut self) {
        self.backgrounds.clear();
        self.grounds.clear();
        for i in 0..2 {
            let id = self.next_entity_id();
            let pos = Vec2::new(i as f32 * BACKGROUND_SIZE.x, BACKGROUND_Y);
            let mut layer = Entity::with_picture(id, EntityKind::Background, pos, Picture::Background);
            layer.vel.x = BACKGROUND_DX;
            self.backgrounds.push(layer);
        }
        for i in 0..2 {
            let id = self.next_entity_id();
            let pos = Vec2::new(i as f32 * GROUND_SIZE.x, GROUND_Y);
            let mut layer = Entity::with_picture(id, EntityKind::Ground, pos, Picture::Ground);
            layer.vel.x = -self.round.speed;
            self.grounds.push(layer);
        }
    }

    /// Title screen: idle cat and a legend of what to collect and avoid
    fn build_showcase(&mut self) {
        let ground = HEIGHT - GROUND_OFFSET;
        let pieces: [(EntityKind, f32, f32, Option<Clip>, Option<Picture>); 12] = [
            (EntityKind::Player, WIDTH / 2.0 - 34.0, ground, Some(Clip::CatIdle), None),
            (EntityKind::Tentacle, 20.0, ground - 56.0, Some(Clip::TentacleActive), None),
            (EntityKind::Catnip, 22.0, ground - 90.0, Some(Clip::BonusCatnip), None),
            (EntityKind::Tentacle, 110.0, ground - 56.0, Some(Clip::TentacleAttract), None),
            (EntityKind::Tuna, 112.0, ground - 90.0, Some(Clip::BonusTuna), None),
            (EntityKind::Box, 40.0, ground - 6.0, Some(Clip::BoxIdle), None),
            (EntityKind::Puddle, WIDTH - 180.0, ground + 50.0, None, Some(Picture::Puddle1)),
            (EntityKind::Large, WIDTH - 110.0, ground - 60.0, None, Some(Picture::LargeHead)),
            (EntityKind::Small, WIDTH - 180.0, ground + 3.0, Some(Clip::SmallActive), None),
            (EntityKind::Legend, WIDTH / 2.0 - 96.0, ground - 66.0, None, Some(Picture::Start)),
            (EntityKind::Legend, WIDTH / 2.0 - 60.0, 120.0, None, Some(Picture::Controls)),
            (EntityKind::Title, WIDTH / 2.0 - 188.0, 20.0, Some(Clip::TitleActive), None),
        ];

        self.showcase.clear();
        for (kind, x, y, clip, picture) in pieces {
            let id = self.next_entity_id();
            let pos = Vec2::new(x, y);
            let entity = match (clip, picture) {
                (Some(clip), _) => Entity::with_clip(id, kind, pos, clip),
                (None, Some(picture)) => Entity::with_picture(id, kind, pos, picture),
                (None, None) => continue,
            };
            self.showcase.push(entity);
        }
    }
}

/// Remove entities by id, taking each one's pair along with it
pub fn remove_with_pairs(list: &mut Vec<Entity>, ids: &[u32]) {
    if ids.is_empty() {
        return;
    }
    let mut doomed: Vec<u32> = ids.to_vec();
    for entity in list.iter() {
        if ids.contains(&entity.id) {
            if let Some(pair) = entity.pair {
                doomed.push(pair);
            }
        }
    }
    list.retain(|entity| !doomed.contains(&entity.id));
}
