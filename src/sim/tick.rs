//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is one
//! 60 Hz frame: deferred events fire first, then the confirm action, then the
//! phase's own update.

use super::collision::{escalate_difficulty, resolve_bonuses, resolve_obstacles, resolve_widget};
use super::schedule::Deferred;
use super::spawn::{enqueue_bonus, enqueue_obstacle, forced, spawn_bonus, spawn_obstacle};
use super::state::{GameState, Message, Outcome, Phase, remove_with_pairs};
use crate::audio::{AudioCommand, Cue};
use crate::consts::*;

/// Entities the debug keys can drop into a running round
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DebugSpawn {
    Box,
    Catnip,
    Large,
    Small,
    Tuna,
    Water,
}

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Jump held (up arrow or space)
    pub jump: bool,
    /// Down arrow held: double gravity
    pub fast_fall: bool,
    /// Start, pause or resume
    pub confirm: bool,
    /// Force a spawn (debug keys)
    pub debug_spawn: Option<DebugSpawn>,
}

/// Advance the game state by one fixed timestep
pub fn tick(state: &mut GameState, input: &TickInput) {
    state.frame += 1;

    run_due_events(state);

    if input.confirm {
        confirm(state);
    }

    match state.phase {
        Phase::Attract => {
            for piece in &mut state.showcase {
                piece.advance();
            }
        }
        Phase::Running => {
            if let Some(spawn) = input.debug_spawn {
                debug_spawn(state, spawn);
            }
            step_round(state, input);
        }
        // Frozen; only the frame counter moves
        Phase::Paused | Phase::Crashed | Phase::Over => {}
    }
}

/// Fire deferred events that came due, dropping any that no longer apply
fn run_due_events(state: &mut GameState) {
    for event in state.schedule.take_due(state.frame) {
        if event.generation != state.generation {
            log::debug!("Dropping {:?} from generation {}", event.action, event.generation);
            continue;
        }
        match event.action {
            Deferred::ResumeAfterCrash { obstacle } => {
                if state.phase != Phase::Crashed || state.round.lives == 0 {
                    log::debug!("Dropping crash resume in {:?}", state.phase);
                    continue;
                }
                remove_with_pairs(&mut state.obstacles, &[obstacle]);
                state.widget.reset_position();
                if state.pause_requested {
                    state.pause_requested = false;
                    pause(state);
                } else {
                    state.set_phase(Phase::Running);
                }
                log::info!("Resumed after crash with {} lives", state.round.lives);
            }
            Deferred::ReturnToAttract => {
                if state.phase != Phase::Over {
                    log::debug!("Dropping return to attract in {:?}", state.phase);
                    continue;
                }
                state.set_phase(Phase::Attract);
                state.emit(AudioCommand::Rewind(Cue::Attract));
                state.emit(AudioCommand::Loop(Cue::Attract));
            }
        }
    }
}

/// Enter, Escape or NumpadEnter
fn confirm(state: &mut GameState) {
    match state.phase {
        Phase::Attract | Phase::Over => {
            let level_up = state.outcome == Some(Outcome::Victory);
            state.emit(AudioCommand::Pause(Cue::Attract));
            state.emit(AudioCommand::Rewind(Cue::Attract));
            state.reset(level_up);
            state.set_phase(Phase::Running);
            let music = state.level_music();
            state.emit(AudioCommand::Rewind(music));
            state.emit(AudioCommand::Loop(music));
        }
        Phase::Running => pause(state),
        Phase::Paused => {
            state.hud.clear();
            state.set_phase(Phase::Running);
            let music = state.level_music();
            state.emit(AudioCommand::Loop(music));
        }
        // Honoured once the crash resume fires
        Phase::Crashed => state.pause_requested = true,
    }
}

fn pause(state: &mut GameState) {
    state.set_phase(Phase::Paused);
    state.hud.pin(Message::Paused);
    let music = state.level_music();
    state.emit(AudioCommand::Pause(music));
}

fn debug_spawn(state: &mut GameState, spawn: DebugSpawn) {
    log::debug!("Debug spawn {:?}", spawn);
    match spawn {
        DebugSpawn::Box => {
            if let Some(spawn) = spawn_bonus(state, Some(forced::BOX)) {
                enqueue_bonus(state, spawn);
            }
        }
        DebugSpawn::Catnip => {
            if state.player.status.zoomies() {
                return;
            }
            if let Some(spawn) = spawn_bonus(state, Some(forced::CATNIP)) {
                enqueue_bonus(state, spawn);
            }
        }
        DebugSpawn::Tuna => {
            if let Some(spawn) = spawn_bonus(state, Some(forced::TUNA)) {
                enqueue_bonus(state, spawn);
            }
        }
        DebugSpawn::Large | DebugSpawn::Small | DebugSpawn::Water => {
            let roll = match spawn {
                DebugSpawn::Large => forced::LARGE,
                DebugSpawn::Small => forced::SMALL,
                _ => forced::PUDDLE,
            };
            if let Some(spawn) = spawn_obstacle(state, Some(roll)) {
                enqueue_obstacle(state, spawn);
            }
        }
    }
}

/// One running tick of the round
fn step_round(state: &mut GameState, input: &TickInput) {
    // === Parallax ===
    for layer in &mut state.backgrounds {
        layer.advance();
        if layer.pos.x <= -BACKGROUND_SIZE.x {
            layer.pos.x += 2.0 * BACKGROUND_SIZE.x;
        }
    }
    let dx = state.scroll_dx();
    for layer in &mut state.grounds {
        layer.vel.x = dx;
        layer.advance();
        if layer.pos.x <= -GROUND_SIZE.x {
            layer.pos.x += 2.0 * GROUND_SIZE.x;
        }
    }

    // === Player and widget ===
    let update = state.player.update(input.jump, input.fast_fall, &state.tuning);
    if update.jumped {
        state.emit(AudioCommand::Play(Cue::Jump));
    }
    if update.zoomies_ended {
        state.emit(AudioCommand::Pause(Cue::Catnip));
        state.hud.clear();
        let drift = state.tuning.widget_speed;
        state.widget.set_drift(drift);
    }
    state.widget.update(&state.tuning);
    state.hud.tick();

    // === Scrolling entities ===
    for entity in state.obstacles.iter_mut().chain(state.bonuses.iter_mut()) {
        entity.vel.x = dx;
        entity.advance();
    }

    // === Timers and spawning ===
    state.round.elapsed_ticks += 1;
    let elapsed = state.round.elapsed_ticks;
    if elapsed % state.tuning.score_interval.max(1) == 0 {
        state.round.score += if state.player.status.zoomies() { 3 } else { 1 };
    }

    let obstacle_every = u64::from(state.round.spawn_interval.max(1));
    if elapsed % obstacle_every == 0 {
        if let Some(spawn) = spawn_obstacle(state, None) {
            enqueue_obstacle(state, spawn);
        }
    }
    let bonus_every = bonus_interval(state);
    if elapsed % bonus_every == 0 {
        if let Some(spawn) = spawn_bonus(state, None) {
            enqueue_bonus(state, spawn);
        }
    }

    // === Contacts ===
    resolve_bonuses(state);
    resolve_obstacles(state);
    if state.is_running() {
        resolve_widget(state);
    }

    state.round.speed = (state.round.speed + state.tuning.speed_step).min(state.tuning.speed_max);
    escalate_difficulty(state);
}

/// Ticks between bonus rolls, stretched by the round's entropy
fn bonus_interval(state: &GameState) -> u64 {
    let base = state.round.spawn_interval.saturating_add(state.round.difficulty);
    ((base as f32 * state.round.entropy) as u64).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::EntityKind;
    use crate::sim::state::GameEvent;
    use crate::tuning::Tuning;
    use proptest::prelude::*;

    fn confirm_input() -> TickInput {
        TickInput {
            confirm: true,
            ..Default::default()
        }
    }

    fn started(seed: u64) -> GameState {
        let mut state = GameState::new(seed, Tuning::default(), 0);
        tick(&mut state, &confirm_input());
        state.drain_events();
        state
    }

    fn idle(state: &mut GameState, ticks: u32) {
        for _ in 0..ticks {
            tick(state, &TickInput::default());
        }
    }

    fn small_at_player(state: &mut GameState) -> u32 {
        obstacle_at_player(state, forced::SMALL)
    }

    fn obstacle_at_player(state: &mut GameState, roll: u8) -> u32 {
        let spawn = spawn_obstacle(state, Some(roll)).unwrap();
        let id = spawn.lead.id;
        enqueue_obstacle(state, spawn);
        // One tick of scroll lands it on the player
        let x = state.player.body.pos.x + state.round.speed;
        for o in state.obstacles.iter_mut().filter(|o| o.id == id) {
            o.pos.x = x;
        }
        id
    }

    #[test]
    fn test_confirm_starts_round() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        idle(&mut state, 10);
        assert_eq!(state.phase, Phase::Attract);
        assert_eq!(state.round.elapsed_ticks, 0);

        tick(&mut state, &confirm_input());
        assert_eq!(state.phase, Phase::Running);
        assert_eq!(state.round.elapsed_ticks, 1);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Audio(AudioCommand::Pause(Cue::Attract))));
        assert!(events.contains(&GameEvent::Audio(AudioCommand::Loop(Cue::Level(1)))));
    }

    #[test]
    fn test_pause_freezes_round() {
        let mut state = started(2);
        idle(&mut state, 5);
        let elapsed = state.round.elapsed_ticks;

        tick(&mut state, &confirm_input());
        assert!(state.is_paused());
        assert_eq!(state.hud.message, Some(Message::Paused));
        let frame = state.frame;
        idle(&mut state, 50);
        assert_eq!(state.round.elapsed_ticks, elapsed);
        assert_eq!(state.frame, frame + 50);

        tick(&mut state, &confirm_input());
        assert!(state.is_running());
        assert_eq!(state.hud.message, None);
        assert_eq!(state.round.elapsed_ticks, elapsed + 1);
    }

    #[test]
    fn test_jump_emits_cue_once() {
        let mut state = started(3);
        let jump = TickInput {
            jump: true,
            ..Default::default()
        };
        tick(&mut state, &jump);
        tick(&mut state, &jump);
        let jumps = state
            .drain_events()
            .into_iter()
            .filter(|e| *e == GameEvent::Audio(AudioCommand::Play(Cue::Jump)))
            .count();
        assert_eq!(jumps, 1);
    }

    #[test]
    fn test_crash_then_resume() {
        let mut state = started(4);
        let id = small_at_player(&mut state);
        state.widget.body.pos.x = 300.0;
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, Phase::Crashed);
        assert_eq!(state.round.lives, 2);

        let delay = state.tuning.crash_delay as u32;
        idle(&mut state, delay - 1);
        assert_eq!(state.phase, Phase::Crashed);
        tick(&mut state, &TickInput::default());
        assert!(state.is_running());
        assert!(state.obstacles.iter().all(|o| o.id != id));
        // Widget went back to its start and was clamped before moving
        let expected = WIDGET_MAX_X + state.widget.drift();
        assert!((state.widget.body.pos.x - expected).abs() < 1e-3);
    }

    #[test]
    fn test_crash_into_large_removes_pair() {
        let mut state = started(4);
        obstacle_at_player(&mut state, forced::LARGE);
        assert_eq!(state.obstacles.len(), 2);
        tick(&mut state, &TickInput::default());
        assert_eq!(state.phase, Phase::Crashed);
        assert_eq!(state.round.lives, 2);

        let delay = state.tuning.crash_delay as u32;
        idle(&mut state, delay);
        assert!(state.is_running());
        assert!(
            state
                .obstacles
                .iter()
                .all(|o| !matches!(o.kind, EntityKind::Large | EntityKind::LargeTail))
        );
    }

    #[test]
    fn test_speed_stops_at_max() {
        let mut state = started(9);
        state.round.speed = 11.9999;
        idle(&mut state, 2);
        assert_eq!(state.round.speed, state.tuning.speed_max);
        idle(&mut state, 500);
        assert_eq!(state.round.speed, state.tuning.speed_max);
    }

    #[test]
    fn test_pause_during_crash_is_deferred() {
        let mut state = started(5);
        small_at_player(&mut state);
        tick(&mut state, &TickInput::default());
        tick(&mut state, &confirm_input());
        assert_eq!(state.phase, Phase::Crashed);

        let delay = state.tuning.crash_delay as u32;
        idle(&mut state, delay);
        assert!(state.is_paused());
        assert!(!state.pause_requested);
    }

    #[test]
    fn test_defeat_returns_to_attract() {
        let mut state = started(6);
        state.round.lives = 1;
        small_at_player(&mut state);
        tick(&mut state, &TickInput::default());
        assert!(state.is_over());
        assert_eq!(state.outcome, Some(Outcome::Defeat));

        let delay = state.tuning.over_delay as u32;
        idle(&mut state, delay);
        assert_eq!(state.phase, Phase::Attract);
        let events = state.drain_events();
        assert!(events.contains(&GameEvent::Audio(AudioCommand::Loop(Cue::Attract))));

        // Defeat replays the same level
        tick(&mut state, &confirm_input());
        assert_eq!(state.round.level, 1);
        assert_eq!(state.round.lives, 3);
    }

    #[test]
    fn test_victory_levels_up() {
        let mut state = started(7);
        state.widget.body.pos = state.player.body.pos;
        state.widget.set_drift(0.0);
        tick(&mut state, &TickInput::default());
        assert!(state.is_over());
        assert_eq!(state.outcome, Some(Outcome::Victory));
        assert_eq!(state.round.score, 1000 + 300);

        tick(&mut state, &confirm_input());
        assert!(state.is_running());
        assert_eq!(state.round.level, 2);
        assert_eq!(state.round.score, 0);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_stale_event_dropped() {
        let mut state = started(8);
        state.round.lives = 1;
        small_at_player(&mut state);
        tick(&mut state, &TickInput::default());
        assert!(state.is_over());

        // Restart before the scheduled return fires
        tick(&mut state, &confirm_input());
        state.set_phase(Phase::Over);
        let delay = state.tuning.over_delay as u32;
        idle(&mut state, delay);
        assert_eq!(state.phase, Phase::Over);
    }

    #[test]
    fn test_obstacle_cadence() {
        let mut state = started(9);
        // The start tick already counted once
        let interval = state.tuning.spawn_interval;
        idle(&mut state, interval - 2);
        assert!(state.obstacles.is_empty());
        tick(&mut state, &TickInput::default());
        assert!(!state.obstacles.is_empty());
    }

    #[test]
    fn test_passive_score() {
        let mut state = started(10);
        idle(&mut state, 59);
        assert_eq!(state.round.score, 1);
        state.player.status.zoomie_ticks = 100;
        idle(&mut state, 60);
        assert_eq!(state.round.score, 4);
    }

    #[test]
    fn test_parallax_wraps() {
        let mut state = started(11);
        idle(&mut state, 250);
        for layer in state.grounds.iter() {
            assert!(layer.pos.x > -GROUND_SIZE.x && layer.pos.x <= GROUND_SIZE.x);
        }
        for layer in state.backgrounds.iter() {
            assert!(layer.pos.x > -BACKGROUND_SIZE.x && layer.pos.x <= BACKGROUND_SIZE.x);
        }
    }

    #[test]
    fn test_debug_spawns() {
        let mut state = started(12);
        let input = TickInput {
            debug_spawn: Some(DebugSpawn::Large),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.obstacles.len(), 2);

        let input = TickInput {
            debug_spawn: Some(DebugSpawn::Box),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.bonuses.len(), 1);
        assert_eq!(state.bonuses[0].kind, EntityKind::Box);

        // Zoomies block a second catnip
        state.player.status.zoomie_ticks = 50;
        let input = TickInput {
            debug_spawn: Some(DebugSpawn::Catnip),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert_eq!(state.bonuses.len(), 1);
    }

    #[test]
    fn test_debug_spawn_ignored_outside_round() {
        let mut state = GameState::new(13, Tuning::default(), 0);
        let input = TickInput {
            debug_spawn: Some(DebugSpawn::Small),
            ..Default::default()
        };
        tick(&mut state, &input);
        assert!(state.obstacles.is_empty());
    }

    #[test]
    fn test_showcase_animates_in_attract() {
        let mut state = GameState::new(14, Tuning::default(), 0);
        idle(&mut state, 12);
        let cat = state
            .showcase
            .iter()
            .find(|p| p.kind == EntityKind::Player)
            .unwrap();
        assert_eq!(cat.clip(), Some(crate::sim::anim::Clip::CatIdle));
        match cat.visual {
            crate::sim::entity::Visual::Anim(anim) => assert_eq!(anim.frame, 1),
            crate::sim::entity::Visual::Picture(_) => panic!("expected animation"),
        }
    }

    #[test]
    fn test_determinism() {
        let mut a = started(99);
        let mut b = started(99);
        for i in 0..3000u32 {
            let input = TickInput {
                jump: i % 37 < 14,
                ..Default::default()
            };
            tick(&mut a, &input);
            tick(&mut b, &input);
        }
        assert_eq!(a.phase, b.phase);
        assert_eq!(a.round.score, b.round.score);
        assert_eq!(a.round.lives, b.round.lives);
        assert_eq!(a.obstacles.len(), b.obstacles.len());
        assert_eq!(a.player.body.pos, b.player.body.pos);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(32))]

        #[test]
        fn prop_lives_and_speed_bounds(seed in 0u64..1000, jumps in proptest::collection::vec(any::<bool>(), 1..1500)) {
            let mut state = started(seed);
            let mut lives = state.round.lives;
            let mut speed = state.round.speed;
            let mut generation = state.generation;

            for jump in jumps {
                tick(&mut state, &TickInput { jump, ..Default::default() });
                let events = state.drain_events();
                let ate_tuna = events.contains(&GameEvent::Audio(AudioCommand::Play(Cue::Meow)));

                prop_assert!(state.round.lives <= state.tuning.max_lives);
                prop_assert!(state.round.speed <= state.tuning.speed_max);
                if state.generation == generation {
                    prop_assert!(state.round.speed >= speed);
                    if !ate_tuna {
                        prop_assert!(state.round.lives <= lives);
                    }
                }
                if state.round.lives == 0 {
                    prop_assert!(state.is_over() || state.phase == Phase::Attract);
                }
                lives = state.round.lives;
                speed = state.round.speed;
                generation = state.generation;
            }
        }
    }
}
