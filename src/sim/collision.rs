//! Contact resolution
//!
//! Runs after everything has moved for the tick. Bonuses first, then
//! obstacles, then the rescue widget. Removals are collected by id and
//! compacted at the end of each pass; a large obstacle always takes its
//! other half along.

use super::entity::EntityKind;
use super::schedule::Deferred;
use super::state::{GameEvent, GameState, HIT_MESSAGES, Message, Outcome, Phase, remove_with_pairs};
use crate::audio::{AudioCommand, Cue};

/// Cue for bumping into an obstacle
fn hit_cue(kind: EntityKind, level: u8) -> Cue {
    match kind {
        EntityKind::Small => Cue::Small(level),
        _ => Cue::Crash,
    }
}

/// Apply bonus pickups and drop bonuses that scrolled away
pub fn resolve_bonuses(state: &mut GameState) {
    let touching: Vec<(u32, EntityKind)> = state
        .bonuses
        .iter()
        .filter(|b| b.kind.can_collide() && b.bounds_intersect(&state.player.body))
        .map(|b| (b.id, b.kind))
        .collect();

    let mut consumed: Vec<u32> = Vec::new();
    for (id, kind) in touching {
        match kind {
            EntityKind::Box => {
                state.player.pick_up_box();
                state.hud.flash(Message::Box, state.tuning.message_ticks);
                state.emit(AudioCommand::Play(Cue::Bonus));
                consumed.push(id);
            }
            EntityKind::Catnip => {
                state.player.status.zoomie_ticks = state.tuning.zoomie_ticks;
                state.emit(AudioCommand::Loop(Cue::Catnip));
                let drift = state.tuning.widget_speed * state.round.entropy;
                state.widget.set_drift(drift);
                state.hud.flash(Message::Zoomies, state.tuning.message_ticks);
                state.emit(AudioCommand::Play(Cue::Bonus));
                consumed.push(id);
            }
            EntityKind::Tuna => {
                // At the cap the tuna stays put
                if state.round.lives < state.tuning.max_lives {
                    state.round.lives += 1;
                    state.hud.flash(Message::Tuna, state.tuning.message_ticks);
                    state.emit(AudioCommand::Play(Cue::Meow));
                    consumed.push(id);
                }
            }
            _ => {}
        }
    }

    state
        .bonuses
        .retain(|b| !consumed.contains(&b.id) && !b.is_off_screen());
}

/// Apply obstacle contacts, then score and drop obstacles that scrolled away
pub fn resolve_obstacles(state: &mut GameState) {
    let touching: Vec<(u32, EntityKind)> = state
        .obstacles
        .iter()
        .filter(|o| o.kind.can_collide() && o.bounds_intersect(&state.player.body))
        .map(|o| (o.id, o.kind))
        .collect();

    let mut removed: Vec<u32> = Vec::new();
    for (id, kind) in touching {
        if removed.contains(&id) {
            continue;
        }
        if kind == EntityKind::Puddle {
            if !state.player.status.is_wet {
                let level = state.round.level;
                state.emit(AudioCommand::Play(Cue::Splash(level)));
            }
            state.player.status.is_wet = true;
            let thrust = state.round.thrust;
            state.widget.set_drift(thrust);
        } else if state.player.status.has_box > 0 {
            let left = state.player.absorb_hit();
            log::debug!("Box absorbed {:?}, {} hits left", kind, left);
            removed.push(id);
            let level = state.round.level;
            state.emit(AudioCommand::Play(hit_cue(kind, level)));
        } else {
            lose_life(state, id, kind);
            // One life per tick; the round is frozen or over now
            break;
        }
    }
    remove_with_pairs(&mut state.obstacles, &removed);

    if !state.is_running() {
        return;
    }

    let cleared: Vec<(u32, EntityKind)> = state
        .obstacles
        .iter()
        .filter(|o| o.is_off_screen())
        .map(|o| (o.id, o.kind))
        .collect();
    if cleared.is_empty() {
        return;
    }

    let mut doomed: Vec<u32> = Vec::new();
    for (id, kind) in cleared {
        state.player.status.is_wet = false;
        let drift = if state.player.status.zoomies() {
            state.tuning.widget_speed * 3.0
        } else {
            state.tuning.widget_speed
        };
        state.widget.set_drift(drift);
        state.round.difficulty_check = true;
        state.round.score += kind.clear_score();
        doomed.push(id);
    }
    remove_with_pairs(&mut state.obstacles, &doomed);
}

/// Lose a life to an obstacle
fn lose_life(state: &mut GameState, obstacle: u32, kind: EntityKind) {
    state.round.lives = state.round.lives.saturating_sub(1);
    state.emit(AudioCommand::Pause(Cue::Catnip));
    let fatal = state.round.lives == 0;
    state.player.knock_out(fatal);
    log::info!("Hit {:?}, {} lives left", kind, state.round.lives);

    if fatal {
        finish_round(state, Outcome::Defeat);
        return;
    }

    let pick = state.roll((HIT_MESSAGES.len() - 1) as u8) as usize;
    state.hud.flash(HIT_MESSAGES[pick], state.tuning.message_ticks);
    let level = state.round.level;
    state.emit(AudioCommand::Play(hit_cue(kind, level)));
    state.set_phase(Phase::Crashed);
    let delay = state.tuning.crash_delay;
    state.schedule(delay, Deferred::ResumeAfterCrash { obstacle });
}

/// Catching the widget wins the round
pub fn resolve_widget(state: &mut GameState) {
    if !state.widget.body.bounds_intersect(&state.player.body) {
        return;
    }
    let bonus = state.tuning.victory_bonus
        + state.tuning.victory_bonus_per_life * u64::from(state.round.lives);
    state.round.score += bonus;
    finish_round(state, Outcome::Victory);
}

/// End the round: banner, high score, music and the trip back to attract
pub fn finish_round(state: &mut GameState, outcome: Outcome) {
    state.emit(AudioCommand::Pause(Cue::Catnip));
    state.outcome = Some(outcome);

    let (message, cue) = match outcome {
        Outcome::Defeat => (Message::GameOver, Cue::Death),
        Outcome::Victory => (Message::Victory, Cue::Victory),
    };
    state.hud.pin(message);
    state.hud.credits = true;

    let score = state.round.score;
    if score > state.round.high_score {
        log::info!("New high score: {} (was {})", score, state.round.high_score);
        state.round.high_score = score;
        state.push_event(GameEvent::NewHighScore(score));
    }

    let music = state.level_music();
    state.emit(AudioCommand::Pause(music));
    state.emit(AudioCommand::Play(cue));
    state.set_phase(Phase::Over);
    let delay = state.tuning.over_delay;
    state.schedule(delay, Deferred::ReturnToAttract);
    log::info!("Round over: {:?} with score {}", outcome, score);
}

/// Raise difficulty once the score outgrows the current tier
pub fn escalate_difficulty(state: &mut GameState) {
    if !state.round.difficulty_check {
        return;
    }
    state.round.difficulty_check = false;

    let round = &mut state.round;
    let tuning = &state.tuning;
    if round.score > tuning.difficulty_score_step * u64::from(round.difficulty) {
        round.thrust = (round.thrust + tuning.thrust_step).max(tuning.thrust_floor);
        round.difficulty += 1;
        round.spawn_interval = round
            .spawn_interval
            .saturating_sub(round.difficulty)
            .max(tuning.spawn_interval_min);
        log::debug!(
            "Difficulty {} (spawn every {} ticks, thrust {:.2})",
            round.difficulty,
            round.spawn_interval,
            round.thrust
        );
    }
}
