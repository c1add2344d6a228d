//! Demo driver
//!
//! Picks inputs for a headless run: hold jump while a solid obstacle is about
//! to reach the cat, let go otherwise.

use super::entity::EntityKind;
use super::state::{GameState, Phase};
use super::tick::TickInput;

/// Ticks of warning before an obstacle reaches the cat
const LOOKAHEAD_TICKS: f32 = 10.0;

/// Choose this tick's input from the current state
pub fn autopilot(state: &GameState) -> TickInput {
    let mut input = TickInput::default();
    match state.phase {
        Phase::Attract | Phase::Over => {
            input.confirm = true;
        }
        Phase::Running => {
            input.jump = threat_ahead(state);
            // Get back down quickly once clear
            input.fast_fall = !input.jump && !state.player.on_ground();
        }
        Phase::Paused | Phase::Crashed => {}
    }
    input
}

fn threat_ahead(state: &GameState) -> bool {
    let body = &state.player.body;
    let reach = body.pos.x + body.size.x + state.round.speed * LOOKAHEAD_TICKS;
    state
        .obstacles
        .iter()
        .filter(|o| matches!(o.kind, EntityKind::Small | EntityKind::Large))
        .any(|o| o.pos.x + o.size.x > body.pos.x && o.pos.x < reach)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::spawn::{enqueue_obstacle, forced, spawn_obstacle};
    use crate::sim::tick::tick;
    use crate::tuning::Tuning;

    #[test]
    fn test_confirms_from_attract() {
        let state = GameState::new(1, Tuning::default(), 0);
        assert!(autopilot(&state).confirm);
    }

    #[test]
    fn test_jumps_at_close_obstacle() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        let input = autopilot(&state);
        tick(&mut state, &input);
        assert!(state.is_running());
        assert!(!autopilot(&state).jump);

        let spawn = spawn_obstacle(&mut state, Some(forced::SMALL)).unwrap();
        enqueue_obstacle(&mut state, spawn);
        assert!(!autopilot(&state).jump);

        state.obstacles[0].pos.x = state.player.body.pos.x + 120.0;
        assert!(autopilot(&state).jump);
    }

    #[test]
    fn test_ignores_puddles() {
        let mut state = GameState::new(1, Tuning::default(), 0);
        let input = autopilot(&state);
        tick(&mut state, &input);
        let spawn = spawn_obstacle(&mut state, Some(forced::PUDDLE)).unwrap();
        enqueue_obstacle(&mut state, spawn);
        state.obstacles[0].pos.x = state.player.body.pos.x + 20.0;
        assert!(!autopilot(&state).jump);
    }

    #[test]
    fn test_clears_a_small_obstacle() {
        let mut state = GameState::new(5, Tuning::default(), 0);
        let input = autopilot(&state);
        tick(&mut state, &input);
        let spawn = spawn_obstacle(&mut state, Some(forced::SMALL)).unwrap();
        enqueue_obstacle(&mut state, spawn);
        state.obstacles[0].pos.x = 400.0;

        for _ in 0..100 {
            let input = autopilot(&state);
            tick(&mut state, &input);
        }
        assert!(state.is_running());
        assert_eq!(state.round.lives, 3);
        // Scrolled off and scored
        assert!(state.obstacles.is_empty());
        assert!(state.round.score >= 3);
    }
}
