//! Dash Cat entry point
//!
//! The browser build is driven through the `DashCat` handle in the library.
//! Natively this runs one headless round on autopilot and logs how it went.
//!
//! Usage: `dash-cat [seed] [max_ticks] [tuning.json]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use dash_cat::sim::{Phase, autopilot};
    use dash_cat::{HighScore, Settings, Tuning, session::Session};

    env_logger::init();
    log::info!("Dash Cat (native) starting...");

    let args: Vec<String> = std::env::args().skip(1).collect();
    let seed = args
        .first()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(1);
    let max_ticks = args
        .get(1)
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(60 * 60 * 10);
    let tuning = match args.get(2) {
        Some(path) => match std::fs::read_to_string(path) {
            Ok(json) => Tuning::from_json_or_default(&json),
            Err(e) => {
                log::warn!("Could not read tuning file {}: {}", path, e);
                Tuning::default()
            }
        },
        None => Tuning::default(),
    };

    let mut session = Session::new(seed, tuning, Settings::load(), HighScore::load());
    let mut crashes = 0u32;
    for _ in 0..max_ticks {
        let input = autopilot(&session.state);
        let was_crashed = session.state.phase == Phase::Crashed;
        let output = session.step_with(&input);
        if output.view.phase == Phase::Crashed && !was_crashed {
            crashes += 1;
        }
        if session.state.is_over() {
            break;
        }
    }

    let state = &session.state;
    log::info!(
        "Seed {}: {:?} after {} ticks, score {}, lives {}, level {}, {} crashes",
        seed,
        state.outcome,
        state.round.elapsed_ticks,
        state.round.score,
        state.round.lives,
        state.round.level,
        crashes
    );
    println!(
        "outcome={:?} score={} best={} ticks={}",
        state.outcome, state.round.score, session.high_score.best, state.round.elapsed_ticks
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_start in the library, this is just to satisfy the compiler
}
