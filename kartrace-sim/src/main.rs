use std::thread;
use std::time::{Duration, Instant};

use kartrace_core::player::player_inputs::ControlInput;
use kartrace_core::GLOBAL_CONFIG;
use tracing::{error, info, warn};

use kartrace_sim::autopilot::Autopilot;
use kartrace_sim::game::{events::RaceEvent, RaceSession};
use kartrace_sim::karts::PLAYER_KART;

// step used when the loop isn't paced to the wall clock
const UNPACED_TIME_STEP: f64 = 1.0 / 60.0;
// simulated seconds after which a race that never ends is abandoned
const MAX_RACE_SECONDS: f64 = 900.0;

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn main() {
    init_tracing();

    let tick_duration = Duration::from_millis(GLOBAL_CONFIG.tick_ms);
    let time_step = if GLOBAL_CONFIG.tick_ms == 0 {
        UNPACED_TIME_STEP
    } else {
        tick_duration.as_secs_f64()
    };

    let mut session = match RaceSession::new(GLOBAL_CONFIG.race.clone(), GLOBAL_CONFIG.seed) {
        Ok(session) => session,
        Err(e) => {
            error!(error = %e, "invalid race config");
            return;
        }
    };
    let mut autopilot = Autopilot::new(GLOBAL_CONFIG.race.ai.lookahead);
    let mut sim_time = 0.0;

    while !session.state().is_finished() {
        let start_time = Instant::now();

        let input = match session.player() {
            Some(kart) => autopilot.next_input(kart, session.track()),
            None => ControlInput::default(),
        };
        for event in session.update(time_step, input) {
            if let RaceEvent::LapCompleted {
                kart: PLAYER_KART,
                lap,
            } = event
            {
                info!(lap, standings = ?session.standings(), "player lap");
            }
        }

        sim_time += time_step;
        if sim_time > MAX_RACE_SECONDS {
            warn!(sim_time, "race took too long, giving up");
            break;
        }

        // a tick that ran long just starts the next one right away
        if let Some(remaining_tick_duration) = tick_duration.checked_sub(start_time.elapsed()) {
            thread::sleep(remaining_tick_duration);
        }
    }

    info!(
        winner = ?session.state().winner,
        standings = ?session.standings(),
        elapsed = session.state().elapsed,
        "final standings"
    );

    match serde_json::to_string_pretty(&session.snapshot()) {
        Ok(json) => println!("{}", json),
        Err(e) => error!(error = %e, "failed to serialize race snapshot"),
    }
}
