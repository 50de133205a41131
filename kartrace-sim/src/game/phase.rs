use kartrace_core::player::KartID;
use kartrace_core::RaceConfig;
use serde::Serialize;

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum RacePhase {
    // Karts sit on the grid and can't move; seconds left until the start
    Countdown(f64),
    // Everybody drives and the race clock runs
    Racing,
    // The human kart has completed its last lap; standings are final for the
    // viewer and a restart can be requested
    Finished,
}

#[derive(Clone, Debug, Serialize)]
pub struct RaceState {
    pub phase: RacePhase,
    pub elapsed: f64,
    // first kart of any kind to finish
    pub winner: Option<KartID>,
}

impl RaceState {
    pub fn is_running(&self) -> bool {
        matches!(self.phase, RacePhase::Racing)
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.phase, RacePhase::Finished)
    }

    pub fn countdown(&self) -> f64 {
        match self.phase {
            RacePhase::Countdown(remaining) => remaining,
            _ => 0.0,
        }
    }
}

pub fn get_starting_race_state(config: &RaceConfig) -> RaceState {
    RaceState {
        phase: RacePhase::Countdown(config.race.countdown_seconds),
        elapsed: 0.0,
        winner: None,
    }
}
