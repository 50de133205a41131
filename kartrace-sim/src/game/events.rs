use kartrace_core::player::{
    items::Item,
    lap_info::{CheckpointID, LapNumber},
    KartID,
};
use serde::Serialize;

// Everything noteworthy that happened during a tick, for whoever drives the
// session to turn into sounds, HUD popups or log lines
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub enum RaceEvent {
    RaceStarted,
    CheckpointCrossed { kart: KartID, checkpoint: CheckpointID },
    LapCompleted { kart: KartID, lap: LapNumber },
    KartFinished { kart: KartID, finish_time: f64 },
    RaceFinished { winner: Option<KartID> },

    WallHit { kart: KartID },
    KartBump { first: KartID, second: KartID },
    ShieldAbsorbed { kart: KartID },

    ItemCollected { kart: KartID, item: Item },
    ItemUsed { kart: KartID, item: Item },
}
