pub mod entity_location;
pub mod player;
mod settings;

pub use config::ConfigError;

pub use settings::{
    AiTuning, CollisionTuning, DriftTuning, ItemTuning, KartTuning, RaceConfig, RaceTuning,
    Settings, TrackTuning, GLOBAL_CONFIG,
};
