pub mod autopilot;
pub mod checkpoints;
pub mod game;
pub mod karts;
pub mod physics;
pub mod progress;
pub mod track;
