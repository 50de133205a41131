use glam::DVec2;
use serde::{Deserialize, Serialize};

// EntityLocation is what a renderer needs to place a kart: where it is and
// which way its nose points (heading, in radians, 0 = +x)
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct EntityLocation {
    pub position: DVec2,
    pub heading: f64,
}

impl EntityLocation {
    pub fn new(position: DVec2, heading: f64) -> Self {
        Self { position, heading }
    }
}
