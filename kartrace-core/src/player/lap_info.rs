use serde::{Deserialize, Serialize};

pub type LapNumber = u8;
pub type CheckpointID = usize;
pub type Placement = u8;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct LapInformation {
    pub lap: LapNumber,
    // the checkpoint this kart has to reach next
    pub current_checkpoint: CheckpointID,
    // None until the first checkpoint of the race is crossed
    pub last_checkpoint: Option<CheckpointID>,
    pub total_progress: f64,
    pub placement: Placement,
    // set exactly once, when the final lap is completed
    pub finish_time: Option<f64>,
}

impl LapInformation {
    pub fn new(placement: Placement) -> Self {
        LapInformation {
            lap: 0,
            current_checkpoint: 0,
            last_checkpoint: None,
            total_progress: 0.0,
            placement,
            finish_time: None,
        }
    }

    pub fn is_finished(&self) -> bool {
        self.finish_time.is_some()
    }
}
