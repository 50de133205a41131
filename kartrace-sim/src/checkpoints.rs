use glam::DVec2;
use kartrace_core::player::lap_info::{CheckpointID, LapInformation};
use serde::Serialize;

use crate::physics::trigger_entity::TriggerEntity;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CheckpointOutcome {
    Missed,
    Crossed,
    LapCompleted,
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct Checkpoint {
    pub id: CheckpointID,
    pub position: DVec2,
    pub angle: f64,
    pub radius: f64,
    // distance from the previous checkpoint, used to turn proximity into progress
    pub approach_length: f64,
}

impl Checkpoint {
    pub fn new(id: CheckpointID, position: DVec2, angle: f64, radius: f64) -> Self {
        Self {
            id,
            position,
            angle,
            radius,
            approach_length: 0.0,
        }
    }

    // Must only be called for the checkpoint the kart is currently aiming for;
    // checkpoints have to be taken in order
    pub fn cross(&self, lap_info: &mut LapInformation, checkpoint_count: usize) -> CheckpointOutcome {
        // still lingering on the one we just took
        if lap_info.last_checkpoint == Some(self.id) {
            return CheckpointOutcome::Missed;
        }

        lap_info.last_checkpoint = Some(self.id);
        lap_info.current_checkpoint = (self.id + 1) % checkpoint_count;

        if lap_info.current_checkpoint == 0 && lap_info.last_checkpoint == Some(checkpoint_count - 1)
        {
            lap_info.lap = lap_info.lap.saturating_add(1);
            CheckpointOutcome::LapCompleted
        } else {
            CheckpointOutcome::Crossed
        }
    }

    // How far along the approach to this checkpoint a point is, in [0, 1)
    pub fn approach_fraction(&self, point: DVec2) -> f64 {
        if self.approach_length <= 0.0 {
            return 0.0;
        }
        let fraction = 1.0 - self.position.distance(point) / self.approach_length;
        fraction.clamp(0.0, 1.0 - f64::EPSILON)
    }
}

impl TriggerEntity for Checkpoint {
    fn pos(&self) -> DVec2 {
        self.position
    }

    fn trigger_radius(&self) -> f64 {
        self.radius
    }
}

// AI-only steering target; denser than the checkpoints and off the centerline
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Waypoint {
    pub position: DVec2,
    pub angle: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkpoint(id: CheckpointID) -> Checkpoint {
        Checkpoint::new(id, DVec2::ZERO, 0.0, 10.0)
    }

    #[test]
    fn test_crossing_advances_target() {
        let mut lap_info = LapInformation::new(1);
        assert_eq!(checkpoint(0).cross(&mut lap_info, 4), CheckpointOutcome::Crossed);
        assert_eq!(lap_info.current_checkpoint, 1);
        assert_eq!(lap_info.last_checkpoint, Some(0));
        assert_eq!(lap_info.lap, 0);
    }

    #[test]
    fn test_no_retrigger_while_lingering() {
        let mut lap_info = LapInformation::new(1);
        lap_info.current_checkpoint = 2;
        lap_info.last_checkpoint = Some(2);
        assert_eq!(checkpoint(2).cross(&mut lap_info, 4), CheckpointOutcome::Missed);
        assert_eq!(lap_info.current_checkpoint, 2);
    }

    #[test]
    fn test_last_checkpoint_completes_lap() {
        let mut lap_info = LapInformation::new(1);
        lap_info.current_checkpoint = 3;
        lap_info.last_checkpoint = Some(2);
        assert_eq!(checkpoint(3).cross(&mut lap_info, 4), CheckpointOutcome::LapCompleted);
        assert_eq!(lap_info.current_checkpoint, 0);
        assert_eq!(lap_info.lap, 1);
    }

    #[test]
    fn test_approach_fraction_grows_when_closer() {
        let mut cp = checkpoint(0);
        cp.approach_length = 100.0;
        let far = cp.approach_fraction(DVec2::new(90.0, 0.0));
        let near = cp.approach_fraction(DVec2::new(10.0, 0.0));
        assert!(near > far);
        assert!(cp.approach_fraction(DVec2::ZERO) < 1.0);
        assert_eq!(cp.approach_fraction(DVec2::new(500.0, 0.0)), 0.0);
    }
}
