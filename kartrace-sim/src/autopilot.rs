use kartrace_core::player::player_inputs::{ControlInput, EdgeTrigger, InputEvent};

use crate::physics::kart_entity::KartEntity;
use crate::physics::normalize_angle;
use crate::track::Track;

// no steering inside this many radians of the target
const STEER_DEAD_ZONE: f64 = 0.05;
// corners sharper than this get drifted through
const DRIFT_ANGLE: f64 = 0.35;

/// Stands in for a keyboard when nobody is at the wheel: produces the same
/// input events a person would and folds them into a `ControlInput`.
pub struct Autopilot {
    input: ControlInput,
    item_button: EdgeTrigger,
    lookahead: usize,
}

impl Autopilot {
    pub fn new(lookahead: usize) -> Self {
        Self {
            input: ControlInput::default(),
            item_button: EdgeTrigger::default(),
            lookahead,
        }
    }

    pub fn events(&mut self, kart: &KartEntity, track: &Track) -> Vec<InputEvent> {
        let position = kart.position();
        let target = (track.nearest_waypoint(position) + self.lookahead) % track.waypoints.len();
        let to_target = track.waypoints[target].position - position;
        let diff = normalize_angle(f64::atan2(to_target.y, to_target.x) - kart.entity_location.heading);

        let mut events = vec![
            InputEvent::Accelerate(true),
            InputEvent::Brake(false),
            InputEvent::SteerLeft(diff < -STEER_DEAD_ZONE),
            InputEvent::SteerRight(diff > STEER_DEAD_ZONE),
            InputEvent::Drift(diff.abs() > DRIFT_ANGLE),
        ];

        // holding the button while carrying an item only fires it once
        if self.item_button.update(kart.current_item.is_some()) {
            events.push(InputEvent::UseItem);
        }
        events
    }

    pub fn next_input(&mut self, kart: &KartEntity, track: &Track) -> ControlInput {
        self.input.clear_pulses();
        for event in self.events(kart, track) {
            self.input.apply(event);
        }
        self.input
    }
}
