use serde::{Deserialize, Serialize};

// InputEvent is what an input adapter (keyboard, touch buttons, gamepad)
// produces; several sources can be folded into the same ControlInput
#[derive(Copy, Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
pub enum InputEvent {
    Accelerate(bool),
    Brake(bool),
    SteerLeft(bool),
    SteerRight(bool),
    Drift(bool),
    UseItem,
}

// ControlInput is handed to the simulation once per frame to say what the
// human driver is doing
#[derive(Copy, Clone, Serialize, Deserialize, Debug, Default, PartialEq, Eq)]
pub struct ControlInput {
    pub accelerate: bool,
    pub brake: bool,
    pub steer_left: bool,
    pub steer_right: bool,
    pub drift_held: bool,
    // only true on the frame the item button went down
    pub use_item: bool,
}

impl ControlInput {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Accelerate(held) => self.accelerate = held,
            InputEvent::Brake(held) => self.brake = held,
            InputEvent::SteerLeft(held) => self.steer_left = held,
            InputEvent::SteerRight(held) => self.steer_right = held,
            InputEvent::Drift(held) => self.drift_held = held,
            InputEvent::UseItem => self.use_item = true,
        }
    }

    /// Steering in [-1, 1]; positive turns right (heading increases).
    pub fn steer(&self) -> f64 {
        match (self.steer_left, self.steer_right) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        }
    }

    // call once the frame's input has been handed to the simulation
    pub fn clear_pulses(&mut self) {
        self.use_item = false;
    }
}

/// Turns a level signal (button held) into a single pulse on its rising edge.
#[derive(Copy, Clone, Debug, Default)]
pub struct EdgeTrigger {
    was_down: bool,
}

impl EdgeTrigger {
    pub fn update(&mut self, down: bool) -> bool {
        let fired = down && !self.was_down;
        self.was_down = down;
        fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opposite_steering_cancels() {
        let mut input = ControlInput::default();
        input.apply(InputEvent::SteerLeft(true));
        assert_eq!(input.steer(), -1.0);
        input.apply(InputEvent::SteerRight(true));
        assert_eq!(input.steer(), 0.0);
        input.apply(InputEvent::SteerLeft(false));
        assert_eq!(input.steer(), 1.0);
    }

    #[test]
    fn test_item_pulse_is_cleared() {
        let mut input = ControlInput::default();
        input.apply(InputEvent::UseItem);
        assert!(input.use_item);
        input.clear_pulses();
        assert!(!input.use_item);
    }

    #[test]
    fn test_edge_trigger_fires_once_while_held() {
        let mut trigger = EdgeTrigger::default();
        assert!(trigger.update(true));
        assert!(!trigger.update(true));
        assert!(!trigger.update(false));
        assert!(trigger.update(true));
    }
}
