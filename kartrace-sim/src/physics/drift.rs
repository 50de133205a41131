use kartrace_core::player::player_inputs::ControlInput;
use kartrace_core::RaceConfig;

use crate::physics::effects::EffectKind;
use crate::physics::kart_entity::KartEntity;

// While drifting the slide angle grows at this fraction of the steer rate...
const DRIFT_OFFSET_RATE: f64 = 0.5;
// ...and the nose itself turns at this fraction
const DRIFT_TURN_RATE: f64 = 0.7;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct DriftState {
    pub active: bool,
    // -1 left, 1 right, 0 when not drifting; locked when the drift starts
    pub direction: i8,
    pub charge: f64,
    // visual slide, only ever added to the direction of travel
    pub angle_offset: f64,
}

impl KartEntity {
    // Turns the kart for this tick, entering, holding or releasing a drift as
    // the input dictates. Returns true if a release fired a drift boost.
    pub fn steer_and_drift(&mut self, input: &ControlInput, time_step: f64, config: &RaceConfig) -> bool {
        let tuning = &config.drift;
        let steer = input.steer();
        let steer_rate = self.steer_rate(config);
        let mut boosted = false;

        if self.drift.active {
            if !input.drift_held || steer == 0.0 || self.speed <= tuning.min_speed {
                boosted = self.release_drift(config);
            }
        } else if input.drift_held && steer != 0.0 && self.speed > tuning.min_speed {
            self.drift = DriftState {
                active: true,
                direction: if steer > 0.0 { 1 } else { -1 },
                charge: 0.0,
                angle_offset: 0.0,
            };
        }

        if self.drift.active {
            let direction = self.drift.direction as f64;
            let max_offset = tuning.max_angle_offset;

            self.drift.charge = (self.drift.charge + tuning.charge_rate * time_step).min(tuning.max_charge);
            self.drift.angle_offset = (self.drift.angle_offset
                + direction * steer_rate * DRIFT_OFFSET_RATE * time_step)
                .clamp(-max_offset, max_offset);
            self.entity_location.heading += steer * steer_rate * DRIFT_TURN_RATE * time_step;
            self.speed *= tuning.grip;
        } else {
            self.entity_location.heading += steer * steer_rate * time_step;
        }

        boosted
    }

    // Charge and slide always reset; only a charge strictly past the release
    // threshold earns the boost.
    pub fn release_drift(&mut self, config: &RaceConfig) -> bool {
        let fired = self.drift.charge > config.drift.release_threshold;
        if fired {
            self.effects
                .start(EffectKind::DriftBoost, config.drift.boost_duration);
        }
        self.drift = DriftState::default();
        fired
    }
}
