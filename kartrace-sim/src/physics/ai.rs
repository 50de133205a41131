use kartrace_core::player::items::Item;
use kartrace_core::AiTuning;
use rand::Rng;

use crate::physics::kart_entity::{AiState, Driver, KartEntity};
use crate::physics::{normalize_angle, WorldView};

/// Speed multiplier that keeps computer karts close to the human one.
///
/// Karts too far ahead ease off a little; karts too far behind push harder
/// than the leaders slow down.
pub fn rubber_band_factor(own_progress: f64, player_progress: Option<f64>, tuning: &AiTuning) -> f64 {
    let player_progress = match player_progress {
        Some(progress) => progress,
        None => return 1.0,
    };

    let lead = own_progress - player_progress;
    if lead > tuning.rubber_band_threshold {
        1.0 - tuning.rubber_band_strength * 0.5
    } else if lead < -tuning.rubber_band_threshold {
        1.0 + tuning.rubber_band_strength
    } else {
        1.0
    }
}

impl KartEntity {
    pub(super) fn drive_ai<R: Rng>(&mut self, time_step: f64, world: &WorldView, rng: &mut R) -> Option<Item> {
        let config = world.config;
        let tuning = &config.ai;
        let track = world.track;
        let position = self.position();

        // aim a few waypoints past the closest one so corners are taken early
        let nearest = track.nearest_waypoint(position);
        let target_waypoint = (nearest + tuning.lookahead) % track.waypoints.len();
        self.driver = Driver::Computer(AiState { target_waypoint });

        let to_target = track.waypoints[target_waypoint].position - position;
        let bearing = f64::atan2(to_target.y, to_target.x);
        let diff = normalize_angle(bearing - self.entity_location.heading);
        if diff.abs() > tuning.dead_zone {
            self.entity_location.heading += diff.signum() * diff.abs().min(tuning.steer_rate * time_step);
        }

        let mut target_speed = config.kart.max_speed * tuning.target_speed_ratio;
        target_speed *= rubber_band_factor(
            self.lap_info.total_progress,
            world.player_progress(),
            tuning,
        );

        // Soft avoidance only; the collision pass does the real separation
        let max_turn = tuning.avoid_max_turn * time_step;
        for other in world.karts.iter().filter(|other| other.id != self.id) {
            let offset = other.position - position;
            let distance = offset.length();
            if distance >= tuning.avoid_radius {
                continue;
            }

            let closeness = 1.0 - distance / tuning.avoid_radius;
            let side = if distance > 0.0 {
                normalize_angle(f64::atan2(offset.y, offset.x) - self.entity_location.heading)
            } else {
                0.0
            };
            // obstacle on the right (positive side) means turning left
            let away = if side > 0.0 { -1.0 } else { 1.0 };
            self.entity_location.heading += away * (closeness * max_turn).min(max_turn);

            if distance < tuning.avoid_tight_radius {
                target_speed *= tuning.avoid_slowdown;
            }
        }

        if self.speed < target_speed {
            self.speed = (self.speed + tuning.acceleration * time_step).min(target_speed);
        } else {
            self.speed = (self.speed - tuning.deceleration * time_step).max(target_speed);
        }
        self.clamp_speed(config);

        if self.current_item.is_some() && rng.gen::<f64>() < tuning.item_use_chance {
            return self.current_item.take();
        }
        None
    }
}
