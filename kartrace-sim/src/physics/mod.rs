use std::f64::consts::{PI, TAU};

use glam::DVec2;
use kartrace_core::player::{items::Item, player_inputs::ControlInput, KartID};
use kartrace_core::RaceConfig;
use rand::Rng;
use tracing::trace;

use crate::track::Track;

use self::kart_entity::KartEntity;

pub mod ai;
pub mod collisions;
pub mod drift;
pub mod effects;
pub mod kart_entity;
pub mod trigger_entity;


// Who is behind the wheel this tick
#[derive(Clone, Copy, Debug)]
pub enum DriveMode {
    Player(ControlInput),
    Ai,
}

// What one kart is allowed to know about the others while it moves; taken
// before anybody moves so every kart sees the same picture
#[derive(Clone, Copy, Debug)]
pub struct KartSnapshot {
    pub id: KartID,
    pub position: DVec2,
    pub total_progress: f64,
    pub is_human: bool,
}

impl KartSnapshot {
    pub fn of(kart: &KartEntity) -> Self {
        Self {
            id: kart.id,
            position: kart.position(),
            total_progress: kart.lap_info.total_progress,
            is_human: kart.is_human(),
        }
    }
}

pub struct WorldView<'a> {
    pub track: &'a Track,
    pub config: &'a RaceConfig,
    pub karts: &'a [KartSnapshot],
}

impl<'a> WorldView<'a> {
    pub fn player_progress(&self) -> Option<f64> {
        self.karts
            .iter()
            .find(|kart| kart.is_human)
            .map(|kart| kart.total_progress)
    }
}

// Wraps an angle into (-pi, pi]
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(TAU) - PI;
    if wrapped <= -PI {
        wrapped + TAU
    } else {
        wrapped
    }
}

impl KartEntity {
    /* Advance this kart by one tick: effect timers, speed, steering and
     * position. Returns the item the kart fired this tick, if any; its effect
     * is applied by the caller since it can reach other karts. */
    pub fn do_physics_step<R: Rng>(
        &mut self,
        mode: DriveMode,
        time_step: f64,
        world: &WorldView,
        rng: &mut R,
    ) -> Option<Item> {
        let config = world.config;
        self.effects.tick(time_step);

        let used_item = match mode {
            DriveMode::Player(input) => self.drive_player(&input, time_step, config),
            DriveMode::Ai => self.drive_ai(time_step, world, rng),
        };

        self.entity_location.heading = normalize_angle(self.entity_location.heading);
        self.integrate_position(time_step, config);

        if used_item.is_some() {
            trace!(kart = self.id, item = ?used_item, "item fired");
        }
        used_item
    }

    fn drive_player(&mut self, input: &ControlInput, time_step: f64, config: &RaceConfig) -> Option<Item> {
        let kart = &config.kart;

        if input.accelerate {
            self.speed += kart.acceleration * time_step;
        }
        if input.brake {
            self.speed -= kart.brake_power * time_step;
        }
        if !input.accelerate && !input.brake {
            self.speed -= kart.deceleration * time_step * 0.5;
        }
        self.clamp_speed(config);

        if self.steer_and_drift(input, time_step, config) {
            trace!(kart = self.id, "drift boost");
        }

        if input.use_item {
            self.current_item.take()
        } else {
            None
        }
    }
}
