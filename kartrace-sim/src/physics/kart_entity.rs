use glam::DVec2;
use kartrace_core::entity_location::EntityLocation;
use kartrace_core::player::{
    items::Item,
    lap_info::{LapInformation, Placement},
    KartID,
};
use kartrace_core::RaceConfig;

use crate::physics::drift::DriftState;
use crate::physics::effects::{EffectKind, KartEffects};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AiState {
    // waypoint the kart steered toward on its last tick
    pub target_waypoint: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Driver {
    Human,
    Computer(AiState),
}

#[derive(Clone, Debug)]
pub struct KartEntity {
    pub id: KartID,
    pub driver: Driver,

    pub entity_location: EntityLocation,
    // never negative; karts don't reverse
    pub speed: f64,
    // derived from heading, drift offset and speed every tick
    pub velocity: DVec2,

    pub drift: DriftState,
    pub effects: KartEffects,
    pub current_item: Option<Item>,

    pub lap_info: LapInformation,
}

impl KartEntity {
    pub fn new(id: KartID, driver: Driver, entity_location: EntityLocation) -> Self {
        Self {
            id,
            driver,
            entity_location,
            speed: 0.0,
            velocity: DVec2::ZERO,
            drift: DriftState::default(),
            effects: KartEffects::default(),
            current_item: None,
            lap_info: LapInformation::new((id + 1) as Placement),
        }
    }

    pub fn position(&self) -> DVec2 {
        self.entity_location.position
    }

    pub fn is_human(&self) -> bool {
        matches!(self.driver, Driver::Human)
    }

    pub fn ai_target_waypoint(&self) -> Option<usize> {
        match self.driver {
            Driver::Human => None,
            Driver::Computer(ai) => Some(ai.target_waypoint),
        }
    }

    pub fn is_boosting(&self) -> bool {
        self.effects.is_active(EffectKind::DriftBoost) || self.effects.is_active(EffectKind::ItemBoost)
    }

    pub fn is_slowed(&self) -> bool {
        self.effects.is_active(EffectKind::Slowed)
    }

    pub fn is_shielded(&self) -> bool {
        self.effects.is_active(EffectKind::Shielded)
    }

    // Boost bonus is added first, the slow multiplier applies on top of it.
    // Both boosts running at once don't stack; the bigger bonus wins.
    pub fn max_speed(&self, config: &RaceConfig) -> f64 {
        let mut bonus: f64 = 0.0;
        if self.effects.is_active(EffectKind::DriftBoost) {
            bonus = bonus.max(config.drift.boost_speed_bonus);
        }
        if self.effects.is_active(EffectKind::ItemBoost) {
            bonus = bonus.max(config.items.boost_speed_bonus);
        }

        let mut max_speed = config.kart.max_speed + bonus;
        if self.is_slowed() {
            max_speed *= config.items.slow_factor;
        }
        max_speed.max(0.0)
    }

    pub fn clamp_speed(&mut self, config: &RaceConfig) {
        if !self.speed.is_finite() {
            self.speed = 0.0;
        }
        self.speed = self.speed.clamp(0.0, self.max_speed(config));
    }

    /// Steering authority shrinks as the kart speeds up.
    pub fn steer_rate(&self, config: &RaceConfig) -> f64 {
        let kart = &config.kart;
        let speed_ratio = (self.speed / kart.max_speed).clamp(0.0, 1.0);
        kart.steer_rate * (1.0 - speed_ratio * kart.speed_steer_factor)
    }

    // A shield eats exactly one hit. Returns true if this hit was absorbed.
    pub fn absorb_hit(&mut self) -> bool {
        if self.is_shielded() {
            self.effects.clear(EffectKind::Shielded);
            true
        } else {
            false
        }
    }

    pub fn integrate_position(&mut self, time_step: f64, config: &RaceConfig) {
        let direction = self.entity_location.heading + self.drift.angle_offset;
        self.velocity =
            DVec2::new(direction.cos(), direction.sin()) * self.speed * config.kart.position_scale;
        self.entity_location.position += self.velocity * time_step;
    }
}
