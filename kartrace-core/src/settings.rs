use config::{Config, ConfigError, File};
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};

// Everything in here can be overridden from config.yaml; any key that is left
// out keeps the value from the Default impls below.

#[derive(Deserialize, Serialize, Clone, Debug)]
#[serde(default)]
pub struct Settings {
    // 0 runs the headless driver as fast as it can
    pub tick_ms: u64,
    pub seed: Option<u64>,
    pub race: RaceConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            tick_ms: 16,
            seed: None,
            race: RaceConfig::default(),
        }
    }
}

impl Settings {
    pub fn new() -> Result<Settings, ConfigError> {
        Self::from_file("config.yaml")
    }

    pub fn from_file(path: &str) -> Result<Settings, ConfigError> {
        let config = Config::builder()
            .add_source(File::with_name(path).required(false))
            .build()?;

        let settings: Settings = config.try_deserialize()?;
        settings.race.validate()?;
        Ok(settings)
    }
}

lazy_static! {
    pub static ref GLOBAL_CONFIG: Settings = Settings::new().expect("failed to read config file");
}

/// Every gameplay tunable of a race, grouped by the system that reads it.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
#[serde(default)]
pub struct RaceConfig {
    pub kart: KartTuning,
    pub drift: DriftTuning,
    pub track: TrackTuning,
    pub ai: AiTuning,
    pub items: ItemTuning,
    pub collision: CollisionTuning,
    pub race: RaceTuning,
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct KartTuning {
    /// Top speed without any boost or slow applied.
    pub max_speed: f64,
    /// Speed gained per second while accelerating.
    pub acceleration: f64,
    /// Speed lost per second while braking.
    pub brake_power: f64,
    /// Coasting loses speed at half of this rate.
    pub deceleration: f64,
    /// Turn rate in radians per second at standstill.
    pub steer_rate: f64,
    /// How much of the steer rate is lost at top speed.
    pub speed_steer_factor: f64,
    /// Converts speed units into world units per second.
    pub position_scale: f64,
}

impl Default for KartTuning {
    fn default() -> Self {
        Self {
            max_speed: 300.0,
            acceleration: 120.0,
            brake_power: 200.0,
            deceleration: 60.0,
            steer_rate: 2.8,
            speed_steer_factor: 0.5,
            position_scale: 0.5,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct DriftTuning {
    pub min_speed: f64,
    /// Speed multiplier applied every tick while drifting.
    pub grip: f64,
    pub charge_rate: f64,
    pub max_charge: f64,
    /// Charge has to be strictly above this for a release to boost.
    pub release_threshold: f64,
    pub boost_speed_bonus: f64,
    pub boost_duration: f64,
    pub max_angle_offset: f64,
}

impl Default for DriftTuning {
    fn default() -> Self {
        Self {
            min_speed: 80.0,
            grip: 0.995,
            charge_rate: 40.0,
            max_charge: 100.0,
            release_threshold: 30.0,
            boost_speed_bonus: 80.0,
            boost_duration: 1.2,
            max_angle_offset: 0.5,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct TrackTuning {
    pub center_x: f64,
    pub center_y: f64,
    pub radius_x: f64,
    pub radius_y: f64,
    pub corridor_width: f64,
    /// Forgiveness taken off each side of the corridor before the wall kicks in.
    pub wall_margin: f64,
    pub checkpoint_count: usize,
    pub waypoint_count: usize,
    /// Radial amplitude of the racing line wobble, in world units.
    pub waypoint_wobble: f64,
    /// Number of wobble periods per lap.
    pub waypoint_wobble_frequency: f64,
}

impl Default for TrackTuning {
    fn default() -> Self {
        Self {
            center_x: 600.0,
            center_y: 400.0,
            radius_x: 450.0,
            radius_y: 280.0,
            corridor_width: 140.0,
            wall_margin: 10.0,
            checkpoint_count: 8,
            waypoint_count: 32,
            waypoint_wobble: 18.0,
            waypoint_wobble_frequency: 3.0,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct AiTuning {
    /// How many waypoints ahead of the nearest one an AI kart aims for.
    pub lookahead: usize,
    pub steer_rate: f64,
    pub dead_zone: f64,
    /// Cruising speed as a fraction of the base top speed.
    pub target_speed_ratio: f64,
    pub acceleration: f64,
    pub deceleration: f64,
    pub rubber_band_threshold: f64,
    pub rubber_band_strength: f64,
    pub avoid_radius: f64,
    pub avoid_tight_radius: f64,
    /// Cap on the avoidance turn, in radians per second.
    pub avoid_max_turn: f64,
    pub avoid_slowdown: f64,
    /// Chance per tick that an AI kart fires its held item.
    pub item_use_chance: f64,
}

impl Default for AiTuning {
    fn default() -> Self {
        Self {
            lookahead: 3,
            steer_rate: 2.5,
            dead_zone: 0.05,
            target_speed_ratio: 0.85,
            acceleration: 90.0,
            deceleration: 50.0,
            rubber_band_threshold: 0.5,
            rubber_band_strength: 0.15,
            avoid_radius: 60.0,
            avoid_tight_radius: 35.0,
            avoid_max_turn: 1.5,
            avoid_slowdown: 0.85,
            item_use_chance: 0.005,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct ItemTuning {
    pub powerup_count: usize,
    pub respawn_time: f64,
    pub pickup_radius: f64,
    pub boost_duration: f64,
    pub boost_speed_bonus: f64,
    pub shield_duration: f64,
    pub slow_duration: f64,
    /// Max speed multiplier while slowed.
    pub slow_factor: f64,
}

impl Default for ItemTuning {
    fn default() -> Self {
        Self {
            powerup_count: 6,
            respawn_time: 4.0,
            pickup_radius: 25.0,
            boost_duration: 2.0,
            boost_speed_bonus: 80.0,
            shield_duration: 5.0,
            slow_duration: 3.0,
            slow_factor: 0.6,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct CollisionTuning {
    /// Has to reach past the walls at the widest part of the track, or a
    /// kart hugging a wall can drive by a checkpoint without taking it.
    pub checkpoint_radius: f64,
    pub min_kart_distance: f64,
    /// Fraction of the speed difference handed from the faster kart to the slower one.
    pub bump_transfer: f64,
    /// Speed multiplier applied on every tick a kart is against the wall.
    pub wall_speed_penalty: f64,
}

impl Default for CollisionTuning {
    fn default() -> Self {
        Self {
            checkpoint_radius: 80.0,
            min_kart_distance: 25.0,
            bump_transfer: 0.3,
            wall_speed_penalty: 0.7,
        }
    }
}

#[derive(Deserialize, Serialize, Clone, Copy, Debug)]
#[serde(default)]
pub struct RaceTuning {
    pub total_laps: u8,
    pub ai_count: usize,
    pub countdown_seconds: f64,
    /// Upper bound on a single simulation step, in seconds.
    pub max_dt: f64,
}

impl Default for RaceTuning {
    fn default() -> Self {
        Self {
            total_laps: 3,
            ai_count: 3,
            countdown_seconds: 3.0,
            max_dt: 0.05,
        }
    }
}

impl TrackTuning {
    // World distance from the centerline to a wall where the ellipse is
    // widest; walls sit at a fixed normalized distance, scaled by the radius
    pub fn wall_offset(&self) -> f64 {
        let mean_radius = (self.radius_x + self.radius_y) / 2.0;
        (self.corridor_width / 2.0 - self.wall_margin) / mean_radius * self.radius_x.max(self.radius_y)
    }
}

impl RaceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fail = |msg: &str| Err(ConfigError::Message(msg.to_string()));

        if self.track.checkpoint_count < 2 {
            return fail("track.checkpoint_count must be at least 2");
        }
        if self.track.waypoint_count == 0 || self.ai.lookahead >= self.track.waypoint_count {
            return fail("ai.lookahead must be smaller than track.waypoint_count");
        }
        if self.track.radius_x <= 0.0 || self.track.radius_y <= 0.0 {
            return fail("track radii must be positive");
        }
        if self.track.corridor_width / 2.0 <= self.track.wall_margin {
            return fail("track.corridor_width must leave room past the wall margin");
        }
        if self.collision.checkpoint_radius <= self.track.wall_offset() {
            return fail("collision.checkpoint_radius must reach the track walls");
        }
        if self.kart.max_speed <= 0.0 {
            return fail("kart.max_speed must be positive");
        }
        if self.race.total_laps == 0 {
            return fail("race.total_laps must be at least 1");
        }
        if self.race.max_dt <= 0.0 {
            return fail("race.max_dt must be positive");
        }
        Ok(())
    }
}
