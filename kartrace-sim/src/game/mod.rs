use std::f64::consts::TAU;

use kartrace_core::player::{player_inputs::ControlInput, KartID};
use kartrace_core::{ConfigError, RaceConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::{debug, info};

use crate::karts::{get_starting_grid, PLAYER_KART};
use crate::physics::collisions::CollisionResolver;
use crate::physics::kart_entity::{Driver, KartEntity};
use crate::physics::{DriveMode, KartSnapshot, WorldView};
use crate::progress::{assign_placements, standings};
use crate::track::Track;

use self::events::RaceEvent;
use self::phase::*;
use self::powerup::{use_item, ItemBox};
use self::snapshot::{ItemBoxView, KartView, RaceSnapshot};

pub mod events;
pub mod phase;
pub mod powerup;
pub mod snapshot;

/// One race from grid to flag. The caller owns it and drives it with
/// `update`; restarting throws the whole race away and builds a new one.
///
/// Only validated configs get in, so a session never has to cope with an
/// empty track or a lookahead past the last waypoint.
pub struct RaceSession {
    config: RaceConfig,
    track: Track,
    karts: Vec<KartEntity>,
    item_boxes: Vec<ItemBox>,
    state: RaceState,
    rng: StdRng,
}

// Item boxes sit on the centerline halfway between checkpoints' spacing
fn get_item_box_layout(track: &Track, config: &RaceConfig) -> Vec<ItemBox> {
    let count = config.items.powerup_count;
    (0..count)
        .map(|i| {
            let angle = TAU * (i as f64 + 0.5) / count as f64;
            ItemBox::new(track.point_at(angle), config.items.pickup_radius)
        })
        .collect()
}

impl RaceSession {
    pub fn new(config: RaceConfig, seed: Option<u64>) -> Result<Self, ConfigError> {
        config.validate()?;

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let track = Track::new(&config);
        let karts = get_starting_grid(&track, &config);
        let item_boxes = get_item_box_layout(&track, &config);
        let state = get_starting_race_state(&config);

        info!(
            karts = karts.len(),
            laps = config.race.total_laps,
            "new race session"
        );

        Ok(RaceSession {
            config,
            track,
            karts,
            item_boxes,
            state,
            rng,
        })
    }

    // rebuilds track, karts and item boxes; the random stream carries on
    pub fn restart(&mut self) {
        self.track = Track::new(&self.config);
        self.karts = get_starting_grid(&self.track, &self.config);
        self.item_boxes = get_item_box_layout(&self.track, &self.config);
        self.state = get_starting_race_state(&self.config);
        info!("race restarted");
    }

    // Restarts are only honoured once the race is over
    pub fn request_restart(&mut self) -> bool {
        if self.state.is_finished() {
            self.restart();
            true
        } else {
            false
        }
    }

    pub fn update(&mut self, time_step: f64, input: ControlInput) -> Vec<RaceEvent> {
        let time_step = if time_step.is_finite() {
            time_step.clamp(0.0, self.config.race.max_dt)
        } else {
            0.0
        };
        let mut events = Vec::new();

        match self.state.phase {
            RacePhase::Countdown(remaining) => {
                let remaining = remaining - time_step;
                if remaining <= 0.0 {
                    self.state.phase = RacePhase::Racing;
                    events.push(RaceEvent::RaceStarted);
                    info!("race started");
                } else {
                    self.state.phase = RacePhase::Countdown(remaining);
                }
                return events;
            }
            RacePhase::Finished => return events,
            RacePhase::Racing => {}
        }

        self.state.elapsed += time_step;

        // everybody moves against the same picture of where the others were
        let snapshot: Vec<KartSnapshot> = self.karts.iter().map(KartSnapshot::of).collect();
        let world = WorldView {
            track: &self.track,
            config: &self.config,
            karts: &snapshot,
        };

        let mut fired = Vec::new();
        for kart in self.karts.iter_mut() {
            let mode = match kart.driver {
                Driver::Human => DriveMode::Player(input),
                Driver::Computer(_) => DriveMode::Ai,
            };
            if let Some(item) = kart.do_physics_step(mode, time_step, &world, &mut self.rng) {
                fired.push((kart.id, item));
            }
        }
        for (kart, item) in fired {
            use_item(&mut self.karts, kart, item, &self.config);
            events.push(RaceEvent::ItemUsed { kart, item });
        }

        for item_box in self.item_boxes.iter_mut() {
            item_box.update(time_step);
        }

        let resolver = CollisionResolver::new(&self.track, &self.config);
        events.extend(resolver.resolve(
            &mut self.karts,
            &mut self.item_boxes,
            self.state.elapsed,
            &mut self.rng,
        ));

        assign_placements(&mut self.karts);

        for event in &events {
            if let RaceEvent::KartFinished { kart, .. } = event {
                if self.state.winner.is_none() {
                    self.state.winner = Some(*kart);
                }
            }
        }

        if self.player().map_or(false, |kart| kart.lap_info.is_finished()) {
            self.state.phase = RacePhase::Finished;
            events.push(RaceEvent::RaceFinished {
                winner: self.state.winner,
            });
            info!(
                winner = ?self.state.winner,
                elapsed = self.state.elapsed,
                "race finished"
            );
        }

        debug!(events = events.len(), "tick");
        events
    }

    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    pub fn karts(&self) -> &[KartEntity] {
        &self.karts
    }

    pub fn item_boxes(&self) -> &[ItemBox] {
        &self.item_boxes
    }

    pub fn state(&self) -> &RaceState {
        &self.state
    }

    pub fn player(&self) -> Option<&KartEntity> {
        self.karts.iter().find(|kart| kart.id == PLAYER_KART)
    }

    pub fn standings(&self) -> Vec<KartID> {
        standings(&self.karts)
    }

    pub fn snapshot(&self) -> RaceSnapshot<'_> {
        RaceSnapshot {
            track: &self.track,
            karts: self.karts.iter().map(KartView::from).collect(),
            item_boxes: self.item_boxes.iter().map(ItemBoxView::from).collect(),
            phase: self.state.phase,
            countdown: self.state.countdown(),
            elapsed: self.state.elapsed,
            winner: self.state.winner,
        }
    }
}
