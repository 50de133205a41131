use glam::DVec2;
use kartrace_core::player::items::Item;
use kartrace_core::RaceConfig;
use rand::Rng;
use tracing::{debug, info};

use crate::checkpoints::CheckpointOutcome;
use crate::game::events::RaceEvent;
use crate::game::powerup::ItemBox;
use crate::physics::kart_entity::KartEntity;
use crate::physics::trigger_entity::TriggerEntity;
use crate::track::Track;

// Overlapping karts are pushed apart again in follow-up passes in case
// separating one pair shoved a kart into a third
const SEPARATION_PASSES: usize = 16;
// closer than this, two karts have no usable direction between them
const COINCIDENT_DISTANCE: f64 = 1e-9;

/// Runs once per tick, after every kart has moved.
pub struct CollisionResolver<'a> {
    track: &'a Track,
    config: &'a RaceConfig,
}

impl<'a> CollisionResolver<'a> {
    pub fn new(track: &'a Track, config: &'a RaceConfig) -> Self {
        Self { track, config }
    }

    pub fn resolve<R: Rng>(
        &self,
        karts: &mut [KartEntity],
        item_boxes: &mut [ItemBox],
        race_time: f64,
        rng: &mut R,
    ) -> Vec<RaceEvent> {
        let mut events = Vec::new();

        for kart in karts.iter_mut() {
            self.enforce_track_bounds(kart, &mut events);
            self.advance_checkpoint(kart, race_time, &mut events);
            self.update_progress(kart);
        }
        self.collect_item_boxes(karts, item_boxes, rng, &mut events);
        self.separate_karts(karts, &mut events);

        events
    }

    // Karts past a wall get put back on it along the ray from the track
    // center, and lose speed unless a shield takes the hit
    pub fn enforce_track_bounds(&self, kart: &mut KartEntity, events: &mut Vec<RaceEvent>) {
        let (inner, outer) = self.track.corridor_limits();
        let distance = self.track.normalized_distance(kart.position());

        let limit = if distance > outer {
            outer
        } else if distance < inner {
            inner
        } else {
            return;
        };

        kart.entity_location.position = self
            .track
            .project_to_normalized_distance(kart.position(), limit);

        if kart.absorb_hit() {
            events.push(RaceEvent::ShieldAbsorbed { kart: kart.id });
        } else {
            kart.speed *= self.config.collision.wall_speed_penalty;
            kart.clamp_speed(self.config);
            events.push(RaceEvent::WallHit { kart: kart.id });
        }
    }

    // Only the checkpoint the kart is aiming for can be taken
    pub fn advance_checkpoint(&self, kart: &mut KartEntity, race_time: f64, events: &mut Vec<RaceEvent>) {
        let checkpoint_count = self.track.checkpoints.len();
        let target = &self.track.checkpoints[kart.lap_info.current_checkpoint];
        if !target.is_touching(kart) {
            return;
        }

        match target.cross(&mut kart.lap_info, checkpoint_count) {
            CheckpointOutcome::Missed => {}
            CheckpointOutcome::Crossed => {
                events.push(RaceEvent::CheckpointCrossed {
                    kart: kart.id,
                    checkpoint: target.id,
                });
            }
            CheckpointOutcome::LapCompleted => {
                let lap = kart.lap_info.lap;
                events.push(RaceEvent::CheckpointCrossed {
                    kart: kart.id,
                    checkpoint: target.id,
                });
                events.push(RaceEvent::LapCompleted { kart: kart.id, lap });
                info!(kart = kart.id, lap, race_time, "lap completed");

                // finishing only ever happens once
                if lap >= self.config.race.total_laps && !kart.lap_info.is_finished() {
                    kart.lap_info.finish_time = Some(race_time);
                    events.push(RaceEvent::KartFinished {
                        kart: kart.id,
                        finish_time: race_time,
                    });
                    info!(kart = kart.id, finish_time = race_time, "kart finished");
                }
            }
        }
    }

    pub fn update_progress(&self, kart: &mut KartEntity) {
        let checkpoint_count = self.track.checkpoints.len();
        let lap_info = &kart.lap_info;
        let target = &self.track.checkpoints[lap_info.current_checkpoint];

        let total_progress = lap_info.lap as f64 * checkpoint_count as f64
            + lap_info.current_checkpoint as f64
            + target.approach_fraction(kart.position());
        kart.lap_info.total_progress = total_progress;
    }

    pub fn collect_item_boxes<R: Rng>(
        &self,
        karts: &mut [KartEntity],
        item_boxes: &mut [ItemBox],
        rng: &mut R,
        events: &mut Vec<RaceEvent>,
    ) {
        for item_box in item_boxes.iter_mut().filter(|item_box| item_box.active) {
            let collector = karts
                .iter_mut()
                .find(|kart| kart.current_item.is_none() && item_box.is_touching(kart));

            if let Some(kart) = collector {
                let item: Item = rng.gen();
                kart.current_item = Some(item);
                item_box.collect(self.config.items.respawn_time);
                events.push(RaceEvent::ItemCollected { kart: kart.id, item });
                debug!(kart = kart.id, ?item, "item collected");
            }
        }
    }

    pub fn separate_karts(&self, karts: &mut [KartEntity], events: &mut Vec<RaceEvent>) {
        let count = karts.len();
        let min_distance = self.config.collision.min_kart_distance;
        // each pair only trades speed once per tick, however many passes it takes
        let mut bumped = vec![false; count * count];

        for _ in 0..SEPARATION_PASSES {
            let mut overlapping = false;

            for i in 0..count {
                for j in (i + 1)..count {
                    let (left, right) = karts.split_at_mut(j);
                    let (first, second) = (&mut left[i], &mut right[0]);

                    let offset = second.position() - first.position();
                    let distance = offset.length();
                    if distance >= min_distance {
                        continue;
                    }
                    overlapping = true;

                    let normal = if distance > COINCIDENT_DISTANCE {
                        offset / distance
                    } else {
                        DVec2::X
                    };
                    let push = normal * ((min_distance - distance) / 2.0);
                    first.entity_location.position -= push;
                    second.entity_location.position += push;

                    if !bumped[i * count + j] {
                        bumped[i * count + j] = true;
                        self.bump(first, second, events);
                    }
                }
            }

            if !overlapping {
                break;
            }
        }
    }

    // Faster kart hands part of the speed difference to the slower one
    fn bump(&self, first: &mut KartEntity, second: &mut KartEntity, events: &mut Vec<RaceEvent>) {
        let transfer = (first.speed - second.speed) * self.config.collision.bump_transfer;

        for (kart, delta) in [(&mut *first, -transfer), (&mut *second, transfer)] {
            // a shield only ever stops speed being taken away
            if delta < 0.0 && kart.absorb_hit() {
                events.push(RaceEvent::ShieldAbsorbed { kart: kart.id });
            } else {
                kart.speed += delta;
                kart.clamp_speed(self.config);
            }
        }

        events.push(RaceEvent::KartBump {
            first: first.id,
            second: second.id,
        });
    }
}
