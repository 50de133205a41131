use glam::DVec2;
use kartrace_core::entity_location::EntityLocation;
use kartrace_core::player::{items::Item, lap_info::LapInformation, KartID};
use serde::Serialize;

use crate::game::phase::RacePhase;
use crate::game::powerup::ItemBox;
use crate::physics::effects::EffectKind;
use crate::physics::kart_entity::KartEntity;
use crate::track::Track;

// Read-only view of a session for renderers and HUDs
#[derive(Clone, Debug, Serialize)]
pub struct RaceSnapshot<'a> {
    pub track: &'a Track,
    pub karts: Vec<KartView>,
    pub item_boxes: Vec<ItemBoxView>,
    pub phase: RacePhase,
    pub countdown: f64,
    pub elapsed: f64,
    pub winner: Option<KartID>,
}

#[derive(Clone, Debug, Serialize)]
pub struct KartView {
    pub id: KartID,
    pub is_human: bool,
    // where a computer kart is steering, for debug overlays
    pub ai_target_waypoint: Option<usize>,
    pub location: EntityLocation,
    pub speed: f64,
    pub drifting: bool,
    pub drift_direction: i8,
    pub drift_charge: f64,
    pub drift_angle_offset: f64,
    pub effects: Vec<EffectKind>,
    pub item: Option<Item>,
    pub lap_info: LapInformation,
}

impl From<&KartEntity> for KartView {
    fn from(kart: &KartEntity) -> Self {
        Self {
            id: kart.id,
            is_human: kart.is_human(),
            ai_target_waypoint: kart.ai_target_waypoint(),
            location: kart.entity_location,
            speed: kart.speed,
            drifting: kart.drift.active,
            drift_direction: kart.drift.direction,
            drift_charge: kart.drift.charge,
            drift_angle_offset: kart.drift.angle_offset,
            effects: kart.effects.active(),
            item: kart.current_item,
            lap_info: kart.lap_info,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize)]
pub struct ItemBoxView {
    pub position: DVec2,
    pub active: bool,
}

impl From<&ItemBox> for ItemBoxView {
    fn from(item_box: &ItemBox) -> Self {
        Self {
            position: item_box.position,
            active: item_box.active,
        }
    }
}
