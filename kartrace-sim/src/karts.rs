use glam::DVec2;
use kartrace_core::entity_location::EntityLocation;
use kartrace_core::player::KartID;
use kartrace_core::RaceConfig;

use crate::physics::kart_entity::{AiState, Driver, KartEntity};
use crate::track::Track;

// The grid is two karts wide, rows lined up behind the start line
const GRID_COLUMNS: usize = 2;
const GRID_ROW_SPACING: f64 = 35.0;
const GRID_LANE_OFFSET: f64 = 25.0;

// Kart 0 is always the human one
pub const PLAYER_KART: KartID = 0;

fn get_starting_location_from_grid_slot(track: &Track, slot: usize) -> EntityLocation {
    let row = slot / GRID_COLUMNS;
    let lane = if slot % GRID_COLUMNS == 0 { -1.0 } else { 1.0 };

    // near the line, one radian of ellipse angle is radius_y world units long
    let angle = -((row + 1) as f64 * GRID_ROW_SPACING) / track.radius_y;
    let offset = lane * GRID_LANE_OFFSET;
    let position = track.center
        + DVec2::new(
            (track.radius_x + offset) * angle.cos(),
            (track.radius_y + offset) * angle.sin(),
        );

    EntityLocation::new(position, track.heading_at(angle))
}

// Get a kart as it sits on the grid before the countdown ends
pub fn get_kart_start_entity(track: &Track, id: KartID) -> KartEntity {
    let driver = if id == PLAYER_KART {
        Driver::Human
    } else {
        Driver::Computer(AiState::default())
    };
    KartEntity::new(id, driver, get_starting_location_from_grid_slot(track, id))
}

pub fn get_starting_grid(track: &Track, config: &RaceConfig) -> Vec<KartEntity> {
    (0..=config.race.ai_count)
        .map(|id| get_kart_start_entity(track, id))
        .collect()
}
