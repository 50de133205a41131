use std::cmp::Ordering;

use kartrace_core::player::{lap_info::Placement, KartID};

use crate::physics::kart_entity::KartEntity;

#[derive(Clone, Copy, Debug)]
pub enum KartProgress {
    Racing { total_progress: f64 },
    Finished { finish_time: f64 },
}

impl KartProgress {
    pub fn of(kart: &KartEntity) -> Self {
        match kart.lap_info.finish_time {
            Some(finish_time) => KartProgress::Finished { finish_time },
            None => KartProgress::Racing {
                total_progress: kart.lap_info.total_progress,
            },
        }
    }

    // Less means further ahead in the standings
    pub fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (
                KartProgress::Racing { total_progress },
                KartProgress::Racing {
                    total_progress: other_total_progress,
                },
            ) => other_total_progress.total_cmp(total_progress),
            (KartProgress::Finished { .. }, KartProgress::Racing { .. }) => Ordering::Less,
            (KartProgress::Racing { .. }, KartProgress::Finished { .. }) => Ordering::Greater,
            (
                KartProgress::Finished { finish_time },
                KartProgress::Finished {
                    finish_time: other_finish_time,
                },
            ) => finish_time.total_cmp(other_finish_time),
        }
    }
}

// Kart ids from first place to last. Equal progress goes to the lower id.
pub fn standings(karts: &[KartEntity]) -> Vec<KartID> {
    let mut order: Vec<(KartID, KartProgress)> = karts
        .iter()
        .map(|kart| (kart.id, KartProgress::of(kart)))
        .collect();
    order.sort_by(|(id, progress), (other_id, other_progress)| {
        progress.cmp(other_progress).then(id.cmp(other_id))
    });
    order.into_iter().map(|(id, _)| id).collect()
}

pub fn assign_placements(karts: &mut [KartEntity]) {
    let order = standings(karts);
    for (rank, id) in order.into_iter().enumerate() {
        if let Some(kart) = karts.iter_mut().find(|kart| kart.id == id) {
            kart.lap_info.placement = (rank + 1) as Placement;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::DVec2;
    use kartrace_core::entity_location::EntityLocation;

    use crate::physics::kart_entity::{AiState, Driver};

    fn kart_with_progress(id: KartID, total_progress: f64) -> KartEntity {
        let mut kart = KartEntity::new(
            id,
            Driver::Computer(AiState::default()),
            EntityLocation::new(DVec2::ZERO, 0.0),
        );
        kart.lap_info.total_progress = total_progress;
        kart
    }

    #[test]
    fn test_ranked_by_progress() {
        let mut karts = vec![
            kart_with_progress(0, 3.2),
            kart_with_progress(1, 9.5),
            kart_with_progress(2, 0.4),
            kart_with_progress(3, 5.0),
        ];
        assign_placements(&mut karts);
        let placements: Vec<Placement> = karts.iter().map(|k| k.lap_info.placement).collect();
        assert_eq!(placements, vec![3, 1, 4, 2]);
    }

    #[test]
    fn test_ties_go_to_lower_id() {
        let karts = vec![
            kart_with_progress(0, 2.0),
            kart_with_progress(1, 4.0),
            kart_with_progress(2, 4.0),
            kart_with_progress(3, 2.0),
        ];
        assert_eq!(standings(&karts), vec![1, 2, 0, 3]);
    }

    #[test]
    fn test_finishers_rank_by_time() {
        let mut karts = vec![
            kart_with_progress(0, 30.0),
            kart_with_progress(1, 25.1),
            kart_with_progress(2, 24.5),
        ];
        karts[0].lap_info.finish_time = Some(62.0);
        karts[1].lap_info.finish_time = Some(58.5);
        assert_eq!(standings(&karts), vec![1, 0, 2]);
    }
}
