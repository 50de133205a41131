use glam::DVec2;

use crate::physics::trigger_entity::TriggerEntity;

#[derive(Clone, Copy, Debug)]
pub struct ItemBox {
    pub position: DVec2,
    pub radius: f64,
    pub active: bool,
    // seconds until the box comes back; always > 0 while inactive
    pub respawn_countdown: f64,
}

impl ItemBox {
    pub fn new(position: DVec2, radius: f64) -> Self {
        Self {
            position,
            radius,
            active: true,
            respawn_countdown: 0.0,
        }
    }

    pub fn collect(&mut self, respawn_time: f64) {
        self.active = false;
        self.respawn_countdown = respawn_time.max(f64::EPSILON);
    }

    pub fn update(&mut self, time_step: f64) {
        if self.active {
            return;
        }
        self.respawn_countdown -= time_step;
        if self.respawn_countdown <= 0.0 {
            self.respawn_countdown = 0.0;
            self.active = true;
        }
    }
}

impl TriggerEntity for ItemBox {
    fn pos(&self) -> DVec2 {
        self.position
    }

    fn trigger_radius(&self) -> f64 {
        self.radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_respawn_cycle() {
        let mut item_box = ItemBox::new(DVec2::ZERO, 10.0);
        item_box.collect(1.0);
        assert!(!item_box.active);

        item_box.update(0.4);
        assert!(!item_box.active);
        assert!(item_box.respawn_countdown > 0.0);

        item_box.update(0.4);
        assert!(!item_box.active);

        item_box.update(0.4);
        assert!(item_box.active);
        assert_eq!(item_box.respawn_countdown, 0.0);
    }

    #[test]
    fn test_zero_respawn_still_waits_a_tick() {
        let mut item_box = ItemBox::new(DVec2::ZERO, 10.0);
        item_box.collect(0.0);
        assert!(!item_box.active);
        assert!(item_box.respawn_countdown > 0.0);
        item_box.update(0.01);
        assert!(item_box.active);
    }
}
