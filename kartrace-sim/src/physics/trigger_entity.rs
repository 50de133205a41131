use glam::DVec2;

use crate::physics::kart_entity::KartEntity;

// Anything on the track a kart sets off by driving close enough to it
pub trait TriggerEntity {
    fn pos(&self) -> DVec2;
    fn trigger_radius(&self) -> f64;

    fn is_touching(&self, kart: &KartEntity) -> bool {
        self.pos().distance(kart.position()) < self.trigger_radius()
    }
}
