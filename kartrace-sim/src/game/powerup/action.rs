use kartrace_core::player::{items::Item, KartID};
use kartrace_core::RaceConfig;
use tracing::debug;

use crate::physics::effects::EffectKind;
use crate::physics::kart_entity::KartEntity;

// Applies the effect of an item `user` has just fired. The item itself has
// already been taken out of the kart's hands.
pub fn use_item(karts: &mut [KartEntity], user: KartID, item: Item, config: &RaceConfig) {
    let tuning = &config.items;
    debug!(kart = user, ?item, "item used");

    match item {
        Item::Boost => {
            if let Some(kart) = karts.iter_mut().find(|kart| kart.id == user) {
                kart.effects.start(EffectKind::ItemBoost, tuning.boost_duration);
            }
        }
        Item::Shield => {
            if let Some(kart) = karts.iter_mut().find(|kart| kart.id == user) {
                kart.effects.start(EffectKind::Shielded, tuning.shield_duration);
            }
        }
        Item::Slow => {
            for kart in karts
                .iter_mut()
                .filter(|kart| kart.id != user && !kart.is_shielded())
            {
                kart.effects.start(EffectKind::Slowed, tuning.slow_duration);
                // the lower cap applies right away
                kart.clamp_speed(config);
            }
        }
    }
}
