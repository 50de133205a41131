use serde::Serialize;

// Each timed effect keeps its own countdown, so a drift boost firing while an
// item boost is running never cuts the item boost short (and vice versa)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum EffectKind {
    DriftBoost,
    ItemBoost,
    Slowed,
    Shielded,
}

impl EffectKind {
    pub const ALL: [EffectKind; 4] = [
        EffectKind::DriftBoost,
        EffectKind::ItemBoost,
        EffectKind::Slowed,
        EffectKind::Shielded,
    ];

    fn index(self) -> usize {
        match self {
            EffectKind::DriftBoost => 0,
            EffectKind::ItemBoost => 1,
            EffectKind::Slowed => 2,
            EffectKind::Shielded => 3,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct KartEffects {
    // seconds left, 0 when inactive
    remaining: [f64; 4],
}

impl KartEffects {
    // re-applying an active effect restarts its timer
    pub fn start(&mut self, kind: EffectKind, duration: f64) {
        self.remaining[kind.index()] = duration.max(0.0);
    }

    pub fn clear(&mut self, kind: EffectKind) {
        self.remaining[kind.index()] = 0.0;
    }

    pub fn is_active(&self, kind: EffectKind) -> bool {
        self.remaining[kind.index()] > 0.0
    }

    pub fn remaining(&self, kind: EffectKind) -> f64 {
        self.remaining[kind.index()]
    }

    pub fn tick(&mut self, time_step: f64) {
        for remaining in self.remaining.iter_mut() {
            if *remaining > 0.0 {
                *remaining -= time_step;
                if *remaining <= 0.0 {
                    *remaining = 0.0;
                }
            }
        }
    }

    pub fn active(&self) -> Vec<EffectKind> {
        EffectKind::ALL
            .into_iter()
            .filter(|kind| self.is_active(*kind))
            .collect()
    }
}
