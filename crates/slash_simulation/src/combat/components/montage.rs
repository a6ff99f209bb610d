//! Montage section tables per combatant.

use bevy::prelude::*;

use crate::DeterministicRng;

/// Section names the animation driver knows for this combatant.
#[derive(Component, Debug, Clone, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MontageSet {
    pub attack_sections: Vec<String>,
    pub death_sections: Vec<String>,
}

impl Default for MontageSet {
    fn default() -> Self {
        Self {
            attack_sections: vec!["Attack1".into(), "Attack2".into()],
            death_sections: (1..=6).map(|i| format!("Death{}", i)).collect(),
        }
    }
}

impl MontageSet {
    pub fn random_attack(&self, rng: &mut DeterministicRng) -> Option<String> {
        pick(&self.attack_sections, rng)
    }

    pub fn random_death(&self, rng: &mut DeterministicRng) -> Option<String> {
        pick(&self.death_sections, rng)
    }
}

// Пустой список → None, анимацию не просим
fn pick(sections: &[String], rng: &mut DeterministicRng) -> Option<String> {
    rng.index(sections.len()).map(|i| sections[i].clone())
}
