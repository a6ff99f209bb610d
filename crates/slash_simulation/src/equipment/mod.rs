//! Equipment module - weapon ownership lifecycle
//!
//! # Architecture
//!
//! **Events → Systems flow:**
//! - Host (pickup overlap, spawn script) emits intent events
//! - Systems transfer ownership (`Weapon::owner` ↔ `EquippedWeapon`)
//! - `PresentationCue::EquipSound` уходит хосту
//!
//! Оружие всегда принадлежит максимум одному combatant.

use bevy::prelude::*;

use crate::player::systems::process_player_intents;
use crate::CombatSet;

pub mod events;
pub mod systems;


pub use events::*;
pub use systems::*;

/// Equipment plugin (ownership lifecycle)
pub struct EquipmentPlugin;

impl Plugin for EquipmentPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<EquipWeaponIntent>()
            .add_event::<UnequipWeaponIntent>()
            // Equip до player intents: подобранный меч сразу можно использовать
            .add_systems(
                FixedUpdate,
                (process_equip_weapon, process_unequip_weapon)
                    .chain()
                    .in_set(CombatSet::Intents)
                    .before(process_player_intents),
            );
    }
}
