//! Equipment system events
//!
//! - `EquipWeaponIntent` → combatant берёт оружие (pickup / стартовый меч);
//!   прежний владелец его теряет, прежнее оружие combatant'а выпадает
//! - `UnequipWeaponIntent` → combatant бросает оружие

use bevy::prelude::*;

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EquipWeaponIntent {
    pub combatant: Entity,
    pub weapon: Entity,
}

#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnequipWeaponIntent {
    pub combatant: Entity,
}
