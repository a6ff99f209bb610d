//! Equipment system implementations
//!
//! - `process_equip_weapon` - equip с передачей владения
//! - `process_unequip_weapon` - бросить оружие
//! - `spawn_equipped_weapon` - helper для спавна с уже выданным оружием

use bevy::prelude::*;

use crate::combat::{EquippedWeapon, PresentationCue, Weapon};
use crate::components::Attributes;
use crate::equipment::events::*;
use crate::player::WeaponStance;
use crate::{log, log_error};

/// Spawns `weapon` already owned by `owner` (стартовое оружие агента/игрока).
pub fn spawn_equipped_weapon(commands: &mut Commands, owner: Entity, mut weapon: Weapon) -> Entity {
    weapon.owner = Some(owner);
    weapon.close_window();
    let weapon_entity = commands.spawn(weapon).id();
    commands.entity(owner).insert(EquippedWeapon(weapon_entity));
    weapon_entity
}

/// Process equip weapon intents
///
/// # Flow
/// 1. Старое оружие combatant'а (если другое) выпадает: owner = None
/// 2. Новое оружие забирается у прежнего владельца
/// 3. owner = combatant, окно коллизии закрыто, EquippedWeapon обновлён
/// 4. Игрок сразу в стойке Drawn, equip sound cue
pub fn process_equip_weapon(
    mut commands: Commands,
    mut events: EventReader<EquipWeaponIntent>,
    mut holders: Query<(
        &Transform,
        &Attributes,
        Option<&EquippedWeapon>,
        Option<&mut WeaponStance>,
    )>,
    mut weapons: Query<&mut Weapon>,
    mut cues: EventWriter<PresentationCue>,
) {
    for intent in events.read() {
        let Ok((transform, attributes, current, stance)) = holders.get_mut(intent.combatant) else {
            log_error(&format!("Equip: combatant {:?} not found", intent.combatant));
            continue;
        };
        if !attributes.is_alive() {
            continue;
        }
        if current.is_some_and(|c| c.0 == intent.weapon) {
            continue;
        }
        if weapons.get(intent.weapon).is_err() {
            log_error(&format!("Equip: {:?} is not a weapon", intent.weapon));
            continue;
        }

        // 1. Старое оружие выпадает
        if let Some(EquippedWeapon(old)) = current {
            if let Ok(mut old_weapon) = weapons.get_mut(*old) {
                old_weapon.owner = None;
                old_weapon.close_window();
            }
        }

        // 2-3. Передача владения
        let Ok(mut weapon) = weapons.get_mut(intent.weapon) else {
            continue;
        };
        let previous_owner = weapon.owner.replace(intent.combatant);
        weapon.close_window();

        if let Some(previous) = previous_owner.filter(|p| *p != intent.combatant) {
            if let Ok(mut previous_commands) = commands.get_entity(previous) {
                previous_commands.remove::<EquippedWeapon>();
            }
        }
        commands
            .entity(intent.combatant)
            .insert(EquippedWeapon(intent.weapon));

        // 4. Стойка + звук
        if let Some(mut stance) = stance {
            *stance = WeaponStance::Drawn;
        }
        cues.write(PresentationCue::EquipSound {
            weapon: intent.weapon,
            at: transform.translation,
            sound: weapon.equip_sound.clone(),
        });

        log(&format!(
            "🗡️ {:?} equipped {:?} (taken from {:?})",
            intent.combatant, intent.weapon, previous_owner
        ));
    }
}

/// Process unequip weapon intents
pub fn process_unequip_weapon(
    mut commands: Commands,
    mut events: EventReader<UnequipWeaponIntent>,
    mut holders: Query<(&EquippedWeapon, Option<&mut WeaponStance>)>,
    mut weapons: Query<&mut Weapon>,
) {
    for intent in events.read() {
        let Ok((equipped, stance)) = holders.get_mut(intent.combatant) else {
            continue;
        };

        if let Ok(mut weapon) = weapons.get_mut(equipped.0) {
            weapon.owner = None;
            weapon.close_window();
        }
        if let Some(mut stance) = stance {
            *stance = WeaponStance::Sheathed;
        }
        commands.entity(intent.combatant).remove::<EquippedWeapon>();

        log(&format!("{:?} dropped weapon {:?}", intent.combatant, equipped.0));
    }
}
