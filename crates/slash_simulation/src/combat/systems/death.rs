//! Shared death bookkeeping (player and agents).

use bevy::prelude::*;

use crate::combat::{
    AnimationRequest, Dead, EntityDied, EquippedWeapon, Montage, MontageSet, Weapon,
};
use crate::components::MovementCommand;
use crate::schedule::TimerQueue;
use crate::DeterministicRng;

/// Система: общая обработка смерти
///
/// Запускается после того, как FSM жертвы перешла в Dead и отправила
/// EntityDied:
/// - снимает все таймеры владельца
/// - закрывает окно коллизии оружия
/// - останавливает движение
/// - выбирает случайную позу смерти
/// - вешает маркер Dead
pub fn handle_deaths(
    mut commands: Commands,
    mut deaths: EventReader<EntityDied>,
    mut combatants: Query<(&mut MovementCommand, Option<&EquippedWeapon>, Option<&MontageSet>)>,
    mut weapons: Query<&mut Weapon>,
    mut timers: ResMut<TimerQueue>,
    mut rng: ResMut<DeterministicRng>,
    mut animations: EventWriter<AnimationRequest>,
) {
    for event in deaths.read() {
        let cancelled = timers.cancel_all(event.entity);

        let Ok((mut movement, equipped, montages)) = combatants.get_mut(event.entity) else {
            continue;
        };
        *movement = MovementCommand::Stop;

        if let Some(EquippedWeapon(weapon)) = equipped {
            if let Ok(mut weapon) = weapons.get_mut(*weapon) {
                weapon.close_window();
            }
        }

        if let Some(section) = montages.and_then(|m| m.random_death(&mut rng)) {
            animations.write(AnimationRequest {
                entity: event.entity,
                montage: Montage::Death,
                section,
            });
        }

        if let Ok(mut entity_commands) = commands.get_entity(event.entity) {
            entity_commands.insert(Dead);
        }

        crate::log(&format!(
            "☠️ {:?} died (killer {:?}), {} pending timers cancelled",
            event.entity, event.killer, cancelled
        ));
    }
}
