//! Stamina management systems.

use bevy::prelude::*;

use crate::combat::{Dead, PresentationCue};
use crate::components::Attributes;
use crate::player::Player;

/// Система: regenerate stamina для всех живых бойцов
///
/// Rate берётся из `Attributes::stamina_regen_rate`. Игроку дополнительно
/// уходит StaminaPercent cue для HUD (только когда значение изменилось).
pub fn regenerate_stamina(
    mut query: Query<(Entity, &mut Attributes, Has<Player>), Without<Dead>>,
    mut cues: EventWriter<PresentationCue>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    for (entity, mut attributes, is_player) in query.iter_mut() {
        if !attributes.is_alive() {
            continue;
        }

        let before = attributes.stamina;
        attributes.regen_stamina(delta);

        if is_player && attributes.stamina != before {
            cues.write(PresentationCue::StaminaPercent {
                entity,
                percent: attributes.stamina_percent(),
            });
        }
    }
}
