//! Player systems: intents, animation signals, damage reactions.

use bevy::prelude::*;

use crate::combat::{
    AnimationRequest, AnimationSignal, EntityDied, EquippedWeapon, Montage, MontageSet,
    PresentationCue, StateRequest, Weapon,
};
use crate::components::Attributes;
use crate::player::{
    ActionEvent, ActionGuards, ActionState, Player, PlayerAction, PlayerIntent, WeaponStance,
};
use crate::DeterministicRng;

fn guards(attributes: &Attributes, stance: WeaponStance, equipped: Option<&EquippedWeapon>) -> ActionGuards {
    ActionGuards {
        weapon_drawn: equipped.is_some() && stance == WeaponStance::Drawn,
        owns_weapon: equipped.is_some(),
        can_dodge: attributes.can_dodge(),
    }
}

/// Система: PlayerIntent → переход FSM + запрос анимации
///
/// - Attack: только Unoccupied с обнажённым оружием, случайная attack секция
/// - Dodge: только Unoccupied и stamina >= dodge_cost, stamina списывается
/// - ToggleArmed: только Unoccupied с оружием, "Equip"/"Unequip" секция
///
/// Отклонённые intents молча игнорируются.
pub fn process_player_intents(
    mut intents: EventReader<PlayerIntent>,
    mut players: Query<
        (
            &mut ActionState,
            &mut WeaponStance,
            &mut Attributes,
            &MontageSet,
            Option<&EquippedWeapon>,
        ),
        With<Player>,
    >,
    mut rng: ResMut<DeterministicRng>,
    mut animations: EventWriter<AnimationRequest>,
    mut cues: EventWriter<PresentationCue>,
) {
    for intent in intents.read() {
        let Ok((mut state, mut stance, mut attributes, montages, equipped)) =
            players.get_mut(intent.player)
        else {
            continue;
        };

        let event = match intent.action {
            PlayerAction::Attack => ActionEvent::AttackRequested,
            PlayerAction::Dodge => ActionEvent::DodgeRequested,
            PlayerAction::ToggleArmed => ActionEvent::EquipToggleRequested,
        };
        let Some(next) = state.on_event(event, guards(&attributes, *stance, equipped)) else {
            continue;
        };
        *state = next;

        match intent.action {
            PlayerAction::Attack => {
                if let Some(section) = montages.random_attack(&mut rng) {
                    animations.write(AnimationRequest {
                        entity: intent.player,
                        montage: Montage::Attack,
                        section,
                    });
                }
            }
            PlayerAction::Dodge => {
                let cost = attributes.dodge_cost;
                attributes.use_stamina(cost);
                cues.write(PresentationCue::StaminaPercent {
                    entity: intent.player,
                    percent: attributes.stamina_percent(),
                });
                animations.write(AnimationRequest {
                    entity: intent.player,
                    montage: Montage::Dodge,
                    section: "Default".into(),
                });
            }
            PlayerAction::ToggleArmed => {
                let (new_stance, section) = match *stance {
                    WeaponStance::Drawn => (WeaponStance::Sheathed, "Unequip"),
                    WeaponStance::Sheathed => (WeaponStance::Drawn, "Equip"),
                };
                *stance = new_stance;
                animations.write(AnimationRequest {
                    entity: intent.player,
                    montage: Montage::Equip,
                    section: section.into(),
                });
            }
        }

        crate::log(&format!("🎮 Player {:?} {:?} → {:?}", intent.player, intent.action, next));
    }
}

/// Система: montage finished сигналы → Unoccupied
///
/// Сигнал, не совпадающий с текущим состоянием (например AttackFinished
/// после того, как удар прервала реакция), игнорируется.
pub fn process_player_animation_signals(
    mut signals: EventReader<AnimationSignal>,
    mut players: Query<&mut ActionState, With<Player>>,
) {
    for signal in signals.read() {
        let event = match signal {
            AnimationSignal::AttackFinished { .. } => ActionEvent::AttackFinished,
            AnimationSignal::HitReactionFinished { .. } => ActionEvent::HitReactionFinished,
            AnimationSignal::EquipFinished { .. } => ActionEvent::EquipFinished,
            AnimationSignal::DodgeFinished { .. } => ActionEvent::DodgeFinished,
            _ => continue,
        };
        let Ok(mut state) = players.get_mut(signal.entity()) else {
            continue;
        };

        if let Some(next) = state.on_event(event, ActionGuards::default()) {
            *state = next;
        }
    }
}

/// Система: реакция игрока на StateRequest от damage layer
///
/// HitReaction прерывает текущее действие (окно оружия закрывается),
/// Death переводит FSM в Dead и отправляет EntityDied.
pub fn react_to_player_state_requests(
    mut requests: EventReader<StateRequest>,
    mut players: Query<(&mut ActionState, Option<&EquippedWeapon>), With<Player>>,
    mut weapons: Query<&mut Weapon>,
    mut died: EventWriter<EntityDied>,
    mut animations: EventWriter<AnimationRequest>,
) {
    for request in requests.read() {
        let entity = request.target();
        let Ok((mut state, equipped)) = players.get_mut(entity) else {
            continue;
        };

        match *request {
            StateRequest::HitReaction { direction, .. } => {
                let Some(next) = state.on_event(ActionEvent::Damaged, ActionGuards::default()) else {
                    continue;
                };
                *state = next;

                if let Some(EquippedWeapon(weapon)) = equipped {
                    if let Ok(mut weapon) = weapons.get_mut(*weapon) {
                        weapon.close_window();
                    }
                }
                animations.write(AnimationRequest {
                    entity,
                    montage: Montage::HitReact,
                    section: direction.section().to_string(),
                });
            }
            StateRequest::Death { killer, .. } => {
                let Some(next) = state.on_event(ActionEvent::Killed, ActionGuards::default()) else {
                    continue;
                };
                *state = next;
                crate::log_info(&format!("💀 Player {:?} died (killer {:?})", entity, killer));
                died.write(EntityDied { entity, killer });
            }
        }
    }
}
