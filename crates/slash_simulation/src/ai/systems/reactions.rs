//! Agent reaction systems (damage, death).

use bevy::prelude::*;

use crate::ai::{AgentConfig, AgentEvent, AgentState, CombatTarget};
use crate::combat::{
    AnimationRequest, DespawnAfter, EntityDied, EquippedWeapon, Montage, PresentationCue,
    StateRequest, Weapon,
};
use crate::components::{MovementCommand, MovementSpeed};
use crate::loot::LootSpawnRequest;
use crate::schedule::{TimerKind, TimerQueue};
use crate::DeterministicRng;

/// System: реакция агента на StateRequest от damage layer
///
/// HitReaction:
/// - health bar показан, directional hit-react montage
/// - своё оружие закрыто (удар прерывает замах)
/// - instigator становится целью; Engaged/Attacking агент состояние
///   не меняет, остальные переходят в Chasing (patrol timer снят)
///
/// Death:
/// - FSM → Dead, EntityDied (общая часть в `handle_deaths`)
/// - health bar скрыт, target очищен, despawn countdown, LootSpawnRequest
pub fn react_to_agent_state_requests(
    mut commands: Commands,
    mut requests: EventReader<StateRequest>,
    mut agents: Query<(
        &Transform,
        &AgentConfig,
        &mut AgentState,
        &mut CombatTarget,
        &mut MovementCommand,
        &mut MovementSpeed,
        Option<&EquippedWeapon>,
    )>,
    mut weapons: Query<&mut Weapon>,
    mut timers: ResMut<TimerQueue>,
    mut rng: ResMut<DeterministicRng>,
    mut died: EventWriter<EntityDied>,
    mut animations: EventWriter<AnimationRequest>,
    mut cues: EventWriter<PresentationCue>,
    mut loot: EventWriter<LootSpawnRequest>,
    time: Res<Time<Fixed>>,
) {
    for request in requests.read() {
        let entity = request.target();
        let Ok((transform, config, mut state, mut target, mut movement, mut speed, equipped)) =
            agents.get_mut(entity)
        else {
            continue;
        };
        if state.is_dead() {
            continue;
        }

        match *request {
            StateRequest::HitReaction {
                instigator,
                direction,
                ..
            } => {
                cues.write(PresentationCue::HealthBarVisible {
                    entity,
                    visible: true,
                });
                animations.write(AnimationRequest {
                    entity,
                    montage: Montage::HitReact,
                    section: direction.section().to_string(),
                });

                if let Some(EquippedWeapon(weapon)) = equipped {
                    if let Ok(mut weapon) = weapons.get_mut(*weapon) {
                        weapon.close_window();
                    }
                }
                // Без instigator (ловушка, среда) агент продолжает свой
                // маршрут: dwell timer остаётся взведённым
                let Some(instigator) = instigator else {
                    continue;
                };
                target.0 = Some(instigator);

                if matches!(*state, AgentState::Engaged | AgentState::Attacking) {
                    continue;
                }
                if let Some(next) = state.on_event(AgentEvent::TargetAcquired) {
                    timers.cancel(entity, TimerKind::Patrol);
                    crate::log(&format!(
                        "😠 {:?} hit by {:?} from {:?} → Chasing",
                        entity, instigator, direction
                    ));
                    *state = next;
                    speed.speed = config.chasing_speed;
                    *movement = MovementCommand::FollowEntity {
                        target: instigator,
                        acceptance_radius: config.move_acceptance_radius,
                    };
                }
            }
            StateRequest::Death { killer, .. } => {
                let Some(next) = state.on_event(AgentEvent::Killed) else {
                    continue;
                };
                *state = next;
                target.0 = None;

                died.write(EntityDied { entity, killer });
                cues.write(PresentationCue::HealthBarVisible {
                    entity,
                    visible: false,
                });

                commands.entity(entity).insert(DespawnAfter {
                    despawn_time: time.elapsed_secs() + config.death_life_span,
                });

                let souls = rng.uniform_u32(config.soul_reward_min, config.soul_reward_max);
                loot.write(LootSpawnRequest {
                    at: transform.translation,
                    souls,
                });

                crate::log(&format!(
                    "💀 Agent {:?} → Dead, drops {} souls, despawn in {:.1}s",
                    entity, souls, config.death_life_span
                ));
            }
        }
    }
}
