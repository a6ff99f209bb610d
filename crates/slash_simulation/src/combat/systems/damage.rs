//! Damage resolution and corpse cleanup systems.

use bevy::prelude::*;

use crate::ai::AgentState;
use crate::combat::damage::{apply_damage, DamageEffect};
use crate::combat::{
    DamageDealt, DamageRequest, EquippedWeapon, HitReceived, PresentationCue, StateRequest,
};
use crate::components::Attributes;
use crate::player::ActionState;

/// Компонент-маркер: entity мертв (Health == 0, FSM в Dead)
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
pub struct Dead;

/// Компонент-маркер: деспавн entity после указанного времени
#[derive(Component, Debug, Clone, Copy, Reflect)]
#[reflect(Component)]
pub struct DespawnAfter {
    /// Время деспавна (в секундах от старта симуляции)
    pub despawn_time: f32,
}

/// Система: DamageRequest → Attributes + запросы к FSM жертвы
///
/// - Живая после удара цель: HitReceived + StateRequest::HitReaction (+ hit sound/particles)
/// - Удар в ноль: StateRequest::Death
/// - Уже мёртвая цель: только clamp и DamageDealt с исходной суммой
///
/// Состояние жертвы здесь не меняется, решает её state machine в Reactions.
pub fn resolve_damage_requests(
    mut requests: EventReader<DamageRequest>,
    mut targets: Query<(
        &mut Attributes,
        &Transform,
        Option<&AgentState>,
        Option<&ActionState>,
    )>,
    positions: Query<&Transform>,
    mut dealt: EventWriter<DamageDealt>,
    mut hits: EventWriter<HitReceived>,
    mut state_requests: EventWriter<StateRequest>,
    mut cues: EventWriter<PresentationCue>,
) {
    for request in requests.read() {
        let Ok((mut attributes, transform, agent, action)) = targets.get_mut(request.target) else {
            crate::log(&format!(
                "DamageRequest for {:?} dropped (no Attributes / despawned)",
                request.target
            ));
            continue;
        };

        let impact_point = request
            .impact_point
            .or_else(|| {
                request
                    .instigator
                    .and_then(|instigator| positions.get(instigator).ok())
                    .map(|t| t.translation)
            })
            .unwrap_or(transform.translation + transform.forward().as_vec3());

        let already_dead = !attributes.is_alive()
            || agent.is_some_and(|state| *state == AgentState::Dead)
            || action.is_some_and(|state| *state == ActionState::Dead);

        let outcome = apply_damage(
            &mut attributes,
            already_dead,
            request.amount,
            transform,
            impact_point,
        );

        dealt.write(DamageDealt {
            target: request.target,
            instigator: request.instigator,
            amount_applied: outcome.amount_applied,
            health_after: outcome.health_after,
            impact_point,
        });

        match outcome.effect {
            DamageEffect::HitReaction(direction) => {
                crate::log(&format!(
                    "🩸 {:?} took {:.1} dmg from {:?} ({:?}), HP {:.1}/{:.1}",
                    request.target,
                    outcome.amount_applied,
                    request.instigator,
                    direction,
                    attributes.health,
                    attributes.max_health
                ));
                hits.write(HitReceived {
                    target: request.target,
                    impact_point,
                    instigator: request.instigator,
                    direction,
                });
                state_requests.write(StateRequest::HitReaction {
                    target: request.target,
                    instigator: request.instigator,
                    direction,
                });
            }
            DamageEffect::Killed => {
                crate::log(&format!(
                    "💀 {:?} killed by {:?} ({:.1} dmg)",
                    request.target, request.instigator, outcome.amount_applied
                ));
                state_requests.write(StateRequest::Death {
                    target: request.target,
                    killer: request.instigator,
                });
            }
            DamageEffect::AlreadyDead => continue,
        }

        cues.write(PresentationCue::HealthPercent {
            entity: request.target,
            percent: attributes.health_percent(),
        });
        cues.write(PresentationCue::HitSound { at: impact_point });
        cues.write(PresentationCue::HitParticles { at: impact_point });
    }
}

/// Система: деспавн entities с истёкшим DespawnAfter timeout
///
/// Экипированное оружие уходит вместе с владельцем.
pub fn despawn_after_timeout(
    mut commands: Commands,
    query: Query<(Entity, &DespawnAfter, Option<&EquippedWeapon>)>,
    time: Res<Time<Fixed>>,
) {
    let current_time = time.elapsed_secs();

    for (entity, despawn_after, equipped) in query.iter() {
        if current_time < despawn_after.despawn_time {
            continue;
        }

        crate::log(&format!("⚰️ Despawning entity {:?} (timeout)", entity));
        if let Some(EquippedWeapon(weapon)) = equipped {
            if let Ok(mut weapon_commands) = commands.get_entity(*weapon) {
                weapon_commands.despawn();
            }
        }
        commands.entity(entity).despawn();
    }
}
