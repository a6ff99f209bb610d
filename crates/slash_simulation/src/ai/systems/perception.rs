//! Perception gate: raw ActorSensed → combat target acquisition.

use bevy::prelude::*;

use crate::ai::{ActorSensed, AgentConfig, AgentEvent, AgentState, CombatTarget};
use crate::components::{Attributes, Combatant, MovementCommand, MovementSpeed};
use crate::schedule::{TimerKind, TimerQueue};

/// Система: фильтрация ActorSensed
///
/// Принимаем только если:
/// - candidate враждебен observer и жив
/// - observer в NoState/Patrolling (не Dead/Chasing/Attacking/Engaged)
/// - candidate ближе `sensing_radius` (сенсор хоста может быть шире)
///
/// При приёме: patrol timer снят, target выставлен, Chasing, FollowEntity.
/// Первый принятый за тик выигрывает: после него observer уже Chasing и
/// остальные события того же тика отбрасываются тем же guard.
pub fn gate_sensed_actors(
    mut sensed: EventReader<ActorSensed>,
    mut observers: Query<(
        &Transform,
        &Combatant,
        &AgentConfig,
        &mut AgentState,
        &mut CombatTarget,
        &mut MovementCommand,
        &mut MovementSpeed,
    )>,
    candidates: Query<(&Transform, &Combatant, &Attributes)>,
    mut timers: ResMut<TimerQueue>,
) {
    for event in sensed.read() {
        let Ok((transform, combatant, config, mut state, mut target, mut movement, mut speed)) =
            observers.get_mut(event.observer)
        else {
            continue;
        };

        if !state.accepts_new_target() {
            continue;
        }

        let Ok((candidate_transform, candidate, candidate_attributes)) =
            candidates.get(event.candidate)
        else {
            continue;
        };

        if !combatant.faction.is_hostile_to(candidate.faction) || !candidate_attributes.is_alive() {
            continue;
        }

        let distance = transform.translation.distance(candidate_transform.translation);
        if distance > config.sensing_radius {
            continue;
        }

        let Some(next) = state.on_event(AgentEvent::TargetAcquired) else {
            continue;
        };

        timers.cancel(event.observer, TimerKind::Patrol);
        *state = next;
        target.0 = Some(event.candidate);
        speed.speed = config.chasing_speed;
        *movement = MovementCommand::FollowEntity {
            target: event.candidate,
            acceptance_radius: config.move_acceptance_radius,
        };

        crate::log(&format!(
            "👁️ {:?} spotted {:?} at {:.0} → Chasing",
            event.observer, event.candidate, distance
        ));
    }
}
