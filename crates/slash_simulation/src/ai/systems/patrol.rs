//! Patrol scheduling: waypoint selection and dwell timers.

use bevy::prelude::*;

use crate::ai::{AgentConfig, AgentState, PatrolRoute};
use crate::components::{MovementCommand, MovementSpeed};
use crate::schedule::{TimerKind, TimerQueue};
use crate::DeterministicRng;

/// Arms the patrol dwell timer with a delay drawn from
/// `[patrol_wait_min, patrol_wait_max]`.
pub fn arm_patrol_wait(
    timers: &mut TimerQueue,
    rng: &mut DeterministicRng,
    agent: Entity,
    config: &AgentConfig,
    now: f64,
) -> f32 {
    let delay = rng.uniform(config.patrol_wait_min, config.patrol_wait_max);
    timers.schedule(agent, TimerKind::Patrol, now, delay);
    delay
}

pub(crate) fn move_to_waypoint(config: &AgentConfig, waypoint: Vec3) -> MovementCommand {
    MovementCommand::MoveToPosition {
        target: waypoint,
        acceptance_radius: config.move_acceptance_radius,
    }
}

/// Система: свежезаспавненный агент сразу идёт к первому waypoint
pub fn start_patrol_on_spawn(
    mut agents: Query<
        (&AgentState, &AgentConfig, &PatrolRoute, &mut MovementCommand, &mut MovementSpeed),
        Added<AgentState>,
    >,
) {
    for (state, config, route, mut movement, mut speed) in agents.iter_mut() {
        if *state != AgentState::Patrolling {
            continue;
        }
        speed.speed = config.patrolling_speed;
        if let Some(waypoint) = route.current_waypoint() {
            *movement = move_to_waypoint(config, waypoint);
        }
    }
}

/// Система: patrol arrival check
///
/// Patrolling агент в `patrol_radius` от текущего waypoint выбирает
/// следующий (не текущий) и ждёт случайные [wait_min, wait_max] секунд.
/// Пока dwell timer висит, повторный выбор не делаем. Один waypoint →
/// никаких таймеров, стоим на месте.
pub fn check_patrol_targets(
    mut agents: Query<(Entity, &Transform, &AgentConfig, &AgentState, &mut PatrolRoute)>,
    mut timers: ResMut<TimerQueue>,
    mut rng: ResMut<DeterministicRng>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs_f64();

    for (entity, transform, config, state, mut route) in agents.iter_mut() {
        if *state != AgentState::Patrolling || timers.is_pending(entity, TimerKind::Patrol) {
            continue;
        }
        let Some(waypoint) = route.current_waypoint() else {
            continue;
        };
        if transform.translation.distance(waypoint) > config.patrol_radius {
            continue;
        }

        if route.advance(&mut rng) {
            let wait = arm_patrol_wait(&mut timers, &mut rng, entity, config, now);
            crate::log(&format!(
                "🚶 {:?} reached waypoint, next {:?} in {:.1}s",
                entity,
                route.current_waypoint(),
                wait
            ));
        }
    }
}
