//! Agent FSM systems (combat target re-evaluation, timers, animation signals).

use bevy::prelude::*;

use crate::ai::systems::attack::{arm_attack, cancel_attack};
use crate::ai::systems::patrol::move_to_waypoint;
use crate::ai::{AgentConfig, AgentEvent, AgentState, CombatTarget, PatrolRoute};
use crate::combat::{AnimationRequest, AnimationSignal, Montage, MontageSet, PresentationCue};
use crate::components::{Attributes, MovementCommand, MovementSpeed};
use crate::schedule::{TimerFired, TimerKind, TimerQueue};
use crate::DeterministicRng;

/// Distance to a live target. Despawned, dead or missing → None
/// (то есть "вне любого радиуса").
pub fn live_target_distance(
    from: Vec3,
    target: Option<Entity>,
    targets: &Query<(&Transform, &Attributes)>,
) -> Option<f32> {
    let (transform, attributes) = targets.get(target?).ok()?;
    attributes
        .is_alive()
        .then(|| from.distance(transform.translation))
}

/// Система: AttackFinished от animation driver → Engaged → NoState
///
/// HitReactionFinished у Engaged агента означает, что замах был прерван
/// реакцией на удар: считаем его законченным, иначе агент застрянет.
/// Дальнейшее решение принимает `check_combat_targets` в этом же тике.
pub fn handle_agent_animation_signals(
    mut signals: EventReader<AnimationSignal>,
    mut agents: Query<&mut AgentState>,
) {
    for signal in signals.read() {
        let entity = match *signal {
            AnimationSignal::AttackFinished { entity }
            | AnimationSignal::HitReactionFinished { entity } => entity,
            _ => continue,
        };
        let Ok(mut state) = agents.get_mut(entity) else {
            continue;
        };

        if let Some(next) = state.on_event(AgentEvent::AttackEnded) {
            crate::log(&format!("🔚 {:?} swing ended: {:?} → {:?}", entity, *state, next));
            *state = next;
        }
    }
}

/// Система: сработавшие patrol/attack таймеры агентов
///
/// - Patrol: Patrolling агент идёт к текущему waypoint
/// - Attack: Attacking агент с целью в attack range → Engaged + случайная
///   секция attack montage (нет секций → сразу NoState). Иначе ничего: `check_combat_targets` сам
///   переведёт агента в Chasing/Patrolling.
pub fn handle_agent_timers(
    mut fired: EventReader<TimerFired>,
    mut agents: Query<(
        &Transform,
        &AgentConfig,
        &mut AgentState,
        &CombatTarget,
        &PatrolRoute,
        &mut MovementCommand,
        &MontageSet,
    )>,
    targets: Query<(&Transform, &Attributes)>,
    mut rng: ResMut<DeterministicRng>,
    mut animations: EventWriter<AnimationRequest>,
) {
    for event in fired.read() {
        let Ok((transform, config, mut state, target, route, mut movement, montages)) =
            agents.get_mut(event.owner)
        else {
            continue;
        };

        match event.kind {
            TimerKind::Patrol => {
                if *state != AgentState::Patrolling {
                    continue;
                }
                if let Some(waypoint) = route.current_waypoint() {
                    *movement = move_to_waypoint(config, waypoint);
                }
            }
            TimerKind::Attack => {
                let in_range = live_target_distance(transform.translation, target.0, &targets)
                    .is_some_and(|distance| distance <= config.attack_radius);
                if !in_range {
                    continue;
                }
                let Some(next) = state.on_event(AgentEvent::AttackTimerFired) else {
                    continue;
                };
                *state = next;

                match montages.random_attack(&mut rng) {
                    Some(section) => {
                        crate::log(&format!("⚔️ {:?} Engaged: swinging {}", event.owner, section));
                        animations.write(AnimationRequest {
                            entity: event.owner,
                            montage: Montage::Attack,
                            section,
                        });
                    }
                    // Нечего проигрывать → AttackFinished не придёт, замах сразу окончен
                    None => {
                        if let Some(after) = state.on_event(AgentEvent::AttackEnded) {
                            crate::log_warning(&format!(
                                "{:?} has no attack sections, swing skipped",
                                event.owner
                            ));
                            *state = after;
                        }
                    }
                }
            }
        }
    }
}

/// Система: re-evaluation боевой цели (каждый тик для не-Patrolling агентов)
///
/// Порядок проверок:
/// 1. Цель вне combat radius (или мертва/исчезла) → lose interest:
///    attack timer снят, target очищен, health bar скрыт;
///    не Engaged → Patrolling + пауза перед возвратом к маршруту
/// 2. Цель вне attack radius и мы не Chasing → attack timer снят;
///    не Engaged → Chasing
/// 3. Цель в attack radius и атака ещё не выбрана → Attacking + attack timer
pub fn check_combat_targets(
    mut agents: Query<(
        Entity,
        &Transform,
        &AgentConfig,
        &mut AgentState,
        &mut CombatTarget,
        &mut MovementCommand,
        &mut MovementSpeed,
    )>,
    targets: Query<(&Transform, &Attributes)>,
    mut timers: ResMut<TimerQueue>,
    mut rng: ResMut<DeterministicRng>,
    mut cues: EventWriter<PresentationCue>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs_f64();

    for (entity, transform, config, mut state, mut target, mut movement, mut speed) in
        agents.iter_mut()
    {
        if !state.is_escalated() {
            continue;
        }

        let distance = live_target_distance(transform.translation, target.0, &targets);
        let in_combat_range = distance.is_some_and(|d| d <= config.combat_radius);
        let in_attack_range = distance.is_some_and(|d| d <= config.attack_radius);

        if !in_combat_range {
            cancel_attack(&mut timers, entity);
            if target.0.take().is_some() {
                cues.write(PresentationCue::HealthBarVisible {
                    entity,
                    visible: false,
                });
            }

            if let Some(next) = state.on_event(AgentEvent::LoseInterest) {
                crate::log(&format!("🥱 {:?} lost interest: {:?} → {:?}", entity, *state, next));
                *state = next;
                speed.speed = config.patrolling_speed;
                *movement = MovementCommand::Stop;
                timers.schedule(entity, TimerKind::Patrol, now, config.patrol_resume_delay);
            }
        } else if !in_attack_range && *state != AgentState::Chasing {
            cancel_attack(&mut timers, entity);

            let Some(target_entity) = target.0 else {
                continue;
            };
            if let Some(next) = state.on_event(AgentEvent::TargetAcquired) {
                crate::log(&format!("🏃 {:?} chasing {:?}: {:?} → {:?}", entity, target_entity, *state, next));
                *state = next;
                speed.speed = config.chasing_speed;
                *movement = MovementCommand::FollowEntity {
                    target: target_entity,
                    acceptance_radius: config.move_acceptance_radius,
                };
            }
        } else if in_attack_range && state.can_commit_attack() {
            if let Some(next) = state.on_event(AgentEvent::TargetInAttackRange) {
                let delay = arm_attack(&mut timers, &mut rng, entity, config, now);
                crate::log(&format!(
                    "🎯 {:?} committing attack in {:.2}s ({:?} → {:?})",
                    entity, delay, *state, next
                ));
                *state = next;
            }
        }
    }
}
