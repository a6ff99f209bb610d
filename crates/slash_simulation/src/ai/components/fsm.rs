//! Agent FSM components (state machine, config, combat target).

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::ai::PatrolRoute;
use crate::combat::{MontageSet, WarpTargets};
use crate::components::Combatant;

/// Agent FSM состояния
///
/// ```text
/// Patrolling ──target acquired──▶ Chasing ──in attack range──▶ Attacking
///     ▲                              ▲                             │ attack timer fired
///     │ lose interest                │ out of attack range         ▼
///  NoState ◀─────────attack end──────┴───────────────────────── Engaged
///
/// любое (кроме Dead) ──health == 0──▶ Dead (поглощающее)
/// ```
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[require(Combatant, AgentConfig, CombatTarget, PatrolRoute, MontageSet, WarpTargets)]
pub enum AgentState {
    /// Между решениями (сразу после конца замаха)
    NoState,
    #[default]
    Patrolling,
    Chasing,
    /// Атака выбрана, ждём attack timer
    Attacking,
    /// Замах идёт; урон по агенту не перезапускает атаку
    Engaged,
    Dead,
}

/// Inputs of the agent state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AgentEvent {
    /// Target out of combat range (or gone).
    LoseInterest,
    /// Target known, outside attack range.
    TargetAcquired,
    /// Target inside attack range and no attack committed yet.
    TargetInAttackRange,
    AttackTimerFired,
    /// Swing finished (or was interrupted).
    AttackEnded,
    Killed,
}

impl AgentState {
    /// Transition function. `None` = rejected, state unchanged.
    pub fn on_event(self, event: AgentEvent) -> Option<AgentState> {
        use AgentEvent::*;
        use AgentState::*;

        match (self, event) {
            (Dead, _) => None,
            (_, Killed) => Some(Dead),

            (NoState | Chasing | Attacking, LoseInterest) => Some(Patrolling),
            (NoState | Patrolling | Attacking, TargetAcquired) => Some(Chasing),
            (NoState | Chasing, TargetInAttackRange) => Some(Attacking),
            (Attacking, AttackTimerFired) => Some(Engaged),
            (Engaged, AttackEnded) => Some(NoState),

            _ => None,
        }
    }

    pub fn is_dead(&self) -> bool {
        *self == AgentState::Dead
    }

    /// Patrol logic runs only while Patrolling; everything else above it
    /// re-checks the combat target every tick.
    pub fn is_escalated(&self) -> bool {
        !matches!(self, AgentState::Patrolling | AgentState::Dead)
    }

    /// Perception only acquires targets in these states.
    pub fn accepts_new_target(&self) -> bool {
        matches!(self, AgentState::NoState | AgentState::Patrolling)
    }

    /// Attack may be committed (target in range, nothing pending).
    pub fn can_commit_attack(&self) -> bool {
        matches!(self, AgentState::NoState | AgentState::Chasing)
    }
}

/// Current combat target. Weak: target may be despawned or dead, every
/// read goes through a liveness lookup.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Default, Reflect)]
#[reflect(Component)]
pub struct CombatTarget(pub Option<Entity>);

/// Параметры агента
#[derive(Component, Debug, Clone, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct AgentConfig {
    /// Дальше этого цель теряется
    pub combat_radius: f32,
    /// Ближе этого можно атаковать
    pub attack_radius: f32,
    /// Perception принимает кандидатов только ближе этого
    pub sensing_radius: f32,
    /// "Дошёл до waypoint" радиус
    pub patrol_radius: f32,
    /// Acceptance radius для MovementCommand
    pub move_acceptance_radius: f32,
    pub patrol_wait_min: f32,
    pub patrol_wait_max: f32,
    /// Пауза перед возвратом к патрулю после потери цели
    pub patrol_resume_delay: f32,
    pub attack_min: f32,
    pub attack_max: f32,
    pub patrolling_speed: f32,
    pub chasing_speed: f32,
    /// Сколько секунд труп лежит до despawn
    pub death_life_span: f32,
    pub soul_reward_min: u32,
    pub soul_reward_max: u32,
    pub warp_target_distance: f32,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            combat_radius: 500.0,
            attack_radius: 140.0,
            sensing_radius: 500.0,
            patrol_radius: 200.0,
            move_acceptance_radius: 50.0,
            patrol_wait_min: 5.0,
            patrol_wait_max: 10.0,
            patrol_resume_delay: 1.0,
            attack_min: 0.4,
            attack_max: 1.0,
            patrolling_speed: 125.0,
            chasing_speed: 300.0,
            death_life_span: 8.0,
            soul_reward_min: 1,
            soul_reward_max: 5,
            warp_target_distance: 75.0,
        }
    }
}
