//! Agent AI: single-target reactive behavior
//!
//! patrol → chase → attack → engaged, без squad tactics и планирования.

use bevy::prelude::*;

use crate::CombatSet;

pub mod components;
pub mod events;
pub mod systems;

pub use components::*;
pub use events::ActorSensed;

/// AI Plugin
///
/// Регистрирует AI системы в FixedUpdate для детерминизма:
/// 1. Perception: gate_sensed_actors
/// 2. Behavior (chain): start_patrol_on_spawn → handle_agent_animation_signals →
///    handle_agent_timers → check_combat_targets → check_patrol_targets
/// 3. Reactions: react_to_agent_state_requests
pub struct AIPlugin;

impl Plugin for AIPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<ActorSensed>();

        app.add_systems(
            FixedUpdate,
            systems::gate_sensed_actors.in_set(CombatSet::Perception),
        )
        .add_systems(
            FixedUpdate,
            (
                systems::start_patrol_on_spawn,
                systems::handle_agent_animation_signals,
                systems::handle_agent_timers,
                systems::check_combat_targets,
                systems::check_patrol_targets,
            )
                .chain() // Последовательное выполнение для детерминизма
                .in_set(CombatSet::Behavior),
        )
        .add_systems(
            FixedUpdate,
            systems::react_to_agent_state_requests
                .in_set(CombatSet::Reactions)
                // Порядок EntityDied (и rng в handle_deaths) не должен плавать
                .after(crate::player::systems::react_to_player_state_requests),
        );
    }
}
