//! Player-controlled combatant.
//!
//! Хост переводит input в `PlayerIntent`, симуляция решает, что из этого
//! легально в текущем `ActionState`.

use bevy::prelude::*;

use crate::CombatSet;

pub mod events;
#[allow(clippy::module_inception)]
pub mod player;
pub mod state;
pub mod systems;

#[cfg(test)]
mod state_tests;

pub use events::{PlayerAction, PlayerIntent};
pub use player::Player;
pub use state::{ActionEvent, ActionGuards, ActionState, WeaponStance};

/// Player Plugin
///
/// - Intents (chain): process_player_intents → process_player_animation_signals
/// - Reactions: react_to_player_state_requests
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<PlayerIntent>()
            .add_systems(
                FixedUpdate,
                (
                    systems::process_player_intents,
                    systems::process_player_animation_signals,
                )
                    .chain()
                    .in_set(CombatSet::Intents),
            )
            .add_systems(
                FixedUpdate,
                systems::react_to_player_state_requests.in_set(CombatSet::Reactions),
            );
    }
}
