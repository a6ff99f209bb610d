//! Loot: soul drops from dead agents, treasure from breakables, pickups.

use bevy::prelude::*;

use crate::CombatSet;

pub mod components;
pub mod systems;

pub use components::*;
pub use systems::*;

/// Event: агент умер, хост/лут-система спавнит награду
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct LootSpawnRequest {
    pub at: Vec3,
    pub souls: u32,
}

pub struct LootPlugin;

impl Plugin for LootPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<LootSpawnRequest>()
            .add_systems(FixedUpdate, break_on_hit.in_set(CombatSet::Reactions))
            .add_systems(
                FixedUpdate,
                (spawn_loot, collect_pickups)
                    .chain()
                    .in_set(CombatSet::Upkeep)
                    .after(crate::combat::systems::despawn_after_timeout),
            );
    }
}
