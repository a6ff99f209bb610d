//! Combat system module
//!
//! ECS ответственность:
//! - Weapons: collision window, per-swing dedup, sweep hit detection
//! - Damage: Attributes mutation, hit direction, death requests
//! - Death bookkeeping, corpse despawn, stamina regen
//!
//! Хост отвечает за проигрывание анимаций и присылает `AnimationSignal`
//! (window opened/closed, montage finished).

use bevy::prelude::*;

use crate::CombatSet;

pub mod components;
pub mod damage;
pub mod events;
pub mod systems;
pub mod warp;

pub use components::*;
pub use damage::{apply_damage, classify_hit_direction, hit_angle, DamageEffect, DamageOutcome, HitDirection};
pub use events::*;
pub use systems::{Dead, DespawnAfter};
pub use warp::WarpTargets;

/// Combat Plugin
///
/// Регистрирует combat события и системы в FixedUpdate:
/// 1. HitDetection: attach_weapons_to_owners → toggle_weapon_windows → detect_melee_hits
/// 2. Damage: resolve_damage_requests
/// 3. Death: handle_deaths
/// 4. Upkeep: regenerate_stamina, update_warp_targets, despawn_after_timeout
pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<DamageRequest>()
            .add_event::<DamageDealt>()
            .add_event::<HitReceived>()
            .add_event::<EntityDied>()
            .add_event::<StateRequest>()
            .add_event::<BreakRequest>()
            .add_event::<FieldImpact>()
            .add_event::<AnimationRequest>()
            .add_event::<AnimationSignal>()
            .add_event::<PresentationCue>();

        app.add_systems(
            FixedUpdate,
            (
                systems::attach_weapons_to_owners,
                systems::toggle_weapon_windows,
                systems::detect_melee_hits,
            )
                .chain()
                .in_set(CombatSet::HitDetection),
        )
        .add_systems(
            FixedUpdate,
            systems::resolve_damage_requests.in_set(CombatSet::Damage),
        )
        .add_systems(FixedUpdate, systems::handle_deaths.in_set(CombatSet::Death))
        .add_systems(
            FixedUpdate,
            (
                systems::regenerate_stamina,
                warp::update_warp_targets,
                systems::despawn_after_timeout,
            )
                .chain()
                .in_set(CombatSet::Upkeep),
        );
    }
}
