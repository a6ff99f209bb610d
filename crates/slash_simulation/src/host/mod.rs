//! Headless host: scripted stand-in for the engine side.
//!
//! В игре хост (движок) двигает акторов по navmesh, проигрывает montages и
//! крутит pawn sensing. Для demo binary и интеграционных тестов то же самое
//! делается здесь, грубо и детерминистично:
//!
//! - `movement`: прямолинейный mover по `MovementCommand`
//! - `vision`: sight radius + peripheral cone → `ActorSensed` каждый тик
//! - `animation`: `AnimationRequest` → `AnimationSignal` через N тиков
//!
//! Все системы идут до `CombatSet::Perception`, как кадр движка перед
//! шагом симуляции.

use bevy::prelude::*;

use crate::CombatSet;

pub mod animation;
pub mod movement;
pub mod vision;

pub use animation::{MontageTimings, ScriptedAnimations};
pub use movement::step_towards;
pub use vision::{in_sight, PawnSensing};

/// Headless host plugin (добавлять поверх `SimulationPlugin`)
pub struct HeadlessHostPlugin;

impl Plugin for HeadlessHostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ScriptedAnimations>()
            .init_resource::<MontageTimings>()
            .add_systems(
                FixedUpdate,
                (
                    animation::play_scripted_animations,
                    movement::drive_movement,
                    vision::sense_pawns,
                )
                    .chain()
                    .before(CombatSet::Perception),
            );
    }
}
