//! Movement компоненты: команды навигации и скорость
//!
//! Симуляция не двигает акторов сама. Она пишет намерение, хост (navmesh
//! agent, character controller) исполняет его и обновляет `Transform`.

use bevy::prelude::*;

/// Команда движения для актора (выполняется navigation mover хоста)
#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub enum MovementCommand {
    /// Стоять на месте (не трогать текущий путь)
    #[default]
    Idle,
    /// Двигаться к точке (world coordinates)
    MoveToPosition { target: Vec3, acceptance_radius: f32 },
    /// Следовать за entity (хост обновляет цель каждый кадр)
    FollowEntity { target: Entity, acceptance_radius: f32 },
    /// Остановиться немедленно (сбросить velocity)
    Stop,
}

/// Max walk speed the mover should use (units/sec).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct MovementSpeed {
    pub speed: f32,
}

impl Default for MovementSpeed {
    fn default() -> Self {
        Self { speed: 300.0 }
    }
}
