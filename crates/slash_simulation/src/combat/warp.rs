//! Motion-warp targets for attack montages.
//!
//! Animation driver подтягивает атакующего к цели во время замаха: позиция
//! на `warp_target_distance` перед целью, поворот лицом к ней.

use bevy::prelude::*;

use crate::ai::{AgentConfig, CombatTarget};
use crate::components::Attributes;

#[derive(Component, Debug, Clone, Copy, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct WarpTargets {
    pub translation: Option<Vec3>,
    pub rotation: Option<Quat>,
}

/// Point `warp_distance` away from `target`, on the line toward `from`.
///
/// Уже ближе этой дистанции → остаёмся где стоим.
pub fn translation_warp_target(from: Vec3, target: Vec3, warp_distance: f32) -> Vec3 {
    let offset = from - target;
    if offset.length() <= warp_distance {
        return from;
    }
    target + offset.normalize_or_zero() * warp_distance
}

/// Yaw-only rotation facing `target`. None if both share the same spot.
pub fn rotation_warp_target(from: Vec3, target: Vec3) -> Option<Quat> {
    let flat = Vec3::new(target.x - from.x, 0.0, target.z - from.z);
    let direction = Dir3::new(flat).ok()?;
    Some(Transform::from_translation(from).looking_to(direction, Vec3::Y).rotation)
}

/// Система: пересчёт warp targets для агентов с живой целью
pub fn update_warp_targets(
    mut agents: Query<(&Transform, &CombatTarget, &AgentConfig, &mut WarpTargets)>,
    targets: Query<(&Transform, &Attributes)>,
) {
    for (transform, combat_target, config, mut warp) in agents.iter_mut() {
        let target_position = combat_target
            .0
            .and_then(|target| targets.get(target).ok())
            .filter(|(_, attributes)| attributes.is_alive())
            .map(|(target_transform, _)| target_transform.translation);

        let next = match target_position {
            Some(target) => WarpTargets {
                translation: Some(translation_warp_target(
                    transform.translation,
                    target,
                    config.warp_target_distance,
                )),
                rotation: rotation_warp_target(transform.translation, target),
            },
            None => WarpTargets::default(),
        };

        // Change detection: не трогаем компонент без надобности
        warp.set_if_neq(next);
    }
}
