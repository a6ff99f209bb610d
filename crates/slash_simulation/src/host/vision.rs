//! Pawn sensing: sight radius + peripheral cone → ActorSensed.
//!
//! Как pawn sensing движка: сенсор ничего не знает про фракции и состояние,
//! просто сообщает "вижу" каждый тик. Фильтрует `gate_sensed_actors`.

use bevy::prelude::*;

use crate::ai::{ActorSensed, AgentState};
use crate::combat::Dead;
use crate::components::Combatant;

/// Sensor shape of an observer. Агент без компонента использует default.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct PawnSensing {
    pub sight_radius: f32,
    /// Half-angle of the view cone around forward.
    pub peripheral_angle_deg: f32,
}

impl Default for PawnSensing {
    fn default() -> Self {
        Self {
            sight_radius: 4000.0,
            peripheral_angle_deg: 45.0,
        }
    }
}

/// Is `point` inside the observer's sight radius and view cone?
pub fn in_sight(observer: &Transform, point: Vec3, sensing: &PawnSensing) -> bool {
    let to_point = point - observer.translation;
    let distance = to_point.length();
    if distance > sensing.sight_radius {
        return false;
    }
    if distance <= f32::EPSILON {
        return true;
    }

    let angle = observer.forward().as_vec3().angle_between(to_point);
    angle.to_degrees() <= sensing.peripheral_angle_deg
}

/// Система: каждый живой агент сообщает о каждом видимом combatant
pub fn sense_pawns(
    observers: Query<(Entity, &Transform, Option<&PawnSensing>), (With<AgentState>, Without<Dead>)>,
    candidates: Query<(Entity, &Transform), (With<Combatant>, Without<Dead>)>,
    mut sensed: EventWriter<ActorSensed>,
) {
    for (observer, transform, sensing) in observers.iter() {
        let sensing = sensing.copied().unwrap_or_default();

        for (candidate, candidate_transform) in candidates.iter() {
            if candidate == observer || !in_sight(transform, candidate_transform.translation, &sensing)
            {
                continue;
            }

            sensed.write(ActorSensed {
                observer,
                candidate,
                sight_radius: sensing.sight_radius,
                peripheral_angle_deg: sensing.peripheral_angle_deg,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_sight_cone_and_radius() {
        let observer = Transform::default(); // forward = -Z
        let sensing = PawnSensing {
            sight_radius: 1000.0,
            peripheral_angle_deg: 45.0,
        };

        assert!(in_sight(&observer, Vec3::new(0.0, 0.0, -500.0), &sensing));
        assert!(in_sight(&observer, Vec3::new(300.0, 0.0, -500.0), &sensing));
        // За спиной
        assert!(!in_sight(&observer, Vec3::new(0.0, 0.0, 500.0), &sensing));
        // Сбоку, вне конуса
        assert!(!in_sight(&observer, Vec3::new(500.0, 0.0, -100.0), &sensing));
        // Слишком далеко
        assert!(!in_sight(&observer, Vec3::new(0.0, 0.0, -1500.0), &sensing));
    }
}
