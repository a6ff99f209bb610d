//! Straight-line navigation mover (MovementCommand → Transform).

use bevy::prelude::*;

use crate::combat::Dead;
use crate::components::{MovementCommand, MovementSpeed};

/// One step from `from` toward `to`, stopping `stop_distance` short.
pub fn step_towards(from: Vec3, to: Vec3, max_step: f32, stop_distance: f32) -> Vec3 {
    let offset = to - from;
    let distance = offset.length();
    if distance <= stop_distance {
        return from;
    }

    let travel = (distance - stop_distance).min(max_step.max(0.0));
    from + offset / distance * travel
}

/// Система: исполнение MovementCommand
///
/// Navmesh нет: идём по прямой со скоростью `MovementSpeed`, поворачиваемся
/// лицом по ходу движения (FollowEntity - лицом к цели, даже стоя).
pub fn drive_movement(
    mut movers: ParamSet<(
        Query<(Entity, &Transform, &MovementCommand, &MovementSpeed, Has<Dead>)>,
        Query<&mut Transform>,
    )>,
    time: Res<Time<Fixed>>,
) {
    let delta = time.delta_secs();

    let planned: Vec<(Entity, Vec3, Vec3)> = {
        let query = movers.p0();
        let planned = query
            .iter()
            .filter(|(_, _, _, _, dead)| !dead)
            .filter_map(|(entity, transform, command, speed, _)| {
                let position = transform.translation;
                let (goal, acceptance_radius, face_goal) = match *command {
                    MovementCommand::MoveToPosition {
                        target,
                        acceptance_radius,
                    } => (target, acceptance_radius, false),
                    MovementCommand::FollowEntity {
                        target,
                        acceptance_radius,
                    } => {
                        let (_, target_transform, _, _, _) = query.get(target).ok()?;
                        (target_transform.translation, acceptance_radius, true)
                    }
                    MovementCommand::Idle | MovementCommand::Stop => return None,
                };

                let next = step_towards(position, goal, speed.speed * delta, acceptance_radius);
                let facing = if face_goal { goal - position } else { next - position };
                Some((entity, next, facing))
            })
            .collect();
        planned
    };

    let mut transforms = movers.p1();
    for (entity, next, facing) in planned {
        let Ok(mut transform) = transforms.get_mut(entity) else {
            continue;
        };
        transform.translation = next;

        let flat = Vec3::new(facing.x, 0.0, facing.z);
        if flat.length_squared() > f32::EPSILON {
            transform.look_to(flat, Vec3::Y);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_step_limited_by_speed() {
        let next = step_towards(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 10.0, 0.0);
        assert_eq!(next, Vec3::new(10.0, 0.0, 0.0));
    }

    #[test]
    fn test_step_stops_at_acceptance_radius() {
        let next = step_towards(Vec3::ZERO, Vec3::new(100.0, 0.0, 0.0), 500.0, 50.0);
        assert_eq!(next, Vec3::new(50.0, 0.0, 0.0));
    }

    #[test]
    fn test_step_inside_acceptance_radius_stays() {
        let from = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(step_towards(from, from, 10.0, 0.0), from);
        assert_eq!(step_towards(from, from + Vec3::X * 20.0, 10.0, 50.0), from);
    }
}
