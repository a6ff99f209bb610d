//! Damage math: attribute mutation and directional hit classification.
//!
//! Pure functions; `systems::damage` wires them to events.
//!
//! # Hit direction
//!
//! ```text
//!                Front [-45, 45)
//!                      ▲ forward
//!   Left [-135, -45) ◀─┼─▶ Right [45, 135)
//!                      │
//!                    Back
//! ```
//!
//! Angle = acos(forward · to_impact) в градусах, со знаком минус если удар
//! слева. Y-up, правосторонняя система: слева ⇔ (forward × to_impact).y > 0.

use bevy::prelude::*;

use crate::components::Attributes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum HitDirection {
    Front,
    Left,
    Right,
    Back,
}

impl HitDirection {
    /// Exact bucket table, boundaries included on the lower edge.
    pub fn from_angle(degrees: f32) -> Self {
        if (-45.0..45.0).contains(&degrees) {
            HitDirection::Front
        } else if (45.0..135.0).contains(&degrees) {
            HitDirection::Right
        } else if (-135.0..-45.0).contains(&degrees) {
            HitDirection::Left
        } else {
            HitDirection::Back
        }
    }

    /// Hit-react montage section.
    pub fn section(&self) -> &'static str {
        match self {
            HitDirection::Front => "FromFront",
            HitDirection::Left => "FromLeft",
            HitDirection::Right => "FromRight",
            HitDirection::Back => "FromBack",
        }
    }
}

/// Signed planar angle (degrees) between the target's forward and the impact.
///
/// Impact is flattened to the target's height first. An impact exactly at the
/// target's position counts as frontal (0°).
pub fn hit_angle(target: &Transform, impact_point: Vec3) -> f32 {
    let origin = target.translation;
    let planar_impact = Vec3::new(impact_point.x, origin.y, impact_point.z);
    let to_impact = (planar_impact - origin).normalize_or_zero();

    let forward = target.forward().as_vec3();
    let forward = Vec3::new(forward.x, 0.0, forward.z).normalize_or_zero();

    if to_impact == Vec3::ZERO || forward == Vec3::ZERO {
        return 0.0;
    }

    let cos_theta = forward.dot(to_impact).clamp(-1.0, 1.0);
    let theta = cos_theta.acos().to_degrees();

    // Удар слева → отрицательный угол
    if forward.cross(to_impact).y > 0.0 {
        -theta
    } else {
        theta
    }
}

pub fn classify_hit_direction(target: &Transform, impact_point: Vec3) -> HitDirection {
    HitDirection::from_angle(hit_angle(target, impact_point))
}

/// What the victim's state machine should do with a resolved hit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DamageEffect {
    /// Alive after the hit: play a directional reaction.
    HitReaction(HitDirection),
    /// This hit brought health to 0.
    Killed,
    /// Target was already dead: no reaction, no second death.
    AlreadyDead,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DamageOutcome {
    pub amount_applied: f32,
    pub health_after: f32,
    pub effect: DamageEffect,
}

/// Применяет урон к атрибутам цели.
///
/// `amount_applied`: для живой цели реально снятое здоровье (после clamp),
/// для уже мёртвой исходный `amount` без изменений. Отрицательный урон
/// не лечит.
pub fn apply_damage(
    attributes: &mut Attributes,
    target_was_dead: bool,
    amount: f32,
    target: &Transform,
    impact_point: Vec3,
) -> DamageOutcome {
    let before = attributes.health;
    attributes.receive_damage(amount.max(0.0));
    let health_after = attributes.health;

    if target_was_dead {
        return DamageOutcome {
            amount_applied: amount,
            health_after,
            effect: DamageEffect::AlreadyDead,
        };
    }

    let effect = if attributes.is_alive() {
        DamageEffect::HitReaction(classify_hit_direction(target, impact_point))
    } else {
        DamageEffect::Killed
    };

    DamageOutcome {
        amount_applied: before - health_after,
        health_after,
        effect,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_bucket_boundaries() {
        assert_eq!(HitDirection::from_angle(0.0), HitDirection::Front);
        assert_eq!(HitDirection::from_angle(45.0), HitDirection::Right);
        assert_eq!(HitDirection::from_angle(-45.0), HitDirection::Front);
        assert_eq!(HitDirection::from_angle(-135.0), HitDirection::Left);
        assert_eq!(HitDirection::from_angle(135.0), HitDirection::Back);
        assert_eq!(HitDirection::from_angle(180.0), HitDirection::Back);
        assert_eq!(HitDirection::from_angle(-180.0), HitDirection::Back);
        assert_eq!(HitDirection::from_angle(134.9), HitDirection::Right);
        assert_eq!(HitDirection::from_angle(-45.1), HitDirection::Left);
    }

    #[test]
    fn test_classify_relative_to_default_facing() {
        // Default Transform смотрит в -Z, правая рука в +X
        let target = Transform::default();

        assert_eq!(classify_hit_direction(&target, Vec3::new(0.0, 0.0, -100.0)), HitDirection::Front);
        assert_eq!(classify_hit_direction(&target, Vec3::new(100.0, 0.0, 0.0)), HitDirection::Right);
        assert_eq!(classify_hit_direction(&target, Vec3::new(-100.0, 0.0, 0.0)), HitDirection::Left);
        assert_eq!(classify_hit_direction(&target, Vec3::new(0.0, 0.0, 100.0)), HitDirection::Back);
    }

    #[test]
    fn test_impact_height_is_ignored() {
        let target = Transform::default();
        let low = hit_angle(&target, Vec3::new(100.0, -80.0, 0.0));
        let high = hit_angle(&target, Vec3::new(100.0, 300.0, 0.0));

        assert!((low - 90.0).abs() < 1e-3);
        assert!((high - 90.0).abs() < 1e-3);
    }

    #[test]
    fn test_classify_follows_target_rotation() {
        // Повернули цель лицом в +X: удар с +X теперь спереди
        let target = Transform::from_xyz(10.0, 0.0, 10.0)
            .looking_at(Vec3::new(20.0, 0.0, 10.0), Vec3::Y);

        assert_eq!(classify_hit_direction(&target, Vec3::new(50.0, 0.0, 10.0)), HitDirection::Front);
        assert_eq!(classify_hit_direction(&target, Vec3::new(10.0, 0.0, 50.0)), HitDirection::Right);
        assert_eq!(classify_hit_direction(&target, Vec3::new(10.0, 0.0, -50.0)), HitDirection::Left);
    }

    #[test]
    fn test_impact_at_origin_is_front() {
        let target = Transform::from_xyz(5.0, 0.0, 5.0);
        assert_eq!(classify_hit_direction(&target, Vec3::new(5.0, 40.0, 5.0)), HitDirection::Front);
    }

    #[test]
    fn test_apply_damage_sequence() {
        let target = Transform::default();
        let impact = Vec3::new(0.0, 0.0, -50.0);
        let mut attributes = Attributes::default();

        let first = apply_damage(&mut attributes, false, 40.0, &target, impact);
        assert_eq!(first.health_after, 60.0);
        assert_eq!(first.effect, DamageEffect::HitReaction(HitDirection::Front));

        let second = apply_damage(&mut attributes, false, 40.0, &target, impact);
        assert_eq!(second.health_after, 20.0);

        let third = apply_damage(&mut attributes, false, 40.0, &target, impact);
        assert_eq!(third.health_after, 0.0);
        assert_eq!(third.effect, DamageEffect::Killed);
        // Реально снято только 20
        assert_eq!(third.amount_applied, 20.0);
    }

    #[test]
    fn test_dead_target_returns_raw_amount() {
        let target = Transform::default();
        let mut attributes = Attributes::default().with_health(0.0);

        let outcome = apply_damage(&mut attributes, true, 35.0, &target, Vec3::ZERO);

        assert_eq!(outcome.effect, DamageEffect::AlreadyDead);
        assert_eq!(outcome.amount_applied, 35.0);
        assert_eq!(outcome.health_after, 0.0);
    }

    proptest! {
        #[test]
        fn prop_angle_is_signed_and_bounded(x in -500.0f32..500.0, z in -500.0f32..500.0) {
            prop_assume!(x.abs() > 1.0 || z.abs() > 1.0);
            let angle = hit_angle(&Transform::default(), Vec3::new(x, 0.0, z));

            prop_assert!((-180.0..=180.0).contains(&angle));
            // Default facing: левая полуплоскость (x < 0) даёт отрицательный угол
            if x < -1.0 {
                prop_assert!(angle <= 0.0);
            }
            if x > 1.0 {
                prop_assert!(angle >= 0.0);
            }
        }
    }
}
