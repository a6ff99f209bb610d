//! Melee hit detection (weapon sweep each active tick).
//!
//! # Flow
//!
//! ```text
//! WeaponWindowOpened ──▶ open_window (ignore list cleared)
//!        │
//!        ▼  every tick while open
//! sweep box start→end ──▶ closest hurtbox ──▶ register_hit + FieldImpact
//!                                              ├─ combatant → DamageRequest
//!                                              ├─ breakable → BreakRequest
//!                                              └─ static    → (impact only)
//! WeaponWindowClosed ──▶ close_window
//! ```

use bevy::math::bounding::{Aabb3d, AabbCast3d, IntersectsVolume};
use bevy::math::{Dir3A, Vec3A};
use bevy::prelude::*;

use crate::ai::AgentState;
use crate::combat::{
    AnimationSignal, BreakRequest, DamageRequest, EquippedWeapon, FieldImpact, Weapon,
};
use crate::components::{Attributes, Combatant, Hurtbox};
use crate::loot::Breakable;
use crate::player::ActionState;

/// Distance along the sweep at which a box of `half_extents` first touches
/// `target`, or None.
///
/// Нулевая длина (оружие не сдвинулось) → статический overlap test.
pub fn sweep_box(start: Vec3, end: Vec3, half_extents: Vec3, target: Aabb3d) -> Option<f32> {
    let delta = end - start;
    let length = delta.length();

    match Dir3A::new(Vec3A::from(delta)) {
        Ok(direction) => {
            let cast = AabbCast3d::new(
                Aabb3d::new(Vec3::ZERO, half_extents),
                Vec3A::from(start),
                direction,
                length,
            );
            cast.aabb_collision_at(target)
        }
        Err(_) => Aabb3d::new(start, half_extents)
            .intersects(&target)
            .then_some(0.0),
    }
}

/// Система: оружие следует за сокетом владельца
///
/// Хост может переписать Transform оружия позже (реальная кость руки),
/// здесь только приближение: позиция владельца + grip_offset.
pub fn attach_weapons_to_owners(
    mut weapons: Query<(&Weapon, &mut Transform), Without<Combatant>>,
    owners: Query<&Transform, With<Combatant>>,
) {
    for (weapon, mut transform) in weapons.iter_mut() {
        let Some(owner) = weapon.owner else {
            continue;
        };
        let Ok(owner_transform) = owners.get(owner) else {
            continue;
        };

        transform.translation =
            owner_transform.translation + owner_transform.rotation * weapon.grip_offset;
        transform.rotation = owner_transform.rotation;
    }
}

/// Система: WeaponWindowOpened / WeaponWindowClosed → окно коллизии
///
/// Окно открывается только у живого бойца в атакующем состоянии
/// (player Attacking, agent Engaged). Запоздавший notify от прерванного
/// удара игнорируется.
pub fn toggle_weapon_windows(
    mut signals: EventReader<AnimationSignal>,
    wielders: Query<(
        &EquippedWeapon,
        &Attributes,
        Option<&ActionState>,
        Option<&AgentState>,
    )>,
    mut weapons: Query<&mut Weapon>,
) {
    for signal in signals.read() {
        let (entity, open) = match *signal {
            AnimationSignal::WeaponWindowOpened { entity } => (entity, true),
            AnimationSignal::WeaponWindowClosed { entity } => (entity, false),
            _ => continue,
        };

        let Ok((equipped, attributes, action, agent)) = wielders.get(entity) else {
            continue;
        };
        let Ok(mut weapon) = weapons.get_mut(equipped.0) else {
            continue;
        };

        if !open {
            weapon.close_window();
            continue;
        }

        let attacking = match (action, agent) {
            (Some(action), _) => *action == ActionState::Attacking,
            (None, Some(agent)) => *agent == AgentState::Engaged,
            (None, None) => true,
        };
        if !attributes.is_alive() || !attacking {
            continue;
        }

        if weapon.open_window() {
            crate::log(&format!(
                "🗡️ Weapon {:?} window opened (wielder {:?})",
                equipped.0, entity
            ));
        }
    }
}

enum HitKind {
    Combatant,
    Breakable,
    Static,
}

/// Система: sweep активного оружия, одно (ближайшее) попадание за тик
///
/// Исключаются: владелец, союзники владельца, мёртвые, разбитые breakables,
/// всё что уже в ignore list этого замаха.
pub fn detect_melee_hits(
    mut weapons: Query<(Entity, &mut Weapon, &Transform)>,
    wielders: Query<&Combatant>,
    hurtboxes: Query<(
        Entity,
        &Transform,
        &Hurtbox,
        Option<&Combatant>,
        Option<&Attributes>,
        Option<&Breakable>,
    )>,
    mut damage_requests: EventWriter<DamageRequest>,
    mut break_requests: EventWriter<BreakRequest>,
    mut impacts: EventWriter<FieldImpact>,
) {
    for (weapon_entity, mut weapon, weapon_transform) in weapons.iter_mut() {
        if !weapon.is_window_open() {
            continue;
        }
        let Some(owner) = weapon.owner else {
            continue;
        };
        let owner_faction = wielders.get(owner).ok().map(|c| c.faction);

        let (start, end) = weapon.world_segment(weapon_transform);
        let half_extents = weapon.sweep.half_extents;

        let mut closest: Option<(f32, Entity, HitKind)> = None;
        for (entity, transform, hurtbox, combatant, attributes, breakable) in hurtboxes.iter() {
            if entity == owner || entity == weapon_entity || weapon.has_hit(entity) {
                continue;
            }

            let kind = if let Some(combatant) = combatant {
                // Friendly fire: своих не бьём
                if Some(combatant.faction) == owner_faction {
                    continue;
                }
                if attributes.is_some_and(|a| !a.is_alive()) {
                    continue;
                }
                HitKind::Combatant
            } else if let Some(breakable) = breakable {
                if breakable.broken {
                    continue;
                }
                HitKind::Breakable
            } else {
                HitKind::Static
            };

            let Some(distance) = sweep_box(start, end, half_extents, hurtbox.world_aabb(transform))
            else {
                continue;
            };

            if closest.as_ref().is_none_or(|(best, _, _)| distance < *best) {
                closest = Some((distance, entity, kind));
            }
        }

        let Some((distance, target, kind)) = closest else {
            continue;
        };

        weapon.register_hit(target);
        let impact_point = start + (end - start).normalize_or_zero() * distance;
        impacts.write(FieldImpact {
            weapon: weapon_entity,
            target,
            point: impact_point,
        });

        match kind {
            HitKind::Combatant => {
                crate::log(&format!(
                    "💥 Melee hit: {:?} → {:?} ({:.1} dmg, impact {:?})",
                    owner, target, weapon.damage, impact_point
                ));
                damage_requests.write(DamageRequest {
                    target,
                    amount: weapon.damage,
                    instigator: Some(owner),
                    impact_point: Some(impact_point),
                });
            }
            HitKind::Breakable => {
                break_requests.write(BreakRequest {
                    target,
                    instigator: Some(owner),
                    impact_point,
                });
            }
            HitKind::Static => {
                crate::log(&format!(
                    "🪨 Weapon {:?} struck static geometry {:?}",
                    weapon_entity, target
                ));
            }
        }
    }
}
