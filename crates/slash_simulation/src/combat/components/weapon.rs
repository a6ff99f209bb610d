//! Melee weapon components.
//!
//! Оружие - отдельная entity. Владелец хранит `EquippedWeapon(weapon)`,
//! оружие хранит `owner`. Trace points заданы в local space оружия.

use bevy::prelude::*;

/// Box swept from `start` to `end` (weapon local space) while the collision
/// window is open.
#[derive(Debug, Clone, Copy, PartialEq, Reflect)]
pub struct SweepVolume {
    pub start: Vec3,
    pub end: Vec3,
    pub half_extents: Vec3,
}

impl Default for SweepVolume {
    fn default() -> Self {
        // Клинок вдоль forward (-Z): от гарды до острия
        Self {
            start: Vec3::new(0.0, 0.0, -40.0),
            end: Vec3::new(0.0, 0.0, -120.0),
            half_extents: Vec3::splat(5.0),
        }
    }
}

/// Melee weapon state.
///
/// `ignore` - per-swing dedup list: очищается ровно один раз при открытии
/// окна коллизии и больше ни при каких условиях.
#[derive(Component, Debug, Clone, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Weapon {
    pub damage: f32,
    pub sweep: SweepVolume,
    /// Hand socket offset relative to the owner (owner local space).
    pub grip_offset: Vec3,
    pub equip_sound: String,
    pub owner: Option<Entity>,
    collision_enabled: bool,
    ignore: Vec<Entity>,
}

impl Default for Weapon {
    fn default() -> Self {
        Self::new(20.0)
    }
}

impl Weapon {
    pub fn new(damage: f32) -> Self {
        Self {
            damage,
            sweep: SweepVolume::default(),
            grip_offset: Vec3::new(20.0, 0.0, 0.0),
            equip_sound: "Shink".into(),
            owner: None,
            collision_enabled: false,
            ignore: Vec::new(),
        }
    }

    pub fn with_sweep(mut self, sweep: SweepVolume) -> Self {
        self.sweep = sweep;
        self
    }

    pub fn with_grip_offset(mut self, grip_offset: Vec3) -> Self {
        self.grip_offset = grip_offset;
        self
    }

    pub fn is_window_open(&self) -> bool {
        self.collision_enabled
    }

    /// Opens the collision window for a new swing.
    ///
    /// Returns false if it was already open (повторный notify не должен
    /// сбрасывать dedup посреди замаха).
    pub fn open_window(&mut self) -> bool {
        if self.collision_enabled {
            return false;
        }
        self.collision_enabled = true;
        self.ignore.clear();
        true
    }

    pub fn close_window(&mut self) {
        self.collision_enabled = false;
    }

    pub fn has_hit(&self, entity: Entity) -> bool {
        self.ignore.contains(&entity)
    }

    /// Returns false if the entity was already hit this swing.
    pub fn register_hit(&mut self, entity: Entity) -> bool {
        if self.has_hit(entity) {
            return false;
        }
        self.ignore.push(entity);
        true
    }

    pub fn hits_this_swing(&self) -> &[Entity] {
        &self.ignore
    }

    /// Sweep segment in world space.
    pub fn world_segment(&self, transform: &Transform) -> (Vec3, Vec3) {
        (
            transform.transform_point(self.sweep.start),
            transform.transform_point(self.sweep.end),
        )
    }
}

/// Reference from a combatant to the weapon it holds.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Reflect)]
#[reflect(Component)]
pub struct EquippedWeapon(pub Entity);
