//! Loot components: pickups and breakable props.

use bevy::prelude::*;

use crate::components::Hurtbox;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum PickupKind {
    Gold(u32),
    Souls(u32),
}

/// Лежащая в мире награда. Игрок в `radius` забирает её целиком.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Transform)]
pub struct Pickup {
    pub kind: PickupKind,
    pub radius: f32,
}

impl Pickup {
    pub fn souls(amount: u32) -> Self {
        Self {
            kind: PickupKind::Souls(amount),
            radius: 100.0,
        }
    }

    pub fn gold(amount: u32) -> Self {
        Self {
            kind: PickupKind::Gold(amount),
            radius: 100.0,
        }
    }
}

/// Prop that breaks on the first weapon hit and drops treasure once.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
#[require(Hurtbox, Transform)]
pub struct Breakable {
    pub broken: bool,
    pub treasure_gold: u32,
    /// Где появляется сокровище относительно центра (над обломками)
    pub treasure_offset: Vec3,
}

impl Default for Breakable {
    fn default() -> Self {
        Self::new(10)
    }
}

impl Breakable {
    pub fn new(treasure_gold: u32) -> Self {
        Self {
            broken: false,
            treasure_gold,
            treasure_offset: Vec3::new(0.0, 75.0, 0.0),
        }
    }
}
