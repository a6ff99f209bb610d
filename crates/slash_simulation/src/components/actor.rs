//! Базовые компоненты бойцов: Combatant, Faction, Attributes, Hurtbox

use bevy::math::bounding::Aabb3d;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::components::{MovementCommand, MovementSpeed};

/// Closed set of factions. Same faction = friendly fire excluded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
pub enum Faction {
    #[default]
    Neutral,
    Player,
    Enemy,
}

impl Faction {
    /// Player и Enemy враждебны друг другу, Neutral ни с кем не воюет.
    pub fn is_hostile_to(self, other: Faction) -> bool {
        matches!(
            (self, other),
            (Faction::Player, Faction::Enemy) | (Faction::Enemy, Faction::Player)
        )
    }
}

/// Боец (игрок или агент) - базовый компонент для всего, что дерётся.
///
/// Автоматически добавляет Attributes, Hurtbox, движение через Required Components.
#[derive(Component, Debug, Clone, Default, Reflect)]
#[reflect(Component)]
#[require(Attributes, Hurtbox, Transform, MovementCommand, MovementSpeed)]
pub struct Combatant {
    pub faction: Faction,
}

impl Combatant {
    pub fn new(faction: Faction) -> Self {
        Self { faction }
    }
}

/// Health/stamina pools plus currencies.
///
/// Инвариант: 0 ≤ health ≤ max_health, 0 ≤ stamina ≤ max_stamina
/// (после каждой мутации).
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
#[serde(default)]
pub struct Attributes {
    pub health: f32,
    pub max_health: f32,
    pub stamina: f32,
    pub max_stamina: f32,
    /// units per second
    pub stamina_regen_rate: f32,
    pub dodge_cost: f32,
    pub gold: u32,
    pub souls: u32,
}

impl Default for Attributes {
    fn default() -> Self {
        Self::new(100.0, 100.0)
    }
}

impl Attributes {
    pub fn new(max_health: f32, max_stamina: f32) -> Self {
        let max_health = max_health.max(0.0);
        let max_stamina = max_stamina.max(0.0);
        Self {
            health: max_health,
            max_health,
            stamina: max_stamina,
            max_stamina,
            stamina_regen_rate: 2.0,
            dodge_cost: 14.0,
            gold: 0,
            souls: 0,
        }
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = clamp_to(health, self.max_health);
        self
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0.0
    }

    /// `health = clamp(health - amount, 0, max_health)`
    pub fn receive_damage(&mut self, amount: f32) {
        self.health = clamp_to(self.health - amount, self.max_health);
    }

    pub fn health_percent(&self) -> f32 {
        if self.max_health > 0.0 {
            self.health / self.max_health
        } else {
            0.0
        }
    }

    pub fn stamina_percent(&self) -> f32 {
        if self.max_stamina > 0.0 {
            self.stamina / self.max_stamina
        } else {
            0.0
        }
    }

    pub fn can_dodge(&self) -> bool {
        self.stamina >= self.dodge_cost
    }

    pub fn use_stamina(&mut self, cost: f32) {
        self.stamina = clamp_to(self.stamina - cost, self.max_stamina);
    }

    pub fn regen_stamina(&mut self, delta_secs: f32) {
        self.stamina = clamp_to(
            self.stamina + self.stamina_regen_rate * delta_secs,
            self.max_stamina,
        );
    }

    pub fn add_gold(&mut self, amount: u32) {
        self.gold = self.gold.saturating_add(amount);
    }

    pub fn add_souls(&mut self, amount: u32) {
        self.souls = self.souls.saturating_add(amount);
    }
}

// f32::clamp паникует на NaN границах, здесь max уже >= 0
fn clamp_to(value: f32, max: f32) -> f32 {
    value.min(max).max(0.0)
}

/// Collision volume the melee sweep tests against.
///
/// Axis-aligned box around `Transform.translation + offset`.
#[derive(Component, Debug, Clone, Copy, PartialEq, Reflect)]
#[reflect(Component)]
pub struct Hurtbox {
    pub half_extents: Vec3,
    pub offset: Vec3,
}

impl Default for Hurtbox {
    fn default() -> Self {
        // Капсула персонажа: радиус ~35, полувысота ~90
        Self {
            half_extents: Vec3::new(35.0, 90.0, 35.0),
            offset: Vec3::ZERO,
        }
    }
}

impl Hurtbox {
    pub fn new(half_extents: Vec3) -> Self {
        Self {
            half_extents,
            offset: Vec3::ZERO,
        }
    }

    pub fn world_aabb(&self, transform: &Transform) -> Aabb3d {
        Aabb3d::new(transform.translation + self.offset, self.half_extents)
    }
}

/// Level geometry: blocks and receives weapon impacts, never takes damage.
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Hurtbox, Transform)]
pub struct StaticGeometry;

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_three_hits_of_forty() {
        let mut attributes = Attributes::default();

        attributes.receive_damage(40.0);
        assert_eq!(attributes.health, 60.0);
        attributes.receive_damage(40.0);
        assert_eq!(attributes.health, 20.0);
        attributes.receive_damage(40.0);
        assert_eq!(attributes.health, 0.0);
        assert!(!attributes.is_alive());
    }

    #[test]
    fn test_stamina_regen_clamps_at_max() {
        let mut attributes = Attributes::default();
        attributes.use_stamina(14.0);
        assert_eq!(attributes.stamina, 86.0);

        attributes.regen_stamina(1.0);
        assert_eq!(attributes.stamina, 88.0);

        attributes.regen_stamina(100.0);
        assert_eq!(attributes.stamina, 100.0);
    }

    #[test]
    fn test_dodge_needs_full_cost() {
        let mut attributes = Attributes::default();
        attributes.stamina = 13.9;
        assert!(!attributes.can_dodge());
        attributes.stamina = 14.0;
        assert!(attributes.can_dodge());
    }

    #[test]
    fn test_percent_with_zero_max() {
        let attributes = Attributes::new(0.0, 0.0);
        assert_eq!(attributes.health_percent(), 0.0);
        assert_eq!(attributes.stamina_percent(), 0.0);
    }

    #[test]
    fn test_factions() {
        assert!(Faction::Player.is_hostile_to(Faction::Enemy));
        assert!(Faction::Enemy.is_hostile_to(Faction::Player));
        assert!(!Faction::Enemy.is_hostile_to(Faction::Enemy));
        assert!(!Faction::Neutral.is_hostile_to(Faction::Player));
    }

    proptest! {
        #[test]
        fn prop_damage_clamps_health(
            max in 1.0f32..1000.0,
            start in 0.0f32..1.0,
            damage in 0.0f32..2000.0,
        ) {
            let mut attributes = Attributes::new(max, 100.0).with_health(max * start);
            let before = attributes.health;

            attributes.receive_damage(damage);

            let expected = (before - damage).clamp(0.0, max);
            prop_assert_eq!(attributes.health, expected);
            prop_assert!(attributes.health >= 0.0 && attributes.health <= max);
        }
    }
}
