//! Player action state machine.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Player FSM состояния
///
/// ```text
///            ┌── attack (weapon drawn) ──▶ Attacking ──attack finished──┐
///            ├── dodge (stamina) ───────▶ Dodging ───dodge finished────┤
/// Unoccupied ┼── arm/disarm (owns) ─────▶ EquippingWeapon ─equip fin.──┤
///     ▲      └───────────────────────────────────────────────────────────┘
///     └── hit reaction finished ── HitReaction ◀── damaged (any alive state)
///
/// любое ──health == 0──▶ Dead (поглощающее)
/// ```
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub enum ActionState {
    #[default]
    Unoccupied,
    Attacking,
    HitReaction,
    EquippingWeapon,
    Dodging,
    Dead,
}

/// Меч в руке или в ножнах
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Reflect, Serialize, Deserialize)]
#[reflect(Component)]
pub enum WeaponStance {
    #[default]
    Sheathed,
    Drawn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionEvent {
    AttackRequested,
    AttackFinished,
    DodgeRequested,
    DodgeFinished,
    EquipToggleRequested,
    EquipFinished,
    Damaged,
    HitReactionFinished,
    Killed,
}

/// Facts the guards need; gathered by the caller from other components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionGuards {
    /// Weapon equipped and drawn.
    pub weapon_drawn: bool,
    /// Any weapon equipped (drawn or sheathed).
    pub owns_weapon: bool,
    /// Stamina >= dodge cost.
    pub can_dodge: bool,
}

impl ActionState {
    /// Transition function. `None` = rejected (silently), state unchanged.
    pub fn on_event(self, event: ActionEvent, guards: ActionGuards) -> Option<ActionState> {
        use ActionEvent::*;
        use ActionState::*;

        match (self, event) {
            (Dead, _) => None,
            (_, Killed) => Some(Dead),

            // Повторный удар во время реакции перезапускает реакцию
            (_, Damaged) => Some(HitReaction),
            (HitReaction, HitReactionFinished) => Some(Unoccupied),

            (Unoccupied, AttackRequested) if guards.weapon_drawn => Some(Attacking),
            (Attacking, AttackFinished) => Some(Unoccupied),

            (Unoccupied, DodgeRequested) if guards.can_dodge => Some(Dodging),
            (Dodging, DodgeFinished) => Some(Unoccupied),

            (Unoccupied, EquipToggleRequested) if guards.owns_weapon => Some(EquippingWeapon),
            (EquippingWeapon, EquipFinished) => Some(Unoccupied),

            _ => None,
        }
    }

    pub fn is_dead(&self) -> bool {
        *self == ActionState::Dead
    }

    /// Locomotion input is honored only when free.
    pub fn can_move(&self) -> bool {
        *self == ActionState::Unoccupied
    }
}
