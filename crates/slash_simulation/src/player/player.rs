//! Player control marker component
//!
//! Отмечает entity, которым управляет игрок через `PlayerIntent` (в отличие
//! от агентов с `AgentState`).

use bevy::prelude::*;

use crate::combat::MontageSet;
use crate::components::Combatant;
use crate::player::{ActionState, WeaponStance};

/// Marker component для player-controlled entity
///
/// Тянет за собой player FSM (`ActionState`), стойку оружия и таблицу
/// montage секций. Фракцию задаёт spawn (`Combatant::new(Faction::Player)`).
#[derive(Component, Debug, Clone, Copy, Default, Reflect)]
#[reflect(Component)]
#[require(Combatant, ActionState, WeaponStance, MontageSet)]
pub struct Player;
