//! Player input events (input binding lives in the host).

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlayerAction {
    Attack,
    Dodge,
    /// Arm / disarm the owned weapon.
    ToggleArmed,
}

/// Event: игрок нажал кнопку действия
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlayerIntent {
    pub player: Entity,
    pub action: PlayerAction,
}
