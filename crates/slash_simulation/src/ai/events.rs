//! AI Events - события от perception source хоста
//!
//! Хост (vision cone, pawn sensing) шлёт сырые события "вижу кандидата".
//! Фильтрация по фракции/дистанции/состоянию - в `gate_sensed_actors`.

use bevy::prelude::*;

/// Event: observer заметил candidate
///
/// `sight_radius` / `peripheral_angle_deg` описывают сенсор хоста и
/// бывают шире, чем `AgentConfig::sensing_radius`; решает gate.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct ActorSensed {
    pub observer: Entity,
    pub candidate: Entity,
    pub sight_radius: f32,
    pub peripheral_angle_deg: f32,
}

impl ActorSensed {
    /// Default pawn-sensing cone: 4000 units, 45°.
    pub fn new(observer: Entity, candidate: Entity) -> Self {
        Self {
            observer,
            candidate,
            sight_radius: 4000.0,
            peripheral_angle_deg: 45.0,
        }
    }
}
