//! Combat events: host ↔ ECS boundary plus internal damage flow.
//!
//! Inbound (host → ECS): `DamageRequest`, `AnimationSignal`.
//! Outbound (ECS → host): `AnimationRequest`, `PresentationCue`,
//! `HitReceived`, `DamageDealt`, `FieldImpact`, `EntityDied`.
//! Internal: `StateRequest`, `BreakRequest`.

use bevy::prelude::*;

use crate::combat::HitDirection;

/// Which montage an `AnimationRequest` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum Montage {
    Attack,
    HitReact,
    Death,
    Equip,
    Dodge,
}

/// Event: проиграть секцию монтажа (ECS → animation driver)
#[derive(Event, Debug, Clone, PartialEq)]
pub struct AnimationRequest {
    pub entity: Entity,
    pub montage: Montage,
    pub section: String,
}

/// Event: сигнал от animation driver (notifies, montage end)
///
/// Может прийти на любом последующем тике, в том числе когда состояние
/// уже сменилось. Получатели сверяют текущее состояние.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationSignal {
    AttackFinished { entity: Entity },
    HitReactionFinished { entity: Entity },
    EquipFinished { entity: Entity },
    DodgeFinished { entity: Entity },
    WeaponWindowOpened { entity: Entity },
    WeaponWindowClosed { entity: Entity },
}

impl AnimationSignal {
    pub fn entity(&self) -> Entity {
        match *self {
            AnimationSignal::AttackFinished { entity }
            | AnimationSignal::HitReactionFinished { entity }
            | AnimationSignal::EquipFinished { entity }
            | AnimationSignal::DodgeFinished { entity }
            | AnimationSignal::WeaponWindowOpened { entity }
            | AnimationSignal::WeaponWindowClosed { entity } => entity,
        }
    }
}

/// Event: нанести урон (hit detector, traps, scripted damage)
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageRequest {
    pub target: Entity,
    pub amount: f32,
    pub instigator: Option<Entity>,
    /// None → берём позицию instigator (или фронт цели)
    pub impact_point: Option<Vec3>,
}

/// Event: урон применён
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct DamageDealt {
    pub target: Entity,
    pub instigator: Option<Entity>,
    pub amount_applied: f32,
    pub health_after: f32,
    pub impact_point: Vec3,
}

/// Event: живая цель получила удар и будет реагировать
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct HitReceived {
    pub target: Entity,
    pub impact_point: Vec3,
    pub instigator: Option<Entity>,
    pub direction: HitDirection,
}

/// Event: entity умер (после перехода FSM в Dead)
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntityDied {
    pub entity: Entity,
    pub killer: Option<Entity>,
}

/// Event: damage layer просит state machine жертвы сменить состояние.
///
/// Сам damage layer состояние не трогает.
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub enum StateRequest {
    HitReaction {
        target: Entity,
        instigator: Option<Entity>,
        direction: HitDirection,
    },
    Death {
        target: Entity,
        killer: Option<Entity>,
    },
}

impl StateRequest {
    pub fn target(&self) -> Entity {
        match *self {
            StateRequest::HitReaction { target, .. } | StateRequest::Death { target, .. } => {
                target
            }
        }
    }
}

/// Event: оружие ударило в разрушаемый объект
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct BreakRequest {
    pub target: Entity,
    pub instigator: Option<Entity>,
    pub impact_point: Vec3,
}

/// Event: environment-impact hook (physics fields, decals) на каждом попадании
#[derive(Event, Debug, Clone, Copy, PartialEq)]
pub struct FieldImpact {
    pub weapon: Entity,
    pub target: Entity,
    pub point: Vec3,
}

/// Event: presentation-only cue for the host (HUD, audio, VFX).
#[derive(Event, Debug, Clone, PartialEq)]
pub enum PresentationCue {
    HealthBarVisible { entity: Entity, visible: bool },
    HealthPercent { entity: Entity, percent: f32 },
    StaminaPercent { entity: Entity, percent: f32 },
    HitSound { at: Vec3 },
    HitParticles { at: Vec3 },
    EquipSound { weapon: Entity, at: Vec3, sound: String },
    PickupSound { at: Vec3 },
}
