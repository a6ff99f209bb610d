//! Scripted montage driver: AnimationRequest → AnimationSignal после задержки.

use bevy::prelude::*;

use crate::combat::{AnimationRequest, AnimationSignal, Montage};

/// Длительности montages в fixed тиках.
#[derive(Resource, Debug, Clone, Copy, PartialEq, Eq)]
pub struct MontageTimings {
    pub attack_window_open: u64,
    pub attack_window_close: u64,
    pub attack_length: u64,
    pub hit_react_length: u64,
    pub equip_length: u64,
    pub dodge_length: u64,
}

impl Default for MontageTimings {
    fn default() -> Self {
        Self {
            attack_window_open: 6,
            attack_window_close: 18,
            attack_length: 30,
            hit_react_length: 20,
            equip_length: 15,
            dodge_length: 24,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingSignal {
    due: u64,
    signal: AnimationSignal,
}

/// Проигрываемые montages (по одному на entity).
#[derive(Resource, Debug, Default)]
pub struct ScriptedAnimations {
    tick: u64,
    pending: Vec<PendingSignal>,
}

impl ScriptedAnimations {
    /// Starts `montage` for `entity`, replacing whatever it was playing.
    pub fn play(&mut self, entity: Entity, montage: Montage, timings: &MontageTimings) {
        self.pending.retain(|p| p.signal.entity() != entity);

        let schedule = match montage {
            Montage::Attack => vec![
                (timings.attack_window_open, AnimationSignal::WeaponWindowOpened { entity }),
                (timings.attack_window_close, AnimationSignal::WeaponWindowClosed { entity }),
                (timings.attack_length, AnimationSignal::AttackFinished { entity }),
            ],
            Montage::HitReact => vec![(
                timings.hit_react_length,
                AnimationSignal::HitReactionFinished { entity },
            )],
            Montage::Equip => vec![(timings.equip_length, AnimationSignal::EquipFinished { entity })],
            Montage::Dodge => vec![(timings.dodge_length, AnimationSignal::DodgeFinished { entity })],
            Montage::Death => Vec::new(),
        };

        for (delay, signal) in schedule {
            self.pending.push(PendingSignal {
                due: self.tick + delay.max(1),
                signal,
            });
        }
    }

    /// Advances one tick, returning signals that became due (in play order).
    pub fn advance(&mut self) -> Vec<AnimationSignal> {
        self.tick += 1;
        let tick = self.tick;

        let mut due = Vec::new();
        self.pending.retain(|p| {
            if p.due <= tick {
                due.push(p.signal);
                false
            } else {
                true
            }
        });
        due
    }

    pub fn is_playing(&self, entity: Entity) -> bool {
        self.pending.iter().any(|p| p.signal.entity() == entity)
    }
}

/// Система: due сигналы → AnimationSignal, новые запросы → расписание
pub fn play_scripted_animations(
    mut requests: EventReader<AnimationRequest>,
    mut signals: EventWriter<AnimationSignal>,
    mut scripted: ResMut<ScriptedAnimations>,
    timings: Res<MontageTimings>,
) {
    for signal in scripted.advance() {
        signals.write(signal);
    }

    for request in requests.read() {
        scripted.play(request.entity, request.montage, &timings);
    }
}
