//! Scheduled-task queue (patrol dwell, attack wind-up).
//!
//! # Architecture
//!
//! ```text
//! AI systems ──schedule/cancel──▶ TimerQueue (Resource)
//!                                     │ fire_due_timers (CombatSet::Timers)
//!                                     ▼
//!                                TimerFired ──▶ AI systems (CombatSet::Behavior)
//! ```
//!
//! One pending task per (owner, kind): re-arming replaces, never stacks.
//! Cancel is idempotent. Death wipes every task of the owner in one call.

use bevy::prelude::*;

use crate::CombatSet;

#[cfg(test)]
mod timer_queue_tests;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Reflect)]
pub enum TimerKind {
    /// Patrol dwell (or resume-patrol delay) → move to waypoint.
    Patrol,
    /// Attack wind-up → swing.
    Attack,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduledTask {
    pub fire_at: f64,
    pub owner: Entity,
    pub kind: TimerKind,
    /// Порядок постановки, разрешает ничьи по fire_at детерминированно
    seq: u64,
}

/// Event: scheduled task fired this tick.
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerFired {
    pub owner: Entity,
    pub kind: TimerKind,
}

#[derive(Resource, Debug, Default)]
pub struct TimerQueue {
    tasks: Vec<ScheduledTask>,
    next_seq: u64,
}

impl TimerQueue {
    /// Arms `kind` for `owner` to fire `delay` seconds after `now`.
    /// A pending task of the same kind is replaced.
    pub fn schedule(&mut self, owner: Entity, kind: TimerKind, now: f64, delay: f32) {
        self.cancel(owner, kind);

        let seq = self.next_seq;
        self.next_seq += 1;
        self.tasks.push(ScheduledTask {
            fire_at: now + f64::from(delay.max(0.0)),
            owner,
            kind,
            seq,
        });
    }

    /// Returns true if something was actually cancelled.
    pub fn cancel(&mut self, owner: Entity, kind: TimerKind) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|task| !(task.owner == owner && task.kind == kind));
        self.tasks.len() != before
    }

    /// Cancels every pending task of `owner`; returns how many were dropped.
    pub fn cancel_all(&mut self, owner: Entity) -> usize {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.owner != owner);
        before - self.tasks.len()
    }

    pub fn is_pending(&self, owner: Entity, kind: TimerKind) -> bool {
        self.tasks
            .iter()
            .any(|task| task.owner == owner && task.kind == kind)
    }

    /// Seconds left until the task fires (0 if already due).
    pub fn remaining(&self, owner: Entity, kind: TimerKind, now: f64) -> Option<f64> {
        self.tasks
            .iter()
            .find(|task| task.owner == owner && task.kind == kind)
            .map(|task| (task.fire_at - now).max(0.0))
    }

    /// Removes and returns every task with `fire_at <= now`, earliest first.
    pub fn drain_due(&mut self, now: f64) -> Vec<ScheduledTask> {
        let (mut due, pending): (Vec<_>, Vec<_>) =
            self.tasks.drain(..).partition(|task| task.fire_at <= now);
        self.tasks = pending;

        due.sort_by(|a, b| a.fire_at.total_cmp(&b.fire_at).then(a.seq.cmp(&b.seq)));
        due
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}

/// Система: пробуждение просроченных задач
///
/// Задачи чужих (despawned) владельцев тоже стреляют: получатели сами
/// отбрасывают события без живого owner.
pub fn fire_due_timers(
    mut queue: ResMut<TimerQueue>,
    mut fired: EventWriter<TimerFired>,
    time: Res<Time<Fixed>>,
) {
    let now = time.elapsed_secs_f64();

    for task in queue.drain_due(now) {
        crate::log(&format!(
            "⏰ Timer {:?} fired for {:?} (scheduled {:.3}, now {:.3})",
            task.kind, task.owner, task.fire_at, now
        ));
        fired.write(TimerFired {
            owner: task.owner,
            kind: task.kind,
        });
    }
}

pub struct SchedulePlugin;

impl Plugin for SchedulePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TimerQueue>()
            .add_event::<TimerFired>()
            .add_systems(FixedUpdate, fire_due_timers.in_set(CombatSet::Timers));
    }
}
