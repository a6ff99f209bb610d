//! Attack scheduling: randomized wind-up before a swing.

use bevy::prelude::*;

use crate::ai::AgentConfig;
use crate::schedule::{TimerKind, TimerQueue};
use crate::DeterministicRng;

/// Arms (or re-arms) the agent's attack timer with a delay drawn from
/// `[attack_min, attack_max]`. Returns the delay.
pub fn arm_attack(
    timers: &mut TimerQueue,
    rng: &mut DeterministicRng,
    agent: Entity,
    config: &AgentConfig,
    now: f64,
) -> f32 {
    let delay = rng.uniform(config.attack_min, config.attack_max);
    timers.schedule(agent, TimerKind::Attack, now, delay);
    delay
}

/// No-op if nothing is pending.
pub fn cancel_attack(timers: &mut TimerQueue, agent: Entity) -> bool {
    timers.cancel(agent, TimerKind::Attack)
}
