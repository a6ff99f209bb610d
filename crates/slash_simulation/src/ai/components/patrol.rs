//! Patrol route component.

use bevy::prelude::*;

use crate::DeterministicRng;

/// Candidate waypoints plus the currently selected one.
///
/// Waypoints are fixed for the episode; only `current` moves.
#[derive(Component, Debug, Clone, PartialEq, Default, Reflect)]
#[reflect(Component)]
pub struct PatrolRoute {
    pub waypoints: Vec<Vec3>,
    pub current: Option<usize>,
}

impl PatrolRoute {
    pub fn new(waypoints: Vec<Vec3>) -> Self {
        let current = (!waypoints.is_empty()).then_some(0);
        Self { waypoints, current }
    }

    pub fn current_waypoint(&self) -> Option<Vec3> {
        self.current.and_then(|i| self.waypoints.get(i).copied())
    }

    /// Switches to a random other waypoint. Returns false when there is
    /// nothing else to pick (0 or 1 candidates).
    pub fn advance(&mut self, rng: &mut DeterministicRng) -> bool {
        match select_next_target(self.current, self.waypoints.len(), rng) {
            Some(next) => {
                self.current = Some(next);
                true
            }
            None => false,
        }
    }
}

/// Uniform pick among `0..candidates` excluding `current`.
///
/// Пусто после исключения → None (текущий waypoint остаётся).
pub fn select_next_target(
    current: Option<usize>,
    candidates: usize,
    rng: &mut DeterministicRng,
) -> Option<usize> {
    let pool: Vec<usize> = (0..candidates).filter(|&i| Some(i) != current).collect();
    rng.index(pool.len()).map(|i| pool[i])
}
