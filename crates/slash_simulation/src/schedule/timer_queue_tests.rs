//! Tests for the scheduled-task queue.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use super::super::{TimerKind, TimerQueue};

    fn two_entities() -> (Entity, Entity) {
        let mut world = World::new();
        (world.spawn_empty().id(), world.spawn_empty().id())
    }

    #[test]
    fn test_rearm_replaces_instead_of_stacking() {
        let (agent, _) = two_entities();
        let mut queue = TimerQueue::default();

        queue.schedule(agent, TimerKind::Attack, 0.0, 0.4);
        queue.schedule(agent, TimerKind::Attack, 0.0, 1.0);

        assert_eq!(queue.len(), 1);
        assert_eq!(queue.remaining(agent, TimerKind::Attack, 0.0), Some(1.0));
        assert!(queue.drain_due(0.5).is_empty());
        assert_eq!(queue.drain_due(1.0).len(), 1);
    }

    #[test]
    fn test_kinds_are_independent() {
        let (agent, _) = two_entities();
        let mut queue = TimerQueue::default();

        queue.schedule(agent, TimerKind::Attack, 0.0, 0.5);
        queue.schedule(agent, TimerKind::Patrol, 0.0, 5.0);
        assert!(queue.cancel(agent, TimerKind::Attack));

        assert!(!queue.is_pending(agent, TimerKind::Attack));
        assert!(queue.is_pending(agent, TimerKind::Patrol));
    }

    #[test]
    fn test_cancel_with_nothing_pending_is_noop() {
        let (agent, _) = two_entities();
        let mut queue = TimerQueue::default();

        assert!(!queue.cancel(agent, TimerKind::Attack));
        assert!(!queue.cancel(agent, TimerKind::Attack));
        assert_eq!(queue.cancel_all(agent), 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_cancel_all_only_touches_owner() {
        let (dying, other) = two_entities();
        let mut queue = TimerQueue::default();

        queue.schedule(dying, TimerKind::Attack, 0.0, 0.5);
        queue.schedule(dying, TimerKind::Patrol, 0.0, 5.0);
        queue.schedule(other, TimerKind::Patrol, 0.0, 5.0);

        assert_eq!(queue.cancel_all(dying), 2);
        assert_eq!(queue.len(), 1);
        assert!(queue.is_pending(other, TimerKind::Patrol));
    }

    #[test]
    fn test_drain_orders_by_fire_time_then_arm_order() {
        let (a, b) = two_entities();
        let mut queue = TimerQueue::default();

        queue.schedule(a, TimerKind::Patrol, 0.0, 2.0);
        queue.schedule(b, TimerKind::Attack, 0.0, 1.0);
        queue.schedule(a, TimerKind::Attack, 0.0, 1.0);

        let due = queue.drain_due(3.0);
        let order: Vec<_> = due.iter().map(|task| (task.owner, task.kind)).collect();
        assert_eq!(
            order,
            vec![(b, TimerKind::Attack), (a, TimerKind::Attack), (a, TimerKind::Patrol)]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn test_negative_delay_fires_immediately() {
        let (agent, _) = two_entities();
        let mut queue = TimerQueue::default();

        queue.schedule(agent, TimerKind::Patrol, 10.0, -3.0);
        assert_eq!(queue.drain_due(10.0).len(), 1);
    }
}
