//! Tests for Weapon component.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use super::super::montage::MontageSet;
    use super::super::weapon::*;
    use crate::DeterministicRng;

    #[test]
    fn test_window_open_clears_ignore_once() {
        let mut world = World::new();
        let victim = world.spawn_empty().id();
        let mut weapon = Weapon::new(30.0);

        assert!(weapon.open_window());
        assert!(weapon.register_hit(victim));
        assert!(!weapon.register_hit(victim));

        // Повторный notify посреди замаха: dedup не сбрасывается
        assert!(!weapon.open_window());
        assert!(weapon.has_hit(victim));

        // Закрытие тоже не чистит
        weapon.close_window();
        assert!(weapon.has_hit(victim));

        // Новый замах - можно бить снова
        assert!(weapon.open_window());
        assert!(!weapon.has_hit(victim));
        assert!(weapon.hits_this_swing().is_empty());
    }

    #[test]
    fn test_world_segment_follows_transform() {
        let weapon = Weapon::new(10.0);
        let transform = Transform::from_xyz(100.0, 0.0, 0.0);

        let (start, end) = weapon.world_segment(&transform);
        assert_eq!(start, Vec3::new(100.0, 0.0, -40.0));
        assert_eq!(end, Vec3::new(100.0, 0.0, -120.0));
    }

    #[test]
    fn test_new_weapon_starts_closed_and_unowned() {
        let weapon = Weapon::default();
        assert!(!weapon.is_window_open());
        assert!(weapon.owner.is_none());
        assert_eq!(weapon.damage, 20.0);
    }

    #[test]
    fn test_montage_pick_is_seeded() {
        let montages = MontageSet::default();
        let mut a = DeterministicRng::new(5);
        let mut b = DeterministicRng::new(5);

        for _ in 0..10 {
            assert_eq!(montages.random_death(&mut a), montages.random_death(&mut b));
        }

        let empty = MontageSet {
            attack_sections: Vec::new(),
            death_sections: Vec::new(),
        };
        assert_eq!(empty.random_attack(&mut a), None);
    }
}
