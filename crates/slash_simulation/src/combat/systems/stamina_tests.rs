//! Tests for stamina systems.

#[cfg(test)]
mod tests {
    use bevy::prelude::*;
    use crate::combat::{Dead, PresentationCue};
    use crate::components::{Attributes, Combatant, Faction};
    use crate::player::{ActionState, Player, PlayerAction, PlayerIntent};
    use crate::create_simulation_app;

    fn spawn_player(app: &mut App, stamina: f32) -> Entity {
        app.world_mut()
            .spawn((
                Player,
                Combatant::new(Faction::Player),
                Attributes {
                    stamina,
                    ..Attributes::default()
                },
            ))
            .id()
    }

    fn stamina(app: &App, entity: Entity) -> f32 {
        app.world().get::<Attributes>(entity).unwrap().stamina
    }

    #[test]
    fn test_stamina_regenerates_at_rate() {
        let mut app = create_simulation_app(42);
        let player = spawn_player(&mut app, 50.0);
        app.update();

        // 60 тиков = 1 секунда, rate 2/s
        for _ in 0..60 {
            app.update();
        }

        assert!((stamina(&app, player) - 52.0).abs() < 1e-3, "stamina = {}", stamina(&app, player));
    }

    #[test]
    fn test_stamina_capped_at_max() {
        let mut app = create_simulation_app(42);
        let player = spawn_player(&mut app, 99.99);
        app.update();

        for _ in 0..10 {
            app.update();
        }

        assert_eq!(stamina(&app, player), 100.0);
    }

    #[test]
    fn test_dead_combatant_does_not_regenerate() {
        let mut app = create_simulation_app(42);
        let player = spawn_player(&mut app, 50.0);
        app.world_mut().entity_mut(player).insert(Dead);
        app.update();

        for _ in 0..30 {
            app.update();
        }

        assert_eq!(stamina(&app, player), 50.0);
    }

    #[test]
    fn test_dodge_spends_stamina_and_reports_percent() {
        let mut app = create_simulation_app(42);
        let player = spawn_player(&mut app, 100.0);
        app.update();

        app.world_mut().send_event(PlayerIntent {
            player,
            action: PlayerAction::Dodge,
        });
        app.update();

        assert_eq!(app.world().get::<ActionState>(player), Some(&ActionState::Dodging));
        // 100 - 14, плюс регенерация одного тика
        let expected = 86.0 + 2.0 / 60.0;
        assert!((stamina(&app, player) - expected).abs() < 1e-3);

        let cues = app.world().resource::<Events<PresentationCue>>();
        let mut cursor = cues.get_cursor();
        assert!(cursor
            .read(cues)
            .any(|cue| matches!(cue, PresentationCue::StaminaPercent { entity, .. } if *entity == player)));
    }

    #[test]
    fn test_dodge_rejected_without_stamina() {
        let mut app = create_simulation_app(42);
        let player = spawn_player(&mut app, 10.0);
        app.update();

        app.world_mut().send_event(PlayerIntent {
            player,
            action: PlayerAction::Dodge,
        });
        app.update();

        assert_eq!(app.world().get::<ActionState>(player), Some(&ActionState::Unoccupied));
    }
}
