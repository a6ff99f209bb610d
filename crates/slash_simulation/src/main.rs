//! Headless дуэль: игрок против одного агента
//!
//! Запускает симуляцию с `HeadlessHostPlugin` вместо движка и печатает ход
//! боя. Необязательный аргумент: путь к RON конфигу (`SimulationConfig`).

use bevy::prelude::*;
use slash_simulation::*;

const MAX_TICKS: u32 = 3600;

fn main() {
    let config = match std::env::args().nth(1) {
        Some(path) => match SimulationConfig::load(&path) {
            Ok(config) => config,
            Err(err) => {
                log_error(&format!("Failed to load config {}: {}", path, err));
                std::process::exit(1);
            }
        },
        None => SimulationConfig::default(),
    };
    log_info(&format!("Starting slash duel (seed: {})", config.seed));

    let mut app = create_headless_app(config.seed);
    app.insert_resource(config.clone())
        .add_plugins((SimulationPlugin, HeadlessHostPlugin));

    let player = app
        .world_mut()
        .spawn((
            Player,
            Combatant::new(Faction::Player),
            config.player_attributes,
            Transform::from_xyz(0.0, 0.0, 0.0),
        ))
        .id();
    let agent = app
        .world_mut()
        .spawn((
            AgentState::Patrolling,
            Combatant::new(Faction::Enemy),
            config.agent.clone(),
            PatrolRoute::new(vec![
                Vec3::new(0.0, 0.0, -900.0),
                Vec3::new(600.0, 0.0, -900.0),
                Vec3::new(600.0, 0.0, -300.0),
            ]),
            Transform::from_xyz(0.0, 0.0, -450.0).looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();

    let sword = app.world_mut().spawn(Weapon::new(35.0)).id();
    let axe = app.world_mut().spawn(Weapon::new(15.0)).id();
    app.world_mut().send_event(EquipWeaponIntent {
        combatant: player,
        weapon: sword,
    });
    app.world_mut().send_event(EquipWeaponIntent {
        combatant: agent,
        weapon: axe,
    });

    for tick in 0..MAX_TICKS {
        drive_player_input(&mut app, player, agent);
        app.update();

        if tick % 60 == 0 {
            log_status(app.world(), tick, player, agent);
        }

        let world = app.world();
        let player_dead = world.get::<Dead>(player).is_some();
        let agent_gone = world.get_entity(agent).is_err();
        if player_dead || agent_gone {
            log_status(world, tick, player, agent);
            break;
        }
    }

    let attributes = app.world().get::<Attributes>(player).copied().unwrap_or_default();
    log_info(&format!(
        "Duel over: player HP {:.0}/{:.0}, souls {}, gold {}",
        attributes.health, attributes.max_health, attributes.souls, attributes.gold
    ));
}

/// "Игрок" жмёт атаку, когда свободен и агент рядом
fn drive_player_input(app: &mut App, player: Entity, agent: Entity) {
    let world = app.world();
    let Some(state) = world.get::<ActionState>(player) else {
        return;
    };
    let (Some(player_transform), Some(agent_transform)) =
        (world.get::<Transform>(player), world.get::<Transform>(agent))
    else {
        return;
    };
    let agent_alive = world.get::<Attributes>(agent).is_some_and(|a| a.is_alive());

    let in_reach = player_transform.translation.distance(agent_transform.translation) <= 160.0;
    if *state == ActionState::Unoccupied && agent_alive && in_reach {
        app.world_mut().send_event(PlayerIntent {
            player,
            action: PlayerAction::Attack,
        });
    }
}

fn log_status(world: &World, tick: u32, player: Entity, agent: Entity) {
    let player_hp = world.get::<Attributes>(player).map_or(0.0, |a| a.health);
    let player_state = world.get::<ActionState>(player).copied();
    let agent_hp = world.get::<Attributes>(agent).map_or(0.0, |a| a.health);
    let agent_state = world.get::<AgentState>(agent).copied();

    log_info(&format!(
        "Tick {}: player {:.0} HP {:?} | agent {:.0} HP {:?}",
        tick, player_hp, player_state, agent_hp, agent_state
    ));
}
