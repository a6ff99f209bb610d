//! Combat integration test
//!
//! Полный цикл с headless хостом: игрок против агента, breakable props,
//! pickups. Хост (mover, pawn sensing, montages) скриптовый, остальное:
//! настоящая симуляция.
//!
//! Проверяем:
//! - Health/Stamina инварианты каждый тик
//! - Дуэль заканчивается смертью агента, души подобраны
//! - Breakable ломается ровно один раз
//! - Нет паники/крашей

use bevy::prelude::*;
use slash_simulation::*;
use slash_simulation::loot::Breakable;

/// Helper: симуляция + скриптовый хост
fn create_combat_app(seed: u64) -> App {
    let mut app = create_simulation_app(seed);
    app.add_plugins(HeadlessHostPlugin);
    app
}

/// Helper: игрок в центре (лицом к -Z) с мечом
fn spawn_armed_player(app: &mut App, damage: f32) -> Entity {
    let player = app
        .world_mut()
        .spawn((Player, Combatant::new(Faction::Player)))
        .id();
    let sword = app.world_mut().spawn(Weapon::new(damage)).id();
    app.world_mut().send_event(EquipWeaponIntent {
        combatant: player,
        weapon: sword,
    });
    player
}

/// Helper: агент на оси -Z, смотрит на игрока, с топором
fn spawn_armed_agent(app: &mut App, distance: f32, damage: f32) -> Entity {
    let agent = app
        .world_mut()
        .spawn((
            AgentState::Patrolling,
            Combatant::new(Faction::Enemy),
            Transform::from_xyz(0.0, 0.0, -distance).looking_at(Vec3::ZERO, Vec3::Y),
        ))
        .id();
    let axe = app.world_mut().spawn(Weapon::new(damage)).id();
    app.world_mut().send_event(EquipWeaponIntent {
        combatant: agent,
        weapon: axe,
    });
    agent
}

/// "Игрок" атакует, когда свободен и кто-то живой рядом
fn press_attack_if_ready(app: &mut App, player: Entity, foe: Entity) {
    let world = app.world();
    let ready = world.get::<ActionState>(player) == Some(&ActionState::Unoccupied);
    let foe_alive = world.get::<Attributes>(foe).is_some_and(|a| a.is_alive());
    let in_reach = match (world.get::<Transform>(player), world.get::<Transform>(foe)) {
        (Some(a), Some(b)) => a.translation.distance(b.translation) <= 160.0,
        _ => false,
    };

    if ready && foe_alive && in_reach {
        app.world_mut().send_event(PlayerIntent {
            player,
            action: PlayerAction::Attack,
        });
    }
}

fn check_invariants(app: &App, entity: Entity, tick: usize) {
    let Some(attributes) = app.world().get::<Attributes>(entity) else {
        return;
    };
    assert!(
        attributes.health >= 0.0 && attributes.health <= attributes.max_health,
        "Tick {}: {:?} health {} out of [0, {}]",
        tick,
        entity,
        attributes.health,
        attributes.max_health
    );
    assert!(
        attributes.stamina >= 0.0 && attributes.stamina <= attributes.max_stamina,
        "Tick {}: {:?} stamina {} out of [0, {}]",
        tick,
        entity,
        attributes.stamina,
        attributes.max_stamina
    );
}

/// Test: дуэль до смерти агента, инварианты каждый тик
#[test]
fn test_player_kills_agent_and_collects_souls() {
    let mut app = create_combat_app(42);
    let player = spawn_armed_player(&mut app, 35.0);
    let agent = spawn_armed_agent(&mut app, 450.0, 15.0);
    app.update();

    let mut agent_died_at = None;
    for tick in 0..1200 {
        press_attack_if_ready(&mut app, player, agent);
        app.update();

        check_invariants(&app, player, tick);
        check_invariants(&app, agent, tick);

        if app.world().get::<AgentState>(agent) == Some(&AgentState::Dead) {
            agent_died_at = Some(tick);
            break;
        }
    }

    assert!(agent_died_at.is_some(), "agent survived 1200 ticks");

    // Труп лежит, души на земле рядом с игроком
    for _ in 0..5 {
        app.update();
    }
    let world = app.world();
    let player_attributes = world.get::<Attributes>(player).unwrap();
    assert!(player_attributes.is_alive());
    assert!(player_attributes.souls >= 1, "souls = {}", player_attributes.souls);
    assert!(world.get::<Dead>(agent).is_some());
    assert_eq!(world.get::<CombatTarget>(agent).unwrap().0, None);
}

/// Test: агент замечает игрока и подходит на дистанцию атаки
#[test]
fn test_agent_spots_and_closes_distance() {
    let mut app = create_combat_app(9);
    let player = spawn_armed_player(&mut app, 35.0);
    let agent = spawn_armed_agent(&mut app, 450.0, 15.0);
    app.update();

    app.update();
    assert_eq!(app.world().get::<AgentState>(agent), Some(&AgentState::Chasing));

    for _ in 0..120 {
        app.update();
    }

    let world = app.world();
    let distance = world
        .get::<Transform>(agent)
        .unwrap()
        .translation
        .distance(world.get::<Transform>(player).unwrap().translation);
    assert!(distance <= 140.0, "distance = {}", distance);
    assert!(matches!(
        world.get::<AgentState>(agent),
        Some(AgentState::Attacking | AgentState::Engaged | AgentState::NoState)
    ));
}

/// Test: удар по breakable → одно сокровище, игрок его подбирает
#[test]
fn test_breakable_drops_treasure_once() {
    let mut app = create_combat_app(3);
    let player = spawn_armed_player(&mut app, 35.0);
    let barrel = app
        .world_mut()
        .spawn((
            Breakable {
                treasure_offset: Vec3::ZERO,
                ..Breakable::new(10)
            },
            Transform::from_xyz(0.0, 0.0, -90.0),
        ))
        .id();
    app.update();
    app.update();

    for _ in 0..3 {
        app.world_mut().send_event(PlayerIntent {
            player,
            action: PlayerAction::Attack,
        });
        for _ in 0..40 {
            app.update();
        }
    }

    let world = app.world();
    assert!(world.get::<Breakable>(barrel).unwrap().broken);
    assert_eq!(world.get::<Attributes>(player).unwrap().gold, 10);
}

/// Test: fixed rate берётся из SimulationConfig
#[test]
fn test_config_drives_fixed_rate() {
    let mut app = create_headless_app(1);
    app.insert_resource(SimulationConfig {
        fixed_hz: 30.0,
        ..SimulationConfig::default()
    })
    .add_plugins(SimulationPlugin);

    app.update();
    for _ in 0..30 {
        app.update();
    }

    let fixed = app.world().resource::<Time<Fixed>>();
    assert!((fixed.timestep().as_secs_f64() - 1.0 / 30.0).abs() < 1e-6);
    assert!((fixed.elapsed_secs_f64() - 1.0).abs() < 1e-3);
}
