//! Slash Simulation Core
//!
//! Combat and behavior core of a third-person melee action game, built as
//! a headless Bevy 0.16 ECS simulation. The host (engine, editor, test
//! harness) owns rendering, navigation and animation playback; the core
//! owns the rules.
//!
//! # Architecture
//!
//! ```text
//! host ──ActorSensed/PlayerIntent/AnimationSignal/DamageRequest──▶ ECS
//! ECS  ──MovementCommand/AnimationRequest/PresentationCue/LootSpawnRequest──▶ host
//! ```
//!
//! Каждый fixed tick проходит строго по фазам (`CombatSet`):
//! perception → timers → intents → behavior → hit detection → damage →
//! reactions → death → upkeep.

use bevy::prelude::*;
use bevy::time::TimeUpdateStrategy;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod ai;
pub mod combat;
pub mod components;
pub mod config;
pub mod equipment;
pub mod host;
pub mod logger;
pub mod loot;
pub mod player;
pub mod schedule;

pub use ai::{AIPlugin, AgentConfig, AgentState, CombatTarget, PatrolRoute};
pub use combat::{
    AnimationRequest, AnimationSignal, CombatPlugin, DamageDealt, DamageRequest, Dead,
    EntityDied, HitDirection, HitReceived, PresentationCue, StateRequest, Weapon,
};
pub use components::*;
pub use config::{ConfigError, SimulationConfig};
pub use equipment::{EquipWeaponIntent, EquipmentPlugin};
pub use host::HeadlessHostPlugin;
pub use logger::{init_logger, log, log_error, log_info, log_warning};
pub use loot::{LootPlugin, LootSpawnRequest};
pub use player::{ActionState, Player, PlayerAction, PlayerIntent, PlayerPlugin, WeaponStance};
pub use schedule::{SchedulePlugin, TimerKind, TimerQueue};

/// Фазы fixed tick. Порядок жёсткий (`.chain()`), внутри фазы системы
/// упорядочены своими плагинами.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CombatSet {
    /// Sensing events → target acquisition.
    Perception,
    /// Due scheduled tasks fire.
    Timers,
    /// Player intents, equip requests, animation completion signals.
    Intents,
    /// Agent combat/patrol re-evaluation.
    Behavior,
    /// Weapon sweeps.
    HitDetection,
    /// Damage requests → attribute changes.
    Damage,
    /// State machines react to damage outcomes.
    Reactions,
    /// Death bookkeeping (markers, timers, weapons).
    Death,
    /// Regen, despawn, pickups.
    Upkeep,
}

/// Главный plugin симуляции (объединяет все подсистемы)
///
/// Читает `SimulationConfig` если он уже вставлен в App, иначе берёт default.
pub struct SimulationPlugin;

impl Plugin for SimulationPlugin {
    fn build(&self, app: &mut App) {
        let config = app
            .world()
            .get_resource::<SimulationConfig>()
            .cloned()
            .unwrap_or_default();

        if !app.world().contains_resource::<DeterministicRng>() {
            app.insert_resource(DeterministicRng::new(config.seed));
        }

        let fixed = Time::<Fixed>::from_hz(config.fixed_hz);
        // Ручные часы тестов должны шагать тем же шагом, что и FixedUpdate
        if let Some(mut strategy) = app.world_mut().get_resource_mut::<TimeUpdateStrategy>() {
            if matches!(*strategy, TimeUpdateStrategy::ManualDuration(_)) {
                *strategy = TimeUpdateStrategy::ManualDuration(fixed.timestep());
            }
        }

        app.insert_resource(fixed)
            .insert_resource(config)
            .configure_sets(
                FixedUpdate,
                (
                    CombatSet::Perception,
                    CombatSet::Timers,
                    CombatSet::Intents,
                    CombatSet::Behavior,
                    CombatSet::HitDetection,
                    CombatSet::Damage,
                    CombatSet::Reactions,
                    CombatSet::Death,
                    CombatSet::Upkeep,
                )
                    .chain(),
            )
            .add_plugins((
                SchedulePlugin,
                CombatPlugin,
                AIPlugin,
                PlayerPlugin,
                EquipmentPlugin,
                LootPlugin,
            ));
    }
}

/// Детерминистичный RNG resource (seeded)
///
/// Все случайные решения симуляции (patrol waits, attack delays, montage
/// sections, soul rewards) берутся отсюда, поэтому один seed = один исход.
#[derive(Resource)]
pub struct DeterministicRng {
    pub rng: ChaCha8Rng,
    pub seed: u64,
}

impl DeterministicRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Uniform sample from `[min, max]`. Перевёрнутый диапазон нормализуется.
    pub fn uniform(&mut self, min: f32, max: f32) -> f32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        if lo == hi {
            return lo;
        }
        self.rng.gen_range(lo..=hi)
    }

    pub fn uniform_u32(&mut self, min: u32, max: u32) -> u32 {
        let (lo, hi) = if min <= max { (min, max) } else { (max, min) };
        self.rng.gen_range(lo..=hi)
    }

    /// Random index into a collection of `len` elements.
    pub fn index(&mut self, len: usize) -> Option<usize> {
        (len > 0).then(|| self.rng.gen_range(0..len))
    }
}

/// Создаёт minimal Bevy App для headless симуляции
///
/// Время идёт вручную: каждый `app.update()` продвигает часы ровно на один
/// fixed step, так что тики воспроизводимы независимо от wall clock.
/// Первый `update()` только заводит часы.
pub fn create_headless_app(seed: u64) -> App {
    let mut app = App::new();
    init_logger();

    let fixed = Time::<Fixed>::from_hz(SimulationConfig::default().fixed_hz);
    app.add_plugins(MinimalPlugins)
        .insert_resource(DeterministicRng::new(seed))
        .insert_resource(TimeUpdateStrategy::ManualDuration(fixed.timestep()))
        .insert_resource(fixed);

    app
}

/// Headless App с полной симуляцией (SimulationPlugin уже добавлен).
pub fn create_simulation_app(seed: u64) -> App {
    let mut app = create_headless_app(seed);
    app.add_plugins(SimulationPlugin);
    app
}

/// Snapshot мира для сравнения детерминизма
pub fn world_snapshot<T: Component>(world: &mut World) -> Vec<u8>
where
    T: std::fmt::Debug,
{
    let mut snapshot = Vec::new();

    let mut query = world.query::<(Entity, &T)>();
    let mut entities: Vec<_> = query.iter(world).collect();

    // Сортируем по Entity ID для детерминизма
    entities.sort_by_key(|(entity, _)| entity.index());

    for (entity, component) in entities {
        snapshot.extend_from_slice(&entity.index().to_le_bytes());
        snapshot.extend_from_slice(format!("{:?}", component).as_bytes());
    }

    snapshot
}
