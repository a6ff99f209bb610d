//! ECS Components, общие для игрока и агентов
//!
//! - actor: боец, фракция, атрибуты, hurtbox
//! - movement: команды для navigation mover хоста
//!
//! Компоненты конкретных подсистем живут рядом со своими системами
//! (`ai::components`, `combat::components`, `player`, `loot`).

pub mod actor;
pub mod movement;

pub use actor::*;
pub use movement::*;
