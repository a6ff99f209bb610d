//! Combat systems

pub mod damage;
pub mod death;
pub mod melee;
pub mod stamina;

#[cfg(test)]
mod stamina_tests;

pub use damage::*;
pub use death::*;
pub use melee::*;
pub use stamina::*;
