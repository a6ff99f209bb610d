//! Combat components

pub mod montage;
pub mod weapon;

// Tests (separate files with _tests suffix)
#[cfg(test)]
mod weapon_tests;

pub use montage::*;
pub use weapon::*;
