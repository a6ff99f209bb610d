//! AI components

pub mod fsm;
pub mod patrol;


pub use fsm::*;
pub use patrol::*;
