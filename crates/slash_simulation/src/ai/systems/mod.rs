//! AI systems

pub mod attack;
pub mod fsm;
pub mod patrol;
pub mod perception;
pub mod reactions;

pub use attack::*;
pub use fsm::*;
pub use patrol::*;
pub use perception::*;
pub use reactions::*;
