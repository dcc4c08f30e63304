//! Parent selection
pub mod roulette;

pub use self::roulette::{DualRoulette, ParentPair};
