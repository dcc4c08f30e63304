//! Adaptive mutation control
pub mod mutation;

pub use self::mutation::{MutationController, MutationLaw};
