//! Heroes: the army they carry and the experience they gather between battles

pub mod army;
pub mod progression;

pub use army::{Army, ArmySlot, MAX_SLOTS};
pub use progression::{experience_for_level, Hero};
