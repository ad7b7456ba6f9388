//! Creature reference data: per-type combat stats and the catalog that holds them

pub mod catalog;
pub mod creature_type;

pub use catalog::CreatureCatalog;
pub use creature_type::{Creature, CreatureAbility, CreatureTier};
