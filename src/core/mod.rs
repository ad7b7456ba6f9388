pub mod config;
pub mod error;
pub mod types;

pub use config::{BattleConfig, ExperiencePolicy};
pub use error::{EldoriaError, Result};
pub use types::{CreatureId, Faction, Resources, Side};
