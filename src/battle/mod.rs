//! Battle system - automatic stack-vs-stack resolution
//!
//! Two rosters of creature stacks trade blows in rounds until one side has
//! nobody left standing or the round cap is reached.
//!
//! Key rules:
//! - The attacker side acts first, then the defender side
//! - Every stack hits the enemy stack with the least total health
//! - Dead stacks are pruned after each half-round
//! - The hero's Attack only boosts player-controlled stacks

pub mod constants;
pub mod damage;
pub mod events;
pub mod execution;
pub mod experience;
pub mod targeting;
pub mod units;

// Re-exports for convenient access
pub use constants::*;
pub use damage::{apply_damage, calculate_stack_damage, roll_variance, DamageOutcome, HeroBonus};
pub use events::{BattleEvent, BattleEventKind, BattleEventLog};
pub use execution::{BattleEngine, BattlePhase, BattleReport, BattleResult};
pub use experience::calculate_experience;
pub use targeting::select_weakest_target;
pub use units::{has_living, prune_dead, BattleUnit};
