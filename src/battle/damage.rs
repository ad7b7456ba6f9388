//! Stack damage: how much a whole stack deals, and how a stack absorbs it
//!
//! Per-individual damage comes from the creature (roll + attack/defense
//! modifier). The stack multiplies it by the hero bonus, its head count
//! and a random variance before the result is applied to the target.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::battle::constants::MIN_DAMAGE;
use crate::battle::units::BattleUnit;
use crate::core::config::BattleConfig;
use crate::creature::CreatureCatalog;

/// What the battle needs to know about the attacking hero
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct HeroBonus {
    /// The hero's Attack primary skill
    pub attack: u32,
}

impl HeroBonus {
    pub fn new(attack: u32) -> Self {
        Self { attack }
    }

    /// Damage multiplier for player-controlled stacks
    pub fn multiplier(&self, bonus_per_point: f32) -> f32 {
        1.0 + self.attack as f32 * bonus_per_point
    }
}

/// Result of applying damage to one stack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DamageOutcome {
    /// Individuals removed from the stack by this hit
    pub killed: u32,
    /// The stack has no living individuals left
    pub destroyed: bool,
}

/// Random multiplier applied to a stack's total damage
pub fn roll_variance<R: Rng + ?Sized>(config: &BattleConfig, rng: &mut R) -> f32 {
    if config.variance_min < config.variance_max {
        rng.gen_range(config.variance_min..config.variance_max)
    } else {
        config.variance_min
    }
}

/// Total damage `attacker` deals to `defender` this turn
///
/// Returns 0 when either creature is missing from the catalog (the attack
/// becomes a no-op); otherwise at least 1.
pub fn calculate_stack_damage<R: Rng + ?Sized>(
    attacker: &BattleUnit,
    defender: &BattleUnit,
    catalog: &CreatureCatalog,
    hero: Option<HeroBonus>,
    config: &BattleConfig,
    rng: &mut R,
) -> u32 {
    let (Some(attacking), Some(defending)) = (
        catalog.get(attacker.creature_id),
        catalog.get(defender.creature_id),
    ) else {
        return 0;
    };

    let mut per_creature = attacking.damage_against(defending, config.attack_advantage_scale, rng);

    if attacker.is_player_controlled {
        if let Some(hero) = hero {
            per_creature = (per_creature as f32 * hero.multiplier(config.hero_attack_bonus)) as u32;
        }
    }

    let stack_total = u64::from(per_creature) * u64::from(attacker.count);
    let varied = (stack_total as f64 * f64::from(roll_variance(config, rng))) as u64;

    u32::try_from(varied).unwrap_or(u32::MAX).max(MIN_DAMAGE)
}

/// Apply `damage` to `target`, whose creature has `hit_points` per individual
///
/// Whole individuals die first; the remainder wounds the lead individual
/// only if somebody is still standing. A lead individual brought to zero
/// dies and the next one starts fresh (overflow is not carried).
pub fn apply_damage(target: &mut BattleUnit, damage: u32, hit_points: u32) -> DamageOutcome {
    if hit_points == 0 || !target.is_alive() {
        return DamageOutcome {
            killed: 0,
            destroyed: !target.is_alive(),
        };
    }

    let before = target.count;

    target.count = target.count.saturating_sub(damage / hit_points);

    let remainder = damage % hit_points;
    if remainder > 0 && target.count > 0 {
        if remainder >= target.current_health {
            target.count -= 1;
            target.current_health = hit_points;
        } else {
            target.current_health -= remainder;
        }
    }

    DamageOutcome {
        killed: before - target.count,
        destroyed: target.count == 0,
    }
}
