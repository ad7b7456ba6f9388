//! Battle configuration with documented constants
//!
//! Every tunable used by the battle engine is collected here. The defaults
//! live in `battle::constants` and reproduce the classic auto-battle rules.

use serde::{Deserialize, Serialize};

use crate::battle::constants::{
    ATTACK_ADVANTAGE_SCALE, DAMAGE_VARIANCE_MAX, DAMAGE_VARIANCE_MIN, HERO_ATTACK_BONUS_PER_POINT,
    LEGACY_ASSUMED_STACK_SIZE, MAX_ROUNDS,
};
use crate::core::error::{EldoriaError, Result};

/// How experience is derived from the defender roster after a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum ExperiencePolicy {
    /// AI value times individuals actually killed, counted against each
    /// stack's starting size. Stacks destroyed and pruned mid-battle count.
    Casualties,

    /// AI value times `max(0, assumed_stack_size - count)` over the stacks
    /// still on the defender roster. Destroyed stacks have been pruned by
    /// then and contribute nothing.
    Legacy { assumed_stack_size: u32 },
}

impl Default for ExperiencePolicy {
    fn default() -> Self {
        Self::Casualties
    }
}

impl ExperiencePolicy {
    pub fn legacy() -> Self {
        Self::Legacy {
            assumed_stack_size: LEGACY_ASSUMED_STACK_SIZE,
        }
    }
}

/// Configuration for the battle engine
///
/// Loaded from the `[rules]` table of a scenario file; any missing key
/// falls back to its default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BattleConfig {
    /// Rounds simulated before the battle is cut off
    ///
    /// A battle that reaches the cap with both sides standing resolves
    /// from the current rosters like any other ending.
    pub max_rounds: u32,

    /// Lower bound of the random multiplier applied to a stack's total damage
    pub variance_min: f32,

    /// Upper bound (exclusive) of the random multiplier
    ///
    /// Equal bounds disable variance: the multiplier is exactly `variance_min`.
    pub variance_max: f32,

    /// Damage gained per point of attack/defense ratio above 1.0
    ///
    /// At 0.1, an attacker with twice the defender's (defense + 1)
    /// deals 10% more damage. Ratios below 1.0 scale damage down directly.
    pub attack_advantage_scale: f32,

    /// Damage gained per point of the attacking hero's Attack stat
    ///
    /// Only applies to player-controlled stacks.
    pub hero_attack_bonus: f32,

    /// Experience accounting used by `BattleEngine::calculate_experience_gained`
    pub experience: ExperiencePolicy,
}

impl Default for BattleConfig {
    fn default() -> Self {
        Self {
            max_rounds: MAX_ROUNDS,
            variance_min: DAMAGE_VARIANCE_MIN,
            variance_max: DAMAGE_VARIANCE_MAX,
            attack_advantage_scale: ATTACK_ADVANTAGE_SCALE,
            hero_attack_bonus: HERO_ATTACK_BONUS_PER_POINT,
            experience: ExperiencePolicy::default(),
        }
    }
}

impl BattleConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Same rules with the random damage multiplier pinned to 1.0
    pub fn without_variance(mut self) -> Self {
        self.variance_min = 1.0;
        self.variance_max = 1.0;
        self
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.max_rounds == 0 {
            return Err(EldoriaError::InvalidConfig(
                "max_rounds must be at least 1".into(),
            ));
        }

        if !(self.variance_min > 0.0) || !self.variance_max.is_finite() {
            return Err(EldoriaError::InvalidConfig(format!(
                "variance bounds must be positive and finite (got {}..{})",
                self.variance_min, self.variance_max
            )));
        }

        if self.variance_min > self.variance_max {
            return Err(EldoriaError::InvalidConfig(format!(
                "variance_min ({}) should be <= variance_max ({})",
                self.variance_min, self.variance_max
            )));
        }

        for (name, scale) in [
            ("attack_advantage_scale", self.attack_advantage_scale),
            ("hero_attack_bonus", self.hero_attack_bonus),
        ] {
            if !scale.is_finite() || scale < 0.0 {
                return Err(EldoriaError::InvalidConfig(format!(
                    "{} must be finite and not negative (got {})",
                    name, scale
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = BattleConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_rounds, 20);
        assert_eq!(config.experience, ExperiencePolicy::Casualties);
    }

    #[test]
    fn test_zero_rounds_rejected() {
        let config = BattleConfig {
            max_rounds: 0,
            ..BattleConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(EldoriaError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_inverted_variance_rejected() {
        let config = BattleConfig {
            variance_min: 1.3,
            variance_max: 1.1,
            ..BattleConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_nan_scales_rejected() {
        let advantage = BattleConfig {
            attack_advantage_scale: f32::NAN,
            ..BattleConfig::default()
        };
        assert!(matches!(
            advantage.validate(),
            Err(EldoriaError::InvalidConfig(_))
        ));

        let hero = BattleConfig {
            hero_attack_bonus: f32::NAN,
            ..BattleConfig::default()
        };
        assert!(hero.validate().is_err());

        let infinite = BattleConfig {
            hero_attack_bonus: f32::INFINITY,
            ..BattleConfig::default()
        };
        assert!(infinite.validate().is_err());
    }

    #[test]
    fn test_without_variance_is_valid() {
        let config = BattleConfig::default().without_variance();
        assert!(config.validate().is_ok());
        assert_eq!(config.variance_min, config.variance_max);
    }

    #[test]
    fn test_partial_rules_table_uses_defaults() {
        let config: BattleConfig = toml::from_str("max_rounds = 5").unwrap();
        assert_eq!(config.max_rounds, 5);
        assert_eq!(config.variance_min, 0.8);
        assert_eq!(config.hero_attack_bonus, 0.05);
    }

    #[test]
    fn test_legacy_policy_from_toml() {
        let config: BattleConfig = toml::from_str(
            r#"
            [experience]
            policy = "legacy"
            assumed_stack_size = 5
            "#,
        )
        .unwrap();
        assert_eq!(config.experience, ExperiencePolicy::legacy());
    }
}
