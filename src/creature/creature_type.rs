//! Creature types and their combat stats
//!
//! A creature is immutable reference data: one entry per recruitable type.
//! Stacks in battle point back at it by id.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::battle::constants::MIN_DAMAGE;
use crate::core::error::{EldoriaError, Result};
use crate::core::types::{CreatureId, Faction, Resources};

/// Dwelling level of a creature (1 = weakest)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
#[repr(u8)]
pub enum CreatureTier {
    #[default]
    Tier1 = 1,
    Tier2 = 2,
    Tier3 = 3,
    Tier4 = 4,
    Tier5 = 5,
    Tier6 = 6,
    Tier7 = 7,
}

impl TryFrom<u8> for CreatureTier {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(CreatureTier::Tier1),
            2 => Ok(CreatureTier::Tier2),
            3 => Ok(CreatureTier::Tier3),
            4 => Ok(CreatureTier::Tier4),
            5 => Ok(CreatureTier::Tier5),
            6 => Ok(CreatureTier::Tier6),
            7 => Ok(CreatureTier::Tier7),
            other => Err(format!("creature tier must be 1-7, got {}", other)),
        }
    }
}

impl From<CreatureTier> for u8 {
    fn from(tier: CreatureTier) -> Self {
        tier as u8
    }
}

/// Special properties a creature may have
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CreatureAbility {
    Flying,
    Shooting,
    DoubleAttack,
    NoMeleeRetaliation,
    MagicResistance,
    Regeneration,
    Undead,
    FireImmunity,
    WaterImmunity,
    EarthImmunity,
    AirImmunity,
}

/// Catalog entry for one creature type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Creature {
    pub id: CreatureId,
    pub name: String,
    #[serde(default)]
    pub faction: Faction,
    #[serde(default)]
    pub tier: CreatureTier,

    // Combat
    pub attack: u32,
    pub defense: u32,
    pub min_damage: u32,
    pub max_damage: u32,
    pub hit_points: u32,
    #[serde(default)]
    pub speed: u32,
    #[serde(default)]
    pub abilities: Vec<CreatureAbility>,

    // Economy
    #[serde(default)]
    pub cost: Resources,
    /// Base unit of experience awarded per individual killed
    #[serde(default)]
    pub ai_value: u32,

    /// Creature this one upgrades into, if any
    #[serde(default)]
    pub upgrade: Option<CreatureId>,
}

impl Creature {
    /// Create a creature with all stats zeroed
    pub fn new(id: CreatureId, name: impl Into<String>, faction: Faction, tier: CreatureTier) -> Self {
        Self {
            id,
            name: name.into(),
            faction,
            tier,
            attack: 0,
            defense: 0,
            min_damage: 0,
            max_damage: 0,
            hit_points: 0,
            speed: 0,
            abilities: Vec::new(),
            cost: Resources::default(),
            ai_value: 0,
            upgrade: None,
        }
    }

    pub fn with_stats(
        mut self,
        attack: u32,
        defense: u32,
        min_damage: u32,
        max_damage: u32,
        hit_points: u32,
        speed: u32,
    ) -> Self {
        self.attack = attack;
        self.defense = defense;
        self.min_damage = min_damage;
        self.max_damage = max_damage;
        self.hit_points = hit_points;
        self.speed = speed;
        self
    }

    pub fn with_cost(mut self, cost: Resources) -> Self {
        self.cost = cost;
        self
    }

    pub fn with_ai_value(mut self, ai_value: u32) -> Self {
        self.ai_value = ai_value;
        self
    }

    pub fn with_upgrade(mut self, target: CreatureId) -> Self {
        self.upgrade = Some(target);
        self
    }

    /// Add an ability (duplicates are ignored)
    pub fn with_ability(mut self, ability: CreatureAbility) -> Self {
        if !self.has_ability(ability) {
            self.abilities.push(ability);
        }
        self
    }

    pub fn has_ability(&self, ability: CreatureAbility) -> bool {
        self.abilities.contains(&ability)
    }

    pub fn can_be_upgraded(&self) -> bool {
        self.upgrade.is_some()
    }

    /// Check the stats a battle depends on
    pub fn validate(&self) -> Result<()> {
        if self.hit_points == 0 {
            return Err(EldoriaError::InvalidCreature {
                id: self.id,
                reason: "hit_points must be at least 1".into(),
            });
        }
        if self.min_damage > self.max_damage {
            return Err(EldoriaError::InvalidCreature {
                id: self.id,
                reason: format!(
                    "min_damage ({}) exceeds max_damage ({})",
                    self.min_damage, self.max_damage
                ),
            });
        }
        Ok(())
    }

    /// Damage dealt by a single individual, before any modifier
    pub fn roll_damage<R: Rng + ?Sized>(&self, rng: &mut R) -> u32 {
        if self.min_damage >= self.max_damage {
            return self.min_damage;
        }
        rng.gen_range(self.min_damage..=self.max_damage)
    }

    /// Multiplier from this creature's attack against `target`'s defense
    pub fn attack_modifier(&self, target: &Creature, advantage_scale: f32) -> f32 {
        let ratio = self.attack as f32 / (target.defense as f32 + 1.0);

        if ratio > 1.0 {
            1.0 + (ratio - 1.0) * advantage_scale
        } else {
            // Below parity the ratio itself is the multiplier; at parity it is 1.0
            ratio
        }
    }

    /// Damage dealt by a single individual against `target`, never below 1
    pub fn damage_against<R: Rng + ?Sized>(
        &self,
        target: &Creature,
        advantage_scale: f32,
        rng: &mut R,
    ) -> u32 {
        let base = self.roll_damage(rng) as f32;
        let damage = (base * self.attack_modifier(target, advantage_scale)) as u32;
        damage.max(MIN_DAMAGE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn archer() -> Creature {
        Creature::new(CreatureId(2), "Archer", Faction::Castle, CreatureTier::Tier2)
            .with_stats(6, 3, 2, 3, 10, 4)
            .with_ability(CreatureAbility::Shooting)
            .with_ai_value(126)
    }

    fn peasant() -> Creature {
        Creature::new(CreatureId(1), "Peasant", Faction::Castle, CreatureTier::Tier1)
            .with_stats(1, 1, 1, 1, 1, 3)
            .with_ai_value(15)
    }

    #[test]
    fn test_fixed_damage_needs_no_roll() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let peasant = peasant();
        for _ in 0..10 {
            assert_eq!(peasant.roll_damage(&mut rng), 1);
        }
    }

    #[test]
    fn test_damage_roll_within_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let archer = archer();
        for _ in 0..200 {
            let roll = archer.roll_damage(&mut rng);
            assert!((2..=3).contains(&roll));
        }
    }

    #[test]
    fn test_advantage_scales_up_slowly() {
        // 6 / (1 + 1) = 3.0 -> 1 + 2.0 * 0.1
        let modifier = archer().attack_modifier(&peasant(), 0.1);
        assert!((modifier - 1.2).abs() < 1e-6);
    }

    #[test]
    fn test_disadvantage_scales_down_directly() {
        // 1 / (3 + 1) = 0.25
        let modifier = peasant().attack_modifier(&archer(), 0.1);
        assert!((modifier - 0.25).abs() < 1e-6);
    }

    #[test]
    fn test_parity_leaves_damage_unchanged() {
        let a = Creature::new(CreatureId(10), "A", Faction::Neutral, CreatureTier::Tier1)
            .with_stats(5, 4, 3, 3, 10, 1);
        assert!((a.attack_modifier(&a, 0.1) - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_damage_against_floors_at_one() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        // 1 damage * 0.25 truncates to 0, clamped back to 1
        assert_eq!(peasant().damage_against(&archer(), 0.1, &mut rng), 1);
    }

    #[test]
    fn test_ability_added_once() {
        let creature = archer().with_ability(CreatureAbility::Shooting);
        assert_eq!(creature.abilities.len(), 1);
        assert!(creature.has_ability(CreatureAbility::Shooting));
        assert!(!creature.has_ability(CreatureAbility::Flying));
    }

    #[test]
    fn test_validate_rejects_zero_hit_points() {
        let ghost = Creature::new(CreatureId(9), "Ghost", Faction::Necropolis, CreatureTier::Tier1);
        assert!(matches!(
            ghost.validate(),
            Err(EldoriaError::InvalidCreature { .. })
        ));
        assert!(archer().validate().is_ok());
    }

    #[test]
    fn test_tier_from_integer() {
        assert_eq!(CreatureTier::try_from(3), Ok(CreatureTier::Tier3));
        assert!(CreatureTier::try_from(8).is_err());
        assert_eq!(u8::from(CreatureTier::Tier7), 7);
    }
}
