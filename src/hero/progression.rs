//! Hero experience and levels
//!
//! Level `l` needs `(l - 1)^2 * 1000` experience. Each level gained adds
//! one point of Attack and one of Defense.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::battle::{BattleEngine, BattlePhase, BattleResult, HeroBonus};
use crate::core::error::{EldoriaError, Result};
use crate::creature::CreatureCatalog;

use super::army::Army;

/// Experience per squared level step
const EXPERIENCE_CURVE_FACTOR: u64 = 1000;

/// Total experience needed to reach `level`
pub fn experience_for_level(level: u32) -> u64 {
    let steps = u64::from(level.saturating_sub(1));
    steps * steps * EXPERIENCE_CURVE_FACTOR
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hero {
    pub name: String,
    pub attack: u32,
    pub defense: u32,
    pub level: u32,
    pub experience: u64,
    #[serde(default)]
    pub army: Army,
}

impl Hero {
    pub fn new(name: impl Into<String>, attack: u32, defense: u32) -> Self {
        Self {
            name: name.into(),
            attack,
            defense,
            level: 1,
            experience: 0,
            army: Army::new(),
        }
    }

    pub fn can_level_up(&self) -> bool {
        self.experience >= experience_for_level(self.level + 1)
    }

    /// Add experience and take every level it pays for. Returns levels gained.
    pub fn gain_experience(&mut self, amount: u64) -> u32 {
        self.experience = self.experience.saturating_add(amount);

        let mut gained = 0;
        while self.can_level_up() {
            self.level_up();
            gained += 1;
        }
        gained
    }

    fn level_up(&mut self) {
        self.level += 1;
        self.attack += 1;
        self.defense += 1;
        tracing::info!(
            hero = %self.name,
            level = self.level,
            attack = self.attack,
            defense = self.defense,
            "Hero levelled up"
        );
    }

    /// What the battle engine needs from this hero
    pub fn battle_bonus(&self) -> HeroBonus {
        HeroBonus::new(self.attack)
    }

    /// Engine with this hero's bonus and army deployed on the attacker side
    pub fn prepare_battle<'a>(&self, catalog: &'a CreatureCatalog, seed: u64) -> BattleEngine<'a> {
        let mut engine = BattleEngine::with_seed(catalog, Some(self.battle_bonus()), seed);
        self.army.deploy(&mut engine);
        engine
    }

    /// Take the aftermath of a finished battle: surviving stacks become the
    /// army, and experience is granted only for a victory.
    ///
    /// Returns the number of levels gained.
    pub fn conclude_battle<R: Rng>(&mut self, engine: &BattleEngine<'_, R>) -> Result<u32> {
        if engine.phase() != BattlePhase::Ended {
            return Err(EldoriaError::BattleNotFinished);
        }

        self.army.replace_with_survivors(engine.player_units());

        match engine.battle_result() {
            BattleResult::Victory => Ok(self.gain_experience(engine.calculate_experience_gained())),
            BattleResult::Defeat | BattleResult::Flee => Ok(0),
        }
    }
}
