//! Battle scenarios loaded from TOML
//!
//! ```toml
//! name = "Archers hold the bridge"
//! seed = 42
//!
//! [hero]
//! name = "Orrin"
//! attack = 2
//!
//! [[attacker]]
//! creature = "Archer"
//! count = 12
//!
//! [[defender]]
//! creature = 1
//! count = 60
//!
//! [rules]
//! max_rounds = 30
//! ```
//!
//! Creatures are referenced by catalog id or by name. Unlike the engine's
//! lenient setup calls, a scenario rejects stacks it cannot place.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::battle::{BattleEngine, HeroBonus};
use crate::core::config::BattleConfig;
use crate::core::error::{EldoriaError, Result};
use crate::core::types::{CreatureId, Side};
use crate::creature::CreatureCatalog;

/// A creature named by id or by display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CreatureRef {
    Id(CreatureId),
    Name(String),
}

impl CreatureRef {
    pub fn resolve(&self, catalog: &CreatureCatalog) -> Result<CreatureId> {
        match self {
            CreatureRef::Id(id) if catalog.contains(*id) => Ok(*id),
            CreatureRef::Id(id) => Err(EldoriaError::CreatureNotFound(*id)),
            CreatureRef::Name(name) => catalog
                .find_by_name(name)
                .map(|c| c.id)
                .ok_or_else(|| EldoriaError::UnknownCreatureName(name.clone())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackSpec {
    pub creature: CreatureRef,
    pub count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeroSpec {
    #[serde(default = "default_hero_name")]
    pub name: String,
    #[serde(default)]
    pub attack: u32,
}

fn default_hero_name() -> String {
    "Hero".to_string()
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scenario {
    #[serde(default)]
    pub name: Option<String>,
    /// Seed used when the caller does not supply one
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub hero: Option<HeroSpec>,
    #[serde(default, rename = "attacker")]
    pub attackers: Vec<StackSpec>,
    #[serde(default, rename = "defender")]
    pub defenders: Vec<StackSpec>,
    #[serde(default)]
    pub rules: BattleConfig,
}

impl Scenario {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.rules.validate()?;
        Ok(scenario)
    }

    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let scenario = Self::from_toml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            attackers = scenario.attackers.len(),
            defenders = scenario.defenders.len(),
            "Loaded scenario"
        );
        Ok(scenario)
    }

    pub fn hero_bonus(&self) -> Option<HeroBonus> {
        self.hero.as_ref().map(|h| HeroBonus::new(h.attack))
    }

    /// Set up a fresh engine for this scenario
    pub fn build_engine<'a>(
        &self,
        catalog: &'a CreatureCatalog,
        seed: u64,
    ) -> Result<BattleEngine<'a>> {
        let mut engine = BattleEngine::with_seed(catalog, self.hero_bonus(), seed)
            .with_config(self.rules.clone())?;

        for (side, stacks) in [
            (Side::Attacker, &self.attackers),
            (Side::Defender, &self.defenders),
        ] {
            for stack in stacks {
                let id = stack.creature.resolve(catalog)?;
                match side {
                    Side::Attacker => engine.try_add_player_unit(id, stack.count)?,
                    Side::Defender => engine.try_add_enemy_unit(id, stack.count)?,
                }
            }
        }

        Ok(engine)
    }
}
