//! Creature catalog for loading and looking up creature types.
//!
//! The catalog is built once (from code or TOML) and then shared read-only
//! with every battle. Nothing mutates it after construction.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::creature_type::{Creature, CreatureAbility, CreatureTier};
use crate::core::error::{EldoriaError, Result};
use crate::core::types::{CreatureId, Faction, Resources};

/// On-disk layout: a list of `[[creature]]` tables
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default, rename = "creature")]
    creatures: Vec<Creature>,
}

/// Read-only registry of creature types keyed by id
#[derive(Debug, Clone, Default)]
pub struct CreatureCatalog {
    creatures: HashMap<CreatureId, Creature>,
}

impl CreatureCatalog {
    /// Create a new empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// The two creatures every new game starts with
    pub fn classic() -> Self {
        let peasant = Creature::new(CreatureId(1), "Peasant", Faction::Castle, CreatureTier::Tier1)
            .with_stats(1, 1, 1, 1, 1, 3)
            .with_ai_value(15);

        let archer = Creature::new(CreatureId(2), "Archer", Faction::Castle, CreatureTier::Tier2)
            .with_stats(6, 3, 2, 3, 10, 4)
            .with_ability(CreatureAbility::Shooting)
            .with_cost(Resources {
                gold: 100,
                wood: 5,
                ..Resources::default()
            })
            .with_ai_value(126);

        let mut catalog = Self::new();
        for creature in [peasant, archer] {
            catalog.creatures.insert(creature.id, creature);
        }
        catalog
    }

    /// Add a creature after validating it
    pub fn insert(&mut self, creature: Creature) -> Result<()> {
        creature.validate()?;
        if self.creatures.contains_key(&creature.id) {
            return Err(EldoriaError::DuplicateCreature(creature.id));
        }
        self.creatures.insert(creature.id, creature);
        Ok(())
    }

    /// Parse a catalog from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let file: CatalogFile = toml::from_str(content)?;
        let mut catalog = Self::new();
        for creature in file.creatures {
            catalog.insert(creature)?;
        }
        tracing::debug!(creatures = catalog.len(), "Creature catalog parsed");
        Ok(catalog)
    }

    /// Load a catalog from a TOML file
    pub fn load_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml_str(&content)?;
        tracing::info!(path = %path.display(), creatures = catalog.len(), "Loaded creature catalog");
        Ok(catalog)
    }

    /// Look up a creature by id
    pub fn get(&self, id: CreatureId) -> Option<&Creature> {
        self.creatures.get(&id)
    }

    /// Look up a creature by display name (case-insensitive)
    pub fn find_by_name(&self, name: &str) -> Option<&Creature> {
        self.creatures
            .values()
            .find(|c| c.name.eq_ignore_ascii_case(name))
    }

    pub fn contains(&self, id: CreatureId) -> bool {
        self.creatures.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }

    /// All creatures, ordered by id
    pub fn iter(&self) -> impl Iterator<Item = &Creature> {
        let mut all: Vec<&Creature> = self.creatures.values().collect();
        all.sort_by_key(|c| c.id);
        all.into_iter()
    }
}
