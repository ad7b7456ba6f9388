//! Battle execution loop
//!
//! Each round: attacker half-round -> prune defenders -> defender half-round
//! -> prune attackers -> end check. Within a half-round stacks act in roster
//! order and every acting stack re-targets against the live enemy roster.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::battle::damage::{apply_damage, calculate_stack_damage, HeroBonus};
use crate::battle::events::{BattleEventKind, BattleEventLog};
use crate::battle::experience::calculate_experience;
use crate::battle::targeting::select_weakest_target;
use crate::battle::units::{has_living, prune_dead, BattleUnit};
use crate::core::config::BattleConfig;
use crate::core::error::{EldoriaError, Result};
use crate::core::types::{CreatureId, Side};
use crate::creature::CreatureCatalog;

/// Battle phases
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BattlePhase {
    #[default]
    NotStarted,
    Active,
    Ended,
}

/// Battle outcome from the attacker's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BattleResult {
    Victory,
    Defeat,
    /// The attacker retreated; only produced by `BattleEngine::flee`
    Flee,
}

/// Summary of a battle for callers and tooling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BattleReport {
    pub result: BattleResult,
    pub rounds: u32,
    /// The round cap ended the battle while both sides still stood
    pub hit_round_cap: bool,
    pub attacker_survivors: Vec<BattleUnit>,
    pub defender_survivors: Vec<BattleUnit>,
    pub attacker_casualties: u32,
    pub defender_casualties: u32,
    pub experience: u64,
}

/// Automatic battle between two rosters of stacks
///
/// The engine borrows the creature catalog and owns everything else:
/// both rosters, the round counter and its random generator.
#[derive(Debug)]
pub struct BattleEngine<'a, R: Rng = ChaCha8Rng> {
    catalog: &'a CreatureCatalog,
    hero: Option<HeroBonus>,
    config: BattleConfig,

    player_units: Vec<BattleUnit>,
    enemy_units: Vec<BattleUnit>,
    // Stacks pruned from the rosters, kept for casualty accounting
    fallen_player_units: Vec<BattleUnit>,
    fallen_enemy_units: Vec<BattleUnit>,

    phase: BattlePhase,
    round: u32,
    outcome: Option<BattleResult>,
    hit_round_cap: bool,

    log: BattleEventLog,
    rng: R,
}

impl<'a> BattleEngine<'a, ChaCha8Rng> {
    /// Create an engine seeded from OS entropy
    pub fn new(catalog: &'a CreatureCatalog, hero: Option<HeroBonus>) -> Self {
        Self::with_rng(catalog, hero, ChaCha8Rng::from_entropy())
    }

    /// Create with specific RNG seed for reproducible battles
    pub fn with_seed(catalog: &'a CreatureCatalog, hero: Option<HeroBonus>, seed: u64) -> Self {
        Self::with_rng(catalog, hero, ChaCha8Rng::seed_from_u64(seed))
    }
}

impl<'a, R: Rng> BattleEngine<'a, R> {
    /// Create with an injected random generator
    pub fn with_rng(catalog: &'a CreatureCatalog, hero: Option<HeroBonus>, rng: R) -> Self {
        Self {
            catalog,
            hero,
            config: BattleConfig::default(),
            player_units: Vec::new(),
            enemy_units: Vec::new(),
            fallen_player_units: Vec::new(),
            fallen_enemy_units: Vec::new(),
            phase: BattlePhase::NotStarted,
            round: 0,
            outcome: None,
            hit_round_cap: false,
            log: BattleEventLog::new(),
            rng,
        }
    }

    /// Replace the default rules
    pub fn with_config(mut self, config: BattleConfig) -> Result<Self> {
        config.validate()?;
        self.config = config;
        Ok(self)
    }

    // ===== SETUP =====

    /// Add a stack to the attacker side; unknown creatures and empty stacks are ignored
    pub fn add_player_unit(&mut self, creature_id: CreatureId, count: u32) {
        if let Err(e) = self.try_add_player_unit(creature_id, count) {
            tracing::warn!(%creature_id, count, error = %e, "Ignoring attacker stack");
        }
    }

    /// Add a stack to the defender side; unknown creatures and empty stacks are ignored
    pub fn add_enemy_unit(&mut self, creature_id: CreatureId, count: u32) {
        if let Err(e) = self.try_add_enemy_unit(creature_id, count) {
            tracing::warn!(%creature_id, count, error = %e, "Ignoring defender stack");
        }
    }

    pub fn try_add_player_unit(&mut self, creature_id: CreatureId, count: u32) -> Result<()> {
        self.try_add_unit(Side::Attacker, creature_id, count)
    }

    pub fn try_add_enemy_unit(&mut self, creature_id: CreatureId, count: u32) -> Result<()> {
        self.try_add_unit(Side::Defender, creature_id, count)
    }

    fn try_add_unit(&mut self, side: Side, creature_id: CreatureId, count: u32) -> Result<()> {
        if self.phase == BattlePhase::Ended {
            return Err(EldoriaError::BattleFinished);
        }
        let creature = self
            .catalog
            .get(creature_id)
            .ok_or(EldoriaError::CreatureNotFound(creature_id))?;
        if count == 0 {
            return Err(EldoriaError::InvalidCount(count));
        }

        let unit = BattleUnit::new(creature, count, side);
        match side {
            Side::Attacker => self.player_units.push(unit),
            Side::Defender => self.enemy_units.push(unit),
        }
        Ok(())
    }

    // ===== EXECUTION =====

    /// Manual battle entry point; currently resolves automatically
    pub fn execute_battle(&mut self) -> BattleResult {
        self.execute_auto_battle()
    }

    /// Run the battle to completion (or the round cap) and return the result
    ///
    /// Calling it again on a finished battle returns the same result.
    pub fn execute_auto_battle(&mut self) -> BattleResult {
        if let Some(result) = self.outcome {
            return result;
        }

        self.start();
        loop {
            if let Some(result) = self.step() {
                return result;
            }
        }
    }

    /// Start the battle (transition from not started to active)
    pub fn start(&mut self) {
        if self.phase != BattlePhase::NotStarted {
            return;
        }

        let dead_players = prune_dead(&mut self.player_units);
        let dead_enemies = prune_dead(&mut self.enemy_units);
        self.fallen_player_units.extend(dead_players);
        self.fallen_enemy_units.extend(dead_enemies);

        self.phase = BattlePhase::Active;
        self.log.push(
            BattleEventKind::BattleStarted {
                attacker_stacks: self.player_units.len(),
                defender_stacks: self.enemy_units.len(),
            },
            "Battle has begun!".into(),
            self.round,
        );
        tracing::info!(
            attacker_stacks = self.player_units.len(),
            defender_stacks = self.enemy_units.len(),
            hero_attack = self.hero.map(|h| h.attack),
            "Battle started"
        );
    }

    /// Run a single round, starting the battle if needed
    ///
    /// Returns the result once the battle has ended, `None` while it goes on.
    pub fn execute_round(&mut self) -> Result<Option<BattleResult>> {
        if self.phase == BattlePhase::Ended {
            return Err(EldoriaError::BattleFinished);
        }
        self.start();
        Ok(self.step())
    }

    /// Retreat the attacker; the battle ends immediately with `Flee`
    pub fn flee(&mut self) -> Result<BattleResult> {
        if self.phase == BattlePhase::Ended {
            return Err(EldoriaError::BattleFinished);
        }

        self.log
            .push(BattleEventKind::Retreated, "The attacker retreats!".into(), self.round);
        Ok(self.conclude(BattleResult::Flee))
    }

    /// End the battle now, resolving the result from the current rosters
    pub fn end_battle(&mut self) -> BattleResult {
        match self.outcome {
            Some(result) => result,
            None => {
                let result = self.determine_battle_result();
                self.conclude(result)
            }
        }
    }

    fn step(&mut self) -> Option<BattleResult> {
        self.run_round();

        if self.check_battle_end() {
            return Some(self.end_battle());
        }
        if self.round >= self.config.max_rounds {
            self.hit_round_cap = true;
            tracing::debug!(round = self.round, "Round cap reached");
            return Some(self.end_battle());
        }
        None
    }

    fn run_round(&mut self) {
        self.round += 1;
        self.log.push(
            BattleEventKind::RoundStarted,
            format!("Round {}", self.round),
            self.round,
        );
        tracing::debug!(round = self.round, "Round started");

        self.half_round(Side::Attacker);
        self.half_round(Side::Defender);
    }

    /// Every living stack of `side` attacks once, then the other side's dead are pruned
    fn half_round(&mut self, side: Side) {
        let (acting, targets, fallen) = match side {
            Side::Attacker => (
                &self.player_units,
                &mut self.enemy_units,
                &mut self.fallen_enemy_units,
            ),
            Side::Defender => (
                &self.enemy_units,
                &mut self.player_units,
                &mut self.fallen_player_units,
            ),
        };
        let catalog = self.catalog;

        for attacker in acting.iter().filter(|u| u.is_alive()) {
            let Some(index) = select_weakest_target(targets, catalog) else {
                continue;
            };

            let damage = calculate_stack_damage(
                attacker,
                &targets[index],
                catalog,
                self.hero,
                &self.config,
                &mut self.rng,
            );

            let target = &mut targets[index];
            let hit_points = catalog.get(target.creature_id).map_or(0, |c| c.hit_points);
            let outcome = apply_damage(target, damage, hit_points);

            let attacker_name = creature_name(catalog, attacker.creature_id);
            let target_name = creature_name(catalog, target.creature_id);
            tracing::debug!(
                round = self.round,
                %side,
                attacker = %attacker_name,
                target = %target_name,
                damage,
                killed = outcome.killed,
                "Stack attacked"
            );
            self.log.push(
                BattleEventKind::Attack {
                    side,
                    attacker: attacker.creature_id,
                    target: target.creature_id,
                    damage,
                    killed: outcome.killed,
                },
                format!(
                    "{} attacks {} for {} damage!",
                    attacker_name, target_name, damage
                ),
                self.round,
            );

            if outcome.destroyed {
                tracing::debug!(
                    round = self.round,
                    side = %side.opponent(),
                    creature = %target_name,
                    "Stack destroyed"
                );
                self.log.push(
                    BattleEventKind::StackDestroyed {
                        side: side.opponent(),
                        creature: target.creature_id,
                    },
                    format!("{} stack destroyed", target_name),
                    self.round,
                );
            }
        }

        fallen.extend(prune_dead(targets));
    }

    fn conclude(&mut self, result: BattleResult) -> BattleResult {
        self.phase = BattlePhase::Ended;
        self.outcome = Some(result);
        self.log.push(
            BattleEventKind::BattleEnded { result },
            format!("Battle ended: {:?}", result),
            self.round,
        );
        tracing::info!(
            ?result,
            rounds = self.round,
            hit_round_cap = self.hit_round_cap,
            experience = self.calculate_experience_gained(),
            "Battle ended"
        );
        result
    }

    // ===== STATE =====

    /// Has either side run out of living stacks?
    pub fn check_battle_end(&self) -> bool {
        !has_living(&self.player_units) || !has_living(&self.enemy_units)
    }

    /// Victory while the attacker has a living stack, Defeat otherwise
    pub fn determine_battle_result(&self) -> BattleResult {
        if has_living(&self.player_units) {
            BattleResult::Victory
        } else {
            BattleResult::Defeat
        }
    }

    /// Final result once ended, otherwise the result the rosters imply now
    pub fn battle_result(&self) -> BattleResult {
        self.outcome
            .unwrap_or_else(|| self.determine_battle_result())
    }

    pub fn is_battle_active(&self) -> bool {
        self.phase == BattlePhase::Active
    }

    pub fn phase(&self) -> BattlePhase {
        self.phase
    }

    /// Rounds executed so far
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn hit_round_cap(&self) -> bool {
        self.hit_round_cap
    }

    pub fn player_units(&self) -> &[BattleUnit] {
        &self.player_units
    }

    pub fn enemy_units(&self) -> &[BattleUnit] {
        &self.enemy_units
    }

    pub fn events(&self) -> &BattleEventLog {
        &self.log
    }

    pub fn config(&self) -> &BattleConfig {
        &self.config
    }

    pub fn catalog(&self) -> &'a CreatureCatalog {
        self.catalog
    }

    pub fn hero(&self) -> Option<HeroBonus> {
        self.hero
    }

    // ===== RESULTS =====

    /// Experience for the attacker under the configured policy
    pub fn calculate_experience_gained(&self) -> u64 {
        calculate_experience(
            self.config.experience,
            &self.enemy_units,
            &self.fallen_enemy_units,
            self.catalog,
        )
    }

    /// Individuals lost by one side, pruned stacks included
    pub fn casualties(&self, side: Side) -> u32 {
        let (roster, fallen) = match side {
            Side::Attacker => (&self.player_units, &self.fallen_player_units),
            Side::Defender => (&self.enemy_units, &self.fallen_enemy_units),
        };
        roster.iter().chain(fallen).map(BattleUnit::casualties).sum()
    }

    pub fn report(&self) -> BattleReport {
        BattleReport {
            result: self.battle_result(),
            rounds: self.round,
            hit_round_cap: self.hit_round_cap,
            attacker_survivors: self
                .player_units
                .iter()
                .filter(|u| u.is_alive())
                .cloned()
                .collect(),
            defender_survivors: self
                .enemy_units
                .iter()
                .filter(|u| u.is_alive())
                .cloned()
                .collect(),
            attacker_casualties: self.casualties(Side::Attacker),
            defender_casualties: self.casualties(Side::Defender),
            experience: self.calculate_experience_gained(),
        }
    }
}

fn creature_name(catalog: &CreatureCatalog, id: CreatureId) -> String {
    catalog
        .get(id)
        .map_or_else(|| id.to_string(), |c| c.name.clone())
}
