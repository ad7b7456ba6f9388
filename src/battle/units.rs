//! Battle stacks: one entry per army slot on each side
//!
//! A stack tracks how many individuals are alive and the remaining hit
//! points of the wounded one at its head. Aggregate health is derived from
//! the catalog, never stored.

use serde::{Deserialize, Serialize};

use crate::core::types::{CreatureId, Side};
use crate::creature::Creature;

/// One stack of identical creatures fighting on one side
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleUnit {
    pub creature_id: CreatureId,
    /// Living individuals; 0 means the stack is dead
    pub count: u32,
    /// Hit points of the lead individual, in (0, hit_points] while alive
    pub current_health: u32,
    pub is_player_controlled: bool,
    /// Size of the stack when it was deployed
    pub initial_count: u32,
}

impl BattleUnit {
    pub fn new(creature: &Creature, count: u32, side: Side) -> Self {
        Self {
            creature_id: creature.id,
            count,
            current_health: creature.hit_points,
            is_player_controlled: side.is_player_controlled(),
            initial_count: count,
        }
    }

    pub fn side(&self) -> Side {
        if self.is_player_controlled {
            Side::Attacker
        } else {
            Side::Defender
        }
    }

    pub fn is_alive(&self) -> bool {
        self.count > 0
    }

    /// Individuals lost since deployment
    pub fn casualties(&self) -> u32 {
        self.initial_count.saturating_sub(self.count)
    }

    /// Health used for target selection: every individual at full hit points
    pub fn nominal_health(&self, hit_points: u32) -> u64 {
        u64::from(hit_points) * u64::from(self.count)
    }

    /// Exact health left, counting the wounded lead individual
    pub fn remaining_health(&self, hit_points: u32) -> u64 {
        if self.count == 0 {
            return 0;
        }
        u64::from(hit_points) * u64::from(self.count - 1) + u64::from(self.current_health)
    }

    pub fn is_wounded(&self, hit_points: u32) -> bool {
        self.is_alive() && self.current_health < hit_points
    }
}

/// Does any stack in the roster still have living individuals?
pub fn has_living(units: &[BattleUnit]) -> bool {
    units.iter().any(BattleUnit::is_alive)
}

/// Remove dead stacks from the roster, preserving order, and return them
pub fn prune_dead(units: &mut Vec<BattleUnit>) -> Vec<BattleUnit> {
    let (alive, dead): (Vec<_>, Vec<_>) = std::mem::take(units)
        .into_iter()
        .partition(BattleUnit::is_alive);
    *units = alive;
    dead
}
