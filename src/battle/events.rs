//! Battle event log
//!
//! The engine records what happened in order so a display layer can replay
//! a battle round by round without touching the engine's internals.

use serde::{Deserialize, Serialize};

use crate::core::types::{CreatureId, Side};

use super::execution::BattleResult;

/// Log entry for battle events
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleEvent {
    /// Round the event happened in (0 before the first round)
    pub round: u32,
    pub kind: BattleEventKind,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum BattleEventKind {
    BattleStarted {
        attacker_stacks: usize,
        defender_stacks: usize,
    },
    RoundStarted,
    Attack {
        side: Side,
        attacker: CreatureId,
        target: CreatureId,
        damage: u32,
        killed: u32,
    },
    StackDestroyed {
        side: Side,
        creature: CreatureId,
    },
    Retreated,
    BattleEnded {
        result: BattleResult,
    },
}

/// Ordered log of events for one battle
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BattleEventLog {
    pub events: Vec<BattleEvent>,
}

impl BattleEventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, kind: BattleEventKind, description: String, round: u32) {
        self.events.push(BattleEvent {
            round,
            kind,
            description,
        });
    }

    /// Events of a single round
    pub fn for_round(&self, round: u32) -> impl Iterator<Item = &BattleEvent> {
        self.events.iter().filter(move |e| e.round == round)
    }

    /// Total damage dealt by one side over the whole battle
    pub fn damage_dealt_by(&self, side: Side) -> u64 {
        self.events
            .iter()
            .filter_map(|e| match e.kind {
                BattleEventKind::Attack {
                    side: s, damage, ..
                } if s == side => Some(u64::from(damage)),
                _ => None,
            })
            .sum()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attack(side: Side, damage: u32) -> BattleEventKind {
        BattleEventKind::Attack {
            side,
            attacker: CreatureId(1),
            target: CreatureId(2),
            damage,
            killed: 0,
        }
    }

    #[test]
    fn test_for_round_filters() {
        let mut log = BattleEventLog::new();
        log.push(BattleEventKind::RoundStarted, "Round 1".into(), 1);
        log.push(attack(Side::Attacker, 5), "hit".into(), 1);
        log.push(BattleEventKind::RoundStarted, "Round 2".into(), 2);

        assert_eq!(log.for_round(1).count(), 2);
        assert_eq!(log.for_round(2).count(), 1);
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_damage_dealt_by_side() {
        let mut log = BattleEventLog::new();
        log.push(attack(Side::Attacker, 5), "a".into(), 1);
        log.push(attack(Side::Defender, 3), "b".into(), 1);
        log.push(attack(Side::Attacker, 7), "c".into(), 2);

        assert_eq!(log.damage_dealt_by(Side::Attacker), 12);
        assert_eq!(log.damage_dealt_by(Side::Defender), 3);
    }
}
