//! Hero army: seven slots of creature stacks carried between battles

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::battle::{BattleEngine, BattleUnit};
use crate::core::types::CreatureId;

/// Slots in a hero's army
pub const MAX_SLOTS: usize = 7;

/// One occupied army slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmySlot {
    pub creature_id: CreatureId,
    pub count: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Army {
    slots: [Option<ArmySlot>; MAX_SLOTS],
}

impl Army {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slot(&self, index: usize) -> Option<&ArmySlot> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    /// Occupied slots with their indices
    pub fn occupied(&self) -> impl Iterator<Item = (usize, &ArmySlot)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|s| (i, s)))
    }

    /// Merge into the slot already holding this creature, else take the first
    /// empty slot. Returns false when neither exists.
    pub fn add_creatures(&mut self, creature_id: CreatureId, count: u32) -> bool {
        if count == 0 {
            return false;
        }

        if let Some(slot) = self
            .slots
            .iter_mut()
            .flatten()
            .find(|s| s.creature_id == creature_id)
        {
            slot.count = slot.count.saturating_add(count);
            return true;
        }

        match self.slots.iter_mut().find(|s| s.is_none()) {
            Some(empty) => {
                *empty = Some(ArmySlot { creature_id, count });
                true
            }
            None => false,
        }
    }

    /// Take `count` creatures out of a slot; the slot empties at zero
    pub fn remove_creatures(&mut self, slot_index: usize, count: u32) -> bool {
        let Some(entry) = self.slots.get_mut(slot_index) else {
            return false;
        };
        let Some(slot) = entry.as_mut() else {
            return false;
        };
        if slot.count < count {
            return false;
        }

        slot.count -= count;
        if slot.count == 0 {
            *entry = None;
        }
        true
    }

    pub fn total_creature_count(&self) -> u64 {
        self.occupied().map(|(_, s)| u64::from(s.count)).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    pub fn is_full(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    /// Put every occupied slot on the battlefield as an attacker stack
    pub fn deploy<R: Rng>(&self, engine: &mut BattleEngine<'_, R>) {
        for (_, slot) in self.occupied() {
            engine.add_player_unit(slot.creature_id, slot.count);
        }
    }

    /// Replace the army with the stacks that survived a battle
    ///
    /// Slots are refilled in roster order; dead stacks are skipped and
    /// anything past the seventh survivor is lost.
    pub fn replace_with_survivors(&mut self, survivors: &[BattleUnit]) {
        self.slots = Default::default();

        let alive = survivors.iter().filter(|u| u.is_alive());
        for (slot, unit) in self.slots.iter_mut().zip(alive) {
            *slot = Some(ArmySlot {
                creature_id: unit.creature_id,
                count: unit.count,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::types::Side;
    use crate::creature::CreatureCatalog;

    #[test]
    fn test_add_merges_same_creature() {
        let mut army = Army::new();
        assert!(army.add_creatures(CreatureId(1), 10));
        assert!(army.add_creatures(CreatureId(2), 3));
        assert!(army.add_creatures(CreatureId(1), 5));

        assert_eq!(army.slot(0).unwrap().count, 15);
        assert_eq!(army.slot(1).unwrap().creature_id, CreatureId(2));
        assert!(army.slot(2).is_none());
        assert_eq!(army.total_creature_count(), 18);
    }

    #[test]
    fn test_add_fails_when_full() {
        let mut army = Army::new();
        for id in 1..=7 {
            assert!(army.add_creatures(CreatureId(id), 1));
        }
        assert!(army.is_full());
        assert!(!army.add_creatures(CreatureId(8), 1));
        // Merging still works in a full army
        assert!(army.add_creatures(CreatureId(3), 4));
        assert_eq!(army.slot(2).unwrap().count, 5);
    }

    #[test]
    fn test_add_zero_rejected() {
        let mut army = Army::new();
        assert!(!army.add_creatures(CreatureId(1), 0));
        assert!(army.is_empty());
    }

    #[test]
    fn test_remove_creatures() {
        let mut army = Army::new();
        army.add_creatures(CreatureId(1), 10);

        assert!(!army.remove_creatures(0, 11));
        assert!(!army.remove_creatures(3, 1));
        assert!(!army.remove_creatures(MAX_SLOTS, 1));

        assert!(army.remove_creatures(0, 4));
        assert_eq!(army.slot(0).unwrap().count, 6);

        assert!(army.remove_creatures(0, 6));
        assert!(army.slot(0).is_none());
        assert!(army.is_empty());
    }

    #[test]
    fn test_removed_slot_is_reused() {
        let mut army = Army::new();
        army.add_creatures(CreatureId(1), 2);
        army.add_creatures(CreatureId(2), 2);
        army.remove_creatures(0, 2);

        army.add_creatures(CreatureId(5), 9);
        assert_eq!(army.slot(0).unwrap().creature_id, CreatureId(5));
    }

    #[test]
    fn test_replace_with_survivors() {
        let catalog = CreatureCatalog::classic();
        let peasant = catalog.get(CreatureId(1)).unwrap();
        let archer = catalog.get(CreatureId(2)).unwrap();

        let mut dead = BattleUnit::new(peasant, 5, Side::Attacker);
        dead.count = 0;
        let survivors = vec![
            BattleUnit::new(archer, 4, Side::Attacker),
            dead,
            BattleUnit::new(peasant, 12, Side::Attacker),
        ];

        let mut army = Army::new();
        for id in 1..=7 {
            army.add_creatures(CreatureId(id), 1);
        }
        army.replace_with_survivors(&survivors);

        assert_eq!(
            army.slot(0),
            Some(&ArmySlot {
                creature_id: CreatureId(2),
                count: 4
            })
        );
        assert_eq!(army.slot(1).unwrap().count, 12);
        assert!(army.slot(2).is_none());
        assert_eq!(army.total_creature_count(), 16);
    }

    #[test]
    fn test_deploy_adds_player_stacks() {
        let catalog = CreatureCatalog::classic();
        let mut army = Army::new();
        army.add_creatures(CreatureId(2), 6);
        army.add_creatures(CreatureId(1), 20);

        let mut engine = BattleEngine::with_seed(&catalog, None, 1);
        army.deploy(&mut engine);

        let units = engine.player_units();
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].creature_id, CreatureId(2));
        assert_eq!(units[1].count, 20);
        assert!(units.iter().all(|u| u.is_player_controlled));
    }
}
