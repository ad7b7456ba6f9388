//! Core type definitions used throughout the codebase

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a creature type in the catalog
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CreatureId(pub u32);

impl CreatureId {
    pub fn new(id: u32) -> Self {
        Self(id)
    }
}

impl fmt::Display for CreatureId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Town alignment a creature is recruited from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Faction {
    Castle,
    Rampart,
    Tower,
    Inferno,
    Necropolis,
    Dungeon,
    Stronghold,
    Fortress,
    #[default]
    Neutral,
}

/// Resource bundle (recruitment cost)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Resources {
    pub gold: u32,
    pub wood: u32,
    pub ore: u32,
    pub mercury: u32,
    pub sulfur: u32,
    pub crystal: u32,
    pub gems: u32,
}

impl Resources {
    pub fn gold(amount: u32) -> Self {
        Self {
            gold: amount,
            ..Self::default()
        }
    }

    pub fn is_free(&self) -> bool {
        *self == Self::default()
    }
}

/// Side of a battle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// The hero's side; always acts first in a round
    Attacker,
    Defender,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Attacker => Side::Defender,
            Side::Defender => Side::Attacker,
        }
    }

    pub fn is_player_controlled(self) -> bool {
        matches!(self, Side::Attacker)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Attacker => write!(f, "attacker"),
            Side::Defender => write!(f, "defender"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_creature_id_equality() {
        let a = CreatureId(1);
        let b = CreatureId(1);
        let c = CreatureId(2);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_creature_id_hash() {
        use std::collections::HashMap;
        let mut map: HashMap<CreatureId, &str> = HashMap::new();
        map.insert(CreatureId(2), "archer");
        assert_eq!(map.get(&CreatureId(2)), Some(&"archer"));
    }

    #[test]
    fn test_side_opponent() {
        assert_eq!(Side::Attacker.opponent(), Side::Defender);
        assert_eq!(Side::Defender.opponent(), Side::Attacker);
        assert!(Side::Attacker.is_player_controlled());
        assert!(!Side::Defender.is_player_controlled());
    }

    #[test]
    fn test_resources_gold_only() {
        let cost = Resources::gold(100);
        assert_eq!(cost.gold, 100);
        assert_eq!(cost.wood, 0);
        assert!(!cost.is_free());
        assert!(Resources::default().is_free());
    }
}
