//! Hero army and progression across battles

use eldoria::battle::BattleResult;
use eldoria::core::config::BattleConfig;
use eldoria::core::types::CreatureId;
use eldoria::creature::CreatureCatalog;
use eldoria::hero::{experience_for_level, Hero, MAX_SLOTS};

const PEASANT: CreatureId = CreatureId(1);
const ARCHER: CreatureId = CreatureId(2);

#[test]
fn test_victory_grants_experience_and_keeps_survivors() {
    let catalog = CreatureCatalog::classic();
    let mut hero = Hero::new("Orrin", 2, 1);
    hero.army.add_creatures(ARCHER, 30);

    let mut engine = hero.prepare_battle(&catalog, 12);
    engine.add_enemy_unit(PEASANT, 80);
    assert_eq!(engine.execute_auto_battle(), BattleResult::Victory);

    let experience = engine.calculate_experience_gained();
    assert_eq!(experience, 80 * 15);

    hero.conclude_battle(&engine).unwrap();

    assert_eq!(hero.experience, 1200);
    assert_eq!(hero.level, 2);
    assert_eq!(hero.attack, 3);
    let survivors = engine.player_units()[0].count;
    assert_eq!(hero.army.slot(0).unwrap().count, survivors);
    assert!(hero.army.slot(1).is_none());
}

#[test]
fn test_defeat_grants_no_experience() {
    let catalog = CreatureCatalog::classic();
    let mut hero = Hero::new("Orrin", 0, 0);
    hero.army.add_creatures(ARCHER, 3);

    let mut engine = hero.prepare_battle(&catalog, 7);
    engine.add_enemy_unit(PEASANT, 500);
    assert_eq!(engine.execute_auto_battle(), BattleResult::Defeat);

    // The archers take at least four peasants down before they fall
    assert!(engine.calculate_experience_gained() > 0);

    assert_eq!(hero.conclude_battle(&engine).unwrap(), 0);
    assert!(hero.army.is_empty());
    assert_eq!(hero.experience, 0);
    assert_eq!(hero.level, 1);
}

#[test]
fn test_survivors_fill_at_most_seven_slots() {
    let catalog = CreatureCatalog::classic();
    let mut hero = Hero::new("Orrin", 10, 0);
    // Same creature always merges into the first slot
    for _ in 0..MAX_SLOTS {
        assert!(hero.army.add_creatures(ARCHER, 1));
    }
    assert_eq!(hero.army.occupied().count(), 1);

    let mut engine = hero.prepare_battle(&catalog, 8);
    // Extra stacks beyond the army's slots
    for _ in 0..9 {
        engine.add_player_unit(ARCHER, 5);
    }
    engine.add_enemy_unit(PEASANT, 1);
    engine.execute_auto_battle();
    assert_eq!(engine.player_units().len(), 10);

    hero.conclude_battle(&engine).unwrap();

    assert!(hero.army.is_full());
    assert_eq!(hero.army.slot(0).unwrap().count, 7);
    assert_eq!(hero.army.total_creature_count(), 7 + 6 * 5);
}

#[test]
fn test_hero_attack_carries_into_battle() {
    let catalog = CreatureCatalog::classic();
    let hero = Hero::new("Orrin", 7, 0);
    let engine = hero.prepare_battle(&catalog, 1);
    assert_eq!(engine.hero().map(|h| h.attack), Some(7));
}

#[test]
fn test_level_thresholds_follow_curve() {
    let mut hero = Hero::new("Orrin", 0, 0);
    let gained = hero.gain_experience(experience_for_level(6));
    assert_eq!(gained, 5);
    assert_eq!(hero.level, 6);
    assert_eq!((hero.attack, hero.defense), (5, 5));

    // One short of the next level
    hero.gain_experience(experience_for_level(7) - hero.experience - 1);
    assert_eq!(hero.level, 6);
}

#[test]
fn test_round_config_does_not_change_army_rules() {
    let catalog = CreatureCatalog::classic();
    let mut hero = Hero::new("Orrin", 0, 0);
    hero.army.add_creatures(PEASANT, 10);

    let engine = hero
        .prepare_battle(&catalog, 1)
        .with_config(BattleConfig {
            max_rounds: 1,
            ..BattleConfig::default()
        })
        .unwrap();
    assert_eq!(engine.player_units().len(), 1);
    assert_eq!(engine.config().max_rounds, 1);
}
