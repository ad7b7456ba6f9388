//! Experience awarded for the defenders a battle cost

use crate::battle::units::BattleUnit;
use crate::core::config::ExperiencePolicy;
use crate::creature::CreatureCatalog;

/// Experience earned from the defender side
///
/// `roster` is the defender roster as it stands; `fallen` holds the defender
/// stacks pruned during the battle. Stacks whose creature is unknown to the
/// catalog are worth nothing.
pub fn calculate_experience(
    policy: ExperiencePolicy,
    roster: &[BattleUnit],
    fallen: &[BattleUnit],
    catalog: &CreatureCatalog,
) -> u64 {
    match policy {
        ExperiencePolicy::Casualties => roster
            .iter()
            .chain(fallen)
            .filter_map(|unit| {
                let creature = catalog.get(unit.creature_id)?;
                Some(u64::from(creature.ai_value) * u64::from(unit.casualties()))
            })
            .sum(),

        ExperiencePolicy::Legacy { assumed_stack_size } => roster
            .iter()
            .filter_map(|unit| {
                let creature = catalog.get(unit.creature_id)?;
                let defeated = assumed_stack_size.saturating_sub(unit.count);
                Some(u64::from(creature.ai_value) * u64::from(defeated))
            })
            .sum(),
    }
}
