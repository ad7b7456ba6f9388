//! Target selection for auto-battle stacks

use crate::battle::units::BattleUnit;
use crate::creature::CreatureCatalog;

/// Pick the living stack with the least nominal health (hit points × count)
///
/// Ties go to the earliest stack in roster order. Returns `None` when no
/// stack is alive, which means the acting stack skips its attack.
pub fn select_weakest_target(targets: &[BattleUnit], catalog: &CreatureCatalog) -> Option<usize> {
    let mut best: Option<(usize, u64)> = None;

    for (index, unit) in targets.iter().enumerate() {
        if !unit.is_alive() {
            continue;
        }
        let Some(creature) = catalog.get(unit.creature_id) else {
            continue;
        };

        let health = unit.nominal_health(creature.hit_points);
        if best.map_or(true, |(_, lowest)| health < lowest) {
            best = Some((index, health));
        }
    }

    best.map(|(index, _)| index)
}
