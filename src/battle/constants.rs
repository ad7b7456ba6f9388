//! Battle system constants - default values for `BattleConfig`

// Flow
pub const MAX_ROUNDS: u32 = 20;

// Damage
pub const DAMAGE_VARIANCE_MIN: f32 = 0.8;
pub const DAMAGE_VARIANCE_MAX: f32 = 1.2;
pub const ATTACK_ADVANTAGE_SCALE: f32 = 0.1;
pub const HERO_ATTACK_BONUS_PER_POINT: f32 = 0.05;
pub const MIN_DAMAGE: u32 = 1;

// Experience
pub const LEGACY_ASSUMED_STACK_SIZE: u32 = 5;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_variance_band_brackets_one() {
        assert!(DAMAGE_VARIANCE_MIN < 1.0);
        assert!(DAMAGE_VARIANCE_MAX > 1.0);
    }

    #[test]
    fn test_round_cap_positive() {
        assert!(MAX_ROUNDS > 0);
        assert!(MIN_DAMAGE >= 1);
    }
}
