//! Damage calculation.

use crate::state::CombatStatus;

/// Flat offset subtracted from every `stat + roll` hit.
const HIT_OFFSET: u32 = 3;

/// Damage of a player hit.
///
/// ```text
/// damage = max(1, stat + roll - 3)
/// ```
pub fn attack_damage(stat: u32, roll: u32) -> u32 {
    (stat + roll).saturating_sub(HIT_OFFSET).max(1)
}

/// Damage of an enemy hit, consuming one-shot modifiers from `status`.
///
/// The base `max(1, atk + roll - 3)` is first reduced by the shield
/// amount, then halved rounding up if the leader is defending. Both
/// modifiers are cleared once applied.
pub fn enemy_damage(enemy_atk: u32, roll: u32, status: &mut CombatStatus) -> u32 {
    let mut damage = attack_damage(enemy_atk, roll);

    if status.damage_reduction > 0 {
        damage = damage.saturating_sub(status.damage_reduction);
        status.damage_reduction = 0;
    }

    if status.defending() {
        damage = damage.div_ceil(2);
        status.flags.remove(crate::state::StatusFlags::DEFENDING);
    }

    damage
}

/// Damage taken when a flee attempt fails: `max(1, enemy_atk - 1)`.
pub fn flee_failure_damage(enemy_atk: u32) -> u32 {
    enemy_atk.saturating_sub(1).max(1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::StatusFlags;

    #[test]
    fn attack_damage_has_floor_of_one() {
        assert_eq!(attack_damage(0, 1), 1);
        assert_eq!(attack_damage(3, 6), 6);
    }

    #[test]
    fn shield_then_defend_rounds_up() {
        let mut status = CombatStatus {
            flags: StatusFlags::DEFENDING,
            damage_reduction: 2,
        };
        // base = 4 + 6 - 3 = 7, shield -> 5, defend -> 3
        assert_eq!(enemy_damage(4, 6, &mut status), 3);
        assert_eq!(status, CombatStatus::default());
    }

    #[test]
    fn shield_can_absorb_whole_hit() {
        let mut status = CombatStatus {
            flags: StatusFlags::empty(),
            damage_reduction: 10,
        };
        assert_eq!(enemy_damage(2, 2, &mut status), 0);
    }

    #[test]
    fn flee_failure_damage_floor() {
        assert_eq!(flee_failure_damage(0), 1);
        assert_eq!(flee_failure_damage(1), 1);
        assert_eq!(flee_failure_damage(5), 4);
    }
}
