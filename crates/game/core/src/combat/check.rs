//! d20 skill checks (flee attempts, hazards).

/// Outcome of a skill check.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillCheck {
    pub roll: u32,
    pub total: u32,
    pub difficulty: u32,
    pub passed: bool,
}

/// Resolves `roll + modifier` against `difficulty`; ties succeed.
pub fn skill_check(roll: u32, modifier: u32, difficulty: u32) -> SkillCheck {
    let total = roll + modifier;
    SkillCheck {
        roll,
        total,
        difficulty,
        passed: total >= difficulty,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_twenty_escapes_default_flee() {
        // leader atk 2 vs enemy atk 2: difficulty 12 + 2
        let check = skill_check(20, 2, 14);
        assert_eq!(check.total, 22);
        assert!(check.passed);
    }

    #[test]
    fn tie_passes() {
        assert!(skill_check(10, 4, 14).passed);
        assert!(!skill_check(9, 4, 14).passed);
    }
}
