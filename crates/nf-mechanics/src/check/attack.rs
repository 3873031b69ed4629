//! Attack lethality.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::items::{DamageType, WeaponSnapshot};
use crate::rules::DiceRules;

/// Skill name reported for an unskilled attack.
pub const NO_SKILL: &str = "No skill!";

/// How dangerous a landed attack is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    /// Amount the raw die total beat the success threshold by.
    pub excess: i32,
    /// Weapon damage plus excess; the defender's save must beat this.
    pub lethality: i32,
    /// The weapon's (or ammo's) damage for the attack's damage type.
    pub weapon_damage: i32,
    /// Skill used, or [`NO_SKILL`].
    pub skill_name: String,
    /// Skill level, 0 when unskilled.
    pub skill_level: i32,
}

impl AttackOutcome {
    /// Compute lethality with the default rules.
    pub fn compute(
        roll_total: i32,
        weapon: &WeaponSnapshot,
        damage_type: DamageType,
        skill: Option<(&str, i32)>,
    ) -> MechResult<Self> {
        Self::compute_with(&DiceRules::default(), roll_total, weapon, damage_type, skill)
    }

    /// Compute lethality with explicit rules.
    ///
    /// `roll_total` is the raw die total; skill and trait never feed into
    /// lethality.
    pub fn compute_with(
        rules: &DiceRules,
        roll_total: i32,
        weapon: &WeaponSnapshot,
        damage_type: DamageType,
        skill: Option<(&str, i32)>,
    ) -> MechResult<Self> {
        let weapon_damage = weapon.damage_for(damage_type)?;
        let excess = rules.excess(roll_total);
        let lethality = weapon_damage
            .checked_add(excess)
            .ok_or(MechError::Overflow("lethality"))?;
        let (skill_name, skill_level) = match skill {
            Some((name, level)) => (name.to_string(), level),
            None => (NO_SKILL.to_string(), 0),
        };

        tracing::debug!(
            weapon = %weapon.name,
            %damage_type,
            weapon_damage,
            excess,
            "attack resolved"
        );

        Ok(Self {
            excess,
            lethality,
            weapon_damage,
            skill_name,
            skill_level,
        })
    }
}
