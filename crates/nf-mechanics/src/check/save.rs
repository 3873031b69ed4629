//! Physical-damage saving throws.
//!
//! Armor and a raised shield first lower the attack's lethality. The save
//! roll plus the trait is then compared against the mitigated lethality:
//!
//! | Condition (first match wins)                    | Outcome     | Wounds |
//! |-------------------------------------------------|-------------|--------|
//! | mitigated lethality < 1                         | Perfection  | 0      |
//! | roll >= lethality + 10                          | Perfection  | 0      |
//! | roll > lethality                                | Success     | 1      |
//! | roll < lethality - 10, and lethality - 10 > 0   | Fumble      | 6      |
//! | roll < lethality                                | Failure     | 2      |
//! | roll == lethality                               | Status Quo  | 2      |
//!
//! A raw die total of exactly 0 is always a Failure.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};
use crate::items::{ArmorSnapshot, DamageType, ShieldSnapshot};
use crate::rules::DiceRules;

/// The narrative tier of a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SaveTag {
    /// Untouched.
    Perfection,
    /// Grazed.
    Success,
    /// Neither side gains ground.
    StatusQuo,
    /// Hurt.
    Failure,
    /// Badly hurt.
    Fumble,
}

impl SaveTag {
    /// Wounds inflicted by this outcome.
    pub fn wounds(self) -> u32 {
        match self {
            Self::Perfection => 0,
            Self::Success => 1,
            Self::StatusQuo | Self::Failure => 2,
            Self::Fumble => 6,
        }
    }
}

impl std::fmt::Display for SaveTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Perfection => write!(f, "Perfection"),
            Self::Success => write!(f, "Success"),
            Self::StatusQuo => write!(f, "Status Quo"),
            Self::Failure => write!(f, "Failure"),
            Self::Fumble => write!(f, "Fumble"),
        }
    }
}

/// What stands between the defender and the attack.
#[derive(Debug, Clone, Copy, Default)]
pub struct Protection<'a> {
    /// The damage type being saved against.
    pub damage_type: Option<DamageType>,
    /// Worn armor.
    pub armor: Option<&'a ArmorSnapshot>,
    /// Carried shield.
    pub shield: Option<&'a ShieldSnapshot>,
    /// Whether the shield is raised for this save.
    pub using_shield: bool,
}

impl Protection<'_> {
    /// Total protection against the damage type.
    ///
    /// Unarmored saves need no damage type. Consulting armor or a shield
    /// without one is an invalid request.
    pub fn total(&self) -> MechResult<i32> {
        if self.using_shield && self.shield.is_none() {
            return Err(MechError::InvalidRequest(
                "save uses a shield but no shield was given".to_string(),
            ));
        }
        let shield = self.shield.filter(|_| self.using_shield);
        if self.armor.is_none() && shield.is_none() {
            return Ok(0);
        }

        let damage_type = self.damage_type.ok_or_else(|| {
            MechError::InvalidRequest("save against armor needs a damage type".to_string())
        })?;

        let mut total = 0i32;
        if let Some(shield) = shield {
            total = total
                .checked_add(shield.protection_for(damage_type)?)
                .ok_or(MechError::Overflow("protection"))?;
        }
        if let Some(armor) = self.armor {
            total = total
                .checked_add(armor.protection_for(damage_type)?)
                .ok_or(MechError::Overflow("protection"))?;
        }
        Ok(total)
    }
}

/// The result of a save.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaveOutcome {
    /// Outcome tier.
    pub tag: SaveTag,
    /// Wounds the defender takes.
    pub wounds: u32,
    /// Lethality after armor and shield, never negative.
    pub mitigated_lethality: i32,
    /// Raw roll plus trait.
    pub effective_roll: i32,
}

impl SaveOutcome {
    /// Compute a save with the default rules.
    pub fn compute(
        roll_total: i32,
        trait_level: i32,
        lethality: i32,
        protection: &Protection<'_>,
    ) -> MechResult<Self> {
        Self::compute_with(
            &DiceRules::default(),
            roll_total,
            trait_level,
            lethality,
            protection,
        )
    }

    /// Compute a save with explicit rules.
    pub fn compute_with(
        rules: &DiceRules,
        roll_total: i32,
        trait_level: i32,
        lethality: i32,
        protection: &Protection<'_>,
    ) -> MechResult<Self> {
        let mitigated_lethality = lethality
            .checked_sub(protection.total()?)
            .ok_or(MechError::Overflow("mitigated lethality"))?
            .max(0);
        let effective_roll = roll_total
            .checked_add(trait_level)
            .ok_or(MechError::Overflow("effective roll"))?;
        let tag = if roll_total == 0 {
            SaveTag::Failure
        } else {
            classify(rules, effective_roll, mitigated_lethality)
        };

        tracing::debug!(
            roll_total,
            effective_roll,
            lethality,
            mitigated_lethality,
            outcome = %tag,
            "save resolved"
        );

        Ok(Self {
            tag,
            wounds: tag.wounds(),
            mitigated_lethality,
            effective_roll,
        })
    }
}

/// The ordered outcome table. Ranges overlap at the edges, so the order of
/// the arms matters.
fn classify(rules: &DiceRules, effective: i32, mitigated: i32) -> SaveTag {
    let fumble_limit = mitigated.saturating_sub(rules.fumble_margin);
    let perfection_limit = mitigated.saturating_add(rules.perfection_margin);

    if mitigated < 1 || effective >= perfection_limit {
        SaveTag::Perfection
    } else if effective > mitigated {
        SaveTag::Success
    } else if effective < fumble_limit && fumble_limit > 0 {
        SaveTag::Fumble
    } else if effective < mitigated {
        SaveTag::Failure
    } else {
        SaveTag::StatusQuo
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn bare(roll_total: i32, trait_level: i32, lethality: i32) -> SaveOutcome {
        SaveOutcome::compute(roll_total, trait_level, lethality, &Protection::default()).unwrap()
    }

    #[test]
    fn lethality_five_boundaries() {
        assert_eq!(bare(15, 0, 5).tag, SaveTag::Perfection);
        assert_eq!(bare(14, 0, 5).tag, SaveTag::Success);
        assert_eq!(bare(6, 0, 5).tag, SaveTag::Success);
        assert_eq!(bare(5, 0, 5).tag, SaveTag::StatusQuo);
        assert_eq!(bare(4, 0, 5).tag, SaveTag::Failure);
        // Fumble limit is -5, which is not positive: no fumble possible.
        assert_eq!(bare(-6, 0, 5).tag, SaveTag::Failure);
    }

    #[test]
    fn lethality_twelve_sweep() {
        assert_eq!(bare(1, 0, 12).tag, SaveTag::Fumble);
        for roll in 2..12 {
            assert_eq!(bare(roll, 0, 12).tag, SaveTag::Failure, "roll {roll}");
        }
        assert_eq!(bare(12, 0, 12).tag, SaveTag::StatusQuo);
        for roll in 13..=21 {
            assert_eq!(bare(roll, 0, 12).tag, SaveTag::Success, "roll {roll}");
        }
        for roll in 22..=25 {
            assert_eq!(bare(roll, 0, 12).tag, SaveTag::Perfection, "roll {roll}");
        }
    }

    #[test]
    fn fumble_limit_itself_is_not_a_fumble() {
        // Lethality 15: fumble limit 5.
        assert_eq!(bare(5, 0, 15).tag, SaveTag::Failure);
        assert_eq!(bare(4, 0, 15).tag, SaveTag::Fumble);
        assert_eq!(bare(4, 0, 15).wounds, 6);
    }

    #[test]
    fn trait_shifts_the_roll() {
        let outcome = bare(10, 3, 12);
        assert_eq!(outcome.effective_roll, 13);
        assert_eq!(outcome.tag, SaveTag::Success);
        assert_eq!(bare(14, -2, 12).tag, SaveTag::StatusQuo);
    }

    #[test]
    fn extreme_inputs_are_errors() {
        let none = Protection::default();
        assert!(matches!(
            SaveOutcome::compute(5, i32::MAX, 3, &none),
            Err(MechError::Overflow("effective roll"))
        ));

        let plate = ArmorSnapshot::new("Plate", [(DamageType::Slash, 1)]);
        let armored = Protection {
            damage_type: Some(DamageType::Slash),
            armor: Some(&plate),
            ..Protection::default()
        };
        assert!(matches!(
            SaveOutcome::compute(5, 0, i32::MIN, &armored),
            Err(MechError::Overflow("mitigated lethality"))
        ));

        let wall = ShieldSnapshot::new("Wall", [(DamageType::Slash, i32::MAX)]);
        let stacked = Protection {
            shield: Some(&wall),
            using_shield: true,
            ..armored
        };
        assert!(matches!(
            stacked.total(),
            Err(MechError::Overflow("protection"))
        ));
    }

    #[test]
    fn huge_lethality_never_panics_on_limits() {
        assert_eq!(bare(5, 0, i32::MAX).tag, SaveTag::Fumble);
        assert_eq!(bare(i32::MAX, 0, 1).tag, SaveTag::Perfection);
    }

    #[test]
    fn raw_zero_is_always_failure() {
        for (trait_level, lethality) in [(0, 0), (12, 1), (0, 40), (-3, 5), (30, 2)] {
            let outcome = bare(0, trait_level, lethality);
            assert_eq!(outcome.tag, SaveTag::Failure);
            assert_eq!(outcome.wounds, 2);
        }
    }

    #[test]
    fn fully_mitigated_is_perfection() {
        let plate = ArmorSnapshot::new("Plate", [(DamageType::Slash, 6)]);
        let protection = Protection {
            damage_type: Some(DamageType::Slash),
            armor: Some(&plate),
            ..Protection::default()
        };
        let outcome = SaveOutcome::compute(1, 0, 5, &protection).unwrap();
        assert_eq!(outcome.mitigated_lethality, 0);
        assert_eq!(outcome.tag, SaveTag::Perfection);
        assert_eq!(outcome.wounds, 0);
    }

    #[test]
    fn shield_counts_only_when_raised() {
        let mail = ArmorSnapshot::new("Mail", [(DamageType::Pierce, 2)]);
        let kite = ShieldSnapshot::new("Kite", [(DamageType::Pierce, 3)]);
        let mut protection = Protection {
            damage_type: Some(DamageType::Pierce),
            armor: Some(&mail),
            shield: Some(&kite),
            using_shield: false,
        };
        assert_eq!(protection.total().unwrap(), 2);
        protection.using_shield = true;
        assert_eq!(protection.total().unwrap(), 5);

        let outcome = SaveOutcome::compute(4, 0, 10, &protection).unwrap();
        assert_eq!(outcome.mitigated_lethality, 5);
        assert_eq!(outcome.tag, SaveTag::Failure);
    }

    #[test]
    fn raised_shield_without_shield_is_invalid() {
        let protection = Protection {
            using_shield: true,
            ..Protection::default()
        };
        assert!(matches!(
            SaveOutcome::compute(5, 0, 5, &protection),
            Err(MechError::InvalidRequest(_))
        ));
    }

    #[test]
    fn armor_needs_damage_type_and_profile() {
        let mail = ArmorSnapshot::new("Mail", [(DamageType::Slash, 2)]);
        let untyped = Protection {
            armor: Some(&mail),
            ..Protection::default()
        };
        assert!(matches!(
            SaveOutcome::compute(5, 0, 5, &untyped),
            Err(MechError::InvalidRequest(_))
        ));

        let energy = Protection {
            damage_type: Some(DamageType::Energy),
            armor: Some(&mail),
            ..Protection::default()
        };
        assert!(matches!(
            SaveOutcome::compute(5, 0, 5, &energy),
            Err(MechError::MissingDamageProfile { damage_type: DamageType::Energy, .. })
        ));
    }

    #[test]
    fn tag_display() {
        assert_eq!(SaveTag::StatusQuo.to_string(), "Status Quo");
        assert_eq!(SaveTag::Fumble.to_string(), "Fumble");
    }

    #[test]
    fn sweep_snapshot() {
        let table: Vec<String> = (0..=24)
            .map(|roll| {
                let outcome = bare(roll, 0, 12);
                format!("{roll:>2} {} {}", outcome.tag, outcome.wounds)
            })
            .collect();
        insta::assert_snapshot!(table.join("\n"), @r"
         0 Failure 2
         1 Fumble 6
         2 Failure 2
         3 Failure 2
         4 Failure 2
         5 Failure 2
         6 Failure 2
         7 Failure 2
         8 Failure 2
         9 Failure 2
        10 Failure 2
        11 Failure 2
        12 Status Quo 2
        13 Success 1
        14 Success 1
        15 Success 1
        16 Success 1
        17 Success 1
        18 Success 1
        19 Success 1
        20 Success 1
        21 Success 1
        22 Perfection 0
        23 Perfection 0
        24 Perfection 0
        ");
    }

    proptest! {
        #[test]
        fn every_input_has_one_outcome(
            roll in -20i32..60,
            trait_level in -5i32..6,
            lethality in -5i32..40,
        ) {
            let outcome = bare(roll, trait_level, lethality);
            prop_assert_eq!(outcome.wounds, outcome.tag.wounds());
            prop_assert!(outcome.mitigated_lethality >= 0);
            if roll == 0 {
                prop_assert_eq!(outcome.tag, SaveTag::Failure);
            } else if outcome.mitigated_lethality < 1 {
                prop_assert_eq!(outcome.tag, SaveTag::Perfection);
            }
        }
    }
}
