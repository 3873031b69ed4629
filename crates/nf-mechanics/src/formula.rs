//! Which flat terms join the die total.
//!
//! Skill, trait, and modifier each join a check only under their own
//! conditions. Keeping the decision here means every check kind agrees on
//! it.

use serde::{Deserialize, Serialize};

use crate::dice::DiceCount;
use crate::error::{MechError, MechResult};

/// A flat term added to (or subtracted from) the die total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Term {
    /// A trained skill, always positive.
    Skill(i32),
    /// A trait, signed: negative traits subtract.
    Trait(i32),
    /// A situational penalty, subtracted.
    Modifier(i32),
}

impl Term {
    /// The signed amount this term contributes.
    pub fn signed(self) -> i32 {
        match self {
            Self::Skill(n) | Self::Trait(n) => n,
            Self::Modifier(n) => n.saturating_neg(),
        }
    }
}

/// The terms that take part in one check.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Formula {
    /// Number of dice the roll starts with.
    pub dice: DiceCount,
    /// Included terms, in skill, trait, modifier order.
    pub terms: Vec<Term>,
}

impl Formula {
    /// Decide which terms take part.
    ///
    /// Skill joins when its level is positive, trait when its level is
    /// non-zero, and the modifier when it is positive and the check is not a
    /// save.
    pub fn build(skill_level: i32, trait_level: i32, modifier: i32, is_save: bool) -> Self {
        let mut terms = Vec::new();
        if skill_level > 0 {
            terms.push(Term::Skill(skill_level));
        }
        if trait_level != 0 {
            terms.push(Term::Trait(trait_level));
        }
        if modifier > 0 && !is_save {
            terms.push(Term::Modifier(modifier));
        }
        Self {
            dice: DiceCount::One,
            terms,
        }
    }

    /// Start the roll with the given number of dice.
    pub fn with_dice(mut self, dice: DiceCount) -> Self {
        self.dice = dice;
        self
    }

    /// The included skill level, if any.
    pub fn skill(&self) -> Option<i32> {
        self.terms.iter().find_map(|t| match t {
            Term::Skill(n) => Some(*n),
            _ => None,
        })
    }

    /// The included trait level, if any.
    pub fn trait_level(&self) -> Option<i32> {
        self.terms.iter().find_map(|t| match t {
            Term::Trait(n) => Some(*n),
            _ => None,
        })
    }

    /// The included modifier, if any.
    pub fn modifier(&self) -> Option<i32> {
        self.terms.iter().find_map(|t| match t {
            Term::Modifier(n) => Some(*n),
            _ => None,
        })
    }

    /// Fold the included terms over a die total.
    pub fn apply(&self, die_total: i32) -> MechResult<i32> {
        self.terms
            .iter()
            .try_fold(die_total, |acc, t| acc.checked_add(t.signed()))
            .ok_or(MechError::Overflow("check total"))
    }
}

impl std::fmt::Display for Formula {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}d10!", self.dice.get())?;
        for term in &self.terms {
            let n = term.signed();
            if n < 0 {
                write!(f, " - {}", n.unsigned_abs())?;
            } else {
                write!(f, " + {n}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_terms() {
        let formula = Formula::build(3, 1, 2, false);
        assert_eq!(
            formula.terms,
            vec![Term::Skill(3), Term::Trait(1), Term::Modifier(2)]
        );
        assert_eq!(formula.apply(5).unwrap(), 5 + 3 + 1 - 2);
        assert_eq!(formula.to_string(), "1d10! + 3 + 1 - 2");
    }

    #[test]
    fn zero_skill_is_absent() {
        let formula = Formula::build(0, 0, 0, false);
        assert!(formula.terms.is_empty());
        assert_eq!(formula.skill(), None);
        assert_eq!(formula.apply(7).unwrap(), 7);
        assert_eq!(formula.to_string(), "1d10!");
    }

    #[test]
    fn negative_skill_is_absent() {
        assert_eq!(Formula::build(-2, 0, 0, false).skill(), None);
    }

    #[test]
    fn negative_trait_subtracts() {
        let formula = Formula::build(0, -2, 0, false);
        assert_eq!(formula.trait_level(), Some(-2));
        assert_eq!(formula.apply(6).unwrap(), 4);
        assert_eq!(formula.to_string(), "1d10! - 2");
    }

    #[test]
    fn non_positive_modifier_is_absent() {
        assert_eq!(Formula::build(1, 0, 0, false).modifier(), None);
        assert_eq!(Formula::build(1, 0, -3, false).modifier(), None);
    }

    #[test]
    fn saves_never_take_the_modifier() {
        let formula = Formula::build(2, 1, 4, true);
        assert_eq!(formula.modifier(), None);
        assert_eq!(formula.terms, vec![Term::Skill(2), Term::Trait(1)]);
    }

    #[test]
    fn hero_dice_display() {
        let formula = Formula::build(1, 0, 0, false).with_dice(DiceCount::Two);
        assert_eq!(formula.to_string(), "2d10! + 1");
    }

    #[test]
    fn overflowing_total_is_an_error() {
        let formula = Formula::build(i32::MAX, 1, 0, false);
        assert!(matches!(formula.apply(5), Err(MechError::Overflow(_))));
        let formula = Formula::build(0, i32::MIN, 1, false);
        assert!(matches!(formula.apply(0), Err(MechError::Overflow(_))));
        assert_eq!(formula.to_string(), "1d10! - 2147483648 - 1");
    }
}
