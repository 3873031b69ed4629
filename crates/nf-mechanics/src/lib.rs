//! Check resolution engine for the Ninefold exploding-d10 system.
//!
//! Rolls a ten-sided die whose nines explode and whose first zero is
//! rerolled, folds skill, trait, and modifier terms into the total, and turns
//! the result into attack lethality or a save outcome with wounds. Every
//! check is a pure transformation of a [`CheckRequest`] into a
//! [`CheckResult`]; applying wounds to an actor is left to the caller (see
//! [`sheet::ActorSheet`]).

pub mod check;
pub mod dice;
pub mod error;
pub mod formula;
pub mod items;
pub mod rules;
pub mod sheet;

pub use check::{
    AttackOutcome, CheckEffect, CheckKind, CheckRequest, CheckResolver, CheckResult, Protection,
    SaveOutcome, SaveTag, resolve,
};
pub use dice::{
    DiceCount, DieFace, ExplodingDie, FixedSource, RandomSource, RollAccumulator, RollOutcome,
};
pub use error::{MechError, MechResult};
pub use formula::{Formula, Term};
pub use items::{AmmoSnapshot, ArmorSnapshot, DamageType, ShieldSnapshot, WeaponSnapshot};
pub use rules::{DiceRules, MAX_MAGNITUDE};
pub use sheet::{ActorSheet, Track};
