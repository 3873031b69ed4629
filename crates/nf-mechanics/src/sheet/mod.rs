//! Actor sheets: the caller's side of a check.
//!
//! The resolver never mutates an actor. A sheet builds [`CheckRequest`]s from
//! its own stat block and applies the [`CheckEffect`]s a result carries.

pub mod track;

pub use track::Track;

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::check::{CheckEffect, CheckKind, CheckRequest, CheckResult};
use crate::error::{MechError, MechResult};
use crate::items::{ArmorSnapshot, ShieldSnapshot};

/// An actor's stat block and counters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActorSheet {
    /// Actor name.
    pub name: String,
    /// Skill levels by name.
    #[serde(default)]
    pub skills: BTreeMap<String, i32>,
    /// Trait levels by name; may be negative.
    #[serde(default)]
    pub traits: BTreeMap<String, i32>,
    /// Wounds taken so far.
    pub wounds: Track,
    /// Hero points left to spend.
    pub hero_points: Track,
    /// Worn armor.
    #[serde(default)]
    pub armor: Option<ArmorSnapshot>,
    /// Carried shield.
    #[serde(default)]
    pub shield: Option<ShieldSnapshot>,
}

impl ActorSheet {
    /// Create an unhurt actor with a full stock of hero points.
    pub fn new(name: impl Into<String>, max_wounds: i32, hero_points: i32) -> Self {
        Self {
            name: name.into(),
            skills: BTreeMap::new(),
            traits: BTreeMap::new(),
            wounds: Track::empty("Wounds", max_wounds),
            hero_points: Track::full("Hero Points", hero_points),
            armor: None,
            shield: None,
        }
    }

    /// Add or replace a skill.
    pub fn with_skill(mut self, name: impl Into<String>, level: i32) -> Self {
        self.skills.insert(name.into(), level);
        self
    }

    /// Add or replace a trait.
    pub fn with_trait(mut self, name: impl Into<String>, level: i32) -> Self {
        self.traits.insert(name.into(), level);
        self
    }

    /// Wear armor.
    pub fn with_armor(mut self, armor: ArmorSnapshot) -> Self {
        self.armor = Some(armor);
        self
    }

    /// Carry a shield.
    pub fn with_shield(mut self, shield: ShieldSnapshot) -> Self {
        self.shield = Some(shield);
        self
    }

    /// Look up a skill by name (case-insensitive).
    pub fn skill(&self, name: &str) -> MechResult<(&str, i32)> {
        find(&self.skills, name).ok_or_else(|| MechError::UnknownSkill(name.to_string()))
    }

    /// Look up a trait by name (case-insensitive).
    pub fn trait_level(&self, name: &str) -> MechResult<(&str, i32)> {
        find(&self.traits, name).ok_or_else(|| MechError::UnknownTrait(name.to_string()))
    }

    /// Build a request of the given kind from this sheet's skill and trait.
    ///
    /// Saves also pick up the sheet's armor and shield.
    pub fn request(
        &self,
        kind: CheckKind,
        skill: Option<&str>,
        trait_name: Option<&str>,
    ) -> MechResult<CheckRequest> {
        let mut request = CheckRequest::new(kind);
        if let Some(name) = skill {
            let (name, level) = self.skill(name)?;
            request = request.with_skill(name, level);
        }
        if let Some(name) = trait_name {
            let (name, level) = self.trait_level(name)?;
            request = request.with_trait(name, level);
        }
        if kind.is_save() {
            request.armor = self.armor.clone();
            request.shield = self.shield.clone();
        }
        Ok(request)
    }

    /// Mark a request as spending one of this sheet's hero points.
    pub fn spend_hero_point(&self, request: CheckRequest) -> MechResult<CheckRequest> {
        if self.hero_points.is_empty() {
            return Err(MechError::InvalidRequest(format!(
                "{} has no hero points left",
                self.name
            )));
        }
        Ok(request.with_hero_point())
    }

    /// Apply every effect of a result to this sheet.
    pub fn apply(&mut self, result: &CheckResult) {
        for effect in &result.effects {
            match effect {
                CheckEffect::Wounds(n) => {
                    self.wounds.adjust(i32::try_from(*n).unwrap_or(i32::MAX));
                }
                CheckEffect::HeroPointSpent => {
                    self.hero_points.adjust(-1);
                }
            }
            tracing::debug!(actor = %self.name, %effect, "effect applied");
        }
    }

    /// Returns true once the wound track is full.
    pub fn is_incapacitated(&self) -> bool {
        self.wounds.is_full()
    }
}

fn find<'a>(map: &'a BTreeMap<String, i32>, name: &str) -> Option<(&'a str, i32)> {
    map.iter()
        .find(|(k, _)| k.eq_ignore_ascii_case(name))
        .map(|(k, v)| (k.as_str(), *v))
}
