//! Item snapshots consumed by checks: weapons, ammunition, armor, shields.
//!
//! These are plain copies of whatever the host keeps on its item documents.
//! Damage and protection are stored per [`DamageType`]; a missing entry is
//! reported as [`MechError::MissingDamageProfile`] rather than read as zero.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// The kind of physical harm an attack deals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DamageType {
    /// Edged weapons.
    Slash,
    /// Clubs, fists, falls.
    Blunt,
    /// Arrows, spears, bullets.
    Pierce,
    /// Fire, lightning, and everything else exotic.
    Energy,
}

impl DamageType {
    /// Every damage type, in display order.
    pub const ALL: [Self; 4] = [Self::Slash, Self::Blunt, Self::Pierce, Self::Energy];

    /// Parse a damage type from a case-insensitive tag like "slash".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "slash" => Some(Self::Slash),
            "blunt" => Some(Self::Blunt),
            "pierce" => Some(Self::Pierce),
            "energy" => Some(Self::Energy),
            _ => None,
        }
    }
}

impl std::fmt::Display for DamageType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Slash => write!(f, "slash"),
            Self::Blunt => write!(f, "blunt"),
            Self::Pierce => write!(f, "pierce"),
            Self::Energy => write!(f, "energy"),
        }
    }
}

impl std::str::FromStr for DamageType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_tag(s).ok_or_else(|| format!("unknown damage type: {s}"))
    }
}

/// Values keyed by damage type (weapon damage or armor protection).
pub type DamageProfile = BTreeMap<DamageType, i32>;

/// Ammunition loaded into a ranged weapon.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmmoSnapshot {
    /// Display name.
    pub name: String,
    /// Damage dealt per damage type.
    #[serde(default)]
    pub damage: DamageProfile,
}

impl AmmoSnapshot {
    /// Create ammunition with the given damage values.
    pub fn new(
        name: impl Into<String>,
        damage: impl IntoIterator<Item = (DamageType, i32)>,
    ) -> Self {
        Self {
            name: name.into(),
            damage: damage.into_iter().collect(),
        }
    }
}

/// A weapon as seen by an attack check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeaponSnapshot {
    /// Display name.
    pub name: String,
    /// Ranged weapons take their damage from the selected ammunition.
    #[serde(default)]
    pub ranged: bool,
    /// Damage dealt per damage type (ignored for ranged weapons).
    #[serde(default)]
    pub damage: DamageProfile,
    /// The selected ammunition, if any.
    #[serde(default)]
    pub ammo: Option<AmmoSnapshot>,
}

impl WeaponSnapshot {
    /// Create a melee weapon with the given damage values.
    pub fn melee(
        name: impl Into<String>,
        damage: impl IntoIterator<Item = (DamageType, i32)>,
    ) -> Self {
        Self {
            name: name.into(),
            ranged: false,
            damage: damage.into_iter().collect(),
            ammo: None,
        }
    }

    /// Create a ranged weapon with no ammunition selected.
    pub fn ranged(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ranged: true,
            damage: DamageProfile::new(),
            ammo: None,
        }
    }

    /// Select the ammunition for this weapon.
    pub fn with_ammo(mut self, ammo: AmmoSnapshot) -> Self {
        self.ammo = Some(ammo);
        self
    }

    /// Check that a ranged weapon has ammunition selected.
    pub fn validate(&self) -> MechResult<()> {
        if self.ranged && self.ammo.is_none() {
            return Err(MechError::InvalidRequest(format!(
                "ranged weapon '{}' has no ammunition selected",
                self.name
            )));
        }
        Ok(())
    }

    /// The damage value this weapon deals for a damage type.
    pub fn damage_for(&self, damage_type: DamageType) -> MechResult<i32> {
        self.validate()?;
        match (&self.ammo, self.ranged) {
            (Some(ammo), true) => lookup(&ammo.damage, &ammo.name, damage_type),
            _ => lookup(&self.damage, &self.name, damage_type),
        }
    }
}

/// Worn armor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArmorSnapshot {
    /// Display name.
    pub name: String,
    /// Protection per damage type.
    #[serde(default)]
    pub protection: DamageProfile,
}

impl ArmorSnapshot {
    /// Create armor with the given protection values.
    pub fn new(
        name: impl Into<String>,
        protection: impl IntoIterator<Item = (DamageType, i32)>,
    ) -> Self {
        Self {
            name: name.into(),
            protection: protection.into_iter().collect(),
        }
    }

    /// Protection against a damage type.
    pub fn protection_for(&self, damage_type: DamageType) -> MechResult<i32> {
        lookup(&self.protection, &self.name, damage_type)
    }
}

/// A carried shield. Only counts when the save says it is being used.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShieldSnapshot {
    /// Display name.
    pub name: String,
    /// Protection per damage type.
    #[serde(default)]
    pub protection: DamageProfile,
}

impl ShieldSnapshot {
    /// Create a shield with the given protection values.
    pub fn new(
        name: impl Into<String>,
        protection: impl IntoIterator<Item = (DamageType, i32)>,
    ) -> Self {
        Self {
            name: name.into(),
            protection: protection.into_iter().collect(),
        }
    }

    /// Protection against a damage type.
    pub fn protection_for(&self, damage_type: DamageType) -> MechResult<i32> {
        lookup(&self.protection, &self.name, damage_type)
    }
}

fn lookup(profile: &DamageProfile, item: &str, damage_type: DamageType) -> MechResult<i32> {
    profile
        .get(&damage_type)
        .copied()
        .ok_or_else(|| MechError::MissingDamageProfile {
            item: item.to_string(),
            damage_type,
        })
}
