//! Error types for the check resolution engine.

use crate::items::DamageType;

/// Errors that can occur while resolving a check.
#[derive(Debug, thiserror::Error)]
pub enum MechError {
    /// The request is missing required fields or combines them inconsistently.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// An item has no value defined for the requested damage type.
    #[error("'{item}' has no {damage_type} damage profile")]
    MissingDamageProfile {
        /// Name of the weapon, ammo, armor, or shield that was consulted.
        item: String,
        /// The damage type that was looked up.
        damage_type: DamageType,
    },

    /// The explosion/reroll loop checked too many faces without settling.
    #[error("explosion chain exceeded {0} faces")]
    ExhaustedExplosion(usize),

    /// A skill referenced on a sheet does not exist.
    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// A trait referenced on a sheet does not exist.
    #[error("unknown trait: {0}")]
    UnknownTrait(String),

    /// Arithmetic on the check's numbers left the `i32` range.
    #[error("{0} overflowed")]
    Overflow(&'static str),

    /// A rules configuration could not be parsed.
    #[error("invalid rules config: {0}")]
    InvalidConfig(String),
}

/// Convenience result type for mechanics operations.
pub type MechResult<T> = Result<T, MechError>;
