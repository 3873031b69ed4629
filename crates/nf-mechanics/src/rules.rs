//! Tunable constants of the exploding-d10 system.
//!
//! [`DiceRules::default`] is the standard table; hosts can override single
//! values from JSON, anything left out keeps its default.

use serde::{Deserialize, Serialize};

use crate::error::{MechError, MechResult};

/// Largest magnitude accepted for a tunable number or a request's levels,
/// modifier, and lethality.
pub const MAX_MAGNITUDE: i32 = 1_000_000;

/// Numeric rules shared by every check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceRules {
    /// Bonus added to the total for every exploded nine (default: 4).
    pub explosion_bonus: i32,
    /// Totals above this count as excess on attacks (default: 9).
    pub success_threshold: i32,
    /// Faces the reroll loop may check before giving up (default: 1000).
    pub max_faces: usize,
    /// A save this far below lethality is a fumble (default: 10).
    pub fumble_margin: i32,
    /// A save this far above lethality is a perfection (default: 10).
    pub perfection_margin: i32,
}

impl Default for DiceRules {
    fn default() -> Self {
        Self {
            explosion_bonus: 4,
            success_threshold: 9,
            max_faces: 1000,
            fumble_margin: 10,
            perfection_margin: 10,
        }
    }
}

impl DiceRules {
    /// Parse rules from JSON. Missing keys fall back to the defaults.
    pub fn from_json(json: &str) -> MechResult<Self> {
        let rules: Self =
            serde_json::from_str(json).map_err(|e| MechError::InvalidConfig(e.to_string()))?;
        if rules.max_faces == 0 {
            return Err(MechError::InvalidConfig(
                "max_faces must be at least 1".to_string(),
            ));
        }
        for (field, value) in [
            ("explosion_bonus", rules.explosion_bonus),
            ("success_threshold", rules.success_threshold),
            ("fumble_margin", rules.fumble_margin),
            ("perfection_margin", rules.perfection_margin),
        ] {
            if value.unsigned_abs() > MAX_MAGNITUDE.unsigned_abs() {
                return Err(MechError::InvalidConfig(format!(
                    "{field} {value} is outside ±{MAX_MAGNITUDE}"
                )));
            }
        }
        Ok(rules)
    }

    /// Set the per-nine explosion bonus.
    pub fn with_explosion_bonus(mut self, bonus: i32) -> Self {
        self.explosion_bonus = bonus;
        self
    }

    /// Set the excess threshold for attacks.
    pub fn with_success_threshold(mut self, threshold: i32) -> Self {
        self.success_threshold = threshold;
        self
    }

    /// Set the safety bound on the reroll loop.
    pub fn with_max_faces(mut self, max: usize) -> Self {
        self.max_faces = max.max(1);
        self
    }

    /// Amount by which a total exceeds the success threshold, never negative.
    pub fn excess(&self, total: i32) -> i32 {
        total.saturating_sub(self.success_threshold).max(0)
    }
}
