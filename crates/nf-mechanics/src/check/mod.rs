//! Check requests, results, and the resolver that connects them.
//!
//! A [`CheckRequest`] is a plain snapshot of everything a check needs. The
//! [`CheckResolver`] validates it, decides the formula, rolls, and hands the
//! die total to [`attack`] or [`save`] depending on the kind. It never
//! touches caller state: wounds and spent hero points come back as
//! [`CheckEffect`]s for the caller to apply.

pub mod attack;
pub mod save;

pub use attack::{AttackOutcome, NO_SKILL};
pub use save::{Protection, SaveOutcome, SaveTag};

use serde::{Deserialize, Serialize};

use crate::dice::{DiceCount, RandomSource, RollAccumulator, RollOutcome};
use crate::error::{MechError, MechResult};
use crate::formula::Formula;
use crate::items::{ArmorSnapshot, DamageType, ShieldSnapshot, WeaponSnapshot};
use crate::rules::{DiceRules, MAX_MAGNITUDE};

/// Skill name reported when a non-attack check uses neither skill nor trait.
pub const NO_SKILL_USED: &str = "No Skill";

/// The kind of check being made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckKind {
    /// A quick skill check.
    Simple,
    /// A skill check with situational modifiers.
    Complex,
    /// A weapon attack with situational modifiers.
    Attack,
    /// A quick weapon attack.
    SimpleAttack,
    /// A saving throw against physical damage.
    Save,
}

impl CheckKind {
    /// Returns true for both attack kinds.
    pub fn is_attack(self) -> bool {
        matches!(self, Self::Attack | Self::SimpleAttack)
    }

    /// Returns true for saving throws.
    pub fn is_save(self) -> bool {
        self == Self::Save
    }

    /// Parse a kind from a tag like "simple-attack" or "save".
    pub fn from_str_tag(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "simple" => Some(Self::Simple),
            "complex" => Some(Self::Complex),
            "attack" => Some(Self::Attack),
            "simple_attack" => Some(Self::SimpleAttack),
            "save" => Some(Self::Save),
            _ => None,
        }
    }
}

impl std::fmt::Display for CheckKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Simple => write!(f, "Simple Check"),
            Self::Complex => write!(f, "Complex Check"),
            Self::Attack => write!(f, "Attack"),
            Self::SimpleAttack => write!(f, "Simple Attack"),
            Self::Save => write!(f, "Save"),
        }
    }
}

/// Everything a check needs, copied out of the host's documents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckRequest {
    /// The kind of check. Must be set.
    pub kind: Option<CheckKind>,
    /// Name of the skill used.
    pub skill_name: Option<String>,
    /// Skill level; only positive levels count.
    pub skill_level: i32,
    /// Name of the trait used.
    pub trait_name: Option<String>,
    /// Trait level; negative traits subtract.
    pub trait_level: i32,
    /// Situational penalty, subtracted when positive. Ignored by saves.
    pub modifier: i32,
    /// Spend a hero point to start with two dice.
    pub hero_point: bool,
    /// Damage type of the attack being made or saved against.
    pub damage_type: Option<DamageType>,
    /// The attacking weapon. Required for attacks.
    pub weapon: Option<WeaponSnapshot>,
    /// The defender's armor.
    pub armor: Option<ArmorSnapshot>,
    /// The defender's shield.
    pub shield: Option<ShieldSnapshot>,
    /// Whether the shield is raised for this save.
    pub using_shield: bool,
    /// Lethality the save must beat.
    pub lethality: i32,
}

impl CheckRequest {
    /// Start a request of the given kind.
    pub fn new(kind: CheckKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }

    /// Use a skill.
    pub fn with_skill(mut self, name: impl Into<String>, level: i32) -> Self {
        self.skill_name = Some(name.into());
        self.skill_level = level;
        self
    }

    /// Use a trait.
    pub fn with_trait(mut self, name: impl Into<String>, level: i32) -> Self {
        self.trait_name = Some(name.into());
        self.trait_level = level;
        self
    }

    /// Apply a situational penalty.
    pub fn with_modifier(mut self, modifier: i32) -> Self {
        self.modifier = modifier;
        self
    }

    /// Spend a hero point.
    pub fn with_hero_point(mut self) -> Self {
        self.hero_point = true;
        self
    }

    /// Attack with a weapon.
    pub fn with_weapon(mut self, weapon: WeaponSnapshot, damage_type: DamageType) -> Self {
        self.weapon = Some(weapon);
        self.damage_type = Some(damage_type);
        self
    }

    /// Set the damage type being saved against.
    pub fn with_damage_type(mut self, damage_type: DamageType) -> Self {
        self.damage_type = Some(damage_type);
        self
    }

    /// Wear armor.
    pub fn with_armor(mut self, armor: ArmorSnapshot) -> Self {
        self.armor = Some(armor);
        self
    }

    /// Carry a shield, raised or not.
    pub fn with_shield(mut self, shield: ShieldSnapshot, using: bool) -> Self {
        self.shield = Some(shield);
        self.using_shield = using;
        self
    }

    /// Set the lethality a save must beat.
    pub fn with_lethality(mut self, lethality: i32) -> Self {
        self.lethality = lethality;
        self
    }

    /// The defender's armor and shield as seen by a save.
    pub fn protection(&self) -> Protection<'_> {
        Protection {
            damage_type: self.damage_type,
            armor: self.armor.as_ref(),
            shield: self.shield.as_ref(),
            using_shield: self.using_shield,
        }
    }
}

/// A side effect the caller must apply after a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckEffect {
    /// The defender takes this many wounds.
    Wounds(u32),
    /// One hero point was spent on the roll.
    HeroPointSpent,
}

impl std::fmt::Display for CheckEffect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Wounds(n) => write!(f, "Wounds +{n}"),
            Self::HeroPointSpent => write!(f, "Hero Point -1"),
        }
    }
}

/// The immutable outcome of one check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckResult {
    /// The kind of check made.
    pub kind: CheckKind,
    /// Die total with skill, trait, and modifier folded in.
    pub total: i32,
    /// Skill shown as used (may be a trait name or a placeholder).
    pub skill_name: String,
    /// Level of the skill shown as used.
    pub skill_level: i32,
    /// Trait used, if named.
    pub trait_name: Option<String>,
    /// Trait level as requested.
    pub trait_level: i32,
    /// The terms that took part.
    pub formula: Formula,
    /// Damage type of the attack or save.
    pub damage_type: Option<DamageType>,
    /// Save tier (saves only).
    pub outcome: Option<SaveTag>,
    /// Wounds taken (saves only).
    pub wounds: Option<u32>,
    /// Lethality dealt (attacks) or faced before mitigation (saves).
    pub lethality: Option<i32>,
    /// Excess over the success threshold (attacks only).
    pub excess: Option<i32>,
    /// Weapon or ammo damage (attacks only).
    pub weapon_damage: Option<i32>,
    /// Lethality after armor and shield (saves only).
    pub mitigated_lethality: Option<i32>,
    /// The settled roll.
    pub roll: RollOutcome,
    /// Effects for the caller to apply.
    pub effects: Vec<CheckEffect>,
}

impl CheckResult {
    /// Build the defender's save against this attack.
    ///
    /// Copies the attack's lethality and damage type into `defender`, which
    /// supplies the trait, armor, and shield.
    pub fn save_against(&self, defender: CheckRequest) -> MechResult<CheckRequest> {
        let (true, Some(lethality), Some(damage_type)) =
            (self.kind.is_attack(), self.lethality, self.damage_type)
        else {
            return Err(MechError::InvalidRequest(format!(
                "a {} has no lethality to save against",
                self.kind
            )));
        };
        Ok(CheckRequest {
            kind: Some(CheckKind::Save),
            lethality,
            damage_type: Some(damage_type),
            ..defender
        })
    }
}

/// Resolves check requests against a set of rules.
#[derive(Debug, Clone, Default)]
pub struct CheckResolver {
    rules: DiceRules,
    accumulator: RollAccumulator,
}

impl CheckResolver {
    /// Create a resolver using the given rules.
    pub fn new(rules: DiceRules) -> Self {
        Self {
            accumulator: RollAccumulator::new(rules.clone()),
            rules,
        }
    }

    /// The rules this resolver uses.
    pub fn rules(&self) -> &DiceRules {
        &self.rules
    }

    /// Resolve one check.
    ///
    /// The request is validated in full before any randomness is consumed.
    pub fn resolve<R: RandomSource + ?Sized>(
        &self,
        request: &CheckRequest,
        source: &mut R,
    ) -> MechResult<CheckResult> {
        let kind = validate(request)?;
        let _span = tracing::debug_span!("check", %kind).entered();

        let formula = Formula::build(
            request.skill_level,
            request.trait_level,
            request.modifier,
            kind.is_save(),
        )
        .with_dice(DiceCount::for_hero_point(request.hero_point));

        let roll = self.accumulator.accumulate(formula.dice, source)?;
        let total = formula.apply(roll.total)?;
        let (skill_name, skill_level) = displayed_skill(request, &formula);

        let mut result = CheckResult {
            kind,
            total,
            skill_name,
            skill_level,
            trait_name: request.trait_name.clone(),
            trait_level: request.trait_level,
            formula,
            damage_type: request.damage_type,
            outcome: None,
            wounds: None,
            lethality: None,
            excess: None,
            weapon_damage: None,
            mitigated_lethality: None,
            roll,
            effects: Vec::new(),
        };

        if request.hero_point {
            result.effects.push(CheckEffect::HeroPointSpent);
        }

        match kind {
            CheckKind::Simple | CheckKind::Complex => {}
            CheckKind::Attack | CheckKind::SimpleAttack => {
                let (weapon, damage_type) = attack_inputs(request)?;
                let skill = result.formula.skill().map(|level| {
                    (request.skill_name.as_deref().unwrap_or(SKILL_FALLBACK), level)
                });
                let attack = AttackOutcome::compute_with(
                    &self.rules,
                    result.roll.total,
                    weapon,
                    damage_type,
                    skill,
                )?;
                result.skill_name = attack.skill_name;
                result.skill_level = attack.skill_level;
                result.excess = Some(attack.excess);
                result.lethality = Some(attack.lethality);
                result.weapon_damage = Some(attack.weapon_damage);
            }
            CheckKind::Save => {
                let save = SaveOutcome::compute_with(
                    &self.rules,
                    result.roll.total,
                    request.trait_level,
                    request.lethality,
                    &request.protection(),
                )?;
                result.outcome = Some(save.tag);
                result.wounds = Some(save.wounds);
                result.lethality = Some(request.lethality);
                result.mitigated_lethality = Some(save.mitigated_lethality);
                if save.wounds > 0 {
                    result.effects.push(CheckEffect::Wounds(save.wounds));
                }
            }
        }

        tracing::debug!(
            total = result.total,
            roll = %result.roll,
            formula = %result.formula,
            "check resolved"
        );
        Ok(result)
    }
}

/// Resolve one check with the default rules.
pub fn resolve<R: RandomSource + ?Sized>(
    request: &CheckRequest,
    source: &mut R,
) -> MechResult<CheckResult> {
    CheckResolver::default().resolve(request, source)
}

/// Label for a positive skill level that arrived without a name.
const SKILL_FALLBACK: &str = "Skill";

/// Check every precondition that does not need a roll.
fn validate(request: &CheckRequest) -> MechResult<CheckKind> {
    let kind = request
        .kind
        .ok_or_else(|| MechError::InvalidRequest("check kind is not set".to_string()))?;

    for (field, value) in [
        ("skill level", request.skill_level),
        ("trait level", request.trait_level),
        ("modifier", request.modifier),
        ("lethality", request.lethality),
    ] {
        if value.unsigned_abs() > MAX_MAGNITUDE.unsigned_abs() {
            return Err(MechError::InvalidRequest(format!(
                "{field} {value} is outside ±{MAX_MAGNITUDE}"
            )));
        }
    }

    if kind.is_attack() {
        let (weapon, damage_type) = attack_inputs(request)?;
        weapon.damage_for(damage_type)?;
    }
    if kind.is_save() {
        request.protection().total()?;
    }
    Ok(kind)
}

fn attack_inputs(request: &CheckRequest) -> MechResult<(&WeaponSnapshot, DamageType)> {
    let weapon = request
        .weapon
        .as_ref()
        .ok_or_else(|| MechError::InvalidRequest("attack without a weapon".to_string()))?;
    let damage_type = request.damage_type.ok_or_else(|| {
        MechError::InvalidRequest(format!("attack with '{}' has no damage type", weapon.name))
    })?;
    Ok((weapon, damage_type))
}

/// The skill to show for a check: the skill, else the trait, else none.
fn displayed_skill(request: &CheckRequest, formula: &Formula) -> (String, i32) {
    if let Some(level) = formula.skill() {
        let name = request.skill_name.as_deref().unwrap_or(SKILL_FALLBACK);
        return (name.to_string(), level);
    }
    if formula.trait_level().is_some()
        && let Some(name) = &request.trait_name
    {
        return (name.clone(), 0);
    }
    (NO_SKILL_USED.to_string(), 0)
}
