//! Accumulating a roll: explosions, the zero reroll, and the final total.

use serde::{Deserialize, Serialize};

use super::{DieFace, ExplodingDie, RandomSource};
use crate::error::{MechError, MechResult};
use crate::rules::DiceRules;

/// How many dice start a roll.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DiceCount {
    /// A normal roll.
    #[default]
    One,
    /// A hero point was spent.
    Two,
}

impl DiceCount {
    /// Two dice when a hero point is spent, otherwise one.
    pub fn for_hero_point(hero_point: bool) -> Self {
        if hero_point { Self::Two } else { Self::One }
    }

    /// The number of initial draws.
    pub fn get(self) -> usize {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

/// The settled result of one roll.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollOutcome {
    /// Terminal face plus the explosion bonus for every nine.
    ///
    /// The terminal face is the one the scan stopped on. With hero dice that
    /// is not always the last plain face drawn: `[5, 7]` totals 5.
    pub total: i32,
    /// Nines that exploded.
    pub nines: u32,
    /// Zeroes that were rerolled (0 or 1).
    pub zeroes: u32,
    /// Every face drawn, in draw order.
    pub sequence: Vec<DieFace>,
}

impl RollOutcome {
    /// The face the scan stopped on.
    ///
    /// Every face scanned before it was flagged, so it is the first face
    /// that is neither exploded nor rerolled.
    pub fn terminal(&self) -> Option<&DieFace> {
        self.sequence.iter().find(|f| f.is_terminal())
    }
}

impl std::fmt::Display for RollOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let faces: Vec<String> = self.sequence.iter().map(|d| d.to_string()).collect();
        write!(f, "[{}] = {}", faces.join(", "), self.total)
    }
}

/// Drives draws of the exploding die until the roll settles.
#[derive(Debug, Clone, Default)]
pub struct RollAccumulator {
    rules: DiceRules,
}

impl RollAccumulator {
    /// Create an accumulator using the given rules.
    pub fn new(rules: DiceRules) -> Self {
        Self { rules }
    }

    /// Roll and settle.
    ///
    /// Faces are scanned in draw order. A nine explodes and draws one more
    /// face. A zero draws one more face only if it is the first reroll and no
    /// nine has fired yet. Any other face ends the scan and is the terminal
    /// face; faces after it (the second hero die, for instance) are recorded
    /// but never read.
    pub fn accumulate<R: RandomSource + ?Sized>(
        &self,
        count: DiceCount,
        source: &mut R,
    ) -> MechResult<RollOutcome> {
        let mut sequence: Vec<DieFace> = (0..count.get())
            .map(|_| ExplodingDie::draw(source))
            .collect();
        let mut nines = 0u32;
        let mut zeroes = 0u32;
        let mut index = 0;
        let mut terminal = None;

        while index < sequence.len() {
            if index >= self.rules.max_faces {
                return Err(MechError::ExhaustedExplosion(self.rules.max_faces));
            }

            let face = &mut sequence[index];
            if face.value == ExplodingDie::EXPLODING_FACE {
                nines += 1;
                face.exploded = true;
            } else if face.value == ExplodingDie::REROLL_FACE && zeroes == 0 && nines == 0 {
                zeroes += 1;
                face.rerolled_zero = true;
            } else {
                terminal = Some(face.value);
                break;
            }

            sequence.push(ExplodingDie::draw(source));
            index += 1;
        }

        // Every reroll appends a face, so the scan always ends on a terminal
        // face unless the bound fired above.
        let Some(value) = terminal else {
            return Err(MechError::ExhaustedExplosion(self.rules.max_faces));
        };

        let total = i32::try_from(nines)
            .ok()
            .and_then(|n| self.rules.explosion_bonus.checked_mul(n))
            .and_then(|bonus| bonus.checked_add(i32::from(value)))
            .ok_or(MechError::Overflow("roll total"))?;
        tracing::debug!(total, nines, zeroes, faces = sequence.len(), "roll settled");

        Ok(RollOutcome {
            total,
            nines,
            zeroes,
            sequence,
        })
    }
}
