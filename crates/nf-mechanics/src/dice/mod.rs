//! The exploding ten-sided die and the random sources that drive it.
//!
//! A face is a value from 0 to 9; the die's native 10 is read as 0. A 9
//! explodes (reroll, add a bonus) and the very first 0 of a roll is rerolled
//! once. Those rules live in [`roll::RollAccumulator`]; this module only draws
//! single faces.

pub mod roll;

pub use roll::{DiceCount, RollAccumulator, RollOutcome};

use rand::Rng;
use rand::rngs::StdRng;
use serde::{Deserialize, Serialize};

/// A uniform source of floats in `[0, 1)`.
///
/// Injected into every roll so that hosts pick their own generator and tests
/// can script exact faces.
pub trait RandomSource {
    /// Return the next float in `[0, 1)`.
    fn next_unit(&mut self) -> f64;
}

impl RandomSource for StdRng {
    fn next_unit(&mut self) -> f64 {
        self.random::<f64>()
    }
}

impl<T: RandomSource + ?Sized> RandomSource for &mut T {
    fn next_unit(&mut self) -> f64 {
        (**self).next_unit()
    }
}

/// A scripted source that yields fixed faces in order, cycling at the end.
///
/// Faces are given as die faces (0-9); 10 is accepted and read as 0. An empty
/// script always yields a 1.
#[derive(Debug, Clone, Default)]
pub struct FixedSource {
    faces: Vec<u8>,
    index: usize,
}

impl FixedSource {
    /// Create a source that replays the given faces.
    pub fn new(faces: impl IntoIterator<Item = u8>) -> Self {
        Self {
            faces: faces.into_iter().map(|f| f % 10).collect(),
            index: 0,
        }
    }

    /// How many values have been drawn so far.
    pub fn draws(&self) -> usize {
        self.index
    }
}

impl RandomSource for FixedSource {
    fn next_unit(&mut self) -> f64 {
        let face = if self.faces.is_empty() {
            1
        } else {
            self.faces[self.index % self.faces.len()]
        };
        self.index += 1;
        let native = if face == 0 { 10 } else { face };
        // Middle of the native value's bucket.
        (f64::from(native) - 0.5) / 10.0
    }
}

/// One recorded face of an exploding d10.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DieFace {
    /// The face value, 0 to 9.
    pub value: u8,
    /// This nine exploded into another draw.
    pub exploded: bool,
    /// This zero was rerolled once without bonus.
    pub rerolled_zero: bool,
}

impl DieFace {
    /// A fresh face with no flags set.
    pub fn new(value: u8) -> Self {
        Self {
            value: value % 10,
            exploded: false,
            rerolled_zero: false,
        }
    }

    /// Returns true if this face neither exploded nor was rerolled.
    pub fn is_terminal(&self) -> bool {
        !self.exploded && !self.rerolled_zero
    }
}

impl std::fmt::Display for DieFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.exploded {
            write!(f, "{}!", self.value)
        } else if self.rerolled_zero {
            write!(f, "{}~", self.value)
        } else {
            write!(f, "{}", self.value)
        }
    }
}

/// A single ten-sided die whose 10 reads as 0.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExplodingDie;

impl ExplodingDie {
    /// Number of sides.
    pub const SIDES: u8 = 10;
    /// The face that explodes.
    pub const EXPLODING_FACE: u8 = 9;
    /// The face that is rerolled once.
    pub const REROLL_FACE: u8 = 0;

    /// Draw one face from the source.
    pub fn draw<R: RandomSource + ?Sized>(source: &mut R) -> DieFace {
        let unit = source.next_unit();
        debug_assert!(
            (0.0..1.0).contains(&unit),
            "random source returned {unit}, expected [0, 1)"
        );
        let bucket = (unit * f64::from(Self::SIDES)).floor();
        let native = (bucket.clamp(0.0, f64::from(Self::SIDES - 1)) as u8) + 1;
        let face = DieFace::new(native % Self::SIDES);
        tracing::trace!(native, face = face.value, "drew face");
        face
    }
}
