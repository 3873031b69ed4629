//! Clamped counters for wounds and hero points.

use serde::{Deserialize, Serialize};

/// A named counter clamped between min and max.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Track {
    /// Display name of the track.
    pub name: String,
    /// Current value.
    pub current: i32,
    /// Maximum value.
    pub max: i32,
    /// Minimum value (usually 0).
    pub min: i32,
}

impl Track {
    /// Create a track starting at its maximum value.
    pub fn full(name: impl Into<String>, max: i32) -> Self {
        Self::with_range(name, max, 0, max)
    }

    /// Create a track starting at zero.
    pub fn empty(name: impl Into<String>, max: i32) -> Self {
        Self::with_range(name, 0, 0, max)
    }

    /// Create a track with a custom minimum and starting value.
    pub fn with_range(name: impl Into<String>, current: i32, min: i32, max: i32) -> Self {
        Self {
            name: name.into(),
            current: current.clamp(min, max),
            max,
            min,
        }
    }

    /// Adjust the track by a delta, clamping to bounds. Returns the new value.
    pub fn adjust(&mut self, delta: i32) -> i32 {
        self.current = self.current.saturating_add(delta).clamp(self.min, self.max);
        self.current
    }

    /// Returns true if the track is at its minimum value.
    pub fn is_empty(&self) -> bool {
        self.current <= self.min
    }

    /// Returns true if the track is at its maximum value.
    pub fn is_full(&self) -> bool {
        self.current >= self.max
    }
}

impl std::fmt::Display for Track {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}/{}", self.name, self.current, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_and_empty() {
        let hero = Track::full("Hero Points", 3);
        assert_eq!(hero.current, 3);
        assert!(hero.is_full());

        let wounds = Track::empty("Wounds", 12);
        assert_eq!(wounds.current, 0);
        assert!(wounds.is_empty());
        assert!(!wounds.is_full());
    }

    #[test]
    fn adjust_clamps() {
        let mut wounds = Track::empty("Wounds", 8);
        assert_eq!(wounds.adjust(6), 6);
        assert_eq!(wounds.adjust(6), 8);
        assert!(wounds.is_full());
        assert_eq!(wounds.adjust(-20), 0);
    }

    #[test]
    fn with_range_clamps_initial() {
        let t = Track::with_range("Test", 100, 0, 10);
        assert_eq!(t.current, 10);
    }

    #[test]
    fn adjust_saturates() {
        let mut wounds = Track::with_range("Wounds", 5, 0, i32::MAX);
        assert_eq!(wounds.adjust(i32::MAX), i32::MAX);
        assert_eq!(wounds.adjust(i32::MIN), 0);
    }

    #[test]
    fn display() {
        assert_eq!(Track::full("Hero Points", 2).to_string(), "Hero Points: 2/2");
    }
}
