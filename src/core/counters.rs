//! Extinction and civilization counters.

use serde::{Deserialize, Serialize};

/// Which counter to change.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CounterKind {
    Extinction,
    Civilization,
}

/// The two game-wide counters. Never negative.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Counters {
    pub extinction: u32,
    pub civilization: u32,
}

impl Counters {
    #[must_use]
    pub fn new(extinction: u32, civilization: u32) -> Self {
        Self {
            extinction,
            civilization,
        }
    }

    /// Read one counter.
    #[must_use]
    pub fn get(&self, kind: CounterKind) -> u32 {
        match kind {
            CounterKind::Extinction => self.extinction,
            CounterKind::Civilization => self.civilization,
        }
    }

    /// Apply a signed change, clamped at zero.
    #[must_use]
    pub fn adjust(&self, kind: CounterKind, delta: i64) -> Self {
        let value = i64::from(self.get(kind)).saturating_add(delta).max(0);
        let value = u32::try_from(value).unwrap_or(u32::MAX);

        let mut next = *self;
        match kind {
            CounterKind::Extinction => next.extinction = value,
            CounterKind::Civilization => next.civilization = value,
        }
        next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adjust() {
        let counters = Counters::new(2, 0);
        let counters = counters.adjust(CounterKind::Extinction, 3);
        assert_eq!(counters.get(CounterKind::Extinction), 5);

        let counters = counters.adjust(CounterKind::Civilization, -4);
        assert_eq!(counters.civilization, 0);
        assert_eq!(counters.extinction, 5);
    }
}
