//! Trait-aware dice rolls.
//!
//! The UI animates rolls; the engine only decides the result. Lucky grants
//! a reroll that keeps the better face. Survivalist adds one to survival
//! rolls, never beyond the die's highest face.

use smallvec::SmallVec;

use crate::core::rng::GameRng;

/// What a roll is for.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RollKind {
    Standard,
    /// Rolls against hazards and disasters.
    Survival,
}

/// Adjustments a player's traits apply to their rolls.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RollModifiers {
    /// Extra rolls; the best face is kept.
    pub rerolls: u8,
    /// Added to survival rolls.
    pub survival_bonus: u32,
}

/// A finished roll.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DiceRoll {
    /// Every face rolled, in order.
    pub faces: SmallVec<[u32; 2]>,
    /// The face kept plus any bonus.
    pub total: u32,
}

/// Roll one die with `sides` faces under `modifiers`.
///
/// ```
/// use society_deck::core::GameRng;
/// use society_deck::effects::{roll_die, RollKind, RollModifiers};
///
/// let mut rng = GameRng::new(3);
/// let lucky = RollModifiers { rerolls: 1, survival_bonus: 0 };
/// let roll = roll_die(&mut rng, 6, lucky, RollKind::Standard);
/// assert_eq!(roll.faces.len(), 2);
/// assert_eq!(roll.total, *roll.faces.iter().max().unwrap());
/// ```
pub fn roll_die(rng: &mut GameRng, sides: u32, modifiers: RollModifiers, kind: RollKind) -> DiceRoll {
    let faces: SmallVec<[u32; 2]> = (0..=modifiers.rerolls).map(|_| rng.roll_die(sides)).collect();
    let best = faces.iter().copied().max().unwrap_or(0);

    let total = match kind {
        RollKind::Survival => (best + modifiers.survival_bonus).min(sides),
        RollKind::Standard => best,
    };

    tracing::trace!(target: "society_deck::dice", ?faces, total, "dice.roll");
    DiceRoll { faces, total }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_roll() {
        let mut rng = GameRng::new(11);
        for _ in 0..100 {
            let roll = roll_die(&mut rng, 6, RollModifiers::default(), RollKind::Standard);
            assert_eq!(roll.faces.len(), 1);
            assert_eq!(roll.total, roll.faces[0]);
            assert!((1..=6).contains(&roll.total));
        }
    }

    #[test]
    fn test_reroll_keeps_best() {
        let mut rng = GameRng::new(11);
        let mods = RollModifiers { rerolls: 1, survival_bonus: 0 };
        for _ in 0..100 {
            let roll = roll_die(&mut rng, 6, mods, RollKind::Standard);
            assert_eq!(roll.total, roll.faces[0].max(roll.faces[1]));
        }
    }

    #[test]
    fn test_survival_bonus_capped() {
        let mut rng = GameRng::new(11);
        let mods = RollModifiers { rerolls: 0, survival_bonus: 1 };
        for _ in 0..100 {
            let roll = roll_die(&mut rng, 6, mods, RollKind::Survival);
            assert_eq!(roll.total, (roll.faces[0] + 1).min(6));

            let standard = roll_die(&mut rng, 6, mods, RollKind::Standard);
            assert_eq!(standard.total, standard.faces[0]);
        }
    }
}
