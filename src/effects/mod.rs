//! Trait effects: derived costs, waivers and dice.
//!
//! - `TraitEffectResolver`: Read-only queries over pinned trait cards
//! - `roll_die`: Dice rolls adjusted by `RollModifiers`
//!
//! Trait cards only take effect once pinned and assigned; an unassigned
//! pin is inert.

mod dice;
mod resolver;

pub use dice::{roll_die, DiceRoll, RollKind, RollModifiers};
pub use resolver::TraitEffectResolver;
