//! Players, communities and their resource balances.

pub mod community;
pub mod resources;

pub use community::{Community, Player};
pub use resources::{JoinTerms, ResourceLedger, UpkeepOutcome};
