//! Pinned cards and their owners.
//!
//! - `PinRegistry`: Cards removed from circulation, tagged with their deck
//! - `AssignmentLedger`: Which player or community carries each pinned trait

pub mod assignments;
pub mod registry;

pub use assignments::AssignmentLedger;
pub use registry::PinRegistry;
