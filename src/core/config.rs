//! Engine configuration.
//!
//! The companion app ships one `EngineConfig` (usually the defaults) and
//! hands it to every transition that needs a cost constant. Fields missing
//! from a JSON config file fall back to the defaults.
//!
//! ```
//! use society_deck::core::EngineConfig;
//!
//! let config = EngineConfig::default()
//!     .with_cost_per_member(2)
//!     .with_starting_resources(4);
//!
//! assert_eq!(config.cost_per_member, 2);
//! assert_eq!(config.reveal_slots, 3);
//! ```

use serde::{Deserialize, Serialize};

use super::error::ConfigError;

/// Cost constants and starting values for a session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Resource cost per community member, used both for joining and
    /// as the unit of upkeep.
    pub cost_per_member: u32,

    /// Trait-draw cost reduction granted by each Efficient member.
    pub efficient_reduction_per_member: u32,

    /// Base cost of drawing an individual trait whose card has no
    /// `traitCost` of its own.
    pub individual_trait_base_cost: u32,

    /// Base cost of drawing a community trait.
    pub community_trait_base_cost: u32,

    /// Number of face-up slots in a reveal deck.
    pub reveal_slots: usize,

    /// Resources each player starts a new game with.
    pub starting_resources: u32,

    /// Extinction counter at the start of a game.
    pub starting_extinction: u32,

    /// Civilization counter at the start of a game.
    pub starting_civilization: u32,

    /// Faces on the die used for trait-modified rolls.
    pub die_sides: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            cost_per_member: 1,
            efficient_reduction_per_member: 2,
            individual_trait_base_cost: 2,
            community_trait_base_cost: 3,
            reveal_slots: 3,
            starting_resources: 3,
            starting_extinction: 0,
            starting_civilization: 0,
            die_sides: 6,
        }
    }
}

impl EngineConfig {
    /// Parse a config from JSON, filling in defaults for missing fields.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        tracing::debug!(
            target: "society_deck::config",
            cost_per_member = config.cost_per_member,
            reveal_slots = config.reveal_slots,
            "engine_config.loaded"
        );
        Ok(config)
    }

    /// Check the values the cost floors depend on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.cost_per_member < 1 {
            return Err(ConfigError::OutOfRange { field: "costPerMember", min: 1 });
        }
        if self.reveal_slots < 1 {
            return Err(ConfigError::OutOfRange { field: "revealSlots", min: 1 });
        }
        if self.die_sides < 1 {
            return Err(ConfigError::OutOfRange { field: "dieSides", min: 1 });
        }
        Ok(())
    }

    /// Set the per-member cost.
    #[must_use]
    pub fn with_cost_per_member(mut self, cost: u32) -> Self {
        self.cost_per_member = cost;
        self
    }

    /// Set the Efficient reduction per member.
    #[must_use]
    pub fn with_efficient_reduction(mut self, reduction: u32) -> Self {
        self.efficient_reduction_per_member = reduction;
        self
    }

    /// Set the community trait base cost.
    #[must_use]
    pub fn with_community_trait_cost(mut self, cost: u32) -> Self {
        self.community_trait_base_cost = cost;
        self
    }

    /// Set the number of reveal slots.
    #[must_use]
    pub fn with_reveal_slots(mut self, slots: usize) -> Self {
        self.reveal_slots = slots;
        self
    }

    /// Set the starting resources per player.
    #[must_use]
    pub fn with_starting_resources(mut self, resources: u32) -> Self {
        self.starting_resources = resources;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.cost_per_member, 1);
        assert_eq!(config.efficient_reduction_per_member, 2);
        assert_eq!(config.reveal_slots, 3);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EngineConfig::from_json_str(r#"{"costPerMember": 2}"#).unwrap();
        assert_eq!(config.cost_per_member, 2);
        assert_eq!(config.reveal_slots, 3);
        assert_eq!(config.die_sides, 6);
    }

    #[test]
    fn test_zero_cost_rejected() {
        let err = EngineConfig::from_json_str(r#"{"costPerMember": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::OutOfRange { field: "costPerMember", .. }));
    }

    #[test]
    fn test_malformed_json_rejected() {
        let err = EngineConfig::from_json_str("{").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
