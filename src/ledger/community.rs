//! Players and communities.

use serde::{Deserialize, Serialize};

use crate::core::entity::CommunityId;

/// A player and their personal resources.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    /// Unique within a session.
    pub name: String,
    pub resources: u32,
}

impl Player {
    #[must_use]
    pub fn new(name: impl Into<String>, resources: u32) -> Self {
        Self {
            name: name.into(),
            resources,
        }
    }
}

/// A group of players pooling resources.
///
/// Exists only with two or more members, and a player belongs to at most
/// one community at a time.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Community {
    pub id: CommunityId,
    pub name: String,
    pub resources: u32,
    pub member_player_names: Vec<String>,
}

impl Community {
    /// Number of members.
    #[must_use]
    pub fn member_count(&self) -> usize {
        self.member_player_names.len()
    }

    /// Whether `player` is a member.
    #[must_use]
    pub fn has_member(&self, player: &str) -> bool {
        self.member_player_names.iter().any(|name| name == player)
    }

    /// Iterate over member names.
    pub fn members(&self) -> impl Iterator<Item = &str> {
        self.member_player_names.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_membership() {
        let community = Community {
            id: CommunityId::new(1),
            name: "Riverside".to_string(),
            resources: 4,
            member_player_names: vec!["Ada".to_string(), "Bo".to_string()],
        };

        assert_eq!(community.member_count(), 2);
        assert!(community.has_member("Bo"));
        assert!(!community.has_member("Cy"));
        assert_eq!(community.members().collect::<Vec<_>>(), vec!["Ada", "Bo"]);
    }

    #[test]
    fn test_json_shape() {
        let community = Community {
            id: CommunityId::new(3),
            name: "Hilltop".to_string(),
            resources: 0,
            member_player_names: vec!["Ada".to_string(), "Bo".to_string()],
        };
        let json = serde_json::to_string(&community).unwrap();
        assert!(json.contains("\"memberPlayerNames\":[\"Ada\",\"Bo\"]"));
        assert!(json.contains("\"id\":3"));

        let player = serde_json::to_string(&Player::new("Ada", 5)).unwrap();
        assert_eq!(player, r#"{"name":"Ada","resources":5}"#);
    }
}
