//! Trait effect resolution.
//!
//! The `TraitEffectResolver` reads which trait cards are pinned and who
//! they are assigned to, and derives costs, waivers and roll modifiers from
//! them. It never changes state.
//!
//! ## Cost Rules
//!
//! - Upkeep is one `cost_per_member` unit per member, minus one unit per
//!   Self-Sufficient member, plus one unit per Helpless member. It never
//!   drops below a single unit.
//! - Each Efficient member reduces trait-draw costs by
//!   `efficient_reduction_per_member`. Trait costs never drop below 1.

use im::Vector;

use crate::cards::TraitEffect;
use crate::core::config::EngineConfig;
use crate::core::turn::TurnOrder;
use crate::decks::DeckId;
use crate::ledger::{Community, ResourceLedger};
use crate::pins::{AssignmentLedger, PinRegistry};

use super::dice::RollModifiers;

/// Read-only view over the pins and assignments of a session.
///
/// ## Example
///
/// ```
/// use society_deck::cards::{CardDefinition, PooledCard, TraitEffect};
/// use society_deck::core::EngineConfig;
/// use society_deck::decks::DeckId;
/// use society_deck::effects::TraitEffectResolver;
/// use society_deck::pins::{AssignmentLedger, PinRegistry};
///
/// let lucky = PooledCard::new(CardDefinition::new("lucky", "Lucky", 1).with_trait(TraitEffect::Lucky));
/// let (pins, pinned) = PinRegistry::new().add(lucky, DeckId::IndividualTraits);
/// let assignments = AssignmentLedger::new().assign_player(pinned.pin_id, "Ada");
/// let config = EngineConfig::default();
///
/// let resolver = TraitEffectResolver::new(&pins, &assignments, &config);
/// assert!(resolver.has_trait("Ada", TraitEffect::Lucky));
/// assert_eq!(resolver.roll_modifiers("Ada").rerolls, 1);
/// ```
pub struct TraitEffectResolver<'a> {
    pins: &'a PinRegistry,
    assignments: &'a AssignmentLedger,
    config: &'a EngineConfig,
}

impl<'a> TraitEffectResolver<'a> {
    pub fn new(pins: &'a PinRegistry, assignments: &'a AssignmentLedger, config: &'a EngineConfig) -> Self {
        Self {
            pins,
            assignments,
            config,
        }
    }

    /// Trait effects of the individual trait cards assigned to `player`.
    pub fn player_traits(&self, player: &'a str) -> impl Iterator<Item = TraitEffect> + 'a {
        let assignments = self.assignments;
        self.pins
            .filter_by_deck(DeckId::IndividualTraits)
            .filter(move |pin| assignments.player_for(pin.pin_id) == Some(player))
            .filter_map(|pin| pin.trait_effect())
    }

    #[must_use]
    pub fn has_trait(&self, player: &str, effect: TraitEffect) -> bool {
        self.pins
            .filter_by_deck(DeckId::IndividualTraits)
            .filter(|pin| self.assignments.player_for(pin.pin_id) == Some(player))
            .any(|pin| pin.trait_effect() == Some(effect))
    }

    /// Trait effects of the community trait cards assigned to `community`.
    pub fn community_traits(&self, community: &Community) -> impl Iterator<Item = TraitEffect> + 'a {
        let assignments = self.assignments;
        let id = community.id;
        self.pins
            .filter_by_deck(DeckId::CommunityTraits)
            .filter(move |pin| assignments.community_for(pin.pin_id) == Some(id))
            .filter_map(|pin| pin.trait_effect())
    }

    #[must_use]
    pub fn community_has_trait(&self, community: &Community, effect: TraitEffect) -> bool {
        self.community_traits(community).any(|t| t == effect)
    }

    /// Number of members holding `effect` as an individual trait.
    #[must_use]
    pub fn count_members_with(&self, community: &Community, effect: TraitEffect) -> u32 {
        let count = community
            .members()
            .filter(|member| self.has_trait(member, effect))
            .count();
        u32::try_from(count).unwrap_or(u32::MAX)
    }

    /// Upkeep a community owes each round.
    #[must_use]
    pub fn compute_upkeep_cost(&self, community: &Community) -> u32 {
        let unit = i64::from(self.config.cost_per_member);
        let members = i64::try_from(community.member_count()).unwrap_or(i64::MAX);
        let self_sufficient = i64::from(self.count_members_with(community, TraitEffect::SelfSufficient));
        let helpless = i64::from(self.count_members_with(community, TraitEffect::Helpless));

        let cost = (members - self_sufficient + helpless).saturating_mul(unit).max(unit);
        u32::try_from(cost).unwrap_or(u32::MAX)
    }

    /// Trait-draw reduction from a community's Efficient members.
    #[must_use]
    pub fn compute_efficient_reduction(&self, community: &Community) -> u32 {
        self.count_members_with(community, TraitEffect::Efficient)
            .saturating_mul(self.config.efficient_reduction_per_member)
    }

    /// Cost after a reduction, floored at 1.
    #[must_use]
    pub fn apply_reduction(base: u32, reduction: u32) -> u32 {
        base.saturating_sub(reduction).max(1)
    }

    /// Cost for `player` to draw an individual trait with cost `base`.
    ///
    /// Members of a community get their community's Efficient reduction.
    /// Unaffiliated players only count their own Efficient trait.
    #[must_use]
    pub fn compute_individual_trait_cost(&self, player: &str, communities: &Vector<Community>, base: u32) -> u32 {
        let reduction = match ResourceLedger::community_of(communities, player) {
            Some(community) => self.compute_efficient_reduction(community),
            None if self.has_trait(player, TraitEffect::Efficient) => self.config.efficient_reduction_per_member,
            None => 0,
        };
        Self::apply_reduction(base, reduction)
    }

    /// Cost for `community` to draw a community trait with cost `base`.
    ///
    /// On the community's own turn each member adds one to the cost.
    #[must_use]
    pub fn compute_community_trait_cost(&self, community: &Community, turn: &TurnOrder, base: u32) -> u32 {
        let surcharge = if turn.is_turn_of_community(community.id) {
            u32::try_from(community.member_count()).unwrap_or(u32::MAX)
        } else {
            0
        };
        Self::apply_reduction(base.saturating_add(surcharge), self.compute_efficient_reduction(community))
    }

    /// Charismatic players join communities for free.
    #[must_use]
    pub fn join_cost_waived(&self, player: &str) -> bool {
        self.has_trait(player, TraitEffect::Charismatic)
    }

    /// Paranoid players may keep their resources out of the pool.
    #[must_use]
    pub fn may_opt_out(&self, player: &str) -> bool {
        self.has_trait(player, TraitEffect::Paranoid)
    }

    /// The joining players whose cost is waived.
    #[must_use]
    pub fn formation_waivers(&self, joining: &[String]) -> Vec<String> {
        joining
            .iter()
            .filter(|name| self.join_cost_waived(name))
            .cloned()
            .collect()
    }

    /// Roll adjustments from `player`'s traits.
    #[must_use]
    pub fn roll_modifiers(&self, player: &str) -> RollModifiers {
        RollModifiers {
            rerolls: u8::from(self.has_trait(player, TraitEffect::Lucky)),
            survival_bonus: u32::from(self.has_trait(player, TraitEffect::Survivalist)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::{CardDefinition, PooledCard};
    use crate::core::entity::CommunityId;
    use crate::ledger::Player;

    fn trait_card(effect: TraitEffect) -> PooledCard {
        let id = effect.name().to_lowercase();
        PooledCard::new(CardDefinition::new(id, effect.name(), 2).with_trait(effect))
    }

    fn give(
        pins: &PinRegistry,
        assignments: &AssignmentLedger,
        player: &str,
        effect: TraitEffect,
    ) -> (PinRegistry, AssignmentLedger) {
        let (pins, pinned) = pins.add(trait_card(effect), DeckId::IndividualTraits);
        (pins, assignments.assign_player(pinned.pin_id, player))
    }

    fn camp(members: &[&str]) -> Community {
        Community {
            id: CommunityId::new(1),
            name: "Camp".to_string(),
            resources: 0,
            member_player_names: members.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn test_upkeep_with_self_sufficient_member() {
        let config = EngineConfig::default();
        let (pins, assignments) = give(
            &PinRegistry::new(),
            &AssignmentLedger::new(),
            "P1",
            TraitEffect::SelfSufficient,
        );
        let resolver = TraitEffectResolver::new(&pins, &assignments, &config);

        assert_eq!(resolver.compute_upkeep_cost(&camp(&["P1", "P2"])), 1);
    }

    #[test]
    fn test_upkeep_never_below_one_unit() {
        let config = EngineConfig::default().with_cost_per_member(2);
        let (pins, assignments) = give(
            &PinRegistry::new(),
            &AssignmentLedger::new(),
            "P1",
            TraitEffect::SelfSufficient,
        );
        let (pins, assignments) = give(&pins, &assignments, "P2", TraitEffect::SelfSufficient);
        let resolver = TraitEffectResolver::new(&pins, &assignments, &config);

        assert_eq!(resolver.compute_upkeep_cost(&camp(&["P1", "P2"])), 2);
    }

    #[test]
    fn test_upkeep_with_helpless_member() {
        let config = EngineConfig::default();
        let (pins, assignments) = give(
            &PinRegistry::new(),
            &AssignmentLedger::new(),
            "P3",
            TraitEffect::Helpless,
        );
        let resolver = TraitEffectResolver::new(&pins, &assignments, &config);

        assert_eq!(resolver.compute_upkeep_cost(&camp(&["P1", "P2", "P3"])), 4);
    }

    #[test]
    fn test_unassigned_pin_has_no_effect() {
        let config = EngineConfig::default();
        let (pins, _) = PinRegistry::new().add(trait_card(TraitEffect::Helpless), DeckId::IndividualTraits);
        let assignments = AssignmentLedger::new();
        let resolver = TraitEffectResolver::new(&pins, &assignments, &config);

        assert!(!resolver.has_trait("P1", TraitEffect::Helpless));
        assert_eq!(resolver.compute_upkeep_cost(&camp(&["P1", "P2"])), 2);
    }

    #[test]
    fn test_efficient_reduction_and_floor() {
        let config = EngineConfig::default();
        let (pins, assignments) = give(
            &PinRegistry::new(),
            &AssignmentLedger::new(),
            "P1",
            TraitEffect::Efficient,
        );
        let (pins, assignments) = give(&pins, &assignments, "P2", TraitEffect::Efficient);
        let resolver = TraitEffectResolver::new(&pins, &assignments, &config);
        let community = camp(&["P1", "P2"]);

        assert_eq!(resolver.compute_efficient_reduction(&community), 4);
        assert_eq!(TraitEffectResolver::apply_reduction(5, 4), 1);
        assert_eq!(TraitEffectResolver::apply_reduction(3, 4), 1);
        assert_eq!(TraitEffectResolver::apply_reduction(9, 4), 5);
    }

    #[test]
    fn test_individual_trait_cost() {
        let config = EngineConfig::default();
        let (pins, assignments) = give(
            &PinRegistry::new(),
            &AssignmentLedger::new(),
            "P1",
            TraitEffect::Efficient,
        );
        let resolver = TraitEffectResolver::new(&pins, &assignments, &config);
        let communities = Vector::unit(camp(&["P1", "P2"]));

        // P2 shares P1's Efficient reduction.
        assert_eq!(resolver.compute_individual_trait_cost("P2", &communities, 5), 3);
        assert_eq!(resolver.compute_individual_trait_cost("P1", &Vector::new(), 5), 3);
        assert_eq!(resolver.compute_individual_trait_cost("P3", &communities, 5), 5);
    }

    #[test]
    fn test_community_trait_cost_on_own_turn() {
        let config = EngineConfig::default();
        let pins = PinRegistry::new();
        let assignments = AssignmentLedger::new();
        let resolver = TraitEffectResolver::new(&pins, &assignments, &config);
        let community = camp(&["P1", "P2"]);
        let players = vec![Player::new("P1", 0), Player::new("P2", 0), Player::new("P3", 0)];

        let order = TurnOrder::rebuild(&TurnOrder::default(), &players, [&community]);
        assert_eq!(resolver.compute_community_trait_cost(&community, &order, 3), 3);

        let order = order.advance();
        assert_eq!(resolver.compute_community_trait_cost(&community, &order, 3), 5);
    }

    #[test]
    fn test_community_traits() {
        let config = EngineConfig::default();
        let community = camp(&["P1", "P2"]);
        let (pins, pinned) = PinRegistry::new().add(trait_card(TraitEffect::Lucky), DeckId::CommunityTraits);
        let assignments = AssignmentLedger::new().assign_community(pinned.pin_id, community.id);
        let resolver = TraitEffectResolver::new(&pins, &assignments, &config);

        assert!(resolver.community_has_trait(&community, TraitEffect::Lucky));
        assert!(!resolver.has_trait("P1", TraitEffect::Lucky));
        assert_eq!(resolver.community_traits(&community).collect::<Vec<_>>(), vec![TraitEffect::Lucky]);
    }

    #[test]
    fn test_waivers_and_roll_modifiers() {
        let config = EngineConfig::default();
        let (pins, assignments) = give(
            &PinRegistry::new(),
            &AssignmentLedger::new(),
            "P1",
            TraitEffect::Charismatic,
        );
        let (pins, assignments) = give(&pins, &assignments, "P2", TraitEffect::Paranoid);
        let (pins, assignments) = give(&pins, &assignments, "P2", TraitEffect::Survivalist);
        let resolver = TraitEffectResolver::new(&pins, &assignments, &config);

        let joining = vec!["P1".to_string(), "P2".to_string()];
        assert_eq!(resolver.formation_waivers(&joining), vec!["P1".to_string()]);
        assert!(resolver.may_opt_out("P2"));
        assert!(!resolver.may_opt_out("P1"));

        assert_eq!(resolver.roll_modifiers("P2"), RollModifiers { rerolls: 0, survival_bonus: 1 });
        assert_eq!(resolver.roll_modifiers("P1"), RollModifiers::default());
        assert_eq!(
            resolver.player_traits("P2").collect::<Vec<_>>(),
            vec![TraitEffect::Paranoid, TraitEffect::Survivalist]
        );
    }
}
