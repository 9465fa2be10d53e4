//! Session state: everything one game of the companion app tracks.
//!
//! ## Session
//!
//! - Counters (extinction, civilization)
//! - Player roster and communities
//! - Pinned cards and who carries them
//! - Turn order
//! - One `DeckState` per deck
//!
//! Sessions are values. Every transition borrows the current session and
//! returns the next one; `im` collections keep the copy cheap. Requests
//! that do not make sense (an unknown player, a stale pin, a card that is
//! not face up) leave the session unchanged.

use std::collections::BTreeMap;

use im::Vector;

use super::action::SessionAction;
use super::config::EngineConfig;
use super::counters::{CounterKind, Counters};
use super::entity::{CardId, CommunityId, PinId};
use super::error::RosterError;
use super::rng::GameRng;
use super::turn::TurnOrder;
use crate::cards::{CardCatalog, PinnedCard};
use crate::decks::{DeckId, DeckKind, DeckState, DrawDeck, RevealDeck};
use crate::effects::{roll_die, DiceRoll, RollKind, TraitEffectResolver};
use crate::ledger::{Community, JoinTerms, Player, ResourceLedger, UpkeepOutcome};
use crate::pins::{AssignmentLedger, PinRegistry};

/// The complete state of one game.
///
/// ## Example
///
/// ```
/// use society_deck::cards::{CardCatalog, CardDefinition};
/// use society_deck::core::{EngineConfig, GameRng, Session, SessionAction};
/// use society_deck::decks::DeckId;
///
/// let catalog = CardCatalog::new()
///     .with_deck(DeckId::Events, vec![CardDefinition::new("flood", "Flood", 2)])
///     .unwrap();
/// let config = EngineConfig::default();
/// let mut rng = GameRng::new(7);
///
/// let session = Session::new_game(&catalog, &config, ["Ada", "Bo"]);
/// let session = session.apply(&SessionAction::Draw { deck: DeckId::Events }, &catalog, &config, &mut rng);
///
/// assert!(session.deck(DeckId::Events).drawn_card.is_some());
/// assert_eq!(session.players[0].resources, 3);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Session {
    pub counters: Counters,
    pub players: Vector<Player>,
    pub communities: Vector<Community>,
    /// Id the next community will receive.
    pub next_community_id: CommunityId,
    pub pins: PinRegistry,
    pub assignments: AssignmentLedger,
    pub turn_order: TurnOrder,
    pub decks: BTreeMap<DeckId, DeckState>,
}

impl Session {
    /// Start a game: full decks, starting balances and counters.
    ///
    /// Repeated player names are skipped.
    #[must_use]
    pub fn new_game<S: Into<String>>(
        catalog: &CardCatalog,
        config: &EngineConfig,
        player_names: impl IntoIterator<Item = S>,
    ) -> Self {
        let mut players: Vector<Player> = Vector::new();
        for name in player_names {
            let name = name.into();
            if players.iter().any(|p| p.name == name) {
                tracing::warn!(target: "society_deck::session", player = %name, "session.duplicate_player");
                continue;
            }
            players.push_back(Player::new(name, config.starting_resources));
        }

        let decks = DeckId::ALL
            .iter()
            .map(|&deck| (deck, DeckState::new(catalog.definitions(deck))))
            .collect();

        let mut session = Self {
            counters: Counters::new(config.starting_extinction, config.starting_civilization),
            players,
            next_community_id: CommunityId::new(1),
            decks,
            ..Self::default()
        };
        session.turn_order = TurnOrder::rebuild(&TurnOrder::default(), &session.players, &session.communities);

        tracing::info!(
            target: "society_deck::session",
            players = session.players.len(),
            "session.new_game"
        );
        session
    }

    /// Apply one action.
    ///
    /// Rejected requests are logged and return an unchanged session.
    #[must_use]
    pub fn apply(
        &self,
        action: &SessionAction,
        catalog: &CardCatalog,
        config: &EngineConfig,
        rng: &mut GameRng,
    ) -> Self {
        tracing::debug!(target: "society_deck::session", action = action.name(), "session.apply");

        let roster = |result: Result<Session, RosterError>| {
            result.unwrap_or_else(|error| {
                tracing::warn!(
                    target: "society_deck::session",
                    action = action.name(),
                    %error,
                    "session.rejected"
                );
                self.clone()
            })
        };

        match action {
            SessionAction::Draw { deck } => self.draw(*deck, rng),
            SessionAction::Reveal { deck } => self.reveal(*deck, config, rng),
            SessionAction::SelectCard { deck, card } => self.select_card(*deck, card, config, rng),
            SessionAction::PinCard { deck, card } => self.pin_card(*deck, card, config, rng).0,
            SessionAction::Unpin { pin } => self.unpin(*pin),
            SessionAction::Shuffle { deck } => self.shuffle(*deck, catalog),
            SessionAction::ClearRevealed { deck } => self.clear_revealed(*deck),
            SessionAction::AssignToPlayer { pin, player } => self.assign_to_player(*pin, player),
            SessionAction::AssignToCommunity { pin, community } => self.assign_to_community(*pin, *community),
            SessionAction::ClearAssignment { pin } => self.clear_assignment(*pin),
            SessionAction::FormCommunity { name, members, opt_out } => {
                roster(self.form_community(name, members, opt_out, config).map(|(session, _)| session))
            }
            SessionAction::AddMembers {
                community,
                members,
                opt_out,
            } => roster(self.add_members(*community, members, opt_out, config)),
            SessionAction::Disband { community } => roster(self.disband(*community)),
            SessionAction::PayUpkeep { community } => self.pay_upkeep(*community, config).0,
            SessionAction::AdjustPlayerResources { player, delta } => self.adjust_player_resources(player, *delta),
            SessionAction::AdjustCommunityResources { community, delta } => {
                self.adjust_community_resources(*community, *delta)
            }
            SessionAction::AdjustCounter { counter, delta } => self.adjust_counter(*counter, *delta),
            SessionAction::AdvanceTurn => self.advance_turn(),
            SessionAction::AddPlayer { name } => roster(self.add_player(name, config)),
            SessionAction::RemovePlayer { name } => roster(self.remove_player(name)),
        }
    }

    // === Queries ===

    /// State of one deck. Decks missing from a hand-built session read as
    /// empty.
    #[must_use]
    pub fn deck(&self, deck: DeckId) -> &DeckState {
        static EMPTY: std::sync::OnceLock<DeckState> = std::sync::OnceLock::new();
        self.decks
            .get(&deck)
            .unwrap_or_else(|| EMPTY.get_or_init(DeckState::default))
    }

    #[must_use]
    pub fn player(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    #[must_use]
    pub fn community(&self, id: CommunityId) -> Option<&Community> {
        self.communities.iter().find(|c| c.id == id)
    }

    /// Trait queries over this session's pins.
    #[must_use]
    pub fn resolver<'a>(&'a self, config: &'a EngineConfig) -> TraitEffectResolver<'a> {
        TraitEffectResolver::new(&self.pins, &self.assignments, config)
    }

    /// Copies of `card` in circulation for `deck`: every pile plus pinned
    /// copies. Equals the definition's quantity while the deck is sound.
    #[must_use]
    pub fn circulating_copies(&self, deck: DeckId, card: &CardId) -> usize {
        self.deck(deck).circulating_copies(card, self.pins.count_for(deck, card))
    }

    /// What `player` pays to take the individual trait `card`.
    ///
    /// Uses the card's own `traitCost` when it has one.
    #[must_use]
    pub fn individual_trait_cost(
        &self,
        player: &str,
        card: &CardId,
        catalog: &CardCatalog,
        config: &EngineConfig,
    ) -> u32 {
        let base = catalog
            .get(DeckId::IndividualTraits, card)
            .and_then(|definition| definition.trait_cost)
            .unwrap_or(config.individual_trait_base_cost);
        self.resolver(config)
            .compute_individual_trait_cost(player, &self.communities, base)
    }

    /// What a community pays to take a community trait, or `None` for an
    /// unknown community.
    #[must_use]
    pub fn community_trait_cost(&self, community: CommunityId, config: &EngineConfig) -> Option<u32> {
        let community = self.community(community)?;
        Some(self.resolver(config).compute_community_trait_cost(
            community,
            &self.turn_order,
            config.community_trait_base_cost,
        ))
    }

    /// Upkeep `community` owes, or `None` for an unknown community.
    #[must_use]
    pub fn upkeep_cost(&self, community: CommunityId, config: &EngineConfig) -> Option<u32> {
        let community = self.community(community)?;
        Some(self.resolver(config).compute_upkeep_cost(community))
    }

    /// Roll for `player` with their trait modifiers applied.
    pub fn roll(&self, player: &str, kind: RollKind, config: &EngineConfig, rng: &mut GameRng) -> DiceRoll {
        let modifiers = self.resolver(config).roll_modifiers(player);
        roll_die(rng, config.die_sides, modifiers, kind)
    }

    // === Decks ===

    /// Draw from a draw deck. Reveal decks are left alone.
    #[must_use]
    pub fn draw(&self, deck: DeckId, rng: &mut GameRng) -> Self {
        if !self.expect_kind(deck, DeckKind::Draw) {
            return self.clone();
        }
        self.with_deck(deck, DrawDeck::draw(self.deck(deck), rng))
    }

    /// Reveal a fresh row in a reveal deck.
    #[must_use]
    pub fn reveal(&self, deck: DeckId, config: &EngineConfig, rng: &mut GameRng) -> Self {
        if !self.expect_kind(deck, DeckKind::Reveal) {
            return self.clone();
        }
        let next = RevealDeck::new(config.reveal_slots).reveal(self.deck(deck), rng);
        self.with_deck(deck, next)
    }

    /// Choose a revealed card from a reveal deck.
    #[must_use]
    pub fn select_card(&self, deck: DeckId, card: &CardId, config: &EngineConfig, rng: &mut GameRng) -> Self {
        if !self.expect_kind(deck, DeckKind::Reveal) {
            return self.clone();
        }
        let next = RevealDeck::new(config.reveal_slots).select_card(self.deck(deck), card, rng);
        self.with_deck(deck, next)
    }

    /// Pin a revealed card. Returns the new pin when the card was face up.
    #[must_use]
    pub fn pin_card(
        &self,
        deck: DeckId,
        card: &CardId,
        config: &EngineConfig,
        rng: &mut GameRng,
    ) -> (Self, Option<PinnedCard>) {
        if !self.expect_kind(deck, DeckKind::Reveal) {
            return (self.clone(), None);
        }

        let (state, taken) = RevealDeck::new(config.reveal_slots).pin_card(self.deck(deck), card, rng);
        let Some(taken) = taken else {
            tracing::debug!(target: "society_deck::session", %deck, card = %card, "session.pin_not_revealed");
            return (self.clone(), None);
        };

        let (pins, pinned) = self.pins.add(taken, deck);
        let mut next = self.with_deck(deck, state);
        next.pins = pins;
        (next, Some(pinned))
    }

    /// Unpin a card: it goes to its deck's discard pile and loses its
    /// assignment.
    #[must_use]
    pub fn unpin(&self, pin: PinId) -> Self {
        let (pins, removed) = self.pins.remove(pin);
        let Some(pinned) = removed else {
            tracing::debug!(target: "society_deck::session", %pin, "session.unknown_pin");
            return self.clone();
        };

        let mut next = self.with_deck(pinned.deck, RevealDeck::unpin(self.deck(pinned.deck), &pinned));
        next.pins = pins;
        next.assignments = self.assignments.clear(pin);
        next
    }

    /// Shuffle a deck. Draw decks reset completely; reveal decks leave
    /// their pinned copies out.
    #[must_use]
    pub fn shuffle(&self, deck: DeckId, catalog: &CardCatalog) -> Self {
        let definitions = catalog.definitions(deck);
        let next = match deck.kind() {
            DeckKind::Draw => DrawDeck::shuffle(definitions),
            DeckKind::Reveal => RevealDeck::shuffle(self.deck(deck), definitions, self.pins.filter_by_deck(deck)),
        };
        self.with_deck(deck, next)
    }

    /// Discard the revealed row of a reveal deck.
    #[must_use]
    pub fn clear_revealed(&self, deck: DeckId) -> Self {
        if !self.expect_kind(deck, DeckKind::Reveal) {
            return self.clone();
        }
        self.with_deck(deck, RevealDeck::discard_revealed(self.deck(deck)))
    }

    // === Assignments ===

    /// Give a pinned individual trait to a player.
    #[must_use]
    pub fn assign_to_player(&self, pin: PinId, player: &str) -> Self {
        let pinned_here = self.pins.get(pin).is_some_and(|p| p.deck == DeckId::IndividualTraits);
        if !pinned_here || self.player(player).is_none() {
            tracing::debug!(target: "society_deck::session", %pin, player, "session.assignment_rejected");
            return self.clone();
        }
        Self {
            assignments: self.assignments.assign_player(pin, player),
            ..self.clone()
        }
    }

    /// Give a pinned community trait to a community.
    #[must_use]
    pub fn assign_to_community(&self, pin: PinId, community: CommunityId) -> Self {
        let pinned_here = self.pins.get(pin).is_some_and(|p| p.deck == DeckId::CommunityTraits);
        if !pinned_here || self.community(community).is_none() {
            tracing::debug!(target: "society_deck::session", %pin, %community, "session.assignment_rejected");
            return self.clone();
        }
        Self {
            assignments: self.assignments.assign_community(pin, community),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn clear_assignment(&self, pin: PinId) -> Self {
        Self {
            assignments: self.assignments.clear(pin),
            ..self.clone()
        }
    }

    // === Communities ===

    /// Form a community from `members`.
    ///
    /// Charismatic members join for free. Opt-out requests are honored
    /// only for members who may opt out; the rest pool as usual.
    pub fn form_community(
        &self,
        name: &str,
        members: &[String],
        opt_out: &[String],
        config: &EngineConfig,
    ) -> Result<(Self, CommunityId), RosterError> {
        ResourceLedger::validate_formation(&self.players, &self.communities, members)?;

        let id = self.next_community_id;
        let terms = self.join_terms(members, opt_out, config);
        let (players, community) = ResourceLedger::form_community(&self.players, members, &terms, id, name);

        let mut next = self.clone();
        next.players = players;
        next.communities.push_back(community);
        next.next_community_id = id.next();
        Ok((next.with_rebuilt_turns(), id))
    }

    /// Add players to an existing community.
    pub fn add_members(
        &self,
        community: CommunityId,
        members: &[String],
        opt_out: &[String],
        config: &EngineConfig,
    ) -> Result<Self, RosterError> {
        ResourceLedger::validate_new_members(&self.players, &self.communities, community, members)?;
        let index = self.community_index(community)?;

        let terms = self.join_terms(members, opt_out, config);
        let (players, grown) = ResourceLedger::add_members(&self.players, &self.communities[index], members, &terms);

        let mut next = self.clone();
        next.players = players;
        next.communities.set(index, grown);
        Ok(next.with_rebuilt_turns())
    }

    /// Disband a community. Its pool is lost.
    pub fn disband(&self, community: CommunityId) -> Result<Self, RosterError> {
        let (communities, assignments, removed) =
            ResourceLedger::disband(&self.communities, community, &self.assignments);
        if removed.is_none() {
            return Err(RosterError::UnknownCommunity(community));
        }

        let next = Self {
            communities,
            assignments,
            ..self.clone()
        };
        Ok(next.with_rebuilt_turns())
    }

    /// Charge a community its upkeep.
    #[must_use]
    pub fn pay_upkeep(&self, community: CommunityId, config: &EngineConfig) -> (Self, Option<UpkeepOutcome>) {
        let Ok(index) = self.community_index(community) else {
            return (self.clone(), None);
        };

        let upkeep = self.resolver(config).compute_upkeep_cost(&self.communities[index]);
        let (paid, outcome) = ResourceLedger::pay_upkeep(&self.communities[index], upkeep);
        (
            Self {
                communities: self.communities.update(index, paid),
                ..self.clone()
            },
            Some(outcome),
        )
    }

    // === Balances and counters ===

    #[must_use]
    pub fn adjust_player_resources(&self, player: &str, delta: i64) -> Self {
        Self {
            players: ResourceLedger::adjust_player(&self.players, player, delta),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn adjust_community_resources(&self, community: CommunityId, delta: i64) -> Self {
        let Ok(index) = self.community_index(community) else {
            return self.clone();
        };
        let adjusted = ResourceLedger::adjust_community(&self.communities[index], delta);
        Self {
            communities: self.communities.update(index, adjusted),
            ..self.clone()
        }
    }

    #[must_use]
    pub fn adjust_counter(&self, counter: CounterKind, delta: i64) -> Self {
        Self {
            counters: self.counters.adjust(counter, delta),
            ..self.clone()
        }
    }

    // === Turns and roster ===

    #[must_use]
    pub fn advance_turn(&self) -> Self {
        Self {
            turn_order: self.turn_order.advance(),
            ..self.clone()
        }
    }

    /// Add a player with the starting balance.
    pub fn add_player(&self, name: &str, config: &EngineConfig) -> Result<Self, RosterError> {
        if self.player(name).is_some() {
            return Err(RosterError::DuplicatePlayer(name.to_string()));
        }
        let mut next = self.clone();
        next.players.push_back(Player::new(name, config.starting_resources));
        Ok(next.with_rebuilt_turns())
    }

    /// Remove a player.
    ///
    /// Their traits stay pinned but become unassigned. They leave their
    /// community, and a community left with fewer than two members is
    /// disbanded.
    pub fn remove_player(&self, name: &str) -> Result<Self, RosterError> {
        let index = self
            .players
            .iter()
            .position(|p| p.name == name)
            .ok_or_else(|| RosterError::UnknownPlayer(name.to_string()))?;

        let mut next = self.clone();
        next.players.remove(index);
        next.assignments = self.assignments.remove_player(name);

        if let Some(community) = ResourceLedger::community_of(&self.communities, name) {
            let shrunk = ResourceLedger::remove_member(community, name);
            if shrunk.member_count() < 2 {
                let (communities, assignments, _) =
                    ResourceLedger::disband(&next.communities, community.id, &next.assignments);
                next.communities = communities;
                next.assignments = assignments;
            } else if let Ok(position) = next.community_index(community.id) {
                next.communities.set(position, shrunk);
            }
        }

        tracing::info!(target: "society_deck::session", player = name, "session.player_removed");
        Ok(next.with_rebuilt_turns())
    }

    // === Helpers ===

    fn with_deck(&self, deck: DeckId, state: DeckState) -> Self {
        let mut next = self.clone();
        next.decks.insert(deck, state);
        next
    }

    fn with_rebuilt_turns(mut self) -> Self {
        self.turn_order = TurnOrder::rebuild(&self.turn_order, &self.players, &self.communities);
        self
    }

    fn expect_kind(&self, deck: DeckId, kind: DeckKind) -> bool {
        let matches = deck.kind() == kind;
        if !matches {
            tracing::debug!(target: "society_deck::session", %deck, ?kind, "session.wrong_deck_kind");
        }
        matches
    }

    fn community_index(&self, community: CommunityId) -> Result<usize, RosterError> {
        self.communities
            .iter()
            .position(|c| c.id == community)
            .ok_or(RosterError::UnknownCommunity(community))
    }

    fn join_terms(&self, members: &[String], opt_out: &[String], config: &EngineConfig) -> JoinTerms {
        let resolver = self.resolver(config);
        let allowed: Vec<&String> = opt_out
            .iter()
            .filter(|name| {
                let allowed = resolver.may_opt_out(name);
                if !allowed {
                    tracing::debug!(target: "society_deck::session", player = %name, "session.opt_out_refused");
                }
                allowed
            })
            .collect();

        JoinTerms::new(config.cost_per_member)
            .with_opt_out(allowed.into_iter().cloned())
            .with_waived(resolver.formation_waivers(members))
    }
}
