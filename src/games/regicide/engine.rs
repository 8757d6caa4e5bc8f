//! The turn and phase state machine.
//!
//! `TurnEngine` owns both decks and the cards in play. It borrows the
//! roster for each call, validates the action against the acting hand and
//! the current phase, and either rejects it untouched or resolves it fully.
//!
//! ## Phases
//!
//! - `Attack`: play cards, yield, or play a Jester
//! - `SufferDamage`: discard enough to cover the boss's attack
//! - `SpecialSelect`: the Jester's player picks who goes next

use std::fmt;

use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::cards::{Boss, Card, DamageOutcome, Suit};
use crate::core::{
    Action, ActionError, ActionKind, ActionRecord, ConfigError, GameConfig, InvalidAction, Phase, PlayerId,
    RandomSource,
};
use crate::decks::{HostileDeck, SharedDeck};
use crate::roster::{PlayerHand, SessionRoster};
use crate::rules::{EndReason, GameOutcome, RulesEngine, VictoryGrade};

use super::builder::RegicideBuilder;
use super::combo::is_legal_combo;
use super::resolution::{BossView, Defeat, Event, Resolution, Status};

/// Rules engine for one running game.
///
/// ## Example
///
/// ```
/// use rust_regicide::games::regicide::RegicideBuilder;
/// use rust_regicide::core::{Action, Phase, PlayerId};
/// use rust_regicide::rules::RulesEngine;
///
/// let (mut engine, mut roster) = RegicideBuilder::new().player_count(2).seed(42).build().unwrap();
/// let first = roster.current_player().unwrap();
///
/// let res = engine.apply_action(&mut roster, first, &Action::Yield).unwrap();
/// assert_eq!(res.phase, Phase::SufferDamage);
///
/// // Playing out of turn is rejected without touching anything
/// let err = engine.apply_action(&mut roster, PlayerId::new(2), &Action::Yield);
/// assert!(err.is_err());
/// ```
pub struct TurnEngine {
    pub(super) config: GameConfig,
    pub(super) castle: HostileDeck,
    pub(super) tavern: SharedDeck,
    pub(super) cards_in_play: Vec<Card>,
    /// Jester held aside while its player picks who goes next.
    pub(super) pending_special: Option<Card>,
    pub(super) phase: Phase,
    pub(super) specials_remaining: u8,
    pub(super) consecutive_yields: usize,
    pub(super) outcome: Option<GameOutcome>,
    pub(super) rng: Box<dyn RandomSource>,
    pub(super) history: Vec<ActionRecord>,
    pub(super) turn: u32,
    pub(super) initial_cards: usize,
    pub(super) specials_removed: usize,
}

impl fmt::Debug for TurnEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TurnEngine")
            .field("phase", &self.phase)
            .field("boss", self.castle.active())
            .field("tavern", &self.tavern.len())
            .field("discard", &self.tavern.discard_len())
            .field("cards_in_play", &self.cards_in_play)
            .field("specials_remaining", &self.specials_remaining)
            .field("consecutive_yields", &self.consecutive_yields)
            .field("outcome", &self.outcome)
            .finish_non_exhaustive()
    }
}

impl TurnEngine {
    // === Operations ===

    /// Attack with the cards at `indices` in the player's hand.
    ///
    /// A selection holding a Jester is played as a Jester instead.
    pub fn play_cards(
        &mut self,
        roster: &mut SessionRoster,
        player: PlayerId,
        indices: &[usize],
    ) -> Result<Resolution, ActionError> {
        self.apply_action(roster, player, &Action::play(indices))
    }

    /// Skip attacking and go straight to suffering damage.
    pub fn yield_turn(&mut self, roster: &mut SessionRoster, player: PlayerId) -> Result<Resolution, ActionError> {
        self.apply_action(roster, player, &Action::Yield)
    }

    /// Discard the cards at `indices` to cover the boss's attack.
    pub fn suffer_damage(
        &mut self,
        roster: &mut SessionRoster,
        player: PlayerId,
        indices: &[usize],
    ) -> Result<Resolution, ActionError> {
        self.apply_action(roster, player, &Action::discard(indices))
    }

    /// Play a Jester. A lone player passes no selection.
    pub fn play_special(
        &mut self,
        roster: &mut SessionRoster,
        player: PlayerId,
        indices: Option<&[usize]>,
    ) -> Result<Resolution, ActionError> {
        let action = match indices {
            Some(indices) => Action::special_from(indices),
            None => Action::special(),
        };
        self.apply_action(roster, player, &action)
    }

    /// After a Jester, give the turn to the player at `seat`.
    pub fn select_next_player(
        &mut self,
        roster: &mut SessionRoster,
        player: PlayerId,
        seat: usize,
    ) -> Result<Resolution, ActionError> {
        self.apply_action(roster, player, &Action::select_next(seat))
    }

    // === Accessors ===

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The castle deck.
    #[must_use]
    pub fn castle(&self) -> &HostileDeck {
        &self.castle
    }

    /// The boss in the fight.
    #[must_use]
    pub fn active_boss(&self) -> &Boss {
        self.castle.active()
    }

    /// Snapshot of the boss in the fight.
    #[must_use]
    pub fn boss_view(&self) -> BossView {
        BossView::of(self.castle.active(), self.castle.remaining_count())
    }

    /// The tavern deck and discard pile.
    #[must_use]
    pub fn tavern(&self) -> &SharedDeck {
        &self.tavern
    }

    /// Cards played against the current boss.
    #[must_use]
    pub fn cards_in_play(&self) -> &[Card] {
        &self.cards_in_play
    }

    /// Jester waiting for its player to pick who goes next.
    #[must_use]
    pub fn pending_special(&self) -> Option<Card> {
        self.pending_special
    }

    /// Special plays left for a lone player.
    #[must_use]
    pub fn specials_remaining(&self) -> u8 {
        self.specials_remaining
    }

    /// Yields in a row since the last attack.
    #[must_use]
    pub fn consecutive_yields(&self) -> usize {
        self.consecutive_yields
    }

    /// Every accepted action, in order.
    #[must_use]
    pub fn history(&self) -> &[ActionRecord] {
        &self.history
    }

    /// Number of times the turn has passed to another player.
    #[must_use]
    pub fn turn(&self) -> u32 {
        self.turn
    }

    /// Every card currently in the game, wherever it sits.
    #[must_use]
    pub fn card_count(&self, roster: &SessionRoster) -> usize {
        self.castle.remaining_count()
            + self.tavern.len()
            + self.tavern.discard_len()
            + roster.total_cards()
            + self.cards_in_play.len()
            + usize::from(self.pending_special.is_some())
    }

    /// The card count every reachable state must have.
    ///
    /// Starts at the dealt total and drops by one for each Jester taken
    /// out when a player leaves.
    #[must_use]
    pub fn expected_card_count(&self) -> usize {
        self.initial_cards - self.specials_removed
    }

    /// Check whether the current player may yield.
    ///
    /// A lone player may not yield twice in a row; at a larger table
    /// someone has to attack before everyone has yielded.
    #[must_use]
    pub fn can_yield(&self, roster: &SessionRoster) -> bool {
        if roster.is_solo() {
            self.consecutive_yields == 0
        } else {
            self.consecutive_yields + 1 < roster.len()
        }
    }

    /// Evaluate win and loss conditions without changing anything.
    #[must_use]
    pub fn check_game_over(&self, roster: &SessionRoster) -> Option<GameOutcome> {
        if self.castle.is_cleared() {
            return Some(GameOutcome::victory(self.grade(roster)));
        }

        let solo = roster.is_solo();
        let current = roster.hand(roster.current_index());
        let required = self.castle.active().attack_value();

        // A lone player with a special left can still refresh their hand
        let can_escape = solo && self.specials_remaining > 0;
        if self.phase == Phase::SufferDamage && !can_escape && current.map_or(0, PlayerHand::health) < required {
            return Some(GameOutcome::defeat(EndReason::CannotPayDamage));
        }

        if solo {
            let out_of_cards = current.map_or(true, PlayerHand::is_empty);
            if out_of_cards && (self.specials_remaining == 0 || self.tavern.is_empty()) {
                return Some(GameOutcome::defeat(EndReason::OutOfCards));
            }
        } else if roster.hands().iter().all(|hand| hand.health() == 0) {
            return Some(GameOutcome::defeat(EndReason::AllHandsExhausted));
        }
        None
    }

    // === Resolution ===

    pub(super) fn from_parts(
        config: GameConfig,
        castle: HostileDeck,
        tavern: SharedDeck,
        rng: Box<dyn RandomSource>,
    ) -> Self {
        let specials_remaining = config.solo_specials;
        Self {
            config,
            castle,
            tavern,
            cards_in_play: Vec::new(),
            pending_special: None,
            phase: Phase::Attack,
            specials_remaining,
            consecutive_yields: 0,
            outcome: None,
            rng,
            history: Vec::new(),
            turn: 0,
            initial_cards: 0,
            specials_removed: 0,
        }
    }

    pub(super) fn resolution(&self, actor: Option<PlayerId>, event: Event) -> Resolution {
        Resolution::new(actor, event, self.boss_view())
    }

    /// Run the game-over check and stamp the post-action state on `res`.
    pub(super) fn finish(&mut self, roster: &SessionRoster, mut res: Resolution) -> Resolution {
        if let Some(outcome) = self.check_game_over(roster) {
            self.conclude(outcome);
            res.status = Status::GameOver(outcome);
        }
        res.phase = self.phase;
        res.active_player = roster.current_player();
        res.boss = self.boss_view();
        res
    }

    pub(super) fn pass_turn(&mut self, roster: &mut SessionRoster) {
        roster.advance();
        self.turn += 1;
    }

    /// Move a pending Jester into play and leave the selection phase.
    pub(super) fn close_selection(&mut self) {
        self.cards_in_play.extend(self.pending_special.take());
        self.phase = Phase::Attack;
    }

    fn conclude(&mut self, outcome: GameOutcome) {
        self.outcome = Some(outcome);
        info!(won = outcome.won, reason = ?outcome.reason, grade = ?outcome.grade, "game over");
    }

    fn grade(&self, roster: &SessionRoster) -> VictoryGrade {
        if roster.len() >= 3 {
            return VictoryGrade::Gold;
        }
        match self.specials_remaining {
            0 => VictoryGrade::Bronze,
            1 => VictoryGrade::Silver,
            _ => VictoryGrade::Gold,
        }
    }

    /// Check that the game is running and it is `player`'s turn.
    fn seat_for_turn(&self, roster: &SessionRoster, player: PlayerId) -> Result<usize, InvalidAction> {
        if self.outcome.is_some() {
            return Err(InvalidAction::GameOver);
        }
        let seat = roster.index_of(player).ok_or(InvalidAction::NotParticipant(player))?;
        if let Some(expected) = roster.current_player().filter(|&current| current != player) {
            return Err(InvalidAction::NotYourTurn {
                expected,
                actual: player,
            });
        }
        Ok(seat)
    }

    fn require_phase(&self, allowed: &[Phase]) -> Result<(), InvalidAction> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(InvalidAction::WrongPhase { actual: self.phase })
        }
    }

    fn hand_at(roster: &mut SessionRoster, seat: usize, player: PlayerId) -> Result<&mut PlayerHand, ActionError> {
        roster
            .hand_mut(seat)
            .ok_or_else(|| InvalidAction::NotParticipant(player).into())
    }

    fn attack(&mut self, roster: &mut SessionRoster, player: PlayerId, indices: &[usize]) -> Result<Resolution, ActionError> {
        let seat = self.seat_for_turn(roster, player)?;
        self.require_phase(&[Phase::Attack])?;
        if indices.is_empty() {
            return Err(InvalidAction::EmptySelection.into());
        }

        let hand = Self::hand_at(roster, seat, player)?;
        let selected = hand.select(indices)?;
        if selected.iter().any(|card| card.is_special()) {
            if roster.is_solo() {
                return self.refresh_hand(roster, player, seat);
            }
            return self.table_special(roster, player, seat);
        }
        if !is_legal_combo(&selected) {
            hand.clear_selection();
            return Err(ActionError::InvalidCombination);
        }

        let played = hand.take_selected();
        self.consecutive_yields = 0;
        let mut res = self.resolution(Some(player), Event::Attacked { cards: played.clone() });
        self.resolve_attack(roster, played, &mut res);
        Ok(self.finish(roster, res))
    }

    fn resolve_attack(&mut self, roster: &mut SessionRoster, played: Vec<Card>, res: &mut Resolution) {
        let total: u32 = played.iter().map(|card| card.attack_value()).sum();
        let suits: SmallVec<[Suit; 4]> = Suit::POWER_ORDER
            .into_iter()
            .filter(|&suit| played.iter().any(|card| card.suit() == Some(suit)))
            .collect();

        let mut damage = total;
        for suit in suits {
            if self.castle.active().is_immune(suit) {
                res.blocked_suits.push(suit);
                continue;
            }
            match suit {
                Suit::Hearts => {
                    res.cards_healed = self.tavern.heal_from_discard(total as usize, self.rng.as_mut());
                }
                Suit::Diamonds => {
                    res.cards_drawn = self.tavern.deal(total as usize, roster.current_index(), roster);
                }
                Suit::Spades => self.castle.active_mut().reduce_attack(total),
                Suit::Clubs => damage = total * 2,
            }
            res.suit_powers.push(suit);
        }

        res.damage_dealt = damage;
        let outcome = self.castle.active_mut().apply_damage(damage);
        debug!(damage, health = self.castle.active().health(), ?outcome, "attack resolved");

        if outcome.is_defeated() {
            self.defeat_boss(played, outcome, res);
        } else {
            self.cards_in_play.extend(played);
            self.await_damage(roster);
        }
    }

    fn defeat_boss(&mut self, played: Vec<Card>, outcome: DamageOutcome, res: &mut Resolution) {
        let card = self.castle.active().convert_to_ally();
        let converted = outcome == DamageOutcome::Exact;
        if converted {
            self.tavern.add_to_top(card);
        } else {
            self.tavern.discard([card]);
        }
        let in_play = std::mem::take(&mut self.cards_in_play);
        self.tavern.discard(in_play);
        self.tavern.discard(played);
        info!(boss = %card, converted, "boss defeated");

        res.defeated = Some(Defeat { card, converted });
        res.turn_retained = true;
        if let Some(next) = self.castle.advance() {
            info!(boss = %next.card(), health = next.health(), "next boss");
        }
    }

    /// The boss survived: its attack is owed now, or the turn moves on if
    /// there is nothing to pay.
    fn await_damage(&mut self, roster: &mut SessionRoster) {
        if self.castle.active().attack_value() > 0 {
            self.phase = Phase::SufferDamage;
        } else {
            self.pass_turn(roster);
        }
    }

    fn resolve_yield(&mut self, roster: &mut SessionRoster, player: PlayerId) -> Result<Resolution, ActionError> {
        self.seat_for_turn(roster, player)?;
        self.require_phase(&[Phase::Attack])?;
        if !self.can_yield(roster) {
            return Err(InvalidAction::YieldBlocked.into());
        }

        self.consecutive_yields += 1;
        let res = self.resolution(Some(player), Event::Yielded);
        self.await_damage(roster);
        Ok(self.finish(roster, res))
    }

    fn pay_damage(&mut self, roster: &mut SessionRoster, player: PlayerId, indices: &[usize]) -> Result<Resolution, ActionError> {
        let seat = self.seat_for_turn(roster, player)?;
        self.require_phase(&[Phase::SufferDamage])?;

        let required = self.castle.active().attack_value();
        let hand = Self::hand_at(roster, seat, player)?;
        let selected = hand.select(indices)?;
        let offered: u32 = selected.iter().map(|card| card.attack_value()).sum();
        if offered < required {
            hand.clear_selection();
            return Err(ActionError::InsufficientPayment { required, offered });
        }

        let discarded = hand.take_selected();
        self.tavern.discard(discarded.iter().copied());
        let res = self.resolution(Some(player), Event::DamageSuffered { cards: discarded });
        self.phase = Phase::Attack;
        self.pass_turn(roster);
        Ok(self.finish(roster, res))
    }

    fn special(&mut self, roster: &mut SessionRoster, player: PlayerId, indices: Option<&[usize]>) -> Result<Resolution, ActionError> {
        let seat = self.seat_for_turn(roster, player)?;
        if roster.is_solo() {
            return self.refresh_hand(roster, player, seat);
        }

        self.require_phase(&[Phase::Attack])?;
        let indices = indices.ok_or(InvalidAction::NoSpecialSelected)?;
        let hand = Self::hand_at(roster, seat, player)?;
        let selected = hand.select(indices)?;
        if !selected.iter().any(|card| card.is_special()) {
            hand.clear_selection();
            return Err(InvalidAction::NoSpecialSelected.into());
        }
        self.table_special(roster, player, seat)
    }

    /// A lone player's special: swap the whole hand for a fresh one.
    fn refresh_hand(&mut self, roster: &mut SessionRoster, player: PlayerId, seat: usize) -> Result<Resolution, ActionError> {
        let checked = self
            .require_phase(&[Phase::Attack, Phase::SufferDamage])
            .and_then(|()| {
                if self.specials_remaining == 0 {
                    Err(InvalidAction::NoSpecialAvailable)
                } else {
                    Ok(())
                }
            });
        let hand = Self::hand_at(roster, seat, player)?;
        if let Err(err) = checked {
            hand.clear_selection();
            return Err(err.into());
        }

        let old = hand.take_all();
        let discarded = old.len();
        self.tavern.discard(old);
        self.specials_remaining -= 1;

        let mut res = self.resolution(Some(player), Event::HandRefreshed { discarded });
        let limit = roster.hand_limit();
        res.cards_drawn = self.tavern.deal(limit, seat, roster);
        info!(player = %player, drawn = res.cards_drawn, left = self.specials_remaining, "hand refreshed");
        Ok(self.finish(roster, res))
    }

    /// A Jester at a multiplayer table: negate immunity and let its
    /// player pick who goes next. The hand selection is already validated.
    fn table_special(&mut self, roster: &mut SessionRoster, player: PlayerId, seat: usize) -> Result<Resolution, ActionError> {
        let hand = Self::hand_at(roster, seat, player)?;
        let index = hand
            .selected()
            .iter()
            .copied()
            .find(|&i| hand.cards()[i].is_special())
            .ok_or(InvalidAction::NoSpecialSelected)?;
        let jester = hand.take(index).ok_or(InvalidAction::NoSpecialSelected)?;

        self.pending_special = Some(jester);
        self.consecutive_yields = 0;
        self.negate_immunity();
        self.phase = Phase::SpecialSelect;
        info!(player = %player, boss = %self.castle.active().card(), "immunity negated");

        let res = self.resolution(Some(player), Event::SpecialPlayed);
        Ok(self.finish(roster, res))
    }

    /// Negate the boss's immunity once. A Spade boss then feels every
    /// Spade already played against it.
    fn negate_immunity(&mut self) {
        let boss = self.castle.active();
        if boss.immunity_negated() {
            return;
        }
        let spades: u32 = if boss.suit() == Some(Suit::Spades) {
            self.cards_in_play
                .iter()
                .filter(|card| card.suit() == Some(Suit::Spades))
                .map(|card| card.attack_value())
                .sum()
        } else {
            0
        };
        let boss = self.castle.active_mut();
        boss.negate_immunity();
        boss.reduce_attack(spades);
    }

    fn choose_next(&mut self, roster: &mut SessionRoster, player: PlayerId, seat: usize) -> Result<Resolution, ActionError> {
        let chooser = self.seat_for_turn(roster, player)?;
        self.require_phase(&[Phase::SpecialSelect])?;
        let chosen = roster.player_at(seat).ok_or(InvalidAction::NoSuchSeat(seat))?;

        roster.set_current(seat);
        if seat != chooser {
            self.turn += 1;
        }
        self.close_selection();
        let res = self.resolution(
            Some(player),
            Event::NextPlayerChosen {
                seat,
                player: chosen,
            },
        );
        Ok(self.finish(roster, res))
    }

    fn record(&mut self, player: PlayerId, action: &Action, turn: u32) {
        let sequence = self.history.len() as u32;
        self.history.push(ActionRecord::new(player, action.clone(), turn, sequence));
    }
}

impl RulesEngine for TurnEngine {
    type Setup = RegicideBuilder;
    type Resolution = Resolution;

    fn start(setup: RegicideBuilder, roster: &mut SessionRoster) -> Result<(Self, Resolution), ConfigError> {
        let table = setup.into_table(roster.len())?;
        let mut engine = Self::from_parts(table.config, table.castle, table.tavern, table.rng);

        roster.set_current(0);
        engine.initial_cards = engine.card_count(roster);
        let opening = roster.hand_limit() * roster.len();

        let mut res = engine.resolution(None, Event::Started);
        res.cards_drawn = engine.tavern.deal(opening, 0, roster);
        info!(
            players = roster.len(),
            dealt = res.cards_drawn,
            boss = %engine.castle.active().card(),
            "game started"
        );
        let res = engine.finish(roster, res);
        Ok((engine, res))
    }

    fn config(&self) -> &GameConfig {
        &self.config
    }

    fn apply_action(
        &mut self,
        roster: &mut SessionRoster,
        player: PlayerId,
        action: &Action,
    ) -> Result<Resolution, ActionError> {
        let turn = self.turn;
        let result = match action {
            Action::PlayCards { cards } => self.attack(roster, player, cards),
            Action::Yield => self.resolve_yield(roster, player),
            Action::SufferDamage { cards } => self.pay_damage(roster, player, cards),
            Action::PlaySpecial { cards } => self.special(roster, player, cards.as_deref()),
            Action::SelectNextPlayer { seat } => self.choose_next(roster, player, *seat),
        };

        match &result {
            Ok(res) => {
                self.record(player, action, turn);
                debug!(
                    player = %player,
                    action = ?action.kind(),
                    phase = %res.phase,
                    damage = res.damage_dealt,
                    drawn = res.cards_drawn,
                    "action resolved"
                );
            }
            Err(ActionError::StructuralInconsistency(err)) => {
                warn!(player = %player, action = ?action.kind(), error = %err, "selection does not match hand, action ignored");
            }
            Err(err) => {
                debug!(player = %player, action = ?action.kind(), error = %err, "action rejected");
            }
        }
        result
    }

    fn remove_player(&mut self, roster: &mut SessionRoster, player: PlayerId) -> Result<Resolution, ActionError> {
        self.depart(roster, player)
    }

    fn legal_actions(&self, roster: &SessionRoster, player: PlayerId) -> Vec<ActionKind> {
        if self.outcome.is_some() || roster.current_player() != Some(player) {
            return Vec::new();
        }
        let solo = roster.is_solo();
        let hand = roster.hand(roster.current_index());
        let holds_special = hand.map_or(false, |h| h.cards().iter().any(|c| c.is_special()));
        let solo_special = solo && self.specials_remaining > 0;

        let mut actions = Vec::new();
        match self.phase {
            Phase::Attack => {
                if hand.map_or(false, |h| !h.is_empty()) {
                    actions.push(ActionKind::PlayCards);
                }
                if self.can_yield(roster) {
                    actions.push(ActionKind::Yield);
                }
                if solo_special || (!solo && holds_special) {
                    actions.push(ActionKind::PlaySpecial);
                }
            }
            Phase::SufferDamage => {
                actions.push(ActionKind::SufferDamage);
                if solo_special {
                    actions.push(ActionKind::PlaySpecial);
                }
            }
            Phase::SpecialSelect => actions.push(ActionKind::SelectNextPlayer),
        }
        actions
    }

    fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    fn end(&mut self, inactive: bool) -> GameOutcome {
        if let Some(outcome) = self.outcome {
            return outcome;
        }
        let reason = if inactive { EndReason::Inactivity } else { EndReason::Ended };
        let outcome = GameOutcome::defeat(reason);
        self.conclude(outcome);
        outcome
    }
}
