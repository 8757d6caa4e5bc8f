//! A player leaving a running game.
//!
//! The leaver's hand is shuffled under the tavern deck. At a table that
//! still has company, one Jester leaves the game with them; whoever loses
//! a Jester from their hand draws a replacement. Everyone then draws one
//! card, and the turn or a pending next-player choice is repaired.

use tracing::info;

use crate::cards::Card;
use crate::core::{shuffle, ActionError, InvalidAction, Phase, PlayerId};
use crate::roster::SessionRoster;

use super::engine::TurnEngine;
use super::resolution::{Event, Resolution};

impl TurnEngine {
    pub(super) fn depart(&mut self, roster: &mut SessionRoster, player: PlayerId) -> Result<Resolution, ActionError> {
        if self.outcome.is_some() {
            return Err(InvalidAction::GameOver.into());
        }
        if !roster.contains(player) {
            return Err(InvalidAction::NotParticipant(player).into());
        }
        if roster.is_solo() {
            return Err(InvalidAction::LastPlayer.into());
        }

        let departure = roster
            .remove(player)
            .ok_or(InvalidAction::NotParticipant(player))?;
        let mut returned = departure.cards;
        shuffle(&mut returned, self.rng.as_mut());
        for card in returned {
            self.tavern.add_to_bottom(card);
        }

        let mut res = self.resolution(Some(player), Event::PlayerLeft { player });
        if roster.len() > 1 {
            res.special_removed = self.remove_one_special(roster, &mut res);
        }
        res.cards_drawn += self.tavern.deal(roster.len(), roster.current_index(), roster);

        if departure.was_active_turn {
            if self.phase == Phase::SpecialSelect {
                self.close_selection();
            }
            self.phase = Phase::Attack;
            self.turn += 1;
        } else if self.phase == Phase::SpecialSelect {
            if roster.len() > 1 {
                // The chooser picks again from the smaller table
                res.player_left = true;
            } else {
                self.close_selection();
            }
        }

        info!(
            player = %player,
            seat = departure.index,
            remaining = roster.len(),
            special_removed = res.special_removed,
            "player left"
        );
        Ok(self.finish(roster, res))
    }

    /// Take one Jester out of the game, searching the tavern deck, the
    /// discard pile, the cards in play, then each hand in seat order.
    fn remove_one_special(&mut self, roster: &mut SessionRoster, res: &mut Resolution) -> bool {
        let found = self
            .tavern
            .remove_special()
            .or_else(|| self.tavern.remove_special_from_discard())
            .or_else(|| take_special(&mut self.cards_in_play));
        if found.is_some() {
            self.specials_removed += 1;
            return true;
        }

        let seat = roster
            .hands_mut()
            .iter_mut()
            .position(|hand| hand.take_special().is_some());
        match seat {
            Some(seat) => {
                self.specials_removed += 1;
                res.cards_drawn += self.tavern.deal(1, seat, roster);
                true
            }
            None => false,
        }
    }
}

fn take_special(cards: &mut Vec<Card>) -> Option<Card> {
    let index = cards.iter().position(|card| card.is_special())?;
    Some(cards.remove(index))
}

#[cfg(test)]
mod tests {
    use super::super::RegicideBuilder;
    use crate::cards::{Card, Suit, JACK};
    use crate::core::{InvalidAction, NoShuffle, Phase, PlayerId};
    use crate::rules::RulesEngine;

    fn p(n: u64) -> PlayerId {
        PlayerId::new(n)
    }

    #[test]
    fn test_cannot_remove_last_player() {
        let (mut engine, mut roster) = RegicideBuilder::new().player_count(1).seed(2).build().unwrap();
        assert_eq!(
            engine.remove_player(&mut roster, p(1)),
            Err(InvalidAction::LastPlayer.into())
        );
        assert_eq!(
            engine.remove_player(&mut roster, p(5)),
            Err(InvalidAction::NotParticipant(p(5)).into())
        );
    }

    #[test]
    fn test_special_hunted_in_tavern_first() {
        let mut order: Vec<Card> = (0..18).map(|i| Card::new(2 + (i % 9) as u8, Suit::Hearts)).collect();
        order.push(Card::new(9, Suit::Clubs));
        order.push(Card::jester());
        let (mut engine, mut roster) = RegicideBuilder::new()
            .player_count(3)
            .castle(vec![Card::new(JACK, Suit::Clubs)])
            .tavern(order)
            .random_source(NoShuffle)
            .build()
            .unwrap();
        let expected = engine.expected_card_count();

        let res = engine.remove_player(&mut roster, p(3)).unwrap();
        assert!(res.special_removed);
        assert!(engine.tavern().cards().iter().all(|c| !c.is_special()));
        assert_eq!(engine.expected_card_count(), expected - 1);
        assert_eq!(engine.card_count(&roster), engine.expected_card_count());
        // Each remaining player drew one card
        assert_eq!(res.cards_drawn, 2);
        assert!(roster.hands().iter().all(|h| h.len() == 7));
    }

    #[test]
    fn test_special_taken_from_hand_is_replaced() {
        // Unshuffled tavern has its Jester on top, so seat 0 is dealt it
        let (mut engine, mut roster) = RegicideBuilder::new()
            .player_count(3)
            .castle(vec![Card::new(JACK, Suit::Clubs)])
            .random_source(NoShuffle)
            .build()
            .unwrap();
        assert!(roster.hand(0).unwrap().cards()[0].is_special());

        let res = engine.remove_player(&mut roster, p(3)).unwrap();
        assert!(res.special_removed);
        assert_eq!(res.cards_drawn, 3);
        assert!(roster.hands().iter().flat_map(|h| h.cards()).all(|c| !c.is_special()));
        assert!(roster.hands().iter().all(|h| h.len() == 7));
        assert_eq!(engine.card_count(&roster), engine.expected_card_count());
        assert_eq!(engine.phase(), Phase::Attack);
        assert_eq!(roster.current_player(), Some(p(1)));
    }

    #[test]
    fn test_no_special_hunt_when_one_player_remains() {
        let (mut engine, mut roster) = RegicideBuilder::new().player_count(2).seed(8).build().unwrap();
        let expected = engine.expected_card_count();

        let res = engine.remove_player(&mut roster, p(2)).unwrap();
        assert!(!res.special_removed);
        assert_eq!(engine.expected_card_count(), expected);
        assert_eq!(engine.card_count(&roster), expected);
        // Hand limit grows to 8 and the remaining player draws one
        assert_eq!(roster.hand(0).unwrap().len(), 8);
    }
}
