//! Mid-game departure tests.
//!
//! A player leaving hands their cards back to the tavern deck, may take a
//! Jester out of the game with them, and forces the turn order and any
//! pending next-player choice to be repaired.

use rust_regicide::cards::{Card, Suit, JACK, QUEEN};
use rust_regicide::core::{InvalidAction, NoShuffle, Phase, PlayerId};
use rust_regicide::games::regicide::{Event, RegicideBuilder, TurnEngine};
use rust_regicide::roster::SessionRoster;
use rust_regicide::rules::RulesEngine;

fn c(rank: u8, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn p(n: u64) -> PlayerId {
    PlayerId::new(n)
}

/// Three players, six cards each, six more in the tavern. Player 1 may
/// start with a Jester in place of their 7 of Hearts.
fn three_players(jester: bool) -> (TurnEngine, SessionRoster) {
    let mut h1: Vec<Card> = (2..=7).map(|r| c(r, Suit::Hearts)).collect();
    if jester {
        h1[5] = Card::jester();
    }
    let h2: Vec<Card> = (2..=7).map(|r| c(r, Suit::Diamonds)).collect();
    let h3: Vec<Card> = (2..=7).map(|r| c(r, Suit::Clubs)).collect();

    let mut order = Vec::new();
    for i in 0..6 {
        order.extend([h1[i], h2[i], h3[i]]);
    }
    order.extend([
        c(8, Suit::Spades),
        c(9, Suit::Spades),
        c(10, Suit::Spades),
        c(8, Suit::Hearts),
        c(9, Suit::Hearts),
        c(10, Suit::Hearts),
    ]);

    RegicideBuilder::new()
        .player_count(3)
        .castle(vec![c(JACK, Suit::Clubs), c(QUEEN, Suit::Clubs)])
        .tavern(order)
        .random_source(NoShuffle)
        .build()
        .unwrap()
}

fn assert_conserved(engine: &TurnEngine, roster: &SessionRoster) {
    assert_eq!(engine.card_count(roster), engine.expected_card_count());
}

/// Test that the active player leaving while owing damage hands an attack turn to the next seat.
#[test]
fn test_active_player_leaves_during_damage() {
    let (mut engine, mut roster) = three_players(false);
    engine.yield_turn(&mut roster, p(1)).unwrap();
    assert_eq!(engine.phase(), Phase::SufferDamage);

    let res = engine.remove_player(&mut roster, p(1)).unwrap();

    assert_eq!(res.event, Event::PlayerLeft { player: p(1) });
    assert_eq!(res.phase, Phase::Attack);
    assert_eq!(res.active_player, Some(p(2)));
    assert_eq!(engine.turn(), 1);
    assert!(!res.special_removed);
    assert_eq!(res.cards_drawn, 2);

    assert_eq!(roster.len(), 2);
    assert_eq!(roster.departed(), &[p(1)]);
    // Hand limit grows to 7 and everyone drew one
    assert!(roster.hands().iter().all(|h| h.len() == 7 && h.limit() == 7));
    assert!(roster.hand(0).unwrap().cards().contains(&c(8, Suit::Spades)));
    // The leaver's six cards sit under the remaining four
    assert_eq!(engine.tavern().len(), 10);
    assert_eq!(engine.tavern().cards()[0].suit(), Some(Suit::Hearts));
    assert_conserved(&engine, &roster);
}

/// Test that someone else leaving leaves the phase and turn alone.
#[test]
fn test_other_player_leaves_during_damage() {
    let (mut engine, mut roster) = three_players(false);
    engine.yield_turn(&mut roster, p(1)).unwrap();

    let res = engine.remove_player(&mut roster, p(3)).unwrap();

    assert_eq!(res.phase, Phase::SufferDamage);
    assert_eq!(res.active_player, Some(p(1)));
    assert_eq!(engine.turn(), 0);
    assert_eq!(roster.players().collect::<Vec<_>>(), vec![p(1), p(2)]);
    assert_conserved(&engine, &roster);

    // Damage is still owed by player 1
    let pay: Vec<usize> = (0..roster.hand(0).unwrap().len()).collect();
    let res = engine.suffer_damage(&mut roster, p(1), &pay).unwrap();
    assert_eq!(res.active_player, Some(p(2)));
}

/// Test that a seat before the active one leaving keeps the same player active.
#[test]
fn test_earlier_seat_leaving_keeps_active_player() {
    let (mut engine, mut roster) = three_players(false);
    engine.yield_turn(&mut roster, p(1)).unwrap();
    engine.suffer_damage(&mut roster, p(1), &[3, 4]).unwrap();
    assert_eq!(roster.current_player(), Some(p(2)));

    let res = engine.remove_player(&mut roster, p(1)).unwrap();
    assert_eq!(res.active_player, Some(p(2)));
    assert_eq!(roster.current_index(), 0);
    assert_eq!(res.phase, Phase::Attack);
    assert_conserved(&engine, &roster);
}

/// Test that a pending next-player choice restarts when another player leaves.
#[test]
fn test_choice_restarts_when_other_player_leaves() {
    let (mut engine, mut roster) = three_players(true);
    let res = engine.play_special(&mut roster, p(1), Some(&[0])).unwrap();
    assert_eq!(res.phase, Phase::SpecialSelect);

    let res = engine.remove_player(&mut roster, p(3)).unwrap();
    assert!(res.player_left);
    assert_eq!(res.phase, Phase::SpecialSelect);
    assert_eq!(res.active_player, Some(p(1)));
    assert_eq!(engine.pending_special(), Some(Card::jester()));
    assert_conserved(&engine, &roster);

    // The old seat 2 is gone
    assert_eq!(
        engine.select_next_player(&mut roster, p(1), 2),
        Err(InvalidAction::NoSuchSeat(2).into())
    );
    let res = engine.select_next_player(&mut roster, p(1), 1).unwrap();
    assert_eq!(res.active_player, Some(p(2)));
    assert!(engine.cards_in_play().contains(&Card::jester()));
}

/// Test that the chooser leaving abandons the choice and moves the turn on.
#[test]
fn test_chooser_leaves() {
    let (mut engine, mut roster) = three_players(true);
    engine.play_special(&mut roster, p(1), Some(&[0])).unwrap();

    let res = engine.remove_player(&mut roster, p(1)).unwrap();
    assert!(!res.player_left);
    assert_eq!(res.phase, Phase::Attack);
    assert_eq!(res.active_player, Some(p(2)));
    assert_eq!(engine.pending_special(), None);
    assert_eq!(engine.cards_in_play(), &[Card::jester()]);
    assert!(engine.active_boss().immunity_negated());
    assert_conserved(&engine, &roster);
}

/// Test that departures at a seeded four-player table conserve every card.
#[test]
fn test_departures_conserve_cards() {
    let (mut engine, mut roster) = RegicideBuilder::new().player_count(4).seed(99).build().unwrap();
    let dealt = engine.expected_card_count();
    assert_eq!(dealt, 12 + 42);

    let res = engine.remove_player(&mut roster, p(2)).unwrap();
    assert!(res.special_removed);
    assert_conserved(&engine, &roster);

    let res = engine.remove_player(&mut roster, p(4)).unwrap();
    assert!(res.special_removed);
    assert_eq!(engine.expected_card_count(), dealt - 2);
    assert_conserved(&engine, &roster);

    // Down to one: no Jester is left to hunt and none is needed
    let res = engine.remove_player(&mut roster, p(1)).unwrap();
    assert!(!res.special_removed);
    assert_eq!(roster.players().collect::<Vec<_>>(), vec![p(3)]);
    assert_conserved(&engine, &roster);

    assert_eq!(
        engine.remove_player(&mut roster, p(3)),
        Err(InvalidAction::LastPlayer.into())
    );
    assert_eq!(engine.specials_remaining(), 2);
}
