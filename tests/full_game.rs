//! End-to-end scenarios driven through the public engine surface only,
//! with scripted dice so every landing is known in advance.
//!
//! Board reference (standard rules): 0 GO, 1 Oak St, 2 Chest, 3 Maple Ave,
//! 4 Free Parking, 5 Cedar Ln, 6 Chance, 7 Pine Rd, 8 Jail, 9 Elm St,
//! 10 Chest, 11 Birch Blvd, 12 Rest Stop, 13 Spruce Way, 14 Chance,
//! 15 Willow Ct.

use monopoly_engine::engine::GameEngine;
use monopoly_engine::rng::ScriptedRandom;
use monopoly_engine::rules::Rules;
use monopoly_engine::save;

fn two_players(script: &[usize]) -> GameEngine {
    GameEngine::new(
        Rules::standard(),
        &["P1".to_string(), "P2".to_string()],
        Box::new(ScriptedRandom::new(script.iter().copied())),
    )
}

#[test]
fn doubles_onto_chance_keep_the_turn() {
    // P1 at 0 with $1500 rolls (3,3) -> lands on 6 (Chance). The third
    // scripted value selects card 1, a plain dividend.
    let mut engine = two_players(&[3, 3, 1]);
    engine.roll_dice();

    assert_eq!(engine.last_dice(), (3, 3));
    assert_eq!(engine.players()[0].position, 6);
    assert!(engine.last_message().contains("Chance:"));
    assert_eq!(engine.players()[0].cash, 1_550);

    // doubles: P1 acts again without the turn advancing
    assert_eq!(engine.current_player_index(), 0);
    assert_eq!(engine.players()[0].consecutive_doubles, 1);
}

#[test]
fn rent_bankruptcy_cascade() {
    // P2 owns Elm Street (9, rent $50); P1 also holds Oak Street. P1 rolls
    // (4,5) from GO with only $30, lands on 9, and cannot pay.
    let mut engine = two_players(&[4, 5]);
    engine.board_mut().property_mut(1).expect("Oak").set_owner(0);
    engine.board_mut().property_mut(9).expect("Elm").set_owner(1);
    engine.players_mut()[0].cash = 30;

    engine.roll_dice();

    let p1 = &engine.players()[0];
    assert!(p1.is_bankrupt);
    assert_eq!(p1.cash, 0);
    // only the bankrupted player's holdings are released
    assert!(!engine.board().property(1).expect("Oak").is_owned());
    assert_eq!(engine.board().property(9).expect("Elm").owner, Some(1));

    // with one solvent player left the game is over
    assert!(engine.is_game_over());
    assert_eq!(engine.winner().map(|p| p.name.as_str()), Some("P2"));
}

#[test]
fn buy_rent_and_build_over_several_turns() {
    let mut engine = two_players(&[
        1, 2, // P1: lands on Maple (3), buys
        2, 3, // P2: lands on Cedar (5), buys
        2, 5, // P1: 3 -> 10 (Chest), card below
        1, // chest card 1: bank error, +200
        4, 2, // P2: 5 -> 11 (Birch), declines
        2, 5, // P1: 10 + 7 = 17 wraps past GO to 1 (Oak), buys
    ]);

    engine.roll_dice();
    assert!(engine.is_waiting_for_property_decision());
    engine.buy_property();
    assert_eq!(engine.board().property(3).expect("Maple").owner, Some(0));

    engine.roll_dice();
    engine.buy_property();
    assert_eq!(engine.board().property(5).expect("Cedar").owner, Some(1));

    engine.roll_dice(); // P1 draws the bank-error card
    assert_eq!(engine.players()[0].cash, 1_500 - 60 + 200);

    engine.roll_dice();
    assert!(engine.is_waiting_for_property_decision());
    engine.decline_property();
    assert!(!engine.board().property(11).expect("Birch").is_owned());

    engine.roll_dice(); // P1 wraps past GO (collecting $200) onto Oak
    engine.buy_property();
    assert_eq!(engine.board().property(1).expect("Oak").owner, Some(0));
    assert_eq!(engine.players()[0].cash, 1_500 - 60 + 200 + 200 - 60);

    // P1 now holds the full Brown set and can develop it
    assert!(engine.can_build_house(1));
    assert!(engine.can_build_house(3));
    assert!(!engine.can_build_hotel(1));
    for _ in 0..4 {
        engine.build_house(1);
        engine.build_house(3);
    }
    assert!(engine.can_build_hotel(1));
    engine.build_hotel(1);
    assert!(engine.board().property(1).expect("Oak").has_hotel);
    assert_eq!(engine.board().property(1).expect("Oak").rent(), 120);
}

#[test]
fn save_load_round_trip_preserves_players_and_ownership() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut engine = two_players(&[1, 2]);
    engine.roll_dice();
    engine.buy_property(); // P1 buys Maple
    engine.players_mut()[1].in_jail = true;
    engine.players_mut()[1].position = 8;
    // stage buildings to prove they are intentionally lost on load
    engine.board_mut().property_mut(3).expect("Maple").add_house();

    save::save_game_in(
        dir.path(),
        "trip",
        engine.board(),
        engine.players(),
        engine.current_player_index(),
    )
    .expect("save");

    let loaded = save::load_game_in(dir.path(), "trip").expect("load");

    assert_eq!(loaded.current_player_index, engine.current_player_index());
    for (orig, back) in engine.players().iter().zip(&loaded.players) {
        assert_eq!(orig.name, back.name);
        assert_eq!(orig.cash, back.cash);
        assert_eq!(orig.position, back.position);
        assert_eq!(orig.in_jail, back.in_jail);
        assert_eq!(orig.consecutive_doubles, back.consecutive_doubles);
        assert_eq!(orig.is_bankrupt, back.is_bankrupt);
    }
    let maple = loaded.board.property(3).expect("Maple");
    assert_eq!(maple.owner, Some(0));
    assert_eq!(maple.houses, 0, "building state is not persisted");
    assert!(!maple.has_hotel);
}

#[test]
fn failed_load_leaves_session_untouched() {
    let mut engine = two_players(&[1, 2]);
    engine.roll_dice();
    engine.buy_property();
    let cash_before = engine.players()[0].cash;

    assert!(engine.load("no-such-save").is_err());
    assert_eq!(engine.players()[0].cash, cash_before);
    assert_eq!(engine.board().property(3).expect("Maple").owner, Some(0));
}

#[test]
fn seeded_games_replay_identically() {
    let names = vec!["A".to_string(), "B".to_string()];
    let mut a = GameEngine::new_seeded(&names, 99);
    let mut b = GameEngine::new_seeded(&names, 99);
    for _ in 0..50 {
        a.roll_dice();
        b.roll_dice();
        if a.is_waiting_for_property_decision() {
            a.buy_property();
        }
        if b.is_waiting_for_property_decision() {
            b.buy_property();
        }
        assert_eq!(a.last_dice(), b.last_dice());
        assert_eq!(a.current_player_index(), b.current_player_index());
    }
    for (pa, pb) in a.players().iter().zip(b.players()) {
        assert_eq!(pa.cash, pb.cash);
        assert_eq!(pa.position, pb.position);
    }
}
