use freecell_mcts::{
    legal_moves, rng_for_deal, standard_deck, Board, Card, DealError, GameState, Move, MoveError,
};

fn c(s: &str) -> Card {
    s.parse().expect("card notation")
}

/// Unshuffled deck with 3h and 4s moved to positions 48 and 49, i.e. the
/// seventh cards of columns 0 and 1.
fn scenario_deck() -> Vec<Card> {
    let mut deck = standard_deck();
    let i = deck.iter().position(|&x| x == c("3h")).unwrap();
    deck.swap(i, 48);
    let j = deck.iter().position(|&x| x == c("4s")).unwrap();
    deck.swap(j, 49);
    deck
}

fn sorted(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort();
    cards
}

#[test]
fn deal_layout_matches_rows() {
    let game = GameState::from_deck(&standard_deck()).unwrap();
    let b = game.board();
    for col in 0..8 {
        let expected = if col < 4 { 7 } else { 6 };
        assert_eq!(b.column(col).unwrap().len(), expected, "column {col}");
    }
    assert!(b.free_cells().is_empty());
    assert_eq!(b.home_ranks(), [0; 4]);
    assert_eq!(game.history_len(), 1);
    // Row-major dealing: deck[0] is the bottom of column 0, deck[48] its top.
    assert_eq!(b.column(0).unwrap()[0], standard_deck()[0]);
    assert_eq!(b.column_top(0), Some(standard_deck()[48]));
}

#[test]
fn red_three_onto_black_four() {
    let mut game = GameState::from_deck(&scenario_deck()).unwrap();
    assert_eq!(game.board().column_top(0), Some(c("3h")));
    assert_eq!(game.board().column_top(1), Some(c("4s")));
    let len0 = game.board().column(0).unwrap().len();
    let len1 = game.board().column(1).unwrap().len();

    game.move_column(0, 1).expect("3h onto 4s is legal");

    assert_eq!(game.board().column(0).unwrap().len(), len0 - 1);
    assert_eq!(game.board().column(1).unwrap().len(), len1 + 1);
    assert_eq!(game.board().column_top(1), Some(c("3h")));
    assert_eq!(game.history_len(), 2);
}

#[test]
fn undo_on_fresh_game_fails_without_change() {
    let mut rng = rng_for_deal(42, 0);
    let mut game = GameState::dealt(&mut rng);
    let before = game.board().clone();
    assert_eq!(game.undo(), Err(MoveError::NothingToUndo));
    assert_eq!(game.board(), &before);
    assert_eq!(game.history_len(), 1);
}

#[test]
fn one_undo_restores_prior_snapshot_exactly() {
    let mut rng = rng_for_deal(7, 3);
    let mut game = GameState::dealt(&mut rng);
    for mv in [Move::ColumnToFree { src: 2 }, Move::ColumnToFree { src: 5 }] {
        let before = game.board().clone();
        game.apply(mv).expect("free cells available");
        assert_ne!(game.board(), &before);
        game.undo().expect("one move to undo");
        assert_eq!(game.board(), &before);
        game.apply(mv).expect("replay");
    }
    assert_eq!(game.history_len(), 3);
    game.undo().unwrap();
    game.undo().unwrap();
    assert_eq!(game.undo(), Err(MoveError::NothingToUndo));
}

#[test]
fn failed_moves_leave_state_and_history_untouched() {
    let mut game = GameState::from_deck(&scenario_deck()).unwrap();
    let before = game.board().clone();
    // 4s onto 3h: wrong direction
    assert!(game.move_column(1, 0).is_err());
    assert!(game.move_column(0, 42).is_err());
    assert!(game.move_from_free(0, 1).is_err());
    assert!(game.free_to_home(9).is_err());
    assert!(game.column_to_home(99).is_err());
    assert_eq!(game.board(), &before);
    assert_eq!(game.history_len(), 1);
}

#[test]
fn any_card_goes_onto_an_empty_column() {
    let mut table: [Vec<Card>; 8] = Default::default();
    table[0] = vec![c("Kh")];
    table[1] = vec![c("4c"), c("7d")];
    let mut game = GameState::from_board(Board::from_parts(table, vec![c("9s")], [0; 4]));
    game.move_column(1, 2).expect("7d onto empty column");
    game.move_from_free(0, 3).expect("9s onto empty column");
    assert_eq!(game.board().column_top(2), Some(c("7d")));
    assert_eq!(game.board().column_top(3), Some(c("9s")));
    assert!(game.board().free_cells().is_empty());
}

#[test]
fn enumerated_moves_all_apply_and_cover_every_kind() {
    let mut table: [Vec<Card>; 8] = Default::default();
    table[0] = vec![c("Ac")];
    table[1] = vec![c("5d")];
    table[2] = vec![c("4s")];
    let game = GameState::from_board(Board::from_parts(table, vec![c("Ad"), c("6c")], [0; 4]));
    let moves = game.enumerate_moves();
    for kind in ["column_to_column", "column_to_free", "free_to_column", "column_to_home", "free_to_home"] {
        assert!(moves.iter().any(|m| m.kind() == kind), "missing {kind}");
    }
    assert!(moves.contains(&Move::ColumnToColumn { src: 2, dst: 1 }));
    assert!(moves.contains(&Move::FreeToColumn { src: 1, dst: 7 }));
    assert!(!moves.contains(&Move::ColumnToColumn { src: 1, dst: 2 }), "5d cannot go onto 4s");
    for mv in &moves {
        let mut g = game.clone();
        assert!(g.apply(*mv).is_ok(), "{mv} should apply");
    }
    assert_eq!(moves, legal_moves(game.board()));
}

#[test]
fn conservation_after_deal_and_view_round_trip() {
    let mut rng = rng_for_deal(1, 1);
    let game = GameState::dealt(&mut rng);
    assert_eq!(sorted(game.board().all_cards()), sorted(standard_deck()));

    let json = serde_json::to_string(&game.view()).unwrap();
    let back: freecell_mcts::BoardView = serde_json::from_str(&json).unwrap();
    assert_eq!(back, game.view());
    assert_eq!(back.table.len(), 8);
    assert_eq!(back.home.len(), 4);
    assert_eq!(game.cards_home(), 0);
}

#[test]
fn move_display_and_json_shape() {
    let mv = Move::ColumnToColumn { src: 0, dst: 1 };
    assert_eq!(mv.to_string(), "(column_to_column, 0, 1)");
    assert_eq!(Move::FreeToHome { src: 2 }.to_string(), "(free_to_home, 2)");
    let v = serde_json::to_value(mv).unwrap();
    assert_eq!(v, serde_json::json!({"kind": "column_to_column", "src": 0, "dst": 1}));
}

#[test]
fn from_deck_rejects_anything_but_one_full_deck() {
    let mut long = standard_deck();
    long.push(c("Ah"));
    assert!(matches!(GameState::from_deck(&long), Err(DealError::WrongCount(53))));

    let mut short = standard_deck();
    short.pop();
    assert!(matches!(GameState::from_deck(&short), Err(DealError::WrongCount(51))));

    let mut dup = standard_deck();
    dup[3] = dup[0];
    assert!(matches!(GameState::from_deck(&dup), Err(DealError::Duplicate(card)) if card == dup[0]));
}
