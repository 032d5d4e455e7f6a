use rand::Rng;
use freecell_mcts::{legal_moves, rng_for_deal, rng_for_search, standard_deck, Card, GameState, Move};

fn sorted(mut cards: Vec<Card>) -> Vec<Card> {
    cards.sort();
    cards
}

/// Any move, legal or not, with indices a little past the valid range.
fn random_move(rng: &mut impl Rng) -> Move {
    let src = rng.gen_range(0..10);
    let dst = rng.gen_range(0..10);
    match rng.gen_range(0..5) {
        0 => Move::ColumnToColumn { src, dst },
        1 => Move::ColumnToFree { src },
        2 => Move::FreeToColumn { src: src % 6, dst },
        3 => Move::ColumnToHome { src },
        _ => Move::FreeToHome { src: src % 6 },
    }
}

fn check_invariants(game: &GameState, deck: &[Card]) {
    let b = game.board();
    assert_eq!(sorted(b.all_cards()), deck, "52 cards, each exactly once");
    assert!(b.free_cells().len() <= 4);
    assert!(game.history_len() >= 1);
}

#[test]
fn conservation_and_capacity_over_random_play() {
    let deck = sorted(standard_deck());
    for game_id in 0..8u64 {
        let mut game = GameState::dealt(&mut rng_for_deal(2024, game_id));
        let mut rng = rng_for_search(2024, game_id);
        let mut last_home = game.board().home_ranks();

        for _ in 0..400 {
            let before = game.board().clone();
            let history = game.history_len();
            let mv = random_move(&mut rng);
            match game.apply(mv) {
                Ok(()) => assert_eq!(game.history_len(), history + 1),
                Err(_) => {
                    assert_eq!(game.board(), &before, "failed {mv} must not change state");
                    assert_eq!(game.history_len(), history);
                }
            }
            // Occasional undo keeps the history path exercised.
            if rng.gen_ratio(1, 10) {
                let _ = game.undo();
                last_home = game.board().home_ranks();
            }
            check_invariants(&game, &deck);
            let home = game.board().home_ranks();
            for (now, then) in home.iter().zip(last_home) {
                assert!(*now >= then, "home pile went down without undo");
                assert!(*now <= then + 1, "home pile skipped a rank");
            }
            last_home = home;
        }
    }
}

#[test]
fn legal_move_walk_keeps_every_card() {
    let deck = sorted(standard_deck());
    let mut game = GameState::dealt(&mut rng_for_deal(5, 5));
    let mut rng = rng_for_search(5, 5);
    for _ in 0..200 {
        let moves = legal_moves(game.board());
        if moves.is_empty() {
            break;
        }
        let mv = moves[rng.gen_range(0..moves.len())];
        game.apply(mv).expect("enumerated moves are legal");
        check_invariants(&game, &deck);
    }
    // Unwinding everything lands back on the deal.
    while game.undo().is_ok() {}
    assert_eq!(game.history_len(), 1);
    assert_eq!(game.board(), GameState::dealt(&mut rng_for_deal(5, 5)).board());
}
