//! Save/load through the controller.

use chess_core::{ChessError, Game, GamePhase, GameSnapshot, GameState, RulesConfig, Square};

const MIDGAME: &[&str] = &[
    "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "g8f6", "e1g1", "f8c5", "d2d4", "e5d4", "e4e5",
    "d7d5", "e5d6", "c5b6", "d6c7", "e8g8", "c7d8q", "f8d8",
];

fn midgame() -> Game {
    let mut game = Game::new_game();
    for text in MIDGAME {
        game.make_move_notation(text)
            .unwrap_or_else(|err| panic!("{text} should be legal: {err}"));
    }
    game
}

#[test]
fn midgame_round_trips_through_json() {
    let game = midgame();
    let json = game.serialize_state().to_json().expect("encodes");

    let snapshot = GameSnapshot::from_json(&json).expect("decodes");
    assert_eq!(snapshot.moves.len(), MIDGAME.len());

    let mut loaded = Game::new_game();
    loaded.load_state(&snapshot).expect("loads");
    assert_eq!(loaded.state(), game.state());
    assert_eq!(loaded.fen(), game.fen());
    assert_eq!(loaded.last_move(), game.last_move());

    // History survives: undo walks back through the replayed moves.
    for _ in 0..MIDGAME.len() {
        loaded.undo().expect("history was restored");
    }
    assert_eq!(loaded.state(), &GameState::new_game());
}

#[test]
fn game_from_fen_round_trips() {
    let mut game = Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 5 20").expect("fen");
    game.make_move_notation("e1c1").expect("legal");
    game.make_move_notation("h8h1").expect("legal");

    let snapshot = game.serialize_state();
    assert_eq!(snapshot.start.fullmove_number, 20);

    let mut loaded = Game::new_game();
    loaded.load_state(&snapshot).expect("loads");
    assert_eq!(loaded.state(), game.state());
}

#[test]
fn rejected_snapshot_keeps_the_current_game() {
    let mut game = midgame();
    let before = game.state().clone();

    let mut snapshot = game.serialize_state();
    snapshot.moves.truncate(3);
    assert!(matches!(
        game.load_state(&snapshot),
        Err(ChessError::MalformedSnapshot(_))
    ));
    assert_eq!(game.state(), &before);
}

#[test]
fn moves_after_a_finished_game_are_refused_on_load() {
    let bare_kings = "4k3/8/8/8/8/8/8/4K3 w - - 0 1";
    let lenient = RulesConfig {
        insufficient_material_draw: false,
        ..RulesConfig::default()
    };
    let mut played = Game::from_fen_with_config(bare_kings, lenient).expect("fen");
    played.make_move(Square::E1, Square::D1, None).expect("legal without the material draw");
    let snapshot = played.serialize_state();

    let mut strict = Game::from_fen(bare_kings).expect("fen");
    assert_eq!(strict.phase(), GamePhase::DrawByInsufficientMaterial);
    let before = strict.state().clone();
    assert!(matches!(
        strict.load_state(&snapshot),
        Err(ChessError::MalformedSnapshot(_))
    ));
    assert_eq!(strict.state(), &before);

    let mut same_rules = Game::with_config(lenient);
    same_rules.load_state(&snapshot).expect("loads under the rules it was played with");
    assert_eq!(same_rules.fen(), "4k3/8/8/8/8/8/8/3K4 b - - 1 1");
}
