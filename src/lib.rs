//! Crate root module declarations for the chess rules core.
//!
//! Exposes the board model, attack tables, move generation, the rules
//! engine, the game controller and notation helpers so hosts, binaries and
//! tests can import stable module paths.

pub mod errors;
pub mod game_controller;

pub mod game_state {
    pub mod board;
    pub mod chess_rules;
    pub mod chess_types;
    pub mod game_state;
    pub mod move_log;
    pub mod snapshot;
    pub mod zobrist;
}

pub mod moves {
    pub mod bishop_moves;
    pub mod king_moves;
    pub mod knight_moves;
    pub mod pawn_moves;
    pub mod queen_moves;
    pub mod ray_tracing;
    pub mod rook_moves;
}

pub mod move_generation {
    pub mod legal_move_apply;
    pub mod legal_move_checks;
    pub mod legal_move_generator;
    pub mod legal_move_shared;
    pub mod legal_moves_bishop;
    pub mod legal_moves_king;
    pub mod legal_moves_knight;
    pub mod legal_moves_pawn;
    pub mod legal_moves_queen;
    pub mod legal_moves_rook;
    pub mod perft;
}

pub mod rules {
    pub mod draw_rules;
    pub mod game_phase;
    pub mod rules_engine;
}

pub mod utils {
    pub mod algebraic;
    pub mod fen_generator;
    pub mod fen_parser;
    pub mod long_algebraic;
}

pub use errors::{ChessError, ChessResult};
pub use game_controller::{Game, MoveReport};
pub use game_state::chess_rules::RulesConfig;
pub use game_state::chess_types::{CastleSide, CastlingRights, Color, Move, MoveKind, Piece, PieceKind, Square};
pub use game_state::game_state::GameState;
pub use game_state::snapshot::GameSnapshot;
pub use rules::game_phase::GamePhase;
pub use rules::rules_engine::RulesEngine;
