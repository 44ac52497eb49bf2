//! Zobrist hashing for position identity and repetition tracking.
//!
//! Keys come from a seeded `StdRng`, so hashes are identical across runs and
//! a saved game replays to the same keys.

use std::sync::OnceLock;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_generator::leaves_king_safe;
use crate::moves::pawn_moves::pawn_attacks;
use crate::utils::algebraic::bitboard_squares;

const ZOBRIST_SEED: u64 = 0x9E37_79B9_7F4A_7C15;

#[derive(Debug)]
struct ZobristTables {
    piece_square: [[[u64; 64]; 6]; 2],
    side_to_move: u64,
    castling: [u64; 16],
    en_passant_file: [u64; 8],
}

static TABLES: OnceLock<ZobristTables> = OnceLock::new();

#[inline]
fn tables() -> &'static ZobristTables {
    TABLES.get_or_init(build_tables)
}

fn build_tables() -> ZobristTables {
    let mut rng = StdRng::seed_from_u64(ZOBRIST_SEED);

    let mut piece_square = [[[0u64; 64]; 6]; 2];
    for color in &mut piece_square {
        for piece in color {
            for key in piece {
                *key = rng.random();
            }
        }
    }

    let side_to_move = rng.random();

    let mut castling = [0u64; 16];
    for key in &mut castling {
        *key = rng.random();
    }

    let mut en_passant_file = [0u64; 8];
    for key in &mut en_passant_file {
        *key = rng.random();
    }

    ZobristTables {
        piece_square,
        side_to_move,
        castling,
        en_passant_file,
    }
}

/// Full position key.
///
/// The en passant file only contributes when the side to move has a legal
/// en passant capture, so a double advance nobody can answer (no adjacent
/// pawn, or only pinned ones) does not make an otherwise identical position
/// look new.
pub fn compute_zobrist_key(
    board: &Board,
    side_to_move: Color,
    castling_rights: CastlingRights,
    en_passant_target: Option<Square>,
) -> u64 {
    let tables = tables();
    let mut key = 0u64;

    for (square, piece) in board.occupied() {
        key ^= tables.piece_square[piece.color.index()][piece.kind.index()][square.index()];
    }

    if side_to_move == Color::Black {
        key ^= tables.side_to_move;
    }

    key ^= tables.castling[(castling_rights.bits() & 0x0F) as usize];

    if let Some(target) = en_passant_target {
        if has_legal_en_passant(board, side_to_move, target) {
            key ^= tables.en_passant_file[target.file() as usize];
        }
    }

    key
}

fn has_legal_en_passant(board: &Board, side: Color, target: Square) -> bool {
    let capturers = pawn_attacks(side.opposite(), target) & board.bitboard(side, PieceKind::Pawn);
    bitboard_squares(capturers)
        .any(|from| leaves_king_safe(board, Move::new(from, target, MoveKind::EnPassant), side))
}

#[cfg(test)]
mod tests {
    use super::compute_zobrist_key;
    use crate::game_state::game_state::GameState;

    fn key_of(fen: &str) -> u64 {
        let state = GameState::from_fen(fen).expect("FEN should parse");
        compute_zobrist_key(
            state.board(),
            state.side_to_move(),
            state.castling_rights(),
            state.en_passant_target(),
        )
    }

    #[test]
    fn starting_position_hash_is_deterministic() {
        assert_eq!(GameState::new_game().zobrist_key(), GameState::new_game().zobrist_key());
        assert_eq!(
            GameState::new_game().zobrist_key(),
            key_of("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1")
        );
    }

    #[test]
    fn side_to_move_changes_hash() {
        assert_ne!(key_of("4k3/8/8/8/8/8/8/4K3 w - - 0 1"), key_of("4k3/8/8/8/8/8/8/4K3 b - - 0 1"));
    }

    #[test]
    fn castling_rights_change_hash() {
        assert_ne!(
            key_of("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1"),
            key_of("4k3/8/8/8/8/8/8/R3K2R w - - 0 1")
        );
    }

    #[test]
    fn en_passant_counts_only_when_capturable() {
        // No black pawn can take on e3.
        assert_eq!(
            key_of("4k3/8/8/8/4P3/8/8/4K3 b - e3 0 1"),
            key_of("4k3/8/8/8/4P3/8/8/4K3 b - - 0 1")
        );
        // The d4 pawn can.
        assert_ne!(
            key_of("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1"),
            key_of("4k3/8/8/8/3pP3/8/8/4K3 b - - 0 1")
        );
    }

    #[test]
    fn en_passant_by_a_pinned_pawn_does_not_count() {
        // Taking on e3 would clear the fourth rank between the h4 rook and
        // the a4 king.
        assert_eq!(
            key_of("4K3/8/8/8/k2pP2R/8/8/8 b - e3 0 1"),
            key_of("4K3/8/8/8/k2pP2R/8/8/8 b - - 0 1")
        );
        // The d4 pawn shields the f6 king from the b2 bishop.
        assert_eq!(
            key_of("4K3/8/5k2/8/3pP3/8/1B6/8 b - e3 0 1"),
            key_of("4K3/8/5k2/8/3pP3/8/1B6/8 b - - 0 1")
        );
    }
}
