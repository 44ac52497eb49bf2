use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::moves::bishop_moves::{bishop_attacks, BISHOP_RAYS};
use crate::moves::king_moves::king_attacks;
use crate::moves::knight_moves::knight_attacks;
use crate::moves::pawn_moves::pawn_attacks;
use crate::moves::rook_moves::{rook_attacks, ROOK_RAYS};

#[inline]
pub fn is_king_in_check(board: &Board, color: Color) -> bool {
    let Some(king_sq) = board.king_square(color) else {
        return false;
    };
    attacks_square(board, king_sq, color.opposite())
}

/// Whether any piece of `by` attacks `square`.
///
/// Attack lookups run backwards from the target: a knight on the target
/// square would attack exactly the squares a knight attacker must stand on,
/// and likewise for kings, sliders and (color-flipped) pawns.
pub fn attacks_square(board: &Board, square: Square, by: Color) -> bool {
    let pawns = board.bitboard(by, PieceKind::Pawn);
    if pawn_attacks(by.opposite(), square) & pawns != 0 {
        return true;
    }

    if knight_attacks(square) & board.bitboard(by, PieceKind::Knight) != 0 {
        return true;
    }

    if king_attacks(square) & board.bitboard(by, PieceKind::King) != 0 {
        return true;
    }

    let queens = board.bitboard(by, PieceKind::Queen);

    let diagonal = board.bitboard(by, PieceKind::Bishop) | queens;
    if BISHOP_RAYS[square.index()] & diagonal != 0
        && bishop_attacks(square, board.occupancy()) & diagonal != 0
    {
        return true;
    }

    let orthogonal = board.bitboard(by, PieceKind::Rook) | queens;
    if ROOK_RAYS[square.index()] & orthogonal != 0
        && rook_attacks(square, board.occupancy()) & orthogonal != 0
    {
        return true;
    }

    false
}

/// Bitboard of the `by` pieces attacking `square`.
pub fn attackers_of(board: &Board, square: Square, by: Color) -> u64 {
    let occupancy = board.occupancy();
    let queens = board.bitboard(by, PieceKind::Queen);

    (pawn_attacks(by.opposite(), square) & board.bitboard(by, PieceKind::Pawn))
        | (knight_attacks(square) & board.bitboard(by, PieceKind::Knight))
        | (king_attacks(square) & board.bitboard(by, PieceKind::King))
        | (bishop_attacks(square, occupancy) & (board.bitboard(by, PieceKind::Bishop) | queens))
        | (rook_attacks(square, occupancy) & (board.bitboard(by, PieceKind::Rook) | queens))
}
