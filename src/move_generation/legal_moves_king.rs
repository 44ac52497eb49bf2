//! King steps and castling.
//!
//! Castling candidates are fully checked here: rights, king and rook on
//! their home squares, an empty path, and no attacked square among the
//! king's start, transit and destination squares.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_checks::attacks_square;
use crate::move_generation::legal_move_shared::{push_targets, MoveContext};
use crate::moves::king_moves::king_attacks;

pub fn generate_king_moves(ctx: &MoveContext<'_>, from: Square, out: &mut Vec<Move>) {
    let targets = king_attacks(from) & !ctx.own_occupancy();
    push_targets(ctx, from, targets, out);

    if !ctx.castling_rights.is_empty() {
        generate_castling_moves(ctx, from, out);
    }
}

fn generate_castling_moves(ctx: &MoveContext<'_>, king_from: Square, out: &mut Vec<Move>) {
    let side = ctx.side;
    let enemy = side.opposite();
    let back = side.back_rank();
    let king_home = Square::from_index_unchecked(back * 8 + 4);

    if king_from != king_home {
        return;
    }

    // Cannot castle out of check.
    if attacks_square(ctx.board, king_from, enemy) {
        return;
    }

    for castle_side in CastleSide::ALL {
        if !ctx.castling_rights.has(side, castle_side) {
            continue;
        }

        let rook_home = Square::from_index_unchecked(back * 8 + castle_side.rook_file());
        if ctx.board.piece_at(rook_home) != Some(Piece::new(PieceKind::Rook, side)) {
            continue;
        }

        let (between, transit, destination, kind) = match castle_side {
            CastleSide::Kingside => (rank_span(back, 5, 6), 5, 6, MoveKind::CastleKingside),
            CastleSide::Queenside => (rank_span(back, 1, 3), 3, 2, MoveKind::CastleQueenside),
        };

        if ctx.board.occupancy() & between != 0 {
            continue;
        }

        let transit = Square::from_index_unchecked(back * 8 + transit);
        let destination = Square::from_index_unchecked(back * 8 + destination);
        if attacks_square(ctx.board, transit, enemy) || attacks_square(ctx.board, destination, enemy) {
            continue;
        }

        out.push(Move::new(king_from, destination, kind));
    }
}

/// Files `first..=last` of `rank` as a bitboard.
#[inline]
const fn rank_span(rank: u8, first: u8, last: u8) -> u64 {
    let width = last - first + 1;
    ((1u64 << width) - 1) << (rank * 8 + first)
}
