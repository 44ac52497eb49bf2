//! Pawn movement: single and double advances, diagonal captures,
//! promotions and en passant.

use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::MoveContext;
use crate::moves::pawn_moves::pawn_attacks;

pub fn generate_pawn_moves(ctx: &MoveContext<'_>, from: Square, out: &mut Vec<Move>) {
    let side = ctx.side;
    let occupied = ctx.board.occupancy();

    if let Some(one_step) = from.offset(0, side.forward()) {
        if occupied & one_step.mask() == 0 {
            push_pawn_move(from, one_step, side, MoveKind::Normal, out);

            if from.rank() == side.pawn_start_rank() {
                if let Some(two_step) = one_step.offset(0, side.forward()) {
                    if occupied & two_step.mask() == 0 {
                        out.push(Move::new(from, two_step, MoveKind::Normal));
                    }
                }
            }
        }
    }

    let mut captures = pawn_attacks(side, from);
    while captures != 0 {
        let to = Square::from_index_unchecked(captures.trailing_zeros() as u8);
        if ctx.enemy_occupancy() & to.mask() != 0 {
            push_pawn_move(from, to, side, MoveKind::Capture, out);
        } else if ctx.en_passant_target == Some(to) {
            out.push(Move::new(from, to, MoveKind::EnPassant));
        }
        captures &= captures - 1;
    }
}

/// Push a pawn move, expanding it into the four promotions on the last rank.
fn push_pawn_move(from: Square, to: Square, side: Color, kind: MoveKind, out: &mut Vec<Move>) {
    if to.rank() == side.promotion_rank() {
        for promotion in PieceKind::PROMOTION_TARGETS {
            out.push(Move::promotion(from, to, promotion));
        }
    } else {
        out.push(Move::new(from, to, kind));
    }
}
