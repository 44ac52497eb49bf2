//! Full legal move generation pipeline.
//!
//! Scans the mover's pieces in board order, dispatches each through the
//! movement-pattern table, then drops every candidate that leaves the
//! mover's own king attacked on a scratch copy of the board.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::apply_to_board;
use crate::move_generation::legal_move_checks::is_king_in_check;
use crate::move_generation::legal_move_shared::{movement_pattern, MoveContext};

/// Candidate moves for every piece of `side`, ignoring king safety.
///
/// A bare board carries no castling rights or en passant target, so this
/// form yields neither; see [`pseudo_legal_moves_in`] for the state-aware
/// variant.
pub fn pseudo_legal_moves(board: &Board, side: Color) -> Vec<Move> {
    collect_pseudo_legal(&MoveContext::for_board(board, side))
}

/// Candidate moves for the side to move, including castling and en passant.
pub fn pseudo_legal_moves_in(state: &GameState) -> Vec<Move> {
    collect_pseudo_legal(&MoveContext::for_state(state))
}

fn collect_pseudo_legal(ctx: &MoveContext<'_>) -> Vec<Move> {
    let mut out = Vec::with_capacity(64);
    for (from, piece) in ctx.board.pieces_of(ctx.side) {
        movement_pattern(piece.kind)(ctx, from, &mut out);
    }
    out
}

/// Whether `mv` keeps `side`'s king out of check, simulated on a copy.
pub fn leaves_king_safe(board: &Board, mv: Move, side: Color) -> bool {
    let mut scratch = board.clone();
    match apply_to_board(&mut scratch, mv, side) {
        Some(_) => !is_king_in_check(&scratch, side),
        None => false,
    }
}

/// Every legal move for the side to move, in board-scan order.
pub fn legal_moves(state: &GameState) -> Vec<Move> {
    let side = state.side_to_move();
    let mut moves = pseudo_legal_moves_in(state);
    moves.retain(|mv| leaves_king_safe(state.board(), *mv, side));
    moves
}

/// Legal moves of the piece standing on `from`. Empty when the square is
/// empty or holds a piece of the side not to move.
pub fn legal_moves_from(state: &GameState, from: Square) -> Vec<Move> {
    let side = state.side_to_move();
    let Some(piece) = state.piece_at(from).filter(|piece| piece.color == side) else {
        return Vec::new();
    };

    let mut moves = Vec::new();
    movement_pattern(piece.kind)(&MoveContext::for_state(state), from, &mut moves);
    moves.retain(|mv| leaves_king_safe(state.board(), *mv, side));
    moves
}

/// Cheaper than `!legal_moves(state).is_empty()`: stops at the first hit.
pub fn has_legal_move(state: &GameState) -> bool {
    let ctx = MoveContext::for_state(state);
    let mut buffer = Vec::with_capacity(32);
    for (from, piece) in state.board().pieces_of(ctx.side) {
        buffer.clear();
        movement_pattern(piece.kind)(&ctx, from, &mut buffer);
        if buffer
            .iter()
            .any(|mv| leaves_king_safe(state.board(), *mv, ctx.side))
        {
            return true;
        }
    }
    false
}
