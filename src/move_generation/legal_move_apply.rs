//! Low-level move application.
//!
//! [`apply_to_board`] / [`revert_on_board`] touch only piece placement and
//! are what the legality filter runs on scratch boards. [`make_move`] /
//! [`unmake_move`] additionally maintain rights, clocks, the position key
//! and the move log. Neither layer checks legality.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::move_log::UndoState;

/// What a board-level application removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardChange {
    pub moved: Piece,
    pub captured: Option<(Piece, Square)>,
}

/// Move pieces for `mv` played by `side`. Returns `None` (board untouched)
/// when the origin square is empty.
pub fn apply_to_board(board: &mut Board, mv: Move, side: Color) -> Option<BoardChange> {
    let moved = board.clear_piece(mv.from())?;

    let captured = if mv.kind() == MoveKind::EnPassant {
        mv.to()
            .offset(0, -side.forward())
            .and_then(|victim| board.clear_piece(victim).map(|piece| (piece, victim)))
    } else {
        board.clear_piece(mv.to()).map(|piece| (piece, mv.to()))
    };

    let placed = mv
        .promotion_kind()
        .map_or(moved, |kind| Piece::new(kind, moved.color));
    board.set_piece(mv.to(), placed);

    if let Some((rook_from, rook_to)) = castle_rook_squares(mv, side) {
        if let Some(rook) = board.clear_piece(rook_from) {
            board.set_piece(rook_to, rook);
        }
    }

    Some(BoardChange { moved, captured })
}

/// Exact inverse of [`apply_to_board`].
pub fn revert_on_board(board: &mut Board, mv: Move, side: Color, change: BoardChange) {
    board.clear_piece(mv.to());
    board.set_piece(mv.from(), change.moved);

    if let Some((rook_from, rook_to)) = castle_rook_squares(mv, side) {
        if let Some(rook) = board.clear_piece(rook_to) {
            board.set_piece(rook_from, rook);
        }
    }

    if let Some((piece, square)) = change.captured {
        board.set_piece(square, piece);
    }
}

/// Rook origin and destination for a castling move.
fn castle_rook_squares(mv: Move, side: Color) -> Option<(Square, Square)> {
    let back = side.back_rank();
    let castle_side = mv.castle_side()?;
    let rook_to_file = match castle_side {
        CastleSide::Kingside => 5,
        CastleSide::Queenside => 3,
    };
    Some((
        Square::from_index_unchecked(back * 8 + castle_side.rook_file()),
        Square::from_index_unchecked(back * 8 + rook_to_file),
    ))
}

/// Apply `mv` to the full state and record it in the move log. The caller
/// has already established legality.
pub(crate) fn make_move(state: &mut GameState, mv: Move) -> ChessResult<BoardChange> {
    let side = state.side_to_move;
    let change = apply_to_board(&mut state.board, mv, side).ok_or_else(|| {
        ChessError::IllegalMove {
            from: mv.from(),
            to: mv.to(),
            reason: "no piece on the origin square",
        }
    })?;

    let undo = UndoState {
        mv,
        moved_piece: change.moved,
        captured: change.captured,
        prev_castling_rights: state.castling_rights,
        prev_en_passant_target: state.en_passant_target,
        prev_halfmove_clock: state.halfmove_clock,
        prev_fullmove_number: state.fullmove_number,
        prev_zobrist_key: state.zobrist_key,
    };

    update_castling_rights(&mut state.castling_rights, side, mv, change);

    state.en_passant_target = if change.moved.kind == PieceKind::Pawn
        && mv.from().rank().abs_diff(mv.to().rank()) == 2
    {
        mv.from().offset(0, side.forward())
    } else {
        None
    };

    if change.moved.kind == PieceKind::Pawn || change.captured.is_some() {
        state.halfmove_clock = 0;
    } else {
        state.halfmove_clock = state.halfmove_clock.saturating_add(1);
    }
    if side == Color::Black {
        state.fullmove_number = state.fullmove_number.saturating_add(1);
    }

    state.side_to_move = side.opposite();
    state.refresh_zobrist_key();
    state.history.record(undo);

    Ok(change)
}

/// Revert the most recent logged move, leaving it available for redo.
pub(crate) fn unmake_move(state: &mut GameState) -> Option<UndoState> {
    let undo = state.history.step_back()?;
    let mover = state.side_to_move.opposite();

    revert_on_board(
        &mut state.board,
        undo.mv,
        mover,
        BoardChange {
            moved: undo.moved_piece,
            captured: undo.captured,
        },
    );

    state.side_to_move = mover;
    state.castling_rights = undo.prev_castling_rights;
    state.en_passant_target = undo.prev_en_passant_target;
    state.halfmove_clock = undo.prev_halfmove_clock;
    state.fullmove_number = undo.prev_fullmove_number;
    state.zobrist_key = undo.prev_zobrist_key;

    Some(undo)
}

fn update_castling_rights(rights: &mut CastlingRights, side: Color, mv: Move, change: BoardChange) {
    if rights.is_empty() {
        return;
    }

    if change.moved.kind == PieceKind::King {
        rights.remove_color(side);
    }

    // A rook leaving its corner, or anything landing on one, ends that right.
    for color in Color::ALL {
        for castle_side in CastleSide::ALL {
            let corner = Square::from_index_unchecked(color.back_rank() * 8 + castle_side.rook_file());
            if mv.from() == corner || mv.to() == corner {
                rights.remove(color, castle_side);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::long_algebraic::parse_long_algebraic;

    fn play(state: &mut GameState, lan: &str) -> BoardChange {
        let mv = parse_long_algebraic(state, lan).expect("legal move");
        make_move(state, mv).expect("move applies")
    }

    #[test]
    fn double_push_sets_en_passant_target() {
        let mut state = GameState::new_game();
        play(&mut state, "e2e4");
        assert_eq!(state.en_passant_target().map(|sq| sq.to_string()), Some("e3".to_owned()));
        assert_eq!(state.halfmove_clock(), 0);
        assert_eq!(state.side_to_move(), Color::Black);

        play(&mut state, "g8f6");
        assert_eq!(state.en_passant_target(), None);
        assert_eq!(state.halfmove_clock(), 1);
        assert_eq!(state.fullmove_number(), 2);
    }

    #[test]
    fn castling_moves_rook_and_clears_rights() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 3 10").expect("fen");
        let before = state.clone();
        play(&mut state, "e1g1");

        assert_eq!(state.piece_at(Square::F1), Some(Piece::new(PieceKind::Rook, Color::White)));
        assert_eq!(state.piece_at(Square::H1), None);
        assert!(!state.castling_rights().has(Color::White, CastleSide::Queenside));
        assert!(state.castling_rights().has(Color::Black, CastleSide::Kingside));
        assert_eq!(state.halfmove_clock(), 4);

        unmake_move(&mut state).expect("one move to revert");
        assert_eq!(state, before);
    }

    #[test]
    fn capturing_a_corner_rook_clears_the_right() {
        let mut state = GameState::from_fen("r3k2r/8/8/8/8/8/6B1/R3K2R w KQkq - 0 1").expect("fen");
        let change = play(&mut state, "g2a8");
        assert_eq!(change.captured.map(|(piece, _)| piece.kind), Some(PieceKind::Rook));
        assert!(!state.castling_rights().has(Color::Black, CastleSide::Queenside));
        assert!(state.castling_rights().has(Color::Black, CastleSide::Kingside));
    }

    #[test]
    fn en_passant_removes_the_passed_pawn_and_reverts() {
        let mut state = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("fen");
        let before = state.clone();
        let change = play(&mut state, "e5d6");

        let d5 = Square::new(3, 4).expect("d5");
        assert_eq!(change.captured.map(|(_, sq)| sq), Some(d5));
        assert_eq!(state.piece_at(d5), None);

        unmake_move(&mut state).expect("one move to revert");
        assert_eq!(state, before);
        assert_eq!(state.zobrist_key(), before.zobrist_key());
    }

    #[test]
    fn promotion_replaces_the_pawn() {
        let mut state = GameState::from_fen("4k3/1P6/8/8/8/8/8/4K3 w - - 0 1").expect("fen");
        play(&mut state, "b7b8n");
        assert_eq!(state.piece_at(Square::B8), Some(Piece::new(PieceKind::Knight, Color::White)));
        assert_eq!(state.board().count(Color::White, PieceKind::Pawn), 0);
    }
}
