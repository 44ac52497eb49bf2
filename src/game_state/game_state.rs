//! The single mutable aggregate of a game.
//!
//! `GameState` owns the board, side to move, castling rights, en passant
//! target, both clocks and the move log. Outside the crate it is read-only;
//! the rules engine is the only writer.

use crate::errors::ChessResult;
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::move_log::MoveLog;
use crate::game_state::zobrist::compute_zobrist_key;
use crate::move_generation::legal_move_checks::{attacks_square, is_king_in_check};
use crate::utils::fen_generator::generate_fen;
use crate::utils::fen_parser::parse_fen;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    pub(crate) board: Board,
    pub(crate) side_to_move: Color,
    pub(crate) castling_rights: CastlingRights,
    pub(crate) en_passant_target: Option<Square>,

    pub(crate) halfmove_clock: u16,
    pub(crate) fullmove_number: u16,

    pub(crate) history: MoveLog,
    pub(crate) zobrist_key: u64,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new_game()
    }
}

impl GameState {
    /// Standard initial position, white to move.
    pub fn new_game() -> Self {
        Self::from_parts(
            Board::starting_position(),
            Color::White,
            CastlingRights::ALL,
            None,
            0,
            1,
        )
    }

    #[inline]
    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        parse_fen(fen)
    }

    #[inline]
    pub fn fen(&self) -> String {
        generate_fen(self)
    }

    /// Assemble a state with an empty history. No validation happens here;
    /// see [`GameState::validate`].
    pub(crate) fn from_parts(
        board: Board,
        side_to_move: Color,
        castling_rights: CastlingRights,
        en_passant_target: Option<Square>,
        halfmove_clock: u16,
        fullmove_number: u16,
    ) -> Self {
        let zobrist_key =
            compute_zobrist_key(&board, side_to_move, castling_rights, en_passant_target);
        Self {
            board,
            side_to_move,
            castling_rights,
            en_passant_target,
            halfmove_clock,
            fullmove_number,
            history: MoveLog::default(),
            zobrist_key,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.board.piece_at(square)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling_rights(&self) -> CastlingRights {
        self.castling_rights
    }

    #[inline]
    pub fn en_passant_target(&self) -> Option<Square> {
        self.en_passant_target
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u16 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u16 {
        self.fullmove_number
    }

    #[inline]
    pub fn history(&self) -> &MoveLog {
        &self.history
    }

    #[inline]
    pub fn zobrist_key(&self) -> u64 {
        self.zobrist_key
    }

    /// Whether the side to move is in check.
    #[inline]
    pub fn is_in_check(&self) -> bool {
        is_king_in_check(&self.board, self.side_to_move)
    }

    /// Recompute the position key after the fields changed.
    pub(crate) fn refresh_zobrist_key(&mut self) {
        self.zobrist_key = compute_zobrist_key(
            &self.board,
            self.side_to_move,
            self.castling_rights,
            self.en_passant_target,
        );
    }

    /// Check the data-model invariants a reachable position satisfies.
    ///
    /// Returns a human-readable reason on failure; FEN and snapshot loaders
    /// wrap it in their own error variant.
    pub fn validate(&self) -> Result<(), String> {
        for color in Color::ALL {
            let kings = self.board.count(color, PieceKind::King);
            if kings != 1 {
                return Err(format!("{color:?} has {kings} kings, expected exactly one"));
            }
        }

        let back_ranks = rank_mask(0) | rank_mask(7);
        for color in Color::ALL {
            if self.board.bitboard(color, PieceKind::Pawn) & back_ranks != 0 {
                return Err(format!("{color:?} pawn on the first or last rank"));
            }
        }

        let waiting = self.side_to_move.opposite();
        if let Some(king) = self.board.king_square(waiting) {
            if attacks_square(&self.board, king, self.side_to_move) {
                return Err(format!("{waiting:?} king is in check but it is not their move"));
            }
        }

        for color in Color::ALL {
            for side in CastleSide::ALL {
                if !self.castling_rights.has(color, side) {
                    continue;
                }
                let back = color.back_rank();
                let king_home = Square::from_index_unchecked(back * 8 + 4);
                let rook_home = Square::from_index_unchecked(back * 8 + side.rook_file());
                if self.board.piece_at(king_home) != Some(Piece::new(PieceKind::King, color))
                    || self.board.piece_at(rook_home) != Some(Piece::new(PieceKind::Rook, color))
                {
                    return Err(format!(
                        "{color:?} {side:?} castling right without king and rook on their home squares"
                    ));
                }
            }
        }

        if let Some(target) = self.en_passant_target {
            self.validate_en_passant_target(target)?;
        }

        Ok(())
    }

    fn validate_en_passant_target(&self, target: Square) -> Result<(), String> {
        // The side that just moved is the one that advanced two squares.
        let mover = self.side_to_move.opposite();
        let expected_rank = match mover {
            Color::White => 2,
            Color::Black => 5,
        };
        let pawn_square = target.offset(0, mover.forward());
        let origin_square = target.offset(0, -mover.forward());

        let consistent = target.rank() == expected_rank
            && self.board.piece_at(target).is_none()
            && origin_square.is_some_and(|sq| self.board.piece_at(sq).is_none())
            && pawn_square
                .is_some_and(|sq| self.board.piece_at(sq) == Some(Piece::new(PieceKind::Pawn, mover)));

        if consistent {
            Ok(())
        } else {
            Err(format!("en passant target {target} does not follow a two-square pawn advance"))
        }
    }
}

#[inline]
const fn rank_mask(rank: u8) -> u64 {
    0xFFu64 << (rank * 8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;

    #[test]
    fn make_new_game() {
        let game = GameState::new_game();
        assert_eq!(game.fen(), STARTING_POSITION_FEN);
        assert_eq!(game, GameState::from_fen(STARTING_POSITION_FEN).expect("start FEN"));
        assert!(game.history().is_empty());
        assert!(!game.is_in_check());
        assert!(game.validate().is_ok());
    }

    #[test]
    fn validate_rejects_two_white_kings() {
        let mut game = GameState::new_game();
        game.board
            .set_piece(Square::D1, Piece::new(PieceKind::King, Color::White));
        let reason = game.validate().expect_err("two kings must be rejected");
        assert!(reason.contains("2 kings"), "{reason}");
    }

    #[test]
    fn validate_rejects_idle_side_in_check() {
        let mut game = GameState::from_parts(Board::empty(), Color::White, CastlingRights::NONE, None, 0, 1);
        game.board.set_piece(Square::E1, Piece::new(PieceKind::King, Color::White));
        game.board.set_piece(Square::E8, Piece::new(PieceKind::King, Color::Black));
        game.board.set_piece(Square::E1.offset(0, 3).expect("e4"), Piece::new(PieceKind::Rook, Color::White));
        assert!(game.validate().is_err());
    }

    #[test]
    fn validate_rejects_castling_right_without_rook() {
        let mut game = GameState::new_game();
        game.board.clear_piece(Square::H1);
        assert!(game.validate().is_err());
    }
}
