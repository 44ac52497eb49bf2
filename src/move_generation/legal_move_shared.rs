//! Movement-pattern dispatch shared by the per-kind generators.
//!
//! Each piece kind maps to one plain function in [`MOVEMENT_PATTERNS`],
//! indexed by [`PieceKind::index`]. Generators never look at king safety;
//! that filter lives in `legal_move_generator`.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_moves_bishop::generate_bishop_moves;
use crate::move_generation::legal_moves_king::generate_king_moves;
use crate::move_generation::legal_moves_knight::generate_knight_moves;
use crate::move_generation::legal_moves_pawn::generate_pawn_moves;
use crate::move_generation::legal_moves_queen::generate_queen_moves;
use crate::move_generation::legal_moves_rook::generate_rook_moves;

/// What a movement pattern may read: the board plus the two pieces of
/// state that unlock special moves. A bare board view leaves both empty, so
/// no castling or en passant candidates are produced.
#[derive(Debug, Clone, Copy)]
pub struct MoveContext<'a> {
    pub board: &'a Board,
    pub side: Color,
    pub castling_rights: CastlingRights,
    pub en_passant_target: Option<Square>,
}

impl<'a> MoveContext<'a> {
    #[inline]
    pub fn for_board(board: &'a Board, side: Color) -> Self {
        Self {
            board,
            side,
            castling_rights: CastlingRights::NONE,
            en_passant_target: None,
        }
    }

    #[inline]
    pub fn for_state(state: &'a GameState) -> Self {
        Self {
            board: state.board(),
            side: state.side_to_move(),
            castling_rights: state.castling_rights(),
            en_passant_target: state.en_passant_target(),
        }
    }

    #[inline]
    pub fn own_occupancy(&self) -> u64 {
        self.board.color_occupancy(self.side)
    }

    #[inline]
    pub fn enemy_occupancy(&self) -> u64 {
        self.board.color_occupancy(self.side.opposite())
    }
}

/// Appends the candidate moves of the piece on `from`.
pub type MovementPattern = fn(&MoveContext<'_>, Square, &mut Vec<Move>);

pub const MOVEMENT_PATTERNS: [MovementPattern; 6] = [
    generate_pawn_moves,
    generate_knight_moves,
    generate_bishop_moves,
    generate_rook_moves,
    generate_queen_moves,
    generate_king_moves,
];

#[inline]
pub fn movement_pattern(kind: PieceKind) -> MovementPattern {
    MOVEMENT_PATTERNS[kind.index()]
}

/// Emit one move per set bit of `targets`, tagging captures of enemy pieces.
/// Own-occupied squares must already be masked out.
pub(crate) fn push_targets(ctx: &MoveContext<'_>, from: Square, targets: u64, out: &mut Vec<Move>) {
    let enemy = ctx.enemy_occupancy();
    let mut remaining = targets;
    while remaining != 0 {
        let to = Square::from_index_unchecked(remaining.trailing_zeros() as u8);
        let kind = if enemy & to.mask() != 0 {
            MoveKind::Capture
        } else {
            MoveKind::Normal
        };
        out.push(Move::new(from, to, kind));
        remaining &= remaining - 1;
    }
}
