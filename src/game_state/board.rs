//! 8x8 board: square-indexed mailbox plus per-color/per-kind bitboards.
//!
//! The mailbox answers "what is on this square" in constant time; the
//! bitboards feed the attack tables. Both views are updated together by
//! [`Board::set_piece`] and [`Board::clear_piece`], the only mutators. The
//! board does no validation beyond coordinate bounds (which [`Square`]
//! already guarantees).

use std::iter::FusedIterator;

use crate::game_state::chess_types::*;

const BACK_RANK_LAYOUT: [PieceKind; 8] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; 64],
    // [color][piece_kind]
    pieces: [[u64; 6]; 2],
    occupancy_by_color: [u64; 2],
    occupancy_all: u64,
}

impl Default for Board {
    fn default() -> Self {
        Self {
            squares: [None; 64],
            pieces: [[0; 6]; 2],
            occupancy_by_color: [0; 2],
            occupancy_all: 0,
        }
    }
}

impl Board {
    #[inline]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Standard initial placement.
    pub fn starting_position() -> Self {
        let mut board = Self::empty();
        for color in Color::ALL {
            let back = color.back_rank();
            let pawns = color.pawn_start_rank();
            for (file, kind) in (0u8..).zip(BACK_RANK_LAYOUT) {
                board.set_piece(
                    Square::from_index_unchecked(back * 8 + file),
                    Piece::new(kind, color),
                );
                board.set_piece(
                    Square::from_index_unchecked(pawns * 8 + file),
                    Piece::new(PieceKind::Pawn, color),
                );
            }
        }
        board
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.squares[square.index()]
    }

    /// Place `piece` on `square`, returning whatever stood there before.
    pub fn set_piece(&mut self, square: Square, piece: Piece) -> Option<Piece> {
        let previous = self.clear_piece(square);
        let mask = square.mask();
        self.squares[square.index()] = Some(piece);
        self.pieces[piece.color.index()][piece.kind.index()] |= mask;
        self.occupancy_by_color[piece.color.index()] |= mask;
        self.occupancy_all |= mask;
        previous
    }

    /// Empty `square`, returning the piece that was removed.
    pub fn clear_piece(&mut self, square: Square) -> Option<Piece> {
        let previous = self.squares[square.index()].take()?;
        let mask = !square.mask();
        self.pieces[previous.color.index()][previous.kind.index()] &= mask;
        self.occupancy_by_color[previous.color.index()] &= mask;
        self.occupancy_all &= mask;
        Some(previous)
    }

    /// All occupied squares in ascending index order (a1, b1, ... h8).
    #[inline]
    pub fn occupied(&self) -> OccupiedSquares<'_> {
        OccupiedSquares {
            board: self,
            remaining: self.occupancy_all,
        }
    }

    /// Squares occupied by `color`, in the same scan order as [`Board::occupied`].
    #[inline]
    pub fn pieces_of(&self, color: Color) -> OccupiedSquares<'_> {
        OccupiedSquares {
            board: self,
            remaining: self.occupancy_by_color[color.index()],
        }
    }

    #[inline]
    pub fn bitboard(&self, color: Color, kind: PieceKind) -> u64 {
        self.pieces[color.index()][kind.index()]
    }

    #[inline]
    pub fn color_occupancy(&self, color: Color) -> u64 {
        self.occupancy_by_color[color.index()]
    }

    #[inline]
    pub fn occupancy(&self) -> u64 {
        self.occupancy_all
    }

    #[inline]
    pub fn count(&self, color: Color, kind: PieceKind) -> u32 {
        self.bitboard(color, kind).count_ones()
    }

    /// Lowest-index king of `color`; positions with exactly one king are the
    /// only ones the rules engine accepts.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        let kings = self.bitboard(color, PieceKind::King);
        if kings == 0 {
            None
        } else {
            Some(Square::from_index_unchecked(kings.trailing_zeros() as u8))
        }
    }
}

/// Lazy scan over occupied squares. Cloning restarts from the clone's point.
#[derive(Debug, Clone)]
pub struct OccupiedSquares<'a> {
    board: &'a Board,
    remaining: u64,
}

impl Iterator for OccupiedSquares<'_> {
    type Item = (Square, Piece);

    fn next(&mut self) -> Option<Self::Item> {
        while self.remaining != 0 {
            let square = Square::from_index_unchecked(self.remaining.trailing_zeros() as u8);
            self.remaining &= self.remaining - 1;
            if let Some(piece) = self.board.piece_at(square) {
                return Some((square, piece));
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.remaining.count_ones() as usize;
        (n, Some(n))
    }
}

impl ExactSizeIterator for OccupiedSquares<'_> {}

impl FusedIterator for OccupiedSquares<'_> {}
