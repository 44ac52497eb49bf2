//! Square conversions for algebraic coordinates.
//!
//! Converts between human-readable coordinates (e.g., `e4`) and squares /
//! bitboards. Formatting goes through `Display for Square`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::Square;

/// Parse a coordinate such as `"e4"`.
pub fn parse_square(text: &str) -> ChessResult<Square> {
    let &[file, rank] = text.as_bytes() else {
        return Err(ChessError::InvalidNotation(format!(
            "invalid algebraic square: {text}"
        )));
    };

    if !(b'a'..=b'h').contains(&file) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid algebraic file: {}",
            file as char
        )));
    }
    if !(b'1'..=b'8').contains(&rank) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid algebraic rank: {}",
            rank as char
        )));
    }

    Square::new(file - b'a', rank - b'1')
}

/// Squares of the set bits of `bitboard`, lowest index first.
pub fn bitboard_squares(bitboard: u64) -> impl Iterator<Item = Square> {
    let mut remaining = bitboard;
    std::iter::from_fn(move || {
        if remaining == 0 {
            return None;
        }
        let square = Square::from_index_unchecked(remaining.trailing_zeros() as u8);
        remaining &= remaining - 1;
        Some(square)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_corners() {
        assert_eq!(parse_square("a1").expect("a1"), Square::A1);
        assert_eq!(parse_square("h8").expect("h8"), Square::H8);
        assert_eq!(parse_square("e4").expect("e4").index(), 28);
    }

    #[test]
    fn reject_bad_coordinates() {
        for text in ["", "e", "i1", "a9", "e44", "E4"] {
            assert!(
                matches!(parse_square(text), Err(ChessError::InvalidNotation(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn bitboard_squares_in_index_order() {
        let squares: Vec<Square> = bitboard_squares(Square::H8.mask() | Square::A1.mask()).collect();
        assert_eq!(squares, vec![Square::A1, Square::H8]);
        assert_eq!(bitboard_squares(0).count(), 0);
    }
}
