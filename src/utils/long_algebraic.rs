//! Long algebraic move notation (`e2e4`, `e7e8q`).
//!
//! Formatting is `Display for Move`; parsing resolves the text against the
//! position so the result carries the right move category.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::rules::rules_engine::resolve_move;
use crate::utils::algebraic::parse_square;

/// Split long algebraic text into origin, destination and promotion kind
/// without consulting a position.
pub fn parse_coordinates(text: &str) -> ChessResult<(Square, Square, Option<PieceKind>)> {
    let text = text.trim();
    if !text.is_ascii() || !(4..=5).contains(&text.len()) {
        return Err(ChessError::InvalidNotation(format!(
            "invalid long algebraic move: {text}"
        )));
    }

    let from = parse_square(&text[0..2])?;
    let to = parse_square(&text[2..4])?;
    let promotion = match text[4..].chars().next() {
        None => None,
        Some(ch) => Some(char_to_promotion(ch)?),
    };

    Ok((from, to, promotion))
}

/// Parse long algebraic text into the legal move it names in `state`.
pub fn parse_long_algebraic(state: &GameState, text: &str) -> ChessResult<Move> {
    let (from, to, promotion) = parse_coordinates(text)?;
    resolve_move(state, from, to, promotion)
}

fn char_to_promotion(ch: char) -> ChessResult<PieceKind> {
    match ch {
        'n' | 'N' => Ok(PieceKind::Knight),
        'b' | 'B' => Ok(PieceKind::Bishop),
        'r' | 'R' => Ok(PieceKind::Rook),
        'q' | 'Q' => Ok(PieceKind::Queen),
        _ => Err(ChessError::InvalidNotation(format!(
            "invalid promotion piece: {ch}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_quiet_move_and_promotion() {
        let (from, to, promotion) = parse_coordinates("e2e4").expect("quiet move");
        assert_eq!((from.to_string(), to.to_string(), promotion), ("e2".to_owned(), "e4".to_owned(), None));

        let (_, _, promotion) = parse_coordinates("a7a8Q").expect("promotion");
        assert_eq!(promotion, Some(PieceKind::Queen));
    }

    #[test]
    fn rejects_malformed_text() {
        for text in ["", "e2", "e2e", "e2e4qq", "e2e9", "e7e8k", "é2e4"] {
            assert!(
                matches!(parse_coordinates(text), Err(ChessError::InvalidNotation(_))),
                "{text:?} should be rejected"
            );
        }
    }

    #[test]
    fn resolves_castling_and_en_passant_categories() {
        let castle = GameState::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("fen");
        assert_eq!(
            parse_long_algebraic(&castle, "e1c1").expect("legal").kind(),
            MoveKind::CastleQueenside
        );

        let ep = GameState::from_fen("4k3/8/8/3pP3/8/8/8/4K3 w - d6 0 2").expect("fen");
        let mv = parse_long_algebraic(&ep, "e5d6").expect("legal");
        assert_eq!(mv.kind(), MoveKind::EnPassant);
        assert_eq!(mv.to_string(), "e5d6");
    }
}
