//! FEN-to-GameState parser.
//!
//! Builds a validated state from a Forsyth-Edwards Notation string. Layout
//! errors and impossible positions both surface as `ChessError::InvalidFen`.

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::utils::algebraic::parse_square;

pub fn parse_fen(fen: &str) -> ChessResult<GameState> {
    let mut parts = fen.split_whitespace();

    let board_part = parts.next().ok_or_else(|| invalid("missing board layout"))?;
    let side_part = parts.next().ok_or_else(|| invalid("missing side to move"))?;
    let castling_part = parts.next().ok_or_else(|| invalid("missing castling rights"))?;
    let en_passant_part = parts.next().ok_or_else(|| invalid("missing en passant square"))?;
    let halfmove_part = parts.next().ok_or_else(|| invalid("missing halfmove clock"))?;
    let fullmove_part = parts.next().ok_or_else(|| invalid("missing fullmove number"))?;

    if parts.next().is_some() {
        return Err(invalid("extra trailing fields"));
    }

    let board = parse_board(board_part)?;
    let side_to_move = parse_side_to_move(side_part)?;
    let castling_rights = parse_castling_rights(castling_part)?;
    let en_passant_target = parse_en_passant_square(en_passant_part)?;
    let halfmove_clock = halfmove_part
        .parse::<u16>()
        .map_err(|_| invalid(&format!("invalid halfmove clock: {halfmove_part}")))?;
    let fullmove_number = fullmove_part
        .parse::<u16>()
        .ok()
        .filter(|n| *n >= 1)
        .ok_or_else(|| invalid(&format!("invalid fullmove number: {fullmove_part}")))?;

    let game_state = GameState::from_parts(
        board,
        side_to_move,
        castling_rights,
        en_passant_target,
        halfmove_clock,
        fullmove_number,
    );
    game_state.validate().map_err(ChessError::InvalidFen)?;

    Ok(game_state)
}

fn invalid(reason: &str) -> ChessError {
    ChessError::InvalidFen(reason.to_owned())
}

fn parse_board(board_part: &str) -> ChessResult<Board> {
    let ranks: Vec<&str> = board_part.split('/').collect();
    if ranks.len() != 8 {
        return Err(invalid("board layout must contain 8 ranks"));
    }

    let mut board = Board::empty();
    for (rank, rank_str) in (0u8..8).rev().zip(ranks) {
        let mut file = 0u8;

        for ch in rank_str.chars() {
            if let Some(empty_count) = ch.to_digit(10) {
                if !(1..=8).contains(&empty_count) {
                    return Err(invalid(&format!("invalid empty-square count '{ch}'")));
                }
                file += empty_count as u8;
                if file > 8 {
                    return Err(invalid("board rank has too many files"));
                }
                continue;
            }

            let piece = Piece::from_fen_char(ch)
                .ok_or_else(|| invalid(&format!("invalid piece character '{ch}'")))?;

            if file >= 8 {
                return Err(invalid("board rank has too many files"));
            }

            board.set_piece(Square::new(file, rank)?, piece);
            file += 1;
        }

        if file != 8 {
            return Err(invalid("board rank does not sum to 8 files"));
        }
    }

    Ok(board)
}

fn parse_side_to_move(side_part: &str) -> ChessResult<Color> {
    match side_part {
        "w" => Ok(Color::White),
        "b" => Ok(Color::Black),
        _ => Err(invalid(&format!("invalid side-to-move field: {side_part}"))),
    }
}

fn parse_castling_rights(castling_part: &str) -> ChessResult<CastlingRights> {
    if castling_part == "-" {
        return Ok(CastlingRights::NONE);
    }

    let mut rights = CastlingRights::NONE;
    for ch in castling_part.chars() {
        rights = match ch {
            'K' => rights.with(Color::White, CastleSide::Kingside),
            'Q' => rights.with(Color::White, CastleSide::Queenside),
            'k' => rights.with(Color::Black, CastleSide::Kingside),
            'q' => rights.with(Color::Black, CastleSide::Queenside),
            _ => return Err(invalid(&format!("invalid castling rights character: {ch}"))),
        };
    }

    Ok(rights)
}

fn parse_en_passant_square(en_passant_part: &str) -> ChessResult<Option<Square>> {
    if en_passant_part == "-" {
        return Ok(None);
    }

    parse_square(en_passant_part)
        .map(Some)
        .map_err(|_| invalid(&format!("invalid en passant square: {en_passant_part}")))
}

#[cfg(test)]
mod tests {
    use super::parse_fen;
    use crate::errors::ChessError;
    use crate::game_state::chess_rules::STARTING_POSITION_FEN;
    use crate::game_state::chess_types::*;

    #[test]
    fn parse_starting_fen() {
        let game_state = parse_fen(STARTING_POSITION_FEN).expect("starting FEN should parse");

        assert_eq!(game_state.side_to_move(), Color::White);
        assert_eq!(game_state.fullmove_number(), 1);
        assert_eq!(game_state.halfmove_clock(), 0);
        assert_eq!(game_state.castling_rights(), CastlingRights::ALL);
        assert_eq!(game_state.board().occupied().count(), 32);
    }

    #[test]
    fn reject_layout_errors() {
        for fen in [
            "",
            "8/8/8/8/8/8/8 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K2 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K4 w - - 0 1",
            "4k3/8/8/8/8/8/8/4X3 w - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w Z - 0 1",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 0",
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra",
        ] {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::InvalidFen(_))),
                "{fen:?} should be rejected"
            );
        }
    }

    #[test]
    fn reject_impossible_positions() {
        for fen in [
            // two white kings
            "4k3/8/8/8/8/8/8/3KK3 w - - 0 1",
            // pawn on the back rank
            "4k2P/8/8/8/8/8/8/4K3 w - - 0 1",
            // black to move could capture the white king
            "4k3/8/8/8/8/8/8/r3K3 b - - 0 1",
            // castling right without the rook
            "4k3/8/8/8/8/8/8/4K3 w K - 0 1",
            // en passant target without a pawn that just advanced
            "4k3/8/8/8/8/8/8/4K3 b - e3 0 1",
        ] {
            assert!(
                matches!(parse_fen(fen), Err(ChessError::InvalidFen(_))),
                "{fen:?} should be rejected"
            );
        }
    }

    #[test]
    fn accept_black_to_move_with_en_passant() {
        let state = parse_fen("4k3/8/8/8/3pP3/8/8/4K3 b - e3 0 1").expect("valid FEN");
        assert_eq!(state.en_passant_target().map(|sq| sq.to_string()), Some("e3".to_owned()));
    }
}
