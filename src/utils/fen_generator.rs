use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

pub fn generate_fen(game_state: &GameState) -> String {
    let board = generate_board_field(game_state.board());
    let side_to_move = match game_state.side_to_move() {
        Color::White => "w",
        Color::Black => "b",
    };
    let castling = generate_castling_field(game_state.castling_rights());
    let en_passant = game_state
        .en_passant_target()
        .map_or_else(|| "-".to_owned(), |square| square.to_string());

    format!(
        "{} {} {} {} {} {}",
        board,
        side_to_move,
        castling,
        en_passant,
        game_state.halfmove_clock(),
        game_state.fullmove_number()
    )
}

fn generate_board_field(board: &Board) -> String {
    let mut out = String::with_capacity(72);

    for rank in (0..8u8).rev() {
        let mut empty_count = 0u8;

        for file in 0..8u8 {
            let square = Square::from_index_unchecked(rank * 8 + file);
            if let Some(piece) = board.piece_at(square) {
                if empty_count > 0 {
                    out.push(char::from(b'0' + empty_count));
                    empty_count = 0;
                }
                out.push(piece.fen_char());
            } else {
                empty_count += 1;
            }
        }

        if empty_count > 0 {
            out.push(char::from(b'0' + empty_count));
        }

        if rank > 0 {
            out.push('/');
        }
    }

    out
}

fn generate_castling_field(rights: CastlingRights) -> String {
    let mut out = String::new();

    for (color, side, ch) in [
        (Color::White, CastleSide::Kingside, 'K'),
        (Color::White, CastleSide::Queenside, 'Q'),
        (Color::Black, CastleSide::Kingside, 'k'),
        (Color::Black, CastleSide::Queenside, 'q'),
    ] {
        if rights.has(color, side) {
            out.push(ch);
        }
    }

    if out.is_empty() {
        out.push('-');
    }

    out
}
