//! Draw conditions that do not depend on the legal move count.

use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;

/// Neither side can possibly deliver mate: bare kings, a single minor piece,
/// or only bishops that all stand on squares of one color.
pub fn is_insufficient_material(board: &Board) -> bool {
    for color in Color::ALL {
        for kind in [PieceKind::Pawn, PieceKind::Rook, PieceKind::Queen] {
            if board.count(color, kind) != 0 {
                return false;
            }
        }
    }

    let knights = board.count(Color::White, PieceKind::Knight) + board.count(Color::Black, PieceKind::Knight);
    let bishops =
        board.bitboard(Color::White, PieceKind::Bishop) | board.bitboard(Color::Black, PieceKind::Bishop);

    match (knights, bishops.count_ones()) {
        (0, 0) | (1, 0) | (0, 1) => true,
        (0, _) => bishops & LIGHT_SQUARES == bishops || bishops & LIGHT_SQUARES == 0,
        _ => false,
    }
}

/// a1 is dark; every square with an odd file + rank sum is light.
const LIGHT_SQUARES: u64 = 0x55AA_55AA_55AA_55AA;

/// Occurrences of the current position, counting only positions reached
/// since the last capture or pawn move. Includes the current one.
pub fn repetition_count(state: &GameState) -> usize {
    let key = state.zobrist_key();
    let entries = state.history().entries();
    let reversible = (state.halfmove_clock() as usize).min(entries.len());

    1 + entries[entries.len() - reversible..]
        .iter()
        .filter(|entry| entry.prev_zobrist_key == key)
        .count()
}

/// Half-move clock has reached `limit`; a zero limit never triggers.
#[inline]
pub fn is_fifty_move_draw(state: &GameState, limit: u16) -> bool {
    limit != 0 && state.halfmove_clock() >= limit
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(fen: &str) -> Board {
        GameState::from_fen(fen).expect("fen").board().clone()
    }

    #[test]
    fn light_square_mask_matches_square_colors() {
        for index in 0..64u8 {
            let square = Square::from_index(index).expect("on board");
            assert_eq!(LIGHT_SQUARES & square.mask() != 0, square.is_light(), "{square}");
        }
    }

    #[test]
    fn insufficient_material_cases() {
        assert!(is_insufficient_material(&board("4k3/8/8/8/8/8/8/4K3 w - - 0 1")));
        assert!(is_insufficient_material(&board("4k3/8/8/8/8/8/8/2B1K3 w - - 0 1")));
        assert!(is_insufficient_material(&board("4k3/8/8/8/8/8/8/1N2K3 w - - 0 1")));
        // c1 and f8 are both dark
        assert!(is_insufficient_material(&board("4kb2/8/8/8/8/8/8/2B1K3 w - - 0 1")));
    }

    #[test]
    fn sufficient_material_cases() {
        // c1 dark, c8 light
        assert!(!is_insufficient_material(&board("2b1k3/8/8/8/8/8/8/2B1K3 w - - 0 1")));
        assert!(!is_insufficient_material(&board("4k3/8/8/8/8/8/8/1NN1K3 w - - 0 1")));
        assert!(!is_insufficient_material(&board("4k3/8/8/8/8/8/8/1N1BK3 w - - 0 1")));
        assert!(!is_insufficient_material(&board("4k3/8/8/8/8/8/4P3/4K3 w - - 0 1")));
        assert!(!is_insufficient_material(&board("4k3/8/8/8/8/8/8/R3K3 w - - 0 1")));
    }

    #[test]
    fn fifty_move_limit() {
        let state = GameState::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 100 80").expect("fen");
        assert!(is_fifty_move_draw(&state, 100));
        assert!(!is_fifty_move_draw(&state, 101));
        assert!(!is_fifty_move_draw(&state, 0));
    }

    #[test]
    fn fresh_position_counts_once() {
        assert_eq!(repetition_count(&GameState::new_game()), 1);
    }
}
