use crate::game_state::chess_types::{Color, Square};

pub const WHITE_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(1);
pub const BLACK_PAWN_ATTACKS: [u64; 64] = generate_pawn_attacks(-1);

/// Diagonal capture targets of a `color` pawn standing on `square`.
#[inline]
pub const fn pawn_attacks(color: Color, square: Square) -> u64 {
    match color {
        Color::White => WHITE_PAWN_ATTACKS[square.index()],
        Color::Black => BLACK_PAWN_ATTACKS[square.index()],
    }
}

const fn generate_pawn_attacks(rank_step: i8) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let file = (sq % 8) as i8;
        let rank = (sq / 8) as i8 + rank_step;

        if rank >= 0 && rank < 8 {
            if file > 0 {
                table[sq] |= 1u64 << (rank as usize * 8 + (file - 1) as usize);
            }
            if file < 7 {
                table[sq] |= 1u64 << (rank as usize * 8 + (file + 1) as usize);
            }
        }

        sq += 1;
    }

    table
}
