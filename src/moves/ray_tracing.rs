//! Ray walking shared by the sliding-piece attack generators.

use crate::game_state::chess_types::Square;

pub const DIAGONAL_DIRECTIONS: [(i8, i8); 4] = [(1, 1), (-1, 1), (1, -1), (-1, -1)];
pub const ORTHOGONAL_DIRECTIONS: [(i8, i8); 4] = [(0, 1), (0, -1), (1, 0), (-1, 0)];

/// Squares reached from `square` along each direction, stopping on (and
/// including) the first occupied square.
#[inline]
pub fn trace_rays(square: Square, directions: &[(i8, i8); 4], occupancy: u64) -> u64 {
    let mut attacks = 0u64;
    for &(file_step, rank_step) in directions {
        let mut cursor = square.offset(file_step, rank_step);
        while let Some(target) = cursor {
            attacks |= target.mask();
            if occupancy & target.mask() != 0 {
                break;
            }
            cursor = target.offset(file_step, rank_step);
        }
    }
    attacks
}

/// Empty-board rays for every square, built at compile time.
pub const fn empty_board_rays(directions: &[(i8, i8); 4]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut d = 0usize;
        while d < 4 {
            let (file_step, rank_step) = directions[d];
            let mut file = (sq % 8) as i8 + file_step;
            let mut rank = (sq / 8) as i8 + rank_step;
            while file >= 0 && file < 8 && rank >= 0 && rank < 8 {
                table[sq] |= 1u64 << (rank as usize * 8 + file as usize);
                file += file_step;
                rank += rank_step;
            }
            d += 1;
        }
        sq += 1;
    }

    table
}

/// Single-step targets for a fixed offset pattern (knight, king).
pub const fn offset_table(offsets: &[(i8, i8); 8]) -> [u64; 64] {
    let mut table = [0u64; 64];
    let mut sq = 0usize;

    while sq < 64 {
        let mut i = 0usize;
        while i < 8 {
            let file = (sq % 8) as i8 + offsets[i].0;
            let rank = (sq / 8) as i8 + offsets[i].1;
            if file >= 0 && file < 8 && rank >= 0 && rank < 8 {
                table[sq] |= 1u64 << (rank as usize * 8 + file as usize);
            }
            i += 1;
        }
        sq += 1;
    }

    table
}
