//! King step bitboards.

use crate::game_state::chess_types::Square;
use crate::moves::ray_tracing::offset_table;

const KING_OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

pub const KING_ATTACKS: [u64; 64] = offset_table(&KING_OFFSETS);

#[inline]
pub const fn king_attacks(square: Square) -> u64 {
    KING_ATTACKS[square.index()]
}
