//! Bishop attack bitboards.

use crate::game_state::chess_types::Square;
use crate::moves::ray_tracing::{empty_board_rays, trace_rays, DIAGONAL_DIRECTIONS};

pub const BISHOP_RAYS: [u64; 64] = empty_board_rays(&DIAGONAL_DIRECTIONS);

#[inline]
pub fn bishop_attacks(square: Square, occupancy: u64) -> u64 {
    trace_rays(square, &DIAGONAL_DIRECTIONS, occupancy)
}
