//! Rook attack bitboards.

use crate::game_state::chess_types::Square;
use crate::moves::ray_tracing::{empty_board_rays, trace_rays, ORTHOGONAL_DIRECTIONS};

pub const ROOK_RAYS: [u64; 64] = empty_board_rays(&ORTHOGONAL_DIRECTIONS);

#[inline]
pub fn rook_attacks(square: Square, occupancy: u64) -> u64 {
    trace_rays(square, &ORTHOGONAL_DIRECTIONS, occupancy)
}

#[cfg(test)]
mod tests {
    use super::{rook_attacks, ROOK_RAYS};
    use crate::game_state::chess_types::Square;

    #[test]
    fn rook_rays_from_d4_have_fourteen_squares() {
        let d4 = Square::new(3, 3).expect("d4");
        assert_eq!(ROOK_RAYS[d4.index()].count_ones(), 14);
    }

    #[test]
    fn rook_blocker_stops_ray() {
        let a4 = Square::new(0, 3).expect("a4");
        let a5 = Square::new(0, 4).expect("a5");
        let attacks = rook_attacks(Square::A1, a4.mask());

        assert_ne!(attacks & a4.mask(), 0);
        assert_eq!(attacks & a5.mask(), 0);
        assert_ne!(attacks & Square::H1.mask(), 0);
    }
}
