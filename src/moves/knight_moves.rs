use crate::game_state::chess_types::Square;
use crate::moves::ray_tracing::offset_table;

const KNIGHT_OFFSETS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

pub const KNIGHT_ATTACKS: [u64; 64] = offset_table(&KNIGHT_OFFSETS);

#[inline]
pub const fn knight_attacks(square: Square) -> u64 {
    KNIGHT_ATTACKS[square.index()]
}

#[cfg(test)]
mod tests {
    use super::knight_attacks;
    use crate::game_state::chess_types::Square;

    #[test]
    fn knight_attacks_from_d4_has_eight_targets() {
        let d4 = Square::new(3, 3).expect("d4");
        assert_eq!(knight_attacks(d4).count_ones(), 8);
    }

    #[test]
    fn knight_attacks_from_corner_has_two_targets() {
        assert_eq!(knight_attacks(Square::H8).count_ones(), 2);
    }
}
