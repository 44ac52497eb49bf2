use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_targets, MoveContext};
use crate::moves::knight_moves::knight_attacks;

pub fn generate_knight_moves(ctx: &MoveContext<'_>, from: Square, out: &mut Vec<Move>) {
    let targets = knight_attacks(from) & !ctx.own_occupancy();
    push_targets(ctx, from, targets, out);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::board::Board;

    #[test]
    fn knight_jumps_over_pieces() {
        let board = Board::starting_position();
        let mut moves = Vec::new();
        generate_knight_moves(&MoveContext::for_board(&board, Color::Black), Square::B8, &mut moves);
        let targets: Vec<String> = moves.iter().map(|mv| mv.to().to_string()).collect();
        assert_eq!(targets, vec!["a6", "c6"]);
    }
}
