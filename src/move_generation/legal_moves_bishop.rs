use crate::game_state::chess_types::*;
use crate::move_generation::legal_move_shared::{push_targets, MoveContext};
use crate::moves::bishop_moves::bishop_attacks;

pub fn generate_bishop_moves(ctx: &MoveContext<'_>, from: Square, out: &mut Vec<Move>) {
    let targets = bishop_attacks(from, ctx.board.occupancy()) & !ctx.own_occupancy();
    push_targets(ctx, from, targets, out);
}
