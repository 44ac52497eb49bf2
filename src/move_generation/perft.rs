//! Perft: exhaustive legal-move tree counts for validating the generator.

use std::thread;

use tracing::trace;

use crate::errors::ChessResult;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_generator::{has_legal_move, legal_moves};

/// Leaf statistics. Everything except `nodes` describes the move that
/// reached the leaf.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PerftCounts {
    pub nodes: u64,
    pub captures: u64,
    pub en_passant: u64,
    pub castles: u64,
    pub promotions: u64,
    pub checks: u64,
    pub checkmates: u64,
}

impl PerftCounts {
    fn merge(&mut self, rhs: PerftCounts) {
        self.nodes += rhs.nodes;
        self.captures += rhs.captures;
        self.en_passant += rhs.en_passant;
        self.castles += rhs.castles;
        self.promotions += rhs.promotions;
        self.checks += rhs.checks;
        self.checkmates += rhs.checkmates;
    }
}

pub fn perft(game_state: &GameState, depth: u8) -> ChessResult<PerftCounts> {
    if depth == 0 {
        return Ok(PerftCounts {
            nodes: 1,
            ..PerftCounts::default()
        });
    }

    let mut scratch = game_state.clone();
    let mut total = PerftCounts::default();
    perft_recurse(&mut scratch, depth, &mut total)?;
    Ok(total)
}

/// Node count below each root move, in generation order. Depth 0 has no
/// root moves to split on, so it yields no lines.
pub fn perft_divide(game_state: &GameState, depth: u8) -> ChessResult<Vec<(Move, u64)>> {
    let mut lines = Vec::new();
    if depth == 0 {
        return Ok(lines);
    }
    let mut scratch = game_state.clone();

    for mv in legal_moves(&scratch) {
        let mut counts = PerftCounts::default();
        if depth == 1 {
            counts.nodes = 1;
        } else {
            make_move(&mut scratch, mv)?;
            perft_recurse(&mut scratch, depth - 1, &mut counts)?;
            unmake_move(&mut scratch);
        }
        trace!(%mv, nodes = counts.nodes, "perft divide");
        lines.push((mv, counts.nodes));
    }

    Ok(lines)
}

/// Same totals as [`perft`], with root moves spread over `threads` workers.
/// Each worker owns a deep copy of the position.
pub fn perft_parallel(game_state: &GameState, depth: u8, threads: usize) -> ChessResult<PerftCounts> {
    if depth <= 1 || threads <= 1 {
        return perft(game_state, depth);
    }

    let root_moves = legal_moves(game_state);
    if root_moves.is_empty() {
        return Ok(PerftCounts::default());
    }
    let chunk_len = root_moves.len().div_ceil(threads);

    let results: Vec<ChessResult<PerftCounts>> = thread::scope(|scope| {
        let handles: Vec<_> = root_moves
            .chunks(chunk_len)
            .map(|chunk| {
                let mut scratch = game_state.clone();
                scope.spawn(move || -> ChessResult<PerftCounts> {
                    let mut local = PerftCounts::default();
                    for &mv in chunk {
                        make_move(&mut scratch, mv)?;
                        perft_recurse(&mut scratch, depth - 1, &mut local)?;
                        unmake_move(&mut scratch);
                    }
                    Ok(local)
                })
            })
            .collect();

        handles
            .into_iter()
            .map(|handle| match handle.join() {
                Ok(result) => result,
                Err(payload) => std::panic::resume_unwind(payload),
            })
            .collect()
    });

    let mut total = PerftCounts::default();
    for result in results {
        total.merge(result?);
    }
    Ok(total)
}

fn perft_recurse(state: &mut GameState, depth: u8, counts: &mut PerftCounts) -> ChessResult<()> {
    let moves = legal_moves(state);

    if depth == 1 {
        for mv in moves {
            let change = make_move(state, mv)?;
            counts.nodes += 1;
            if change.captured.is_some() {
                counts.captures += 1;
            }
            match mv.kind() {
                MoveKind::EnPassant => counts.en_passant += 1,
                MoveKind::CastleKingside | MoveKind::CastleQueenside => counts.castles += 1,
                _ => {}
            }
            if mv.promotion_kind().is_some() {
                counts.promotions += 1;
            }
            if state.is_in_check() {
                counts.checks += 1;
                if !has_legal_move(state) {
                    counts.checkmates += 1;
                }
            }
            unmake_move(state);
        }
        return Ok(());
    }

    for mv in moves {
        make_move(state, mv)?;
        perft_recurse(state, depth - 1, counts)?;
        unmake_move(state);
    }
    Ok(())
}
