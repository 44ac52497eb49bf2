//! The only writer of `GameState`.
//!
//! Every mutation is validated in full before the state is touched, so a
//! failed call leaves the position exactly as it was.

use tracing::{debug, warn};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::RulesConfig;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::{make_move, unmake_move};
use crate::move_generation::legal_move_generator::{has_legal_move, leaves_king_safe, legal_moves};
use crate::move_generation::legal_move_shared::{movement_pattern, MoveContext};
use crate::rules::draw_rules::{is_fifty_move_draw, is_insufficient_material, repetition_count};
use crate::rules::game_phase::GamePhase;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RulesEngine {
    config: RulesConfig,
}

impl RulesEngine {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// Validate `mv` against the legal set and apply it.
    ///
    /// Returns the phase of the resulting position.
    pub fn apply_move(&self, state: &mut GameState, mv: Move) -> ChessResult<GamePhase> {
        let phase = self.game_phase(state);
        if phase.is_terminal() {
            warn!(%mv, ?phase, "move submitted after the game ended");
            return Err(ChessError::GameOver(phase));
        }

        let resolved = resolve_move(state, mv.from(), mv.to(), mv.promotion_kind())
            .inspect_err(|err| warn!(%mv, %err, "move rejected"))?;
        if resolved != mv {
            warn!(%mv, expected = ?resolved.kind(), "move category mismatch");
            return Err(ChessError::IllegalMove {
                from: mv.from(),
                to: mv.to(),
                reason: "move category does not match the position",
            });
        }

        make_move(state, resolved)?;
        let phase = self.game_phase(state);
        debug!(%mv, ?phase, fen = %state.fen(), "move applied");
        Ok(phase)
    }

    /// Revert the last applied move. The move stays available to
    /// [`RulesEngine::redo_move`] until a different move is applied.
    pub fn undo_move(&self, state: &mut GameState) -> ChessResult<GamePhase> {
        let undone = unmake_move(state).ok_or(ChessError::NoMoveToUndo)?;
        let phase = self.game_phase(state);
        debug!(mv = %undone.mv, ?phase, "move undone");
        Ok(phase)
    }

    pub fn redo_move(&self, state: &mut GameState) -> ChessResult<GamePhase> {
        let mv = state.history().redo_target().ok_or(ChessError::NoMoveToRedo)?;
        make_move(state, mv)?;
        let phase = self.game_phase(state);
        debug!(%mv, ?phase, "move redone");
        Ok(phase)
    }

    /// Phase of `state`. No legal moves decides mate or stalemate first;
    /// draws come next, then check.
    pub fn game_phase(&self, state: &GameState) -> GamePhase {
        let in_check = state.is_in_check();

        if !has_legal_move(state) {
            return if in_check {
                GamePhase::Checkmate
            } else {
                GamePhase::Stalemate
            };
        }

        if self.config.insufficient_material_draw && is_insufficient_material(state.board()) {
            return GamePhase::DrawByInsufficientMaterial;
        }

        if self.config.repetition_limit != 0
            && repetition_count(state) >= usize::from(self.config.repetition_limit)
        {
            return GamePhase::DrawByRepetition;
        }

        if is_fifty_move_draw(state, self.config.fifty_move_limit) {
            return GamePhase::DrawByFiftyMove;
        }

        if in_check {
            GamePhase::Check
        } else {
            GamePhase::InProgress
        }
    }

    /// Legal moves, or none once the game is over.
    pub fn legal_moves(&self, state: &GameState) -> Vec<Move> {
        if self.game_phase(state).is_terminal() {
            Vec::new()
        } else {
            legal_moves(state)
        }
    }
}

/// Turn raw coordinates into the legal [`Move`] they denote.
///
/// Fails with `IllegalMove` when no legal move goes from `from` to `to`,
/// whatever `promotion` says. Only then is the kind checked: a promoting
/// move without a valid kind, or a kind on a non-promoting move, is
/// `InvalidPromotion`.
pub fn resolve_move(
    state: &GameState,
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
) -> ChessResult<Move> {
    let side = state.side_to_move();
    let illegal = |reason| ChessError::IllegalMove { from, to, reason };
    let bad_promotion = |reason| ChessError::InvalidPromotion { from, to, reason };

    let piece = state
        .piece_at(from)
        .ok_or_else(|| illegal("no piece on the origin square"))?;
    if piece.color != side {
        return Err(illegal("piece belongs to the side not to move"));
    }

    let mut candidates = Vec::new();
    movement_pattern(piece.kind)(&MoveContext::for_state(state), from, &mut candidates);
    candidates.retain(|mv| mv.to() == to);

    // Every promotion to `to` lands the same way, so one check covers them all.
    let first = *candidates
        .first()
        .ok_or_else(|| illegal("not a legal destination for this piece"))?;
    if !leaves_king_safe(state.board(), first, side) {
        return Err(illegal("leaves the king in check"));
    }

    if first.kind() != MoveKind::Promotion {
        return match promotion {
            Some(_) => Err(bad_promotion("move does not promote")),
            None => Ok(first),
        };
    }

    match promotion {
        None => Err(bad_promotion("promotion kind is required")),
        Some(kind) if !kind.is_promotion_target() => {
            Err(bad_promotion("pawns promote to knight, bishop, rook or queen"))
        }
        Some(kind) => candidates
            .into_iter()
            .find(|mv| mv.promotion_kind() == Some(kind))
            .ok_or_else(|| bad_promotion("pawns promote to knight, bishop, rook or queen")),
    }
}
