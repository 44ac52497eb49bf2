//! Front door for hosts (GUI, persistence, scripts).
//!
//! `Game` owns the single `GameState` and routes every change through the
//! rules engine. Its own job is translating raw coordinates into moves and
//! answering the queries a board UI needs.

use tracing::{info, warn};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::chess_rules::RulesConfig;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::game_state::snapshot::GameSnapshot;
use crate::move_generation::legal_move_checks::attackers_of;
use crate::move_generation::legal_move_generator::legal_moves_from;
use crate::rules::game_phase::GamePhase;
use crate::rules::rules_engine::{resolve_move, RulesEngine};
use crate::utils::algebraic::bitboard_squares;
use crate::utils::long_algebraic::parse_coordinates;

/// Outcome of a successful move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MoveReport {
    pub mv: Move,
    pub captured: Option<Piece>,
    pub phase: GamePhase,
}

#[derive(Debug, Clone, Default)]
pub struct Game {
    state: GameState,
    engine: RulesEngine,
}

impl Game {
    pub fn new_game() -> Self {
        Self::with_config(RulesConfig::default())
    }

    pub fn with_config(config: RulesConfig) -> Self {
        info!(?config, "new game");
        Self {
            state: GameState::new_game(),
            engine: RulesEngine::new(config),
        }
    }

    pub fn from_fen(fen: &str) -> ChessResult<Self> {
        Self::from_fen_with_config(fen, RulesConfig::default())
    }

    pub fn from_fen_with_config(fen: &str, config: RulesConfig) -> ChessResult<Self> {
        let state = GameState::from_fen(fen).inspect_err(|err| warn!(%err, "FEN rejected"))?;
        info!(fen, "game loaded from FEN");
        Ok(Self {
            state,
            engine: RulesEngine::new(config),
        })
    }

    /// Back to the initial position, keeping the rules configuration.
    pub fn restart(&mut self) {
        info!("new game");
        self.state = GameState::new_game();
    }

    #[inline]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[inline]
    pub fn config(&self) -> &RulesConfig {
        self.engine.config()
    }

    /// Play the move from `from` to `to`. `promotion` is required exactly
    /// when a pawn reaches the last rank.
    pub fn make_move(
        &mut self,
        from: Square,
        to: Square,
        promotion: Option<PieceKind>,
    ) -> ChessResult<MoveReport> {
        let phase = self.phase();
        if phase.is_terminal() {
            warn!(%from, %to, ?phase, "move submitted after the game ended");
            return Err(ChessError::GameOver(phase));
        }

        let mv = resolve_move(&self.state, from, to, promotion)
            .inspect_err(|err| warn!(%from, %to, %err, "move rejected"))?;
        let phase = self.engine.apply_move(&mut self.state, mv)?;
        let captured = self
            .state
            .history()
            .last()
            .and_then(|entry| entry.captured)
            .map(|(piece, _)| piece);

        Ok(MoveReport { mv, captured, phase })
    }

    /// [`Game::make_move`] from long algebraic text such as `e7e8q`.
    pub fn make_move_notation(&mut self, text: &str) -> ChessResult<MoveReport> {
        let (from, to, promotion) = parse_coordinates(text)?;
        self.make_move(from, to, promotion)
    }

    pub fn undo(&mut self) -> ChessResult<GamePhase> {
        self.engine.undo_move(&mut self.state)
    }

    pub fn redo(&mut self) -> ChessResult<GamePhase> {
        self.engine.redo_move(&mut self.state)
    }

    #[inline]
    pub fn can_undo(&self) -> bool {
        !self.state.history().is_empty()
    }

    #[inline]
    pub fn can_redo(&self) -> bool {
        self.state.history().redo_len() > 0
    }

    pub fn phase(&self) -> GamePhase {
        self.engine.game_phase(&self.state)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.engine.legal_moves(&self.state)
    }

    /// Squares the piece on `from` may move to, for move highlighting.
    /// Empty for an empty square, an idle-side piece or a finished game.
    pub fn legal_destinations(&self, from: Square) -> Vec<Square> {
        if self.phase().is_terminal() {
            return Vec::new();
        }

        let mut destinations: Vec<Square> = legal_moves_from(&self.state, from)
            .into_iter()
            .map(|mv| mv.to())
            .collect();
        destinations.sort_unstable();
        destinations.dedup();
        destinations
    }

    #[inline]
    pub fn piece_at(&self, square: Square) -> Option<Piece> {
        self.state.piece_at(square)
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.state.side_to_move()
    }

    #[inline]
    pub fn is_in_check(&self) -> bool {
        self.state.is_in_check()
    }

    /// Squares of the pieces giving check to the side to move.
    pub fn checking_pieces(&self) -> Vec<Square> {
        let side = self.state.side_to_move();
        let Some(king) = self.state.board().king_square(side) else {
            return Vec::new();
        };
        bitboard_squares(attackers_of(self.state.board(), king, side.opposite())).collect()
    }

    #[inline]
    pub fn last_move(&self) -> Option<Move> {
        self.state.history().last().map(|entry| entry.mv)
    }

    #[inline]
    pub fn fen(&self) -> String {
        self.state.fen()
    }

    pub fn serialize_state(&self) -> GameSnapshot {
        self.state.to_snapshot()
    }

    /// Replace the current game with `snapshot`, replayed under this game's
    /// rules configuration. On failure the current game is kept.
    pub fn load_state(&mut self, snapshot: &GameSnapshot) -> ChessResult<&GameState> {
        let state = GameState::from_snapshot_with(snapshot, &self.engine)
            .inspect_err(|err| warn!(%err, "snapshot rejected"))?;
        info!(
            moves = snapshot.moves.len(),
            saved_at = %snapshot.saved_at,
            "game loaded from snapshot"
        );
        self.state = state;
        Ok(&self.state)
    }

    /// Deep copy of the position for background work; the copy shares
    /// nothing with the live game.
    pub fn search_snapshot(&self) -> GameState {
        self.state.clone()
    }
}
