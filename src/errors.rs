//! Errors used throughout the rules core.
//!
//! `ChessError` is the single error type returned by the board model, the
//! rules engine, the game controller and the notation/snapshot helpers. Every
//! variant is recoverable: an operation that fails leaves the game state
//! exactly as it was before the call.

use thiserror::Error;

use crate::game_state::chess_types::Square;
use crate::rules::game_phase::GamePhase;

/// Unified error type for the rules core.
#[derive(Error, Debug)]
pub enum ChessError {
    /// The move is not in the legal set of the current position.
    #[error("illegal move {from}{to}: {reason}")]
    IllegalMove {
        from: Square,
        to: Square,
        reason: &'static str,
    },

    /// Undo was requested with an empty move history.
    #[error("no move to undo")]
    NoMoveToUndo,

    /// Redo was requested but no undone move is waiting to be replayed.
    #[error("no move to redo")]
    NoMoveToRedo,

    /// A promotion kind was missing, invalid, or given on a non-promoting move.
    #[error("invalid promotion for {from}{to}: {reason}")]
    InvalidPromotion {
        from: Square,
        to: Square,
        reason: &'static str,
    },

    /// A saved snapshot violates the data-model invariants.
    #[error("malformed snapshot: {0}")]
    MalformedSnapshot(String),

    /// A move was submitted after the game reached a terminal phase.
    #[error("game is over ({0:?})")]
    GameOver(GamePhase),

    /// A FEN string could not be parsed or describes an impossible position.
    #[error("invalid FEN: {0}")]
    InvalidFen(String),

    /// Algebraic or long algebraic text could not be parsed.
    #[error("invalid notation: {0}")]
    InvalidNotation(String),

    /// A file or rank coordinate outside `0..=7`.
    #[error("square out of bounds: file {file}, rank {rank}")]
    SquareOutOfBounds { file: u8, rank: u8 },

    /// A snapshot could not be encoded as JSON.
    #[error("snapshot encoding failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for rules-core operations.
pub type ChessResult<T> = Result<T, ChessError>;
