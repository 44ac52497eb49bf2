//! Game phase reported after every applied or undone move.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    #[default]
    InProgress,
    Check,
    Checkmate,
    Stalemate,
    DrawByFiftyMove,
    DrawByRepetition,
    DrawByInsufficientMaterial,
}

impl GamePhase {
    /// No further moves are accepted once a terminal phase is reached.
    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, GamePhase::InProgress | GamePhase::Check)
    }

    #[inline]
    pub const fn is_draw(self) -> bool {
        matches!(
            self,
            GamePhase::Stalemate
                | GamePhase::DrawByFiftyMove
                | GamePhase::DrawByRepetition
                | GamePhase::DrawByInsufficientMaterial
        )
    }
}
