//! Canonical chess-rule constants and the host-tunable draw configuration.

use serde::{Deserialize, Serialize};

/// Standard chess starting position in Forsyth-Edwards Notation (FEN).
pub const STARTING_POSITION_FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

/// Half-moves without a pawn move or capture that end the game.
pub const FIFTY_MOVE_HALFMOVES: u16 = 100;

/// Occurrences of the same position that end the game.
pub const REPETITION_LIMIT: u8 = 3;

/// Draw thresholds applied by the rules engine.
///
/// Deserializes with missing fields taking their defaults, so hosts can embed
/// a partial table in their own settings file. A zero limit disables that rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    pub fifty_move_limit: u16,
    pub repetition_limit: u8,
    pub insufficient_material_draw: bool,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            fifty_move_limit: FIFTY_MOVE_HALFMOVES,
            repetition_limit: REPETITION_LIMIT,
            insufficient_material_draw: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::RulesConfig;

    #[test]
    fn partial_config_fills_defaults() {
        let config: RulesConfig =
            serde_json::from_str(r#"{ "repetition_limit": 5 }"#).expect("config should parse");
        assert_eq!(config.repetition_limit, 5);
        assert_eq!(config.fifty_move_limit, 100);
        assert!(config.insufficient_material_draw);
    }
}
