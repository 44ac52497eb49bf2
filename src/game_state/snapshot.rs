//! Serializable save-game form of a `GameState`.
//!
//! A snapshot stores the position the game started from, every played move
//! in long algebraic notation, and the current position. Loading rebuilds the
//! start position, replays the moves through the legality check and requires
//! the result to match the stored current position, so a loaded state is
//! identical (board, rights, clocks and history) to the one that was saved.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::errors::{ChessError, ChessResult};
use crate::game_state::board::Board;
use crate::game_state::chess_types::*;
use crate::game_state::game_state::GameState;
use crate::move_generation::legal_move_apply::unmake_move;
use crate::rules::rules_engine::RulesEngine;
use crate::utils::long_algebraic::parse_long_algebraic;

pub const SNAPSHOT_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSnapshot {
    pub format_version: u32,
    pub saved_at: DateTime<Utc>,
    pub start: PositionSnapshot,
    pub moves: Vec<String>,
    pub position: PositionSnapshot,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionSnapshot {
    pub pieces: Vec<PlacedPiece>,
    pub side_to_move: Color,
    pub castling: CastlingSnapshot,
    pub en_passant_target: Option<SquareCoords>,
    pub halfmove_clock: u16,
    pub fullmove_number: u16,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlacedPiece {
    pub file: u8,
    pub rank: u8,
    pub color: Color,
    pub kind: PieceKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SquareCoords {
    pub file: u8,
    pub rank: u8,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CastlingSnapshot {
    pub white_kingside: bool,
    pub white_queenside: bool,
    pub black_kingside: bool,
    pub black_queenside: bool,
}

impl GameSnapshot {
    pub fn to_json(&self) -> ChessResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> ChessResult<Self> {
        serde_json::from_str(json).map_err(|err| ChessError::MalformedSnapshot(err.to_string()))
    }
}

impl GameState {
    /// Capture the game for saving. Moves undone but still redoable are not
    /// part of the snapshot.
    pub fn to_snapshot(&self) -> GameSnapshot {
        let mut start = self.clone();
        while unmake_move(&mut start).is_some() {}

        GameSnapshot {
            format_version: SNAPSHOT_FORMAT_VERSION,
            saved_at: Utc::now(),
            start: PositionSnapshot::capture(&start),
            moves: self.history.moves().map(|mv| mv.to_string()).collect(),
            position: PositionSnapshot::capture(self),
        }
    }

    /// Rebuild a game from a snapshot under the standard draw rules.
    pub fn from_snapshot(snapshot: &GameSnapshot) -> ChessResult<Self> {
        Self::from_snapshot_with(snapshot, &RulesEngine::default())
    }

    /// Rebuild a game from a snapshot, rejecting anything that could not
    /// have been produced by legal play under `engine`'s rules. Every stored
    /// move is replayed through [`RulesEngine::apply_move`], so a history
    /// that continues past a finished game is refused.
    pub fn from_snapshot_with(snapshot: &GameSnapshot, engine: &RulesEngine) -> ChessResult<Self> {
        if snapshot.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(ChessError::MalformedSnapshot(format!(
                "unsupported format version {}",
                snapshot.format_version
            )));
        }

        let mut state = snapshot.start.restore()?;
        for (ply, text) in snapshot.moves.iter().enumerate() {
            parse_long_algebraic(&state, text)
                .and_then(|mv| engine.apply_move(&mut state, mv))
                .map_err(|err| {
                    ChessError::MalformedSnapshot(format!(
                        "move {} ({text}) cannot be replayed: {err}",
                        ply + 1
                    ))
                })?;
        }

        let expected = snapshot.position.restore()?;
        if !same_position(&state, &expected) {
            return Err(ChessError::MalformedSnapshot(
                "replayed moves do not reach the saved position".to_owned(),
            ));
        }

        Ok(state)
    }
}

fn same_position(a: &GameState, b: &GameState) -> bool {
    a.board == b.board
        && a.side_to_move == b.side_to_move
        && a.castling_rights == b.castling_rights
        && a.en_passant_target == b.en_passant_target
        && a.halfmove_clock == b.halfmove_clock
        && a.fullmove_number == b.fullmove_number
}

impl PositionSnapshot {
    pub fn capture(state: &GameState) -> Self {
        let rights = state.castling_rights;
        Self {
            pieces: state
                .board
                .occupied()
                .map(|(square, piece)| PlacedPiece {
                    file: square.file(),
                    rank: square.rank(),
                    color: piece.color,
                    kind: piece.kind,
                })
                .collect(),
            side_to_move: state.side_to_move,
            castling: CastlingSnapshot {
                white_kingside: rights.has(Color::White, CastleSide::Kingside),
                white_queenside: rights.has(Color::White, CastleSide::Queenside),
                black_kingside: rights.has(Color::Black, CastleSide::Kingside),
                black_queenside: rights.has(Color::Black, CastleSide::Queenside),
            },
            en_passant_target: state.en_passant_target.map(|square| SquareCoords {
                file: square.file(),
                rank: square.rank(),
            }),
            halfmove_clock: state.halfmove_clock,
            fullmove_number: state.fullmove_number,
        }
    }

    /// Build a validated state with an empty history.
    pub fn restore(&self) -> ChessResult<GameState> {
        let mut board = Board::empty();
        let mut seen = HashSet::with_capacity(self.pieces.len());
        for placed in &self.pieces {
            let square = coords_to_square(placed.file, placed.rank)?;
            if !seen.insert(square) {
                return Err(ChessError::MalformedSnapshot(format!(
                    "two pieces on {square}"
                )));
            }
            board.set_piece(square, Piece::new(placed.kind, placed.color));
        }

        let mut rights = CastlingRights::NONE;
        for (enabled, color, side) in [
            (self.castling.white_kingside, Color::White, CastleSide::Kingside),
            (self.castling.white_queenside, Color::White, CastleSide::Queenside),
            (self.castling.black_kingside, Color::Black, CastleSide::Kingside),
            (self.castling.black_queenside, Color::Black, CastleSide::Queenside),
        ] {
            if enabled {
                rights = rights.with(color, side);
            }
        }

        let en_passant_target = self
            .en_passant_target
            .map(|coords| coords_to_square(coords.file, coords.rank))
            .transpose()?;

        if self.fullmove_number == 0 {
            return Err(ChessError::MalformedSnapshot(
                "fullmove number starts at 1".to_owned(),
            ));
        }

        let state = GameState::from_parts(
            board,
            self.side_to_move,
            rights,
            en_passant_target,
            self.halfmove_clock,
            self.fullmove_number,
        );
        state.validate().map_err(ChessError::MalformedSnapshot)?;
        Ok(state)
    }
}

fn coords_to_square(file: u8, rank: u8) -> ChessResult<Square> {
    Square::new(file, rank).map_err(|_| {
        ChessError::MalformedSnapshot(format!("coordinate out of range: file {file}, rank {rank}"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game_state::chess_rules::RulesConfig;
    use crate::move_generation::legal_move_apply::make_move;

    fn played(moves: &[&str]) -> GameState {
        let mut state = GameState::new_game();
        for text in moves {
            let mv = parse_long_algebraic(&state, text).expect("legal move");
            make_move(&mut state, mv).expect("applies");
        }
        state
    }

    #[test]
    fn round_trip_reproduces_state_and_history() {
        let state = played(&["e2e4", "c7c5", "g1f3", "d7d6", "f1b5", "c8d7"]);
        let snapshot = state.to_snapshot();
        assert_eq!(snapshot.moves.len(), 6);
        assert_eq!(snapshot.start.pieces.len(), 32);

        let restored = GameState::from_snapshot(&snapshot).expect("snapshot loads");
        assert_eq!(restored, state);
        assert_eq!(restored.zobrist_key(), state.zobrist_key());
    }

    #[test]
    fn json_round_trip() {
        let state = played(&["d2d4", "g8f6"]);
        let json = state.to_snapshot().to_json().expect("encodes");
        let decoded = GameSnapshot::from_json(&json).expect("decodes");
        assert_eq!(GameState::from_snapshot(&decoded).expect("loads"), state);
    }

    #[test]
    fn rejects_two_kings_of_one_color() {
        let mut snapshot = GameState::new_game().to_snapshot();
        snapshot.start.pieces.push(PlacedPiece {
            file: 3,
            rank: 3,
            color: Color::White,
            kind: PieceKind::King,
        });
        assert!(matches!(
            GameState::from_snapshot(&snapshot),
            Err(ChessError::MalformedSnapshot(_))
        ));
    }

    #[test]
    fn rejects_out_of_range_and_duplicate_squares() {
        let mut snapshot = GameState::new_game().to_snapshot();
        snapshot.position.pieces[0].file = 9;
        assert!(matches!(
            GameState::from_snapshot(&snapshot),
            Err(ChessError::MalformedSnapshot(_))
        ));

        let mut snapshot = GameState::new_game().to_snapshot();
        let duplicate = snapshot.start.pieces[8];
        snapshot.start.pieces.push(duplicate);
        assert!(matches!(
            GameState::from_snapshot(&snapshot),
            Err(ChessError::MalformedSnapshot(_))
        ));
    }

    #[test]
    fn rejects_illegal_history_and_mismatched_position() {
        let mut snapshot = played(&["e2e4"]).to_snapshot();
        snapshot.moves[0] = "e2e5".to_owned();
        assert!(matches!(
            GameState::from_snapshot(&snapshot),
            Err(ChessError::MalformedSnapshot(_))
        ));

        let mut snapshot = played(&["e2e4"]).to_snapshot();
        snapshot.position.halfmove_clock = 7;
        assert!(matches!(
            GameState::from_snapshot(&snapshot),
            Err(ChessError::MalformedSnapshot(_))
        ));
    }

    #[test]
    fn history_past_a_finished_game_depends_on_the_rules() {
        let mut state = GameState::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").expect("fen");
        let mv = parse_long_algebraic(&state, "e1d1").expect("pseudo-legal king step");
        make_move(&mut state, mv).expect("applies");
        let snapshot = state.to_snapshot();

        assert!(matches!(
            GameState::from_snapshot(&snapshot),
            Err(ChessError::MalformedSnapshot(_))
        ));

        let lenient = RulesEngine::new(RulesConfig {
            insufficient_material_draw: false,
            ..RulesConfig::default()
        });
        assert_eq!(GameState::from_snapshot_with(&snapshot, &lenient).expect("loads"), state);
    }

    #[test]
    fn rejects_garbage_json_and_unknown_version() {
        assert!(matches!(
            GameSnapshot::from_json("{ not json"),
            Err(ChessError::MalformedSnapshot(_))
        ));

        let mut snapshot = GameState::new_game().to_snapshot();
        snapshot.format_version = 99;
        assert!(matches!(
            GameState::from_snapshot(&snapshot),
            Err(ChessError::MalformedSnapshot(_))
        ));
    }
}
