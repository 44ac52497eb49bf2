//! Append-only move log with a cursor.
//!
//! Every applied move stores an [`UndoState`] holding what the move destroys
//! (captured piece, previous rights, target square, clocks, hash). Undo steps
//! the cursor back without dropping the entry so it can be redone; recording a
//! different move at the cursor discards the entries beyond it.

use crate::game_state::chess_types::*;

/// Single undo record for `make_move` / `unmake_move`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UndoState {
    pub mv: Move,
    pub moved_piece: Piece,
    pub captured: Option<(Piece, Square)>,

    pub prev_castling_rights: CastlingRights,
    pub prev_en_passant_target: Option<Square>,
    pub prev_halfmove_clock: u16,
    pub prev_fullmove_number: u16,

    pub prev_zobrist_key: u64,
}

#[derive(Debug, Clone, Default)]
pub struct MoveLog {
    entries: Vec<UndoState>,
    cursor: usize,
}

impl MoveLog {
    /// Number of moves currently played (undone moves excluded).
    #[inline]
    pub fn len(&self) -> usize {
        self.cursor
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cursor == 0
    }

    /// Played entries, oldest first.
    #[inline]
    pub fn entries(&self) -> &[UndoState] {
        &self.entries[..self.cursor]
    }

    pub fn moves(&self) -> impl Iterator<Item = Move> + '_ {
        self.entries().iter().map(|entry| entry.mv)
    }

    #[inline]
    pub fn last(&self) -> Option<&UndoState> {
        self.entries().last()
    }

    /// The next move a redo would replay.
    #[inline]
    pub fn redo_target(&self) -> Option<Move> {
        self.entries.get(self.cursor).map(|entry| entry.mv)
    }

    #[inline]
    pub fn redo_len(&self) -> usize {
        self.entries.len() - self.cursor
    }

    pub(crate) fn record(&mut self, entry: UndoState) {
        match self.entries.get_mut(self.cursor) {
            Some(slot) if slot.mv == entry.mv => *slot = entry,
            _ => {
                self.entries.truncate(self.cursor);
                self.entries.push(entry);
            }
        }
        self.cursor += 1;
    }

    pub(crate) fn step_back(&mut self) -> Option<UndoState> {
        let index = self.cursor.checked_sub(1)?;
        self.cursor = index;
        self.entries.get(index).cloned()
    }
}

/// Two logs are equal when their played moves are; redo tails are ignored.
impl PartialEq for MoveLog {
    fn eq(&self, other: &Self) -> bool {
        self.entries() == other.entries()
    }
}

impl Eq for MoveLog {}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(from: Square, to: Square) -> UndoState {
        UndoState {
            mv: Move::new(from, to, MoveKind::Normal),
            moved_piece: Piece::new(PieceKind::Knight, Color::White),
            captured: None,
            prev_castling_rights: CastlingRights::ALL,
            prev_en_passant_target: None,
            prev_halfmove_clock: 0,
            prev_fullmove_number: 1,
            prev_zobrist_key: 0,
        }
    }

    #[test]
    fn undo_keeps_entry_for_redo() {
        let mut log = MoveLog::default();
        log.record(entry(Square::B1, Square::C1));
        log.record(entry(Square::G1, Square::F1));

        let undone = log.step_back().expect("one entry to undo");
        assert_eq!(undone.mv.from(), Square::G1);
        assert_eq!(log.len(), 1);
        assert_eq!(log.redo_len(), 1);
        assert_eq!(log.redo_target(), Some(undone.mv));
    }

    #[test]
    fn recording_a_different_move_drops_redo_tail() {
        let mut log = MoveLog::default();
        log.record(entry(Square::B1, Square::C1));
        log.record(entry(Square::G1, Square::F1));
        log.step_back();
        log.step_back();

        log.record(entry(Square::B1, Square::C1));
        assert_eq!(log.redo_len(), 1, "replaying the same move keeps the tail");

        log.record(entry(Square::H1, Square::G1));
        assert_eq!(log.redo_len(), 0);
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn equality_ignores_redo_tail() {
        let mut a = MoveLog::default();
        a.record(entry(Square::B1, Square::C1));
        let mut b = a.clone();
        b.record(entry(Square::G1, Square::F1));
        b.step_back();

        assert_eq!(a, b);
        assert!(MoveLog::default().step_back().is_none());
    }
}
