// Copyright 2026 Tobin Edwards
//
//    Licensed under the Apache License, Version 2.0 (the "License");
//    you may not use this file except in compliance with the License.
//    You may obtain a copy of the License at
//
//        http://www.apache.org/licenses/LICENSE-2.0
//
//    Unless required by applicable law or agreed to in writing, software
//    distributed under the License is distributed on an "AS IS" BASIS,
//    WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
//    See the License for the specific language governing permissions and
//    limitations under the License.

//! The undo/delta stack backing the Do-Over rewind (spec.md §3 "History
//! delta", §4.7 point 1). A touched square's prior [`Piece`] snapshot
//! already carries its old `block_facing`, `pending_do_over` and
//! `resurrection_window` — spec.md's (a)/(b)/(c) parts of a delta — so a
//! [`SquareDelta`] only needs the square and that one snapshot.

use std::collections::HashMap;

use crate::board::{Board, GameStatus};
use crate::castling::CastlingRights;
use crate::material::Color;
use crate::piece::Piece;
use crate::square::Square;
use crate::state::MoveState;

/// The one-shot retention horizon Do-Over can ever rewind: 4 plies
/// (spec.md §4.7 point 1, §9).
pub const MAX_DO_OVER_PLIES: usize = 4;

#[derive(Debug, Clone)]
pub struct SquareDelta {
    pub square: Square,
    pub prior: Option<Piece>,
}

/// The non-per-square board state a segment can touch.
#[derive(Debug, Clone)]
pub struct ScalarDelta {
    pub castling: CastlingRights,
    pub en_passant: Option<Square>,
    pub side_to_move: Color,
    pub status: GameStatus,
    pub in_check: bool,
    pub game_over: bool,
    pub has_winner: bool,
    pub winner: Option<Color>,
    pub notes: Vec<String>,
    pub temporal_slow: HashMap<Color, i32>,
}

impl ScalarDelta {
    pub fn snapshot(board: &Board, temporal_slow: &HashMap<Color, i32>) -> Self {
        Self {
            castling: *board.castling(),
            en_passant: board.en_passant(),
            side_to_move: board.side_to_move(),
            status: board.status,
            in_check: board.in_check,
            game_over: board.game_over,
            has_winner: board.has_winner,
            winner: board.winner,
            notes: board.notes().to_vec(),
            temporal_slow: temporal_slow.clone(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HistoryDelta {
    pub squares: Vec<SquareDelta>,
    pub scalar: ScalarDelta,
    pub current_move: Option<MoveState>,
}

/// A stack of [`HistoryDelta`]s, one per executed segment. Do-Over pops
/// the most recent `N` and replays them backwards onto the board.
#[derive(Debug, Default)]
pub struct History {
    deltas: Vec<HistoryDelta>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn depth(&self) -> usize {
        self.deltas.len()
    }

    pub fn push(&mut self, delta: HistoryDelta) {
        self.deltas.push(delta);
    }

    /// Drops every delta from before the current move's start, once a
    /// move has fully ended and the 4-ply Do-Over horizon no longer
    /// reaches that far back (spec.md §9: deltas are kept "up to 4 plies"
    /// beyond the end of a turn).
    pub fn truncate_to_horizon(&mut self) {
        let len = self.deltas.len();
        if len > MAX_DO_OVER_PLIES {
            self.deltas.drain(0..len - MAX_DO_OVER_PLIES);
        }
    }

    /// Pops up to `n` deltas (never more than are available, and never
    /// more than the 4-ply horizon), restoring the board and temporal
    /// slow map to their state before those segments ran. Returns the
    /// `currentMove` snapshot belonging to the oldest delta popped, i.e.
    /// the `MoveState` (if any) in flight before the rewind window began.
    pub fn rewind(&mut self, board: &mut Board, n: usize, temporal_slow: &mut HashMap<Color, i32>) -> Option<MoveState> {
        let count = n.min(MAX_DO_OVER_PLIES).min(self.deltas.len());
        let mut restored_move = None;
        for _ in 0..count {
            let delta = match self.deltas.pop() {
                Some(d) => d,
                None => break,
            };
            for sq_delta in delta.squares.into_iter().rev() {
                match sq_delta.prior {
                    Some(piece) => board.set_piece(sq_delta.square, piece),
                    None => {
                        board.remove(sq_delta.square);
                    }
                }
            }
            board.set_notes(delta.scalar.notes);
            *board.castling_mut() = delta.scalar.castling;
            board.set_en_passant(delta.scalar.en_passant);
            board.set_side_to_move(delta.scalar.side_to_move);
            board.status = delta.scalar.status;
            board.in_check = delta.scalar.in_check;
            board.game_over = delta.scalar.game_over;
            board.has_winner = delta.scalar.has_winner;
            board.winner = delta.scalar.winner;
            *temporal_slow = delta.scalar.temporal_slow;
            restored_move = delta.current_move;
        }
        restored_move
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::PieceType;

    #[test]
    fn rewind_restores_a_captured_piece() {
        let mut board = Board::empty();
        let attacker_id = board.place_new(Color::White, PieceType::Rook, Square::try_from_coord("a1").unwrap());
        let victim = Piece::new(99, Color::Black, PieceType::Pawn, Square::try_from_coord("a5").unwrap());
        board.place(victim);

        let mut temporal_slow = HashMap::new();
        let scalar_before = ScalarDelta::snapshot(&board, &temporal_slow);
        let square_before = SquareDelta {
            square: Square::try_from_coord("a5").unwrap(),
            prior: Some(victim),
        };
        board.remove(Square::try_from_coord("a5").unwrap());

        let mut history = History::new();
        history.push(HistoryDelta {
            squares: vec![square_before],
            scalar: scalar_before,
            current_move: None,
        });

        assert!(board.at(Square::try_from_coord("a5").unwrap()).is_none());
        history.rewind(&mut board, 1, &mut temporal_slow);
        let restored = board.at(Square::try_from_coord("a5").unwrap()).unwrap();
        assert_eq!(restored.id, 99);
        assert!(board.find(attacker_id).is_some());
    }

    #[test]
    fn rewind_never_exceeds_the_four_ply_horizon() {
        let mut board = Board::empty();
        let mut temporal_slow = HashMap::new();
        let mut history = History::new();
        for _ in 0..10 {
            history.push(HistoryDelta {
                squares: Vec::new(),
                scalar: ScalarDelta::snapshot(&board, &temporal_slow),
                current_move: None,
            });
        }
        history.rewind(&mut board, 10, &mut temporal_slow);
        assert_eq!(history.depth(), 10 - MAX_DO_OVER_PLIES);
    }
}
