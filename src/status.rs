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

//! Check/checkmate/stalemate evaluation run after every `endTurn`
//! (spec.md §4.8).
//!
//! Existence-of-a-legal-move is checked with phasing conservatively
//! disabled (`may_phase = false` in `path_passable`): a full phasing
//! answer needs the mover's handler table, which belongs to the move
//! lifecycle rather than the terminal-state scan. A piece whose only
//! legal moves require phasing is vanishingly rare in practice and is
//! recorded as a known simplification in DESIGN.md.

use crate::board::{Board, GameStatus};
use crate::legality::{direct_capture_allowed, king_in_check, leaves_own_king_in_check, path_passable};
use crate::material::Color;
use crate::movegen::destinations;

#[derive(Debug, Clone, Copy)]
pub struct StatusResult {
    pub in_check: bool,
    pub has_move: bool,
    pub status: GameStatus,
    pub game_over: bool,
    pub has_winner: bool,
    pub winner: Option<Color>,
}

pub fn evaluate(board: &Board, side_to_move: Color) -> StatusResult {
    let in_check = king_in_check(board, side_to_move);
    let has_move = has_any_legal_move(board, side_to_move);
    let (status, game_over, has_winner, winner) = match (in_check, has_move) {
        (false, true) => (GameStatus::Ongoing, false, false, None),
        (true, true) => (GameStatus::Check, false, false, None),
        (true, false) => (GameStatus::Checkmate, true, true, Some(side_to_move.opposite())),
        (false, false) => (GameStatus::Stalemate, true, false, None),
    };
    StatusResult {
        in_check,
        has_move,
        status,
        game_over,
        has_winner,
        winner,
    }
}

fn has_any_legal_move(board: &Board, color: Color) -> bool {
    for piece in board.pieces().filter(|p| p.color == color) {
        for to in destinations(board, piece).iter() {
            if !path_passable(board, piece, piece.square, to, false) {
                continue;
            }
            if let Some(defender) = board.at(to) {
                if defender.color == piece.color {
                    continue;
                }
                if !direct_capture_allowed(piece, defender, false) {
                    continue;
                }
            }
            if !leaves_own_king_in_check(board, piece.square, to) {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::PieceType;
    use crate::square::Square;

    #[test]
    fn standard_opening_position_is_ongoing() {
        let board = Board::standard();
        let result = evaluate(&board, Color::White);
        assert!(!result.in_check);
        assert!(result.has_move);
        assert_eq!(result.status, GameStatus::Ongoing);
    }

    #[test]
    fn back_rank_mate_is_checkmate() {
        let mut board = Board::empty();
        board.place_new(Color::Black, PieceType::King, Square::try_from_coord("h8").unwrap());
        board.place_new(Color::Black, PieceType::Pawn, Square::try_from_coord("f7").unwrap());
        board.place_new(Color::Black, PieceType::Pawn, Square::try_from_coord("g7").unwrap());
        board.place_new(Color::Black, PieceType::Pawn, Square::try_from_coord("h7").unwrap());
        board.place_new(Color::White, PieceType::Rook, Square::try_from_coord("a8").unwrap());
        board.place_new(Color::White, PieceType::King, Square::try_from_coord("a1").unwrap());

        let result = evaluate(&board, Color::Black);
        assert!(result.in_check);
        assert!(!result.has_move);
        assert_eq!(result.status, GameStatus::Checkmate);
        assert_eq!(result.winner, Some(Color::White));
    }

    #[test]
    fn king_with_no_moves_but_not_in_check_is_stalemate() {
        let mut board = Board::empty();
        board.place_new(Color::Black, PieceType::King, Square::try_from_coord("h8").unwrap());
        board.place_new(Color::White, PieceType::Queen, Square::try_from_coord("g6").unwrap());
        board.place_new(Color::White, PieceType::King, Square::try_from_coord("f7").unwrap());

        let result = evaluate(&board, Color::Black);
        assert!(!result.in_check);
        assert!(!result.has_move);
        assert_eq!(result.status, GameStatus::Stalemate);
    }
}
