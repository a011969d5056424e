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

//! The board model: occupancy, bitboards, castling/en-passant state and
//! the per-turn annotation log.

use serde::{Deserialize, Serialize};

use crate::castling::CastlingRights;
use crate::material::{Color, PieceType, Promotion};
use crate::piece::{Piece, PieceId};
use crate::square::{Mask, Square};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
pub enum GameStatus {
    Ongoing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameStatus::Ongoing => "ongoing",
            GameStatus::Check => "check",
            GameStatus::Checkmate => "checkmate",
            GameStatus::Stalemate => "stalemate",
        }
    }
}

#[derive(Debug, Clone)]
pub struct Board {
    squares: [Option<Piece>; 64],
    color_occ: [Mask; 2],
    type_occ: [Mask; 6],
    side_to_move: Color,
    notes: Vec<String>,
    castling: CastlingRights,
    en_passant: Option<Square>,
    promotion_choices: Vec<Promotion>,
    next_piece_id: PieceId,

    pub in_check: bool,
    pub game_over: bool,
    pub has_winner: bool,
    pub winner: Option<Color>,
    pub status: GameStatus,
}

impl Board {
    pub fn empty() -> Self {
        Self {
            squares: [None; 64],
            color_occ: [Mask::EMPTY; 2],
            type_occ: [Mask::EMPTY; 6],
            side_to_move: Color::White,
            notes: Vec::new(),
            castling: CastlingRights::NONE,
            en_passant: None,
            promotion_choices: Promotion::CANONICAL_ORDER.to_vec(),
            next_piece_id: 0,
            in_check: false,
            game_over: false,
            has_winner: false,
            winner: None,
            status: GameStatus::Ongoing,
        }
    }

    /// The standard chess starting position, White to move, full castling
    /// rights, no pieces assigned abilities/elements yet (that is
    /// `SetSideConfig`'s job).
    pub fn standard() -> Self {
        let mut board = Self::empty();
        board.castling = CastlingRights::ALL;
        let back_rank = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];
        for (file, kind) in back_rank.into_iter().enumerate() {
            board.place_new(Color::White, kind, Square::from_file_rank(file as u8, 0));
            board.place_new(Color::White, PieceType::Pawn, Square::from_file_rank(file as u8, 1));
            board.place_new(Color::Black, PieceType::Pawn, Square::from_file_rank(file as u8, 6));
            board.place_new(Color::Black, kind, Square::from_file_rank(file as u8, 7));
        }
        board
    }

    pub fn place_new(&mut self, color: Color, kind: PieceType, square: Square) -> PieceId {
        let id = self.next_piece_id;
        self.next_piece_id += 1;
        let piece = Piece::new(id, color, kind, square);
        self.place(piece);
        id
    }

    pub fn place(&mut self, piece: Piece) {
        debug_assert!(self.squares[usize::from(piece.square)].is_none());
        self.color_occ[piece.color.to_index()].set(piece.square);
        self.type_occ[piece.kind.to_index()].set(piece.square);
        self.squares[usize::from(piece.square)] = Some(piece);
    }

    pub fn remove(&mut self, square: Square) -> Option<Piece> {
        let piece = self.squares[usize::from(square)].take()?;
        self.color_occ[piece.color.to_index()].clear(square);
        self.type_occ[piece.kind.to_index()].clear(square);
        Some(piece)
    }

    /// Moves whatever piece is on `from` onto `square` (its own field
    /// updated to match), overwriting any piece that was already there.
    pub fn relocate(&mut self, from: Square, to: Square) -> Option<Piece> {
        let mut piece = self.remove(from)?;
        self.remove(to);
        piece.square = to;
        self.place(piece);
        Some(piece)
    }

    pub fn set_piece(&mut self, square: Square, piece: Piece) {
        self.remove(square);
        let mut piece = piece;
        piece.square = square;
        self.place(piece);
    }

    #[inline]
    pub fn at(&self, square: Square) -> Option<&Piece> {
        self.squares[usize::from(square)].as_ref()
    }

    #[inline]
    pub fn at_mut(&mut self, square: Square) -> Option<&mut Piece> {
        self.squares[usize::from(square)].as_mut()
    }

    pub fn find(&self, id: PieceId) -> Option<&Piece> {
        self.squares.iter().flatten().find(|p| p.id == id)
    }

    pub fn find_mut(&mut self, id: PieceId) -> Option<&mut Piece> {
        self.squares.iter_mut().flatten().find(|p| p.id == id)
    }

    pub fn pieces(&self) -> impl Iterator<Item = &Piece> {
        self.squares.iter().flatten()
    }

    pub fn pieces_mut(&mut self) -> impl Iterator<Item = &mut Piece> {
        self.squares.iter_mut().flatten()
    }

    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.pieces()
            .find(|p| p.color == color && p.kind == PieceType::King)
            .map(|p| p.square)
    }

    #[inline]
    pub fn color_occupancy(&self, color: Color) -> Mask {
        self.color_occ[color.to_index()]
    }

    #[inline]
    pub fn type_occupancy(&self, kind: PieceType) -> Mask {
        self.type_occ[kind.to_index()]
    }

    #[inline]
    pub fn occupancy(&self) -> Mask {
        self.color_occ[0] | self.color_occ[1]
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    pub fn set_side_to_move(&mut self, color: Color) {
        self.side_to_move = color;
    }

    pub fn flip_side_to_move(&mut self) {
        self.side_to_move = self.side_to_move.opposite();
    }

    #[inline]
    pub fn castling(&self) -> &CastlingRights {
        &self.castling
    }

    #[inline]
    pub fn castling_mut(&mut self) -> &mut CastlingRights {
        &mut self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    pub fn set_en_passant(&mut self, target: Option<Square>) {
        self.en_passant = target;
    }

    pub fn promotion_choices(&self) -> &[Promotion] {
        &self.promotion_choices
    }

    pub fn set_promotion_choices(&mut self, choices: Vec<Promotion>) {
        self.promotion_choices = choices;
    }

    /// Appends a note to the current turn's `;`-separated log.
    pub fn push_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn last_note(&self) -> String {
        self.notes.join(";")
    }

    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    pub fn set_notes(&mut self, notes: Vec<String>) {
        self.notes = notes;
    }

    pub fn clear_notes(&mut self) {
        self.notes.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_position_has_32_pieces() {
        let board = Board::standard();
        assert_eq!(board.pieces().count(), 32);
        assert_eq!(board.occupancy().iter().count(), 32);
    }

    #[test]
    fn color_occupancy_matches_piece_set(
    ) {
        let board = Board::standard();
        for color in [Color::White, Color::Black] {
            let from_pieces: Vec<Square> = board
                .pieces()
                .filter(|p| p.color == color)
                .map(|p| p.square)
                .collect();
            for sq in from_pieces {
                assert!(board.color_occupancy(color).contains(sq));
            }
        }
    }

    #[test]
    fn relocate_keeps_piece_square_in_sync() {
        let mut board = Board::standard();
        let from = Square::try_from_coord("e2").unwrap();
        let to = Square::try_from_coord("e4").unwrap();
        board.relocate(from, to);
        assert!(board.at(from).is_none());
        assert_eq!(board.at(to).unwrap().square, to);
    }

    #[test]
    fn notes_join_with_semicolons() {
        let mut board = Board::empty();
        board.push_note("a");
        board.push_note("b");
        assert_eq!(board.last_note(), "a;b");
    }
}
