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

//! Pseudo-legal destination generation per piece kind, extended by the
//! abilities each piece carries. Does not consider king safety — that is
//! [`crate::legality`]'s job.

use crate::ability::Ability;
use crate::board::Board;
use crate::material::{Color, Element, PieceType};
use crate::piece::Piece;
use crate::square::{Direction, Mask, Square};

const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_DELTAS: [(i8, i8); 8] = [
    (0, 1),
    (1, 1),
    (1, 0),
    (1, -1),
    (0, -1),
    (-1, -1),
    (-1, 0),
    (-1, 1),
];

fn pawn_home_rank(color: Color) -> u8 {
    match color {
        Color::White => 1,
        Color::Black => 6,
    }
}

fn pawn_forward(color: Color) -> i8 {
    match color {
        Color::White => 1,
        Color::Black => -1,
    }
}

/// Pseudo-legal destinations for `piece`, including ability-granted
/// extensions (ScatterShot side-captures, the Resurrection window,
/// UmbralStep's backward-pawn mirroring). Castling destinations are not
/// included here; see [`castling_destinations`].
pub fn destinations(board: &Board, piece: &Piece) -> Mask {
    let base = match piece.kind {
        PieceType::Pawn => pawn_destinations(board, piece),
        PieceType::Knight => knight_destinations(board, piece),
        PieceType::Bishop => slider_destinations(board, piece, &bishop_directions()),
        PieceType::Rook => slider_destinations(board, piece, &[Direction::N, Direction::E, Direction::S, Direction::W]),
        PieceType::Queen => slider_destinations(board, piece, &Direction::SLIDER),
        PieceType::King => king_destinations(board, piece),
    };
    if piece.has(Ability::Resurrection) && piece.resurrection_window {
        base | resurrection_window_destinations(board, piece)
    } else {
        base
    }
}

fn bishop_directions() -> [Direction; 4] {
    [Direction::NE, Direction::SE, Direction::SW, Direction::NW]
}

fn pawn_destinations(board: &Board, piece: &Piece) -> Mask {
    let mut mask = Mask::EMPTY;
    let forward = pawn_forward(piece.color);
    let occ = board.occupancy();

    // `home_rank` is the rank this pawn must stand on to get a two-square
    // advance in the given `forward` direction: the piece's own home rank
    // for its natural forward, the mirrored (far) rank for UmbralStep's
    // backward direction.
    let mut add_direction = |forward: i8, home_rank: u8, mask: &mut Mask| {
        if let Some(one) = piece.square.offset(0, forward) {
            if !occ.contains(one) {
                mask.set(one);
                if piece.square.rank() == home_rank {
                    if let Some(two) = piece.square.offset(0, 2 * forward) {
                        if !occ.contains(two) {
                            mask.set(two);
                        }
                    }
                }
            }
        }
        for df in [-1i8, 1] {
            if let Some(target) = piece.square.offset(df, forward) {
                let is_enemy = board
                    .at(target)
                    .map(|p| p.color != piece.color)
                    .unwrap_or(false);
                let is_ep = board.en_passant() == Some(target);
                if is_enemy || is_ep {
                    mask.set(target);
                }
            }
        }
    };

    add_direction(forward, pawn_home_rank(piece.color), &mut mask);
    if piece.has(Ability::UmbralStep) {
        let mirrored_home_rank = 7 - pawn_home_rank(piece.color);
        add_direction(-forward, mirrored_home_rank, &mut mask);
    }

    if piece.has(Ability::ScatterShot) {
        for df in [-1i8, 1] {
            if let Some(target) = piece.square.offset(df, 0) {
                if board
                    .at(target)
                    .map(|p| p.color != piece.color)
                    .unwrap_or(false)
                {
                    mask.set(target);
                }
            }
        }
    }

    mask
}

fn knight_destinations(board: &Board, piece: &Piece) -> Mask {
    let mut mask = Mask::EMPTY;
    for (df, dr) in KNIGHT_DELTAS {
        if let Some(target) = piece.square.offset(df, dr) {
            if !board
                .at(target)
                .map(|p| p.color == piece.color)
                .unwrap_or(false)
            {
                mask.set(target);
            }
        }
    }
    mask
}

fn king_destinations(board: &Board, piece: &Piece) -> Mask {
    let mut mask = Mask::EMPTY;
    for (df, dr) in KING_DELTAS {
        if let Some(target) = piece.square.offset(df, dr) {
            if !board
                .at(target)
                .map(|p| p.color == piece.color)
                .unwrap_or(false)
            {
                mask.set(target);
            }
        }
    }
    mask
}

fn slider_destinations(board: &Board, piece: &Piece, directions: &[Direction]) -> Mask {
    let mut mask = Mask::EMPTY;
    for &dir in directions {
        let (df, dr) = dir.delta();
        let mut cur = piece.square;
        while let Some(next) = cur.offset(df, dr) {
            match board.at(next) {
                None => {
                    mask.set(next);
                    cur = next;
                }
                Some(other) if other.color != piece.color => {
                    mask.set(next);
                    break;
                }
                Some(_) => break,
            }
        }
    }
    mask
}

/// The king-move-or-knight-move neighborhood of `square`: every square a
/// Double Kill/Fire Scorch/Quantum Kill Echo sweep considers adjacent to
/// the capture square. `Square::offset` rejects any result that would
/// wrap a file or rank, so this never crosses board edges.
pub fn cascade_neighborhood(square: Square) -> Vec<Square> {
    KING_DELTAS
        .iter()
        .chain(KNIGHT_DELTAS.iter())
        .filter_map(|&(df, dr)| square.offset(df, dr))
        .collect()
}

/// Adjacent rank-same-file enemy captures made available by an active
/// Resurrection window (spec.md §4.1, "Resurrection window").
pub fn resurrection_window_destinations(board: &Board, piece: &Piece) -> Mask {
    let mut mask = Mask::EMPTY;
    for dr in [-1i8, 1] {
        if let Some(target) = piece.square.offset(0, dr) {
            if board
                .at(target)
                .map(|p| p.color != piece.color)
                .unwrap_or(false)
            {
                mask.set(target);
            }
        }
    }
    mask
}

/// The squares strictly between `from` and `to` on a rank/file/diagonal
/// line (exclusive of both endpoints). Empty if the two squares do not
/// share such a line.
pub fn between(from: Square, to: Square) -> Mask {
    let dir = Direction::between(from, to);
    if dir == Direction::None {
        return Mask::EMPTY;
    }
    let (df, dr) = dir.delta();
    let mut mask = Mask::EMPTY;
    let mut cur = from;
    while let Some(next) = cur.offset(df, dr) {
        if next == to {
            break;
        }
        mask.set(next);
        cur = next;
    }
    mask
}

/// Kingside/queenside castling destination squares for `color`, if the
/// structural preconditions of spec.md §4.1.1 hold (rights held, transit
/// squares empty). King-safety/attack checks happen in `legality.rs`.
pub fn castling_destinations(board: &Board, color: Color) -> Vec<(Square, Square, Square, Square)> {
    // Each tuple is (king_dest, rook_src, rook_dest, king_src).
    let rank = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    let king_src = Square::from_file_rank(4, rank);
    let mut out = Vec::new();
    if board.at(king_src).map(|p| p.kind) != Some(PieceType::King) {
        return out;
    }
    if board.castling().kingside(color) {
        let rook_src = Square::from_file_rank(7, rank);
        let king_dest = Square::from_file_rank(6, rank);
        let rook_dest = Square::from_file_rank(5, rank);
        if board.at(rook_src).map(|p| p.kind) == Some(PieceType::Rook)
            && between(king_src, rook_src).iter().all(|sq| board.at(sq).is_none())
        {
            out.push((king_dest, rook_src, rook_dest, king_src));
        }
    }
    if board.castling().queenside(color) {
        let rook_src = Square::from_file_rank(0, rank);
        let king_dest = Square::from_file_rank(2, rank);
        let rook_dest = Square::from_file_rank(3, rank);
        if board.at(rook_src).map(|p| p.kind) == Some(PieceType::Rook)
            && between(king_src, rook_src).iter().all(|sq| board.at(sq).is_none())
        {
            out.push((king_dest, rook_src, rook_dest, king_src));
        }
    }
    out
}

/// Whether `piece`'s step-budget ability delta requires its configured
/// element to be present; a thin helper kept here because movegen and
/// step-budget both need "ability + matching element" checks.
pub fn ability_element_matches(piece: &Piece, element: Element) -> bool {
    piece.element == element
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use proptest::prelude::*;

    #[test]
    fn knight_has_eight_moves_from_center() {
        let mut board = Board::empty();
        let id = board.place_new(Color::White, PieceType::Knight, Square::try_from_coord("d4").unwrap());
        let piece = *board.find(id).unwrap();
        let mask = destinations(&board, &piece);
        assert_eq!(mask.iter().count(), 8);
    }

    #[test]
    fn rook_blocked_by_own_piece() {
        let mut board = Board::empty();
        let rook_id = board.place_new(Color::White, PieceType::Rook, Square::try_from_coord("a1").unwrap());
        board.place_new(Color::White, PieceType::Pawn, Square::try_from_coord("a3").unwrap());
        let piece = *board.find(rook_id).unwrap();
        let mask = destinations(&board, &piece);
        assert!(mask.contains(Square::try_from_coord("a2").unwrap()));
        assert!(!mask.contains(Square::try_from_coord("a3").unwrap()));
    }

    #[test]
    fn pawn_double_move_blocked_by_intervening_piece() {
        let mut board = Board::empty();
        let pawn_id = board.place_new(Color::White, PieceType::Pawn, Square::try_from_coord("e2").unwrap());
        board.place_new(Color::Black, PieceType::Pawn, Square::try_from_coord("e3").unwrap());
        let piece = *board.find(pawn_id).unwrap();
        let mask = destinations(&board, &piece);
        assert!(!mask.contains(Square::try_from_coord("e4").unwrap()));
        // Diagonal capture onto e3 itself is not offered (straight ahead, not diagonal).
        assert!(!mask.contains(Square::try_from_coord("e3").unwrap()));
    }

    #[test]
    fn between_on_diagonal() {
        let a1 = Square::try_from_coord("a1").unwrap();
        let d4 = Square::try_from_coord("d4").unwrap();
        let mask = between(a1, d4);
        assert_eq!(mask.iter().count(), 2);
    }

    proptest! {
        #[test]
        fn destinations_are_stable_under_a_read_only_rescan(idx in 0u8..64, kind_idx in 0u8..6) {
            let kind = match kind_idx {
                0 => PieceType::Pawn,
                1 => PieceType::Knight,
                2 => PieceType::Bishop,
                3 => PieceType::Rook,
                4 => PieceType::Queen,
                _ => PieceType::King,
            };
            let mut board = Board::standard();
            let square = Square::new(idx);
            board.remove(square);
            let id = board.place_new(Color::White, kind, square);
            let piece = *board.find(id).unwrap();

            let first = destinations(&board, &piece);
            let second = destinations(&board, &piece);
            prop_assert_eq!(first.iter().count(), second.iter().count());
            for sq in first.iter() {
                prop_assert!(second.contains(sq));
            }
        }
    }
}
