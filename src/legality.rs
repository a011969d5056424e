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

//! Path passability, direct-capture gating and king-safety simulation
//! (spec.md §4.2).

use crate::ability::{Ability, AbilitySet};
use crate::abilities::static_phase_allows;
use crate::board::Board;
use crate::dispatch::{build_handler_table, handler_for, Registry};
use crate::material::{Color, Element};
use crate::movegen::{self, destinations};
use crate::piece::Piece;
use crate::square::Square;

/// Whether the line between `from` and `to` (exclusive) is passable for
/// `piece`. `may_phase` is the mover-level answer from
/// `dispatch::can_phase_through`; even a phasing mover cannot pass an
/// `Indomitable` or `Stalwart` defender.
pub fn path_passable(board: &Board, piece: &Piece, from: Square, to: Square, may_phase: bool) -> bool {
    for sq in movegen::between(from, to).iter() {
        match board.at(sq) {
            None => continue,
            Some(occupant) => {
                let phaseable = may_phase
                    && !occupant.has(Ability::Indomitable)
                    && !occupant.has(Ability::Stalwart);
                if !phaseable {
                    return false;
                }
            }
        }
    }
    true
}

/// Direct-capture gating (spec.md §4.2 point 3). `is_scatter_capture`
/// marks a ScatterShot side-capture, which cannot remove an Indomitable
/// defender.
pub fn direct_capture_allowed(attacker: &Piece, defender: &Piece, is_scatter_capture: bool) -> bool {
    if is_scatter_capture && defender.has(Ability::Indomitable) {
        return false;
    }
    if defender.has(Ability::Stalwart) && attacker.kind.rank() < defender.kind.rank() {
        return false;
    }
    if defender.has(Ability::Belligerent) && attacker.kind.rank() > defender.kind.rank() {
        return false;
    }
    true
}

/// BlockPath's capture refusal: a defender facing the attacker's approach
/// direction refuses the capture unless the attacker is Water-element
/// (spec.md §4.5 step 4).
pub fn capture_blocked_by_block_path(attacker: &Piece, defender: &Piece) -> bool {
    if !defender.has(Ability::BlockPath) {
        return false;
    }
    if attacker.element == Element::Water {
        return false;
    }
    let attack_dir = crate::square::Direction::between(defender.square, attacker.square);
    attack_dir == defender.block_facing
}

/// The mover-level phasing answer (spec.md §4.6): any handler's
/// `CanPhase` denial wins outright; otherwise any handler granting `true`
/// wins; otherwise the static ability fallback decides.
pub fn can_phase_through(custom: &Registry, piece: &Piece, side_abilities: AbilitySet) -> bool {
    let table = build_handler_table(custom, piece.abilities, side_abilities);
    let mut granted = false;
    for ability in table {
        if let Some(handler) = handler_for(custom, ability) {
            match handler.can_phase(piece) {
                Some(Ok(true)) => granted = true,
                Some(Err(_)) => return false,
                _ => {}
            }
        }
    }
    if granted {
        return true;
    }
    static_phase_allows(piece.abilities, side_abilities)
}

/// Whether `square` is attacked by any piece of `by_color`, using plain
/// pseudo-legal generation (ability-extended) as the attack model.
pub fn is_attacked(board: &Board, square: Square, by_color: Color) -> bool {
    board
        .pieces()
        .filter(|p| p.color == by_color)
        .any(|p| destinations(board, p).contains(square))
}

#[inline]
pub fn king_in_check(board: &Board, color: Color) -> bool {
    match board.king_square(color) {
        Some(sq) => is_attacked(board, sq, color.opposite()),
        None => false,
    }
}

/// Simulates `from -> to` on a cloned board and reports whether the
/// mover's own king would be left in check. Does not mutate `board`.
pub fn leaves_own_king_in_check(board: &Board, from: Square, to: Square) -> bool {
    let mut shadow = board.clone();
    let color = shadow.at(from).map(|p| p.color);
    shadow.relocate(from, to);
    match color {
        Some(color) => king_in_check(&shadow, color),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::Board;
    use crate::material::PieceType;

    #[test]
    fn path_blocked_by_indomitable_even_when_phasing() {
        let mut board = Board::empty();
        let rook_id = board.place_new(Color::White, PieceType::Rook, Square::try_from_coord("a1").unwrap());
        let mut blocker = Piece::new(99, Color::Black, PieceType::Pawn, Square::try_from_coord("a3").unwrap());
        blocker.abilities.insert(Ability::Indomitable);
        board.place(blocker);
        let rook = *board.find(rook_id).unwrap();
        assert!(!path_passable(&board, &rook, rook.square, Square::try_from_coord("a5").unwrap(), true));
    }

    #[test]
    fn stalwart_blocks_lower_rank_attacker() {
        let attacker = Piece::new(1, Color::White, PieceType::Knight, Square::try_from_coord("b1").unwrap());
        let mut defender = Piece::new(2, Color::Black, PieceType::Rook, Square::try_from_coord("a3").unwrap());
        defender.abilities.insert(Ability::Stalwart);
        assert!(!direct_capture_allowed(&attacker, &defender, false));
    }

    #[test]
    fn king_in_check_detects_rook_attack() {
        let mut board = Board::empty();
        board.place_new(Color::White, PieceType::King, Square::try_from_coord("e1").unwrap());
        board.place_new(Color::Black, PieceType::Rook, Square::try_from_coord("e8").unwrap());
        assert!(king_in_check(&board, Color::White));
    }
}
