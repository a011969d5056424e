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

//! The ordered capture cascade (spec.md §4.7): Do-Over interrupt, Double
//! Kill/Fire Scorch extra removal, Quantum Kill + Echo, then the
//! per-attacker capture penalties. Every ability removal path recursively
//! rechecks Do-Over on the piece it just removed.

use crate::ability::Ability;
use crate::board::Board;
use crate::dispatch::{handler_for, CaptureContext, CaptureOutcome, Registry};
use crate::material::Element;
use crate::movegen::cascade_neighborhood;
use crate::piece::Piece;
use crate::square::Square;
use crate::state::MoveState;

/// What the cascade asks the lifecycle to do once it returns.
#[derive(Debug, Clone, Default)]
pub struct CascadeResult {
    pub force_turn_end: bool,
    pub do_over: Option<String>,
    /// The square whose piece had `pending_do_over` consumed, when
    /// `do_over` fired. The caller restores a pre-segment board snapshot
    /// but must re-apply this one flag flip so Do-Over stays a one-shot.
    pub do_over_square: Option<Square>,
    pub notes: Vec<String>,
}

impl CascadeResult {
    fn note(&mut self, text: impl Into<String>) {
        self.notes.push(text.into());
    }
}

/// The per-move capture limit: 1, plus 2 more if the attacker carries
/// Chain Kill (spec.md §4.7, closing paragraph).
pub fn capture_limit(state: &MoveState) -> i32 {
    1 + state.runtime_ref(Ability::ChainKill).map(|r| r.capture_limit).unwrap_or(0)
}

/// A candidate secondary victim is eligible for ability-driven removal
/// when it isn't Earth-element, isn't Obstinant, isn't a King, isn't
/// Indomitable, and its rank doesn't exceed the gating rules of Stalwart
/// (blocks lower-rank attackers) / Belligerent (blocks higher-rank
/// attackers) relative to the strictly-lower-rank requirement already
/// applied by the caller.
fn removable(victim: &Piece) -> bool {
    victim.kind != crate::material::PieceType::King
        && victim.element != Element::Earth
        && !victim.has(Ability::Obstinant)
        && !victim.has(Ability::Indomitable)
}

fn gated_by_rank_abilities(attacker: &Piece, victim: &Piece) -> bool {
    if victim.has(Ability::Stalwart) && attacker.kind.rank() < victim.kind.rank() {
        return true;
    }
    if victim.has(Ability::Belligerent) && attacker.kind.rank() > victim.kind.rank() {
        return true;
    }
    false
}

/// Finds the best neighbor of `origin` of rank strictly lower than
/// `primary_rank`, preferring the highest rank among eligible candidates
/// and the lowest square index to break ties.
fn best_lower_rank_neighbor(board: &Board, attacker: &Piece, origin: Square, primary_rank: u8) -> Option<Square> {
    cascade_neighborhood(origin)
        .into_iter()
        .filter_map(|sq| board.at(sq).map(|p| (sq, p)))
        .filter(|(_, p)| p.color != attacker.color)
        .filter(|(_, p)| p.kind.rank() < primary_rank)
        .filter(|(_, p)| removable(p))
        .filter(|(_, p)| !gated_by_rank_abilities(attacker, p))
        .max_by(|(sq_a, a), (sq_b, b)| a.kind.rank().cmp(&b.kind.rank()).then(sq_b.index().cmp(&sq_a.index())))
        .map(|(sq, _)| sq)
}

/// The highest-rank enemy of rank at most `max_rank`, anywhere on the
/// board, breaking ties by lowest square index (Quantum Kill's scan).
fn best_board_wide_victim(board: &Board, attacker: &Piece, max_rank: u8) -> Option<Square> {
    board
        .pieces()
        .filter(|p| p.color != attacker.color)
        .filter(|p| p.kind.rank() <= max_rank)
        .filter(|p| removable(p))
        .filter(|p| !gated_by_rank_abilities(attacker, p))
        .map(|p| (p.square, p.kind.rank()))
        .max_by(|(sq_a, rank_a), (sq_b, rank_b)| rank_a.cmp(rank_b).then(sq_b.index().cmp(&sq_a.index())))
        .map(|(sq, _)| sq)
}

/// Removes the piece at `square` and, if it carries Do-Over, recurses
/// into the interrupt check before reporting it as actually gone
/// (spec.md §4.7, closing paragraph: "every ability removal path
/// recursively checks Do-Over on the secondary victim").
fn remove_with_do_over_check(board: &mut Board, square: Square, result: &mut CascadeResult, history_depth: usize) -> bool {
    let Some(victim) = board.at(square).copied() else {
        return false;
    };
    if victim.has(Ability::DoOver) && victim.pending_do_over {
        if let Some(piece) = board.at_mut(square) {
            piece.pending_do_over = false;
        }
        let plies = history_depth.min(4);
        result.do_over = Some(format!("Do-Over: rewound {plies} plies"));
        result.do_over_square = Some(square);
        return false;
    }
    board.remove(square);
    true
}

/// Runs the ordered cascade for one capture at `victim_square`. Returns
/// once a Do-Over interrupt fires (short-circuiting the remaining steps)
/// or after every remaining step has had its chance.
pub fn resolve_capture_cascade(
    board: &mut Board,
    state: &mut MoveState,
    custom: &Registry,
    victim_square: Square,
    history_depth: usize,
) -> CascadeResult {
    let mut result = CascadeResult::default();
    let attacker = state.piece;

    // Step 1: Do-Over interrupt on the primary victim.
    let Some(primary_victim) = board.at(victim_square).copied() else {
        return result;
    };
    if primary_victim.has(Ability::DoOver) && primary_victim.pending_do_over {
        if let Some(piece) = board.at_mut(victim_square) {
            piece.pending_do_over = false;
        }
        let plies = history_depth.min(4);
        result.do_over = Some(format!("Do-Over: rewound {plies} plies"));
        result.do_over_square = Some(victim_square);
        return result;
    }
    board.remove(victim_square);
    let primary_rank = primary_victim.kind.rank();

    // Step 2: Double Kill sweep.
    let mut double_kill_fired = false;
    if attacker.has(Ability::DoubleKill) {
        let already_fired = state.runtime_ref(Ability::DoubleKill).map(|r| r.capture_extra).unwrap_or(false);
        if !already_fired {
            if let Some(target) = best_lower_rank_neighbor(board, &attacker, victim_square, primary_rank) {
                if remove_with_do_over_check(board, target, &mut result, history_depth) {
                    state.runtime(Ability::DoubleKill).capture_extra = true;
                    result.note("Double Kill");
                    double_kill_fired = true;
                } else if result.do_over.is_some() {
                    return result;
                }
            }
        }
    }

    // Step 3: Fire Scorch, only if Double Kill didn't already fire.
    if !double_kill_fired && attacker.element == Element::Fire && attacker.has(Ability::Scorch) {
        if let Some(target) = best_lower_rank_neighbor(board, &attacker, victim_square, primary_rank) {
            if remove_with_do_over_check(board, target, &mut result, history_depth) {
                result.note("Fire Scorch");
            } else if result.do_over.is_some() {
                return result;
            }
        }
    }

    // Step 4: Quantum Kill, once per move, plus a single adjacent Echo.
    if attacker.has(Ability::QuantumKill) {
        let runtime = state.runtime(Ability::QuantumKill);
        if !runtime.used {
            runtime.used = true;
            if let Some(target) = best_board_wide_victim(board, &attacker, primary_rank) {
                if remove_with_do_over_check(board, target, &mut result, history_depth) {
                    result.note("Quantum Kill");
                    if let Some(echo) = best_lower_rank_neighbor(board, &attacker, target, primary_rank) {
                        if remove_with_do_over_check(board, echo, &mut result, history_depth) {
                            result.note("Quantum Kill Echo");
                        } else if result.do_over.is_some() {
                            return result;
                        }
                    }
                } else if result.do_over.is_some() {
                    return result;
                }
            }
        }
    }

    // Step 5: capture penalties.
    let context = CaptureContext {
        attacker_color: attacker.color,
        victim_square,
    };
    let mut outcome = CaptureOutcome::default();
    let handlers = state.handlers.clone();
    for ability in &handlers {
        if let Some(handler) = handler_for(custom, *ability) {
            let delta = handler.resolve_capture(state, &context);
            outcome.step_adjustment += delta.step_adjustment;
            outcome.force_turn_end |= delta.force_turn_end;
        }
    }
    state.remaining_steps = (state.remaining_steps + outcome.step_adjustment).max(0);
    result.force_turn_end = outcome.force_turn_end;

    // The primary victim removed above isn't pushed to `state.captures`
    // until the cascade returns (engine.rs), so count it here too.
    let reached_limit = (state.captures.len() as i32 + 1) >= capture_limit(state);
    result.force_turn_end |= reached_limit;

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Color, PieceType};

    fn board_with(pieces: &[(Color, PieceType, &str)]) -> Board {
        let mut board = Board::empty();
        for (color, kind, coord) in pieces {
            board.place_new(*color, *kind, Square::try_from_coord(coord).unwrap());
        }
        board
    }

    #[test]
    fn double_kill_removes_a_lower_rank_neighbor() {
        let mut board = board_with(&[
            (Color::White, PieceType::Queen, "d4"),
            (Color::Black, PieceType::Rook, "d5"),
            (Color::Black, PieceType::Pawn, "e5"),
        ]);
        let mut attacker = Piece::new(0, Color::White, PieceType::Queen, Square::try_from_coord("d4").unwrap());
        attacker.abilities.insert(Ability::DoubleKill);
        let mut state = MoveState::new(attacker, 5, vec![Ability::DoubleKill]);
        let victim_sq = Square::try_from_coord("d5").unwrap();

        let result = resolve_capture_cascade(&mut board, &mut state, &Registry::new(), victim_sq, 0);
        assert!(result.do_over.is_none());
        assert!(board.at(victim_sq).is_none());
        assert!(board.at(Square::try_from_coord("e5").unwrap()).is_none());
        assert!(result.notes.iter().any(|n| n == "Double Kill"));
    }

    #[test]
    fn do_over_interrupt_short_circuits() {
        let mut board = board_with(&[(Color::White, PieceType::Rook, "a1")]);
        let mut victim = Piece::new(9, Color::Black, PieceType::Pawn, Square::try_from_coord("a5").unwrap());
        victim.abilities.insert(Ability::DoOver);
        board.place(victim);

        let attacker = Piece::new(0, Color::White, PieceType::Rook, Square::try_from_coord("a1").unwrap());
        let mut state = MoveState::new(attacker, 5, Vec::new());
        let victim_sq = Square::try_from_coord("a5").unwrap();

        let result = resolve_capture_cascade(&mut board, &mut state, &Registry::new(), victim_sq, 2);
        assert!(result.do_over.is_some());
        assert!(board.at(victim_sq).is_some());
    }

    #[test]
    fn capture_limit_includes_chain_kill_bonus() {
        let mut attacker = Piece::new(1, Color::White, PieceType::Queen, Square::new(0));
        attacker.abilities.insert(Ability::ChainKill);
        let mut state = MoveState::new(attacker, 5, vec![Ability::ChainKill]);
        assert_eq!(capture_limit(&state), 1);
        state.runtime(Ability::ChainKill).capture_limit = 2;
        assert_eq!(capture_limit(&state), 3);
    }
}
