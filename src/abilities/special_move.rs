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

//! `PlanSpecialMove` handlers: SideStep and QuantumStep (spec.md §4.5
//! "Special moves"). Probed in that order by `continueMove` once normal
//! legality has already rejected the request.

use crate::ability::Ability;
use crate::board::Board;
use crate::dispatch::{Handler, SpecialMoveAction, SpecialMovePlan};
use crate::square::Square;
use crate::state::MoveState;

fn is_adjacent(from: Square, to: Square) -> bool {
    if from == to {
        return false;
    }
    let df = (from.file() as i16 - to.file() as i16).abs();
    let dr = (from.rank() as i16 - to.rank() as i16).abs();
    df <= 1 && dr <= 1
}

fn already_used(state: &MoveState, ability: Ability) -> bool {
    state.runtime_ref(ability).map(|r| r.used).unwrap_or(false)
}

/// Adjacent nudge onto an empty square; cost 1; one-shot per move.
pub struct SideStepHandler;
impl Handler for SideStepHandler {
    fn plan_special_move(&self, state: &MoveState, board: &Board, to: Square) -> Option<SpecialMovePlan> {
        if already_used(state, Ability::SideStep) || !is_adjacent(state.piece.square, to) {
            return None;
        }
        if board.at(to).is_some() {
            return None;
        }
        Some(SpecialMovePlan {
            action: SpecialMoveAction::Move,
            to,
            cost: 1,
            note: "SideStep".to_string(),
        })
    }
}

/// Adjacent blink onto an empty square, or a swap with an adjacent ally;
/// cost 1; one-shot per move.
pub struct QuantumStepHandler;
impl Handler for QuantumStepHandler {
    fn plan_special_move(&self, state: &MoveState, board: &Board, to: Square) -> Option<SpecialMovePlan> {
        if already_used(state, Ability::QuantumStep) || !is_adjacent(state.piece.square, to) {
            return None;
        }
        match board.at(to) {
            None => Some(SpecialMovePlan {
                action: SpecialMoveAction::Move,
                to,
                cost: 1,
                note: "QuantumStep".to_string(),
            }),
            Some(occupant) if occupant.color == state.piece.color => Some(SpecialMovePlan {
                action: SpecialMoveAction::Swap,
                to,
                cost: 1,
                note: "QuantumStep swap".to_string(),
            }),
            Some(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Color, PieceType};
    use crate::piece::Piece;

    #[test]
    fn side_step_only_reaches_empty_adjacent_squares() {
        let mut board = Board::empty();
        let mover = Piece::new(1, Color::White, PieceType::King, Square::try_from_coord("d4").unwrap());
        board.place(mover);
        let state = MoveState::new(mover, 0, vec![Ability::SideStep]);

        let far = Square::try_from_coord("d6").unwrap();
        assert!(SideStepHandler.plan_special_move(&state, &board, far).is_none());

        let near = Square::try_from_coord("d5").unwrap();
        let plan = SideStepHandler.plan_special_move(&state, &board, near).unwrap();
        assert_eq!(plan.action, SpecialMoveAction::Move);
        assert_eq!(plan.cost, 1);
    }

    #[test]
    fn quantum_step_swaps_with_adjacent_ally() {
        let mut board = Board::empty();
        let mover = Piece::new(1, Color::White, PieceType::Bishop, Square::try_from_coord("c3").unwrap());
        let ally = Piece::new(2, Color::White, PieceType::Knight, Square::try_from_coord("c4").unwrap());
        board.place(mover);
        board.place(ally);
        let state = MoveState::new(mover, 0, vec![Ability::QuantumStep]);

        let plan = QuantumStepHandler
            .plan_special_move(&state, &board, Square::try_from_coord("c4").unwrap())
            .unwrap();
        assert_eq!(plan.action, SpecialMoveAction::Swap);
    }
}
