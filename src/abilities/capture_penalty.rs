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

//! `ResolveCapture` penalty handlers, the Chain Kill capture-limit raise
//! (spec.md §4.7 point 5 and the closing paragraph), and Resurrection's
//! `OnCapture` window.

use crate::ability::Ability;
use crate::dispatch::{CaptureContext, CaptureOutcome, Handler};
use crate::material::Element;
use crate::state::MoveState;

/// Raises the per-move capture limit by 2 over the base of 1. The base
/// itself is applied by `capture::resolve_capture_cascade`, which reads
/// this delta back out of the runtime record after `OnMoveStart` fires.
pub struct ChainKillHandler;
impl Handler for ChainKillHandler {
    fn on_move_start(&self, state: &mut MoveState) {
        state.runtime(Ability::ChainKill).capture_limit = 2;
    }
}

/// A non-Shadow attacker pays for every capture: 1 step drained, turn
/// forced to end.
pub struct PoisonousMeatHandler;
impl Handler for PoisonousMeatHandler {
    fn resolve_capture(&self, state: &mut MoveState, _capture: &CaptureContext) -> CaptureOutcome {
        if state.piece.element == Element::Shadow {
            return CaptureOutcome::default();
        }
        CaptureOutcome {
            step_adjustment: -1,
            force_turn_end: true,
        }
    }
}

/// A Lightning-element attacker's capture forces turn end; if the same
/// piece also carries Stalwart, the capture additionally costs 1 step.
pub struct OverloadHandler;
impl Handler for OverloadHandler {
    fn resolve_capture(&self, state: &mut MoveState, _capture: &CaptureContext) -> CaptureOutcome {
        if state.piece.element != Element::Lightning {
            return CaptureOutcome::default();
        }
        CaptureOutcome {
            step_adjustment: if state.piece.has(Ability::Stalwart) { -1 } else { 0 },
            force_turn_end: true,
        }
    }
}

/// An Earth-element attacker's capture forces turn end.
pub struct BastionHandler;
impl Handler for BastionHandler {
    fn resolve_capture(&self, state: &mut MoveState, _capture: &CaptureContext) -> CaptureOutcome {
        if state.piece.element != Element::Earth {
            return CaptureOutcome::default();
        }
        CaptureOutcome {
            step_adjustment: 0,
            force_turn_end: true,
        }
    }
}

/// Raises a resurrection window on a successful capture; the lifecycle
/// persists it onto the board piece and `movegen` folds it into the
/// piece's next destination set (spec.md §4.1, §4.7).
pub struct ResurrectionHandler;
impl Handler for ResurrectionHandler {
    fn on_capture(&self, state: &mut MoveState, _victim: &crate::piece::Piece) {
        state.runtime(Ability::Resurrection).window = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Color, PieceType};
    use crate::piece::Piece;
    use crate::square::Square;

    fn capture() -> CaptureContext {
        CaptureContext {
            attacker_color: Color::White,
            victim_square: Square::new(0),
        }
    }

    fn state(element: Element, abilities: &[Ability]) -> MoveState {
        let mut piece = Piece::new(1, Color::White, PieceType::Rook, Square::new(0));
        piece.element = element;
        for a in abilities {
            piece.abilities.insert(*a);
        }
        MoveState::new(piece, 0, Vec::new())
    }

    #[test]
    fn poisonous_meat_spares_shadow_attackers() {
        let mut s = state(Element::Shadow, &[]);
        let outcome = PoisonousMeatHandler.resolve_capture(&mut s, &capture());
        assert_eq!(outcome.step_adjustment, 0);
        assert!(!outcome.force_turn_end);
    }

    #[test]
    fn poisonous_meat_drains_non_shadow_attackers() {
        let mut s = state(Element::Fire, &[]);
        let outcome = PoisonousMeatHandler.resolve_capture(&mut s, &capture());
        assert_eq!(outcome.step_adjustment, -1);
        assert!(outcome.force_turn_end);
    }

    #[test]
    fn overload_costs_extra_step_when_stalwart() {
        let mut s = state(Element::Lightning, &[Ability::Stalwart]);
        let outcome = OverloadHandler.resolve_capture(&mut s, &capture());
        assert_eq!(outcome.step_adjustment, -1);
        assert!(outcome.force_turn_end);
    }

    #[test]
    fn chain_kill_raises_capture_limit() {
        let mut s = state(Element::None, &[Ability::ChainKill]);
        ChainKillHandler.on_move_start(&mut s);
        assert_eq!(s.runtime(Ability::ChainKill).capture_limit, 2);
    }

    #[test]
    fn resurrection_raises_a_window_flag() {
        let mut s = state(Element::None, &[Ability::Resurrection]);
        let victim = Piece::new(2, Color::Black, PieceType::Pawn, Square::new(8));
        ResurrectionHandler.on_capture(&mut s, &victim);
        assert!(s.runtime(Ability::Resurrection).window);
    }
}
