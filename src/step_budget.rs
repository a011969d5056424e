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

//! Step budget computation (spec.md §4.3): base budget from the
//! one-turn slow penalty, plus every installed handler's
//! `StepBudgetModifier` delta, floored at 1.

use crate::dispatch::{handler_for, Registry};
use crate::piece::Piece;
use crate::state::HandlerTable;

/// `max(1, 1 - slow)`. The penalty is consumed: `*slow` is reset to 0
/// whether or not it had anything to give.
pub fn base_budget(slow: &mut i32) -> i32 {
    let consumed = *slow;
    *slow = 0;
    (1 - consumed).max(1)
}

/// Sums every installed handler's `StepBudgetModifier` on top of the base
/// budget and floors the result at 1 (spec.md §4.3).
pub fn compute(piece: &Piece, handlers: &HandlerTable, custom: &Registry, slow: &mut i32) -> (i32, Vec<String>) {
    let mut total = base_budget(slow);
    let mut notes = Vec::new();
    for ability in handlers {
        if let Some(handler) = handler_for(custom, *ability) {
            let delta = handler.step_budget_modifier(piece);
            total += delta.add_steps;
            notes.extend(delta.notes);
        }
    }
    (total.max(1), notes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ability::Ability;
    use crate::material::{Color, Element, PieceType};
    use crate::square::Square;

    #[test]
    fn base_budget_consumes_slow_but_floors_at_one() {
        let mut slow = 3;
        assert_eq!(base_budget(&mut slow), 1);
        assert_eq!(slow, 0);

        let mut slow = 0;
        assert_eq!(base_budget(&mut slow), 1);
    }

    #[test]
    fn compute_sums_modifiers_and_floors_at_one() {
        let mut piece = Piece::new(1, Color::White, PieceType::Knight, Square::new(0));
        piece.element = Element::Air;
        piece.abilities.insert(Ability::Tailwind);
        let handlers: HandlerTable = vec![Ability::Tailwind];
        let registry = Registry::new();
        let mut slow = 0;
        let (budget, notes) = compute(&piece, &handlers, &registry, &mut slow);
        assert_eq!(budget, 3);
        assert_eq!(notes, vec!["Tailwind".to_string()]);
    }

    #[test]
    fn unrecognized_handlers_are_skipped_as_no_ops() {
        let piece = Piece::new(1, Color::White, PieceType::Pawn, Square::new(0));
        let handlers: HandlerTable = vec![Ability::DoOver];
        let registry = Registry::new();
        let mut slow = 0;
        let (budget, _) = compute(&piece, &handlers, &registry, &mut slow);
        assert_eq!(budget, 1);
    }
}
