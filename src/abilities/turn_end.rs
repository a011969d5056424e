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

//! `ResolveTurnEnd` handler: Temporal Lock (spec.md §4.5 `endTurn` step 2,
//! scenario S2).

use crate::dispatch::{Handler, TurnEndOutcome};
use crate::state::MoveState;

/// Saddles the opponent with a one-turn step penalty, consumed the next
/// time their `baseBudget` is read.
pub struct TemporalLockHandler;
impl Handler for TemporalLockHandler {
    fn resolve_turn_end(&self, state: &MoveState, outcome: &mut TurnEndOutcome) {
        let opponent = state.piece.color.opposite();
        let entry = outcome.slow.entry(opponent).or_insert(0);
        *entry = (*entry).max(1);
        outcome.notes.push("Temporal Lock".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Color, PieceType};
    use crate::piece::Piece;
    use crate::square::Square;

    #[test]
    fn temporal_lock_slows_the_opponent() {
        let piece = Piece::new(1, Color::White, PieceType::Knight, Square::new(0));
        let state = MoveState::new(piece, 0, Vec::new());
        let mut outcome = TurnEndOutcome::default();
        TemporalLockHandler.resolve_turn_end(&state, &mut outcome);
        assert_eq!(outcome.slow.get(&Color::Black), Some(&1));
        assert!(outcome.slow.get(&Color::White).is_none());
    }
}
