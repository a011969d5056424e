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

//! PrepareSegment / OnDirectionChange / FreeContinuationAvailable
//! handlers: MistShroud, BlazeRush, FloodWake (spec.md §4.3, §4.4).

use crate::ability::Ability;
use crate::dispatch::Handler;
use crate::state::MoveState;

/// Consumes a slider's direction-pivot surcharge instead of letting it
/// stand.
pub struct MistShroudHandler;
impl Handler for MistShroudHandler {
    fn on_direction_change(&self, state: &mut MoveState) -> bool {
        state.runtime(Ability::MistShroud).used = true;
        true
    }
}

/// A one-shot free dash once the segment budget hits zero.
pub struct BlazeRushHandler;
impl Handler for BlazeRushHandler {
    fn prepare_segment(&self, _state: &mut MoveState, cost: &mut i32) {
        *cost = (*cost - 1).max(0);
    }

    fn free_continuation_available(&self, state: &mut MoveState) -> bool {
        let runtime = state.runtime(Ability::BlazeRush);
        if runtime.used {
            return false;
        }
        runtime.used = true;
        true
    }
}

/// A one-shot free push once the segment budget hits zero.
pub struct FloodWakeHandler;
impl Handler for FloodWakeHandler {
    fn prepare_segment(&self, _state: &mut MoveState, cost: &mut i32) {
        *cost = (*cost - 1).max(0);
    }

    fn free_continuation_available(&self, state: &mut MoveState) -> bool {
        let runtime = state.runtime(Ability::FloodWake);
        if runtime.used {
            return false;
        }
        runtime.used = true;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Color, PieceType};
    use crate::piece::Piece;
    use crate::square::Square;

    fn state() -> MoveState {
        let piece = Piece::new(1, Color::White, PieceType::Rook, Square::new(0));
        MoveState::new(piece, 0, vec![Ability::BlazeRush])
    }

    #[test]
    fn blaze_rush_grants_one_free_continuation() {
        let mut s = state();
        assert!(BlazeRushHandler.free_continuation_available(&mut s));
        assert!(!BlazeRushHandler.free_continuation_available(&mut s));
    }
}
