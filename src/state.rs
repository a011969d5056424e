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

//! The per-turn runtime: [`MoveState`] and the small flag/counter record
//! each active ability keeps, [`AbilityRuntime`].

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ability::Ability;
use crate::material::Promotion;
use crate::piece::Piece;
use crate::square::Square;

/// Per-ability bookkeeping for the life of one move. All idempotence /
/// once-per-turn semantics live in these flags and counters rather than in
/// the (stateless) handler implementations themselves, so that `MoveState`
/// stays trivially cloneable for history snapshots.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct AbilityRuntime {
    pub used: bool,
    pub window: bool,
    pub capture_extra: bool,
    pub free: i32,
    pub captures: i32,
    pub capture_limit: i32,
    pub capture_square: Option<Square>,
    pub capture_segment: i32,
    pub capture_en_passant: bool,
    pub resurrection_hold: i32,
}

/// The ordered ability ids active for the moving piece this turn (its own
/// abilities, ascending, followed by side-carried abilities it doesn't
/// already have, ascending). Handler instances are resolved from the
/// registry on demand from this list, which keeps `MoveState` cheaply
/// cloneable (no trait objects to clone).
pub type HandlerTable = Vec<Ability>;

#[derive(Debug, Clone)]
pub struct MoveState {
    pub piece: Piece,
    pub remaining_steps: i32,
    pub path: Vec<Square>,
    pub captures: Vec<Piece>,
    pub ability_data: HashMap<Ability, AbilityRuntime>,
    pub turn_ended: bool,
    pub last_segment_captured: bool,
    pub promotion: Option<Promotion>,
    pub promotion_set: bool,
    pub handlers: HandlerTable,
    /// Set when the just-completed segment created a fresh en-passant
    /// target, so `endTurn` knows not to clear it this ply.
    pub created_en_passant: bool,
}

impl MoveState {
    pub fn new(piece: Piece, remaining_steps: i32, handlers: HandlerTable) -> Self {
        let origin = piece.square;
        Self {
            piece,
            remaining_steps,
            path: vec![origin],
            captures: Vec::new(),
            ability_data: HashMap::new(),
            turn_ended: false,
            last_segment_captured: false,
            promotion: None,
            promotion_set: false,
            handlers,
            created_en_passant: false,
        }
    }

    pub fn runtime(&mut self, ability: Ability) -> &mut AbilityRuntime {
        self.ability_data.entry(ability).or_default()
    }

    pub fn runtime_ref(&self, ability: Ability) -> Option<&AbilityRuntime> {
        self.ability_data.get(&ability)
    }

    pub fn has_handler(&self, ability: Ability) -> bool {
        self.handlers.contains(&ability)
    }
}

/// A request to start or continue a move (spec.md §6).
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct MoveRequest {
    pub from: Square,
    pub to: Square,
    pub dir: crate::square::Direction,
    pub promotion: Option<Promotion>,
    pub has_promotion: bool,
}
