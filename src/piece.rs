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

use serde::{Deserialize, Serialize};

use crate::ability::{Ability, AbilitySet};
use crate::material::{Color, Element, PieceType};
use crate::square::{Direction, Square};

pub type PieceId = u32;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub id: PieceId,
    pub color: Color,
    pub kind: PieceType,
    pub square: Square,
    pub abilities: AbilitySet,
    pub element: Element,
    pub block_facing: Direction,
    /// Set by `Resurrection`'s `OnCapture` hook and consumed by the next
    /// move this piece makes (spec.md §4.1 "Resurrection window", §4.7).
    pub resurrection_window: bool,
    /// `DoOver`'s one-shot armed flag (the engine's `pendingDoOver[pieceId]`,
    /// spec.md §3). Starts armed; the capture cascade disarms it the first
    /// time it interrupts a capture.
    pub pending_do_over: bool,
}

impl Piece {
    pub fn new(id: PieceId, color: Color, kind: PieceType, square: Square) -> Self {
        Self {
            id,
            color,
            kind,
            square,
            abilities: AbilitySet::EMPTY,
            element: Element::None,
            block_facing: Direction::None,
            resurrection_window: false,
            pending_do_over: true,
        }
    }

    #[inline]
    pub fn has(&self, ability: Ability) -> bool {
        self.abilities.contains(ability)
    }

    /// Invariant check: a piece without `BlockPath` must not carry a
    /// facing (spec.md §3, Piece invariants).
    pub fn invariant_ok(&self) -> bool {
        self.has(Ability::BlockPath) || self.block_facing == Direction::None
    }
}
