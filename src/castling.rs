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

use crate::material::Color;

const WK: u8 = 0b0001;
const WQ: u8 = 0b0010;
const BK: u8 = 0b0100;
const BQ: u8 = 0b1000;

/// A 4-bit mask tracking which of White/Black's kingside/queenside
/// castling rights are still held.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const ALL: CastlingRights = CastlingRights(WK | WQ | BK | BQ);
    pub const NONE: CastlingRights = CastlingRights(0);

    #[inline]
    pub fn kingside(&self, color: Color) -> bool {
        self.0 & Self::king_bit(color) != 0
    }

    #[inline]
    pub fn queenside(&self, color: Color) -> bool {
        self.0 & Self::queen_bit(color) != 0
    }

    /// Clears both rights for `color`; called when that color's king moves
    /// or is otherwise removed from castling contention.
    pub fn clear_color(&mut self, color: Color) {
        self.0 &= !(Self::king_bit(color) | Self::queen_bit(color));
    }

    pub fn clear_kingside(&mut self, color: Color) {
        self.0 &= !Self::king_bit(color);
    }

    pub fn clear_queenside(&mut self, color: Color) {
        self.0 &= !Self::queen_bit(color);
    }

    #[inline]
    fn king_bit(color: Color) -> u8 {
        match color {
            Color::White => WK,
            Color::Black => BK,
        }
    }

    #[inline]
    fn queen_bit(color: Color) -> u8 {
        match color {
            Color::White => WQ,
            Color::Black => BQ,
        }
    }

    pub fn raw(&self) -> u8 {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clearing_one_side_leaves_the_other() {
        let mut rights = CastlingRights::ALL;
        rights.clear_kingside(Color::White);
        assert!(!rights.kingside(Color::White));
        assert!(rights.queenside(Color::White));
        assert!(rights.kingside(Color::Black));
    }

    #[test]
    fn clearing_color_clears_both() {
        let mut rights = CastlingRights::ALL;
        rights.clear_color(Color::Black);
        assert!(!rights.kingside(Color::Black));
        assert!(!rights.queenside(Color::Black));
    }
}
