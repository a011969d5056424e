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

use std::ops::Not;

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[inline]
    pub const fn to_index(self) -> usize {
        self as usize
    }

    #[inline]
    pub const fn opposite(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }

    pub fn canonical_name(self) -> &'static str {
        match self {
            Color::White => "white",
            Color::Black => "black",
        }
    }
}

impl Not for Color {
    type Output = Color;
    #[inline]
    fn not(self) -> Self::Output {
        self.opposite()
    }
}

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum PieceType {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceType {
    #[inline]
    pub const fn to_index(self) -> usize {
        self as usize
    }

    /// The rank order used for ability rank-gating (unrelated to board
    /// rank): K=5, Q=4, R=3, B=2, N=2, P=1.
    #[inline]
    pub const fn rank(self) -> u8 {
        match self {
            PieceType::King => 5,
            PieceType::Queen => 4,
            PieceType::Rook => 3,
            PieceType::Bishop => 2,
            PieceType::Knight => 2,
            PieceType::Pawn => 1,
        }
    }

    pub const fn letter(self) -> char {
        match self {
            PieceType::King => 'K',
            PieceType::Queen => 'Q',
            PieceType::Rook => 'R',
            PieceType::Bishop => 'B',
            PieceType::Knight => 'N',
            PieceType::Pawn => 'P',
        }
    }

    pub fn from_letter(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'K' => Some(PieceType::King),
            'Q' => Some(PieceType::Queen),
            'R' => Some(PieceType::Rook),
            'B' => Some(PieceType::Bishop),
            'N' => Some(PieceType::Knight),
            'P' => Some(PieceType::Pawn),
            _ => None,
        }
    }
}

/// A pawn's promotion target. A strict subset of [`PieceType`] (no Pawn, no
/// King); kept distinct the way the engine's Queen/Rook/Bishop/Knight
/// canonical default order (spec.md's promotion Open Question) expects.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Promotion {
    Queen,
    Rook,
    Bishop,
    Knight,
}

impl Promotion {
    /// Default promotion order when the caller supplies no choice:
    /// highest-ranked available, Q > R > B > N.
    pub const CANONICAL_ORDER: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];
}

impl From<Promotion> for PieceType {
    fn from(p: Promotion) -> Self {
        match p {
            Promotion::Queen => PieceType::Queen,
            Promotion::Rook => PieceType::Rook,
            Promotion::Bishop => PieceType::Bishop,
            Promotion::Knight => PieceType::Knight,
        }
    }
}

impl TryFrom<PieceType> for Promotion {
    type Error = ();
    fn try_from(p: PieceType) -> Result<Self, Self::Error> {
        match p {
            PieceType::Queen => Ok(Promotion::Queen),
            PieceType::Rook => Ok(Promotion::Rook),
            PieceType::Bishop => Ok(Promotion::Bishop),
            PieceType::Knight => Ok(Promotion::Knight),
            _ => Err(()),
        }
    }
}

/// The per-side element inherited by all of that side's pieces.
#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Default)]
pub enum Element {
    Light,
    Shadow,
    Fire,
    Water,
    Earth,
    Air,
    Lightning,
    #[default]
    None,
}

impl Element {
    pub fn from_name(name: &str) -> Option<Self> {
        let lower = name.trim().to_ascii_lowercase();
        Some(match lower.as_str() {
            "light" => Element::Light,
            "shadow" => Element::Shadow,
            "fire" => Element::Fire,
            "water" => Element::Water,
            "earth" => Element::Earth,
            "air" => Element::Air,
            "lightning" => Element::Lightning,
            "none" => Element::None,
            _ => return None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rank_order_matches_spec() {
        assert_eq!(PieceType::King.rank(), 5);
        assert_eq!(PieceType::Queen.rank(), 4);
        assert_eq!(PieceType::Rook.rank(), 3);
        assert_eq!(PieceType::Bishop.rank(), 2);
        assert_eq!(PieceType::Knight.rank(), 2);
        assert_eq!(PieceType::Pawn.rank(), 1);
    }

    #[test]
    fn color_opposite_round_trips() {
        assert_eq!(Color::White.opposite().opposite(), Color::White);
        assert_eq!(!Color::White, Color::Black);
    }

    #[test]
    fn element_name_case_insensitive() {
        assert_eq!(Element::from_name("FIRE"), Some(Element::Fire));
        assert_eq!(Element::from_name("fire"), Some(Element::Fire));
        assert_eq!(Element::from_name("bogus"), None);
    }
}
