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

//! Squares, files/ranks, compass directions and occupancy masks.
//!
//! A [`Square`] is a plain index 0..63 with `rank = index / 8`, `file =
//! index % 8` (rank 0 = White's back rank, the "1" in algebraic notation).

use std::fmt;
use std::ops::{BitAnd, BitAndAssign, BitOr, BitOrAssign, Not};

use serde::{Deserialize, Serialize};
use strum_macros::EnumIter;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    #[inline]
    pub const fn new(index: u8) -> Self {
        debug_assert!(index < 64);
        Self(index)
    }

    #[inline]
    pub const fn from_file_rank(file: u8, rank: u8) -> Self {
        Self::new(rank * 8 + file)
    }

    #[inline]
    pub const fn index(&self) -> u8 {
        self.0
    }

    #[inline]
    pub const fn file(&self) -> u8 {
        self.0 % 8
    }

    #[inline]
    pub const fn rank(&self) -> u8 {
        self.0 / 8
    }

    #[inline]
    pub const fn to_mask(&self) -> Mask {
        Mask::new(1u64 << self.0)
    }

    /// Offsets this square by `(files, ranks)`, returning `None` if the
    /// result would leave the board.
    #[inline]
    pub fn offset(&self, files: i8, ranks: i8) -> Option<Self> {
        let file = self.file() as i16 + files as i16;
        let rank = self.rank() as i16 + ranks as i16;
        if (0..8).contains(&file) && (0..8).contains(&rank) {
            Some(Self::from_file_rank(file as u8, rank as u8))
        } else {
            None
        }
    }

    /// Parses algebraic coordinates such as `"e4"`. Case-insensitive on
    /// the file letter.
    pub fn try_from_coord(coord: &str) -> Option<Self> {
        let mut chars = coord.chars();
        let file_char = chars.next()?;
        let rank_char = chars.next()?;
        if chars.next().is_some() {
            return None;
        }
        let file = match file_char.to_ascii_lowercase() {
            c @ 'a'..='h' => c as u8 - b'a',
            _ => return None,
        };
        let rank = rank_char.to_digit(10)?;
        if !(1..=8).contains(&rank) {
            return None;
        }
        Some(Self::from_file_rank(file, rank as u8 - 1))
    }

    pub fn to_coord(&self) -> String {
        let file = (b'a' + self.file()) as char;
        let rank = self.rank() + 1;
        format!("{file}{rank}")
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coord())
    }
}

impl From<Square> for usize {
    #[inline]
    fn from(value: Square) -> Self {
        value.0 as usize
    }
}

/// The 8 compass headings a slider can travel, plus a `None` sentinel used
/// when a piece has not yet moved (e.g. BlockPath facing).
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, EnumIter, Default)]
pub enum Direction {
    N,
    NE,
    E,
    SE,
    S,
    SW,
    W,
    NW,
    #[default]
    None,
}

impl Direction {
    pub const SLIDER: [Direction; 8] = [
        Direction::N,
        Direction::NE,
        Direction::E,
        Direction::SE,
        Direction::S,
        Direction::SW,
        Direction::W,
        Direction::NW,
    ];

    #[inline]
    pub const fn delta(&self) -> (i8, i8) {
        match self {
            Direction::N => (0, 1),
            Direction::NE => (1, 1),
            Direction::E => (1, 0),
            Direction::SE => (1, -1),
            Direction::S => (0, -1),
            Direction::SW => (-1, -1),
            Direction::W => (-1, 0),
            Direction::NW => (-1, 1),
            Direction::None => (0, 0),
        }
    }

    #[inline]
    pub const fn opposite(&self) -> Direction {
        match self {
            Direction::N => Direction::S,
            Direction::NE => Direction::SW,
            Direction::E => Direction::W,
            Direction::SE => Direction::NW,
            Direction::S => Direction::N,
            Direction::SW => Direction::NE,
            Direction::W => Direction::E,
            Direction::NW => Direction::SE,
            Direction::None => Direction::None,
        }
    }

    /// The compass heading from `from` towards `to`, if they lie on one of
    /// the 8 rank/file/diagonal lines.
    pub fn between(from: Square, to: Square) -> Direction {
        let df = to.file() as i16 - from.file() as i16;
        let dr = to.rank() as i16 - from.rank() as i16;
        match (df.signum(), dr.signum()) {
            (0, 0) => Direction::None,
            (0, 1) => Direction::N,
            (1, 1) if df.abs() == dr.abs() => Direction::NE,
            (1, 0) => Direction::E,
            (1, -1) if df.abs() == dr.abs() => Direction::SE,
            (0, -1) => Direction::S,
            (-1, -1) if df.abs() == dr.abs() => Direction::SW,
            (-1, 0) => Direction::W,
            (-1, 1) if df.abs() == dr.abs() => Direction::NW,
            _ => Direction::None,
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Direction::N => "N",
            Direction::NE => "NE",
            Direction::E => "E",
            Direction::SE => "SE",
            Direction::S => "S",
            Direction::SW => "SW",
            Direction::W => "W",
            Direction::NW => "NW",
            Direction::None => "?",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

/// A 64-bit occupancy/destination set, one bit per [`Square`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Mask(u64);

impl Mask {
    pub const EMPTY: Mask = Mask(0);

    #[inline]
    pub const fn new(bits: u64) -> Self {
        Self(bits)
    }

    #[inline]
    pub const fn bits(&self) -> u64 {
        self.0
    }

    #[inline]
    pub const fn contains(&self, sq: Square) -> bool {
        self.0 & (1u64 << sq.index()) != 0
    }

    #[inline]
    pub fn set(&mut self, sq: Square) {
        self.0 |= 1u64 << sq.index();
    }

    #[inline]
    pub fn clear(&mut self, sq: Square) {
        self.0 &= !(1u64 << sq.index());
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Square> + '_ {
        let mut bits = self.0;
        std::iter::from_fn(move || {
            if bits == 0 {
                None
            } else {
                let idx = bits.trailing_zeros() as u8;
                bits &= bits - 1;
                Some(Square::new(idx))
            }
        })
    }
}

impl BitOr for Mask {
    type Output = Mask;
    #[inline]
    fn bitor(self, rhs: Self) -> Self::Output {
        Mask(self.0 | rhs.0)
    }
}
impl BitOrAssign for Mask {
    #[inline]
    fn bitor_assign(&mut self, rhs: Self) {
        self.0 |= rhs.0;
    }
}
impl BitAnd for Mask {
    type Output = Mask;
    #[inline]
    fn bitand(self, rhs: Self) -> Self::Output {
        Mask(self.0 & rhs.0)
    }
}
impl BitAndAssign for Mask {
    #[inline]
    fn bitand_assign(&mut self, rhs: Self) {
        self.0 &= rhs.0;
    }
}
impl Not for Mask {
    type Output = Mask;
    #[inline]
    fn not(self) -> Self::Output {
        Mask(!self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coord_round_trip() {
        for idx in 0..64u8 {
            let sq = Square::new(idx);
            let coord = sq.to_coord();
            let back = Square::try_from_coord(&coord).unwrap();
            assert_eq!(sq, back);
        }
    }

    #[test]
    fn direction_between_diagonal() {
        let a1 = Square::try_from_coord("a1").unwrap();
        let h8 = Square::try_from_coord("h8").unwrap();
        assert_eq!(Direction::between(a1, h8), Direction::NE);
        assert_eq!(Direction::between(h8, a1), Direction::SW);
    }

    #[test]
    fn mask_iter_matches_set_bits() {
        let mut m = Mask::EMPTY;
        m.set(Square::new(0));
        m.set(Square::new(63));
        let squares: Vec<_> = m.iter().collect();
        assert_eq!(squares, vec![Square::new(0), Square::new(63)]);
    }
}
