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

//! The closed ability enumeration and its constant-time bitmask set.

use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(Debug, Serialize, Deserialize, Display, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum Ability {
    DoOver,
    BlockPath,
    DoubleKill,
    Obstinant,
    Scorch,
    BlazeRush,
    FloodWake,
    MistShroud,
    Bastion,
    GaleLift,
    Tailwind,
    ScatterShot,
    Overload,
    RadiantVision,
    UmbralStep,
    SideStep,
    QuantumStep,
    Stalwart,
    Belligerent,
    Indomitable,
    QuantumKill,
    ChainKill,
    PoisonousMeat,
    Resurrection,
    TemporalLock,
    SchrodingersLaugh,
    None,
}

impl Ability {
    pub const ALL: [Ability; 26] = [
        Ability::DoOver,
        Ability::BlockPath,
        Ability::DoubleKill,
        Ability::Obstinant,
        Ability::Scorch,
        Ability::BlazeRush,
        Ability::FloodWake,
        Ability::MistShroud,
        Ability::Bastion,
        Ability::GaleLift,
        Ability::Tailwind,
        Ability::ScatterShot,
        Ability::Overload,
        Ability::RadiantVision,
        Ability::UmbralStep,
        Ability::SideStep,
        Ability::QuantumStep,
        Ability::Stalwart,
        Ability::Belligerent,
        Ability::Indomitable,
        Ability::QuantumKill,
        Ability::ChainKill,
        Ability::PoisonousMeat,
        Ability::Resurrection,
        Ability::TemporalLock,
        Ability::SchrodingersLaugh,
    ];

    #[inline]
    pub const fn bit(self) -> u32 {
        match self {
            Ability::None => 0,
            other => 1u32 << (other as u32),
        }
    }

    /// Accepts both CamelCase and space-separated names, case-insensitively.
    pub fn from_name(name: &str) -> Option<Self> {
        let collapsed: String = name
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        for ability in Ability::ALL {
            let canonical: String = ability
                .to_string()
                .chars()
                .filter(|c| !c.is_whitespace())
                .collect::<String>()
                .to_ascii_lowercase();
            if canonical == collapsed {
                return Some(ability);
            }
        }
        None
    }
}

/// A constant-time membership/union/enumeration set over [`Ability`].
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct AbilitySet(u32);

impl AbilitySet {
    pub const EMPTY: AbilitySet = AbilitySet(0);

    pub fn new(abilities: impl IntoIterator<Item = Ability>) -> Self {
        let mut set = AbilitySet::EMPTY;
        for a in abilities {
            set.insert(a);
        }
        set
    }

    #[inline]
    pub fn contains(&self, ability: Ability) -> bool {
        self.0 & ability.bit() != 0
    }

    #[inline]
    pub fn insert(&mut self, ability: Ability) {
        self.0 |= ability.bit();
    }

    #[inline]
    pub fn union(&self, other: &AbilitySet) -> AbilitySet {
        AbilitySet(self.0 | other.0)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = Ability> + '_ {
        Ability::ALL.into_iter().filter(move |a| self.contains(*a))
    }
}

impl FromIterator<Ability> for AbilitySet {
    fn from_iter<T: IntoIterator<Item = Ability>>(iter: T) -> Self {
        AbilitySet::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_membership_round_trips() {
        let mut set = AbilitySet::EMPTY;
        set.insert(Ability::DoOver);
        set.insert(Ability::ChainKill);
        assert!(set.contains(Ability::DoOver));
        assert!(set.contains(Ability::ChainKill));
        assert!(!set.contains(Ability::Scorch));
        let collected: Vec<_> = set.iter().collect();
        assert_eq!(collected.len(), 2);
    }

    #[test]
    fn name_parsing_accepts_both_forms() {
        assert_eq!(Ability::from_name("DoOver"), Some(Ability::DoOver));
        assert_eq!(Ability::from_name("Do Over"), Some(Ability::DoOver));
        assert_eq!(Ability::from_name("do over"), Some(Ability::DoOver));
        assert_eq!(
            Ability::from_name("schrodingers laugh"),
            Some(Ability::SchrodingersLaugh)
        );
        assert_eq!(Ability::from_name("not-an-ability"), None);
    }

    #[test]
    fn every_ability_bit_is_unique() {
        let mut seen = 0u32;
        for a in Ability::ALL {
            assert_eq!(seen & a.bit(), 0, "duplicate bit for {a:?}");
            seen |= a.bit();
        }
    }
}
