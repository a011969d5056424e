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

//! The static fallback consulted by `legality::can_phase_through` once no
//! handler's `CanPhase` hook has answered (spec.md §4.6 step 4).
//!
//! `GaleLift` and `Bastion` carry no per-call hook of their own; their
//! only effect on phasing is this flag check, so there is nothing to
//! register beyond the no-op stubs in `abilities::mod`.

use crate::ability::{Ability, AbilitySet};

/// `FloodWake` or `Bastion` (piece or side) deny phasing outright;
/// `GaleLift` or `UmbralStep` grant it; otherwise phasing is denied.
pub fn static_phase_allows(piece_abilities: AbilitySet, side_abilities: AbilitySet) -> bool {
    let carries = |a: Ability| piece_abilities.contains(a) || side_abilities.contains(a);
    if carries(Ability::FloodWake) || carries(Ability::Bastion) {
        return false;
    }
    carries(Ability::GaleLift) || carries(Ability::UmbralStep)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flood_wake_denies_even_with_gale_lift() {
        let mut piece = AbilitySet::EMPTY;
        piece.insert(Ability::GaleLift);
        piece.insert(Ability::FloodWake);
        assert!(!static_phase_allows(piece, AbilitySet::EMPTY));
    }

    #[test]
    fn gale_lift_or_umbral_step_grants_phasing() {
        let mut piece = AbilitySet::EMPTY;
        piece.insert(Ability::GaleLift);
        assert!(static_phase_allows(piece, AbilitySet::EMPTY));

        let mut side = AbilitySet::EMPTY;
        side.insert(Ability::UmbralStep);
        assert!(static_phase_allows(AbilitySet::EMPTY, side));
    }

    #[test]
    fn no_relevant_ability_denies() {
        assert!(!static_phase_allows(AbilitySet::EMPTY, AbilitySet::EMPTY));
    }
}
