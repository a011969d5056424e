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

//! StepBudgetModifier handlers (spec.md §4.3 "Representative ability
//! deltas"). Each only fires when the piece's configured element matches
//! the ability's required element.

use crate::ability::Ability;
use crate::dispatch::{Handler, StepBudgetDelta};
use crate::material::Element;
use crate::piece::Piece;

pub struct TailwindHandler;
impl Handler for TailwindHandler {
    fn step_budget_modifier(&self, piece: &Piece) -> StepBudgetDelta {
        if piece.element != Element::Air {
            return StepBudgetDelta::default();
        }
        let mut add = 2;
        if piece.has(Ability::TemporalLock) {
            add -= 1;
        }
        StepBudgetDelta {
            add_steps: add,
            notes: vec!["Tailwind".to_string()],
        }
    }
}

pub struct RadiantVisionHandler;
impl Handler for RadiantVisionHandler {
    fn step_budget_modifier(&self, piece: &Piece) -> StepBudgetDelta {
        if piece.element != Element::Light {
            return StepBudgetDelta::default();
        }
        let mut add = 1;
        if piece.has(Ability::MistShroud) {
            add += 1;
        }
        StepBudgetDelta {
            add_steps: add,
            notes: vec!["Radiant Vision".to_string()],
        }
    }
}

pub struct UmbralStepHandler;
impl Handler for UmbralStepHandler {
    fn step_budget_modifier(&self, piece: &Piece) -> StepBudgetDelta {
        if piece.element != Element::Shadow {
            return StepBudgetDelta::default();
        }
        let mut add = 2;
        if piece.has(Ability::RadiantVision) {
            add -= 1;
        }
        StepBudgetDelta {
            add_steps: add,
            notes: vec!["Umbral Step".to_string()],
        }
    }
}

pub struct ScorchHandler;
impl Handler for ScorchHandler {
    fn step_budget_modifier(&self, piece: &Piece) -> StepBudgetDelta {
        if piece.element != Element::Fire {
            return StepBudgetDelta::default();
        }
        StepBudgetDelta {
            add_steps: 1,
            notes: vec!["Scorch".to_string()],
        }
    }
}

pub struct SchrodingersLaughHandler;
impl Handler for SchrodingersLaughHandler {
    fn step_budget_modifier(&self, piece: &Piece) -> StepBudgetDelta {
        let mut add = 2;
        if piece.has(Ability::SideStep) {
            add += 1;
        }
        StepBudgetDelta {
            add_steps: add,
            notes: vec!["Schrodinger's Laugh".to_string()],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::{Color, PieceType};
    use crate::square::Square;

    fn piece(element: Element, abilities: &[Ability]) -> Piece {
        let mut p = Piece::new(1, Color::White, PieceType::Knight, Square::new(0));
        p.element = element;
        for a in abilities {
            p.abilities.insert(*a);
        }
        p
    }

    #[test]
    fn tailwind_requires_air_element() {
        let p = piece(Element::Fire, &[Ability::Tailwind]);
        assert_eq!(TailwindHandler.step_budget_modifier(&p).add_steps, 0);
        let p = piece(Element::Air, &[Ability::Tailwind]);
        assert_eq!(TailwindHandler.step_budget_modifier(&p).add_steps, 2);
    }

    #[test]
    fn tailwind_dampened_by_temporal_lock() {
        let p = piece(Element::Air, &[Ability::Tailwind, Ability::TemporalLock]);
        assert_eq!(TailwindHandler.step_budget_modifier(&p).add_steps, 1);
    }

    #[test]
    fn umbral_step_reduced_by_radiant_vision() {
        let p = piece(Element::Shadow, &[Ability::UmbralStep, Ability::RadiantVision]);
        assert_eq!(UmbralStepHandler.step_budget_modifier(&p).add_steps, 1);
    }
}
