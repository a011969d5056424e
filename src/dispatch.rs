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

//! The ability dispatcher: a process-wide handler registry, the per-move
//! handler table, and the lifecycle-hook contract (spec.md §4.4).
//!
//! Handlers are stateless (any bookkeeping a hook needs lives in
//! [`crate::state::AbilityRuntime`], keyed by ability on the `MoveState`
//! itself) so the registry hands out fresh boxed trait objects cheaply and
//! `MoveState`'s handler table can stay a plain `Vec<Ability>` — cloneable
//! for history snapshots without any `dyn Clone` machinery.

use std::collections::HashMap;
use std::sync::Mutex;

use once_cell::sync::Lazy;

use crate::ability::{Ability, AbilitySet};
use crate::board::Board;
use crate::error::{EngineError, PhaseDenied};
use crate::material::Color;
use crate::piece::Piece;
use crate::square::Square;
use crate::state::MoveState;

#[derive(Debug, Clone, Default)]
pub struct StepBudgetDelta {
    pub add_steps: i32,
    pub notes: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct CaptureOutcome {
    pub step_adjustment: i32,
    pub force_turn_end: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialMoveAction {
    Move,
    Swap,
}

#[derive(Debug, Clone)]
pub struct SpecialMovePlan {
    pub action: SpecialMoveAction,
    pub to: Square,
    pub cost: i32,
    pub note: String,
}

#[derive(Debug, Clone, Default)]
pub struct TurnEndOutcome {
    pub slow: HashMap<Color, i32>,
    pub notes: Vec<String>,
}

/// Everything a capture-cascade hook needs to know about the capture in
/// progress.
#[derive(Debug, Clone, Copy)]
pub struct CaptureContext {
    pub attacker_color: Color,
    pub victim_square: Square,
}

/// Every hook is optional; a handler implements only the subset it needs.
/// All methods take `&self` — implementations are zero-sized — and
/// `&mut MoveState`/`&mut Board` where they need to observe or mutate
/// per-move or board state.
pub trait Handler {
    fn step_budget_modifier(&self, _piece: &Piece) -> StepBudgetDelta {
        StepBudgetDelta::default()
    }

    fn can_phase(&self, _piece: &Piece) -> Option<Result<bool, PhaseDenied>> {
        None
    }

    fn on_move_start(&self, _state: &mut MoveState) {}

    /// May adjust the segment's step cost and the remaining budget before
    /// the segment executes.
    fn prepare_segment(&self, _state: &mut MoveState, _cost: &mut i32) {}

    fn on_segment_start(&self, _state: &MoveState, _board: &Board) {}

    fn on_post_segment(&self, _state: &mut MoveState) {}

    fn on_segment_resolved(&self, _state: &MoveState) {}

    /// Called when a slider pivots direction mid-move. Returning `true`
    /// means this handler consumed the usual +1 pivot cost.
    fn on_direction_change(&self, _state: &mut MoveState) -> bool {
        false
    }

    fn on_capture(&self, _state: &mut MoveState, _victim: &Piece) {}

    fn resolve_capture(&self, _state: &mut MoveState, _capture: &CaptureContext) -> CaptureOutcome {
        CaptureOutcome::default()
    }

    fn plan_special_move(&self, _state: &MoveState, _board: &Board, _to: Square) -> Option<SpecialMovePlan> {
        None
    }

    fn free_continuation_available(&self, _state: &mut MoveState) -> bool {
        false
    }

    fn resolve_turn_end(&self, _state: &MoveState, _outcome: &mut TurnEndOutcome) {}
}

impl std::fmt::Debug for dyn Handler + Send + Sync {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn Handler")
    }
}

type Factory = fn() -> Box<dyn Handler + Send + Sync>;

/// Process-wide registry mapping [`Ability`] to a handler factory.
/// Populated once at process start (via [`builtin_registry`]); reads
/// thereafter are safe for concurrent use because the map is never
/// mutated again (spec.md §5, §9).
pub struct Registry {
    factories: Mutex<HashMap<Ability, Factory>>,
}

impl Registry {
    pub fn new() -> Self {
        Self {
            factories: Mutex::new(HashMap::new()),
        }
    }

    pub fn register(&self, ability: Ability, factory: Factory) -> Result<(), EngineError> {
        if ability == Ability::None {
            return Err(EngineError::InvalidAbility);
        }
        let mut map = self.factories.lock().unwrap();
        if map.contains_key(&ability) {
            return Err(EngineError::DuplicateRegistration);
        }
        map.insert(ability, factory);
        #[cfg(feature = "logging")]
        log::debug!("registered handler for {ability:?}");
        Ok(())
    }

    pub fn create(&self, ability: Ability) -> Result<Box<dyn Handler + Send + Sync>, EngineError> {
        let map = self.factories.lock().unwrap();
        let factory = map.get(&ability).ok_or(EngineError::AbilityNotRegistered)?;
        Ok(factory())
    }

    pub fn contains(&self, ability: Ability) -> bool {
        self.factories.lock().unwrap().contains_key(&ability)
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

static BUILTIN_REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    crate::abilities::register_builtins(&registry);
    registry
});

pub fn builtin_registry() -> &'static Registry {
    &BUILTIN_REGISTRY
}

/// Resolves a handler for `ability`, preferring `custom` (a side's own
/// registry of factory overrides) and falling back to the built-in
/// registry. Any resolution failure is treated as a no-op, per spec.md
/// §4.4 ("lookup returns a typed not-registered error that callers
/// convert to no-op").
fn resolve(custom: &Registry, ability: Ability) -> Option<Box<dyn Handler + Send + Sync>> {
    if custom.contains(ability) {
        return custom.create(ability).ok();
    }
    builtin_registry().create(ability).ok()
}

pub fn handler_for(custom: &Registry, ability: Ability) -> Option<Box<dyn Handler + Send + Sync>> {
    resolve(custom, ability)
}

/// Builds a move's handler table: the moving piece's own abilities
/// (ascending id), then any side-carried ability the piece doesn't
/// already have (ascending id). Both passes resolve through `custom`
/// falling back to the built-in registry; unresolvable abilities are
/// dropped silently.
pub fn build_handler_table(custom: &Registry, piece_abilities: AbilitySet, side_abilities: AbilitySet) -> Vec<Ability> {
    let mut table = Vec::new();
    for ability in Ability::ALL {
        if piece_abilities.contains(ability) && resolve(custom, ability).is_some() {
            table.push(ability);
        }
    }
    for ability in Ability::ALL {
        if !piece_abilities.contains(ability)
            && side_abilities.contains(ability)
            && resolve(custom, ability).is_some()
        {
            table.push(ability);
        }
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Noop;
    impl Handler for Noop {}

    #[test]
    fn register_rejects_none_and_duplicates() {
        let registry = Registry::new();
        assert_eq!(registry.register(Ability::None, || Box::new(Noop)), Err(EngineError::InvalidAbility));
        assert!(registry.register(Ability::DoOver, || Box::new(Noop)).is_ok());
        assert_eq!(
            registry.register(Ability::DoOver, || Box::new(Noop)),
            Err(EngineError::DuplicateRegistration)
        );
    }

    #[test]
    fn lookup_of_unregistered_ability_is_not_registered_error() {
        let registry = Registry::new();
        assert_eq!(registry.create(Ability::Scorch).unwrap_err(), EngineError::AbilityNotRegistered);
    }

    #[test]
    fn handler_table_orders_piece_then_side_abilities_ascending() {
        let mut piece_abilities = AbilitySet::EMPTY;
        piece_abilities.insert(Ability::Scorch);
        let mut side_abilities = AbilitySet::EMPTY;
        side_abilities.insert(Ability::DoOver);
        side_abilities.insert(Ability::Scorch);
        let table = build_handler_table(&Registry::new(), piece_abilities, side_abilities);
        assert_eq!(table, vec![Ability::Scorch, Ability::DoOver]);
    }
}
