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

//! Sentinel errors surfaced at the engine boundary (spec.md §7).
//!
//! `DoOverActivated` is soft: the caller's move was accepted, a rewind
//! happened, and `State()` should be re-read. Everything else is a hard
//! failure. Lifecycle code must special-case `DoOverActivated` rather than
//! treat it like any other `Err`.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("invalid move")]
    InvalidMove,

    #[error("capture blocked by BlockPath")]
    CaptureBlocked,

    #[error("BlockPath piece must choose a facing direction on its first move")]
    BlockPathDirectionRequired,

    #[error("Do-Over activated: {0}")]
    DoOverActivated(String),

    #[error("invalid side configuration")]
    InvalidConfig,

    #[error("engine is locked: side configuration cannot change after the first move")]
    EngineLocked,

    #[error("ability not registered")]
    AbilityNotRegistered,

    #[error("ability already registered")]
    DuplicateRegistration,

    #[error("nil factory cannot be registered")]
    NilFactory,

    #[error("invalid ability")]
    InvalidAbility,

    #[error("nil handler")]
    NilHandler,
}

impl EngineError {
    #[inline]
    pub fn is_soft(&self) -> bool {
        matches!(self, EngineError::DoOverActivated(_))
    }
}

/// Used only internally between a [`crate::dispatch::Handler`] and the
/// dispatcher to veto phasing; never surfaced across the engine boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PhaseDenied;
