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

//! A move-execution engine for an ability/element-driven chess variant:
//! step-budgeted multi-segment moves, an ordered capture cascade and a
//! handler-based ability dispatcher sitting on top of an otherwise
//! ordinary 8x8 board model.

pub mod ability;
pub mod abilities;
pub mod board;
pub mod capture;
pub mod castling;
pub mod dispatch;
pub mod engine;
pub mod error;
pub mod history;
pub mod legality;
pub mod material;
pub mod movegen;
pub mod piece;
pub mod square;
pub mod state;
pub mod status;
pub mod step_budget;

pub use ability::{Ability, AbilitySet};
pub use board::{Board, GameStatus};
pub use engine::{BoardState, Engine, PieceView, SideConfig};
pub use error::EngineError;
pub use material::{Color, Element, PieceType, Promotion};
pub use square::{Direction, Square};
pub use state::{MoveRequest, MoveState};
