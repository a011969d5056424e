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

//! The engine: the public lifecycle (`new`/`reset`/`set_side_config`/
//! `apply_move`/`state`) that wires the board, movegen, legality, step
//! budget, ability dispatch, capture cascade, history and status modules
//! together into one turn-based game (spec.md §4.5, §6).

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::ability::{Ability, AbilitySet};
use crate::board::Board;
use crate::capture;
use crate::castling::CastlingRights;
use crate::dispatch::{self, handler_for, Registry, SpecialMoveAction, TurnEndOutcome};
use crate::error::EngineError;
use crate::history::{self, History, HistoryDelta, ScalarDelta, SquareDelta};
use crate::legality::{self, direct_capture_allowed, leaves_own_king_in_check, path_passable};
use crate::material::{Color, Element, PieceType, Promotion};
use crate::movegen::{castling_destinations, destinations};
use crate::piece::Piece;
use crate::square::{Direction, Square};
use crate::state::{MoveRequest, MoveState};
use crate::status;

/// A side's pre-game selection: an element and a non-empty ability list
/// (spec.md §6 `SetSideConfig`).
#[derive(Debug, Clone, Default)]
pub struct SideConfig {
    pub abilities: Vec<Ability>,
    pub ability_set: AbilitySet,
    pub element: Element,
}

/// A fully serializable snapshot of the game, returned by [`Engine::state`]
/// (spec.md §6 `State`).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PieceView {
    pub id: u32,
    pub color: u8,
    pub color_name: &'static str,
    pub kind: u8,
    pub kind_name: char,
    pub square: String,
    pub abilities: u32,
    pub ability_names: Vec<String>,
    pub element: u8,
    pub element_name: String,
    pub block_dir: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BoardState {
    pub pieces: Vec<PieceView>,
    pub turn: &'static str,
    pub last_note: String,
    pub white_abilities: Vec<String>,
    pub black_abilities: Vec<String>,
    pub white_element: String,
    pub black_element: String,
    pub block_facing: HashMap<String, String>,
    pub locked: bool,
    pub in_check: bool,
    pub game_over: bool,
    pub status: &'static str,
    pub has_winner: bool,
    pub winner: Option<&'static str>,
    pub castling: u8,
    pub en_passant: Option<String>,
    pub promotion_choices: Vec<char>,
}

/// The move-execution engine (spec.md's `Engine`). Single-threaded: the
/// host is expected to serialize calls (spec.md §5).
pub struct Engine {
    board: Board,
    side_configs: [SideConfig; 2],
    configs_locked: bool,
    current_move: Option<MoveState>,
    history: History,
    temporal_slow: HashMap<Color, i32>,
    /// A per-engine registry of handler overrides. Empty by default, in
    /// which case every ability resolves through the process-wide
    /// built-in registry (spec.md §4.4).
    custom_registry: Registry,
}

impl Engine {
    pub fn new() -> Self {
        Self {
            board: Board::standard(),
            side_configs: Default::default(),
            configs_locked: false,
            current_move: None,
            history: History::new(),
            temporal_slow: HashMap::new(),
            custom_registry: Registry::new(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Restores the starting position and clears history; side configs
    /// are retained but the locked flag is cleared (spec.md §9, the
    /// "more permissive" Reset behavior).
    pub fn reset(&mut self) -> Result<(), EngineError> {
        self.board = Board::standard();
        for color in [Color::White, Color::Black] {
            self.apply_config_to_board(color);
        }
        self.history = History::new();
        self.current_move = None;
        self.temporal_slow.clear();
        self.configs_locked = false;
        self.update_status();
        Ok(())
    }

    pub fn set_side_config(&mut self, color: Color, abilities: Vec<Ability>, element: Element) -> Result<(), EngineError> {
        if self.configs_locked {
            return Err(EngineError::EngineLocked);
        }
        if abilities.is_empty() {
            return Err(EngineError::InvalidConfig);
        }
        let ability_set = AbilitySet::new(abilities.iter().copied());
        self.side_configs[color.to_index()] = SideConfig {
            abilities,
            ability_set,
            element,
        };
        self.apply_config_to_board(color);
        Ok(())
    }

    fn apply_config_to_board(&mut self, color: Color) {
        let config = self.side_configs[color.to_index()].clone();
        for piece in self.board.pieces_mut().filter(|p| p.color == color) {
            piece.abilities = config.ability_set;
            piece.element = config.element;
        }
    }

    /// Submits a move or move-continuation request (spec.md §6 `Move`).
    /// Locks side configs on the first call, win or lose.
    pub fn apply_move(&mut self, req: MoveRequest) -> Result<(), EngineError> {
        self.configs_locked = true;
        match self.current_move.take() {
            None => self.start_new_move(req),
            Some(state) => self.continue_move(state, req),
        }
    }

    fn side_abilities(&self, color: Color) -> AbilitySet {
        self.side_configs[color.to_index()].ability_set
    }

    fn start_new_move(&mut self, req: MoveRequest) -> Result<(), EngineError> {
        let piece = self.board.at(req.from).copied().ok_or(EngineError::InvalidMove)?;
        if piece.color != self.board.side_to_move() {
            return Err(EngineError::InvalidMove);
        }

        // A fresh turn starts a fresh note log (spec.md §3/§6: "for the
        // current turn"); the prior turn's notes are already captured in
        // that segment's own `ScalarDelta` for rewind purposes.
        self.board.clear_notes();

        if piece.kind == PieceType::King && is_castle_attempt(req.from, req.to) {
            return self.execute_castle(piece, req.from, req.to);
        }

        let (victim_square, is_ep) = self.validate_destination(&piece, req.from, req.to, req.dir)?;

        let side_abilities = self.side_abilities(piece.color);
        let handlers = dispatch::build_handler_table(&self.custom_registry, piece.abilities, side_abilities);
        let slow = self.temporal_slow.entry(piece.color).or_insert(0);
        let (budget, budget_notes) = crate::step_budget::compute(&piece, &handlers, &self.custom_registry, slow);

        let mut state = MoveState::new(piece, budget, handlers);
        for note in budget_notes {
            self.board.push_note(note);
        }
        for ability in state.handlers.clone() {
            if let Some(handler) = handler_for(&self.custom_registry, ability) {
                handler.on_move_start(&mut state);
            }
        }

        self.execute_segment(&mut state, req.from, req.to, req.dir, victim_square, is_ep, req.promotion, req.has_promotion)?;
        self.after_segment(state);
        Ok(())
    }

    fn continue_move(&mut self, mut state: MoveState, req: MoveRequest) -> Result<(), EngineError> {
        if req.from != state.piece.square {
            self.current_move = Some(state);
            return Err(EngineError::InvalidMove);
        }

        let special = state
            .handlers
            .clone()
            .into_iter()
            .filter(|a| matches!(a, Ability::SideStep | Ability::QuantumStep))
            .find_map(|ability| {
                handler_for(&self.custom_registry, ability).and_then(|handler| {
                    handler
                        .plan_special_move(&state, &self.board, req.to)
                        .map(|plan| (ability, plan))
                })
            });

        if let Some((ability, plan)) = special {
            self.execute_special_move(&mut state, ability, plan)?;
        } else {
            let piece = state.piece;
            let (victim_square, is_ep) = match self.validate_destination(&piece, req.from, req.to, req.dir) {
                Ok(v) => v,
                Err(e) => {
                    self.current_move = Some(state);
                    return Err(e);
                }
            };
            if let Err(e) =
                self.execute_segment(&mut state, req.from, req.to, req.dir, victim_square, is_ep, req.promotion, req.has_promotion)
            {
                return Err(e);
            }
        }
        self.after_segment(state);
        Ok(())
    }

    /// Generated-move membership, path passability, direct-capture
    /// gating, BlockPath's facing requirement/capture refusal, and
    /// king-safety — spec.md §4.2, §4.5 steps 2-4.
    fn validate_destination(
        &self,
        piece: &Piece,
        from: Square,
        to: Square,
        dir: Direction,
    ) -> Result<(Option<Square>, bool), EngineError> {
        if let Some(occupant) = self.board.at(to) {
            if occupant.color == piece.color {
                return Err(EngineError::InvalidMove);
            }
        }

        let is_ep = piece.kind == PieceType::Pawn
            && self.board.at(to).is_none()
            && self.board.en_passant() == Some(to)
            && to.file() != from.file();
        let victim_square = if is_ep {
            Some(Square::from_file_rank(to.file(), from.rank()))
        } else if self.board.at(to).is_some() {
            Some(to)
        } else {
            None
        };

        if !destinations(&self.board, piece).contains(to) {
            return Err(EngineError::InvalidMove);
        }

        let side_abilities = self.side_abilities(piece.color);
        let may_phase = legality::can_phase_through(&self.custom_registry, piece, side_abilities);
        if !path_passable(&self.board, piece, from, to, may_phase) {
            return Err(EngineError::InvalidMove);
        }

        if let Some(defender) = victim_square.and_then(|sq| self.board.at(sq)) {
            let is_scatter = piece.has(Ability::ScatterShot) && from.rank() == to.rank() && !is_ep;
            if !direct_capture_allowed(piece, defender, is_scatter) {
                return Err(EngineError::InvalidMove);
            }
            if legality::capture_blocked_by_block_path(piece, defender) {
                return Err(EngineError::CaptureBlocked);
            }
        }

        if piece.has(Ability::BlockPath) && piece.block_facing == Direction::None && dir == Direction::None {
            return Err(EngineError::BlockPathDirectionRequired);
        }

        if leaves_own_king_in_check(&self.board, from, to) {
            return Err(EngineError::InvalidMove);
        }

        Ok((victim_square, is_ep))
    }

    /// Runs one segment: cost computation, the capture cascade (which may
    /// trigger a Do-Over abort), relocation, promotion, and the matching
    /// history delta (spec.md §4.5 steps 5-9, §4.7).
    #[allow(clippy::too_many_arguments)]
    fn execute_segment(
        &mut self,
        state: &mut MoveState,
        from: Square,
        to: Square,
        dir: Direction,
        victim_square: Option<Square>,
        is_ep: bool,
        promotion_choice: Option<Promotion>,
        has_promotion: bool,
    ) -> Result<(), EngineError> {
        let board_before = self.board.clone();
        let temporal_slow_before = self.temporal_slow.clone();
        let current_move_before = Some(state.clone());

        let mut cost = 1i32;
        let is_slider = matches!(state.piece.kind, PieceType::Bishop | PieceType::Rook | PieceType::Queen);
        let prev_dir = if state.path.len() >= 2 {
            Direction::between(state.path[state.path.len() - 2], state.path[state.path.len() - 1])
        } else {
            Direction::None
        };
        let new_dir = Direction::between(from, to);
        if is_slider && prev_dir != Direction::None && new_dir != prev_dir {
            let mut consumed = false;
            for ability in state.handlers.clone() {
                if let Some(handler) = handler_for(&self.custom_registry, ability) {
                    if handler.on_direction_change(state) {
                        consumed = true;
                    }
                }
            }
            if !consumed {
                cost += 1;
            }
        }
        for ability in state.handlers.clone() {
            if let Some(handler) = handler_for(&self.custom_registry, ability) {
                handler.prepare_segment(state, &mut cost);
            }
        }
        let cost = cost.max(0);
        if cost > state.remaining_steps {
            return Err(EngineError::InvalidMove);
        }

        for ability in state.handlers.clone() {
            if let Some(handler) = handler_for(&self.custom_registry, ability) {
                handler.on_segment_start(state, &self.board);
            }
        }

        let mut cascade_notes = Vec::new();
        if let Some(vsq) = victim_square {
            // The segments already committed within *this* move, i.e. how
            // many of this move's own history deltas Do-Over may pop —
            // not the engine's whole session history (spec.md §4.7 point
            // 1, §9 "bounded depth... per active move").
            let plies_in_move = state.path.len().saturating_sub(1);
            let result = capture::resolve_capture_cascade(&mut self.board, state, &self.custom_registry, vsq, plies_in_move);
            if result.do_over.is_some() {
                self.board = board_before;
                if let Some(sq) = result.do_over_square {
                    if let Some(p) = self.board.at_mut(sq) {
                        p.pending_do_over = false;
                    }
                }
                let plies = plies_in_move.min(history::MAX_DO_OVER_PLIES);
                if plies > 0 {
                    self.history.rewind(&mut self.board, plies, &mut self.temporal_slow);
                }
                // REWIND always lands on IDLE (spec.md §4.5): the interrupted
                // move is abandoned outright, not resumed, so the mover is
                // free to start a fresh move with any piece next.
                self.current_move = None;
                self.board.push_note(format!("Do-Over: rewound {plies} plies"));
                #[cfg(feature = "logging")]
                log::trace!("Do-Over rewound {plies} plies at {vsq:?}");
                self.update_status();
                return Err(EngineError::DoOverActivated(format!("rewound {plies} plies")));
            }
            cascade_notes = result.notes;
            state.last_segment_captured = true;
            if let Some(victim) = board_before.at(vsq).copied() {
                state.captures.push(victim);
                for ability in state.handlers.clone() {
                    if let Some(handler) = handler_for(&self.custom_registry, ability) {
                        handler.on_capture(state, &victim);
                    }
                }
            }
            if result.force_turn_end {
                state.turn_ended = true;
            }
        } else {
            state.last_segment_captured = false;
        }

        self.board.relocate(from, to);
        if dir != Direction::None && state.piece.has(Ability::BlockPath) {
            if let Some(p) = self.board.at_mut(to) {
                if p.block_facing == Direction::None {
                    p.block_facing = dir;
                }
            }
        }
        if let Some(p) = self.board.at_mut(to) {
            p.resurrection_window = false;
        }
        state.piece.square = to;
        state.path.push(to);

        state.created_en_passant = false;
        if state.piece.kind == PieceType::Pawn && (to.rank() as i16 - from.rank() as i16).abs() == 2 {
            let ep_target = Square::from_file_rank(from.file(), (from.rank() + to.rank()) / 2);
            self.board.set_en_passant(Some(ep_target));
            state.created_en_passant = true;
        }

        if state.piece.kind == PieceType::King {
            self.board.castling_mut().clear_color(state.piece.color);
        }
        clear_rook_rights_if_moved(&mut self.board, from, state.piece.color, state.piece.kind);
        if let Some(vsq) = victim_square {
            if let Some(victim) = board_before.at(vsq) {
                clear_rook_rights_if_moved(&mut self.board, vsq, victim.color, victim.kind);
            }
        }

        if state.piece.kind == PieceType::Pawn && (to.rank() == 7 || to.rank() == 0) {
            let chosen = promotion_choice
                .filter(|p| has_promotion && self.board.promotion_choices().contains(p))
                .or_else(|| {
                    Promotion::CANONICAL_ORDER
                        .iter()
                        .copied()
                        .find(|p| self.board.promotion_choices().contains(p))
                })
                .unwrap_or(Promotion::Queen);
            if let Some(p) = self.board.at_mut(to) {
                p.kind = chosen.into();
            }
            state.piece.kind = chosen.into();
            state.promotion = Some(chosen);
            state.promotion_set = true;
            cascade_notes.push(format!("Pawn promoted to {}", PieceType::from(chosen).letter()));
        }

        for ability in state.handlers.clone() {
            if let Some(handler) = handler_for(&self.custom_registry, ability) {
                handler.on_post_segment(state);
            }
        }
        for ability in state.handlers.clone() {
            if let Some(handler) = handler_for(&self.custom_registry, ability) {
                handler.on_segment_resolved(state);
            }
        }

        state.remaining_steps = (state.remaining_steps - cost).max(0);
        for note in cascade_notes {
            self.board.push_note(note);
        }

        self.push_history_delta(board_before, temporal_slow_before, current_move_before);
        Ok(())
    }

    fn execute_special_move(
        &mut self,
        state: &mut MoveState,
        ability: Ability,
        plan: dispatch::SpecialMovePlan,
    ) -> Result<(), EngineError> {
        if plan.cost > state.remaining_steps {
            return Err(EngineError::InvalidMove);
        }
        let board_before = self.board.clone();
        let temporal_slow_before = self.temporal_slow.clone();
        let current_move_before = Some(state.clone());

        let from = state.piece.square;
        match plan.action {
            SpecialMoveAction::Move => {
                self.board.relocate(from, plan.to);
            }
            SpecialMoveAction::Swap => {
                let mut a = self.board.remove(from).expect("mover present at its own square");
                let mut b = self.board.remove(plan.to).expect("special-move swap target must be occupied");
                std::mem::swap(&mut a.square, &mut b.square);
                self.board.place(a);
                self.board.place(b);
            }
        }
        state.piece.square = plan.to;
        state.path.push(plan.to);
        if ability == Ability::SideStep {
            state.runtime(Ability::SideStep).used = true;
            if let Some(p) = self.board.at_mut(plan.to) {
                p.resurrection_window = false;
            }
        } else {
            state.runtime(Ability::QuantumStep).used = true;
        }
        state.remaining_steps = (state.remaining_steps - plan.cost).max(0);

        self.push_history_delta(board_before, temporal_slow_before, current_move_before);
        self.board.push_note(plan.note);
        Ok(())
    }

    fn push_history_delta(&mut self, board_before: Board, temporal_slow_before: HashMap<Color, i32>, current_move_before: Option<MoveState>) {
        let mut squares = Vec::new();
        for idx in 0..64u8 {
            let sq = Square::new(idx);
            if board_before.at(sq) != self.board.at(sq) {
                squares.push(SquareDelta {
                    square: sq,
                    prior: board_before.at(sq).copied(),
                });
            }
        }
        let scalar = ScalarDelta::snapshot(&board_before, &temporal_slow_before);
        self.history.push(HistoryDelta {
            squares,
            scalar,
            current_move: current_move_before,
        });
    }

    /// Decides whether the in-flight move continues, or ends the turn
    /// (spec.md §4.5 step 9: zero budget with no free continuation, or a
    /// handler-forced turn end).
    fn after_segment(&mut self, mut state: MoveState) {
        if !state.turn_ended && state.remaining_steps > 0 {
            self.board.push_note(format!("{} steps remaining", state.remaining_steps));
            self.current_move = Some(state);
            return;
        }
        if !state.turn_ended {
            let mut free = false;
            for ability in state.handlers.clone() {
                if let Some(handler) = handler_for(&self.custom_registry, ability) {
                    if handler.free_continuation_available(&mut state) {
                        free = true;
                    }
                }
            }
            if free {
                self.board.push_note(format!("{} steps remaining", state.remaining_steps));
                self.current_move = Some(state);
                return;
            }
        }
        self.finish_turn(state);
    }

    fn finish_turn(&mut self, state: MoveState) {
        let mut outcome = TurnEndOutcome::default();
        for ability in state.handlers.clone() {
            if let Some(handler) = handler_for(&self.custom_registry, ability) {
                handler.resolve_turn_end(&state, &mut outcome);
            }
        }
        for (color, slow) in outcome.slow {
            let entry = self.temporal_slow.entry(color).or_insert(0);
            *entry = (*entry).max(slow);
        }
        for note in outcome.notes {
            self.board.push_note(note);
        }
        if !state.created_en_passant {
            self.board.set_en_passant(None);
        }
        self.board.flip_side_to_move();
        self.update_status();
        self.current_move = None;
        self.history.truncate_to_horizon();
    }

    fn execute_castle(&mut self, king: Piece, from: Square, to: Square) -> Result<(), EngineError> {
        let rank = from.rank();
        let candidates = castling_destinations(&self.board, king.color);
        let chosen = candidates
            .into_iter()
            .find(|(king_dest, _, _, king_src)| *king_dest == to && *king_src == from)
            .ok_or(EngineError::InvalidMove)?;
        let (king_dest, rook_src, rook_dest, king_src) = chosen;

        if legality::is_attacked(&self.board, king_src, king.color.opposite())
            || legality::is_attacked(&self.board, king_dest, king.color.opposite())
        {
            return Err(EngineError::InvalidMove);
        }
        let transit = Square::from_file_rank((king_src.file() + king_dest.file()) / 2, rank);
        if legality::is_attacked(&self.board, transit, king.color.opposite()) {
            return Err(EngineError::InvalidMove);
        }

        let board_before = self.board.clone();
        let temporal_slow_before = self.temporal_slow.clone();
        let current_move_before = self.current_move.clone();

        self.board.relocate(king_src, king_dest);
        self.board.relocate(rook_src, rook_dest);
        self.board.castling_mut().clear_color(king.color);
        self.board.push_note("Castled".to_string());

        self.push_history_delta(board_before, temporal_slow_before, current_move_before);
        self.board.set_en_passant(None);
        self.board.flip_side_to_move();
        self.update_status();
        self.current_move = None;
        self.history.truncate_to_horizon();
        Ok(())
    }

    fn update_status(&mut self) {
        let result = status::evaluate(&self.board, self.board.side_to_move());
        self.board.in_check = result.in_check;
        self.board.game_over = result.game_over;
        self.board.has_winner = result.has_winner;
        self.board.winner = result.winner;
        self.board.status = result.status;
        self.board.push_note(result.status.as_str().to_string());
    }

    pub fn state(&self) -> BoardState {
        let pieces = self
            .board
            .pieces()
            .map(|p| PieceView {
                id: p.id,
                color: p.color.to_index() as u8,
                color_name: p.color.canonical_name(),
                kind: p.kind.to_index() as u8,
                kind_name: p.kind.letter(),
                square: p.square.to_coord(),
                abilities: p.abilities.iter().fold(0u32, |acc, a| acc | a.bit()),
                ability_names: p.abilities.iter().map(|a| a.to_string()).collect(),
                element: p.element as u8,
                element_name: p.element.to_string(),
                block_dir: p.block_facing.to_str().to_string(),
            })
            .collect();
        let mut block_facing = HashMap::new();
        for p in self.board.pieces().filter(|p| p.has(Ability::BlockPath)) {
            block_facing.insert(p.square.to_coord(), p.block_facing.to_str().to_string());
        }
        BoardState {
            pieces,
            turn: color_name(self.board.side_to_move()),
            last_note: self.board.last_note(),
            white_abilities: self.side_configs[Color::White.to_index()]
                .abilities
                .iter()
                .map(|a| a.to_string())
                .collect(),
            black_abilities: self.side_configs[Color::Black.to_index()]
                .abilities
                .iter()
                .map(|a| a.to_string())
                .collect(),
            white_element: self.side_configs[Color::White.to_index()].element.to_string(),
            black_element: self.side_configs[Color::Black.to_index()].element.to_string(),
            block_facing,
            locked: self.configs_locked,
            in_check: self.board.in_check,
            game_over: self.board.game_over,
            status: self.board.status.as_str(),
            has_winner: self.board.has_winner,
            winner: self.board.winner.map(color_name),
            castling: self.board.castling().raw(),
            en_passant: self.board.en_passant().map(|sq| sq.to_coord()),
            promotion_choices: self.board.promotion_choices().iter().map(|p| PieceType::from(*p).letter()).collect(),
        }
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

fn color_name(color: Color) -> &'static str {
    color.canonical_name()
}

fn is_castle_attempt(from: Square, to: Square) -> bool {
    from.rank() == to.rank() && (to.file() as i16 - from.file() as i16).abs() == 2
}

fn clear_rook_rights_if_moved(board: &mut Board, square: Square, color: Color, kind: PieceType) {
    if kind != PieceType::Rook {
        return;
    }
    let home_rank = match color {
        Color::White => 0,
        Color::Black => 7,
    };
    if square.rank() != home_rank {
        return;
    }
    let rights = board.castling_mut();
    if square.file() == 0 {
        rights.clear_queenside(color);
    } else if square.file() == 7 {
        rights.clear_kingside(color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::square::Square;

    fn coord(s: &str) -> Square {
        Square::try_from_coord(s).unwrap()
    }

    fn req(from: &str, to: &str) -> MoveRequest {
        MoveRequest {
            from: coord(from),
            to: coord(to),
            dir: Direction::None,
            promotion: None,
            has_promotion: false,
        }
    }

    #[test]
    fn s1_do_over_rewind() {
        let mut engine = Engine::new();
        engine.set_side_config(Color::White, vec![Ability::DoOver], Element::Light).unwrap();
        engine.set_side_config(Color::Black, vec![Ability::DoOver], Element::Shadow).unwrap();

        engine.apply_move(req("e2", "e4")).unwrap();
        engine.apply_move(req("d7", "d5")).unwrap();
        let result = engine.apply_move(req("e4", "d5"));
        assert!(matches!(result, Err(EngineError::DoOverActivated(_))));

        assert_eq!(engine.board().side_to_move(), Color::White);
        assert_eq!(engine.board().at(coord("e4")).unwrap().color, Color::White);
        assert_eq!(engine.board().at(coord("d5")).unwrap().color, Color::Black);
        assert!(engine.board().last_note().contains("Do-Over"));

        // REWIND lands on IDLE: White is free to start an unrelated fresh
        // move, not pinned to continuing with the e4 pawn.
        engine.apply_move(req("b1", "c3")).unwrap();
        assert_eq!(engine.board().at(coord("c3")).unwrap().kind, PieceType::Knight);
    }

    #[test]
    fn s4_castling_kingside() {
        let mut engine = Engine::new();
        engine.board = Board::empty();
        engine.board.place_new(Color::White, PieceType::King, coord("e1"));
        engine.board.place_new(Color::White, PieceType::Rook, coord("h1"));
        engine.board.place_new(Color::Black, PieceType::King, coord("e8"));
        let mut rights = CastlingRights::ALL;
        rights.clear_queenside(Color::White);
        rights.clear_kingside(Color::Black);
        rights.clear_queenside(Color::Black);
        *engine.board.castling_mut() = rights;
        engine.set_side_config(Color::White, vec![Ability::Obstinant], Element::None).unwrap();
        engine.set_side_config(Color::Black, vec![Ability::Obstinant], Element::None).unwrap();

        engine.apply_move(req("e1", "g1")).unwrap();
        assert_eq!(engine.board().at(coord("g1")).unwrap().kind, PieceType::King);
        assert_eq!(engine.board().at(coord("f1")).unwrap().kind, PieceType::Rook);
        assert!(!engine.board().castling().kingside(Color::White));
    }

    #[test]
    fn s6_stalemate() {
        let mut engine = Engine::new();
        engine.board = Board::empty();
        engine.board.place_new(Color::White, PieceType::King, coord("c6"));
        engine.board.place_new(Color::White, PieceType::Queen, coord("c8"));
        engine.board.place_new(Color::Black, PieceType::King, coord("a8"));
        engine.set_side_config(Color::White, vec![Ability::Obstinant], Element::None).unwrap();
        engine.set_side_config(Color::Black, vec![Ability::Obstinant], Element::None).unwrap();

        engine.apply_move(req("c8", "c7")).unwrap();
        let state = engine.state();
        assert!(state.game_over);
        assert_eq!(state.status, "stalemate");
        assert!(!state.has_winner);
        assert!(!state.in_check);
    }
}
