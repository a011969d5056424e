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

//! Concrete ability handlers. Every [`crate::ability::Ability`] variant
//! gets a registered handler, even ones whose only effect is a static
//! flag consulted directly by `legality`/`capture`/`movegen` (those
//! register a pure no-op so the registry stays the single source of
//! truth for "is this ability known").

mod budget;
mod capture_penalty;
mod phasing;
mod segment;
mod special_move;
mod turn_end;

pub use phasing::static_phase_allows;

use crate::ability::Ability;
use crate::dispatch::{Handler, Registry};

macro_rules! unit_handler {
    ($name:ident) => {
        pub struct $name;
        impl Handler for $name {}
    };
}

// Abilities with no dispatcher hook at all: their effect is a static flag
// or a board-wide cascade read directly by legality.rs / movegen.rs /
// capture.rs rather than a single per-call hook return value.
unit_handler!(DoOverHandler);
unit_handler!(BlockPathHandler);
unit_handler!(DoubleKillHandler);
unit_handler!(ObstinantHandler);
unit_handler!(GaleLiftHandler);
unit_handler!(ScatterShotHandler);
unit_handler!(StalwartHandler);
unit_handler!(BelligerentHandler);
unit_handler!(IndomitableHandler);
unit_handler!(QuantumKillHandler);

pub(crate) fn register_builtins(registry: &Registry) {
    use budget::{RadiantVisionHandler, SchrodingersLaughHandler, ScorchHandler, TailwindHandler, UmbralStepHandler};
    use capture_penalty::{BastionHandler, ChainKillHandler, OverloadHandler, PoisonousMeatHandler, ResurrectionHandler};
    use segment::{BlazeRushHandler, FloodWakeHandler, MistShroudHandler};
    use special_move::{QuantumStepHandler, SideStepHandler};
    use turn_end::TemporalLockHandler;

    let _ = registry.register(Ability::DoOver, || Box::new(DoOverHandler));
    let _ = registry.register(Ability::BlockPath, || Box::new(BlockPathHandler));
    let _ = registry.register(Ability::DoubleKill, || Box::new(DoubleKillHandler));
    let _ = registry.register(Ability::Obstinant, || Box::new(ObstinantHandler));
    let _ = registry.register(Ability::Scorch, || Box::new(ScorchHandler));
    let _ = registry.register(Ability::BlazeRush, || Box::new(BlazeRushHandler));
    let _ = registry.register(Ability::FloodWake, || Box::new(FloodWakeHandler));
    let _ = registry.register(Ability::MistShroud, || Box::new(MistShroudHandler));
    let _ = registry.register(Ability::Bastion, || Box::new(BastionHandler));
    let _ = registry.register(Ability::GaleLift, || Box::new(GaleLiftHandler));
    let _ = registry.register(Ability::Tailwind, || Box::new(TailwindHandler));
    let _ = registry.register(Ability::ScatterShot, || Box::new(ScatterShotHandler));
    let _ = registry.register(Ability::Overload, || Box::new(OverloadHandler));
    let _ = registry.register(Ability::RadiantVision, || Box::new(RadiantVisionHandler));
    let _ = registry.register(Ability::UmbralStep, || Box::new(UmbralStepHandler));
    let _ = registry.register(Ability::SideStep, || Box::new(SideStepHandler));
    let _ = registry.register(Ability::QuantumStep, || Box::new(QuantumStepHandler));
    let _ = registry.register(Ability::Stalwart, || Box::new(StalwartHandler));
    let _ = registry.register(Ability::Belligerent, || Box::new(BelligerentHandler));
    let _ = registry.register(Ability::Indomitable, || Box::new(IndomitableHandler));
    let _ = registry.register(Ability::QuantumKill, || Box::new(QuantumKillHandler));
    let _ = registry.register(Ability::ChainKill, || Box::new(ChainKillHandler));
    let _ = registry.register(Ability::PoisonousMeat, || Box::new(PoisonousMeatHandler));
    let _ = registry.register(Ability::Resurrection, || Box::new(ResurrectionHandler));
    let _ = registry.register(Ability::TemporalLock, || Box::new(TemporalLockHandler));
    let _ = registry.register(Ability::SchrodingersLaugh, || Box::new(SchrodingersLaughHandler));
}
