//! The generator itself: a borrow of the static tables plus a fault sink.
//!
//! One value serves both generation modes; every entry point takes the
//! random source as an argument, so callers control reproducibility.

use crate::dex::Dex;
use crate::factory_sets::FactorySets;
use crate::monitor::{FaultSink, LOG_FAULT_SINK};
use schema::Id;

/// Placeholder ability label; ability mechanics are outside this core.
pub const NO_ABILITY: &str = "No Ability";

/// Every generated set battles at the level cap.
pub const MAX_LEVEL: u8 = 100;

/// Little Cup sets battle at its own cap instead.
pub const LC_LEVEL: u8 = 5;

pub const DEFAULT_HAPPINESS: u8 = 70;

/// Shiny odds, expressed as a `numerator / denominator` weighted coin.
pub const SHINY_CHANCE: (u32, u32) = (1, 1024);

pub struct TeamGenerator<'a> {
    pub(crate) dex: &'a Dex,
    pub(crate) factory_sets: &'a FactorySets,
    pub(crate) fault_sink: &'a dyn FaultSink,
}

impl<'a> TeamGenerator<'a> {
    pub fn new(dex: &'a Dex, factory_sets: &'a FactorySets) -> Self {
        TeamGenerator {
            dex,
            factory_sets,
            fault_sink: &LOG_FAULT_SINK,
        }
    }

    /// Replace the default log-backed fault sink, e.g. with a recording
    /// sink in tests.
    pub fn with_fault_sink(mut self, sink: &'a dyn FaultSink) -> Self {
        self.fault_sink = sink;
        self
    }

    /// Display name for a species id; falls back to the raw id when the
    /// registry has no record.
    pub(crate) fn display_name(&self, id: &Id) -> String {
        self.dex
            .species(id)
            .map(|data| data.name.clone())
            .unwrap_or_else(|| id.to_string())
    }
}
