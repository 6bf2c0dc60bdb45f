// In: src/lib.rs

//! Pokemon Random Team Generator
//!
//! A procedural team-composition core for turn-based battles: free-form
//! random rosters synthesized move-by-move under strategic heuristics, and
//! curated factory rosters drawn from per-tier authored set tables under
//! team-wide coverage rules. Consumes read-only data tables and an injected
//! random source; owns no I/O beyond loading those tables.

// --- MODULE DECLARATIONS ---
// This declares the module hierarchy for the crate.
pub mod counter;
pub mod dex;
pub mod errors;
pub mod factory;
pub mod factory_sets;
pub mod generator;
pub mod monitor;
pub mod pokemon_set;
pub mod random_team;
pub mod rejection;
pub mod sampler;
pub mod set_builder;
pub mod team_data;

// --- PUBLIC API RE-EXPORTS ---
// This section defines the public-facing API of the `pokemon-teamgen`
// crate, making it easy for users to import the most important types
// directly.

// --- From the `schema` crate ---
// Re-export all core data definitions and static enums.
pub use schema::{
    // Supporting Types & Enums
    BaseStats,
    Id,
    ItemData,
    // Core Enums
    MoveCategory,
    // Core Data Structs
    MoveData,
    PokemonType,
    SpeciesData,
    StatSpread,
};

// --- From this crate's modules (`src/`) ---

// The generator and its two roster entry points (methods on TeamGenerator).
pub use generator::{TeamGenerator, MAX_LEVEL, NO_ABILITY};

// Static table registries.
pub use dex::{Dex, DEFAULT_SPECIES};
pub use factory_sets::{FactorySet, FactorySets, FactorySpeciesSets};

// Roster output and build-time accumulators.
pub use pokemon_set::PokemonSet;
pub use team_data::{FactoryTeamData, TeamDetails};

// Move-pool analysis used by the set builder.
pub use counter::{MoveCounter, SetupType};

// Fault reporting seam.
pub use monitor::{FaultSink, LogFaultSink};

// Crate-specific error and result types.
pub use errors::{
    DataLoadError, FactoryDataError, SpeciesDataError, TeamGenError, TeamGenResult,
};
