// Team Generator Schema - Shared type definitions
// This crate contains the core enums and data records shared between the
// generator crate and whatever loads its data tables, so both sides agree
// on one serde representation.

// Re-export the main types
pub use id::*;
pub use move_data::*;
pub use move_types::*;
pub use pokemon_types::*;
pub use species_data::*;

pub mod id;
pub mod move_data;
pub mod move_types;
pub mod pokemon_types;
pub mod species_data;
